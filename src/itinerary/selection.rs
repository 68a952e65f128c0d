//! Ordered category selection.
//!
//! Order matters: the first selected category is the one recorded on new
//! activities, so toggling appends rather than sorting.

use crate::types::Category;

/// Categories the user has switched on, in the order they were picked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategorySelection {
    selected: Vec<Category>,
}

impl CategorySelection {
    /// Create an empty selection.
    pub const fn new() -> Self {
        Self { selected: Vec::new() }
    }

    /// Switch a category on (appended last) or off.
    /// Returns whether it is selected afterwards.
    pub fn toggle(&mut self, category: Category) -> bool {
        if let Some(pos) = self.selected.iter().position(|c| *c == category) {
            self.selected.remove(pos);
            false
        } else {
            self.selected.push(category);
            true
        }
    }

    /// Whether `category` is selected.
    pub fn contains(&self, category: Category) -> bool {
        self.selected.contains(&category)
    }

    /// The category new activities are recorded under.
    pub fn primary(&self) -> Option<Category> {
        self.selected.first().copied()
    }

    /// Selected categories in pick order.
    pub fn as_slice(&self) -> &[Category] {
        &self.selected
    }

    /// Check if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_preserves_pick_order() {
        let mut selection = CategorySelection::new();
        assert!(selection.toggle(Category::Golf));
        assert!(selection.toggle(Category::Food));
        assert_eq!(selection.as_slice(), &[Category::Golf, Category::Food]);
        assert_eq!(selection.primary(), Some(Category::Golf));
    }

    #[test]
    fn test_toggle_off_promotes_next() {
        let mut selection = CategorySelection::new();
        selection.toggle(Category::Golf);
        selection.toggle(Category::Food);
        assert!(!selection.toggle(Category::Golf));
        assert_eq!(selection.primary(), Some(Category::Food));
        assert!(!selection.contains(Category::Golf));
    }
}
