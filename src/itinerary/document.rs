//! Shareable itinerary document.
//!
//! The same week renders two ways: HTML for the email body and plain text
//! for the clipboard and file export.

use std::fmt::Write as _;

use crate::constants::document::{ENTRY_SEPARATOR, TITLE};
use crate::types::Day;

/// One "name - category" line of a day section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentEntry {
    /// Activity name.
    pub name: String,
    /// Category display name.
    pub category: String,
}

/// Heading plus entries for one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySection {
    /// The day this section covers.
    pub day: Day,
    /// Activities for the day, in insertion order. May be empty.
    pub entries: Vec<DocumentEntry>,
}

/// A snapshot of the week, one section per day in Monday-first order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItineraryDocument {
    /// Seven sections, always present.
    pub sections: Vec<DaySection>,
}

impl ItineraryDocument {
    /// Section for `day`.
    pub fn section(&self, day: Day) -> Option<&DaySection> {
        self.sections.iter().find(|s| s.day == day)
    }

    /// Total number of entries across all days.
    pub fn entry_count(&self) -> usize {
        self.sections.iter().map(|s| s.entries.len()).sum()
    }

    /// Render as an HTML fragment suitable for an email body.
    pub fn to_html(&self) -> String {
        let mut out = format!("<h1>{TITLE}</h1>\n");
        for section in &self.sections {
            let _ = writeln!(out, "<h2>{}</h2>", section.day);
            out.push_str("<ul>\n");
            for entry in &section.entries {
                let _ = writeln!(
                    out,
                    "<li>{}{ENTRY_SEPARATOR}{}</li>",
                    escape_html(&entry.name),
                    escape_html(&entry.category)
                );
            }
            out.push_str("</ul>\n");
        }
        out
    }

    /// Render as plain text.
    pub fn to_text(&self) -> String {
        let mut out = format!("{TITLE}\n{}\n", "=".repeat(TITLE.len()));
        for section in &self.sections {
            let _ = write!(out, "\n{}\n", section.day);
            for entry in &section.entries {
                let _ = writeln!(out, "  - {}{ENTRY_SEPARATOR}{}", entry.name, entry.category);
            }
        }
        out
    }
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
