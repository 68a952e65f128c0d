//! Local sharing of the itinerary: clipboard and file export.

use std::path::{Path, PathBuf};

use arboard::Clipboard;

use crate::error::{Error, Result};
use crate::itinerary::ItineraryDocument;

/// Copy the plain-text document to the system clipboard.
pub fn copy_to_clipboard(document: &ItineraryDocument) -> Result<()> {
    Clipboard::new()
        .and_then(|mut cb| cb.set_text(document.to_text()))
        .map_err(|e| Error::Clipboard(e.to_string()))
}

/// Write the document to `path`, choosing HTML or text by extension.
///
/// A leading `~` is expanded. Returns the path actually written.
pub fn export_to_file(document: &ItineraryDocument, path: &str) -> Result<PathBuf> {
    let path = PathBuf::from(shellexpand::tilde(path.trim()).to_string());
    if path.as_os_str().is_empty() {
        return Err(Error::config("No export path given", "Use :export <path>"));
    }

    let body = if is_html_path(&path) { document.to_html() } else { document.to_text() };
    fs_err::write(&path, body).map_err(|e| Error::io(e, path.clone()))?;
    tracing::info!("Exported itinerary to {}", path.display());
    Ok(path)
}

fn is_html_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("html") || e.eq_ignore_ascii_case("htm"))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::itinerary::ItineraryStore;
    use crate::types::{Category, Day};

    #[test]
    fn test_export_text_and_html() {
        let mut store = ItineraryStore::new();
        store.add_activity("Brunch", &[Category::Cafe], Day::Saturday);
        let document = store.render_document();
        let dir = tempfile::tempdir().unwrap();

        let text_path = dir.path().join("week.txt");
        let written = export_to_file(&document, text_path.to_str().unwrap()).unwrap();
        let text = std::fs::read_to_string(&written).unwrap();
        assert!(text.contains("Brunch - Cafés"));

        let html_path = dir.path().join("week.HTML");
        export_to_file(&document, html_path.to_str().unwrap()).unwrap();
        let html = std::fs::read_to_string(&html_path).unwrap();
        assert!(html.contains("<li>Brunch - Cafés</li>"));
    }

    #[test]
    fn test_export_to_missing_dir_fails() {
        let document = ItineraryStore::new().render_document();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("week.txt");
        let err = export_to_file(&document, path.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn test_export_requires_path() {
        let document = ItineraryStore::new().render_document();
        assert!(matches!(export_to_file(&document, "  "), Err(Error::Config { .. })));
    }
}
