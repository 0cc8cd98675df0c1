//! Live search over rendered cards.

use crate::view::CatalogView;

/// The current search input.
///
/// Filtering is recomputed from scratch on every change; there is no index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilter {
    query: String,
}

impl SearchFilter {
    /// Raw input as typed.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Lowercased term used for matching.
    #[must_use]
    pub fn term(&self) -> String {
        self.query.to_lowercase()
    }

    /// Replace the input.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Append a typed character.
    pub fn push(&mut self, c: char) {
        self.query.push(c);
    }

    /// Remove the last character.
    pub fn pop(&mut self) {
        self.query.pop();
    }

    /// Show each card iff the term occurs in its lowercased name or
    /// description. Returns the number of visible cards.
    pub fn apply(&self, view: &mut CatalogView) -> usize {
        let term = self.term();
        let mut visible = 0;
        for card in view.sections.iter_mut().flat_map(|s| s.cards.iter_mut()) {
            card.visible = card.matches(&term);
            if card.visible {
                visible += 1;
            }
        }
        visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogDocument, Category, Item};

    fn view() -> CatalogView {
        let item = |name: &str, desc: &str| Item {
            name: name.to_string(),
            desc: desc.to_string(),
            path: "/x".to_string(),
            inner_desc: None,
        };
        let doc = CatalogDocument {
            categories: vec![
                Category {
                    name: "Tools".to_string(),
                    items: vec![item("Echo", "Repeats text"), item("Key Check", "Validates key")],
                },
                Category {
                    name: "Media".to_string(),
                    items: vec![item("Pixel", "Tiny PNG image")],
                },
            ],
            ..CatalogDocument::default()
        };
        CatalogView::render(&doc)
    }

    #[test]
    fn empty_term_shows_everything() {
        let mut view = view();
        let filter = SearchFilter::default();
        assert_eq!(filter.apply(&mut view), 3);
        assert!(view.sections.iter().all(|s| s.header_visible()));
    }

    #[test]
    fn matches_name_or_description_case_insensitively() {
        let mut view = view();
        let mut filter = SearchFilter::default();
        filter.set_query("PNG");
        assert_eq!(filter.apply(&mut view), 1);
        assert!(!view.sections[0].header_visible());
        assert!(view.sections[1].header_visible());

        filter.set_query("ech");
        assert_eq!(filter.apply(&mut view), 1);
        assert!(view.sections[0].header_visible());
        assert!(!view.sections[1].header_visible());
    }

    #[test]
    fn no_match_hides_all_cards_and_headers() {
        let mut view = view();
        let mut filter = SearchFilter::default();
        filter.set_query("zzz");
        assert_eq!(filter.apply(&mut view), 0);
        assert!(view.cards().all(|c| !c.visible));
        assert!(view.sections.iter().all(|s| !s.header_visible()));
    }

    #[test]
    fn clearing_the_query_restores_cards() {
        let mut view = view();
        let mut filter = SearchFilter::default();
        filter.push('z');
        filter.apply(&mut view);
        filter.pop();
        assert_eq!(filter.apply(&mut view), 3);
    }
}
