//! Directory view of a catalog.
//!
//! [`CatalogView::render`] turns a [`CatalogDocument`] into the model the
//! explorer draws: branding text with fixed fallbacks, the link strip, and
//! one section per category whose cards are sorted by name.

use std::cmp::Ordering;

use chrono::Datelike;
use icu_collator::{Collator, CollatorOptions, Strength};

use crate::catalog::{CatalogDocument, Item};
use crate::form::ParamForm;

const DEFAULT_NAME: &str = "FR3 UI";
const DEFAULT_OWNER: &str = "FR3";
const DEFAULT_VERSION: &str = "v1.0";
const DEFAULT_STATUS: &str = "Active!";
const DEFAULT_DESCRIPTION: &str = "Simple API's";

/// Text slots filled from the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branding {
    /// Window/page title.
    pub title: String,
    /// Footer copyright line.
    pub footer: String,
    /// Header heading.
    pub header: String,
    /// Collection name.
    pub name: String,
    /// Version label.
    pub version: String,
    /// Status badge.
    pub status: String,
    /// Description paragraph.
    pub description: String,
}

impl Branding {
    /// Fill every slot from the document, using the fallback literal for
    /// missing or empty fields.
    #[must_use]
    pub fn from_document(doc: &CatalogDocument) -> Self {
        let name = or_default(doc.name.as_deref(), DEFAULT_NAME);
        let owner = or_default(Some(doc.api_settings.creator.as_str()), DEFAULT_OWNER);

        Self {
            title: name.clone(),
            footer: footer_line(&owner),
            header: name.clone(),
            name,
            version: or_default(doc.version.as_deref(), DEFAULT_VERSION),
            status: or_default(doc.header.status.as_deref(), DEFAULT_STATUS),
            description: or_default(doc.description.as_deref(), DEFAULT_DESCRIPTION),
        }
    }
}

impl Default for Branding {
    fn default() -> Self {
        Self {
            title: DEFAULT_NAME.to_string(),
            footer: footer_line(DEFAULT_OWNER),
            header: DEFAULT_NAME.to_string(),
            name: DEFAULT_NAME.to_string(),
            version: DEFAULT_VERSION.to_string(),
            status: DEFAULT_STATUS.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
        }
    }
}

fn or_default(value: Option<&str>, fallback: &str) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => fallback.to_string(),
    }
}

fn footer_line(owner: &str) -> String {
    let year = chrono::Utc::now().year();
    format!("© {year} {owner}. All rights reserved.")
}

/// An external link, opened outside the explorer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkView {
    /// Target URL.
    pub url: String,
    /// Link text.
    pub name: String,
}

/// Vertical spacing after a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardSpacing {
    /// Any card but the last in its section.
    Compact,
    /// The last card in its section.
    Trailing,
}

/// What activating a card's invocation control leads to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// No declared parameters: request this path immediately.
    Direct(String),
    /// Parameters must be collected first.
    Form(ParamForm),
}

/// A rendered endpoint card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    /// The item this card was built from.
    pub item: Item,
    /// Spacing class.
    pub spacing: CardSpacing,
    /// Whether the current search shows this card.
    pub visible: bool,
}

impl CardView {
    /// Activate the card's invocation control.
    #[must_use]
    pub fn invoke(&self) -> Invocation {
        match ParamForm::for_item(&self.item) {
            Some(form) => Invocation::Form(form),
            None => Invocation::Direct(self.item.path.clone()),
        }
    }

    /// Whether the card matches a lowercase search term.
    #[must_use]
    pub fn matches(&self, term: &str) -> bool {
        self.item.name.to_lowercase().contains(term) || self.item.desc.to_lowercase().contains(term)
    }
}

/// A category heading with its cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionView {
    /// Category name.
    pub name: String,
    /// Cards sorted by item name.
    pub cards: Vec<CardView>,
}

impl SectionView {
    /// The heading is shown iff at least one card is visible.
    #[must_use]
    pub fn header_visible(&self) -> bool {
        self.cards.iter().any(|c| c.visible)
    }

    /// Cards currently shown.
    pub fn visible_cards(&self) -> impl Iterator<Item = &CardView> {
        self.cards.iter().filter(|c| c.visible)
    }
}

/// The whole directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogView {
    /// Text slots.
    pub branding: Branding,
    /// External links in document order.
    pub links: Vec<LinkView>,
    /// Sections in document order.
    pub sections: Vec<SectionView>,
}

impl CatalogView {
    /// Render a document.
    #[must_use]
    pub fn render(doc: &CatalogDocument) -> Self {
        let links = doc
            .links
            .iter()
            .map(|l| LinkView {
                url: l.url.clone(),
                name: l.name.clone(),
            })
            .collect();

        let collator = name_collator();
        let sections = doc
            .categories
            .iter()
            .map(|category| {
                let mut items = category.items.clone();
                items.sort_by(|a, b| compare_names(collator.as_ref(), &a.name, &b.name));

                let last = items.len().saturating_sub(1);
                let cards = items
                    .into_iter()
                    .enumerate()
                    .map(|(index, item)| CardView {
                        item,
                        spacing: if index == last {
                            CardSpacing::Trailing
                        } else {
                            CardSpacing::Compact
                        },
                        visible: true,
                    })
                    .collect();

                SectionView {
                    name: category.name.clone(),
                    cards,
                }
            })
            .collect();

        Self {
            branding: Branding::from_document(doc),
            links,
            sections,
        }
    }

    /// All cards in display order, regardless of visibility.
    pub fn cards(&self) -> impl Iterator<Item = &CardView> {
        self.sections.iter().flat_map(|s| s.cards.iter())
    }

    /// Cards currently shown, in display order.
    pub fn visible_cards(&self) -> impl Iterator<Item = &CardView> {
        self.sections.iter().flat_map(SectionView::visible_cards)
    }
}

/// Root-locale collator for card names, compared at tertiary strength so
/// accents and case matter only after the base letters.
fn name_collator() -> Option<Collator> {
    let mut options = CollatorOptions::new();
    options.strength = Some(Strength::Tertiary);
    match Collator::try_new(&Default::default(), options) {
        Ok(collator) => Some(collator),
        Err(err) => {
            tracing::warn!(error = %err, "Collator unavailable, sorting names by folded case");
            None
        }
    }
}

/// Name ordering: collated when a collator is available, case-folded
/// otherwise. On a full tie lowercase sorts before uppercase.
fn compare_names(collator: Option<&Collator>, a: &str, b: &str) -> Ordering {
    let ordering = match collator {
        Some(collator) => collator.compare(a, b),
        None => a
            .chars()
            .flat_map(char::to_lowercase)
            .cmp(b.chars().flat_map(char::to_lowercase)),
    };
    ordering.then_with(|| b.cmp(a))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Category;

    fn item(name: &str, path: &str) -> Item {
        Item {
            name: name.to_string(),
            desc: "d".to_string(),
            path: path.to_string(),
            inner_desc: None,
        }
    }

    fn doc_with(items: Vec<Item>) -> CatalogDocument {
        CatalogDocument {
            name: Some("FR3 UI".to_string()),
            categories: vec![Category {
                name: "Tools".to_string(),
                items,
            }],
            ..CatalogDocument::default()
        }
    }

    fn names(section: &SectionView) -> Vec<&str> {
        section.cards.iter().map(|c| c.item.name.as_str()).collect()
    }

    #[test]
    fn items_render_in_name_order() {
        let view = CatalogView::render(&doc_with(vec![item("B Item", "/b"), item("A Item", "/a")]));
        assert_eq!(names(&view.sections[0]), ["A Item", "B Item"]);
    }

    #[test]
    fn ordering_ignores_case_first() {
        let view = CatalogView::render(&doc_with(vec![
            item("beta", "/1"),
            item("Alpha", "/2"),
            item("alpha", "/3"),
            item("Gamma", "/4"),
        ]));
        assert_eq!(names(&view.sections[0]), ["alpha", "Alpha", "beta", "Gamma"]);
    }

    #[test]
    fn accented_names_sort_with_their_base_letter() {
        let view = CatalogView::render(&doc_with(vec![
            item("Fig", "/1"),
            item("Éclair", "/2"),
            item("eagle", "/3"),
            item("zebra", "/4"),
        ]));
        assert_eq!(names(&view.sections[0]), ["eagle", "Éclair", "Fig", "zebra"]);
    }

    #[test]
    fn folded_fallback_keeps_lowercase_first() {
        assert_eq!(compare_names(None, "alpha", "Alpha"), Ordering::Less);
        assert_eq!(compare_names(None, "Beta", "alpha"), Ordering::Greater);
    }

    #[test]
    fn only_last_card_is_trailing() {
        let view = CatalogView::render(&doc_with(vec![
            item("c", "/c"),
            item("a", "/a"),
            item("b", "/b"),
        ]));
        let spacing: Vec<_> = view.sections[0].cards.iter().map(|c| c.spacing).collect();
        assert_eq!(
            spacing,
            [CardSpacing::Compact, CardSpacing::Compact, CardSpacing::Trailing]
        );
    }

    #[test]
    fn categories_keep_document_order() {
        let mut doc = doc_with(vec![item("x", "/x")]);
        doc.categories.insert(
            0,
            Category {
                name: "Zeta".to_string(),
                items: vec![item("y", "/y")],
            },
        );
        let view = CatalogView::render(&doc);
        let order: Vec<_> = view.sections.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(order, ["Zeta", "Tools"]);
    }

    #[test]
    fn branding_uses_fallbacks_for_missing_fields() {
        let mut doc = doc_with(vec![]);
        doc.name = Some(String::new());
        let branding = Branding::from_document(&doc);
        assert_eq!(branding.title, "FR3 UI");
        assert_eq!(branding.version, "v1.0");
        assert_eq!(branding.status, "Active!");
        assert_eq!(branding.description, "Simple API's");
        assert!(branding.footer.ends_with("FR3. All rights reserved."));
    }

    #[test]
    fn branding_prefers_document_values() {
        let mut doc = doc_with(vec![]);
        doc.name = Some("Demo".to_string());
        doc.version = Some("v9".to_string());
        doc.api_settings.creator = "team".to_string();
        let branding = Branding::from_document(&doc);
        assert_eq!(branding.header, "Demo");
        assert_eq!(branding.version, "v9");
        assert!(branding.footer.contains("team. All rights reserved."));
    }

    #[test]
    fn card_without_params_invokes_directly() {
        let card = CardView {
            item: item("Status", "/api/status"),
            spacing: CardSpacing::Trailing,
            visible: true,
        };
        assert_eq!(card.invoke(), Invocation::Direct("/api/status".to_string()));
    }

    #[test]
    fn card_with_params_opens_form() {
        let card = CardView {
            item: item("Search", "/search?q=&page="),
            spacing: CardSpacing::Trailing,
            visible: true,
        };
        match card.invoke() {
            Invocation::Form(form) => assert_eq!(form.fields().len(), 2),
            Invocation::Direct(path) => panic!("expected a form, got direct {path}"),
        }
    }
}
