//! Extraction of the card fragment from a `/random` response
//!
//! The server answers with a whole HTML fragment; only the first `.card`
//! element is shown on the page.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use crate::constants::selectors;

static CARD: LazyLock<Selector> = LazyLock::new(|| Selector::parse(selectors::CARD).unwrap());
static CARD_TITLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(selectors::CARD_TITLE).unwrap());
static CARD_TEXT: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(selectors::CARD_TEXT).unwrap());

/// Markup chosen for the result container
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardFragment {
    /// Outer markup of the first card element
    Card(String),
    /// Raw response body, used when no card was found
    Raw(String),
}

impl CardFragment {
    /// Markup to write into the result container
    pub fn markup(&self) -> &str {
        match self {
            CardFragment::Card(markup) | CardFragment::Raw(markup) => markup,
        }
    }

    /// Whether a card element was found
    pub fn is_card(&self) -> bool {
        matches!(self, CardFragment::Card(_))
    }
}

/// Text fields read from a card, used for logging
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardSummary {
    /// From .card-title
    pub title: String,
    /// From .card-text
    pub details: String,
}

/// Extract the first card from a response body
///
/// Falls back to the raw body when the fragment contains no card.
pub fn extract_card(body: &str) -> CardFragment {
    let fragment = Html::parse_fragment(body);
    match fragment.select(&CARD).next() {
        Some(card) => CardFragment::Card(card.html()),
        None => CardFragment::Raw(body.to_string()),
    }
}

/// Read the title and detail lines out of card markup
pub fn summarize_card(markup: &str) -> CardSummary {
    let fragment = Html::parse_fragment(markup);

    let title = fragment
        .select(&CARD_TITLE)
        .next()
        .map(collapsed_text)
        .unwrap_or_default();

    let details = fragment
        .select(&CARD_TEXT)
        .next()
        .map(collapsed_text)
        .unwrap_or_default();

    CardSummary { title, details }
}

/// Text content of a markup snippet, tags removed
pub fn text_content(markup: &str) -> String {
    Html::parse_fragment(markup)
        .root_element()
        .text()
        .collect()
}

fn collapsed_text(el: ElementRef<'_>) -> String {
    el.text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_extraction_reuses_selectors() {
        let body = r#"<div class="card"><h5 class="card-title">Heat</h5><p class="card-text">Crime</p></div>"#;
        for _ in 0..3 {
            let fragment = extract_card(body);
            assert!(fragment.is_card());
            assert_eq!(summarize_card(fragment.markup()).title, "Heat");
        }
        assert!(std::ptr::eq(LazyLock::force(&CARD), &*CARD));
    }

    #[test]
    fn test_extract_card_returns_outer_markup() {
        let card = r#"<div class="card"><div class="card-body"><h5 class="card-title">Inception</h5><p class="card-text">Type: Movie | Name: Inception | Genre: Sci-Fi</p></div></div>"#;
        let body = format!(r#"<h2>Your pick</h2>{}<a href="/">Back</a>"#, card);

        let fragment = extract_card(&body);
        assert!(fragment.is_card());
        assert_eq!(fragment.markup(), card);
    }

    #[test]
    fn test_extract_card_takes_first_match() {
        let body = r#"<div class="card"><p>first</p></div><div class="card"><p>second</p></div>"#;
        let fragment = extract_card(body);
        assert_eq!(
            fragment,
            CardFragment::Card(r#"<div class="card"><p>first</p></div>"#.to_string())
        );
    }

    #[test]
    fn test_extract_card_matches_nested_card() {
        let body = r#"<section><div class="mt-4"><div class="card shadow"><p>deep</p></div></div></section>"#;
        let fragment = extract_card(body);
        assert_eq!(fragment.markup(), r#"<div class="card shadow"><p>deep</p></div>"#);
    }

    #[test]
    fn test_extract_card_falls_back_to_raw_body() {
        let body = "<p>Please choose both, a probability and a Content Preference</p>";
        let fragment = extract_card(body);
        assert_eq!(fragment, CardFragment::Raw(body.to_string()));
    }

    #[test]
    fn test_extract_card_empty_body() {
        let fragment = extract_card("");
        assert_eq!(fragment, CardFragment::Raw(String::new()));
    }

    #[test]
    fn test_extract_card_ignores_card_like_classes() {
        let body = r#"<div class="card-body"><p>not a card</p></div>"#;
        assert!(!extract_card(body).is_card());
    }

    #[test]
    fn test_summarize_card() {
        let markup = r#"<div class="card"><h5 class="card-title">  Nuha </h5><p class="card-text">Type: Series |
            Seasons: 4</p></div>"#;
        let summary = summarize_card(markup);
        assert_eq!(summary.title, "Nuha");
        assert_eq!(summary.details, "Type: Series | Seasons: 4");
    }

    #[test]
    fn test_summarize_card_missing_elements() {
        let summary = summarize_card(r#"<div class="card"></div>"#);
        assert_eq!(summary, CardSummary::default());
    }

    #[test]
    fn test_text_content_strips_tags() {
        let text = text_content(r#"<span class="spinner-border"></span> Choosing..."#);
        assert_eq!(text, " Choosing...");
    }
}
