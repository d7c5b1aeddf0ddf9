//! Constants module for the watchlist picker
//!
//! Contains endpoint URL builders, selectors and the markup snippets the page
//! writes into its elements.

/// URL builder functions for the content server
pub mod endpoints {
    use crate::models::RandomQuery;

    /// Path of the random pick endpoint
    pub const RANDOM_PATH: &str = "/random";

    /// Random pick URL, with a query string only when a parameter is set
    pub fn random(base_url: &str, query: &RandomQuery) -> String {
        let base = base_url.trim_end_matches('/');
        match query.to_query_string() {
            Some(qs) => format!("{}{}?{}", base, RANDOM_PATH, qs),
            None => format!("{}{}", base, RANDOM_PATH),
        }
    }
}

/// CSS selectors used against server fragments and the page
pub mod selectors {
    /// Container of a single picked item in the `/random` response
    pub const CARD: &str = ".card";
    /// Title line inside a card
    pub const CARD_TITLE: &str = ".card-title";
    /// Detail line inside a card
    pub const CARD_TEXT: &str = ".card-text";
}

/// Markup written into page elements
pub mod markup {
    /// Trigger label while a pick is in flight
    pub const LOADING_LABEL: &str =
        r#"<span class="spinner-border spinner-border-sm" role="status" aria-hidden="true"></span> Choosing..."#;

    /// Close button appended to dismissible notices
    pub const CLOSE_BUTTON: &str =
        r#"<button type="button" class="btn-close" data-bs-dismiss="alert"></button>"#;

    /// Inline error notice rendered into the result container
    pub fn error_notice(message: &str) -> String {
        format!(
            r#"<div class="alert alert-danger">Error: {}</div>"#,
            escape_text(message)
        )
    }

    /// Escape text so it cannot open or close tags
    pub fn escape_text(text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for c in text.chars() {
            match c {
                '&' => out.push_str("&amp;"),
                '<' => out.push_str("&lt;"),
                '>' => out.push_str("&gt;"),
                _ => out.push(c),
            }
        }
        out
    }
}

/// Timings of the result entrance transition
pub mod animation {
    use std::time::Duration;

    /// Delay before the transition starts
    pub const ENTRANCE_DELAY: Duration = Duration::from_millis(50);
    /// Length of the transition
    pub const ENTRANCE_DURATION: Duration = Duration::from_millis(500);
    /// Starting vertical offset in pixels
    pub const ENTRANCE_OFFSET_PX: f32 = 20.0;
    /// Easing curve
    pub const ENTRANCE_EASING: &str = "ease";
    /// How long a notice stays up before it dismisses itself
    pub const NOTICE_LIFETIME: Duration = Duration::from_secs(5);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RandomQuery;

    #[test]
    fn test_random_url_without_params() {
        let query = RandomQuery::default();
        assert_eq!(
            endpoints::random("http://localhost:5000", &query),
            "http://localhost:5000/random"
        );
    }

    #[test]
    fn test_random_url_trims_trailing_slash() {
        let query = RandomQuery::new("movie", "3");
        assert_eq!(
            endpoints::random("http://localhost:5000/", &query),
            "http://localhost:5000/random?type=movie&prob=3"
        );
    }

    #[test]
    fn test_error_notice_escapes_message() {
        let html = markup::error_notice("bad <b>gateway</b> & more");
        assert_eq!(
            html,
            r#"<div class="alert alert-danger">Error: bad &lt;b&gt;gateway&lt;/b&gt; &amp; more</div>"#
        );
    }
}
