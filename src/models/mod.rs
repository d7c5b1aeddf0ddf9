//! Data models for the watchlist picker
//!
//! Plain data carried between the page, the client and the autofill table.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Query parameters of a random pick request
///
/// Empty values are never serialized; present values are emitted in the
/// fixed order `type`, `prob`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RandomQuery {
    /// Content preference (free text, e.g. "movie" or "show")
    pub content_type: Option<String>,
    /// Weight for the preferred type, kept as the raw numeric string
    pub prob: Option<String>,
}

impl RandomQuery {
    /// Build a query from raw input values, dropping empty ones
    pub fn new(content_type: impl Into<String>, prob: impl Into<String>) -> Self {
        Self {
            content_type: non_empty(content_type.into()),
            prob: non_empty(prob.into()),
        }
    }

    /// Whether no parameter is set
    pub fn is_empty(&self) -> bool {
        self.content_type.is_none() && self.prob.is_none()
    }

    /// URL-encoded query string without the leading `?`, or `None` when empty
    pub fn to_query_string(&self) -> Option<String> {
        let pairs: Vec<String> = [("type", &self.content_type), ("prob", &self.prob)]
            .into_iter()
            .filter_map(|(key, value)| {
                value
                    .as_deref()
                    .map(|v| format!("{}={}", key, urlencoding::encode(v)))
            })
            .collect();

        if pairs.is_empty() {
            None
        } else {
            Some(pairs.join("&"))
        }
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Discriminator controlling which form fields are visible and required
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Movie,
    Series,
}

impl ContentType {
    /// Value used by the content-type select
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Movie => "movie",
            ContentType::Series => "series",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for select values that are neither `movie` nor `series`
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown content type: {0}")]
pub struct UnknownContentType(pub String);

impl FromStr for ContentType {
    type Err = UnknownContentType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "movie" => Ok(ContentType::Movie),
            "series" => Ok(ContentType::Series),
            other => Err(UnknownContentType(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_has_no_query_string() {
        let query = RandomQuery::new("", "");
        assert!(query.is_empty());
        assert_eq!(query.to_query_string(), None);
    }

    #[test]
    fn test_query_keeps_fixed_order() {
        let query = RandomQuery::new("movie", "5");
        assert_eq!(query.to_query_string().as_deref(), Some("type=movie&prob=5"));
    }

    #[test]
    fn test_query_with_only_prob() {
        let query = RandomQuery::new("", "2");
        assert_eq!(query.to_query_string().as_deref(), Some("prob=2"));
    }

    #[test]
    fn test_query_with_only_type() {
        let query = RandomQuery::new("show", "");
        assert_eq!(query.to_query_string().as_deref(), Some("type=show"));
    }

    #[test]
    fn test_query_is_url_encoded() {
        let query = RandomQuery::new("feel good & fun", "1");
        assert_eq!(
            query.to_query_string().as_deref(),
            Some("type=feel%20good%20%26%20fun&prob=1")
        );
    }

    #[test]
    fn test_content_type_from_str() {
        assert_eq!("movie".parse::<ContentType>(), Ok(ContentType::Movie));
        assert_eq!("series".parse::<ContentType>(), Ok(ContentType::Series));
        assert!("Movie".parse::<ContentType>().is_err());
        assert!("".parse::<ContentType>().is_err());
    }

    #[test]
    fn test_content_type_serialization() {
        let json = serde_json::to_string(&ContentType::Series).unwrap();
        assert_eq!(json, "\"series\"");
        let parsed: ContentType = serde_json::from_str("\"movie\"").unwrap();
        assert_eq!(parsed, ContentType::Movie);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn arbitrary_value() -> impl Strategy<Value = String> {
            prop_oneof![
                Just(String::new()),
                "[a-zA-Z0-9 &=?%+]{1,20}",
            ]
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(200))]

            #[test]
            fn property_query_contains_exactly_non_empty_params(
                content_type in arbitrary_value(),
                prob in arbitrary_value(),
            ) {
                let query = RandomQuery::new(content_type.clone(), prob.clone());
                let expected: Vec<(&str, &String)> = [("type", &content_type), ("prob", &prob)]
                    .into_iter()
                    .filter(|(_, v)| !v.is_empty())
                    .collect();

                match query.to_query_string() {
                    None => prop_assert!(expected.is_empty()),
                    Some(qs) => {
                        let pairs: Vec<&str> = qs.split('&').collect();
                        prop_assert_eq!(pairs.len(), expected.len());
                        for (pair, (key, value)) in pairs.iter().zip(expected.iter()) {
                            let (k, v) = pair.split_once('=').unwrap();
                            prop_assert_eq!(k, *key);
                            let decoded = urlencoding::decode(v).unwrap().into_owned();
                            prop_assert_eq!(decoded.as_str(), value.as_str());
                        }
                    }
                }
            }
        }
    }
}
