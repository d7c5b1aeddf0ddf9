//! Global error handling module for the watchlist picker
//!
//! This module provides a unified error type over every error source and a
//! user-facing message for each.

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::client::FetchError;
use crate::form::ValidationError;

/// Application-wide error type that unifies all error sources
#[derive(Debug, Error)]
pub enum AppError {
    /// Random pick request failed (network, HTTP status, body)
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Form validation failed
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Autofill catalog could not be loaded
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// HTTP client could not be built
    #[error("Client error: {0}")]
    Client(#[from] reqwest::Error),

    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        AppError::Config(msg.into())
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            AppError::Fetch(e) => e.to_string(),
            AppError::Validation(e) => e.to_string(),
            AppError::Catalog(e) => match e {
                CatalogError::Io(_) => "Catalog file could not be read".to_string(),
                CatalogError::Parse(_) => "Catalog file is not valid".to_string(),
                CatalogError::InvalidRecord { name, .. } => {
                    format!("Catalog entry '{}' is invalid", name)
                }
            },
            AppError::Client(_) => "HTTP client could not be initialised".to_string(),
            AppError::Config(msg) => msg.clone(),
        }
    }
}

/// Result type alias for operations that can fail with AppError
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_message_passes_through() {
        let error = AppError::Fetch(FetchError::HttpError(503));
        assert_eq!(error.user_message(), "Network response was not ok (status 503)");
    }

    #[test]
    fn test_validation_error_message() {
        let error = AppError::from(ValidationError::InvalidSeasons);
        assert_eq!(error.user_message(), "Please enter a valid number of seasons");
    }

    #[test]
    fn test_catalog_error_message() {
        let error = AppError::from(CatalogError::InvalidRecord {
            name: "nuha".to_string(),
            reason: "rating".to_string(),
        });
        assert_eq!(error.user_message(), "Catalog entry 'nuha' is invalid");
    }

    #[test]
    fn test_config_error() {
        let error = AppError::config("PORT must be a number");
        assert_eq!(error.user_message(), "PORT must be a number");
        assert_eq!(format!("{}", error), "Configuration error: PORT must be a number");
    }

    #[test]
    fn test_error_display() {
        let error = AppError::from(FetchError::NetworkError("request timed out".to_string()));
        assert_eq!(
            format!("{}", error),
            "Fetch error: Failed to connect to server: request timed out"
        );
    }

    #[test]
    fn test_from_fetch_error() {
        let app_err: AppError = FetchError::ResponseError("eof".to_string()).into();
        assert!(matches!(app_err, AppError::Fetch(_)));
    }
}
