//! Add-content form
//!
//! Field groups are toggled by the content-type select, and the form is
//! validated before it is submitted.

use thiserror::Error;
use tracing::debug;

use crate::models::ContentType;
use crate::view::{Display, ElementHandle, FieldGroup, InputField};

/// Reasons a submission is blocked
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a content name")]
    MissingName,

    #[error("Please enter a valid movie length")]
    InvalidLength,

    #[error("Please enter a valid number of seasons")]
    InvalidSeasons,

    #[error("Please enter a valid rating between 0 and 10")]
    InvalidRating,
}

/// Elements of the add-content form
#[derive(Debug, Clone)]
pub struct FormElements {
    pub content_type: ElementHandle<InputField>,
    pub name: ElementHandle<InputField>,
    pub genre: ElementHandle<InputField>,
    pub rating: ElementHandle<InputField>,
    pub length: ElementHandle<InputField>,
    pub seasons: ElementHandle<InputField>,
    pub episodes: ElementHandle<InputField>,
    pub on_netflix: ElementHandle<InputField>,
    /// Groups wrapping movie-only inputs
    pub movie_fields: Vec<ElementHandle<FieldGroup>>,
    /// Groups wrapping series-only inputs
    pub series_fields: Vec<ElementHandle<FieldGroup>>,
}

impl FormElements {
    fn inputs(&self) -> [&ElementHandle<InputField>; 8] {
        [
            &self.content_type,
            &self.name,
            &self.genre,
            &self.rating,
            &self.length,
            &self.seasons,
            &self.episodes,
            &self.on_netflix,
        ]
    }
}

/// The add-content form and its handlers
#[derive(Debug, Clone)]
pub struct ContentForm {
    elements: FormElements,
}

impl ContentForm {
    pub fn new(elements: FormElements) -> Self {
        Self { elements }
    }

    pub fn elements(&self) -> &FormElements {
        &self.elements
    }

    /// Currently selected content type, if it is a known one
    pub fn selected_type(&self) -> Option<ContentType> {
        self.elements
            .content_type
            .read(|select| select.value().parse().ok())
    }

    /// Sync field visibility and required flags with the select
    ///
    /// Unknown select values leave the form untouched.
    pub fn apply_content_type(&self) -> Option<ContentType> {
        let content_type = self.selected_type()?;
        self.show_fields_for(content_type);
        Some(content_type)
    }

    /// Show the groups for `content_type`, hide the others and mark the
    /// matching inputs required
    pub fn show_fields_for(&self, content_type: ContentType) {
        debug!("Showing {} fields", content_type);

        let (shown, hidden) = match content_type {
            ContentType::Movie => (&self.elements.movie_fields, &self.elements.series_fields),
            ContentType::Series => (&self.elements.series_fields, &self.elements.movie_fields),
        };
        for group in shown {
            group.write(|g| g.set_display(Display::Block));
        }
        for group in hidden {
            group.write(|g| g.set_display(Display::None));
        }

        let is_movie = content_type == ContentType::Movie;
        self.elements.length.write(|f| f.set_required(is_movie));
        self.elements.seasons.write(|f| f.set_required(!is_movie));
        // Episodes are optional for series as well.
        self.elements.episodes.write(|f| f.set_required(false));
    }

    /// Check the form before submission, stopping at the first problem
    pub fn validate(&self) -> Result<(), ValidationError> {
        let name_present = self
            .elements
            .name
            .read(|f| !f.value().trim().is_empty());
        if !name_present {
            return Err(ValidationError::MissingName);
        }

        match self.selected_type() {
            Some(ContentType::Movie) => {
                if !self.elements.length.read(|f| is_positive(f.value())) {
                    return Err(ValidationError::InvalidLength);
                }
            }
            Some(ContentType::Series) => {
                if !self.elements.seasons.read(|f| is_positive(f.value())) {
                    return Err(ValidationError::InvalidSeasons);
                }
            }
            None => {}
        }

        let rating_ok = self.elements.rating.read(|f| {
            parse_number(f.value()).is_some_and(|r| (0.0..=10.0).contains(&r))
        });
        if !rating_ok {
            return Err(ValidationError::InvalidRating);
        }

        Ok(())
    }

    /// Restore every input to its initial value and re-sync the field groups
    pub fn reset(&self) {
        for input in self.elements.inputs() {
            input.write(InputField::reset);
        }
        self.apply_content_type();
    }
}

fn parse_number(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
}

fn is_positive(value: &str) -> bool {
    parse_number(value).is_some_and(|n| n > 0.0)
}
