//! Page wiring
//!
//! `Page` is built once with explicit handles to every element it drives and
//! routes UI events to the matching handler.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::catalog::{autofill, Catalog};
use crate::client::ContentClient;
use crate::fetcher::{FetchOutcome, FetcherElements, RandomContentFetcher};
use crate::form::{ContentForm, FormElements, ValidationError};
use crate::models::ContentType;
use crate::notice::{show_alert, NoticeArea, NoticeId, NoticeKind};
use crate::view::{Button, DialogLog, ElementHandle, FieldGroup, InputField, ResultContainer};

/// Events the page reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEvent {
    /// Click on the random pick button
    RandomRequested,
    /// The content-type select changed
    ContentTypeChanged,
    /// The name input lost focus
    NameBlurred,
    /// The add-content form is about to be submitted
    SubmitRequested,
    /// The add-content form was reset
    FormReset,
}

/// Result of handling one event
#[derive(Debug)]
pub enum EventOutcome {
    /// Nothing handled the event
    Ignored,
    Fetched(FetchOutcome),
    FieldsToggled(Option<ContentType>),
    /// Form filled from the catalog; carries the message shown
    Autofilled(String),
    SubmitAllowed,
    SubmitPrevented(ValidationError),
    FormReset,
}

/// Every element a page may contain
///
/// Missing sections (`None`) simply disable their handlers.
#[derive(Debug, Clone)]
pub struct PageElements {
    pub random: Option<FetcherElements>,
    pub form: Option<FormElements>,
    pub dialogs: ElementHandle<DialogLog>,
    pub notices: ElementHandle<NoticeArea>,
}

impl PageElements {
    /// Home page layout: random picker plus add-content form
    pub fn standard() -> Self {
        let random = FetcherElements {
            trigger: ElementHandle::new(Button::new("Get Random")),
            type_select: ElementHandle::new(InputField::new("randomType")),
            probability: ElementHandle::new(InputField::new("probability")),
            result: ElementHandle::new(ResultContainer::default()),
        };

        let form = FormElements {
            content_type: ElementHandle::new(
                InputField::new("content_type").with_value(ContentType::Movie.as_str()),
            ),
            name: ElementHandle::new(InputField::new("name")),
            genre: ElementHandle::new(InputField::new("genre")),
            rating: ElementHandle::new(InputField::new("rating")),
            length: ElementHandle::new(InputField::new("length")),
            seasons: ElementHandle::new(InputField::new("seasons")),
            episodes: ElementHandle::new(InputField::new("episodes")),
            on_netflix: ElementHandle::new(InputField::new("on_netflix")),
            movie_fields: vec![ElementHandle::new(FieldGroup::default())],
            series_fields: vec![
                ElementHandle::new(FieldGroup::default()),
                ElementHandle::new(FieldGroup::default()),
            ],
        };

        Self {
            random: Some(random),
            form: Some(form),
            dialogs: ElementHandle::default(),
            notices: ElementHandle::default(),
        }
    }
}

/// Handler object for one page
#[derive(Debug, Clone)]
pub struct Page {
    fetcher: Option<RandomContentFetcher>,
    form: Option<ContentForm>,
    catalog: Arc<Catalog>,
    dialogs: ElementHandle<DialogLog>,
    notices: ElementHandle<NoticeArea>,
    now: Option<DateTime<Utc>>,
}

impl Page {
    pub fn new(
        elements: PageElements,
        client: ContentClient,
        base_url: &str,
        catalog: Arc<Catalog>,
    ) -> Self {
        Self {
            fetcher: elements
                .random
                .map(|random| RandomContentFetcher::new(client, base_url, random)),
            form: elements.form.map(ContentForm::new),
            catalog,
            dialogs: elements.dialogs,
            notices: elements.notices,
            now: None,
        }
    }

    /// Pin the clock used for catalog-derived values
    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = Some(now);
        self
    }

    pub fn fetcher(&self) -> Option<&RandomContentFetcher> {
        self.fetcher.as_ref()
    }

    pub fn form(&self) -> Option<&ContentForm> {
        self.form.as_ref()
    }

    pub fn dialogs(&self) -> &ElementHandle<DialogLog> {
        &self.dialogs
    }

    pub fn notices(&self) -> &ElementHandle<NoticeArea> {
        &self.notices
    }

    /// Bring the form into a state consistent with its select
    pub async fn init(&self) -> EventOutcome {
        self.dispatch(PageEvent::ContentTypeChanged).await
    }

    pub async fn dispatch(&self, event: PageEvent) -> EventOutcome {
        debug!("Dispatching {:?}", event);

        match event {
            PageEvent::RandomRequested => match &self.fetcher {
                Some(fetcher) => match fetcher.click().await {
                    Some(outcome) => EventOutcome::Fetched(outcome),
                    None => {
                        debug!("Random pick already in flight");
                        EventOutcome::Ignored
                    }
                },
                None => EventOutcome::Ignored,
            },
            PageEvent::ContentTypeChanged => match &self.form {
                Some(form) => EventOutcome::FieldsToggled(form.apply_content_type()),
                None => EventOutcome::Ignored,
            },
            PageEvent::NameBlurred => {
                let Some(form) = &self.form else {
                    return EventOutcome::Ignored;
                };
                match autofill(form, &self.catalog, self.now()) {
                    Some(message) => {
                        self.dialogs.write(|d| d.alert(message.clone()));
                        EventOutcome::Autofilled(message)
                    }
                    None => EventOutcome::Ignored,
                }
            }
            PageEvent::SubmitRequested => {
                let Some(form) = &self.form else {
                    return EventOutcome::Ignored;
                };
                match form.validate() {
                    Ok(()) => EventOutcome::SubmitAllowed,
                    Err(e) => {
                        warn!("Submission blocked: {}", e);
                        self.dialogs.write(|d| d.alert(e.to_string()));
                        EventOutcome::SubmitPrevented(e)
                    }
                }
            }
            PageEvent::FormReset => match &self.form {
                Some(form) => {
                    form.reset();
                    EventOutcome::FormReset
                }
                None => EventOutcome::Ignored,
            },
        }
    }

    /// Show a self-dismissing notice at the top of the page
    pub fn show_alert(&self, message: impl Into<String>, kind: NoticeKind) -> NoticeId {
        show_alert(&self.notices, message, kind)
    }

    fn now(&self) -> DateTime<Utc> {
        self.now.unwrap_or_else(Utc::now)
    }
}
