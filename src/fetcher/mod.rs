//! Random pick flow
//!
//! `RandomContentFetcher` owns the trigger button, the two parameter inputs
//! and the result container. One activation puts the button in its loading
//! state, requests `/random`, renders the card (or an error notice) and
//! always restores the button afterwards.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{error, info, warn};

use crate::client::{ContentClient, FetchError};
use crate::constants::{animation, endpoints, markup};
use crate::extract::{extract_card, summarize_card, CardFragment};
use crate::models::RandomQuery;
use crate::view::{Button, ElementHandle, InputField, ResultContainer, Transition};

/// Elements the fetcher reads and writes
#[derive(Debug, Clone)]
pub struct FetcherElements {
    pub trigger: ElementHandle<Button>,
    pub type_select: ElementHandle<InputField>,
    pub probability: ElementHandle<InputField>,
    pub result: ElementHandle<ResultContainer>,
}

/// Fade/slide-in applied to the result container after a successful pick
#[derive(Debug, Clone, PartialEq)]
pub struct EntranceAnimation {
    pub delay: Duration,
    pub duration: Duration,
    pub offset_px: f32,
    pub easing: &'static str,
}

impl Default for EntranceAnimation {
    fn default() -> Self {
        Self {
            delay: animation::ENTRANCE_DELAY,
            duration: animation::ENTRANCE_DURATION,
            offset_px: animation::ENTRANCE_OFFSET_PX,
            easing: animation::ENTRANCE_EASING,
        }
    }
}

/// What one activation ended with
#[derive(Debug)]
pub enum FetchOutcome {
    /// The fragment was written into the result container
    Rendered {
        fragment: CardFragment,
        /// Completes once the entrance transition has been applied
        entrance: JoinHandle<()>,
    },
    /// An error notice was written into the result container
    Failed(FetchError),
}

impl FetchOutcome {
    pub fn is_rendered(&self) -> bool {
        matches!(self, FetchOutcome::Rendered { .. })
    }
}

/// Loading state of the trigger; dropping it restores the button
struct LoadingState {
    trigger: ElementHandle<Button>,
    original_label: String,
}

impl LoadingState {
    fn begin(trigger: &ElementHandle<Button>) -> Self {
        let original_label = trigger.write(enter_loading);
        Self {
            trigger: trigger.clone(),
            original_label,
        }
    }

    /// Like `begin`, but refuses when the button is already disabled
    fn try_begin(trigger: &ElementHandle<Button>) -> Option<Self> {
        let original_label = trigger.write(|button| {
            if button.is_disabled() {
                None
            } else {
                Some(enter_loading(button))
            }
        })?;

        Some(Self {
            trigger: trigger.clone(),
            original_label,
        })
    }
}

fn enter_loading(button: &mut Button) -> String {
    let original = button.text_content();
    button.set_inner_html(markup::LOADING_LABEL);
    button.set_disabled(true);
    original
}

impl Drop for LoadingState {
    fn drop(&mut self) {
        let label = std::mem::take(&mut self.original_label);
        self.trigger.write(|button| {
            button.set_text(label);
            button.set_disabled(false);
        });
    }
}

/// Button-triggered random pick
#[derive(Debug, Clone)]
pub struct RandomContentFetcher {
    client: ContentClient,
    base_url: String,
    elements: FetcherElements,
    animation: EntranceAnimation,
}

impl RandomContentFetcher {
    pub fn new(client: ContentClient, base_url: impl Into<String>, elements: FetcherElements) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            elements,
            animation: EntranceAnimation::default(),
        }
    }

    pub fn with_animation(mut self, animation: EntranceAnimation) -> Self {
        self.animation = animation;
        self
    }

    pub fn elements(&self) -> &FetcherElements {
        &self.elements
    }

    /// Handle a click on the trigger
    ///
    /// Returns `None` without doing anything while the trigger is disabled.
    pub async fn click(&self) -> Option<FetchOutcome> {
        let loading = LoadingState::try_begin(&self.elements.trigger)?;
        Some(self.run(loading).await)
    }

    /// Run the flow regardless of the trigger's disabled state
    ///
    /// Concurrent activations are not ordered; whichever response arrives
    /// last owns the result container.
    pub async fn activate(&self) -> FetchOutcome {
        let loading = LoadingState::begin(&self.elements.trigger);
        self.run(loading).await
    }

    /// Request URL built from the current parameter inputs
    pub fn request_url(&self) -> String {
        let content_type = self.elements.type_select.read(|f| f.value().to_string());
        let prob = self.elements.probability.read(|f| f.value().to_string());
        endpoints::random(&self.base_url, &RandomQuery::new(content_type, prob))
    }

    async fn run(&self, _loading: LoadingState) -> FetchOutcome {
        let url = self.request_url();
        info!("Requesting random content: {}", url);

        match self.client.fetch_fragment(&url).await {
            Ok(body) => {
                let fragment = extract_card(&body);
                if fragment.is_card() {
                    let summary = summarize_card(fragment.markup());
                    info!("Picked: {}", summary.title);
                } else {
                    warn!("No card in response, rendering {} bytes as-is", body.len());
                }
                let entrance = self.render(&fragment);
                FetchOutcome::Rendered { fragment, entrance }
            }
            Err(e) => {
                error!("Error fetching random content: {}", e);
                self.render_error(&e);
                FetchOutcome::Failed(e)
            }
        }
    }

    fn render(&self, fragment: &CardFragment) -> JoinHandle<()> {
        let offset = self.animation.offset_px;
        self.elements.result.write(|container| {
            container.set_inner_html(fragment.markup());
            container.show();
            container.style.opacity = Some(0.0);
            container.style.translate_y = Some(offset);
        });

        let result = self.elements.result.clone();
        let animation = self.animation.clone();
        tokio::spawn(async move {
            sleep(animation.delay).await;
            result.write(|container| {
                container.style.transition = Some(Transition {
                    duration: animation.duration,
                    easing: animation.easing,
                });
                container.style.opacity = Some(1.0);
                container.style.translate_y = Some(0.0);
            });
        })
    }

    fn render_error(&self, error: &FetchError) {
        let notice = markup::error_notice(&error.to_string());
        self.elements.result.write(|container| {
            container.set_inner_html(notice);
            container.show();
        });
    }
}
