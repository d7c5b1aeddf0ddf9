//! Element model of the page
//!
//! Every element the handlers touch is a typed struct behind an
//! `ElementHandle`, so handlers receive explicit references instead of
//! querying a global document.

use std::fmt::Write as _;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use crate::extract::text_content;

/// Shared, mutable reference to one page element
#[derive(Debug, Default)]
pub struct ElementHandle<T>(Arc<Mutex<T>>);

impl<T> Clone for ElementHandle<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T> ElementHandle<T> {
    pub fn new(element: T) -> Self {
        Self(Arc::new(Mutex::new(element)))
    }

    /// Run `f` with shared access to the element
    pub fn read<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let guard = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    /// Run `f` with exclusive access to the element
    pub fn write<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let mut guard = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    /// Whether both handles point at the same element
    pub fn same_element(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Contents of a button
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Label {
    Text(String),
    Markup(String),
}

/// A clickable control with a label and a disabled flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    label: Label,
    disabled: bool,
}

impl Button {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            label: Label::Text(text.into()),
            disabled: false,
        }
    }

    pub fn label(&self) -> &Label {
        &self.label
    }

    /// Text of the label with any markup removed
    pub fn text_content(&self) -> String {
        match &self.label {
            Label::Text(text) => text.clone(),
            Label::Markup(markup) => text_content(markup),
        }
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.label = Label::Text(text.into());
    }

    pub fn set_inner_html(&mut self, markup: impl Into<String>) {
        self.label = Label::Markup(markup.into());
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }
}

/// A named input or select control
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputField {
    name: String,
    value: String,
    default_value: String,
    required: bool,
}

impl InputField {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set both the current and the reset value
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self.default_value = self.value.clone();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn set_required(&mut self, required: bool) {
        self.required = required;
    }

    /// Restore the value the field was created with
    pub fn reset(&mut self) {
        self.value = self.default_value.clone();
    }
}

/// CSS `display` values used by the page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Display {
    Block,
    None,
}

impl Display {
    pub fn as_css(&self) -> &'static str {
        match self {
            Display::Block => "block",
            Display::None => "none",
        }
    }
}

/// A CSS transition on all properties
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub duration: Duration,
    pub easing: &'static str,
}

impl Transition {
    pub fn as_css(&self) -> String {
        format!("all {}s {}", self.duration.as_secs_f32(), self.easing)
    }
}

/// Inline style properties set by the handlers
///
/// Unset properties are left to the stylesheet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InlineStyle {
    pub display: Option<Display>,
    pub opacity: Option<f32>,
    /// Vertical offset in pixels (`transform: translateY(..)`)
    pub translate_y: Option<f32>,
    pub transition: Option<Transition>,
}

impl InlineStyle {
    /// Whether the element is shown (`display` not set to `none`)
    pub fn is_visible(&self) -> bool {
        self.display != Some(Display::None)
    }

    /// Serialize as a `style` attribute value
    pub fn to_css(&self) -> String {
        let mut css = String::new();
        if let Some(display) = self.display {
            let _ = write!(css, "display: {}; ", display.as_css());
        }
        if let Some(opacity) = self.opacity {
            let _ = write!(css, "opacity: {}; ", opacity);
        }
        if let Some(offset) = self.translate_y {
            let _ = write!(css, "transform: translateY({}px); ", offset);
        }
        if let Some(transition) = &self.transition {
            let _ = write!(css, "transition: {}; ", transition.as_css());
        }
        css.trim_end().to_string()
    }
}

/// A group of form fields shown or hidden together
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldGroup {
    pub style: InlineStyle,
}

impl FieldGroup {
    pub fn is_visible(&self) -> bool {
        self.style.is_visible()
    }

    pub fn set_display(&mut self, display: Display) {
        self.style.display = Some(display);
    }
}

/// Container the picked card is rendered into
///
/// Hidden until the first pick completes.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultContainer {
    inner_html: String,
    pub style: InlineStyle,
}

impl Default for ResultContainer {
    fn default() -> Self {
        Self {
            inner_html: String::new(),
            style: InlineStyle {
                display: Some(Display::None),
                ..InlineStyle::default()
            },
        }
    }
}

impl ResultContainer {
    pub fn inner_html(&self) -> &str {
        &self.inner_html
    }

    pub fn set_inner_html(&mut self, markup: impl Into<String>) {
        self.inner_html = markup.into();
    }

    pub fn is_visible(&self) -> bool {
        self.style.is_visible()
    }

    pub fn show(&mut self) {
        self.style.display = Some(Display::Block);
    }
}

/// Messages raised with a blocking browser alert
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DialogLog {
    messages: Vec<String>,
}

impl DialogLog {
    pub fn alert(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn last(&self) -> Option<&str> {
        self.messages.last().map(String::as_str)
    }

    pub fn take(&mut self) -> Vec<String> {
        std::mem::take(&mut self.messages)
    }
}
