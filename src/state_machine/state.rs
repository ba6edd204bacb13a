//! Date-fact state types

use crate::config::{ErrorPolicy, FactConfig};
use crate::selection::{DatePair, Selection};
use serde::Serialize;
use std::fmt;

/// Identifies one issued fetch
///
/// Bumped on every selection change, so a completion carrying an older
/// token belongs to a superseded selection and is dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(pub u64);

impl RequestToken {
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What the fact box currently shows
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "text", rename_all = "snake_case")]
pub enum Display {
    /// Selection incomplete or invalid
    #[default]
    Prompt,
    /// Fetch issued for the current selection, not yet resolved
    Loading,
    /// Response body for the current selection, verbatim
    Loaded(String),
    /// Fetch failed under [`ErrorPolicy::Blank`]
    Empty,
    /// Fetch failed under [`ErrorPolicy::Message`]
    Error,
}

impl Display {
    /// Text handed to the presentation layer
    pub fn text<'a>(&'a self, config: &'a FactConfig) -> &'a str {
        match self {
            Display::Prompt => &config.prompt_text,
            Display::Loading => &config.loading_text,
            Display::Loaded(text) => text,
            Display::Empty => "",
            Display::Error => &config.error_text,
        }
    }

    pub fn is_settled(&self) -> bool {
        !matches!(self, Display::Loading)
    }

    /// Display value for a failed fetch under `policy`
    pub fn for_failure(policy: ErrorPolicy) -> Self {
        match policy {
            ErrorPolicy::Message => Display::Error,
            ErrorPolicy::Blank => Display::Empty,
        }
    }
}

/// Full controller state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FactState {
    pub selection: Selection,
    pub display: Display,
    /// Latest token handed out; completions must match it to be shown
    pub token: RequestToken,
    /// Fetch currently awaited, if any
    pub in_flight: Option<(RequestToken, DatePair)>,
}

impl FactState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a completion tagged `token` for `pair` is still wanted
    pub fn awaits(&self, token: RequestToken, pair: DatePair) -> bool {
        self.in_flight == Some((token, pair))
    }
}

/// Read-only inputs to the transition function
#[derive(Debug, Clone, Default)]
pub struct TransitionContext {
    pub error_policy: ErrorPolicy,
}

impl TransitionContext {
    pub fn new(error_policy: ErrorPolicy) -> Self {
        Self { error_policy }
    }

    pub fn from_config(config: &FactConfig) -> Self {
        Self::new(config.error_policy)
    }
}
