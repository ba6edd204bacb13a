//! Events that drive the date-fact state machine

use crate::facts::FactErrorKind;
use crate::selection::{DatePair, FieldInput};
use crate::state_machine::RequestToken;

/// Events that trigger state transitions
#[derive(Debug, Clone)]
pub enum Event {
    // User events
    SetMonth(FieldInput),
    SetDay(FieldInput),
    ClearSelection,

    // Fetch completion events, tagged with the token captured at issue time
    FactFetched {
        token: RequestToken,
        pair: DatePair,
        text: String,
    },
    FetchFailed {
        token: RequestToken,
        pair: DatePair,
        kind: FactErrorKind,
        message: String,
    },
}

impl Event {
    #[allow(dead_code)] // Convenience constructor for tests
    pub fn set_month(input: impl Into<FieldInput>) -> Self {
        Event::SetMonth(input.into())
    }

    #[allow(dead_code)]
    pub fn set_day(input: impl Into<FieldInput>) -> Self {
        Event::SetDay(input.into())
    }

    /// Token carried by a completion event, `None` for user events
    pub fn completion_token(&self) -> Option<RequestToken> {
        match self {
            Event::FactFetched { token, .. } | Event::FetchFailed { token, .. } => Some(*token),
            _ => None,
        }
    }
}
