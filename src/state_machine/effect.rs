//! Effects produced by state transitions

use crate::selection::DatePair;
use crate::state_machine::RequestToken;

/// Effects to be executed after a state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Look up the fact for `pair`; the outcome must come back tagged with `token`
    FetchFact { token: RequestToken, pair: DatePair },

    /// Push the new selection and display text to observers
    PublishSnapshot,
}

impl Effect {
    pub fn fetch(token: RequestToken, pair: DatePair) -> Self {
        Effect::FetchFact { token, pair }
    }

    #[allow(dead_code)] // Used by tests
    pub fn is_fetch(&self) -> bool {
        matches!(self, Effect::FetchFact { .. })
    }
}
