//! Pure state transition function

use super::{Display, Effect, Event, FactState, TransitionContext};
use crate::selection::Selection;
use thiserror::Error;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: FactState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: FactState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn with_effects(mut self, effects: impl IntoIterator<Item = Effect>) -> Self {
        self.effects.extend(effects);
        self
    }

    /// No change; used for dropped stale completions
    pub fn unchanged(state: &FactState) -> Self {
        Self::new(state.clone())
    }
}

/// Errors that can occur during transition
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("Select a month before picking a day")]
    MonthRequired,
}

/// Pure transition function
///
/// Given the same inputs it always produces the same outputs. A fetch is
/// requested only when a setter leaves the selection holding a valid pair.
pub fn transition(
    state: &FactState,
    context: &TransitionContext,
    event: Event,
) -> Result<TransitionResult, TransitionError> {
    match event {
        Event::SetMonth(input) => {
            let mut next = state.clone();
            next.selection.set_month(input.value());
            Ok(reset_to_prompt(next))
        }

        Event::SetDay(input) => {
            if !state.selection.has_month() {
                return Err(TransitionError::MonthRequired);
            }
            let mut next = state.clone();
            next.selection.set_day(input.value());
            Ok(settle_selection(next))
        }

        Event::ClearSelection => {
            let mut next = state.clone();
            next.selection = Selection::default();
            Ok(reset_to_prompt(next))
        }

        Event::FactFetched { token, pair, text } => {
            if !state.awaits(token, pair) {
                return Ok(TransitionResult::unchanged(state));
            }
            let mut next = state.clone();
            next.in_flight = None;
            next.display = Display::Loaded(text);
            Ok(TransitionResult::new(next).with_effect(Effect::PublishSnapshot))
        }

        Event::FetchFailed { token, pair, .. } => {
            if !state.awaits(token, pair) {
                return Ok(TransitionResult::unchanged(state));
            }
            let mut next = state.clone();
            next.in_flight = None;
            next.display = Display::for_failure(context.error_policy);
            Ok(TransitionResult::new(next).with_effect(Effect::PublishSnapshot))
        }
    }
}

/// Supersede whatever was in flight and show the prompt
fn reset_to_prompt(mut state: FactState) -> TransitionResult {
    state.token = state.token.next();
    state.in_flight = None;
    state.display = Display::Prompt;
    TransitionResult::new(state).with_effect(Effect::PublishSnapshot)
}

/// After a day change: fetch if the pair is valid, otherwise reset
fn settle_selection(mut state: FactState) -> TransitionResult {
    let Some(pair) = state.selection.valid_pair() else {
        return reset_to_prompt(state);
    };
    let token = state.token.next();
    state.token = token;
    state.in_flight = Some((token, pair));
    state.display = Display::Loading;
    TransitionResult::new(state).with_effects([Effect::fetch(token, pair), Effect::PublishSnapshot])
}
