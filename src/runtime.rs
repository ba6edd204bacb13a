//! Runtime for the date-fact controller
//!
//! The executor owns the state and is the only thing that mutates it. The
//! presentation layer talks to it through a cloneable [`DateFactController`].

mod executor;

#[cfg(test)]
pub mod testing;

pub use executor::FactRuntime;

use crate::config::FactConfig;
use crate::facts::FactService;
use crate::selection::{DatePair, FieldInput, Selection};
use crate::state_machine::{Display, Event, FactState, TransitionError};
use serde::Serialize;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot, watch};

/// What the presentation layer renders
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub selection: Selection,
    pub display: Display,
    pub display_text: String,
    /// Name of the selected month, if it is a real one
    pub month_name: Option<&'static str>,
    /// Pair the shown or pending fact belongs to
    pub pair: Option<DatePair>,
}

impl Snapshot {
    pub fn from_state(state: &FactState, config: &FactConfig) -> Self {
        Self {
            selection: state.selection.clone(),
            display: state.display.clone(),
            display_text: state.display.text(config).to_string(),
            month_name: state.selection.month.and_then(crate::selection::month_name),
            pair: state.selection.valid_pair(),
        }
    }
}

/// An event on its way into the executor
///
/// User events carry a reply channel so the caller learns whether the
/// change was accepted once the resulting snapshot is published.
#[derive(Debug)]
pub struct Request {
    pub event: Event,
    pub reply: Option<oneshot::Sender<Result<(), TransitionError>>>,
}

impl Request {
    pub fn fire_and_forget(event: Event) -> Self {
        Self { event, reply: None }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ControllerError {
    #[error(transparent)]
    Rejected(#[from] TransitionError),
    #[error("Controller runtime has stopped")]
    Stopped,
}

/// Handle to a running date-fact runtime
#[derive(Clone)]
pub struct DateFactController {
    request_tx: mpsc::Sender<Request>,
    snapshot_rx: watch::Receiver<Snapshot>,
}

impl DateFactController {
    /// Start a runtime on the current tokio runtime and return its handle
    pub fn spawn<F: FactService + 'static>(config: FactConfig, fact_service: F) -> Self {
        let (request_tx, request_rx) = mpsc::channel(32);
        let initial = Snapshot::from_state(&FactState::new(), &config);
        let (snapshot_tx, snapshot_rx) = watch::channel(initial);

        let runtime = FactRuntime::new(
            config,
            FactState::new(),
            fact_service,
            request_rx,
            request_tx.downgrade(),
            snapshot_tx,
        );
        tokio::spawn(runtime.run());

        Self {
            request_tx,
            snapshot_rx,
        }
    }

    async fn send(&self, event: Event) -> Result<(), ControllerError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.request_tx
            .send(Request {
                event,
                reply: Some(reply_tx),
            })
            .await
            .map_err(|_| ControllerError::Stopped)?;
        reply_rx.await.map_err(|_| ControllerError::Stopped)??;
        Ok(())
    }

    /// Replace the month; clears the day and never fetches on its own
    pub async fn set_month(&self, input: impl Into<FieldInput>) -> Result<(), ControllerError> {
        self.send(Event::SetMonth(input.into())).await
    }

    /// Set the day; rejected with [`TransitionError::MonthRequired`] when no
    /// month is selected
    pub async fn set_day(&self, input: impl Into<FieldInput>) -> Result<(), ControllerError> {
        self.send(Event::SetDay(input.into())).await
    }

    pub async fn clear(&self) -> Result<(), ControllerError> {
        self.send(Event::ClearSelection).await
    }

    pub fn current_display_text(&self) -> String {
        self.snapshot_rx.borrow().display_text.clone()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.snapshot_rx.borrow().clone()
    }

    /// Receiver that observes every published snapshot
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshot_rx.clone()
    }

    /// Wait until no fetch is pending and return that snapshot
    pub async fn settled(&self) -> Snapshot {
        let mut rx = self.snapshot_rx.clone();
        if let Ok(snapshot) = rx.wait_for(|s| s.display.is_settled()).await {
            return snapshot.clone();
        }
        self.snapshot()
    }
}
