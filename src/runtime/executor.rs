//! Date-fact runtime executor

use super::{Request, Snapshot};
use crate::config::FactConfig;
use crate::facts::FactService;
use crate::state_machine::{transition, Effect, Event, FactState, TransitionContext};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};

/// Generic runtime that works with any fact provider
pub struct FactRuntime<F>
where
    F: FactService + 'static,
{
    config: FactConfig,
    context: TransitionContext,
    state: FactState,
    fact_service: Arc<F>,
    request_rx: mpsc::Receiver<Request>,
    /// Upgraded into fetch tasks so completions re-enter the same queue.
    /// Weak, so the loop ends once every controller handle is dropped.
    request_tx: mpsc::WeakSender<Request>,
    snapshot_tx: watch::Sender<Snapshot>,
}

impl<F> FactRuntime<F>
where
    F: FactService + 'static,
{
    pub fn new(
        config: FactConfig,
        state: FactState,
        fact_service: F,
        request_rx: mpsc::Receiver<Request>,
        request_tx: mpsc::WeakSender<Request>,
        snapshot_tx: watch::Sender<Snapshot>,
    ) -> Self {
        Self {
            context: TransitionContext::from_config(&config),
            config,
            state,
            fact_service: Arc::new(fact_service),
            request_rx,
            request_tx,
            snapshot_tx,
        }
    }

    pub async fn run(mut self) {
        tracing::info!(endpoint = %self.fact_service.endpoint(), "Starting date-fact runtime");

        while let Some(request) = self.request_rx.recv().await {
            self.process_request(request);
        }

        tracing::info!("Date-fact runtime stopped");
    }

    fn process_request(&mut self, request: Request) {
        let Request { event, reply } = request;
        let completion = event.completion_token();
        let failure = match &event {
            Event::FetchFailed {
                pair,
                kind,
                message,
                ..
            } => Some((*pair, *kind, message.clone())),
            _ => None,
        };

        let outcome = match transition(&self.state, &self.context, event) {
            Ok(result) => {
                let stale = completion.is_some() && result.effects.is_empty();
                if let (Some(token), true) = (completion, stale) {
                    tracing::debug!(
                        token = %token,
                        current = %self.state.token,
                        "Dropping stale fact response"
                    );
                }
                if let (Some((pair, kind, message)), false) = (failure, stale) {
                    tracing::warn!(
                        date = %pair,
                        kind = ?kind,
                        error = %message,
                        policy = ?self.context.error_policy,
                        "Fact fetch failed"
                    );
                }
                self.state = result.new_state;
                for effect in result.effects {
                    self.execute_effect(effect);
                }
                Ok(())
            }
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring rejected event");
                Err(e)
            }
        };

        if let Some(reply) = reply {
            // Caller may have gone away; nothing to do then
            let _ = reply.send(outcome);
        }
    }

    fn execute_effect(&mut self, effect: Effect) {
        match effect {
            Effect::PublishSnapshot => {
                let snapshot = Snapshot::from_state(&self.state, &self.config);
                self.snapshot_tx.send_replace(snapshot);
            }

            Effect::FetchFact { token, pair } => {
                let Some(request_tx) = self.request_tx.upgrade() else {
                    tracing::debug!(token = %token, "No controller left, skipping fetch");
                    return;
                };
                let fact_service = self.fact_service.clone();

                tokio::spawn(async move {
                    tracing::debug!(token = %token, date = %pair, "Fetching fact (background)");

                    let event = match fact_service.fetch(pair).await {
                        Ok(text) => Event::FactFetched { token, pair, text },
                        Err(e) => Event::FetchFailed {
                            token,
                            pair,
                            kind: e.kind,
                            message: e.message,
                        },
                    };
                    let _ = request_tx.send(Request::fire_and_forget(event)).await;
                });
            }
        }
    }
}
