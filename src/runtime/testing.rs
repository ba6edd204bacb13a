//! Mock implementations for testing
//!
//! These mocks enable driving the controller without real I/O.

use crate::facts::{FactError, FactService};
use crate::selection::DatePair;
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

// ============================================================================
// Mock Fact Service
// ============================================================================

/// Mock fact service that returns queued responses per date
#[allow(dead_code)]
pub struct MockFactService {
    responses: Mutex<HashMap<DatePair, VecDeque<Result<String, FactError>>>>,
    /// Record of all dates requested
    pub requests: Mutex<Vec<DatePair>>,
}

#[allow(dead_code)]
impl MockFactService {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(HashMap::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a successful response for `pair`
    pub fn queue_fact(&self, pair: DatePair, text: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .entry(pair)
            .or_default()
            .push_back(Ok(text.into()));
    }

    /// Queue a failure for `pair`
    pub fn queue_error(&self, pair: DatePair, error: FactError) {
        self.responses
            .lock()
            .unwrap()
            .entry(pair)
            .or_default()
            .push_back(Err(error));
    }

    pub fn recorded_requests(&self) -> Vec<DatePair> {
        self.requests.lock().unwrap().clone()
    }

    fn next_response(&self, pair: DatePair) -> Result<String, FactError> {
        self.responses
            .lock()
            .unwrap()
            .get_mut(&pair)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| Err(FactError::transport("No mock response queued")))
    }
}

impl Default for MockFactService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FactService for MockFactService {
    async fn fetch(&self, pair: DatePair) -> Result<String, FactError> {
        self.requests.lock().unwrap().push(pair);
        self.next_response(pair)
    }

    fn endpoint(&self) -> &str {
        "mock://facts"
    }
}

// ============================================================================
// Delayed Mock Fact Service (for race testing)
// ============================================================================

/// Mock fact service with a configurable delay per date
pub struct DelayedMockFactService {
    inner: MockFactService,
    delays: HashMap<DatePair, Duration>,
    default_delay: Duration,
}

impl DelayedMockFactService {
    pub fn new(default_delay: Duration) -> Self {
        Self {
            inner: MockFactService::new(),
            delays: HashMap::new(),
            default_delay,
        }
    }

    pub fn with_delay(mut self, pair: DatePair, delay: Duration) -> Self {
        self.delays.insert(pair, delay);
        self
    }

    pub fn queue_fact(&self, pair: DatePair, text: impl Into<String>) {
        self.inner.queue_fact(pair, text);
    }

    pub fn recorded_requests(&self) -> Vec<DatePair> {
        self.inner.recorded_requests()
    }
}

#[async_trait]
impl FactService for DelayedMockFactService {
    async fn fetch(&self, pair: DatePair) -> Result<String, FactError> {
        self.inner.requests.lock().unwrap().push(pair);
        let delay = self.delays.get(&pair).copied().unwrap_or(self.default_delay);
        tokio::time::sleep(delay).await;
        self.inner.next_response(pair)
    }

    fn endpoint(&self) -> &str {
        "mock://facts/delayed"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ErrorPolicy, FactConfig};
    use crate::facts::LoggingService;
    use crate::runtime::{ControllerError, DateFactController};
    use crate::selection::Selection;
    use crate::state_machine::{Display, TransitionError};
    use std::sync::Arc;

    fn pair(month: u32, day: u32) -> DatePair {
        DatePair::new(month, day).unwrap()
    }

    #[tokio::test]
    async fn test_mock_fact_service() {
        let mock = MockFactService::new();
        mock.queue_fact(pair(3, 14), "pi day");

        assert_eq!(mock.fetch(pair(3, 14)).await.unwrap(), "pi day");
        // Second call should fail (no more responses)
        assert!(mock.fetch(pair(3, 14)).await.is_err());
        assert_eq!(mock.recorded_requests(), vec![pair(3, 14), pair(3, 14)]);
    }

    #[tokio::test]
    async fn test_initial_display_is_prompt() {
        let controller = DateFactController::spawn(FactConfig::default(), MockFactService::new());
        assert_eq!(
            controller.current_display_text(),
            "Select a date and see a fun fact!"
        );
        assert_eq!(controller.snapshot().display, Display::Prompt);
    }

    #[tokio::test]
    async fn test_valid_pair_shows_fact() {
        let mock = Arc::new(MockFactService::new());
        mock.queue_fact(pair(3, 14), "March 14th is Pi Day.");
        let controller = DateFactController::spawn(FactConfig::default(), mock.clone());

        controller.set_month(3u32).await.unwrap();
        assert!(mock.recorded_requests().is_empty());
        controller.set_day(14u32).await.unwrap();

        let snapshot = controller.settled().await;
        assert_eq!(snapshot.display, Display::Loaded("March 14th is Pi Day.".into()));
        assert_eq!(snapshot.display_text, "March 14th is Pi Day.");
        assert_eq!(snapshot.month_name, Some("March"));
        assert_eq!(mock.recorded_requests(), vec![pair(3, 14)]);
    }

    #[tokio::test]
    async fn test_day_without_month_rejected() {
        let mock = Arc::new(MockFactService::new());
        let controller = DateFactController::spawn(FactConfig::default(), mock.clone());

        let err = controller.set_day(5u32).await.unwrap_err();
        assert_eq!(err, ControllerError::Rejected(TransitionError::MonthRequired));
        assert!(mock.recorded_requests().is_empty());
        assert_eq!(controller.snapshot().selection.day, None);
    }

    #[tokio::test]
    async fn test_new_month_clears_day_and_fact() {
        let mock = Arc::new(MockFactService::new());
        mock.queue_fact(pair(1, 1), "New year");
        let controller = DateFactController::spawn(FactConfig::default(), mock.clone());

        controller.set_month("1").await.unwrap();
        controller.set_day("1").await.unwrap();
        assert_eq!(controller.settled().await.display_text, "New year");

        controller.set_month("2").await.unwrap();
        let snapshot = controller.snapshot();
        assert_eq!(snapshot.selection.day, None);
        assert_eq!(snapshot.display, Display::Prompt);
    }

    #[tokio::test]
    async fn test_free_text_is_digit_filtered() {
        let mock = Arc::new(MockFactService::new());
        mock.queue_fact(pair(3, 4), "fact");
        let controller = DateFactController::spawn(FactConfig::default(), mock.clone());

        controller.set_month("x3").await.unwrap();
        controller.set_day("0a4").await.unwrap();
        controller.settled().await;
        assert_eq!(mock.recorded_requests(), vec![pair(3, 4)]);

        // "3a4" reads as day 34, which no month has
        controller.set_day("3a4").await.unwrap();
        assert_eq!(controller.snapshot().selection.day, Some(34));
        assert_eq!(controller.snapshot().display, Display::Prompt);
        assert_eq!(mock.recorded_requests().len(), 1);
    }

    #[tokio::test]
    async fn test_transport_failure_shows_error_text() {
        let mock = Arc::new(MockFactService::new());
        mock.queue_fact(pair(5, 1), "May day");
        mock.queue_error(pair(5, 2), FactError::transport("dns failure"));
        let controller = DateFactController::spawn(FactConfig::default(), mock.clone());

        controller.set_month(5u32).await.unwrap();
        controller.set_day(1u32).await.unwrap();
        assert_eq!(controller.settled().await.display_text, "May day");

        controller.set_day(2u32).await.unwrap();
        let snapshot = controller.settled().await;
        assert_eq!(snapshot.display, Display::Error);
        assert_eq!(snapshot.display_text, "Error fetching fact.");
    }

    #[tokio::test]
    async fn test_blank_policy_shows_nothing() {
        let mock = Arc::new(MockFactService::new());
        mock.queue_error(pair(6, 6), FactError::auth("Invalid API key"));
        let config = FactConfig::default().with_error_policy(ErrorPolicy::Blank);
        let controller = DateFactController::spawn(config, LoggingService::new(mock.clone()));

        controller.set_month(6u32).await.unwrap();
        controller.set_day(6u32).await.unwrap();
        let snapshot = controller.settled().await;
        assert_eq!(snapshot.display, Display::Empty);
        assert_eq!(snapshot.display_text, "");
    }

    #[tokio::test]
    async fn test_stale_response_arriving_late_is_dropped() {
        let slow = Duration::from_millis(200);
        let mock = Arc::new(
            DelayedMockFactService::new(Duration::from_millis(10)).with_delay(pair(3, 14), slow),
        );
        mock.queue_fact(pair(3, 14), "stale");
        mock.queue_fact(pair(3, 15), "fresh");
        let controller = DateFactController::spawn(FactConfig::default(), mock.clone());

        controller.set_month(3u32).await.unwrap();
        controller.set_day(14u32).await.unwrap();
        controller.set_day(15u32).await.unwrap();

        assert_eq!(controller.settled().await.display_text, "fresh");

        // Let the slow, superseded request land
        tokio::time::sleep(slow * 2).await;
        assert_eq!(controller.current_display_text(), "fresh");
        assert_eq!(mock.recorded_requests(), vec![pair(3, 14), pair(3, 15)]);
    }

    #[tokio::test]
    async fn test_stale_response_arriving_early_is_dropped() {
        let mock = Arc::new(
            DelayedMockFactService::new(Duration::from_millis(10))
                .with_delay(pair(3, 15), Duration::from_millis(300)),
        );
        mock.queue_fact(pair(3, 14), "stale");
        mock.queue_fact(pair(3, 15), "fresh");
        let controller = DateFactController::spawn(FactConfig::default(), mock.clone());

        controller.set_month(3u32).await.unwrap();
        controller.set_day(14u32).await.unwrap();
        controller.set_day(15u32).await.unwrap();

        // The first request has resolved by now; its text must not show
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(controller.snapshot().display, Display::Loading);

        assert_eq!(controller.settled().await.display_text, "fresh");
    }

    #[tokio::test]
    async fn test_reset_while_loading_drops_response() {
        let mock = Arc::new(DelayedMockFactService::new(Duration::from_millis(50)));
        mock.queue_fact(pair(8, 8), "late");
        let controller = DateFactController::spawn(FactConfig::default(), mock.clone());

        controller.set_month(8u32).await.unwrap();
        controller.set_day(8u32).await.unwrap();
        controller.clear().await.unwrap();

        tokio::time::sleep(Duration::from_millis(150)).await;
        let snapshot = controller.snapshot();
        assert_eq!(snapshot.display, Display::Prompt);
        assert_eq!(snapshot.selection, Selection::default());
    }

    #[tokio::test]
    async fn test_subscribers_see_changes() {
        let mock = Arc::new(MockFactService::new());
        mock.queue_fact(pair(10, 31), "Halloween");
        let controller = DateFactController::spawn(FactConfig::default(), mock);
        let mut rx = controller.subscribe();

        controller.set_month(10u32).await.unwrap();
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().selection.month, Some(10));

        controller.set_day(31u32).await.unwrap();
        let text = rx
            .wait_for(|s| s.display.is_settled())
            .await
            .unwrap()
            .display_text
            .clone();
        assert_eq!(text, "Halloween");
    }

    #[tokio::test]
    async fn test_snapshot_json_output() {
        let mock = Arc::new(MockFactService::new());
        mock.queue_fact(pair(2, 2), "Groundhog Day");
        let controller = DateFactController::spawn(FactConfig::default(), mock);

        controller.set_month(2u32).await.unwrap();
        controller.set_day(2u32).await.unwrap();
        let json = serde_json::to_value(controller.settled().await).unwrap();

        assert_eq!(json["selection"], serde_json::json!({ "month": 2, "day": 2 }));
        assert_eq!(
            json["display"],
            serde_json::json!({ "type": "loaded", "text": "Groundhog Day" })
        );
        assert_eq!(json["display_text"], "Groundhog Day");
        assert_eq!(json["month_name"], "February");
        assert_eq!(json["pair"], serde_json::json!({ "month": 2, "day": 2 }));
    }
}
