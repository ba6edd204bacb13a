//! Fact lookup provider abstraction
//!
//! Provides a common interface for fetching the trivia text for a date.

mod error;
mod numbers_api;

pub use error::{FactError, FactErrorKind};
pub use numbers_api::NumbersApiService;

use crate::selection::DatePair;
use async_trait::async_trait;
use std::sync::Arc;

/// Common interface for fact providers
#[async_trait]
pub trait FactService: Send + Sync {
    /// Fetch the fact text for `pair`, verbatim
    async fn fetch(&self, pair: DatePair) -> Result<String, FactError>;

    /// Where requests go, for diagnostics
    fn endpoint(&self) -> &str;
}

#[async_trait]
impl<T: FactService + ?Sized> FactService for Arc<T> {
    async fn fetch(&self, pair: DatePair) -> Result<String, FactError> {
        (**self).fetch(pair).await
    }

    fn endpoint(&self) -> &str {
        (**self).endpoint()
    }
}

/// Logging wrapper for fact services
pub struct LoggingService<S> {
    inner: S,
}

impl<S: FactService> LoggingService<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<S: FactService> FactService for LoggingService<S> {
    async fn fetch(&self, pair: DatePair) -> Result<String, FactError> {
        let start = std::time::Instant::now();
        let result = self.inner.fetch(pair).await;
        let duration = start.elapsed();

        match &result {
            Ok(text) => {
                tracing::info!(
                    endpoint = %self.inner.endpoint(),
                    date = %pair,
                    duration_ms = %duration.as_millis(),
                    bytes = text.len(),
                    "Fact request completed"
                );
            }
            Err(e) => {
                tracing::error!(
                    endpoint = %self.inner.endpoint(),
                    date = %pair,
                    duration_ms = %duration.as_millis(),
                    kind = ?e.kind,
                    error = %e.message,
                    "Fact request failed"
                );
            }
        }

        result
    }

    fn endpoint(&self) -> &str {
        self.inner.endpoint()
    }
}
