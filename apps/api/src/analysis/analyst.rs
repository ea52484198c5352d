//! Analysis Orchestrator: owns the collaborator handles every tool operation uses.
//!
//! The operations themselves live next to their data types (`seo`, `competitor`,
//! `content`, `email`, `report`) as `impl MarketingAnalyst` blocks. Every outbound
//! call is awaited in sequence; nothing in a run executes concurrently.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::errors::AppError;
use crate::llm_client::{CompletionService, GenerationResult};
use crate::page_meta::PageFetcher;

/// Source of the current instant. Swapped for a fixed clock in tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Coordinates prompt building, completion calls, page fetches and parsing.
///
/// Cheap to clone; all collaborators are shared, immutable handles.
#[derive(Clone)]
pub struct MarketingAnalyst {
    completion: Arc<dyn CompletionService>,
    fetcher: Arc<dyn PageFetcher>,
    clock: Arc<dyn Clock>,
}

impl MarketingAnalyst {
    pub fn new(completion: Arc<dyn CompletionService>, fetcher: Arc<dyn PageFetcher>) -> Self {
        Self {
            completion,
            fetcher,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub(crate) async fn complete(&self, prompt: &str) -> GenerationResult {
        self.completion.complete(prompt).await
    }

    pub(crate) fn fetcher(&self) -> &dyn PageFetcher {
        self.fetcher.as_ref()
    }

    pub(crate) fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }
}

/// Rejects blank or missing required text fields.
pub(crate) fn require_text(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_text_rejects_blank() {
        let err = require_text("url", "   ").unwrap_err();
        assert_eq!(err.to_string(), "Validation error: url cannot be empty");
        assert!(require_text("url", "https://example.com").is_ok());
    }
}
