//! In-process stand-ins for the completion service, the web fetch and the clock.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

use crate::analysis::analyst::{Clock, MarketingAnalyst};
use crate::llm_client::{CompletionService, GenerationResult};
use crate::page_meta::{FetchError, PageFetcher};

/// Answers each prompt with the first rule whose needle the prompt contains,
/// otherwise with the fallback. Records every prompt it receives.
pub struct ScriptedCompletion {
    rules: Vec<(String, GenerationResult)>,
    fallback: GenerationResult,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedCompletion {
    pub fn new(fallback: GenerationResult) -> Self {
        Self {
            rules: Vec::new(),
            fallback,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn always(text: &str) -> Self {
        Self::new(GenerationResult::Success(text.to_string()))
    }

    pub fn on(mut self, needle: &str, result: GenerationResult) -> Self {
        self.rules.push((needle.to_string(), result));
        self
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionService for ScriptedCompletion {
    async fn complete(&self, prompt: &str) -> GenerationResult {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.rules
            .iter()
            .find(|(needle, _)| prompt.contains(needle.as_str()))
            .map(|(_, result)| result.clone())
            .unwrap_or_else(|| self.fallback.clone())
    }
}

/// Serves the same HTML (or the same failing status) for every URL.
pub struct StaticPage {
    response: Result<String, u16>,
}

impl StaticPage {
    pub fn html(html: &str) -> Self {
        Self {
            response: Ok(html.to_string()),
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            response: Err(status),
        }
    }
}

#[async_trait]
impl PageFetcher for StaticPage {
    async fn fetch_html(&self, url: &str, _timeout: Duration) -> Result<String, FetchError> {
        self.response.clone().map_err(|status| FetchError::Status {
            url: url.to_string(),
            status,
        })
    }
}

pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// 2025-03-24 09:30 UTC.
pub fn reference_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 24, 9, 30, 0).unwrap()
}

pub fn analyst(completion: Arc<ScriptedCompletion>, page: StaticPage) -> MarketingAnalyst {
    MarketingAnalyst::new(completion, Arc::new(page))
        .with_clock(Arc::new(FixedClock(reference_instant())))
}
