//! SEO Optimizer: page metadata plus one recommendations completion.

use serde::Serialize;
use tracing::{info, warn};

use crate::analysis::analyst::{require_text, MarketingAnalyst};
use crate::analysis::prompts::build_seo_audit_prompt;
use crate::errors::AppError;
use crate::page_meta::extract_page_metadata;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeoResult {
    pub url: String,
    pub current_title: String,
    pub current_meta: String,
    pub current_h1: Vec<String>,
    /// Completion text, or the failure message when the completion failed.
    pub recommendations: String,
}

impl MarketingAnalyst {
    /// Audits one page against the target keywords.
    ///
    /// A failed page fetch aborts the audit; a failed completion does not.
    pub async fn seo_audit(&self, url: &str, keywords: &[String]) -> Result<SeoResult, AppError> {
        require_text("url", url)?;
        info!("Running SEO audit for {url}");

        let metadata = extract_page_metadata(self.fetcher(), url)
            .await
            .map_err(|e| {
                warn!("SEO audit aborted, could not fetch {url}: {e}");
                AppError::PageFetch(e.to_string())
            })?;

        let prompt = build_seo_audit_prompt(url, &metadata, keywords);
        let recommendations = self.complete(&prompt).await.into_text();

        Ok(SeoResult {
            url: url.to_string(),
            current_title: metadata.title,
            current_meta: metadata.description,
            current_h1: metadata.h1,
            recommendations,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::analysis::test_support::{analyst, ScriptedCompletion, StaticPage};
    use crate::llm_client::GenerationResult;

    const PAGE: &str = r#"<html><head>
        <title>Example Domain</title>
        <meta name="description" content="Illustrative example page">
        </head><body><h1>Example Domain</h1><h1>Growth tips</h1></body></html>"#;

    fn keywords() -> Vec<String> {
        vec!["seo".to_string(), "growth".to_string()]
    }

    #[tokio::test]
    async fn test_seo_audit_returns_metadata_and_canned_recommendations() {
        let completion = Arc::new(ScriptedCompletion::always("Rewrite the title to lead with 'seo'."));
        let analyst = analyst(completion.clone(), StaticPage::html(PAGE));

        let result = analyst
            .seo_audit("https://example.com", &keywords())
            .await
            .unwrap();

        assert_eq!(result.url, "https://example.com");
        assert_eq!(result.current_title, "Example Domain");
        assert_eq!(result.current_meta, "Illustrative example page");
        assert_eq!(result.current_h1, vec!["Example Domain", "Growth tips"]);
        assert_eq!(result.recommendations, "Rewrite the title to lead with 'seo'.");

        let prompts = completion.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Target Keywords: seo, growth"));
        assert!(prompts[0].contains("H1 Tags: Example Domain, Growth tips"));
    }

    #[tokio::test]
    async fn test_seo_audit_fetch_failure_short_circuits() {
        let completion = Arc::new(ScriptedCompletion::always("unused"));
        let analyst = analyst(completion.clone(), StaticPage::status(503));

        let err = analyst
            .seo_audit("https://example.com", &keywords())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::PageFetch(ref msg) if msg.contains("503")));
        assert!(completion.prompts().is_empty(), "no completion after a failed fetch");
    }

    #[tokio::test]
    async fn test_seo_audit_completion_failure_degrades() {
        let completion = Arc::new(ScriptedCompletion::new(GenerationResult::Failure(
            "Content generation failed: rate limited".to_string(),
        )));
        let analyst = analyst(completion, StaticPage::html(PAGE));

        let result = analyst
            .seo_audit("https://example.com", &keywords())
            .await
            .unwrap();

        assert_eq!(result.current_title, "Example Domain");
        assert_eq!(
            result.recommendations,
            "Content generation failed: rate limited"
        );
    }

    #[tokio::test]
    async fn test_seo_audit_rejects_blank_url() {
        let analyst = analyst(Arc::new(ScriptedCompletion::always("x")), StaticPage::html(PAGE));
        let err = analyst.seo_audit("  ", &keywords()).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
