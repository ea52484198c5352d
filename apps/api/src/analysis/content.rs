//! Post Creator: one completion for a social or long-form content draft.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::analysis::analyst::MarketingAnalyst;
use crate::analysis::prompts::build_post_prompt;
use crate::llm_client::prompts::DEFAULT_TONE;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostResult {
    pub platform: String,
    pub topic: String,
    pub tone: String,
    /// Generated draft, or the failure message.
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl MarketingAnalyst {
    pub async fn post_creator(&self, topic: &str, platform: &str, tone: Option<&str>) -> PostResult {
        let tone = tone.unwrap_or(DEFAULT_TONE);
        info!("Creating {platform} post about {topic} ({tone})");

        let content = self
            .complete(&build_post_prompt(topic, platform, Some(tone)))
            .await
            .into_text();

        PostResult {
            platform: platform.to_string(),
            topic: topic.to_string(),
            tone: tone.to_string(),
            content,
            created_at: self.now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::analysis::test_support::{analyst, reference_instant, ScriptedCompletion, StaticPage};
    use crate::llm_client::GenerationResult;

    #[tokio::test]
    async fn test_post_wraps_content_with_origin_and_timestamp() {
        let completion = Arc::new(ScriptedCompletion::always("Big news! #coffee"));
        let analyst = analyst(completion.clone(), StaticPage::status(500));

        let post = analyst.post_creator("cold brew", "LinkedIn", None).await;

        assert_eq!(post.platform, "LinkedIn");
        assert_eq!(post.topic, "cold brew");
        assert_eq!(post.tone, "professional");
        assert_eq!(post.content, "Big news! #coffee");
        assert_eq!(post.created_at, reference_instant());
        assert_eq!(
            completion.prompts(),
            vec![build_post_prompt("cold brew", "LinkedIn", None)]
        );
    }

    #[tokio::test]
    async fn test_post_failure_becomes_content_text() {
        let completion = Arc::new(ScriptedCompletion::new(GenerationResult::Failure(
            "Content generation failed: 401".to_string(),
        )));
        let analyst = analyst(completion, StaticPage::status(500));

        let post = analyst.post_creator("beans", "Twitter", Some("casual")).await;
        assert_eq!(post.tone, "casual");
        assert_eq!(post.content, "Content generation failed: 401");
    }
}
