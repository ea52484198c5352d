//! Competitor Watchdog: three completions per competitor, deep analysis split into sections.
//!
//! A competitor is never dropped from the result. Each failed call leaves its failure
//! text in the field it would have filled; other fields and other competitors are
//! unaffected.

use serde::Serialize;
use tracing::{info, warn};

use crate::analysis::analyst::{require_text, MarketingAnalyst};
use crate::analysis::prompts::{
    build_competitor_analysis_prompt, build_competitor_metrics_prompt,
    build_competitor_summary_prompt,
};
use crate::analysis::sections::{parse_sections, SectionedAnalysis};
use crate::errors::AppError;

/// Upper bound for a standalone competitor analysis.
pub const MAX_COMPETITORS: usize = 5;

#[derive(Debug, Clone, Serialize)]
pub struct CompetitorProfile {
    pub competitor: String,
    pub quick_summary: String,
    pub analysis: SectionedAnalysis,
    /// Unparsed deep-analysis text (or its failure message).
    pub analysis_text: String,
    pub metrics: String,
}

/// Per-competitor results in request order.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct CompetitorAnalysis {
    entries: Vec<CompetitorProfile>,
}

impl CompetitorAnalysis {
    pub fn get(&self, competitor: &str) -> Option<&CompetitorProfile> {
        self.entries.iter().find(|p| p.competitor == competitor)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CompetitorProfile> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Requires between 1 and `max` competitors, none blank.
pub(crate) fn validate_competitors(competitors: &[String], max: usize) -> Result<(), AppError> {
    if competitors.is_empty() || competitors.len() > max {
        return Err(AppError::Validation(format!(
            "between 1 and {max} competitors are required, got {}",
            competitors.len()
        )));
    }
    for competitor in competitors {
        require_text("competitor url", competitor)?;
    }
    Ok(())
}

impl MarketingAnalyst {
    pub async fn competitor_watch(
        &self,
        competitors: &[String],
        keywords: &[String],
    ) -> Result<CompetitorAnalysis, AppError> {
        validate_competitors(competitors, MAX_COMPETITORS)?;
        Ok(self.watch_competitors(competitors, keywords).await)
    }

    /// Runs the per-competitor loop without input validation.
    pub(crate) async fn watch_competitors(
        &self,
        competitors: &[String],
        keywords: &[String],
    ) -> CompetitorAnalysis {
        let mut entries = Vec::with_capacity(competitors.len());
        for competitor in competitors {
            entries.push(self.profile_competitor(competitor, keywords).await);
        }
        CompetitorAnalysis { entries }
    }

    async fn profile_competitor(&self, competitor: &str, keywords: &[String]) -> CompetitorProfile {
        info!("Analyzing competitor {competitor}");

        let summary = self
            .complete(&build_competitor_summary_prompt(competitor))
            .await;
        let analysis = self
            .complete(&build_competitor_analysis_prompt(competitor, keywords))
            .await;
        let metrics = self
            .complete(&build_competitor_metrics_prompt(competitor))
            .await;

        let failed = [&summary, &analysis, &metrics]
            .iter()
            .filter(|r| !r.is_success())
            .count();
        if failed > 0 {
            warn!("{failed}/3 completions failed for competitor {competitor}");
        }

        let analysis_text = analysis.into_text();
        CompetitorProfile {
            competitor: competitor.to_string(),
            quick_summary: summary.into_text(),
            analysis: parse_sections(&analysis_text),
            analysis_text,
            metrics: metrics.into_text(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::analysis::sections::AnalysisSection;
    use crate::analysis::test_support::{analyst, ScriptedCompletion, StaticPage};
    use crate::llm_client::GenerationResult;

    const ANALYSIS: &str = "1. Content Strategy:\n- Daily posts\n2. Keyword Analysis:\n- Ranks well\n\
        3. Market Presence:\n- National\n4. Competitive Advantages:\n- Price\n\
        5. Actionable Recommendations:\n- Match their cadence";

    fn competitors() -> Vec<String> {
        ["https://a.example", "https://b.example", "https://c.example"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[tokio::test]
    async fn test_failing_competitor_keeps_its_slot_and_others_complete() {
        let failure = "Content generation failed: service unavailable";
        let completion = Arc::new(
            ScriptedCompletion::always(ANALYSIS)
                .on("b.example", GenerationResult::Failure(failure.to_string())),
        );
        let analyst = analyst(completion.clone(), StaticPage::status(500));

        let result = analyst
            .competitor_watch(&competitors(), &["coffee".to_string()])
            .await
            .unwrap();

        assert_eq!(result.len(), 3);
        let order: Vec<_> = result.iter().map(|p| p.competitor.as_str()).collect();
        assert_eq!(order, ["https://a.example", "https://b.example", "https://c.example"]);

        for ok in ["https://a.example", "https://c.example"] {
            let profile = result.get(ok).unwrap();
            assert_eq!(profile.quick_summary, ANALYSIS);
            assert_eq!(profile.metrics, ANALYSIS);
            assert_eq!(profile.analysis.get(AnalysisSection::MarketPresence), "- National");
        }

        let degraded = result.get("https://b.example").unwrap();
        assert_eq!(degraded.quick_summary, failure);
        assert_eq!(degraded.analysis_text, failure);
        assert_eq!(degraded.metrics, failure);
        assert!(degraded.analysis.is_empty());

        assert_eq!(completion.prompts().len(), 9, "three calls per competitor");
    }

    #[tokio::test]
    async fn test_calls_run_summary_analysis_metrics_in_order() {
        let completion = Arc::new(ScriptedCompletion::always("ok"));
        let analyst = analyst(completion.clone(), StaticPage::status(500));

        analyst
            .competitor_watch(&["https://a.example".to_string()], &["seo".to_string()])
            .await
            .unwrap();

        let prompts = completion.prompts();
        assert!(prompts[0].starts_with("Provide a concise 3-point summary"));
        assert!(prompts[1].starts_with("Provide a detailed competitive analysis"));
        assert!(prompts[2].starts_with("Based on the website"));
    }

    #[tokio::test]
    async fn test_partial_failure_only_degrades_that_field() {
        let completion = Arc::new(ScriptedCompletion::always(ANALYSIS).on(
            "Based on the website",
            GenerationResult::Failure("Content generation failed: timeout".to_string()),
        ));
        let analyst = analyst(completion, StaticPage::status(500));

        let result = analyst
            .competitor_watch(&["https://a.example".to_string()], &[])
            .await
            .unwrap();

        let profile = result.get("https://a.example").unwrap();
        assert_eq!(profile.quick_summary, ANALYSIS);
        assert!(!profile.analysis.is_empty());
        assert_eq!(profile.metrics, "Content generation failed: timeout");
    }

    #[tokio::test]
    async fn test_competitor_count_is_bounded() {
        let analyst = analyst(Arc::new(ScriptedCompletion::always("ok")), StaticPage::status(500));

        let none = analyst.competitor_watch(&[], &[]).await.unwrap_err();
        assert!(matches!(none, AppError::Validation(_)));

        let six: Vec<String> = (0..6).map(|i| format!("https://{i}.example")).collect();
        let too_many = analyst.competitor_watch(&six, &[]).await.unwrap_err();
        assert!(matches!(too_many, AppError::Validation(_)));

        let blank = analyst
            .competitor_watch(&["".to_string()], &[])
            .await
            .unwrap_err();
        assert!(matches!(blank, AppError::Validation(_)));
    }
}
