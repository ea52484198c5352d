//! Comprehensive Report: runs every tool in a fixed order, then one synthesis completion.
//!
//! Flow: SEO audit (25%) → competitor watch (50%) → content ideas (75%) →
//!       email strategy (90%) → synthesis (100%).
//!
//! Only invalid input rejects a report. Every degraded sub-result is carried
//! inline as text and the run still completes.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::analysis::analyst::{require_text, MarketingAnalyst};
use crate::analysis::competitor::{validate_competitors, CompetitorAnalysis};
use crate::analysis::content::PostResult;
use crate::analysis::email::{AudienceSegment, EmailCampaign, EngagementLevel, SegmentTrait};
use crate::analysis::prompts::{build_report_prompt, ReportPromptInput};
use crate::analysis::seo::SeoResult;
use crate::errors::AppError;
use crate::models::profile::BusinessProfile;

/// Upper bound for competitors inside a composite report.
pub const MAX_REPORT_COMPETITORS: usize = 3;
/// Characters of each email body kept in the synthesis prompt.
const EMAIL_EXCERPT_CHARS: usize = 100;

const REPORT_PLATFORM: &str = "LinkedIn";
const REPORT_TONE: &str = "professional";
const REPORT_CAMPAIGN: &str = "Promotional";
const FALLBACK_KEYWORD: &str = "generic";

// ────────────────────────────────────────────────────────────────────────────
// Progress
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStage {
    SeoAudit,
    CompetitorWatch,
    ContentIdeas,
    EmailStrategy,
    Synthesis,
}

impl ReportStage {
    pub fn percent(self) -> u8 {
        match self {
            ReportStage::SeoAudit => 25,
            ReportStage::CompetitorWatch => 50,
            ReportStage::ContentIdeas => 75,
            ReportStage::EmailStrategy => 90,
            ReportStage::Synthesis => 100,
        }
    }

    /// Status line shown while this stage runs.
    pub fn status(self) -> &'static str {
        match self {
            ReportStage::SeoAudit => "Step 1/4: Analyzing SEO...",
            ReportStage::CompetitorWatch => "Step 2/4: Analyzing competitors...",
            ReportStage::ContentIdeas => "Step 3/4: Generating content ideas...",
            ReportStage::EmailStrategy => "Step 4/4: Creating email strategy...",
            ReportStage::Synthesis => "Compiling final report with deadlines...",
        }
    }
}

/// Receives a notice when each stage starts and a checkpoint when it completes.
pub trait ProgressSink: Send + Sync {
    fn stage_started(&self, _stage: ReportStage) {}

    fn checkpoint(&self, stage: ReportStage);
}

/// Logs progress through `tracing`.
pub struct LogProgress;

impl ProgressSink for LogProgress {
    fn stage_started(&self, stage: ReportStage) {
        info!("{}", stage.status());
    }

    fn checkpoint(&self, stage: ReportStage) {
        info!("Report progress: {}%", stage.percent());
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// SEO stage outcome. A failed page fetch degrades the report instead of aborting it.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum SeoOutcome {
    Completed(SeoResult),
    Failed { error: String },
}

impl SeoOutcome {
    fn excerpt(&self) -> String {
        match self {
            SeoOutcome::Completed(result) => result.recommendations.clone(),
            SeoOutcome::Failed { error } => format!("N/A (SEO analysis failed: {error})"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Deadline {
    pub label: &'static str,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComprehensiveReport {
    pub profile: BusinessProfile,
    pub competitors: Vec<String>,
    pub seo: SeoOutcome,
    pub competitor_analysis: CompetitorAnalysis,
    pub content: PostResult,
    pub email_campaign: EmailCampaign,
    /// Narrative synthesis, or the failure message.
    pub report_body: String,
    pub reference_date: NaiveDate,
    pub deadlines: Vec<Deadline>,
    pub generated_at: DateTime<Utc>,
}

impl ComprehensiveReport {
    /// `{brand}_marketing_report_{YYYYMMDD}.txt`, dated by generation time.
    pub fn download_filename(&self) -> String {
        report_filename(&self.profile.brand_name, self.generated_at.date_naive())
    }
}

pub fn report_filename(brand_name: &str, date: NaiveDate) -> String {
    format!("{brand_name}_marketing_report_{}.txt", date.format("%Y%m%d"))
}

/// Short, medium and long-term deadlines: +1, +4 and +12 weeks.
pub fn compute_deadlines(reference: NaiveDate) -> Vec<Deadline> {
    [
        ("Short-term (1 week)", 1),
        ("Medium-term (1 month)", 4),
        ("Long-term (3 months)", 12),
    ]
    .into_iter()
    .map(|(label, weeks)| Deadline {
        label,
        date: reference + Duration::weeks(weeks),
    })
    .collect()
}

/// Audience used for the report's email stage.
fn default_audience() -> Vec<AudienceSegment> {
    vec![
        AudienceSegment {
            name: "New Customers".to_string(),
            characteristic: SegmentTrait::FirstTimeBuyers,
            engagement: EngagementLevel::Medium,
        },
        AudienceSegment {
            name: "Returning Customers".to_string(),
            characteristic: SegmentTrait::RepeatCustomers,
            engagement: EngagementLevel::High,
        },
    ]
}

/// First `max_chars` characters followed by `...`.
fn excerpt(text: &str, max_chars: usize) -> String {
    let cut: String = text.chars().take(max_chars).collect();
    format!("{cut}...")
}

fn competitor_insights(analysis: &CompetitorAnalysis) -> String {
    if analysis.is_empty() {
        return "N/A".to_string();
    }
    analysis
        .iter()
        .map(|p| format!("{}: {}", p.competitor, p.analysis_text))
        .collect::<Vec<_>>()
        .join(", ")
}

fn email_strategy(campaign: &EmailCampaign) -> String {
    campaign
        .iter()
        .map(|(name, email)| format!("{name}: {}", excerpt(&email.content, EMAIL_EXCERPT_CHARS)))
        .collect::<Vec<_>>()
        .join(", ")
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline
// ────────────────────────────────────────────────────────────────────────────

impl MarketingAnalyst {
    /// Runs all four tools and synthesizes the final report.
    ///
    /// The reference instant is captured once, before the first stage; deadlines and
    /// the action-plan start date both derive from it.
    pub async fn comprehensive_report(
        &self,
        profile: &BusinessProfile,
        competitors: &[String],
        progress: &dyn ProgressSink,
    ) -> Result<ComprehensiveReport, AppError> {
        require_text("url", &profile.url)?;
        require_text("brand name", &profile.brand_name)?;
        require_text("industry", &profile.industry)?;
        validate_competitors(competitors, MAX_REPORT_COMPETITORS)?;

        let generated_at = self.now();
        let reference_date = generated_at.date_naive();
        let keywords = if profile.keywords.is_empty() {
            vec![FALLBACK_KEYWORD.to_string()]
        } else {
            profile.keywords.clone()
        };

        info!(
            "Generating comprehensive report for {} ({} competitors)",
            profile.brand_name,
            competitors.len()
        );

        // Step 1: SEO audit
        progress.stage_started(ReportStage::SeoAudit);
        let seo = match self.seo_audit(&profile.url, &keywords).await {
            Ok(result) => SeoOutcome::Completed(result),
            Err(e) => {
                warn!("SEO stage degraded: {e}");
                SeoOutcome::Failed {
                    error: e.to_string(),
                }
            }
        };
        progress.checkpoint(ReportStage::SeoAudit);

        // Step 2: Competitors
        progress.stage_started(ReportStage::CompetitorWatch);
        let competitor_analysis = self.watch_competitors(competitors, &keywords).await;
        progress.checkpoint(ReportStage::CompetitorWatch);

        // Step 3: Content idea
        progress.stage_started(ReportStage::ContentIdeas);
        let topic = format!("{} trends", profile.industry);
        let content = self
            .post_creator(&topic, REPORT_PLATFORM, Some(REPORT_TONE))
            .await;
        progress.checkpoint(ReportStage::ContentIdeas);

        // Step 4: Email strategy
        progress.stage_started(ReportStage::EmailStrategy);
        let email_campaign = self
            .email_campaign(REPORT_CAMPAIGN, &default_audience())
            .await?;
        progress.checkpoint(ReportStage::EmailStrategy);

        // Step 5: Synthesis
        progress.stage_started(ReportStage::Synthesis);
        let start_date = reference_date.format("%Y-%m-%d").to_string();
        let seo_analysis = seo.excerpt();
        let insights = competitor_insights(&competitor_analysis);
        let strategy = email_strategy(&email_campaign);
        let prompt = build_report_prompt(&ReportPromptInput {
            url: &profile.url,
            brand: &profile.brand_name,
            industry: &profile.industry,
            keywords: &keywords,
            competitors,
            seo_analysis: &seo_analysis,
            competitor_insights: &insights,
            content_suggestions: &content.content,
            email_strategy: &strategy,
            start_date: &start_date,
        });
        let report_body = self.complete(&prompt).await.into_text();
        progress.checkpoint(ReportStage::Synthesis);

        info!("Report complete for {}", profile.brand_name);

        Ok(ComprehensiveReport {
            profile: BusinessProfile {
                keywords,
                ..profile.clone()
            },
            competitors: competitors.to_vec(),
            seo,
            competitor_analysis,
            content,
            email_campaign,
            report_body,
            reference_date,
            deadlines: compute_deadlines(reference_date),
            generated_at,
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
