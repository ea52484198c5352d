//! Axum route handlers for the Analysis API.

use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::analysis::analyst::require_text;
use crate::analysis::competitor::CompetitorAnalysis;
use crate::analysis::content::PostResult;
use crate::analysis::email::{AudienceSegment, EmailCampaign};
use crate::analysis::report::LogProgress;
use crate::analysis::seo::SeoResult;
use crate::errors::AppError;
use crate::models::profile::{deserialize_keywords, BusinessProfile};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SeoRequest {
    pub url: String,
    #[serde(default, deserialize_with = "deserialize_keywords")]
    pub keywords: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct CompetitorRequest {
    pub competitors: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_keywords")]
    pub keywords: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct PostRequest {
    pub topic: String,
    pub platform: String,
    pub tone: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EmailCampaignRequest {
    pub campaign_type: String,
    pub segments: Vec<AudienceSegment>,
}

#[derive(Debug, Deserialize)]
pub struct ReportRequest {
    pub profile: BusinessProfile,
    pub competitors: Vec<String>,
}

#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Json,
    Text,
}

#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    #[serde(default)]
    pub format: ReportFormat,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/seo
///
/// Audits one page. Returns 502 when the page itself cannot be fetched.
pub async fn handle_seo_audit(
    State(state): State<AppState>,
    Json(request): Json<SeoRequest>,
) -> Result<Json<SeoResult>, AppError> {
    if request.keywords.is_empty() {
        return Err(AppError::Validation("keywords cannot be empty".to_string()));
    }

    let result = state
        .analyst
        .seo_audit(&request.url, &request.keywords)
        .await?;

    Ok(Json(result))
}

/// POST /api/v1/competitors
///
/// Up to five competitors. A competitor whose completions fail is returned with
/// failure text in place of the missing fields.
pub async fn handle_competitor_watch(
    State(state): State<AppState>,
    Json(request): Json<CompetitorRequest>,
) -> Result<Json<CompetitorAnalysis>, AppError> {
    if request.keywords.is_empty() {
        return Err(AppError::Validation("keywords cannot be empty".to_string()));
    }

    let analysis = state
        .analyst
        .competitor_watch(&request.competitors, &request.keywords)
        .await?;
    info!("Competitor analysis complete for {} competitors", analysis.len());

    Ok(Json(analysis))
}

/// POST /api/v1/posts
pub async fn handle_post_creator(
    State(state): State<AppState>,
    Json(request): Json<PostRequest>,
) -> Result<Json<PostResult>, AppError> {
    require_text("topic", &request.topic)?;
    require_text("platform", &request.platform)?;

    let tone = request
        .tone
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase);

    let post = state
        .analyst
        .post_creator(&request.topic, &request.platform, tone.as_deref())
        .await;

    Ok(Json(post))
}

/// POST /api/v1/email-campaigns
pub async fn handle_email_campaign(
    State(state): State<AppState>,
    Json(request): Json<EmailCampaignRequest>,
) -> Result<Json<EmailCampaign>, AppError> {
    let campaign = state
        .analyst
        .email_campaign(&request.campaign_type, &request.segments)
        .await?;

    Ok(Json(campaign))
}

/// POST /api/v1/reports[?format=text]
///
/// Full pipeline: SEO → competitors → content → email → synthesis.
/// `format=text` returns the narrative body as a plain-text download.
pub async fn handle_comprehensive_report(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
    Json(request): Json<ReportRequest>,
) -> Result<Response, AppError> {
    let report = state
        .analyst
        .comprehensive_report(&request.profile, &request.competitors, &LogProgress)
        .await?;

    match query.format {
        ReportFormat::Json => Ok(Json(report).into_response()),
        ReportFormat::Text => {
            let disposition = format!(
                "attachment; filename=\"{}\"",
                header_safe(&report.download_filename())
            );
            Ok((
                [
                    (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                report.report_body,
            )
                .into_response())
        }
    }
}

/// Keeps a filename usable inside a quoted header value.
fn header_safe(filename: &str) -> String {
    filename
        .chars()
        .map(|c| {
            if c == ' ' || (c.is_ascii_graphic() && c != '"') {
                c
            } else {
                '_'
            }
        })
        .collect()
}
