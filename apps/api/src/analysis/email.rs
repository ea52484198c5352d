//! Smart Email Manager: per-segment body, subject-line batch and send-time lookup.

use std::collections::HashSet;

use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analysis::analyst::{require_text, MarketingAnalyst};
use crate::analysis::prompts::{build_email_prompt, build_subject_lines_prompt};
use crate::errors::AppError;
use crate::llm_client::GenerationResult;

pub const MAX_SEGMENTS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentTrait {
    FirstTimeBuyers,
    #[serde(rename = "repeat_buyers", alias = "repeat_customers")]
    RepeatCustomers,
    VipMembers,
    InactiveUsers,
}

impl SegmentTrait {
    /// Wire value, also the key of the send-time lookup.
    pub fn as_str(self) -> &'static str {
        match self {
            SegmentTrait::FirstTimeBuyers => "first_time_buyers",
            SegmentTrait::RepeatCustomers => "repeat_buyers",
            SegmentTrait::VipMembers => "vip_members",
            SegmentTrait::InactiveUsers => "inactive_users",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SegmentTrait::FirstTimeBuyers => "First-time Buyers",
            SegmentTrait::RepeatCustomers => "Repeat Customers",
            SegmentTrait::VipMembers => "VIP Members",
            SegmentTrait::InactiveUsers => "Inactive Users",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EngagementLevel {
    VeryLow,
    Low,
    Medium,
    High,
    VeryHigh,
}

impl EngagementLevel {
    pub fn label(self) -> &'static str {
        match self {
            EngagementLevel::VeryLow => "Very Low",
            EngagementLevel::Low => "Low",
            EngagementLevel::Medium => "Medium",
            EngagementLevel::High => "High",
            EngagementLevel::VeryHigh => "Very High",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AudienceSegment {
    pub name: String,
    pub characteristic: SegmentTrait,
    pub engagement: EngagementLevel,
}

impl AudienceSegment {
    /// One-line description embedded in the email prompt.
    pub fn describe(&self) -> String {
        format!(
            "{} (characteristics: {}, engagement: {})",
            self.name,
            self.characteristic.label(),
            self.engagement.label()
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailResult {
    pub content: String,
    pub subject_lines: Vec<String>,
    pub send_time: String,
}

/// Segment name → generated email, in request order.
#[derive(Debug, Clone, Default)]
pub struct EmailCampaign {
    entries: Vec<(String, EmailResult)>,
}

impl EmailCampaign {
    pub fn get(&self, segment_name: &str) -> Option<&EmailResult> {
        self.entries
            .iter()
            .find(|(name, _)| name == segment_name)
            .map(|(_, email)| email)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &EmailResult)> {
        self.entries.iter().map(|(name, email)| (name.as_str(), email))
    }
}

impl Serialize for EmailCampaign {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, email) in &self.entries {
            map.serialize_entry(name, email)?;
        }
        map.end()
    }
}

/// Static send-time recommendation keyed by segment characteristic.
pub fn optimize_send_time(characteristic: &str) -> &'static str {
    match characteristic {
        "first_time_buyers" => "14:00 PM",
        "repeat_buyers" => "09:00 AM",
        _ => "10:00 AM",
    }
}

/// One subject line per non-blank line. A failed batch is kept as a single entry.
fn split_subject_lines(result: GenerationResult) -> Vec<String> {
    match result {
        GenerationResult::Success(text) => text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect(),
        GenerationResult::Failure(message) => vec![message],
    }
}

/// Requires 1 to `MAX_SEGMENTS` segments with unique, non-blank names.
fn validate_segments(segments: &[AudienceSegment]) -> Result<(), AppError> {
    if segments.is_empty() || segments.len() > MAX_SEGMENTS {
        return Err(AppError::Validation(format!(
            "between 1 and {MAX_SEGMENTS} audience segments are required, got {}",
            segments.len()
        )));
    }

    let mut seen = HashSet::new();
    for segment in segments {
        require_text("segment name", &segment.name)?;
        if !seen.insert(segment.name.trim()) {
            return Err(AppError::Validation(format!(
                "duplicate segment name '{}'",
                segment.name.trim()
            )));
        }
    }
    Ok(())
}

impl MarketingAnalyst {
    pub async fn email_campaign(
        &self,
        campaign_type: &str,
        segments: &[AudienceSegment],
    ) -> Result<EmailCampaign, AppError> {
        require_text("campaign type", campaign_type)?;
        validate_segments(segments)?;

        let mut entries = Vec::with_capacity(segments.len());
        for segment in segments {
            let name = segment.name.trim();
            info!("Generating {campaign_type} email for segment {name}");

            let content = self
                .complete(&build_email_prompt(campaign_type, segment))
                .await
                .into_text();
            let subject_lines = split_subject_lines(
                self.complete(&build_subject_lines_prompt(campaign_type, name))
                    .await,
            );

            entries.push((
                name.to_string(),
                EmailResult {
                    content,
                    subject_lines,
                    send_time: optimize_send_time(segment.characteristic.as_str()).to_string(),
                },
            ));
        }

        Ok(EmailCampaign { entries })
    }
}
