// All LLM prompt templates for the analysis tools.
// Builders are pure: identical inputs always render byte-identical prompts.

use crate::analysis::email::AudienceSegment;
use crate::llm_client::prompts::{join_list, render_template, DEFAULT_TONE};
use crate::page_meta::PageMetadata;

/// SEO audit prompt.
/// Replace: {url}, {title}, {meta_description}, {h1_tags}, {keywords}
pub const SEO_AUDIT_TEMPLATE: &str = "Analyze this webpage SEO for:
URL: {url}
Title: {title}
Meta Description: {meta_description}
H1 Tags: {h1_tags}
Target Keywords: {keywords}

Provide recommendations for:
1. Title optimization
2. Meta description improvements
3. Content structure
4. Keyword placement
5. Technical SEO improvements";

/// Competitor quick-summary prompt. Replace: {competitor}
pub const COMPETITOR_SUMMARY_TEMPLATE: &str = "Provide a concise 3-point summary of {competitor}'s key strengths and market positioning:
1. Primary competitive advantage
2. Target audience focus
3. Market differentiation
Keep each point brief and actionable.";

/// Competitor deep-analysis prompt. Replace: {competitor}, {keywords}
///
/// The five numbered headings must match the section parser's canonical headings.
pub const COMPETITOR_ANALYSIS_TEMPLATE: &str = "Provide a detailed competitive analysis for {competitor} focusing on:
1. Content Strategy:
   - Content types and formats used
   - Publishing frequency and consistency
   - Content quality and engagement metrics
   - Target audience alignment and reach

2. Keyword Analysis:
   - Usage of target keywords: {keywords}
   - Keyword density and placement strategy
   - Related keywords and semantic relevance
   - Overall SEO optimization effectiveness

3. Market Presence:
   - Brand positioning and market share
   - Unique selling propositions (USPs)
   - Customer engagement and loyalty
   - Brand authority and credibility indicators

4. Competitive Advantages:
   - Key strengths and core competencies
   - Notable weaknesses and gaps
   - Market opportunities to exploit
   - Potential threats to address

5. Actionable Recommendations:
   - Immediate actions (next 30 days):
     * Specific tactical improvements
     * Quick wins and low-hanging fruit
   - Strategic initiatives (next 90 days):
     * Long-term competitive advantages
     * Market positioning improvements
   - Resource allocation suggestions:
     * Required investments
     * Expected outcomes

Format each section with clear bullet points and specific examples.";

/// Competitor scorecard prompt. Replace: {competitor}
pub const COMPETITOR_METRICS_TEMPLATE: &str = "Based on the website {competitor}, provide detailed metrics with justification:
1. Content Quality Score (0-100):
   - Writing quality
   - Visual appeal
   - User engagement

2. Keyword Optimization Level (0-100):
   - Keyword relevance
   - Content optimization
   - Technical SEO

3. Market Position Strength (0-100):
   - Brand authority
   - Market share
   - Competitive advantage

4. Brand Authority Score (0-100):
   - Industry presence
   - Social proof
   - Thought leadership

For each metric, provide a specific score and brief justification.";

/// Social/content post prompt. Replace: {platform}, {topic}, {tone}
pub const POST_TEMPLATE: &str = "Create a {platform} post about {topic} with a {tone} tone.
Include:
1. Main post content
2. Relevant hashtags
3. Call to action
4. Best posting time recommendation";

/// Email campaign body prompt. Replace: {campaign_type}, {segment}
pub const EMAIL_TEMPLATE: &str = "Create an email campaign for:
Campaign Type: {campaign_type}
Audience Segment: {segment}
Include:
1. Subject line options
2. Email body
3. Call to action
4. Personalization elements";

/// Subject-line batch prompt. Replace: {campaign_type}, {segment_name}
pub const SUBJECT_LINES_TEMPLATE: &str =
    "Generate 5 engaging subject lines for {campaign_type} campaign targeting {segment_name}";

/// Final report synthesis prompt.
/// Replace: {url}, {brand}, {industry}, {keywords}, {competitors}, {seo_analysis},
///          {competitor_insights}, {content_suggestions}, {email_strategy}, {start_date}
pub const REPORT_TEMPLATE: &str = "Create a comprehensive marketing analysis report based on:
Website: {url}
Brand: {brand}
Industry: {industry}
Keywords: {keywords}
Competitors: {competitors}
SEO Analysis: {seo_analysis}
Competitor Insights: {competitor_insights}
Content Suggestions: {content_suggestions}
Email Strategy: {email_strategy}

Provide a detailed report with:
1. Executive Summary
2. Current Market Position
3. Competitive Landscape
4. Marketing Opportunities
5. Action Plan with specific deadlines starting from {start_date}:
   - Short-term actions (within 1 week)
   - Medium-term actions (within 1 month)
   - Long-term actions (within 3 months)";

pub fn build_seo_audit_prompt(url: &str, metadata: &PageMetadata, keywords: &[String]) -> String {
    render_template(
        SEO_AUDIT_TEMPLATE,
        &[
            ("url", url),
            ("title", &metadata.title),
            ("meta_description", &metadata.description),
            ("h1_tags", &join_list(&metadata.h1)),
            ("keywords", &join_list(keywords)),
        ],
    )
}

pub fn build_competitor_summary_prompt(competitor: &str) -> String {
    render_template(COMPETITOR_SUMMARY_TEMPLATE, &[("competitor", competitor)])
}

pub fn build_competitor_analysis_prompt(competitor: &str, keywords: &[String]) -> String {
    render_template(
        COMPETITOR_ANALYSIS_TEMPLATE,
        &[("competitor", competitor), ("keywords", &join_list(keywords))],
    )
}

pub fn build_competitor_metrics_prompt(competitor: &str) -> String {
    render_template(COMPETITOR_METRICS_TEMPLATE, &[("competitor", competitor)])
}

/// `tone` falls back to `DEFAULT_TONE` when absent.
pub fn build_post_prompt(topic: &str, platform: &str, tone: Option<&str>) -> String {
    render_template(
        POST_TEMPLATE,
        &[
            ("platform", platform),
            ("topic", topic),
            ("tone", tone.unwrap_or(DEFAULT_TONE)),
        ],
    )
}

pub fn build_email_prompt(campaign_type: &str, segment: &AudienceSegment) -> String {
    render_template(
        EMAIL_TEMPLATE,
        &[
            ("campaign_type", campaign_type),
            ("segment", &segment.describe()),
        ],
    )
}

pub fn build_subject_lines_prompt(campaign_type: &str, segment_name: &str) -> String {
    render_template(
        SUBJECT_LINES_TEMPLATE,
        &[("campaign_type", campaign_type), ("segment_name", segment_name)],
    )
}

/// Condensed inputs for the synthesis prompt. Each field is embedded verbatim.
#[derive(Debug, Clone)]
pub struct ReportPromptInput<'a> {
    pub url: &'a str,
    pub brand: &'a str,
    pub industry: &'a str,
    pub keywords: &'a [String],
    pub competitors: &'a [String],
    pub seo_analysis: &'a str,
    pub competitor_insights: &'a str,
    pub content_suggestions: &'a str,
    pub email_strategy: &'a str,
    /// `YYYY-MM-DD`
    pub start_date: &'a str,
}

pub fn build_report_prompt(input: &ReportPromptInput<'_>) -> String {
    render_template(
        REPORT_TEMPLATE,
        &[
            ("url", input.url),
            ("brand", input.brand),
            ("industry", input.industry),
            ("keywords", &join_list(input.keywords)),
            ("competitors", &join_list(input.competitors)),
            ("seo_analysis", input.seo_analysis),
            ("competitor_insights", input.competitor_insights),
            ("content_suggestions", input.content_suggestions),
            ("email_strategy", input.email_strategy),
            ("start_date", input.start_date),
        ],
    )
}
