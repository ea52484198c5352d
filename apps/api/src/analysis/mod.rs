// Analysis orchestration: SEO audit, competitor watch, post creation, email campaigns
// and the composite report. All LLM calls go through llm_client's CompletionService.

pub mod analyst;
pub mod competitor;
pub mod content;
pub mod email;
pub mod handlers;
pub mod prompts;
pub mod report;
pub mod sections;
pub mod seo;

#[cfg(test)]
pub(crate) mod test_support;
