use crate::analysis::analyst::MarketingAnalyst;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Owns the single long-lived completion client and page fetcher.
    pub analyst: MarketingAnalyst,
}
