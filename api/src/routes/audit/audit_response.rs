use listing_audit::AuditReport;
use serde::Serialize;

/// Payload of a successful audit, flattened into the response envelope.
#[derive(Debug, Serialize)]
pub struct AuditResponse {
    pub listing_score: u8,
    /// `positive`, `neutral` or `negative`; empty when reviews were not part
    /// of the audit (storefront pages).
    pub sentiment_summary: String,
    /// Numbered, newline-separated recommendations.
    pub recommendations: String,
}

impl From<AuditReport> for AuditResponse {
    fn from(report: AuditReport) -> Self {
        Self {
            listing_score: report.listing_score,
            sentiment_summary: report
                .sentiment_summary
                .map(|label| label.as_str().to_string())
                .unwrap_or_default(),
            recommendations: report.numbered_recommendations(),
        }
    }
}
