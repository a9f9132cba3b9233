use serde::Deserialize;

/// Request body for `POST /audit`.
#[derive(Debug, Deserialize)]
pub struct AuditRequest {
    /// Marketplace item code or storefront product URL. A missing field is
    /// treated the same as an empty one.
    #[serde(default)]
    pub input: String,
}
