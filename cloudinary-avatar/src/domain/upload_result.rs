use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Normalized description of a stored avatar, as returned by the upload endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadResult {
    pub public_id: String,
    pub secure_url: String,
    pub width: u32,
    pub height: u32,
    pub format: String,
    pub resource_type: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub bytes: u64,
}

/// Error body returned by the API, e.g. `{"error":{"message":"Invalid image file"}}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorResponse {
    pub error: ApiErrorMessage,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorMessage {
    pub message: String,
}
