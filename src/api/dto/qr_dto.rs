//! Request and response bodies of the `/qr` endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Confirmation body returned by a successful delete.
pub const RECORD_DELETED_MESSAGE: &str = "record deleted";

/// Body of `POST /qr/{userId}`.
///
/// All three fields are required strings. Any other field in the body,
/// including `userId`, is ignored.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateQrRequest {
    /// Encoded URL.
    #[schema(example = "https://example.com")]
    pub url: String,
    /// Free-form date string.
    #[schema(example = "2024-01-01")]
    pub date: String,
    /// Image reference or encoded payload.
    pub image: String,
}

/// Plain confirmation message.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    /// Human-readable confirmation.
    pub message: String,
}

impl MessageResponse {
    /// The message returned after a record is soft-deleted.
    #[must_use]
    pub fn record_deleted() -> Self {
        Self {
            message: RECORD_DELETED_MESSAGE.to_string(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn create_request_ignores_body_user_id() {
        let json = r#"{"url":"http://a","date":"2024-01-01","image":"img1","userId":"intruder","id":9}"#;
        let Ok(req) = serde_json::from_str::<CreateQrRequest>(json) else {
            panic!("body should bind");
        };
        assert_eq!(req.url, "http://a");
        assert_eq!(req.image, "img1");
    }

    #[test]
    fn create_request_requires_all_fields() {
        let json = r#"{"url":"http://a","date":"2024-01-01"}"#;
        let err = serde_json::from_str::<CreateQrRequest>(json).err();
        let Some(err) = err else {
            panic!("missing image should fail");
        };
        assert!(err.to_string().contains("image"));
    }

    #[test]
    fn deleted_message_shape() {
        let Ok(value) = serde_json::to_value(MessageResponse::record_deleted()) else {
            panic!("serialization failed");
        };
        assert_eq!(value, serde_json::json!({ "message": "record deleted" }));
    }
}
