//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};

/// URL-encoded form submitted to `POST /create-post`.
///
/// The field is optional so a missing value reaches the handler and is
/// reported as a validation error instead of a generic parse failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatePostForm {
    pub blogpost: Option<String>,
}

/// Response for a newly created post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostCreatedResponse {
    pub id: String,
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_created_response_shape() {
        let body = PostCreatedResponse {
            id: "1700000000000".to_string(),
            content: "hello".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({ "id": "1700000000000", "content": "hello" })
        );
    }
}
