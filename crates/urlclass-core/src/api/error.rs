use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Authentication failed ({status}): {body}")]
    Authentication {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Authentication succeeded but no {cookie} cookie was returned")]
    MissingToken { cookie: String },

    #[error("Lookup request failed for chunk {chunk} ({status}): {body}")]
    ChunkRequest {
        chunk: usize,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Logout failed: {0}")]
    Logout(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

impl ApiError {
    /// Truncate a response body to avoid logging excessive data
    pub(crate) fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            body.to_string()
        } else {
            let mut end = MAX_ERROR_BODY_LENGTH;
            while !body.is_char_boundary(end) {
                end -= 1;
            }
            format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
        }
    }

    pub fn authentication(status: reqwest::StatusCode, body: &str) -> Self {
        ApiError::Authentication {
            status,
            body: Self::truncate_body(body),
        }
    }

    pub fn chunk_request(chunk: usize, status: reqwest::StatusCode, body: &str) -> Self {
        ApiError::ChunkRequest {
            chunk,
            status,
            body: Self::truncate_body(body),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_truncate_body_short() {
        assert_eq!(ApiError::truncate_body("denied"), "denied");
    }

    #[test]
    fn test_truncate_body_long() {
        let body = "x".repeat(MAX_ERROR_BODY_LENGTH + 20);
        let truncated = ApiError::truncate_body(&body);
        assert!(truncated.starts_with(&"x".repeat(MAX_ERROR_BODY_LENGTH)));
        assert!(truncated.ends_with("(truncated, 520 total bytes)"));
    }

    #[test]
    fn test_truncate_body_respects_char_boundaries() {
        // 'é' is two bytes, so byte 500 falls inside a character
        let body = format!("a{}", "é".repeat(300));
        let truncated = ApiError::truncate_body(&body);
        assert!(truncated.contains("truncated"));
    }

    #[test]
    fn test_authentication_message_carries_body() {
        let err = ApiError::authentication(StatusCode::UNAUTHORIZED, "bad api key");
        assert_eq!(
            err.to_string(),
            "Authentication failed (401 Unauthorized): bad api key"
        );
    }

    #[test]
    fn test_chunk_request_message() {
        let err = ApiError::chunk_request(2, StatusCode::INTERNAL_SERVER_ERROR, "boom");
        assert!(err.to_string().contains("500"));
        assert!(err.to_string().contains("boom"));
    }
}
