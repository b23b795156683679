use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The service answered with a non-success status. The body is not read.
    #[error("API Error: {status} {status_text}")]
    Status { status: u16, status_text: String },

    /// The request never completed; carries the transport's own message.
    #[error("{0}")]
    Network(String),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_message() {
        let err = ApiError::Status {
            status: 404,
            status_text: "Not Found".to_string(),
        };
        assert_eq!(err.to_string(), "API Error: 404 Not Found");
    }

    #[test]
    fn test_status_error_with_empty_reason() {
        let err = ApiError::Status {
            status: 599,
            status_text: String::new(),
        };
        assert_eq!(err.to_string(), "API Error: 599 ");
    }

    #[test]
    fn test_network_error_is_verbatim() {
        let err = ApiError::Network("connection refused".to_string());
        assert_eq!(err.to_string(), "connection refused");
    }
}
