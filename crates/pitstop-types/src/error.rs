use thiserror::Error;

/// Errors from repository operations (used by trait definitions in pitstop-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,
}

/// Errors from the outbound message gateway.
///
/// Gateway failures are non-fatal to a conversation turn: callers log
/// them and move on.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("transport error: {0}")]
    Http(String),

    #[error("messenger API rejected the request: status {status}, body {body}")]
    Api { status: u16, body: String },
}

/// Errors from admin authentication.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("admin credentials are not configured")]
    MissingCredentials,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_display() {
        let err = RepositoryError::Query("syntax error".to_string());
        assert_eq!(err.to_string(), "query error: syntax error");
    }

    #[test]
    fn test_gateway_error_display() {
        let err = GatewayError::Api {
            status: 403,
            body: "forbidden".to_string(),
        };
        assert!(err.to_string().contains("403"));
        assert!(err.to_string().contains("forbidden"));
    }
}
