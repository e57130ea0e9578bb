use thiserror::Error;

/// Failure talking to the Whop platform. `Display` is the message handed
/// back to the tool caller.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("{0} is not set")]
    MissingCredential(&'static str),
    #[error("{message}")]
    Status { status: u16, message: String },
    #[error("{0}")]
    Network(String),
    #[error("invalid upstream response: {0}")]
    Decode(String),
}

impl UpstreamError {
    /// HTTP status reported by the upstream, if it got that far
    pub fn status(&self) -> Option<u16> {
        match self {
            UpstreamError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Failures that escape a tool's own error handling.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("failed to encode tool result: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_failure_is_the_only_service_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: ServiceError = json_err.into();
        assert!(matches!(err, ServiceError::Serialization(_)));
        assert!(err.to_string().starts_with("failed to encode tool result: "));
    }

    #[test]
    fn upstream_status_only_for_http_failures() {
        let err = UpstreamError::Status { status: 404, message: "Not Found".into() };
        assert_eq!(err.status(), Some(404));
        assert_eq!(UpstreamError::MissingCredential("WHOP_APP_ID").status(), None);
        assert_eq!(UpstreamError::MissingCredential("WHOP_APP_ID").to_string(), "WHOP_APP_ID is not set");
    }
}
