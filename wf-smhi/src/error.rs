/// Error types for the SMHI client and payload parsing
use thiserror::Error;

/// Main error type for fetching and decoding SMHI data
#[derive(Error, Debug)]
pub enum SmhiError {
    /// HTTP request failed, returned a bad status or an unreadable body
    #[cfg(feature = "api")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Transport failure reported by a non-reqwest transport
    #[error("Transport failed: {0}")]
    Transport(String),

    /// A field the next step depends on is absent
    #[error("Missing {0} in response")]
    MissingField(&'static str),

    /// Payload does not have the expected JSON shape
    #[error("Malformed response: {0}")]
    MalformedResponse(#[from] serde_json::Error),
}

impl SmhiError {
    /// Only transport-level failures are worth another attempt.
    pub fn is_transient(&self) -> bool {
        match self {
            #[cfg(feature = "api")]
            SmhiError::Http(_) => true,
            SmhiError::Transport(_) => true,
            SmhiError::MissingField(_) | SmhiError::MalformedResponse(_) => false,
        }
    }
}

/// Type alias for Results using SmhiError
pub type Result<T> = std::result::Result<T, SmhiError>;

#[cfg(test)]
mod tests {
    use super::SmhiError;

    #[test]
    fn test_only_transport_errors_are_transient() {
        assert!(SmhiError::Transport("connection reset".into()).is_transient());
        assert!(!SmhiError::MissingField("productionTime").is_transient());
        let parse_error = serde_json::from_str::<u32>("\"x\"").unwrap_err();
        assert!(!SmhiError::MalformedResponse(parse_error).is_transient());
    }

    #[test]
    fn test_missing_field_message() {
        let err = SmhiError::MissingField("productionTime");
        assert_eq!(err.to_string(), "Missing productionTime in response");
    }
}
