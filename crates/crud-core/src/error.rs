//! Admin Errors
//!
//! Every failure a view can surface, tagged by origin. Views never
//! propagate these further; they turn them into one display string.

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AdminError {
    /// No response was received
    #[error("{message}")]
    Network { message: String },

    /// The server answered with an error status
    #[error("request failed with status {status}")]
    Server { status: u16, message: Option<String> },

    /// Client-side check on one field; never sent to the server
    #[error("{field}: {message}")]
    Validation { field: String, message: String },

    /// The server answered but the body was not what we expected
    #[error("unexpected response: {message}")]
    Decode { message: String },
}

/// Conventional error body: `{"message": "..."}` (some routes use `error`)
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

impl AdminError {
    pub fn network(message: impl Into<String>) -> Self {
        AdminError::Network { message: message.into() }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        AdminError::Decode { message: message.into() }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        AdminError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Build a server error from a status and the raw response body
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.message.or(b.error))
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty());
        AdminError::Server { status, message }
    }

    /// Server-provided message, if any
    pub fn server_message(&self) -> Option<&str> {
        match self {
            AdminError::Server { message, .. } => message.as_deref(),
            AdminError::Validation { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Fallback chain: server message, then this error's own message,
    /// then `generic`
    pub fn user_message(&self, generic: &str) -> String {
        if let Some(message) = self.server_message() {
            return message.to_string();
        }
        let own = self.to_string();
        if own.trim().is_empty() {
            generic.to_string()
        } else {
            own
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_message_wins() {
        let err = AdminError::from_response(422, r#"{"message":"Title is required"}"#);
        assert_eq!(err.user_message("Failed to save"), "Title is required");
    }

    #[test]
    fn test_error_field_alias() {
        let err = AdminError::from_response(404, r#"{"error":"Quote not found"}"#);
        assert_eq!(err.server_message(), Some("Quote not found"));
    }

    #[test]
    fn test_falls_back_to_own_message() {
        let err = AdminError::from_response(500, "<html>oops</html>");
        assert_eq!(err.user_message("Failed to save"), "request failed with status 500");

        let err = AdminError::from_response(500, r#"{"message":"   "}"#);
        assert_eq!(err.server_message(), None);

        let err = AdminError::network("connection refused");
        assert_eq!(err.user_message("Failed to load quotes"), "connection refused");
    }

    #[test]
    fn test_falls_back_to_generic() {
        let err = AdminError::network("");
        assert_eq!(err.user_message("Failed to load quotes"), "Failed to load quotes");
    }
}
