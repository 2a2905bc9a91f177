//! Error types for VidSurface Core
//!
//! Missing control elements are not errors. Everything here is either a bad
//! configuration document, a misuse of the binder, or a failure reported by
//! the host's native media/fullscreen APIs.

use thiserror::Error;

/// Result type alias for surface operations
pub type Result<T> = std::result::Result<T, Error>;

/// Surface error types
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors
    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // Binding errors
    #[error("Surface is already bound ({listeners} listeners active)")]
    AlreadyBound { listeners: usize },

    #[error("Failed to attach {event} listener: {reason}")]
    ListenerAttach { event: String, reason: String },

    // Native media errors
    #[error("Media element rejected {operation}: {reason}")]
    Media {
        operation: &'static str,
        reason: String,
    },

    #[error("Fullscreen {operation} failed: {reason}")]
    Fullscreen {
        operation: &'static str,
        reason: String,
    },

    // Collaborator errors
    #[error("Manifest player failed to load {source_url}: {reason}")]
    ManifestPlayer { source_url: String, reason: String },

    #[error("Ad insertion failed: {0}")]
    AdInsertion(String),
}

impl Error {
    /// Create a media element error
    pub fn media(operation: &'static str, reason: impl Into<String>) -> Self {
        Error::Media {
            operation,
            reason: reason.into(),
        }
    }

    /// Create a fullscreen error
    pub fn fullscreen(operation: &'static str, reason: impl Into<String>) -> Self {
        Error::Fullscreen {
            operation,
            reason: reason.into(),
        }
    }

    /// Returns true if the error came from the host's native APIs
    pub fn is_native(&self) -> bool {
        matches!(self, Error::Media { .. } | Error::Fullscreen { .. })
    }

    /// Returns the error code for host-side reporting
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::ConfigParse(_) => "CONFIG_PARSE",
            Error::InvalidConfig(_) => "INVALID_CONFIG",
            Error::AlreadyBound { .. } => "ALREADY_BOUND",
            Error::ListenerAttach { .. } => "LISTENER_ATTACH",
            Error::Media { .. } => "MEDIA",
            Error::Fullscreen { .. } => "FULLSCREEN",
            Error::ManifestPlayer { .. } => "MANIFEST_PLAYER",
            Error::AdInsertion(_) => "AD_INSERTION",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(Error::AlreadyBound { listeners: 3 }.error_code(), "ALREADY_BOUND");
        assert_eq!(Error::media("play", "NotAllowedError").error_code(), "MEDIA");
        assert_eq!(Error::AdInsertion("boom".into()).error_code(), "AD_INSERTION");
    }

    #[test]
    fn test_native_errors() {
        assert!(Error::fullscreen("request", "denied").is_native());
        assert!(Error::media("pause", "detached").is_native());
        assert!(!Error::InvalidConfig("x".into()).is_native());
    }

    #[test]
    fn test_error_display() {
        let err = Error::fullscreen("request", "permission denied");
        assert_eq!(err.to_string(), "Fullscreen request failed: permission denied");
    }
}
