// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for the SMS bridge.

use thiserror::Error;

/// Channel error code for missing or empty arguments.
pub const CODE_INVALID_INPUT: &str = "INVALID_INPUT";
/// Channel error code for a send attempted without the SMS permission.
pub const CODE_PERMISSION_DENIED: &str = "PERMISSION_DENIED";
/// Channel error code for a failure inside the OS messaging facility.
pub const CODE_SEND_SMS_ERROR: &str = "SEND_SMS_ERROR";

/// Top-level error type for all bridge operations.
#[derive(Debug, Error)]
pub enum SmsBridgeError {
    // -- Caller-visible --
    #[error("Phone number or message is empty")]
    InvalidInput,

    #[error("SMS permission denied")]
    PermissionDenied,

    #[error("Failed to send SMS: {0}")]
    SendError(String),

    // -- Platform bridge --
    #[error("platform bridge error: {0}")]
    Bridge(String),

    #[error("feature not available on this platform")]
    PlatformUnavailable,

    // -- Configuration / wire format --
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("malformed method call: {0}")]
    Codec(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SmsBridgeError {
    /// Error code reported over the method channel, if this error is one
    /// the caller is expected to see.
    pub fn channel_code(&self) -> Option<&'static str> {
        match self {
            SmsBridgeError::InvalidInput => Some(CODE_INVALID_INPUT),
            SmsBridgeError::PermissionDenied => Some(CODE_PERMISSION_DENIED),
            SmsBridgeError::SendError(_) => Some(CODE_SEND_SMS_ERROR),
            _ => None,
        }
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, SmsBridgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caller_visible_errors_have_codes() {
        assert_eq!(SmsBridgeError::InvalidInput.channel_code(), Some("INVALID_INPUT"));
        assert_eq!(
            SmsBridgeError::PermissionDenied.channel_code(),
            Some("PERMISSION_DENIED")
        );
        assert_eq!(
            SmsBridgeError::SendError("radio off".into()).channel_code(),
            Some("SEND_SMS_ERROR")
        );
    }

    #[test]
    fn internal_errors_have_no_code() {
        assert_eq!(SmsBridgeError::PlatformUnavailable.channel_code(), None);
        assert_eq!(SmsBridgeError::Bridge("jni".into()).channel_code(), None);
        assert_eq!(SmsBridgeError::Codec("bad".into()).channel_code(), None);
    }

    #[test]
    fn send_error_message_carries_detail() {
        let err = SmsBridgeError::SendError("Generic failure".into());
        assert_eq!(err.to_string(), "Failed to send SMS: Generic failure");
    }
}
