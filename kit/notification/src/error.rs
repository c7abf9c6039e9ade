//! Error types for notification delivery.

use crate::{Advisory, DeliveryStatus, Resolution};

/// A refusal reported by the host platform.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("platform error: {message}")]
pub struct PlatformError {
    message: String,
}

impl PlatformError {
    /// Creates a platform error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The message reported by the platform.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Errors surfaced by the notification manager.
#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    /// The platform refused a post attempt.
    ///
    /// Recoverable: the user is expected to take a corrective action.
    #[error("failed to post notification (resolved status: {:?})", .resolution.status())]
    PostAttemptFailed {
        /// The resolution that best explains the refusal.
        resolution: Resolution,
        /// The refusal reported by the platform.
        #[source]
        source: PlatformError,
    },
    /// The notification channel could not be registered.
    #[error("failed to register notification channel")]
    ChannelRegistration(#[source] PlatformError),
    /// The configuration could not be parsed.
    #[error("invalid notification configuration")]
    Config(#[from] serde_json::Error),
}

impl NotificationError {
    /// The blocking factor most likely responsible for a failed post.
    ///
    /// `None` for other errors and when no signal reads as blocked.
    #[must_use]
    pub fn likely_cause(&self) -> Option<DeliveryStatus> {
        match self {
            Self::PostAttemptFailed { resolution, .. } if !resolution.is_deliverable() => {
                Some(resolution.status())
            }
            _ => None,
        }
    }

    /// User-facing advisory for a failed post. Always set for post failures.
    #[must_use]
    pub fn advisory(&self) -> Option<Advisory> {
        match self {
            Self::PostAttemptFailed { resolution, .. } => Some(Advisory::refused(resolution)),
            _ => None,
        }
    }
}

/// Result alias for notification operations.
pub type NotificationResult<T> = Result<T, NotificationError>;
