//! User-facing text derived from a resolution.

use serde::Serialize;

use crate::{CorrectiveActions, DeliveryStatus, PlatformVersion, Resolution, RuntimePermissionState};

/// A message explaining why a notification is probably not visible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Advisory {
    status: DeliveryStatus,
    message: &'static str,
    actions: CorrectiveActions,
}

impl Advisory {
    /// Builds the advisory for a resolution, or `None` if it is deliverable.
    #[must_use]
    pub fn for_resolution(resolution: &Resolution) -> Option<Self> {
        let message = match resolution.status() {
            DeliveryStatus::Deliverable => return None,
            DeliveryStatus::BlockedByBoth => {
                "Can't post notification without POST_NOTIFICATIONS granted AND Notifications Enabled"
            }
            DeliveryStatus::BlockedByPermission => {
                "Can't post notification without POST_NOTIFICATIONS granted"
            }
            DeliveryStatus::BlockedByToggle => {
                "Can't post notification without Notifications Enabled"
            }
        };
        Some(Self {
            status: resolution.status(),
            message,
            actions: resolution.actions().clone(),
        })
    }

    /// Builds the advisory for a post the platform refused although no
    /// signal reads as blocked.
    #[must_use]
    pub fn refused(resolution: &Resolution) -> Self {
        Self::for_resolution(resolution).unwrap_or_else(|| Self {
            status: resolution.status(),
            message: "The platform refused the notification",
            actions: CorrectiveActions::new(),
        })
    }

    /// The status the advisory explains.
    #[must_use]
    pub const fn status(&self) -> DeliveryStatus {
        self.status
    }

    /// The message to show.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        self.message
    }

    /// Remedies to offer next to the message.
    #[must_use]
    pub const fn actions(&self) -> &CorrectiveActions {
        &self.actions
    }
}

/// Status line for the runtime permission.
#[must_use]
pub const fn permission_state_line(permission: RuntimePermissionState) -> &'static str {
    match permission {
        RuntimePermissionState::Granted => {
            "POST_NOTIFICATIONS Granted (for Android-13 devices only)? - TRUE"
        }
        RuntimePermissionState::Denied | RuntimePermissionState::NotApplicable => {
            "POST_NOTIFICATIONS Granted (for Android-13 devices only)? - FALSE"
        }
    }
}

/// Whether the permission line should be shown as active.
#[must_use]
pub const fn permission_line_applicable(version: PlatformVersion) -> bool {
    version.supports_runtime_permission()
}

/// Status line for the app-level notification toggle.
#[must_use]
pub const fn notifications_state_line(enabled: bool) -> &'static str {
    if enabled {
        "Notifications Enabled for the app? - TRUE"
    } else {
        "Notifications Enabled for the app? - FALSE"
    }
}
