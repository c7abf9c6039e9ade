//! Interfaces to the host platform.
//!
//! Host glue (JNI, Swift bridges, desktop shims) implements these traits; the
//! core only ever reads signals through them and hands them notifications.

use crate::{ChannelConfig, ChannelState, Notification, PlatformError, PlatformInfo};

/// Completion handler for a permission prompt, called with the reported grant.
pub type PermissionCallback = Box<dyn FnOnce(bool) + Send + 'static>;

/// Reads the runtime notification permission grant.
pub trait PermissionQuery: Send + Sync {
    /// Returns `true` if the platform reports the permission as granted.
    ///
    /// On versions without a runtime permission the answer is irrelevant.
    fn permission_granted(&self) -> bool;
}

/// Reads the notification toggles.
pub trait NotificationsEnabledQuery: Send + Sync {
    /// Returns `true` if the app-level toggle allows notifications.
    fn notifications_enabled(&self) -> bool;

    /// Returns the toggle state of a single notification channel.
    fn channel_state(&self, _channel_id: &str) -> ChannelState {
        ChannelState::Unknown
    }
}

/// Provides static facts about the running platform.
pub trait PlatformVersionProvider: Send + Sync {
    /// Returns the platform info. Must not change during the process lifetime.
    fn current(&self) -> PlatformInfo;
}

/// Prompts the user for the runtime notification permission.
pub trait PermissionRequester: Send + Sync {
    /// Starts a permission prompt.
    ///
    /// `completion` is called once the user answers, at an unspecified later
    /// point. Dropping it without calling it abandons the request.
    fn request(&self, completion: PermissionCallback);

    /// Returns `true` if the platform suggests explaining the permission first.
    ///
    /// Platforms that stop prompting after repeated denials report this
    /// signal; it only affects which affordance to show.
    fn should_show_rationale(&self) -> bool {
        false
    }
}

/// Posts local notifications.
pub trait NotificationPoster: Send + Sync {
    /// Posts a notification immediately.
    ///
    /// # Errors
    ///
    /// Returns a [`PlatformError`] if the platform refuses the notification.
    fn post(&self, notification: &Notification) -> Result<(), PlatformError>;

    /// Registers (or updates) a notification channel.
    ///
    /// # Errors
    ///
    /// Returns a [`PlatformError`] if the platform rejects the channel.
    fn register_channel(&self, _channel: &ChannelConfig) -> Result<(), PlatformError> {
        Ok(())
    }
}

/// Everything the notification manager needs from the platform.
pub trait NotificationBackend:
    PermissionQuery
    + NotificationsEnabledQuery
    + PlatformVersionProvider
    + PermissionRequester
    + NotificationPoster
{
}

impl<T> NotificationBackend for T where
    T: PermissionQuery
        + NotificationsEnabledQuery
        + PlatformVersionProvider
        + PermissionRequester
        + NotificationPoster
{
}
