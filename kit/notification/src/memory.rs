//! An in-process platform whose signals are set by hand.
//!
//! Useful for tests and for hosts without a native notification system.

use std::fmt;
use std::sync::{Mutex, MutexGuard};

use tracing::debug;

use crate::{
    ChannelConfig, ChannelState, Notification, NotificationPoster, NotificationsEnabledQuery,
    PermissionCallback, PermissionQuery, PermissionRequester, PlatformError, PlatformInfo,
    PlatformVersionProvider,
};

#[derive(Default)]
struct State {
    granted: bool,
    notifications_enabled: bool,
    channels: Vec<(String, ChannelState)>,
    show_rationale: bool,
    pending: Vec<PermissionCallback>,
    posted: Vec<Notification>,
    registered: Vec<ChannelConfig>,
    refusal: Option<PlatformError>,
}

/// A scriptable platform backend.
pub struct InMemoryPlatform {
    info: PlatformInfo,
    state: Mutex<State>,
}

impl fmt::Debug for InMemoryPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryPlatform")
            .field("info", &self.info)
            .finish_non_exhaustive()
    }
}

impl InMemoryPlatform {
    /// Creates a platform with notifications enabled and the permission not granted.
    #[must_use]
    pub fn new(info: PlatformInfo) -> Self {
        Self {
            info,
            state: Mutex::new(State {
                notifications_enabled: true,
                ..State::default()
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().expect("platform state mutex poisoned")
    }

    /// Sets the runtime permission grant.
    pub fn set_permission_granted(&self, granted: bool) {
        self.state().granted = granted;
    }

    /// Sets the app-level notification toggle.
    pub fn set_notifications_enabled(&self, enabled: bool) {
        self.state().notifications_enabled = enabled;
    }

    /// Sets the toggle of a single channel.
    pub fn set_channel_state(&self, channel_id: &str, channel: ChannelState) {
        let mut state = self.state();
        if let Some(entry) = state.channels.iter_mut().find(|(id, _)| id == channel_id) {
            entry.1 = channel;
        } else {
            state.channels.push((channel_id.to_owned(), channel));
        }
    }

    /// Sets the rationale signal reported to the presentation layer.
    pub fn set_show_rationale(&self, show: bool) {
        self.state().show_rationale = show;
    }

    /// Makes every following post fail with `error`, or succeed again with `None`.
    pub fn refuse_posts(&self, error: Option<PlatformError>) {
        self.state().refusal = error;
    }

    /// Number of permission prompts waiting for an answer.
    #[must_use]
    pub fn pending_requests(&self) -> usize {
        self.state().pending.len()
    }

    /// Answers every pending prompt as the user would.
    ///
    /// The grant is stored before the completions run, so a completion that
    /// re-reads the platform sees the new state.
    pub fn answer_permission(&self, granted: bool) {
        let pending = {
            let mut state = self.state();
            state.granted = granted;
            core::mem::take(&mut state.pending)
        };
        debug!(granted, prompts = pending.len(), "answering permission prompts");
        for completion in pending {
            completion(granted);
        }
    }

    /// Drops every pending prompt without answering it.
    pub fn dismiss_permission(&self) {
        let pending = core::mem::take(&mut self.state().pending);
        drop(pending);
    }

    /// Notifications accepted so far.
    #[must_use]
    pub fn posted(&self) -> Vec<Notification> {
        self.state().posted.clone()
    }

    /// Channels registered so far.
    #[must_use]
    pub fn registered_channels(&self) -> Vec<ChannelConfig> {
        self.state().registered.clone()
    }
}

impl PermissionQuery for InMemoryPlatform {
    fn permission_granted(&self) -> bool {
        self.state().granted
    }
}

impl NotificationsEnabledQuery for InMemoryPlatform {
    fn notifications_enabled(&self) -> bool {
        self.state().notifications_enabled
    }

    fn channel_state(&self, channel_id: &str) -> ChannelState {
        self.state()
            .channels
            .iter()
            .find(|(id, _)| id == channel_id)
            .map_or(ChannelState::Unknown, |(_, channel)| *channel)
    }
}

impl PlatformVersionProvider for InMemoryPlatform {
    fn current(&self) -> PlatformInfo {
        self.info.clone()
    }
}

impl PermissionRequester for InMemoryPlatform {
    fn request(&self, completion: PermissionCallback) {
        let mut state = self.state();
        if state.granted {
            drop(state);
            completion(true);
        } else {
            state.pending.push(completion);
        }
    }

    fn should_show_rationale(&self) -> bool {
        self.state().show_rationale
    }
}

impl NotificationPoster for InMemoryPlatform {
    fn post(&self, notification: &Notification) -> Result<(), PlatformError> {
        let mut state = self.state();
        if let Some(error) = state.refusal.clone() {
            return Err(error);
        }
        state.posted.retain(|posted| posted.id != notification.id);
        state.posted.push(notification.clone());
        drop(state);
        Ok(())
    }

    fn register_channel(&self, channel: &ChannelConfig) -> Result<(), PlatformError> {
        let mut state = self.state();
        state.registered.retain(|registered| registered.id != channel.id);
        state.registered.push(channel.clone());
        drop(state);
        Ok(())
    }
}
