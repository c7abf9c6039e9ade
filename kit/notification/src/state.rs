//! Raw platform signals and the values derived from them.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::PlatformVersion;

/// State of the runtime notification permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuntimePermissionState {
    /// The user granted the permission.
    Granted,
    /// The permission has not been granted.
    Denied,
    /// The platform has no runtime notification permission.
    NotApplicable,
}

impl RuntimePermissionState {
    /// Interprets a raw grant observation for the given platform version.
    ///
    /// Versions without a runtime permission always yield [`Self::NotApplicable`].
    #[must_use]
    pub const fn observe(granted: bool, version: PlatformVersion) -> Self {
        if !version.supports_runtime_permission() {
            Self::NotApplicable
        } else if granted {
            Self::Granted
        } else {
            Self::Denied
        }
    }
}

/// State of the application's notification channel toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChannelState {
    /// The channel allows delivery.
    Enabled,
    /// The user turned the channel off.
    Disabled,
    /// The channel toggle is not distinguished from the app toggle.
    #[default]
    Unknown,
}

/// One fresh observation of every raw signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalSnapshot {
    /// Runtime permission state.
    pub permission: RuntimePermissionState,
    /// Whether the app-level notification toggle allows delivery.
    pub notifications_enabled: bool,
    /// Channel-level toggle, if the host reports it.
    #[serde(default)]
    pub channel: ChannelState,
}

impl SignalSnapshot {
    /// Creates a snapshot that does not distinguish the channel toggle.
    #[must_use]
    pub const fn new(permission: RuntimePermissionState, notifications_enabled: bool) -> Self {
        Self {
            permission,
            notifications_enabled,
            channel: ChannelState::Unknown,
        }
    }

    /// Attaches a channel-level observation.
    #[must_use]
    pub const fn with_channel(mut self, channel: ChannelState) -> Self {
        self.channel = channel;
        self
    }
}

/// Advisory judgment of whether a posted notification will be visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeliveryStatus {
    /// Nothing blocks delivery.
    Deliverable,
    /// The runtime permission is missing.
    BlockedByPermission,
    /// The notification toggle is off.
    BlockedByToggle,
    /// Both the permission and the toggle block delivery.
    BlockedByBoth,
}

impl DeliveryStatus {
    /// Combines the two blocking factors into a status.
    #[must_use]
    pub const fn from_factors(permission_ok: bool, toggle_ok: bool) -> Self {
        match (permission_ok, toggle_ok) {
            (true, true) => Self::Deliverable,
            (false, true) => Self::BlockedByPermission,
            (true, false) => Self::BlockedByToggle,
            (false, false) => Self::BlockedByBoth,
        }
    }

    /// Returns `true` if delivery is expected to succeed.
    #[must_use]
    pub const fn is_deliverable(self) -> bool {
        matches!(self, Self::Deliverable)
    }

    /// Returns `true` if the runtime permission is one of the blocking factors.
    #[must_use]
    pub const fn blocked_by_permission(self) -> bool {
        matches!(self, Self::BlockedByPermission | Self::BlockedByBoth)
    }

    /// Returns `true` if a toggle is one of the blocking factors.
    #[must_use]
    pub const fn blocked_by_toggle(self) -> bool {
        matches!(self, Self::BlockedByToggle | Self::BlockedByBoth)
    }
}

/// A user-facing remedy for a blocked status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CorrectiveAction {
    /// Prompt for the runtime notification permission.
    RequestRuntimePermission,
    /// Open the app's notification settings screen.
    OpenAppNotificationSettings,
    /// Open the settings screen of the app's notification channel.
    OpenChannelSettings,
}

impl CorrectiveAction {
    /// Caption for the button offering this action.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::RequestRuntimePermission => "Request Permission",
            Self::OpenAppNotificationSettings => "Open Notification Settings",
            Self::OpenChannelSettings => "Open Channel Settings",
        }
    }
}

/// The set of corrective actions applicable to a resolution.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CorrectiveActions(BTreeSet<CorrectiveAction>);

impl CorrectiveActions {
    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Adds an action to the set.
    pub fn insert(&mut self, action: CorrectiveAction) {
        self.0.insert(action);
    }

    /// Returns `true` if the action applies.
    #[must_use]
    pub fn contains(&self, action: CorrectiveAction) -> bool {
        self.0.contains(&action)
    }

    /// Returns `true` if no action applies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of applicable actions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates the actions in a stable order.
    pub fn iter(&self) -> impl Iterator<Item = CorrectiveAction> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<CorrectiveAction> for CorrectiveActions {
    fn from_iter<I: IntoIterator<Item = CorrectiveAction>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a CorrectiveActions {
    type Item = CorrectiveAction;
    type IntoIter = core::iter::Copied<std::collections::btree_set::Iter<'a, CorrectiveAction>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter().copied()
    }
}
