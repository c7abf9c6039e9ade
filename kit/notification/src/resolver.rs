//! Reconciliation of raw platform signals into a delivery status.
//!
//! Both entry points are pure: the same inputs always produce the same
//! [`Resolution`], and nothing is remembered between calls.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{
    ChannelState, CorrectiveAction, CorrectiveActions, DeliveryStatus, PlatformVersion,
    RuntimePermissionState, SignalSnapshot,
};

/// The outcome of resolving one signal snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    status: DeliveryStatus,
    actions: CorrectiveActions,
    version: PlatformVersion,
}

impl Resolution {
    /// The derived delivery status.
    #[must_use]
    pub const fn status(&self) -> DeliveryStatus {
        self.status
    }

    /// Corrective actions applicable right now.
    #[must_use]
    pub const fn actions(&self) -> &CorrectiveActions {
        &self.actions
    }

    /// The platform version the snapshot was resolved against.
    #[must_use]
    pub const fn version(&self) -> PlatformVersion {
        self.version
    }

    /// Shorthand for `self.status().is_deliverable()`.
    #[must_use]
    pub const fn is_deliverable(&self) -> bool {
        self.status.is_deliverable()
    }
}

/// Resolves the app-level signals into a status and the applicable actions.
///
/// Channel-level state is not considered, so
/// [`CorrectiveAction::OpenChannelSettings`] is never produced.
#[must_use]
pub fn resolve(
    permission: RuntimePermissionState,
    notifications_enabled: bool,
    version: PlatformVersion,
) -> Resolution {
    resolve_snapshot(
        &SignalSnapshot::new(permission, notifications_enabled),
        version,
    )
}

/// Resolves a full snapshot, including the channel toggle when it is known.
///
/// A disabled channel blocks delivery like the app toggle does, but is only
/// remedied through channel settings while the app toggle itself is on.
#[must_use]
pub fn resolve_snapshot(snapshot: &SignalSnapshot, version: PlatformVersion) -> Resolution {
    let supports_permission = version.supports_runtime_permission();

    // Older platforms grant the capability implicitly.
    let permission = if supports_permission {
        snapshot.permission
    } else {
        RuntimePermissionState::Granted
    };
    let permission_ok = permission == RuntimePermissionState::Granted;

    let channel = if version.supports_channels() {
        snapshot.channel
    } else {
        ChannelState::Unknown
    };
    let channel_blocked = snapshot.notifications_enabled && channel == ChannelState::Disabled;
    let toggle_ok = snapshot.notifications_enabled && !channel_blocked;

    let status = DeliveryStatus::from_factors(permission_ok, toggle_ok);

    let mut actions = CorrectiveActions::new();
    if supports_permission && !permission_ok {
        actions.insert(CorrectiveAction::RequestRuntimePermission);
    }
    if !snapshot.notifications_enabled {
        actions.insert(CorrectiveAction::OpenAppNotificationSettings);
    }
    if channel_blocked {
        actions.insert(CorrectiveAction::OpenChannelSettings);
    }

    trace!(
        ?snapshot,
        %version,
        ?status,
        actions = actions.len(),
        "resolved notification delivery state"
    );

    Resolution {
        status,
        actions,
        version,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRE_PERMISSION: [u32; 4] = [21, 26, 31, 32];
    const WITH_PERMISSION: [u32; 3] = [33, 34, 35];

    fn all_versions() -> impl Iterator<Item = PlatformVersion> {
        PRE_PERMISSION
            .into_iter()
            .chain(WITH_PERMISSION)
            .map(PlatformVersion::new)
    }

    #[test]
    fn denied_is_ignored_without_runtime_permission() {
        for level in PRE_PERMISSION {
            let resolution = resolve(
                RuntimePermissionState::Denied,
                true,
                PlatformVersion::new(level),
            );
            assert_eq!(resolution.status(), DeliveryStatus::Deliverable);
            assert!(resolution.actions().is_empty());
        }
    }

    #[test]
    fn denied_blocks_with_runtime_permission() {
        for level in WITH_PERMISSION {
            let resolution = resolve(
                RuntimePermissionState::Denied,
                true,
                PlatformVersion::new(level),
            );
            assert_eq!(resolution.status(), DeliveryStatus::BlockedByPermission);
            assert!(
                resolution
                    .actions()
                    .contains(CorrectiveAction::RequestRuntimePermission)
            );
            assert!(
                !resolution
                    .actions()
                    .contains(CorrectiveAction::OpenAppNotificationSettings)
            );
        }
    }

    #[test]
    fn toggle_off_blocks_on_every_version() {
        for version in all_versions() {
            let resolution = resolve(RuntimePermissionState::Granted, false, version);
            assert_eq!(resolution.status(), DeliveryStatus::BlockedByToggle);
            assert!(
                resolution
                    .actions()
                    .contains(CorrectiveAction::OpenAppNotificationSettings)
            );
            assert!(
                !resolution
                    .actions()
                    .contains(CorrectiveAction::RequestRuntimePermission)
            );
        }
    }

    #[test]
    fn both_blocked_offers_both_remedies() {
        for level in WITH_PERMISSION {
            let resolution = resolve(
                RuntimePermissionState::Denied,
                false,
                PlatformVersion::new(level),
            );
            assert_eq!(resolution.status(), DeliveryStatus::BlockedByBoth);
            assert!(
                resolution
                    .actions()
                    .contains(CorrectiveAction::RequestRuntimePermission)
            );
            assert!(
                resolution
                    .actions()
                    .contains(CorrectiveAction::OpenAppNotificationSettings)
            );
            assert_eq!(resolution.actions().len(), 2);
        }
    }

    #[test]
    fn old_version_toggle_off_only_offers_settings() {
        let resolution = resolve(
            RuntimePermissionState::NotApplicable,
            false,
            PlatformVersion::new(30),
        );
        assert_eq!(resolution.status(), DeliveryStatus::BlockedByToggle);
        let actions: Vec<_> = resolution.actions().iter().collect();
        assert_eq!(actions, [CorrectiveAction::OpenAppNotificationSettings]);
    }

    #[test]
    fn not_applicable_counts_as_missing_on_permission_versions() {
        let resolution = resolve(
            RuntimePermissionState::NotApplicable,
            true,
            PlatformVersion::TIRAMISU,
        );
        assert_eq!(resolution.status(), DeliveryStatus::BlockedByPermission);
        let actions: Vec<_> = resolution.actions().iter().collect();
        assert_eq!(actions, [CorrectiveAction::RequestRuntimePermission]);
    }

    #[test]
    fn resolution_is_idempotent() {
        let permissions = [
            RuntimePermissionState::Granted,
            RuntimePermissionState::Denied,
            RuntimePermissionState::NotApplicable,
        ];
        for version in all_versions() {
            for permission in permissions {
                for enabled in [true, false] {
                    assert_eq!(
                        resolve(permission, enabled, version),
                        resolve(permission, enabled, version)
                    );
                }
            }
        }
    }

    #[test]
    fn enabling_toggle_never_leaves_toggle_blocked() {
        let permissions = [
            RuntimePermissionState::Granted,
            RuntimePermissionState::Denied,
            RuntimePermissionState::NotApplicable,
        ];
        for version in all_versions() {
            for permission in permissions {
                let before = resolve(permission, false, version).status();
                let after = resolve(permission, true, version).status();
                assert!(before.blocked_by_toggle());
                assert!(matches!(
                    after,
                    DeliveryStatus::Deliverable | DeliveryStatus::BlockedByPermission
                ));
            }
        }
    }

    #[test]
    fn deliverable_iff_permission_and_toggle() {
        for version in all_versions() {
            for granted in [true, false] {
                for enabled in [true, false] {
                    let permission = RuntimePermissionState::observe(granted, version);
                    let resolution = resolve(permission, enabled, version);
                    let permission_ok = matches!(
                        permission,
                        RuntimePermissionState::Granted | RuntimePermissionState::NotApplicable
                    );
                    assert_eq!(resolution.is_deliverable(), permission_ok && enabled);
                }
            }
        }
    }

    #[test]
    fn unknown_channel_matches_app_level_resolution() {
        let snapshot = SignalSnapshot::new(RuntimePermissionState::Denied, false);
        assert_eq!(
            resolve_snapshot(&snapshot, PlatformVersion::TIRAMISU),
            resolve(RuntimePermissionState::Denied, false, PlatformVersion::TIRAMISU)
        );
    }

    #[test]
    fn disabled_channel_offers_channel_settings() {
        let snapshot = SignalSnapshot::new(RuntimePermissionState::Granted, true)
            .with_channel(ChannelState::Disabled);
        let resolution = resolve_snapshot(&snapshot, PlatformVersion::TIRAMISU);
        assert_eq!(resolution.status(), DeliveryStatus::BlockedByToggle);
        let actions: Vec<_> = resolution.actions().iter().collect();
        assert_eq!(actions, [CorrectiveAction::OpenChannelSettings]);
    }

    #[test]
    fn app_toggle_takes_precedence_over_channel() {
        let snapshot = SignalSnapshot::new(RuntimePermissionState::Granted, false)
            .with_channel(ChannelState::Disabled);
        let resolution = resolve_snapshot(&snapshot, PlatformVersion::TIRAMISU);
        assert_eq!(resolution.status(), DeliveryStatus::BlockedByToggle);
        assert!(
            !resolution
                .actions()
                .contains(CorrectiveAction::OpenChannelSettings)
        );
    }

    #[test]
    fn channel_ignored_before_channels_exist() {
        let snapshot = SignalSnapshot::new(RuntimePermissionState::NotApplicable, true)
            .with_channel(ChannelState::Disabled);
        let resolution = resolve_snapshot(&snapshot, PlatformVersion::new(24));
        assert_eq!(resolution.status(), DeliveryStatus::Deliverable);
        assert!(resolution.actions().is_empty());
    }
}
