use std::sync::Arc;
use std::thread;

use futures::executor::block_on;
use waterkit_notification::{
    ChannelConfig, ChannelState, CorrectiveAction, DeliveryStatus, InMemoryPlatform, Notification,
    NotificationManager, NotificationPoster, NotificationsEnabledQuery, ObservationPoint,
    PermissionCallback, PermissionQuery, PermissionRequester, PlatformError, PlatformInfo,
    PlatformVersion, PlatformVersionProvider,
};

/// Revokes the permission while a post is in flight, then refuses it.
#[derive(Debug)]
struct RevokingPlatform(InMemoryPlatform);

impl PermissionQuery for RevokingPlatform {
    fn permission_granted(&self) -> bool {
        self.0.permission_granted()
    }
}

impl NotificationsEnabledQuery for RevokingPlatform {
    fn notifications_enabled(&self) -> bool {
        self.0.notifications_enabled()
    }

    fn channel_state(&self, channel_id: &str) -> ChannelState {
        self.0.channel_state(channel_id)
    }
}

impl PlatformVersionProvider for RevokingPlatform {
    fn current(&self) -> PlatformInfo {
        self.0.current()
    }
}

impl PermissionRequester for RevokingPlatform {
    fn request(&self, completion: PermissionCallback) {
        self.0.request(completion);
    }
}

impl NotificationPoster for RevokingPlatform {
    fn post(&self, _notification: &Notification) -> Result<(), PlatformError> {
        self.0.set_permission_granted(false);
        Err(PlatformError::new("POST_NOTIFICATIONS revoked"))
    }

    fn register_channel(&self, channel: &ChannelConfig) -> Result<(), PlatformError> {
        self.0.register_channel(channel)
    }
}

fn device(api_level: u32, release: &str) -> Arc<InMemoryPlatform> {
    Arc::new(InMemoryPlatform::new(PlatformInfo::new(
        PlatformVersion::new(api_level),
        release,
    )))
}

#[test]
fn pre_permission_device_with_toggle_off() {
    let platform = device(31, "12");
    platform.set_notifications_enabled(false);
    let manager = NotificationManager::new(platform.clone());

    let resolution = manager.observe(ObservationPoint::Start);
    assert_eq!(resolution.status(), DeliveryStatus::BlockedByToggle);
    let actions: Vec<_> = resolution.actions().iter().collect();
    assert_eq!(actions, [CorrectiveAction::OpenAppNotificationSettings]);

    // The user flips the toggle in settings and comes back.
    platform.set_notifications_enabled(true);
    let resolution = manager.observe(ObservationPoint::Resume);
    assert_eq!(resolution.status(), DeliveryStatus::Deliverable);
}

#[test]
fn granting_permission_through_prompt() {
    let platform = device(33, "13");
    let manager = NotificationManager::new(platform.clone());

    let resolution = manager.observe(ObservationPoint::Start);
    assert_eq!(resolution.status(), DeliveryStatus::BlockedByPermission);
    assert!(
        resolution
            .actions()
            .contains(CorrectiveAction::RequestRuntimePermission)
    );

    let user = {
        let platform = platform.clone();
        thread::spawn(move || {
            while platform.pending_requests() == 0 {
                thread::yield_now();
            }
            platform.answer_permission(true);
        })
    };
    let resolution = block_on(manager.request_permission());
    user.join().unwrap();

    assert_eq!(resolution.status(), DeliveryStatus::Deliverable);
    assert!(resolution.actions().is_empty());

    let receipt = manager.post().unwrap();
    assert!(receipt.advisory().is_none());
    assert_eq!(platform.posted().len(), 1);
}

#[test]
fn revoked_between_resolve_and_post() {
    let platform = device(34, "14");
    platform.set_permission_granted(true);
    let manager = NotificationManager::new(platform.clone());
    assert!(manager.observe(ObservationPoint::Resume).is_deliverable());

    platform.set_permission_granted(false);
    platform.refuse_posts(Some(PlatformError::new("POST_NOTIFICATIONS denied")));

    let err = manager.post().unwrap_err();
    assert_eq!(err.likely_cause(), Some(DeliveryStatus::BlockedByPermission));
    assert_eq!(
        err.advisory().unwrap().message(),
        "Can't post notification without POST_NOTIFICATIONS granted"
    );
}

#[test]
fn observation_order_does_not_matter() {
    let platform = device(33, "13");
    platform.set_notifications_enabled(false);
    let manager = NotificationManager::new(platform);

    let after_result = manager.observe(ObservationPoint::PermissionResult);
    let after_resume = manager.observe(ObservationPoint::Resume);
    assert_eq!(after_result, after_resume);
    assert_eq!(after_resume.status(), DeliveryStatus::BlockedByBoth);
}

#[test]
fn permission_revoked_during_post() {
    let inner = InMemoryPlatform::new(PlatformInfo::new(PlatformVersion::TIRAMISU, "13"));
    inner.set_permission_granted(true);
    let manager = NotificationManager::new(Arc::new(RevokingPlatform(inner)));
    assert!(manager.observe(ObservationPoint::Resume).is_deliverable());

    let err = manager.post().unwrap_err();
    assert_eq!(err.likely_cause(), Some(DeliveryStatus::BlockedByPermission));
    let advisory = err.advisory().unwrap();
    assert_eq!(
        advisory.message(),
        "Can't post notification without POST_NOTIFICATIONS granted"
    );
    assert!(
        advisory
            .actions()
            .contains(CorrectiveAction::RequestRuntimePermission)
    );
    assert_eq!(
        manager.last_resolution().map(|resolution| resolution.status()),
        Some(DeliveryStatus::BlockedByPermission)
    );
}
