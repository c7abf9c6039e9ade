//! Observation points, permission prompts and posting against a backend.

use std::fmt;
use std::sync::{Arc, Mutex};

use tracing::{debug, warn};

use crate::{
    Advisory, Notification, NotificationBackend, NotificationConfig, NotificationError,
    NotificationResult, PlatformInfo, PlatformVersion, Resolution, RuntimePermissionState,
    SignalSnapshot, resolve_snapshot,
};

/// The moment at which the platform signals are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObservationPoint {
    /// Process start.
    Start,
    /// The presentation returned to the foreground.
    Resume,
    /// A permission prompt completed.
    PermissionResult,
    /// Right before a post attempt.
    PostAttempt,
}

/// Result of a post attempt the platform accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostReceipt {
    notification: Notification,
    resolution: Resolution,
    advisory: Option<Advisory>,
}

impl PostReceipt {
    /// The notification handed to the platform.
    #[must_use]
    pub const fn notification(&self) -> &Notification {
        &self.notification
    }

    /// Resolution taken immediately before the attempt.
    #[must_use]
    pub const fn resolution(&self) -> &Resolution {
        &self.resolution
    }

    /// Set when the platform accepted the post but is expected to hide it.
    #[must_use]
    pub const fn advisory(&self) -> Option<&Advisory> {
        self.advisory.as_ref()
    }
}

/// Drives a [`NotificationBackend`] and resolves its signals at every observation point.
#[derive(Clone)]
pub struct NotificationManager {
    backend: Arc<dyn NotificationBackend>,
    config: NotificationConfig,
    info: PlatformInfo,
    last: Arc<Mutex<Option<Resolution>>>,
}

impl fmt::Debug for NotificationManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationManager")
            .field("config", &self.config)
            .field("info", &self.info)
            .finish_non_exhaustive()
    }
}

impl NotificationManager {
    /// Creates a manager with the default configuration.
    pub fn new(backend: Arc<dyn NotificationBackend>) -> Self {
        Self::with_config(backend, NotificationConfig::default())
    }

    /// Creates a manager with an explicit configuration.
    pub fn with_config(backend: Arc<dyn NotificationBackend>, config: NotificationConfig) -> Self {
        let info = backend.current();
        debug!(version = %info.version, target_sdk = %info.target_sdk, "notification manager created");
        Self {
            backend,
            config,
            info,
            last: Arc::new(Mutex::new(None)),
        }
    }

    /// Platform facts read at construction.
    #[must_use]
    pub const fn info(&self) -> &PlatformInfo {
        &self.info
    }

    /// The platform version resolutions are made against.
    #[must_use]
    pub const fn version(&self) -> PlatformVersion {
        self.info.version
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &NotificationConfig {
        &self.config
    }

    /// The most recent resolution, if any observation happened yet.
    #[must_use]
    pub fn last_resolution(&self) -> Option<Resolution> {
        self.last
            .lock()
            .expect("resolution mutex poisoned")
            .clone()
    }

    /// Whether the platform suggests explaining the permission before prompting.
    #[must_use]
    pub fn should_show_rationale(&self) -> bool {
        self.version().supports_runtime_permission() && self.backend.should_show_rationale()
    }

    /// Reads every raw signal from the platform.
    #[must_use]
    pub fn snapshot(&self) -> SignalSnapshot {
        let version = self.version();
        let permission =
            RuntimePermissionState::observe(self.backend.permission_granted(), version);
        SignalSnapshot::new(permission, self.backend.notifications_enabled())
            .with_channel(self.backend.channel_state(&self.config.channel.id))
    }

    /// Registers the configured channel with the platform.
    ///
    /// Does nothing on versions without channels.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationError::ChannelRegistration`] if the platform rejects it.
    pub fn register_channel(&self) -> NotificationResult<()> {
        if !self.version().supports_channels() {
            return Ok(());
        }
        self.backend
            .register_channel(&self.config.channel)
            .map_err(NotificationError::ChannelRegistration)
    }

    /// Reads fresh signals and resolves them.
    ///
    /// On [`ObservationPoint::Start`] and [`ObservationPoint::Resume`] the
    /// configured channel is (re)registered first; a rejection is logged only.
    pub fn observe(&self, point: ObservationPoint) -> Resolution {
        if matches!(point, ObservationPoint::Start | ObservationPoint::Resume)
            && let Err(err) = self.register_channel()
        {
            warn!("notification channel not registered: {err}");
        }

        let resolution = resolve_snapshot(&self.snapshot(), self.version());
        debug!(?point, status = ?resolution.status(), "observed notification state");
        *self.last.lock().expect("resolution mutex poisoned") = Some(resolution.clone());
        resolution
    }

    /// Prompts for the runtime permission and resolves once the prompt completes.
    ///
    /// The reported grant is not trusted; signals are re-read afterwards. On
    /// versions without a runtime permission no prompt is shown.
    pub async fn request_permission(&self) -> Resolution {
        if !self.version().supports_runtime_permission() {
            debug!("runtime notification permission not supported, skipping prompt");
            return self.observe(ObservationPoint::PermissionResult);
        }

        let (sender, receiver) = async_channel::bounded(1);
        self.backend.request(Box::new(move |granted| {
            if let Err(err) = sender.try_send(granted) {
                warn!("dropping permission result: {err}");
            }
        }));

        match receiver.recv().await {
            Ok(granted) => debug!(granted, "permission prompt completed"),
            Err(_) => warn!("permission prompt abandoned without an answer"),
        }

        self.observe(ObservationPoint::PermissionResult)
    }

    /// Posts the configured notification.
    ///
    /// The attempt is always made, whatever the resolved status: the platform
    /// decides whether the notification is shown.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationError::PostAttemptFailed`] if the platform refuses
    /// the post. It carries the signals re-read after the refusal when they are
    /// blocked, and the resolution taken before the attempt otherwise.
    pub fn post(&self) -> NotificationResult<PostReceipt> {
        let resolution = self.observe(ObservationPoint::PostAttempt);
        let notification = self.config.notification();

        match self.backend.post(&notification) {
            Ok(()) => {
                let advisory = Advisory::for_resolution(&resolution);
                if let Some(advisory) = &advisory {
                    debug!(id = notification.id, "posted, but {}", advisory.message());
                }
                Ok(PostReceipt {
                    notification,
                    resolution,
                    advisory,
                })
            }
            Err(source) => {
                // Signals may have changed between the resolution and the post.
                let fresh = self.observe(ObservationPoint::PostAttempt);
                let resolution = if fresh.is_deliverable() {
                    resolution
                } else {
                    fresh
                };
                warn!(id = notification.id, status = ?resolution.status(), "post refused: {source}");
                Err(NotificationError::PostAttemptFailed { resolution, source })
            }
        }
    }
}
