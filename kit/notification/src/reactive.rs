use std::sync::Arc;

use executor_core::{DefaultExecutor, LocalExecutor, Task};
use nami::Signal;
use nami::binding::{Container, CustomBinding};

use crate::{
    Advisory, DeliveryStatus, NotificationBackend, NotificationConfig, NotificationError,
    NotificationManager, NotificationResult, ObservationPoint, PostReceipt, Resolution,
};

const MAX_RESOLUTION_HISTORY: usize = 64;
const MAX_ERROR_HISTORY: usize = 32;

/// Observable notification state for presentation layers.
#[derive(Debug, Clone, Default)]
pub struct NotificationSignals {
    history: Container<Vec<Resolution>>,
    latest_resolution: Container<Option<Resolution>>,
    latest_status: Container<Option<DeliveryStatus>>,
    last_advisory: Container<Option<Advisory>>,
    last_error: Container<Option<String>>,
    error_history: Container<Vec<String>>,
}

impl NotificationSignals {
    #[must_use]
    pub fn history(&self) -> impl Signal<Output = Vec<Resolution>> {
        self.history.clone()
    }

    #[must_use]
    pub fn latest_resolution(&self) -> impl Signal<Output = Option<Resolution>> {
        self.latest_resolution.clone()
    }

    #[must_use]
    pub fn latest_status(&self) -> impl Signal<Output = Option<DeliveryStatus>> {
        self.latest_status.clone()
    }

    /// Advisory from the most recent post attempt, cleared by a deliverable one.
    #[must_use]
    pub fn last_advisory(&self) -> impl Signal<Output = Option<Advisory>> {
        self.last_advisory.clone()
    }

    #[must_use]
    pub fn last_error(&self) -> impl Signal<Output = Option<String>> {
        self.last_error.clone()
    }

    #[must_use]
    pub fn error_history(&self) -> impl Signal<Output = Vec<String>> {
        self.error_history.clone()
    }

    pub fn clear(&self) {
        self.history.set(Vec::new());
        self.error_history.set(Vec::new());
        self.latest_resolution.set(None);
        self.latest_status.set(None);
        self.last_advisory.set(None);
        self.last_error.set(None);
    }

    fn record_resolution(&self, resolution: &Resolution) {
        self.latest_status.set(Some(resolution.status()));
        self.latest_resolution.set(Some(resolution.clone()));

        let mut history = self.history.get();
        history.push(resolution.clone());
        if history.len() > MAX_RESOLUTION_HISTORY {
            let overflow = history.len() - MAX_RESOLUTION_HISTORY;
            history.drain(0..overflow);
        }
        self.history.set(history);
    }

    fn record_post(&self, result: &NotificationResult<PostReceipt>) {
        match result {
            Ok(receipt) => {
                self.record_resolution(receipt.resolution());
                self.last_advisory.set(receipt.advisory().cloned());
            }
            Err(error) => {
                if let NotificationError::PostAttemptFailed { resolution, .. } = error {
                    self.record_resolution(resolution);
                }
                self.last_advisory.set(error.advisory());
                self.record_error(error);
            }
        }
    }

    fn record_error(&self, error: &NotificationError) {
        let message = error.to_string();
        let mut errors = self.error_history.get();
        errors.push(message.clone());
        if errors.len() > MAX_ERROR_HISTORY {
            let overflow = errors.len() - MAX_ERROR_HISTORY;
            errors.drain(0..overflow);
        }
        self.error_history.set(errors);
        self.last_error.set(Some(message));
    }
}

/// A [`NotificationManager`] that mirrors every result into [`NotificationSignals`].
#[derive(Debug, Clone)]
pub struct ReactiveNotificationManager {
    manager: NotificationManager,
    signals: NotificationSignals,
}

impl ReactiveNotificationManager {
    pub fn new(backend: Arc<dyn NotificationBackend>) -> Self {
        Self::with_config(backend, NotificationConfig::default())
    }

    pub fn with_config(backend: Arc<dyn NotificationBackend>, config: NotificationConfig) -> Self {
        Self {
            manager: NotificationManager::with_config(backend, config),
            signals: NotificationSignals::default(),
        }
    }

    #[must_use]
    pub const fn manager(&self) -> &NotificationManager {
        &self.manager
    }

    #[must_use]
    pub fn signals(&self) -> NotificationSignals {
        self.signals.clone()
    }

    pub fn clear_signals(&self) {
        self.signals.clear();
    }

    #[must_use]
    pub fn should_show_rationale(&self) -> bool {
        self.manager.should_show_rationale()
    }

    pub fn observe(&self, point: ObservationPoint) -> Resolution {
        let resolution = self.manager.observe(point);
        self.signals.record_resolution(&resolution);
        resolution
    }

    /// Posts the configured notification and records the outcome.
    ///
    /// # Errors
    ///
    /// See [`NotificationManager::post`].
    pub fn post(&self) -> NotificationResult<PostReceipt> {
        let result = self.manager.post();
        self.signals.record_post(&result);
        result
    }

    pub async fn request_permission(&self) -> Resolution {
        let resolution = self.manager.request_permission().await;
        self.signals.record_resolution(&resolution);
        resolution
    }

    /// Starts a permission prompt on the local executor.
    ///
    /// The follow-up resolution lands in [`NotificationSignals`].
    pub fn launch_permission_request(&self) {
        let this = self.clone();
        DefaultExecutor
            .spawn_local(async move {
                this.request_permission().await;
            })
            .detach();
    }
}
