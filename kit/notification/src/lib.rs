//! Cross-platform notification delivery state for WaterKit.
//!
//! Whether a posted notification is actually shown depends on independent
//! platform signals: a runtime permission (on newer platform versions only), the
//! app-level notification toggle and, where the host reports it, the toggle of the
//! app's notification channel. This crate reconciles those signals into a single
//! [`DeliveryStatus`] and the [`CorrectiveAction`]s a user can take.
//!
//! The reconciliation itself lives in [`resolve`] and [`resolve_snapshot`], which
//! are pure. [`NotificationManager`] reads the signals through a
//! [`NotificationBackend`] at each [`ObservationPoint`], drives permission prompts,
//! and posts notifications. Posting is never suppressed by the resolved status;
//! the resolution is advisory and only used to explain a failure to the user.
//!
//! ```
//! use waterkit_notification::{
//!     CorrectiveAction, DeliveryStatus, PlatformVersion, RuntimePermissionState, resolve,
//! };
//!
//! let resolution = resolve(
//!     RuntimePermissionState::Denied,
//!     true,
//!     PlatformVersion::TIRAMISU,
//! );
//! assert_eq!(resolution.status(), DeliveryStatus::BlockedByPermission);
//! assert!(resolution.actions().contains(CorrectiveAction::RequestRuntimePermission));
//! ```

mod advisory;
mod backend;
mod config;
mod error;
mod manager;
pub mod memory;
pub mod reactive;
mod resolver;
mod state;
mod version;

pub use advisory::{
    Advisory, notifications_state_line, permission_line_applicable, permission_state_line,
};
pub use backend::{
    NotificationBackend, NotificationPoster, NotificationsEnabledQuery, PermissionCallback,
    PermissionQuery, PermissionRequester, PlatformVersionProvider,
};
pub use config::{ChannelConfig, Importance, Notification, NotificationConfig, NotificationContent};
pub use error::{NotificationError, NotificationResult, PlatformError};
pub use manager::{NotificationManager, ObservationPoint, PostReceipt};
pub use memory::InMemoryPlatform;
pub use reactive::{NotificationSignals, ReactiveNotificationManager};
pub use resolver::{Resolution, resolve, resolve_snapshot};
pub use state::{
    ChannelState, CorrectiveAction, CorrectiveActions, DeliveryStatus, RuntimePermissionState,
    SignalSnapshot,
};
pub use version::{PlatformInfo, PlatformVersion};
