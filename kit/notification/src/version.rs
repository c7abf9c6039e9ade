//! Platform version tiers.
//!
//! Notification delivery is gated differently depending on the API level of the
//! device. Only two thresholds matter: the level that introduced notification
//! channels and the level that introduced the runtime notification permission.

use core::fmt;

use serde::{Deserialize, Serialize};

/// An ordinal platform capability tier (the platform API level).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlatformVersion(u32);

impl PlatformVersion {
    /// First API level with notification channels.
    pub const OREO: Self = Self(26);
    /// First API level with the runtime `POST_NOTIFICATIONS` permission.
    pub const TIRAMISU: Self = Self(33);

    /// Creates a version from a raw API level.
    #[must_use]
    pub const fn new(api_level: u32) -> Self {
        Self(api_level)
    }

    /// Returns the raw API level.
    #[must_use]
    pub const fn api_level(self) -> u32 {
        self.0
    }

    /// Returns `true` if the platform gates notifications behind a runtime permission.
    #[must_use]
    pub const fn supports_runtime_permission(self) -> bool {
        self.0 >= Self::TIRAMISU.0
    }

    /// Returns `true` if notifications are posted through per-app channels.
    #[must_use]
    pub const fn supports_channels(self) -> bool {
        self.0 >= Self::OREO.0
    }
}

impl From<u32> for PlatformVersion {
    fn from(api_level: u32) -> Self {
        Self(api_level)
    }
}

impl fmt::Display for PlatformVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "API-{}", self.0)
    }
}

/// Static facts about the device and the application build.
///
/// Constant for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformInfo {
    /// API level of the running device.
    pub version: PlatformVersion,
    /// Human readable release name, e.g. `13` or a codename.
    pub release: String,
    /// API level the application was built against.
    pub target_sdk: PlatformVersion,
}

impl PlatformInfo {
    /// Creates platform info for a device running `version` with the given release name.
    ///
    /// The target SDK defaults to the device version.
    pub fn new(version: PlatformVersion, release: impl Into<String>) -> Self {
        Self {
            version,
            release: release.into(),
            target_sdk: version,
        }
    }

    /// Sets the API level the application targets.
    #[must_use]
    pub fn with_target_sdk(mut self, target_sdk: PlatformVersion) -> Self {
        self.target_sdk = target_sdk;
        self
    }

    /// Describes the device and build for display.
    #[must_use]
    pub fn describe(&self) -> String {
        format!(
            "device API version: {} (Android-{})\nApplication targetSDKVersion: {}",
            self.version, self.release, self.target_sdk
        )
    }
}
