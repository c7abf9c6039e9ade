//! Channel and notification configuration.

use serde::{Deserialize, Serialize};

use crate::NotificationResult;

/// Importance assigned to the notification channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Importance {
    /// No sound or visual interruption.
    Min,
    /// No sound.
    Low,
    /// Makes a sound.
    #[default]
    Default,
    /// Makes a sound and appears as a heads-up notification.
    High,
}

/// The channel notifications are posted to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelConfig {
    /// Stable channel identifier.
    pub id: String,
    /// User visible channel name.
    pub name: String,
    /// User visible channel description.
    pub description: String,
    /// Channel importance.
    pub importance: Importance,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            id: "channel_id".to_owned(),
            name: "Test Channel".to_owned(),
            description: "channel description".to_owned(),
            importance: Importance::Default,
        }
    }
}

/// Content of the notification posted on request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationContent {
    /// Platform notification identifier; reposting replaces the previous one.
    pub id: i32,
    /// Title line.
    pub title: String,
    /// Body text.
    pub body: String,
}

impl Default for NotificationContent {
    fn default() -> Self {
        Self {
            id: 1001,
            title: "Test Notification".to_owned(),
            body: "This is notification message".to_owned(),
        }
    }
}

/// Configuration for a [`NotificationManager`](crate::NotificationManager).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// Channel registered on start and resume.
    pub channel: ChannelConfig,
    /// Notification posted by [`NotificationManager::post`](crate::NotificationManager::post).
    pub notification: NotificationContent,
}

impl NotificationConfig {
    /// Parses a JSON configuration. Missing fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationError::Config`](crate::NotificationError::Config) if the
    /// input is not valid JSON or has fields of the wrong type.
    pub fn from_json(input: &str) -> NotificationResult<Self> {
        Ok(serde_json::from_str(input)?)
    }

    /// Builds the notification handed to the platform poster.
    #[must_use]
    pub fn notification(&self) -> Notification {
        Notification {
            id: self.notification.id,
            channel_id: self.channel.id.clone(),
            title: self.notification.title.clone(),
            body: self.notification.body.clone(),
        }
    }
}

/// A local notification ready to be posted immediately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Platform notification identifier.
    pub id: i32,
    /// Channel the notification is posted to.
    pub channel_id: String,
    /// Title line.
    pub title: String,
    /// Body text.
    pub body: String,
}
