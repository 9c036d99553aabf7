//! Notification delivery
//!
//! Notifications are advisory: delivery failures are logged and swallowed.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::AppResult;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Notification {
    pub title: String,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub data: Option<serde_json::Value>,
}

impl Notification {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            data: None,
        }
    }

    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }
}

/// Fire-and-forget notification surface
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn emit(&self, notification: &Notification) -> AppResult<()>;
}

/// Writes notifications to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotificationSink;

#[async_trait]
impl NotificationSink for LogNotificationSink {
    async fn emit(&self, notification: &Notification) -> AppResult<()> {
        tracing::info!(
            target: "plantrack::notifications",
            title = %notification.title,
            data = ?notification.data,
            "{}",
            notification.body
        );
        Ok(())
    }
}

#[derive(Clone)]
pub struct Notifier {
    sink: Arc<dyn NotificationSink>,
    enabled: bool,
}

impl Notifier {
    pub fn new(sink: Arc<dyn NotificationSink>, enabled: bool) -> Self {
        Self { sink, enabled }
    }

    /// Deliver a notification. Never fails.
    pub async fn notify(&self, notification: Notification) {
        if !self.enabled {
            tracing::debug!(title = %notification.title, "Notifications disabled, dropping");
            return;
        }
        if let Err(e) = self.sink.emit(&notification).await {
            tracing::warn!(title = %notification.title, "Notification not delivered: {}", e);
        }
    }
}
