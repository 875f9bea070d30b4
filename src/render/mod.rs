//! Renderer boundary.
//!
//! The view-model pushes immutable snapshots and notifications through
//! [`Renderer`]; renderers never reach back into view-model state.

mod console;

pub use console::ConsoleRenderer;

use serde::Serialize;

use crate::dashboard::DashboardData;
use crate::lookups::LookupData;
use crate::view_model::TaskListSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Info,
    Success,
    Error,
}

/// Transient status message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Info,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }
}

pub trait Renderer: Send + Sync {
    /// Task table plus pagination info.
    fn render_tasks(&self, snapshot: &TaskListSnapshot);

    /// Metric cards and breakdowns.
    fn render_dashboard(&self, dashboard: &DashboardData);

    /// Filter dropdown contents.
    fn render_lookups(&self, lookups: &LookupData);

    fn notify(&self, notification: &Notification);
}
