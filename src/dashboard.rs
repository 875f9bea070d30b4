//! Dashboard summary returned by `GET /dashboard/summary`.

use serde::{Deserialize, Serialize};

/// Headline task counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub total_tasks: u64,
    pub claimed_tasks: u64,
    pub completed_tasks: u64,
    pub pending_tasks: u64,
    pub overdue_tasks: u64,
}

/// Per-site progress row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteStats {
    pub site: String,
    pub task_count: u64,
    pub completed_count: u64,
}

/// Per-inspector progress row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InspectorStats {
    pub inspector: String,
    pub task_count: u64,
    pub completed_count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardData {
    pub summary: Summary,
    #[serde(default)]
    pub by_site: Vec<SiteStats>,
    #[serde(default)]
    pub by_inspector: Vec<InspectorStats>,
}

impl DashboardData {
    /// Completed share of all tasks, as a rounded percentage.
    pub fn completion_rate(&self) -> u64 {
        percent(self.summary.completed_tasks, self.summary.total_tasks)
    }
}

impl SiteStats {
    pub fn progress_percent(&self) -> u64 {
        percent(self.completed_count, self.task_count)
    }
}

impl InspectorStats {
    pub fn progress_percent(&self) -> u64 {
        percent(self.completed_count, self.task_count)
    }
}

/// Rounded `part / whole` percentage; zero when `whole` is zero.
fn percent(part: u64, whole: u64) -> u64 {
    if whole == 0 {
        return 0;
    }
    ((part as f64 / whole as f64) * 100.0).round() as u64
}
