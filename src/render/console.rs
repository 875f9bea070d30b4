//! Plain-text renderer used by the command-line front end.

use std::io::Write;
use std::sync::Mutex;

use super::{Notification, NotificationLevel, Renderer};
use crate::dashboard::DashboardData;
use crate::lookups::LookupData;
use crate::view_model::TaskListSnapshot;

/// Writes tables and notifications to any writer (stdout by default).
pub struct ConsoleRenderer {
    out: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleRenderer {
    pub fn new() -> Self {
        Self::with_writer(Box::new(std::io::stdout()))
    }

    pub fn with_writer(out: Box<dyn Write + Send>) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    fn write(&self, text: &str) {
        let mut out = match self.out.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let result = match out.write_all(text.as_bytes()) {
            Ok(()) => out.flush(),
            Err(e) => Err(e),
        };
        if let Err(e) = result {
            tracing::warn!("Failed to write console output: {}", e);
        }
    }
}

impl Default for ConsoleRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Format the task table for a snapshot.
pub fn format_tasks(snapshot: &TaskListSnapshot) -> String {
    let mut text = format!(
        "{:<8} {:<6} {:<28} {:<8} {:>4} {:<16} {:<14} {:<10}\n",
        "ITEM", "SITE", "DESCRIPTION", "METHOD", "PRIO", "INSPECTOR", "STATUS", "DUE"
    );

    for task in &snapshot.tasks {
        let mut status = task.status.to_string();
        if snapshot.claims_in_flight.contains(&task.id) {
            status.push_str(" (claiming)");
        } else if task.is_claimable() {
            status.push_str(" *");
        }
        text.push_str(&format!(
            "{:<8} {:<6} {:<28} {:<8} {:>4} {:<16} {:<14} {:<10}\n",
            task.hierarchy_item_name,
            task.site,
            truncate(&task.description, 28),
            task.method,
            format!("P{}", task.priority_bucket()),
            truncate(&task.inspector, 16),
            status,
            task.due_date_label(),
        ));
    }

    if snapshot.tasks.is_empty() {
        text.push_str("(no matching tasks)\n");
    }

    text.push_str(&snapshot.page_info.label());
    if snapshot.has_next_page {
        text.push_str("  (more)");
    }
    text.push('\n');
    text
}

/// Format the dashboard metric cards and breakdowns.
pub fn format_dashboard(dashboard: &DashboardData) -> String {
    let s = &dashboard.summary;
    let mut text = format!(
        "Total {} | Pending {} | Claimed {} | Completed {} | Overdue {} | {}% complete\n",
        s.total_tasks,
        s.pending_tasks,
        s.claimed_tasks,
        s.completed_tasks,
        s.overdue_tasks,
        dashboard.completion_rate()
    );
    for site in &dashboard.by_site {
        text.push_str(&format!(
            "  Site {:<6} {:>5}/{:<5} {:>3}%\n",
            site.site,
            site.completed_count,
            site.task_count,
            site.progress_percent()
        ));
    }
    for inspector in &dashboard.by_inspector {
        text.push_str(&format!(
            "  {:<16} {:>5}/{:<5} {:>3}%\n",
            inspector.inspector,
            inspector.completed_count,
            inspector.task_count,
            inspector.progress_percent()
        ));
    }
    text
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s.to_string();
    }
    let mut out: String = s.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

impl Renderer for ConsoleRenderer {
    fn render_tasks(&self, snapshot: &TaskListSnapshot) {
        self.write(&format_tasks(snapshot));
    }

    fn render_dashboard(&self, dashboard: &DashboardData) {
        self.write(&format_dashboard(dashboard));
    }

    fn render_lookups(&self, lookups: &LookupData) {
        let sites: Vec<String> = lookups.sites.iter().map(|s| s.label()).collect();
        self.write(&format!(
            "Inspectors: {}\nSites: {}\n",
            lookups.inspector_names().join(", "),
            sites.join(", ")
        ));
    }

    fn notify(&self, notification: &Notification) {
        let tag = match notification.level {
            NotificationLevel::Info => "info",
            NotificationLevel::Success => "ok",
            NotificationLevel::Error => "error",
        };
        self.write(&format!("[{}] {}\n", tag, notification.message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo;
    use crate::pagination::PageInfo;
    use crate::view_model::LoadState;
    use std::collections::BTreeSet;

    #[test]
    fn test_format_tasks_marks_claim_state() {
        let snapshot = TaskListSnapshot {
            tasks: demo::tasks(),
            page: 1,
            page_size: 50,
            state: LoadState::Loaded,
            page_info: PageInfo::new(1, 50, 1804),
            has_next_page: false,
            claims_in_flight: BTreeSet::new(),
        };

        let text = format_tasks(&snapshot);
        assert!(text.contains("UnInitiated *"));
        assert!(text.contains("P3"));
        assert!(text.ends_with("Page 1 of 37\n"));

        let mut claiming = snapshot.clone();
        claiming.claims_in_flight.insert(1);
        assert!(format_tasks(&claiming).contains("UnInitiated (claiming)"));
    }

    #[test]
    fn test_format_dashboard() {
        let text = format_dashboard(&demo::dashboard());
        assert!(text.starts_with("Total 1804 | Pending 342"));
        assert!(text.contains("5% complete"));
        assert!(text.contains("Site 2901"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("CWS", 28), "CWS");
        assert_eq!(truncate("abcdef", 4), "abc…");
    }
}
