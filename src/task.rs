//! Inspection task types as served by the tracker API.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Server-assigned task identifier.
pub type TaskId = i64;

/// Inspector value the backend uses for tasks nobody has claimed.
pub const UNASSIGNED: &str = "Unassigned";

/// Workflow status of an inspection task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    UnInitiated,
    Claimed,
    #[serde(rename = "Field Complete", alias = "FieldComplete")]
    FieldComplete,
    Reported,
}

impl TaskStatus {
    /// All statuses in workflow order.
    pub const ALL: [TaskStatus; 4] = [
        TaskStatus::UnInitiated,
        TaskStatus::Claimed,
        TaskStatus::FieldComplete,
        TaskStatus::Reported,
    ];

    /// Value as stored by the backend, also used for exact-match status filtering.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnInitiated => "UnInitiated",
            Self::Claimed => "Claimed",
            Self::FieldComplete => "Field Complete",
            Self::Reported => "Reported",
        }
    }

    /// CSS-style badge class: lower-cased, spaces replaced by dashes.
    pub fn badge_class(&self) -> String {
        self.as_str().to_lowercase().replace(' ', "-")
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One inspection work item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub hierarchy_item_name: String,
    pub site: String,
    pub description: String,
    pub method: String,
    pub inspection_priority: i64,
    /// Owner of the task, or [`UNASSIGNED`].
    pub inspector: String,
    pub status: TaskStatus,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub comments: Option<String>,
}

impl Task {
    /// Severity bucket shown on the priority badge (ceiling of priority / 10).
    pub fn priority_bucket(&self) -> i64 {
        priority_bucket(self.inspection_priority)
    }

    pub fn is_unassigned(&self) -> bool {
        self.inspector == UNASSIGNED
    }

    /// Only un-initiated tasks offer a claim action.
    pub fn is_claimable(&self) -> bool {
        self.status == TaskStatus::UnInitiated
    }

    /// Due date for display, `N/A` when the task has none.
    pub fn due_date_label(&self) -> String {
        self.due_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "N/A".to_string())
    }
}

/// Ceiling division of a priority by 10.
pub fn priority_bucket(priority: i64) -> i64 {
    priority.div_euclid(10) + i64::from(priority.rem_euclid(10) != 0)
}

/// Page of tasks returned by `GET /tasks`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskPage {
    pub tasks: Vec<Task>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_bucket_rounds_up() {
        assert_eq!(priority_bucket(20), 2);
        assert_eq!(priority_bucket(22), 3);
        assert_eq!(priority_bucket(25), 3);
        assert_eq!(priority_bucket(1), 1);
        assert_eq!(priority_bucket(0), 0);
    }

    #[test]
    fn test_status_wire_values() {
        let status: TaskStatus = serde_json::from_str("\"Field Complete\"").unwrap();
        assert_eq!(status, TaskStatus::FieldComplete);
        let status: TaskStatus = serde_json::from_str("\"UnInitiated\"").unwrap();
        assert_eq!(status, TaskStatus::UnInitiated);
        assert!(serde_json::from_str::<TaskStatus>("\"Closed\"").is_err());
        assert_eq!(TaskStatus::FieldComplete.badge_class(), "field-complete");
        assert_eq!(
            serde_json::to_string(&TaskStatus::FieldComplete).unwrap(),
            "\"Field Complete\""
        );
    }

    #[test]
    fn test_task_decodes_with_nulls() {
        let task: Task = serde_json::from_value(serde_json::json!({
            "id": 7,
            "hierarchy_item_name": "019A",
            "site": "2901",
            "description": "CWS",
            "method": "VI-EXT",
            "inspection_priority": 20,
            "inspector": "Unassigned",
            "status": "UnInitiated",
            "due_date": null
        }))
        .unwrap();

        assert!(task.is_unassigned());
        assert!(task.is_claimable());
        assert_eq!(task.comments, None);
        assert_eq!(task.due_date_label(), "N/A");
    }
}
