//! Client-side task filtering.
//!
//! All criteria are optional and combine conjunctively. An empty string is
//! treated the same as an absent criterion.

use serde::{Deserialize, Serialize};

use crate::task::Task;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskFilter {
    /// Case-insensitive substring of the hierarchy item name or description.
    #[serde(default)]
    pub search: Option<String>,
    /// Exact site code.
    #[serde(default)]
    pub site: Option<String>,
    /// Exact status wire value, e.g. `Claimed`.
    #[serde(default)]
    pub status: Option<String>,
    /// Exact inspector name.
    #[serde(default)]
    pub inspector: Option<String>,
}

impl TaskFilter {
    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    pub fn site(mut self, site: impl Into<String>) -> Self {
        self.site = Some(site.into());
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn inspector(mut self, inspector: impl Into<String>) -> Self {
        self.inspector = Some(inspector.into());
        self
    }

    /// True when no criterion constrains the list.
    pub fn is_empty(&self) -> bool {
        active(&self.search).is_none()
            && active(&self.site).is_none()
            && active(&self.status).is_none()
            && active(&self.inspector).is_none()
    }

    pub fn matches(&self, task: &Task) -> bool {
        let matches_search = match active(&self.search) {
            Some(term) => {
                let term = term.to_lowercase();
                task.hierarchy_item_name.to_lowercase().contains(&term)
                    || task.description.to_lowercase().contains(&term)
            }
            None => true,
        };

        matches_search
            && active(&self.site).map_or(true, |site| task.site == site)
            && active(&self.status).map_or(true, |status| task.status.as_str() == status)
            && active(&self.inspector).map_or(true, |inspector| task.inspector == inspector)
    }

    /// Filtered copy of `tasks`, preserving order.
    pub fn apply(&self, tasks: &[Task]) -> Vec<Task> {
        tasks.iter().filter(|t| self.matches(t)).cloned().collect()
    }
}

fn active(criterion: &Option<String>) -> Option<&str> {
    criterion.as_deref().filter(|s| !s.is_empty())
}
