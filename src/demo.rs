//! Fixed demo dataset shown when the backend cannot be reached.

use chrono::NaiveDate;
use serde_json::{Map, Value};

use crate::dashboard::{DashboardData, InspectorStats, SiteStats, Summary};
use crate::lookups::{Inspector, LookupData, Site};
use crate::task::{Task, TaskStatus, UNASSIGNED};

pub fn dashboard() -> DashboardData {
    DashboardData {
        summary: Summary {
            total_tasks: 1804,
            claimed_tasks: 156,
            completed_tasks: 89,
            pending_tasks: 342,
            overdue_tasks: 23,
        },
        by_site: vec![
            site_stats("2901", 456, 234),
            site_stats("1201", 234, 156),
            site_stats("7101", 123, 45),
        ],
        by_inspector: vec![
            inspector_stats("Kent Manuel", 45, 23),
            inspector_stats("Brad Sisk", 38, 19),
            inspector_stats("Hunter Doucet", 32, 18),
        ],
    }
}

pub fn tasks() -> Vec<Task> {
    vec![
        Task {
            id: 1,
            hierarchy_item_name: "019A".to_string(),
            site: "2901".to_string(),
            description: "CWS".to_string(),
            method: "VI-EXT".to_string(),
            inspection_priority: 20,
            inspector: UNASSIGNED.to_string(),
            status: TaskStatus::UnInitiated,
            due_date: NaiveDate::from_ymd_opt(2025, 4, 1),
            comments: Some("38 PAGES".to_string()),
        },
        Task {
            id: 2,
            hierarchy_item_name: "006AR".to_string(),
            site: "2901".to_string(),
            description: "LU-1200 Recycle Comp Pkg.".to_string(),
            method: "VI-EXT".to_string(),
            inspection_priority: 22,
            inspector: "Kent Manuel".to_string(),
            status: TaskStatus::Claimed,
            due_date: NaiveDate::from_ymd_opt(2025, 1, 5),
            comments: Some(String::new()),
        },
        Task {
            id: 3,
            hierarchy_item_name: "013A".to_string(),
            site: "2901".to_string(),
            description: "Catalyst Tote".to_string(),
            method: "VI-EXT".to_string(),
            inspection_priority: 25,
            inspector: "Brad Sisk".to_string(),
            status: TaskStatus::Reported,
            due_date: NaiveDate::from_ymd_opt(2025, 2, 1),
            comments: Some(String::new()),
        },
    ]
}

pub fn lookups() -> LookupData {
    LookupData {
        inspectors: ["Kent Manuel", "Brad Sisk", "Hunter Doucet", "Landon Curtis"]
            .into_iter()
            .map(|name| Inspector {
                name: name.to_string(),
                extra: Map::new(),
            })
            .collect(),
        sites: ["1201", "1401", "1501", "2901", "7101", "7201"]
            .into_iter()
            .map(|code| Site {
                site_code: code.to_string(),
                extra: Map::new(),
            })
            .collect(),
        methods: Vec::new(),
        status_types: TaskStatus::ALL
            .iter()
            .map(|s| Value::from(s.as_str()))
            .collect(),
    }
}

fn site_stats(site: &str, task_count: u64, completed_count: u64) -> SiteStats {
    SiteStats {
        site: site.to_string(),
        task_count,
        completed_count,
    }
}

fn inspector_stats(inspector: &str, task_count: u64, completed_count: u64) -> InspectorStats {
    InspectorStats {
        inspector: inspector.to_string(),
        task_count,
        completed_count,
    }
}
