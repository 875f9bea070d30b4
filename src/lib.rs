//! # Inspection Tracker
//!
//! Client for the inspection progress tracker backend.
//!
//! This library provides:
//! - A typed client for the tracker REST API (tasks, dashboard, lookups,
//!   claims, scope uploads)
//! - A task list view-model that fetches, filters and paginates tasks
//! - A renderer boundary fed with immutable snapshots
//!
//! ## Architecture
//!
//! ```text
//!   ┌────────────┐   snapshots /    ┌───────────────────┐   requests   ┌───────────┐
//!   │  Renderer  │◀─ notifications ─│ TaskListViewModel │─────────────▶│  TaskApi  │
//!   └────────────┘                  └───────────────────┘              └───────────┘
//!                                     ▲ filter / page / claim / upload
//! ```
//!
//! ## Modules
//! - `api`: `TaskApi` trait and its reqwest implementation
//! - `view_model`: fetch / filter / paginate cycle and actions
//! - `render`: renderer trait and a console renderer
//! - `demo`: fallback dataset used when the backend is unreachable

pub mod api;
pub mod config;
pub mod dashboard;
pub mod demo;
pub mod error;
pub mod filter;
pub mod lookups;
pub mod pagination;
pub mod render;
pub mod task;
pub mod view_model;

pub use config::Config;
pub use error::TrackerError;
pub use filter::TaskFilter;
pub use task::{Task, TaskId, TaskStatus};
pub use view_model::{TaskListSnapshot, TaskListViewModel};
