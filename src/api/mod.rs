//! Client for the inspection tracker REST API.
//!
//! This module provides a trait-based abstraction over the backend so the
//! view-model can be driven by the HTTP client in production and by scripted
//! fakes in tests.

mod error;
mod http;

pub use error::{classify_http_status, ApiError, ApiErrorKind, HttpStatusClass};
pub use http::HttpTaskApi;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::dashboard::DashboardData;
use crate::lookups::{Inspector, Site};
use crate::task::{Task, TaskId};

/// Body of `POST /tasks/{id}/claim`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimRequest {
    pub inspector: String,
}

/// Result of a scope upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadReceipt {
    pub records_processed: u64,
}

/// Scope file ready to be posted.
#[derive(Debug, Clone)]
pub struct ScopeFile {
    pub file_name: String,
    pub contents: Vec<u8>,
}

/// Operations offered by the tracker backend.
#[async_trait]
pub trait TaskApi: Send + Sync {
    async fn dashboard_summary(&self) -> Result<DashboardData, ApiError>;

    /// Fetch one 1-based page of tasks.
    async fn fetch_tasks(&self, page: u32, per_page: u32) -> Result<Vec<Task>, ApiError>;

    async fn inspectors(&self) -> Result<Vec<Inspector>, ApiError>;

    async fn sites(&self) -> Result<Vec<Site>, ApiError>;

    async fn methods(&self) -> Result<Vec<serde_json::Value>, ApiError>;

    async fn status_types(&self) -> Result<Vec<serde_json::Value>, ApiError>;

    /// Claim a task for `inspector`. Any 2xx means the server accepted it.
    async fn claim_task(&self, task_id: TaskId, inspector: &str) -> Result<(), ApiError>;

    async fn upload_scope(&self, file: ScopeFile) -> Result<UploadReceipt, ApiError>;
}
