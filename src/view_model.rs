//! Task list view-model.
//!
//! Owns the fetched page of tasks, the active filter and the pagination
//! cursor, and pushes snapshots to a [`Renderer`]. The backend is the single
//! source of truth: claims and uploads are round-tripped and followed by a
//! refetch, never applied to local state.
//!
//! ## Request ordering
//!
//! Every task fetch takes a generation number when it is issued. A response
//! is applied only if no newer fetch was issued in the meantime, so the last
//! request wins regardless of arrival order.
//!
//! ```text
//!   fetch_page(1) ──gen 1──────────────────────────▶ response (stale, dropped)
//!   fetch_page(2) ──────gen 2──────▶ response (applied)
//! ```

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Mutex;

use crate::api::{
    classify_http_status, ApiError, HttpStatusClass, ScopeFile, TaskApi, UploadReceipt,
};
use crate::dashboard::DashboardData;
use crate::demo;
use crate::error::TrackerError;
use crate::filter::TaskFilter;
use crate::lookups::LookupData;
use crate::pagination::{self, PageInfo};
use crate::render::{Notification, Renderer};
use crate::task::{Task, TaskId};

/// Extensions accepted by the scope upload endpoint.
const SCOPE_EXTENSIONS: [&str; 2] = ["xlsx", "xls"];

/// Loading state of the task list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadState {
    Idle,
    Loading,
    Loaded,
    Error,
}

/// What happened to a task fetch once its response arrived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The response replaced the task list.
    Applied { count: usize },
    /// A newer fetch was issued first; the response was dropped.
    Stale,
}

/// Where a resource came from during the initial load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Live,
    Demo,
}

/// Outcome of [`TaskListViewModel::load_initial`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InitialLoad {
    pub dashboard: DataSource,
    pub tasks: DataSource,
    pub lookups: DataSource,
}

impl InitialLoad {
    pub fn used_demo(&self) -> bool {
        [self.dashboard, self.tasks, self.lookups].contains(&DataSource::Demo)
    }
}

/// Immutable view of the task list handed to renderers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskListSnapshot {
    /// Tasks passing the active filter, in fetch order.
    pub tasks: Vec<Task>,
    pub page: u32,
    pub page_size: u32,
    pub state: LoadState,
    pub page_info: PageInfo,
    pub has_next_page: bool,
    /// Tasks whose claim control should be disabled.
    pub claims_in_flight: BTreeSet<TaskId>,
}

struct State {
    load_state: LoadState,
    all_tasks: Vec<Task>,
    filtered_tasks: Vec<Task>,
    filter: TaskFilter,
    /// Page whose tasks are currently held.
    page: u32,
    /// Page of the most recently issued fetch.
    requested_page: u32,
    generation: u64,
    last_page_len: usize,
    dashboard: Option<DashboardData>,
    lookups: Option<LookupData>,
    claims_in_flight: BTreeSet<TaskId>,
}

impl State {
    fn new() -> Self {
        Self {
            load_state: LoadState::Idle,
            all_tasks: Vec::new(),
            filtered_tasks: Vec::new(),
            filter: TaskFilter::default(),
            page: 1,
            requested_page: 1,
            generation: 0,
            last_page_len: 0,
            dashboard: None,
            lookups: None,
            claims_in_flight: BTreeSet::new(),
        }
    }

    fn replace_tasks(&mut self, page: u32, tasks: Vec<Task>) {
        self.page = page;
        self.last_page_len = tasks.len();
        self.all_tasks = tasks;
        self.refilter();
    }

    fn refilter(&mut self) {
        self.filtered_tasks = self.filter.apply(&self.all_tasks);
    }

    fn snapshot(&self, page_size: u32) -> TaskListSnapshot {
        let total = self
            .dashboard
            .as_ref()
            .map(|d| d.summary.total_tasks)
            .unwrap_or(self.all_tasks.len() as u64);

        TaskListSnapshot {
            tasks: self.filtered_tasks.clone(),
            page: self.page,
            page_size,
            state: self.load_state,
            page_info: PageInfo::new(self.page, page_size, total),
            has_next_page: pagination::has_next_page(self.last_page_len, page_size),
            claims_in_flight: self.claims_in_flight.clone(),
        }
    }
}

/// View-model mediating between a [`TaskApi`] and a [`Renderer`].
pub struct TaskListViewModel {
    api: Arc<dyn TaskApi>,
    renderer: Arc<dyn Renderer>,
    page_size: u32,
    state: Mutex<State>,
}

impl TaskListViewModel {
    /// `page_size` is fixed for the lifetime of the view-model.
    pub fn new(api: Arc<dyn TaskApi>, renderer: Arc<dyn Renderer>, page_size: u32) -> Self {
        Self {
            api,
            renderer,
            page_size: page_size.max(1),
            state: Mutex::new(State::new()),
        }
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub async fn snapshot(&self) -> TaskListSnapshot {
        self.state.lock().await.snapshot(self.page_size)
    }

    pub async fn load_state(&self) -> LoadState {
        self.state.lock().await.load_state
    }

    pub async fn all_tasks(&self) -> Vec<Task> {
        self.state.lock().await.all_tasks.clone()
    }

    pub async fn filtered_tasks(&self) -> Vec<Task> {
        self.state.lock().await.filtered_tasks.clone()
    }

    pub async fn filter(&self) -> TaskFilter {
        self.state.lock().await.filter.clone()
    }

    pub async fn page(&self) -> u32 {
        self.state.lock().await.page
    }

    pub async fn dashboard(&self) -> Option<DashboardData> {
        self.state.lock().await.dashboard.clone()
    }

    pub async fn lookups(&self) -> Option<LookupData> {
        self.state.lock().await.lookups.clone()
    }

    /// Whether the last fetched page was full, i.e. a next page may exist.
    pub async fn has_next_page(&self) -> bool {
        pagination::has_next_page(self.state.lock().await.last_page_len, self.page_size)
    }

    /// Look up a task on the current page.
    pub async fn task_details(&self, task_id: TaskId) -> Option<Task> {
        self.state
            .lock()
            .await
            .all_tasks
            .iter()
            .find(|t| t.id == task_id)
            .cloned()
    }

    async fn render_tasks(&self) {
        let snapshot = self.snapshot().await;
        self.renderer.render_tasks(&snapshot);
    }

    // ==================== Loading ====================

    /// Load dashboard, first page and lookups, substituting demo data for
    /// anything the backend fails to serve.
    pub async fn load_initial(&self) -> InitialLoad {
        let dashboard = match self.request_dashboard().await {
            Ok(_) => DataSource::Live,
            Err(e) => {
                tracing::warn!("Dashboard unavailable, using demo data: {}", e);
                self.apply_dashboard(demo::dashboard()).await;
                DataSource::Demo
            }
        };

        let tasks = match self.request_page(1).await {
            Ok(_) => DataSource::Live,
            Err(e) => {
                tracing::warn!("Tasks unavailable, using demo data: {}", e);
                self.apply_demo_tasks().await;
                DataSource::Demo
            }
        };

        let lookups = match self.request_lookups().await {
            Ok(_) => DataSource::Live,
            Err(e) => {
                tracing::warn!("Lookups unavailable, using demo data: {}", e);
                self.apply_lookups(demo::lookups()).await;
                DataSource::Demo
            }
        };

        let outcome = InitialLoad {
            dashboard,
            tasks,
            lookups,
        };
        if outcome.used_demo() {
            self.renderer
                .notify(&Notification::error("Error loading data. Using demo data."));
        }
        outcome
    }

    async fn apply_demo_tasks(&self) {
        {
            let mut state = self.state.lock().await;
            if state.load_state != LoadState::Error {
                // A newer fetch has taken over since the failure.
                return;
            }
            state.replace_tasks(1, demo::tasks());
            state.requested_page = 1;
            state.load_state = LoadState::Loaded;
        }
        self.render_tasks().await;
    }

    /// Fetch one page of tasks and make it the current list.
    ///
    /// Errors leave the previously held tasks in place.
    pub async fn fetch_page(&self, page: u32) -> Result<FetchOutcome, TrackerError> {
        match self.request_page(page).await {
            Ok(outcome) => Ok(outcome),
            Err(e) => {
                self.renderer
                    .notify(&Notification::error(format!("Failed to load tasks: {}", e)));
                Err(e.into())
            }
        }
    }

    async fn request_page(&self, page: u32) -> Result<FetchOutcome, ApiError> {
        let page = page.max(1);
        let generation = {
            let mut state = self.state.lock().await;
            state.generation += 1;
            state.requested_page = page;
            state.load_state = LoadState::Loading;
            state.generation
        };

        tracing::debug!(page, generation, "Fetching tasks");
        let result = self.api.fetch_tasks(page, self.page_size).await;

        let snapshot = {
            let mut state = self.state.lock().await;
            if state.generation != generation {
                tracing::warn!(
                    "Discarding response for page {} (request {} superseded by {})",
                    page,
                    generation,
                    state.generation
                );
                return Ok(FetchOutcome::Stale);
            }

            match result {
                Ok(tasks) => {
                    let count = tasks.len();
                    state.replace_tasks(page, tasks);
                    state.load_state = LoadState::Loaded;
                    tracing::info!("Loaded {} tasks for page {}", count, page);
                    (state.snapshot(self.page_size), count)
                }
                Err(e) => {
                    state.load_state = LoadState::Error;
                    state.requested_page = state.page;
                    return Err(e);
                }
            }
        };

        self.renderer.render_tasks(&snapshot.0);
        Ok(FetchOutcome::Applied { count: snapshot.1 })
    }

    /// Refetch the current page.
    pub async fn refresh(&self) -> Result<FetchOutcome, TrackerError> {
        let page = self.state.lock().await.requested_page;
        self.fetch_page(page).await
    }

    pub async fn next_page(&self) -> Result<FetchOutcome, TrackerError> {
        let page = self.state.lock().await.requested_page.saturating_add(1);
        self.fetch_page(page).await
    }

    /// Step back one page; page 1 is refetched rather than going below it.
    pub async fn prev_page(&self) -> Result<FetchOutcome, TrackerError> {
        let page = self.state.lock().await.requested_page.saturating_sub(1).max(1);
        self.fetch_page(page).await
    }

    pub async fn refresh_dashboard(&self) -> Result<DashboardData, TrackerError> {
        self.request_dashboard().await.map_err(|e| {
            self.renderer
                .notify(&Notification::error(format!("Failed to load dashboard: {}", e)));
            e.into()
        })
    }

    async fn request_dashboard(&self) -> Result<DashboardData, ApiError> {
        let dashboard = self.api.dashboard_summary().await?;
        self.apply_dashboard(dashboard.clone()).await;
        Ok(dashboard)
    }

    async fn apply_dashboard(&self, dashboard: DashboardData) {
        let tasks_loaded = {
            let mut state = self.state.lock().await;
            state.dashboard = Some(dashboard.clone());
            state.load_state != LoadState::Idle
        };
        self.renderer.render_dashboard(&dashboard);
        // Pagination info depends on the dashboard total.
        if tasks_loaded {
            self.render_tasks().await;
        }
    }

    /// Fetch all lookup lists concurrently.
    pub async fn load_lookups(&self) -> Result<LookupData, TrackerError> {
        self.request_lookups().await.map_err(|e| {
            self.renderer
                .notify(&Notification::error(format!("Failed to load lookups: {}", e)));
            e.into()
        })
    }

    async fn request_lookups(&self) -> Result<LookupData, ApiError> {
        let (inspectors, sites, methods, status_types) = futures::try_join!(
            self.api.inspectors(),
            self.api.sites(),
            self.api.methods(),
            self.api.status_types(),
        )?;

        let lookups = LookupData {
            inspectors,
            sites,
            methods,
            status_types,
        };
        self.apply_lookups(lookups.clone()).await;
        Ok(lookups)
    }

    async fn apply_lookups(&self, lookups: LookupData) {
        self.state.lock().await.lookups = Some(lookups.clone());
        self.renderer.render_lookups(&lookups);
    }

    // ==================== Filtering ====================

    /// Replace the filter and recompute the visible tasks from held data.
    pub async fn set_filter(&self, filter: TaskFilter) {
        let snapshot = {
            let mut state = self.state.lock().await;
            state.filter = filter;
            state.refilter();
            state.snapshot(self.page_size)
        };
        self.renderer.render_tasks(&snapshot);
    }

    pub async fn clear_filter(&self) {
        self.set_filter(TaskFilter::default()).await;
    }

    /// Drill down into one site, keeping the other criteria.
    pub async fn focus_site(&self, site: impl Into<String>) {
        let mut filter = self.filter().await;
        filter.site = Some(site.into());
        self.set_filter(filter).await;
    }

    // ==================== Actions ====================

    /// Claim a task for `inspector`.
    ///
    /// On success the current page and the dashboard are refetched; local
    /// tasks are never edited. A second claim for a task whose claim is still
    /// outstanding is rejected without contacting the backend.
    pub async fn claim(&self, task_id: TaskId, inspector: &str) -> Result<(), TrackerError> {
        {
            let mut state = self.state.lock().await;
            if !state.claims_in_flight.insert(task_id) {
                tracing::debug!("Ignoring duplicate claim for task {}", task_id);
                return Err(TrackerError::ClaimInFlight(task_id));
            }
        }
        self.render_tasks().await;

        let result = self.api.claim_task(task_id, inspector).await;
        self.state.lock().await.claims_in_flight.remove(&task_id);

        match result {
            Ok(()) => {
                tracing::info!("Task {} claimed by {}", task_id, inspector);
                self.renderer
                    .notify(&Notification::success("Task claimed successfully!"));
                self.refresh_after_change().await;
                Ok(())
            }
            Err(e) => {
                tracing::error!("Claim of task {} failed: {}", task_id, e);
                self.renderer
                    .notify(&Notification::error(claim_failure_message(&e)));
                self.render_tasks().await;
                Err(e.into())
            }
        }
    }

    /// Upload an Excel scope file to the backend.
    pub async fn upload_scope(&self, path: impl AsRef<Path>) -> Result<UploadReceipt, TrackerError> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        if !is_scope_file(path) {
            self.renderer.notify(&Notification::error(
                "Please select an Excel file (.xlsx or .xls)",
            ));
            return Err(TrackerError::UnsupportedFile(file_name));
        }

        let contents = tokio::fs::read(path).await.map_err(|source| {
            self.renderer
                .notify(&Notification::error("Upload failed. Please try again."));
            TrackerError::Io {
                path: path.display().to_string(),
                source,
            }
        })?;

        match self
            .api
            .upload_scope(ScopeFile {
                file_name,
                contents,
            })
            .await
        {
            Ok(receipt) => {
                tracing::info!("Scope upload processed {} records", receipt.records_processed);
                self.renderer.notify(&Notification::success(format!(
                    "File uploaded successfully! Processed {} records.",
                    receipt.records_processed
                )));
                self.refresh_after_change().await;
                Ok(receipt)
            }
            Err(e) => {
                tracing::error!("Scope upload failed: {}", e);
                self.renderer
                    .notify(&Notification::error("Upload failed. Please try again."));
                Err(e.into())
            }
        }
    }

    /// Refetch tasks and dashboard after a server-side change.
    async fn refresh_after_change(&self) {
        if let Err(e) = self.refresh().await {
            tracing::warn!("Task refresh failed: {}", e);
        }
        if let Err(e) = self.refresh_dashboard().await {
            tracing::warn!("Dashboard refresh failed: {}", e);
        }
    }
}

/// User-facing text for a rejected claim; server details stay in the log.
fn claim_failure_message(error: &ApiError) -> &'static str {
    match error.status().map(classify_http_status) {
        Some(HttpStatusClass::Conflict) => "Task has already been claimed by someone else.",
        Some(HttpStatusClass::NotFound) => "Task no longer exists. Refresh and try again.",
        _ => "Failed to claim task. Please try again.",
    }
}

fn is_scope_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| SCOPE_EXTENSIONS.iter().any(|ok| e.eq_ignore_ascii_case(ok)))
        .unwrap_or(false)
}
