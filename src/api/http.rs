//! reqwest implementation of [`TaskApi`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{multipart, Client, RequestBuilder};
use serde::de::DeserializeOwned;

use super::error::{classify_http_status, ApiError};
use super::{ClaimRequest, ScopeFile, TaskApi, UploadReceipt};
use crate::config::Config;
use crate::dashboard::DashboardData;
use crate::lookups::{Inspector, LookupKind, Site};
use crate::task::{Task, TaskId, TaskPage};

/// HTTP client for the tracker backend.
pub struct HttpTaskApi {
    client: Client,
    base_url: String,
}

impl HttpTaskApi {
    /// Create a client rooted at `base_url` (e.g. `http://localhost:5000/api`).
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("inspection-tracker/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Self::new(config.api_base_url.as_str(), config.request_timeout)
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Send a request and return the body of a 2xx response.
    async fn execute(&self, request: RequestBuilder) -> Result<String, ApiError> {
        let response = match request.send().await {
            Ok(r) => r,
            Err(e) => {
                let message = if e.is_timeout() {
                    format!("Request timeout: {}", e)
                } else if e.is_connect() {
                    format!("Connection failed: {}", e)
                } else {
                    format!("Request failed: {}", e)
                };
                tracing::error!("{}", message);
                return Err(ApiError::Network(message));
            }
        };

        let status = response.status();
        let url = response.url().clone();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(format!("Failed to read response body: {}", e)))?;

        if !status.is_success() {
            tracing::error!(
                "{} answered {} ({:?})",
                url,
                status,
                classify_http_status(status.as_u16())
            );
            return Err(ApiError::Http {
                status: status.as_u16(),
                body,
            });
        }

        Ok(body)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        tracing::debug!("GET {}", url);
        let body = self.execute(self.client.get(&url)).await?;
        decode(&body)
    }

    async fn lookup<T: DeserializeOwned>(&self, kind: LookupKind) -> Result<Vec<T>, ApiError> {
        self.get_json(&format!("lookups/{}", kind.path())).await
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| {
        tracing::error!("Malformed response body: {}", e);
        ApiError::Decode(format!("{}, body: {}", e, body))
    })
}

#[async_trait]
impl TaskApi for HttpTaskApi {
    async fn dashboard_summary(&self) -> Result<DashboardData, ApiError> {
        self.get_json("dashboard/summary").await
    }

    async fn fetch_tasks(&self, page: u32, per_page: u32) -> Result<Vec<Task>, ApiError> {
        let page: TaskPage = self
            .get_json(&format!("tasks?page={}&per_page={}", page, per_page))
            .await?;
        Ok(page.tasks)
    }

    async fn inspectors(&self) -> Result<Vec<Inspector>, ApiError> {
        self.lookup(LookupKind::Inspectors).await
    }

    async fn sites(&self) -> Result<Vec<Site>, ApiError> {
        self.lookup(LookupKind::Sites).await
    }

    async fn methods(&self) -> Result<Vec<serde_json::Value>, ApiError> {
        self.lookup(LookupKind::Methods).await
    }

    async fn status_types(&self) -> Result<Vec<serde_json::Value>, ApiError> {
        self.lookup(LookupKind::StatusTypes).await
    }

    async fn claim_task(&self, task_id: TaskId, inspector: &str) -> Result<(), ApiError> {
        let url = self.url(&format!("tasks/{}/claim", task_id));
        tracing::debug!("POST {} as {}", url, inspector);
        let body = ClaimRequest {
            inspector: inspector.to_string(),
        };
        self.execute(self.client.post(&url).json(&body)).await?;
        Ok(())
    }

    async fn upload_scope(&self, file: ScopeFile) -> Result<UploadReceipt, ApiError> {
        let url = self.url("upload-scope");
        tracing::debug!(
            "POST {} ({}, {} bytes)",
            url,
            file.file_name,
            file.contents.len()
        );
        let part = multipart::Part::bytes(file.contents).file_name(file.file_name);
        let form = multipart::Form::new().part("file", part);
        let body = self.execute(self.client.post(&url).multipart(form)).await?;
        decode(&body)
    }
}
