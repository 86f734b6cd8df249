//! Roster backend client
//!
//! [`RosterBackend`] is the seam the command handlers and the interactive UI
//! talk to; [`HttpBackend`] implements it against the REST API.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::Config;
use crate::error::{ApiError, Result, RosterError};
use crate::roster::Employee;
use crate::schedule::{Category, MasterData, MasterKind, MasterShift, MasterUnit, ScheduleEntry};

/// Body sent when creating or updating a master record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MasterPayload {
    pub code: String,
    pub name: String,
    pub color: String,
    pub description: String,
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
}

impl MasterPayload {
    /// Shifts (primary and leave) carry placeholder times; units carry none
    pub fn new(category: Category, code: &str, name: &str, color: &str) -> Self {
        let times = match category {
            Category::Task => None,
            Category::Primary | Category::Leave => Some("00:00".to_string()),
        };
        Self {
            code: code.trim().to_uppercase(),
            name: name.trim().to_string(),
            color: color.trim().to_string(),
            description: String::new(),
            is_active: true,
            start_time: times.clone(),
            end_time: times,
        }
    }
}

#[async_trait]
pub trait RosterBackend: Send + Sync {
    /// Both master lists from one refresh
    async fn fetch_master_data(&self) -> Result<MasterData>;

    async fn fetch_employees(&self) -> Result<Vec<Employee>>;

    /// Schedules of a zero-based month
    async fn fetch_schedules(&self, year: i32, month: u32) -> Result<Vec<ScheduleEntry>>;

    async fn save_schedule(&self, entry: &ScheduleEntry) -> Result<()>;

    async fn create_master(&self, kind: MasterKind, payload: &MasterPayload) -> Result<()>;

    async fn update_master(
        &self,
        kind: MasterKind,
        id: &str,
        payload: &MasterPayload,
    ) -> Result<()>;

    async fn delete_master(&self, kind: MasterKind, id: &str) -> Result<()>;
}

pub struct HttpBackend {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpBackend {
    pub fn new(base_url: &str, token: Option<String>) -> Self {
        HttpBackend {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.api_url, config.api_token.clone())
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.client.request(method, self.url(path));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let response = builder.send().await.map_err(|e| {
            if e.is_connect() || e.is_timeout() {
                ApiError::ConnectionFailed(e.to_string())
            } else {
                ApiError::NetworkError(e)
            }
        })?;
        check_status(response).await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        tracing::debug!(path, "GET");
        let response = self.send(self.request(Method::GET, path)).await?;
        let body = response.text().await.map_err(ApiError::NetworkError)?;
        serde_json::from_str(&body).map_err(|e| {
            RosterError::Api(ApiError::InvalidResponse(format!("{}: {}", path, e)))
        })
    }

    async fn send_json<B: Serialize + Sync>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<()> {
        tracing::debug!(%method, path, "sending");
        self.send(self.request(method, path).json(body)).await?;
        Ok(())
    }
}

async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().to_string();
    let message = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    tracing::warn!(status = status.as_u16(), url = %url, "backend request failed");

    let err = match status {
        StatusCode::UNAUTHORIZED => ApiError::AuthenticationFailed,
        StatusCode::FORBIDDEN => ApiError::Forbidden,
        StatusCode::NOT_FOUND => ApiError::NotFound(url),
        _ => ApiError::RequestFailed {
            status: status.as_u16(),
            message: error_message(&message),
        },
    };
    Err(err.into())
}

// The backend answers errors with {"error": "..."} or {"message": "..."}
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            ["error", "message"]
                .iter()
                .find_map(|key| value.get(*key).and_then(|v| v.as_str()).map(str::to_string))
        })
        .unwrap_or_else(|| body.trim().to_string())
}

#[async_trait]
impl RosterBackend for HttpBackend {
    async fn fetch_master_data(&self) -> Result<MasterData> {
        let (shifts, units) = tokio::try_join!(
            self.get_json::<Vec<MasterShift>>(MasterKind::Shift.endpoint()),
            self.get_json::<Vec<MasterUnit>>(MasterKind::Unit.endpoint()),
        )?;
        tracing::info!(shifts = shifts.len(), units = units.len(), "master data loaded");
        Ok(MasterData::new(shifts, units))
    }

    async fn fetch_employees(&self) -> Result<Vec<Employee>> {
        self.get_json("users").await
    }

    async fn fetch_schedules(&self, year: i32, month: u32) -> Result<Vec<ScheduleEntry>> {
        let path = format!("schedules?month={}&year={}", month + 1, year);
        let entries: Vec<ScheduleEntry> = self.get_json(&path).await?;
        tracing::info!(year, month = month + 1, count = entries.len(), "schedules loaded");
        Ok(entries)
    }

    async fn save_schedule(&self, entry: &ScheduleEntry) -> Result<()> {
        self.send_json(Method::POST, "schedules", entry).await
    }

    async fn create_master(&self, kind: MasterKind, payload: &MasterPayload) -> Result<()> {
        self.send_json(Method::POST, kind.endpoint(), payload).await
    }

    async fn update_master(
        &self,
        kind: MasterKind,
        id: &str,
        payload: &MasterPayload,
    ) -> Result<()> {
        let path = format!("{}/{}", kind.endpoint(), id);
        self.send_json(Method::PUT, &path, payload).await
    }

    async fn delete_master(&self, kind: MasterKind, id: &str) -> Result<()> {
        let path = format!("{}/{}", kind.endpoint(), id);
        tracing::debug!(path = %path, "DELETE");
        self.send(self.request(Method::DELETE, &path)).await?;
        Ok(())
    }
}
