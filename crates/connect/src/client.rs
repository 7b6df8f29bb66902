//! HTTP client for the Famledger REST backend.
//!
//! Implements the group, goal-sharing and scoped-read collaborator traits
//! from `famledger-core`. Scope authorization happens server-side; this
//! client only forwards the requested scope as query parameters.

use async_trait::async_trait;
use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ApiConfig;
use famledger_core::errors::{Error, Result};
use famledger_core::goals::{
    Goal, GoalReadApiTrait, GoalSharingApiTrait, GoalUser, ShareGoalRequest, UnshareGoalRequest,
};
use famledger_core::groups::{UserGroup, UserGroupApiTrait};
use famledger_core::view_context::ScopeDescriptor;

// ─────────────────────────────────────────────────────────────────────────────
// API Response Types
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, serde::Deserialize)]
struct ApiErrorResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    details: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Famledger API Client
// ─────────────────────────────────────────────────────────────────────────────

/// HTTP client for the Famledger backend.
///
/// # Example
///
/// ```ignore
/// let client = FamledgerApiClient::new(&ApiConfig::from_env())?;
/// let groups = client.get_groups().await?;
/// ```
#[derive(Debug, Clone)]
pub struct FamledgerApiClient {
    client: reqwest::Client,
    base_url: String,
    auth_header: Option<HeaderValue>,
}

impl FamledgerApiClient {
    /// # Errors
    ///
    /// Returns an error if the access token is not a valid header value or the
    /// HTTP client cannot be initialized.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let auth_header = config
            .access_token
            .as_deref()
            .map(|token| {
                HeaderValue::from_str(&format!("Bearer {}", token))
                    .map_err(|e| Error::Unexpected(format!("Invalid access token format: {}", e)))
            })
            .transpose()?;

        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| Error::Unexpected(format!("Failed to initialize HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            auth_header,
        })
    }

    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(auth_header) = &self.auth_header {
            headers.insert(AUTHORIZATION, auth_header.clone());
        }
        headers
    }

    /// Absolute URL for `path`, with `query` percent-encoded in order.
    fn url(&self, path: &str, query: &[(&str, String)]) -> String {
        let mut url = format!("{}{}", self.base_url, path);
        for (index, (key, value)) in query.iter().enumerate() {
            url.push(if index == 0 { '?' } else { '&' });
            url.push_str(key);
            url.push('=');
            url.push_str(&urlencoding::encode(value));
        }
        url
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        let url = self.url(path, query);
        debug!("[FamledgerApi] GET {}", url);

        let response = self
            .client
            .get(&url)
            .headers(self.headers())
            .send()
            .await
            .map_err(request_error)?;

        let body = read_body(response).await?;
        serde_json::from_str(&body)
            .map_err(|e| Error::Unexpected(format!("Failed to parse response: {} - {}", e, body)))
    }

    /// POST with a JSON body; the response body is ignored.
    async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<()> {
        let url = self.url(path, &[]);
        debug!("[FamledgerApi] POST {}", url);

        let response = self
            .client
            .post(&url)
            .headers(self.headers())
            .json(body)
            .send()
            .await
            .map_err(request_error)?;

        read_body(response).await.map(|_| ())
    }
}

fn request_error(e: reqwest::Error) -> Error {
    Error::Transport {
        status: e.status().map(|s| s.as_u16()),
        message: format!("Request failed: {}", e),
    }
}

async fn read_body(response: reqwest::Response) -> Result<String> {
    let status = response.status();
    let body = response.text().await.map_err(|e| Error::Transport {
        status: Some(status.as_u16()),
        message: format!("Failed to read response: {}", e),
    })?;

    if !status.is_success() {
        return Err(status_error(status, &body));
    }
    Ok(body)
}

/// 401/403 become `Authorization`; every other failure status is `Transport`.
fn status_error(status: StatusCode, body: &str) -> Error {
    let message = match serde_json::from_str::<ApiErrorResponse>(body) {
        Ok(err) => {
            let message = err
                .message
                .or(err.error)
                .unwrap_or_else(|| format!("HTTP {}", status));
            match err.details {
                Some(details) => format!("{} ({})", message, details),
                None => message,
            }
        }
        Err(_) if body.trim().is_empty() => format!("HTTP {}", status),
        Err(_) => body.chars().take(200).collect(),
    };

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Error::Authorization(message),
        _ => Error::Transport {
            status: Some(status.as_u16()),
            message,
        },
    }
}

fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

// ─────────────────────────────────────────────────────────────────────────────
// Collaborator trait implementations
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl UserGroupApiTrait for FamledgerApiClient {
    async fn get_groups(&self) -> Result<Vec<UserGroup>> {
        self.get("/usergroup", &[]).await
    }
}

#[async_trait]
impl GoalSharingApiTrait for FamledgerApiClient {
    async fn share_goal(&self, request: ShareGoalRequest) -> Result<()> {
        self.post("/usergroup/share-goal", &request).await
    }

    async fn unshare_goal(&self, request: UnshareGoalRequest) -> Result<()> {
        self.post("/usergroup/unshare-goal", &request).await
    }

    async fn get_goal_users(&self, goal_id: &str) -> Result<Vec<GoalUser>> {
        self.get(&format!("/usergroup/goal/{}/users", segment(goal_id)), &[])
            .await
    }
}

#[async_trait]
impl GoalReadApiTrait for FamledgerApiClient {
    async fn get_goals(&self, scope: &ScopeDescriptor) -> Result<Vec<Goal>> {
        self.get("/goal", &scope.query().pairs()).await
    }
}
