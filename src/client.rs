use async_trait::async_trait;
use serde_json::Value;

use crate::data_models::{SearchRequest, SearchResponse};
use crate::error::{Result, SearchError};

pub const SEARCH_PATH: &str = "/api/search";

/// Status code and body text of a planner reply, before interpretation.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Anything that can carry a search to the planner.
#[async_trait]
pub trait SearchApi: Send + Sync {
    async fn post_search(&self, request: &SearchRequest) -> Result<RawResponse>;
}

/// Talks to the planner over HTTP. No timeout and no retries.
#[derive(Debug, Clone)]
pub struct HttpSearchApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSearchApi {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, SEARCH_PATH)
    }
}

#[async_trait]
impl SearchApi for HttpSearchApi {
    async fn post_search(&self, request: &SearchRequest) -> Result<RawResponse> {
        let endpoint = self.endpoint();
        log::debug!("POST {endpoint}");

        let resp = self
            .client
            .post(&endpoint)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await?;

        let status = resp.status().as_u16();
        let body = resp.text().await?;
        log::debug!("planner answered {status} with {} bytes", body.len());

        Ok(RawResponse { status, body })
    }
}

/// Turns a raw reply into plans or a status-line error.
///
/// An empty body reads as `{}`. A non-empty body that is not JSON is a
/// transport failure, whatever the status code.
pub fn interpret(raw: &RawResponse) -> Result<SearchResponse> {
    let data: Value = if raw.body.is_empty() {
        Value::Object(Default::default())
    } else {
        serde_json::from_str(&raw.body)?
    };

    if !raw.is_success() {
        let message = detail_message(&data)
            .or_else(|| (!raw.body.is_empty()).then(|| raw.body.clone()))
            .unwrap_or_else(|| "unknown".to_string());
        return Err(SearchError::Application {
            status: raw.status,
            message,
        });
    }

    Ok(SearchResponse::from_value(data))
}

// Falsy details (null, false, 0, "") don't count.
fn detail_message(data: &Value) -> Option<String> {
    match data.get("detail")? {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}
