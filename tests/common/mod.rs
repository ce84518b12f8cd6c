#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::oneshot;

use orbital_search::client::{RawResponse, SearchApi};
use orbital_search::data_models::SearchRequest;
use orbital_search::error::{Result, SearchError};

pub const ONE_PLAN: &str = r#"{
  "plans": [{
    "score": 7,
    "legs": [{"origin":"LHR","destination":"JFK","provider":"BA","mode":"flight","duration_minutes":480}]
  }]
}"#;

/// Answers every search with the same reply and remembers what it was sent.
pub struct FixedApi {
    reply: Result<RawResponse>,
    pub seen: Mutex<Vec<SearchRequest>>,
}

impl FixedApi {
    pub fn ok(status: u16, body: &str) -> FixedApi {
        FixedApi {
            reply: Ok(RawResponse {
                status,
                body: body.to_string(),
            }),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn unreachable(message: &str) -> FixedApi {
        FixedApi {
            reply: Err(SearchError::Transport(message.to_string())),
            seen: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl SearchApi for FixedApi {
    async fn post_search(&self, request: &SearchRequest) -> Result<RawResponse> {
        self.seen.lock().unwrap().push(request.clone());
        self.reply.clone()
    }
}

/// Holds each search until the test releases the reply for its origin.
#[derive(Default)]
pub struct GatedApi {
    gates: Mutex<HashMap<String, oneshot::Receiver<RawResponse>>>,
}

impl GatedApi {
    pub fn gate(&self, origin: &str) -> oneshot::Sender<RawResponse> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(origin.to_string(), rx);
        tx
    }
}

#[async_trait]
impl SearchApi for GatedApi {
    async fn post_search(&self, request: &SearchRequest) -> Result<RawResponse> {
        let rx = self
            .gates
            .lock()
            .unwrap()
            .remove(&request.origin)
            .ok_or_else(|| SearchError::Transport(format!("no gate for {}", request.origin)))?;
        rx.await
            .map_err(|_| SearchError::Transport("gate dropped".to_string()))
    }
}

pub fn raw(status: u16, body: &str) -> RawResponse {
    RawResponse {
        status,
        body: body.to_string(),
    }
}
