use std::sync::Arc;

use tokio::sync::Mutex;

use crate::client::{SearchApi, interpret};
use crate::form::FieldId;
use crate::view::{Status, ViewModel};

/// Drives searches against the planner and keeps the view-model current.
///
/// Clones share the same view-model, so several searches can be in flight
/// at once. Only the latest one is ever displayed.
#[derive(Clone)]
pub struct SearchSession {
    api: Arc<dyn SearchApi>,
    view: Arc<Mutex<ViewModel>>,
}

impl SearchSession {
    pub fn new(api: Arc<dyn SearchApi>, view: ViewModel) -> SearchSession {
        SearchSession {
            api,
            view: Arc::new(Mutex::new(view)),
        }
    }

    pub async fn snapshot(&self) -> ViewModel {
        self.view.lock().await.clone()
    }

    pub async fn on_input(&self, field: FieldId, value: impl Into<String>) {
        self.view.lock().await.on_input(field, value);
    }

    /// Runs one search: refresh preview, mark searching, clear results, post.
    ///
    /// Returns the status on screen once this search's answer has been
    /// handled, which is someone else's when a newer search superseded it.
    pub async fn run_search(&self) -> Status {
        let pending = self.view.lock().await.begin_search();
        let request = pending.request;

        if !request.has_valid_layovers() {
            tracing::warn!(
                max_layovers = %request.max_layovers,
                "max_layovers is not a number, sending null"
            );
        }
        tracing::info!(
            generation = pending.generation,
            origin = %request.origin,
            destination = %request.destination,
            "searching"
        );

        // The lock is released here; other edits and searches may interleave.
        let outcome = match self.api.post_search(&request).await {
            Ok(raw) => interpret(&raw).map(|resp| (raw.status, resp)),
            Err(err) => Err(err),
        };

        match &outcome {
            Ok((code, resp)) => tracing::info!(
                generation = pending.generation,
                status = code,
                plans = resp.plans.len(),
                "search finished"
            ),
            Err(err) => tracing::warn!(
                generation = pending.generation,
                error = %err,
                "search failed"
            ),
        }

        let mut view = self.view.lock().await;
        view.complete(pending.generation, outcome);
        view.status().clone()
    }
}
