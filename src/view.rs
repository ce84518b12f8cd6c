use std::fmt;

use crate::data_models::{Plan, SearchRequest, SearchResponse};
use crate::error::SearchError;
use crate::form::{FieldId, FormState};
use crate::preview::preview_form;

pub const SEARCHING: &str = "Searching…";

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Status {
    #[default]
    Idle,
    Searching,
    Ok(u16),
    Failed(SearchError),
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Idle => Ok(()),
            Status::Searching => f.write_str(SEARCHING),
            Status::Ok(code) => write!(f, "OK ({code})"),
            Status::Failed(err) => write!(f, "{err}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ResultsView {
    /// Nothing to show: before the first search, while one is in flight, or
    /// after it failed.
    #[default]
    Cleared,
    /// Plans in the order the planner sent them. May be empty.
    Plans(Vec<Plan>),
}

/// A search that has been issued but not answered yet.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSearch {
    pub generation: u64,
    pub request: SearchRequest,
}

/// Everything the page shows. The HTML is a projection of this.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewModel {
    form: FormState,
    preview: String,
    status: Status,
    results: ResultsView,
    generation: u64,
}

impl Default for ViewModel {
    fn default() -> Self {
        ViewModel::new(FormState::default())
    }
}

impl ViewModel {
    pub fn new(form: FormState) -> ViewModel {
        let preview = preview_form(&form);
        ViewModel {
            form,
            preview,
            status: Status::Idle,
            results: ResultsView::Cleared,
            generation: 0,
        }
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn preview(&self) -> &str {
        &self.preview
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn results(&self) -> &ResultsView {
        &self.results
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// A keystroke in one of the tracked inputs.
    pub fn on_input(&mut self, field: FieldId, value: impl Into<String>) {
        self.form.set(field, value);
        self.refresh_preview();
    }

    pub fn refresh_preview(&mut self) {
        self.preview = preview_form(&self.form);
    }

    /// Starts a new search and hands out its generation. Any answer to an
    /// older generation is stale from here on.
    pub fn begin_search(&mut self) -> PendingSearch {
        self.refresh_preview();
        self.status = Status::Searching;
        self.results = ResultsView::Cleared;
        self.generation += 1;

        PendingSearch {
            generation: self.generation,
            request: self.form.build_request(),
        }
    }

    /// Applies an answer. Returns `false` and changes nothing when the
    /// answer belongs to a superseded search.
    pub fn complete(
        &mut self,
        generation: u64,
        outcome: Result<(u16, SearchResponse), SearchError>,
    ) -> bool {
        if generation != self.generation {
            tracing::debug!(
                generation,
                latest = self.generation,
                "dropping stale search response"
            );
            return false;
        }

        match outcome {
            Ok((code, response)) => {
                self.status = Status::Ok(code);
                self.results = ResultsView::Plans(response.plans);
            }
            Err(err) => {
                self.status = Status::Failed(err);
                self.results = ResultsView::Cleared;
            }
        }
        true
    }
}
