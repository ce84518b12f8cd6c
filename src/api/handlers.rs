use axum::{Form, Json, extract::State, response::Html};

use crate::form::FormState;
use crate::preview::preview_form;
use crate::render::render_page;
use crate::session::SearchSession;
use crate::view::ViewModel;

use super::AppState;
use super::models::HealthResponse;

pub async fn index_handler() -> Html<String> {
    Html(render_page(&ViewModel::default()))
}

/// Runs one search for the submitted form and renders the page. The outcome
/// is reported in the status element, so this always answers 200.
pub async fn search_handler(
    State(state): State<AppState>,
    Form(form): Form<FormState>,
) -> Html<String> {
    let session = SearchSession::new(state.api.clone(), ViewModel::new(form));
    session.run_search().await;
    Html(render_page(&session.snapshot().await))
}

pub async fn preview_handler(Json(form): Json<FormState>) -> String {
    preview_form(&form)
}

pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { ok: true })
}
