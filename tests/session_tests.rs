use std::sync::Arc;

use orbital_search::data_models::PLACEHOLDER;
use orbital_search::error::SearchError;
use orbital_search::form::{FieldId, FormState};
use orbital_search::render::{EMPTY_STATE, render_results};
use orbital_search::session::SearchSession;
use orbital_search::view::{ResultsView, SEARCHING, Status, ViewModel};

mod common;
use common::*;

fn session_with(api: Arc<FixedApi>) -> SearchSession {
    SearchSession::new(api, ViewModel::default())
}

#[tokio::test]
async fn test_successful_search_renders_plans() {
    let api = Arc::new(FixedApi::ok(200, ONE_PLAN));
    let session = session_with(api.clone());

    let status = session.run_search().await;
    assert_eq!(status, Status::Ok(200));

    let view = session.snapshot().await;
    assert_eq!(view.status().to_string(), "OK (200)");
    let ResultsView::Plans(plans) = view.results() else {
        panic!("expected plans, got {:?}", view.results());
    };
    assert_eq!(plans.len(), 1);
    assert_eq!(plans[0].legs[0].summary(), "LHR → JFK (BA, flight, 480m)");
    assert_eq!(plans[0].price_text(), PLACEHOLDER);
}

#[tokio::test]
async fn test_request_sent_is_trimmed_form() {
    let api = Arc::new(FixedApi::ok(200, "{}"));
    let form = FormState {
        origin: " LHR ".into(),
        destination: "JFK  ".into(),
        depart_after: "2026-11-01T08:00".into(),
        arrive_before: "2026-11-03T08:00".into(),
        max_layovers: "abc".into(),
        optimize_for: "fastest".into(),
    };
    let session = SearchSession::new(api.clone(), ViewModel::new(form));
    session.run_search().await;

    let seen = api.seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].origin, "LHR");
    assert_eq!(seen[0].destination, "JFK");
    assert!(seen[0].max_layovers.is_nan());
}

#[tokio::test]
async fn test_rate_limited_status() {
    let api = Arc::new(FixedApi::ok(429, r#"{"detail":"rate limited"}"#));
    let session = session_with(api);

    let status = session.run_search().await.to_string();
    assert!(status.contains("429"));
    assert!(status.contains("rate limited"));
    assert_eq!(session.snapshot().await.results(), &ResultsView::Cleared);
}

#[tokio::test]
async fn test_missing_plans_key_shows_empty_state() {
    let session = session_with(Arc::new(FixedApi::ok(200, r#"{"something":"else"}"#)));
    session.run_search().await;
    let view = session.snapshot().await;
    assert_eq!(render_results(view.results()), EMPTY_STATE);
}

#[tokio::test]
async fn test_empty_body_shows_empty_state() {
    let session = session_with(Arc::new(FixedApi::ok(200, "")));
    assert_eq!(session.run_search().await, Status::Ok(200));
    assert_eq!(render_results(session.snapshot().await.results()), EMPTY_STATE);
}

#[tokio::test]
async fn test_transport_failure_status() {
    let session = session_with(Arc::new(FixedApi::unreachable("connection refused")));
    let status = session.run_search().await;
    assert_eq!(status.to_string(), "Request failed: connection refused");
    assert_eq!(render_results(session.snapshot().await.results()), "");
}

#[tokio::test]
async fn test_garbage_body_is_request_failure() {
    let session = session_with(Arc::new(FixedApi::ok(200, "not json")));
    let status = session.run_search().await;
    assert!(matches!(status, Status::Failed(SearchError::Transport(_))));
    assert!(status.to_string().starts_with("Request failed: "));
}

#[tokio::test]
async fn test_searching_status_while_in_flight() {
    let api = Arc::new(GatedApi::default());
    let gate = api.gate("LON");
    let session = SearchSession::new(api, ViewModel::default());

    let handle = tokio::spawn({
        let session = session.clone();
        async move { session.run_search().await }
    });

    while session.snapshot().await.generation() < 1 {
        tokio::task::yield_now().await;
    }
    let view = session.snapshot().await;
    assert_eq!(view.status().to_string(), SEARCHING);
    assert_eq!(view.results(), &ResultsView::Cleared);

    gate.send(raw(200, r#"{"plans":[]}"#)).unwrap();
    assert_eq!(handle.await.unwrap(), Status::Ok(200));
}

#[tokio::test]
async fn test_stale_response_does_not_overwrite_newer_search() {
    let api = Arc::new(GatedApi::default());
    let slow = api.gate("LON");
    let fast = api.gate("EDI");
    let session = SearchSession::new(api, ViewModel::default());

    let first = tokio::spawn({
        let session = session.clone();
        async move { session.run_search().await }
    });
    while session.snapshot().await.generation() < 1 {
        tokio::task::yield_now().await;
    }

    session.on_input(FieldId::Origin, "EDI").await;
    let second = tokio::spawn({
        let session = session.clone();
        async move { session.run_search().await }
    });
    while session.snapshot().await.generation() < 2 {
        tokio::task::yield_now().await;
    }

    fast.send(raw(200, r#"{"plans":[{"score": 2}]}"#)).unwrap();
    assert_eq!(second.await.unwrap(), Status::Ok(200));

    slow.send(raw(500, r#"{"detail":"too late"}"#)).unwrap();
    // The first search reports what is on screen, which is still the second's.
    assert_eq!(first.await.unwrap(), Status::Ok(200));

    let view = session.snapshot().await;
    let ResultsView::Plans(plans) = view.results() else {
        panic!("expected plans, got {:?}", view.results());
    };
    assert_eq!(plans[0].score_text(), "2");
    assert!(view.preview().contains(r#""origin": "EDI""#));
}
