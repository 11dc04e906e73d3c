use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::NaiveDate;
use tower::ServiceExt;

use therapist_dashboard::db;
use therapist_dashboard::handlers;
use therapist_dashboard::models::{Appointment, DraftField};
use therapist_dashboard::services::backend::http::HttpBackend;
use therapist_dashboard::services::dashboard::Dashboard;
use therapist_dashboard::state::AppState;

// ── Helpers ──

fn test_state() -> Arc<AppState> {
    let conn = db::init_db(":memory:").unwrap();
    Arc::new(AppState {
        db: Arc::new(Mutex::new(conn)),
    })
}

fn test_app(state: Arc<AppState>) -> Router {
    handlers::router(state)
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn seed(state: &AppState, records: &[(&str, &str, &str)]) {
    let db = state.db.lock().unwrap();
    for (name, d, time) in records {
        db::queries::insert_appointment(&db, &Appointment::new(*name, date(d), *time)).unwrap();
    }
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let res = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = res.status();
    let body = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null))
}

async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
    let res = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = res.status();
    let body = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null))
}

fn names(json: &serde_json::Value) -> Vec<String> {
    json.as_array()
        .unwrap()
        .iter()
        .map(|a| a["name"].as_str().unwrap().to_string())
        .collect()
}

// ── Backend API ──

#[tokio::test]
async fn test_health() {
    let (status, json) = get_json(test_app(test_state()), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_add_then_list_by_date() {
    let state = test_state();

    let (status, json) = post_json(
        test_app(state.clone()),
        "/api/appointments/add",
        serde_json::json!({
            "name": "Jane",
            "date": "2024-03-15",
            "time": "7:30 PM",
            "description": "intake",
            "email": "jane@example.com"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "success");
    assert_eq!(json["data"]["name"], "Jane");

    let (status, json) = get_json(test_app(state.clone()), "/api/appointments?date=2024-03-15").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&json), vec!["Jane"]);
    assert_eq!(json[0]["description"], "intake");
    assert_eq!(json[0]["date"], "2024-03-15");

    let (_, json) = get_json(test_app(state), "/api/appointments?date=2024-03-16").await;
    assert!(json.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_add_rejects_missing_name() {
    let state = test_state();
    let (status, _) = post_json(
        test_app(state.clone()),
        "/api/appointments/add",
        serde_json::json!({ "date": "2024-03-15", "time": "7:30 PM" }),
    )
    .await;
    assert!(status.is_client_error());

    let (_, json) = get_json(test_app(state), "/api/appointments").await;
    assert!(json.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_list_all_without_date() {
    let state = test_state();
    seed(
        &state,
        &[
            ("Jane", "2024-03-15", "7:30 PM"),
            ("Omar", "2024-04-01", "6:30 PM"),
        ],
    );
    let (_, json) = get_json(test_app(state), "/api/appointments").await;
    assert_eq!(names(&json), vec!["Jane", "Omar"]);
}

#[tokio::test]
async fn test_list_bad_date() {
    let (status, json) = get_json(test_app(test_state()), "/api/appointments?date=03/15/2024").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("invalid date"));
}

#[tokio::test]
async fn test_month_listing() {
    let state = test_state();
    seed(
        &state,
        &[
            ("Jane", "2024-03-15", "7:30 PM"),
            ("Omar", "2024-03-20", "6:30 PM"),
            ("Lee", "2024-04-01", "8:30 PM"),
            ("Ana", "2023-03-10", "9:30 PM"),
        ],
    );

    let (status, json) = get_json(test_app(state.clone()), "/api/appointments/month?year=2024&month=03").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&json), vec!["Jane", "Omar"]);

    // unpadded month is accepted
    let (_, json) = get_json(test_app(state.clone()), "/api/appointments/month?year=2024&month=4").await;
    assert_eq!(names(&json), vec!["Lee"]);

    let (status, _) = get_json(test_app(state.clone()), "/api/appointments/month?year=2024&month=13").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get_json(test_app(state), "/api/appointments/month?month=03").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_first_matching_record() {
    let state = test_state();
    seed(
        &state,
        &[
            ("Jane", "2024-03-15", "7:30 PM"),
            ("Jane", "2024-03-16", "7:30 PM"),
        ],
    );

    let (status, json) = post_json(
        test_app(state.clone()),
        "/api/appointments/update",
        serde_json::json!({ "name": "Jane", "date": "2024-03-15", "time": "9:30 PM" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Appointment updated");

    let (_, json) = get_json(test_app(state.clone()), "/api/appointments?date=2024-03-15").await;
    assert_eq!(json[0]["time"], "9:30 PM");
    let (_, json) = get_json(test_app(state), "/api/appointments?date=2024-03-16").await;
    assert_eq!(json[0]["time"], "7:30 PM");
}

#[tokio::test]
async fn test_update_not_found() {
    let state = test_state();
    seed(&state, &[("Jane", "2024-03-15", "7:30 PM")]);

    let (status, json) = post_json(
        test_app(state),
        "/api/appointments/update",
        serde_json::json!({ "name": "Jane", "date": "2024-03-14", "time": "9:30 PM" }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].as_str().unwrap().contains("Appointment not found"));
}

#[tokio::test]
async fn test_reset() {
    let state = test_state();
    seed(
        &state,
        &[
            ("Jane", "2024-03-15", "7:30 PM"),
            ("Omar", "2024-03-20", "6:30 PM"),
        ],
    );

    let res = test_app(state.clone())
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/appointments/reset")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let (_, json) = get_json(test_app(state), "/api/appointments").await;
    assert!(json.as_array().unwrap().is_empty());
}

// ── Dashboard over HTTP ──

async fn spawn_server(state: Arc<AppState>) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, handlers::router(state)).await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn test_dashboard_against_live_backend() {
    let state = test_state();
    seed(
        &state,
        &[
            ("Jane", "2024-03-15", "7:30 PM"),
            ("Omar", "2024-03-20", "6:30 PM"),
            ("Jane", "2024-04-02", "8:30 PM"),
        ],
    );
    let url = spawn_server(state).await;

    let mut dashboard = Dashboard::new(Box::new(HttpBackend::new(url)), date("2024-03-15"));
    dashboard.load().await.unwrap();
    assert_eq!(dashboard.agenda().cards.len(), 1);
    assert_eq!(dashboard.agenda().selected_slot(), Some("7:30 PM"));
    assert_eq!(dashboard.month_grid().marked_days(), vec![15, 20]);

    // slot click moves Jane
    assert!(dashboard.choose_slot("6:30 PM").await.unwrap());
    assert_eq!(dashboard.patients()[0].time, "6:30 PM");

    // add via the form
    dashboard.update_draft(DraftField::Name, "Lee");
    dashboard.update_draft(DraftField::Date, "2024-03-28");
    dashboard.update_draft(DraftField::Time, "9:30 PM");
    dashboard.submit_draft().await.unwrap();
    assert_eq!(dashboard.month_grid().marked_days(), vec![15, 20, 28]);

    // roster dedupes the two Jane records
    dashboard.toggle_roster().await.unwrap();
    let roster: Vec<&str> = dashboard.all_patients().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(roster, vec!["Jane", "Omar", "Lee"]);

    // unknown patient surfaces the backend's 404
    let err = dashboard.reschedule("Nobody", "8:30 PM").await.unwrap_err();
    assert!(err.to_string().contains("404"));

    dashboard.clear_calendar().await.unwrap();
    assert!(dashboard.patients().is_empty());
    dashboard.next_month().await.unwrap();
    assert!(dashboard.month_grid().marked_days().is_empty());
}
