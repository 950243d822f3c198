// ==========================
// crates/backend-lib/tests/api.rs
// ==========================
//! End-to-end tests through the HTTP router.
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use backend_lib::{config::Settings, create_router, AppState};
use mergington_common::{ActivityMap, ErrorBody, LoginResponse, MessageResponse, SessionStatus};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

const TEACHER: &str = "daniel@mergington.edu";
const PASSWORD: &str = "chess4ever";

/// Router over a fresh roster, with a credential file and a static
/// directory in a temp dir. Keep the `TempDir` alive for the test.
fn setup() -> (Router, TempDir) {
    let temp_dir = TempDir::new().unwrap();

    let teachers_file = temp_dir.path().join("teachers.json");
    std::fs::write(
        &teachers_file,
        format!(r#"{{"teachers": {{"{TEACHER}": "{PASSWORD}"}}}}"#),
    )
    .unwrap();

    let static_dir = temp_dir.path().join("static");
    std::fs::create_dir_all(&static_dir).unwrap();
    std::fs::write(static_dir.join("index.html"), "<h1>Mergington</h1>").unwrap();

    let mut settings = Settings::default();
    settings.auth.teachers_file = teachers_file;
    settings.server.static_dir = static_dir;

    let state = Arc::new(AppState::new(&settings).unwrap());
    (create_router(state), temp_dir)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<serde_json::Value>) -> axum::response::Response {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        },
        None => Body::empty(),
    };
    app.clone().oneshot(builder.body(body).unwrap()).await.unwrap()
}

async fn json<T: DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn login(app: &Router) -> String {
    let response = send(
        app,
        Method::POST,
        "/login",
        Some(serde_json::json!({"email": TEACHER, "password": PASSWORD})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: LoginResponse = json(response).await;
    body.session_token
}

async fn chess_participants(app: &Router) -> Vec<String> {
    let response = send(app, Method::GET, "/activities", None).await;
    let activities: ActivityMap = json(response).await;
    activities["Chess Club"].participants.clone()
}

#[tokio::test]
async fn test_list_activities() {
    let (app, _temp_dir) = setup();

    let response = send(&app, Method::GET, "/activities", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let activities: ActivityMap = json(response).await;
    assert_eq!(activities.len(), 9);
    assert_eq!(activities.get_index(0).unwrap().0, "Chess Club");
    assert_eq!(activities["Chess Club"].max_participants, 12);
}

#[tokio::test]
async fn test_login_verify_logout_flow() {
    let (app, _temp_dir) = setup();

    let response = send(
        &app,
        Method::POST,
        "/login",
        Some(serde_json::json!({"email": TEACHER, "password": PASSWORD})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: LoginResponse = json(response).await;
    assert_eq!(body.message, "Login successful");
    assert_eq!(body.email, TEACHER);
    let token = body.session_token;

    let response = send(&app, Method::GET, &format!("/verify_session?session_token={token}"), None).await;
    let status: SessionStatus = json(response).await;
    assert_eq!(status, SessionStatus::active(TEACHER.to_string()));

    let response = send(&app, Method::POST, &format!("/logout?session_token={token}"), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: MessageResponse = json(response).await;
    assert_eq!(body.message, "Logout successful");

    let response = send(&app, Method::GET, &format!("/verify_session?session_token={token}"), None).await;
    let status: SessionStatus = json(response).await;
    assert_eq!(status, SessionStatus::invalid());
}

#[tokio::test]
async fn test_login_rejected() {
    let (app, _temp_dir) = setup();

    for (email, password) in [(TEACHER, "nope"), ("nobody@mergington.edu", PASSWORD)] {
        let response = send(
            &app,
            Method::POST,
            "/login",
            Some(serde_json::json!({"email": email, "password": password})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body: ErrorBody = json(response).await;
        assert_eq!(body.detail, "Invalid credentials");
    }
}

#[tokio::test]
async fn test_credential_file_changes_apply_without_restart() {
    let temp_dir = TempDir::new().unwrap();
    let teachers_file = temp_dir.path().join("teachers.json");

    let mut settings = Settings::default();
    settings.auth.teachers_file = teachers_file.clone();
    let app = create_router(Arc::new(AppState::new(&settings).unwrap()));
    let credentials = Some(serde_json::json!({"email": TEACHER, "password": PASSWORD}));

    // no file yet: no teachers
    let response = send(&app, Method::POST, "/login", credentials.clone()).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    std::fs::write(
        &teachers_file,
        format!(r#"{{"teachers": {{"{TEACHER}": "{PASSWORD}"}}}}"#),
    )
    .unwrap();
    let response = send(&app, Method::POST, "/login", credentials.clone()).await;
    assert_eq!(response.status(), StatusCode::OK);

    std::fs::write(&teachers_file, "not json at all").unwrap();
    let response = send(&app, Method::POST, "/login", credentials).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_unknown_token_is_ok() {
    let (app, _temp_dir) = setup();

    let response = send(&app, Method::POST, "/logout?session_token=never-issued", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(&app, Method::POST, "/logout", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(&app, Method::GET, "/verify_session", None).await;
    let status: SessionStatus = json(response).await;
    assert!(!status.valid);
}

#[tokio::test]
async fn test_chess_club_signup_requires_session() {
    let (app, _temp_dir) = setup();
    let uri = "/activities/Chess%20Club/signup?email=new%40mergington.edu";

    let response = send(&app, Method::POST, uri, None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: ErrorBody = json(response).await;
    assert_eq!(
        body.detail,
        "Authentication required. Only teachers can register students."
    );
    assert_eq!(
        chess_participants(&app).await,
        vec!["michael@mergington.edu", "daniel@mergington.edu"]
    );

    let token = login(&app).await;
    let response = send(&app, Method::POST, &format!("{uri}&session_token={token}"), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: MessageResponse = json(response).await;
    assert_eq!(body.message, "Signed up new@mergington.edu for Chess Club");

    assert_eq!(
        chess_participants(&app).await,
        vec![
            "michael@mergington.edu",
            "daniel@mergington.edu",
            "new@mergington.edu"
        ]
    );
}

#[tokio::test]
async fn test_duplicate_signup_and_double_unregister() {
    let (app, _temp_dir) = setup();
    let token = login(&app).await;
    let signup = format!("/activities/Chess%20Club/signup?email=new%40mergington.edu&session_token={token}");
    let unregister = format!("/activities/Chess%20Club/unregister?email=new%40mergington.edu&session_token={token}");

    assert_eq!(send(&app, Method::POST, &signup, None).await.status(), StatusCode::OK);

    let response = send(&app, Method::POST, &signup, None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: ErrorBody = json(response).await;
    assert_eq!(body.detail, "Student is already signed up");
    assert_eq!(chess_participants(&app).await.len(), 3);

    let response = send(&app, Method::DELETE, &unregister, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: MessageResponse = json(response).await;
    assert_eq!(body.message, "Unregistered new@mergington.edu from Chess Club");

    let response = send(&app, Method::DELETE, &unregister, None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: ErrorBody = json(response).await;
    assert_eq!(body.detail, "Student is not signed up for this activity");
}

#[tokio::test]
async fn test_unknown_activity() {
    let (app, _temp_dir) = setup();
    let token = login(&app).await;

    let response = send(
        &app,
        Method::POST,
        &format!("/activities/Knitting/signup?email=a%40mergington.edu&session_token={token}"),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: ErrorBody = json(response).await;
    assert_eq!(body.detail, "Activity not found");

    let response = send(
        &app,
        Method::DELETE,
        &format!("/activities/Knitting/unregister?email=a%40mergington.edu&session_token={token}"),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unregister_requires_session() {
    let (app, _temp_dir) = setup();

    let response = send(
        &app,
        Method::DELETE,
        "/activities/Chess%20Club/unregister?email=michael%40mergington.edu&session_token=forged",
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: ErrorBody = json(response).await;
    assert_eq!(
        body.detail,
        "Authentication required. Only teachers can unregister students."
    );
    assert_eq!(chess_participants(&app).await.len(), 2);
}

#[tokio::test]
async fn test_gate_runs_before_activity_lookup() {
    let (app, _temp_dir) = setup();

    let response = send(&app, Method::POST, "/activities/Knitting/signup?email=a%40mergington.edu", None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_bearer_header_token() {
    let (app, _temp_dir) = setup();
    let token = login(&app).await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/activities/Art%20Club/signup?email=lucy%40mergington.edu")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_root_redirects_to_index() {
    let (app, _temp_dir) = setup();

    let response = send(&app, Method::GET, "/", None).await;
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/static/index.html"
    );

    let response = send(&app, Method::GET, "/static/index.html", None).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_signup_without_email_is_json_error() {
    let (app, _temp_dir) = setup();
    let token = login(&app).await;

    let response = send(
        &app,
        Method::POST,
        &format!("/activities/Chess%20Club/signup?session_token={token}"),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/json"
    );
    let body: ErrorBody = json(response).await;
    assert_eq!(body.code, "VAL_001");
    assert!(body.detail.contains("email"), "{}", body.detail);
    assert_eq!(chess_participants(&app).await.len(), 2);
}

#[tokio::test]
async fn test_malformed_login_is_json_error() {
    let (app, _temp_dir) = setup();

    // no content type
    let request = Request::builder()
        .method(Method::POST)
        .uri("/login")
        .body(Body::from(format!(r#"{{"email": "{TEACHER}", "password": "{PASSWORD}"}}"#)))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: ErrorBody = json(response).await;
    assert_eq!(body.code, "VAL_001");

    // missing password
    let response = send(&app, Method::POST, "/login", Some(serde_json::json!({"email": TEACHER}))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: ErrorBody = json(response).await;
    assert_eq!(body.code, "VAL_001");
}

#[tokio::test]
async fn test_signup_past_capacity_through_router() {
    let (_, temp_dir) = setup();
    let seed_file = temp_dir.path().join("seed.json");
    std::fs::write(
        &seed_file,
        r#"{"Robotics": {"description": "Build robots", "schedule": "Mondays", "max_participants": 1, "participants": ["a@mergington.edu"]}}"#,
    )
    .unwrap();

    let mut settings = Settings::default();
    settings.auth.teachers_file = temp_dir.path().join("teachers.json");
    settings.roster.seed_file = Some(seed_file);
    let app = create_router(Arc::new(AppState::new(&settings).unwrap()));
    let token = login(&app).await;

    let response = send(
        &app,
        Method::POST,
        &format!("/activities/Robotics/signup?email=b%40mergington.edu&session_token={token}"),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(&app, Method::GET, "/activities", None).await;
    let activities: ActivityMap = json(response).await;
    let robotics = &activities["Robotics"];
    assert_eq!(robotics.participants, vec!["a@mergington.edu", "b@mergington.edu"]);
    assert_eq!(robotics.spots_left(), 0);
    assert!(robotics.is_over_capacity());
}
