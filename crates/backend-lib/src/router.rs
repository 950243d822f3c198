// ============================
// crates/backend-lib/src/router.rs
// ============================
//! HTTP routes.
use crate::handlers::{activities, auth};
use crate::AppState;
use axum::{
    response::Redirect,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

/// Landing page of the bundled front-end
pub const INDEX_PAGE: &str = "/static/index.html";

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    let static_dir = state.settings.server.static_dir.clone();

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/verify_session", get(auth::verify_session))
        .route("/activities", get(activities::list_activities))
        .route("/activities/{name}/signup", post(activities::signup))
        .route("/activities/{name}/unregister", delete(activities::unregister))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn root() -> Redirect {
    Redirect::temporary(INDEX_PAGE)
}
