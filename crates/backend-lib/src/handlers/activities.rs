// ============================
// crates/backend-lib/src/handlers/activities.rs
// ============================
//! Roster listing and teacher-only roster changes.
use crate::{
    error::AppError,
    extract::{AppPath, AppQuery, SessionToken},
    AppState,
};
use axum::{extract::State, Json};
use mergington_common::{ActivityMap, EmailQuery, MessageResponse};
use std::sync::Arc;

/// `GET /activities`
pub async fn list_activities(State(state): State<Arc<AppState>>) -> Json<ActivityMap> {
    Json(state.roster.list().await)
}

/// `POST /activities/{name}/signup`
pub async fn signup(
    State(state): State<Arc<AppState>>,
    token: SessionToken,
    AppPath(activity_name): AppPath<String>,
    AppQuery(EmailQuery { email }): AppQuery<EmailQuery>,
) -> Result<Json<MessageResponse>, AppError> {
    // the session gate runs before any roster lookup
    if !state.auth.is_authenticated(token.as_deref()).await {
        return Err(AppError::Auth(
            "Authentication required. Only teachers can register students.".to_string(),
        ));
    }

    state.roster.signup(&activity_name, &email).await?;
    Ok(Json(MessageResponse::new(format!(
        "Signed up {email} for {activity_name}"
    ))))
}

/// `DELETE /activities/{name}/unregister`
pub async fn unregister(
    State(state): State<Arc<AppState>>,
    token: SessionToken,
    AppPath(activity_name): AppPath<String>,
    AppQuery(EmailQuery { email }): AppQuery<EmailQuery>,
) -> Result<Json<MessageResponse>, AppError> {
    if !state.auth.is_authenticated(token.as_deref()).await {
        return Err(AppError::Auth(
            "Authentication required. Only teachers can unregister students.".to_string(),
        ));
    }

    state.roster.unregister(&activity_name, &email).await?;
    Ok(Json(MessageResponse::new(format!(
        "Unregistered {email} from {activity_name}"
    ))))
}
