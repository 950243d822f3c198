// ============================
// crates/backend-lib/src/handlers/auth.rs
// ============================
//! Teacher login, logout and session checks.
use crate::{
    error::AppError,
    extract::{AppJson, SessionToken},
    AppState,
};
use axum::{extract::State, Json};
use mergington_common::{LoginRequest, LoginResponse, MessageResponse, SessionStatus};
use std::sync::Arc;

/// `POST /login`
pub async fn login(
    State(state): State<Arc<AppState>>,
    AppJson(request): AppJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let session_token = state.auth.login(&request.email, &request.password).await?;

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        session_token,
        email: request.email,
    }))
}

/// `POST /logout`; succeeds whether or not the token was live
pub async fn logout(
    State(state): State<Arc<AppState>>,
    token: SessionToken,
) -> Json<MessageResponse> {
    state.auth.logout(token.as_deref()).await;
    Json(MessageResponse::new("Logout successful"))
}

/// `GET /verify_session`
pub async fn verify_session(
    State(state): State<Arc<AppState>>,
    token: SessionToken,
) -> Json<SessionStatus> {
    Json(state.auth.verify(token.as_deref()).await)
}
