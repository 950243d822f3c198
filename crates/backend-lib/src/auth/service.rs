// =============
// crates/backend-lib/src/auth/service.rs
// =============
//! This module defines the `AuthService` trait, which is used for authentication
use crate::error::AppError;
use async_trait::async_trait;
use mergington_common::SessionStatus;

#[async_trait]
pub trait AuthService: Send + Sync {
    /// Check credentials against the teacher directory and open a session.
    /// Returns the new session token.
    async fn login(&self, email: &str, password: &str) -> Result<String, AppError>;

    /// End a session; unknown or missing tokens are ignored
    async fn logout(&self, token: Option<&str>);

    async fn verify(&self, token: Option<&str>) -> SessionStatus;

    /// Guard for roster mutations; missing or empty tokens never pass
    async fn is_authenticated(&self, token: Option<&str>) -> bool;
}
