// ============================
// crates/backend-lib/src/auth/session.rs
// ============================
//! Session token table.
//!
//! A token is either absent or bound to the teacher who logged in with it.
//! Sessions never expire; they live until logout or process restart.
use super::token_generator::generate_secure_token;
use crate::metrics::{SESSION_ACTIVE, SESSION_CREATED, SESSION_ENDED};
use metrics::{counter, gauge};
use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, SystemTime},
};
use tokio::sync::RwLock;

/// Session information
#[derive(Debug, Clone)]
pub struct Session {
    /// Teacher the token was issued to
    pub email: String,
    pub created_at: SystemTime,
}

impl Session {
    /// Time since login; zero if the clock has gone backwards
    pub fn age(&self) -> Duration {
        self.created_at.elapsed().unwrap_or_default()
    }
}

/// Session manager for handling authentication tokens
#[derive(Debug, Clone, Default)]
pub struct SessionManager {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
}

impl SessionManager {
    /// Create an empty session table
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a fresh token bound to `email`
    pub async fn create_session(&self, email: String) -> String {
        let token = generate_secure_token();
        let session = Session {
            email,
            created_at: SystemTime::now(),
        };

        let mut sessions = self.sessions.write().await;
        sessions.insert(token.clone(), session);

        counter!(SESSION_CREATED).increment(1);
        gauge!(SESSION_ACTIVE).set(sessions.len() as f64);

        token
    }

    /// Get a session by token
    pub async fn get(&self, token: &str) -> Option<Session> {
        let sessions = self.sessions.read().await;
        sessions.get(token).cloned()
    }

    /// Drop a session, returning it if the token was live
    pub async fn remove(&self, token: &str) -> Option<Session> {
        let mut sessions = self.sessions.write().await;
        let removed = sessions.remove(token);

        if removed.is_some() {
            counter!(SESSION_ENDED).increment(1);
            gauge!(SESSION_ACTIVE).set(sessions.len() as f64);
        }

        removed
    }

    /// Whether `token` names a live session
    pub async fn contains(&self, token: &str) -> bool {
        self.sessions.read().await.contains_key(token)
    }
}
