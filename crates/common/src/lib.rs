// ================
// common/src/lib.rs
// ================
//! Common types and structures
//! shared between the Mergington activities server and its clients.
//! This module defines the JSON request and response bodies and the
//! activity record served by `GET /activities`.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Full roster keyed by activity name, in listing order
pub type ActivityMap = IndexMap<String, Activity>;

/// An extracurricular activity and its current participants
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    /// Free-text description
    pub description: String,
    /// Human readable meeting times
    pub schedule: String,
    /// Capacity of the activity (not enforced on signup)
    pub max_participants: u32,
    /// Participant emails in signup order
    pub participants: Vec<String>,
}

impl Activity {
    pub fn new(description: &str, schedule: &str, max_participants: u32, participants: &[&str]) -> Self {
        Self {
            description: description.to_string(),
            schedule: schedule.to_string(),
            max_participants,
            participants: participants.iter().map(|p| (*p).to_string()).collect(),
        }
    }

    /// Whether `email` is on the roster
    pub fn has_participant(&self, email: &str) -> bool {
        self.participants.iter().any(|p| p == email)
    }

    /// Remaining places; zero once the roster is at or past capacity
    pub fn spots_left(&self) -> u32 {
        let taken = u32::try_from(self.participants.len()).unwrap_or(u32::MAX);
        self.max_participants.saturating_sub(taken)
    }

    /// More participants than places, possible since capacity is advisory
    pub fn is_over_capacity(&self) -> bool {
        self.participants.len() > self.max_participants as usize
    }
}

/// Body of `POST /login`
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful `POST /login` reply
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LoginResponse {
    pub message: String,
    pub session_token: String,
    pub email: String,
}

/// Plain acknowledgement used by logout, signup and unregister
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// Reply of `GET /verify_session`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SessionStatus {
    pub valid: bool,
    /// Owner of the session; omitted when the token is not valid
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl SessionStatus {
    pub fn active(email: String) -> Self {
        Self { valid: true, email: Some(email) }
    }

    pub fn invalid() -> Self {
        Self { valid: false, email: None }
    }
}

/// Query string carrying the student email for signup/unregister
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct EmailQuery {
    pub email: String,
}

/// Optional `session_token` query parameter
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct SessionQuery {
    #[serde(default)]
    pub session_token: Option<String>,
}

/// Error body returned for every non-2xx reply
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ErrorBody {
    /// Human readable reason, shown by the front-end
    pub detail: String,
    /// Stable machine readable code
    pub code: String,
}
