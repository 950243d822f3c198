// ============================
// crates/backend-lib/src/lib.rs
// ============================
//! Core functionality for the Mergington activities server.

pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod metrics;
pub mod roster;
pub mod router;

use crate::auth::{AuthService, DefaultAuth, FlatFileTeachers, SessionManager, TeacherDirectory};
use crate::config::Settings;
use crate::error::AppError;
use crate::roster::{seed, Roster};
use std::sync::Arc;

pub use crate::router::create_router;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Authentication service
    pub auth: Arc<dyn AuthService>,
    /// Activity roster
    pub roster: Arc<Roster>,
    /// Configuration settings
    pub settings: Arc<Settings>,
}

impl AppState {
    /// Build state from settings: seed the roster and point the auth
    /// service at the configured teacher credential file
    pub fn new(settings: &Settings) -> Result<Self, AppError> {
        let roster = match &settings.roster.seed_file {
            Some(path) => Roster::new(seed::load_seed_file(path)?),
            None => Roster::default(),
        };
        let teachers = Arc::new(FlatFileTeachers::new(&settings.auth.teachers_file));

        Ok(Self::with_parts(roster, teachers, settings.clone()))
    }

    /// Build state from explicit parts
    pub fn with_parts(
        roster: Roster,
        teachers: Arc<dyn TeacherDirectory>,
        settings: Settings,
    ) -> Self {
        let auth = Arc::new(DefaultAuth::new(SessionManager::new(), teachers));

        Self {
            auth,
            roster: Arc::new(roster),
            settings: Arc::new(settings),
        }
    }
}
