use crate::auth::{AuthService, SessionManager, TeacherDirectory};
use crate::error::AppError;
use crate::metrics::LOGIN_FAILED;
use async_trait::async_trait;
use mergington_common::SessionStatus;
use metrics::counter;
use std::sync::Arc;
use tracing::info;

const INVALID_CREDENTIALS: &str = "Invalid credentials";

pub struct DefaultAuth {
    sm: SessionManager,
    teachers: Arc<dyn TeacherDirectory>,
}

impl DefaultAuth {
    pub fn new(sm: SessionManager, teachers: Arc<dyn TeacherDirectory>) -> Self {
        Self { sm, teachers }
    }
}

fn present(token: Option<&str>) -> Option<&str> {
    token.filter(|t| !t.is_empty())
}

#[async_trait]
impl AuthService for DefaultAuth {
    async fn login(&self, email: &str, password: &str) -> Result<String, AppError> {
        let teachers = self.teachers.load_teachers().await;

        // unknown email and wrong password are indistinguishable to the caller
        match teachers.get(email) {
            Some(expected) if expected == password => {},
            _ => {
                counter!(LOGIN_FAILED).increment(1);
                info!(%email, "teacher login rejected");
                return Err(AppError::Auth(INVALID_CREDENTIALS.to_string()));
            },
        }

        let token = self.sm.create_session(email.to_string()).await;
        info!(%email, "teacher logged in");
        Ok(token)
    }

    async fn logout(&self, token: Option<&str>) {
        if let Some(token) = present(token) {
            if let Some(session) = self.sm.remove(token).await {
                info!(
                    email = %session.email,
                    session_age_secs = session.age().as_secs(),
                    "teacher logged out"
                );
            }
        }
    }

    async fn verify(&self, token: Option<&str>) -> SessionStatus {
        match present(token) {
            Some(token) => match self.sm.get(token).await {
                Some(session) => SessionStatus::active(session.email),
                None => SessionStatus::invalid(),
            },
            None => SessionStatus::invalid(),
        }
    }

    async fn is_authenticated(&self, token: Option<&str>) -> bool {
        match present(token) {
            Some(token) => self.sm.contains(token).await,
            None => false,
        }
    }
}
