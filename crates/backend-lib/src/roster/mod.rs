// ============================
// crates/backend-lib/src/roster/mod.rs
// ============================
//! In-memory activity roster.
//!
//! Every signup and unregister runs its membership check and mutation
//! under one write lock, so concurrent requests cannot lose updates or
//! append the same email twice.
pub mod seed;

use crate::error::AppError;
use crate::metrics::{ROSTER_OVER_CAPACITY, ROSTER_SIGNUP, ROSTER_UNREGISTER};
use mergington_common::{Activity, ActivityMap};
use metrics::counter;
use tokio::sync::RwLock;
use tracing::{info, warn};

const ACTIVITY_NOT_FOUND: &str = "Activity not found";
const ALREADY_SIGNED_UP: &str = "Student is already signed up";
const NOT_SIGNED_UP: &str = "Student is not signed up for this activity";

#[derive(Debug)]
pub struct Roster {
    activities: RwLock<ActivityMap>,
}

impl Roster {
    pub fn new(activities: ActivityMap) -> Self {
        Self {
            activities: RwLock::new(activities),
        }
    }

    /// Snapshot of every activity, in seed order
    pub async fn list(&self) -> ActivityMap {
        self.activities.read().await.clone()
    }

    pub async fn get(&self, name: &str) -> Option<Activity> {
        self.activities.read().await.get(name).cloned()
    }

    /// Append `email` to the activity's participants.
    /// Capacity is reported but not enforced.
    pub async fn signup(&self, name: &str, email: &str) -> Result<(), AppError> {
        let mut activities = self.activities.write().await;
        let activity = activities
            .get_mut(name)
            .ok_or_else(|| AppError::NotFound(ACTIVITY_NOT_FOUND.to_string()))?;

        if activity.has_participant(email) {
            return Err(AppError::Conflict(ALREADY_SIGNED_UP.to_string()));
        }

        activity.participants.push(email.to_string());
        counter!(ROSTER_SIGNUP).increment(1);

        if activity.is_over_capacity() {
            counter!(ROSTER_OVER_CAPACITY).increment(1);
            warn!(
                activity = name,
                enrolled = activity.participants.len(),
                capacity = activity.max_participants,
                "activity is over capacity"
            );
        }
        info!(activity = name, %email, "student signed up");
        Ok(())
    }

    /// Remove `email` from the activity, keeping everyone else's order
    pub async fn unregister(&self, name: &str, email: &str) -> Result<(), AppError> {
        let mut activities = self.activities.write().await;
        let activity = activities
            .get_mut(name)
            .ok_or_else(|| AppError::NotFound(ACTIVITY_NOT_FOUND.to_string()))?;

        let position = activity
            .participants
            .iter()
            .position(|p| p == email)
            .ok_or_else(|| AppError::Conflict(NOT_SIGNED_UP.to_string()))?;

        activity.participants.remove(position);
        counter!(ROSTER_UNREGISTER).increment(1);
        info!(activity = name, %email, "student unregistered");
        Ok(())
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self::new(seed::default_activities())
    }
}
