// ==============
// crates/backend-lib/src/metrics.rs

//! Central place for metric keys
pub const SESSION_CREATED: &str = "session.created";
pub const SESSION_ENDED: &str = "session.ended";
pub const SESSION_ACTIVE: &str = "session.active";
pub const LOGIN_FAILED: &str = "auth.login_failed";
pub const ROSTER_SIGNUP: &str = "roster.signup";
pub const ROSTER_UNREGISTER: &str = "roster.unregister";
pub const ROSTER_OVER_CAPACITY: &str = "roster.over_capacity";
