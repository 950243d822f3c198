// ============================
// crates/backend-lib/src/auth/mod.rs
// ============================
//! Authentication module.
pub mod credentials;
mod service;
mod service_impl;
pub mod session;
pub mod token_generator;

pub use credentials::{FlatFileTeachers, TeacherDirectory, Teachers};
pub use service::AuthService;
pub use service_impl::DefaultAuth;
pub use session::{Session, SessionManager};
