// ============================
// crates/backend-lib/src/auth/credentials.rs
// ============================
//! Teacher credential lookup with a flat-file implementation.
//!
//! The file is read on every call so edits apply to the next login
//! without a restart. A missing or unreadable file means no teachers.
use async_trait::async_trait;
use serde::Deserialize;
use std::{
    collections::HashMap,
    io::ErrorKind,
    path::{Path, PathBuf},
};
use tokio::fs as tokio_fs;
use tracing::{debug, warn};

/// Teacher email -> plaintext password
pub type Teachers = HashMap<String, String>;

/// Trait for teacher credential sources
#[async_trait]
pub trait TeacherDirectory: Send + Sync {
    /// Current credential mapping; never fails, problems yield an empty map
    async fn load_teachers(&self) -> Teachers;
}

#[derive(Deserialize)]
struct TeachersFile {
    #[serde(default)]
    teachers: Teachers,
}

/// Reads `{"teachers": {"<email>": "<password>"}}` from disk
#[derive(Debug, Clone)]
pub struct FlatFileTeachers {
    path: PathBuf,
}

impl FlatFileTeachers {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl TeacherDirectory for FlatFileTeachers {
    async fn load_teachers(&self) -> Teachers {
        let content = match tokio_fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no teacher credential file, no teachers configured");
                return Teachers::new();
            },
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "cannot read teacher credential file");
                return Teachers::new();
            },
        };

        match serde_json::from_str::<TeachersFile>(&content) {
            Ok(file) => {
                debug!(path = %self.path.display(), count = file.teachers.len(), "loaded teacher credentials");
                file.teachers
            },
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "malformed teacher credential file ignored");
                Teachers::new()
            },
        }
    }
}
