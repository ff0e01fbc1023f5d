//! In-memory session store
//!
//! Sessions live for the current process only; nothing is written to disk.
//! The store is the `SessionStore` collaborator the shell lists and resumes
//! through.

use std::sync::RwLock;

use async_trait::async_trait;

use moneta_core::command::SessionSummary;
use moneta_core::error::{ShellError, ShellResult};
use moneta_core::traits::shell::SessionStore;

#[derive(Default)]
pub struct MemorySessionStore {
    sessions: RwLock<Vec<SessionSummary>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn record(&self, session: SessionSummary) -> ShellResult<()> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| ShellError::Internal("session store lock poisoned".into()))?;
        sessions.push(session);
        Ok(())
    }

    async fn list(&self) -> ShellResult<Vec<SessionSummary>> {
        let sessions = self
            .sessions
            .read()
            .map_err(|_| ShellError::Internal("session store lock poisoned".into()))?;
        Ok(sessions.clone())
    }

    async fn resume(&self, id: &str) -> ShellResult<SessionSummary> {
        let sessions = self
            .sessions
            .read()
            .map_err(|_| ShellError::Internal("session store lock poisoned".into()))?;
        sessions
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| ShellError::SessionNotFound(id.to_string()))
    }
}
