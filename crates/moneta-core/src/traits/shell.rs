//! Collaborator seams for the interactive shell
//!
//! The shell core recognizes syntax and routes; everything with real effects
//! sits behind one of these traits. Handlers must not mutate the registry
//! that dispatched them.

use async_trait::async_trait;

use crate::command::{AgentKind, CommandResult, SessionSummary};
use crate::error::ShellResult;

/// A slash-command implementation
///
/// Handlers are pure with respect to the shell: one argument string in, one
/// [`CommandResult`] out. Missing-argument conditions are recovered locally
/// as `Usage:` advisories, never returned as errors; anything that does come
/// back as `Err` is propagated to the caller unmodified.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    async fn execute(&self, args: &str) -> ShellResult<CommandResult>;
}

/// Routes prompts to the agent-invocation subsystem
#[async_trait]
pub trait AgentRouter: Send + Sync {
    /// Send a prompt to the named agent kind and return its reply text
    async fn invoke(&self, kind: AgentKind, prompt: &str) -> ShellResult<String>;

    /// Whether a backend is configured and reachable
    fn is_available(&self) -> bool;
}

/// Access to copilot sessions started this process run
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Remember a newly started session
    async fn record(&self, session: SessionSummary) -> ShellResult<()>;

    async fn list(&self) -> ShellResult<Vec<SessionSummary>>;

    /// Look up a session by id for resumption
    async fn resume(&self, id: &str) -> ShellResult<SessionSummary>;
}
