//! Command data model
//!
//! A [`CommandDescriptor`] names a registrable action; executing one produces
//! a [`CommandResult`] whose [`CommandAction`] tells the outer loop what to do
//! next. Descriptors are created during startup registration and immutable
//! afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Agent kinds the shell can route prompts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentKind {
    /// Default conversational agent for free-text input
    Advisor,
    /// Strategy-builder agent
    Strategy,
    /// Backtest/run analysis agent
    Analysis,
}

impl AgentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentKind::Advisor => "advisor",
            AgentKind::Strategy => "strategy",
            AgentKind::Analysis => "analysis",
        }
    }
}

impl std::fmt::Display for AgentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Built-in UI behaviors reachable through `CommandAction::Direct`
///
/// The outer loop owns the implementation of each of these; handlers only
/// name them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DirectAction {
    Help,
    Status,
    Clear,
    Sessions,
    Resume { id: String },
}

/// What the caller should do after a command completes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CommandAction {
    /// Route a prompt to the agent subsystem
    Agent { kind: AgentKind, prompt: String },
    /// Trigger a built-in UI behavior
    Direct { action: DirectAction },
    /// End the session
    Exit,
    /// Nothing to route; display the message as advisory text
    None { message: String },
}

/// Outcome of dispatching one command
///
/// Immutable value consumed by the caller. `continue_loop` is false only for
/// session-ending commands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandResult {
    pub continue_loop: bool,
    pub action: CommandAction,
}

impl CommandResult {
    /// Session-ending result
    pub fn exit() -> Self {
        Self {
            continue_loop: false,
            action: CommandAction::Exit,
        }
    }

    /// Advisory result with no further routing
    pub fn none(message: impl Into<String>) -> Self {
        Self {
            continue_loop: true,
            action: CommandAction::None {
                message: message.into(),
            },
        }
    }

    /// Usage hint for a missing required argument
    pub fn usage(usage: impl Into<String>) -> Self {
        Self::none(format!("Usage: {}", usage.into()))
    }

    /// Route a prompt to an agent
    pub fn agent(kind: AgentKind, prompt: impl Into<String>) -> Self {
        Self {
            continue_loop: true,
            action: CommandAction::Agent {
                kind,
                prompt: prompt.into(),
            },
        }
    }

    /// Trigger a built-in UI behavior
    pub fn direct(action: DirectAction) -> Self {
        Self {
            continue_loop: true,
            action: CommandAction::Direct { action },
        }
    }
}

/// A registrable action: canonical name, aliases, and help metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandDescriptor {
    /// Canonical command name, without the leading slash
    pub name: String,
    /// Alternative names resolving to the same command
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    /// One-line description shown in help output
    pub description: String,
    /// Argument hint shown in help output, e.g. `<run-id>`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_hint: Option<String>,
}

impl CommandDescriptor {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
            description: description.into(),
            input_hint: None,
        }
    }

    pub fn aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases = aliases.into_iter().map(Into::into).collect();
        self
    }

    pub fn hint(mut self, hint: impl Into<String>) -> Self {
        self.input_hint = Some(hint.into());
        self
    }
}

/// Summary of one copilot session, as listed by a `SessionStore`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub id: String,
    pub title: String,
    pub started_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_result_stops_loop() {
        let result = CommandResult::exit();
        assert!(!result.continue_loop);
        assert_eq!(result.action, CommandAction::Exit);
    }

    #[test]
    fn test_usage_message_prefix() {
        let result = CommandResult::usage("/analyze <run-id>");
        match result.action {
            CommandAction::None { message } => {
                assert!(message.starts_with("Usage:"));
                assert!(message.contains("/analyze"));
            }
            other => panic!("expected advisory action, got {other:?}"),
        }
        assert!(result.continue_loop);
    }

    #[test]
    fn test_agent_result_carries_prompt() {
        let result = CommandResult::agent(AgentKind::Analysis, "run123");
        match result.action {
            CommandAction::Agent { kind, prompt } => {
                assert_eq!(kind, AgentKind::Analysis);
                assert_eq!(prompt, "run123");
            }
            other => panic!("expected agent action, got {other:?}"),
        }
    }

    #[test]
    fn test_descriptor_builder() {
        let desc = CommandDescriptor::new("help", "Show available commands")
            .aliases(["h", "?"])
            .hint("[command]");
        assert_eq!(desc.name, "help");
        assert_eq!(desc.aliases, vec!["h", "?"]);
        assert_eq!(desc.input_hint.as_deref(), Some("[command]"));
    }

    #[test]
    fn test_direct_action_serialization() {
        let action = DirectAction::Resume {
            id: "run-42".into(),
        };
        let json = serde_json::to_string(&action).unwrap();
        assert!(json.contains("resume"));
        assert!(json.contains("run-42"));
    }
}
