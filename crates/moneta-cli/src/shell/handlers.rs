//! Built-in command handlers
//!
//! Each handler is a pure mapping from an argument string to a
//! [`CommandResult`]; effects happen in the outer loop when it interprets
//! the returned action. Missing required arguments come back as `Usage:`
//! advisories, per the local-recovery policy.

use std::sync::Arc;

use async_trait::async_trait;

use moneta_core::command::{AgentKind, CommandDescriptor, CommandResult, DirectAction};
use moneta_core::error::ShellResult;
use moneta_core::traits::shell::CommandHandler;
use moneta_core::traits::registry::RegistryBuilder;

use crate::shell::registry::{SlashRegistry, SlashRegistryBuilder};

/// Show command help
pub struct HelpHandler;

#[async_trait]
impl CommandHandler for HelpHandler {
    async fn execute(&self, _args: &str) -> ShellResult<CommandResult> {
        Ok(CommandResult::direct(DirectAction::Help))
    }
}

/// End the session
pub struct QuitHandler;

#[async_trait]
impl CommandHandler for QuitHandler {
    async fn execute(&self, _args: &str) -> ShellResult<CommandResult> {
        Ok(CommandResult::exit())
    }
}

/// Clear the screen
pub struct ClearHandler;

#[async_trait]
impl CommandHandler for ClearHandler {
    async fn execute(&self, _args: &str) -> ShellResult<CommandResult> {
        Ok(CommandResult::direct(DirectAction::Clear))
    }
}

/// Show session status
pub struct StatusHandler;

#[async_trait]
impl CommandHandler for StatusHandler {
    async fn execute(&self, _args: &str) -> ShellResult<CommandResult> {
        Ok(CommandResult::direct(DirectAction::Status))
    }
}

/// List stored sessions
pub struct SessionsHandler;

#[async_trait]
impl CommandHandler for SessionsHandler {
    async fn execute(&self, _args: &str) -> ShellResult<CommandResult> {
        Ok(CommandResult::direct(DirectAction::Sessions))
    }
}

/// Resume a stored session by id
pub struct ResumeHandler;

#[async_trait]
impl CommandHandler for ResumeHandler {
    async fn execute(&self, args: &str) -> ShellResult<CommandResult> {
        if args.is_empty() {
            return Ok(CommandResult::usage("/resume <session-id>"));
        }
        Ok(CommandResult::direct(DirectAction::Resume {
            id: args.to_string(),
        }))
    }
}

/// Route a strategy brief to the strategy-builder agent
pub struct StrategyHandler;

#[async_trait]
impl CommandHandler for StrategyHandler {
    async fn execute(&self, args: &str) -> ShellResult<CommandResult> {
        if args.is_empty() {
            return Ok(CommandResult::usage("/strategy <what to build>"));
        }
        Ok(CommandResult::agent(AgentKind::Strategy, args))
    }
}

/// Route a backtest run to the analysis agent
pub struct AnalyzeHandler;

#[async_trait]
impl CommandHandler for AnalyzeHandler {
    async fn execute(&self, args: &str) -> ShellResult<CommandResult> {
        if args.is_empty() {
            return Ok(CommandResult::usage("/analyze <run-id>"));
        }
        Ok(CommandResult::agent(
            AgentKind::Analysis,
            format!("Analyze backtest run {args}"),
        ))
    }
}

/// Build the registry of built-in commands
///
/// Called once at startup; the result is immutable afterwards.
pub fn builtin_registry() -> SlashRegistry {
    SlashRegistryBuilder::default()
        .command(
            CommandDescriptor::new("help", "Show available commands").aliases(["h", "?"]),
            Arc::new(HelpHandler),
        )
        .command(
            CommandDescriptor::new("quit", "End the session").aliases(["exit", "q"]),
            Arc::new(QuitHandler),
        )
        .command(
            CommandDescriptor::new("clear", "Clear the screen"),
            Arc::new(ClearHandler),
        )
        .command(
            CommandDescriptor::new("status", "Show copilot status"),
            Arc::new(StatusHandler),
        )
        .command(
            CommandDescriptor::new("sessions", "List sessions started this run"),
            Arc::new(SessionsHandler),
        )
        .command(
            CommandDescriptor::new("resume", "Resume a session by id").hint("<session-id>"),
            Arc::new(ResumeHandler),
        )
        .command(
            CommandDescriptor::new("strategy", "Draft a trading strategy")
                .hint("<what to build>"),
            Arc::new(StrategyHandler),
        )
        .command(
            CommandDescriptor::new("analyze", "Analyze a backtest run").hint("<run-id>"),
            Arc::new(AnalyzeHandler),
        )
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use moneta_core::command::CommandAction;

    #[tokio::test]
    async fn test_help_maps_to_direct_help() {
        let result = HelpHandler.execute("").await.unwrap();
        assert_eq!(
            result.action,
            CommandAction::Direct {
                action: DirectAction::Help
            }
        );
        assert!(result.continue_loop);
    }

    #[tokio::test]
    async fn test_quit_stops_the_loop() {
        let result = QuitHandler.execute("").await.unwrap();
        assert!(!result.continue_loop);
    }

    #[tokio::test]
    async fn test_resume_requires_an_id() {
        let result = ResumeHandler.execute("").await.unwrap();
        match result.action {
            CommandAction::None { message } => assert!(message.starts_with("Usage:")),
            other => panic!("expected advisory action, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_resume_carries_the_id() {
        let result = ResumeHandler.execute("run-42").await.unwrap();
        assert_eq!(
            result.action,
            CommandAction::Direct {
                action: DirectAction::Resume {
                    id: "run-42".into()
                }
            }
        );
    }

    #[tokio::test]
    async fn test_strategy_routes_the_brief_verbatim() {
        let result = StrategyHandler
            .execute("Build a momentum strategy")
            .await
            .unwrap();
        match result.action {
            CommandAction::Agent { kind, prompt } => {
                assert_eq!(kind, AgentKind::Strategy);
                assert_eq!(prompt, "Build a momentum strategy");
            }
            other => panic!("expected agent action, got {other:?}"),
        }
    }

    #[test]
    fn test_builtin_registry_has_every_command_once() {
        let registry = builtin_registry();
        let names: Vec<_> = registry
            .list_unique()
            .iter()
            .map(|c| c.descriptor.name.clone())
            .collect();
        assert_eq!(
            names,
            vec![
                "help", "quit", "clear", "status", "sessions", "resume", "strategy", "analyze"
            ]
        );
    }
}
