//! Interactive session loop
//!
//! Reads one line at a time, feeds slash lines to the dispatcher, and
//! interprets the returned [`CommandResult`]. Free text goes to the advisor
//! agent. The loop awaits each dispatch before reading the next line, which
//! is the only ordering guarantee dispatch itself does not provide.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use colored::Colorize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use moneta_core::command::{
    AgentKind, CommandAction, CommandResult, DirectAction, SessionSummary,
};
use moneta_core::error::{ShellError, ShellResult};
use moneta_core::traits::shell::{AgentRouter, SessionStore};

use crate::config::{CliConfig, UiConfig};
use crate::display::Display;
use crate::menu::{MenuError, MenuItem, MenuOptions, SelectMenu};
use crate::shell::dispatcher::Dispatcher;
use crate::shell::handlers;
use crate::shell::registry::SlashRegistry;

/// What the loop does after handling one line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopFlow {
    Continue,
    Quit,
}

/// Interactive shell orchestrator
pub struct ShellSession {
    registry: Arc<SlashRegistry>,
    dispatcher: Dispatcher,
    agents: Arc<dyn AgentRouter>,
    store: Arc<dyn SessionStore>,
    ui: UiConfig,
    model: String,
    next_run: AtomicU64,
}

impl ShellSession {
    pub fn new(
        agents: Arc<dyn AgentRouter>,
        store: Arc<dyn SessionStore>,
        config: &CliConfig,
    ) -> Self {
        let registry = Arc::new(handlers::builtin_registry());
        let dispatcher = Dispatcher::new(Arc::clone(&registry));
        Self {
            registry,
            dispatcher,
            agents,
            store,
            ui: config.ui.clone(),
            model: config.agent.model.clone(),
            next_run: AtomicU64::new(1),
        }
    }

    /// Run the read loop until exit or end of input
    pub async fn run(&self) -> Result<()> {
        Display::banner();

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            print!("{} ", "mon ❯".bright_blue().bold());
            flush_stdout();

            let Some(line) = lines.next_line().await? else {
                break;
            };
            match self.handle_line(&line).await? {
                LoopFlow::Continue => continue,
                LoopFlow::Quit => break,
            }
        }

        Display::goodbye();
        Ok(())
    }

    /// Handle one line of input
    ///
    /// Lookup misses are recovered here with an `Unknown command` display;
    /// handler faults propagate to the caller untouched.
    pub async fn handle_line(&self, line: &str) -> ShellResult<LoopFlow> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(LoopFlow::Continue);
        }

        if trimmed.starts_with('/') {
            match self.dispatcher.dispatch(trimmed).await {
                Ok(result) => self.apply(result).await,
                Err(ShellError::UnknownCommand(name)) => {
                    Display::unknown_command(&name);
                    Ok(LoopFlow::Continue)
                }
                Err(fault) => Err(fault),
            }
        } else {
            self.route_to_agent(AgentKind::Advisor, trimmed).await?;
            Ok(LoopFlow::Continue)
        }
    }

    async fn apply(&self, result: CommandResult) -> ShellResult<LoopFlow> {
        let flow = if result.continue_loop {
            LoopFlow::Continue
        } else {
            LoopFlow::Quit
        };

        match result.action {
            CommandAction::Exit => {}
            CommandAction::None { message } => Display::advisory(&message),
            CommandAction::Agent { kind, prompt } => {
                self.route_to_agent(kind, &prompt).await?;
            }
            CommandAction::Direct { action } => self.run_direct(action).await?,
        }

        Ok(flow)
    }

    async fn run_direct(&self, action: DirectAction) -> ShellResult<()> {
        match action {
            DirectAction::Help => {
                let unique = self.registry.list_unique();
                let descriptors: Vec<_> = unique.iter().map(|c| &c.descriptor).collect();
                Display::help(&descriptors);
            }
            DirectAction::Status => {
                let session_count = self.store.list().await?.len();
                Display::status(self.agents.is_available(), &self.model, session_count);
            }
            DirectAction::Clear => {
                Display::clear_screen().map_err(|e| ShellError::Internal(e.to_string()))?;
            }
            DirectAction::Sessions => self.pick_session().await?,
            DirectAction::Resume { id } => self.resume_session(&id).await,
        }
        Ok(())
    }

    /// `/sessions`: choose one interactively, then resume it
    async fn pick_session(&self) -> ShellResult<()> {
        let sessions = self.store.list().await?;
        if sessions.is_empty() {
            Display::info("No sessions recorded yet");
            return Ok(());
        }

        let items = sessions
            .iter()
            .map(|s| {
                MenuItem::new(&s.id, &s.title)
                    .description(s.started_at.format("%H:%M:%S").to_string())
            })
            .collect();
        let options = MenuOptions::new(items)
            .title("Resume a session")
            .border(self.ui.border)
            .max_visible(self.ui.max_visible);

        match SelectMenu::new(options).run().await {
            Ok(result) => {
                if let Some(id) = result.key {
                    self.resume_session(&id).await;
                }
            }
            // no terminal to run the menu on; fall back to a plain listing
            Err(MenuError::NotInteractive) => Display::sessions_table(&sessions),
            Err(err) => Display::error(&err.to_string()),
        }
        Ok(())
    }

    async fn resume_session(&self, id: &str) {
        match self.store.resume(id).await {
            Ok(session) => Display::info(&format!("Resumed {} ({})", session.id, session.title)),
            Err(err) => Display::error(&err.to_string()),
        }
    }

    /// Record a session and hand the prompt to the agent subsystem
    async fn route_to_agent(&self, kind: AgentKind, prompt: &str) -> ShellResult<()> {
        let seq = self.next_run.fetch_add(1, Ordering::SeqCst);
        let session = SessionSummary {
            id: format!("run-{seq:04}"),
            title: title_from(prompt),
            started_at: Utc::now(),
        };
        debug!(id = %session.id, kind = %kind, "routing prompt to agent");
        self.store.record(session).await?;

        match self.agents.invoke(kind, prompt).await {
            Ok(reply) => Display::agent_reply(kind.as_str(), &reply),
            // offline agents are an environment condition, not a shell fault
            Err(err) => Display::error(&err.to_string()),
        }
        Ok(())
    }
}

/// Short session title from the first words of a prompt
fn title_from(prompt: &str) -> String {
    const MAX: usize = 48;
    if prompt.chars().count() <= MAX {
        prompt.to_string()
    } else {
        let cut: String = prompt.chars().take(MAX).collect();
        format!("{}…", cut.trim_end())
    }
}

fn flush_stdout() {
    use std::io::Write;
    if let Err(err) = std::io::stdout().flush() {
        tracing::debug!("failed to flush stdout: {err}");
    }
}
