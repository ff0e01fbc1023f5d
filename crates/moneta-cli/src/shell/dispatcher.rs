//! Command dispatcher
//!
//! Composes the parser and the registry: one line of input in, the bound
//! handler's [`CommandResult`] out. The dispatcher performs no recovery on
//! handler errors and does not serialize overlapping calls; the outer loop
//! awaits each dispatch before issuing the next.

use std::sync::Arc;

use moneta_core::command::CommandResult;
use moneta_core::error::{ShellError, ShellResult};

use crate::shell::parser::parse;
use crate::shell::registry::SlashRegistry;

pub struct Dispatcher {
    registry: Arc<SlashRegistry>,
}

impl Dispatcher {
    pub fn new(registry: Arc<SlashRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &SlashRegistry {
        &self.registry
    }

    /// Resolve one raw line to a handler and invoke it
    ///
    /// A line that does not resolve to a registered command yields
    /// [`ShellError::UnknownCommand`] — distinct from a handler's own
    /// advisory result. Handler errors pass through unmodified.
    pub async fn dispatch(&self, raw_line: &str) -> ShellResult<CommandResult> {
        let parsed = parse(raw_line);
        if !parsed.is_command {
            let word = parsed
                .args
                .split_whitespace()
                .next()
                .unwrap_or_default()
                .to_string();
            return Err(ShellError::UnknownCommand(word));
        }

        let cmd = self
            .registry
            .lookup(&parsed.command)
            .ok_or_else(|| ShellError::UnknownCommand(parsed.command.clone()))?;

        tracing::debug!(command = %parsed.command, "dispatching slash command");
        cmd.handler.execute(&parsed.args).await
    }
}
