//! Terminal display formatting
//!
//! Colorized output helpers for the shell: banner, help, status, advisory
//! and error lines. Everything here writes to stdout and returns; the one
//! fallible operation is the full-screen clear.

use std::io;

use colored::Colorize;
use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};

use moneta_core::command::{CommandDescriptor, SessionSummary};

/// Display utilities for the interactive shell
pub struct Display;

impl Display {
    /// Welcome banner with the most useful commands
    pub fn banner() {
        println!("\n{}", "📈 moneta".bright_blue().bold());
        println!("{}", "=========".bright_blue());
        println!("Your trading copilot. Type a question, or use a command:");
        println!();
        println!("  {} - Draft a trading strategy", "/strategy <brief>".green());
        println!("  {} - Analyze a backtest run", "/analyze <run-id>".green());
        println!("  {} - List and resume sessions", "/sessions".green());
        println!("  {} - All commands", "/help".green());
        println!();
        println!("{}", "Ctrl+D or /quit to exit".dimmed());
    }

    pub fn goodbye() {
        println!("{}", "👋 Goodbye!".bright_blue());
    }

    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red().bold(), message);
    }

    /// Advisory text with no further routing
    pub fn advisory(message: &str) {
        println!("{} {}", "!".yellow(), message);
    }

    pub fn info(message: &str) {
        println!("{} {}", "●".bright_blue(), message);
    }

    pub fn unknown_command(name: &str) {
        eprintln!(
            "{} Unknown command: /{} {}",
            "✗".red().bold(),
            name,
            "(try /help)".dimmed()
        );
    }

    /// A reply routed back from an agent
    pub fn agent_reply(kind: &str, text: &str) {
        println!("{} {}", format!("[{kind}]").bright_cyan().bold(), text);
    }

    /// Command reference built from the registry's unique descriptors
    pub fn help(descriptors: &[&CommandDescriptor]) {
        println!("{}", "Commands:".bold());
        let usages: Vec<String> = descriptors
            .iter()
            .map(|d| match &d.input_hint {
                Some(hint) => format!("/{} {hint}", d.name),
                None => format!("/{}", d.name),
            })
            .collect();
        let width = usages.iter().map(String::len).max().unwrap_or(0);
        for (descriptor, usage) in descriptors.iter().zip(&usages) {
            let aliases = if descriptor.aliases.is_empty() {
                String::new()
            } else {
                let list: Vec<String> = descriptor
                    .aliases
                    .iter()
                    .map(|a| format!("/{a}"))
                    .collect();
                format!("  (also {})", list.join(", "))
            };
            // pad before styling so escape codes don't skew the column
            println!(
                "  {}  {}{}",
                format!("{usage:width$}").green(),
                descriptor.description,
                aliases.dimmed()
            );
        }
    }

    pub fn status(agent_available: bool, model: &str, session_count: usize) {
        let agent = if agent_available {
            "connected".green().to_string()
        } else {
            "offline".yellow().to_string()
        };
        println!("{}", "Status:".bold());
        println!("  agent:    {agent} ({model})");
        println!("  sessions: {session_count} this run");
    }

    /// Non-interactive fallback listing for `/sessions`
    pub fn sessions_table(sessions: &[SessionSummary]) {
        println!("{}", "Sessions:".bold());
        for session in sessions {
            println!(
                "  {}  {}  {}",
                session.id.bright_white(),
                session.started_at.format("%H:%M:%S").to_string().dimmed(),
                session.title
            );
        }
    }

    pub fn clear_screen() -> io::Result<()> {
        execute!(io::stdout(), Clear(ClearType::All), MoveTo(0, 0))
    }
}
