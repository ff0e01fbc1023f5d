//! Core types and traits for the moneta terminal shell
//!
//! This crate defines the backend-agnostic contracts the CLI builds on:
//!
//! - **Command data model** (`command`): descriptors, dispatch results, and
//!   the action vocabulary the outer loop interprets
//! - **Error taxonomy** (`error`): `ShellError` and `ShellResult`
//! - **Traits** (`traits`): generic registry contracts plus the collaborator
//!   seams (command handlers, agent routing, session storage)
//!
//! ## Design Principles
//!
//! **Dependency Inversion**: core defines interfaces, implementations live in
//! the CLI crate. **Interface Segregation**: one trait per capability, each
//! with a single obvious method surface.

pub mod command;
pub mod error;
pub mod traits;

pub use command::{
    AgentKind, CommandAction, CommandDescriptor, CommandResult, DirectAction, SessionSummary,
};
pub use error::{ShellError, ShellResult};
pub use traits::registry::{Registry, RegistryBuilder};
pub use traits::shell::{AgentRouter, CommandHandler, SessionStore};
