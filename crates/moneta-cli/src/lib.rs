//! moneta CLI library
//!
//! The interactive terminal shell for the moneta trading copilot. Two
//! subsystems do the real work:
//!
//! - `shell`: slash-command parsing, registration, dispatch, and the outer
//!   read loop
//! - `menu`: a raw-mode, arrow-key selection engine with guaranteed terminal
//!   restoration
//!
//! Everything with external effects (agent invocation, session storage) is
//! reached through the trait seams in `moneta-core`; the implementations
//! here are deliberately thin.

pub mod agents;
pub mod cli;
pub mod config;
pub mod display;
pub mod menu;
pub mod sessions;
pub mod shell;
