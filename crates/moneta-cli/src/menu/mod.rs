//! Raw-mode selection menu
//!
//! A single-threaded, event-driven state machine that owns the terminal
//! input stream for its lifetime and resolves to one choice or a
//! cancellation:
//!
//! - `engine`: the `Idle → Listening → {Confirmed | Cancelled}` machine with
//!   erase-count bookkeeping and guaranteed raw-mode restoration
//! - `render`: the pure text renderer the engine redraws through
//! - `input`: awaited key-event sources and the exclusive input-stream claim

pub mod engine;
pub mod input;
pub mod render;

pub use engine::SelectMenu;

use std::io;

/// Selection menu errors
#[derive(Debug, thiserror::Error)]
pub enum MenuError {
    /// stdin/stdout is not an interactive terminal; refused before any
    /// raw-mode toggling
    #[error("selection menu requires an interactive terminal")]
    NotInteractive,

    /// Another menu invocation already holds the input stream
    #[error("input stream is already claimed by another menu")]
    InputBusy,

    #[error("terminal i/o failed: {0}")]
    Io(#[from] io::Error),
}

/// One selectable or decorative row
#[derive(Debug, Clone)]
pub struct MenuItem {
    /// Stable identifier returned on confirmation
    pub key: String,
    pub label: String,
    pub description: Option<String>,
    /// Single character that confirms this item directly, case-insensitive
    pub shortcut: Option<char>,
    pub icon: Option<String>,
    pub disabled: bool,
    pub separator: bool,
}

impl MenuItem {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            description: None,
            shortcut: None,
            icon: None,
            disabled: false,
            separator: false,
        }
    }

    /// A horizontal rule; never selectable
    pub fn separator() -> Self {
        Self {
            key: String::new(),
            label: String::new(),
            description: None,
            shortcut: None,
            icon: None,
            disabled: false,
            separator: true,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn shortcut(mut self, shortcut: char) -> Self {
        self.shortcut = Some(shortcut);
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Eligible for navigation focus
    pub fn is_selectable(&self) -> bool {
        !self.separator && !self.disabled
    }
}

/// Configuration for one menu invocation
#[derive(Debug, Clone)]
pub struct MenuOptions {
    pub title: Option<String>,
    pub items: Vec<MenuItem>,
    /// Requested initial selection; falls back to the first selectable index
    /// when it names a separator or disabled row
    pub initial_index: usize,
    /// When false, Esc/Ctrl-C does NOT cancel: the engine restores the
    /// terminal and terminates the process. Callers that need a graceful
    /// way out must leave this true.
    pub allow_cancel: bool,
    pub border: bool,
    /// Cap on visible item rows; the window scrolls to keep the selection
    /// in view
    pub max_visible: Option<usize>,
}

impl MenuOptions {
    pub fn new(items: Vec<MenuItem>) -> Self {
        Self {
            title: None,
            items,
            initial_index: 0,
            allow_cancel: true,
            border: false,
            max_visible: None,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn initial_index(mut self, index: usize) -> Self {
        self.initial_index = index;
        self
    }

    /// Make Esc/Ctrl-C terminate the process instead of cancelling.
    /// Irreversible last resort; see `allow_cancel`.
    pub fn forbid_cancel(mut self) -> Self {
        self.allow_cancel = false;
        self
    }

    pub fn border(mut self, border: bool) -> Self {
        self.border = border;
        self
    }

    pub fn max_visible(mut self, max_visible: usize) -> Self {
        self.max_visible = Some(max_visible);
        self
    }
}

/// Terminal outcome of one menu invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuResult {
    /// Key of the confirmed item; `None` on cancellation
    pub key: Option<String>,
    /// Index of the confirmed item within `options.items`; `None` on
    /// cancellation
    pub index: Option<usize>,
    pub cancelled: bool,
}

impl MenuResult {
    pub fn confirmed(key: impl Into<String>, index: usize) -> Self {
        Self {
            key: Some(key.into()),
            index: Some(index),
            cancelled: false,
        }
    }

    pub fn cancelled() -> Self {
        Self {
            key: None,
            index: None,
            cancelled: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selectable_excludes_separators_and_disabled() {
        assert!(MenuItem::new("a", "A").is_selectable());
        assert!(!MenuItem::separator().is_selectable());
        assert!(!MenuItem::new("b", "B").disabled(true).is_selectable());
    }

    #[test]
    fn test_options_default_to_cancellable() {
        let options = MenuOptions::new(vec![MenuItem::new("a", "A")]);
        assert!(options.allow_cancel);
        assert!(!options.forbid_cancel().allow_cancel);
    }
}
