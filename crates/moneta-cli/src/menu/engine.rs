//! Selection engine state machine
//!
//! One invocation walks `Idle → Listening → {Confirmed | Cancelled}` and
//! resolves to a [`MenuResult`]. While listening the engine is the sole
//! owner of the input stream; raw mode is released exactly once on every
//! exit path, including faults raised mid-render, via RAII guards.
//!
//! Redraws erase exactly the number of lines the previous render produced.
//! Getting that count wrong corrupts the display, so the bookkeeping lives
//! in one place ([`BlockWriter`]) and the renderer is consulted only through
//! its returned block.

use std::io::{self, IsTerminal, Write};

use crossterm::cursor::{Hide, MoveToColumn, MoveUp, Show};
use crossterm::event::{KeyCode, KeyModifiers};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::{execute, queue};
use tracing::debug;

use crate::menu::input::{InputClaim, KeySource, TerminalKeys};
use crate::menu::render::render;
use crate::menu::{MenuError, MenuOptions, MenuResult};

/// How one listening run resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Resolution {
    Confirmed { key: String, index: usize },
    Cancelled,
    /// Esc/Ctrl-C while `allow_cancel` is false; the caller terminates the
    /// process once the terminal is restored
    Terminate,
}

/// Erase-count bookkeeping for full-block redraws
///
/// `lines_above` is the number of line breaks the previous draw emitted;
/// the cursor rests on the block's last line, so erasing moves up that far
/// and clears downward.
struct BlockWriter {
    lines_above: u16,
}

impl BlockWriter {
    fn new() -> Self {
        Self { lines_above: 0 }
    }

    fn draw<W: Write>(&mut self, out: &mut W, block: &str) -> io::Result<()> {
        self.erase(out)?;
        let lines: Vec<&str> = block.lines().collect();
        for (i, line) in lines.iter().enumerate() {
            write!(out, "{line}")?;
            if i + 1 < lines.len() {
                write!(out, "\r\n")?;
            }
        }
        out.flush()?;
        self.lines_above = lines.len().saturating_sub(1) as u16;
        Ok(())
    }

    fn erase<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        if self.lines_above > 0 {
            queue!(out, MoveUp(self.lines_above))?;
        }
        queue!(out, MoveToColumn(0), Clear(ClearType::FromCursorDown))?;
        out.flush()?;
        self.lines_above = 0;
        Ok(())
    }
}

/// Restores the terminal on drop; `release` is idempotent so explicit and
/// drop-driven paths never double-toggle
struct RawModeGuard {
    active: bool,
}

impl RawModeGuard {
    fn acquire() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(io::stdout(), Hide)?;
        Ok(Self { active: true })
    }

    fn release(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        let shown = execute!(io::stdout(), Show);
        let cooked = terminal::disable_raw_mode();
        shown.and(cooked)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = self.release();
    }
}

/// One-shot interactive selection
pub struct SelectMenu {
    options: MenuOptions,
}

impl SelectMenu {
    pub fn new(options: MenuOptions) -> Self {
        Self { options }
    }

    /// Run the menu against the real terminal
    ///
    /// Refuses with [`MenuError::NotInteractive`] when not attached to a
    /// terminal and with [`MenuError::InputBusy`] when another invocation
    /// already holds the input stream. With `allow_cancel == false`, a
    /// cancel keystroke restores the terminal and exits the process.
    pub async fn run(self) -> Result<MenuResult, MenuError> {
        if !self.options.items.iter().any(|item| item.is_selectable()) {
            return Ok(MenuResult::cancelled());
        }
        if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
            return Err(MenuError::NotInteractive);
        }

        let _claim = InputClaim::acquire()?;
        let mut guard = RawModeGuard::acquire()?;
        let mut keys = TerminalKeys::new();
        let mut out = io::stdout();

        let outcome = self.listen(&mut keys, &mut out).await;
        let restored = guard.release();

        let resolution = outcome?;
        restored?;

        match resolution {
            Resolution::Confirmed { key, index } => Ok(MenuResult::confirmed(key, index)),
            Resolution::Cancelled => Ok(MenuResult::cancelled()),
            Resolution::Terminate => {
                debug!("cancel requested on a non-cancellable menu, exiting");
                std::process::exit(130);
            }
        }
    }

    /// The Listening state: draw, await key events, resolve
    ///
    /// Decoupled from raw-mode ownership so tests drive it with a scripted
    /// key source and a byte sink.
    pub(crate) async fn listen<S: KeySource, W: Write>(
        &self,
        keys: &mut S,
        out: &mut W,
    ) -> Result<Resolution, MenuError> {
        let items = &self.options.items;
        let selectable: Vec<usize> = items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.is_selectable())
            .map(|(index, _)| index)
            .collect();
        if selectable.is_empty() {
            return Ok(Resolution::Cancelled);
        }

        // requested index when selectable, first selectable otherwise
        let mut pos = selectable
            .iter()
            .position(|&index| index == self.options.initial_index)
            .unwrap_or(0);

        let mut writer = BlockWriter::new();
        writer.draw(out, &render(&self.options, selectable[pos]))?;

        loop {
            let Some(key) = keys.next_key().await? else {
                // input stream ended underneath the menu
                writer.erase(out)?;
                return Ok(Resolution::Cancelled);
            };

            match key.code {
                KeyCode::Enter => {
                    let index = selectable[pos];
                    writer.erase(out)?;
                    return Ok(Resolution::Confirmed {
                        key: items[index].key.clone(),
                        index,
                    });
                }
                KeyCode::Esc => {
                    writer.erase(out)?;
                    return Ok(self.cancel_resolution());
                }
                KeyCode::Up => {
                    pos = pos.saturating_sub(1);
                    writer.draw(out, &render(&self.options, selectable[pos]))?;
                }
                KeyCode::Down => {
                    pos = (pos + 1).min(selectable.len() - 1);
                    writer.draw(out, &render(&self.options, selectable[pos]))?;
                }
                KeyCode::Char(c) => {
                    if key.modifiers.contains(KeyModifiers::CONTROL) {
                        if c == 'c' {
                            writer.erase(out)?;
                            return Ok(self.cancel_resolution());
                        }
                    } else if c == 'k' {
                        pos = pos.saturating_sub(1);
                        writer.draw(out, &render(&self.options, selectable[pos]))?;
                    } else if c == 'j' {
                        pos = (pos + 1).min(selectable.len() - 1);
                        writer.draw(out, &render(&self.options, selectable[pos]))?;
                    } else if let Some(&index) = selectable.iter().find(|&&index| {
                        items[index]
                            .shortcut
                            .is_some_and(|s| s.eq_ignore_ascii_case(&c))
                    }) {
                        writer.erase(out)?;
                        return Ok(Resolution::Confirmed {
                            key: items[index].key.clone(),
                            index,
                        });
                    }
                }
                _ => {}
            }
        }
    }

    fn cancel_resolution(&self) -> Resolution {
        if self.options.allow_cancel {
            Resolution::Cancelled
        } else {
            Resolution::Terminate
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::input::testing::ScriptedKeys;
    use crate::menu::MenuItem;
    use crossterm::event::KeyEvent;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn abc_with_separator() -> Vec<MenuItem> {
        vec![
            MenuItem::new("a", "Momentum"),
            MenuItem::separator(),
            MenuItem::new("b", "Mean reversion"),
        ]
    }

    async fn drive(options: MenuOptions, keys: Vec<KeyEvent>) -> Resolution {
        let mut source = ScriptedKeys::new(keys);
        let mut out = Vec::new();
        SelectMenu::new(options)
            .listen(&mut source, &mut out)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_initial_selection_is_first_selectable() {
        let resolution = drive(
            MenuOptions::new(abc_with_separator()),
            vec![key(KeyCode::Enter)],
        )
        .await;
        assert_eq!(
            resolution,
            Resolution::Confirmed {
                key: "a".into(),
                index: 0
            }
        );
    }

    #[tokio::test]
    async fn test_down_skips_the_separator() {
        let resolution = drive(
            MenuOptions::new(abc_with_separator()),
            vec![key(KeyCode::Down), key(KeyCode::Enter)],
        )
        .await;
        assert_eq!(
            resolution,
            Resolution::Confirmed {
                key: "b".into(),
                index: 2
            }
        );
    }

    #[tokio::test]
    async fn test_down_clamps_at_the_last_selectable() {
        let resolution = drive(
            MenuOptions::new(abc_with_separator()),
            vec![key(KeyCode::Down), key(KeyCode::Down), key(KeyCode::Enter)],
        )
        .await;
        assert_eq!(
            resolution,
            Resolution::Confirmed {
                key: "b".into(),
                index: 2
            }
        );
    }

    #[tokio::test]
    async fn test_up_clamps_at_the_first_selectable() {
        let resolution = drive(
            MenuOptions::new(abc_with_separator()),
            vec![key(KeyCode::Up), key(KeyCode::Enter)],
        )
        .await;
        assert_eq!(
            resolution,
            Resolution::Confirmed {
                key: "a".into(),
                index: 0
            }
        );
    }

    #[tokio::test]
    async fn test_vim_keys_navigate() {
        let resolution = drive(
            MenuOptions::new(abc_with_separator()),
            vec![
                key(KeyCode::Char('j')),
                key(KeyCode::Char('k')),
                key(KeyCode::Enter),
            ],
        )
        .await;
        assert_eq!(
            resolution,
            Resolution::Confirmed {
                key: "a".into(),
                index: 0
            }
        );
    }

    #[tokio::test]
    async fn test_escape_cancels_when_allowed() {
        let resolution = drive(
            MenuOptions::new(abc_with_separator()),
            vec![key(KeyCode::Esc)],
        )
        .await;
        assert_eq!(resolution, Resolution::Cancelled);
    }

    #[tokio::test]
    async fn test_ctrl_c_is_the_cancel_combination() {
        let resolution = drive(MenuOptions::new(abc_with_separator()), vec![ctrl('c')]).await;
        assert_eq!(resolution, Resolution::Cancelled);
    }

    #[tokio::test]
    async fn test_cancel_forbidden_resolves_to_terminate() {
        let resolution = drive(
            MenuOptions::new(abc_with_separator()).forbid_cancel(),
            vec![key(KeyCode::Esc)],
        )
        .await;
        assert_eq!(resolution, Resolution::Terminate);
    }

    #[tokio::test]
    async fn test_shortcut_confirms_regardless_of_cursor() {
        let items = vec![
            MenuItem::new("a", "Momentum").shortcut('m'),
            MenuItem::new("b", "Mean reversion").shortcut('r'),
        ];
        let resolution = drive(MenuOptions::new(items), vec![key(KeyCode::Char('R'))]).await;
        assert_eq!(
            resolution,
            Resolution::Confirmed {
                key: "b".into(),
                index: 1
            }
        );
    }

    #[tokio::test]
    async fn test_shortcut_on_disabled_item_is_ignored() {
        let items = vec![
            MenuItem::new("a", "Momentum").shortcut('m'),
            MenuItem::new("b", "Mean reversion").shortcut('r').disabled(true),
        ];
        let resolution = drive(
            MenuOptions::new(items),
            vec![key(KeyCode::Char('r')), key(KeyCode::Enter)],
        )
        .await;
        assert_eq!(
            resolution,
            Resolution::Confirmed {
                key: "a".into(),
                index: 0
            }
        );
    }

    #[tokio::test]
    async fn test_unrecognized_keys_are_ignored() {
        let resolution = drive(
            MenuOptions::new(abc_with_separator()),
            vec![
                key(KeyCode::Tab),
                key(KeyCode::Char('x')),
                key(KeyCode::Enter),
            ],
        )
        .await;
        assert_eq!(
            resolution,
            Resolution::Confirmed {
                key: "a".into(),
                index: 0
            }
        );
    }

    #[tokio::test]
    async fn test_requested_initial_index_is_honored() {
        let resolution = drive(
            MenuOptions::new(abc_with_separator()).initial_index(2),
            vec![key(KeyCode::Enter)],
        )
        .await;
        assert_eq!(
            resolution,
            Resolution::Confirmed {
                key: "b".into(),
                index: 2
            }
        );
    }

    #[tokio::test]
    async fn test_unselectable_initial_index_falls_back() {
        let resolution = drive(
            MenuOptions::new(abc_with_separator()).initial_index(1),
            vec![key(KeyCode::Enter)],
        )
        .await;
        assert_eq!(
            resolution,
            Resolution::Confirmed {
                key: "a".into(),
                index: 0
            }
        );
    }

    #[tokio::test]
    async fn test_input_stream_end_cancels() {
        let resolution = drive(MenuOptions::new(abc_with_separator()), vec![]).await;
        assert_eq!(resolution, Resolution::Cancelled);
    }

    #[tokio::test]
    async fn test_no_selectable_items_resolves_without_listening() {
        let items = vec![MenuItem::separator(), MenuItem::new("a", "A").disabled(true)];
        let result = SelectMenu::new(MenuOptions::new(items)).run().await.unwrap();
        assert_eq!(result, MenuResult::cancelled());
    }

    #[tokio::test]
    async fn test_redraw_happens_per_navigation_event() {
        let options = MenuOptions::new(abc_with_separator());
        let mut source = ScriptedKeys::new(vec![
            key(KeyCode::Down),
            key(KeyCode::Up),
            key(KeyCode::Enter),
        ]);
        let mut out = Vec::new();
        SelectMenu::new(options)
            .listen(&mut source, &mut out)
            .await
            .unwrap();

        let text = String::from_utf8_lossy(&out);
        // initial draw plus one redraw per navigation event
        assert_eq!(text.matches("Momentum").count(), 3);
    }
}
