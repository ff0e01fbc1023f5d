//! Key-event sources and the exclusive input-stream claim
//!
//! The engine awaits key events through [`KeySource`] rather than installing
//! callbacks; transitions stay linear and the loop is drivable from tests
//! with a scripted queue.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use crossterm::event::{Event, EventStream, KeyEvent, KeyEventKind};
use futures::StreamExt;

use crate::menu::MenuError;

/// An awaited stream of key presses
#[async_trait]
pub trait KeySource: Send {
    /// Next key press, or `None` when the stream has ended
    async fn next_key(&mut self) -> io::Result<Option<KeyEvent>>;
}

/// Production source reading crossterm's async event stream
pub struct TerminalKeys {
    stream: EventStream,
}

impl TerminalKeys {
    pub fn new() -> Self {
        Self {
            stream: EventStream::new(),
        }
    }
}

impl Default for TerminalKeys {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KeySource for TerminalKeys {
    async fn next_key(&mut self) -> io::Result<Option<KeyEvent>> {
        while let Some(event) = self.stream.next().await {
            match event? {
                Event::Key(key) if key.kind == KeyEventKind::Press => return Ok(Some(key)),
                // resize, focus, release and repeat events are not menu input
                _ => continue,
            }
        }
        Ok(None)
    }
}

static INPUT_CLAIMED: AtomicBool = AtomicBool::new(false);

/// Exclusive claim on the process input stream
///
/// The menu engine must be the sole listener for its whole invocation, so a
/// second overlapping invocation fails fast instead of interleaving reads.
/// Dropping the claim releases it.
pub struct InputClaim(());

impl InputClaim {
    pub fn acquire() -> Result<Self, MenuError> {
        if INPUT_CLAIMED
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(MenuError::InputBusy);
        }
        Ok(Self(()))
    }
}

impl Drop for InputClaim {
    fn drop(&mut self) {
        INPUT_CLAIMED.store(false, Ordering::SeqCst);
    }
}
