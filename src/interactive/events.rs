//! Terminal event polling for the interactive UI

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use std::time::Duration;

/// Events the application reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    Key(KeyEvent),
    /// The terminal was resized; the next draw picks up the new size
    Resize,
}

pub struct EventHandler {
    timeout: Duration,
}

impl EventHandler {
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_millis(100))
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Wait up to the timeout for the next event. Key releases and repeats
    /// reported by some terminals are skipped.
    pub fn next(&self) -> Result<Option<AppEvent>> {
        if !event::poll(self.timeout)? {
            return Ok(None);
        }
        let app_event = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => Some(AppEvent::Key(key)),
            Event::Resize(_, _) => Some(AppEvent::Resize),
            _ => None,
        };
        Ok(app_event)
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}
