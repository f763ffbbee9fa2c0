use std::time::{Duration, Instant};

use super::config::Config;
use super::document::Document;
use super::theme::Theme;
use super::viewport::{Cursor, Viewport};

/// All state behind one editing session: the document, where the cursor is,
/// what part of the document is on screen and the message line.
pub struct Editor {
    pub(crate) document: Document,
    pub(crate) cursor: Cursor,
    pub(crate) viewport: Viewport,
    pub(crate) theme: Theme,
    pub(crate) status_message: String,
    pub(crate) status_time: Option<Instant>,
    pub(crate) message_timeout: Duration,
    pub(crate) quit_times: u32,
    pub(crate) quit_remaining: u32,
}

impl Editor {
    pub fn new(document: Document, config: &Config, viewport: Viewport) -> Self {
        Self {
            document,
            cursor: Cursor::at(0, 0),
            viewport,
            theme: config.theme(),
            status_message: String::new(),
            status_time: None,
            message_timeout: config.message_timeout(),
            quit_times: config.quit_times,
            quit_remaining: config.quit_times,
        }
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
        self.status_time = Some(Instant::now());
    }

    /// The message line as it should appear at `now`, if it has not expired.
    pub fn visible_status(&self, now: Instant) -> Option<&str> {
        let set_at = self.status_time?;
        if self.status_message.is_empty()
            || now.saturating_duration_since(set_at) >= self.message_timeout
        {
            return None;
        }
        Some(self.status_message.as_str())
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }
}
