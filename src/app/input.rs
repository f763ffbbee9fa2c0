use std::io::{self, Write};

use anyhow::Result;

use super::keys::{ctrl, Key, BACKSPACE, CTRL_H, ENTER};
use super::motion::Direction;
use super::Session;

const QUIT: u8 = ctrl(b'q');
const SAVE: u8 = ctrl(b's');
const REFRESH: u8 = ctrl(b'l');
const TAB: u8 = b'\t';

impl<I, W> Session<I, W>
where
    I: Iterator<Item = io::Result<Key>>,
    W: Write,
{
    /// Applies one key. Returns `true` when the session should end.
    pub(super) fn handle_key(&mut self, key: Key) -> Result<bool> {
        if key != Key::Control(QUIT) {
            self.editor.reset_quit_confirm();
        }

        match key {
            Key::Control(QUIT) => return Ok(self.editor.confirm_quit()),
            Key::Control(SAVE) => self.save()?,
            Key::Control(ENTER) => self.editor.insert_newline(),
            Key::Control(BACKSPACE | CTRL_H) => self.editor.delete_char(),
            Key::Control(TAB) => self.editor.insert_char(TAB),
            Key::Control(REFRESH) | Key::Escape => {}
            Key::Control(_) => {}
            Key::Delete => self.editor.delete_forward(),
            Key::Home => self.editor.move_home(),
            Key::End => self.editor.move_end(),
            Key::PageUp => self.editor.page(Direction::Up),
            Key::PageDown => self.editor.page(Direction::Down),
            Key::Up => self.editor.move_cursor(Direction::Up),
            Key::Down => self.editor.move_cursor(Direction::Down),
            Key::Left => self.editor.move_cursor(Direction::Left),
            Key::Right => self.editor.move_cursor(Direction::Right),
            Key::Char(byte) => self.editor.insert_char(byte),
        }
        Ok(false)
    }
}
