use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Result};
use crossterm::{cursor, queue, terminal};

use crate::logging;
use crate::ui;

use super::keys::{Key, BACKSPACE, CTRL_H, ENTER};
use super::Editor;

/// Drives an [`Editor`]: reads a key, applies it, redraws, until told to quit.
pub struct Session<I, W> {
    pub(crate) editor: Editor,
    keys: I,
    pub(super) out: W,
}

impl<I, W> Session<I, W>
where
    I: Iterator<Item = io::Result<Key>>,
    W: Write,
{
    pub fn new(editor: Editor, keys: I, out: W) -> Self {
        Self { editor, keys, out }
    }

    pub fn run(&mut self) -> Result<()> {
        loop {
            self.refresh_screen()?;
            let key = self.next_key()?;
            if self.handle_key(key)? {
                break;
            }
        }
        logging::info("quit");
        queue!(
            self.out,
            terminal::Clear(terminal::ClearType::All),
            cursor::MoveTo(0, 0)
        )?;
        self.out.flush()?;
        Ok(())
    }

    pub(super) fn next_key(&mut self) -> Result<Key> {
        match self.keys.next() {
            Some(key) => Ok(key?),
            None => bail!("input stream closed"),
        }
    }

    pub(super) fn refresh_screen(&mut self) -> Result<()> {
        let frame = ui::compose(&mut self.editor, Instant::now())?;
        self.out.write_all(&frame)?;
        self.out.flush()?;
        Ok(())
    }

    /// Reads one line on the message bar. `template`'s `{}` shows the text
    /// typed so far. Escape cancels; Enter on an empty line is ignored.
    pub(super) fn prompt_line(&mut self, template: &str) -> Result<Option<String>> {
        let mut input = String::new();
        loop {
            self.editor.set_status(template.replacen("{}", &input, 1));
            self.refresh_screen()?;
            match self.next_key()? {
                Key::Control(BACKSPACE | CTRL_H) | Key::Delete => {
                    input.pop();
                }
                Key::Escape => {
                    self.editor.set_status("");
                    return Ok(None);
                }
                Key::Control(ENTER) if !input.is_empty() => {
                    self.editor.set_status("");
                    return Ok(Some(input));
                }
                Key::Char(byte) if byte.is_ascii() => input.push(char::from(byte)),
                _ => {}
            }
        }
    }

    pub(super) fn save(&mut self) -> Result<()> {
        if self.editor.document.filename.is_none() {
            match self.prompt_line("Save as: {} (ESC to cancel)")? {
                Some(name) => self.editor.document.filename = Some(PathBuf::from(name)),
                None => {
                    logging::info("save aborted");
                    self.editor.set_status("Save aborted");
                    return Ok(());
                }
            }
        }
        self.editor.write_document();
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::fs;

    use super::super::types::tests::editor_with;
    use super::*;

    pub(crate) fn keys(seq: &[Key]) -> std::vec::IntoIter<io::Result<Key>> {
        seq.iter().copied().map(Ok).collect::<Vec<_>>().into_iter()
    }

    pub(crate) fn typed(text: &[u8]) -> Vec<Key> {
        text.iter().map(|&b| Key::Char(b)).collect()
    }

    #[test]
    fn prompt_collects_until_enter() {
        let mut seq = vec![Key::Control(ENTER)];
        seq.extend(typed(b"abx"));
        seq.push(Key::Control(BACKSPACE));
        seq.push(Key::Control(CTRL_H));
        seq.push(Key::Control(BACKSPACE));
        seq.push(Key::Control(BACKSPACE));
        seq.extend(typed(b"ok"));
        seq.push(Key::Up);
        seq.push(Key::Control(ENTER));
        let mut session = Session::new(editor_with(&[], 10, 40), keys(&seq), Vec::new());
        let answer = session.prompt_line("Name: {}").expect("prompt");
        assert_eq!(answer.as_deref(), Some("ok"));
        assert_eq!(session.editor.status_message, "");
    }

    #[test]
    fn prompt_escape_cancels() {
        let mut seq = typed(b"abc");
        seq.push(Key::Escape);
        let mut session = Session::new(editor_with(&[], 10, 40), keys(&seq), Vec::new());
        assert_eq!(session.prompt_line("Name: {}").expect("prompt"), None);
    }

    #[test]
    fn prompt_shows_input_on_message_line() {
        let seq = typed(b"ab");
        let mut session = Session::new(editor_with(&[], 10, 40), keys(&seq), Vec::new());
        assert!(session.prompt_line("Save as: {} (ESC to cancel)").is_err());
        assert_eq!(session.editor.status_message, "Save as: ab (ESC to cancel)");
        let frame = String::from_utf8_lossy(&session.out).into_owned();
        assert!(frame.contains("Save as:  (ESC to cancel)"));
        assert!(frame.contains("Save as: a (ESC to cancel)"));
    }

    #[test]
    fn save_as_prompts_for_missing_name() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("fresh.txt");
        let mut seq = typed(path.to_str().expect("utf8 path").as_bytes());
        seq.push(Key::Control(ENTER));
        let mut editor = editor_with(&["hello"], 10, 40);
        editor.document.dirty = true;
        let mut session = Session::new(editor, keys(&seq), Vec::new());
        session.save().expect("save");
        assert_eq!(fs::read(&path).expect("read"), b"hello\n");
        assert!(!session.editor.document.dirty);
        assert_eq!(session.editor.document.filename.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn save_as_cancel_keeps_document_unnamed() {
        let mut editor = editor_with(&["hello"], 10, 40);
        editor.document.dirty = true;
        let mut session = Session::new(editor, keys(&[Key::Escape]), Vec::new());
        session.save().expect("save");
        assert_eq!(session.editor.status_message, "Save aborted");
        assert!(session.editor.document.filename.is_none());
        assert!(session.editor.document.dirty);
    }

    /// Records every `write` call separately.
    struct WriteLog {
        writes: Vec<Vec<u8>>,
    }

    impl Write for WriteLog {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.writes.push(buf.to_vec());
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn each_frame_is_a_single_write() {
        let mut editor = editor_with(&["abc"], 5, 20);
        editor.set_status("msg");
        let log = WriteLog { writes: Vec::new() };
        let mut session = Session::new(editor, keys(&[]), log);
        session.refresh_screen().expect("refresh");

        assert_eq!(session.out.writes.len(), 1);
        let frame = &session.out.writes[0];
        assert!(frame.starts_with(b"\x1b[?25l"));
        assert!(frame.ends_with(b"\x1b[?25h"));
        assert!(String::from_utf8_lossy(frame).contains("msg"));
    }

    #[test]
    fn run_fails_when_input_closes() {
        let mut session = Session::new(editor_with(&[], 10, 40), keys(&[]), Vec::new());
        assert!(session.run().is_err());
    }
}
