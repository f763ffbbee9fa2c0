use std::io::{self, Write};
use std::time::Instant;

use anyhow::{bail, Result};
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::queue;
use crossterm::style::{Attribute, Colors, ResetColor, SetAttribute, SetColors};
use crossterm::terminal::{Clear, ClearType};
use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::app::{Editor, Viewport};

const WELCOME: &str = concat!("Quill editor -- version ", env!("CARGO_PKG_VERSION"));
const FILENAME_WIDTH: usize = 20;

/// Splits a terminal `rows` lines tall into text area, status bar and
/// message bar.
pub fn screen_regions(rows: u16) -> [Rect; 3] {
    // Only heights are laid out; every region spans the full terminal width.
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(Rect::new(0, 0, 1, rows));
    [chunks[0], chunks[1], chunks[2]]
}

pub fn viewport_for_terminal(rows: u16, cols: u16) -> Result<Viewport> {
    if rows < 3 || cols == 0 {
        bail!("terminal too small: {cols}x{rows}");
    }
    let [text_area, _, _] = screen_regions(rows);
    Ok(Viewport::new(
        usize::from(text_area.height),
        usize::from(cols),
    ))
}

/// Builds one complete frame. The caller writes it in a single call so the
/// terminal never shows a half-drawn screen.
pub fn compose(editor: &mut Editor, now: Instant) -> io::Result<Vec<u8>> {
    editor.scroll();
    let view = editor.viewport;
    let mut frame: Vec<u8> = Vec::with_capacity((view.rows + 2) * (view.cols + 8));

    queue!(frame, Hide, MoveTo(0, 0))?;
    draw_rows(&mut frame, editor)?;
    draw_status_bar(&mut frame, editor)?;
    draw_message_bar(&mut frame, editor, now)?;

    let cursor = editor.cursor();
    let x = screen_coord(cursor.rx.saturating_sub(view.col_offset));
    let y = screen_coord(cursor.cy.saturating_sub(view.row_offset));
    queue!(frame, MoveTo(x, y), Show)?;
    Ok(frame)
}

fn screen_coord(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}

fn draw_rows(frame: &mut Vec<u8>, editor: &Editor) -> io::Result<()> {
    let view = editor.viewport;
    let document = editor.document();
    let mut visible = document.rows().iter().skip(view.row_offset);
    for y in 0..view.rows {
        match visible.next() {
            Some(row) => {
                let rendered = row.rendered();
                let start = view.col_offset.min(rendered.len());
                let end = (view.col_offset + view.cols).min(rendered.len());
                frame.write_all(&rendered[start..end])?;
            }
            None if document.is_empty() && view.at_origin() && y == view.rows / 3 => {
                draw_welcome(frame, view.cols);
            }
            None => frame.push(b'~'),
        }
        queue!(frame, Clear(ClearType::UntilNewLine))?;
        frame.write_all(b"\r\n")?;
    }
    Ok(())
}

fn draw_welcome(frame: &mut Vec<u8>, cols: usize) {
    let len = WELCOME.len().min(cols);
    let mut padding = (cols - len) / 2;
    if padding > 0 {
        frame.push(b'~');
        padding -= 1;
    }
    frame.extend(std::iter::repeat_n(b' ', padding));
    frame.extend_from_slice(&WELCOME.as_bytes()[..len]);
}

fn draw_status_bar(frame: &mut Vec<u8>, editor: &Editor) -> io::Result<()> {
    match editor.theme.status_colors() {
        Some((fg, bg)) => queue!(frame, SetColors(Colors::new(fg, bg)))?,
        None => queue!(frame, SetAttribute(Attribute::Reverse))?,
    }

    let document = editor.document();
    let cols = editor.viewport.cols;
    let name: String = document.display_name().chars().take(FILENAME_WIDTH).collect();
    let modified = if document.dirty { " (modified)" } else { "" };
    let left = format!("{name} - {} lines{modified}", document.len());
    let right = format!("{}/{}", editor.cursor().cy + 1, document.len());

    let left: String = left.chars().take(cols).collect();
    let mut len = left.chars().count();
    frame.write_all(left.as_bytes())?;
    while len < cols {
        if cols - len == right.len() {
            frame.write_all(right.as_bytes())?;
            break;
        }
        frame.push(b' ');
        len += 1;
    }

    queue!(frame, SetAttribute(Attribute::Reset), ResetColor)?;
    frame.write_all(b"\r\n")
}

fn draw_message_bar(frame: &mut Vec<u8>, editor: &Editor, now: Instant) -> io::Result<()> {
    queue!(frame, Clear(ClearType::UntilNewLine))?;
    if let Some(message) = editor.visible_status(now) {
        let message: String = message.chars().take(editor.viewport.cols).collect();
        frame.write_all(message.as_bytes())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::time::Duration;

    use super::*;
    use crate::app::editor_with;

    fn screen_lines(frame: &[u8]) -> Vec<String> {
        String::from_utf8_lossy(frame)
            .split("\r\n")
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn empty_document_shows_centered_banner() {
        let mut editor = editor_with(&[], 24, 80);
        let frame = compose(&mut editor, Instant::now()).expect("compose");
        let lines = screen_lines(&frame);
        assert_eq!(lines.len(), 26);

        let banner_row = &lines[24 / 3];
        let at = banner_row.find(WELCOME).expect("banner on row 8");
        assert!(WELCOME.len() <= 80);
        assert_eq!(at, (80 - WELCOME.len()) / 2);
        assert!(banner_row.starts_with('~'));

        assert!(lines[7].starts_with('~'));
        assert!(!lines[7].contains("version"));
        assert!(!lines[9].contains("version"));
    }

    #[test]
    fn banner_is_clipped_to_narrow_screens() {
        let mut editor = editor_with(&[], 6, 10);
        let frame = compose(&mut editor, Instant::now()).expect("compose");
        let lines = screen_lines(&frame);
        assert!(lines[2].starts_with(&WELCOME[..10]));
    }

    #[test]
    fn frame_hides_cursor_then_restores_it_at_cursor() {
        let mut editor = editor_with(&["0123456789abcdef"], 5, 10);
        editor.cursor.cx = 15;
        let frame = compose(&mut editor, Instant::now()).expect("compose");
        assert!(frame.starts_with(b"\x1b[?25l\x1b[1;1H"));
        assert!(frame.ends_with(b"\x1b[1;10H\x1b[?25h"));

        let lines = screen_lines(&frame);
        assert!(lines[0].ends_with("6789abcdef\x1b[K"));
        assert!(!lines[0].contains("56789"));
        assert_eq!(lines[1], "~\x1b[K");
    }

    #[test]
    fn tabs_are_drawn_expanded() {
        let mut editor = editor_with(&["a\tb"], 5, 20);
        let frame = compose(&mut editor, Instant::now()).expect("compose");
        let lines = screen_lines(&frame);
        assert!(lines[0].ends_with("a       b\x1b[K"));
    }

    #[test]
    fn status_bar_aligns_position_right() {
        let mut editor = editor_with(&["a", "b"], 5, 40);
        editor.document.filename = Some(PathBuf::from("notes.txt"));
        editor.document.dirty = true;
        let frame = compose(&mut editor, Instant::now()).expect("compose");
        let lines = screen_lines(&frame);
        let status = &lines[5];
        assert!(status.starts_with("\x1b[7m"));
        assert!(status.contains("notes.txt - 2 lines (modified)       1/2\x1b[0m"));
    }

    #[test]
    fn status_bar_truncates_long_names() {
        let mut editor = editor_with(&[], 5, 60);
        editor.document.filename = Some(PathBuf::from("a-very-long-file-name-indeed.txt"));
        let frame = compose(&mut editor, Instant::now()).expect("compose");
        let lines = screen_lines(&frame);
        assert!(lines[5].contains("a-very-long-file-nam - 0 lines"));
    }

    #[test]
    fn message_disappears_after_timeout() {
        let mut editor = editor_with(&[], 5, 40);
        editor.set_status("HELP: Ctrl-S = save | Ctrl-Q = quit");
        let set_at = editor.status_time.expect("status time");

        let fresh = compose(&mut editor, set_at).expect("compose");
        assert!(screen_lines(&fresh)[6].contains("HELP: Ctrl-S"));

        let stale = compose(&mut editor, set_at + Duration::from_secs(6)).expect("compose");
        assert!(!screen_lines(&stale)[6].contains("HELP"));
    }

    #[test]
    fn regions_reserve_two_bars() {
        let [text, status, message] = screen_regions(26);
        assert_eq!(text.height, 24);
        assert_eq!((status.y, status.height), (24, 1));
        assert_eq!((message.y, message.height), (25, 1));

        let view = viewport_for_terminal(26, 80).expect("viewport");
        assert_eq!((view.rows, view.cols), (24, 80));
        assert!(viewport_for_terminal(2, 80).is_err());
        assert!(viewport_for_terminal(10, 0).is_err());
    }
}
