use super::viewport::CursorRow;
use super::Editor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Editor {
    pub(super) fn move_cursor(&mut self, direction: Direction) {
        let rows = self.document.len();
        let cursor = &mut self.cursor;
        match direction {
            Direction::Left => {
                if cursor.cx > 0 {
                    cursor.cx -= 1;
                } else if cursor.cy > 0 {
                    cursor.cy -= 1;
                    cursor.cx = self.document.row_len(cursor.cy);
                }
            }
            Direction::Right => {
                if let CursorRow::Existing(row) = cursor.row(&self.document) {
                    let len = self.document.row_len(row);
                    if cursor.cx < len {
                        cursor.cx += 1;
                    } else if cursor.cx == len {
                        cursor.cy += 1;
                        cursor.cx = 0;
                    }
                }
            }
            Direction::Up => {
                cursor.cy = cursor.cy.saturating_sub(1);
            }
            // The virtual row past the end is a valid resting place.
            Direction::Down => {
                if cursor.cy < rows {
                    cursor.cy += 1;
                }
            }
        }
        self.cursor.clamp_to_row(&self.document);
    }

    /// Jumps to the top (or bottom) edge of the screen, then moves a full
    /// screen further one row at a time.
    pub(super) fn page(&mut self, direction: Direction) {
        let view = self.viewport;
        match direction {
            Direction::Up => self.cursor.cy = view.row_offset,
            Direction::Down => {
                self.cursor.cy = (view.row_offset + view.rows - 1).min(self.document.len());
            }
            Direction::Left | Direction::Right => return,
        }
        self.cursor.clamp_to_row(&self.document);
        for _ in 0..view.rows {
            self.move_cursor(direction);
        }
    }

    pub(super) fn move_home(&mut self) {
        self.cursor.cx = 0;
    }

    pub(super) fn move_end(&mut self) {
        if let CursorRow::Existing(row) = self.cursor.row(&self.document) {
            self.cursor.cx = self.document.row_len(row);
        }
    }

    pub fn scroll(&mut self) {
        self.viewport.scroll_to_show(&mut self.cursor, &self.document);
    }
}
