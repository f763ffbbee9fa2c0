use super::motion::Direction;
use super::viewport::CursorRow;
use super::Editor;

impl Editor {
    /// Row index to edit, creating the trailing row first when the cursor is
    /// on the virtual line past the end.
    fn ensure_cursor_row(&mut self) -> usize {
        if let CursorRow::PastEnd = self.cursor.row(&self.document) {
            let at = self.document.len();
            self.document.insert_row(at, Vec::new());
            self.cursor.cy = at;
            self.cursor.cx = 0;
        }
        self.cursor.cy
    }

    pub(super) fn insert_char(&mut self, byte: u8) {
        let row = self.ensure_cursor_row();
        self.document.insert_char(row, self.cursor.cx, byte);
        self.cursor.cx += 1;
    }

    pub(super) fn insert_newline(&mut self) {
        match self.cursor.row(&self.document) {
            CursorRow::Existing(row) if self.cursor.cx > 0 => {
                self.document.split_at(row, self.cursor.cx);
            }
            _ => self.document.insert_row(self.cursor.cy, Vec::new()),
        }
        self.cursor.cy += 1;
        self.cursor.cx = 0;
    }

    /// Backspace: removes the byte left of the cursor, joining with the row
    /// above when the cursor is at the start of a row.
    pub(super) fn delete_char(&mut self) {
        let CursorRow::Existing(row) = self.cursor.row(&self.document) else {
            return;
        };
        if self.cursor.cx > 0 {
            self.document.delete_char(row, self.cursor.cx - 1);
            self.cursor.cx -= 1;
        } else if let Some(join_at) = self.document.join_with_previous(row) {
            self.cursor.cy = row - 1;
            self.cursor.cx = join_at;
        }
    }

    pub(super) fn delete_forward(&mut self) {
        if let CursorRow::PastEnd = self.cursor.row(&self.document) {
            return;
        }
        self.move_cursor(Direction::Right);
        self.delete_char();
    }
}
