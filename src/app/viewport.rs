use super::document::Document;

/// Where the cursor row sits relative to the document. `PastEnd` is the
/// virtual empty line after the last row, where typing appends a new row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorRow {
    Existing(usize),
    PastEnd,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    /// Byte column within the row; may equal the row length.
    pub cx: usize,
    /// Row index; may equal the row count (the virtual trailing row).
    pub cy: usize,
    /// Screen column of `cx` after tab expansion.
    pub rx: usize,
}

impl Cursor {
    pub fn at(cy: usize, cx: usize) -> Self {
        Self { cx, cy, rx: 0 }
    }

    pub fn row(&self, document: &Document) -> CursorRow {
        if self.cy < document.len() {
            CursorRow::Existing(self.cy)
        } else {
            CursorRow::PastEnd
        }
    }

    /// Pulls `cx` back inside the current row.
    pub fn clamp_to_row(&mut self, document: &Document) {
        let len = match self.row(document) {
            CursorRow::Existing(row) => document.row_len(row),
            CursorRow::PastEnd => 0,
        };
        self.cx = self.cx.min(len);
    }

    pub fn rendered_column(&self, document: &Document) -> usize {
        match self.row(document) {
            CursorRow::Existing(row) => document
                .row(row)
                .map_or(0, |r| r.cx_to_rx(self.cx, document.tab_stop())),
            CursorRow::PastEnd => 0,
        }
    }
}

/// The visible window onto the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub row_offset: usize,
    pub col_offset: usize,
    pub rows: usize,
    pub cols: usize,
}

impl Viewport {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            row_offset: 0,
            col_offset: 0,
            rows: rows.max(1),
            cols: cols.max(1),
        }
    }

    /// Refreshes `cursor.rx` and scrolls just far enough to keep the cursor
    /// on screen.
    pub fn scroll_to_show(&mut self, cursor: &mut Cursor, document: &Document) {
        cursor.rx = cursor.rendered_column(document);

        if cursor.cy < self.row_offset {
            self.row_offset = cursor.cy;
        }
        if cursor.cy >= self.row_offset + self.rows {
            self.row_offset = cursor.cy + 1 - self.rows;
        }
        if cursor.rx < self.col_offset {
            self.col_offset = cursor.rx;
        }
        if cursor.rx >= self.col_offset + self.cols {
            self.col_offset = cursor.rx + 1 - self.cols;
        }
        debug_assert!(self.contains(cursor));
    }

    pub fn contains(&self, cursor: &Cursor) -> bool {
        (self.row_offset..self.row_offset + self.rows).contains(&cursor.cy)
            && (self.col_offset..self.col_offset + self.cols).contains(&cursor.rx)
    }

    pub fn at_origin(&self) -> bool {
        self.row_offset == 0 && self.col_offset == 0
    }
}
