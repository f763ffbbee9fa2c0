use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use super::row::Row;

/// The text being edited: an ordered list of rows plus the file it came from.
///
/// Out-of-range indices are normalised (clamped or ignored) rather than
/// reported; every method leaves the rows contiguous and rendered.
#[derive(Debug, Clone)]
pub struct Document {
    rows: Vec<Row>,
    tab_stop: usize,
    pub(crate) filename: Option<PathBuf>,
    pub(crate) dirty: bool,
}

impl Document {
    pub fn new(tab_stop: usize) -> Self {
        Self {
            rows: Vec::new(),
            tab_stop,
            filename: None,
            dirty: false,
        }
    }

    pub fn from_lines<I, L>(lines: I, tab_stop: usize) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<Vec<u8>>,
    {
        let rows = lines
            .into_iter()
            .map(|line| Row::new(line.into(), tab_stop))
            .collect();
        Self {
            rows,
            tab_stop,
            filename: None,
            dirty: false,
        }
    }

    /// Reads `path` line by line. A missing file yields an empty document
    /// that will be written to `path` on first save.
    pub fn open(path: &Path, tab_stop: usize) -> io::Result<Self> {
        let file = match File::open(path) {
            Ok(file) => Some(file),
            Err(err) if err.kind() == io::ErrorKind::NotFound => None,
            Err(err) => return Err(err),
        };
        let mut lines = Vec::new();
        if let Some(file) = file {
            let mut reader = BufReader::new(file);
            loop {
                let mut line = Vec::new();
                if reader.read_until(b'\n', &mut line)? == 0 {
                    break;
                }
                while matches!(line.last(), Some(b'\n' | b'\r')) {
                    line.pop();
                }
                lines.push(line);
            }
        }
        let mut document = Self::from_lines(lines, tab_stop);
        document.filename = Some(path.to_path_buf());
        Ok(document)
    }

    /// Writes the serialised document to its filename, truncating any existing
    /// file. Returns the number of bytes written.
    pub fn save(&mut self) -> io::Result<usize> {
        let Some(path) = self.filename.clone() else {
            return Err(io::Error::new(io::ErrorKind::InvalidInput, "no file name"));
        };
        let bytes = self.to_serialized_form();
        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o644);
        }
        let mut file = options.open(&path)?;
        file.write_all(&bytes)?;
        file.flush()?;
        self.dirty = false;
        Ok(bytes.len())
    }

    pub fn tab_stop(&self) -> usize {
        self.tab_stop
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, at: usize) -> Option<&Row> {
        self.rows.get(at)
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row_len(&self, at: usize) -> usize {
        self.rows.get(at).map_or(0, Row::len)
    }

    pub fn insert_row(&mut self, at: usize, text: impl Into<Vec<u8>>) {
        if at > self.rows.len() {
            return;
        }
        self.rows.insert(at, Row::new(text.into(), self.tab_stop));
        self.dirty = true;
    }

    pub fn delete_row(&mut self, at: usize) {
        if at >= self.rows.len() {
            return;
        }
        self.rows.remove(at);
        self.dirty = true;
    }

    pub fn insert_char(&mut self, row: usize, at: usize, byte: u8) {
        let tab_stop = self.tab_stop;
        if let Some(target) = self.rows.get_mut(row) {
            target.insert(at, byte, tab_stop);
            self.dirty = true;
        }
    }

    pub fn delete_char(&mut self, row: usize, at: usize) {
        let tab_stop = self.tab_stop;
        if let Some(target) = self.rows.get_mut(row) {
            if target.remove(at, tab_stop) {
                self.dirty = true;
            }
        }
    }

    pub fn append_text(&mut self, row: usize, text: &[u8]) {
        let tab_stop = self.tab_stop;
        if let Some(target) = self.rows.get_mut(row) {
            target.append(text, tab_stop);
            self.dirty = true;
        }
    }

    /// Moves `text[col..]` of `row` onto a new row directly below it.
    pub fn split_at(&mut self, row: usize, col: usize) {
        let tab_stop = self.tab_stop;
        let Some(target) = self.rows.get_mut(row) else {
            return;
        };
        let tail = target.split_off(col, tab_stop);
        self.rows.insert(row + 1, Row::new(tail, tab_stop));
        self.dirty = true;
    }

    /// Appends `row` onto the row above it and removes `row`. Returns the
    /// length the previous row had before the join, i.e. the join point.
    pub fn join_with_previous(&mut self, row: usize) -> Option<usize> {
        if row == 0 || row >= self.rows.len() {
            return None;
        }
        let join_at = self.rows[row - 1].len();
        let text = self.rows[row].text().to_vec();
        self.append_text(row - 1, &text);
        self.delete_row(row);
        Some(join_at)
    }

    pub fn to_serialized_form(&self) -> Vec<u8> {
        let total: usize = self.rows.iter().map(|row| row.len() + 1).sum();
        let mut out = Vec::with_capacity(total);
        for row in &self.rows {
            out.extend_from_slice(row.text());
            out.push(b'\n');
        }
        out
    }

    pub fn display_name(&self) -> String {
        self.filename
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "[No Name]".to_string())
    }
}
