/// One line of the document. `rendered` is the on-screen form of `text` with
/// tabs expanded to the next tab stop; it is rebuilt after every change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    text: Vec<u8>,
    rendered: Vec<u8>,
}

impl Row {
    pub fn new(text: Vec<u8>, tab_stop: usize) -> Self {
        let mut row = Self {
            text,
            rendered: Vec::new(),
        };
        row.update(tab_stop);
        row
    }

    pub fn text(&self) -> &[u8] {
        &self.text
    }

    pub fn rendered(&self) -> &[u8] {
        &self.rendered
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Rendered column of character column `cx`. Columns past the end are
    /// treated as the end of the row.
    pub fn cx_to_rx(&self, cx: usize, tab_stop: usize) -> usize {
        let mut rx = 0;
        for &byte in self.text.iter().take(cx) {
            if byte == b'\t' {
                rx += (tab_stop - 1) - (rx % tab_stop);
            }
            rx += 1;
        }
        rx
    }

    pub(super) fn insert(&mut self, at: usize, byte: u8, tab_stop: usize) {
        let at = at.min(self.text.len());
        self.text.insert(at, byte);
        self.update(tab_stop);
    }

    pub(super) fn remove(&mut self, at: usize, tab_stop: usize) -> bool {
        if at >= self.text.len() {
            return false;
        }
        self.text.remove(at);
        self.update(tab_stop);
        true
    }

    pub(super) fn append(&mut self, bytes: &[u8], tab_stop: usize) {
        self.text.extend_from_slice(bytes);
        self.update(tab_stop);
    }

    /// Cuts the row at `at` and returns the tail.
    pub(super) fn split_off(&mut self, at: usize, tab_stop: usize) -> Vec<u8> {
        let at = at.min(self.text.len());
        let tail = self.text.split_off(at);
        self.update(tab_stop);
        tail
    }

    fn update(&mut self, tab_stop: usize) {
        let tabs = self.text.iter().filter(|&&b| b == b'\t').count();
        let mut rendered = Vec::with_capacity(self.text.len() + tabs * (tab_stop - 1));
        for &byte in &self.text {
            if byte == b'\t' {
                rendered.push(b' ');
                while rendered.len() % tab_stop != 0 {
                    rendered.push(b' ');
                }
            } else {
                rendered.push(byte);
            }
        }
        self.rendered = rendered;
    }
}
