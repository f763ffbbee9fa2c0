use crate::logging;

use super::Editor;

impl Editor {
    /// Handles one quit request. A clean document quits at once; a dirty one
    /// needs `quit_times` requests in a row.
    pub(super) fn confirm_quit(&mut self) -> bool {
        if !self.document.dirty {
            return true;
        }
        self.quit_remaining = self.quit_remaining.saturating_sub(1);
        if self.quit_remaining == 0 {
            logging::warn(format!(
                "quitting with unsaved changes to {}",
                self.document.display_name()
            ));
            return true;
        }
        self.set_status(format!(
            "WARNING!!! File has unsaved changes. Press Ctrl-Q {} more times to quit.",
            self.quit_remaining
        ));
        false
    }

    pub(super) fn reset_quit_confirm(&mut self) {
        self.quit_remaining = self.quit_times;
    }

    /// Writes the document to its filename. Failures are reported on the
    /// message line and leave the document dirty.
    pub(super) fn write_document(&mut self) {
        match self.document.save() {
            Ok(written) => {
                logging::info(format!(
                    "wrote {written} bytes to {}",
                    self.document.display_name()
                ));
                self.set_status(format!("{written} bytes written to disk"));
            }
            Err(err) => {
                logging::error(format!(
                    "saving {} failed: {err}",
                    self.document.display_name()
                ));
                self.set_status(format!("Can't save! I/O error: {err}"));
            }
        }
    }
}
