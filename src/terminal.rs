use std::fs::File;
use std::io::{self, Read, Write};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use anyhow::Result;
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};

/// Holds the terminal in raw mode on the alternate screen until dropped.
pub struct TerminalGuard;

impl TerminalGuard {
    pub fn enter() -> Result<Self> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

/// A second handle on stdout without `Stdout`'s line buffering, so a frame
/// written with one `write_all` reaches the terminal in one piece.
pub fn unbuffered_stdout() -> io::Result<File> {
    #[cfg(unix)]
    let handle = {
        use std::os::fd::AsFd;
        io::stdout().as_fd().try_clone_to_owned()?
    };
    #[cfg(windows)]
    let handle = {
        use std::os::windows::io::AsHandle;
        io::stdout().as_handle().try_clone_to_owned()?
    };
    Ok(File::from(handle))
}

/// A stream of raw input bytes that can be waited on with a deadline.
pub trait ByteSource {
    /// Waits up to `timeout` for one byte. `Ok(None)` means nothing arrived in
    /// time; an `UnexpectedEof` error means the source is closed for good.
    fn read_byte(&mut self, timeout: Duration) -> io::Result<Option<u8>>;
}

/// Stdin bytes pumped through a channel by a reader thread.
pub struct StdinBytes {
    rx: Receiver<io::Result<u8>>,
}

impl StdinBytes {
    pub fn spawn() -> Self {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let stdin = io::stdin();
            let mut stdin = stdin.lock();
            let mut byte = [0u8; 1];
            loop {
                match stdin.read(&mut byte) {
                    Ok(0) => break,
                    Ok(_) => {
                        if tx.send(Ok(byte[0])).is_err() {
                            break;
                        }
                    }
                    Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                    Err(err) => {
                        let _ = tx.send(Err(err));
                        break;
                    }
                }
            }
        });
        Self { rx }
    }
}

impl ByteSource for StdinBytes {
    fn read_byte(&mut self, timeout: Duration) -> io::Result<Option<u8>> {
        match self.rx.recv_timeout(timeout) {
            Ok(Ok(byte)) => Ok(Some(byte)),
            Ok(Err(err)) => Err(err),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input stream closed",
            )),
        }
    }
}

const REPORT_TIMEOUT: Duration = Duration::from_millis(500);

/// Terminal size as `(rows, cols)`. Falls back to parking the cursor in the
/// bottom-right corner and asking the terminal where it ended up.
pub fn window_size<S, W>(source: &mut S, out: &mut W) -> io::Result<(u16, u16)>
where
    S: ByteSource + ?Sized,
    W: Write + ?Sized,
{
    match crossterm::terminal::size() {
        Ok((cols, rows)) if cols > 0 && rows > 0 => Ok((rows, cols)),
        _ => query_window_size(source, out),
    }
}

fn query_window_size<S, W>(source: &mut S, out: &mut W) -> io::Result<(u16, u16)>
where
    S: ByteSource + ?Sized,
    W: Write + ?Sized,
{
    out.write_all(b"\x1b[999C\x1b[999B\x1b[6n")?;
    out.flush()?;

    let mut reply = Vec::with_capacity(16);
    while reply.len() < 32 {
        match source.read_byte(REPORT_TIMEOUT)? {
            Some(b'R') => break,
            Some(byte) => reply.push(byte),
            None => break,
        }
    }
    parse_cursor_report(&reply).ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidData, "unreadable cursor position report")
    })
}

/// Parses the body of a `ESC [ rows ; cols R` report (without the final `R`).
pub fn parse_cursor_report(reply: &[u8]) -> Option<(u16, u16)> {
    let body = reply.strip_prefix(b"\x1b[")?;
    let body = std::str::from_utf8(body).ok()?;
    let (rows, cols) = body.split_once(';')?;
    Some((rows.parse().ok()?, cols.parse().ok()?))
}
