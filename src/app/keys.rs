use std::io;
use std::time::Duration;

use crate::terminal::ByteSource;

const ESC: u8 = 0x1b;
const POLL_INTERVAL: Duration = Duration::from_millis(100);
const SEQUENCE_TIMEOUT: Duration = Duration::from_millis(100);

pub const ENTER: u8 = b'\r';
pub const BACKSPACE: u8 = 127;
pub const CTRL_H: u8 = ctrl(b'h');

/// Byte produced by holding Ctrl with `key`.
pub const fn ctrl(key: u8) -> u8 {
    key & 0x1f
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(u8),
    Control(u8),
    Escape,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    Delete,
    PageUp,
    PageDown,
}

impl Key {
    fn from_byte(byte: u8) -> Self {
        match byte {
            ESC => Key::Escape,
            0..=31 | 127 => Key::Control(byte),
            _ => Key::Char(byte),
        }
    }
}

/// Decoder position within an escape sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum State {
    Start,
    SawEsc,
    SawBracket,
    SawBracketDigit(u8),
    SawO,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    Pending(State),
    Done(Key),
}

impl State {
    /// Key emitted when the terminal goes quiet mid-sequence.
    pub(crate) fn on_timeout(self) -> Key {
        Key::Escape
    }
}

pub(crate) fn step(state: State, byte: u8) -> Step {
    match state {
        State::Start if byte == ESC => Step::Pending(State::SawEsc),
        State::Start => Step::Done(Key::from_byte(byte)),
        State::SawEsc => match byte {
            b'[' => Step::Pending(State::SawBracket),
            b'O' => Step::Pending(State::SawO),
            _ => Step::Done(Key::Escape),
        },
        State::SawBracket => match byte {
            b'0'..=b'9' => Step::Pending(State::SawBracketDigit(byte)),
            b'A' => Step::Done(Key::Up),
            b'B' => Step::Done(Key::Down),
            b'C' => Step::Done(Key::Right),
            b'D' => Step::Done(Key::Left),
            b'H' => Step::Done(Key::Home),
            b'F' => Step::Done(Key::End),
            _ => Step::Done(Key::Escape),
        },
        State::SawBracketDigit(digit) if byte == b'~' => Step::Done(match digit {
            b'1' => Key::Home,
            b'3' => Key::Delete,
            b'4' | b'8' => Key::End,
            b'5' => Key::PageUp,
            b'6' => Key::PageDown,
            _ => Key::Escape,
        }),
        State::SawBracketDigit(_) => Step::Done(Key::Escape),
        State::SawO => match byte {
            b'H' => Step::Done(Key::Home),
            b'F' => Step::Done(Key::End),
            _ => Step::Done(Key::Escape),
        },
    }
}

/// Turns a byte source into an endless stream of keys. The stream ends only
/// when the source reports that it is closed.
pub struct KeyDecoder<S> {
    source: S,
}

impl<S: ByteSource> KeyDecoder<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    fn wait_byte(&mut self) -> io::Result<u8> {
        loop {
            if let Some(byte) = self.source.read_byte(POLL_INTERVAL)? {
                return Ok(byte);
            }
        }
    }

    fn decode(&mut self) -> io::Result<Key> {
        let first = self.wait_byte()?;
        let mut state = match step(State::Start, first) {
            Step::Done(key) => return Ok(key),
            Step::Pending(state) => state,
        };
        loop {
            let byte = match self.source.read_byte(SEQUENCE_TIMEOUT) {
                Ok(Some(byte)) => byte,
                Ok(None) => return Ok(state.on_timeout()),
                Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => {
                    return Ok(state.on_timeout());
                }
                Err(err) => return Err(err),
            };
            state = match step(state, byte) {
                Step::Done(key) => return Ok(key),
                Step::Pending(next) => next,
            };
        }
    }
}

impl<S: ByteSource> Iterator for KeyDecoder<S> {
    type Item = io::Result<Key>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.decode() {
            Ok(key) => Some(Ok(key)),
            Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => None,
            Err(err) => Some(Err(err)),
        }
    }
}
