//! ANSI sequence parser for terminal input.
//!
//! Turns raw bytes from the terminal into [`Event`]s. Understands:
//! - Control characters and UTF-8 text
//! - CSI and SS3 key sequences, with xterm modifier parameters
//! - SGR (1006) and legacy X10 mouse reports
//! - Bracketed paste
//! - Focus and XTWINOPS resize reports
//!
//! [`InputParser::parse`] decodes one event from the front of a slice.
//! [`InputParser::feed`] is the streaming form: it buffers partial
//! sequences between reads and skips anything it cannot decode.

// One arm per terminal sequence reads better than merged patterns.
#![allow(clippy::match_same_arms)]

use crate::input::event::Event;
use crate::input::keyboard::{KeyCode, KeyEvent, KeyModifiers};
use crate::terminal::{MouseButton, MouseEvent, MouseEventKind};

/// Why no event could be decoded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseError {
    Empty,
    /// The input ends inside a sequence; more bytes are needed.
    Incomplete,
    /// A sequence that means nothing to us, of the given length.
    Unrecognized(usize),
    InvalidUtf8,
    /// A bracketed paste grew past [`MAX_PASTE_BYTES`] without ending.
    PasteTooLarge,
}

/// An event and the number of bytes it consumed.
pub type ParseResult = Result<(Event, usize), ParseError>;

/// Largest bracketed paste that is buffered while waiting for its end.
pub const MAX_PASTE_BYTES: usize = 1024 * 1024;

const PASTE_START: &[u8] = b"\x1b[200~";
const PASTE_END: &[u8] = b"\x1b[201~";

/// Streaming input parser.
#[derive(Clone, Debug, Default)]
pub struct InputParser {
    pending: Vec<u8>,
}

impl InputParser {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether bytes of an unfinished sequence are buffered.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Append freshly read bytes and decode every complete event.
    ///
    /// Unrecognized sequences and invalid bytes are skipped. An incomplete
    /// tail stays buffered for the next call.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<Event> {
        self.pending.extend_from_slice(bytes);

        let mut events = Vec::new();
        let mut pos = 0;
        while pos < self.pending.len() {
            match self.parse(&self.pending[pos..]) {
                Ok((event, consumed)) => {
                    events.push(event);
                    pos += consumed;
                }
                Err(ParseError::Incomplete | ParseError::Empty) => break,
                Err(ParseError::Unrecognized(len)) => {
                    tracing::trace!(len, "skipping unrecognized input sequence");
                    pos += len.max(1);
                }
                Err(ParseError::InvalidUtf8) => pos += 1,
                Err(ParseError::PasteTooLarge) => {
                    tracing::warn!(bytes = self.pending.len() - pos, "dropping oversized paste");
                    pos = self.pending.len();
                }
            }
        }
        self.pending.drain(..pos);
        events
    }

    /// Resolve a buffered lone escape once no more bytes are coming.
    ///
    /// A terminal sends the Escape key as a bare `ESC`, which is also the
    /// first byte of every sequence. After a read timeout it can only be
    /// the key.
    pub fn flush(&mut self) -> Vec<Event> {
        let mut events = Vec::new();
        if self.pending.first() == Some(&0x1b) && !self.pending.starts_with(PASTE_START) {
            self.pending.remove(0);
            events.push(KeyEvent::key(KeyCode::Esc).into());
            events.extend(self.feed(&[]));
        }
        events
    }

    /// Drop any buffered bytes.
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Decode one event from the start of `input`.
    pub fn parse(&self, input: &[u8]) -> ParseResult {
        let Some(&first) = input.first() else {
            return Err(ParseError::Empty);
        };

        let key = |code: KeyCode| -> ParseResult { Ok((KeyEvent::key(code).into(), 1)) };
        match first {
            0x1b => self.parse_escape(input),
            b'\r' | b'\n' => key(KeyCode::Enter),
            b'\t' => key(KeyCode::Tab),
            0x7f | 0x08 => key(KeyCode::Backspace),
            0x00 => key(KeyCode::Null),
            0x01..=0x1a => {
                let c = char::from(first - 1 + b'a');
                Ok((KeyEvent::with_ctrl(KeyCode::Char(c)).into(), 1))
            }
            0x1c..=0x1f => {
                let c = char::from(first + 0x40);
                Ok((KeyEvent::with_ctrl(KeyCode::Char(c)).into(), 1))
            }
            0x20..=0x7e => Ok((KeyEvent::char(char::from(first)).into(), 1)),
            _ => parse_utf8(input),
        }
    }

    fn parse_escape(&self, input: &[u8]) -> ParseResult {
        let Some(&second) = input.get(1) else {
            return Err(ParseError::Incomplete);
        };
        match second {
            b'[' => self.parse_csi(input),
            b'O' => parse_ss3(input),
            0x20..=0x7e => {
                let alt = KeyEvent::new(KeyCode::Char(char::from(second)), KeyModifiers::ALT);
                Ok((alt.into(), 2))
            }
            _ => Ok((KeyEvent::key(KeyCode::Esc).into(), 1)),
        }
    }

    fn parse_csi(&self, input: &[u8]) -> ParseResult {
        if input.len() < 3 {
            return Err(ParseError::Incomplete);
        }
        if input[2] == b'M' {
            return parse_x10_mouse(input);
        }

        // Parameter and intermediate bytes run until a final byte.
        let mut end = 2;
        loop {
            match input.get(end) {
                None => return Err(ParseError::Incomplete),
                Some(0x40..=0x7e) => break,
                Some(0x20..=0x3f) => end += 1,
                Some(_) => return Err(ParseError::Unrecognized(end)),
            }
        }
        let params = &input[2..end];
        let consumed = end + 1;

        match input[end] {
            b'A' => modified_key(params, KeyCode::Up, consumed),
            b'B' => modified_key(params, KeyCode::Down, consumed),
            b'C' => modified_key(params, KeyCode::Right, consumed),
            b'D' => modified_key(params, KeyCode::Left, consumed),
            b'H' => modified_key(params, KeyCode::Home, consumed),
            b'F' => modified_key(params, KeyCode::End, consumed),
            b'Z' => Ok((KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT).into(), consumed)),
            b'~' if params == b"200" => parse_paste(input, consumed),
            b'~' => tilde_key(params, consumed),
            b'M' | b'm' if params.first() == Some(&b'<') => {
                parse_sgr_mouse(&params[1..], input[end] == b'm', consumed)
            }
            b'I' if params.is_empty() => Ok((Event::FocusGained, consumed)),
            b'O' if params.is_empty() => Ok((Event::FocusLost, consumed)),
            b't' => parse_resize(params, consumed),
            _ => Err(ParseError::Unrecognized(consumed)),
        }
    }
}

/// Split `;`-separated numeric parameters; empty fields read as `None`.
fn numeric_params(params: &[u8]) -> Vec<Option<u32>> {
    std::str::from_utf8(params)
        .unwrap_or_default()
        .split(';')
        .map(|field| field.parse().ok())
        .collect()
}

fn modifier_param(fields: &[Option<u32>]) -> KeyModifiers {
    fields
        .get(1)
        .copied()
        .flatten()
        .and_then(|n| u8::try_from(n).ok())
        .map_or(KeyModifiers::empty(), KeyModifiers::from_xterm_param)
}

fn modified_key(params: &[u8], code: KeyCode, consumed: usize) -> ParseResult {
    let modifiers = modifier_param(&numeric_params(params));
    Ok((KeyEvent::new(code, modifiers).into(), consumed))
}

fn tilde_key(params: &[u8], consumed: usize) -> ParseResult {
    let fields = numeric_params(params);
    let code = match fields.first().copied().flatten() {
        Some(1 | 7) => KeyCode::Home,
        Some(2) => KeyCode::Insert,
        Some(3) => KeyCode::Delete,
        Some(4 | 8) => KeyCode::End,
        Some(5) => KeyCode::PageUp,
        Some(6) => KeyCode::PageDown,
        Some(n @ 11..=15) => KeyCode::F((n - 10) as u8),
        Some(n @ 17..=21) => KeyCode::F((n - 11) as u8),
        Some(n @ 23..=26) => KeyCode::F((n - 12) as u8),
        Some(n @ 28..=29) => KeyCode::F((n - 13) as u8),
        Some(n @ 31..=34) => KeyCode::F((n - 14) as u8),
        _ => return Err(ParseError::Unrecognized(consumed)),
    };
    Ok((KeyEvent::new(code, modifier_param(&fields)).into(), consumed))
}

fn parse_ss3(input: &[u8]) -> ParseResult {
    let Some(&byte) = input.get(2) else {
        return Err(ParseError::Incomplete);
    };
    let code = match byte {
        b'P' => KeyCode::F(1),
        b'Q' => KeyCode::F(2),
        b'R' => KeyCode::F(3),
        b'S' => KeyCode::F(4),
        b'A' => KeyCode::Up,
        b'B' => KeyCode::Down,
        b'C' => KeyCode::Right,
        b'D' => KeyCode::Left,
        b'H' => KeyCode::Home,
        b'F' => KeyCode::End,
        b'M' => KeyCode::Enter,
        _ => return Err(ParseError::Unrecognized(3)),
    };
    Ok((KeyEvent::key(code).into(), 3))
}

/// Bracketed paste: everything up to `ESC [ 201 ~` is literal text.
fn parse_paste(input: &[u8], content_start: usize) -> ParseResult {
    let body = &input[content_start..];
    match body.windows(PASTE_END.len()).position(|w| w == PASTE_END) {
        Some(len) => {
            let text = String::from_utf8_lossy(&body[..len]).into_owned();
            Ok((Event::Paste(text), content_start + len + PASTE_END.len()))
        }
        None if body.len() > MAX_PASTE_BYTES => Err(ParseError::PasteTooLarge),
        None => Err(ParseError::Incomplete),
    }
}

/// SGR mouse report body: `Pb ; Px ; Py` (1-based coordinates).
fn parse_sgr_mouse(body: &[u8], release: bool, consumed: usize) -> ParseResult {
    let fields = numeric_params(body);
    let (Some(Some(code)), Some(Some(x)), Some(Some(y))) =
        (fields.first(), fields.get(1), fields.get(2))
    else {
        return Err(ParseError::Unrecognized(consumed));
    };

    let (button, mut kind) = decode_button(*code);
    if release {
        kind = MouseEventKind::Release;
    }
    let event = MouseEvent::new(x.saturating_sub(1), y.saturating_sub(1), button, kind);
    Ok((Event::Mouse(with_button_modifiers(event, *code)), consumed))
}

/// Legacy X10 report: `ESC [ M` followed by three bytes offset by 32.
fn parse_x10_mouse(input: &[u8]) -> ParseResult {
    let [_, _, _, cb, cx, cy, ..] = input else {
        return Err(ParseError::Incomplete);
    };
    let code = u32::from(cb.wrapping_sub(32));
    let (button, kind) = match decode_button(code) {
        (_, MouseEventKind::Press) if code & 0b11 == 3 => {
            (MouseButton::None, MouseEventKind::Release)
        }
        decoded => decoded,
    };
    let x = u32::from(cx.saturating_sub(33));
    let y = u32::from(cy.saturating_sub(33));
    let event = MouseEvent::new(x, y, button, kind);
    Ok((Event::Mouse(with_button_modifiers(event, code)), 6))
}

fn decode_button(code: u32) -> (MouseButton, MouseEventKind) {
    let low = code & 0b11;
    if code & 0b0100_0000 != 0 {
        let kind = match low {
            0 => MouseEventKind::ScrollUp,
            1 => MouseEventKind::ScrollDown,
            2 => MouseEventKind::ScrollLeft,
            _ => MouseEventKind::ScrollRight,
        };
        return (MouseButton::None, kind);
    }

    let button = match low {
        0 => MouseButton::Left,
        1 => MouseButton::Middle,
        2 => MouseButton::Right,
        _ => MouseButton::None,
    };
    let kind = if code & 0b0010_0000 != 0 {
        MouseEventKind::Move
    } else {
        MouseEventKind::Press
    };
    (button, kind)
}

fn with_button_modifiers(event: MouseEvent, code: u32) -> MouseEvent {
    event.with_modifiers(code & 4 != 0, code & 16 != 0, code & 8 != 0)
}

/// XTWINOPS size report: `CSI 8 ; rows ; cols t`.
fn parse_resize(params: &[u8], consumed: usize) -> ParseResult {
    let fields = numeric_params(params);
    match fields.as_slice() {
        [Some(8), Some(rows), Some(cols)] => {
            let height = u16::try_from(*rows).map_err(|_| ParseError::Unrecognized(consumed))?;
            let width = u16::try_from(*cols).map_err(|_| ParseError::Unrecognized(consumed))?;
            Ok((Event::Resize { width, height }, consumed))
        }
        _ => Err(ParseError::Unrecognized(consumed)),
    }
}

fn parse_utf8(input: &[u8]) -> ParseResult {
    let expected = match input[0] {
        0xc2..=0xdf => 2,
        0xe0..=0xef => 3,
        0xf0..=0xf4 => 4,
        _ => return Err(ParseError::InvalidUtf8),
    };
    if input.len() < expected {
        return if input[1..].iter().all(|b| (0x80..=0xbf).contains(b)) {
            Err(ParseError::Incomplete)
        } else {
            Err(ParseError::InvalidUtf8)
        };
    }
    let s = std::str::from_utf8(&input[..expected]).map_err(|_| ParseError::InvalidUtf8)?;
    let c = s.chars().next().ok_or(ParseError::InvalidUtf8)?;
    Ok((KeyEvent::char(c).into(), expected))
}
