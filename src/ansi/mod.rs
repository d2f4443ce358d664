//! ANSI escape sequence generation.

pub mod output;
pub mod sequences;

pub use output::AnsiWriter;
pub use sequences::*;

use crate::color::Rgba;
use crate::style::TextAttributes;
use std::io::{self, Write};
use std::str::FromStr;

/// Color output mode for ANSI sequences.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// True color (24-bit RGB).
    #[default]
    TrueColor,
    /// 256-color palette.
    Color256,
    /// 16-color (basic ANSI).
    Color16,
    /// No color output.
    NoColor,
}

impl FromStr for ColorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "truecolor" | "24bit" => Ok(Self::TrueColor),
            "256" => Ok(Self::Color256),
            "16" => Ok(Self::Color16),
            "none" | "mono" => Ok(Self::NoColor),
            other => Err(format!("unknown color mode: {other}")),
        }
    }
}

/// Write a u8 as decimal digits without formatting overhead.
#[inline]
fn write_u8_decimal(w: &mut impl Write, n: u8) -> io::Result<()> {
    if n >= 100 {
        w.write_all(&[b'0' + n / 100, b'0' + (n / 10) % 10, b'0' + n % 10])
    } else if n >= 10 {
        w.write_all(&[b'0' + n / 10, b'0' + n % 10])
    } else {
        w.write_all(&[b'0' + n])
    }
}

/// Write a u32 as decimal digits without formatting overhead.
#[inline]
fn write_u32_decimal(w: &mut impl Write, n: u32) -> io::Result<()> {
    let mut buf = [0u8; 10];
    let mut i = buf.len();
    let mut val = n;
    loop {
        i -= 1;
        buf[i] = b'0' + (val % 10) as u8;
        val /= 10;
        if val == 0 {
            break;
        }
    }
    w.write_all(&buf[i..])
}

/// Shared body of the fg/bg writers. `base` is 38 or 48.
fn write_color(w: &mut impl Write, color: Rgba, mode: ColorMode, base: u8) -> io::Result<()> {
    match mode {
        ColorMode::TrueColor => {
            let (r, g, b) = color.to_rgb_u8();
            w.write_all(b"\x1b[")?;
            write_u8_decimal(w, base)?;
            w.write_all(b";2;")?;
            write_u8_decimal(w, r)?;
            w.write_all(b";")?;
            write_u8_decimal(w, g)?;
            w.write_all(b";")?;
            write_u8_decimal(w, b)?;
            w.write_all(b"m")
        }
        ColorMode::Color256 => {
            w.write_all(b"\x1b[")?;
            write_u8_decimal(w, base)?;
            w.write_all(b";5;")?;
            write_u8_decimal(w, color.to_256_color())?;
            w.write_all(b"m")
        }
        ColorMode::Color16 => {
            let idx = color.to_16_color();
            // 30-37 / 40-47 normal, 90-97 / 100-107 bright
            let normal = base - 8;
            let code = if idx < 8 {
                normal + idx
            } else {
                normal + 60 + idx - 8
            };
            w.write_all(b"\x1b[")?;
            write_u8_decimal(w, code)?;
            w.write_all(b"m")
        }
        ColorMode::NoColor => Ok(()),
    }
}

/// Write the SGR sequence for a foreground color.
pub fn write_fg_color_with_mode(
    w: &mut impl Write,
    color: Rgba,
    mode: ColorMode,
) -> io::Result<()> {
    write_color(w, color, mode, 38)
}

/// Write the SGR sequence for a background color.
pub fn write_bg_color_with_mode(
    w: &mut impl Write,
    color: Rgba,
    mode: ColorMode,
) -> io::Result<()> {
    write_color(w, color, mode, 48)
}

/// Write the SGR sequence that turns on `attrs`.
pub fn write_attributes(w: &mut impl Write, attrs: TextAttributes) -> io::Result<()> {
    const CODES: [(TextAttributes, &[u8]); 5] = [
        (TextAttributes::BOLD, b"1"),
        (TextAttributes::DIM, b"2"),
        (TextAttributes::ITALIC, b"3"),
        (TextAttributes::UNDERLINE, b"4"),
        (TextAttributes::INVERSE, b"7"),
    ];

    if attrs.is_empty() {
        return Ok(());
    }
    w.write_all(b"\x1b[")?;
    let mut first = true;
    for (flag, code) in CODES {
        if attrs.contains(flag) {
            if !first {
                w.write_all(b";")?;
            }
            w.write_all(code)?;
            first = false;
        }
    }
    w.write_all(b"m")
}

/// Write an absolute cursor position; `row` and `col` are 0-based.
pub fn write_cursor_position(w: &mut impl Write, row: u32, col: u32) -> io::Result<()> {
    w.write_all(b"\x1b[")?;
    write_u32_decimal(w, row + 1)?;
    w.write_all(b";")?;
    write_u32_decimal(w, col + 1)?;
    w.write_all(b"H")
}

/// Write a relative cursor movement.
pub fn write_cursor_move(w: &mut impl Write, dx: i32, dy: i32) -> io::Result<()> {
    let mut step = |n: u32, letter: u8| -> io::Result<()> {
        w.write_all(b"\x1b[")?;
        write_u32_decimal(w, n)?;
        w.write_all(&[letter])
    };
    match dy.signum() {
        -1 => step(dy.unsigned_abs(), b'A')?,
        1 => step(dy.unsigned_abs(), b'B')?,
        _ => {}
    }
    match dx.signum() {
        1 => step(dx.unsigned_abs(), b'C')?,
        -1 => step(dx.unsigned_abs(), b'D')?,
        _ => {}
    }
    Ok(())
}
