//! Light and dark palettes for the picker.

use crate::color::Rgba;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which palette to draw with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    #[default]
    Dark,
}

impl FromStr for ThemeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(format!("unknown theme '{other}' (expected light or dark)")),
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Light => "light",
            Self::Dark => "dark",
        })
    }
}

/// Number of hover card backgrounds per mode.
pub const HOVER_VARIANTS: usize = 4;

/// Resolved colors for one mode.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    pub mode: ThemeMode,
    pub background: Rgba,
    /// Inset border, drawn translucent over the background.
    pub border: Rgba,
    pub tab_enabled: Rgba,
    pub tab_disabled: Rgba,
    /// Section header background; translucent so content shows under a
    /// sticky header.
    pub header_bg: Rgba,
    pub header_fg: Rgba,
    /// Typed query text.
    pub query_fg: Rgba,
    pub search_icon: Rgba,
    pub footer_bg: Rgba,
    pub brand_fg: Rgba,
    pub description_fg: Rgba,
    pub hover: [Rgba; HOVER_VARIANTS],
}

impl Theme {
    #[must_use]
    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self::light(),
            ThemeMode::Dark => Self::dark(),
        }
    }

    #[must_use]
    pub fn light() -> Self {
        Self {
            mode: ThemeMode::Light,
            background: Rgba::WHITE,
            border: Rgba::from_rgba_u8(255, 255, 255, 51),
            tab_enabled: Rgba::from_rgb_u8(0x00, 0x55, 0xFF),
            tab_disabled: Rgba::from_rgb_u8(0x99, 0x99, 0x99),
            header_bg: Rgba::new(1.0, 1.0, 1.0, 0.95),
            header_fg: Rgba::from_rgb_u8(0x11, 0x11, 0x11),
            query_fg: Rgba::from_rgb_u8(0x11, 0x11, 0x11),
            search_icon: Rgba::from_rgb_u8(0x77, 0x77, 0x77),
            footer_bg: Rgba::from_rgb_u8(0xF5, 0xF5, 0xF5),
            brand_fg: Rgba::from_rgb_u8(0x66, 0x66, 0x66),
            description_fg: Rgba::from_rgb_u8(0x22, 0x22, 0x22),
            hover: [
                Rgba::new(0.0, 0.333, 1.0, 0.12),
                Rgba::new(1.0, 0.667, 0.0, 0.18),
                Rgba::new(0.0, 0.784, 0.471, 0.15),
                Rgba::new(1.0, 0.235, 0.471, 0.14),
            ],
        }
    }

    #[must_use]
    pub fn dark() -> Self {
        Self {
            mode: ThemeMode::Dark,
            background: Rgba::from_rgb_u8(0x11, 0x11, 0x11),
            border: Rgba::from_rgba_u8(255, 255, 255, 51),
            tab_enabled: Rgba::from_rgb_u8(0xEE, 0xEE, 0xEE),
            tab_disabled: Rgba::from_rgb_u8(0x66, 0x66, 0x66),
            header_bg: Rgba::new(0.067, 0.067, 0.067, 0.9),
            header_fg: Rgba::from_rgb_u8(0xEE, 0xEE, 0xEE),
            query_fg: Rgba::from_rgb_u8(0xEE, 0xEE, 0xEE),
            search_icon: Rgba::from_rgb_u8(0x66, 0x66, 0x66),
            footer_bg: Rgba::from_rgb_u8(0x22, 0x22, 0x22),
            brand_fg: Rgba::from_rgb_u8(0xCC, 0xCC, 0xCC),
            description_fg: Rgba::from_rgb_u8(0xEE, 0xEE, 0xEE),
            hover: [
                Rgba::new(0.0, 0.333, 1.0, 0.30),
                Rgba::new(1.0, 0.667, 0.0, 0.25),
                Rgba::new(0.0, 0.784, 0.471, 0.25),
                Rgba::new(1.0, 0.235, 0.471, 0.25),
            ],
        }
    }

    /// Hover background for a variant index (wraps).
    #[must_use]
    pub fn hover_color(&self, variant: usize) -> Rgba {
        self.hover[variant % HOVER_VARIANTS]
    }

    /// Header background as it looks pinned over the widget background.
    ///
    /// The background is opaque, so the result is too; alpha is pinned to
    /// 1.0 to absorb float rounding.
    #[must_use]
    pub fn sticky_header_bg(&self) -> Rgba {
        self.header_bg.blend_over(self.background).with_alpha(1.0)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::for_mode(ThemeMode::default())
    }
}

/// Per-record hover variant, fixed for the life of a picker.
///
/// Drawn from a seeded xorshift64 stream so a given seed always paints
/// the same card the same color.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HoverVariants {
    variants: Vec<u8>,
}

impl HoverVariants {
    #[must_use]
    pub fn seeded(seed: u64, count: usize) -> Self {
        let mut state = seed.wrapping_add(1);
        let variants = (0..count)
            .map(|_| {
                state ^= state << 13;
                state ^= state >> 7;
                state ^= state << 17;
                (state % HOVER_VARIANTS as u64) as u8
            })
            .collect();
        Self { variants }
    }

    /// Variant for a record; out-of-range indices get variant 0.
    #[must_use]
    pub fn get(&self, record: usize) -> usize {
        self.variants.get(record).copied().map_or(0, usize::from)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.variants.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }
}
