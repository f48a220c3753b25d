use super::constants::*;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorError {
    #[error("color {0:?} does not start with '#'")]
    MissingHash(String),
    #[error("color {0:?} is not in #rrggbb form")]
    BadLength(String),
    #[error("color {0:?} has a non-hex digit")]
    BadDigit(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#rrggbb` color.
    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        let digits = hex
            .strip_prefix('#')
            .ok_or_else(|| ColorError::MissingHash(hex.to_string()))?;
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(ColorError::BadLength(hex.to_string()));
        }
        // from_str_radix alone would accept a leading '+'.
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorError::BadDigit(hex.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| ColorError::BadDigit(hex.to_string()))
        };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    #[inline]
    pub fn with_alpha(self, a: f32) -> Rgba {
        Rgba {
            rgb: self,
            a: a.clamp(0.0, 1.0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub rgb: Rgb,
    pub a: f32,
}

impl Rgba {
    pub const TRANSPARENT_WHITE: Rgba = Rgba {
        rgb: Rgb::WHITE,
        a: 0.0,
    };

    /// CSS form accepted by canvas fill styles and gradient stops.
    pub fn to_css(&self) -> String {
        format!(
            "rgba({}, {}, {}, {})",
            self.rgb.r, self.rgb.g, self.rgb.b, self.a
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Theme {
    Dark,
    #[default]
    Light,
}

impl Theme {
    #[inline]
    pub fn from_dark_flag(is_dark: bool) -> Self {
        if is_dark {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn default_hex(self) -> [&'static str; 3] {
        match self {
            Theme::Dark => ["#d19947", "#ca8c32", "#e2be8a"],
            Theme::Light => ["#ffd460", "#ffcc47", "#ffecb0"],
        }
    }

    /// Color used whenever a palette entry can't be parsed.
    pub fn fallback(self) -> Rgb {
        match self {
            Theme::Dark => Rgb::new(209, 153, 71),
            Theme::Light => Rgb::new(255, 212, 96),
        }
    }
}

/// Index into the three-color palette.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaletteSlot {
    Primary,
    Secondary,
    Tertiary,
}

impl PaletteSlot {
    /// Map a uniform roll in [0, 1) onto a three-way weighted choice given
    /// as two cumulative thresholds.
    pub fn pick(roll: f32, thresholds: [f32; 2]) -> Self {
        if roll < thresholds[0] {
            PaletteSlot::Primary
        } else if roll < thresholds[1] {
            PaletteSlot::Secondary
        } else {
            PaletteSlot::Tertiary
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        match self {
            PaletteSlot::Primary => 0,
            PaletteSlot::Secondary => 1,
            PaletteSlot::Tertiary => 2,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    pub theme: Theme,
    pub colors: [Rgb; 3],
    pub particle_glow_alpha: f32,
    pub beam_glow_alpha: f32,
    pub beam_base_alpha: f32,
    pub orb_center_alpha: f32,
    pub orb_mid_alpha: f32,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        Self::from_hex(theme, theme.default_hex())
    }

    /// Build a palette from hex strings; malformed entries fall back to the
    /// theme's default color.
    pub fn from_hex(theme: Theme, hex: [&str; 3]) -> Self {
        let colors = hex.map(|h| Self::parse_or_fallback(theme, h));
        Self {
            theme,
            colors,
            particle_glow_alpha: PARTICLE_GLOW_ALPHA,
            beam_glow_alpha: BEAM_GLOW_ALPHA,
            beam_base_alpha: BEAM_BASE_ALPHA,
            orb_center_alpha: ORB_CENTER_ALPHA,
            orb_mid_alpha: ORB_MID_ALPHA,
        }
    }

    fn parse_or_fallback(theme: Theme, hex: &str) -> Rgb {
        match Rgb::from_hex(hex) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("[palette] {e}; using theme fallback");
                theme.fallback()
            }
        }
    }

    #[inline]
    pub fn color(&self, slot: PaletteSlot) -> Rgb {
        self.colors[slot.index()]
    }

    #[inline]
    pub fn rgba(&self, slot: PaletteSlot, alpha: f32) -> Rgba {
        self.color(slot).with_alpha(alpha)
    }

    /// Hex to translucent color, never failing.
    pub fn translucent(&self, hex: &str, alpha: f32) -> Rgba {
        Self::parse_or_fallback(self.theme, hex).with_alpha(alpha)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::for_theme(Theme::default())
    }
}
