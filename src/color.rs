use crate::error::{VeneerError, VeneerResult};

/// Channel floor above which a color counts as "near white" for background
/// defect detection.
const NEAR_WHITE_MIN: u8 = 250;

/// Straight (non-premultiplied) RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const TRANSPARENT: Self = Self {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };
    pub const WHITE: Self = Self {
        r: 255,
        g: 255,
        b: 255,
        a: 255,
    };
    pub const BLACK: Self = Self {
        r: 0,
        g: 0,
        b: 0,
        a: 255,
    };

    pub fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parses `#rgb`, `#rrggbb` or `#rrggbbaa` hex notation.
    pub fn parse_hex(s: &str) -> VeneerResult<Self> {
        let hex = s.trim().strip_prefix('#').ok_or_else(|| {
            VeneerError::validation(format!("color '{s}' must start with '#'"))
        })?;

        let nibble = |c: u8| -> VeneerResult<u8> {
            (c as char)
                .to_digit(16)
                .map(|d| d as u8)
                .ok_or_else(|| VeneerError::validation(format!("color '{s}' has a non-hex digit")))
        };
        let byte = |hi: u8, lo: u8| -> VeneerResult<u8> { Ok(nibble(hi)? << 4 | nibble(lo)?) };

        let d = hex.as_bytes();
        match d.len() {
            3 => Ok(Self {
                r: byte(d[0], d[0])?,
                g: byte(d[1], d[1])?,
                b: byte(d[2], d[2])?,
                a: 255,
            }),
            6 => Ok(Self {
                r: byte(d[0], d[1])?,
                g: byte(d[2], d[3])?,
                b: byte(d[4], d[5])?,
                a: 255,
            }),
            8 => Ok(Self {
                r: byte(d[0], d[1])?,
                g: byte(d[2], d[3])?,
                b: byte(d[4], d[5])?,
                a: byte(d[6], d[7])?,
            }),
            n => Err(VeneerError::validation(format!(
                "color '{s}' has {n} hex digits, expected 3, 6 or 8"
            ))),
        }
    }

    /// Lowercase `#rrggbb` (or `#rrggbbaa` when not fully opaque).
    pub fn to_hex_string(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    pub fn is_near_white(self) -> bool {
        self.a == 255
            && self.r >= NEAR_WHITE_MIN
            && self.g >= NEAR_WHITE_MIN
            && self.b >= NEAR_WHITE_MIN
    }

    /// Component-wise linear interpolation, `t` clamped to `[0, 1]`.
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| -> u8 {
            (f32::from(a) + (f32::from(b) - f32::from(a)) * t).round() as u8
        };
        Self {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_short_and_long_hex() {
        assert_eq!(Rgba8::parse_hex("#fff").unwrap(), Rgba8::WHITE);
        assert_eq!(
            Rgba8::parse_hex("#112233").unwrap(),
            Rgba8::opaque(0x11, 0x22, 0x33)
        );
        assert_eq!(Rgba8::parse_hex("#00000000").unwrap().a, 0);
    }

    #[test]
    fn rejects_malformed_hex() {
        assert!(Rgba8::parse_hex("112233").is_err());
        assert!(Rgba8::parse_hex("#12345").is_err());
        assert!(Rgba8::parse_hex("#gg0011").is_err());
    }

    #[test]
    fn hex_string_round_trips() {
        for s in ["#007b5c", "#ffffff", "#0a0b0c7f"] {
            assert_eq!(Rgba8::parse_hex(s).unwrap().to_hex_string(), s);
        }
    }

    #[test]
    fn near_white_threshold() {
        assert!(Rgba8::WHITE.is_near_white());
        assert!(Rgba8::opaque(250, 252, 255).is_near_white());
        assert!(!Rgba8::opaque(249, 255, 255).is_near_white());
        assert!(!Rgba8 { a: 128, ..Rgba8::WHITE }.is_near_white());
    }

    #[test]
    fn lerp_endpoints_and_midpoint() {
        let a = Rgba8::BLACK;
        let b = Rgba8::WHITE;
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5).r, 128);
    }
}
