//! RGB colors as they appear in branding payloads.

use std::fmt;

use genpdf::style::Color;

use crate::error::Error;

/// An opaque 8-bit RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(0xff, 0xff, 0xff);

    /// Parses a hexadecimal color written with a `#` or `0x` prefix, or bare.
    ///
    /// The digits are read as one integer whose low 24 bits are `RRGGBB`, so `#abc`
    /// is `#000abc`. Exactly eight digits are read as `RRGGBBAA` and the alpha byte
    /// is dropped since PDF text and strokes are painted opaque.
    pub fn parse_hex(input: &str) -> Result<Self, Error> {
        let invalid = |reason| Error::InvalidColor {
            value: input.to_owned(),
            reason,
        };

        let trimmed = input.trim();
        let hex = trimmed
            .strip_prefix('#')
            .or_else(|| trimmed.strip_prefix("0x"))
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        if hex.is_empty() {
            return Err(invalid("no hexadecimal digits"));
        }
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid("contains non-hexadecimal characters"));
        }

        let rgb = if hex.len() == 8 {
            &hex[..6]
        } else {
            &hex[hex.len().saturating_sub(6)..]
        };
        let value = u32::from_str_radix(rgb, 16).map_err(|_| invalid("value out of range"))?;
        Ok(Rgb((value >> 16) as u8, (value >> 8) as u8, value as u8))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Color::Rgb(rgb.0, rgb.1, rgb.2)
    }
}

#[cfg(test)]
mod tests {
    use super::Rgb;

    #[test]
    fn parses_common_notations() {
        assert_eq!(Rgb::parse_hex("#2f8f83").unwrap(), Rgb(0x2f, 0x8f, 0x83));
        assert_eq!(Rgb::parse_hex("0xF6F3EF").unwrap(), Rgb(0xf6, 0xf3, 0xef));
        assert_eq!(Rgb::parse_hex("0f172a").unwrap(), Rgb(0x0f, 0x17, 0x2a));
        assert_eq!(Rgb::parse_hex("#11223380").unwrap(), Rgb(0x11, 0x22, 0x33));
    }

    #[test]
    fn short_values_fill_the_low_channels() {
        assert_eq!(Rgb::parse_hex("#abc").unwrap(), Rgb(0x00, 0x0a, 0xbc));
        assert_eq!(Rgb::parse_hex("#f").unwrap(), Rgb(0x00, 0x00, 0x0f));
        assert_eq!(Rgb::parse_hex("#12345").unwrap(), Rgb(0x01, 0x23, 0x45));
        assert_eq!(Rgb::parse_hex("#1234567").unwrap(), Rgb(0x23, 0x45, 0x67));
    }

    #[test]
    fn rejects_malformed_values() {
        assert!(Rgb::parse_hex("teal").is_err());
        assert!(Rgb::parse_hex("#12FG34").is_err());
        assert!(Rgb::parse_hex("#").is_err());
        assert!(Rgb::parse_hex("").is_err());
    }

    #[test]
    fn displays_as_lowercase_hex() {
        assert_eq!(Rgb(0x2f, 0x8f, 0x83).to_string(), "#2f8f83");
    }
}
