use derive_more::{AsRef, Deref, Display, From, Into};
use palette::{Srgb, Srgba};
use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct LabelText(String);

crate::impl_string_newtype!(LabelText);

impl Default for LabelText {
    fn default() -> Self {
        Self::new(super::DEFAULT_LABEL)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("Invalid hex color '{0}', expected #rgb or #rrggbb")]
    InvalidHex(String),
}

/// An opaque sRGB color written as `#rrggbb` in configuration.
#[derive(Debug, Clone, Copy, PartialEq, SerializeDisplay, DeserializeFromStr)]
pub struct HexColor(Srgb<u8>);

impl HexColor {
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self(Srgb::new(red, green, blue))
    }

    pub fn to_srgba(self) -> Srgba<f64> {
        let c: Srgb<f64> = self.0.into_format();
        Srgba::new(c.red, c.green, c.blue, 1.0)
    }
}

impl FromStr for HexColor {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Srgb::<u8>::from_str(s.trim())
            .map(Self)
            .map_err(|_| ColorParseError::InvalidHex(s.to_string()))
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{:02x}{:02x}{:02x}",
            self.0.red, self.0.green, self.0.blue
        )
    }
}

pub const DEFAULT_PANEL_COLOR: HexColor = HexColor::rgb(0x3b, 0xb0, 0x5c);
pub const DEFAULT_REVEALED_COLOR: HexColor = HexColor::rgb(0x1d, 0x6b, 0x35);
pub const LABEL_COLOR: HexColor = HexColor::rgb(0xff, 0xff, 0xff);

/// Everything the host needs to paint the two panels.
///
/// `panel_color` fills the draggable top panel that carries the label;
/// `revealed_color` and `icon` belong to the static panel uncovered as the
/// top one slides away.
#[derive(Debug, Clone, PartialEq)]
pub struct Appearance {
    pub label: LabelText,
    pub panel_color: HexColor,
    pub revealed_color: HexColor,
    pub icon: Option<PathBuf>,
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            label: LabelText::default(),
            panel_color: DEFAULT_PANEL_COLOR,
            revealed_color: DEFAULT_REVEALED_COLOR,
            icon: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_color_deserialization() {
        let cases = vec![
            ("\"#3bb05c\"", HexColor::rgb(0x3b, 0xb0, 0x5c)),
            ("\"3BB05C\"", HexColor::rgb(0x3b, 0xb0, 0x5c)),
            ("\"#fff\"", HexColor::rgb(0xff, 0xff, 0xff)),
            ("\" #000000 \"", HexColor::rgb(0, 0, 0)),
        ];

        for (json, expected) in cases {
            let deserialized: HexColor = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
    }

    #[test]
    fn test_hex_color_rejects_garbage() {
        assert!(serde_json::from_str::<HexColor>("\"green\"").is_err());
        assert_eq!(
            "#12345".parse::<HexColor>(),
            Err(ColorParseError::InvalidHex("#12345".to_string()))
        );
    }

    #[test]
    fn test_hex_color_serializes_as_hex() {
        let json = serde_json::to_string(&DEFAULT_REVEALED_COLOR).unwrap();
        assert_eq!(json, "\"#1d6b35\"");
    }

    #[test]
    fn test_label_is_white() {
        assert_eq!(LABEL_COLOR.to_string(), "#ffffff");
        let (r, g, b, a) = LABEL_COLOR.to_srgba().into_components();
        assert_eq!((r, g, b, a), (1.0, 1.0, 1.0, 1.0));
    }

    #[test]
    fn test_to_srgba_is_opaque() {
        let (r, g, b, a) = HexColor::rgb(255, 0, 0).to_srgba().into_components();
        assert_eq!((r, g, b, a), (1.0, 0.0, 0.0, 1.0));
    }
}
