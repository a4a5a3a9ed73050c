use palette::Srgb;
use serde::Serialize;
use serde_with::DeserializeFromStr;
use strum::{Display as StrumDisplay, EnumIter, EnumString, IntoEnumIterator};

/// Revolution bands of the duration dial, lightest first (1-60, 61-120, ...).
pub const REVOLUTION_BANDS: [Srgb<u8>; 5] = [
    rgb(0xE9E0FF),
    rgb(0xDFD2FF),
    rgb(0xD4C4FF),
    rgb(0xC9B6FF),
    rgb(0xB69CFF),
];

pub const THUMB: Srgb<u8> = rgb(0xB69CFF);

const fn rgb(hex: u32) -> Srgb<u8> {
    Srgb::new((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    #[strum(to_string = "Lavender", serialize = "lavender", serialize = "0")]
    Lavender,
    #[strum(to_string = "Mint Green", serialize = "mint_green", serialize = "mint", serialize = "1")]
    MintGreen,
    #[strum(to_string = "Soft Blue", serialize = "soft_blue", serialize = "blue", serialize = "2")]
    SoftBlue,
    #[strum(to_string = "Peach", serialize = "peach", serialize = "3")]
    Peach,
    #[strum(to_string = "Dark Mode", serialize = "dark_mode", serialize = "dark", serialize = "4")]
    DarkMode,
    #[strum(to_string = "White", serialize = "white", serialize = "5")]
    White,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThemePalette {
    pub primary: Srgb<u8>,
    pub secondary: Srgb<u8>,
    pub tertiary: Srgb<u8>,
    pub accent: Srgb<u8>,
    pub text: Srgb<u8>,
}

impl Theme {
    pub fn index(&self) -> u32 {
        *self as u32
    }

    pub fn from_index(idx: u32) -> Self {
        Self::iter().nth(idx as usize).unwrap_or_default()
    }

    pub fn palette(&self) -> ThemePalette {
        match self {
            Self::Lavender => ThemePalette {
                primary: rgb(0xF3EEFF),
                secondary: rgb(0xE4DAFF),
                tertiary: rgb(0xD4C4FF),
                accent: rgb(0xB69CFF),
                text: rgb(0x3D2E6B),
            },
            Self::MintGreen => ThemePalette {
                primary: rgb(0xEAF8F1),
                secondary: rgb(0xD2F0E1),
                tertiary: rgb(0xB5E5CD),
                accent: rgb(0x6CC9A0),
                text: rgb(0x1F4D3A),
            },
            Self::SoftBlue => ThemePalette {
                primary: rgb(0xEAF2FC),
                secondary: rgb(0xD4E4F8),
                tertiary: rgb(0xB9D3F3),
                accent: rgb(0x6E9FE0),
                text: rgb(0x1E3A5F),
            },
            Self::Peach => ThemePalette {
                primary: rgb(0xFFF1EA),
                secondary: rgb(0xFFE0D1),
                tertiary: rgb(0xFFCDB5),
                accent: rgb(0xF5A07A),
                text: rgb(0x5C2E1A),
            },
            Self::DarkMode => ThemePalette {
                primary: rgb(0x1E1E24),
                secondary: rgb(0x2A2A33),
                tertiary: rgb(0x3A3A46),
                accent: rgb(0x7A6BD1),
                text: rgb(0xEDEDF2),
            },
            Self::White => ThemePalette {
                primary: rgb(0xFFFFFF),
                secondary: rgb(0xF4F4F4),
                tertiary: rgb(0xE6E6E6),
                accent: rgb(0xBDBDBD),
                text: rgb(0x222222),
            },
        }
    }
}

/// Perceived darkness check used to pick a readable foreground over `color`.
pub fn is_dark(color: Srgb<u8>) -> bool {
    let luma = 0.299 * f64::from(color.red)
        + 0.587 * f64::from(color.green)
        + 0.114 * f64::from(color.blue);
    1.0 - luma / 255.0 >= 0.5
}

pub fn contrast_text(background: Srgb<u8>) -> Srgb<u8> {
    if is_dark(background) {
        rgb(0xFFFFFF)
    } else {
        rgb(0x000000)
    }
}

pub fn to_hex(color: Srgb<u8>) -> String {
    format!("#{:02x}{:02x}{:02x}", color.red, color.green, color.blue)
}
