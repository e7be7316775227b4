//! WMO weather code tables
//!
//! See <https://open-meteo.com/en/docs#weathervariables>. Codes outside the
//! documented set never fail: they read as "Unknown" with the fallback symbol.

use serde::{Deserialize, Serialize};

/// Every code the upstream documents.
pub const KNOWN_CODES: [i32; 28] = [
    0, 1, 2, 3, 45, 48, 51, 53, 55, 56, 57, 61, 63, 65, 66, 67, 71, 73, 75, 77, 80, 81, 82, 85,
    86, 95, 96, 99,
];

/// Stand-in for a code the upstream left out; reads as "Unknown".
pub const UNKNOWN_CODE: i32 = -1;

/// Pictographic weather category, independent of how it is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Symbol {
    Clear,
    PartlyCloudy,
    Overcast,
    Fog,
    Drizzle,
    Rain,
    Snow,
    Thunderstorm,
    Unknown,
}

impl Symbol {
    pub const ALL: [Symbol; 9] = [
        Symbol::Clear,
        Symbol::PartlyCloudy,
        Symbol::Overcast,
        Symbol::Fog,
        Symbol::Drizzle,
        Symbol::Rain,
        Symbol::Snow,
        Symbol::Thunderstorm,
        Symbol::Unknown,
    ];

    /// Emoji glyph drawn for this symbol
    #[must_use]
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Clear => "\u{2600}\u{FE0F}",
            Self::PartlyCloudy => "\u{26C5}",
            Self::Overcast => "\u{2601}\u{FE0F}",
            Self::Fog => "\u{1F32B}\u{FE0F}",
            Self::Drizzle => "\u{1F326}\u{FE0F}",
            Self::Rain => "\u{1F327}\u{FE0F}",
            Self::Snow => "\u{2744}\u{FE0F}",
            Self::Thunderstorm => "\u{26C8}\u{FE0F}",
            Self::Unknown => "\u{1F321}\u{FE0F}",
        }
    }
}

#[must_use]
pub fn is_known(code: i32) -> bool {
    KNOWN_CODES.contains(&code)
}

/// Human-readable condition for a weather code
#[must_use]
pub fn condition_text(code: i32) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Fog",
        48 => "Depositing rime fog",
        51 => "Light drizzle",
        53 => "Moderate drizzle",
        55 => "Dense drizzle",
        56 | 57 => "Freezing drizzle",
        61 => "Slight rain",
        63 => "Moderate rain",
        65 => "Heavy rain",
        66 | 67 => "Freezing rain",
        71 => "Slight snow",
        73 => "Moderate snow",
        75 => "Heavy snow",
        77 => "Snow grains",
        80 | 81 => "Rain showers",
        82 => "Violent rain showers",
        85 | 86 => "Snow showers",
        95 => "Thunderstorm",
        96 | 99 => "Thunderstorm with hail",
        _ => "Unknown",
    }
}

/// Symbol for a weather code.
///
/// Ranges are checked in order and must stay disjoint when extended.
#[must_use]
pub fn symbol_for(code: i32) -> Symbol {
    if !is_known(code) {
        return Symbol::Unknown;
    }
    match code {
        0 => Symbol::Clear,
        1..=2 => Symbol::PartlyCloudy,
        3 => Symbol::Overcast,
        45 | 48 => Symbol::Fog,
        51..=57 => Symbol::Drizzle,
        61..=67 | 80..=82 => Symbol::Rain,
        71..=77 | 85 | 86 => Symbol::Snow,
        95.. => Symbol::Thunderstorm,
        _ => Symbol::Unknown,
    }
}
