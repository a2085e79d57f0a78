use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::MagiqueError;

/// Color identity component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    White,
    Blue,
    Black,
    Red,
    Green,
    Colorless,
}

impl Color {
    /// Enumeration order, also the tie-break order when ranking colors
    pub const ALL: [Color; 6] = [
        Color::White,
        Color::Blue,
        Color::Black,
        Color::Red,
        Color::Green,
        Color::Colorless,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            Color::White => "W",
            Color::Blue => "U",
            Color::Black => "B",
            Color::Red => "R",
            Color::Green => "G",
            Color::Colorless => "C",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Color::White => "White",
            Color::Blue => "Blue",
            Color::Black => "Black",
            Color::Red => "Red",
            Color::Green => "Green",
            Color::Colorless => "Colorless",
        }
    }

    /// Accepts a mana symbol (`W`, `U`, ...) or a full color name, any case
    pub fn parse(value: &str) -> Option<Color> {
        let value = value.trim();
        Color::ALL.into_iter().find(|c| {
            c.symbol().eq_ignore_ascii_case(value) || c.name().eq_ignore_ascii_case(value)
        })
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Color {
    type Err = MagiqueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::parse(s).ok_or_else(|| MagiqueError::Parse(format!("Unknown color: {}", s)))
    }
}

/// Card type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardType {
    BasicLand,
    Land,
    Creature,
    Artifact,
    Enchantment,
    Planeswalker,
    Instant,
    Sorcery,
}

impl CardType {
    pub const ALL: [CardType; 8] = [
        CardType::BasicLand,
        CardType::Land,
        CardType::Creature,
        CardType::Artifact,
        CardType::Enchantment,
        CardType::Planeswalker,
        CardType::Instant,
        CardType::Sorcery,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CardType::BasicLand => "Basic Land",
            CardType::Land => "Land",
            CardType::Creature => "Creature",
            CardType::Artifact => "Artifact",
            CardType::Enchantment => "Enchantment",
            CardType::Planeswalker => "Planeswalker",
            CardType::Instant => "Instant",
            CardType::Sorcery => "Sorcery",
        }
    }

    /// Reason label used by type evaluators
    pub fn key(self) -> &'static str {
        match self {
            CardType::BasicLand => "basic_land",
            CardType::Land => "land",
            CardType::Creature => "creature",
            CardType::Artifact => "artifact",
            CardType::Enchantment => "enchantment",
            CardType::Planeswalker => "planeswalker",
            CardType::Instant => "instant",
            CardType::Sorcery => "sorcery",
        }
    }

    pub fn is_land(self) -> bool {
        matches!(self, CardType::BasicLand | CardType::Land)
    }

    /// Maps a printed type line entry; `land` becomes `BasicLand` when `basic` is among the supertypes
    pub fn from_printed(type_name: &str, supertypes: &[String]) -> Option<CardType> {
        let type_name = type_name.trim();
        if type_name.eq_ignore_ascii_case("land") {
            let basic = supertypes.iter().any(|s| s.trim().eq_ignore_ascii_case("basic"));
            return Some(if basic { CardType::BasicLand } else { CardType::Land });
        }
        CardType::ALL
            .into_iter()
            .filter(|t| !t.is_land())
            .find(|t| t.key().eq_ignore_ascii_case(type_name))
    }
}

impl fmt::Display for CardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Rule set determining legality and copy limits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Format {
    #[default]
    Standard,
    Pioneer,
    Modern,
    Legacy,
    Vintage,
    Pauper,
    Commander,
    Brawl,
}

impl Format {
    pub const ALL: [Format; 8] = [
        Format::Standard,
        Format::Pioneer,
        Format::Modern,
        Format::Legacy,
        Format::Vintage,
        Format::Pauper,
        Format::Commander,
        Format::Brawl,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Format::Standard => "standard",
            Format::Pioneer => "pioneer",
            Format::Modern => "modern",
            Format::Legacy => "legacy",
            Format::Vintage => "vintage",
            Format::Pauper => "pauper",
            Format::Commander => "commander",
            Format::Brawl => "brawl",
        }
    }

    pub fn is_singleton(self) -> bool {
        matches!(self, Format::Commander | Format::Brawl)
    }

    /// Maximum copies of one named card
    pub fn copy_limit(self) -> u32 {
        if self.is_singleton() {
            1
        } else {
            4
        }
    }

    pub fn parse(value: &str) -> Option<Format> {
        let value = value.trim();
        Format::ALL.into_iter().find(|f| f.key().eq_ignore_ascii_case(value))
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Format {
    type Err = MagiqueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Format::parse(s).ok_or_else(|| MagiqueError::Parse(format!("Unknown format: {}", s)))
    }
}
