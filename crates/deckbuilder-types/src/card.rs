use serde::{Deserialize, Serialize};

/// One of the five card colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    White,
    Blue,
    Black,
    Red,
    Green,
}

/// Canonical color order used for symbol output.
const COLOR_ORDER: [Color; 5] = [
    Color::White,
    Color::Blue,
    Color::Black,
    Color::Red,
    Color::Green,
];

impl Color {
    /// Single-letter symbol, as used by Scryfall ("U" for blue).
    pub fn symbol(self) -> char {
        match self {
            Color::White => 'W',
            Color::Blue => 'U',
            Color::Black => 'B',
            Color::Red => 'R',
            Color::Green => 'G',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol.to_ascii_uppercase() {
            'W' => Some(Color::White),
            'U' => Some(Color::Blue),
            'B' => Some(Color::Black),
            'R' => Some(Color::Red),
            'G' => Some(Color::Green),
            _ => None,
        }
    }

    fn bit(self) -> u8 {
        match self {
            Color::White => 1 << 0,
            Color::Blue => 1 << 1,
            Color::Black => 1 << 2,
            Color::Red => 1 << 3,
            Color::Green => 1 << 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown color symbol: {0}")]
pub struct UnknownColor(pub char);

/// Fixed five-color set. The empty set means colorless.
///
/// Serializes as a list of single-letter symbols in canonical
/// white, blue, black, red, green order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColorSet(u8);

impl ColorSet {
    pub const EMPTY: ColorSet = ColorSet(0);

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn contains(self, color: Color) -> bool {
        self.0 & color.bit() != 0
    }

    pub fn insert(&mut self, color: Color) {
        self.0 |= color.bit();
    }

    pub fn with(mut self, color: Color) -> Self {
        self.insert(color);
        self
    }

    /// Colors present, in canonical order.
    pub fn iter(self) -> impl Iterator<Item = Color> {
        COLOR_ORDER.into_iter().filter(move |c| self.contains(*c))
    }

    /// Parses query-style color input: color letters, optionally comma
    /// separated; "c" stands for colorless and contributes no color.
    pub fn parse(input: &str) -> Result<Self, UnknownColor> {
        let mut set = ColorSet::EMPTY;
        for symbol in input.chars() {
            match symbol {
                ',' | ' ' => continue,
                'c' | 'C' => continue,
                _ => match Color::from_symbol(symbol) {
                    Some(color) => set.insert(color),
                    None => return Err(UnknownColor(symbol)),
                },
            }
        }
        Ok(set)
    }
}

impl FromIterator<Color> for ColorSet {
    fn from_iter<I: IntoIterator<Item = Color>>(iter: I) -> Self {
        let mut set = ColorSet::EMPTY;
        for color in iter {
            set.insert(color);
        }
        set
    }
}

impl Serialize for ColorSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter().map(|c| c.symbol().to_string()))
    }
}

impl<'de> Deserialize<'de> for ColorSet {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Unknown symbols are ignored, matching the catalog mapping.
        let symbols = Vec::<String>::deserialize(deserializer)?;
        Ok(symbols
            .iter()
            .flat_map(|s| s.chars())
            .filter_map(Color::from_symbol)
            .collect())
    }
}

/// Rarity of a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Mythic,
}

impl Rarity {
    pub fn as_str(self) -> &'static str {
        match self {
            Rarity::Common => "common",
            Rarity::Uncommon => "uncommon",
            Rarity::Rare => "rare",
            Rarity::Mythic => "mythic",
        }
    }

    /// Maps a catalog rarity string; unknown values map to `None`.
    pub fn parse(rarity: &str) -> Option<Self> {
        match rarity.to_lowercase().as_str() {
            "common" => Some(Rarity::Common),
            "uncommon" => Some(Rarity::Uncommon),
            "rare" => Some(Rarity::Rare),
            "mythic" => Some(Rarity::Mythic),
            _ => None,
        }
    }
}

/// Read-only card record sourced from the external card catalog.
///
/// Decks reference cards loosely by `scryfall_id`; a referenced card need
/// not be resident anywhere locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Card {
    pub scryfall_id: String,
    pub arena_id: Option<String>,
    pub name: String,
    pub set_code: String,
    pub collector_number: String,
    pub mana_cost: Option<String>,
    pub cmc: f64,
    #[cfg_attr(feature = "openapi", schema(value_type = Vec<String>))]
    pub colors: ColorSet,
    #[cfg_attr(feature = "openapi", schema(value_type = Vec<String>))]
    pub color_identity: ColorSet,
    pub type_line: String,
    pub oracle_text: Option<String>,
    /// Power/toughness are text because values may be expressions like "*".
    pub power: Option<String>,
    pub toughness: Option<String>,
    pub rarity: Option<Rarity>,
    pub image_url: Option<String>,
    pub is_token: bool,
    pub is_double_faced: bool,
}
