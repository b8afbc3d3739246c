use serde::Deserialize;

use deckbuilder_types::card::{Card, Color, ColorSet, Rarity};

/// Subset of the Scryfall card JSON consumed by this service.
///
/// Absent optional fields stay absent; they are never defaulted to empty
/// strings or zero.
#[derive(Debug, Clone, Deserialize)]
pub struct ScryfallCard {
    pub id: String,
    pub arena_id: Option<i64>,
    pub name: String,
    pub set: String,
    pub collector_number: String,
    pub mana_cost: Option<String>,
    pub cmc: f64,
    pub colors: Option<Vec<String>>,
    pub color_identity: Option<Vec<String>>,
    pub type_line: String,
    pub oracle_text: Option<String>,
    pub power: Option<String>,
    pub toughness: Option<String>,
    pub rarity: Option<String>,
    pub image_uris: Option<ScryfallImageUris>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScryfallImageUris {
    pub normal: Option<String>,
}

/// Generic Scryfall list response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct ScryfallList<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

impl ScryfallCard {
    /// Maps the wire shape into the domain card record.
    ///
    /// Token and double-faced flags are out of scope for the catalog
    /// mapping and always default to false.
    pub fn into_card(self) -> Card {
        Card {
            scryfall_id: self.id,
            arena_id: self.arena_id.map(|id| id.to_string()),
            name: self.name,
            set_code: self.set.to_uppercase(),
            collector_number: self.collector_number,
            mana_cost: self.mana_cost,
            cmc: self.cmc,
            colors: map_colors(self.colors.as_deref()),
            color_identity: map_colors(self.color_identity.as_deref()),
            type_line: self.type_line,
            oracle_text: self.oracle_text,
            power: self.power,
            toughness: self.toughness,
            rarity: self.rarity.as_deref().and_then(Rarity::parse),
            image_url: self.image_uris.and_then(|uris| uris.normal),
            is_token: false,
            is_double_faced: false,
        }
    }
}

/// Converts Scryfall color symbols into a [`ColorSet`], ignoring unknown
/// symbols. A missing or empty list means colorless.
fn map_colors(colors: Option<&[String]>) -> ColorSet {
    colors
        .unwrap_or_default()
        .iter()
        .flat_map(|s| s.chars())
        .filter_map(Color::from_symbol)
        .collect()
}
