use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::error::ValidationError;

/// Visibility level of a deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Visible only to its owner and the system.
    #[default]
    Private,
    /// Visible to everyone, can be listed publicly.
    Public,
    /// Accessible by link/id but not listed publicly.
    Unlisted,
}

impl Visibility {
    pub fn repr(self) -> i64 {
        match self {
            Visibility::Private => 0,
            Visibility::Public => 1,
            Visibility::Unlisted => 2,
        }
    }

    pub fn from_repr(value: i64) -> Option<Self> {
        match value {
            0 => Some(Visibility::Private),
            1 => Some(Visibility::Public),
            2 => Some(Visibility::Unlisted),
            _ => None,
        }
    }
}

/// Section of a deck an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum Section {
    #[default]
    Mainboard,
    Sideboard,
}

impl Section {
    pub fn repr(self) -> i64 {
        match self {
            Section::Mainboard => 0,
            Section::Sideboard => 1,
        }
    }

    pub fn from_repr(value: i64) -> Option<Self> {
        match value {
            0 => Some(Section::Mainboard),
            1 => Some(Section::Sideboard),
            _ => None,
        }
    }
}

/// An entry (card + quantity + section) inside a deck.
///
/// Entries are created and mutated only through the owning [`Deck`];
/// quantity is always at least 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct DeckEntry {
    card_scryfall_id: String,
    quantity: u32,
    section: Section,
}

impl DeckEntry {
    pub fn card_scryfall_id(&self) -> &str {
        &self.card_scryfall_id
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn section(&self) -> Section {
        self.section
    }
}

/// Deck aggregate root.
///
/// All mutation goes through the methods below, which uphold the deck
/// invariants (non-blank name/format, unique (card, section) entries,
/// positive quantities) and stamp `modified` on every change. Serializes
/// to its read snapshot; there is no `Deserialize`, stored state comes
/// back through [`Deck::rehydrate`].
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Deck {
    id: Uuid,
    name: String,
    format: String,
    description: Option<String>,
    visibility: Visibility,
    created: OffsetDateTime,
    modified: OffsetDateTime,
    entries: Vec<DeckEntry>,
}

impl Deck {
    pub fn new(
        id: Uuid,
        name: &str,
        format: &str,
        visibility: Visibility,
        description: Option<&str>,
    ) -> Result<Self, ValidationError> {
        if id.is_nil() {
            return Err(ValidationError::NilDeckId);
        }
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        let format = format.trim();
        if format.is_empty() {
            return Err(ValidationError::EmptyFormat);
        }

        let now = OffsetDateTime::now_utc();
        Ok(Deck {
            id,
            name: name.to_string(),
            format: format.to_string(),
            description: normalize_description(description),
            visibility,
            created: now,
            modified: now,
            entries: Vec::new(),
        })
    }

    /// Rebuilds a deck from stored state.
    ///
    /// Trusts the persistence layer: no validation, no timestamp stamping.
    #[allow(clippy::too_many_arguments)]
    pub fn rehydrate(
        id: Uuid,
        name: String,
        format: String,
        description: Option<String>,
        visibility: Visibility,
        created: OffsetDateTime,
        modified: OffsetDateTime,
        entries: impl IntoIterator<Item = (String, u32, Section)>,
    ) -> Self {
        Deck {
            id,
            name,
            format,
            description,
            visibility,
            created,
            modified,
            entries: entries
                .into_iter()
                .map(|(card_scryfall_id, quantity, section)| DeckEntry {
                    card_scryfall_id,
                    quantity,
                    section,
                })
                .collect(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn format(&self) -> &str {
        &self.format
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn created(&self) -> OffsetDateTime {
        self.created
    }

    pub fn modified(&self) -> OffsetDateTime {
        self.modified
    }

    pub fn entries(&self) -> &[DeckEntry] {
        &self.entries
    }

    pub fn change_visibility(&mut self, visibility: Visibility) {
        self.visibility = visibility;
        self.touch();
    }

    pub fn set_description(&mut self, description: Option<&str>) {
        self.description = normalize_description(description);
        self.touch();
    }

    /// Adds a new entry or updates the quantity of an existing one,
    /// matched by (card, section).
    pub fn upsert_entry(
        &mut self,
        card_scryfall_id: &str,
        quantity: u32,
        section: Section,
    ) -> Result<(), ValidationError> {
        let card_scryfall_id = card_scryfall_id.trim();
        if card_scryfall_id.is_empty() {
            return Err(ValidationError::EmptyCardId);
        }
        if quantity == 0 {
            return Err(ValidationError::ZeroQuantity);
        }

        match self
            .entries
            .iter_mut()
            .find(|e| e.card_scryfall_id == card_scryfall_id && e.section == section)
        {
            Some(existing) => existing.quantity = quantity,
            None => self.entries.push(DeckEntry {
                card_scryfall_id: card_scryfall_id.to_string(),
                quantity,
                section,
            }),
        }

        self.touch();
        Ok(())
    }

    /// Removes an entry by (card, section). Returns whether a matching
    /// entry existed; the timestamp is only touched on actual removal.
    pub fn remove_entry(
        &mut self,
        card_scryfall_id: &str,
        section: Section,
    ) -> Result<bool, ValidationError> {
        let card_scryfall_id = card_scryfall_id.trim();
        if card_scryfall_id.is_empty() {
            return Err(ValidationError::EmptyCardId);
        }

        let before = self.entries.len();
        self.entries
            .retain(|e| !(e.card_scryfall_id == card_scryfall_id && e.section == section));
        if self.entries.len() == before {
            return Ok(false);
        }

        self.touch();
        Ok(true)
    }

    fn touch(&mut self) {
        self.modified = OffsetDateTime::now_utc();
    }
}

fn normalize_description(description: Option<&str>) -> Option<String> {
    description
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
}
