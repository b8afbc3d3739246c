use serde::Serialize;
use sqlx::{Acquire as _, Row as _};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::error::Result;
use crate::{ChosenRow, Error};
use deckbuilder_types::deck::{Deck, Section, Visibility};

const VALID_ORDER_FIELDS: &[&str] = &["id", "created", "modified", "name", "format"];

/// Listing row for a deck, without its entries.
#[derive(Debug, Serialize, Clone)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct DeckShort {
    pub id: Uuid,
    pub name: String,
    pub format: String,
    pub visibility: Visibility,
    pub created: OffsetDateTime,
    pub modified: OffsetDateTime,
}

impl sqlx::FromRow<'_, ChosenRow> for DeckShort {
    fn from_row(row: &ChosenRow) -> Result<Self, sqlx::Error> {
        Ok(DeckShort {
            id: decode_id(row.try_get("id")?)?,
            name: row.try_get("name")?,
            format: row.try_get("format")?,
            visibility: decode_visibility(row.try_get("visibility")?)?,
            created: row.try_get("created")?,
            modified: row.try_get("modified")?,
        })
    }
}

pub type DeckRepository = DeckRepositoryImpl<sqlx::Pool<crate::ChosenDB>>;

pub struct DeckRepositoryImpl<E> {
    executor: E,
}

impl<'c, E> DeckRepositoryImpl<E>
where
    for<'a> &'a E:
        sqlx::Executor<'c, Database = crate::ChosenDB> + sqlx::Acquire<'c, Database = crate::ChosenDB>,
{
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    pub async fn add(&self, deck: &Deck) -> Result<()> {
        let mut conn = self.executor.acquire().await?;
        let mut transaction = conn.begin().await?;

        sqlx::query(
            "INSERT INTO deck (id, name, format, description, visibility, created, modified) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(deck.id().to_string())
        .bind(deck.name())
        .bind(deck.format())
        .bind(deck.description())
        .bind(deck.visibility().repr())
        .bind(deck.created())
        .bind(deck.modified())
        .execute(&mut *transaction)
        .await?;

        insert_entries(&mut transaction, deck).await?;
        transaction.commit().await?;
        Ok(())
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<Deck>> {
        let deck_id = id.to_string();
        let row = sqlx::query(
            "SELECT id, name, format, description, visibility, created, modified \
             FROM deck WHERE id = ?",
        )
        .bind(&deck_id)
        .fetch_optional(&self.executor)
        .await?;

        let Some(row) = row else {
            tracing::debug!("Deck {deck_id} not found");
            return Ok(None);
        };

        let entry_rows = sqlx::query(
            "SELECT card_scryfall_id, quantity, section FROM deck_entry \
             WHERE deck_id = ? ORDER BY section, card_scryfall_id",
        )
        .bind(&deck_id)
        .fetch_all(&self.executor)
        .await?;

        let mut entries = Vec::with_capacity(entry_rows.len());
        for entry in entry_rows {
            entries.push((
                entry.try_get::<String, _>("card_scryfall_id")?,
                entry.try_get::<u32, _>("quantity")?,
                decode_section(entry.try_get("section")?)?,
            ));
        }

        Ok(Some(Deck::rehydrate(
            decode_id(row.try_get("id")?)?,
            row.try_get("name")?,
            row.try_get("format")?,
            row.try_get("description")?,
            decode_visibility(row.try_get("visibility")?)?,
            row.try_get("created")?,
            row.try_get("modified")?,
            entries,
        )))
    }

    /// Writes back a mutated aggregate, replacing its entry rows.
    pub async fn update(&self, deck: &Deck) -> Result<()> {
        let deck_id = deck.id().to_string();
        let mut conn = self.executor.acquire().await?;
        let mut transaction = conn.begin().await?;

        let result = sqlx::query(
            "UPDATE deck SET name = ?, format = ?, description = ?, visibility = ?, modified = ? \
             WHERE id = ?",
        )
        .bind(deck.name())
        .bind(deck.format())
        .bind(deck.description())
        .bind(deck.visibility().repr())
        .bind(deck.modified())
        .bind(&deck_id)
        .execute(&mut *transaction)
        .await?;

        if result.rows_affected() == 0 {
            return Err(Error::RecordNotFound(format!("Deck {deck_id}")));
        }

        sqlx::query("DELETE FROM deck_entry WHERE deck_id = ?")
            .bind(&deck_id)
            .execute(&mut *transaction)
            .await?;
        insert_entries(&mut transaction, deck).await?;

        transaction.commit().await?;
        Ok(())
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM deck WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count(&self) -> Result<u64> {
        let count: i64 = sqlx::query_scalar("SELECT count(*) FROM deck")
            .fetch_one(&self.executor)
            .await?;
        Ok(count as u64)
    }

    pub async fn list_all(&self) -> Result<Vec<DeckShort>> {
        self.list(crate::ListingParams::default()).await
    }

    pub async fn list(&self, params: crate::ListingParams) -> Result<Vec<DeckShort>> {
        let ordering = params.ordering(VALID_ORDER_FIELDS)?;
        let order_clause = if ordering.is_empty() {
            String::new()
        } else {
            format!(" ORDER BY {ordering}")
        };
        let sql = format!(
            "SELECT id, name, format, visibility, created, modified FROM deck{order_clause} \
             LIMIT ? OFFSET ?"
        );
        let records = sqlx::query_as::<_, DeckShort>(&sql)
            .bind(params.limit)
            .bind(params.offset)
            .fetch_all(&self.executor)
            .await?;
        Ok(records)
    }
}

async fn insert_entries(
    transaction: &mut sqlx::Transaction<'_, crate::ChosenDB>,
    deck: &Deck,
) -> Result<()> {
    for entry in deck.entries() {
        sqlx::query(
            "INSERT INTO deck_entry (deck_id, card_scryfall_id, quantity, section) \
             VALUES (?, ?, ?, ?)",
        )
        .bind(deck.id().to_string())
        .bind(entry.card_scryfall_id())
        .bind(entry.quantity())
        .bind(entry.section().repr())
        .execute(&mut **transaction)
        .await?;
    }
    Ok(())
}

fn decode_id(raw: String) -> Result<Uuid, sqlx::Error> {
    Uuid::parse_str(&raw).map_err(|e| sqlx::Error::ColumnDecode {
        index: "id".into(),
        source: Box::new(e),
    })
}

fn decode_visibility(raw: i64) -> Result<Visibility, sqlx::Error> {
    Visibility::from_repr(raw).ok_or_else(|| sqlx::Error::ColumnDecode {
        index: "visibility".into(),
        source: format!("invalid visibility value {raw}").into(),
    })
}

fn decode_section(raw: i64) -> Result<Section, sqlx::Error> {
    Section::from_repr(raw).ok_or_else(|| sqlx::Error::ColumnDecode {
        index: "section".into(),
        source: format!("invalid section value {raw}").into(),
    })
}
