use deckbuilder_dal::deck::DeckRepositoryImpl;
use deckbuilder_dal::{ListingParams, Order};
use deckbuilder_types::deck::{Deck, Section, Visibility};
use sqlx::Executor as _;
use uuid::Uuid;

async fn init_db() -> sqlx::Pool<sqlx::Sqlite> {
    const DB_URL: &str = "sqlite::memory:";
    let conn = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .connect(DB_URL)
        .await
        .unwrap();
    conn.execute("PRAGMA foreign_keys = ON").await.unwrap();
    sqlx::migrate!("../../migrations").run(&conn).await.unwrap();

    conn
}

fn sample_deck() -> Deck {
    let mut deck = Deck::new(
        Uuid::new_v4(),
        "Izzet Tempo",
        "standard",
        Visibility::Private,
        Some("Counterspells and burn"),
    )
    .unwrap();
    deck.upsert_entry("abc-123", 4, Section::Mainboard).unwrap();
    deck.upsert_entry("abc-123", 2, Section::Sideboard).unwrap();
    deck.upsert_entry("def-456", 1, Section::Mainboard).unwrap();
    deck
}

#[tokio::test]
async fn test_deck_add_and_get() {
    let conn = init_db().await;
    let repo = DeckRepositoryImpl::new(conn);

    let deck = sample_deck();
    repo.add(&deck).await.unwrap();

    let stored = repo.get(deck.id()).await.unwrap().unwrap();
    assert_eq!(stored.id(), deck.id());
    assert_eq!(stored.name(), "Izzet Tempo");
    assert_eq!(stored.format(), "standard");
    assert_eq!(stored.description(), Some("Counterspells and burn"));
    assert_eq!(stored.visibility(), Visibility::Private);
    assert_eq!(stored.entries().len(), 3);
    assert_eq!(stored.created(), deck.created());
    assert_eq!(stored.modified(), deck.modified());
}

#[tokio::test]
async fn test_get_missing_deck_is_none() {
    let conn = init_db().await;
    let repo = DeckRepositoryImpl::new(conn);

    let found = repo.get(Uuid::new_v4()).await.unwrap();
    assert!(found.is_none());
}

#[tokio::test]
async fn test_deck_update_replaces_entries() {
    let conn = init_db().await;
    let repo = DeckRepositoryImpl::new(conn);

    let mut deck = sample_deck();
    repo.add(&deck).await.unwrap();

    deck.change_visibility(Visibility::Public);
    deck.upsert_entry("abc-123", 3, Section::Mainboard).unwrap();
    assert!(deck.remove_entry("def-456", Section::Mainboard).unwrap());
    repo.update(&deck).await.unwrap();

    let stored = repo.get(deck.id()).await.unwrap().unwrap();
    assert_eq!(stored.visibility(), Visibility::Public);
    assert_eq!(stored.entries().len(), 2);
    let mainboard = stored
        .entries()
        .iter()
        .find(|e| e.section() == Section::Mainboard)
        .unwrap();
    assert_eq!(mainboard.card_scryfall_id(), "abc-123");
    assert_eq!(mainboard.quantity(), 3);
    assert_eq!(stored.modified(), deck.modified());
}

#[tokio::test]
async fn test_update_missing_deck_fails() {
    let conn = init_db().await;
    let repo = DeckRepositoryImpl::new(conn);

    let deck = sample_deck();
    let result = repo.update(&deck).await;
    assert!(matches!(
        result,
        Err(deckbuilder_dal::Error::RecordNotFound(_))
    ));
}

#[tokio::test]
async fn test_deck_delete() {
    let conn = init_db().await;
    let repo = DeckRepositoryImpl::new(conn);

    let deck = sample_deck();
    repo.add(&deck).await.unwrap();

    assert!(repo.delete(deck.id()).await.unwrap());
    assert!(repo.get(deck.id()).await.unwrap().is_none());
    assert!(!repo.delete(deck.id()).await.unwrap());
}

#[tokio::test]
async fn test_deck_list_and_count() {
    let conn = init_db().await;
    let repo = DeckRepositoryImpl::new(conn);

    for name in ["Alpha", "Bravo", "Charlie"] {
        let deck = Deck::new(Uuid::new_v4(), name, "modern", Visibility::Public, None).unwrap();
        repo.add(&deck).await.unwrap();
    }

    assert_eq!(repo.count().await.unwrap(), 3);

    let params = ListingParams::new(0, 2).with_order(vec![Order::Asc("name".to_string())]);
    let page = repo.list(params).await.unwrap();
    assert_eq!(page.len(), 2);
    assert_eq!(page[0].name, "Alpha");
    assert_eq!(page[1].name, "Bravo");

    let all = repo.list_all().await.unwrap();
    assert_eq!(all.len(), 3);
}

#[tokio::test]
async fn test_list_rejects_unknown_order_field() {
    let conn = init_db().await;
    let repo = DeckRepositoryImpl::new(conn);

    let params =
        ListingParams::default().with_order(vec![Order::Desc("description".to_string())]);
    let result = repo.list(params).await;
    assert!(matches!(
        result,
        Err(deckbuilder_dal::Error::InvalidOrderByField(_))
    ));
}
