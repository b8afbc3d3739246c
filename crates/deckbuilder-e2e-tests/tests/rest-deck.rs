use deckbuilder_e2e_tests::rest::{create_deck, deck_id};
use deckbuilder_e2e_tests::{prepare_env, server_url, spawn_server};
use serde_json::json;
use tracing::info;
use tracing_test::traced_test;

#[tokio::test]
#[traced_test]
async fn test_deck_lifecycle() {
    let (args, _config_guard) = prepare_env("test_deck_lifecycle").unwrap();
    let base_url = server_url(&args);
    spawn_server(args).await.unwrap();
    let client = reqwest::Client::new();

    // Create
    let deck = create_deck(&client, &base_url, "  Izzet Tempo  ", "standard")
        .await
        .unwrap();
    assert_eq!(deck["name"], "Izzet Tempo");
    assert_eq!(deck["format"], "standard");
    assert_eq!(deck["visibility"], "private");
    assert_eq!(deck["created"], deck["modified"]);
    assert!(deck["entries"].as_array().unwrap().is_empty());
    let id = deck_id(&deck);

    let deck_url = base_url.join(&format!("api/decks/{id}")).unwrap();

    // Read back
    let response = client.get(deck_url.clone()).send().await.unwrap();
    assert!(response.status().is_success());
    let fetched: serde_json::Value = response.json().await.unwrap();
    assert_eq!(fetched["name"], "Izzet Tempo");

    // Change visibility
    let response = client
        .patch(base_url.join(&format!("api/decks/{id}/visibility")).unwrap())
        .json(&json!({"visibility": "public"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 204);

    // Set description
    let response = client
        .patch(base_url.join(&format!("api/decks/{id}/description")).unwrap())
        .json(&json!({"description": "  Counterspells and burn  "}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 204);

    let fetched: serde_json::Value = client
        .get(deck_url.clone())
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    info!("Updated deck: {fetched:#?}");
    assert_eq!(fetched["visibility"], "public");
    assert_eq!(fetched["description"], "Counterspells and burn");
    assert_ne!(fetched["modified"], serde_json::Value::Null);

    // Delete
    let response = client.delete(deck_url.clone()).send().await.unwrap();
    assert_eq!(response.status().as_u16(), 204);
    let response = client.get(deck_url).send().await.unwrap();
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
#[traced_test]
async fn test_deck_entries() {
    let (args, _config_guard) = prepare_env("test_deck_entries").unwrap();
    let base_url = server_url(&args);
    spawn_server(args).await.unwrap();
    let client = reqwest::Client::new();

    let deck = create_deck(&client, &base_url, "Burn", "modern").await.unwrap();
    let id = deck_id(&deck);
    let entries_url = base_url.join(&format!("api/decks/{id}/entries")).unwrap();
    let deck_url = base_url.join(&format!("api/decks/{id}")).unwrap();

    // Upsert twice for the same (card, section) and once for the sideboard
    for payload in [
        json!({"card_scryfall_id": "bolt-1", "quantity": 2}),
        json!({"card_scryfall_id": "bolt-1", "quantity": 4, "section": "mainboard"}),
        json!({"card_scryfall_id": "bolt-1", "quantity": 1, "section": "sideboard"}),
    ] {
        let response = client
            .post(entries_url.clone())
            .json(&payload)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 204);
    }

    let fetched: serde_json::Value = client
        .get(deck_url.clone())
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let entries = fetched["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    let mainboard = entries
        .iter()
        .find(|e| e["section"] == "mainboard")
        .unwrap();
    assert_eq!(mainboard["quantity"], 4);

    // Remove the sideboard copy
    let remove_url = base_url
        .join(&format!("api/decks/{id}/entries/bolt-1?section=sideboard"))
        .unwrap();
    let response = client.delete(remove_url.clone()).send().await.unwrap();
    assert_eq!(response.status().as_u16(), 204);

    // Removing it again is a 404
    let response = client.delete(remove_url).send().await.unwrap();
    assert_eq!(response.status().as_u16(), 404);

    let fetched: serde_json::Value = client
        .get(deck_url)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fetched["entries"].as_array().unwrap().len(), 1);
}

#[tokio::test]
#[traced_test]
async fn test_deck_validation_and_missing_decks() {
    let (args, _config_guard) = prepare_env("test_deck_validation").unwrap();
    let base_url = server_url(&args);
    spawn_server(args).await.unwrap();
    let client = reqwest::Client::new();

    let decks_url = base_url.join("api/decks").unwrap();

    // Empty name is rejected before the aggregate is even constructed
    let response = client
        .post(decks_url.clone())
        .json(&json!({"name": "", "format": "standard"}))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_client_error());

    // Whitespace-only name passes request validation but the aggregate
    // still rejects it
    let response = client
        .post(decks_url.clone())
        .json(&json!({"name": "   ", "format": "standard"}))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_client_error());

    // Zero quantity is rejected
    let deck = create_deck(&client, &base_url, "Validation", "pauper")
        .await
        .unwrap();
    let id = deck_id(&deck);
    let response = client
        .post(base_url.join(&format!("api/decks/{id}/entries")).unwrap())
        .json(&json!({"card_scryfall_id": "bolt-1", "quantity": 0}))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_client_error());

    // Operations against unknown decks are 404
    let missing = uuid::Uuid::new_v4();
    let response = client
        .get(base_url.join(&format!("api/decks/{missing}")).unwrap())
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 404);

    let response = client
        .patch(
            base_url
                .join(&format!("api/decks/{missing}/visibility"))
                .unwrap(),
        )
        .json(&json!({"visibility": "unlisted"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
#[traced_test]
async fn test_deck_listing() {
    let (args, _config_guard) = prepare_env("test_deck_listing").unwrap();
    let base_url = server_url(&args);
    spawn_server(args).await.unwrap();
    let client = reqwest::Client::new();

    for name in ["Alpha", "Bravo", "Charlie"] {
        create_deck(&client, &base_url, name, "commander").await.unwrap();
    }

    let url = base_url
        .join("api/decks?page=1&page_size=2&sort=name")
        .unwrap();
    let page: serde_json::Value = client
        .get(url)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(page["total"], 3);
    assert_eq!(page["total_pages"], 2);
    let rows = page["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["name"], "Alpha");
    assert_eq!(rows[1]["name"], "Bravo");
}
