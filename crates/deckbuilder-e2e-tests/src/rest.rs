use anyhow::Result;
use reqwest::Url;
use serde_json::json;
use tracing::info;

pub async fn create_deck(
    client: &reqwest::Client,
    base_url: &Url,
    name: &str,
    format: &str,
) -> Result<serde_json::Value> {
    let payload = json!({"name": name, "format": format});
    let api_url = base_url.join("api/decks").unwrap();

    let response = client.post(api_url.clone()).json(&payload).send().await?;
    info!("Deck response: {:#?}", response);
    assert!(response.status().as_u16() == 201);

    let new_deck: serde_json::Value = response.json().await?;
    Ok(new_deck)
}

pub fn deck_id(deck: &serde_json::Value) -> &str {
    deck["id"].as_str().expect("deck id should be a string")
}
