use deckbuilder_e2e_tests::{prepare_env, server_url, spawn_server};
use tracing::info;
use tracing_test::traced_test;

#[tokio::test]
#[traced_test]
async fn test_health() {
    let (args, _config_guard) = prepare_env("test_health").unwrap();
    let base_url = server_url(&args);

    spawn_server(args).await.unwrap();

    let client = reqwest::Client::new();

    let url = base_url.join("health").unwrap();
    let response = client.get(url).send().await.unwrap();
    info! {"Response: {:#?}", response};
    assert!(response.status().is_success());

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "ok");
}
