pub mod rest;

use std::time::Duration;

use anyhow::{anyhow, Result};
use deckbuilder_server::config::{Parser, ServerConfig};
use deckbuilder_server::{build_state, run_graceful_with_state};
use rand::Rng as _;
use tempfile::TempDir;
use url::Url;

fn random_port() -> Result<u16> {
    let mut rng = rand::rng();

    let mut retries = 3;
    while retries > 0 {
        let port: u16 = rng.random_range(3030..4030);
        let addr: std::net::SocketAddr = format!("127.0.0.1:{}", port).parse()?;
        match std::net::TcpStream::connect_timeout(&addr, Duration::from_millis(100)) {
            Err(e) if e.kind() == std::io::ErrorKind::ConnectionRefused => return Ok(port),
            Err(_) => retries -= 1,
            Ok(_) => retries -= 1,
        }
    }

    Err(anyhow!("Could not find a free port"))
}

pub struct ConfigGuard {
    #[allow(dead_code)]
    data_dir: TempDir,
}

pub fn prepare_env(test_name: &str) -> Result<(ServerConfig, ConfigGuard)> {
    let tmp_data_dir = TempDir::with_prefix(format!("{}_", test_name))?;
    let data_dir = tmp_data_dir.path().to_string_lossy().to_string();
    let port = random_port()?.to_string();
    let args = &[
        "deckbuilder-e2e-tests",
        "--data-dir",
        &data_dir,
        "--port",
        &port,
    ];
    let config = ServerConfig::try_parse_from(args)?;
    Ok((
        config,
        ConfigGuard {
            data_dir: tmp_data_dir,
        },
    ))
}

pub fn server_url(config: &ServerConfig) -> Url {
    Url::parse(&format!(
        "http://{}:{}/",
        config.listen_address, config.port
    ))
    .expect("Invalid server URL")
}

/// Builds the state, spawns the server in the background and waits until
/// it answers health checks.
pub async fn spawn_server(args: ServerConfig) -> Result<()> {
    let base_url = server_url(&args);
    let state = build_state(&args).await?;
    tokio::spawn(run_graceful_with_state(
        args,
        state,
        futures::future::pending(),
    ));
    wait_until_healthy(&base_url).await
}

async fn wait_until_healthy(base_url: &Url) -> Result<()> {
    let client = reqwest::Client::new();
    let url = base_url.join("health")?;
    for _ in 0..50 {
        if let Ok(response) = client.get(url.clone()).send().await {
            if response.status().is_success() {
                return Ok(());
            }
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    Err(anyhow!("Server did not become healthy in time"))
}
