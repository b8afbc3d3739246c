use std::{fs, path::PathBuf};

use crate::error::Result;
pub use clap::Parser;
use url::Url;

#[derive(Debug, Clone, clap::Parser)]
pub struct ServerConfig {
    #[arg(
        short,
        long,
        default_value_t = 3000,
        env = "DECKBUILDER_LISTEN_PORT",
        help = "Port to listen on"
    )]
    pub port: u16,

    #[arg(
        short,
        long,
        default_value = "127.0.0.1",
        env = "DECKBUILDER_LISTEN_ADDRESS",
        help = "Address to listen on"
    )]
    pub listen_address: String,

    #[arg(
        long,
        env = "DECKBUILDER_DATABASE_URL",
        help = "Database URL e.g. sqlite://file.db, default is sqlite://[data-dir]/deckbuilder.db, where data-dir is set by --data-dir"
    )]
    database_url: Option<String>,

    #[arg(
        long,
        env = "DECKBUILDER_DATA_DIR",
        help = "Data directory (database, configs etc.), default is system default like ~/.local/share/deckbuilder",
        default_value_t = default_data_dir()
    )]
    data_dir: String,

    #[arg(
        long,
        env = "DECKBUILDER_SCRYFALL_URL",
        default_value = "https://api.scryfall.com/",
        help = "Base URL of the Scryfall card catalog API"
    )]
    pub scryfall_url: Url,

    #[arg(
        long,
        env = "DECKBUILDER_DEFAULT_PAGE_SIZE",
        default_value = "100",
        help = "Default page size"
    )]
    pub default_page_size: u32,

    #[arg(long, env = "DECKBUILDER_NO_CORS", help = "Disable CORS")]
    pub no_cors: bool,
}

fn default_data_dir() -> String {
    let dir = dirs::data_dir()
        .map(|p| p.join("deckbuilder"))
        .unwrap_or_else(|| PathBuf::from("deckbuilder"));

    if !fs::exists(&dir).expect("Failed to check if data directory exists") {
        fs::create_dir_all(&dir).expect("Failed to create data directory");
    } else if !dir.is_dir() {
        panic!("Data directory is not a directory")
    }

    dir.to_string_lossy().to_string()
}

impl ServerConfig {
    pub fn load() -> Result<Self> {
        ServerConfig::try_parse().map_err(|e| e.into())
    }

    pub fn data_dir(&self) -> PathBuf {
        PathBuf::from(&self.data_dir)
    }

    pub fn database_url(&self) -> String {
        self.database_url
            .clone()
            .unwrap_or_else(|| format!("sqlite://{}/deckbuilder.db", self.data_dir))
    }
}
