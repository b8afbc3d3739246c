pub mod client;
pub mod error;
pub mod models;

pub use client::ScryfallClient;
pub use error::Error;
