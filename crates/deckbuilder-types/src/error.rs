/// Errors raised when a deck invariant would be violated.
///
/// These are always recoverable by the caller by correcting the input and
/// are never retried automatically.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Deck id cannot be nil")]
    NilDeckId,

    #[error("Deck name is required")]
    EmptyName,

    #[error("Deck format is required")]
    EmptyFormat,

    #[error("Card Scryfall id is required")]
    EmptyCardId,

    #[error("Quantity must be at least 1")]
    ZeroQuantity,
}
