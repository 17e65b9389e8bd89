//! Cards, the deck, and four-card hands with per-lance projections.

pub mod card;
pub mod deck;
pub mod hand;

pub use card::{full_deck, Card, Rank, Suit};
pub use deck::{assert_full_multiset, Deck};
pub use hand::{Hand, Pares, HAND_SIZE};
