//! The deck: shuffled stock plus the discard pile.
//!
//! Dealing consumes 16 of the 40 cards; the remainder is the stock that
//! feeds mus exchanges. When a prolonged negotiation drains the stock,
//! the discard pile is reshuffled back in, a rare but legal situation
//! that is logged and must never crash.

use serde::{Deserialize, Serialize};

use super::card::{full_deck, Card};
use super::hand::{Hand, HAND_SIZE};
use crate::core::rng::GameRng;
use crate::core::seat::SEAT_COUNT;

/// Stock and discard pile for one round.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Deck {
    /// Face-down stock; the top of the stock is the end of the vec.
    stock: Vec<Card>,
    /// Cards discarded during mus exchanges.
    discards: Vec<Card>,
}

impl Deck {
    /// Build a freshly shuffled 40-card deck.
    #[must_use]
    pub fn shuffled(rng: &mut GameRng) -> Self {
        let mut stock = full_deck();
        rng.shuffle(&mut stock);
        Self {
            stock,
            discards: Vec::new(),
        }
    }

    /// Deal four cards to each of the four seats, in seat order.
    ///
    /// Returns the raw deals (first-dealt card first); callers construct
    /// sorted `Hand`s from them. Panics if the stock is not full; deals
    /// only happen on a fresh deck.
    pub fn deal_all(&mut self) -> [[Card; HAND_SIZE]; SEAT_COUNT] {
        assert_eq!(self.stock.len(), 40, "deal requires a fresh deck");
        std::array::from_fn(|_| {
            std::array::from_fn(|_| self.stock.pop().expect("stock holds 40 cards"))
        })
    }

    /// Draw `n` replacement cards, reshuffling the discard pile into the
    /// stock first if the stock runs short.
    pub fn draw(&mut self, n: usize, rng: &mut GameRng) -> Vec<Card> {
        if self.stock.len() < n {
            log::warn!(
                "stock exhausted ({} left, {} requested); reshuffling {} discards",
                self.stock.len(),
                n,
                self.discards.len()
            );
            self.stock.append(&mut self.discards);
            rng.shuffle(&mut self.stock);
        }
        assert!(
            self.stock.len() >= n,
            "stock and discards cannot cover a {n}-card draw"
        );
        self.stock.split_off(self.stock.len() - n)
    }

    /// Add discarded cards to the pile.
    pub fn discard(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.discards.extend(cards);
    }

    /// Number of cards left in the stock.
    #[must_use]
    pub fn stock_len(&self) -> usize {
        self.stock.len()
    }

    /// Number of cards in the discard pile.
    #[must_use]
    pub fn discard_len(&self) -> usize {
        self.discards.len()
    }

    /// All cards currently outside the players' hands.
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.stock.iter().chain(self.discards.iter())
    }
}

/// Assert the 40-card multiset invariant over hands + stock + discards.
///
/// Called after every exchange; a violation is an engine bug and aborts
/// the instance.
pub fn assert_full_multiset(hands: &[Hand], deck: &Deck) {
    let mut seen = std::collections::HashSet::new();
    let mut total = 0usize;
    for hand in hands {
        for card in hand.cards() {
            assert!(seen.insert((card.rank, card.suit)), "duplicate card {card}");
            total += 1;
        }
    }
    for card in deck.cards() {
        assert!(seen.insert((card.rank, card.suit)), "duplicate card {card}");
        total += 1;
    }
    assert_eq!(total, 40, "card multiset lost cards");
}
