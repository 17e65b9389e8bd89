//! A player's four-card hand and its per-lance projections.
//!
//! A hand always holds exactly four cards, kept sorted strongest-first.
//! It is mutable only through `exchange` during the mus phase; every
//! lance reads it through pure projections (`grande_key`, `chica_key`,
//! `pares`, `points`, `juego`) that never touch the cards themselves.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::card::{Card, Rank, Suit};

/// Number of cards in a Mus hand. Invariant at every decision point.
pub const HAND_SIZE: usize = 4;

/// A qualifying Pares play, ordered weakest to strongest category.
///
/// Within a category, higher strength classes win; Duples compares the
/// higher pair first. Four of a kind counts as Duples of the same class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Pares {
    /// A single pair of the given strength class.
    Pareja(u8),
    /// Three of a kind of the given strength class.
    Medias(u8),
    /// Two pair, higher class first.
    Duples { high: u8, low: u8 },
}

/// Four cards, sorted descending by strength class.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hand {
    cards: [Card; HAND_SIZE],
}

impl Hand {
    /// Create a hand from four cards (sorted on construction).
    #[must_use]
    pub fn new(mut cards: [Card; HAND_SIZE]) -> Self {
        cards.sort_by(|a, b| b.order().cmp(&a.order()));
        Self { cards }
    }

    /// The four cards, strongest first.
    #[must_use]
    pub fn cards(&self) -> &[Card; HAND_SIZE] {
        &self.cards
    }

    /// Pack the descending strength classes into one comparable key.
    /// Higher key wins Grande.
    #[must_use]
    pub fn grande_key(&self) -> u32 {
        self.cards
            .iter()
            .fold(0u32, |key, c| (key << 8) | u32::from(c.order()))
    }

    /// Pack the ascending strength classes into one comparable key.
    /// Lower key wins Chica.
    #[must_use]
    pub fn chica_key(&self) -> u32 {
        self.cards
            .iter()
            .rev()
            .fold(0u32, |key, c| (key << 8) | u32::from(c.order()))
    }

    /// The Pares play of this hand, if any.
    ///
    /// Grouping is by collapsed strength class, so King-Three counts as
    /// a pair just like King-King.
    #[must_use]
    pub fn pares(&self) -> Option<Pares> {
        let mut counts = [0u8; 8];
        for card in &self.cards {
            counts[card.order() as usize] += 1;
        }

        let mut pairs: SmallVec<[u8; 2]> = SmallVec::new();
        let mut triple = None;
        // Scan from the strongest class down so pairs come out ordered.
        for class in (0..8u8).rev() {
            match counts[class as usize] {
                4 => return Some(Pares::Duples { high: class, low: class }),
                3 => triple = Some(class),
                2 => pairs.push(class),
                _ => {}
            }
        }

        match (triple, pairs.as_slice()) {
            (Some(class), _) => Some(Pares::Medias(class)),
            (None, [high, low]) => Some(Pares::Duples { high: *high, low: *low }),
            (None, [class]) => Some(Pares::Pareja(*class)),
            _ => None,
        }
    }

    /// The point sum for Juego/Punto (4..=40).
    #[must_use]
    pub fn points(&self) -> u8 {
        self.cards.iter().map(|c| c.points()).sum()
    }

    /// The Juego sum of this hand, if it qualifies (>= 31).
    #[must_use]
    pub fn juego(&self) -> Option<u8> {
        let total = self.points();
        (total >= 31).then_some(total)
    }

    /// The Punto value: the raw sum compared under a ceiling of 30.
    #[must_use]
    pub fn punto_value(&self) -> u8 {
        self.points().min(30)
    }

    /// Replace the cards at `indices` with `replacements`, returning the
    /// removed cards. Indices refer to the current sorted order; the hand
    /// re-sorts afterwards.
    ///
    /// Panics if the counts disagree or an index repeats. Callers
    /// validate agent input before reaching here, so a violation is an
    /// engine bug.
    pub fn exchange(&mut self, indices: &[u8], replacements: &[Card]) -> SmallVec<[Card; HAND_SIZE]> {
        assert_eq!(
            indices.len(),
            replacements.len(),
            "exchange requires one replacement per discarded card"
        );

        let mut seen = [false; HAND_SIZE];
        let mut removed = SmallVec::new();
        let mut replacement_iter = replacements.iter();
        for &i in indices {
            assert!(!seen[i as usize], "discard indices must be distinct");
            seen[i as usize] = true;
            let slot = &mut self.cards[i as usize];
            removed.push(*slot);
            *slot = *replacement_iter.next().expect("replacement count checked");
        }

        self.cards.sort_by(|a, b| b.order().cmp(&a.order()));
        removed
    }
}

impl std::fmt::Display for Hand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for card in &self.cards {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{card}")?;
            first = false;
        }
        Ok(())
    }
}

/// Build a hand from four rank codes (see `Rank::from_char`), assigning
/// suits cyclically. Test and demo shorthand: `"RR31".parse()`.
impl std::str::FromStr for Hand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let ranks: Vec<Rank> = s
            .chars()
            .map(|c| Rank::from_char(c).ok_or_else(|| format!("unknown rank code {c:?}")))
            .collect::<Result<_, _>>()?;
        let ranks: [Rank; HAND_SIZE] = ranks
            .try_into()
            .map_err(|_| format!("a hand needs exactly {HAND_SIZE} cards"))?;

        Ok(Hand::new([
            Card::new(ranks[0], Suit::Oros),
            Card::new(ranks[1], Suit::Copas),
            Card::new(ranks[2], Suit::Espadas),
            Card::new(ranks[3], Suit::Bastos),
        ]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hand(s: &str) -> Hand {
        s.parse().unwrap()
    }

    #[test]
    fn test_hand_sorts_descending() {
        let h = hand("4R2C");
        let orders: Vec<u8> = h.cards().iter().map(|c| c.order()).collect();
        assert_eq!(orders, vec![7, 6, 1, 0]);
    }

    #[test]
    fn test_grande_chica_keys() {
        // R > C on the top card.
        assert!(hand("RC44").grande_key() > hand("CC44").grande_key());
        // Equal top cards fall through to the next.
        assert!(hand("RR74").grande_key() > hand("RR64").grande_key());
        // Three counts as a King.
        assert_eq!(hand("3C44").grande_key(), hand("RC44").grande_key());
        // Chica: lower is better, compared from the weakest card up.
        assert!(hand("R442").chica_key() < hand("R444").chica_key());
        assert_eq!(hand("2445").chica_key(), hand("A445").chica_key());
    }

    #[test]
    fn test_pares_categories() {
        assert_eq!(hand("RC74").pares(), None);
        assert_eq!(hand("RR74").pares(), Some(Pares::Pareja(7)));
        assert_eq!(hand("R374").pares(), Some(Pares::Pareja(7)));
        assert_eq!(hand("5554").pares(), Some(Pares::Medias(2)));
        assert_eq!(
            hand("RR44").pares(),
            Some(Pares::Duples { high: 7, low: 1 })
        );
        assert_eq!(
            hand("RRRR").pares(),
            Some(Pares::Duples { high: 7, low: 7 })
        );
    }

    #[test]
    fn test_pares_ordering() {
        let pareja_kings = hand("RR74").pares().unwrap();
        let pareja_fours = hand("4472").pares().unwrap();
        let medias = hand("4442").pares().unwrap();
        let duples_low = hand("4422").pares().unwrap();
        let duples_high = hand("RRCC").pares().unwrap();

        assert!(pareja_kings > pareja_fours);
        assert!(medias > pareja_kings);
        assert!(duples_low > medias);
        assert!(duples_high > duples_low);
    }

    #[test]
    fn test_points_and_juego() {
        assert_eq!(hand("RRRR").points(), 40);
        assert_eq!(hand("RRRA").points(), 31);
        assert_eq!(hand("7654").points(), 22);

        assert_eq!(hand("RRRA").juego(), Some(31));
        assert_eq!(hand("7654").juego(), None);
        assert_eq!(hand("7654").punto_value(), 22);
        assert_eq!(hand("RRRR").punto_value(), 30); // capped
    }

    #[test]
    fn test_exchange_keeps_four_cards() {
        let mut h = hand("RC74");
        let new_cards = [
            Card::new(Rank::Ace, Suit::Oros),
            Card::new(Rank::Two, Suit::Copas),
        ];

        let removed = h.exchange(&[0, 1], &new_cards);

        assert_eq!(removed.len(), 2);
        assert_eq!(h.cards().len(), 4);
        // Strongest remaining card is now the Seven.
        assert_eq!(h.cards()[0].order(), 4);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!("RRR".parse::<Hand>().is_err());
        assert!("RRRRX".parse::<Hand>().is_err());
        assert!("RRX4".parse::<Hand>().is_err());
    }
}
