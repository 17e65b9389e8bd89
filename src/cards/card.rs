//! Card identities, ranking order, and point values.
//!
//! The Spanish deck used in Mus has 40 cards: ten face ranks in four
//! suits. For comparison purposes the ten ranks collapse to eight
//! strength classes: Kings pair with Threes at the top and Twos pair
//! with Aces at the bottom. Suits never affect ranking.

use serde::{Deserialize, Serialize};

/// Face rank of a Spanish-deck card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rank {
    Ace,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    /// Sota.
    Jack,
    /// Caballo.
    Knight,
    /// Rey.
    King,
}

impl Rank {
    /// All ten face ranks.
    pub const ALL: [Rank; 10] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Jack,
        Rank::Knight,
        Rank::King,
    ];

    /// Strength class for Grande/Chica ordering (0 weakest, 7 strongest).
    ///
    /// King and Three share the top class; Two and Ace share the bottom.
    #[must_use]
    pub const fn order(self) -> u8 {
        match self {
            Rank::King | Rank::Three => 7,
            Rank::Knight => 6,
            Rank::Jack => 5,
            Rank::Seven => 4,
            Rank::Six => 3,
            Rank::Five => 2,
            Rank::Four => 1,
            Rank::Two | Rank::Ace => 0,
        }
    }

    /// Point value for Juego/Punto sums.
    #[must_use]
    pub const fn points(self) -> u8 {
        match self {
            Rank::King | Rank::Three | Rank::Knight | Rank::Jack => 10,
            Rank::Seven => 7,
            Rank::Six => 6,
            Rank::Five => 5,
            Rank::Four => 4,
            Rank::Two | Rank::Ace => 1,
        }
    }

    /// Parse a single-character rank code (test and display shorthand):
    /// `R`=King, `C`=Knight, `S`=Jack, `7`..`2` face ranks, `3`=Three,
    /// `A` or `1`=Ace.
    #[must_use]
    pub fn from_char(c: char) -> Option<Rank> {
        match c {
            'R' | 'K' => Some(Rank::King),
            'C' => Some(Rank::Knight),
            'S' | 'J' => Some(Rank::Jack),
            '7' => Some(Rank::Seven),
            '6' => Some(Rank::Six),
            '5' => Some(Rank::Five),
            '4' => Some(Rank::Four),
            '3' => Some(Rank::Three),
            '2' => Some(Rank::Two),
            'A' | '1' => Some(Rank::Ace),
            _ => None,
        }
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Rank::Ace => "Ace",
            Rank::Two => "Two",
            Rank::Three => "Three",
            Rank::Four => "Four",
            Rank::Five => "Five",
            Rank::Six => "Six",
            Rank::Seven => "Seven",
            Rank::Jack => "Jack",
            Rank::Knight => "Knight",
            Rank::King => "King",
        };
        write!(f, "{name}")
    }
}

/// Suit of a Spanish-deck card. Never affects ranking.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suit {
    Oros,
    Copas,
    Espadas,
    Bastos,
}

impl Suit {
    /// All four suits.
    pub const ALL: [Suit; 4] = [Suit::Oros, Suit::Copas, Suit::Espadas, Suit::Bastos];
}

impl std::fmt::Display for Suit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Suit::Oros => "Oros",
            Suit::Copas => "Copas",
            Suit::Espadas => "Espadas",
            Suit::Bastos => "Bastos",
        };
        write!(f, "{name}")
    }
}

/// An immutable card identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    /// Create a card.
    #[must_use]
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// Strength class for Grande/Chica ordering.
    #[must_use]
    pub const fn order(self) -> u8 {
        self.rank.order()
    }

    /// Point value for Juego/Punto sums.
    #[must_use]
    pub const fn points(self) -> u8 {
        self.rank.points()
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} of {}", self.rank, self.suit)
    }
}

/// All 40 cards of the deck, in a fixed canonical order.
#[must_use]
pub fn full_deck() -> Vec<Card> {
    let mut cards = Vec::with_capacity(40);
    for suit in Suit::ALL {
        for rank in Rank::ALL {
            cards.push(Card::new(rank, suit));
        }
    }
    cards
}
