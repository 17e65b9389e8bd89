//! The four betting disciplines and their pure resolution rules.

pub mod resolver;

use serde::{Deserialize, Serialize};

use crate::cards::Hand;

pub use resolver::{best_seat, compare_hands, team_award};

/// A betting discipline.
///
/// A round plays Grande, Chica, Pares, then Juego, or Punto in place of
/// Juego when no hand reaches 31 points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Lance {
    /// Highest cards win.
    Grande,
    /// Lowest cards win.
    Chica,
    /// Paired-rank groupings; only hands with a repeated class enter.
    Pares,
    /// Point sums of 31 or more, ranked by the house table.
    Juego,
    /// Fallback when nobody has Juego: raw sums under a ceiling of 30.
    Punto,
}

impl Lance {
    /// Whether a hand holds a play for this lance.
    ///
    /// Grande, Chica, and Punto admit every hand; Pares and Juego
    /// require the corresponding play.
    #[must_use]
    pub fn qualifies(self, hand: &Hand) -> bool {
        match self {
            Lance::Grande | Lance::Chica | Lance::Punto => true,
            Lance::Pares => hand.pares().is_some(),
            Lance::Juego => hand.juego().is_some(),
        }
    }
}

impl std::fmt::Display for Lance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Lance::Grande => "Grande",
            Lance::Chica => "Chica",
            Lance::Pares => "Pares",
            Lance::Juego => "Juego",
            Lance::Punto => "Punto",
        };
        write!(f, "{name}")
    }
}
