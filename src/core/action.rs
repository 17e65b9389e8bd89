//! Agent actions and the public action history.
//!
//! One enum covers every decision point in a round: the simultaneous mus
//! vote, the discard selection, the seña, and the betting verbs.
//! The engine checks phase and turn legality on submission; an action
//! that does not belong to the current phase never advances state.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::seat::Seat;

/// A seat's declaration during the negotiation barrier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MusVote {
    /// Ask to keep negotiating (discard and redraw).
    Mus,
    /// Cut negotiation; hands freeze and the lances begin.
    NoMus,
}

/// A complete agent action.
///
/// Bet and raise amounts are free parameters (any value `>= 1` is legal
/// where the variant itself is); legal-action enumerations carry the
/// minimum amount as a representative.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Commit a mus/no-mus vote (simultaneous, hidden until all four are in).
    Vote(MusVote),
    /// Flash a seña value (0..=3) to the partner. Mus phase only.
    Signal(u8),
    /// Replace the cards at these hand indices (0..=4 distinct indices).
    Discard(SmallVec<[u8; 4]>),
    /// Decline to open the betting, or defer after a bet on your team.
    Pass,
    /// Open the betting with this many stones.
    Bet(u32),
    /// Raise the pending bet by this many stones.
    Raise(u32),
    /// Accept the pending stake; the lance resolves at showdown.
    See,
    /// Personally decline the pending bet; the team folds once every
    /// responding seat has declined.
    Fold,
    /// All-in: answerable only by see or fold.
    Ordago,
}

impl Action {
    /// Build a discard action from hand indices.
    #[must_use]
    pub fn discard(indices: &[u8]) -> Self {
        Action::Discard(SmallVec::from_slice(indices))
    }

    /// Keep every card (a zero-card discard).
    #[must_use]
    pub fn keep_all() -> Self {
        Action::Discard(SmallVec::new())
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Vote(MusVote::Mus) => write!(f, "mus"),
            Action::Vote(MusVote::NoMus) => write!(f, "no mus"),
            Action::Signal(v) => write!(f, "signal({v})"),
            Action::Discard(idx) => write!(f, "discard {} cards", idx.len()),
            Action::Pass => write!(f, "pass"),
            Action::Bet(n) => write!(f, "bet {n}"),
            Action::Raise(n) => write!(f, "raise {n}"),
            Action::See => write!(f, "see"),
            Action::Fold => write!(f, "fold"),
            Action::Ordago => write!(f, "órdago"),
        }
    }
}

/// A recorded public action with ordering metadata.
///
/// Votes enter the history only after the whole barrier reveals; señas
/// never enter it (they are covert by definition).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The seat that acted.
    pub seat: Seat,

    /// The action taken.
    pub action: Action,

    /// Round number when the action was taken (starts at 1).
    pub round: u32,

    /// Sequence number within the round (for ordering).
    pub sequence: u32,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(seat: Seat, action: Action, round: u32, sequence: u32) -> Self {
        Self {
            seat,
            action,
            round,
            sequence,
        }
    }
}
