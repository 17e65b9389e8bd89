//! Error taxonomy for the engine and environment boundary.
//!
//! Agent-facing errors are always recoverable: the environment rejects
//! the action, leaves the state untouched, and re-prompts the offender.
//! Engine-internal invariant violations (hand size, card multiset) are
//! asserted and abort the instance; they indicate an engine bug, not
//! an agent error, and are never swallowed.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::seat::Seat;

/// Why a submitted action was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum IllegalReason {
    #[error("it is not this seat's turn to act")]
    OutOfTurn,
    #[error("the action does not belong to the current phase")]
    WrongPhase,
    #[error("this seat already committed a vote this iteration")]
    AlreadyVoted,
    #[error("discard indices must be distinct and within 0..4")]
    BadDiscard,
    #[error("bet and raise amounts must be at least 1")]
    ZeroAmount,
    #[error("this seat holds no play for the lance and bluffing is disabled")]
    NotEligible,
    #[error("only see or fold may answer an órdago")]
    BetAfterOrdago,
    #[error("covert signals are disabled by configuration")]
    SignalsDisabled,
    #[error("signal values must be within 0..=3")]
    BadSignal,
}

/// Errors surfaced across the environment boundary.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum MusError {
    /// Action not in the current legal set. State does not advance.
    #[error("illegal action by {seat}: {reason}")]
    IllegalAction { seat: Seat, reason: IllegalReason },

    /// Configuration rejected at construction/reset time.
    #[error("malformed configuration: {0}")]
    MalformedConfig(String),

    /// The match already has a winner; no further actions are accepted.
    #[error("the match is over")]
    MatchOver,
}

impl MusError {
    /// Shorthand for an illegal-action rejection.
    #[must_use]
    pub fn illegal(seat: Seat, reason: IllegalReason) -> Self {
        Self::IllegalAction { seat, reason }
    }
}
