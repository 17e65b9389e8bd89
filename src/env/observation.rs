//! Per-seat views of the game.
//!
//! An observation owns every field it carries. Nothing in it borrows
//! engine state, so handing one to an agent can never leak a later
//! mutation, and the projection rule is structural: the only hidden
//! cards present are the observer's own hand, revealed showdown hands,
//! and señas this seat actually saw.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::betting::BetState;
use crate::cards::Hand;
use crate::core::{ActionRecord, Seat, SeatMap, TeamId, TeamMap, SEAT_COUNT};
use crate::game::{LanceRecord, MusGame, Phase};

/// Everything one seat is allowed to know.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Observation {
    pub seat: Seat,
    pub team: TeamId,
    /// The observer's own four cards.
    pub hand: Hand,
    pub phase: Phase,
    pub round: u32,
    pub mano: Seat,
    pub scores: TeamMap<u32>,
    pub round_stones: TeamMap<u32>,
    pub mus_iterations: u32,
    /// Seats owing a decision, as the environment reports it.
    pub to_act: SmallVec<[Seat; SEAT_COUNT]>,
    /// Which seats have committed a vote this iteration. Commitment
    /// is public; the vote values stay hidden until the barrier closes.
    pub voted: SeatMap<bool>,
    /// Betting state of the open lance, if one is open. Stakes, turn,
    /// and eligibility are public at the table.
    pub bet: Option<BetState>,
    /// This round's lances so far.
    pub lances: Vec<LanceRecord>,
    /// Hands laid open by a showdown. `None` for every seat whose hand
    /// stayed hidden.
    pub revealed: SeatMap<Option<Hand>>,
    /// The full public action history of the match.
    pub history: Vector<ActionRecord>,
    /// Señas this seat observed, indexed by signaler: the partner's
    /// latest flash, plus any opposing flash it intercepted.
    pub signals: SeatMap<Option<u8>>,
}

impl Observation {
    /// Projects the game onto one seat.
    #[must_use]
    pub fn capture(game: &MusGame, seat: Seat) -> Self {
        Observation {
            seat,
            team: seat.team(),
            hand: game.hand(seat).clone(),
            phase: game.phase(),
            round: game.round(),
            mano: game.mano(),
            scores: game.scores().clone(),
            round_stones: game.round_stones().clone(),
            mus_iterations: game.mus_iterations(),
            to_act: game.to_act(),
            voted: SeatMap::new(|s| game.has_voted(s)),
            bet: game.bet().cloned(),
            lances: game.lances().to_vec(),
            revealed: game.revealed().clone(),
            history: game.history().clone(),
            signals: game.signals_observed_by(seat).clone(),
        }
    }
}
