//! Mus negotiation: the vote barrier, discard bookkeeping, and señas.
//!
//! Votes are a synchronization barrier. Every seat commits a hidden
//! vote; nothing is revealed until all four are in, so no seat can
//! condition its vote on another's. Once the barrier completes the
//! votes are revealed in clockwise order from mano and only then enter
//! the public history.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::HAND_SIZE;
use crate::core::{GameRng, IllegalReason, MusVote, Seat, SeatMap, SEAT_COUNT};

/// What a completed vote barrier decided.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VoteOutcome {
    /// All four seats want mus; a discard round follows.
    AllMus,
    /// Someone cut; hands freeze and the lances begin.
    Cut,
}

/// The commit side of the vote barrier.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Negotiation {
    votes: SeatMap<Option<MusVote>>,
    iteration: u32,
}

impl Negotiation {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Completed mus iterations this round.
    #[must_use]
    pub fn iteration(&self) -> u32 {
        self.iteration
    }

    #[must_use]
    pub fn has_voted(&self, seat: Seat) -> bool {
        self.votes[seat].is_some()
    }

    /// Seats still owing a vote this iteration.
    #[must_use]
    pub fn waiting_on(&self) -> SmallVec<[Seat; SEAT_COUNT]> {
        Seat::all()
            .filter(|&s| self.votes[s].is_none())
            .collect()
    }

    /// Commits a hidden vote. Returns the barrier outcome once the
    /// fourth vote lands, `None` while the barrier is still open.
    pub fn vote(
        &mut self,
        seat: Seat,
        vote: MusVote,
    ) -> Result<Option<VoteOutcome>, IllegalReason> {
        if self.votes[seat].is_some() {
            return Err(IllegalReason::AlreadyVoted);
        }
        self.votes[seat] = Some(vote);
        if self.waiting_on().is_empty() {
            let all_mus = Seat::all().all(|s| self.votes[s] == Some(MusVote::Mus));
            Ok(Some(if all_mus { VoteOutcome::AllMus } else { VoteOutcome::Cut }))
        } else {
            Ok(None)
        }
    }

    /// The committed votes in clockwise order from mano, for the public
    /// history. Only valid once the barrier has completed.
    #[must_use]
    pub fn reveal(&self, mano: Seat) -> SmallVec<[(Seat, MusVote); SEAT_COUNT]> {
        Seat::clockwise_from(mano)
            .map(|s| (s, self.votes[s].expect("revealed an incomplete barrier")))
            .collect()
    }

    /// Clears the barrier for the next iteration after an all-mus.
    pub fn next_iteration(&mut self) {
        self.votes = SeatMap::with_value(None);
        self.iteration += 1;
    }
}

/// Checks a discard index set: up to four indices into the hand, each
/// in range, no repeats.
pub fn validate_discard(indices: &[u8]) -> Result<(), IllegalReason> {
    if indices.len() > HAND_SIZE {
        return Err(IllegalReason::BadDiscard);
    }
    let mut seen = [false; HAND_SIZE];
    for &i in indices {
        let slot = usize::from(i);
        if slot >= HAND_SIZE || seen[slot] {
            return Err(IllegalReason::BadDiscard);
        }
        seen[slot] = true;
    }
    Ok(())
}

/// Highest seña value a seat may flash.
pub const MAX_SIGNAL: u8 = 3;

/// Covert signal channel between partners.
///
/// The partner always observes a seat's latest signal. Each opposing
/// seat rolls independently per flash and, on a hit, observes that
/// flash; a miss leaves its previous intercept in place. What a seat
/// has observed is exactly what its observation reports.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Signals {
    /// `observed[observer][signaler]` is the last value the observer
    /// saw from that signaler.
    observed: SeatMap<SeatMap<Option<u8>>>,
}

impl Signals {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Flashes a seña. The value must be checked by the caller against
    /// [`MAX_SIGNAL`] before reaching here.
    pub fn flash(&mut self, signaler: Seat, value: u8, rng: &mut GameRng, intercept_chance: f64) {
        assert!(value <= MAX_SIGNAL, "seña value out of range");
        self.observed[signaler.partner()][signaler] = Some(value);
        for opponent in signaler.team().opponent().seats() {
            if rng.gen_bool(intercept_chance) {
                self.observed[opponent][signaler] = Some(value);
            }
        }
    }

    /// Everything `observer` has seen, indexed by signaler.
    #[must_use]
    pub fn observed_by(&self, observer: Seat) -> &SeatMap<Option<u8>> {
        &self.observed[observer]
    }
}
