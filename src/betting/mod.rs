//! The betting protocol shared by all four lances.
//!
//! `BetState` is a small state machine fed one action at a time. It
//! tracks two stakes: the `agreed` amount, already committed by both
//! teams and banked by the aggressor if the other team folds, and the
//! `proposed` amount still on the table. A raise accepts the proposal
//! into the agreed stake and puts a new one up; `see` accepts it and
//! closes the lance for showdown.
//!
//! ## Turn order
//!
//! The open phase visits eligible seats clockwise from mano. Once a bet
//! is made, the opposing team's eligible seats respond in the same
//! order. A personal fold is sticky for the lance and defers to the
//! partner; the team folds when no responder remains.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Action, IllegalReason, MusError, Seat, SeatMap, TeamId};
use crate::lance::Lance;

/// How a lance's betting ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BetOutcome {
    /// Every eligible seat passed; the lance resolves at showdown for
    /// the nominal single stone.
    AllPassed,
    /// One team folded; the winner banks the stake immediately and no
    /// hand is revealed for this lance.
    Folded { winner: TeamId, stake: u32 },
    /// A bet was seen; resolution is deferred to showdown.
    Seen { stake: u32 },
    /// An órdago was seen; the lance's winner takes the match.
    OrdagoSeen,
}

/// Betting state for one lance.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BetState {
    lance: Lance,
    mano: Seat,
    eligible: SeatMap<bool>,
    folded: SeatMap<bool>,
    agreed: u32,
    proposed: u32,
    ordago: bool,
    aggressor: Option<Seat>,
    queue: SmallVec<[Seat; 4]>,
    outcome: Option<BetOutcome>,
}

impl BetState {
    /// Opens betting for a lance.
    ///
    /// Panics unless both teams hold at least one eligible seat; a
    /// one-sided lance is settled by the controller without betting.
    #[must_use]
    pub fn new(lance: Lance, mano: Seat, eligible: SeatMap<bool>) -> Self {
        for team in TeamId::both() {
            assert!(
                team.seats().iter().any(|&s| eligible[s]),
                "betting opened with no eligible seat on {team:?}"
            );
        }
        let queue = Seat::clockwise_from(mano)
            .filter(|&s| eligible[s])
            .collect();
        BetState {
            lance,
            mano,
            eligible,
            folded: SeatMap::with_value(false),
            agreed: 0,
            proposed: 0,
            ordago: false,
            aggressor: None,
            queue,
            outcome: None,
        }
    }

    #[must_use]
    pub fn lance(&self) -> Lance {
        self.lance
    }

    /// The seat whose turn it is, or `None` once the betting is closed.
    #[must_use]
    pub fn turn(&self) -> Option<Seat> {
        if self.outcome.is_some() {
            None
        } else {
            self.queue.first().copied()
        }
    }

    #[must_use]
    pub fn outcome(&self) -> Option<BetOutcome> {
        self.outcome
    }

    /// Stake committed by both teams so far.
    #[must_use]
    pub fn agreed(&self) -> u32 {
        self.agreed
    }

    /// Stake proposed and not yet answered.
    #[must_use]
    pub fn proposed(&self) -> u32 {
        self.proposed
    }

    #[must_use]
    pub fn is_ordago(&self) -> bool {
        self.ordago
    }

    #[must_use]
    pub fn eligible(&self) -> &SeatMap<bool> {
        &self.eligible
    }

    fn in_open_phase(&self) -> bool {
        self.aggressor.is_none()
    }

    /// Responders for `team`: eligible, not folded, clockwise from mano.
    fn responders(&self, team: TeamId) -> SmallVec<[Seat; 4]> {
        Seat::clockwise_from(self.mano)
            .filter(|&s| s.team() == team && self.eligible[s] && !self.folded[s])
            .collect()
    }

    /// Legal actions for a seat. Bet and raise amounts are free
    /// parameters of at least one stone; the returned variants carry
    /// the minimum as a representative.
    #[must_use]
    pub fn legal(&self, seat: Seat) -> Vec<Action> {
        if self.turn() != Some(seat) {
            return Vec::new();
        }
        if self.in_open_phase() {
            vec![Action::Pass, Action::Bet(1), Action::Ordago]
        } else if self.ordago {
            vec![Action::See, Action::Fold]
        } else {
            vec![Action::See, Action::Raise(1), Action::Ordago, Action::Fold]
        }
    }

    /// Applies one betting action. An illegal action leaves the state
    /// untouched and reports why.
    pub fn act(&mut self, seat: Seat, action: &Action) -> Result<(), MusError> {
        if !self.eligible[seat] {
            return Err(MusError::illegal(seat, IllegalReason::NotEligible));
        }
        if self.turn() != Some(seat) {
            return Err(MusError::illegal(seat, IllegalReason::OutOfTurn));
        }
        match action {
            Action::Pass => {
                if !self.in_open_phase() {
                    return Err(MusError::illegal(seat, IllegalReason::WrongPhase));
                }
                self.queue.remove(0);
                if self.queue.is_empty() {
                    self.outcome = Some(BetOutcome::AllPassed);
                }
                Ok(())
            }
            Action::Bet(amount) => {
                if !self.in_open_phase() {
                    return Err(MusError::illegal(seat, IllegalReason::WrongPhase));
                }
                if *amount == 0 {
                    return Err(MusError::illegal(seat, IllegalReason::ZeroAmount));
                }
                self.proposed = *amount;
                self.pass_turn_to_opponents(seat);
                Ok(())
            }
            Action::Raise(amount) => {
                if self.in_open_phase() {
                    return Err(MusError::illegal(seat, IllegalReason::WrongPhase));
                }
                if self.ordago {
                    return Err(MusError::illegal(seat, IllegalReason::BetAfterOrdago));
                }
                if *amount == 0 {
                    return Err(MusError::illegal(seat, IllegalReason::ZeroAmount));
                }
                // Raising sees the pending proposal and stacks a new one.
                self.agreed += self.proposed;
                self.proposed = *amount;
                self.pass_turn_to_opponents(seat);
                Ok(())
            }
            Action::See => {
                if self.in_open_phase() {
                    return Err(MusError::illegal(seat, IllegalReason::WrongPhase));
                }
                self.agreed += self.proposed;
                self.proposed = 0;
                self.outcome = Some(if self.ordago {
                    BetOutcome::OrdagoSeen
                } else {
                    BetOutcome::Seen { stake: self.agreed }
                });
                Ok(())
            }
            Action::Fold => {
                if self.in_open_phase() {
                    return Err(MusError::illegal(seat, IllegalReason::WrongPhase));
                }
                self.folded[seat] = true;
                self.queue.remove(0);
                if self.queue.is_empty() {
                    let aggressor = self
                        .aggressor
                        .expect("respond phase without an aggressor");
                    self.outcome = Some(BetOutcome::Folded {
                        winner: aggressor.team(),
                        // A fold before any raise still concedes one stone.
                        stake: self.agreed.max(1),
                    });
                }
                Ok(())
            }
            Action::Ordago => {
                if self.ordago {
                    return Err(MusError::illegal(seat, IllegalReason::BetAfterOrdago));
                }
                self.agreed += self.proposed;
                self.proposed = 0;
                self.ordago = true;
                self.pass_turn_to_opponents(seat);
                Ok(())
            }
            _ => Err(MusError::illegal(seat, IllegalReason::WrongPhase)),
        }
    }

    fn pass_turn_to_opponents(&mut self, seat: Seat) {
        self.aggressor = Some(seat);
        self.queue = self.responders(seat.team().opponent());
        debug_assert!(
            !self.queue.is_empty(),
            "aggression with nobody left to answer"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open(lance: Lance) -> BetState {
        BetState::new(lance, Seat::new(0), SeatMap::with_value(true))
    }

    #[test]
    fn test_all_pass_defers_to_showdown() {
        let mut bet = open(Lance::Grande);
        for seat in Seat::all() {
            assert_eq!(bet.turn(), Some(seat));
            bet.act(seat, &Action::Pass).unwrap();
        }
        assert_eq!(bet.outcome(), Some(BetOutcome::AllPassed));
        assert_eq!(bet.turn(), None);
    }

    #[test]
    fn test_bet_and_see() {
        let mut bet = open(Lance::Grande);
        bet.act(Seat::new(0), &Action::Bet(2)).unwrap();
        // The opposing team answers, starting with seat 1.
        assert_eq!(bet.turn(), Some(Seat::new(1)));
        bet.act(Seat::new(1), &Action::See).unwrap();
        assert_eq!(bet.outcome(), Some(BetOutcome::Seen { stake: 2 }));
    }

    #[test]
    fn test_fold_before_raise_concedes_one() {
        let mut bet = open(Lance::Chica);
        bet.act(Seat::new(0), &Action::Bet(5)).unwrap();
        bet.act(Seat::new(1), &Action::Fold).unwrap();
        assert!(bet.outcome().is_none());
        bet.act(Seat::new(3), &Action::Fold).unwrap();
        assert_eq!(
            bet.outcome(),
            Some(BetOutcome::Folded { winner: TeamId(0), stake: 1 })
        );
    }

    #[test]
    fn test_raise_accepts_prior_proposal() {
        let mut bet = open(Lance::Pares);
        bet.act(Seat::new(0), &Action::Bet(2)).unwrap();
        bet.act(Seat::new(1), &Action::Raise(3)).unwrap();
        assert_eq!(bet.agreed(), 2);
        assert_eq!(bet.proposed(), 3);
        // Roles flipped back to team 0.
        assert_eq!(bet.turn(), Some(Seat::new(0)));
        bet.act(Seat::new(0), &Action::Fold).unwrap();
        bet.act(Seat::new(2), &Action::Fold).unwrap();
        assert_eq!(
            bet.outcome(),
            Some(BetOutcome::Folded { winner: TeamId(1), stake: 2 })
        );
    }

    #[test]
    fn test_seen_raise_fixes_full_stake() {
        let mut bet = open(Lance::Juego);
        bet.act(Seat::new(0), &Action::Bet(2)).unwrap();
        bet.act(Seat::new(1), &Action::Raise(3)).unwrap();
        bet.act(Seat::new(0), &Action::See).unwrap();
        assert_eq!(bet.outcome(), Some(BetOutcome::Seen { stake: 5 }));
    }

    #[test]
    fn test_ordago_restricts_replies() {
        let mut bet = open(Lance::Grande);
        bet.act(Seat::new(0), &Action::Ordago).unwrap();
        assert_eq!(
            bet.legal(Seat::new(1)),
            vec![Action::See, Action::Fold]
        );
        let err = bet.act(Seat::new(1), &Action::Raise(2)).unwrap_err();
        assert!(matches!(
            err,
            MusError::IllegalAction { reason: IllegalReason::BetAfterOrdago, .. }
        ));
        bet.act(Seat::new(1), &Action::See).unwrap();
        assert_eq!(bet.outcome(), Some(BetOutcome::OrdagoSeen));
    }

    #[test]
    fn test_ordago_fold_concedes_agreed_stake() {
        let mut bet = open(Lance::Grande);
        bet.act(Seat::new(0), &Action::Bet(4)).unwrap();
        bet.act(Seat::new(1), &Action::Ordago).unwrap();
        // The órdago saw the 4 on its way up.
        assert_eq!(bet.agreed(), 4);
        bet.act(Seat::new(0), &Action::Fold).unwrap();
        bet.act(Seat::new(2), &Action::Fold).unwrap();
        assert_eq!(
            bet.outcome(),
            Some(BetOutcome::Folded { winner: TeamId(1), stake: 4 })
        );
    }

    #[test]
    fn test_out_of_turn_rejected_state_unchanged() {
        let mut bet = open(Lance::Grande);
        let err = bet.act(Seat::new(2), &Action::Pass).unwrap_err();
        assert!(matches!(
            err,
            MusError::IllegalAction { reason: IllegalReason::OutOfTurn, .. }
        ));
        assert_eq!(bet.turn(), Some(Seat::new(0)));
    }

    #[test]
    fn test_zero_bet_rejected() {
        let mut bet = open(Lance::Grande);
        let err = bet.act(Seat::new(0), &Action::Bet(0)).unwrap_err();
        assert!(matches!(
            err,
            MusError::IllegalAction { reason: IllegalReason::ZeroAmount, .. }
        ));
    }

    #[test]
    fn test_partner_can_answer_when_first_folds() {
        let mut bet = open(Lance::Grande);
        bet.act(Seat::new(0), &Action::Bet(2)).unwrap();
        bet.act(Seat::new(1), &Action::Fold).unwrap();
        assert_eq!(bet.turn(), Some(Seat::new(3)));
        bet.act(Seat::new(3), &Action::See).unwrap();
        assert_eq!(bet.outcome(), Some(BetOutcome::Seen { stake: 2 }));
    }

    #[test]
    fn test_eligibility_limits_turn_order() {
        let mut eligible = SeatMap::with_value(true);
        eligible[Seat::new(1)] = false;
        let mut bet = BetState::new(Lance::Pares, Seat::new(0), eligible);
        bet.act(Seat::new(0), &Action::Bet(2)).unwrap();
        // Seat 1 never speaks; the answer falls to seat 3 alone.
        assert_eq!(bet.turn(), Some(Seat::new(3)));
        bet.act(Seat::new(3), &Action::Fold).unwrap();
        assert_eq!(
            bet.outcome(),
            Some(BetOutcome::Folded { winner: TeamId(0), stake: 1 })
        );
    }
}
