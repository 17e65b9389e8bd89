//! Round and match controller.
//!
//! Drives one match of Mus through its phases:
//!
//! ```text
//! Deal -> Voting -> (Discarding -> Voting)* -> Grande -> Chica
//!      -> Pares -> Juego|Punto -> Score -> (next round | match over)
//! ```
//!
//! Deal and Score need no agent input and run inline. Stones bank the
//! moment their outcome is known: fold awards during the lance,
//! uncontested awards when the lance opens, deferred lances at Score
//! with hands revealed. The first team to reach the target wins; ties
//! inside one scoring pass go to the team that banked first.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::betting::{BetOutcome, BetState};
use crate::cards::{assert_full_multiset, Deck, Hand};
use crate::core::{
    Action, ActionRecord, GameRng, IllegalReason, MusConfig, MusError, Seat, SeatMap, TeamId,
    TeamMap, SEAT_COUNT,
};
use crate::lance::{best_seat, team_award, Lance};
use crate::mus::{validate_discard, Negotiation, Signals, VoteOutcome, MAX_SIGNAL};

/// Where the match currently is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// The vote barrier is open.
    Voting,
    /// All four voted mus; seats exchange cards in turn.
    Discarding,
    /// Betting on one lance.
    Lance(Lance),
    /// A team reached the target.
    MatchOver { winner: TeamId },
}

/// How one lance of the current round went.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LanceResult {
    /// Nobody held the play; zero stones.
    Skipped,
    /// Only one team held the play; it banked the nominal award
    /// without betting.
    Uncontested { winner: TeamId, stones: u32 },
    /// A team folded; the stake banked immediately, no reveal.
    Folded { winner: TeamId, stones: u32 },
    /// Stake fixed, resolution waiting on the showdown at Score.
    Deferred { stake: u32, eligible: SeatMap<bool> },
    /// Resolved by comparison with hands revealed.
    Showdown { winner: TeamId, best: Seat, stones: u32 },
}

/// One lance's public record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanceRecord {
    pub lance: Lance,
    pub result: LanceResult,
}

/// One full match: deal, negotiation, four lances, scoring, repeat.
#[derive(Clone, Debug)]
pub struct MusGame {
    config: MusConfig,
    rng: GameRng,
    round: u32,
    mano: Seat,
    phase: Phase,
    scores: TeamMap<u32>,
    round_stones: TeamMap<u32>,
    step_deltas: TeamMap<u32>,
    hands: SeatMap<Hand>,
    deck: Deck,
    negotiation: Negotiation,
    signals: Signals,
    discard_queue: SmallVec<[Seat; SEAT_COUNT]>,
    bet: Option<BetState>,
    lances: Vec<LanceRecord>,
    plan: SmallVec<[Lance; SEAT_COUNT]>,
    revealed: SeatMap<Option<Hand>>,
    history: Vector<ActionRecord>,
    sequence: u32,
    winner_pending: Option<TeamId>,
}

impl MusGame {
    /// Starts a match. The config must already be validated.
    #[must_use]
    pub fn new(config: MusConfig, seed: u64) -> Self {
        let mut rng = GameRng::new(seed);
        let mano = config
            .initial_mano
            .unwrap_or_else(|| Self::draw_for_mano(&mut rng));
        let mut deck = Deck::shuffled(&mut rng);
        let dealt = deck.deal_all();
        let hands = SeatMap::new(|s| Hand::new(dealt[s.index()]));
        MusGame {
            config,
            rng,
            round: 1,
            mano,
            phase: Phase::Voting,
            scores: TeamMap::with_value(0),
            round_stones: TeamMap::with_value(0),
            step_deltas: TeamMap::with_value(0),
            hands,
            deck,
            negotiation: Negotiation::new(),
            signals: Signals::new(),
            discard_queue: SmallVec::new(),
            bet: None,
            lances: Vec::new(),
            plan: SmallVec::new(),
            revealed: SeatMap::with_value(None),
            history: Vector::new(),
            sequence: 0,
            winner_pending: None,
        }
    }

    /// Draws one card per seat from a shuffled deck; the highest
    /// strength class takes mano, earlier seat keeping ties.
    fn draw_for_mano(rng: &mut GameRng) -> Seat {
        let mut deck = Deck::shuffled(rng);
        let draws = deck.draw(SEAT_COUNT, rng);
        let mut best = Seat::new(0);
        for (i, card) in draws.iter().enumerate().skip(1) {
            if card.order() > draws[best.index()].order() {
                best = Seat::new(i as u8);
            }
        }
        best
    }

    fn deal(&mut self) {
        self.deck = Deck::shuffled(&mut self.rng);
        let dealt = self.deck.deal_all();
        self.hands = SeatMap::new(|s| Hand::new(dealt[s.index()]));
        self.negotiation = Negotiation::new();
        self.signals = Signals::new();
        self.discard_queue.clear();
        self.bet = None;
        self.lances.clear();
        self.plan.clear();
        self.revealed = SeatMap::with_value(None);
        self.round_stones = TeamMap::with_value(0);
        self.phase = Phase::Voting;
    }

    #[must_use]
    pub fn config(&self) -> &MusConfig {
        &self.config
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    #[must_use]
    pub fn mano(&self) -> Seat {
        self.mano
    }

    #[must_use]
    pub fn scores(&self) -> &TeamMap<u32> {
        &self.scores
    }

    #[must_use]
    pub fn round_stones(&self) -> &TeamMap<u32> {
        &self.round_stones
    }

    #[must_use]
    pub fn hand(&self, seat: Seat) -> &Hand {
        &self.hands[seat]
    }

    #[must_use]
    pub fn revealed(&self) -> &SeatMap<Option<Hand>> {
        &self.revealed
    }

    #[must_use]
    pub fn lances(&self) -> &[LanceRecord] {
        &self.lances
    }

    #[must_use]
    pub fn bet(&self) -> Option<&BetState> {
        self.bet.as_ref()
    }

    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    #[must_use]
    pub fn has_voted(&self, seat: Seat) -> bool {
        self.negotiation.has_voted(seat)
    }

    #[must_use]
    pub fn mus_iterations(&self) -> u32 {
        self.negotiation.iteration()
    }

    /// What `observer` has seen of each seat's señas.
    #[must_use]
    pub fn signals_observed_by(&self, observer: Seat) -> &SeatMap<Option<u8>> {
        self.signals.observed_by(observer)
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        matches!(self.phase, Phase::MatchOver { .. })
    }

    /// Stones banked since the last drain, per team. The environment
    /// reads this once per step for shaped rewards.
    pub fn drain_step_deltas(&mut self) -> TeamMap<u32> {
        std::mem::replace(&mut self.step_deltas, TeamMap::with_value(0))
    }

    /// Seats owing a decision right now. All un-voted seats during the
    /// barrier; exactly one seat in every other live phase.
    #[must_use]
    pub fn to_act(&self) -> SmallVec<[Seat; SEAT_COUNT]> {
        match self.phase {
            Phase::Voting => self.negotiation.waiting_on(),
            Phase::Discarding => self.discard_queue.first().copied().into_iter().collect(),
            Phase::Lance(_) => {
                let bet = self.bet.as_ref().expect("lance phase without betting state");
                bet.turn().into_iter().collect()
            }
            Phase::MatchOver { .. } => SmallVec::new(),
        }
    }

    /// Legal actions for a seat in the current phase. Empty when it is
    /// not this seat's turn.
    #[must_use]
    pub fn legal_actions(&self, seat: Seat) -> Vec<Action> {
        match self.phase {
            Phase::Voting => {
                if self.negotiation.has_voted(seat) {
                    return Vec::new();
                }
                let mut actions = vec![
                    Action::Vote(crate::core::MusVote::Mus),
                    Action::Vote(crate::core::MusVote::NoMus),
                ];
                if self.config.enable_signals {
                    actions.extend((0..=MAX_SIGNAL).map(Action::Signal));
                }
                actions
            }
            Phase::Discarding => {
                if self.discard_queue.first() != Some(&seat) {
                    return Vec::new();
                }
                // All 16 index subsets, keep-all included.
                (0u8..16)
                    .map(|mask| {
                        let indices: SmallVec<[u8; 4]> =
                            (0u8..4).filter(|i| mask & (1 << i) != 0).collect();
                        Action::Discard(indices)
                    })
                    .collect()
            }
            Phase::Lance(_) => self
                .bet
                .as_ref()
                .map(|b| b.legal(seat))
                .unwrap_or_default(),
            Phase::MatchOver { .. } => Vec::new(),
        }
    }

    /// Applies one action. Illegal actions leave the state untouched.
    pub fn apply(&mut self, seat: Seat, action: Action) -> Result<(), MusError> {
        match self.phase {
            Phase::MatchOver { .. } => Err(MusError::MatchOver),
            Phase::Voting => self.apply_vote_phase(seat, action),
            Phase::Discarding => self.apply_discard(seat, action),
            Phase::Lance(lance) => self.apply_bet(lance, seat, action),
        }
    }

    fn apply_vote_phase(&mut self, seat: Seat, action: Action) -> Result<(), MusError> {
        match action {
            Action::Signal(value) => {
                if !self.config.enable_signals {
                    return Err(MusError::illegal(seat, IllegalReason::SignalsDisabled));
                }
                if value > MAX_SIGNAL {
                    return Err(MusError::illegal(seat, IllegalReason::BadSignal));
                }
                if self.negotiation.has_voted(seat) {
                    return Err(MusError::illegal(seat, IllegalReason::OutOfTurn));
                }
                // Señas never enter the public history.
                self.signals.flash(
                    seat,
                    value,
                    &mut self.rng,
                    self.config.signal_intercept_chance,
                );
                Ok(())
            }
            Action::Vote(vote) => {
                let outcome = self
                    .negotiation
                    .vote(seat, vote)
                    .map_err(|r| MusError::illegal(seat, r))?;
                if let Some(outcome) = outcome {
                    self.complete_barrier(outcome);
                }
                Ok(())
            }
            _ => Err(MusError::illegal(seat, IllegalReason::WrongPhase)),
        }
    }

    /// The barrier just closed: reveal the votes into the history in
    /// clockwise order from mano, then branch on the outcome.
    fn complete_barrier(&mut self, outcome: VoteOutcome) {
        for (voter, vote) in self.negotiation.reveal(self.mano) {
            self.record(voter, Action::Vote(vote));
        }
        match outcome {
            VoteOutcome::Cut => self.start_lances(),
            VoteOutcome::AllMus => {
                self.discard_queue = Seat::clockwise_from(self.mano).collect();
                self.phase = Phase::Discarding;
            }
        }
    }

    fn apply_discard(&mut self, seat: Seat, action: Action) -> Result<(), MusError> {
        if self.discard_queue.first() != Some(&seat) {
            return Err(MusError::illegal(seat, IllegalReason::OutOfTurn));
        }
        let Action::Discard(indices) = action else {
            return Err(MusError::illegal(seat, IllegalReason::WrongPhase));
        };
        validate_discard(&indices).map_err(|r| MusError::illegal(seat, r))?;

        // Replacements come out before the removed cards go to the
        // discard pile, so a seat can never redraw its own discards.
        let replacements = self.deck.draw(indices.len(), &mut self.rng);
        let removed = self.hands[seat].exchange(&indices, &replacements);
        self.deck.discard(removed);
        let all_hands: [Hand; SEAT_COUNT] =
            std::array::from_fn(|i| self.hands[Seat::new(i as u8)].clone());
        assert_full_multiset(&all_hands, &self.deck);

        self.record(seat, Action::Discard(indices));
        self.discard_queue.remove(0);
        if self.discard_queue.is_empty() {
            self.negotiation.next_iteration();
            if let Some(cap) = self.config.max_mus_iterations {
                if self.negotiation.iteration() >= cap {
                    log::warn!(
                        "mus iteration cap {cap} reached in round {}; cutting",
                        self.round
                    );
                    self.start_lances();
                    return Ok(());
                }
            }
            self.phase = Phase::Voting;
        }
        Ok(())
    }

    fn apply_bet(&mut self, lance: Lance, seat: Seat, action: Action) -> Result<(), MusError> {
        let bet = self.bet.as_mut().expect("lance phase without betting state");
        bet.act(seat, &action)?;
        self.record(seat, action);
        if let Some(outcome) = self.bet.as_ref().and_then(BetState::outcome) {
            self.settle_lance(lance, outcome);
        }
        Ok(())
    }

    fn settle_lance(&mut self, lance: Lance, outcome: BetOutcome) {
        let eligible = self
            .bet
            .take()
            .expect("settled a lance without betting state")
            .eligible()
            .clone();
        match outcome {
            BetOutcome::AllPassed => {
                self.lances.push(LanceRecord {
                    lance,
                    result: LanceResult::Deferred { stake: 1, eligible },
                });
            }
            BetOutcome::Seen { stake } => {
                self.lances.push(LanceRecord {
                    lance,
                    result: LanceResult::Deferred { stake, eligible },
                });
            }
            BetOutcome::Folded { winner, stake } => {
                self.bank(winner, stake);
                self.lances.push(LanceRecord {
                    lance,
                    result: LanceResult::Folded { winner, stones: stake },
                });
            }
            BetOutcome::OrdagoSeen => {
                let field = self.showdown_field(lance, &eligible);
                let best = best_seat(
                    lance,
                    &self.hands,
                    self.mano,
                    &field,
                    &self.config.juego_ranking,
                )
                .expect("órdago showdown with no eligible seat");
                let winner = best.team();
                let stones = self.config.target_score;
                self.bank(winner, stones);
                self.reveal_hands(&field);
                self.lances.push(LanceRecord {
                    lance,
                    result: LanceResult::Showdown { winner, best, stones },
                });
                // A seen órdago decides the match; nothing after it is
                // played, but already committed stakes still resolve.
                self.plan.clear();
                self.score_round();
                return;
            }
        }
        self.open_next_lance();
    }

    /// Freezes hands and lays out this round's lances.
    fn start_lances(&mut self) {
        self.plan.clear();
        self.plan.push(Lance::Grande);
        self.plan.push(Lance::Chica);
        self.plan.push(Lance::Pares);
        let anyone_has_juego = Seat::all().any(|s| self.hands[s].juego().is_some());
        self.plan.push(if anyone_has_juego {
            Lance::Juego
        } else {
            Lance::Punto
        });
        self.open_next_lance();
    }

    /// Opens lances until one needs betting, settling skipped and
    /// uncontested ones inline. Falls through to Score when the plan
    /// is exhausted.
    fn open_next_lance(&mut self) {
        while !self.plan.is_empty() {
            let lance = self.plan.remove(0);
            let eligible = self.eligibility(lance);
            let mut contenders: SmallVec<[TeamId; 2]> = SmallVec::new();
            for team in TeamId::both() {
                if team.seats().iter().any(|&s| eligible[s]) {
                    contenders.push(team);
                }
            }
            match contenders.len() {
                0 => {
                    self.lances.push(LanceRecord {
                        lance,
                        result: LanceResult::Skipped,
                    });
                }
                1 => {
                    let winner = contenders[0];
                    let stones =
                        team_award(lance, 1, winner, &self.hands, &self.config.bonuses);
                    self.bank(winner, stones);
                    self.lances.push(LanceRecord {
                        lance,
                        result: LanceResult::Uncontested { winner, stones },
                    });
                }
                _ => {
                    self.bet = Some(BetState::new(lance, self.mano, eligible));
                    self.phase = Phase::Lance(lance);
                    return;
                }
            }
        }
        self.score_round();
    }

    /// Who may bet in a lance. Grande, Chica, and Punto admit every
    /// seat. Pares and Juego admit holders of the play; with
    /// `allow_unqualified_bets`, any seat whose team holds one.
    fn eligibility(&self, lance: Lance) -> SeatMap<bool> {
        let qualifying = SeatMap::new(|s| lance.qualifies(&self.hands[s]));
        if !self.config.allow_unqualified_bets {
            return qualifying;
        }
        SeatMap::new(|s: Seat| s.team().seats().iter().any(|&t| qualifying[t]))
    }

    /// Who actually compares at a showdown. With unqualified betting
    /// allowed, a seat may drive the stake without holding the play;
    /// its hand still never enters the comparison.
    fn showdown_field(&self, lance: Lance, eligible: &SeatMap<bool>) -> SeatMap<bool> {
        SeatMap::new(|s: Seat| eligible[s] && lance.qualifies(&self.hands[s]))
    }

    fn bank(&mut self, team: TeamId, stones: u32) {
        self.scores[team] += stones;
        self.round_stones[team] += stones;
        self.step_deltas[team] += stones;
        if self.winner_pending.is_none() && self.scores[team] >= self.config.target_score {
            self.winner_pending = Some(team);
        }
    }

    fn reveal_hands(&mut self, eligible: &SeatMap<bool>) {
        for seat in Seat::all() {
            if eligible[seat] {
                self.revealed[seat] = Some(self.hands[seat].clone());
            }
        }
    }

    /// Resolves every deferred lance in play order, then either ends
    /// the match or rotates mano and deals again.
    fn score_round(&mut self) {
        for i in 0..self.lances.len() {
            let LanceResult::Deferred { stake, ref eligible } = self.lances[i].result else {
                continue;
            };
            let eligible = eligible.clone();
            let lance = self.lances[i].lance;
            let field = self.showdown_field(lance, &eligible);
            let best = best_seat(
                lance,
                &self.hands,
                self.mano,
                &field,
                &self.config.juego_ranking,
            )
            .expect("deferred lance had eligible seats");
            let winner = best.team();
            let stones = team_award(lance, stake, winner, &self.hands, &self.config.bonuses);
            self.bank(winner, stones);
            self.reveal_hands(&field);
            self.lances[i].result = LanceResult::Showdown { winner, best, stones };
        }
        if let Some(winner) = self.winner_pending {
            self.phase = Phase::MatchOver { winner };
        } else {
            self.round += 1;
            self.mano = self.mano.next();
            self.deal();
        }
    }

    fn record(&mut self, seat: Seat, action: Action) {
        self.history
            .push_back(ActionRecord::new(seat, action, self.round, self.sequence));
        self.sequence += 1;
    }

    #[cfg(test)]
    fn force_hands(&mut self, hands: SeatMap<Hand>) {
        self.hands = hands;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MusVote;

    fn config() -> MusConfig {
        MusConfig::new().with_initial_mano(Seat::new(0))
    }

    fn game() -> MusGame {
        MusGame::new(config(), 11)
    }

    fn vote_all(game: &mut MusGame, votes: [MusVote; 4]) {
        for seat in Seat::all() {
            game.apply(seat, Action::Vote(votes[seat.index()])).unwrap();
        }
    }

    /// Fixed deal where every seat holds pares and only seat 3 lacks
    /// juego. Seats 0 and 1 hold identical top hands.
    fn rigged(game: &mut MusGame) {
        game.force_hands(SeatMap::new(|s| {
            ["RR33", "RR33", "CCSS", "AA22"][s.index()].parse().unwrap()
        }));
    }

    fn pass_out_lance(game: &mut MusGame) {
        let Phase::Lance(current) = game.phase() else {
            panic!("no lance open");
        };
        while game.phase() == Phase::Lance(current) {
            let seat = game.to_act()[0];
            game.apply(seat, Action::Pass).unwrap();
        }
    }

    #[test]
    fn test_cut_vote_starts_grande() {
        let mut g = game();
        vote_all(&mut g, [MusVote::Mus, MusVote::NoMus, MusVote::Mus, MusVote::Mus]);
        assert_eq!(g.phase(), Phase::Lance(Lance::Grande));
        // The four votes entered the history in mano order.
        assert_eq!(g.history().len(), 4);
        assert_eq!(g.history()[0].seat, Seat::new(0));
    }

    #[test]
    fn test_votes_hidden_until_barrier_completes() {
        let mut g = game();
        g.apply(Seat::new(1), Action::Vote(MusVote::NoMus)).unwrap();
        g.apply(Seat::new(0), Action::Vote(MusVote::Mus)).unwrap();
        assert!(g.history().is_empty());
        assert_eq!(g.to_act().len(), 2);
    }

    #[test]
    fn test_all_mus_runs_discard_round() {
        let mut g = game();
        vote_all(&mut g, [MusVote::Mus; 4]);
        assert_eq!(g.phase(), Phase::Discarding);
        for seat in Seat::clockwise_from(g.mano()) {
            assert_eq!(g.to_act().as_slice(), &[seat]);
            g.apply(seat, Action::discard(&[0, 1])).unwrap();
        }
        // Back to a fresh barrier.
        assert_eq!(g.phase(), Phase::Voting);
        assert_eq!(g.mus_iterations(), 1);
    }

    #[test]
    fn test_iteration_cap_cuts() {
        let mut g = MusGame::new(config().with_max_mus_iterations(1), 11);
        vote_all(&mut g, [MusVote::Mus; 4]);
        for seat in Seat::all() {
            g.apply(seat, Action::keep_all()).unwrap();
        }
        assert_eq!(g.phase(), Phase::Lance(Lance::Grande));
        assert_eq!(g.mus_iterations(), 1);
    }

    #[test]
    fn test_all_pass_round_banks_four_stones() {
        let mut g = game();
        rigged(&mut g);
        vote_all(&mut g, [MusVote::NoMus; 4]);
        for _ in 0..4 {
            pass_out_lance(&mut g);
        }
        // Grande, Pares, Juego go to seat 0 on the mano tie-break;
        // Chica to seat 3's aces and twos. One stone each, no bonuses.
        assert_eq!(g.round_stones()[TeamId(0)] + g.round_stones()[TeamId(1)], 0);
        assert_eq!(g.scores()[TeamId(0)], 3);
        assert_eq!(g.scores()[TeamId(1)], 1);
        assert_eq!(g.round(), 2);
    }

    #[test]
    fn test_mano_team_sweeps_all_pass_round() {
        let mut g = game();
        g.force_hands(SeatMap::new(|s| {
            ["RR33", "C765", "AA22", "S764"][s.index()].parse().unwrap()
        }));
        vote_all(&mut g, [MusVote::NoMus; 4]);
        // Seat 0 carries Grande, Pares and Juego, seat 2 carries Chica;
        // seats 1 and 3 hold no pares and no juego, so those two lances
        // settle one-sided and only Grande and Chica take passes.
        pass_out_lance(&mut g);
        pass_out_lance(&mut g);
        assert_eq!(g.scores()[TeamId(0)], 4);
        assert_eq!(g.scores()[TeamId(1)], 0);
        assert_eq!(g.round(), 2);
    }

    #[test]
    fn test_traditional_bonuses_pay_on_showdown() {
        let mut g = MusGame::new(
            config().with_bonuses(crate::core::LanceBonuses::traditional()),
            11,
        );
        rigged(&mut g);
        vote_all(&mut g, [MusVote::NoMus; 4]);
        for _ in 0..4 {
            pass_out_lance(&mut g);
        }
        // Team 0 wins Pares holding duples at both seats (1+3+3) and
        // Juego with 40 at both seats (1+2+2), plus one for Grande.
        assert_eq!(g.scores()[TeamId(0)], 1 + 7 + 5);
        assert_eq!(g.scores()[TeamId(1)], 1);
    }

    #[test]
    fn test_fold_banks_immediately_without_reveal() {
        let mut g = game();
        rigged(&mut g);
        vote_all(&mut g, [MusVote::NoMus; 4]);
        g.apply(Seat::new(0), Action::Bet(3)).unwrap();
        g.apply(Seat::new(1), Action::Fold).unwrap();
        g.apply(Seat::new(3), Action::Fold).unwrap();
        assert_eq!(g.scores()[TeamId(0)], 1);
        assert!(Seat::all().all(|s| g.revealed()[s].is_none()));
        assert_eq!(g.phase(), Phase::Lance(Lance::Chica));
    }

    #[test]
    fn test_seen_ordago_awards_target_and_ends_match() {
        let mut g = game();
        rigged(&mut g);
        vote_all(&mut g, [MusVote::NoMus; 4]);
        g.apply(Seat::new(0), Action::Ordago).unwrap();
        g.apply(Seat::new(1), Action::See).unwrap();
        // Seat 0's hand ties seat 1's; mano keeps it.
        assert_eq!(g.phase(), Phase::MatchOver { winner: TeamId(0) });
        assert_eq!(g.scores()[TeamId(0)], g.config().target_score);
        assert!(g.is_over());
        assert_eq!(
            g.apply(Seat::new(0), Action::Pass),
            Err(MusError::MatchOver)
        );
    }

    #[test]
    fn test_mano_rotates_each_round() {
        let mut g = game();
        let first_mano = g.mano();
        vote_all(&mut g, [MusVote::NoMus; 4]);
        while !matches!(g.phase(), Phase::Voting | Phase::MatchOver { .. }) {
            let seat = g.to_act()[0];
            g.apply(seat, Action::Pass).unwrap();
        }
        assert_eq!(g.round(), 2);
        assert_eq!(g.mano(), first_mano.next());
    }

    #[test]
    fn test_pares_skipped_when_nobody_qualifies() {
        let mut g = game();
        g.force_hands(SeatMap::new(|s| {
            ["RC64", "RS64", "C764", "S754"][s.index()].parse().unwrap()
        }));
        vote_all(&mut g, [MusVote::NoMus; 4]);
        pass_out_lance(&mut g); // Grande
        pass_out_lance(&mut g); // Chica
        // Pares settled inline without betting, straight to Punto
        // since nobody reaches 31.
        assert_eq!(g.phase(), Phase::Lance(Lance::Punto));
        let pares = &g.lances()[2];
        assert_eq!(pares.lance, Lance::Pares);
        assert_eq!(pares.result, LanceResult::Skipped);
    }

    #[test]
    fn test_one_sided_pares_banks_without_betting() {
        let mut g = game();
        g.force_hands(SeatMap::new(|s| {
            ["RR54", "RS64", "C764", "S754"][s.index()].parse().unwrap()
        }));
        vote_all(&mut g, [MusVote::NoMus; 4]);
        pass_out_lance(&mut g);
        pass_out_lance(&mut g);
        assert_eq!(
            g.lances()[2].result,
            LanceResult::Uncontested { winner: TeamId(0), stones: 1 }
        );
        assert_eq!(g.scores()[TeamId(0)], 1);
    }

    #[test]
    fn test_unqualified_partner_may_bet_when_allowed() {
        let mut g = MusGame::new(config().with_unqualified_bets(true), 11);
        g.force_hands(SeatMap::new(|s| {
            ["RR74", "SS65", "C764", "S754"][s.index()].parse().unwrap()
        }));
        vote_all(&mut g, [MusVote::NoMus; 4]);
        pass_out_lance(&mut g);
        pass_out_lance(&mut g);
        // Seats 2 and 3 hold no pares but their partners do, so all
        // four may speak.
        assert_eq!(g.phase(), Phase::Lance(Lance::Pares));
        assert!(!g.legal_actions(Seat::new(0)).is_empty());
        g.apply(Seat::new(0), Action::Pass).unwrap();
        g.apply(Seat::new(1), Action::Bet(2)).unwrap();
        // A pass in the open phase does not fold; seat 0 answers first.
        assert_eq!(g.to_act().as_slice(), &[Seat::new(0)]);
    }

    #[test]
    fn test_unqualified_showdown_compares_only_holders() {
        let mut g = MusGame::new(config().with_unqualified_bets(true), 11);
        g.force_hands(SeatMap::new(|s| {
            ["RR74", "SS65", "C764", "S754"][s.index()].parse().unwrap()
        }));
        vote_all(&mut g, [MusVote::NoMus; 4]);
        for _ in 0..4 {
            pass_out_lance(&mut g);
        }
        // Seats 2 and 3 could speak in Pares and Juego without holding
        // the play; at the showdown only seats 0 and 1 compare. Seat 0
        // takes Grande, Pares, and Juego (31 tie falls to mano), seat 3
        // takes Chica.
        assert_eq!(g.scores()[TeamId(0)], 3);
        assert_eq!(g.scores()[TeamId(1)], 1);
        assert_eq!(g.round(), 2);
    }

    #[test]
    fn test_unqualified_ordago_resolves_among_holders() {
        let mut g = MusGame::new(config().with_unqualified_bets(true), 11);
        g.force_hands(SeatMap::new(|s| {
            ["RR74", "SS65", "C764", "S754"][s.index()].parse().unwrap()
        }));
        vote_all(&mut g, [MusVote::NoMus; 4]);
        pass_out_lance(&mut g);
        pass_out_lance(&mut g);
        assert_eq!(g.phase(), Phase::Lance(Lance::Pares));
        g.apply(Seat::new(0), Action::Ordago).unwrap();
        g.apply(Seat::new(1), Action::See).unwrap();
        // Kings beat jacks among the two seats holding pares; the
        // bluff-capable seats never enter the comparison.
        assert_eq!(g.phase(), Phase::MatchOver { winner: TeamId(0) });
        assert!(g.scores()[TeamId(0)] >= g.config().target_score);
    }

    #[test]
    fn test_signals_reach_partner_not_history() {
        let mut g = MusGame::new(config().with_signals(0.0), 11);
        g.apply(Seat::new(0), Action::Signal(2)).unwrap();
        assert_eq!(g.signals_observed_by(Seat::new(2))[Seat::new(0)], Some(2));
        assert_eq!(g.signals_observed_by(Seat::new(1))[Seat::new(0)], None);
        assert!(g.history().is_empty());
    }

    #[test]
    fn test_signals_rejected_when_disabled() {
        let mut g = game();
        let err = g.apply(Seat::new(0), Action::Signal(1)).unwrap_err();
        assert!(matches!(
            err,
            MusError::IllegalAction { reason: IllegalReason::SignalsDisabled, .. }
        ));
    }

    #[test]
    fn test_illegal_discard_leaves_state() {
        let mut g = game();
        vote_all(&mut g, [MusVote::Mus; 4]);
        let err = g.apply(Seat::new(0), Action::discard(&[0, 0])).unwrap_err();
        assert!(matches!(
            err,
            MusError::IllegalAction { reason: IllegalReason::BadDiscard, .. }
        ));
        assert_eq!(g.to_act().as_slice(), &[Seat::new(0)]);
    }

    #[test]
    fn test_deterministic_replay() {
        let play = |seed: u64| {
            let mut g = MusGame::new(MusConfig::new(), seed);
            vote_all(&mut g, [MusVote::Mus; 4]);
            for seat in Seat::clockwise_from(g.mano()) {
                g.apply(seat, Action::discard(&[0])).unwrap();
            }
            vote_all(&mut g, [MusVote::NoMus; 4]);
            (
                g.mano(),
                Seat::all()
                    .map(|s| g.hand(s).clone())
                    .collect::<Vec<_>>(),
            )
        };
        assert_eq!(play(99), play(99));
        assert_ne!(play(99).1, play(100).1);
    }
}
