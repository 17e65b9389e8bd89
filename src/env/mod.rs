//! The multi-agent environment boundary.
//!
//! `MusEnv` wraps one match and speaks the usual RL contract: reset to
//! a seeded initial state, read per-seat observations and legal
//! actions, step with one action per acting seat. Steps are atomic:
//! the submitted batch is staged against a copy of the game and
//! commits only if every action is accepted, so a rejected batch
//! leaves nothing half-applied and the offending agent simply re-acts.

pub mod observation;

use smallvec::SmallVec;

use crate::core::{Action, MusConfig, MusError, Seat, SeatMap, TeamMap, SEAT_COUNT};
use crate::game::{MusGame, Phase};

pub use observation::Observation;

/// What one `step` returns.
#[derive(Clone, Debug)]
pub struct StepResult {
    pub observations: SeatMap<Observation>,
    pub rewards: SeatMap<f32>,
    pub done: bool,
    /// Set when the batch was rejected; the state did not advance.
    pub error: Option<MusError>,
}

/// One playable match behind the environment contract.
#[derive(Clone, Debug)]
pub struct MusEnv {
    config: MusConfig,
    game: MusGame,
    forks: u64,
}

impl MusEnv {
    /// Builds an environment, validating the configuration once.
    pub fn new(config: MusConfig) -> Result<Self, MusError> {
        config.validate()?;
        let game = MusGame::new(config.clone(), config.seed);
        Ok(MusEnv {
            config,
            game,
            forks: 0,
        })
    }

    /// Starts a fresh match under the same configuration.
    pub fn reset(&mut self, seed: u64) -> SeatMap<Observation> {
        self.game = MusGame::new(self.config.clone(), seed);
        self.observe_all()
    }

    /// A sibling environment with an independent deal stream, for
    /// vectorized rollouts.
    #[must_use]
    pub fn fork(&mut self) -> MusEnv {
        self.forks += 1;
        let seed = self
            .config
            .seed
            .wrapping_add(self.forks.wrapping_mul(0x9E37_79B9_7F4A_7C15));
        let mut config = self.config.clone();
        config.seed = seed;
        MusEnv {
            game: MusGame::new(config.clone(), seed),
            config,
            forks: 0,
        }
    }

    #[must_use]
    pub fn config(&self) -> &MusConfig {
        &self.config
    }

    #[must_use]
    pub fn game(&self) -> &MusGame {
        &self.game
    }

    /// Seats owing an action: all un-voted seats during the barrier,
    /// exactly one otherwise, none once the match is over.
    #[must_use]
    pub fn to_act(&self) -> SmallVec<[Seat; SEAT_COUNT]> {
        self.game.to_act()
    }

    #[must_use]
    pub fn legal_actions(&self, seat: Seat) -> Vec<Action> {
        self.game.legal_actions(seat)
    }

    #[must_use]
    pub fn is_done(&self) -> bool {
        self.game.is_over()
    }

    /// Applies a batch of actions, one per submitting seat.
    ///
    /// The batch is staged on a copy and committed whole. On rejection
    /// the result carries the error and observations of the unchanged
    /// state.
    pub fn step(&mut self, actions: &[(Seat, Action)]) -> StepResult {
        let mut staged = self.game.clone();
        for (seat, action) in actions {
            if let Err(error) = staged.apply(*seat, action.clone()) {
                return StepResult {
                    observations: self.observe_all(),
                    rewards: SeatMap::with_value(0.0),
                    done: self.game.is_over(),
                    error: Some(error),
                };
            }
        }
        self.game = staged;
        let deltas = self.game.drain_step_deltas();
        StepResult {
            observations: self.observe_all(),
            rewards: self.rewards(&deltas),
            done: self.game.is_over(),
            error: None,
        }
    }

    fn observe_all(&self) -> SeatMap<Observation> {
        SeatMap::new(|seat| Observation::capture(&self.game, seat))
    }

    /// Terminal +1/-1 by team, plus optional shaped stone deltas
    /// scaled by the target.
    fn rewards(&self, deltas: &TeamMap<u32>) -> SeatMap<f32> {
        SeatMap::new(|seat| {
            let team = seat.team();
            let mut reward = 0.0;
            if let Phase::MatchOver { winner } = self.game.phase() {
                reward += if winner == team { 1.0 } else { -1.0 };
            }
            if self.config.shaped_rewards {
                let own = deltas[team] as f32;
                let opp = deltas[team.opponent()] as f32;
                reward += (own - opp) / self.config.target_score as f32;
            }
            reward
        })
    }
}
