//! Environment configuration and house rules.
//!
//! Mus has real table-to-table variation: the Juego tie-break above 31,
//! the bonus stones for uncontested ("amarrar") wins, whether players
//! without a play may still bet on Pares/Juego, and the señas signalling
//! game. All of it is resolved once at construction time, never
//! as scattered conditionals inside the engine.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::error::MusError;
use super::seat::Seat;

/// Bonus stones credited per qualifying hand of the winning team when a
/// lance resolves by comparison or showdown.
///
/// The default is all zeros: a lance win is worth exactly its stake
/// (nominal 1 stone when nobody wagered). `traditional()` carries the
/// classic per-play values instead.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanceBonuses {
    /// Per winning hand holding a single pair.
    pub pareja: u32,
    /// Per winning hand holding three of a kind.
    pub medias: u32,
    /// Per winning hand holding two pair (or four of a kind).
    pub duples: u32,
    /// Per winning hand summing exactly 31.
    pub juego_31: u32,
    /// Per winning hand holding any other Juego (32..=40).
    pub juego_other: u32,
    /// Flat bonus for winning Punto.
    pub punto: u32,
}

impl LanceBonuses {
    /// The classic scoring: pareja 1, medias 2, duples 3; la treintayuna 3,
    /// other Juego 2; Punto 1.
    #[must_use]
    pub fn traditional() -> Self {
        Self {
            pareja: 1,
            medias: 2,
            duples: 3,
            juego_31: 3,
            juego_other: 2,
            punto: 1,
        }
    }
}

/// Complete environment configuration, validated once at construction.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MusConfig {
    /// Stones a team needs to win the match.
    pub target_score: u32,

    /// Allow seats without a qualifying play to bet on Pares/Juego
    /// (their team must still hold at least one play to enter the lance).
    pub allow_unqualified_bets: bool,

    /// Safety cap on mus (discard) iterations. `None` follows the base
    /// rules: negotiation continues until somebody cuts. Enabling the cap
    /// is a documented deviation; hitting it is logged.
    pub max_mus_iterations: Option<u32>,

    /// Juego tie-break table mapping point sums 31..=40 to a rank
    /// (higher rank beats lower). House-rule dependent, so configurable.
    pub juego_ranking: FxHashMap<u8, u8>,

    /// Bonus stones for winning hands, per play category.
    pub bonuses: LanceBonuses,

    /// Emit per-step stone deltas as shaped rewards in addition to the
    /// terminal win/loss reward.
    pub shaped_rewards: bool,

    /// Enable the señas signalling game from the mus phase.
    pub enable_signals: bool,

    /// Chance that each opposing seat intercepts a flashed signal.
    pub signal_intercept_chance: f64,

    /// Pin the first round's mano instead of drawing for it.
    pub initial_mano: Option<Seat>,

    /// Seed for the instance RNG.
    pub seed: u64,
}

impl Default for MusConfig {
    fn default() -> Self {
        Self {
            target_score: 40,
            allow_unqualified_bets: false,
            max_mus_iterations: None,
            juego_ranking: default_juego_ranking(),
            bonuses: LanceBonuses::default(),
            shaped_rewards: false,
            enable_signals: false,
            signal_intercept_chance: 0.2,
            initial_mano: None,
            seed: 0,
        }
    }
}

impl MusConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the match target score.
    #[must_use]
    pub fn with_target_score(mut self, target: u32) -> Self {
        self.target_score = target;
        self
    }

    /// Allow betting without a qualifying play.
    #[must_use]
    pub fn with_unqualified_bets(mut self, allow: bool) -> Self {
        self.allow_unqualified_bets = allow;
        self
    }

    /// Cap the number of mus iterations.
    #[must_use]
    pub fn with_max_mus_iterations(mut self, cap: u32) -> Self {
        self.max_mus_iterations = Some(cap);
        self
    }

    /// Replace the Juego tie-break table.
    #[must_use]
    pub fn with_juego_ranking(mut self, ranking: FxHashMap<u8, u8>) -> Self {
        self.juego_ranking = ranking;
        self
    }

    /// Set the lance bonus scheme.
    #[must_use]
    pub fn with_bonuses(mut self, bonuses: LanceBonuses) -> Self {
        self.bonuses = bonuses;
        self
    }

    /// Enable shaped (stone-delta) rewards.
    #[must_use]
    pub fn with_shaped_rewards(mut self, shaped: bool) -> Self {
        self.shaped_rewards = shaped;
        self
    }

    /// Enable señas with the given interception chance.
    #[must_use]
    pub fn with_signals(mut self, intercept_chance: f64) -> Self {
        self.enable_signals = true;
        self.signal_intercept_chance = intercept_chance;
        self
    }

    /// Pin the first round's mano.
    #[must_use]
    pub fn with_initial_mano(mut self, mano: Seat) -> Self {
        self.initial_mano = Some(mano);
        self
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Validate the configuration. Fails fast with `MalformedConfig`.
    pub fn validate(&self) -> Result<(), MusError> {
        if self.target_score == 0 {
            return Err(MusError::MalformedConfig(
                "target_score must be at least 1".into(),
            ));
        }
        if self.max_mus_iterations == Some(0) {
            return Err(MusError::MalformedConfig(
                "max_mus_iterations must be at least 1 when set".into(),
            ));
        }
        for sum in 31..=40u8 {
            if !self.juego_ranking.contains_key(&sum) {
                return Err(MusError::MalformedConfig(format!(
                    "juego_ranking is missing an entry for sum {sum}"
                )));
            }
        }
        if !(0.0..=1.0).contains(&self.signal_intercept_chance) {
            return Err(MusError::MalformedConfig(
                "signal_intercept_chance must be within [0, 1]".into(),
            ));
        }
        Ok(())
    }
}

/// The canonical Juego ordering: 31 is best, then 32, then 40, 37, 36,
/// 35, 34, 33. Higher rank value beats lower.
#[must_use]
pub fn default_juego_ranking() -> FxHashMap<u8, u8> {
    // Best to worst: 31, 32, 40, 39, 38, 37, 36, 35, 34, 33.
    // 38 and 39 are unreachable with Spanish-deck point values but house
    // tables still order them.
    let mut ranking = FxHashMap::default();
    for (rank, sum) in [33u8, 34, 35, 36, 37, 38, 39, 40, 32, 31].iter().enumerate() {
        ranking.insert(*sum, rank as u8 + 1);
    }
    ranking
}
