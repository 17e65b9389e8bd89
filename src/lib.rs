//! # mus-engine
//!
//! A rules-exact engine for Spanish Mus, exposed as a turn-based,
//! partially-observable multi-agent environment for RL training.
//!
//! ## Design Principles
//!
//! 1. **Rules First**: The four-player partnership game is modeled
//!    exactly: fixed parity teams, mano rotation, the mus vote barrier,
//!    and the four lances with their distinct comparison rules.
//!
//! 2. **Structural Hiding**: Observations own their data and carry only
//!    what a seat may know. There is no API that returns another seat's
//!    hidden hand.
//!
//! 3. **Configuration Over Convention**: Target score, house-rule
//!    bonuses, the juego tie-break table, señas, and bluffing rights
//!    are all `MusConfig` knobs, never hardcoded.
//!
//! ## Architecture
//!
//! - **Seeded Determinism**: One `ChaCha8` stream per match; identical
//!   seeds and action sequences replay identical matches.
//!
//! - **Persistent History**: The public action log is an `im` vector,
//!   so observations share it in O(1).
//!
//! - **Atomic Steps**: Action batches stage against a copy of the game
//!   and commit whole; an illegal action never leaves a half-step.
//!
//! ## Modules
//!
//! - `core`: Seats, teams, actions, errors, RNG, configuration
//! - `cards`: The 40-card Spanish deck, hands and their plays
//! - `mus`: Vote barrier, discards, señas
//! - `betting`: The pass/bet/raise/see/fold/órdago protocol
//! - `lance`: The four lances and their pure resolver
//! - `game`: Round and match controller
//! - `env`: The multi-agent environment boundary

pub mod betting;
pub mod cards;
pub mod core;
pub mod env;
pub mod game;
pub mod lance;
pub mod mus;

// Re-export commonly used types
pub use crate::core::{
    default_juego_ranking, Action, ActionRecord, GameRng, IllegalReason, LanceBonuses, MusConfig,
    MusError, MusVote, Seat, SeatMap, TeamId, TeamMap, SEAT_COUNT,
};

pub use crate::cards::{full_deck, Card, Deck, Hand, Pares, Rank, Suit, HAND_SIZE};

pub use crate::betting::{BetOutcome, BetState};

pub use crate::lance::Lance;

pub use crate::game::{LanceRecord, LanceResult, MusGame, Phase};

pub use crate::env::{MusEnv, Observation, StepResult};
