//! Core engine types: seats and teams, RNG, configuration, actions, errors.

pub mod action;
pub mod config;
pub mod error;
pub mod rng;
pub mod seat;

pub use action::{Action, ActionRecord, MusVote};
pub use config::{default_juego_ranking, LanceBonuses, MusConfig};
pub use error::{IllegalReason, MusError};
pub use rng::GameRng;
pub use seat::{Seat, SeatMap, TeamId, TeamMap, SEAT_COUNT};
