//! Seat identification, team pairing, and per-seat data storage.
//!
//! Mus is always played four-handed in two fixed partnerships:
//! seats 0 and 2 form team 0, seats 1 and 3 form team 1. The mano
//! (lead) rotates among seats; team membership never changes.
//!
//! ## SeatMap
//!
//! Efficient per-seat data storage backed by a fixed-size array for
//! O(1) access. Supports iteration and indexing by `Seat`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Number of seats at a Mus table. Always four.
pub const SEAT_COUNT: usize = 4;

/// Seat identifier (0..=3), clockwise around the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Seat(pub u8);

impl Seat {
    /// Create a new seat. Panics on indices outside 0..=3.
    #[must_use]
    pub const fn new(index: u8) -> Self {
        assert!(index < SEAT_COUNT as u8, "Seat index must be 0..=3");
        Self(index)
    }

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The team this seat belongs to (seats 0/2 vs. seats 1/3).
    #[must_use]
    pub const fn team(self) -> TeamId {
        TeamId(self.0 % 2)
    }

    /// The seat directly across the table (this seat's partner).
    #[must_use]
    pub const fn partner(self) -> Seat {
        Seat((self.0 + 2) % SEAT_COUNT as u8)
    }

    /// The next seat clockwise.
    #[must_use]
    pub const fn next(self) -> Seat {
        Seat((self.0 + 1) % SEAT_COUNT as u8)
    }

    /// Iterate over all four seats in table order.
    pub fn all() -> impl Iterator<Item = Seat> {
        (0..SEAT_COUNT as u8).map(Seat)
    }

    /// Iterate over all four seats clockwise starting from `lead`.
    ///
    /// This is the canonical speaking order for every Mus decision:
    /// mano first, then clockwise.
    pub fn clockwise_from(lead: Seat) -> impl Iterator<Item = Seat> {
        (0..SEAT_COUNT as u8).map(move |i| Seat((lead.0 + i) % SEAT_COUNT as u8))
    }
}

impl std::fmt::Display for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Seat {}", self.0)
    }
}

/// Team identifier (0 or 1) for the two fixed partnerships.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeamId(pub u8);

impl TeamId {
    /// Create a new team ID. Panics on indices outside 0..=1.
    #[must_use]
    pub const fn new(index: u8) -> Self {
        assert!(index < 2, "Team index must be 0 or 1");
        Self(index)
    }

    /// Get the raw team index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The two seats belonging to this team.
    #[must_use]
    pub const fn seats(self) -> [Seat; 2] {
        [Seat(self.0), Seat(self.0 + 2)]
    }

    /// The opposing team.
    #[must_use]
    pub const fn opponent(self) -> TeamId {
        TeamId(1 - self.0)
    }

    /// Iterate over both teams.
    pub fn both() -> impl Iterator<Item = TeamId> {
        (0..2).map(TeamId)
    }
}

impl std::fmt::Display for TeamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Team {}", self.0)
    }
}

/// Per-seat data storage with O(1) access.
///
/// Backed by a fixed `[T; 4]` array. Use `SeatMap::new()` with a factory
/// function, or `SeatMap::with_value()` to initialize every entry alike.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeatMap<T> {
    data: [T; SEAT_COUNT],
}

impl<T> SeatMap<T> {
    /// Create a new SeatMap with values from a factory function.
    pub fn new(factory: impl Fn(Seat) -> T) -> Self {
        Self {
            data: std::array::from_fn(|i| factory(Seat(i as u8))),
        }
    }

    /// Create a new SeatMap with all entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Create a new SeatMap with default values.
    pub fn with_default() -> Self
    where
        T: Default,
    {
        Self::new(|_| T::default())
    }

    /// Get a reference to a seat's data.
    #[must_use]
    pub fn get(&self, seat: Seat) -> &T {
        &self.data[seat.index()]
    }

    /// Get a mutable reference to a seat's data.
    pub fn get_mut(&mut self, seat: Seat) -> &mut T {
        &mut self.data[seat.index()]
    }

    /// Iterate over (Seat, &T) pairs in table order.
    pub fn iter(&self) -> impl Iterator<Item = (Seat, &T)> {
        self.data.iter().enumerate().map(|(i, v)| (Seat(i as u8), v))
    }

    /// Iterate over (Seat, &mut T) pairs in table order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Seat, &mut T)> {
        self.data
            .iter_mut()
            .enumerate()
            .map(|(i, v)| (Seat(i as u8), v))
    }

    /// Map every entry to a new SeatMap.
    pub fn map<U>(&self, f: impl Fn(Seat, &T) -> U) -> SeatMap<U> {
        SeatMap::new(|seat| f(seat, self.get(seat)))
    }
}

impl<T: Default> Default for SeatMap<T> {
    fn default() -> Self {
        Self::with_default()
    }
}

impl<T> Index<Seat> for SeatMap<T> {
    type Output = T;

    fn index(&self, seat: Seat) -> &Self::Output {
        self.get(seat)
    }
}

impl<T> IndexMut<Seat> for SeatMap<T> {
    fn index_mut(&mut self, seat: Seat) -> &mut Self::Output {
        self.get_mut(seat)
    }
}

/// Per-team data storage, indexable by `TeamId`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeamMap<T> {
    data: [T; 2],
}

impl<T> TeamMap<T> {
    /// Create a new TeamMap with values from a factory function.
    pub fn new(factory: impl Fn(TeamId) -> T) -> Self {
        Self {
            data: std::array::from_fn(|i| factory(TeamId(i as u8))),
        }
    }

    /// Create a new TeamMap with all entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Get a reference to a team's data.
    #[must_use]
    pub fn get(&self, team: TeamId) -> &T {
        &self.data[team.index()]
    }

    /// Get a mutable reference to a team's data.
    pub fn get_mut(&mut self, team: TeamId) -> &mut T {
        &mut self.data[team.index()]
    }

    /// Iterate over (TeamId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (TeamId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (TeamId(i as u8), v))
    }
}

impl<T> Index<TeamId> for TeamMap<T> {
    type Output = T;

    fn index(&self, team: TeamId) -> &Self::Output {
        self.get(team)
    }
}

impl<T> IndexMut<TeamId> for TeamMap<T> {
    fn index_mut(&mut self, team: TeamId) -> &mut Self::Output {
        self.get_mut(team)
    }
}
