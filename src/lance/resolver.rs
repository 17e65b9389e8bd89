//! Pure hand comparison and award computation.
//!
//! Resolution never touches game state: given the hands, the mano seat,
//! and the eligibility map, it names the best seat. Ties break toward
//! mano because seats are scanned in clockwise order from mano and only
//! a strictly better hand displaces the current best.

use std::cmp::Ordering;

use rustc_hash::FxHashMap;

use crate::cards::Hand;
use crate::core::{LanceBonuses, Seat, SeatMap, TeamId};
use crate::lance::Lance;

/// Compares two hands under a lance. `Greater` means `a` beats `b`.
///
/// Both hands must qualify for the lance; comparing a non-qualifying
/// hand in Pares or Juego is a caller bug.
#[must_use]
pub fn compare_hands(
    lance: Lance,
    a: &Hand,
    b: &Hand,
    juego_ranking: &FxHashMap<u8, u8>,
) -> Ordering {
    match lance {
        Lance::Grande => a.grande_key().cmp(&b.grande_key()),
        Lance::Chica => b.chica_key().cmp(&a.chica_key()),
        Lance::Pares => {
            let (pa, pb) = (a.pares(), b.pares());
            assert!(
                pa.is_some() && pb.is_some(),
                "compared a hand without pares"
            );
            pa.cmp(&pb)
        }
        Lance::Juego => {
            let rank = |h: &Hand| {
                let sum = h.juego().expect("compared a hand without juego");
                *juego_ranking
                    .get(&sum)
                    .unwrap_or_else(|| panic!("juego ranking missing sum {sum}"))
            };
            rank(a).cmp(&rank(b))
        }
        Lance::Punto => a.punto_value().cmp(&b.punto_value()),
    }
}

/// Finds the best eligible seat for a lance.
///
/// Seats are visited clockwise from mano; an earlier seat keeps the win
/// unless a later one is strictly better. Returns `None` when no seat
/// is eligible.
#[must_use]
pub fn best_seat(
    lance: Lance,
    hands: &SeatMap<Hand>,
    mano: Seat,
    eligible: &SeatMap<bool>,
    juego_ranking: &FxHashMap<u8, u8>,
) -> Option<Seat> {
    let mut best: Option<Seat> = None;
    for seat in Seat::clockwise_from(mano) {
        if !eligible[seat] {
            continue;
        }
        match best {
            None => best = Some(seat),
            Some(current) => {
                if compare_hands(lance, &hands[seat], &hands[current], juego_ranking)
                    == Ordering::Greater
                {
                    best = Some(seat);
                }
            }
        }
    }
    best
}

/// Stones awarded to the winning team for a lance.
///
/// The stake covers the betting outcome; on top of it, Pares and Juego
/// pay a bonus for every qualifying hand on the winning team, and Punto
/// pays a flat bonus. Grande and Chica carry no bonus.
#[must_use]
pub fn team_award(
    lance: Lance,
    stake: u32,
    winner: TeamId,
    hands: &SeatMap<Hand>,
    bonuses: &LanceBonuses,
) -> u32 {
    let mut total = stake;
    match lance {
        Lance::Grande | Lance::Chica => {}
        Lance::Punto => total += bonuses.punto,
        Lance::Pares => {
            for seat in winner.seats() {
                total += match hands[seat].pares() {
                    Some(crate::cards::Pares::Pareja(_)) => bonuses.pareja,
                    Some(crate::cards::Pares::Medias(_)) => bonuses.medias,
                    Some(crate::cards::Pares::Duples { .. }) => bonuses.duples,
                    None => 0,
                };
            }
        }
        Lance::Juego => {
            for seat in winner.seats() {
                total += match hands[seat].juego() {
                    Some(31) => bonuses.juego_31,
                    Some(_) => bonuses.juego_other,
                    None => 0,
                };
            }
        }
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::default_juego_ranking;

    fn hands(specs: [&str; 4]) -> SeatMap<Hand> {
        SeatMap::new(|seat| specs[seat.index()].parse().unwrap())
    }

    fn all_eligible() -> SeatMap<bool> {
        SeatMap::with_value(true)
    }

    #[test]
    fn test_grande_highest_cards_win() {
        let hands = hands(["RC74", "RRSA", "774A", "CCSS"]);
        let best = best_seat(
            Lance::Grande,
            &hands,
            Seat::new(0),
            &all_eligible(),
            &default_juego_ranking(),
        );
        // Two kings top a king plus knight.
        assert_eq!(best, Some(Seat::new(1)));
    }

    #[test]
    fn test_chica_lowest_cards_win() {
        let hands = hands(["RC74", "AA45", "RRSS", "A245"]);
        let best = best_seat(
            Lance::Chica,
            &hands,
            Seat::new(0),
            &all_eligible(),
            &default_juego_ranking(),
        );
        // Two aces beat ace plus two at the bottom, but both collapse to
        // the same class; the earlier seat from mano keeps the win.
        assert_eq!(best, Some(Seat::new(1)));
    }

    #[test]
    fn test_mano_keeps_exact_ties() {
        // Identical class profiles everywhere; mano must win.
        let hands = hands(["RC74", "RC74", "RC74", "RC74"]);
        for mano in Seat::all() {
            let best = best_seat(
                Lance::Grande,
                &hands,
                mano,
                &all_eligible(),
                &default_juego_ranking(),
            );
            assert_eq!(best, Some(mano));
        }
    }

    #[test]
    fn test_tie_breaks_toward_mano_side() {
        // Seats 1 and 3 hold the same duples; with mano at 3, seat 3 is
        // scanned first and keeps the win.
        let hands = hands(["RC74", "RRAA", "C654", "RRAA"]);
        let mut eligible = SeatMap::with_value(false);
        eligible[Seat::new(1)] = true;
        eligible[Seat::new(3)] = true;
        let best = best_seat(
            Lance::Pares,
            &hands,
            Seat::new(3),
            &eligible,
            &default_juego_ranking(),
        );
        assert_eq!(best, Some(Seat::new(3)));
    }

    #[test]
    fn test_pares_category_ordering() {
        // Duples beat medias beat pareja regardless of rank values.
        let hands = hands(["AAAR", "RRC4", "22AA", "RC74"]);
        let mut eligible = all_eligible();
        eligible[Seat::new(3)] = false;
        let best = best_seat(
            Lance::Pares,
            &hands,
            Seat::new(1),
            &eligible,
            &default_juego_ranking(),
        );
        assert_eq!(best, Some(Seat::new(2)));
    }

    #[test]
    fn test_juego_ranking_31_beats_40() {
        let hands = hands(["RRRA", "RRRR", "RC74", "7654"]);
        let mut eligible = SeatMap::with_value(false);
        eligible[Seat::new(0)] = true;
        eligible[Seat::new(1)] = true;
        assert_eq!(hands[Seat::new(0)].juego(), Some(31));
        assert_eq!(hands[Seat::new(1)].juego(), Some(40));
        let best = best_seat(
            Lance::Juego,
            &hands,
            Seat::new(1),
            &eligible,
            &default_juego_ranking(),
        );
        assert_eq!(best, Some(Seat::new(0)));
    }

    #[test]
    fn test_punto_capped_at_thirty() {
        let hands = hands(["RRC4", "RC77", "7654", "A245"]);
        assert_eq!(hands[Seat::new(0)].punto_value(), 30);
        assert_eq!(hands[Seat::new(1)].punto_value(), 30);
        let best = best_seat(
            Lance::Punto,
            &hands,
            Seat::new(1),
            &all_eligible(),
            &default_juego_ranking(),
        );
        // Both sums reach the cap; seat 1 is mano and keeps the tie.
        assert_eq!(best, Some(Seat::new(1)));
    }

    #[test]
    fn test_no_eligible_seat() {
        let hands = hands(["RC74", "RC74", "RC74", "RC74"]);
        let best = best_seat(
            Lance::Pares,
            &hands,
            Seat::new(0),
            &SeatMap::with_value(false),
            &default_juego_ranking(),
        );
        assert_eq!(best, None);
    }

    #[test]
    fn test_team_award_bonuses() {
        let hands = hands(["RRAA", "RC74", "CCS4", "7654"]);
        let bonuses = LanceBonuses::traditional();
        // Team 0 holds duples at seat 0 and a pareja at seat 2.
        let award = team_award(Lance::Pares, 2, TeamId(0), &hands, &bonuses);
        assert_eq!(award, 2 + 3 + 1);
        // Default bonuses pay nothing beyond the stake.
        let flat = team_award(Lance::Pares, 2, TeamId(0), &hands, &LanceBonuses::default());
        assert_eq!(flat, 2);
    }

    #[test]
    fn test_team_award_juego_and_punto() {
        let hands = hands(["RRRA", "RC74", "RRRR", "7654"]);
        let bonuses = LanceBonuses::traditional();
        // Seat 0 has 31, seat 2 has 40.
        assert_eq!(team_award(Lance::Juego, 1, TeamId(0), &hands, &bonuses), 1 + 3 + 2);
        assert_eq!(team_award(Lance::Punto, 1, TeamId(1), &hands, &bonuses), 1 + 1);
        assert_eq!(team_award(Lance::Grande, 5, TeamId(0), &hands, &bonuses), 5);
    }
}
