//! Pure baserunner-advancement rules over the occupancy map.
//!
//! Each rule mutates a [`Bases`] value and reports who moved where in
//! roster-slot terms; the engine turns those into named moves and runs.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::state::{Base, Bases};

/// Slot-level movement produced by an advancement rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct BaseMoves {
    /// Runners who crossed home, lead runner first.
    pub scored: SmallVec<[u8; 3]>,
    /// Runners who moved up, with their destination base.
    pub moved: SmallVec<[(u8, Base); 3]>,
}

impl BaseMoves {
    /// Runs scored by this movement.
    #[must_use]
    pub fn runs(&self) -> u8 {
        u8::try_from(self.scored.len()).unwrap_or(u8::MAX)
    }
}

/// Every occupied base moves up one: third scores, second to third, first
/// to second. No forcing logic. Used for wild pitches and missed catches.
pub fn plain_advance(bases: &mut Bases) -> BaseMoves {
    let mut moves = BaseMoves::default();
    if let Some(runner) = bases.third.take() {
        moves.scored.push(runner);
    }
    if let Some(runner) = bases.second.take() {
        bases.third = Some(runner);
        moves.moved.push((runner, Base::Third));
    }
    if let Some(runner) = bases.first.take() {
        bases.second = Some(runner);
        moves.moved.push((runner, Base::Second));
    }
    moves
}

/// Walk advancement: only runners pushed by the chain behind them move.
///
/// The first-base runner is always forced (the batter is coming), the
/// second-base runner only when first was occupied, and the third-base
/// runner scores only when both first and second were occupied. First base
/// is left empty for the batter.
pub fn walk_force_advance(bases: &mut Bases) -> BaseMoves {
    let mut moves = BaseMoves::default();
    let first = bases.first.take();
    let forced_to_third = bases.second.is_some() && first.is_some();
    let forced_home = bases.third.is_some() && forced_to_third;

    if forced_home {
        if let Some(runner) = bases.third.take() {
            moves.scored.push(runner);
        }
    }
    if forced_to_third {
        if let Some(runner) = bases.second.take() {
            bases.third = Some(runner);
            moves.moved.push((runner, Base::Third));
        }
    }
    if let Some(runner) = first {
        bases.second = Some(runner);
        moves.moved.push((runner, Base::Second));
    }
    moves
}

/// Home run: every runner scores and the bases empty. The batter's own run
/// is credited by the caller, who never places them on base.
pub fn home_run_clear(bases: &mut Bases) -> BaseMoves {
    let mut moves = BaseMoves::default();
    if let Some(runner) = bases.third.take() {
        moves.scored.push(runner);
    }
    if let Some(runner) = bases.second.take() {
        moves.scored.push(runner);
    }
    if let Some(runner) = bases.first.take() {
        moves.scored.push(runner);
    }
    moves
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bases(first: Option<u8>, second: Option<u8>, third: Option<u8>) -> Bases {
        Bases {
            first,
            second,
            third,
        }
    }

    #[test]
    fn plain_advance_moves_every_runner_one_base() {
        let mut occupancy = bases(Some(1), Some(2), Some(3));
        let moves = plain_advance(&mut occupancy);
        assert_eq!(moves.scored.as_slice(), [3]);
        assert_eq!(occupancy, bases(None, Some(1), Some(2)));
    }

    #[test]
    fn plain_advance_ignores_gaps() {
        let mut occupancy = bases(Some(1), None, Some(3));
        let moves = plain_advance(&mut occupancy);
        assert_eq!(moves.scored.as_slice(), [3]);
        assert_eq!(occupancy, bases(None, Some(1), None));
    }

    #[test]
    fn walk_leaves_unforced_runners_in_place() {
        // Runners on second and third only: nobody is pushed, no run scores.
        let mut occupancy = bases(None, Some(2), Some(3));
        let moves = walk_force_advance(&mut occupancy);
        assert_eq!(moves, BaseMoves::default());
        assert_eq!(occupancy, bases(None, Some(2), Some(3)));
    }

    #[test]
    fn walk_with_bases_loaded_forces_the_full_chain() {
        let mut occupancy = bases(Some(1), Some(2), Some(3));
        let moves = walk_force_advance(&mut occupancy);
        assert_eq!(moves.scored.as_slice(), [3]);
        assert_eq!(occupancy, bases(None, Some(1), Some(2)));
    }

    #[test]
    fn walk_pushes_partial_chain_from_first() {
        // First and second occupied, third empty: both move, no run.
        let mut occupancy = bases(Some(1), Some(2), None);
        let moves = walk_force_advance(&mut occupancy);
        assert_eq!(moves.runs(), 0);
        assert_eq!(occupancy, bases(None, Some(1), Some(2)));
    }

    #[test]
    fn walk_with_first_and_third_holds_the_lead_runner() {
        let mut occupancy = bases(Some(1), None, Some(3));
        let moves = walk_force_advance(&mut occupancy);
        assert_eq!(moves.runs(), 0);
        assert_eq!(occupancy, bases(None, Some(1), Some(3)));
    }

    #[test]
    fn home_run_clears_all_bases() {
        let mut occupancy = bases(Some(1), Some(2), None);
        let moves = home_run_clear(&mut occupancy);
        assert_eq!(moves.runs(), 2);
        assert!(occupancy.is_empty());
    }
}
