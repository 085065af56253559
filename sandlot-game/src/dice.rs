//! The single seam for randomness.
//!
//! Every chance event in the game rolls through a [`RollSource`], so a
//! frontend can swap in manual rolling and tests can substitute a fixed
//! sequence.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use std::collections::VecDeque;

/// Produces die rolls in `[1, sides]`.
///
/// `description` names the roll ("Handle Check Die", ...) for prompting and
/// logging; automatic sources ignore it.
pub trait RollSource {
    fn roll(&mut self, sides: u8, description: &str) -> u8;
}

impl<S: RollSource + ?Sized> RollSource for &mut S {
    fn roll(&mut self, sides: u8, description: &str) -> u8 {
        (**self).roll(sides, description)
    }
}

impl<S: RollSource + ?Sized> RollSource for Box<S> {
    fn roll(&mut self, sides: u8, description: &str) -> u8 {
        (**self).roll(sides, description)
    }
}

/// Automatic rolls from a seeded ChaCha20 stream, uniform over `[1, sides]`.
#[derive(Debug, Clone)]
pub struct SeededRolls {
    rng: ChaCha20Rng,
}

impl SeededRolls {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    /// A roll source seeded from OS entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha20Rng::from_entropy(),
        }
    }
}

impl RollSource for SeededRolls {
    fn roll(&mut self, sides: u8, _description: &str) -> u8 {
        debug_assert!(sides > 0, "a die needs at least one side");
        self.rng.gen_range(1..=sides)
    }
}

/// Replays a fixed sequence of rolls, for tests and scenario replay.
///
/// Panics when the queue runs dry or a scripted value is out of range for
/// the requested die; both indicate a broken script, not a game state.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRolls {
    queue: VecDeque<u8>,
}

impl ScriptedRolls {
    #[must_use]
    pub fn new(rolls: impl IntoIterator<Item = u8>) -> Self {
        Self {
            queue: rolls.into_iter().collect(),
        }
    }

    /// Rolls left in the script.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl RollSource for ScriptedRolls {
    fn roll(&mut self, sides: u8, description: &str) -> u8 {
        let value = self
            .queue
            .pop_front()
            .unwrap_or_else(|| panic!("scripted rolls exhausted at \"{description}\""));
        assert!(
            (1..=sides).contains(&value),
            "scripted roll {value} is out of range for a d{sides} (\"{description}\")"
        );
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_rolls_stay_in_range() {
        let mut rolls = SeededRolls::new(1337);
        for sides in [6, 12, 20] {
            for _ in 0..200 {
                let value = rolls.roll(sides, "range check");
                assert!((1..=sides).contains(&value));
            }
        }
    }

    #[test]
    fn seeded_rolls_are_deterministic_under_seed() {
        let mut a = SeededRolls::new(42);
        let mut b = SeededRolls::new(42);
        for _ in 0..32 {
            assert_eq!(a.roll(20, "a"), b.roll(20, "b"));
        }
    }

    #[test]
    fn scripted_rolls_replay_in_order() {
        let mut rolls = ScriptedRolls::new([3, 1, 20]);
        assert_eq!(rolls.roll(6, "first"), 3);
        assert_eq!(rolls.roll(12, "second"), 1);
        assert_eq!(rolls.roll(20, "third"), 20);
        assert_eq!(rolls.remaining(), 0);
    }

    #[test]
    #[should_panic(expected = "scripted rolls exhausted")]
    fn scripted_rolls_panic_when_exhausted() {
        let mut rolls = ScriptedRolls::new([]);
        let _ = rolls.roll(6, "empty");
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn scripted_rolls_reject_out_of_range_values() {
        let mut rolls = ScriptedRolls::new([7]);
        let _ = rolls.roll(6, "too big");
    }
}
