//! Between-play transitions: next batter, or a new half-inning once three
//! outs are in.

use serde::{Deserialize, Serialize};

use crate::state::{GameState, Half};

/// What the between-play advance produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransitionOutcome {
    /// Same half-inning, next hitter in the order.
    NextBatter { name: String, order: u8 },
    /// Three outs: roles swapped and a new half-inning set up.
    HalfInning(HalfInningSummary),
}

/// The state a fresh half-inning opens with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HalfInningSummary {
    pub inning: u16,
    pub half: Half,
    pub pitcher: String,
    pub leadoff: String,
}

/// Advance to the next batter, or run the half-inning transition when the
/// third out has been recorded. Either way the at-bat resets for a fresh
/// pitch.
pub fn advance(state: &mut GameState) -> TransitionOutcome {
    if state.half_inning_due() {
        TransitionOutcome::HalfInning(half_inning_transition(state))
    } else {
        next_batter(state)
    }
}

fn next_batter(state: &mut GameState) -> TransitionOutcome {
    let current_order = state.batter().batting_order;
    let next_order = if current_order >= 9 { 1 } else { current_order + 1 };
    if let Some(slot) = state.batting_team.slot_by_order(next_order) {
        state.current_batter = u8::try_from(slot).unwrap_or(0);
    }
    state.at_bat.reset();
    TransitionOutcome::NextBatter {
        name: state.batter().name.clone(),
        order: next_order,
    }
}

fn half_inning_transition(state: &mut GameState) -> HalfInningSummary {
    match state.half {
        Half::Top => state.half = Half::Bottom,
        Half::Bottom => {
            state.half = Half::Top;
            state.inning += 1;
        }
    }

    // The roles swap, and the score counters travel with them.
    std::mem::swap(&mut state.pitching_team, &mut state.batting_team);
    state.scores.swap_roles();
    state.bases.clear();
    state.outs = 0;

    state.current_pitcher = u8::try_from(state.pitching_team.starting_pitcher_slot()).unwrap_or(0);
    state.current_batter = u8::try_from(state.batting_team.leadoff_slot()).unwrap_or(0);
    state.at_bat.reset();
    state.log_inning_start();

    HalfInningSummary {
        inning: state.inning,
        half: state.half,
        pitcher: state.pitcher().name.clone(),
        leadoff: state.batter().name.clone(),
    }
}
