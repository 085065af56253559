//! Throw resolution: the race to first and the two-throw double play.
//!
//! Every throw is the same opposed roll - fielder d6 + arm against runner
//! d6 + speed - and the defense wins ties.

use serde::{Deserialize, Serialize};

use crate::baserunning::BaseMoves;
use crate::data::Position;
use crate::dice::RollSource;
use crate::error::GameError;
use crate::state::{
    AtBatPhase, Base, Destination, DoublePlay, DoublePlayPhase, ForceBase, GameState, PlayDelta,
    RunnerMove, Step,
};

/// Which throw this outcome describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThrowKind {
    /// Plain fielding play on the batter.
    ToFirst,
    /// Double-play lead throw on the forced runner.
    LeadForce { target: ForceBase },
    /// Double-play relay to first on the batter.
    Relay,
}

/// Full breakdown of one resolved throw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThrowOutcome {
    pub kind: ThrowKind,
    pub fielder: String,
    pub fielder_roll: u8,
    /// Effective arm: the relay throw carries its -1 already applied.
    pub fielder_arm: u8,
    pub fielder_total: u8,
    pub runner: String,
    pub runner_roll: u8,
    pub runner_speed: u8,
    pub runner_total: u8,
    pub out: bool,
    /// The lead runner was forced out and the relay to first is next.
    pub relay_pending: bool,
    pub delta: PlayDelta,
}

struct Opposed {
    fielder_roll: u8,
    runner_roll: u8,
    fielder_total: u8,
    runner_total: u8,
    out: bool,
}

fn opposed_throw(rolls: &mut impl RollSource, arm: u8, speed: u8, target: &str) -> Opposed {
    let fielder_roll = rolls.roll(6, &format!("Throw Attempt - Fielder Arm Die (to {target})"));
    let runner_roll = rolls.roll(6, &format!("Throw Attempt - Runner Speed Die (to {target})"));
    let fielder_total = fielder_roll.saturating_add(arm);
    let runner_total = runner_roll.saturating_add(speed);
    Opposed {
        fielder_roll,
        runner_roll,
        fielder_total,
        runner_total,
        // Defense wins ties.
        out: fielder_total >= runner_total,
    }
}

/// Who covers the bag and takes the relay throw, given the primary
/// fielder's position. The pitcher and catcher have no covering middle
/// infielder; the primary makes both throws at full arm.
const fn pivot_position(fielded_by: Position) -> Option<Position> {
    match fielded_by {
        Position::ThirdBase | Position::SecondBase => Some(Position::Shortstop),
        Position::Shortstop | Position::FirstBase => Some(Position::SecondBase),
        _ => None,
    }
}

/// Resolve the pending throw: a plain race to first, the double-play lead
/// throw, or the double-play relay, depending on the sub-state machine.
///
/// # Errors
///
/// Returns [`GameError::StepUnavailable`] when no throw is pending.
pub fn resolve_throw(
    state: &mut GameState,
    rolls: &mut impl RollSource,
) -> Result<ThrowOutcome, GameError> {
    if state.at_bat.phase != AtBatPhase::AwaitingThrow {
        return Err(GameError::StepUnavailable {
            step: Step::ThrowAttempt,
        });
    }
    match state.at_bat.double_play {
        None => resolve_simple_throw(state, rolls),
        Some(dp) => match dp.phase {
            DoublePlayPhase::AwaitingLeadThrow => resolve_lead_throw(state, rolls, dp),
            DoublePlayPhase::AwaitingFirstThrow => resolve_relay_throw(state, rolls, dp),
        },
    }
}

fn active_fielder(state: &GameState) -> Result<(String, u8), GameError> {
    state
        .at_bat
        .fielder
        .as_ref()
        .map(|f| (f.name.clone(), f.arm))
        .ok_or(GameError::StepUnavailable {
            step: Step::ThrowAttempt,
        })
}

fn resolve_simple_throw(
    state: &mut GameState,
    rolls: &mut impl RollSource,
) -> Result<ThrowOutcome, GameError> {
    let (fielder, arm) = active_fielder(state)?;
    let batter = state.batter().name.clone();
    let speed = state.batter().speed;
    let opposed = opposed_throw(rolls, arm, speed, "first");

    let mut delta = PlayDelta::none();
    if opposed.out {
        state.outs += 1;
        delta.outs = 1;
        state.log_play(format!("{batter} is thrown out at first"));
    } else {
        state.place_batter_on_first();
        delta.moves.push(RunnerMove {
            name: batter.clone(),
            from: None,
            to: Destination::Base(Base::First),
        });
        state.log_play(format!("{batter} beats the throw to first"));
    }
    state.at_bat.phase = AtBatPhase::Complete;

    Ok(ThrowOutcome {
        kind: ThrowKind::ToFirst,
        fielder,
        fielder_roll: opposed.fielder_roll,
        fielder_arm: arm,
        fielder_total: opposed.fielder_total,
        runner: batter,
        runner_roll: opposed.runner_roll,
        runner_speed: speed,
        runner_total: opposed.runner_total,
        out: opposed.out,
        relay_pending: false,
        delta,
    })
}

fn resolve_lead_throw(
    state: &mut GameState,
    rolls: &mut impl RollSource,
    dp: DoublePlay,
) -> Result<ThrowOutcome, GameError> {
    let (fielder, arm) = active_fielder(state)?;
    let runner_base = dp.target.runner_base();
    let Some(runner_slot) = state.bases.get(runner_base) else {
        return Err(GameError::StepUnavailable {
            step: Step::ThrowAttempt,
        });
    };
    let runner = state.runner(runner_slot).name.clone();
    let speed = state.runner(runner_slot).speed;
    let opposed = opposed_throw(rolls, arm, speed, &dp.target.to_string());

    let mut delta = PlayDelta::none();
    let relay_pending;
    if opposed.out {
        state.bases.set(runner_base, None);
        state.outs += 1;
        delta.outs = 1;
        // Everybody behind the retired runner moves up one so first base is
        // clear for the batter.
        let moves = promote_behind(state, dp.target);
        delta.moves = state.describe_moves(&moves);
        state.log_play(format!("{runner} is forced out at {}", dp.target));
        state.at_bat.double_play = Some(DoublePlay {
            phase: DoublePlayPhase::AwaitingFirstThrow,
            ..dp
        });
        relay_pending = true;
    } else {
        // Safe at the target: the force chain advances and the double play
        // is abandoned.
        let moves = advance_forced_chain(state, dp.target);
        delta.runs = moves.runs();
        delta.moves = state.describe_moves(&moves);
        state.place_batter_on_first();
        let batter = state.batter().name.clone();
        delta.moves.push(RunnerMove {
            name: batter,
            from: None,
            to: Destination::Base(Base::First),
        });
        state.log_play(format!("{runner} is safe at {}, double play averted", dp.target));
        state.at_bat.double_play = None;
        state.at_bat.phase = AtBatPhase::Complete;
        relay_pending = false;
    }

    Ok(ThrowOutcome {
        kind: ThrowKind::LeadForce { target: dp.target },
        fielder,
        fielder_roll: opposed.fielder_roll,
        fielder_arm: arm,
        fielder_total: opposed.fielder_total,
        runner,
        runner_roll: opposed.runner_roll,
        runner_speed: speed,
        runner_total: opposed.runner_total,
        out: opposed.out,
        relay_pending,
        delta,
    })
}

fn resolve_relay_throw(
    state: &mut GameState,
    rolls: &mut impl RollSource,
    dp: DoublePlay,
) -> Result<ThrowOutcome, GameError> {
    // The pivot's relay is a beat slower than a set throw.
    let (fielder, arm) = match pivot_position(dp.fielded_by)
        .and_then(|position| state.pitching_team.fielder_at(position))
    {
        Some(pivot) => (pivot.name.clone(), pivot.arm.saturating_sub(1)),
        None => active_fielder(state)?,
    };
    let batter = state.batter().name.clone();
    let speed = state.batter().speed;
    let opposed = opposed_throw(rolls, arm, speed, "first");

    let mut delta = PlayDelta::none();
    if opposed.out {
        state.outs += 1;
        delta.outs = 1;
        state.log_play(format!("{batter} grounds into a double play"));
    } else {
        state.place_batter_on_first();
        delta.moves.push(RunnerMove {
            name: batter.clone(),
            from: None,
            to: Destination::Base(Base::First),
        });
        state.log_play(format!("{batter} beats the relay to first"));
    }
    state.at_bat.double_play = None;
    state.at_bat.phase = AtBatPhase::Complete;

    Ok(ThrowOutcome {
        kind: ThrowKind::Relay,
        fielder,
        fielder_roll: opposed.fielder_roll,
        fielder_arm: arm,
        fielder_total: opposed.fielder_total,
        runner: batter,
        runner_roll: opposed.runner_roll,
        runner_speed: speed,
        runner_total: opposed.runner_total,
        out: opposed.out,
        relay_pending: false,
        delta,
    })
}

/// After the lead force-out, every runner behind the vacated base moves up
/// one step.
fn promote_behind(state: &mut GameState, target: ForceBase) -> BaseMoves {
    let mut moves = BaseMoves::default();
    if matches!(target, ForceBase::Home) {
        if let Some(runner) = state.bases.second.take() {
            state.bases.third = Some(runner);
            moves.moved.push((runner, Base::Third));
        }
    }
    if matches!(target, ForceBase::Home | ForceBase::Third) {
        if let Some(runner) = state.bases.first.take() {
            state.bases.second = Some(runner);
            moves.moved.push((runner, Base::Second));
        }
    }
    moves
}

/// When the lead throw fails, the whole forced chain advances one base,
/// the head of the chain scoring if the force was at home.
fn advance_forced_chain(state: &mut GameState, target: ForceBase) -> BaseMoves {
    let mut moves = BaseMoves::default();
    if matches!(target, ForceBase::Home) {
        if let Some(runner) = state.bases.third.take() {
            moves.scored.push(runner);
        }
    }
    if matches!(target, ForceBase::Home | ForceBase::Third) {
        if let Some(runner) = state.bases.second.take() {
            state.bases.third = Some(runner);
            moves.moved.push((runner, Base::Third));
        }
    }
    if let Some(runner) = state.bases.first.take() {
        state.bases.second = Some(runner);
        moves.moved.push((runner, Base::Second));
    }
    moves
}
