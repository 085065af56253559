//! Tag-up resolution after a caught ball, lead runner first.

use serde::{Deserialize, Serialize};

use crate::dice::RollSource;
use crate::error::GameError;
use crate::state::{Base, Destination, GameState, PlayDelta, RunnerMove, Step};

/// Confidence a runner needs before risking the advance.
pub const CONFIDENCE_TARGET: u8 = 4;

/// The opposed throw on an attempted tag-up advance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagUpThrow {
    pub fielder: String,
    pub fielder_roll: u8,
    pub fielder_arm: u8,
    pub fielder_total: u8,
    pub runner_roll: u8,
    pub runner_total: u8,
    pub out: bool,
}

/// One runner's tag-up decision and, if they went, its resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagUpAttempt {
    pub runner: String,
    pub from: Base,
    pub target: Destination,
    pub confidence_roll: u8,
    pub speed: u8,
    pub confidence: u8,
    /// Below the confidence target the runner holds; no throw, no risk.
    pub attempted: bool,
    pub throw: Option<TagUpThrow>,
}

/// Everything that happened on the tag-up action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagUpOutcome {
    pub attempts: Vec<TagUpAttempt>,
    pub delta: PlayDelta,
}

/// Resolve tag-ups for the runners on second and third after a caught ball.
///
/// The runner on third decides first; if they go for home, a runner on
/// second takes third unopposed. With third empty, the runner on second
/// decides alone and races the throw to third.
///
/// # Errors
///
/// Returns [`GameError::StepUnavailable`] unless a caught ball just opened
/// the tag-up window.
pub fn resolve_tag_up(
    state: &mut GameState,
    rolls: &mut impl RollSource,
) -> Result<TagUpOutcome, GameError> {
    if !state.at_bat.tag_up_open {
        return Err(GameError::StepUnavailable { step: Step::TagUp });
    }
    let Some(fielder) = state.at_bat.fielder.clone() else {
        return Err(GameError::StepUnavailable { step: Step::TagUp });
    };
    // One tag-up action per at-bat, however it resolves.
    state.at_bat.tag_up_open = false;

    let mut attempts = Vec::new();
    let mut delta = PlayDelta::none();

    if let Some(lead_slot) = state.bases.third {
        let runner = state.runner(lead_slot).name.clone();
        let speed = state.runner(lead_slot).speed;
        let confidence_roll = rolls.roll(6, &format!("{runner} Confidence Die"));
        let confidence = confidence_roll.saturating_add(speed);
        let attempted = confidence >= CONFIDENCE_TARGET;
        let mut throw = None;

        if attempted {
            let resolved = run_throw(rolls, &fielder.name, fielder.arm, &runner, speed);
            state.bases.third = None;
            if resolved.out {
                state.outs += 1;
                delta.outs += 1;
                state.log_play(format!("{runner} is thrown out at home tagging up"));
            } else {
                state.scores.batting += 1;
                delta.runs += 1;
                delta.moves.push(RunnerMove {
                    name: runner.clone(),
                    from: Some(Base::Third),
                    to: Destination::Home,
                });
                state.log_play(format!("{runner} tags up and scores"));
            }
            throw = Some(resolved);

            // The lead runner went, so the trailing runner takes third
            // unopposed.
            if let Some(trailing) = state.bases.second.take() {
                state.bases.third = Some(trailing);
                delta.moves.push(RunnerMove {
                    name: state.runner(trailing).name.clone(),
                    from: Some(Base::Second),
                    to: Destination::Base(Base::Third),
                });
            }
        }

        attempts.push(TagUpAttempt {
            runner,
            from: Base::Third,
            target: Destination::Home,
            confidence_roll,
            speed,
            confidence,
            attempted,
            throw,
        });
    } else if let Some(slot) = state.bases.second {
        let runner = state.runner(slot).name.clone();
        let speed = state.runner(slot).speed;
        let confidence_roll = rolls.roll(6, &format!("{runner} Confidence Die"));
        let confidence = confidence_roll.saturating_add(speed);
        let attempted = confidence >= CONFIDENCE_TARGET;
        let mut throw = None;

        if attempted {
            let resolved = run_throw(rolls, &fielder.name, fielder.arm, &runner, speed);
            state.bases.second = None;
            if resolved.out {
                state.outs += 1;
                delta.outs += 1;
                state.log_play(format!("{runner} is thrown out at third tagging up"));
            } else {
                state.bases.third = Some(slot);
                delta.moves.push(RunnerMove {
                    name: runner.clone(),
                    from: Some(Base::Second),
                    to: Destination::Base(Base::Third),
                });
                state.log_play(format!("{runner} tags up and takes third"));
            }
            throw = Some(resolved);
        }

        attempts.push(TagUpAttempt {
            runner,
            from: Base::Second,
            target: Destination::Base(Base::Third),
            confidence_roll,
            speed,
            confidence,
            attempted,
            throw,
        });
    }

    Ok(TagUpOutcome { attempts, delta })
}

fn run_throw(
    rolls: &mut impl RollSource,
    fielder: &str,
    arm: u8,
    runner: &str,
    speed: u8,
) -> TagUpThrow {
    let fielder_roll = rolls.roll(6, "Tag Up Throw - Fielder Arm Die");
    let runner_roll = rolls.roll(6, &format!("{runner} Tag Up Throw Die"));
    let fielder_total = fielder_roll.saturating_add(arm);
    let runner_total = runner_roll.saturating_add(speed);
    TagUpThrow {
        fielder: fielder.to_string(),
        fielder_roll,
        fielder_arm: arm,
        fielder_total,
        runner_roll,
        runner_total,
        // Defense wins ties.
        out: fielder_total >= runner_total,
    }
}
