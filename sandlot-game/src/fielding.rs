//! Fielder determination and the handle check.

use serde::{Deserialize, Serialize};

use crate::baserunning::plain_advance;
use crate::data::Position;
use crate::dice::RollSource;
use crate::error::GameError;
#[cfg(test)]
use crate::response::BattedBall;
use crate::state::{
    ActiveFielder, AtBatPhase, Base, Destination, DoublePlay, DoublePlayPhase, ForceBase,
    GameState, PlayDelta, RunnerMove, Step,
};

/// Which unit a batted ball is hit toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FielderClass {
    Infield,
    Outfield,
}

/// Infield selection table for the d20.
const fn infield_position(roll: u8) -> Position {
    match roll {
        1..=3 => Position::Pitcher,
        4..=5 => Position::Catcher,
        6..=8 => Position::FirstBase,
        9..=12 => Position::SecondBase,
        13..=16 => Position::Shortstop,
        _ => Position::ThirdBase,
    }
}

/// Outfield selection table for the d6.
const fn outfield_position(roll: u8) -> Position {
    match roll {
        1..=2 => Position::LeftField,
        3..=4 => Position::CenterField,
        _ => Position::RightField,
    }
}

/// Full breakdown of a resolved fielder determination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FielderOutcome {
    pub roll: u8,
    pub die_sides: u8,
    pub class: FielderClass,
    pub position: Position,
    pub fielder: ActiveFielder,
}

/// Roll for the defender who plays the stored batted ball and record their
/// arm and glove for the steps that follow.
///
/// # Errors
///
/// Returns [`GameError::StepUnavailable`] out of phase and
/// [`GameError::VacantPosition`] when no roster player covers the rolled
/// position (impossible on validated rosters).
pub fn resolve_fielder_determination(
    state: &mut GameState,
    rolls: &mut impl RollSource,
) -> Result<FielderOutcome, GameError> {
    if state.at_bat.phase != AtBatPhase::AwaitingFielder {
        return Err(GameError::StepUnavailable {
            step: Step::FielderDetermination,
        });
    }
    let Some(ball) = state.at_bat.batted_ball else {
        return Err(GameError::StepUnavailable {
            step: Step::FielderDetermination,
        });
    };

    let class = ball.fielder_class();
    let (roll, die_sides, position) = match class {
        FielderClass::Infield => {
            let roll = rolls.roll(20, "Infielder Selection Die");
            (roll, 20, infield_position(roll))
        }
        FielderClass::Outfield => {
            let roll = rolls.roll(6, "Outfielder Selection Die");
            (roll, 6, outfield_position(roll))
        }
    };

    let player = state.pitching_team.fielder_at(position).ok_or_else(|| {
        GameError::VacantPosition {
            team: state.pitching_team.name.clone(),
            position,
        }
    })?;
    let fielder = ActiveFielder {
        name: player.name.clone(),
        position,
        arm: player.arm,
        glove: player.glove,
    };
    state.at_bat.fielder = Some(fielder.clone());
    state.at_bat.phase = AtBatPhase::AwaitingHandle;

    Ok(FielderOutcome {
        roll,
        die_sides,
        class,
        position,
        fielder,
    })
}

/// How a handle check resolved the play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandleVerdict {
    /// Catchable ball gloved: batter out; runners on second/third may tag.
    CaughtOut { tag_up_open: bool },
    /// Fumbled, whatever the ball was: a single, everybody moves up one.
    Single,
    /// Ground ball secured; a throw to first is next.
    ThrowToFirst,
    /// Ground ball secured with a force on: a two-throw double play starts.
    DoublePlayArmed { target: ForceBase },
}

/// Full breakdown of a resolved handle check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandleOutcome {
    pub roll: u8,
    pub glove: u8,
    pub score: u8,
    pub needed: u8,
    pub handled: bool,
    pub verdict: HandleVerdict,
    pub delta: PlayDelta,
}

/// Roll the d6 handle check against the batted ball's difficulty.
///
/// # Errors
///
/// Returns [`GameError::StepUnavailable`] when no fielded ball is pending.
pub fn resolve_handle_check(
    state: &mut GameState,
    rolls: &mut impl RollSource,
) -> Result<HandleOutcome, GameError> {
    if state.at_bat.phase != AtBatPhase::AwaitingHandle {
        return Err(GameError::StepUnavailable {
            step: Step::HandleCheck,
        });
    }
    let (Some(ball), Some(fielder)) = (state.at_bat.batted_ball, state.at_bat.fielder.clone())
    else {
        return Err(GameError::StepUnavailable {
            step: Step::HandleCheck,
        });
    };

    let roll = rolls.roll(6, "Handle Check Die");
    let score = roll + fielder.glove;
    let needed = ball.handle_target();
    let handled = score >= needed;

    let mut delta = PlayDelta::none();
    let verdict;
    if handled && ball.is_catchable() {
        state.outs += 1;
        delta.outs = 1;
        let batter = state.batter().name.clone();
        state.log_play(format!("{batter} is caught by {}", fielder.name));
        // No tag-ups once the catch is the third out.
        let tag_up_open =
            state.outs < 3 && (state.bases.second.is_some() || state.bases.third.is_some());
        state.at_bat.tag_up_open = tag_up_open;
        state.at_bat.phase = AtBatPhase::Complete;
        verdict = HandleVerdict::CaughtOut { tag_up_open };
    } else if !handled {
        // A dropped catchable ball plays exactly like a missed ground ball.
        let moves = plain_advance(&mut state.bases);
        delta.runs = moves.runs();
        delta.moves = state.describe_moves(&moves);
        state.place_batter_on_first();
        let batter = state.batter().name.clone();
        delta.moves.push(RunnerMove {
            name: batter.clone(),
            from: None,
            to: Destination::Base(Base::First),
        });
        state.log_play(format!(
            "{batter} gets a hit to {}",
            ball.label().to_lowercase()
        ));
        state.at_bat.phase = AtBatPhase::Complete;
        verdict = HandleVerdict::Single;
    } else {
        // Ground ball secured: runners hold until the throw resolves.
        let force_on = state.bases.first.is_some() && state.outs < 2;
        if force_on {
            let target = if state.bases.second.is_some() && state.bases.third.is_some() {
                ForceBase::Home
            } else if state.bases.second.is_some() {
                ForceBase::Third
            } else {
                ForceBase::Second
            };
            state.at_bat.double_play = Some(DoublePlay {
                phase: DoublePlayPhase::AwaitingLeadThrow,
                target,
                fielded_by: fielder.position,
            });
            verdict = HandleVerdict::DoublePlayArmed { target };
        } else {
            state.at_bat.double_play = None;
            verdict = HandleVerdict::ThrowToFirst;
        }
        state.at_bat.phase = AtBatPhase::AwaitingThrow;
    }

    Ok(HandleOutcome {
        roll,
        glove: fielder.glove,
        score,
        needed,
        handled,
        verdict,
        delta,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::League;
    use crate::dice::ScriptedRolls;

    fn state_with_ball(ball: BattedBall) -> GameState {
        let league = League::builtin();
        let mut state =
            GameState::new(league.teams[0].clone(), league.teams[1].clone()).unwrap();
        state.at_bat.batted_ball = Some(ball);
        state.at_bat.phase = AtBatPhase::AwaitingFielder;
        state
    }

    fn handle_ready(ball: BattedBall, glove: u8) -> GameState {
        let mut state = state_with_ball(ball);
        state.at_bat.fielder = Some(ActiveFielder {
            name: "EFive".to_string(),
            position: Position::SecondBase,
            arm: 1,
            glove,
        });
        state.at_bat.phase = AtBatPhase::AwaitingHandle;
        state
    }

    #[test]
    fn infield_table_partitions_the_d20() {
        let expected = [
            (1, Position::Pitcher),
            (3, Position::Pitcher),
            (4, Position::Catcher),
            (5, Position::Catcher),
            (6, Position::FirstBase),
            (8, Position::FirstBase),
            (9, Position::SecondBase),
            (12, Position::SecondBase),
            (13, Position::Shortstop),
            (16, Position::Shortstop),
            (17, Position::ThirdBase),
            (20, Position::ThirdBase),
        ];
        for (roll, position) in expected {
            assert_eq!(infield_position(roll), position, "roll {roll}");
        }
    }

    #[test]
    fn outfield_table_partitions_the_d6() {
        assert_eq!(outfield_position(1), Position::LeftField);
        assert_eq!(outfield_position(2), Position::LeftField);
        assert_eq!(outfield_position(3), Position::CenterField);
        assert_eq!(outfield_position(4), Position::CenterField);
        assert_eq!(outfield_position(5), Position::RightField);
        assert_eq!(outfield_position(6), Position::RightField);
    }

    #[test]
    fn ground_ball_rolls_the_infield_die() {
        let mut state = state_with_ball(BattedBall::Dribbler);
        let mut rolls = ScriptedRolls::new([14]);
        let outcome = resolve_fielder_determination(&mut state, &mut rolls).unwrap();
        assert_eq!(outcome.class, FielderClass::Infield);
        assert_eq!(outcome.position, Position::Shortstop);
        // Donezo is the Rat Stack shortstop.
        assert_eq!(outcome.fielder.name, "Donezo");
        assert_eq!(state.at_bat.phase, AtBatPhase::AwaitingHandle);
    }

    #[test]
    fn fly_ball_rolls_the_outfield_die() {
        let mut state = state_with_ball(BattedBall::Laser);
        let mut rolls = ScriptedRolls::new([3]);
        let outcome = resolve_fielder_determination(&mut state, &mut rolls).unwrap();
        assert_eq!(outcome.class, FielderClass::Outfield);
        assert_eq!(outcome.position, Position::CenterField);
        assert_eq!(outcome.fielder.name, "Mira");
    }

    #[test]
    fn caught_fly_retires_the_batter_and_opens_tag_ups() {
        let mut state = handle_ready(BattedBall::CanOfCorn, 2);
        state.bases.second = Some(0);
        let mut rolls = ScriptedRolls::new([4]);
        let outcome = resolve_handle_check(&mut state, &mut rolls).unwrap();
        assert!(outcome.handled);
        assert_eq!(
            outcome.verdict,
            HandleVerdict::CaughtOut { tag_up_open: true }
        );
        assert_eq!(state.outs, 1);
        assert!(state.at_bat.tag_up_open);
        assert_eq!(state.at_bat.phase, AtBatPhase::Complete);
    }

    #[test]
    fn caught_fly_with_empty_bases_offers_no_tag_up() {
        let mut state = handle_ready(BattedBall::Laser, 6);
        let mut rolls = ScriptedRolls::new([6]);
        let outcome = resolve_handle_check(&mut state, &mut rolls).unwrap();
        assert_eq!(
            outcome.verdict,
            HandleVerdict::CaughtOut { tag_up_open: false }
        );
        assert!(!state.at_bat.tag_up_open);
    }

    #[test]
    fn fumbled_ball_is_a_single_with_runners_advancing() {
        let mut state = handle_ready(BattedBall::Bloop, 0);
        state.bases.third = Some(3);
        let mut rolls = ScriptedRolls::new([2]);
        let outcome = resolve_handle_check(&mut state, &mut rolls).unwrap();
        assert!(!outcome.handled);
        assert_eq!(outcome.verdict, HandleVerdict::Single);
        assert_eq!(outcome.delta.runs, 1);
        assert_eq!(state.bases.first, Some(state.current_batter));
        assert_eq!(state.bases.third, None);
        assert_eq!(state.at_bat.phase, AtBatPhase::Complete);
    }

    #[test]
    fn secured_ground_ball_waits_for_the_throw() {
        let mut state = handle_ready(BattedBall::Dribbler, 3);
        let mut rolls = ScriptedRolls::new([4]);
        let outcome = resolve_handle_check(&mut state, &mut rolls).unwrap();
        assert_eq!(outcome.verdict, HandleVerdict::ThrowToFirst);
        assert!(state.bases.is_empty());
        assert_eq!(state.at_bat.phase, AtBatPhase::AwaitingThrow);
        assert!(state.at_bat.double_play.is_none());
    }

    #[test]
    fn ground_ball_with_force_arms_a_double_play() {
        let mut state = handle_ready(BattedBall::Screamer, 6);
        state.bases.first = Some(0);
        let mut rolls = ScriptedRolls::new([6]);
        let outcome = resolve_handle_check(&mut state, &mut rolls).unwrap();
        assert_eq!(
            outcome.verdict,
            HandleVerdict::DoublePlayArmed {
                target: ForceBase::Second
            }
        );
        let dp = state.at_bat.double_play.unwrap();
        assert_eq!(dp.phase, DoublePlayPhase::AwaitingLeadThrow);
        assert_eq!(dp.target, ForceBase::Second);
    }

    #[test]
    fn lead_force_targets_follow_the_occupied_chain() {
        let mut state = handle_ready(BattedBall::Dribbler, 6);
        state.bases.first = Some(0);
        state.bases.second = Some(1);
        let mut rolls = ScriptedRolls::new([6]);
        let outcome = resolve_handle_check(&mut state, &mut rolls).unwrap();
        assert_eq!(
            outcome.verdict,
            HandleVerdict::DoublePlayArmed {
                target: ForceBase::Third
            }
        );

        let mut loaded = handle_ready(BattedBall::Dribbler, 6);
        loaded.bases.first = Some(0);
        loaded.bases.second = Some(1);
        loaded.bases.third = Some(2);
        let mut rolls = ScriptedRolls::new([6]);
        let outcome = resolve_handle_check(&mut loaded, &mut rolls).unwrap();
        assert_eq!(
            outcome.verdict,
            HandleVerdict::DoublePlayArmed {
                target: ForceBase::Home
            }
        );
    }

    #[test]
    fn no_double_play_with_two_outs() {
        let mut state = handle_ready(BattedBall::Screamer, 6);
        state.bases.first = Some(0);
        state.outs = 2;
        let mut rolls = ScriptedRolls::new([6]);
        let outcome = resolve_handle_check(&mut state, &mut rolls).unwrap();
        assert_eq!(outcome.verdict, HandleVerdict::ThrowToFirst);
        assert!(state.at_bat.double_play.is_none());
    }
}
