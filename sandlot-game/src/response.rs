//! Batter response: the swing roll and the batted-ball categories.

use serde::{Deserialize, Serialize};

use crate::baserunning::home_run_clear;
use crate::dice::RollSource;
use crate::error::GameError;
use crate::fielding::FielderClass;
use crate::state::{AtBatPhase, GameState, PlayDelta, Step};

/// How a ball in play comes off the bat. Closed set; the fielder-class and
/// handle-difficulty tables below are exhaustive over it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BattedBall {
    /// Weak ground ball.
    Dribbler,
    /// Routine pop up.
    CanOfCorn,
    /// Soft line drive.
    Bloop,
    /// Hard ground ball.
    Screamer,
    /// Hard line drive.
    Laser,
}

impl BattedBall {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Dribbler => "Dribbler",
            Self::CanOfCorn => "Can of Corn",
            Self::Bloop => "Bloop",
            Self::Screamer => "Screamer",
            Self::Laser => "Laser",
        }
    }

    /// Which unit fields this ball.
    #[must_use]
    pub const fn fielder_class(self) -> FielderClass {
        match self {
            Self::Dribbler | Self::Bloop | Self::Screamer => FielderClass::Infield,
            Self::CanOfCorn | Self::Laser => FielderClass::Outfield,
        }
    }

    /// Handle score required to glove this ball cleanly.
    #[must_use]
    pub const fn handle_target(self) -> u8 {
        match self {
            Self::CanOfCorn => 3,
            Self::Dribbler => 4,
            Self::Bloop => 5,
            Self::Screamer => 6,
            Self::Laser => 7,
        }
    }

    /// Catching this ball retires the batter outright.
    #[must_use]
    pub const fn is_catchable(self) -> bool {
        matches!(self, Self::CanOfCorn | Self::Bloop | Self::Laser)
    }

    /// Ground balls need a throw even when gloved cleanly.
    #[must_use]
    pub const fn is_ground_ball(self) -> bool {
        matches!(self, Self::Dribbler | Self::Screamer)
    }
}

/// Outcome band of a batter-response total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwingCall {
    StrikeoutSwinging,
    InPlay(BattedBall),
    HomeRun,
}

impl SwingCall {
    /// Band lookup; the bands partition every possible total.
    #[must_use]
    pub const fn from_total(total: i16) -> Self {
        match total {
            i16::MIN..=3 => Self::StrikeoutSwinging,
            4..=5 => Self::InPlay(BattedBall::Dribbler),
            6 => Self::InPlay(BattedBall::CanOfCorn),
            7..=8 => Self::InPlay(BattedBall::Bloop),
            9..=10 => Self::InPlay(BattedBall::Screamer),
            11 => Self::InPlay(BattedBall::Laser),
            12..=i16::MAX => Self::HomeRun,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::StrikeoutSwinging => "Strikeout Swinging",
            Self::InPlay(ball) => ball.label(),
            Self::HomeRun => "Moonshot",
        }
    }
}

/// Stat arithmetic behind a swing total. Absent on a natural 1, which is a
/// strikeout before any stats apply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwingBreakdown {
    pub velocity: u8,
    pub contact: u8,
    pub pitch_modifier: i8,
    /// Power only lands once the subtotal already threatens extra bases.
    pub power: Option<u8>,
    pub subtotal: i16,
    pub total: i16,
}

/// Full breakdown of a resolved batter response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwingOutcome {
    pub roll: u8,
    pub breakdown: Option<SwingBreakdown>,
    pub call: SwingCall,
    pub delta: PlayDelta,
}

const POWER_THRESHOLD: i16 = 9;

/// Roll the d12 swing and apply its consequences.
///
/// # Errors
///
/// Returns [`GameError::StepUnavailable`] when the at-bat is not waiting on
/// a swing.
pub fn resolve_batter_response(
    state: &mut GameState,
    rolls: &mut impl RollSource,
) -> Result<SwingOutcome, GameError> {
    if state.at_bat.phase != AtBatPhase::AwaitingSwing {
        return Err(GameError::StepUnavailable {
            step: Step::BatterResponse,
        });
    }

    let roll = rolls.roll(12, "Batter Response Die");

    // A natural 1 is always a swing and a miss, whatever the stats say.
    if roll == 1 {
        state.outs += 1;
        let batter = state.batter().name.clone();
        state.log_play(format!("{batter} strikes out swinging"));
        state.at_bat.phase = AtBatPhase::Complete;
        return Ok(SwingOutcome {
            roll,
            breakdown: None,
            call: SwingCall::StrikeoutSwinging,
            delta: PlayDelta {
                outs: 1,
                ..PlayDelta::none()
            },
        });
    }

    let velocity = state.pitcher().velocity;
    let batter = state.batter();
    let contact = batter.contact;
    let power = batter.power;
    let pitch_modifier = state.at_bat.pitch_modifier;
    let subtotal =
        i16::from(roll) - i16::from(velocity) + i16::from(contact) + i16::from(pitch_modifier);
    let power_applied = subtotal >= POWER_THRESHOLD;
    let total = if power_applied {
        subtotal + i16::from(power)
    } else {
        subtotal
    };
    let call = SwingCall::from_total(total);

    let mut delta = PlayDelta::none();
    match call {
        SwingCall::StrikeoutSwinging => {
            state.outs += 1;
            delta.outs = 1;
            let batter = state.batter().name.clone();
            state.log_play(format!("{batter} strikes out swinging"));
            state.at_bat.phase = AtBatPhase::Complete;
        }
        SwingCall::InPlay(ball) => {
            state.at_bat.batted_ball = Some(ball);
            state.at_bat.phase = AtBatPhase::AwaitingFielder;
        }
        SwingCall::HomeRun => {
            let moves = home_run_clear(&mut state.bases);
            delta.moves = state.describe_moves(&moves);
            // The batter scores too and never touches the bases map.
            state.scores.batting += 1;
            delta.runs = moves.runs() + 1;
            let batter = state.batter().name.clone();
            state.log_play(format!("{batter} hits a HOME RUN!"));
            state.at_bat.phase = AtBatPhase::Complete;
        }
    }

    Ok(SwingOutcome {
        roll,
        breakdown: Some(SwingBreakdown {
            velocity,
            contact,
            pitch_modifier,
            power: power_applied.then_some(power),
            subtotal,
            total,
        }),
        call,
        delta,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::League;
    use crate::dice::ScriptedRolls;

    fn swing_ready_state() -> GameState {
        let league = League::builtin();
        let mut state =
            GameState::new(league.teams[0].clone(), league.teams[1].clone()).unwrap();
        state.at_bat.phase = AtBatPhase::AwaitingSwing;
        state
    }

    #[test]
    fn bands_partition_every_total() {
        for total in -20..40_i16 {
            let call = SwingCall::from_total(total);
            let expected = match total {
                t if t <= 3 => SwingCall::StrikeoutSwinging,
                t if t <= 5 => SwingCall::InPlay(BattedBall::Dribbler),
                6 => SwingCall::InPlay(BattedBall::CanOfCorn),
                t if t <= 8 => SwingCall::InPlay(BattedBall::Bloop),
                t if t <= 10 => SwingCall::InPlay(BattedBall::Screamer),
                11 => SwingCall::InPlay(BattedBall::Laser),
                _ => SwingCall::HomeRun,
            };
            assert_eq!(call, expected, "total {total}");
        }
    }

    #[test]
    fn handle_targets_cover_every_category() {
        let expected = [
            (BattedBall::CanOfCorn, 3),
            (BattedBall::Dribbler, 4),
            (BattedBall::Bloop, 5),
            (BattedBall::Screamer, 6),
            (BattedBall::Laser, 7),
        ];
        for (ball, target) in expected {
            assert_eq!(ball.handle_target(), target, "{}", ball.label());
        }
    }

    #[test]
    fn natural_one_is_always_a_strikeout() {
        let mut state = swing_ready_state();
        // A +1 pitch and a big contact stat cannot save a natural 1.
        state.at_bat.pitch_modifier = 1;
        let mut rolls = ScriptedRolls::new([1]);
        let outcome = resolve_batter_response(&mut state, &mut rolls).unwrap();
        assert_eq!(outcome.call, SwingCall::StrikeoutSwinging);
        assert!(outcome.breakdown.is_none());
        assert_eq!(state.outs, 1);
        assert_eq!(state.at_bat.phase, AtBatPhase::Complete);
    }

    #[test]
    fn ball_in_play_stores_the_category_and_awaits_the_fielder() {
        let mut state = swing_ready_state();
        // GBR velocity 3, Super contact 1: roll 8 -> subtotal 6, Can of Corn.
        let mut rolls = ScriptedRolls::new([8]);
        let outcome = resolve_batter_response(&mut state, &mut rolls).unwrap();
        assert_eq!(outcome.call, SwingCall::InPlay(BattedBall::CanOfCorn));
        assert_eq!(state.at_bat.batted_ball, Some(BattedBall::CanOfCorn));
        assert_eq!(state.at_bat.phase, AtBatPhase::AwaitingFielder);
        let breakdown = outcome.breakdown.unwrap();
        assert_eq!(breakdown.subtotal, 6);
        assert_eq!(breakdown.power, None);
    }

    #[test]
    fn power_applies_only_from_the_threshold_up() {
        let mut state = swing_ready_state();
        state.at_bat.pitch_modifier = 1;
        // Roll 12: subtotal = 12 - 3 + 1 + 1 = 11, power 0 added -> Laser.
        let mut rolls = ScriptedRolls::new([12]);
        let outcome = resolve_batter_response(&mut state, &mut rolls).unwrap();
        let breakdown = outcome.breakdown.unwrap();
        assert_eq!(breakdown.subtotal, 11);
        assert_eq!(breakdown.power, Some(0));
        assert_eq!(outcome.call, SwingCall::InPlay(BattedBall::Laser));
    }

    #[test]
    fn moonshot_clears_the_bases_and_scores_the_batter() {
        let league = League::builtin();
        // Luffy (velocity 2) pitching to Osaj (contact 0, power 3).
        let mut state =
            GameState::new(league.teams[3].clone(), league.teams[0].clone()).unwrap();
        state.begin_at_bat(2, 8).unwrap();
        state.at_bat.phase = AtBatPhase::AwaitingSwing;
        state.bases.first = Some(0);
        state.bases.second = Some(1);
        // Roll 11: subtotal = 11 - 2 + 0 = 9, +3 power -> 12, Moonshot.
        let mut rolls = ScriptedRolls::new([11]);
        let outcome = resolve_batter_response(&mut state, &mut rolls).unwrap();
        assert_eq!(outcome.call, SwingCall::HomeRun);
        assert_eq!(outcome.delta.runs, 3);
        assert_eq!(state.scores.batting, 3);
        assert!(state.bases.is_empty());
        assert_eq!(state.at_bat.phase, AtBatPhase::Complete);
    }

    #[test]
    fn out_of_phase_swing_is_rejected() {
        let league = League::builtin();
        let mut state =
            GameState::new(league.teams[0].clone(), league.teams[1].clone()).unwrap();
        let mut rolls = ScriptedRolls::new([6]);
        assert_eq!(
            resolve_batter_response(&mut state, &mut rolls).unwrap_err(),
            GameError::StepUnavailable {
                step: Step::BatterResponse
            }
        );
    }
}
