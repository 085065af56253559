//! Pitch delivery: the opening roll of every at-bat.

use serde::{Deserialize, Serialize};

use crate::baserunning::{plain_advance, walk_force_advance};
use crate::dice::RollSource;
use crate::error::GameError;
use crate::state::{AtBatPhase, Base, Destination, GameState, PlayDelta, RunnerMove, Step};

/// Outcome band of a pitch-delivery total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PitchCall {
    WildPitch,
    Walk,
    DownTheMiddle,
    OnThePlate,
    Paint,
    StrikeoutLooking,
}

impl PitchCall {
    /// Band lookup; the bands partition every possible total.
    #[must_use]
    pub const fn from_total(total: i16) -> Self {
        match total {
            i16::MIN..=2 => Self::WildPitch,
            3..=4 => Self::Walk,
            5..=11 => Self::DownTheMiddle,
            12..=15 => Self::OnThePlate,
            16..=19 => Self::Paint,
            20..=i16::MAX => Self::StrikeoutLooking,
        }
    }

    /// Modifier carried into the batter-response total.
    #[must_use]
    pub const fn response_modifier(self) -> i8 {
        match self {
            Self::DownTheMiddle => 1,
            Self::Paint => -1,
            _ => 0,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::WildPitch => "Wild Pitch",
            Self::Walk => "Walk",
            Self::DownTheMiddle => "Down the Middle",
            Self::OnThePlate => "On the Plate",
            Self::Paint => "Paint",
            Self::StrikeoutLooking => "Strikeout Looking",
        }
    }
}

/// Full breakdown of a resolved pitch delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PitchOutcome {
    pub roll: u8,
    pub control: u8,
    pub eye: u8,
    pub total: i16,
    pub call: PitchCall,
    /// Wild pitch with runners aboard: the same batter faces another
    /// delivery.
    pub pitch_again: bool,
    pub delta: PlayDelta,
}

/// Roll the d20 delivery and apply its consequences.
///
/// # Errors
///
/// Returns [`GameError::StepUnavailable`] when the at-bat is not waiting on
/// a pitch.
pub fn resolve_pitch_delivery(
    state: &mut GameState,
    rolls: &mut impl RollSource,
) -> Result<PitchOutcome, GameError> {
    if state.at_bat.phase != AtBatPhase::AwaitingPitch {
        return Err(GameError::StepUnavailable {
            step: Step::PitchDelivery,
        });
    }

    let control = state.pitcher().control;
    let eye = state.batter().eye;
    let roll = rolls.roll(20, "Pitcher Delivery Die");
    let total = i16::from(roll) + i16::from(control) - i16::from(eye);
    let call = PitchCall::from_total(total);
    state.at_bat.pitch_modifier = call.response_modifier();

    let mut delta = PlayDelta::none();
    let mut pitch_again = false;
    match call {
        PitchCall::WildPitch => {
            if state.bases.any_occupied() {
                let moves = plain_advance(&mut state.bases);
                delta.runs = moves.runs();
                delta.moves = state.describe_moves(&moves);
                pitch_again = true;
            } else {
                // Nobody to advance: the wild pitch is just ball four.
                place_batter(state, &mut delta);
                state.at_bat.phase = AtBatPhase::Complete;
            }
        }
        PitchCall::Walk => {
            let moves = walk_force_advance(&mut state.bases);
            delta.runs = moves.runs();
            delta.moves = state.describe_moves(&moves);
            place_batter(state, &mut delta);
            let batter = state.batter().name.clone();
            state.log_play(format!("{batter} walks"));
            state.at_bat.phase = AtBatPhase::Complete;
        }
        PitchCall::StrikeoutLooking => {
            state.outs += 1;
            delta.outs = 1;
            let batter = state.batter().name.clone();
            state.log_play(format!("{batter} strikes out looking"));
            state.at_bat.phase = AtBatPhase::Complete;
        }
        PitchCall::DownTheMiddle | PitchCall::OnThePlate | PitchCall::Paint => {
            state.at_bat.phase = AtBatPhase::AwaitingSwing;
        }
    }

    Ok(PitchOutcome {
        roll,
        control,
        eye,
        total,
        call,
        pitch_again,
        delta,
    })
}

fn place_batter(state: &mut GameState, delta: &mut PlayDelta) {
    state.place_batter_on_first();
    delta.moves.push(RunnerMove {
        name: state.batter().name.clone(),
        from: None,
        to: Destination::Base(Base::First),
    });
}
