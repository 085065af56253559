//! High-level session wrapper binding a game state to a roll source.

use crate::delivery::{PitchOutcome, resolve_pitch_delivery};
use crate::dice::RollSource;
use crate::error::GameError;
use crate::fielding::{
    FielderOutcome, HandleOutcome, resolve_fielder_determination, resolve_handle_check,
};
use crate::innings::{TransitionOutcome, advance};
use crate::response::{SwingOutcome, resolve_batter_response};
use crate::state::{AtBatPhase, GameState, Step};
use crate::tagup::{TagUpOutcome, resolve_tag_up};
use crate::throws::{ThrowOutcome, resolve_throw};

/// One game driven step by step through a single roll source.
///
/// Exactly one resolution step is legal at a time; [`GameSession::legal_step`]
/// tells a frontend which control to enable.
#[derive(Debug, Clone)]
pub struct GameSession<R: RollSource> {
    state: GameState,
    rolls: R,
}

impl<R: RollSource> GameSession<R> {
    #[must_use]
    pub fn new(state: GameState, rolls: R) -> Self {
        Self { state, rolls }
    }

    /// Validate a pitcher/batter selection and reset the at-bat.
    ///
    /// # Errors
    ///
    /// Returns [`GameError`] on an invalid selection; see
    /// [`GameState::begin_at_bat`].
    pub fn begin_at_bat(&mut self, pitcher: u8, batter: u8) -> Result<(), GameError> {
        self.state.begin_at_bat(pitcher, batter)
    }

    /// # Errors
    ///
    /// Returns [`GameError::StepUnavailable`] out of phase.
    pub fn pitch(&mut self) -> Result<PitchOutcome, GameError> {
        resolve_pitch_delivery(&mut self.state, &mut self.rolls)
    }

    /// # Errors
    ///
    /// Returns [`GameError::StepUnavailable`] out of phase.
    pub fn swing(&mut self) -> Result<SwingOutcome, GameError> {
        resolve_batter_response(&mut self.state, &mut self.rolls)
    }

    /// # Errors
    ///
    /// Returns [`GameError::StepUnavailable`] out of phase.
    pub fn determine_fielder(&mut self) -> Result<FielderOutcome, GameError> {
        resolve_fielder_determination(&mut self.state, &mut self.rolls)
    }

    /// # Errors
    ///
    /// Returns [`GameError::StepUnavailable`] out of phase.
    pub fn handle_check(&mut self) -> Result<HandleOutcome, GameError> {
        resolve_handle_check(&mut self.state, &mut self.rolls)
    }

    /// # Errors
    ///
    /// Returns [`GameError::StepUnavailable`] out of phase.
    pub fn throw(&mut self) -> Result<ThrowOutcome, GameError> {
        resolve_throw(&mut self.state, &mut self.rolls)
    }

    /// # Errors
    ///
    /// Returns [`GameError::StepUnavailable`] unless a caught ball just
    /// opened the tag-up window.
    pub fn tag_up(&mut self) -> Result<TagUpOutcome, GameError> {
        resolve_tag_up(&mut self.state, &mut self.rolls)
    }

    /// Move on: next batter, or the half-inning transition on three outs.
    pub fn advance(&mut self) -> TransitionOutcome {
        advance(&mut self.state)
    }

    /// The step the state machine is waiting on, if any. `None` means the
    /// play is fully resolved (though [`Self::tag_up`] may still be open).
    #[must_use]
    pub const fn legal_step(&self) -> Option<Step> {
        match self.state.at_bat.phase {
            AtBatPhase::AwaitingPitch => Some(Step::PitchDelivery),
            AtBatPhase::AwaitingSwing => Some(Step::BatterResponse),
            AtBatPhase::AwaitingFielder => Some(Step::FielderDetermination),
            AtBatPhase::AwaitingHandle => Some(Step::HandleCheck),
            AtBatPhase::AwaitingThrow => Some(Step::ThrowAttempt),
            AtBatPhase::Complete => {
                if self.state.at_bat.tag_up_open {
                    Some(Step::TagUp)
                } else {
                    None
                }
            }
        }
    }

    /// Borrow the underlying immutable game state.
    #[must_use]
    pub const fn state(&self) -> &GameState {
        &self.state
    }

    /// Borrow the underlying mutable game state.
    pub const fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// Consume the session, returning the underlying game state.
    #[must_use]
    pub fn into_state(self) -> GameState {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::League;
    use crate::dice::ScriptedRolls;

    fn session(rolls: ScriptedRolls) -> GameSession<ScriptedRolls> {
        let league = League::builtin();
        let state = GameState::new(league.teams[0].clone(), league.teams[1].clone()).unwrap();
        GameSession::new(state, rolls)
    }

    #[test]
    fn legal_step_tracks_the_phase_machine() {
        // Pitch 10 (Down the Middle), swing 8 (Bloop), infielder d20 1
        // (pitcher), handle 6 (caught).
        let mut session = session(ScriptedRolls::new([10, 8, 1, 6]));
        assert_eq!(session.legal_step(), Some(Step::PitchDelivery));
        session.pitch().unwrap();
        assert_eq!(session.legal_step(), Some(Step::BatterResponse));
        session.swing().unwrap();
        assert_eq!(session.legal_step(), Some(Step::FielderDetermination));
        session.determine_fielder().unwrap();
        assert_eq!(session.legal_step(), Some(Step::HandleCheck));
        session.handle_check().unwrap();
        assert_eq!(session.legal_step(), None);
        assert_eq!(session.state().outs, 1);
    }

    #[test]
    fn out_of_phase_calls_leave_state_untouched() {
        let mut session = session(ScriptedRolls::new([10]));
        let before = session.state().clone();
        assert!(session.swing().is_err());
        assert!(session.throw().is_err());
        assert!(session.tag_up().is_err());
        assert_eq!(session.state(), &before);
    }
}
