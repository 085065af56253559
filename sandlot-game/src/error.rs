//! Error taxonomy for game setup and step sequencing.

use thiserror::Error;

use crate::data::{Position, RosterError};
use crate::state::Step;

/// Errors surfaced to the frontend before any dice are rolled.
///
/// `StepUnavailable` is the programmatic twin of a disabled control: a
/// resolver invoked out of phase reports it and leaves the state untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("pitching and batting team must be different")]
    SameTeamSelected,
    #[error(transparent)]
    Roster(#[from] RosterError),
    #[error("no roster slot {index} on team {team}")]
    UnknownPlayer { team: String, index: usize },
    #[error("{name} has no pitching stats")]
    NotAPitcher { name: String },
    #[error("{name} is on base and cannot bat")]
    BatterOnBase { name: String },
    #[error("nobody on team {team} covers {position}")]
    VacantPosition { team: String, position: Position },
    #[error("{step} is not available in the current at-bat phase")]
    StepUnavailable { step: Step },
}
