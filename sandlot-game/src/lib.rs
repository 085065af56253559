//! Sandlot Game Engine
//!
//! Platform-agnostic core logic for the Sandlot dice-driven baseball play
//! simulator. Each user action resolves exactly one step of the at-bat
//! state machine - pitch delivery, batter response, fielder determination,
//! handle check, throws, tag-ups - against a pluggable roll source, and
//! returns an outcome record carrying every die value and stat operand the
//! step consumed. No UI or platform-specific dependencies live here.

pub mod baserunning;
pub mod data;
pub mod delivery;
pub mod dice;
pub mod error;
pub mod fielding;
pub mod innings;
pub mod response;
pub mod session;
pub mod state;
pub mod tagup;
pub mod throws;

// Re-export commonly used types
pub use baserunning::{BaseMoves, home_run_clear, plain_advance, walk_force_advance};
pub use data::{League, LeagueError, Player, Position, ROSTER_SIZE, RosterError, Team};
pub use delivery::{PitchCall, PitchOutcome, resolve_pitch_delivery};
pub use dice::{RollSource, ScriptedRolls, SeededRolls};
pub use error::GameError;
pub use fielding::{
    FielderClass, FielderOutcome, HandleOutcome, HandleVerdict, resolve_fielder_determination,
    resolve_handle_check,
};
pub use innings::{HalfInningSummary, TransitionOutcome, advance};
pub use response::{
    BattedBall, SwingBreakdown, SwingCall, SwingOutcome, resolve_batter_response,
};
pub use session::GameSession;
pub use state::{
    ActiveFielder, AtBat, AtBatPhase, Base, Bases, Destination, DoublePlay, DoublePlayPhase,
    ForceBase, GameState, Half, PlayDelta, PlayLogEntry, RunnerMove, Scoreboard, Step,
    inning_ordinal,
};
pub use tagup::{CONFIDENCE_TARGET, TagUpAttempt, TagUpOutcome, TagUpThrow, resolve_tag_up};
pub use throws::{ThrowKind, ThrowOutcome, resolve_throw};
