//! Mutable game state: score, outs, inning, baserunners, and the transient
//! at-bat fields the resolution steps hand to each other.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::VecDeque;
use std::fmt;

use crate::baserunning::BaseMoves;
use crate::data::{Player, Position, Team};
use crate::error::GameError;
use crate::response::BattedBall;

const PLAY_LOG_CAPACITY: usize = 50;

/// Which half of the inning is being played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Half {
    #[default]
    Top,
    Bottom,
}

impl Half {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "Top",
            Self::Bottom => "Bottom",
        }
    }
}

impl fmt::Display for Half {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A base a runner can occupy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Base {
    First,
    Second,
    Third,
}

impl Base {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::First => "first",
            Self::Second => "second",
            Self::Third => "third",
        }
    }
}

impl fmt::Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a runner ends up after a movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Destination {
    Base(Base),
    Home,
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Base(base) => base.fmt(f),
            Self::Home => f.write_str("home"),
        }
    }
}

/// Base occupancy, holding batting-team roster slots.
///
/// A slot appears on at most one base; the bases clear at every half-inning
/// transition, so slots never outlive the team they index into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Bases {
    pub first: Option<u8>,
    pub second: Option<u8>,
    pub third: Option<u8>,
}

impl Bases {
    #[must_use]
    pub const fn get(&self, base: Base) -> Option<u8> {
        match base {
            Base::First => self.first,
            Base::Second => self.second,
            Base::Third => self.third,
        }
    }

    pub const fn set(&mut self, base: Base, runner: Option<u8>) {
        match base {
            Base::First => self.first = runner,
            Base::Second => self.second = runner,
            Base::Third => self.third = runner,
        }
    }

    pub const fn take(&mut self, base: Base) -> Option<u8> {
        let runner = self.get(base);
        self.set(base, None);
        runner
    }

    #[must_use]
    pub const fn any_occupied(&self) -> bool {
        self.first.is_some() || self.second.is_some() || self.third.is_some()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        !self.any_occupied()
    }

    pub const fn clear(&mut self) {
        self.first = None;
        self.second = None;
        self.third = None;
    }

    /// Occupied bases, lead runner first.
    #[must_use]
    pub fn runners(&self) -> SmallVec<[(Base, u8); 3]> {
        let mut runners = SmallVec::new();
        if let Some(slot) = self.third {
            runners.push((Base::Third, slot));
        }
        if let Some(slot) = self.second {
            runners.push((Base::Second, slot));
        }
        if let Some(slot) = self.first {
            runners.push((Base::First, slot));
        }
        runners
    }
}

/// One runner movement inside a resolved step.
///
/// `from` is `None` when the batter is the one moving.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunnerMove {
    pub name: String,
    pub from: Option<Base>,
    pub to: Destination,
}

/// Base/out/score changes produced by one resolution step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PlayDelta {
    pub outs: u8,
    pub runs: u8,
    pub moves: SmallVec<[RunnerMove; 4]>,
}

impl PlayDelta {
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }
}

/// The user-driven resolution steps, for sequencing errors and prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    PitchDelivery,
    BatterResponse,
    FielderDetermination,
    HandleCheck,
    ThrowAttempt,
    TagUp,
}

impl Step {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PitchDelivery => "pitch delivery",
            Self::BatterResponse => "batter response",
            Self::FielderDetermination => "fielder determination",
            Self::HandleCheck => "handle check",
            Self::ThrowAttempt => "throw attempt",
            Self::TagUp => "tag up",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the at-bat state machine currently sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AtBatPhase {
    #[default]
    AwaitingPitch,
    AwaitingSwing,
    AwaitingFielder,
    AwaitingHandle,
    AwaitingThrow,
    Complete,
}

/// The defender selected to play a batted ball, with the stats the later
/// steps consume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveFielder {
    pub name: String,
    pub position: Position,
    pub arm: u8,
    pub glove: u8,
}

/// The most advanced forced base, where a double-play lead throw goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ForceBase {
    Second,
    Third,
    Home,
}

impl ForceBase {
    /// The base the forced runner starts from.
    #[must_use]
    pub const fn runner_base(self) -> Base {
        match self {
            Self::Second => Base::First,
            Self::Third => Base::Second,
            Self::Home => Base::Third,
        }
    }
}

impl fmt::Display for ForceBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Second => f.write_str("second"),
            Self::Third => f.write_str("third"),
            Self::Home => f.write_str("home"),
        }
    }
}

/// Which throw of the two-throw double-play attempt is pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DoublePlayPhase {
    AwaitingLeadThrow,
    AwaitingFirstThrow,
}

/// A double-play attempt in flight, spanning two throw actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoublePlay {
    pub phase: DoublePlayPhase,
    pub target: ForceBase,
    /// Primary position of the fielder who gloved the ball; decides who
    /// covers the pivot on the relay to first.
    pub fielded_by: Position,
}

/// Transient per-at-bat state, reset whenever a new batter steps in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AtBat {
    pub phase: AtBatPhase,
    /// Carried from pitch delivery into the batter response total.
    pub pitch_modifier: i8,
    pub batted_ball: Option<BattedBall>,
    pub fielder: Option<ActiveFielder>,
    pub double_play: Option<DoublePlay>,
    /// A caught ball left runners on second/third free to tag up.
    pub tag_up_open: bool,
}

impl AtBat {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Run counters per role slot; swapped together with the roles so each
/// counter keeps tracking "runs scored while this slot was batting".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Scoreboard {
    pub batting: u32,
    pub pitching: u32,
}

impl Scoreboard {
    pub const fn swap_roles(&mut self) {
        let batting = self.batting;
        self.batting = self.pitching;
        self.pitching = batting;
    }
}

/// A line in the bounded play-by-play log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayLogEntry {
    pub message: String,
    pub inning_start: bool,
}

/// The complete state of one game in progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub pitching_team: Team,
    pub batting_team: Team,
    /// Roster slot into the pitching team.
    pub current_pitcher: u8,
    /// Roster slot into the batting team.
    pub current_batter: u8,
    /// 0-2 during an at-bat; sits at 3 only until the half-inning
    /// transition is taken.
    pub outs: u8,
    pub inning: u16,
    pub half: Half,
    pub scores: Scoreboard,
    pub bases: Bases,
    pub at_bat: AtBat,
    pub play_log: VecDeque<PlayLogEntry>,
}

impl GameState {
    /// Start a game between two distinct, valid teams, with each side's
    /// nominal starting pitcher and leadoff hitter selected.
    ///
    /// # Errors
    ///
    /// Returns [`GameError`] when either roster is invalid or the same team
    /// was picked for both roles.
    pub fn new(pitching_team: Team, batting_team: Team) -> Result<Self, GameError> {
        pitching_team.validate()?;
        batting_team.validate()?;
        if pitching_team.name == batting_team.name {
            return Err(GameError::SameTeamSelected);
        }
        let current_pitcher = as_slot(pitching_team.starting_pitcher_slot());
        let current_batter = as_slot(batting_team.leadoff_slot());
        let mut state = Self {
            pitching_team,
            batting_team,
            current_pitcher,
            current_batter,
            outs: 0,
            inning: 1,
            half: Half::Top,
            scores: Scoreboard::default(),
            bases: Bases::default(),
            at_bat: AtBat::default(),
            play_log: VecDeque::new(),
        };
        state.log_inning_start();
        Ok(state)
    }

    /// Validate a pitcher/batter selection and clear the transient at-bat
    /// fields so the next pitch starts fresh.
    ///
    /// # Errors
    ///
    /// Returns [`GameError`] when a slot is out of range, the pitcher has no
    /// pitching stats, or the batter is standing on a base.
    pub fn begin_at_bat(&mut self, pitcher: u8, batter: u8) -> Result<(), GameError> {
        let pitcher_player = self
            .pitching_team
            .players
            .get(usize::from(pitcher))
            .ok_or_else(|| GameError::UnknownPlayer {
                team: self.pitching_team.name.clone(),
                index: usize::from(pitcher),
            })?;
        if !pitcher_player.can_pitch() {
            return Err(GameError::NotAPitcher {
                name: pitcher_player.name.clone(),
            });
        }
        let batter_player = self
            .batting_team
            .players
            .get(usize::from(batter))
            .ok_or_else(|| GameError::UnknownPlayer {
                team: self.batting_team.name.clone(),
                index: usize::from(batter),
            })?;
        let on_base = self.bases.runners().iter().any(|&(_, slot)| slot == batter);
        if on_base {
            return Err(GameError::BatterOnBase {
                name: batter_player.name.clone(),
            });
        }
        self.current_pitcher = pitcher;
        self.current_batter = batter;
        self.at_bat.reset();
        Ok(())
    }

    #[must_use]
    pub fn pitcher(&self) -> &Player {
        &self.pitching_team.players[usize::from(self.current_pitcher)]
    }

    #[must_use]
    pub fn batter(&self) -> &Player {
        &self.batting_team.players[usize::from(self.current_batter)]
    }

    /// The batting-team player in a given roster slot (used for runners).
    #[must_use]
    pub fn runner(&self, slot: u8) -> &Player {
        &self.batting_team.players[usize::from(slot)]
    }

    /// Whether three outs have been recorded and the half-inning transition
    /// is due.
    #[must_use]
    pub const fn half_inning_due(&self) -> bool {
        self.outs >= 3
    }

    /// "Top 1st", "Bottom 4th", ...
    #[must_use]
    pub fn inning_label(&self) -> String {
        format!("{} {}", self.half, inning_ordinal(self.inning))
    }

    pub(crate) fn place_batter_on_first(&mut self) {
        self.bases.first = Some(self.current_batter);
    }

    /// Turn slot-level base movements into named moves for an outcome
    /// record, crediting any runs scored.
    pub(crate) fn describe_moves(&mut self, moves: &BaseMoves) -> SmallVec<[RunnerMove; 4]> {
        let mut described = SmallVec::new();
        for &slot in &moves.scored {
            self.scores.batting += 1;
            described.push(RunnerMove {
                name: self.runner(slot).name.clone(),
                from: None,
                to: Destination::Home,
            });
        }
        for &(slot, base) in &moves.moved {
            described.push(RunnerMove {
                name: self.runner(slot).name.clone(),
                from: None,
                to: Destination::Base(base),
            });
        }
        described
    }

    pub(crate) fn log_play(&mut self, message: String) {
        self.push_log(PlayLogEntry {
            message,
            inning_start: false,
        });
    }

    pub(crate) fn log_inning_start(&mut self) {
        let message = format!("=== {} Inning ===", self.inning_label());
        self.push_log(PlayLogEntry {
            message,
            inning_start: true,
        });
    }

    fn push_log(&mut self, entry: PlayLogEntry) {
        self.play_log.push_back(entry);
        while self.play_log.len() > PLAY_LOG_CAPACITY {
            self.play_log.pop_front();
        }
    }
}

fn as_slot(index: usize) -> u8 {
    u8::try_from(index).unwrap_or(0)
}

/// "1st", "2nd", "3rd", then "Nth".
#[must_use]
pub fn inning_ordinal(inning: u16) -> String {
    match inning {
        1 => "1st".to_string(),
        2 => "2nd".to_string(),
        3 => "3rd".to_string(),
        n => format!("{n}th"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::League;

    fn two_teams() -> (Team, Team) {
        let league = League::builtin();
        (league.teams[0].clone(), league.teams[1].clone())
    }

    #[test]
    fn new_game_selects_starting_roles() {
        let (pitching, batting) = two_teams();
        let state = GameState::new(pitching, batting).unwrap();
        assert_eq!(state.pitcher().name, "GBR");
        assert_eq!(state.batter().name, "Super");
        assert_eq!(state.inning, 1);
        assert_eq!(state.half, Half::Top);
        assert!(state.play_log[0].inning_start);
    }

    #[test]
    fn new_game_rejects_same_team() {
        let league = League::builtin();
        let team = league.teams[0].clone();
        assert_eq!(
            GameState::new(team.clone(), team).unwrap_err(),
            GameError::SameTeamSelected
        );
    }

    #[test]
    fn begin_at_bat_rejects_position_player_pitching() {
        let (pitching, batting) = two_teams();
        // EFive (slot 2 on Rat Stack) has all-zero pitching stats.
        let mut state = GameState::new(pitching, batting).unwrap();
        assert!(matches!(
            state.begin_at_bat(2, 0),
            Err(GameError::NotAPitcher { .. })
        ));
    }

    #[test]
    fn begin_at_bat_rejects_baserunner_batting() {
        let (pitching, batting) = two_teams();
        let mut state = GameState::new(pitching, batting).unwrap();
        state.bases.second = Some(0);
        assert!(matches!(
            state.begin_at_bat(1, 0),
            Err(GameError::BatterOnBase { .. })
        ));
    }

    #[test]
    fn begin_at_bat_clears_transient_state() {
        let (pitching, batting) = two_teams();
        let mut state = GameState::new(pitching, batting).unwrap();
        state.at_bat.pitch_modifier = 1;
        state.at_bat.tag_up_open = true;
        state.at_bat.phase = AtBatPhase::Complete;
        state.begin_at_bat(1, 3).unwrap();
        assert_eq!(state.at_bat, AtBat::default());
        assert_eq!(state.batter().name, "Lion");
    }

    #[test]
    fn scoreboard_swaps_with_roles() {
        let mut scores = Scoreboard {
            batting: 3,
            pitching: 1,
        };
        scores.swap_roles();
        assert_eq!(scores.batting, 1);
        assert_eq!(scores.pitching, 3);
    }

    #[test]
    fn play_log_is_bounded() {
        let (pitching, batting) = two_teams();
        let mut state = GameState::new(pitching, batting).unwrap();
        for i in 0..80 {
            state.log_play(format!("play {i}"));
        }
        assert_eq!(state.play_log.len(), PLAY_LOG_CAPACITY);
        assert_eq!(state.play_log.back().unwrap().message, "play 79");
    }

    #[test]
    fn inning_ordinals_follow_scoreboard_convention() {
        assert_eq!(inning_ordinal(1), "1st");
        assert_eq!(inning_ordinal(2), "2nd");
        assert_eq!(inning_ordinal(3), "3rd");
        assert_eq!(inning_ordinal(4), "4th");
        assert_eq!(inning_ordinal(11), "11th");
    }

    #[test]
    fn runners_listed_lead_first() {
        let bases = Bases {
            first: Some(0),
            second: None,
            third: Some(4),
        };
        let runners = bases.runners();
        assert_eq!(runners[0], (Base::Third, 4));
        assert_eq!(runners[1], (Base::First, 0));
    }
}
