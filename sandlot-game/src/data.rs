//! Roster data model: players, teams, and the league container.
//!
//! The schema mirrors the JSON the game ships with (see `data/league.json`):
//! camel-cased keys, position codes like `"SS"`, and zero-valued pitching
//! stats for position players.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Number of players a team must field.
pub const ROSTER_SIZE: usize = 9;

const BUILTIN_LEAGUE: &str = include_str!("../data/league.json");

/// One of the nine fielding positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    #[serde(rename = "P")]
    Pitcher,
    #[serde(rename = "C")]
    Catcher,
    #[serde(rename = "1B")]
    FirstBase,
    #[serde(rename = "2B")]
    SecondBase,
    #[serde(rename = "3B")]
    ThirdBase,
    #[serde(rename = "SS")]
    Shortstop,
    #[serde(rename = "LF")]
    LeftField,
    #[serde(rename = "CF")]
    CenterField,
    #[serde(rename = "RF")]
    RightField,
}

impl Position {
    pub const ALL: [Self; ROSTER_SIZE] = [
        Self::Pitcher,
        Self::Catcher,
        Self::FirstBase,
        Self::SecondBase,
        Self::ThirdBase,
        Self::Shortstop,
        Self::LeftField,
        Self::CenterField,
        Self::RightField,
    ];

    /// Scorecard code, e.g. `"SS"`.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Pitcher => "P",
            Self::Catcher => "C",
            Self::FirstBase => "1B",
            Self::SecondBase => "2B",
            Self::ThirdBase => "3B",
            Self::Shortstop => "SS",
            Self::LeftField => "LF",
            Self::CenterField => "CF",
            Self::RightField => "RF",
        }
    }

    /// Spoken name, e.g. `"shortstop"`.
    #[must_use]
    pub const fn spoken(self) -> &'static str {
        match self {
            Self::Pitcher => "pitcher",
            Self::Catcher => "catcher",
            Self::FirstBase => "first base",
            Self::SecondBase => "second base",
            Self::ThirdBase => "third base",
            Self::Shortstop => "shortstop",
            Self::LeftField => "left field",
            Self::CenterField => "center field",
            Self::RightField => "right field",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A roster player with offensive, defensive, and pitching stat blocks.
///
/// Position players carry all-zero pitching stats; [`Player::can_pitch`]
/// is the eligibility gate for pitcher selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub batting_order: u8,
    #[serde(default)]
    pub number: u8,
    pub name: String,
    pub position: Position,
    #[serde(default)]
    pub secondary_pos: Option<Position>,
    pub contact: u8,
    pub power: u8,
    pub eye: u8,
    pub speed: u8,
    #[serde(default)]
    pub control: u8,
    #[serde(default)]
    pub velocity: u8,
    #[serde(default)]
    pub stamina: u8,
    pub arm: u8,
    pub glove: u8,
}

impl Player {
    /// Whether this player may be selected as a pitcher.
    #[must_use]
    pub fn can_pitch(&self) -> bool {
        u16::from(self.control) + u16::from(self.velocity) + u16::from(self.stamina) > 0
    }

    /// Whether this player covers `position`, primarily or secondarily.
    #[must_use]
    pub fn plays(&self, position: Position) -> bool {
        self.position == position || self.secondary_pos == Some(position)
    }
}

/// Errors raised when a roster violates the team invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterError {
    #[error("team {team} must field exactly {ROSTER_SIZE} players, found {found}")]
    RosterSize { team: String, found: usize },
    #[error("team {team} batting order slot {order} is out of the 1-9 range")]
    OrderOutOfRange { team: String, order: u8 },
    #[error("team {team} repeats batting order slot {order}")]
    DuplicateOrder { team: String, order: u8 },
    #[error("team {team} has nobody whose primary position is {position}")]
    MissingPosition { team: String, position: Position },
}

/// A named team of exactly nine players.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    pub players: Vec<Player>,
}

impl Team {
    /// Check the roster invariants: nine players, batting orders 1-9 each
    /// used once, and every fielding position covered by a primary.
    ///
    /// # Errors
    ///
    /// Returns the first [`RosterError`] violation found.
    pub fn validate(&self) -> Result<(), RosterError> {
        if self.players.len() != ROSTER_SIZE {
            return Err(RosterError::RosterSize {
                team: self.name.clone(),
                found: self.players.len(),
            });
        }
        let mut seen = [false; ROSTER_SIZE];
        for player in &self.players {
            let order = player.batting_order;
            if !(1..=9).contains(&order) {
                return Err(RosterError::OrderOutOfRange {
                    team: self.name.clone(),
                    order,
                });
            }
            let slot = usize::from(order - 1);
            if seen[slot] {
                return Err(RosterError::DuplicateOrder {
                    team: self.name.clone(),
                    order,
                });
            }
            seen[slot] = true;
        }
        for position in Position::ALL {
            if !self.players.iter().any(|p| p.position == position) {
                return Err(RosterError::MissingPosition {
                    team: self.name.clone(),
                    position,
                });
            }
        }
        Ok(())
    }

    /// Roster index of the player batting in `order` (1-9).
    #[must_use]
    pub fn slot_by_order(&self, order: u8) -> Option<usize> {
        self.players.iter().position(|p| p.batting_order == order)
    }

    /// The defender covering `position`: a primary-position match wins over
    /// a secondary-position match.
    #[must_use]
    pub fn fielder_at(&self, position: Position) -> Option<&Player> {
        self.players
            .iter()
            .find(|p| p.position == position)
            .or_else(|| {
                self.players
                    .iter()
                    .find(|p| p.secondary_pos == Some(position))
            })
    }

    /// Roster index of the nominal starting pitcher (primary position P).
    ///
    /// Validated rosters always have one; slot 0 is the documented fallback
    /// for unvalidated data.
    #[must_use]
    pub fn starting_pitcher_slot(&self) -> usize {
        self.players
            .iter()
            .position(|p| p.position == Position::Pitcher)
            .unwrap_or(0)
    }

    /// Roster index of the leadoff hitter (batting order 1), falling back to
    /// slot 0 for unvalidated data.
    #[must_use]
    pub fn leadoff_slot(&self) -> usize {
        self.slot_by_order(1).unwrap_or(0)
    }
}

/// Errors raised while loading league data.
#[derive(Debug, Error)]
pub enum LeagueError {
    #[error("league data is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Roster(#[from] RosterError),
}

/// The read-only set of teams available for a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct League {
    pub teams: Vec<Team>,
}

impl League {
    /// Parse and validate a league from its JSON representation.
    ///
    /// # Errors
    ///
    /// Returns [`LeagueError`] when the JSON does not parse or any team
    /// breaks a roster invariant.
    pub fn from_json(raw: &str) -> Result<Self, LeagueError> {
        let league: Self = serde_json::from_str(raw)?;
        for team in &league.teams {
            team.validate()?;
        }
        Ok(league)
    }

    /// The league shipped with the game.
    #[must_use]
    pub fn builtin() -> Self {
        Self::from_json(BUILTIN_LEAGUE).expect("embedded league data is valid")
    }

    /// Look up a team by name.
    #[must_use]
    pub fn team(&self, name: &str) -> Option<&Team> {
        self.teams.iter().find(|t| t.name == name)
    }
}
