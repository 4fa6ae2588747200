//! Fixture, MatchResult, Participant and MatchLabel: one scheduled game and its outcome.

use crate::models::player::PlayerName;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sequential game number, never reused within a tournament. Displayed as `Game01`.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(pub u32);

impl GameId {
    pub const FIRST: GameId = GameId(1);

    pub fn next(self) -> GameId {
        GameId(self.0 + 1)
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Game{:02}", self.0)
    }
}

/// 1-based console number. Displayed as `Console 1`.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConsoleId(pub u32);

impl fmt::Display for ConsoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Console {}", self.0)
    }
}

/// Playoff stage. Each stage is fed by the winners of the previous one.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Wildcards,
    Semifinals,
    Final,
}

impl Stage {
    pub const ALL: [Stage; 3] = [Stage::Wildcards, Stage::Semifinals, Stage::Final];

    /// Ties played in this stage.
    pub fn labels(self) -> &'static [MatchLabel] {
        match self {
            Stage::Wildcards => &[MatchLabel::Wildcard1, MatchLabel::Wildcard2],
            Stage::Semifinals => &[MatchLabel::Semifinal1, MatchLabel::Semifinal2],
            Stage::Final => &[MatchLabel::Final],
        }
    }

    /// The stage the winners of this one advance to.
    pub fn next(self) -> Option<Stage> {
        match self {
            Stage::Wildcards => Some(Stage::Semifinals),
            Stage::Semifinals => Some(Stage::Final),
            Stage::Final => None,
        }
    }
}

/// Identifier of a playoff tie; both legs of a tie share it.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
pub enum MatchLabel {
    #[serde(rename = "WC1")]
    Wildcard1,
    #[serde(rename = "WC2")]
    Wildcard2,
    #[serde(rename = "SF1")]
    Semifinal1,
    #[serde(rename = "SF2")]
    Semifinal2,
    #[serde(rename = "Final")]
    Final,
}

impl MatchLabel {
    pub const ALL: [MatchLabel; 5] = [
        MatchLabel::Wildcard1,
        MatchLabel::Wildcard2,
        MatchLabel::Semifinal1,
        MatchLabel::Semifinal2,
        MatchLabel::Final,
    ];

    pub fn stage(self) -> Stage {
        match self {
            MatchLabel::Wildcard1 | MatchLabel::Wildcard2 => Stage::Wildcards,
            MatchLabel::Semifinal1 | MatchLabel::Semifinal2 => Stage::Semifinals,
            MatchLabel::Final => Stage::Final,
        }
    }

    /// The tie whose placeholder this tie's winner fills.
    /// WC1 feeds SF2 and WC2 feeds SF1 (the top seed meets the lower wildcard).
    pub fn feeds(self) -> Option<MatchLabel> {
        match self {
            MatchLabel::Wildcard1 => Some(MatchLabel::Semifinal2),
            MatchLabel::Wildcard2 => Some(MatchLabel::Semifinal1),
            MatchLabel::Semifinal1 | MatchLabel::Semifinal2 => Some(MatchLabel::Final),
            MatchLabel::Final => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MatchLabel::Wildcard1 => "WC1",
            MatchLabel::Wildcard2 => "WC2",
            MatchLabel::Semifinal1 => "SF1",
            MatchLabel::Semifinal2 => "SF2",
            MatchLabel::Final => "Final",
        }
    }
}

impl fmt::Display for MatchLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One side of a fixture: a known player, or the not-yet-known winner of another tie.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Participant {
    Resolved(PlayerName),
    Pending(MatchLabel),
}

impl Participant {
    pub fn player(name: impl Into<String>) -> Self {
        Participant::Resolved(name.into())
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Participant::Resolved(name) => Some(name),
            Participant::Pending(_) => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Participant::Pending(_))
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Participant::Resolved(name) => f.write_str(name),
            Participant::Pending(label) => write!(f, "Winner {}", label),
        }
    }
}

/// Highest score a side can be recorded with.
pub const MAX_GOALS: u32 = 99;

/// Final score of a played fixture, with expected goals for both sides.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub home_goals: u32,
    pub away_goals: u32,
    pub home_xg: f64,
    pub away_xg: f64,
}

/// Outcome of a played fixture from the home side's view.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    HomeWin,
    Draw,
    AwayWin,
}

impl MatchResult {
    /// Build a result; xG values must be finite and non-negative.
    pub fn new(home_goals: u32, away_goals: u32, home_xg: f64, away_xg: f64) -> Result<Self, String> {
        let result = Self {
            home_goals,
            away_goals,
            home_xg,
            away_xg,
        };
        result.check()?;
        Ok(result)
    }

    /// Reject goal counts above `MAX_GOALS` and xG values that are negative, NaN or
    /// infinite (e.g. from deserialized input).
    pub fn check(&self) -> Result<(), String> {
        for goals in [self.home_goals, self.away_goals] {
            if goals > MAX_GOALS {
                return Err(format!("at most {} goals per side, got {}", MAX_GOALS, goals));
            }
        }
        for xg in [self.home_xg, self.away_xg] {
            if !xg.is_finite() || xg < 0.0 {
                return Err(format!("expected goals must be a non-negative number, got {}", xg));
            }
        }
        Ok(())
    }

    /// Goals only, with zero xG (handy when xG is not tracked).
    pub fn score(home_goals: u32, away_goals: u32) -> Self {
        Self {
            home_goals,
            away_goals,
            home_xg: 0.0,
            away_xg: 0.0,
        }
    }

    pub fn outcome(&self) -> Outcome {
        match self.home_goals.cmp(&self.away_goals) {
            std::cmp::Ordering::Greater => Outcome::HomeWin,
            std::cmp::Ordering::Equal => Outcome::Draw,
            std::cmp::Ordering::Less => Outcome::AwayWin,
        }
    }

    /// League points for (home, away): win 3, draw 1, loss 0.
    pub fn points(&self) -> (u32, u32) {
        match self.outcome() {
            Outcome::HomeWin => (3, 0),
            Outcome::Draw => (1, 1),
            Outcome::AwayWin => (0, 3),
        }
    }
}

/// A scheduled game between two participants on one console in one round.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    pub id: GameId,
    pub round: u32,
    pub console: ConsoleId,
    pub home: Participant,
    pub away: Participant,
    /// Playoff tie this fixture is a leg of; `None` for league games.
    #[serde(default)]
    pub label: Option<MatchLabel>,
    /// `None` while unplayed.
    #[serde(default)]
    pub result: Option<MatchResult>,
}

impl Fixture {
    /// A league fixture between two known players.
    pub fn league(id: GameId, round: u32, console: ConsoleId, home: &str, away: &str) -> Self {
        Self {
            id,
            round,
            console,
            home: Participant::player(home),
            away: Participant::player(away),
            label: None,
            result: None,
        }
    }

    /// One leg of a playoff tie.
    pub fn playoff_leg(
        id: GameId,
        round: u32,
        console: ConsoleId,
        home: Participant,
        away: Participant,
        label: MatchLabel,
    ) -> Self {
        Self {
            id,
            round,
            console,
            home,
            away,
            label: Some(label),
            result: None,
        }
    }

    pub fn is_played(&self) -> bool {
        self.result.is_some()
    }

    /// Both participants are known players.
    pub fn is_resolved(&self) -> bool {
        !self.home.is_pending() && !self.away.is_pending()
    }

    pub fn involves(&self, name: &str) -> bool {
        self.home.name() == Some(name) || self.away.name() == Some(name)
    }
}
