//! Tournament format parameters chosen at setup.

use crate::models::error::TournamentError;
use serde::{Deserialize, Serialize};

pub const MIN_PLAYERS: u32 = 6;
pub const MAX_PLAYERS: u32 = 20;
pub const MAX_CONSOLES: u32 = 4;
pub const MIN_HALF_DURATION: u32 = 4;
pub const MAX_HALF_DURATION: u32 = 6;
/// Four full round robins at the largest roster.
pub const MAX_GAMES_PER_PLAYER: u32 = 4 * (MAX_PLAYERS - 1);

/// How league fixtures are drawn.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeagueFormat {
    /// Round robin, bounded by the per-player games quota.
    #[default]
    PlayEveryone,
}

/// Shape of the playoff after the league.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayoffFormat {
    SingleElimination,
    /// Home-and-away ties in every round.
    #[default]
    DoubleElimination,
}

/// Secondary standings sort keys applied after points, in configured order.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tiebreaker {
    GoalsFor,
    XgFor,
    Wins,
    Draws,
}

/// Externally supplied tournament configuration. Call `validate` before use.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TournamentConfig {
    pub num_players: u32,
    pub num_consoles: u32,
    /// Minutes per half.
    pub half_duration: u32,
    pub games_per_player: u32,
    pub league_format: LeagueFormat,
    pub playoff_format: PlayoffFormat,
    pub tiebreakers: Vec<Tiebreaker>,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            num_players: 8,
            num_consoles: 2,
            half_duration: 5,
            games_per_player: 7,
            league_format: LeagueFormat::PlayEveryone,
            playoff_format: PlayoffFormat::DoubleElimination,
            tiebreakers: vec![Tiebreaker::GoalsFor, Tiebreaker::XgFor],
        }
    }
}

impl TournamentConfig {
    /// Check every field range and that `num_players * games_per_player` is even.
    pub fn validate(&self) -> Result<(), TournamentError> {
        let invalid = |msg: String| Err(TournamentError::InvalidConfiguration(msg));
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.num_players) {
            return invalid(format!(
                "number of players must be between {} and {} (got {})",
                MIN_PLAYERS, MAX_PLAYERS, self.num_players
            ));
        }
        if !(1..=MAX_CONSOLES).contains(&self.num_consoles) {
            return invalid(format!(
                "number of consoles must be between 1 and {} (got {})",
                MAX_CONSOLES, self.num_consoles
            ));
        }
        if !(MIN_HALF_DURATION..=MAX_HALF_DURATION).contains(&self.half_duration) {
            return invalid(format!(
                "half duration must be between {} and {} minutes (got {})",
                MIN_HALF_DURATION, MAX_HALF_DURATION, self.half_duration
            ));
        }
        if !(1..=MAX_GAMES_PER_PLAYER).contains(&self.games_per_player) {
            return invalid(format!(
                "games per player must be between 1 and {} (got {})",
                MAX_GAMES_PER_PLAYER, self.games_per_player
            ));
        }
        if (u64::from(self.num_players) * u64::from(self.games_per_player)) % 2 != 0 {
            return invalid(format!(
                "{} players x {} games per player is odd; select a different games-per-player value",
                self.num_players, self.games_per_player
            ));
        }
        for (i, tb) in self.tiebreakers.iter().enumerate() {
            if self.tiebreakers[..i].contains(tb) {
                return invalid(format!("tiebreaker {:?} listed more than once", tb));
            }
        }
        Ok(())
    }

    /// Total league fixtures the schedule must contain.
    pub fn total_league_games(&self) -> u32 {
        self.num_players.saturating_mul(self.games_per_player) / 2
    }
}
