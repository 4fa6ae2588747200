//! Standings table row (derived from results, never stored on its own).

use crate::models::player::PlayerName;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StandingRow {
    /// 1-based position after sorting.
    pub rank: usize,
    pub player: PlayerName,
    pub team: String,
    pub points: u32,
    /// League games played.
    pub played: u32,
    pub playoff_played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub xg_for: f64,
    pub xg_against: f64,
}

impl StandingRow {
    pub fn new(player: impl Into<String>, team: impl Into<String>) -> Self {
        Self {
            player: player.into(),
            team: team.into(),
            ..Self::default()
        }
    }

    pub fn goal_difference(&self) -> i64 {
        i64::from(self.goals_for) - i64::from(self.goals_against)
    }
}
