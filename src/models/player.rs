//! Player and the team label they play with in one tournament.

use serde::{Deserialize, Serialize};

/// Players are identified by their (case-insensitively unique) name.
pub type PlayerName = String;

/// A player in the tournament, bound to one team for its duration.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub name: PlayerName,
    /// Display label of the team the player uses (need not be unique).
    pub team: String,
}

impl Player {
    pub fn new(name: impl Into<String>, team: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            team: team.into(),
        }
    }
}

/// Team label for `name`, if the player is on the roster.
pub fn team_of<'a>(players: &'a [Player], name: &str) -> Option<&'a str> {
    players
        .iter()
        .find(|p| p.name == name)
        .map(|p| p.team.as_str())
}

/// Roster names in roster order.
pub fn names(players: &[Player]) -> Vec<PlayerName> {
    players.iter().map(|p| p.name.clone()).collect()
}
