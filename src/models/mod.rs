//! Data structures for the tournament: players, fixtures, results, standings, tournament state.

mod config;
mod error;
mod fixture;
mod player;
mod standing;
mod tournament;

pub use config::{
    LeagueFormat, PlayoffFormat, Tiebreaker, TournamentConfig, MAX_CONSOLES, MAX_GAMES_PER_PLAYER,
    MAX_HALF_DURATION, MAX_PLAYERS, MIN_HALF_DURATION, MIN_PLAYERS,
};
pub use error::{ScheduleViolation, TournamentError};
pub use fixture::{
    ConsoleId, Fixture, GameId, MatchLabel, MatchResult, Outcome, Participant, Stage, MAX_GOALS,
};
pub use player::{names, team_of, Player, PlayerName};
pub use standing::StandingRow;
pub use tournament::{
    Tournament, TournamentId, TournamentMetadata, TournamentSnapshot, TournamentState,
};
