//! Expected wall-clock length of a tournament, for display.

use crate::models::{PlayoffFormat, TournamentConfig, TournamentError};
use serde::Serialize;

/// Half-time break plus kick-off, in minutes.
const BREAK_MINUTES: u32 = 3;
/// Changeover buffer per round, in minutes.
const BUFFER_MINUTES_PER_ROUND: u32 = 2;
/// Team selection and controller setup per player per console, in minutes.
const MANAGEMENT_MINUTES: u32 = 2;

/// Breakdown of the estimate. All durations are in minutes.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct DurationEstimate {
    pub game_duration: u32,
    pub league_games: u32,
    pub league_rounds: u32,
    pub league_duration: u32,
    pub playoff_games: u32,
    pub playoff_rounds: u32,
    pub playoff_duration: u32,
    pub buffer_time: u32,
    pub management_time: u32,
    pub total_duration: u32,
}

impl DurationEstimate {
    /// Total as (hours, minutes).
    pub fn hours_and_minutes(&self) -> (u32, u32) {
        (self.total_duration / 60, self.total_duration % 60)
    }
}

fn rounds_for(games: u32, consoles: u32) -> u32 {
    games.div_ceil(consoles)
}

/// Estimate how long the tournament will take.
pub fn estimate_duration(config: &TournamentConfig) -> Result<DurationEstimate, TournamentError> {
    config.validate()?;
    let consoles = config.num_consoles;
    let game_duration = 2 * config.half_duration + BREAK_MINUTES;

    let league_games = config.total_league_games();
    let league_rounds = rounds_for(league_games, consoles);

    let (playoff_games, playoff_rounds) = match config.playoff_format {
        PlayoffFormat::SingleElimination => (7, rounds_for(7, consoles)),
        // Wildcards and semifinals are 4 legs each; the two final legs share one console.
        PlayoffFormat::DoubleElimination => (10, rounds_for(4, consoles) * 2 + 2),
    };

    let league_duration = league_rounds * game_duration;
    let playoff_duration = playoff_rounds * game_duration;
    let buffer_time = (league_rounds + playoff_rounds) * BUFFER_MINUTES_PER_ROUND;
    let management_time = config.num_players * consoles * MANAGEMENT_MINUTES;

    Ok(DurationEstimate {
        game_duration,
        league_games,
        league_rounds,
        league_duration,
        playoff_games,
        playoff_rounds,
        playoff_duration,
        buffer_time,
        management_time,
        total_duration: league_duration + playoff_duration + buffer_time + management_time,
    })
}
