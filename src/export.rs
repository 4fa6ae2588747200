//! CSV export of standings and fixtures for archiving.

use crate::models::{team_of, Fixture, Player, StandingRow};
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct StandingRecord<'a> {
    #[serde(rename = "Rank")]
    rank: usize,
    #[serde(rename = "Player")]
    player: &'a str,
    #[serde(rename = "Team")]
    team: &'a str,
    #[serde(rename = "Points")]
    points: u32,
    #[serde(rename = "Played")]
    played: u32,
    #[serde(rename = "Wins")]
    wins: u32,
    #[serde(rename = "Draws")]
    draws: u32,
    #[serde(rename = "Losses")]
    losses: u32,
    #[serde(rename = "Goals")]
    goals_for: u32,
    #[serde(rename = "Goals Against")]
    goals_against: u32,
    #[serde(rename = "xG")]
    xg_for: String,
}

#[derive(Serialize)]
struct FixtureRecord {
    #[serde(rename = "Game #")]
    game: String,
    #[serde(rename = "Round")]
    round: u32,
    #[serde(rename = "Console")]
    console: String,
    #[serde(rename = "Match")]
    label: String,
    #[serde(rename = "Home")]
    home: String,
    #[serde(rename = "Away")]
    away: String,
    #[serde(rename = "Home Team")]
    home_team: String,
    #[serde(rename = "Away Team")]
    away_team: String,
    #[serde(rename = "Home Goals")]
    home_goals: Option<u32>,
    #[serde(rename = "Away Goals")]
    away_goals: Option<u32>,
    #[serde(rename = "Home xG")]
    home_xg: Option<f64>,
    #[serde(rename = "Away xG")]
    away_xg: Option<f64>,
}

/// Write the standings table as CSV (xG rounded to two decimals).
pub fn write_standings_csv<W: Write>(rows: &[StandingRow], writer: W) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in rows {
        wtr.serialize(StandingRecord {
            rank: row.rank,
            player: &row.player,
            team: &row.team,
            points: row.points,
            played: row.played,
            wins: row.wins,
            draws: row.draws,
            losses: row.losses,
            goals_for: row.goals_for,
            goals_against: row.goals_against,
            xg_for: format!("{:.2}", row.xg_for),
        })?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write fixtures (league or playoff) as CSV; unplayed games have empty score cells.
pub fn write_fixtures_csv<W: Write>(
    fixtures: &[Fixture],
    players: &[Player],
    writer: W,
) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    let team = |p: &crate::models::Participant| {
        p.name()
            .and_then(|n| team_of(players, n))
            .unwrap_or_default()
            .to_string()
    };
    for f in fixtures {
        wtr.serialize(FixtureRecord {
            game: f.id.to_string(),
            round: f.round,
            console: f.console.to_string(),
            label: f.label.map(|l| l.to_string()).unwrap_or_default(),
            home: f.home.to_string(),
            away: f.away.to_string(),
            home_team: team(&f.home),
            away_team: team(&f.away),
            home_goals: f.result.map(|r| r.home_goals),
            away_goals: f.result.map(|r| r.away_goals),
            home_xg: f.result.map(|r| r.home_xg),
            away_xg: f.result.map(|r| r.away_xg),
        })?;
    }
    wtr.flush()?;
    Ok(())
}
