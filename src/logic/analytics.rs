//! Post-event statistics: headline numbers, per-player performance, head-to-heads and
//! final playoff placements.

use crate::logic::playoffs::champion;
use crate::models::{Fixture, PlayerName, Stage};
use serde::Serialize;
use std::cmp::Reverse;
use std::collections::BTreeMap;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct KpiSummary {
    pub total_games: usize,
    pub total_goals: u32,
    pub avg_goals_per_game: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PlayerPerformance {
    pub player: PlayerName,
    pub games: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub xg_for: f64,
    pub xg_against: f64,
    pub points: u32,
    /// Wins / games, rounded to two decimals.
    pub win_rate: f64,
}

/// All games with the same home and away player.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct MatchupRecord {
    pub home: PlayerName,
    pub away: PlayerName,
    pub games: u32,
    pub total_goals: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Analysis {
    pub kpi_summary: KpiSummary,
    /// Sorted by player name.
    pub overall: Vec<PlayerPerformance>,
    pub matchups: Vec<MatchupRecord>,
}

/// Summarise every played fixture with two known players.
pub fn basic_analysis(fixtures: &[Fixture]) -> Analysis {
    let mut overall: BTreeMap<PlayerName, PlayerPerformance> = BTreeMap::new();
    let mut matchups: BTreeMap<(PlayerName, PlayerName), MatchupRecord> = BTreeMap::new();
    let mut total_games = 0;
    let mut total_goals: u32 = 0;

    for f in fixtures {
        let (Some(result), Some(home), Some(away)) = (f.result, f.home.name(), f.away.name()) else {
            continue;
        };
        total_games += 1;
        let goals = result.home_goals.saturating_add(result.away_goals);
        total_goals = total_goals.saturating_add(goals);

        let (home_points, away_points) = result.points();
        let sides = [
            (home, home_points, result.home_goals, result.away_goals, result.home_xg, result.away_xg),
            (away, away_points, result.away_goals, result.home_goals, result.away_xg, result.home_xg),
        ];
        for (name, points, scored, conceded, xg_for, xg_against) in sides {
            let perf = overall.entry(name.to_string()).or_insert_with(|| PlayerPerformance {
                player: name.to_string(),
                ..PlayerPerformance::default()
            });
            perf.games += 1;
            perf.points += points;
            perf.goals_for = perf.goals_for.saturating_add(scored);
            perf.goals_against = perf.goals_against.saturating_add(conceded);
            perf.xg_for += xg_for;
            perf.xg_against += xg_against;
            match scored.cmp(&conceded) {
                std::cmp::Ordering::Greater => perf.wins += 1,
                std::cmp::Ordering::Equal => perf.draws += 1,
                std::cmp::Ordering::Less => perf.losses += 1,
            }
        }

        let record = matchups
            .entry((home.to_string(), away.to_string()))
            .or_insert_with(|| MatchupRecord {
                home: home.to_string(),
                away: away.to_string(),
                games: 0,
                total_goals: 0,
            });
        record.games += 1;
        record.total_goals = record.total_goals.saturating_add(goals);
    }

    let overall = overall
        .into_values()
        .map(|mut p| {
            p.win_rate = (f64::from(p.wins) / f64::from(p.games) * 100.0).round() / 100.0;
            p
        })
        .collect();

    Analysis {
        kpi_summary: KpiSummary {
            total_games,
            total_goals,
            avg_goals_per_game: if total_games == 0 {
                0.0
            } else {
                f64::from(total_goals) / total_games as f64
            },
        },
        overall,
        matchups: matchups.into_values().collect(),
    }
}

/// Where a player finished in the playoffs.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlayoffPlacement {
    pub rank: usize,
    pub player: PlayerName,
    /// Furthest stage the player was drawn into.
    pub reached: Stage,
    pub champion: bool,
    pub games: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub xg_for: f64,
}

/// Rank playoff participants: champion first, then by furthest stage reached, then goals scored.
pub fn playoff_placements(playoffs: &[Fixture]) -> Vec<PlayoffPlacement> {
    let winner = champion(playoffs).ok();
    let mut placements: Vec<PlayoffPlacement> = Vec::new();

    for f in playoffs {
        let Some(label) = f.label else { continue };
        let sides = [(&f.home, true), (&f.away, false)];
        for (participant, is_home) in sides {
            let Some(name) = participant.name() else { continue };
            let idx = match placements.iter().position(|p| p.player == name) {
                Some(i) => i,
                None => {
                    placements.push(PlayoffPlacement {
                        rank: 0,
                        player: name.to_string(),
                        reached: label.stage(),
                        champion: winner.as_deref() == Some(name),
                        games: 0,
                        goals_for: 0,
                        goals_against: 0,
                        xg_for: 0.0,
                    });
                    placements.len() - 1
                }
            };
            let p = &mut placements[idx];
            p.reached = p.reached.max(label.stage());
            if let Some(r) = f.result {
                p.games += 1;
                let (scored, conceded, xg) = if is_home {
                    (r.home_goals, r.away_goals, r.home_xg)
                } else {
                    (r.away_goals, r.home_goals, r.away_xg)
                };
                p.goals_for = p.goals_for.saturating_add(scored);
                p.goals_against = p.goals_against.saturating_add(conceded);
                p.xg_for += xg;
            }
        }
    }

    placements.sort_by_key(|p| (Reverse(p.champion), Reverse(p.reached), Reverse(p.goals_for)));
    for (i, p) in placements.iter_mut().enumerate() {
        p.rank = i + 1;
    }
    placements
}
