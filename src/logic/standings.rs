//! Standings: aggregate played results into a ranked table.

use crate::models::{Fixture, Player, StandingRow, Tiebreaker};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Compute the ranked standings from scratch.
///
/// League fixtures give points (win 3, draw 1, loss 0), goals, xG, W/D/L and games played.
/// Playoff legs only count toward `playoff_played`. Unplayed fixtures are ignored.
/// Rows are sorted by points, then each tiebreaker in order (all descending); remaining
/// ties keep roster order.
pub fn compute_standings(
    players: &[Player],
    league: &[Fixture],
    playoffs: &[Fixture],
    tiebreakers: &[Tiebreaker],
) -> Vec<StandingRow> {
    let mut rows: Vec<StandingRow> = players
        .iter()
        .map(|p| StandingRow::new(p.name.clone(), p.team.clone()))
        .collect();
    let index: HashMap<&str, usize> = players
        .iter()
        .enumerate()
        .map(|(i, p)| (p.name.as_str(), i))
        .collect();

    for f in league {
        let Some(result) = f.result else { continue };
        let (Some(home), Some(away)) = (
            f.home.name().and_then(|n| index.get(n).copied()),
            f.away.name().and_then(|n| index.get(n).copied()),
        ) else {
            log::warn!("{} has a player who is not on the roster; skipped", f.id);
            continue;
        };
        let (home_points, away_points) = result.points();
        apply_side(&mut rows[home], home_points, result.home_goals, result.away_goals, result.home_xg, result.away_xg);
        apply_side(&mut rows[away], away_points, result.away_goals, result.home_goals, result.away_xg, result.home_xg);
    }

    for f in playoffs.iter().filter(|f| f.is_played()) {
        for name in [f.home.name(), f.away.name()].into_iter().flatten() {
            if let Some(&i) = index.get(name) {
                rows[i].playoff_played += 1;
            }
        }
    }

    sort_standings(&mut rows, tiebreakers);
    rows
}

fn apply_side(row: &mut StandingRow, points: u32, scored: u32, conceded: u32, xg_for: f64, xg_against: f64) {
    row.points += points;
    row.played += 1;
    row.goals_for = row.goals_for.saturating_add(scored);
    row.goals_against = row.goals_against.saturating_add(conceded);
    row.xg_for += xg_for;
    row.xg_against += xg_against;
    match points {
        3 => row.wins += 1,
        1 => row.draws += 1,
        _ => row.losses += 1,
    }
}

/// Stable sort by points then the tiebreakers, and renumber ranks from 1.
pub fn sort_standings(rows: &mut [StandingRow], tiebreakers: &[Tiebreaker]) {
    rows.sort_by(|a, b| {
        tiebreakers
            .iter()
            .fold(b.points.cmp(&a.points), |ord, tb| ord.then_with(|| compare(*tb, a, b)))
    });
    for (i, row) in rows.iter_mut().enumerate() {
        row.rank = i + 1;
    }
}

fn compare(tiebreaker: Tiebreaker, a: &StandingRow, b: &StandingRow) -> Ordering {
    match tiebreaker {
        Tiebreaker::GoalsFor => b.goals_for.cmp(&a.goals_for),
        Tiebreaker::XgFor => b.xg_for.total_cmp(&a.xg_for),
        Tiebreaker::Wins => b.wins.cmp(&a.wins),
        Tiebreaker::Draws => b.draws.cmp(&a.draws),
    }
}
