//! Integration tests for standings: points, aggregates and tiebreaker ordering.

use couch_league::{
    compute_standings, ConsoleId, Fixture, GameId, MatchLabel, MatchResult, Participant, Player,
    StandingRow, Tiebreaker, MAX_GOALS,
};

fn players(names: &[&str]) -> Vec<Player> {
    names.iter().map(|n| Player::new(*n, format!("{n} FC"))).collect()
}

fn played(id: u32, home: &str, away: &str, result: MatchResult) -> Fixture {
    let mut f = Fixture::league(GameId(id), id, ConsoleId(1), home, away);
    f.result = Some(result);
    f
}

fn row<'a>(rows: &'a [StandingRow], player: &str) -> &'a StandingRow {
    rows.iter().find(|r| r.player == player).unwrap()
}

fn order(rows: &[StandingRow]) -> Vec<&str> {
    rows.iter().map(|r| r.player.as_str()).collect()
}

const DEFAULT_TIEBREAKERS: [Tiebreaker; 2] = [Tiebreaker::GoalsFor, Tiebreaker::XgFor];

#[test]
fn win_draw_loss_points_and_ranking() {
    let roster = players(&["A", "B", "C"]);
    let league = vec![
        played(1, "A", "B", MatchResult::score(2, 1)),
        played(2, "B", "C", MatchResult::score(1, 1)),
        played(3, "C", "A", MatchResult::score(3, 0)),
    ];

    let rows = compute_standings(&roster, &league, &[], &DEFAULT_TIEBREAKERS);

    assert_eq!(order(&rows), vec!["C", "A", "B"]);
    assert_eq!(rows.iter().map(|r| r.rank).collect::<Vec<_>>(), vec![1, 2, 3]);

    let c = row(&rows, "C");
    assert_eq!((c.points, c.wins, c.draws, c.losses), (4, 1, 1, 0));
    assert_eq!((c.goals_for, c.goals_against), (4, 1));
    assert_eq!(c.goal_difference(), 3);
    assert_eq!(c.team, "C FC");

    let a = row(&rows, "A");
    assert_eq!((a.points, a.played, a.goals_for, a.goals_against), (3, 2, 2, 4));
    let b = row(&rows, "B");
    assert_eq!((b.points, b.wins, b.draws, b.losses), (1, 0, 1, 1));
}

#[test]
fn total_points_match_decisive_games_and_draws() {
    let roster = players(&["A", "B", "C", "D"]);
    let league = vec![
        played(1, "A", "B", MatchResult::score(1, 0)),
        played(2, "C", "D", MatchResult::score(2, 2)),
        played(3, "A", "C", MatchResult::score(0, 0)),
        played(4, "B", "D", MatchResult::score(0, 4)),
        played(5, "A", "D", MatchResult::score(3, 1)),
    ];
    let rows = compute_standings(&roster, &league, &[], &DEFAULT_TIEBREAKERS);
    let total: u32 = rows.iter().map(|r| r.points).sum();
    // 3 decisive games, 2 draws
    assert_eq!(total, 3 * 3 + 2 * 2);
    let goals_for: u32 = rows.iter().map(|r| r.goals_for).sum();
    let goals_against: u32 = rows.iter().map(|r| r.goals_against).sum();
    assert_eq!(goals_for, goals_against);
}

#[test]
fn unplayed_fixtures_do_not_count() {
    let roster = players(&["A", "B"]);
    let league = vec![
        played(1, "A", "B", MatchResult::score(1, 0)),
        Fixture::league(GameId(2), 2, ConsoleId(1), "B", "A"),
    ];
    let rows = compute_standings(&roster, &league, &[], &DEFAULT_TIEBREAKERS);
    assert_eq!(row(&rows, "A").played, 1);
    assert_eq!(row(&rows, "B").played, 1);
    assert_eq!(row(&rows, "A").points, 3);
}

#[test]
fn equal_rows_keep_roster_order() {
    let roster = players(&["Zed", "Amy", "Kim"]);
    let rows = compute_standings(&roster, &[], &[], &DEFAULT_TIEBREAKERS);
    assert_eq!(order(&rows), vec!["Zed", "Amy", "Kim"]);
    assert!(rows.iter().all(|r| r.points == 0 && r.played == 0));
}

#[test]
fn goals_then_xg_break_ties_in_configured_order() {
    let roster = players(&["A", "B", "C", "D"]);
    let league = vec![
        played(1, "A", "C", MatchResult::new(1, 0, 2.0, 0.25).unwrap()),
        played(2, "B", "D", MatchResult::new(3, 0, 0.5, 1.0).unwrap()),
    ];

    let rows = compute_standings(&roster, &league, &[], &[Tiebreaker::GoalsFor, Tiebreaker::XgFor]);
    assert_eq!(&order(&rows)[..2], &["B", "A"]);

    let rows = compute_standings(&roster, &league, &[], &[Tiebreaker::XgFor, Tiebreaker::GoalsFor]);
    assert_eq!(&order(&rows)[..2], &["A", "B"]);
    assert_eq!(row(&rows, "A").xg_for, 2.0);
    assert_eq!(row(&rows, "A").xg_against, 0.25);
}

#[test]
fn wins_and_draws_tiebreakers() {
    // A: one win. B: three draws. Both on 3 points.
    let roster = players(&["A", "B", "C", "D", "E"]);
    let league = vec![
        played(1, "A", "E", MatchResult::score(1, 0)),
        played(2, "B", "C", MatchResult::score(0, 0)),
        played(3, "D", "B", MatchResult::score(0, 0)),
        played(4, "B", "E", MatchResult::score(0, 0)),
    ];

    let rows = compute_standings(&roster, &league, &[], &[Tiebreaker::Wins]);
    assert_eq!(&order(&rows)[..2], &["A", "B"]);

    let rows = compute_standings(&roster, &league, &[], &[Tiebreaker::Draws]);
    assert_eq!(&order(&rows)[..2], &["B", "A"]);
}

#[test]
fn no_tiebreakers_falls_back_to_roster_order() {
    let roster = players(&["A", "B", "C"]);
    let league = vec![
        played(1, "C", "A", MatchResult::score(1, 0)),
        played(2, "B", "A", MatchResult::score(5, 0)),
    ];
    let rows = compute_standings(&roster, &league, &[], &[]);
    assert_eq!(order(&rows), vec!["B", "C", "A"]);
}

#[test]
fn playoff_legs_only_count_as_playoff_games() {
    let roster = players(&["A", "B"]);
    let league = vec![played(1, "A", "B", MatchResult::score(2, 0))];
    let mut leg = Fixture::playoff_leg(
        GameId(2),
        1,
        ConsoleId(1),
        Participant::player("B"),
        Participant::player("A"),
        MatchLabel::Final,
    );
    leg.result = Some(MatchResult::score(4, 0));
    let unplayed = Fixture::playoff_leg(
        GameId(3),
        2,
        ConsoleId(1),
        Participant::player("A"),
        Participant::player("B"),
        MatchLabel::Final,
    );

    let rows = compute_standings(&roster, &league, &[leg, unplayed], &DEFAULT_TIEBREAKERS);

    let a = row(&rows, "A");
    assert_eq!((a.points, a.played, a.playoff_played, a.goals_for), (3, 1, 1, 2));
    let b = row(&rows, "B");
    assert_eq!((b.points, b.played, b.playoff_played, b.goals_for), (0, 1, 1, 0));
}

#[test]
fn fixtures_with_unknown_players_are_skipped() {
    let roster = players(&["A", "B"]);
    let league = vec![
        played(1, "A", "B", MatchResult::score(1, 1)),
        played(2, "A", "Ghost", MatchResult::score(9, 0)),
    ];
    let rows = compute_standings(&roster, &league, &[], &DEFAULT_TIEBREAKERS);
    assert_eq!(rows.len(), 2);
    assert_eq!(row(&rows, "A").goals_for, 1);
}

#[test]
fn scores_above_the_goal_cap_are_refused() {
    assert!(MatchResult::new(MAX_GOALS, 0, 0.0, 0.0).is_ok());
    assert!(MatchResult::new(MAX_GOALS + 1, 0, 0.0, 0.0).is_err());
    assert!(MatchResult::new(0, u32::MAX, 0.0, 0.0).is_err());
}

#[test]
fn enormous_goal_totals_saturate_instead_of_overflowing() {
    let roster = players(&["A", "B"]);
    let league = vec![
        played(1, "A", "B", MatchResult::score(u32::MAX, 0)),
        played(2, "B", "A", MatchResult::score(0, 1)),
    ];
    let rows = compute_standings(&roster, &league, &[], &DEFAULT_TIEBREAKERS);

    let a = row(&rows, "A");
    assert_eq!(a.goals_for, u32::MAX);
    assert_eq!(a.points, 6);
    assert_eq!(row(&rows, "B").goals_against, u32::MAX);
}
