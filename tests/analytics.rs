//! Integration tests for post-event statistics.

use couch_league::{basic_analysis, ConsoleId, Fixture, GameId, MatchLabel, MatchResult, Participant};

fn played(id: u32, home: &str, away: &str, result: MatchResult) -> Fixture {
    let mut f = Fixture::league(GameId(id), id, ConsoleId(1), home, away);
    f.result = Some(result);
    f
}

#[test]
fn summary_counts_only_played_games_between_known_players() {
    let mut pending = Fixture::playoff_leg(
        GameId(4),
        1,
        ConsoleId(1),
        Participant::player("A"),
        Participant::Pending(MatchLabel::Wildcard1),
        MatchLabel::Semifinal2,
    );
    pending.result = Some(MatchResult::score(9, 9));
    let fixtures = vec![
        played(1, "A", "B", MatchResult::new(2, 1, 1.0, 0.5).unwrap()),
        played(2, "B", "A", MatchResult::score(1, 1)),
        Fixture::league(GameId(3), 3, ConsoleId(1), "A", "B"),
        pending,
    ];

    let analysis = basic_analysis(&fixtures);

    assert_eq!(analysis.kpi_summary.total_games, 2);
    assert_eq!(analysis.kpi_summary.total_goals, 5);
    assert_eq!(analysis.kpi_summary.avg_goals_per_game, 2.5);

    let names: Vec<&str> = analysis.overall.iter().map(|p| p.player.as_str()).collect();
    assert_eq!(names, vec!["A", "B"]);
    let a = &analysis.overall[0];
    assert_eq!((a.games, a.wins, a.draws, a.losses), (2, 1, 1, 0));
    assert_eq!((a.goals_for, a.goals_against, a.points), (3, 2, 4));
    assert_eq!(a.xg_for, 1.0);
    assert_eq!(a.win_rate, 0.5);
    let b = &analysis.overall[1];
    assert_eq!((b.wins, b.draws, b.losses, b.points), (0, 1, 1, 1));
    assert_eq!(b.win_rate, 0.0);
}

#[test]
fn matchups_are_kept_per_home_and_away_order() {
    let fixtures = vec![
        played(1, "A", "B", MatchResult::score(2, 1)),
        played(2, "B", "A", MatchResult::score(1, 1)),
        played(3, "A", "B", MatchResult::score(0, 3)),
    ];
    let analysis = basic_analysis(&fixtures);

    assert_eq!(analysis.matchups.len(), 2);
    let ab = &analysis.matchups[0];
    assert_eq!((ab.home.as_str(), ab.away.as_str(), ab.games, ab.total_goals), ("A", "B", 2, 6));
    let ba = &analysis.matchups[1];
    assert_eq!((ba.home.as_str(), ba.away.as_str(), ba.games, ba.total_goals), ("B", "A", 1, 2));
}

#[test]
fn win_rate_is_rounded_to_two_decimals() {
    let fixtures = vec![
        played(1, "C", "D", MatchResult::score(1, 0)),
        played(2, "C", "E", MatchResult::score(1, 0)),
        played(3, "C", "F", MatchResult::score(0, 1)),
    ];
    let analysis = basic_analysis(&fixtures);
    let c = analysis.overall.iter().find(|p| p.player == "C").unwrap();
    assert_eq!(c.win_rate, 0.67);
}

#[test]
fn nothing_played_gives_an_empty_summary() {
    let analysis = basic_analysis(&[]);
    assert_eq!(analysis.kpi_summary.total_games, 0);
    assert_eq!(analysis.kpi_summary.avg_goals_per_game, 0.0);
    assert!(analysis.overall.is_empty());
    assert!(analysis.matchups.is_empty());
}
