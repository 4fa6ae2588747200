//! Integration tests for the tournament lifecycle: setup, league, playoffs, snapshot.

use couch_league::{
    playoff_placements, record_league_result, record_result, reset_playoffs, start_playoffs,
    start_tournament_with_rng, Fixture, GameId, MatchLabel, MatchResult, Participant,
    Player, PlayoffFormat, Stage, Tournament, TournamentConfig, TournamentError, TournamentSnapshot,
    TournamentState,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn six_player_config() -> TournamentConfig {
    TournamentConfig {
        num_players: 6,
        num_consoles: 1,
        half_duration: 5,
        games_per_player: 5,
        playoff_format: PlayoffFormat::DoubleElimination,
        ..TournamentConfig::default()
    }
}

fn setup_tournament() -> Tournament {
    let mut t = Tournament::new("Friday Cup", six_player_config());
    for i in 1..=6 {
        t.add_player(&format!("P{i}"), &format!("Team {i}")).unwrap();
    }
    t
}

fn started_tournament() -> Tournament {
    let mut t = setup_tournament();
    start_tournament_with_rng(&mut t, &mut StdRng::seed_from_u64(7)).unwrap();
    t
}

fn seed_of(participant: &Participant) -> u32 {
    participant.name().unwrap()[1..].parse().unwrap()
}

/// The lower-numbered player wins 2-0.
fn favourite_wins(f: &Fixture) -> MatchResult {
    if seed_of(&f.home) < seed_of(&f.away) {
        MatchResult::new(2, 0, 1.5, 0.5).unwrap()
    } else {
        MatchResult::new(0, 2, 0.5, 1.5).unwrap()
    }
}

fn play_league(t: &mut Tournament, skip_last: bool) {
    let fixtures = t.schedule.clone();
    let take = if skip_last { fixtures.len() - 1 } else { fixtures.len() };
    for f in &fixtures[..take] {
        record_league_result(t, f.id, favourite_wins(f)).unwrap();
    }
}

fn leg_ids(t: &Tournament, label: MatchLabel) -> Vec<GameId> {
    t.playoffs
        .iter()
        .filter(|f| f.label == Some(label))
        .map(|f| f.id)
        .collect()
}

fn first_leg(t: &Tournament, label: MatchLabel) -> (String, String) {
    let f = t.playoffs.iter().find(|f| f.label == Some(label)).unwrap();
    (f.home.to_string(), f.away.to_string())
}

fn pair(home: &str, away: &str) -> (String, String) {
    (home.to_string(), away.to_string())
}

/// Home side of the first leg wins both legs.
fn first_leg_home_wins(t: &mut Tournament, label: MatchLabel) {
    let ids = leg_ids(t, label);
    record_result(t, ids[0], MatchResult::score(2, 1)).unwrap();
    record_result(t, ids[1], MatchResult::score(0, 1)).unwrap();
}

#[test]
fn six_players_on_one_console_play_fifteen_league_games() {
    let t = started_tournament();
    assert_eq!(t.state, TournamentState::League);
    assert_eq!(t.schedule.len(), 15);
    for (i, f) in t.schedule.iter().enumerate() {
        assert_eq!(f.id, GameId(i as u32 + 1));
        assert_eq!(f.round, i as u32 + 1);
    }
    for i in 1..=6 {
        let name = format!("P{i}");
        assert_eq!(t.schedule.iter().filter(|f| f.involves(&name)).count(), 5);
    }
}

#[test]
fn full_tournament_from_league_to_champion() {
    let mut t = started_tournament();

    play_league(&mut t, true);
    let last = t.schedule.last().unwrap().id;
    match start_playoffs(&mut t) {
        Err(TournamentError::IncompleteResultSet { label, outstanding }) => {
            assert_eq!(label, None);
            assert_eq!(outstanding, vec![last]);
        }
        other => panic!("expected incomplete league, got {other:?}"),
    }

    let f = t.schedule.last().unwrap().clone();
    record_league_result(&mut t, f.id, favourite_wins(&f)).unwrap();
    assert!(t.league_complete());

    let standings = t.standings();
    let order: Vec<&str> = standings.iter().map(|r| r.player.as_str()).collect();
    assert_eq!(order, vec!["P1", "P2", "P3", "P4", "P5", "P6"]);
    assert_eq!(standings[0].points, 15);
    assert_eq!(standings[5].points, 0);

    start_playoffs(&mut t).unwrap();
    assert_eq!(t.state, TournamentState::Playoffs);
    assert_eq!(t.playoffs.len(), 10);
    assert_eq!(t.playoffs[0].id, GameId(16));
    assert_eq!(t.playoffs[9].id, GameId(25));
    assert_eq!(first_leg(&t, MatchLabel::Wildcard1), pair("P3", "P6"));
    assert_eq!(first_leg(&t, MatchLabel::Wildcard2), pair("P4", "P5"));
    assert_eq!(first_leg(&t, MatchLabel::Semifinal1), pair("P1", "Winner WC2"));
    assert_eq!(first_leg(&t, MatchLabel::Semifinal2), pair("P2", "Winner WC1"));

    // league results are frozen once the bracket exists
    assert!(matches!(
        record_result(&mut t, GameId(1), MatchResult::score(0, 0)),
        Err(TournamentError::InvalidState)
    ));

    first_leg_home_wins(&mut t, MatchLabel::Wildcard2);
    assert_eq!(first_leg(&t, MatchLabel::Semifinal1), pair("P1", "Winner WC2"));

    first_leg_home_wins(&mut t, MatchLabel::Wildcard1);
    assert_eq!(first_leg(&t, MatchLabel::Semifinal1), pair("P1", "P4"));
    assert_eq!(first_leg(&t, MatchLabel::Semifinal2), pair("P2", "P3"));

    first_leg_home_wins(&mut t, MatchLabel::Semifinal1);
    first_leg_home_wins(&mut t, MatchLabel::Semifinal2);
    assert_eq!(first_leg(&t, MatchLabel::Final), pair("P1", "P2"));
    assert_eq!(t.state, TournamentState::Playoffs);

    let final_legs = leg_ids(&t, MatchLabel::Final);
    record_result(&mut t, final_legs[0], MatchResult::score(1, 1)).unwrap();
    record_result(&mut t, final_legs[1], MatchResult::score(2, 0)).unwrap();
    assert_eq!(t.state, TournamentState::Completed);
    assert_eq!(t.champion.as_deref(), Some("P2"));

    let standings = t.standings();
    let p1 = standings.iter().find(|r| r.player == "P1").unwrap();
    assert_eq!((p1.points, p1.played, p1.playoff_played), (15, 5, 4));
    let p6 = standings.iter().find(|r| r.player == "P6").unwrap();
    assert_eq!(p6.playoff_played, 2);

    let placements = playoff_placements(&t.playoffs);
    assert_eq!(placements.len(), 6);
    assert_eq!(placements[0].player, "P2");
    assert!(placements[0].champion);
    assert_eq!(placements[1].player, "P1");
    assert_eq!(placements[1].reached, Stage::Final);
    assert!(placements[2..4].iter().all(|p| p.reached == Stage::Semifinals));
    assert!(placements[4..].iter().all(|p| p.reached == Stage::Wildcards));
}

#[test]
fn snapshot_restores_the_same_tournament() {
    let mut t = started_tournament();
    play_league(&mut t, false);
    start_playoffs(&mut t).unwrap();
    first_leg_home_wins(&mut t, MatchLabel::Wildcard1);

    let snapshot = t.snapshot();
    assert_eq!(snapshot.metadata.id, t.id);
    assert_eq!(snapshot.standings, t.standings());
    assert_eq!(snapshot.playoff_results.len(), 10);

    let json = serde_json::to_string(&snapshot).unwrap();
    let restored: TournamentSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(Tournament::from_snapshot(restored), t);
}

#[test]
fn league_results_can_be_overwritten() {
    let mut t = started_tournament();
    let id = t.schedule[0].id;
    record_league_result(&mut t, id, MatchResult::score(5, 0)).unwrap();
    record_league_result(&mut t, id, MatchResult::score(0, 0)).unwrap();

    assert_eq!(t.league_fixture(id).unwrap().result, Some(MatchResult::score(0, 0)));
    let standings = t.standings();
    assert_eq!(standings.iter().map(|r| r.points).sum::<u32>(), 2);
    assert!(matches!(
        record_league_result(&mut t, GameId(99), MatchResult::score(1, 0)),
        Err(TournamentError::GameNotFound(GameId(99)))
    ));
}

#[test]
fn resetting_the_playoffs_reopens_league_results() {
    let mut t = started_tournament();
    play_league(&mut t, false);
    start_playoffs(&mut t).unwrap();

    reset_playoffs(&mut t).unwrap();
    assert_eq!(t.state, TournamentState::League);
    record_league_result(&mut t, GameId(1), MatchResult::score(3, 3)).unwrap();
    start_playoffs(&mut t).unwrap();
    assert_eq!(t.playoffs[0].id, GameId(16));
}

#[test]
fn roster_changes_only_during_setup() {
    let mut t = Tournament::new("Cup", six_player_config());
    t.add_player("Ana", "Arsenal").unwrap();
    assert!(matches!(
        t.add_player(" ana ", "Chelsea"),
        Err(TournamentError::DuplicatePlayerName)
    ));
    assert!(matches!(
        t.add_player("Bo", "  "),
        Err(TournamentError::MissingTeam(_))
    ));
    assert!(matches!(
        t.add_player("", "Chelsea"),
        Err(TournamentError::InvalidConfiguration(_))
    ));
    assert!(matches!(
        t.remove_player("Cy"),
        Err(TournamentError::PlayerNotFound(_))
    ));
    t.remove_player("Ana").unwrap();
    assert!(t.players.is_empty());

    let mut t = started_tournament();
    assert!(matches!(t.add_player("P7", "Team 7"), Err(TournamentError::InvalidState)));
    assert!(matches!(t.remove_player("P1"), Err(TournamentError::InvalidState)));
    assert!(matches!(
        t.set_config(TournamentConfig::default()),
        Err(TournamentError::InvalidState)
    ));
}

#[test]
fn starting_needs_a_roster_matching_the_format() {
    let mut t = Tournament::new("Cup", six_player_config());
    for i in 1..=5 {
        t.add_player(&format!("P{i}"), "Team").unwrap();
    }
    let mut rng = StdRng::seed_from_u64(1);
    assert!(matches!(
        start_tournament_with_rng(&mut t, &mut rng),
        Err(TournamentError::InvalidConfiguration(_))
    ));
    assert_eq!(t.state, TournamentState::Setup);

    assert!(matches!(
        t.set_config(TournamentConfig {
            num_players: 7,
            games_per_player: 3,
            ..six_player_config()
        }),
        Err(TournamentError::InvalidConfiguration(_))
    ));

    let mut t = started_tournament();
    assert!(matches!(
        start_tournament_with_rng(&mut t, &mut rng),
        Err(TournamentError::InvalidState)
    ));
}

#[test]
fn restart_keeps_roster_and_format() {
    let mut t = started_tournament();
    play_league(&mut t, false);
    start_playoffs(&mut t).unwrap();

    t.restart().unwrap();
    assert_eq!(t.state, TournamentState::Setup);
    assert!(t.schedule.is_empty());
    assert!(t.playoffs.is_empty());
    assert_eq!(t.players.len(), 6);
    assert_eq!(t.config, six_player_config());
    assert!(matches!(t.restart(), Err(TournamentError::InvalidState)));

    start_tournament_with_rng(&mut t, &mut StdRng::seed_from_u64(9)).unwrap();
    assert_eq!(t.schedule.len(), 15);
}

#[test]
fn starting_checks_a_roster_built_without_add_player() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut roster: Vec<Player> = (1..=6)
        .map(|i| Player::new(format!("P{i}"), format!("Team {i}")))
        .collect();

    roster[2].name = "  ".to_string();
    let mut t = Tournament::with_players("Cup", six_player_config(), roster.clone());
    assert!(matches!(
        start_tournament_with_rng(&mut t, &mut rng),
        Err(TournamentError::InvalidConfiguration(_))
    ));
    assert!(t.schedule.is_empty());

    roster[2].name = "p1".to_string();
    let mut t = Tournament::with_players("Cup", six_player_config(), roster);
    assert!(matches!(
        start_tournament_with_rng(&mut t, &mut rng),
        Err(TournamentError::DuplicatePlayerName)
    ));
    assert_eq!(t.state, TournamentState::Setup);
}
