//! Integration tests for the in-memory tournament store.

use couch_league::{MemoryStore, Tournament, TournamentConfig, TournamentState, TournamentStore};
use std::time::Duration;

#[test]
fn saved_tournaments_load_back_unchanged() {
    let mut store = MemoryStore::new();
    let mut t = Tournament::new("Cup", TournamentConfig::default());
    t.add_player("Ana", "Arsenal").unwrap();
    let id = t.id;
    store.save(t.clone());

    assert_eq!(store.len(), 1);
    assert_eq!(store.load(id), Some(t));
    assert!(store.load(uuid::Uuid::new_v4()).is_none());
}

#[test]
fn saving_again_replaces_the_stored_state() {
    let mut store = MemoryStore::new();
    let mut t = Tournament::new("Cup", TournamentConfig::default());
    store.save(t.clone());
    t.add_player("Bo", "Chelsea").unwrap();
    store.save(t.clone());

    assert_eq!(store.len(), 1);
    assert_eq!(store.load(t.id).unwrap().players.len(), 1);
}

#[test]
fn list_shows_newest_first() {
    let mut store = MemoryStore::new();
    let mut old = Tournament::new("Old", TournamentConfig::default());
    old.created_at = old.created_at - chrono::Duration::hours(2);
    let new = Tournament::new("New", TournamentConfig::default());
    store.save(old);
    store.save(new);

    let list = store.list();
    let names: Vec<&str> = list.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["New", "Old"]);
    assert!(list.iter().all(|s| s.state == TournamentState::Setup && s.players == 0));
}

#[test]
fn remove_and_evict() {
    let mut store = MemoryStore::new();
    let a = Tournament::new("A", TournamentConfig::default());
    let b = Tournament::new("B", TournamentConfig::default());
    let a_id = a.id;
    store.save(a);
    store.save(b);

    assert!(store.remove(a_id).is_some());
    assert!(store.remove(a_id).is_none());
    assert_eq!(store.evict_inactive(Duration::from_secs(3600)), 0);
    assert_eq!(store.evict_inactive(Duration::ZERO), 1);
    assert!(store.is_empty());
}
