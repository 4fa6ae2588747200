//! Persistence boundary: tournaments are loaded whole, mutated, and saved whole.

use crate::models::{Tournament, TournamentId, TournamentState};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Listing entry for a stored tournament.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct TournamentSummary {
    pub id: TournamentId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub state: TournamentState,
    pub players: usize,
}

impl TournamentSummary {
    fn of(t: &Tournament) -> Self {
        Self {
            id: t.id,
            name: t.name.clone(),
            created_at: t.created_at,
            state: t.state,
            players: t.players.len(),
        }
    }
}

/// Key-value store of full tournament states.
pub trait TournamentStore {
    fn load(&mut self, id: TournamentId) -> Option<Tournament>;
    fn save(&mut self, tournament: Tournament);
    fn remove(&mut self, id: TournamentId) -> Option<Tournament>;
    /// Summaries, newest first.
    fn list(&self) -> Vec<TournamentSummary>;
}

/// Per-tournament entry: tournament data + last activity time (for auto-cleanup).
struct StoredTournament {
    tournament: Tournament,
    last_activity: Instant,
}

/// In-memory store. Loading or saving an entry refreshes its activity time.
#[derive(Default)]
pub struct MemoryStore {
    entries: HashMap<TournamentId, StoredTournament>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop tournaments not touched for `timeout`. Returns how many were removed.
    pub fn evict_inactive(&mut self, timeout: Duration) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|_, entry| entry.last_activity.elapsed() < timeout);
        before - self.entries.len()
    }
}

impl TournamentStore for MemoryStore {
    fn load(&mut self, id: TournamentId) -> Option<Tournament> {
        let entry = self.entries.get_mut(&id)?;
        entry.last_activity = Instant::now();
        Some(entry.tournament.clone())
    }

    fn save(&mut self, tournament: Tournament) {
        self.entries.insert(
            tournament.id,
            StoredTournament {
                tournament,
                last_activity: Instant::now(),
            },
        );
    }

    fn remove(&mut self, id: TournamentId) -> Option<Tournament> {
        self.entries.remove(&id).map(|e| e.tournament)
    }

    fn list(&self) -> Vec<TournamentSummary> {
        let mut summaries: Vec<TournamentSummary> = self
            .entries
            .values()
            .map(|e| TournamentSummary::of(&e.tournament))
            .collect();
        summaries.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        summaries
    }
}
