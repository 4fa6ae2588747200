//! Tournament, TournamentState and the persisted TournamentSnapshot.

use crate::logic::compute_standings;
use crate::models::config::TournamentConfig;
use crate::models::error::TournamentError;
use crate::models::fixture::{Fixture, GameId, MatchResult};
use crate::models::player::{Player, PlayerName};
use crate::models::standing::StandingRow;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Current phase of the tournament.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentState {
    /// Adding players and choosing the format; no schedule yet.
    #[default]
    Setup,
    /// League schedule generated; results being entered.
    League,
    /// Bracket generated from final league standings.
    Playoffs,
    /// Final decided; `champion` is set.
    Completed,
}

/// Full tournament state: roster, format, league and playoff fixtures.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub config: TournamentConfig,
    pub players: Vec<Player>,
    /// League fixtures with their results.
    pub schedule: Vec<Fixture>,
    /// Playoff legs with their results (empty until the bracket is generated).
    pub playoffs: Vec<Fixture>,
    pub state: TournamentState,
    pub champion: Option<PlayerName>,
}

/// Identity and format of a tournament, as handed to the persistence layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TournamentMetadata {
    pub id: TournamentId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub config: TournamentConfig,
    pub players: Vec<Player>,
    pub state: TournamentState,
}

/// Complete saved form of a tournament: metadata, results, standings and playoff results.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TournamentSnapshot {
    pub metadata: TournamentMetadata,
    pub schedule: Vec<Fixture>,
    pub standings: Vec<StandingRow>,
    pub playoff_results: Vec<Fixture>,
    pub champion: Option<PlayerName>,
}

impl Tournament {
    /// Create a new tournament in Setup state with no players.
    pub fn new(name: impl Into<String>, config: TournamentConfig) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            created_at: Utc::now(),
            config,
            players: Vec::new(),
            schedule: Vec::new(),
            playoffs: Vec::new(),
            state: TournamentState::Setup,
            champion: None,
        }
    }

    /// Create a tournament with an initial roster. Still in Setup until started.
    pub fn with_players(name: impl Into<String>, config: TournamentConfig, players: Vec<Player>) -> Self {
        Self {
            players,
            ..Self::new(name, config)
        }
    }

    /// Add a player with their team (Setup only). Names must be unique (case-insensitive).
    pub fn add_player(&mut self, name: &str, team: &str) -> Result<(), TournamentError> {
        if self.state != TournamentState::Setup {
            return Err(TournamentError::InvalidState);
        }
        let name = name.trim();
        if name.is_empty() {
            return Err(TournamentError::InvalidConfiguration(
                "player name is required".to_string(),
            ));
        }
        let team = team.trim();
        if team.is_empty() {
            return Err(TournamentError::MissingTeam(name.to_string()));
        }
        if self.players.iter().any(|p| p.name.eq_ignore_ascii_case(name)) {
            return Err(TournamentError::DuplicatePlayerName);
        }
        self.players.push(Player::new(name, team));
        Ok(())
    }

    /// Remove a player by name (Setup only).
    pub fn remove_player(&mut self, name: &str) -> Result<(), TournamentError> {
        if self.state != TournamentState::Setup {
            return Err(TournamentError::InvalidState);
        }
        let idx = self
            .players
            .iter()
            .position(|p| p.name == name)
            .ok_or_else(|| TournamentError::PlayerNotFound(name.to_string()))?;
        self.players.remove(idx);
        Ok(())
    }

    /// Replace the format (Setup only). The config is validated first.
    pub fn set_config(&mut self, config: TournamentConfig) -> Result<(), TournamentError> {
        if self.state != TournamentState::Setup {
            return Err(TournamentError::InvalidState);
        }
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Restart: back to Setup with the same roster and format. Discards all fixtures.
    pub fn restart(&mut self) -> Result<(), TournamentError> {
        if self.state == TournamentState::Setup {
            return Err(TournamentError::InvalidState);
        }
        self.schedule.clear();
        self.playoffs.clear();
        self.champion = None;
        self.state = TournamentState::Setup;
        Ok(())
    }

    /// League fixture by id.
    pub fn league_fixture(&self, id: GameId) -> Option<&Fixture> {
        self.schedule.iter().find(|f| f.id == id)
    }

    /// Playoff leg by id.
    pub fn playoff_fixture(&self, id: GameId) -> Option<&Fixture> {
        self.playoffs.iter().find(|f| f.id == id)
    }

    /// Upsert the result of a league fixture (last write wins).
    pub fn set_league_result(&mut self, id: GameId, result: MatchResult) -> Result<(), TournamentError> {
        let fixture = self
            .schedule
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or(TournamentError::GameNotFound(id))?;
        fixture.result = Some(result);
        Ok(())
    }

    /// Ids of league fixtures still without a result.
    pub fn outstanding_league_games(&self) -> Vec<GameId> {
        self.schedule
            .iter()
            .filter(|f| !f.is_played())
            .map(|f| f.id)
            .collect()
    }

    pub fn league_complete(&self) -> bool {
        !self.schedule.is_empty() && self.schedule.iter().all(Fixture::is_played)
    }

    /// Highest game id handed out so far (league or playoff).
    pub fn last_game_id(&self) -> Option<GameId> {
        self.schedule.iter().chain(self.playoffs.iter()).map(|f| f.id).max()
    }

    /// Next unused game id.
    pub fn next_game_id(&self) -> GameId {
        self.last_game_id().map_or(GameId::FIRST, GameId::next)
    }

    /// Current standings, recomputed from every result.
    pub fn standings(&self) -> Vec<StandingRow> {
        compute_standings(
            &self.players,
            &self.schedule,
            &self.playoffs,
            &self.config.tiebreakers,
        )
    }

    pub fn metadata(&self) -> TournamentMetadata {
        TournamentMetadata {
            id: self.id,
            name: self.name.clone(),
            created_at: self.created_at,
            config: self.config.clone(),
            players: self.players.clone(),
            state: self.state,
        }
    }

    /// Everything the persistence layer stores for this tournament.
    pub fn snapshot(&self) -> TournamentSnapshot {
        TournamentSnapshot {
            metadata: self.metadata(),
            schedule: self.schedule.clone(),
            standings: self.standings(),
            playoff_results: self.playoffs.clone(),
            champion: self.champion.clone(),
        }
    }

    /// Rebuild a tournament from a stored snapshot. Standings are recomputed on demand, not restored.
    pub fn from_snapshot(snapshot: TournamentSnapshot) -> Self {
        let TournamentSnapshot {
            metadata,
            schedule,
            playoff_results,
            champion,
            ..
        } = snapshot;
        Self {
            id: metadata.id,
            name: metadata.name,
            created_at: metadata.created_at,
            config: metadata.config,
            players: metadata.players,
            schedule,
            playoffs: playoff_results,
            state: metadata.state,
            champion,
        }
    }
}
