//! Local multiplayer tournament organizer: library with models and business logic.

pub mod export;
pub mod logic;
pub mod models;
pub mod store;

pub use logic::{
    advance_stage, basic_analysis, champion, compute_standings, determine_winner,
    ensure_valid_schedule, estimate_duration, generate_league_schedule,
    generate_league_schedule_default, generate_playoff_bracket, match_state, playoff_placements,
    propagate_winners, record_league_result, record_playoff_result, record_result,
    reset_playoffs, start_playoffs, start_tournament, start_tournament_with_rng,
    validate_schedule, Advancement, Analysis, DecidedBy, DurationEstimate, MatchState,
    PlayoffPlacement, TieSummary,
};
pub use models::{
    ConsoleId, Fixture, GameId, LeagueFormat, MatchLabel, MatchResult, Participant, Player,
    PlayerName, PlayoffFormat, ScheduleViolation, Stage, StandingRow, Tiebreaker, Tournament,
    TournamentConfig, TournamentError, TournamentId, TournamentSnapshot, TournamentState,
    MAX_GAMES_PER_PLAYER, MAX_GOALS,
};
pub use store::{MemoryStore, TournamentStore, TournamentSummary};
