//! Tournament business logic: scheduling, standings, duration, playoffs, analytics.

mod analytics;
mod bracket;
mod duration;
mod league;
mod playoffs;
mod schedule;
mod setup;
mod standings;

pub use analytics::{
    basic_analysis, playoff_placements, Analysis, KpiSummary, MatchupRecord, PlayerPerformance,
    PlayoffPlacement,
};
pub use bracket::{generate_playoff_bracket, PLAYOFF_SPOTS};
pub use duration::{estimate_duration, DurationEstimate};
pub use league::{record_league_result, record_result};
pub use playoffs::{
    advance_stage, champion, determine_winner, legs, match_state, propagate_winners,
    record_playoff_result, reset_playoffs, start_playoffs, Advancement, DecidedBy, MatchState,
    TieSummary,
};
pub use schedule::{
    ensure_valid_schedule, generate_league_schedule, generate_league_schedule_default,
    validate_schedule,
};
pub use setup::{start_tournament, start_tournament_with_rng};
pub use standings::{compute_standings, sort_standings};
