//! TournamentError and ScheduleViolation.

use crate::models::fixture::{ConsoleId, GameId, MatchLabel};
use crate::models::player::PlayerName;
use std::fmt;

/// One broken schedule invariant, found by `validate_schedule`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ScheduleViolation {
    /// A player appears in more than one fixture of a round (or against themselves).
    PlayerConflict { round: u32, player: PlayerName },
    /// Two fixtures of a round share a console.
    ConsoleConflict { round: u32, console: ConsoleId },
    /// A fixture uses a console number outside `1..=num_consoles`.
    ConsoleOutOfRange { round: u32, console: ConsoleId },
    /// More fixtures in a round than there are consoles.
    RoundOverCapacity { round: u32, games: usize, consoles: u32 },
    /// A fixture names a player who is not on the roster.
    UnknownPlayer { round: u32, player: PlayerName },
    /// A player's total games differs from the quota.
    QuotaMismatch { player: PlayerName, expected: u32, actual: u32 },
}

impl fmt::Display for ScheduleViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleViolation::PlayerConflict { round, player } => {
                write!(f, "Round {}: player {} is scheduled more than once", round, player)
            }
            ScheduleViolation::ConsoleConflict { round, console } => {
                write!(f, "Round {}: {} is used more than once", round, console)
            }
            ScheduleViolation::ConsoleOutOfRange { round, console } => {
                write!(f, "Round {}: {} does not exist", round, console)
            }
            ScheduleViolation::RoundOverCapacity { round, games, consoles } => write!(
                f,
                "Round {}: {} games scheduled for {} consoles",
                round, games, consoles
            ),
            ScheduleViolation::UnknownPlayer { round, player } => {
                write!(f, "Round {}: {} is not on the roster", round, player)
            }
            ScheduleViolation::QuotaMismatch { player, expected, actual } => write!(
                f,
                "{} has {} games scheduled, expected {}",
                player, actual, expected
            ),
        }
    }
}

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// Player/console/quota combination or format value cannot yield a valid tournament.
    InvalidConfiguration(String),
    /// Matchup generation ran out of placeable pairs before every quota was met.
    SchedulingInfeasible { placed: usize, required: usize },
    /// Every broken invariant found in a generated schedule.
    ScheduleIntegrityViolation(Vec<ScheduleViolation>),
    /// Playoffs need a top 6.
    InsufficientPlayers { found: usize },
    /// Standings rows do not carry ranks 1..=n.
    InvalidStandings(String),
    /// Legs of a tie (or league games) are still unplayed.
    IncompleteResultSet {
        label: Option<MatchLabel>,
        outstanding: Vec<GameId>,
    },
    /// A tie still has a placeholder participant.
    UnresolvedParticipants(MatchLabel),
    /// The legs of a tie are not between the same two players.
    MismatchedLegs(MatchLabel),
    /// The tie fed by this one already has played legs.
    DownstreamInProgress(MatchLabel),
    /// A submitted score is not acceptable (e.g. negative xG).
    InvalidResult(String),
    /// Tournament is not in a state that allows this action.
    InvalidState,
    GameNotFound(GameId),
    PlayerNotFound(PlayerName),
    /// A player with this name already exists (names are unique, case-insensitive).
    DuplicatePlayerName,
    /// A player was added without a team name.
    MissingTeam(PlayerName),
}

fn join_ids(ids: &[GameId]) -> String {
    ids.iter().map(|id| id.to_string()).collect::<Vec<_>>().join(", ")
}

impl fmt::Display for TournamentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TournamentError::InvalidConfiguration(msg) => write!(f, "Invalid configuration: {}", msg),
            TournamentError::SchedulingInfeasible { placed, required } => write!(
                f,
                "Could not schedule every game ({} of {} placed); try a different games-per-player value",
                placed, required
            ),
            TournamentError::ScheduleIntegrityViolation(violations) => {
                write!(f, "Schedule has {} problem(s): ", violations.len())?;
                let msgs: Vec<String> = violations.iter().map(|v| v.to_string()).collect();
                write!(f, "{}", msgs.join("; "))
            }
            TournamentError::InsufficientPlayers { found } => {
                write!(f, "Need at least 6 ranked players for playoffs (found {})", found)
            }
            TournamentError::InvalidStandings(msg) => write!(f, "Invalid standings: {}", msg),
            TournamentError::IncompleteResultSet { label: Some(label), outstanding } => write!(
                f,
                "{} is not finished; outstanding games: {}",
                label,
                join_ids(outstanding)
            ),
            TournamentError::IncompleteResultSet { label: None, outstanding } => write!(
                f,
                "League is not finished; outstanding games: {}",
                join_ids(outstanding)
            ),
            TournamentError::UnresolvedParticipants(label) => {
                write!(f, "{} is waiting for the previous round", label)
            }
            TournamentError::MismatchedLegs(label) => {
                write!(f, "The legs of {} are not between the same players", label)
            }
            TournamentError::DownstreamInProgress(label) => write!(
                f,
                "The winner of {} is already playing in the next round",
                label
            ),
            TournamentError::InvalidResult(msg) => write!(f, "Invalid result: {}", msg),
            TournamentError::InvalidState => write!(f, "Invalid state for this action"),
            TournamentError::GameNotFound(id) => write!(f, "{} not found", id),
            TournamentError::PlayerNotFound(name) => write!(f, "Player {} not found", name),
            TournamentError::DuplicatePlayerName => write!(f, "A player with this name already exists"),
            TournamentError::MissingTeam(name) => write!(f, "Player {} has no team", name),
        }
    }
}

impl std::error::Error for TournamentError {}
