//! League phase: entering results.

use crate::logic::playoffs::record_playoff_result;
use crate::models::{GameId, MatchResult, Tournament, TournamentError, TournamentState};

/// Upsert the result of a league game (League only; reset the playoffs to edit later).
pub fn record_league_result(
    tournament: &mut Tournament,
    id: GameId,
    result: MatchResult,
) -> Result<(), TournamentError> {
    if tournament.state != TournamentState::League {
        return Err(TournamentError::InvalidState);
    }
    result.check().map_err(TournamentError::InvalidResult)?;
    tournament.set_league_result(id, result)?;
    log::debug!(
        "{}: {}-{} recorded ({} league games left)",
        id,
        result.home_goals,
        result.away_goals,
        tournament.outstanding_league_games().len()
    );
    Ok(())
}

/// Record a result for any game id, league or playoff.
pub fn record_result(
    tournament: &mut Tournament,
    id: GameId,
    result: MatchResult,
) -> Result<(), TournamentError> {
    if tournament.league_fixture(id).is_some() {
        record_league_result(tournament, id, result)
    } else if tournament.playoff_fixture(id).is_some() {
        record_playoff_result(tournament, id, result)
    } else {
        Err(TournamentError::GameNotFound(id))
    }
}
