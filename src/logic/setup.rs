//! Setup phase: start tournament (transition from Setup to League with a generated schedule).

use crate::logic::schedule::generate_league_schedule;
use crate::models::{names, Tournament, TournamentError, TournamentState};
use rand::Rng;

/// Start the tournament with the thread-local RNG.
pub fn start_tournament(tournament: &mut Tournament) -> Result<(), TournamentError> {
    start_tournament_with_rng(tournament, &mut rand::thread_rng())
}

/// Validate format and roster, generate the league schedule and move to League.
pub fn start_tournament_with_rng<R: Rng + ?Sized>(
    tournament: &mut Tournament,
    rng: &mut R,
) -> Result<(), TournamentError> {
    if tournament.state != TournamentState::Setup {
        return Err(TournamentError::InvalidState);
    }
    let config = &tournament.config;
    config.validate()?;
    if tournament.players.len() != config.num_players as usize {
        return Err(TournamentError::InvalidConfiguration(format!(
            "roster has {} players but the format expects {}",
            tournament.players.len(),
            config.num_players
        )));
    }
    for (i, p) in tournament.players.iter().enumerate() {
        if p.name.trim().is_empty() {
            return Err(TournamentError::InvalidConfiguration(
                "player name is required".to_string(),
            ));
        }
        if p.team.trim().is_empty() {
            return Err(TournamentError::MissingTeam(p.name.clone()));
        }
        if tournament.players[..i]
            .iter()
            .any(|q| q.name.trim().eq_ignore_ascii_case(p.name.trim()))
        {
            return Err(TournamentError::DuplicatePlayerName);
        }
    }

    let schedule = generate_league_schedule(
        &names(&tournament.players),
        config.games_per_player,
        config.num_consoles,
        rng,
    )?;
    log::info!(
        "Tournament {} started: {} players, {} league games",
        tournament.id,
        tournament.players.len(),
        schedule.len()
    );
    tournament.schedule = schedule;
    tournament.state = TournamentState::League;
    Ok(())
}
