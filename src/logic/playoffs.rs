//! Playoff rounds: winner of each tie, advancing winners into placeholders, and the
//! tournament transitions around the bracket.

use crate::logic::bracket::generate_playoff_bracket;
use crate::models::{
    Fixture, GameId, MatchLabel, MatchResult, Participant, PlayerName, Stage, Tournament,
    TournamentError, TournamentState,
};
use serde::Serialize;

/// What settled a tie.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DecidedBy {
    /// Higher aggregate goals.
    Goals,
    /// Aggregate goals level; higher aggregate xG.
    ExpectedGoals,
    /// Goals and xG level; the first-leg home player (the higher seed) advances.
    Seeding,
}

/// Aggregate of a decided tie. `home`/`away` are the first leg's sides.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TieSummary {
    pub label: MatchLabel,
    pub home: PlayerName,
    pub away: PlayerName,
    pub home_goals: u32,
    pub away_goals: u32,
    pub home_xg: f64,
    pub away_xg: f64,
    pub winner: PlayerName,
    pub decided_by: DecidedBy,
}

/// Progress of one tie.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchState {
    /// No legs exist (bracket not generated, or reset).
    Unscheduled,
    /// Legs exist, none played.
    Scheduled,
    /// Some legs played, or the winner is known but still waiting to be written
    /// into the next tie (the other tie of the stage is undecided).
    InProgress,
    /// Winner determined and written into the next tie (the final needs no next tie).
    Resolved,
}

/// A winner written into the next round's placeholders.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Advancement {
    pub from: MatchLabel,
    pub winner: PlayerName,
    /// Participant cells rewritten.
    pub slots: usize,
}

/// Legs of one tie, in bracket order.
pub fn legs(playoffs: &[Fixture], label: MatchLabel) -> Vec<&Fixture> {
    playoffs.iter().filter(|f| f.label == Some(label)).collect()
}

/// Decide a tie over all its legs.
///
/// Each player's aggregate is their home goals when at home plus their away goals when
/// away. Higher aggregate goals wins; then higher aggregate xG; then the first-leg
/// home player. Fails if a leg is unplayed or a participant is still a placeholder.
pub fn determine_winner(playoffs: &[Fixture], label: MatchLabel) -> Result<TieSummary, TournamentError> {
    let legs = legs(playoffs, label);
    let first = legs.first().ok_or(TournamentError::IncompleteResultSet {
        label: Some(label),
        outstanding: Vec::new(),
    })?;
    let (Some(a), Some(b)) = (first.home.name(), first.away.name()) else {
        return Err(TournamentError::UnresolvedParticipants(label));
    };
    if legs.iter().any(|f| !f.is_resolved()) {
        return Err(TournamentError::UnresolvedParticipants(label));
    }
    let outstanding: Vec<GameId> = legs.iter().filter(|f| !f.is_played()).map(|f| f.id).collect();
    if !outstanding.is_empty() {
        return Err(TournamentError::IncompleteResultSet {
            label: Some(label),
            outstanding,
        });
    }

    let (mut a_goals, mut b_goals) = (0u32, 0u32);
    let (mut a_xg, mut b_xg) = (0.0f64, 0.0f64);
    for leg in &legs {
        let Some(r) = leg.result else { continue };
        match (leg.home.name(), leg.away.name()) {
            (Some(h), Some(w)) if h == a && w == b => {
                a_goals = a_goals.saturating_add(r.home_goals);
                b_goals = b_goals.saturating_add(r.away_goals);
                a_xg += r.home_xg;
                b_xg += r.away_xg;
            }
            (Some(h), Some(w)) if h == b && w == a => {
                a_goals = a_goals.saturating_add(r.away_goals);
                b_goals = b_goals.saturating_add(r.home_goals);
                a_xg += r.away_xg;
                b_xg += r.home_xg;
            }
            _ => return Err(TournamentError::MismatchedLegs(label)),
        }
    }

    let (a_wins, decided_by) = if a_goals != b_goals {
        (a_goals > b_goals, DecidedBy::Goals)
    } else if a_xg != b_xg {
        (a_xg > b_xg, DecidedBy::ExpectedGoals)
    } else {
        (true, DecidedBy::Seeding)
    };

    Ok(TieSummary {
        label,
        home: a.to_string(),
        away: b.to_string(),
        home_goals: a_goals,
        away_goals: b_goals,
        home_xg: a_xg,
        away_xg: b_xg,
        winner: if a_wins { a } else { b }.to_string(),
        decided_by,
    })
}

/// Where a tie stands.
pub fn match_state(playoffs: &[Fixture], label: MatchLabel) -> MatchState {
    let legs = legs(playoffs, label);
    let played = legs.iter().filter(|f| f.is_played()).count();
    if legs.is_empty() {
        MatchState::Unscheduled
    } else if played == 0 {
        MatchState::Scheduled
    } else if played < legs.len() {
        MatchState::InProgress
    } else {
        match determine_winner(playoffs, label) {
            Ok(tie) if advanced(playoffs, label, &tie.winner) => MatchState::Resolved,
            _ => MatchState::InProgress,
        }
    }
}

/// Whether `winner` of `label` already appears in the tie it feeds.
fn advanced(playoffs: &[Fixture], label: MatchLabel, winner: &str) -> bool {
    match label.feeds() {
        None => true,
        Some(next) => legs(playoffs, next).iter().any(|f| f.involves(winner)),
    }
}

/// Write the winners of `stage` into the next stage's placeholders.
///
/// Both ties of the stage must be decided; otherwise nothing is changed and the first
/// undecided tie's error is returned.
pub fn advance_stage(playoffs: &mut [Fixture], stage: Stage) -> Result<Vec<Advancement>, TournamentError> {
    let Some(next) = stage.next() else {
        return Ok(Vec::new());
    };
    let winners = stage
        .labels()
        .iter()
        .map(|&label| determine_winner(playoffs, label).map(|s| (label, s.winner)))
        .collect::<Result<Vec<_>, _>>()?;

    let mut applied = Vec::new();
    for (label, winner) in winners {
        let placeholder = Participant::Pending(label);
        let mut slots = 0;
        for f in playoffs
            .iter_mut()
            .filter(|f| f.label.map(MatchLabel::stage) == Some(next))
        {
            for side in [&mut f.home, &mut f.away] {
                if *side == placeholder {
                    *side = Participant::Resolved(winner.clone());
                    slots += 1;
                }
            }
        }
        if slots > 0 {
            log::info!("{} won {}, advancing to {:?}", winner, label, next);
            applied.push(Advancement {
                from: label,
                winner,
                slots,
            });
        }
    }
    Ok(applied)
}

/// Advance every stage whose ties are all decided. Safe to call repeatedly: resolved
/// cells are never touched, and a stage with an undecided tie stays locked.
pub fn propagate_winners(playoffs: &mut [Fixture]) -> Result<Vec<Advancement>, TournamentError> {
    let mut applied = Vec::new();
    for stage in [Stage::Wildcards, Stage::Semifinals] {
        match advance_stage(playoffs, stage) {
            Ok(mut advanced) => applied.append(&mut advanced),
            Err(TournamentError::IncompleteResultSet { .. })
            | Err(TournamentError::UnresolvedParticipants(_)) => break,
            Err(e) => return Err(e),
        }
    }
    Ok(applied)
}

/// Winner of the final.
pub fn champion(playoffs: &[Fixture]) -> Result<PlayerName, TournamentError> {
    determine_winner(playoffs, MatchLabel::Final).map(|s| s.winner)
}

/// Generate the bracket from final league standings (League only, every league game played).
pub fn start_playoffs(tournament: &mut Tournament) -> Result<(), TournamentError> {
    if tournament.state != TournamentState::League {
        return Err(TournamentError::InvalidState);
    }
    let outstanding = tournament.outstanding_league_games();
    if !outstanding.is_empty() {
        return Err(TournamentError::IncompleteResultSet {
            label: None,
            outstanding,
        });
    }
    let standings = tournament.standings();
    let bracket = generate_playoff_bracket(
        &standings,
        tournament.next_game_id(),
        tournament.config.num_consoles,
    )?;
    tournament.playoffs = bracket;
    tournament.state = TournamentState::Playoffs;
    Ok(())
}

/// Upsert the result of a playoff leg, then advance winners and crown the champion
/// once the final is decided.
///
/// A decided tie may be edited while the tie it feeds has no played legs; the old
/// winner is taken back out of the next round first.
pub fn record_playoff_result(
    tournament: &mut Tournament,
    id: GameId,
    result: MatchResult,
) -> Result<(), TournamentError> {
    use TournamentState::*;
    if !matches!(tournament.state, Playoffs | Completed) {
        return Err(TournamentError::InvalidState);
    }
    result.check().map_err(TournamentError::InvalidResult)?;

    let fixture = tournament
        .playoff_fixture(id)
        .ok_or(TournamentError::GameNotFound(id))?;
    let label = fixture.label.ok_or(TournamentError::InvalidState)?;
    if !fixture.is_resolved() {
        return Err(TournamentError::UnresolvedParticipants(label));
    }

    if let Some(next) = label.feeds() {
        if legs(&tournament.playoffs, next).iter().any(|f| f.is_played()) {
            return Err(TournamentError::DownstreamInProgress(label));
        }
        if let Ok(previous) = determine_winner(&tournament.playoffs, label) {
            withdraw_winner(&mut tournament.playoffs, label, next, &previous.winner);
        }
    }

    if let Some(f) = tournament.playoffs.iter_mut().find(|f| f.id == id) {
        f.result = Some(result);
    }
    propagate_winners(&mut tournament.playoffs)?;

    match champion(&tournament.playoffs) {
        Ok(winner) => {
            log::info!("Tournament {} won by {}", tournament.id, winner);
            tournament.champion = Some(winner);
            tournament.state = Completed;
        }
        Err(_) => {
            tournament.champion = None;
            tournament.state = Playoffs;
        }
    }
    Ok(())
}

/// Put the placeholder for `from` back wherever its winner was written into `into`.
fn withdraw_winner(playoffs: &mut [Fixture], from: MatchLabel, into: MatchLabel, winner: &str) {
    for f in playoffs.iter_mut().filter(|f| f.label == Some(into)) {
        for side in [&mut f.home, &mut f.away] {
            if side.name() == Some(winner) {
                *side = Participant::Pending(from);
            }
        }
    }
}

/// Discard every playoff fixture and result, back to the end of the league.
pub fn reset_playoffs(tournament: &mut Tournament) -> Result<(), TournamentError> {
    use TournamentState::*;
    if !matches!(tournament.state, Playoffs | Completed) {
        return Err(TournamentError::InvalidState);
    }
    tournament.playoffs.clear();
    tournament.champion = None;
    tournament.state = League;
    log::info!("Playoffs reset for tournament {}", tournament.id);
    Ok(())
}
