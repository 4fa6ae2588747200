//! Playoff bracket: top 6 of the league into wildcards, semifinals and a final.

use crate::models::{
    ConsoleId, Fixture, GameId, MatchLabel, Participant, StandingRow, TournamentError,
};

/// Number of ranked players the bracket seeds.
pub const PLAYOFF_SPOTS: usize = 6;

type Tie = (MatchLabel, Participant, Participant);

/// Build the ten playoff legs from ranked standings.
///
/// - WC1: 3rd v 6th, WC2: 4th v 5th
/// - SF1: 1st v winner WC2, SF2: 2nd v winner WC1
/// - Final: winner SF1 v winner SF2
///
/// Every tie is two legs in consecutive rounds, the second reversed. Wildcards and
/// semifinals play two legs per round (consoles 1 and 2) when there are at least two
/// consoles, otherwise one.
/// Both final legs are on console 1 in rounds of their own. Rounds count from 1 within
/// the playoffs; ids start at `next_id`.
pub fn generate_playoff_bracket(
    standings: &[StandingRow],
    next_id: GameId,
    num_consoles: u32,
) -> Result<Vec<Fixture>, TournamentError> {
    if standings.len() < PLAYOFF_SPOTS {
        return Err(TournamentError::InsufficientPlayers {
            found: standings.len(),
        });
    }
    check_ranks(standings)?;

    let seed = |rank: usize| -> Participant {
        // check_ranks guarantees every rank 1..=len is present exactly once.
        let row = standings.iter().find(|r| r.rank == rank);
        Participant::Resolved(row.map(|r| r.player.clone()).unwrap_or_default())
    };

    let wildcards: [Tie; 2] = [
        (MatchLabel::Wildcard1, seed(3), seed(6)),
        (MatchLabel::Wildcard2, seed(4), seed(5)),
    ];
    let semifinals: [Tie; 2] = [
        (MatchLabel::Semifinal1, seed(1), Participant::Pending(MatchLabel::Wildcard2)),
        (MatchLabel::Semifinal2, seed(2), Participant::Pending(MatchLabel::Wildcard1)),
    ];
    let finals: [Tie; 1] = [(
        MatchLabel::Final,
        Participant::Pending(MatchLabel::Semifinal1),
        Participant::Pending(MatchLabel::Semifinal2),
    )];

    let per_round = if num_consoles >= 2 { 2 } else { 1 };
    let mut bracket = Vec::with_capacity(10);
    let mut round = 1;
    let mut id = next_id;
    schedule_stage(&wildcards, per_round, &mut round, &mut id, &mut bracket);
    schedule_stage(&semifinals, per_round, &mut round, &mut id, &mut bracket);
    schedule_stage(&finals, 1, &mut round, &mut id, &mut bracket);

    log::info!(
        "Generated playoff bracket: {} legs, games {} to {}",
        bracket.len(),
        next_id,
        GameId(id.0 - 1)
    );
    Ok(bracket)
}

/// Ranks must be exactly 1..=n with a player name on every row.
fn check_ranks(standings: &[StandingRow]) -> Result<(), TournamentError> {
    let mut ranks: Vec<usize> = standings.iter().map(|r| r.rank).collect();
    ranks.sort_unstable();
    if ranks.iter().enumerate().any(|(i, &rank)| rank != i + 1) {
        return Err(TournamentError::InvalidStandings(
            "ranks must run from 1 without gaps or repeats".to_string(),
        ));
    }
    if standings.iter().any(|r| r.player.trim().is_empty()) {
        return Err(TournamentError::InvalidStandings(
            "every row needs a player".to_string(),
        ));
    }
    Ok(())
}

/// Lay out both legs of every tie, `per_round` legs to a round, so that each tie's
/// second leg is in the round right after its first. When every tie of the stage fits
/// in one round, all first legs share a round and all second legs the next; otherwise
/// each tie's legs are played back to back.
fn schedule_stage(
    ties: &[Tie],
    per_round: usize,
    round: &mut u32,
    id: &mut GameId,
    out: &mut Vec<Fixture>,
) {
    let reversed = |(label, home, away): &Tie| (*label, away.clone(), home.clone());
    let legs: Vec<Tie> = if per_round >= ties.len() {
        ties.iter().cloned().chain(ties.iter().map(reversed)).collect()
    } else {
        ties.iter()
            .flat_map(|tie| [tie.clone(), reversed(tie)])
            .collect()
    };
    for chunk in legs.chunks(per_round) {
        for (slot, (label, home, away)) in chunk.iter().enumerate() {
            out.push(Fixture::playoff_leg(
                *id,
                *round,
                ConsoleId(slot as u32 + 1),
                home.clone(),
                away.clone(),
                *label,
            ));
            *id = id.next();
        }
        *round += 1;
    }
}
