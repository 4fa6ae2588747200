//! League schedule: quota-bounded round robin packed into console rounds, plus validation.

use crate::models::{
    ConsoleId, Fixture, GameId, PlayerName, ScheduleViolation, TournamentError, MAX_GAMES_PER_PLAYER,
};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::{BTreeMap, HashMap, HashSet};

/// A pairing waiting for a round. `pass` counts how many times the round robin
/// has already been cycled before this pairing (0 = first meeting).
#[derive(Clone, Copy, Debug)]
struct PendingPair {
    a: usize,
    b: usize,
    pass: u32,
}

/// Generate the league schedule with the thread-local RNG.
pub fn generate_league_schedule_default(
    players: &[PlayerName],
    games_per_player: u32,
    num_consoles: u32,
) -> Result<Vec<Fixture>, TournamentError> {
    generate_league_schedule(players, games_per_player, num_consoles, &mut rand::thread_rng())
}

/// Generate `N * games_per_player / 2` league fixtures where every player plays exactly
/// `games_per_player` games and no player or console is used twice in a round.
///
/// 1. Build the pairings: full passes over every pair, then a regular partial pass
///    for the remaining games, so no pair repeats before all pairs have met.
/// 2. Each round: shuffle the queue, prefer earlier passes and players with fewer
///    games, place pairs whose players are free until every console is taken.
/// 3. Home goes to whichever player has hosted fewer games so far.
/// 4. Re-validate the result.
pub fn generate_league_schedule<R: Rng + ?Sized>(
    players: &[PlayerName],
    games_per_player: u32,
    num_consoles: u32,
    rng: &mut R,
) -> Result<Vec<Fixture>, TournamentError> {
    check_inputs(players, games_per_player, num_consoles)?;

    let n = players.len();
    let required = n * games_per_player as usize / 2;
    let capacity = num_consoles as usize;

    let mut queue = build_pairings(n, games_per_player, rng);
    let mut played = vec![0u32; n];
    let mut hosted = vec![0u32; n];
    let mut schedule: Vec<Fixture> = Vec::with_capacity(required);
    let mut next_id = GameId::FIRST;
    let mut round = 1u32;

    while !queue.is_empty() {
        queue.shuffle(rng);
        queue.sort_by_key(|p| (p.pass, played[p.a] + played[p.b]));

        let mut busy = vec![false; n];
        let mut placed = 0usize;
        let mut deferred = Vec::with_capacity(queue.len());

        for pair in queue.drain(..) {
            if placed == capacity || busy[pair.a] || busy[pair.b] {
                deferred.push(pair);
                continue;
            }
            let (home, away) = if hosted[pair.a] > hosted[pair.b] {
                (pair.b, pair.a)
            } else {
                (pair.a, pair.b)
            };
            placed += 1;
            schedule.push(Fixture::league(
                next_id,
                round,
                ConsoleId(placed as u32),
                &players[home],
                &players[away],
            ));
            next_id = next_id.next();
            busy[home] = true;
            busy[away] = true;
            hosted[home] += 1;
            played[home] += 1;
            played[away] += 1;
        }

        if placed == 0 {
            return Err(TournamentError::SchedulingInfeasible {
                placed: schedule.len(),
                required,
            });
        }
        queue = deferred;
        round += 1;
    }

    if schedule.len() != required {
        return Err(TournamentError::SchedulingInfeasible {
            placed: schedule.len(),
            required,
        });
    }
    ensure_valid_schedule(&schedule, players, games_per_player, num_consoles)?;

    log::debug!(
        "Scheduled {} league games over {} rounds on {} console(s)",
        schedule.len(),
        round - 1,
        num_consoles
    );
    Ok(schedule)
}

fn check_inputs(
    players: &[PlayerName],
    games_per_player: u32,
    num_consoles: u32,
) -> Result<(), TournamentError> {
    let invalid = |msg: String| Err(TournamentError::InvalidConfiguration(msg));
    if players.len() < 2 {
        return invalid(format!("need at least 2 players (got {})", players.len()));
    }
    let mut seen = HashSet::new();
    for p in players {
        if !seen.insert(p.to_ascii_lowercase()) {
            return invalid(format!("player {} listed more than once", p));
        }
    }
    if num_consoles == 0 {
        return invalid("need at least one console".to_string());
    }
    if !(1..=MAX_GAMES_PER_PLAYER).contains(&games_per_player) {
        return invalid(format!(
            "games per player must be between 1 and {} (got {})",
            MAX_GAMES_PER_PLAYER, games_per_player
        ));
    }
    if (players.len() as u64 * u64::from(games_per_player)) % 2 != 0 {
        return invalid(format!(
            "{} players x {} games per player is odd",
            players.len(),
            games_per_player
        ));
    }
    Ok(())
}

/// Every pairing the schedule will contain, in pass order.
///
/// Whole passes cover all `n(n-1)/2` pairs. The leftover `k = G mod (n-1)` games per
/// player are covered by a circulant graph over a shuffled player order: each player
/// meets the `k/2` neighbours on either side, plus the opposite player when `k` is odd
/// (then `n` is even, because `n * G` is).
fn build_pairings<R: Rng + ?Sized>(n: usize, games_per_player: u32, rng: &mut R) -> Vec<PendingPair> {
    let per_pass = (n - 1) as u32;
    let full_passes = games_per_player / per_pass;
    let leftover = (games_per_player % per_pass) as usize;

    let mut pool = Vec::with_capacity(n * games_per_player as usize / 2);
    for pass in 0..full_passes {
        for a in 0..n {
            for b in (a + 1)..n {
                pool.push(oriented(a, b, pass, rng));
            }
        }
    }

    if leftover > 0 {
        let mut order: Vec<usize> = (0..n).collect();
        order.shuffle(rng);
        for offset in 1..=leftover / 2 {
            for i in 0..n {
                pool.push(oriented(order[i], order[(i + offset) % n], full_passes, rng));
            }
        }
        if leftover % 2 == 1 {
            for i in 0..n / 2 {
                pool.push(oriented(order[i], order[i + n / 2], full_passes, rng));
            }
        }
    }
    pool
}

fn oriented<R: Rng + ?Sized>(a: usize, b: usize, pass: u32, rng: &mut R) -> PendingPair {
    if rng.gen::<bool>() {
        PendingPair { a, b, pass }
    } else {
        PendingPair { a: b, b: a, pass }
    }
}

/// Re-scan a schedule and report every broken invariant (not just the first):
/// a player or console twice in a round, a console number out of range, a round with
/// more games than consoles, an unknown player, a player whose total differs from the quota.
pub fn validate_schedule(
    schedule: &[Fixture],
    players: &[PlayerName],
    games_per_player: u32,
    num_consoles: u32,
) -> Vec<ScheduleViolation> {
    let mut violations = Vec::new();

    let mut rounds: BTreeMap<u32, Vec<&Fixture>> = BTreeMap::new();
    for f in schedule {
        rounds.entry(f.round).or_default().push(f);
    }

    let roster: HashSet<&str> = players.iter().map(String::as_str).collect();
    let mut games: HashMap<&str, u32> = HashMap::new();

    for (&round, fixtures) in &rounds {
        if fixtures.len() > num_consoles as usize {
            violations.push(ScheduleViolation::RoundOverCapacity {
                round,
                games: fixtures.len(),
                consoles: num_consoles,
            });
        }
        let mut seen_players: HashSet<&str> = HashSet::new();
        let mut seen_consoles = HashSet::new();
        for &f in fixtures {
            if f.console.0 == 0 || f.console.0 > num_consoles {
                violations.push(ScheduleViolation::ConsoleOutOfRange {
                    round,
                    console: f.console,
                });
            }
            if !seen_consoles.insert(f.console) {
                violations.push(ScheduleViolation::ConsoleConflict {
                    round,
                    console: f.console,
                });
            }
            for name in [f.home.name(), f.away.name()].into_iter().flatten() {
                if !roster.contains(name) {
                    violations.push(ScheduleViolation::UnknownPlayer {
                        round,
                        player: name.to_string(),
                    });
                    continue;
                }
                *games.entry(name).or_insert(0) += 1;
                if !seen_players.insert(name) {
                    violations.push(ScheduleViolation::PlayerConflict {
                        round,
                        player: name.to_string(),
                    });
                }
            }
        }
    }

    for p in players {
        let actual = games.get(p.as_str()).copied().unwrap_or(0);
        if actual != games_per_player {
            violations.push(ScheduleViolation::QuotaMismatch {
                player: p.clone(),
                expected: games_per_player,
                actual,
            });
        }
    }

    violations
}

/// `validate_schedule`, failing with every violation found.
pub fn ensure_valid_schedule(
    schedule: &[Fixture],
    players: &[PlayerName],
    games_per_player: u32,
    num_consoles: u32,
) -> Result<(), TournamentError> {
    let violations = validate_schedule(schedule, players, games_per_player, num_consoles);
    if violations.is_empty() {
        Ok(())
    } else {
        log::warn!("Schedule failed validation with {} violation(s)", violations.len());
        Err(TournamentError::ScheduleIntegrityViolation(violations))
    }
}
