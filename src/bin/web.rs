//! Single binary web server: JSON API over the tournament engine.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST, PORT, IDLE_HOURS (hours before an untouched tournament is dropped).

use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use couch_league::export::{write_fixtures_csv, write_standings_csv};
use couch_league::logic::legs;
use couch_league::{
    basic_analysis, determine_winner, estimate_duration, match_state, playoff_placements,
    record_result, reset_playoffs, start_playoffs, start_tournament, Analysis, GameId,
    MatchLabel, MatchResult, MatchState, MemoryStore, Player, PlayoffPlacement, TieSummary,
    Tournament, TournamentConfig, TournamentError, TournamentId, TournamentStore,
};
use serde::{Deserialize, Serialize};
use std::sync::RwLock;
use std::time::Duration;

/// In-memory state: many tournaments by ID. Entries are removed after inactivity.
type AppState = Data<RwLock<MemoryStore>>;

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    name: String,
    #[serde(default)]
    config: TournamentConfig,
    #[serde(default)]
    players: Vec<Player>,
}

#[derive(Deserialize)]
struct AddPlayerBody {
    name: String,
    team: String,
}

#[derive(Deserialize)]
struct SubmitResultBody {
    game_id: GameId,
    home_goals: u32,
    away_goals: u32,
    #[serde(default)]
    home_xg: f64,
    #[serde(default)]
    away_xg: f64,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

/// Path segments: tournament id and player name (e.g. /api/tournaments/{id}/players/{name})
#[derive(Deserialize)]
struct TournamentPlayerPath {
    id: TournamentId,
    name: String,
}

#[derive(Serialize)]
struct TieView {
    label: MatchLabel,
    state: MatchState,
    home: String,
    away: String,
    summary: Option<TieSummary>,
}

#[derive(Serialize)]
struct AnalyticsResponse {
    league: Analysis,
    playoffs: Analysis,
    placements: Vec<PlayoffPlacement>,
}

fn error_response(e: &TournamentError) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" }))
}

/// Load the tournament, apply `f`, and save it back only if `f` succeeded.
fn mutate<F>(state: &AppState, id: TournamentId, f: F) -> HttpResponse
where
    F: FnOnce(&mut Tournament) -> Result<(), TournamentError>,
{
    let mut store = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let mut tournament = match store.load(id) {
        Some(t) => t,
        None => return not_found(),
    };
    match f(&mut tournament) {
        Ok(()) => {
            let response = HttpResponse::Ok().json(&tournament);
            store.save(tournament);
            response
        }
        Err(e) => {
            log::warn!("Tournament {}: {}", id, e);
            error_response(&e)
        }
    }
}

/// Load the tournament and build a response from it without saving.
fn view<F>(state: &AppState, id: TournamentId, f: F) -> HttpResponse
where
    F: FnOnce(&Tournament) -> HttpResponse,
{
    let mut store = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match store.load(id) {
        Some(t) => f(&t),
        None => not_found(),
    }
}

fn csv_response(result: Result<(), csv::Error>, buf: Vec<u8>) -> HttpResponse {
    match result {
        Ok(()) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .body(buf),
        Err(e) => HttpResponse::InternalServerError().body(e.to_string()),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "couch-league",
    })
}

/// List stored tournaments, newest first.
#[get("/api/tournaments")]
async fn api_list_tournaments(state: AppState) -> HttpResponse {
    match state.read() {
        Ok(store) => HttpResponse::Ok().json(store.list()),
        Err(_) => HttpResponse::InternalServerError().body("lock error"),
    }
}

/// Create a tournament (returns it with id; client stores id for subsequent requests).
#[post("/api/tournaments")]
async fn api_create_tournament(state: AppState, body: Json<CreateTournamentBody>) -> HttpResponse {
    let body = body.into_inner();
    if let Err(e) = body.config.validate() {
        return error_response(&e);
    }
    let mut tournament = Tournament::new(body.name.trim(), body.config);
    for p in &body.players {
        if let Err(e) = tournament.add_player(&p.name, &p.team) {
            return error_response(&e);
        }
    }
    let response = HttpResponse::Ok().json(&tournament);
    match state.write() {
        Ok(mut store) => store.save(tournament),
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    }
    response
}

#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    view(&state, path.id, |t| HttpResponse::Ok().json(t))
}

#[delete("/api/tournaments/{id}")]
async fn api_delete_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    match state.write() {
        Ok(mut store) => match store.remove(path.id) {
            Some(_) => HttpResponse::NoContent().finish(),
            None => not_found(),
        },
        Err(_) => HttpResponse::InternalServerError().body("lock error"),
    }
}

/// Replace the format (Setup only).
#[put("/api/tournaments/{id}/config")]
async fn api_set_config(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<TournamentConfig>,
) -> HttpResponse {
    let config = body.into_inner();
    mutate(&state, path.id, |t| t.set_config(config))
}

/// Add a player with their team (Setup only).
#[post("/api/tournaments/{id}/players")]
async fn api_add_player(state: AppState, path: Path<TournamentPath>, body: Json<AddPlayerBody>) -> HttpResponse {
    mutate(&state, path.id, |t| t.add_player(&body.name, &body.team))
}

/// Remove a player by name (Setup only).
#[delete("/api/tournaments/{id}/players/{name}")]
async fn api_remove_player(state: AppState, path: Path<TournamentPlayerPath>) -> HttpResponse {
    mutate(&state, path.id, |t| t.remove_player(&path.name))
}

/// Estimate the duration of a format before creating anything.
#[post("/api/duration-estimate")]
async fn api_estimate_duration(body: Json<TournamentConfig>) -> HttpResponse {
    match estimate_duration(&body) {
        Ok(estimate) => HttpResponse::Ok().json(estimate),
        Err(e) => error_response(&e),
    }
}

#[get("/api/tournaments/{id}/duration")]
async fn api_tournament_duration(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    view(&state, path.id, |t| match estimate_duration(&t.config) {
        Ok(estimate) => HttpResponse::Ok().json(estimate),
        Err(e) => error_response(&e),
    })
}

/// Start the tournament: generate the league schedule (Setup -> League).
#[post("/api/tournaments/{id}/start")]
async fn api_start_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    mutate(&state, path.id, start_tournament)
}

/// Record (or overwrite) the result of a league or playoff game.
#[put("/api/tournaments/{id}/results")]
async fn api_submit_result(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<SubmitResultBody>,
) -> HttpResponse {
    let result = match MatchResult::new(body.home_goals, body.away_goals, body.home_xg, body.away_xg) {
        Ok(r) => r,
        Err(msg) => return error_response(&TournamentError::InvalidResult(msg)),
    };
    mutate(&state, path.id, |t| record_result(t, body.game_id, result))
}

#[get("/api/tournaments/{id}/standings")]
async fn api_standings(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    view(&state, path.id, |t| HttpResponse::Ok().json(t.standings()))
}

#[get("/api/tournaments/{id}/standings.csv")]
async fn api_standings_csv(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    view(&state, path.id, |t| {
        let mut buf = Vec::new();
        let result = write_standings_csv(&t.standings(), &mut buf);
        csv_response(result, buf)
    })
}

/// League fixtures followed by playoff legs.
#[get("/api/tournaments/{id}/fixtures.csv")]
async fn api_fixtures_csv(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    view(&state, path.id, |t| {
        let all: Vec<_> = t.schedule.iter().chain(t.playoffs.iter()).cloned().collect();
        let mut buf = Vec::new();
        let result = write_fixtures_csv(&all, &t.players, &mut buf);
        csv_response(result, buf)
    })
}

/// Generate the playoff bracket (League only, every league game played).
#[post("/api/tournaments/{id}/playoffs")]
async fn api_start_playoffs(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    mutate(&state, path.id, start_playoffs)
}

/// Discard the bracket and all playoff results.
#[delete("/api/tournaments/{id}/playoffs")]
async fn api_reset_playoffs(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    mutate(&state, path.id, reset_playoffs)
}

/// Every tie with its state and, once decided, its aggregate.
#[get("/api/tournaments/{id}/playoffs/ties")]
async fn api_playoff_ties(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    view(&state, path.id, |t| {
        let ties: Vec<TieView> = MatchLabel::ALL
            .iter()
            .map(|&label| {
                let first = legs(&t.playoffs, label).first().map(|f| (f.home.to_string(), f.away.to_string()));
                let (home, away) = first.unwrap_or_default();
                TieView {
                    label,
                    state: match_state(&t.playoffs, label),
                    home,
                    away,
                    summary: determine_winner(&t.playoffs, label).ok(),
                }
            })
            .collect();
        HttpResponse::Ok().json(ties)
    })
}

#[get("/api/tournaments/{id}/analytics")]
async fn api_analytics(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    view(&state, path.id, |t| {
        HttpResponse::Ok().json(AnalyticsResponse {
            league: basic_analysis(&t.schedule),
            playoffs: basic_analysis(&t.playoffs),
            placements: playoff_placements(&t.playoffs),
        })
    })
}

/// Full snapshot for the persistence layer.
#[get("/api/tournaments/{id}/snapshot")]
async fn api_snapshot(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    view(&state, path.id, |t| HttpResponse::Ok().json(t.snapshot()))
}

/// Restart tournament: back to Setup with the same roster and format.
#[post("/api/tournaments/{id}/restart")]
async fn api_restart_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    mutate(&state, path.id, |t| t.restart())
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_idle_hours() -> u64 {
    12
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let idle_hours: u64 = std::env::var("IDLE_HOURS")
        .ok()
        .and_then(|h| h.parse().ok())
        .unwrap_or_else(default_idle_hours);
    let inactivity_timeout = Duration::from_secs(idle_hours * 3600);
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state: AppState = Data::new(RwLock::new(MemoryStore::new()));

    // Background task: every 30 minutes, remove tournaments nobody touched within the timeout
    let state_cleanup = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut store = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let removed = store.evict_inactive(inactivity_timeout);
            if removed > 0 {
                log::info!("Cleaned up {} inactive tournament(s) (no activity for {}h)", removed, idle_hours);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_list_tournaments)
            .service(api_create_tournament)
            .service(api_get_tournament)
            .service(api_delete_tournament)
            .service(api_set_config)
            .service(api_add_player)
            .service(api_remove_player)
            .service(api_estimate_duration)
            .service(api_tournament_duration)
            .service(api_start_tournament)
            .service(api_submit_result)
            .service(api_standings)
            .service(api_standings_csv)
            .service(api_fixtures_csv)
            .service(api_start_playoffs)
            .service(api_reset_playoffs)
            .service(api_playoff_ties)
            .service(api_analytics)
            .service(api_snapshot)
            .service(api_restart_tournament)
    })
    .bind(bind)?
    .run()
    .await
}
