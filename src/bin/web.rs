//! Single binary web server: HTML from templates/, static from /static, API via REST.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT.
//! Set LEAGUE_DB to a file path to load the league on boot and save it after
//! every successful change.

use actix_files::Files;
use actix_web::{
    delete, get, post, put,
    web::{self, Bytes, Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use chrono::NaiveDate;
use draft_league_web::{
    add_player, clear_group_result, clear_seed_override, close_group, compute_standings,
    create_tournament, current_seeds, finished_tournaments, hall_of_fame, record_group_result,
    record_playoff_result, rename_player, set_player_active, set_seed_slot, Format, League,
    LeagueError, TournamentId,
};
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::RwLock;
use uuid::Uuid;

/// Shared server state: the league aggregate plus the optional save path.
struct AppState {
    league: RwLock<League>,
    db_path: Option<PathBuf>,
}

type State = Data<AppState>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct NameBody {
    name: String,
}

#[derive(Deserialize)]
struct ActiveBody {
    active: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateTournamentBody {
    name: String,
    date: NaiveDate,
    format: Format,
    participant_ids: Vec<Uuid>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScoreBody {
    wins_a: u8,
    wins_b: u8,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SeedBody {
    player_id: Uuid,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

/// Path segments: tournament id and match id.
#[derive(Deserialize)]
struct TournamentMatchPath {
    id: TournamentId,
    match_id: Uuid,
}

/// Path segments: tournament id and 1-based seed slot.
#[derive(Deserialize)]
struct TournamentSeedPath {
    id: TournamentId,
    slot: usize,
}

/// Path segments: player id (e.g. /api/players/{player_id}/name)
#[derive(Deserialize)]
struct PlayerPath {
    player_id: Uuid,
}

fn error_response(e: &LeagueError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        LeagueError::PlayerNotFound(_)
        | LeagueError::TournamentNotFound(_)
        | LeagueError::MatchNotFound(_) => HttpResponse::NotFound().json(body),
        _ => HttpResponse::BadRequest().json(body),
    }
}

/// Write the league to LEAGUE_DB, if configured. Save failures are logged,
/// never surfaced: the in-memory state is already updated.
fn persist(state: &AppState, league: &League) {
    let Some(path) = &state.db_path else { return };
    let json = match league.to_json() {
        Ok(json) => json,
        Err(e) => {
            log::error!("Failed to serialize league for saving: {}", e);
            return;
        }
    };
    if let Err(e) = std::fs::write(path, json) {
        log::error!("Failed to save league to {}: {}", path.display(), e);
    }
}

/// Run one engine operation: on success publish the new aggregate, save it,
/// and return it; on error leave the state untouched.
fn apply(state: &AppState, op: impl FnOnce(&League) -> Result<League, LeagueError>) -> HttpResponse {
    let mut g = match state.league.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match op(&g) {
        Ok(next) => {
            *g = next;
            persist(state, &g);
            HttpResponse::Ok().json(&*g)
        }
        Err(e) => error_response(&e),
    }
}

/// Read the aggregate and render a view from it.
fn view(state: &AppState, f: impl FnOnce(&League) -> HttpResponse) -> HttpResponse {
    match state.league.read() {
        Ok(guard) => f(&guard),
        Err(_) => HttpResponse::InternalServerError().body("lock error"),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "draft-league-web",
    })
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

#[get("/api/players")]
async fn api_list_players(state: State) -> HttpResponse {
    view(&state, |league| HttpResponse::Ok().json(&league.players))
}

#[post("/api/players")]
async fn api_add_player(state: State, body: Json<NameBody>) -> HttpResponse {
    apply(&state, |league| add_player(league, &body.name))
}

#[put("/api/players/{player_id}/name")]
async fn api_rename_player(state: State, path: Path<PlayerPath>, body: Json<NameBody>) -> HttpResponse {
    apply(&state, |league| {
        rename_player(league, path.player_id, &body.name)
    })
}

#[put("/api/players/{player_id}/active")]
async fn api_set_player_active(
    state: State,
    path: Path<PlayerPath>,
    body: Json<ActiveBody>,
) -> HttpResponse {
    apply(&state, |league| {
        set_player_active(league, path.player_id, body.active)
    })
}

#[get("/api/tournaments")]
async fn api_list_tournaments(state: State) -> HttpResponse {
    view(&state, |league| HttpResponse::Ok().json(&league.tournaments))
}

#[post("/api/tournaments")]
async fn api_create_tournament(state: State, body: Json<CreateTournamentBody>) -> HttpResponse {
    apply(&state, |league| {
        create_tournament(
            league,
            &body.name,
            body.date,
            body.format,
            &body.participant_ids,
        )
    })
}

#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: State, path: Path<TournamentPath>) -> HttpResponse {
    view(&state, |league| match league.tournament(path.id) {
        Some(t) => HttpResponse::Ok().json(t),
        None => HttpResponse::NotFound().json(serde_json::json!({ "error": "Tournament not found" })),
    })
}

/// Current group table (partial tables are fine; recomputed on demand).
#[get("/api/tournaments/{id}/standings")]
async fn api_standings(state: State, path: Path<TournamentPath>) -> HttpResponse {
    view(&state, |league| match league.tournament(path.id) {
        Some(t) => HttpResponse::Ok().json(compute_standings(&league.players, t)),
        None => HttpResponse::NotFound().json(serde_json::json!({ "error": "Tournament not found" })),
    })
}

/// Resolved Top-4 preview (override if set, standings otherwise).
#[get("/api/tournaments/{id}/seeds")]
async fn api_get_seeds(state: State, path: Path<TournamentPath>) -> HttpResponse {
    view(&state, |league| {
        if league.tournament(path.id).is_none() {
            return HttpResponse::NotFound()
                .json(serde_json::json!({ "error": "Tournament not found" }));
        }
        HttpResponse::Ok().json(serde_json::json!({ "seeds": current_seeds(league, path.id) }))
    })
}

/// Manually place a player into seed slot 1-4 (stored as the override).
#[put("/api/tournaments/{id}/seeds/{slot}")]
async fn api_set_seed(
    state: State,
    path: Path<TournamentSeedPath>,
    body: Json<SeedBody>,
) -> HttpResponse {
    let slot = path.slot.checked_sub(1).unwrap_or(usize::MAX);
    apply(&state, |league| {
        set_seed_slot(league, path.id, slot, body.player_id)
    })
}

#[delete("/api/tournaments/{id}/seeds")]
async fn api_clear_seeds(state: State, path: Path<TournamentPath>) -> HttpResponse {
    apply(&state, |league| clear_seed_override(league, path.id))
}

/// Record a group match split (2-0, 1-1, or 0-2).
#[put("/api/tournaments/{id}/group-matches/{match_id}")]
async fn api_record_group_result(
    state: State,
    path: Path<TournamentMatchPath>,
    body: Json<ScoreBody>,
) -> HttpResponse {
    apply(&state, |league| {
        record_group_result(league, path.id, path.match_id, body.wins_a, body.wins_b)
    })
}

/// Reset a group match to unplayed (correction before closing the group).
#[delete("/api/tournaments/{id}/group-matches/{match_id}")]
async fn api_clear_group_result(state: State, path: Path<TournamentMatchPath>) -> HttpResponse {
    apply(&state, |league| {
        clear_group_result(league, path.id, path.match_id)
    })
}

/// Close the group stage: seeds the Top-4 and builds the playoff bracket.
#[post("/api/tournaments/{id}/close-group")]
async fn api_close_group(state: State, path: Path<TournamentPath>) -> HttpResponse {
    apply(&state, |league| close_group(league, path.id))
}

/// Record a playoff (best-of-3) score. Finishing the final also finishes the
/// tournament; correcting it back reopens the playoffs.
#[put("/api/tournaments/{id}/playoff-matches/{match_id}")]
async fn api_record_playoff_result(
    state: State,
    path: Path<TournamentMatchPath>,
    body: Json<ScoreBody>,
) -> HttpResponse {
    apply(&state, |league| {
        record_playoff_result(league, path.id, path.match_id, body.wins_a, body.wins_b)
    })
}

#[get("/api/hall-of-fame")]
async fn api_hall_of_fame(state: State) -> HttpResponse {
    view(&state, |league| {
        HttpResponse::Ok().json(serde_json::json!({
            "leaderboard": hall_of_fame(&league.players, &league.tournaments),
            "finished": finished_tournaments(&league.players, &league.tournaments),
        }))
    })
}

fn leaderboard_csv(league: &League) -> Result<String, csv::Error> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(["player", "titles", "finals", "top4"])?;
    for row in hall_of_fame(&league.players, &league.tournaments) {
        wtr.write_record([
            row.name.clone(),
            row.titles.to_string(),
            row.finals_appearances.to_string(),
            row.top4_appearances.to_string(),
        ])?;
    }
    let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Leaderboard as a CSV download.
#[get("/api/hall-of-fame.csv")]
async fn api_hall_of_fame_csv(state: State) -> HttpResponse {
    view(&state, |league| match leaderboard_csv(league) {
        Ok(csv) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .insert_header(("Content-Disposition", "attachment; filename=\"hall-of-fame.csv\""))
            .body(csv),
        Err(e) => {
            log::error!("CSV export failed: {}", e);
            HttpResponse::InternalServerError().body("csv error")
        }
    })
}

/// Export the full league document.
#[get("/api/state")]
async fn api_export_state(state: State) -> HttpResponse {
    view(&state, |league| match league.to_json() {
        Ok(json) => HttpResponse::Ok()
            .content_type("application/json")
            .body(json),
        Err(e) => {
            log::error!("Export failed: {}", e);
            HttpResponse::InternalServerError().body("export error")
        }
    })
}

/// Import a league document, wholesale-replacing the current state. A
/// document that fails validation is refused and the prior state kept.
#[put("/api/state")]
async fn api_import_state(state: State, body: Bytes) -> HttpResponse {
    let text = match std::str::from_utf8(&body) {
        Ok(text) => text,
        Err(_) => {
            return HttpResponse::BadRequest()
                .json(serde_json::json!({ "error": "Document is not valid UTF-8" }))
        }
    };
    apply(&state, |_| League::from_json(text))
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Load the league from LEAGUE_DB if the file exists and validates; start
/// empty otherwise.
fn load_league(db_path: Option<&PathBuf>) -> League {
    let Some(path) = db_path else {
        return League::default();
    };
    match std::fs::read_to_string(path) {
        Ok(data) => match League::from_json(&data) {
            Ok(league) => {
                log::info!(
                    "Loaded league from {} ({} players, {} tournaments)",
                    path.display(),
                    league.players.len(),
                    league.tournaments.len()
                );
                league
            }
            Err(e) => {
                log::error!("Refusing league file {}: {}; starting empty", path.display(), e);
                League::default()
            }
        },
        Err(e) => {
            log::info!("No league file at {} ({}); starting empty", path.display(), e);
            League::default()
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let db_path = std::env::var("LEAGUE_DB").ok().map(PathBuf::from);
    let league = load_league(db_path.as_ref());
    let state = Data::new(AppState {
        league: RwLock::new(league),
        db_path,
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .route("/", web::get().to(serve_index_async))
            .service(api_health)
            .service(favicon)
            .service(api_list_players)
            .service(api_add_player)
            .service(api_rename_player)
            .service(api_set_player_active)
            .service(api_list_tournaments)
            .service(api_create_tournament)
            .service(api_get_tournament)
            .service(api_standings)
            .service(api_get_seeds)
            .service(api_set_seed)
            .service(api_clear_seeds)
            .service(api_record_group_result)
            .service(api_clear_group_result)
            .service(api_close_group)
            .service(api_record_playoff_result)
            .service(api_hall_of_fame)
            .service(api_hall_of_fame_csv)
            .service(api_export_state)
            .service(api_import_state)
            .service(Files::new("/static", "static").show_files_listing())
    })
    .bind(bind)?
    .run()
    .await
}

async fn serve_index_async() -> HttpResponse {
    let html = include_str!("../../templates/index.html");
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html)
}
