//! Single binary web server: JSON REST API over in-memory workspaces.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default so the app is reachable via DNS on a VPS.
//! Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080), INACTIVITY_HOURS (e.g. 12).

use actix_web::{
    delete, get, post, put,
    web::{Bytes, Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use chrono::Utc;
use score_tracker_web::{
    generate_round_robin, import_roster_csv, GameId, PlayerId, ScoreError, Team, Workspace,
    WorkspaceId,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

/// Per-workspace entry: workspace data + last activity time (for auto-cleanup).
struct WorkspaceEntry {
    workspace: Workspace,
    last_activity: Instant,
}

/// In-memory state: many workspaces by ID. Entries are removed after the inactivity timeout.
type AppState = Data<RwLock<HashMap<WorkspaceId, WorkspaceEntry>>>;

/// Server settings read from the environment.
struct Config {
    host: String,
    port: u16,
    inactivity_timeout: Duration,
}

impl Config {
    fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);
        let hours: u64 = std::env::var("INACTIVITY_HOURS")
            .ok()
            .and_then(|h| h.parse().ok())
            .unwrap_or(12);
        Self {
            host,
            port,
            inactivity_timeout: Duration::from_secs(hours * 3600),
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct PlayerNameBody {
    name: String,
}

#[derive(Deserialize)]
struct SwitchSidesBody {
    every: u32,
}

#[derive(Deserialize)]
struct CreateGameBody {
    team_1: [PlayerId; 2],
    team_2: [PlayerId; 2],
}

#[derive(Deserialize)]
#[serde(rename_all = "snake_case")]
enum PointChange {
    Add,
    Remove,
}

#[derive(Deserialize)]
struct PointBody {
    team: Team,
    #[serde(default = "default_point_change")]
    change: PointChange,
}

fn default_point_change() -> PointChange {
    PointChange::Add
}

#[derive(Deserialize)]
struct SetScoreBody {
    score_1: u32,
    score_2: u32,
}

#[derive(Deserialize)]
#[serde(rename_all = "snake_case")]
enum TimerAction {
    Start,
    Pause,
    Reset,
}

/// Path segment: workspace id (e.g. /api/workspaces/{id})
#[derive(Deserialize)]
struct WorkspacePath {
    id: WorkspaceId,
}

#[derive(Deserialize)]
struct WorkspacePlayerPath {
    id: WorkspaceId,
    player_id: PlayerId,
}

#[derive(Deserialize)]
struct WorkspaceGamePath {
    id: WorkspaceId,
    game_id: GameId,
}

#[derive(Deserialize)]
struct TimerPath {
    id: WorkspaceId,
    game_id: GameId,
    action: TimerAction,
}

fn error_response(e: &ScoreError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        ScoreError::PlayerNotFound(_) | ScoreError::GameNotFound(_) => {
            HttpResponse::NotFound().json(body)
        }
        _ => HttpResponse::BadRequest().json(body),
    }
}

/// Look up the workspace, refresh its activity time, run `f`, and answer with the workspace
/// (or the error).
fn with_workspace<F>(state: &AppState, id: WorkspaceId, f: F) -> HttpResponse
where
    F: FnOnce(&mut Workspace) -> Result<(), ScoreError>,
{
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No workspace" })),
    };
    entry.last_activity = Instant::now();
    let ws = &mut entry.workspace;
    match f(ws) {
        Ok(()) => HttpResponse::Ok().json(ws),
        Err(e) => error_response(&e),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "score-tracker-web",
    })
}

/// Create a new workspace (returns it with id; client stores id for subsequent requests).
#[post("/api/workspaces")]
async fn api_create_workspace(state: AppState) -> HttpResponse {
    let workspace = Workspace::new();
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let response = HttpResponse::Ok().json(&workspace);
    log::info!("Created workspace {}", workspace.id);
    g.insert(
        workspace.id,
        WorkspaceEntry {
            workspace,
            last_activity: Instant::now(),
        },
    );
    response
}

#[get("/api/workspaces/{id}")]
async fn api_get_workspace(state: AppState, path: Path<WorkspacePath>) -> HttpResponse {
    with_workspace(&state, path.id, |_| Ok(()))
}

/// Reminder interval for games created from now on.
#[put("/api/workspaces/{id}/switch-sides")]
async fn api_set_switch_sides(
    state: AppState,
    path: Path<WorkspacePath>,
    body: Json<SwitchSidesBody>,
) -> HttpResponse {
    with_workspace(&state, path.id, |ws| {
        ws.set_switch_sides_every(body.every);
        Ok(())
    })
}

#[post("/api/workspaces/{id}/players")]
async fn api_add_player(
    state: AppState,
    path: Path<WorkspacePath>,
    body: Json<PlayerNameBody>,
) -> HttpResponse {
    with_workspace(&state, path.id, |ws| ws.add_player(body.name.as_str()).map(|_| ()))
}

/// Import players from a CSV body with a `name` header. A rejected row adds nobody.
#[post("/api/workspaces/{id}/players/import")]
async fn api_import_players(state: AppState, path: Path<WorkspacePath>, body: Bytes) -> HttpResponse {
    with_workspace(&state, path.id, |ws| {
        import_roster_csv(ws, body.as_ref()).map(|_| ())
    })
}

#[put("/api/workspaces/{id}/players/{player_id}")]
async fn api_rename_player(
    state: AppState,
    path: Path<WorkspacePlayerPath>,
    body: Json<PlayerNameBody>,
) -> HttpResponse {
    with_workspace(&state, path.id, |ws| ws.rename_player(path.player_id, &body.name))
}

#[delete("/api/workspaces/{id}/players/{player_id}")]
async fn api_remove_player(state: AppState, path: Path<WorkspacePlayerPath>) -> HttpResponse {
    with_workspace(&state, path.id, |ws| ws.remove_player(path.player_id))
}

#[post("/api/workspaces/{id}/games")]
async fn api_create_game(
    state: AppState,
    path: Path<WorkspacePath>,
    body: Json<CreateGameBody>,
) -> HttpResponse {
    with_workspace(&state, path.id, |ws| {
        ws.create_game_from_ids(body.team_1, body.team_2).map(|_| ())
    })
}

/// Generate the round-robin schedule and store every game.
/// Answers with the generation report (games, stored count, failures, warning).
#[post("/api/workspaces/{id}/games/round-robin")]
async fn api_generate_round_robin(state: AppState, path: Path<WorkspacePath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No workspace" })),
    };
    entry.last_activity = Instant::now();
    match generate_round_robin(&mut entry.workspace) {
        Ok(report) => HttpResponse::Ok().json(serde_json::json!({
            "report": report,
            "workspace": &entry.workspace,
        })),
        Err(e) => error_response(&e),
    }
}

#[delete("/api/workspaces/{id}/games/{game_id}")]
async fn api_delete_game(state: AppState, path: Path<WorkspaceGamePath>) -> HttpResponse {
    with_workspace(&state, path.id, |ws| ws.delete_game(path.game_id))
}

/// Add or take back one point for a team.
#[post("/api/workspaces/{id}/games/{game_id}/points")]
async fn api_change_points(
    state: AppState,
    path: Path<WorkspaceGamePath>,
    body: Json<PointBody>,
) -> HttpResponse {
    with_workspace(&state, path.id, |ws| {
        let game = ws.game_mut(path.game_id)?;
        match body.change {
            PointChange::Add => game.add_point(body.team),
            PointChange::Remove => game.remove_point(body.team),
        }
    })
}

#[put("/api/workspaces/{id}/games/{game_id}/score")]
async fn api_set_score(
    state: AppState,
    path: Path<WorkspaceGamePath>,
    body: Json<SetScoreBody>,
) -> HttpResponse {
    with_workspace(&state, path.id, |ws| {
        ws.game_mut(path.game_id)?.set_score(body.score_1, body.score_2)
    })
}

#[post("/api/workspaces/{id}/games/{game_id}/switch-sides/ack")]
async fn api_ack_switch_sides(state: AppState, path: Path<WorkspaceGamePath>) -> HttpResponse {
    with_workspace(&state, path.id, |ws| {
        ws.game_mut(path.game_id)?.acknowledge_switch();
        Ok(())
    })
}

#[post("/api/workspaces/{id}/games/{game_id}/timer/{action}")]
async fn api_timer(state: AppState, path: Path<TimerPath>) -> HttpResponse {
    with_workspace(&state, path.id, |ws| {
        let game = ws.game_mut(path.game_id)?;
        match path.action {
            TimerAction::Start => game.start_timer(Utc::now()),
            TimerAction::Pause => game.pause_timer(Utc::now()),
            TimerAction::Reset => game.reset_timer(),
        }
    })
}

#[post("/api/workspaces/{id}/games/{game_id}/finish")]
async fn api_finish_game(state: AppState, path: Path<WorkspaceGamePath>) -> HttpResponse {
    with_workspace(&state, path.id, |ws| ws.game_mut(path.game_id)?.finish(Utc::now()))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env();
    let bind = (config.host.as_str(), config.port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(HashMap::<WorkspaceId, WorkspaceEntry>::new()));

    // Background task: every 30 minutes, remove workspaces inactive past the timeout
    let state_cleanup = state.clone();
    let inactivity_timeout = config.inactivity_timeout;
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.len();
            g.retain(|_, entry| entry.last_activity.elapsed() < inactivity_timeout);
            let removed = before - g.len();
            if removed > 0 {
                log::info!("Cleaned up {} inactive workspace(s)", removed);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_create_workspace)
            .service(api_get_workspace)
            .service(api_set_switch_sides)
            .service(api_add_player)
            .service(api_import_players)
            .service(api_rename_player)
            .service(api_remove_player)
            .service(api_create_game)
            .service(api_generate_round_robin)
            .service(api_delete_game)
            .service(api_change_points)
            .service(api_set_score)
            .service(api_ack_switch_sides)
            .service(api_timer)
            .service(api_finish_game)
    })
    .bind(bind)?
    .run()
    .await
}
