//! REST endpoint handlers.
//!
//! Every handler is a thin adapter: parse the path and body, call one
//! engine operation, wrap the result in JSON. Randomness for generated
//! listings comes from a fresh OS-seeded generator per request.
//!
//! # Endpoints
//!
//! | Method | Path | Engine call |
//! |--------|------|-------------|
//! | `POST` | `/api/auth` | `authenticate` |
//! | `GET` | `/api/starter-ships` | `starter_options` |
//! | `POST` | `/api/players/{id}/onboard` | `complete_onboarding` |
//! | `GET` | `/api/players/{id}` | `player_view` |
//! | `POST` | `/api/players/{id}/buy` | `buy_item` |
//! | `POST` | `/api/players/{id}/sell` | `sell_item` |
//! | `POST` | `/api/players/{id}/warp` | `warp` |
//! | `POST` | `/api/players/{id}/refuel` | `refuel` |
//! | `POST` | `/api/players/{id}/save` | `save_player` |
//! | `POST` | `/api/players/{id}/logout` | `logout` |
//! | `GET` | `/api/players/{id}/scan` | `scan_systems` around the player |
//! | `GET` | `/api/systems/{id}/market` | `system_market` |
//! | `GET` | `/api/systems/{id}/crew` | `crew_for_hire` |
//! | `GET` | `/api/systems/{id}/passengers` | `passenger_contracts` |

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use galaxies_core::PersistenceGateway;
use galaxies_types::{PlayerId, SystemId};
use rand::SeedableRng;
use rand::rngs::StdRng;
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// Scan radius used when the request does not name one.
pub const DEFAULT_SCAN_RANGE: f64 = 10.0;

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

/// Body of `POST /api/auth`.
#[derive(Debug, serde::Deserialize)]
pub struct AuthRequest {
    /// Identity provider id, e.g. `github_12345`.
    pub external_id: String,
    /// Provider nickname, logged only.
    #[serde(default)]
    pub display_name: String,
}

/// Body of `POST /api/players/{id}/onboard`.
#[derive(Debug, serde::Deserialize)]
pub struct OnboardRequest {
    /// Chosen callsign.
    pub callsign: String,
    /// Index into the starter ship list.
    pub ship_index: usize,
}

/// Body of `POST /api/players/{id}/buy` and `/sell`.
#[derive(Debug, serde::Deserialize)]
pub struct TradeRequest {
    /// Catalog name of the good.
    pub item_name: String,
    /// Units to move.
    pub quantity: u32,
}

/// Body of `POST /api/players/{id}/warp`.
#[derive(Debug, serde::Deserialize)]
pub struct WarpRequest {
    /// Destination system.
    pub target_system_id: String,
}

/// Query of `GET /api/players/{id}/scan`.
#[derive(Debug, serde::Deserialize)]
pub struct ScanQuery {
    /// Scan radius in light years.
    pub range: Option<f64>,
}

// ---------------------------------------------------------------------------
// Sessions
// ---------------------------------------------------------------------------

/// Log a player in, creating a draft on first contact.
pub async fn authenticate<G: PersistenceGateway>(
    State(state): State<Arc<AppState<G>>>,
    Json(req): Json<AuthRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if req.external_id.trim().is_empty() {
        return Err(ApiError::InvalidRequest(String::from(
            "external_id must not be empty",
        )));
    }
    let login = state
        .engine
        .authenticate(&req.external_id, &req.display_name)
        .await?;

    Ok(Json(serde_json::json!({
        "player": login.snapshot,
        "needs_onboarding": login.needs_onboarding,
    })))
}

/// Three freshly rolled starter ships.
pub async fn starter_ships<G: PersistenceGateway>(
    State(state): State<Arc<AppState<G>>>,
) -> Result<impl IntoResponse, ApiError> {
    let mut rng = StdRng::from_os_rng();
    let ships = state.engine.starter_options(&mut rng)?;
    Ok(Json(serde_json::json!({ "ships": ships })))
}

/// Name the player and commission the chosen starter hull.
///
/// The starter list is rolled again server-side; only the index is taken
/// from the client.
pub async fn onboard<G: PersistenceGateway>(
    State(state): State<Arc<AppState<G>>>,
    Path(id_str): Path<String>,
    Json(req): Json<OnboardRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let player_id = PlayerId(parse_uuid(&id_str)?);

    let options = {
        let mut rng = StdRng::from_os_rng();
        state.engine.starter_options(&mut rng)?
    };
    let ship = options
        .into_iter()
        .nth(req.ship_index)
        .ok_or_else(|| ApiError::InvalidRequest(format!("no starter ship {}", req.ship_index)))?;

    let snapshot = state
        .engine
        .complete_onboarding(player_id, &req.callsign, ship)
        .await?;

    Ok(Json(serde_json::json!({
        "status": "commissioned",
        "player": snapshot,
    })))
}

/// Current state of a player.
pub async fn get_player<G: PersistenceGateway>(
    State(state): State<Arc<AppState<G>>>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let player_id = PlayerId(parse_uuid(&id_str)?);
    let snapshot = state.engine.player_view(player_id).await?;
    Ok(Json(snapshot))
}

/// Force a save of one player.
pub async fn save<G: PersistenceGateway>(
    State(state): State<Arc<AppState<G>>>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let player_id = PlayerId(parse_uuid(&id_str)?);
    state.engine.save_player(player_id).await?;
    Ok(Json(serde_json::json!({ "status": "saved" })))
}

/// Persist and drop a player's session.
pub async fn logout<G: PersistenceGateway>(
    State(state): State<Arc<AppState<G>>>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let player_id = PlayerId(parse_uuid(&id_str)?);
    state.engine.logout(player_id).await?;
    Ok(Json(serde_json::json!({ "status": "logged out" })))
}

// ---------------------------------------------------------------------------
// Transactions
// ---------------------------------------------------------------------------

/// Buy from the local market.
pub async fn buy<G: PersistenceGateway>(
    State(state): State<Arc<AppState<G>>>,
    Path(id_str): Path<String>,
    Json(req): Json<TradeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let player_id = PlayerId(parse_uuid(&id_str)?);
    let snapshot = state
        .engine
        .buy_item(player_id, &req.item_name, req.quantity)
        .await?;
    Ok(Json(serde_json::json!({
        "status": "transaction complete",
        "player": snapshot,
    })))
}

/// Sell to the local market.
pub async fn sell<G: PersistenceGateway>(
    State(state): State<Arc<AppState<G>>>,
    Path(id_str): Path<String>,
    Json(req): Json<TradeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let player_id = PlayerId(parse_uuid(&id_str)?);
    let snapshot = state
        .engine
        .sell_item(player_id, &req.item_name, req.quantity)
        .await?;
    Ok(Json(serde_json::json!({
        "status": "transaction complete",
        "player": snapshot,
    })))
}

/// Jump to another system.
pub async fn warp<G: PersistenceGateway>(
    State(state): State<Arc<AppState<G>>>,
    Path(id_str): Path<String>,
    Json(req): Json<WarpRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let player_id = PlayerId(parse_uuid(&id_str)?);
    let target = SystemId(parse_uuid(&req.target_system_id)?);
    let snapshot = state.engine.warp(player_id, target).await?;
    Ok(Json(serde_json::json!({
        "status": "warp complete",
        "player": snapshot,
    })))
}

/// Fill the tanks.
pub async fn refuel<G: PersistenceGateway>(
    State(state): State<Arc<AppState<G>>>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let player_id = PlayerId(parse_uuid(&id_str)?);
    let receipt = state.engine.refuel(player_id).await?;
    Ok(Json(serde_json::json!({
        "status": "refueling complete",
        "cost": receipt.cost,
        "player": receipt.snapshot,
    })))
}

// ---------------------------------------------------------------------------
// Charts and listings
// ---------------------------------------------------------------------------

/// Systems around the player's current position.
pub async fn scan<G: PersistenceGateway>(
    State(state): State<Arc<AppState<G>>>,
    Path(id_str): Path<String>,
    Query(params): Query<ScanQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let player_id = PlayerId(parse_uuid(&id_str)?);
    let range = params.range.unwrap_or(DEFAULT_SCAN_RANGE);
    if !range.is_finite() || range < 0.0 {
        return Err(ApiError::InvalidRequest(format!("bad scan range {range}")));
    }

    let center = state
        .engine
        .player_view(player_id)
        .await?
        .player
        .current_system_id;
    let systems = state.engine.scan_systems(center, range).await?;

    Ok(Json(serde_json::json!({
        "count": systems.len(),
        "systems": systems,
    })))
}

/// A system's market listing.
pub async fn market<G: PersistenceGateway>(
    State(state): State<Arc<AppState<G>>>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let system_id = SystemId(parse_uuid(&id_str)?);
    let items = state.engine.system_market(system_id).await?;
    Ok(Json(serde_json::json!({ "market": items })))
}

/// Crew for hire at a system's cantina.
pub async fn crew<G: PersistenceGateway>(
    State(state): State<Arc<AppState<G>>>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let system_id = SystemId(parse_uuid(&id_str)?);
    let mut rng = StdRng::from_os_rng();
    let crew = state.engine.crew_for_hire(system_id, &mut rng).await?;
    Ok(Json(serde_json::json!({ "crew": crew })))
}

/// Passage contracts on a system's board.
pub async fn passengers<G: PersistenceGateway>(
    State(state): State<Arc<AppState<G>>>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let system_id = SystemId(parse_uuid(&id_str)?);
    let mut rng = StdRng::from_os_rng();
    let contracts = state.engine.passenger_contracts(system_id, &mut rng).await?;
    Ok(Json(serde_json::json!({ "passengers": contracts })))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse a UUID from a string, returning an [`ApiError`] on failure.
pub(crate) fn parse_uuid(s: &str) -> Result<Uuid, ApiError> {
    s.parse::<Uuid>()
        .map_err(|e| ApiError::InvalidUuid(format!("{s}: {e}")))
}
