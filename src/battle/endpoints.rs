//! HTTP surface of the battle engine. Handlers validate the session exists,
//! delegate to the game state, and serialize the resulting battle snapshot.
//! In-battle misuse (wrong phase, cooldown, locked slot) is a no-op that
//! still returns 200 with the unchanged state; only a missing session or a
//! rejected precondition is an error.

use rocket::response::status::{BadRequest, NotFound};
use rocket::serde::json::Json;
use rocket::serde::{Deserialize, Serialize};
use rocket_okapi::{openapi, JsonSchema};

use crate::game_state::GameState;
use crate::status_messages::{new_status, Status};

use super::types::{BattleKind, BattleState};

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub struct StartBattleRequest {
    /// Inventory keys (`"cardId_rarityValue"`) of the team, in order.
    pub team: Vec<String>,
    pub kind: BattleKind,
}

/// Start a battle with a team drawn from the inventory.
#[openapi]
#[post("/battle", format = "json", data = "<request>")]
pub async fn start_battle(
    request: Json<StartBattleRequest>,
    game_state: &rocket::State<std::sync::Arc<rocket::futures::lock::Mutex<GameState>>>,
) -> Result<Json<BattleState>, BadRequest<Json<Status>>> {
    let mut gs = game_state.lock().await;
    match gs.start_battle(&request.team, request.kind) {
        Ok(battle) => Ok(Json(battle)),
        Err(e) => Err(BadRequest(new_status(e))),
    }
}

/// Snapshot of the current battle.
#[openapi]
#[get("/battle")]
pub async fn get_battle(
    game_state: &rocket::State<std::sync::Arc<rocket::futures::lock::Mutex<GameState>>>,
) -> Result<Json<BattleState>, NotFound<Json<Status>>> {
    let gs = game_state.lock().await;
    match &gs.battle {
        Some(battle) => Ok(Json(battle.clone())),
        None => Err(NotFound(new_status("no battle in progress".to_string()))),
    }
}

/// Use the skill in `slot` (0..=2) with the active card.
#[openapi]
#[post("/battle/skill/<slot>")]
pub async fn use_skill(
    slot: usize,
    game_state: &rocket::State<std::sync::Arc<rocket::futures::lock::Mutex<GameState>>>,
) -> Result<Json<BattleState>, NotFound<Json<Status>>> {
    let mut gs = game_state.lock().await;
    match gs.use_skill(slot) {
        Ok(battle) => Ok(Json(battle)),
        Err(e) => Err(NotFound(new_status(e))),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub struct AdvanceResponse {
    /// The battle after the deferred step, or `None` if the step tore the
    /// session down.
    pub battle: Option<BattleState>,
}

/// Fire the pending deferred action (enemy turn or teardown). A no-op when
/// nothing is pending.
#[openapi]
#[post("/battle/advance")]
pub async fn advance(
    game_state: &rocket::State<std::sync::Arc<rocket::futures::lock::Mutex<GameState>>>,
) -> Result<Json<AdvanceResponse>, NotFound<Json<Status>>> {
    let mut gs = game_state.lock().await;
    match gs.advance_battle() {
        Ok(battle) => Ok(Json(AdvanceResponse { battle })),
        Err(e) => Err(NotFound(new_status(e))),
    }
}

/// Switch the active card to the team member at `index`.
#[openapi]
#[post("/battle/switch/<index>")]
pub async fn switch_active(
    index: usize,
    game_state: &rocket::State<std::sync::Arc<rocket::futures::lock::Mutex<GameState>>>,
) -> Result<Json<BattleState>, NotFound<Json<Status>>> {
    let mut gs = game_state.lock().await;
    match gs.switch_active(index) {
        Ok(battle) => Ok(Json(battle)),
        Err(e) => Err(NotFound(new_status(e))),
    }
}

/// Flee the battle. Ignored against bosses.
#[openapi]
#[post("/battle/run")]
pub async fn run_away(
    game_state: &rocket::State<std::sync::Arc<rocket::futures::lock::Mutex<GameState>>>,
) -> Result<Json<BattleState>, NotFound<Json<Status>>> {
    let mut gs = game_state.lock().await;
    match gs.run_away() {
        Ok(battle) => Ok(Json(battle)),
        Err(e) => Err(NotFound(new_status(e))),
    }
}

/// Leave the battle view, tearing the session down. A pending enemy turn is
/// resolved first so its effects are kept.
#[openapi]
#[post("/battle/leave")]
pub async fn leave(
    game_state: &rocket::State<std::sync::Arc<rocket::futures::lock::Mutex<GameState>>>,
) -> Result<Json<Status>, NotFound<Json<Status>>> {
    let mut gs = game_state.lock().await;
    match gs.leave_battle() {
        Ok(()) => Ok(new_status("battle closed".to_string())),
        Err(e) => Err(NotFound(new_status(e))),
    }
}
