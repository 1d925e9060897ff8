//! Save export/import: the persistent player slice as a JSON string.
//! Last write wins; the live battle session is never part of a save.

use log::info;
use rocket::response::status::BadRequest;
use rocket::serde::json::Json;
use rocket::serde::{Deserialize, Serialize};
use rocket_okapi::{openapi, JsonSchema};

use crate::game_state::{GameState, PlayerState};
use crate::status_messages::{new_status, Status};

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub struct SaveBlob {
    pub data: String,
}

pub fn encode_save(player: &PlayerState) -> Result<String, String> {
    serde_json::to_string(player).map_err(|e| e.to_string())
}

pub fn decode_save(data: &str) -> Result<PlayerState, String> {
    serde_json::from_str(data).map_err(|e| format!("invalid save data: {}", e))
}

/// Export the persistent state as an opaque JSON string.
#[openapi]
#[get("/save/export")]
pub async fn export_save(
    game_state: &rocket::State<std::sync::Arc<rocket::futures::lock::Mutex<GameState>>>,
) -> Result<Json<SaveBlob>, BadRequest<Json<Status>>> {
    let gs = game_state.lock().await;
    match encode_save(&gs.player) {
        Ok(data) => Ok(Json(SaveBlob { data })),
        Err(e) => Err(BadRequest(new_status(e))),
    }
}

/// Replace the persistent state with an exported save. Any live battle is
/// discarded; a save never contains one.
#[openapi]
#[post("/save/import", format = "json", data = "<blob>")]
pub async fn import_save(
    blob: Json<SaveBlob>,
    game_state: &rocket::State<std::sync::Arc<rocket::futures::lock::Mutex<GameState>>>,
) -> Result<Json<Status>, BadRequest<Json<Status>>> {
    let mut gs = game_state.lock().await;
    match decode_save(&blob.data) {
        Ok(player) => {
            gs.player = player;
            gs.battle = None;
            info!("save imported");
            Ok(new_status("save imported".to_string()))
        }
        Err(e) => Err(BadRequest(new_status(e))),
    }
}
