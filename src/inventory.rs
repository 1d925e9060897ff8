//! Inventory operations: merging duplicates and awakening Legendaries.

use rocket::response::status::BadRequest;
use rocket::serde::json::Json;
use rocket::serde::{Deserialize, Serialize};
use rocket_okapi::{openapi, JsonSchema};

use crate::content::Rarity;
use crate::game_state::GameState;
use crate::status_messages::{new_status, Status};

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub struct MergeRequest {
    pub card_id: String,
    pub rarity: Rarity,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub struct MergeResponse {
    /// Inventory key of the granted higher-rarity copy.
    pub merged_into: String,
}

/// Fuse three copies of a card into one copy of the next rarity.
#[openapi]
#[post("/inventory/merge", format = "json", data = "<request>")]
pub async fn merge(
    request: Json<MergeRequest>,
    game_state: &rocket::State<std::sync::Arc<rocket::futures::lock::Mutex<GameState>>>,
) -> Result<Json<MergeResponse>, BadRequest<Json<Status>>> {
    let mut gs = game_state.lock().await;
    match gs.merge(&request.card_id, request.rarity) {
        Ok(merged_into) => Ok(Json(MergeResponse { merged_into })),
        Err(e) => Err(BadRequest(new_status(e))),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub struct AwakenRequest {
    pub card_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub struct AwakenResponse {
    pub card_id: String,
    pub awakening_level: u8,
}

/// Consume a spare Legendary copy to raise a card's awakening level.
#[openapi]
#[post("/inventory/awaken", format = "json", data = "<request>")]
pub async fn awaken(
    request: Json<AwakenRequest>,
    game_state: &rocket::State<std::sync::Arc<rocket::futures::lock::Mutex<GameState>>>,
) -> Result<Json<AwakenResponse>, BadRequest<Json<Status>>> {
    let mut gs = game_state.lock().await;
    match gs.awaken(&request.card_id) {
        Ok(awakening_level) => Ok(Json(AwakenResponse {
            card_id: request.card_id.clone(),
            awakening_level,
        })),
        Err(e) => Err(BadRequest(new_status(e))),
    }
}
