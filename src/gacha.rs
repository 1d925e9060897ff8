//! The gacha: randomized card draws, the starter pack, and scouting.

use rocket::response::status::BadRequest;
use rocket::serde::json::Json;
use rocket::serde::{Deserialize, Serialize};
use rocket_okapi::{openapi, JsonSchema};

use crate::content::cards::CardData;
use crate::content::Rarity;
use crate::game_state::GameState;
use crate::status_messages::{new_status, Status};

/// Map a uniform roll in `[0, 1)` onto the rarity table. The top of the
/// range is the rarest; anything at or below 0.70 is Common.
pub fn roll_rarity(roll: f64) -> Rarity {
    if roll > 0.999 {
        Rarity::Legendary
    } else if roll > 0.99 {
        Rarity::Epic
    } else if roll > 0.95 {
        Rarity::Rare
    } else if roll > 0.70 {
        Rarity::Uncommon
    } else {
        Rarity::Common
    }
}

/// One drawn card. `is_new` marks the first copy of a species the player
/// has ever owned, at any rarity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub struct DrawResult {
    pub card: CardData,
    pub rarity: Rarity,
    pub is_new: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub struct DrawRequest {
    pub amount: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub struct DrawResponse {
    pub results: Vec<DrawResult>,
    pub coins: u64,
}

/// Claim the one-time starter pack of ten free draws.
#[openapi]
#[post("/gacha/starter")]
pub async fn claim_starter(
    game_state: &rocket::State<std::sync::Arc<rocket::futures::lock::Mutex<GameState>>>,
) -> Result<Json<DrawResponse>, BadRequest<Json<Status>>> {
    let mut gs = game_state.lock().await;
    match gs.claim_starter() {
        Ok(results) => Ok(Json(DrawResponse {
            results,
            coins: gs.player.coins,
        })),
        Err(e) => Err(BadRequest(new_status(e))),
    }
}

/// Buy `amount` draws at 100 G each (2 G refunded per draw).
#[openapi]
#[post("/gacha/draw", format = "json", data = "<request>")]
pub async fn buy_draws(
    request: Json<DrawRequest>,
    game_state: &rocket::State<std::sync::Arc<rocket::futures::lock::Mutex<GameState>>>,
) -> Result<Json<DrawResponse>, BadRequest<Json<Status>>> {
    let mut gs = game_state.lock().await;
    match gs.buy_draws(request.amount) {
        Ok(results) => Ok(Json(DrawResponse {
            results,
            coins: gs.player.coins,
        })),
        Err(e) => Err(BadRequest(new_status(e))),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub struct ScoutResponse {
    pub revealed: Vec<CardData>,
    pub coins: u64,
}

/// Pay 100 G to reveal up to three unknown species.
#[openapi]
#[post("/gacha/scout")]
pub async fn scout(
    game_state: &rocket::State<std::sync::Arc<rocket::futures::lock::Mutex<GameState>>>,
) -> Result<Json<ScoutResponse>, BadRequest<Json<Status>>> {
    let mut gs = game_state.lock().await;
    match gs.scout() {
        Ok(revealed) => Ok(Json(ScoutResponse {
            revealed,
            coins: gs.player.coins,
        })),
        Err(e) => Err(BadRequest(new_status(e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rarity_table_boundaries() {
        assert_eq!(roll_rarity(0.0), Rarity::Common);
        assert_eq!(roll_rarity(0.70), Rarity::Common);
        assert_eq!(roll_rarity(0.700001), Rarity::Uncommon);
        assert_eq!(roll_rarity(0.95), Rarity::Uncommon);
        assert_eq!(roll_rarity(0.96), Rarity::Rare);
        assert_eq!(roll_rarity(0.99), Rarity::Rare);
        assert_eq!(roll_rarity(0.995), Rarity::Epic);
        assert_eq!(roll_rarity(0.999), Rarity::Epic);
        assert_eq!(roll_rarity(0.9995), Rarity::Legendary);
    }
}
