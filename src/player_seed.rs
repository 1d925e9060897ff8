use rocket::serde::json::Json;
use rocket::serde::{Deserialize, Serialize};
use rocket_okapi::{openapi, JsonSchema};

use crate::game_state::GameState;

#[derive(Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub struct SeedRequest {
    pub seed: u64,
}

/// Reset the session RNG to a known seed. Every random outcome after this
/// call (draws, scouting, damage spread, enemy skill picks) is reproducible.
#[openapi]
#[post("/player/seed", format = "json", data = "<seed_req>")]
pub async fn set_seed(
    seed_req: Json<SeedRequest>,
    game_state: &rocket::State<std::sync::Arc<rocket::futures::lock::Mutex<GameState>>>,
) -> Json<String> {
    let seed = seed_req.seed;
    let mut gs = game_state.lock().await;
    gs.set_seed(seed);
    Json(format!("seed set to {}", seed))
}
