//! Zone progression and the adventure view endpoints.

use rocket::response::status::NotFound;
use rocket::serde::json::Json;
use rocket::serde::{Deserialize, Serialize};
use rocket_okapi::{openapi, JsonSchema};

use crate::battle::init::stage_enemy;
use crate::content::cards::{master_cards, CardData};
use crate::content::zones::{zones, ZoneData, STAGES_PER_ZONE};
use crate::game_state::GameState;
use crate::status_messages::{new_status, Status};

/// Where the player stands in the zone sequence. Stages are 1-based; the
/// final stage of each zone is the boss.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub struct AdventureProgress {
    pub zone_index: usize,
    pub stage: u32,
    pub highest_zone_unlocked: usize,
}

impl Default for AdventureProgress {
    fn default() -> Self {
        AdventureProgress {
            zone_index: 0,
            stage: 1,
            highest_zone_unlocked: 0,
        }
    }
}

impl AdventureProgress {
    /// Advance after an adventure win. A boss win moves to the next zone
    /// (clamped to the last) and resets the stage; a normal win moves one
    /// stage forward. Returns true when a new zone was unlocked.
    pub fn apply_victory(&mut self, is_boss: bool, zone_count: usize) -> bool {
        if is_boss {
            let cleared = self.zone_index;
            self.zone_index = (cleared + 1).min(zone_count - 1);
            self.stage = 1;
            let reach = (cleared + 1).min(zone_count - 1);
            if reach > self.highest_zone_unlocked {
                self.highest_zone_unlocked = reach;
                return true;
            }
        } else {
            self.stage += 1;
        }
        false
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub struct AdventureResponse {
    pub progress: AdventureProgress,
    pub stages_per_zone: u32,
    pub current_zone: ZoneData,
}

/// Current adventure progress plus the zone the player is in.
#[openapi]
#[get("/adventure")]
pub async fn get_adventure(
    game_state: &rocket::State<std::sync::Arc<rocket::futures::lock::Mutex<GameState>>>,
) -> Json<AdventureResponse> {
    let gs = game_state.lock().await;
    let all_zones = zones();
    let zone_index = gs.player.progress.zone_index.min(all_zones.len() - 1);
    Json(AdventureResponse {
        progress: gs.player.progress.clone(),
        stages_per_zone: STAGES_PER_ZONE,
        current_zone: all_zones[zone_index].clone(),
    })
}

/// The full zone roster.
#[openapi]
#[get("/adventure/zones")]
pub async fn list_zones() -> Json<Vec<ZoneData>> {
    Json(zones())
}

/// Deterministic preview of the opponent for a zone stage. Always the same
/// species for the same coordinates, so clients can render it ahead of time.
#[openapi]
#[get("/adventure/zones/<zone_index>/enemy/<stage>")]
pub async fn get_stage_enemy(
    zone_index: usize,
    stage: u32,
) -> Result<Json<CardData>, NotFound<Json<Status>>> {
    let all_zones = zones();
    if zone_index >= all_zones.len() {
        return Err(NotFound(new_status(format!(
            "Zone {} not found",
            zone_index
        ))));
    }
    if stage == 0 || stage > STAGES_PER_ZONE {
        return Err(NotFound(new_status(format!(
            "Stage {} not found (zones have {} stages)",
            stage, STAGES_PER_ZONE
        ))));
    }
    let roster = master_cards();
    Ok(Json(stage_enemy(
        zone_index,
        stage,
        &all_zones[zone_index],
        &roster,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal_win_advances_the_stage() {
        let mut progress = AdventureProgress::default();
        let unlocked = progress.apply_victory(false, 10);
        assert!(!unlocked);
        assert_eq!(progress.zone_index, 0);
        assert_eq!(progress.stage, 2);
        assert_eq!(progress.highest_zone_unlocked, 0);
    }

    #[test]
    fn boss_win_moves_to_next_zone_and_unlocks_it() {
        let mut progress = AdventureProgress {
            zone_index: 0,
            stage: 5,
            highest_zone_unlocked: 0,
        };
        let unlocked = progress.apply_victory(true, 10);
        assert!(unlocked);
        assert_eq!(progress.zone_index, 1);
        assert_eq!(progress.stage, 1);
        assert_eq!(progress.highest_zone_unlocked, 1);
    }

    #[test]
    fn boss_win_on_revisited_zone_unlocks_nothing() {
        let mut progress = AdventureProgress {
            zone_index: 0,
            stage: 5,
            highest_zone_unlocked: 4,
        };
        let unlocked = progress.apply_victory(true, 10);
        assert!(!unlocked);
        assert_eq!(progress.zone_index, 1);
        assert_eq!(progress.highest_zone_unlocked, 4);
    }

    #[test]
    fn final_zone_boss_win_clamps_in_place() {
        let mut progress = AdventureProgress {
            zone_index: 9,
            stage: 5,
            highest_zone_unlocked: 9,
        };
        let unlocked = progress.apply_victory(true, 10);
        assert!(!unlocked);
        assert_eq!(progress.zone_index, 9);
        assert_eq!(progress.stage, 1);
    }
}
