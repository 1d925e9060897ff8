//! # Pokegen
//!
//! A single-player collectible-monster game served as a JSON/REST API. The
//! browser client is external; this crate owns the rules.
//!
//! ## Overview
//!
//! Players acquire cards through a randomized gacha, merge duplicates to
//! raise rarity, awaken Legendary cards, and fight turn-based battles
//! through ten themed zones. The core is the battle engine: pure transition
//! functions over an explicit state machine, with every random outcome
//! drawn from a seedable generator so whole battles replay deterministically.
//!
//! ## Architecture
//!
//! The API is built on Rocket with OpenAPI documentation. One `GameState`
//! lives behind a thread-safe `Arc<Mutex<_>>` managed by Rocket; endpoint
//! handlers lock it, call domain methods, and serialize the result. The
//! original client paced enemy turns with wall-clock timers; here a deferred
//! action sits in the battle state until `POST /battle/advance` fires it,
//! which keeps the engine time-free and testable.

// Rocket makes this a bit tricky to support
#![allow(clippy::module_name_repetitions)]
#[macro_use]
extern crate rocket;

use rocket_okapi::openapi_get_routes;
use rocket_okapi::swagger_ui::{make_swagger_ui, SwaggerUIConfig};

pub mod adventure;
pub mod battle;
pub mod content;
pub mod gacha;
pub mod game_state;
pub mod inventory;
pub mod player_seed;
pub mod save;
pub mod status_messages;

/// Initializes and configures the Rocket web server with all routes and
/// OpenAPI documentation.
///
/// # Example
///
/// ```no_run
/// use pokegen::rocket_initialize;
///
/// #[rocket::main]
/// async fn main() {
///     rocket_initialize().launch().await.expect("Failed to launch rocket");
/// }
/// ```
pub fn rocket_initialize() -> rocket::Rocket<rocket::Build> {
    use crate::adventure::okapi_add_operation_for_get_adventure_;
    use crate::adventure::okapi_add_operation_for_get_stage_enemy_;
    use crate::adventure::okapi_add_operation_for_list_zones_;
    use crate::adventure::{get_adventure, get_stage_enemy, list_zones};
    use crate::battle::endpoints::okapi_add_operation_for_advance_;
    use crate::battle::endpoints::okapi_add_operation_for_get_battle_;
    use crate::battle::endpoints::okapi_add_operation_for_leave_;
    use crate::battle::endpoints::okapi_add_operation_for_run_away_;
    use crate::battle::endpoints::okapi_add_operation_for_start_battle_;
    use crate::battle::endpoints::okapi_add_operation_for_switch_active_;
    use crate::battle::endpoints::okapi_add_operation_for_use_skill_;
    use crate::battle::endpoints::{
        advance, get_battle, leave, run_away, start_battle, switch_active, use_skill,
    };
    use crate::gacha::okapi_add_operation_for_buy_draws_;
    use crate::gacha::okapi_add_operation_for_claim_starter_;
    use crate::gacha::okapi_add_operation_for_scout_;
    use crate::gacha::{buy_draws, claim_starter, scout};
    use crate::game_state::get_game;
    use crate::game_state::okapi_add_operation_for_get_game_;
    use crate::inventory::okapi_add_operation_for_awaken_;
    use crate::inventory::okapi_add_operation_for_merge_;
    use crate::inventory::{awaken, merge};
    use crate::player_seed::okapi_add_operation_for_set_seed_;
    use crate::player_seed::set_seed;
    use crate::save::okapi_add_operation_for_export_save_;
    use crate::save::okapi_add_operation_for_import_save_;
    use crate::save::{export_save, import_save};

    #[allow(clippy::no_effect_underscore_binding)]
    let _ = env_logger::try_init();

    let gs = std::sync::Arc::new(rocket::futures::lock::Mutex::new(
        game_state::GameState::new(),
    ));

    rocket::build()
        .mount(
            "/",
            openapi_get_routes![
                get_game,
                set_seed,
                claim_starter,
                buy_draws,
                scout,
                merge,
                awaken,
                get_adventure,
                list_zones,
                get_stage_enemy,
                start_battle,
                get_battle,
                use_skill,
                advance,
                switch_active,
                run_away,
                leave,
                export_save,
                import_save
            ],
        )
        .mount("/swagger", make_swagger_ui(&get_docs()))
        .manage(gs)
}

fn get_docs() -> SwaggerUIConfig {
    SwaggerUIConfig {
        url: "/openapi.json".to_string(),
        ..Default::default()
    }
}
