//! The single shared game state: persistent player data plus the live
//! battle session. Rocket manages one instance behind an async mutex; all
//! mutation happens through the methods here, which endpoint handlers call
//! while holding the lock.

use std::collections::BTreeMap;

use log::info;
use rand::{Rng, SeedableRng};
use rand_pcg::Lcg64Xsh32;
use rocket::serde::json::Json;
use rocket::serde::{Deserialize, Serialize};
use rocket_okapi::{openapi, JsonSchema};

use crate::adventure::AdventureProgress;
use crate::battle::init::start_battle;
use crate::battle::resolve::{
    resolve_enemy_turn, resolve_player_action, resolve_run, resolve_switch,
};
use crate::battle::types::{BattleKind, BattleState, BattleStatus, PendingAction};
use crate::content::cards::{master_cards, starter_dex_ids, CardData};
use crate::content::zones::zones;
use crate::content::Rarity;
use crate::gacha::{roll_rarity, DrawResult};

pub const DRAW_COST: u64 = 100;
pub const DRAW_REFUND: u64 = 2;
pub const SCOUT_COST: u64 = 100;
pub const SCOUT_REVEALS: usize = 3;
pub const STARTER_PACK_SIZE: usize = 10;
pub const MAX_TEAM_SIZE: usize = 6;
pub const MAX_AWAKENING: u8 = 5;
pub const MERGE_COPIES: u64 = 3;

/// The persistent slice of the game: everything that survives a battle and
/// round-trips through save export/import. The live battle never does.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub struct PlayerState {
    pub coins: u64,
    /// Owned copies keyed by `"cardId_rarityValue"`.
    pub inventory: BTreeMap<String, u64>,
    /// Discovered species ids; the gacha draws only from these.
    pub known_ids: Vec<String>,
    /// Awakening level per card id (a Legendary-only mechanic).
    pub awakening: BTreeMap<String, u8>,
    pub starter_claimed: bool,
    pub progress: AdventureProgress,
}

impl Default for PlayerState {
    fn default() -> Self {
        PlayerState {
            coins: 0,
            inventory: BTreeMap::new(),
            known_ids: starter_dex_ids().iter().map(|s| s.to_string()).collect(),
            awakening: BTreeMap::new(),
            starter_claimed: false,
            progress: AdventureProgress::default(),
        }
    }
}

pub fn inventory_key(card_id: &str, rarity: Rarity) -> String {
    format!("{}_{}", card_id, rarity.value())
}

/// Split an inventory key back into card id and rarity. Card ids never
/// contain `_`, so the last segment is always the rarity digit.
pub fn parse_inventory_key(key: &str) -> Option<(&str, Rarity)> {
    let (card_id, tier) = key.rsplit_once('_')?;
    let rarity = Rarity::from_value(tier.parse().ok()?)?;
    Some((card_id, rarity))
}

pub struct GameState {
    pub player: PlayerState,
    pub battle: Option<BattleState>,
    /// Whether the current battle's outcome has already been applied to the
    /// persistent state. Reset on every battle start.
    outcome_settled: bool,
    pub rng: Lcg64Xsh32,
    pub roster: Vec<CardData>,
}

pub fn seed_bytes(seed: u64) -> [u8; 16] {
    let mut bytes = [0u8; 16];
    bytes[0..8].copy_from_slice(&seed.to_le_bytes());
    bytes[8..16].copy_from_slice(&seed.to_le_bytes());
    bytes
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    pub fn new() -> Self {
        GameState {
            player: PlayerState::default(),
            battle: None,
            outcome_settled: false,
            rng: Lcg64Xsh32::from_seed(seed_bytes(0)),
            roster: master_cards(),
        }
    }

    pub fn set_seed(&mut self, seed: u64) {
        self.rng = Lcg64Xsh32::from_seed(seed_bytes(seed));
    }

    fn card(&self, card_id: &str) -> Option<&CardData> {
        self.roster.iter().find(|c| c.id == card_id)
    }

    fn add_to_inventory(&mut self, card_id: &str, rarity: Rarity) {
        *self
            .player
            .inventory
            .entry(inventory_key(card_id, rarity))
            .or_insert(0) += 1;
    }

    fn owns_any_copy(&self, card_id: &str) -> bool {
        let prefix = format!("{}_", card_id);
        self.player
            .inventory
            .iter()
            .any(|(k, &n)| n > 0 && k.starts_with(&prefix))
    }

    fn draw_one(&mut self) -> Result<DrawResult, String> {
        // known_ids stays sorted, so the pick depends only on the RNG.
        if self.player.known_ids.is_empty() {
            return Err("no species discovered yet".to_string());
        }
        let card_id = self.player.known_ids[self.rng.gen_range(0..self.player.known_ids.len())]
            .clone();
        let rarity = roll_rarity(self.rng.gen::<f64>());
        let is_new = !self.owns_any_copy(&card_id);
        self.add_to_inventory(&card_id, rarity);
        let card = self
            .card(&card_id)
            .ok_or_else(|| format!("unknown card id {}", card_id))?
            .clone();
        Ok(DrawResult {
            card,
            rarity,
            is_new,
        })
    }

    /// One-time starter pack: ten free draws from the starter dex.
    pub fn claim_starter(&mut self) -> Result<Vec<DrawResult>, String> {
        if self.player.starter_claimed {
            return Err("starter pack already claimed".to_string());
        }
        self.player.starter_claimed = true;
        let mut results = Vec::with_capacity(STARTER_PACK_SIZE);
        for _ in 0..STARTER_PACK_SIZE {
            results.push(self.draw_one()?);
        }
        info!("starter pack claimed");
        Ok(results)
    }

    /// Paid draws. Each draw costs 100 and refunds 2, so the effective cost
    /// is 98 per card.
    pub fn buy_draws(&mut self, amount: usize) -> Result<Vec<DrawResult>, String> {
        if amount == 0 {
            return Err("draw amount must be at least 1".to_string());
        }
        if !self.player.starter_claimed {
            return Err("claim the starter pack first".to_string());
        }
        let cost = DRAW_COST * amount as u64;
        if self.player.coins < cost {
            return Err(format!(
                "not enough coins: need {}, have {}",
                cost, self.player.coins
            ));
        }
        self.player.coins -= cost;
        let mut results = Vec::with_capacity(amount);
        for _ in 0..amount {
            results.push(self.draw_one()?);
        }
        self.player.coins += DRAW_REFUND * amount as u64;
        Ok(results)
    }

    /// Pay to reveal up to three previously unknown species, widening the
    /// gacha pool.
    pub fn scout(&mut self) -> Result<Vec<CardData>, String> {
        if self.player.coins < SCOUT_COST {
            return Err(format!(
                "not enough coins: need {}, have {}",
                SCOUT_COST, self.player.coins
            ));
        }
        let mut unknown: Vec<CardData> = self
            .roster
            .iter()
            .filter(|c| !self.player.known_ids.contains(&c.id))
            .cloned()
            .collect();
        if unknown.is_empty() {
            return Err("every species is already discovered".to_string());
        }
        self.player.coins -= SCOUT_COST;
        let mut revealed = Vec::new();
        while revealed.len() < SCOUT_REVEALS && !unknown.is_empty() {
            let pick = self.rng.gen_range(0..unknown.len());
            let card = unknown.swap_remove(pick);
            self.player.known_ids.push(card.id.clone());
            revealed.push(card);
        }
        self.player.known_ids.sort();
        Ok(revealed)
    }

    /// Fuse three copies at one rarity into a single copy one tier up.
    pub fn merge(&mut self, card_id: &str, rarity: Rarity) -> Result<String, String> {
        let next_rarity = rarity
            .next()
            .ok_or_else(|| "Legendary cards cannot be merged".to_string())?;
        let key = inventory_key(card_id, rarity);
        let count = self.player.inventory.get(&key).copied().unwrap_or(0);
        if count < MERGE_COPIES {
            return Err(format!(
                "need {} copies of {} to merge, have {}",
                MERGE_COPIES, key, count
            ));
        }
        *self
            .player
            .inventory
            .get_mut(&key)
            .ok_or_else(|| format!("{} not in inventory", key))? -= MERGE_COPIES;
        let next_key = inventory_key(card_id, next_rarity);
        *self.player.inventory.entry(next_key.clone()).or_insert(0) += 1;
        Ok(next_key)
    }

    /// Spend a spare Legendary copy to raise the card's awakening level.
    pub fn awaken(&mut self, card_id: &str) -> Result<u8, String> {
        let key = inventory_key(card_id, Rarity::Legendary);
        let count = self.player.inventory.get(&key).copied().unwrap_or(0);
        if count <= 1 {
            return Err("awakening needs more than one Legendary copy".to_string());
        }
        let level = self.player.awakening.get(card_id).copied().unwrap_or(0);
        if level >= MAX_AWAKENING {
            return Err("already at the awakening cap".to_string());
        }
        *self
            .player
            .inventory
            .get_mut(&key)
            .ok_or_else(|| format!("{} not in inventory", key))? -= 1;
        let next_level = level + 1;
        self.player.awakening.insert(card_id.to_string(), next_level);
        Ok(next_level)
    }

    /// Start a battle from a team of owned inventory keys.
    pub fn start_battle(
        &mut self,
        team_keys: &[String],
        kind: BattleKind,
    ) -> Result<BattleState, String> {
        if let Some(battle) = &self.battle {
            if !battle.is_terminal() {
                return Err("a battle is already in progress".to_string());
            }
        }
        if team_keys.len() > MAX_TEAM_SIZE {
            return Err(format!("a team holds at most {} cards", MAX_TEAM_SIZE));
        }
        let mut team = Vec::with_capacity(team_keys.len());
        for key in team_keys {
            if team_keys.iter().filter(|k| *k == key).count() > 1 {
                return Err(format!("{} selected twice", key));
            }
            let (card_id, rarity) =
                parse_inventory_key(key).ok_or_else(|| format!("malformed key {}", key))?;
            if self.player.inventory.get(key).copied().unwrap_or(0) == 0 {
                return Err(format!("{} not in inventory", key));
            }
            let card = self
                .card(card_id)
                .ok_or_else(|| format!("unknown card id {}", card_id))?
                .clone();
            let awakening = self.player.awakening.get(card_id).copied().unwrap_or(0);
            team.push((card, rarity, awakening));
        }
        let battle = start_battle(
            team,
            kind,
            &self.player.progress,
            &self.roster,
            &zones(),
            &mut self.rng,
        )?;
        info!(
            "battle started: kind={:?} zone={} stage={}",
            kind, self.player.progress.zone_index, self.player.progress.stage
        );
        self.outcome_settled = false;
        self.battle = Some(battle.clone());
        Ok(battle)
    }

    pub fn use_skill(&mut self, slot: usize) -> Result<BattleState, String> {
        let battle = self
            .battle
            .take()
            .ok_or_else(|| "no battle in progress".to_string())?;
        let next = resolve_player_action(battle, slot, &mut self.rng);
        self.battle = Some(next.clone());
        self.settle_outcome();
        Ok(next)
    }

    /// Fire the deferred continuation, if any. Returns the battle after the
    /// step, or `None` when the step tore the battle down.
    pub fn advance_battle(&mut self) -> Result<Option<BattleState>, String> {
        let battle = self
            .battle
            .take()
            .ok_or_else(|| "no battle in progress".to_string())?;
        match battle.pending {
            Some(PendingAction::EnemyTurn) => {
                let next = resolve_enemy_turn(battle, &mut self.rng);
                self.battle = Some(next.clone());
                self.settle_outcome();
                Ok(Some(next))
            }
            Some(PendingAction::Teardown) => {
                self.battle = None;
                Ok(None)
            }
            None => {
                self.battle = Some(battle.clone());
                Ok(Some(battle))
            }
        }
    }

    pub fn switch_active(&mut self, new_index: usize) -> Result<BattleState, String> {
        let battle = self
            .battle
            .take()
            .ok_or_else(|| "no battle in progress".to_string())?;
        let next = resolve_switch(battle, new_index);
        self.battle = Some(next.clone());
        Ok(next)
    }

    pub fn run_away(&mut self) -> Result<BattleState, String> {
        let battle = self
            .battle
            .take()
            .ok_or_else(|| "no battle in progress".to_string())?;
        let next = resolve_run(battle);
        self.battle = Some(next.clone());
        Ok(next)
    }

    /// Drop the battle session. A pending enemy turn is flushed first so an
    /// already-committed turn keeps its effects.
    pub fn leave_battle(&mut self) -> Result<(), String> {
        let battle = self
            .battle
            .take()
            .ok_or_else(|| "no battle in progress".to_string())?;
        if battle.pending == Some(PendingAction::EnemyTurn) {
            let flushed = resolve_enemy_turn(battle, &mut self.rng);
            self.battle = Some(flushed);
            self.settle_outcome();
        }
        self.battle = None;
        Ok(())
    }

    /// Apply a won battle's effects to the persistent state, exactly once.
    fn settle_outcome(&mut self) {
        let Some(battle) = &mut self.battle else {
            return;
        };
        if battle.status != BattleStatus::Won || self.outcome_settled {
            return;
        }
        self.outcome_settled = true;
        self.player.coins += battle.reward;
        battle
            .logs
            .push(format!("You earned {} G!", battle.reward));
        if battle.kind == BattleKind::Adventure {
            let unlocked = self
                .player
                .progress
                .apply_victory(battle.is_boss, zones().len());
            if unlocked {
                battle.logs.push("A new zone is now open!".to_string());
            }
        }
        info!("battle won, reward {}", battle.reward);
    }
}

/// Everything a client needs to render the out-of-battle screens.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub struct GameView {
    pub coins: u64,
    pub inventory: BTreeMap<String, u64>,
    pub known_cards: Vec<CardData>,
    pub awakening: BTreeMap<String, u8>,
    pub starter_claimed: bool,
    pub progress: AdventureProgress,
    pub battle_in_progress: bool,
}

#[openapi]
#[get("/game")]
pub async fn get_game(
    game_state: &rocket::State<std::sync::Arc<rocket::futures::lock::Mutex<GameState>>>,
) -> Json<GameView> {
    let gs = game_state.lock().await;
    let known_cards = gs
        .roster
        .iter()
        .filter(|c| gs.player.known_ids.contains(&c.id))
        .cloned()
        .collect();
    Json(GameView {
        coins: gs.player.coins,
        inventory: gs.player.inventory.clone(),
        known_cards,
        awakening: gs.player.awakening.clone(),
        starter_claimed: gs.player.starter_claimed,
        progress: gs.player.progress.clone(),
        battle_in_progress: gs.battle.is_some(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stocked_state() -> GameState {
        let mut gs = GameState::new();
        gs.player.starter_claimed = true;
        gs.player.coins = 1_000;
        gs
    }

    #[test]
    fn inventory_keys_round_trip() {
        let key = inventory_key("charmander", Rarity::Epic);
        assert_eq!(key, "charmander_4");
        let (id, rarity) = parse_inventory_key(&key).unwrap();
        assert_eq!(id, "charmander");
        assert_eq!(rarity, Rarity::Epic);
        assert!(parse_inventory_key("charmander").is_none());
        assert!(parse_inventory_key("charmander_9").is_none());
    }

    #[test]
    fn starter_pack_is_one_time_and_free() {
        let mut gs = GameState::new();
        let results = gs.claim_starter().unwrap();
        assert_eq!(results.len(), STARTER_PACK_SIZE);
        assert_eq!(gs.player.coins, 0);
        assert_eq!(
            gs.player.inventory.values().sum::<u64>(),
            STARTER_PACK_SIZE as u64
        );
        assert!(gs.claim_starter().is_err());
    }

    #[test]
    fn paid_draws_cost_and_refund() {
        let mut gs = stocked_state();
        let results = gs.buy_draws(5).unwrap();
        assert_eq!(results.len(), 5);
        // 5 * 100 spent, 5 * 2 refunded.
        assert_eq!(gs.player.coins, 1_000 - 500 + 10);
    }

    #[test]
    fn draws_require_starter_and_funds() {
        let mut gs = GameState::new();
        gs.player.coins = 10_000;
        assert!(gs.buy_draws(1).is_err());
        gs.player.starter_claimed = true;
        gs.player.coins = 99;
        assert!(gs.buy_draws(1).is_err());
        assert_eq!(gs.player.coins, 99);
    }

    #[test]
    fn scout_reveals_three_unknowns() {
        let mut gs = stocked_state();
        let before = gs.player.known_ids.len();
        let revealed = gs.scout().unwrap();
        assert_eq!(revealed.len(), SCOUT_REVEALS);
        assert_eq!(gs.player.known_ids.len(), before + SCOUT_REVEALS);
        assert_eq!(gs.player.coins, 1_000 - SCOUT_COST);
        for card in &revealed {
            assert!(gs.player.known_ids.contains(&card.id));
        }
        let mut sorted = gs.player.known_ids.clone();
        sorted.sort();
        assert_eq!(gs.player.known_ids, sorted);
    }

    #[test]
    fn scout_exhausts_the_dex() {
        let mut gs = stocked_state();
        gs.player.coins = 1_000_000;
        while gs.player.known_ids.len() < gs.roster.len() {
            gs.scout().unwrap();
        }
        assert!(gs.scout().is_err());
    }

    #[test]
    fn merge_consumes_three_and_grants_next_tier() {
        let mut gs = stocked_state();
        gs.player
            .inventory
            .insert(inventory_key("pidgey", Rarity::Common), 4);
        let next_key = gs.merge("pidgey", Rarity::Common).unwrap();
        assert_eq!(next_key, inventory_key("pidgey", Rarity::Uncommon));
        assert_eq!(gs.player.inventory["pidgey_1"], 1);
        assert_eq!(gs.player.inventory["pidgey_2"], 1);
        // Legendary never merges; short stacks never merge.
        assert!(gs.merge("pidgey", Rarity::Legendary).is_err());
        assert!(gs.merge("pidgey", Rarity::Common).is_err());
    }

    #[test]
    fn awaken_needs_a_spare_legendary_and_caps_at_five() {
        let mut gs = stocked_state();
        let key = inventory_key("mewtwo", Rarity::Legendary);
        gs.player.inventory.insert(key.clone(), 1);
        assert!(gs.awaken("mewtwo").is_err());
        gs.player.inventory.insert(key.clone(), 7);
        for expected in 1..=5u8 {
            assert_eq!(gs.awaken("mewtwo").unwrap(), expected);
        }
        assert_eq!(gs.player.inventory[&key], 2);
        assert!(gs.awaken("mewtwo").is_err());
    }

    #[test]
    fn battle_start_validates_team() {
        let mut gs = stocked_state();
        assert!(gs
            .start_battle(&["pidgey_1".to_string()], BattleKind::Adventure)
            .is_err());
        gs.player.inventory.insert("pidgey_1".to_string(), 1);
        let battle = gs
            .start_battle(&["pidgey_1".to_string()], BattleKind::Adventure)
            .unwrap();
        assert_eq!(battle.player_team.len(), 1);
        // A second start while one is live is rejected.
        assert!(gs
            .start_battle(&["pidgey_1".to_string()], BattleKind::Adventure)
            .is_err());
    }

    #[test]
    fn duplicate_team_keys_are_rejected() {
        let mut gs = stocked_state();
        gs.player.inventory.insert("pidgey_1".to_string(), 5);
        let team = vec!["pidgey_1".to_string(), "pidgey_1".to_string()];
        assert!(gs.start_battle(&team, BattleKind::Adventure).is_err());
    }

    #[test]
    fn won_battle_settles_exactly_once() {
        let mut gs = stocked_state();
        gs.player.inventory.insert("pidgey_1".to_string(), 1);
        gs.start_battle(&["pidgey_1".to_string()], BattleKind::Adventure)
            .unwrap();
        // Force a win on the next hit.
        gs.battle.as_mut().unwrap().enemy.current_hp = 1;
        let coins_before = gs.player.coins;
        let stage_before = gs.player.progress.stage;
        let battle = gs.use_skill(0).unwrap();
        assert_eq!(battle.status, BattleStatus::Won);
        let reward = battle.reward;
        assert_eq!(gs.player.coins, coins_before + reward);
        assert_eq!(gs.player.progress.stage, stage_before + 1);
        // Settling again changes nothing.
        gs.settle_outcome();
        assert_eq!(gs.player.coins, coins_before + reward);
        assert_eq!(gs.player.progress.stage, stage_before + 1);
    }

    #[test]
    fn leaving_with_a_pending_enemy_turn_flushes_it_first() {
        let mut gs = stocked_state();
        gs.player.inventory.insert("pidgey_1".to_string(), 1);
        gs.start_battle(&["pidgey_1".to_string()], BattleKind::Adventure)
            .unwrap();
        // Win is decided by the player's hit; the flush settles it even if
        // the client leaves before advancing.
        gs.battle.as_mut().unwrap().enemy.current_hp = 1;
        let battle = gs.use_skill(0).unwrap();
        assert_eq!(battle.status, BattleStatus::Won);
        let coins_after_win = gs.player.coins;
        gs.leave_battle().unwrap();
        assert!(gs.battle.is_none());
        assert_eq!(gs.player.coins, coins_after_win);
        assert!(gs.leave_battle().is_err());
    }

    #[test]
    fn same_seed_same_draws() {
        let mut a = GameState::new();
        let mut b = GameState::new();
        a.set_seed(123);
        b.set_seed(123);
        let draws_a = a.claim_starter().unwrap();
        let draws_b = b.claim_starter().unwrap();
        let ids_a: Vec<_> = draws_a.iter().map(|d| (&d.card.id, d.rarity)).collect();
        let ids_b: Vec<_> = draws_b.iter().map(|d| (&d.card.id, d.rarity)).collect();
        assert_eq!(ids_a, ids_b);
    }
}
