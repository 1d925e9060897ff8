//! Battle initialization: roster construction and opponent selection.

use rand::RngCore;
use rand_pcg::Lcg64Xsh32;

use crate::adventure::AdventureProgress;
use crate::content::cards::CardData;
use crate::content::skills::skill_loadout;
use crate::content::zones::{ZoneData, STAGES_PER_ZONE};
use crate::content::Rarity;

use super::stats::derive_stats;
use super::types::{BattleKind, BattleState, BattleStatus, Participant};

const REWARD_BASE: f64 = 100.0;
const BOSS_HP_MULT: f64 = 3.0;
// Bosses endure longer but hit softer.
const BOSS_ATK_MULT: f64 = 0.8;
const BOSS_REWARD_MULT: f64 = 10.0;

/// Build a participant at full health from a card + rarity + awakening.
pub fn make_participant(card: CardData, rarity: Rarity, awakening_level: u8) -> Participant {
    let stats = derive_stats(card.hp, card.attack, rarity, awakening_level);
    let skills = skill_loadout(card.element);
    Participant {
        rarity,
        awakening_level,
        max_hp: stats.max_hp,
        attack: stats.attack,
        current_hp: stats.max_hp,
        skills,
        card,
    }
}

/// Deterministic non-boss opponent for an adventure stage.
///
/// The pool is the zone's allowed elements minus the boss, sorted by card id
/// for stability, indexed by `(zone_index*100 + stage) % len`; the same stage
/// always yields the same species.
pub fn stage_enemy(zone_index: usize, stage: u32, zone: &ZoneData, roster: &[CardData]) -> CardData {
    if stage == STAGES_PER_ZONE {
        if let Some(boss) = roster.iter().find(|c| c.id == zone.boss_id) {
            return boss.clone();
        }
    }
    let mut pool: Vec<&CardData> = roster
        .iter()
        .filter(|c| zone.allowed_elements.contains(&c.element) && c.id != zone.boss_id)
        .collect();
    if pool.is_empty() {
        pool = roster.iter().collect();
    }
    pool.sort_by(|a, b| a.id.cmp(&b.id));
    let seed = zone_index * 100 + stage as usize;
    pool[seed % pool.len()].clone()
}

/// Uniform random training opponent from the zone's element pool (the full
/// roster if the pool is empty).
fn training_enemy(zone: &ZoneData, roster: &[CardData], rng: &mut Lcg64Xsh32) -> CardData {
    let pool: Vec<&CardData> = roster
        .iter()
        .filter(|c| zone.allowed_elements.contains(&c.element))
        .collect();
    if pool.is_empty() {
        roster[(rng.next_u64() as usize) % roster.len()].clone()
    } else {
        pool[(rng.next_u64() as usize) % pool.len()].clone()
    }
}

/// Opponent rarity curve: one tier every two zones, clamped to the scale;
/// bosses raised by a tier and floored at the zone's configured minimum.
fn opponent_rarity(zone_index: usize, is_boss: bool, zone: &ZoneData) -> Rarity {
    let base = (zone_index / 2 + 1).clamp(1, 5) as u8;
    let tier = if is_boss {
        (base + 1).max(zone.boss_rarity_min.value()).min(5)
    } else {
        base
    };
    Rarity::from_value(tier).unwrap_or(Rarity::Legendary)
}

/// Zone/stage difficulty factor applied on top of the opponent's derived stats.
fn difficulty(zone_index: usize, stage: u32) -> f64 {
    (1.0 + zone_index as f64 * 0.05) * (1.0 + f64::from(stage.saturating_sub(1)) * 0.1)
}

/// Build the initial battle state for a chosen roster.
///
/// Fails only on an empty roster; every in-battle misuse later is a silent
/// no-op instead.
pub fn start_battle(
    roster: Vec<(CardData, Rarity, u8)>,
    kind: BattleKind,
    progress: &AdventureProgress,
    master_roster: &[CardData],
    zones: &[ZoneData],
    rng: &mut Lcg64Xsh32,
) -> Result<BattleState, String> {
    if roster.is_empty() {
        return Err("no team selected".to_string());
    }

    let player_team: Vec<Participant> = roster
        .into_iter()
        .map(|(card, rarity, awakening)| make_participant(card, rarity, awakening))
        .collect();

    let zone_index = progress.zone_index.min(zones.len() - 1);
    let zone = &zones[zone_index];
    let stage = progress.stage;
    let is_boss = kind == BattleKind::Adventure && stage == STAGES_PER_ZONE;

    let enemy_base = match kind {
        BattleKind::Adventure => stage_enemy(zone_index, stage, zone, master_roster),
        BattleKind::Training => training_enemy(zone, master_roster, rng),
    };
    let enemy_rarity = opponent_rarity(zone_index, is_boss, zone);
    let difficulty = difficulty(zone_index, stage);

    // Same derivation as the player side, scaled by the zone curve and the
    // boss multipliers. Enemies never awaken.
    let derived = derive_stats(enemy_base.hp, enemy_base.attack, enemy_rarity, 0);
    let (hp_mult, atk_mult) = if is_boss {
        (BOSS_HP_MULT, BOSS_ATK_MULT)
    } else {
        (1.0, 1.0)
    };
    let enemy_hp = (derived.max_hp as f64 * difficulty * hp_mult).floor() as i64;
    let enemy_attack = (derived.attack as f64 * difficulty * atk_mult).floor() as i64;
    let enemy = Participant {
        rarity: enemy_rarity,
        awakening_level: 0,
        max_hp: enemy_hp,
        attack: enemy_attack,
        current_hp: enemy_hp,
        skills: skill_loadout(enemy_base.element),
        card: enemy_base,
    };

    let reward_mult = if is_boss { BOSS_REWARD_MULT } else { 1.0 };
    let reward =
        (REWARD_BASE * difficulty * reward_mult * f64::from(enemy_rarity.value())).floor() as u64;

    let opening = if is_boss {
        format!("Warning! Zone boss {} appeared!", enemy.card.name)
    } else {
        format!(
            "A wild {} appeared (Lv.{})!",
            enemy.card.name,
            u32::from(enemy_rarity.value()) * 10
        )
    };

    Ok(BattleState {
        player_team,
        active_index: 0,
        enemy,
        turn: 1,
        logs: vec![opening],
        is_player_turn: true,
        status: BattleStatus::Active,
        is_boss,
        kind,
        reward,
        player_cooldowns: [0; 3],
        enemy_cooldowns: [0; 3],
        player_buffs: Vec::new(),
        enemy_buffs: Vec::new(),
        pending: None,
        last_player_hit: None,
        last_enemy_hit: None,
    })
}
