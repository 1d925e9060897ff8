//! Battle-scoped data model: participants, buffs, and the aggregate state.
//!
//! Everything here is ephemeral. A `BattleState` is created by the battle
//! initializer, advanced only through the pure transition functions in
//! `resolve`, and dropped when the battle ends; it is never persisted.

use rocket::serde::{Deserialize, Serialize};
use rocket_okapi::JsonSchema;

use crate::content::cards::CardData;
use crate::content::skills::{Skill, SkillEffect};
use crate::content::Rarity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub enum BattleStatus {
    Active,
    Won,
    Lost,
    /// Transient animation-hold state while fleeing; always followed by
    /// teardown of the battle session.
    Running,
    /// The active participant fainted but a teammate can still fight.
    WaitingForSwitch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub enum BattleKind {
    Adventure,
    Training,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub enum BuffKind {
    AtkBoost,
    DefBreak,
}

/// A timed, stacking percentage modifier. Same-kind buffs sum their
/// magnitudes; the list preserves application order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub struct Buff {
    pub kind: BuffKind,
    pub magnitude: f64,
    pub remaining_turns: u8,
}

/// A deferred continuation replacing the original's wall-clock timers.
/// At most one is ever outstanding; `POST /battle/advance` fires it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub enum PendingAction {
    EnemyTurn,
    Teardown,
}

/// Presentation metadata for the most recent resolved effect. Never read
/// back by the engine itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub struct HitMeta {
    pub value: i64,
    pub effect: SkillEffect,
    pub is_crit: bool,
    pub is_effective: bool,
}

/// A combat entity derived from a card + rarity + awakening level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub struct Participant {
    pub card: CardData,
    pub rarity: Rarity,
    pub awakening_level: u8,
    pub max_hp: i64,
    pub attack: i64,
    pub current_hp: i64,
    pub skills: [Skill; 3],
}

impl Participant {
    pub fn is_alive(&self) -> bool {
        self.current_hp > 0
    }

    /// Reduce HP, clamped to `[0, max_hp]`.
    pub fn apply_damage(&mut self, amount: i64) {
        self.current_hp = (self.current_hp - amount).clamp(0, self.max_hp);
    }

    /// Restore HP, clamped to `[0, max_hp]`.
    pub fn apply_heal(&mut self, amount: i64) {
        self.current_hp = (self.current_hp + amount).clamp(0, self.max_hp);
    }

    /// Rarity-gated slot locks, independent of cooldown: slot 1 opens at
    /// Uncommon, slot 2 at Epic.
    pub fn slot_unlocked(&self, slot: usize) -> bool {
        match slot {
            0 => true,
            1 => self.rarity >= Rarity::Uncommon,
            2 => self.rarity >= Rarity::Epic,
            _ => false,
        }
    }
}

/// The aggregate battle session state. Exactly one live instance exists at
/// a time, owned by the game state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub struct BattleState {
    /// Ordered roster of up to 6; `active_index` points at the fighter.
    pub player_team: Vec<Participant>,
    pub active_index: usize,
    pub enemy: Participant,

    pub turn: u64,
    /// Append-only narration of everything that happened.
    pub logs: Vec<String>,
    pub is_player_turn: bool,
    pub status: BattleStatus,

    pub is_boss: bool,
    pub kind: BattleKind,
    pub reward: u64,

    pub player_cooldowns: [u8; 3],
    pub enemy_cooldowns: [u8; 3],
    pub player_buffs: Vec<Buff>,
    pub enemy_buffs: Vec<Buff>,

    pub pending: Option<PendingAction>,

    pub last_player_hit: Option<HitMeta>,
    pub last_enemy_hit: Option<HitMeta>,
}

impl BattleState {
    pub fn active(&self) -> &Participant {
        &self.player_team[self.active_index]
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.status, BattleStatus::Won | BattleStatus::Lost)
    }

    /// The authoritative input gate: the player may act only on an active
    /// battle, on their turn, with no deferred continuation outstanding.
    pub fn accepts_player_input(&self) -> bool {
        self.status == BattleStatus::Active && self.is_player_turn && self.pending.is_none()
    }
}
