//! Pure turn resolution.
//!
//! Every function here takes the current battle state plus an action and
//! returns the next state. Illegal actions (wrong phase, locked slot, skill
//! on cooldown) return the state unchanged instead of erroring; the HTTP
//! layer reports those as no-ops. All randomness flows through the caller's
//! generator, so a fixed seed replays a battle exactly.

use rand::Rng;
use rand_pcg::Lcg64Xsh32;

use crate::content::skills::{Skill, SkillEffect};
use crate::content::type_chart::type_multiplier;

use super::types::{
    BattleState, BattleStatus, Buff, BuffKind, HitMeta, Participant, PendingAction,
};

const DAMAGE_SPREAD_LOW: f64 = 0.9;
const DAMAGE_SPREAD_HIGH: f64 = 1.1;
const CRIT_CHANCE: f64 = 0.25;
const CRIT_MULT: f64 = 1.5;
const LIFESTEAL_RATIO: f64 = 0.25;
const BUFF_DURATION: u8 = 3;

/// Awakening milestones that unlock the passive combat bonuses.
const AWAKEN_CRIT_LEVEL: u8 = 1;
const AWAKEN_LIFESTEAL_LEVEL: u8 = 3;

struct SkillOutcome {
    hit: Option<HitMeta>,
    attacker_buff: Option<Buff>,
    defender_buff: Option<Buff>,
    lines: Vec<String>,
}

/// The player's active participant uses the skill in `slot`.
pub fn resolve_player_action(
    state: BattleState,
    slot: usize,
    rng: &mut Lcg64Xsh32,
) -> BattleState {
    if !state.accepts_player_input() || slot >= 3 {
        return state;
    }
    if !state.active().slot_unlocked(slot) || state.player_cooldowns[slot] > 0 {
        return state;
    }

    let mut next = state;
    let skill = next.active().skills[slot].clone();
    // The used slot locks for `cooldown` full turns; the +1 is consumed by
    // this turn's own end-of-cycle tick.
    next.player_cooldowns[slot] = skill.cooldown + 1;
    next.logs
        .push(format!("{} used {}!", next.active().card.name, skill.name));

    let atk_boost = boost_sum(&next.player_buffs, BuffKind::AtkBoost);
    let def_break = boost_sum(&next.enemy_buffs, BuffKind::DefBreak);
    let active_index = next.active_index;
    let outcome = apply_skill(
        &mut next.player_team[active_index],
        &mut next.enemy,
        &skill,
        atk_boost,
        def_break,
        true,
        rng,
    );
    if let Some(buff) = outcome.attacker_buff {
        next.player_buffs.push(buff);
    }
    if let Some(buff) = outcome.defender_buff {
        next.enemy_buffs.push(buff);
    }
    next.logs.extend(outcome.lines);
    next.last_player_hit = outcome.hit;

    next.is_player_turn = false;
    check_battle_end(&mut next);
    if next.status == BattleStatus::Active {
        next.pending = Some(PendingAction::EnemyTurn);
    }
    next
}

/// The enemy's deferred turn. Picks uniformly among off-cooldown slots,
/// then closes the turn cycle: both cooldown tracks tick down, both buff
/// lists decay, and the turn counter advances.
pub fn resolve_enemy_turn(state: BattleState, rng: &mut Lcg64Xsh32) -> BattleState {
    if state.status != BattleStatus::Active {
        return state;
    }
    let mut next = state;
    next.pending = None;

    let ready: Vec<usize> = (0..3).filter(|&s| next.enemy_cooldowns[s] == 0).collect();
    // Slot 0 is cooldown-free in every shipped loadout, so the fallback is
    // unreachable with current content; it keeps custom loadouts safe.
    let slot = if ready.is_empty() {
        0
    } else {
        ready[rng.gen_range(0..ready.len())]
    };
    let skill = next.enemy.skills[slot].clone();
    next.enemy_cooldowns[slot] = skill.cooldown + 1;
    next.logs
        .push(format!("Enemy {} used {}!", next.enemy.card.name, skill.name));

    let atk_boost = boost_sum(&next.enemy_buffs, BuffKind::AtkBoost);
    let def_break = boost_sum(&next.player_buffs, BuffKind::DefBreak);
    let active_index = next.active_index;
    let outcome = apply_skill(
        &mut next.enemy,
        &mut next.player_team[active_index],
        &skill,
        atk_boost,
        def_break,
        false,
        rng,
    );
    if let Some(buff) = outcome.attacker_buff {
        next.enemy_buffs.push(buff);
    }
    if let Some(buff) = outcome.defender_buff {
        next.player_buffs.push(buff);
    }
    next.logs.extend(outcome.lines);
    next.last_enemy_hit = outcome.hit;

    tick_cooldowns(&mut next.player_cooldowns);
    tick_cooldowns(&mut next.enemy_cooldowns);
    decay_buffs(&mut next.player_buffs);
    decay_buffs(&mut next.enemy_buffs);

    next.turn += 1;
    next.is_player_turn = true;
    check_battle_end(&mut next);
    next
}

/// Swap the active participant. Allowed on the player's turn or while the
/// battle waits for a replacement; either way it spends the turn, so the
/// enemy acts next. Switching clears the player's buffs and cooldowns.
pub fn resolve_switch(state: BattleState, new_index: usize) -> BattleState {
    let switchable = state.accepts_player_input()
        || (state.status == BattleStatus::WaitingForSwitch && state.pending.is_none());
    if !switchable
        || new_index >= state.player_team.len()
        || new_index == state.active_index
        || !state.player_team[new_index].is_alive()
    {
        return state;
    }

    let mut next = state;
    next.active_index = new_index;
    next.player_buffs.clear();
    next.player_cooldowns = [0; 3];
    next.logs.push(format!("Go, {}!", next.active().card.name));
    next.status = BattleStatus::Active;
    next.is_player_turn = false;
    next.pending = Some(PendingAction::EnemyTurn);
    next
}

/// Flee the battle. Bosses cannot be fled from; otherwise the battle enters
/// the transient `Running` state and a teardown is deferred.
pub fn resolve_run(state: BattleState) -> BattleState {
    if state.is_boss || !state.accepts_player_input() {
        return state;
    }
    let mut next = state;
    next.logs.push("Got away safely!".to_string());
    next.status = BattleStatus::Running;
    next.is_player_turn = false;
    next.pending = Some(PendingAction::Teardown);
    next
}

/// Settle faints into a terminal or waiting status. Terminal states cancel
/// any deferred continuation.
fn check_battle_end(state: &mut BattleState) {
    if !state.enemy.is_alive() {
        state
            .logs
            .push(format!("Enemy {} fainted! You win!", state.enemy.card.name));
        state.status = BattleStatus::Won;
        state.pending = None;
        return;
    }
    if state.active().is_alive() {
        return;
    }
    state
        .logs
        .push(format!("{} fainted!", state.active().card.name));
    let has_backup = state
        .player_team
        .iter()
        .enumerate()
        .any(|(i, p)| i != state.active_index && p.is_alive());
    if has_backup {
        state.status = BattleStatus::WaitingForSwitch;
        state.pending = None;
        state.is_player_turn = true;
    } else {
        state.logs.push("Your whole team fainted...".to_string());
        state.status = BattleStatus::Lost;
        state.pending = None;
    }
}

fn apply_skill(
    attacker: &mut Participant,
    defender: &mut Participant,
    skill: &Skill,
    atk_boost: f64,
    def_break: f64,
    awakening_bonuses: bool,
    rng: &mut Lcg64Xsh32,
) -> SkillOutcome {
    let mut outcome = SkillOutcome {
        hit: None,
        attacker_buff: None,
        defender_buff: None,
        lines: Vec::new(),
    };
    match skill.effect {
        SkillEffect::Damage => {
            let type_mult = type_multiplier(attacker.card.element, defender.card.element);
            let spread = rng.gen_range(DAMAGE_SPREAD_LOW..DAMAGE_SPREAD_HIGH);
            let is_crit = awakening_bonuses
                && attacker.awakening_level >= AWAKEN_CRIT_LEVEL
                && rng.gen_bool(CRIT_CHANCE);
            let crit_mult = if is_crit { CRIT_MULT } else { 1.0 };
            let damage = (attacker.attack as f64
                * skill.power
                * type_mult
                * spread
                * crit_mult
                * (1.0 + atk_boost)
                * (1.0 + def_break))
                .floor() as i64;
            defender.apply_damage(damage);
            if is_crit {
                outcome.lines.push("Critical hit!".to_string());
            }
            if type_mult > 1.0 {
                outcome.lines.push("It's super effective!".to_string());
            } else if type_mult == 0.0 {
                outcome
                    .lines
                    .push(format!("It doesn't affect {}...", defender.card.name));
            } else if type_mult < 1.0 {
                outcome.lines.push("It's not very effective...".to_string());
            }
            outcome.lines.push(format!("It dealt {damage} damage!"));
            if awakening_bonuses
                && attacker.awakening_level >= AWAKEN_LIFESTEAL_LEVEL
                && damage > 0
            {
                let drained = (damage as f64 * LIFESTEAL_RATIO).floor() as i64;
                attacker.apply_heal(drained);
                outcome
                    .lines
                    .push(format!("{} drained {} HP!", attacker.card.name, drained));
            }
            outcome.hit = Some(HitMeta {
                value: damage,
                effect: SkillEffect::Damage,
                is_crit,
                is_effective: type_mult > 1.0,
            });
        }
        SkillEffect::Heal => {
            let spread = rng.gen_range(DAMAGE_SPREAD_LOW..DAMAGE_SPREAD_HIGH);
            let healed = (attacker.attack as f64 * skill.power * spread).floor() as i64;
            attacker.apply_heal(healed);
            outcome
                .lines
                .push(format!("{} restored {} HP!", attacker.card.name, healed));
            outcome.hit = Some(HitMeta {
                value: healed,
                effect: SkillEffect::Heal,
                is_crit: false,
                is_effective: false,
            });
        }
        SkillEffect::AtkBoost => {
            outcome.attacker_buff = Some(Buff {
                kind: BuffKind::AtkBoost,
                magnitude: skill.power - 1.0,
                remaining_turns: BUFF_DURATION,
            });
            outcome
                .lines
                .push(format!("{}'s attack rose!", attacker.card.name));
        }
        SkillEffect::DefBreak => {
            outcome.defender_buff = Some(Buff {
                kind: BuffKind::DefBreak,
                magnitude: skill.power,
                remaining_turns: BUFF_DURATION,
            });
            outcome
                .lines
                .push(format!("{}'s defense fell!", defender.card.name));
        }
    }
    outcome
}

fn boost_sum(buffs: &[Buff], kind: BuffKind) -> f64 {
    buffs
        .iter()
        .filter(|b| b.kind == kind)
        .map(|b| b.magnitude)
        .sum()
}

fn tick_cooldowns(cooldowns: &mut [u8; 3]) {
    for cd in cooldowns.iter_mut() {
        *cd = cd.saturating_sub(1);
    }
}

fn decay_buffs(buffs: &mut Vec<Buff>) {
    for buff in buffs.iter_mut() {
        buff.remaining_turns = buff.remaining_turns.saturating_sub(1);
    }
    buffs.retain(|b| b.remaining_turns > 0);
}
