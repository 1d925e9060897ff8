//! Engine-level battle scenarios driven straight through the game state.

use pokegen::battle::types::{BattleKind, BattleStatus, PendingAction};
use pokegen::content::Rarity;
use pokegen::game_state::{inventory_key, GameState};

fn state_with_team(cards: &[(&str, Rarity)]) -> (GameState, Vec<String>) {
    let mut gs = GameState::new();
    gs.set_seed(1234);
    gs.player.starter_claimed = true;
    let mut keys = Vec::new();
    for (id, rarity) in cards {
        let key = inventory_key(id, *rarity);
        gs.player.inventory.insert(key.clone(), 1);
        keys.push(key);
    }
    (gs, keys)
}

/// Spam the basic attack and advance until the battle stops accepting that,
/// then return the snapshot. Bounded so a stalled engine fails loudly.
fn play_until_blocked(gs: &mut GameState) -> pokegen::battle::types::BattleState {
    for _ in 0..500 {
        let battle = gs.battle.as_ref().expect("battle is live");
        if battle.accepts_player_input() {
            gs.use_skill(0).unwrap();
        } else if battle.pending == Some(PendingAction::EnemyTurn) {
            gs.advance_battle().unwrap();
        } else {
            return battle.clone();
        }
    }
    panic!("battle never reached a blocked state");
}

#[test]
fn lethal_hit_ends_the_battle_and_pays_out() {
    let (mut gs, keys) = state_with_team(&[("charmander", Rarity::Legendary)]);
    gs.start_battle(&keys, BattleKind::Adventure).unwrap();
    gs.battle.as_mut().unwrap().enemy.current_hp = 1;

    let battle = gs.use_skill(0).unwrap();
    assert_eq!(battle.status, BattleStatus::Won);
    assert!(battle.pending.is_none());
    assert_eq!(gs.player.coins, battle.reward);
    assert_eq!(gs.player.progress.stage, 2);
}

#[test]
fn full_team_wipe_loses() {
    let (mut gs, keys) =
        state_with_team(&[("rattata", Rarity::Common), ("pidgey", Rarity::Common)]);
    gs.start_battle(&keys, BattleKind::Adventure).unwrap();
    {
        let battle = gs.battle.as_mut().unwrap();
        for member in &mut battle.player_team {
            member.current_hp = 1;
            member.attack = 0;
        }
    }

    // The enemy may roll heals or buffs, so loop until the faints land.
    // First faint leaves a backup, so the battle waits for a switch.
    let battle = play_until_blocked(&mut gs);
    assert_eq!(battle.status, BattleStatus::WaitingForSwitch);

    // Second faint with nobody left is a loss.
    gs.switch_active(1).unwrap();
    let battle = play_until_blocked(&mut gs);
    assert_eq!(battle.status, BattleStatus::Lost);
    assert!(battle.pending.is_none());
    assert_eq!(gs.player.coins, 0);
    assert_eq!(gs.player.progress.stage, 1);
}

#[test]
fn switching_clears_buffs_and_cooldowns() {
    let (mut gs, keys) = state_with_team(&[
        ("charmander", Rarity::Epic),
        ("squirtle", Rarity::Epic),
    ]);
    gs.start_battle(&keys, BattleKind::Adventure).unwrap();

    // Charmander's slot 1 is an attack buff with cooldown 2.
    let battle = gs.use_skill(1).unwrap();
    assert_eq!(battle.player_buffs.len(), 1);
    assert_eq!(battle.player_cooldowns[1], 3);
    let battle = gs.advance_battle().unwrap().unwrap();
    if battle.status != BattleStatus::Active {
        return;
    }

    let battle = gs.switch_active(1).unwrap();
    assert_eq!(battle.active_index, 1);
    assert!(battle.player_buffs.is_empty());
    assert_eq!(battle.player_cooldowns, [0; 3]);
    assert_eq!(battle.pending, Some(PendingAction::EnemyTurn));
}

#[test]
fn boss_battles_cannot_be_fled() {
    let (mut gs, keys) = state_with_team(&[("charmander", Rarity::Legendary)]);
    gs.player.progress.stage = 5;
    gs.start_battle(&keys, BattleKind::Adventure).unwrap();
    assert!(gs.battle.as_ref().unwrap().is_boss);

    let battle = gs.run_away().unwrap();
    assert_eq!(battle.status, BattleStatus::Active);
    assert!(battle.pending.is_none());
    assert!(battle.is_player_turn);
}

#[test]
fn fleeing_a_wild_encounter_tears_down() {
    let (mut gs, keys) = state_with_team(&[("charmander", Rarity::Common)]);
    gs.start_battle(&keys, BattleKind::Adventure).unwrap();

    let battle = gs.run_away().unwrap();
    assert_eq!(battle.status, BattleStatus::Running);
    assert_eq!(battle.pending, Some(PendingAction::Teardown));

    let after = gs.advance_battle().unwrap();
    assert!(after.is_none());
    assert!(gs.battle.is_none());
    assert_eq!(gs.player.coins, 0);
}

#[test]
fn boss_win_unlocks_the_next_zone() {
    let (mut gs, keys) = state_with_team(&[("mewtwo", Rarity::Legendary)]);
    gs.player.awakening.insert("mewtwo".to_string(), 5);
    gs.player.progress.stage = 5;
    gs.start_battle(&keys, BattleKind::Adventure).unwrap();
    assert!(gs.battle.as_ref().unwrap().is_boss);
    gs.battle.as_mut().unwrap().enemy.current_hp = 1;

    let battle = gs.use_skill(0).unwrap();
    assert_eq!(battle.status, BattleStatus::Won);
    assert_eq!(gs.player.progress.zone_index, 1);
    assert_eq!(gs.player.progress.stage, 1);
    assert_eq!(gs.player.progress.highest_zone_unlocked, 1);
}

#[test]
fn training_wins_pay_but_never_advance_progress() {
    let (mut gs, keys) = state_with_team(&[("charmander", Rarity::Legendary)]);
    gs.start_battle(&keys, BattleKind::Training).unwrap();
    gs.battle.as_mut().unwrap().enemy.current_hp = 1;

    let battle = gs.use_skill(0).unwrap();
    assert_eq!(battle.status, BattleStatus::Won);
    assert_eq!(gs.player.coins, battle.reward);
    assert_eq!(gs.player.progress.stage, 1);
    assert_eq!(gs.player.progress.zone_index, 0);
}

#[test]
fn input_is_rejected_while_an_enemy_turn_is_pending() {
    let (mut gs, keys) = state_with_team(&[("blastoise", Rarity::Legendary)]);
    gs.start_battle(&keys, BattleKind::Adventure).unwrap();

    let after_attack = gs.use_skill(0).unwrap();
    if after_attack.status != BattleStatus::Active {
        return;
    }
    assert_eq!(after_attack.pending, Some(PendingAction::EnemyTurn));

    // Both another skill and a flee are swallowed until the turn advances.
    let blocked = gs.use_skill(0).unwrap();
    assert_eq!(blocked, after_attack);
    let blocked = gs.run_away().unwrap();
    assert_eq!(blocked, after_attack);
}
