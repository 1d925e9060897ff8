//! The skill catalog: one fixed 3-slot loadout per element.
//!
//! Slot 0 is always a cooldown-free basic attack, slot 1 a support move and
//! slot 2 an ultimate. Elements without a bespoke loadout fall back to the
//! default one.

use rocket::serde::{Deserialize, Serialize};
use rocket_okapi::JsonSchema;

use super::Element;

/// What a skill does when it resolves. Exhaustively matched by the turn
/// resolver, so new effect kinds are a compile-time-checked change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub enum SkillEffect {
    /// Deal `power`-scaled damage to the opposing side.
    Damage,
    /// Restore `power`-scaled HP to the user.
    Heal,
    /// Grant the user's side an attack buff of `power - 1` for 3 turns.
    AtkBoost,
    /// Inflict a defense break of `power` on the opposing side for 3 turns.
    DefBreak,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub struct Skill {
    pub name: String,
    pub description: String,
    /// Damage/heal multiplier, or buff magnitude encoding (see `SkillEffect`).
    pub power: f64,
    /// Cooldown in turns; 0 means usable every turn.
    pub cooldown: u8,
    pub effect: SkillEffect,
}

fn skill(name: &str, description: &str, power: f64, cooldown: u8, effect: SkillEffect) -> Skill {
    Skill {
        name: name.to_string(),
        description: description.to_string(),
        power,
        cooldown,
        effect,
    }
}

/// Resolve the fixed 3-slot loadout for an element.
pub fn skill_loadout(element: Element) -> [Skill; 3] {
    use SkillEffect::*;
    match element {
        Element::Fire => [
            skill("Ember", "Shoots a small burst of flame", 1.0, 0, Damage),
            skill("Flame Charge", "Cloaks itself in fire, raising attack", 1.5, 2, AtkBoost),
            skill("Fire Blast", "Unleashes a huge star-shaped blaze", 2.5, 4, Damage),
        ],
        Element::Water => [
            skill("Water Gun", "Sprays a jet of water", 1.0, 0, Damage),
            skill("Aqua Ring", "Veils itself in water, restoring HP", 2.2, 5, Heal),
            skill("Hydro Pump", "Blasts a crushing torrent of water", 2.5, 4, Damage),
        ],
        Element::Grass => [
            skill("Vine Whip", "Strikes with slender whip-like vines", 1.0, 0, Damage),
            skill("Synthesis", "Restores the body, recovering HP", 2.4, 5, Heal),
            skill("Solar Beam", "Gathers light and fires a mighty beam", 2.8, 4, Damage),
        ],
        Element::Electric => [
            skill("Thunder Shock", "Jolts the foe with electricity", 1.0, 0, Damage),
            skill("Charge", "Stores electricity, raising attack", 1.5, 2, AtkBoost),
            skill("Thunder", "Drops a ferocious lightning bolt", 2.6, 4, Damage),
        ],
        Element::Psychic => [
            skill("Confusion", "Strikes with a weak telekinetic force", 1.0, 0, Damage),
            skill("Calm Mind", "Steadies the mind, raising attack", 1.5, 2, AtkBoost),
            skill("Psystrike", "Fires a wave of overwhelming psychic power", 2.5, 4, Damage),
        ],
        Element::Ghost => [
            skill("Lick", "Licks the foe with its long tongue", 1.0, 0, Damage),
            skill("Confuse Ray", "Emits an eerie light that breaks defense", 0.5, 2, DefBreak),
            skill("Shadow Ball", "Hurls a blob of shadow", 2.4, 4, Damage),
        ],
        Element::Normal => [
            skill("Tackle", "Charges with its whole body", 1.0, 0, Damage),
            skill("Recover", "Regenerates cells, restoring HP", 2.2, 5, Heal),
            skill("Hyper Beam", "Fires a devastating beam of energy", 3.0, 5, Damage),
        ],
        Element::Rock => [
            skill("Rock Throw", "Hurls a rock at the foe", 1.0, 0, Damage),
            skill("Harden", "Braces its body, recovering a little", 2.0, 4, Heal),
            skill("Rock Slide", "Drops enormous boulders", 2.5, 4, Damage),
        ],
        Element::Bug => [
            skill("String Shot", "Binds the foe with sticky silk", 1.0, 0, Damage),
            skill("Quiver Dance", "A mystic dance that sharply raises attack", 1.8, 3, AtkBoost),
            skill("Bug Buzz", "Attacks with a resonating shockwave", 2.4, 4, Damage),
        ],
        Element::Fighting => [
            skill("Karate Chop", "Strikes with a sharp chop", 1.0, 0, Damage),
            skill("Bulk Up", "Tenses its muscles, raising attack", 1.5, 2, AtkBoost),
            skill("Dynamic Punch", "Throws a full-power explosive punch", 2.8, 4, Damage),
        ],
        Element::Poison => [
            skill("Acid", "Sprays corrosive acid", 1.0, 0, Damage),
            skill("Minimize", "Shrinks away from harm, recovering HP", 1.5, 2, Heal),
            skill("Gunk Shot", "Hurls filthy garbage at the foe", 2.5, 4, Damage),
        ],
        Element::Dragon => [
            skill("Dragon Breath", "Exhales a mighty gust", 1.0, 0, Damage),
            skill("Dragon Dance", "A mystic dance that raises attack", 1.5, 2, AtkBoost),
            skill("Outrage", "Rampages with unchecked fury", 3.0, 5, Damage),
        ],
        _ => default_loadout(),
    }
}

/// Loadout for elements without a bespoke skill set.
fn default_loadout() -> [Skill; 3] {
    use SkillEffect::*;
    [
        skill("Strike", "Deals basic damage", 1.0, 0, Damage),
        skill("Tactics Shift", "Raises its own attack", 1.3, 2, AtkBoost),
        skill("All-Out Blow", "Deals heavy damage", 2.2, 4, Damage),
    ]
}
