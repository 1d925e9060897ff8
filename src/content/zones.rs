//! The adventure zone roster: ten themed zones, five stages each.

use rocket::serde::{Deserialize, Serialize};
use rocket_okapi::JsonSchema;

use super::{Element, Rarity};

/// Stages per zone; the final stage is the boss stage.
pub const STAGES_PER_ZONE: u32 = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub struct ZoneData {
    pub name: String,
    pub description: String,
    /// Elements eligible for non-boss encounters in this zone.
    pub allowed_elements: Vec<Element>,
    /// Fixed boss card id for the final stage.
    pub boss_id: String,
    /// Lower bound on the boss rarity regardless of the zone curve.
    pub boss_rarity_min: Rarity,
}

fn zone(
    name: &str,
    description: &str,
    allowed_elements: Vec<Element>,
    boss_id: &str,
    boss_rarity_min: Rarity,
) -> ZoneData {
    ZoneData {
        name: name.to_string(),
        description: description.to_string(),
        allowed_elements,
        boss_id: boss_id.to_string(),
        boss_rarity_min,
    }
}

/// The full linear zone sequence.
pub fn zones() -> Vec<ZoneData> {
    use Element::*;
    vec![
        zone(
            "Pallet Outskirts",
            "Where the adventure begins; home to docile creatures.",
            vec![Normal, Flying],
            "pidgeot",
            Rarity::Common,
        ),
        zone(
            "Viridian Forest",
            "A dim, damp forest; a paradise for bug creatures.",
            vec![Bug, Grass, Poison],
            "beedrill",
            Rarity::Uncommon,
        ),
        zone(
            "Mt. Moon",
            "A mysterious cavern where moon stones are said to fall.",
            vec![Rock, Normal, Poison, Fighting],
            "golem",
            Rarity::Uncommon,
        ),
        zone(
            "Cerulean Cave",
            "A maze of flooded passages; diving is the only way through.",
            vec![Water, Psychic, Ice],
            "blastoise",
            Rarity::Rare,
        ),
        zone(
            "Rock Tunnel",
            "A pitch-black tunnel; nothing is visible without a light.",
            vec![Rock, Ground, Fighting],
            "onix",
            Rarity::Rare,
        ),
        zone(
            "Lavender Tower",
            "A resting place for departed souls; ghosts roam here.",
            vec![Ghost, Poison, Psychic],
            "gengar",
            Rarity::Rare,
        ),
        zone(
            "Safari Zone",
            "A nature preserve sheltering rare species.",
            vec![Normal, Grass, Water, Dragon],
            "dragonite",
            Rarity::Epic,
        ),
        zone(
            "Seafoam Islands",
            "Twin islands buried in snow and biting cold.",
            vec![Ice, Water, Psychic],
            "articuno",
            Rarity::Epic,
        ),
        zone(
            "Power Plant",
            "An abandoned plant crackling with wild electricity.",
            vec![Electric, Steel, Poison],
            "zapdos",
            Rarity::Legendary,
        ),
        zone(
            "Victory Road",
            "The final trial on the way to the plateau; strong foes everywhere.",
            vec![Fire, Dragon, Psychic, Fighting, Rock],
            "mewtwo",
            Rarity::Legendary,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::cards::master_cards;

    #[test]
    fn every_boss_exists_in_roster() {
        let roster = master_cards();
        for z in zones() {
            assert!(
                roster.iter().any(|c| c.id == z.boss_id),
                "zone {} has unknown boss {}",
                z.name,
                z.boss_id
            );
        }
    }

    #[test]
    fn every_zone_has_an_element_pool() {
        for z in zones() {
            assert!(!z.allowed_elements.is_empty(), "zone {} has no pool", z.name);
        }
    }
}
