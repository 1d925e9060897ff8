//! Static content tables: card roster, zones, skills and the type chart.
//!
//! Everything in this module is read-only reference data consumed by the
//! battle engine and the meta-game. Nothing here is mutated at runtime.

pub mod cards;
pub mod skills;
pub mod type_chart;
pub mod zones;

use rocket::serde::{Deserialize, Serialize};
use rocket_okapi::JsonSchema;

/// The fixed element vocabulary. Cards, skills and the type chart all key
/// off this enum; unknown elements cannot exist by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub enum Element {
    Fire,
    Water,
    Grass,
    Electric,
    Psychic,
    Ghost,
    Normal,
    Fighting,
    Rock,
    Ground,
    Bug,
    Dragon,
    Poison,
    Ice,
    Flying,
    Steel,
    Dark,
    Fairy,
}

/// Ordinal rarity scale. Doubles as an inventory bucket key and a
/// battle-stat multiplier input.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(crate = "rocket::serde")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    /// Numeric tier, 1 (Common) .. 5 (Legendary).
    pub fn value(self) -> u8 {
        match self {
            Rarity::Common => 1,
            Rarity::Uncommon => 2,
            Rarity::Rare => 3,
            Rarity::Epic => 4,
            Rarity::Legendary => 5,
        }
    }

    pub fn from_value(value: u8) -> Option<Rarity> {
        match value {
            1 => Some(Rarity::Common),
            2 => Some(Rarity::Uncommon),
            3 => Some(Rarity::Rare),
            4 => Some(Rarity::Epic),
            5 => Some(Rarity::Legendary),
            _ => None,
        }
    }

    /// The next tier up, or None at Legendary.
    pub fn next(self) -> Option<Rarity> {
        Rarity::from_value(self.value() + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rarity_values_round_trip() {
        for v in 1..=5u8 {
            let r = Rarity::from_value(v).expect("valid tier");
            assert_eq!(r.value(), v);
        }
        assert_eq!(Rarity::from_value(0), None);
        assert_eq!(Rarity::from_value(6), None);
    }

    #[test]
    fn rarity_ordering_follows_tiers() {
        assert!(Rarity::Common < Rarity::Uncommon);
        assert!(Rarity::Epic < Rarity::Legendary);
        assert_eq!(Rarity::Legendary.next(), None);
        assert_eq!(Rarity::Rare.next(), Some(Rarity::Epic));
    }
}
