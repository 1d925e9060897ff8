//! Stat derivation from base card data, rarity and awakening level.

use crate::content::Rarity;

/// Normalizes small base HP values (30-160) into battle-scale pools.
const HP_SCALE: f64 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivedStats {
    pub max_hp: i64,
    pub attack: i64,
}

/// Pure stat derivation. Non-decreasing in both rarity and awakening level;
/// all products are floored.
pub fn derive_stats(base_hp: i64, base_attack: i64, rarity: Rarity, awakening_level: u8) -> DerivedStats {
    let rarity_mult = 1.0 + f64::from(rarity.value() - 1) * 0.5;
    let awaken_mult = 1.0 + f64::from(awakening_level) * 0.2;
    DerivedStats {
        max_hp: (base_hp as f64 * HP_SCALE * rarity_mult * awaken_mult).floor() as i64,
        attack: (base_attack as f64 * rarity_mult * awaken_mult).floor() as i64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn common_unawakened_is_base_times_scale() {
        let stats = derive_stats(45, 52, Rarity::Common, 0);
        assert_eq!(stats.max_hp, 540); // 45 * 12 * 1.0 * 1.0
        assert_eq!(stats.attack, 52);
    }

    #[test]
    fn legendary_multiplier_is_three() {
        let stats = derive_stats(100, 100, Rarity::Legendary, 0);
        assert_eq!(stats.max_hp, 3600); // 100 * 12 * 3.0
        assert_eq!(stats.attack, 300);
    }

    #[test]
    fn max_awakening_doubles_legendary() {
        let stats = derive_stats(100, 100, Rarity::Legendary, 5);
        assert_eq!(stats.max_hp, 7200); // 100 * 12 * 3.0 * 2.0
        assert_eq!(stats.attack, 600);
    }

    #[test]
    fn monotone_in_rarity_and_awakening() {
        let mut prev = derive_stats(30, 56, Rarity::Common, 0);
        for tier in 2..=5u8 {
            let rarity = Rarity::from_value(tier).unwrap();
            let next = derive_stats(30, 56, rarity, 0);
            assert!(next.max_hp > prev.max_hp);
            assert!(next.attack >= prev.attack);
            prev = next;
        }
        let mut prev = derive_stats(30, 56, Rarity::Legendary, 0);
        for level in 1..=5u8 {
            let next = derive_stats(30, 56, Rarity::Legendary, level);
            assert!(next.max_hp > prev.max_hp);
            assert!(next.attack >= prev.attack);
            prev = next;
        }
    }

    #[test]
    fn products_are_floored_not_rounded() {
        // 31 * 12 * 1.5 * 1.2 = 669.6 -> 669
        let stats = derive_stats(31, 31, Rarity::Uncommon, 1);
        assert_eq!(stats.max_hp, 669);
        // 31 * 1.5 * 1.2 = 55.8 -> 55
        assert_eq!(stats.attack, 55);
    }
}
