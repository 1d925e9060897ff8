//! Elemental effectiveness lookup.
//!
//! Square chart of attacking element vs defending element. Pairs not listed
//! resolve to the neutral 1.0; a 0.0 entry is an immunity.

use super::Element;

/// Damage multiplier for an attack of `attacker` element hitting a
/// `defender` element.
pub fn type_multiplier(attacker: Element, defender: Element) -> f64 {
    use Element::*;
    match (attacker, defender) {
        (Fire, Grass) | (Fire, Ice) | (Fire, Bug) | (Fire, Steel) => 2.0,
        (Fire, Water) | (Fire, Fire) | (Fire, Rock) | (Fire, Dragon) => 0.5,

        (Water, Fire) | (Water, Ground) | (Water, Rock) => 2.0,
        (Water, Grass) | (Water, Water) | (Water, Dragon) => 0.5,

        (Grass, Water) | (Grass, Ground) | (Grass, Rock) => 2.0,
        (Grass, Fire)
        | (Grass, Grass)
        | (Grass, Poison)
        | (Grass, Flying)
        | (Grass, Bug)
        | (Grass, Steel)
        | (Grass, Dragon) => 0.5,

        (Electric, Water) | (Electric, Flying) => 2.0,
        (Electric, Electric) | (Electric, Grass) | (Electric, Dragon) => 0.5,
        (Electric, Ground) => 0.0,

        (Psychic, Fighting) | (Psychic, Poison) => 2.0,
        (Psychic, Psychic) | (Psychic, Steel) => 0.5,
        (Psychic, Dark) => 0.0,

        (Ghost, Ghost) | (Ghost, Psychic) => 2.0,
        (Ghost, Dark) => 0.5,
        (Ghost, Normal) => 0.0,

        (Normal, Rock) | (Normal, Steel) => 0.5,
        (Normal, Ghost) => 0.0,

        (Fighting, Normal)
        | (Fighting, Rock)
        | (Fighting, Steel)
        | (Fighting, Ice)
        | (Fighting, Dark) => 2.0,
        (Fighting, Flying) | (Fighting, Psychic) | (Fighting, Bug) => 0.5,
        (Fighting, Ghost) => 0.0,

        (Rock, Fire) | (Rock, Ice) | (Rock, Flying) | (Rock, Bug) => 2.0,
        (Rock, Fighting) | (Rock, Ground) | (Rock, Steel) => 0.5,

        (Ground, Fire) | (Ground, Electric) | (Ground, Poison) | (Ground, Rock)
        | (Ground, Steel) => 2.0,
        (Ground, Grass) | (Ground, Bug) => 0.5,
        (Ground, Flying) => 0.0,

        (Bug, Grass) | (Bug, Psychic) | (Bug, Dark) => 2.0,
        (Bug, Fire)
        | (Bug, Fighting)
        | (Bug, Poison)
        | (Bug, Flying)
        | (Bug, Ghost)
        | (Bug, Steel)
        | (Bug, Fairy) => 0.5,

        (Dragon, Dragon) => 2.0,
        (Dragon, Steel) => 0.5,
        (Dragon, Fairy) => 0.0,

        (Poison, Grass) | (Poison, Fairy) => 2.0,
        (Poison, Poison) | (Poison, Ground) | (Poison, Rock) | (Poison, Ghost) => 0.5,
        (Poison, Steel) => 0.0,

        (Ice, Grass) | (Ice, Ground) | (Ice, Flying) | (Ice, Dragon) => 2.0,
        (Ice, Fire) | (Ice, Water) | (Ice, Ice) | (Ice, Steel) => 0.5,

        _ => 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Element::*;

    #[test]
    fn known_entries() {
        assert_eq!(type_multiplier(Fire, Grass), 2.0);
        assert_eq!(type_multiplier(Fire, Water), 0.5);
        assert_eq!(type_multiplier(Electric, Ground), 0.0);
        assert_eq!(type_multiplier(Ghost, Normal), 0.0);
    }

    #[test]
    fn missing_entries_default_to_neutral() {
        assert_eq!(type_multiplier(Normal, Normal), 1.0);
        assert_eq!(type_multiplier(Flying, Fire), 1.0);
        assert_eq!(type_multiplier(Fairy, Dragon), 1.0);
    }
}
