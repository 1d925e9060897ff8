//! The master card roster: every species that can be scouted or fought.

use rocket::serde::{Deserialize, Serialize};
use rocket_okapi::JsonSchema;

use super::Element;

/// Immutable base data for one species. Battle stats are derived from
/// `hp`/`attack` together with rarity and awakening level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub struct CardData {
    pub id: String,
    pub name: String,
    pub element: Element,
    pub hp: i64,
    pub attack: i64,
    pub description: String,
    /// Optional custom artwork reference, set by the art-enhancement flow.
    pub image_url: Option<String>,
}

fn card(id: &str, name: &str, element: Element, hp: i64, attack: i64, description: &str) -> CardData {
    CardData {
        id: id.to_string(),
        name: name.to_string(),
        element,
        hp,
        attack,
        description: description.to_string(),
        image_url: None,
    }
}

/// Species the player knows from the start.
pub fn starter_dex_ids() -> Vec<&'static str> {
    vec!["charmander", "squirtle", "bulbasaur", "pidgey", "rattata"]
}

/// The full static roster serving as the scouting pool and the opponent pool.
pub fn master_cards() -> Vec<CardData> {
    use Element::*;
    vec![
        // Starters
        card("charmander", "Charmander", Fire, 45, 52, "The flame on its tail shows its life force."),
        card("charmeleon", "Charmeleon", Fire, 65, 70, "Lashes out with its burning tail."),
        card("charizard", "Charizard", Fire, 120, 84, "Breathes fire hot enough to melt rock."),
        card("squirtle", "Squirtle", Water, 44, 48, "Withdraws into its shell when in danger."),
        card("wartortle", "Wartortle", Water, 60, 65, "Regarded as a symbol of longevity."),
        card("blastoise", "Blastoise", Water, 130, 80, "The cannons on its shell fire crushing jets."),
        card("bulbasaur", "Bulbasaur", Grass, 45, 49, "The seed on its back grows by soaking up sunlight."),
        card("ivysaur", "Ivysaur", Grass, 60, 62, "The bud on its back blooms as it absorbs nutrients."),
        card("venusaur", "Venusaur", Grass, 140, 78, "A huge flower blooms on its back."),
        // Early routes
        card("pidgey", "Pidgey", Normal, 40, 45, "Docile and reluctant to fight."),
        card("pidgeotto", "Pidgeotto", Normal, 63, 60, "Patrols its territory from the sky."),
        card("pidgeot", "Pidgeot", Normal, 83, 80, "Flies at Mach 2 across the sky."),
        card("rattata", "Rattata", Normal, 30, 56, "Its long fangs can gnaw through anything."),
        card("raticate", "Raticate", Normal, 55, 81, "Its hard fangs can cut through concrete."),
        card("pikachu", "Pikachu", Electric, 60, 55, "Stores electricity in its cheek pouches."),
        card("raichu", "Raichu", Electric, 90, 90, "Its shock can knock out an elephant."),
        card("caterpie", "Caterpie", Bug, 45, 30, "Devours leaves voraciously to grow fast."),
        card("metapod", "Metapod", Bug, 50, 20, "Hardens its shell while preparing to evolve."),
        card("butterfree", "Butterfree", Bug, 80, 60, "Its wings are coated in toxic scales."),
        card("weedle", "Weedle", Bug, 40, 35, "The stinger on its head is highly venomous."),
        card("kakuna", "Kakuna", Bug, 45, 25, "Stays almost motionless, awaiting evolution."),
        card("beedrill", "Beedrill", Bug, 65, 90, "Attacks in swarms with poisonous stingers."),
        // Zone minions and bosses
        card("geodude", "Geodude", Rock, 60, 65, "Looks just like an ordinary boulder."),
        card("graveler", "Graveler", Rock, 80, 80, "Travels by rolling down mountainsides."),
        card("golem", "Golem", Rock, 110, 110, "Its rock-hard body shrugs off explosions."),
        card("onix", "Onix", Rock, 100, 50, "Burrows underground, shaking the earth."),
        card("machop", "Machop", Fighting, 70, 80, "Strong enough to hoist a Golem."),
        card("machoke", "Machoke", Fighting, 90, 100, "Its tireless muscles never cramp."),
        card("machamp", "Machamp", Fighting, 110, 130, "Four arms throw unblockable punches."),
        card("zubat", "Zubat", Poison, 40, 45, "Eyeless; navigates by ultrasonic waves."),
        card("golbat", "Golbat", Poison, 75, 80, "Its huge mouth drains the blood of prey."),
        card("abra", "Abra", Psychic, 25, 20, "Sleeps eighteen hours a day."),
        card("kadabra", "Kadabra", Psychic, 40, 35, "A self-styled psychic prodigy."),
        card("alakazam", "Alakazam", Psychic, 55, 50, "A super brain with an IQ of 5000."),
        card("gastly", "Gastly", Ghost, 30, 35, "A barely visible gaseous life form."),
        card("haunter", "Haunter", Ghost, 45, 50, "Licks victims to steal their life force."),
        card("gengar", "Gengar", Ghost, 90, 95, "On moonlit nights, shadows move on their own."),
        card("magnemite", "Magnemite", Electric, 30, 40, "Emits electromagnetic waves from its side units."),
        card("magneton", "Magneton", Electric, 60, 80, "Three Magnemite linked together."),
        card("poliwag", "Poliwag", Water, 40, 50, "The swirl on its belly is its innards showing through."),
        card("poliwhirl", "Poliwhirl", Water, 65, 65, "Its skin is always slick and wet."),
        card("poliwrath", "Poliwrath", Fighting, 90, 95, "An adept swimmer and a skilled brawler."),
        card("magikarp", "Magikarp", Water, 20, 10, "The weakest and most pitiful of them all."),
        card("gyarados", "Gyarados", Water, 120, 125, "Utterly vicious; destroys everything in its path."),
        card("eevee", "Eevee", Normal, 55, 55, "Its unstable genes react to its surroundings."),
        card("vaporeon", "Vaporeon", Water, 130, 65, "Its cells resemble water molecules."),
        card("jolteon", "Jolteon", Electric, 65, 110, "Its fur bristles like needles when angered."),
        card("flareon", "Flareon", Fire, 65, 130, "Its internal flame sac burns at 1700 degrees."),
        card("dratini", "Dratini", Dragon, 41, 64, "Long considered a mythical species."),
        card("dragonair", "Dragonair", Dragon, 61, 84, "An aura of holiness surrounds its body."),
        card("dragonite", "Dragonite", Dragon, 130, 134, "Circles the globe in about sixteen hours."),
        card("snorlax", "Snorlax", Normal, 160, 110, "Eats, then sleeps. Sleeps, then eats."),
        // Legendaries
        card("articuno", "Articuno", Ice, 90, 85, "A legendary bird that freezes the air itself."),
        card("zapdos", "Zapdos", Electric, 90, 90, "A legendary bird that commands thunder."),
        card("moltres", "Moltres", Fire, 90, 100, "A legendary bird that scatters embers with each flap."),
        card("mewtwo", "Mewtwo", Psychic, 150, 154, "Created by ruthless gene-splicing experiments."),
        card("mew", "Mew", Psychic, 100, 100, "Said to carry the genes of every species."),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roster_ids_are_unique() {
        let roster = master_cards();
        let mut ids: Vec<&str> = roster.iter().map(|c| c.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), roster.len());
    }

    #[test]
    fn starters_exist_in_roster() {
        let roster = master_cards();
        for id in starter_dex_ids() {
            assert!(roster.iter().any(|c| c.id == id), "missing starter {id}");
        }
    }
}
