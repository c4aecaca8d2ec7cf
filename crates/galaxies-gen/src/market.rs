//! Market derivation: which goods a system stocks and how many.
//!
//! Every catalog item carries an ordered list of [`ProductionRule`]s. A rule
//! pins any subset of the three system tags; unpinned tags match anything.
//! The first rule that matches decides: the item is stocked, and if that
//! rule pins two or more tags it is a specialty and the quantity doubles.
//!
//! Base quantity is `(11 - rarity) * 50`, jittered by up to 20% either way,
//! never below one unit.

use galaxies_types::{
    EconomicStatus as E, ItemCategory, ItemStack, PoliticalStatus as P, SocialStatus as S,
};
use rand::Rng;

use crate::system::SystemTags;

/// Fractional jitter applied to base stock quantities.
const STOCK_VARIANCE: f64 = 0.2;

/// A condition under which a system produces an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductionRule {
    /// Required political tag, or any.
    pub political: Option<P>,
    /// Required economic tag, or any.
    pub economic: Option<E>,
    /// Required social tag, or any.
    pub social: Option<S>,
}

impl ProductionRule {
    const fn pol(political: P) -> Self {
        Self {
            political: Some(political),
            economic: None,
            social: None,
        }
    }

    const fn eco(economic: E) -> Self {
        Self {
            political: None,
            economic: Some(economic),
            social: None,
        }
    }

    const fn soc(social: S) -> Self {
        Self {
            political: None,
            economic: None,
            social: Some(social),
        }
    }

    const fn pol_eco(political: P, economic: E) -> Self {
        Self {
            political: Some(political),
            economic: Some(economic),
            social: None,
        }
    }

    const fn eco_soc(economic: E, social: S) -> Self {
        Self {
            political: None,
            economic: Some(economic),
            social: Some(social),
        }
    }

    /// Whether the rule accepts a system with these tags.
    pub fn matches(&self, tags: &SystemTags) -> bool {
        self.political.is_none_or(|p| p == tags.political)
            && self.economic.is_none_or(|e| e == tags.economic)
            && self.social.is_none_or(|s| s == tags.social)
    }

    /// Rules pinning two or more tags mark a specialty producer.
    pub const fn is_bonus(&self) -> bool {
        matches!(
            (
                self.political.is_some(),
                self.economic.is_some(),
                self.social.is_some()
            ),
            (true, true, _) | (true, _, true) | (_, true, true)
        )
    }
}

/// A catalog entry for a trade good.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemTemplate {
    /// Display name; also the key used by trade commands.
    pub name: &'static str,
    /// Market category.
    pub category: ItemCategory,
    /// Reference price.
    pub base_value: i64,
    /// 1 (common) to 10 (artifact).
    pub rarity: u8,
    /// Contraband flag.
    pub is_illegal: bool,
    /// Production rules in priority order.
    pub rules: &'static [ProductionRule],
}

impl ItemTemplate {
    /// A stack of this item with no acquisition cost.
    pub fn stack(&self, quantity: u32) -> ItemStack {
        ItemStack {
            name: self.name.to_owned(),
            category: self.category,
            base_value: self.base_value,
            rarity: self.rarity,
            is_illegal: self.is_illegal,
            quantity,
            avg_cost: 0.0,
        }
    }
}

macro_rules! item {
    ($name:literal, $category:ident, $value:literal, $rarity:literal, [$($rule:expr),+ $(,)?]) => {
        ItemTemplate {
            name: $name,
            category: ItemCategory::$category,
            base_value: $value,
            rarity: $rarity,
            is_illegal: matches!(ItemCategory::$category, ItemCategory::Illegal),
            rules: &[$($rule),+],
        }
    };
}

use ProductionRule as R;

/// Every trade good in the universe, in market display order.
pub static CATALOG: &[ItemTemplate] = &[
    // --- Raw materials ---
    item!("Hydrogen Fuel Cells", Raw, 40, 1, [
        R::eco(E::RefuelingDepot), R::eco(E::IndustrialBoom), R::pol(P::FederationOutpost),
        R::soc(S::ScientificExpedition), R::pol(P::TradeFedNeutrality),
        R::pol_eco(P::Isolationist, E::RefuelingDepot),
    ]),
    item!("Iron Ore", Raw, 25, 1, [
        R::eco(E::ResourceRich), R::soc(S::FrontierSpirit), R::pol(P::ColonialCharter),
        R::eco(E::ScavengerEconomy), R::soc(S::PreIndustrial),
        R::eco_soc(E::ResourceRich, S::WorkerRebellion),
    ]),
    item!("Copper Ingots", Raw, 60, 2, [
        R::eco(E::ResourceRich), R::pol(P::ColonialCharter), R::soc(S::FrontierSpirit),
        R::eco(E::ManufacturingHub), R::soc(S::PreIndustrial),
        R::pol_eco(P::FailedState, E::ScavengerEconomy),
    ]),
    item!("Water Ice", Raw, 15, 1, [
        R::eco(E::ResourceRich), R::pol(P::ExileColony), R::soc(S::FrontierSpirit),
        R::eco(E::AgrarianBreadbasket), R::pol(P::FederationOutpost),
        R::pol_eco(P::Isolationist, E::DepletedWorld),
    ]),
    item!("Scrap Metal", Raw, 10, 1, [
        R::eco(E::ScavengerEconomy), R::pol(P::FailedState), R::soc(S::GhostTown),
        R::eco(E::DepletedWorld), R::pol(P::AnarchicFreehold),
        R::eco_soc(E::WarEconomy, S::Slum),
    ]),
    item!("Helium-3", Raw, 350, 5, [
        R::eco(E::RefuelingDepot), R::soc(S::ScientificExpedition), R::pol(P::FederationOutpost),
        R::pol(P::Isolationist), R::eco(E::ResourceRich),
        R::pol_eco(P::ExileColony, E::RefuelingDepot),
    ]),
    item!("Uranium Ore", Raw, 500, 6, [
        R::eco(E::ResourceRich), R::pol(P::MartialLaw), R::eco(E::WarEconomy),
        R::pol(P::FailedState), R::soc(S::PreIndustrial),
        R::pol_eco(P::DemilitarizedZone, E::ScavengerEconomy),
    ]),
    item!("Gold Bullion", Raw, 900, 6, [
        R::eco(E::GoldRush), R::pol(P::ImperialCore), R::soc(S::DecadentAristocracy),
        R::eco(E::LuxuryResort), R::pol(P::SyndicateTerritory),
        R::pol_eco(P::PirateHaven, E::GoldRush),
    ]),
    // --- Industrial ---
    item!("Steel Beams", Industrial, 120, 2, [
        R::eco(E::ManufacturingHub), R::eco(E::IndustrialBoom), R::pol(P::CorporateSovereign),
        R::soc(S::WorkerRebellion), R::pol(P::ColonialCharter),
        R::eco_soc(E::IndustrialBoom, S::Slum),
    ]),
    item!("Ceramic Composites", Industrial, 220, 3, [
        R::eco(E::ManufacturingHub), R::pol(P::MartialLaw), R::eco(E::WarEconomy),
        R::pol(P::TradeFedNeutrality), R::soc(S::Academy),
        R::pol_eco(P::ImperialCore, E::IndustrialBoom),
    ]),
    item!("Solar Panels", Industrial, 260, 3, [
        R::eco(E::PostScarcity), R::soc(S::ScientificExpedition), R::pol(P::TradeFedNeutrality),
        R::eco(E::AgrarianBreadbasket), R::pol(P::FederationOutpost),
        R::pol_eco(P::AiGovernance, E::ResourceRich),
    ]),
    item!("Magnetic Coils", Industrial, 300, 4, [
        R::eco(E::ManufacturingHub), R::pol(P::AiGovernance), R::eco(E::TechBottleneck),
        R::soc(S::CyberneticAscension), R::pol(P::ImperialCore),
        R::eco_soc(E::PostScarcity, S::Academy),
    ]),
    item!("Hull Plating", Industrial, 450, 4, [
        R::eco(E::ManufacturingHub), R::pol(P::MartialLaw), R::eco(E::WarEconomy),
        R::pol(P::ImperialCore), R::soc(S::Gladiatorial),
        R::pol_eco(P::ContestedWarZone, E::ScavengerEconomy),
    ]),
    item!("Fusion Regulators", Industrial, 1200, 7, [
        R::eco(E::TechBottleneck), R::pol(P::ImperialCore), R::soc(S::Academy),
        R::eco(E::PostScarcity), R::pol(P::AiGovernance),
        R::eco_soc(E::ManufacturingHub, S::ScientificExpedition),
    ]),
    // --- Consumables ---
    item!("Nutrient Paste", Consumable, 20, 1, [
        R::eco(E::Famine), R::soc(S::RefugeeCrisis), R::pol(P::MartialLaw),
        R::eco(E::Depression), R::pol(P::FailedState),
        R::eco_soc(E::IndustrialBoom, S::Slum),
    ]),
    item!("Grain Sacks", Consumable, 30, 1, [
        R::eco(E::AgrarianBreadbasket), R::pol(P::FeudalDominion), R::soc(S::PreIndustrial),
        R::pol(P::ColonialCharter), R::eco(E::ResourceRich),
        R::pol_eco(P::Isolationist, E::AgrarianBreadbasket),
    ]),
    item!("Purified Water", Consumable, 25, 1, [
        R::eco(E::AgrarianBreadbasket), R::pol(P::FederationOutpost), R::eco(E::LuxuryResort),
        R::soc(S::ReligiousPilgrimage), R::pol(P::TradeFedNeutrality),
        R::eco_soc(E::RefuelingDepot, S::ScientificExpedition),
    ]),
    item!("Synthetic Meat", Consumable, 45, 2, [
        R::eco(E::ManufacturingHub), R::pol(P::CorporateSovereign), R::soc(S::Cosmopolitan),
        R::eco(E::PostScarcity), R::pol(P::TradeFedNeutrality),
        R::pol_eco(P::AiGovernance, E::AgrarianBreadbasket),
    ]),
    item!("Vitamins", Consumable, 70, 2, [
        R::eco(E::AgrarianBreadbasket), R::soc(S::Cosmopolitan), R::pol(P::CorporateSovereign),
        R::eco(E::PostScarcity), R::soc(S::ScientificExpedition),
        R::eco_soc(E::Famine, S::RefugeeCrisis),
    ]),
    item!("First Aid Kits", Consumable, 90, 3, [
        R::pol(P::FederationOutpost), R::eco(E::WarEconomy), R::soc(S::RefugeeCrisis),
        R::pol(P::MartialLaw), R::soc(S::Plague),
        R::pol_eco(P::TradeFedNeutrality, E::ManufacturingHub),
    ]),
    item!("Antibiotics", Consumable, 180, 4, [
        R::soc(S::Plague), R::pol(P::ImperialCore), R::soc(S::ScientificExpedition),
        R::eco(E::PostScarcity), R::pol(P::FederationOutpost),
        R::eco_soc(E::TechBottleneck, S::RefugeeCrisis),
    ]),
    // --- Technology ---
    item!("Nav Computer Chips", Tech, 550, 4, [
        R::eco(E::ManufacturingHub), R::pol(P::FederationOutpost), R::eco(E::TechBottleneck),
        R::pol(P::TradeFedNeutrality), R::soc(S::Academy),
        R::pol_eco(P::AiGovernance, E::IndustrialBoom),
    ]),
    item!("Holographic Projectors", Tech, 650, 5, [
        R::eco(E::ManufacturingHub), R::soc(S::Cosmopolitan), R::eco(E::LuxuryResort),
        R::soc(S::ArtistEnclave), R::pol(P::TradeFedNeutrality),
        R::eco_soc(E::PostScarcity, S::DecadentAristocracy),
    ]),
    item!("Sensor Arrays", Tech, 800, 5, [
        R::soc(S::ScientificExpedition), R::pol(P::MartialLaw), R::eco(E::TechBottleneck),
        R::pol(P::FederationOutpost), R::soc(S::FrontierSpirit),
        R::pol_eco(P::DemilitarizedZone, E::BlackMarketHub),
    ]),
    item!("AI Cores (Basic)", Tech, 900, 5, [
        R::pol(P::CorporateSovereign), R::eco(E::ManufacturingHub), R::soc(S::Cosmopolitan),
        R::pol(P::TradeFedNeutrality), R::eco(E::IndustrialBoom),
        R::eco_soc(E::PostScarcity, S::WorkerRebellion),
    ]),
    item!("Quantum Processors", Tech, 2500, 8, [
        R::pol(P::AiGovernance), R::eco(E::PostScarcity), R::soc(S::Academy),
        R::pol(P::ImperialCore), R::soc(S::CyberneticAscension),
        R::pol_eco(P::CorporateSovereign, E::TechBottleneck),
    ]),
    item!("AI Cores (Advanced)", Tech, 4000, 9, [
        R::pol(P::AiGovernance), R::soc(S::CyberneticAscension), R::eco(E::PostScarcity),
        R::soc(S::Academy), R::pol(P::ImperialCore),
        R::pol_eco(P::CorporateSovereign, E::TechBottleneck),
    ]),
    // --- Luxury ---
    item!("Silk", Luxury, 400, 4, [
        R::eco(E::AgrarianBreadbasket), R::pol(P::FeudalDominion), R::soc(S::ArtistEnclave),
        R::eco(E::LuxuryResort), R::pol(P::Isolationist),
        R::eco_soc(E::AgrarianBreadbasket, S::DecadentAristocracy),
    ]),
    item!("Designer Clothing", Luxury, 700, 5, [
        R::eco(E::LuxuryResort), R::soc(S::Cosmopolitan), R::pol(P::ImperialCore),
        R::soc(S::ArtistEnclave), R::soc(S::DecadentAristocracy),
        R::pol_eco(P::CorporateSovereign, E::PostScarcity),
    ]),
    item!("Jewelry", Luxury, 1500, 7, [
        R::eco(E::LuxuryResort), R::pol(P::ImperialCore), R::eco(E::GoldRush),
        R::soc(S::DecadentAristocracy), R::pol(P::SyndicateTerritory),
        R::eco_soc(E::ResourceRich, S::ArtistEnclave),
    ]),
    item!("Gemstones", Luxury, 2000, 7, [
        R::eco(E::ResourceRich), R::eco(E::GoldRush), R::pol(P::ColonialCharter),
        R::pol(P::FeudalDominion), R::soc(S::FrontierSpirit),
        R::pol_eco(P::ExileColony, E::LuxuryResort),
    ]),
    item!("Paintings", Luxury, 3000, 9, [
        R::soc(S::ArtistEnclave), R::soc(S::DecadentAristocracy), R::eco(E::LuxuryResort),
        R::pol(P::ImperialCore), R::soc(S::Cosmopolitan),
        R::eco_soc(E::PostScarcity, S::ReligiousPilgrimage),
    ]),
    // --- Contraband ---
    item!("Bootleg Software", Illegal, 500, 4, [
        R::pol(P::AnarchicFreehold), R::soc(S::Academy), R::eco(E::BlackMarketHub),
        R::pol(P::SyndicateTerritory), R::soc(S::CyberneticAscension),
        R::pol_eco(P::TradeFedNeutrality, E::TechBottleneck),
    ]),
    item!("Combat Stims", Illegal, 600, 5, [
        R::pol(P::MartialLaw), R::eco(E::WarEconomy), R::soc(S::Gladiatorial),
        R::pol(P::PirateHaven), R::eco(E::BlackMarketHub),
        R::eco_soc(E::IndustrialBoom, S::WorkerRebellion),
    ]),
    item!("Narcotics", Illegal, 800, 5, [
        R::pol(P::PirateHaven), R::eco(E::BlackMarketHub), R::soc(S::Slum),
        R::pol(P::SyndicateTerritory), R::pol(P::AnarchicFreehold),
        R::eco_soc(E::LuxuryResort, S::DecadentAristocracy),
    ]),
    item!("Counterfeit Currency", Illegal, 900, 6, [
        R::pol(P::SyndicateTerritory), R::eco(E::BlackMarketHub), R::pol(P::AnarchicFreehold),
        R::soc(S::Slum), R::eco(E::Depression),
        R::eco_soc(E::IndustrialBoom, S::Cosmopolitan),
    ]),
    item!("Stolen ID Chips", Illegal, 1100, 6, [
        R::pol(P::SyndicateTerritory), R::eco(E::BlackMarketHub), R::soc(S::CyberneticAscension),
        R::pol(P::AnarchicFreehold), R::soc(S::Slum),
        R::pol_eco(P::CorporateSovereign, E::Depression),
    ]),
    item!("Hacked Credit Sticks", Illegal, 1300, 6, [
        R::pol(P::SyndicateTerritory), R::eco(E::BlackMarketHub), R::soc(S::Cosmopolitan),
        R::pol(P::AnarchicFreehold), R::soc(S::Academy),
        R::eco_soc(E::TechBottleneck, S::Slum),
    ]),
    item!("Unregistered Weapons", Illegal, 1600, 7, [
        R::pol(P::AnarchicFreehold), R::pol(P::RevolutionaryFront), R::eco(E::WarEconomy),
        R::pol(P::PirateHaven), R::pol(P::SyndicateTerritory),
        R::pol_eco(P::ContestedWarZone, E::ScavengerEconomy),
    ]),
];

/// Look up a catalog entry by name.
pub fn template(name: &str) -> Option<&'static ItemTemplate> {
    CATALOG.iter().find(|item| item.name == name)
}

/// Build the opening market for a system with the given tags.
pub fn stock_market(tags: &SystemTags, rng: &mut impl Rng) -> Vec<ItemStack> {
    CATALOG
        .iter()
        .filter_map(|item| {
            let rule = item.rules.iter().find(|rule| rule.matches(tags))?;
            Some(item.stack(stock_quantity(item.rarity, rule.is_bonus(), rng)))
        })
        .collect()
}

/// Opening stock for an item of the given rarity.
#[allow(clippy::cast_possible_truncation)]
pub fn stock_quantity(rarity: u8, bonus: bool, rng: &mut impl Rng) -> u32 {
    let base = u32::from(11_u8.saturating_sub(rarity)).saturating_mul(50);
    let variance = f64::from(base) * STOCK_VARIANCE;
    let jitter = rng.random::<f64>().mul_add(variance * 2.0, -variance);

    // Truncate toward zero before applying.
    let mut quantity = i64::from(base).saturating_add(jitter.trunc() as i64);
    if bonus {
        quantity = quantity.saturating_mul(2);
    }
    u32::try_from(quantity.max(1)).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn tags(political: P, economic: E, social: S) -> SystemTags {
        SystemTags {
            political,
            economic,
            social,
        }
    }

    #[test]
    fn catalog_names_are_unique() {
        for (i, item) in CATALOG.iter().enumerate() {
            let dupes = CATALOG.iter().skip(i + 1).filter(|o| o.name == item.name).count();
            assert_eq!(dupes, 0, "{}", item.name);
        }
    }

    #[test]
    fn catalog_rarity_in_range() {
        assert!(CATALOG.iter().all(|item| (1..=10).contains(&item.rarity)));
    }

    #[test]
    fn contraband_is_flagged() {
        assert!(CATALOG
            .iter()
            .filter(|item| item.category == ItemCategory::Illegal)
            .all(|item| item.is_illegal));
        assert_eq!(template("Narcotics").map(|t| t.is_illegal), Some(true));
        assert_eq!(template("Iron Ore").map(|t| t.is_illegal), Some(false));
    }

    #[test]
    fn wildcard_rules_match_any_other_tag() {
        let rule = R::eco(E::ResourceRich);
        assert!(rule.matches(&tags(P::ImperialCore, E::ResourceRich, S::HiveMind)));
        assert!(rule.matches(&tags(P::PirateHaven, E::ResourceRich, S::Plague)));
        assert!(!rule.matches(&tags(P::PirateHaven, E::FreePort, S::Plague)));
    }

    #[test]
    fn combos_are_bonus_rules() {
        assert!(R::pol_eco(P::Isolationist, E::RefuelingDepot).is_bonus());
        assert!(R::eco_soc(E::ResourceRich, S::WorkerRebellion).is_bonus());
        assert!(!R::soc(S::Slum).is_bonus());
    }

    #[test]
    fn quantity_stays_within_jitter_band() {
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..200 {
            let q = stock_quantity(1, false, &mut rng);
            assert!((400..=600).contains(&q), "{q}");
        }
    }

    #[test]
    fn bonus_doubles_quantity() {
        let mut rng = SmallRng::seed_from_u64(5);
        for _ in 0..200 {
            let q = stock_quantity(10, true, &mut rng);
            assert!((80..=120).contains(&q), "{q}");
        }
    }

    #[test]
    fn stocked_items_follow_rules() {
        let mut rng = SmallRng::seed_from_u64(11);
        let market = stock_market(
            &tags(P::PirateHaven, E::BlackMarketHub, S::Slum),
            &mut rng,
        );
        let names: Vec<&str> = market.iter().map(|s| s.name.as_str()).collect();
        assert!(names.contains(&"Narcotics"));
        assert!(!names.contains(&"Paintings"));
        assert!(market.iter().all(|s| s.quantity >= 1 && s.avg_cost == 0.0));
    }

    #[test]
    fn first_matching_rule_decides_bonus() {
        // Isolationist + Refueling Depot matches the plain economic rule
        // before the combo, so stock is not doubled.
        let mut rng = SmallRng::seed_from_u64(3);
        let market = stock_market(
            &tags(P::Isolationist, E::RefuelingDepot, S::Xenophobic),
            &mut rng,
        );
        let cells = market.iter().find(|s| s.name == "Hydrogen Fuel Cells");
        assert!(cells.is_some_and(|s| (400..=600).contains(&s.quantity)));
    }
}
