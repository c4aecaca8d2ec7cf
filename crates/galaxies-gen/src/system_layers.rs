//! Modifier tables for the three star-system archetype dimensions.
//!
//! Applied in the order political, economic, social. Each table is data
//! only; [`crate::modifiers`] does the arithmetic.

use galaxies_types::{EconomicStatus, PoliticalStatus, SocialStatus, SystemStats};

use crate::modifiers::{Archetype, Edit, SystemField as F};

// ---------------------------------------------------------------------------
// Political
// ---------------------------------------------------------------------------

impl Archetype for PoliticalStatus {
    type Block = SystemStats;

    #[allow(clippy::too_many_lines)]
    fn edits(self) -> Vec<Edit<F>> {
        match self {
            Self::ImperialCore => vec![
                Edit::add(F::TaxRate, 0.20),
                Edit::add(F::InspectionChance, 0.80),
                Edit::set(F::PiracyChance, 0.0),
                Edit::mul(F::ShipCostMult, 1.2),
                Edit::mul(F::BountyPayMult, 2.0),
                Edit::enable(F::HasShipyard),
                Edit::enable(F::HasOutfitter),
            ],
            Self::FederationOutpost => vec![
                Edit::add(F::TaxRate, 0.10),
                Edit::add(F::InspectionChance, 0.30),
                Edit::add(F::PiracyChance, -0.02),
                Edit::enable(F::HasRefueling),
            ],
            Self::MartialLaw => vec![
                Edit::set(F::InspectionChance, 1.0),
                Edit::add(F::TaxRate, 0.15),
                Edit::mul(F::PassengerDensity, 0.5),
                Edit::mul(F::MarketBuyMult, 0.8),
                Edit::mul(F::ContrabandProfit, 0.5),
            ],
            Self::CorporateSovereign => vec![
                Edit::set(F::TaxRate, 0.0),
                Edit::set(F::DockingFee, 500.0),
                Edit::mul(F::MarketBuyMult, 1.1),
                Edit::enable(F::HasOutfitter),
            ],
            Self::AnarchicFreehold => vec![
                Edit::set(F::TaxRate, 0.0),
                Edit::set(F::InspectionChance, 0.0),
                Edit::add(F::PiracyChance, 0.30),
                Edit::mul(F::ContrabandProfit, 1.2),
                Edit::disable(F::HasMissionBoard),
            ],
            Self::PirateHaven => vec![
                Edit::set(F::TaxRate, 0.0),
                Edit::set(F::InspectionChance, 0.0),
                Edit::add(F::PiracyChance, 0.50),
                Edit::enable(F::HasBlackMarket),
                Edit::set(F::BlackMarketBuyMult, 1.2),
                Edit::set(F::DockingFee, 200.0),
                Edit::set(F::BountyPayMult, 0.0),
            ],
            Self::TheocraticRule => vec![
                Edit::mul(F::ContrabandProfit, 0.8),
                Edit::mul(F::PassengerWealth, 0.8),
                Edit::mul(F::MissionPayMult, 1.2),
                Edit::disable(F::HasCantina),
            ],
            Self::BureaucraticGridlock => vec![
                Edit::add(F::DockingFee, 100.0),
                Edit::mul(F::MarketSellMult, 1.1),
                Edit::mul(F::MissionQuantityMult, 0.5),
                Edit::mul(F::BribeCostMult, 0.5),
            ],
            Self::ContestedWarZone => vec![
                Edit::add(F::PiracyChance, 0.20),
                Edit::mul(F::FuelCostMult, 2.0),
                Edit::mul(F::RepairCostMult, 2.0),
                Edit::mul(F::MissionPayMult, 2.5),
            ],
            Self::DemilitarizedZone => vec![
                Edit::add(F::InspectionChance, 0.50),
                Edit::mul(F::ShipCostMult, 2.0),
                Edit::mul(F::ContrabandProfit, 1.5),
            ],
            Self::PuppetState => vec![
                Edit::add(F::TaxRate, 0.15),
                Edit::mul(F::MarketBuyMult, 0.9),
            ],
            Self::SyndicateTerritory => vec![
                Edit::enable(F::HasBlackMarket),
                Edit::set(F::PiracyChance, 0.05),
                Edit::set(F::DockingFee, 300.0),
                Edit::mul(F::ContrabandProfit, 1.1),
            ],
            Self::Isolationist => vec![
                Edit::set(F::DockingFee, 1000.0),
                Edit::add(F::InspectionChance, 0.50),
            ],
            Self::RevolutionaryFront => vec![
                Edit::add(F::PiracyChance, 0.15),
                Edit::add(F::PassengerDensity, 0.5),
                Edit::enable(F::HasMissionBoard),
            ],
            Self::ColonialCharter => vec![
                Edit::set(F::TaxRate, 0.0),
                Edit::mul(F::MarketBuyMult, 1.2),
                Edit::mul(F::ShipCostMult, 0.8),
                Edit::mul(F::CrewHiringCostMult, 0.5),
            ],
            Self::FailedState => vec![
                Edit::disable(F::HasRefueling),
                Edit::disable(F::HasShipyard),
                Edit::add(F::PiracyChance, 0.40),
                Edit::mul(F::MarketSellMult, 0.5),
            ],
            Self::AiGovernance => vec![
                Edit::set(F::InspectionChance, 1.0),
                Edit::set(F::BribeCostMult, 999.0),
                Edit::set(F::TaxRate, 0.10),
                Edit::set(F::MarketSellMult, 1.0),
            ],
            Self::ExileColony => vec![
                Edit::enable(F::HasPrison),
                Edit::add(F::PrisonerDensity, 1.0),
                Edit::set(F::PassengerDensity, 0.0),
                Edit::add(F::InspectionChance, 0.60),
            ],
            Self::TradeFedNeutrality => vec![
                Edit::set(F::TaxRate, 0.02),
                Edit::mul(F::MarketBuyMult, 1.05),
                Edit::mul(F::MarketSellMult, 0.95),
            ],
            Self::FeudalDominion => vec![
                Edit::add(F::TaxRate, 0.30),
                Edit::mul(F::CrewHiringCostMult, 0.5),
                Edit::add(F::VipDensity, 0.5),
                Edit::enable(F::HasLuxuryHousing),
            ],
        }
    }
}

// ---------------------------------------------------------------------------
// Economic
// ---------------------------------------------------------------------------

impl Archetype for EconomicStatus {
    type Block = SystemStats;

    #[allow(clippy::too_many_lines)]
    fn edits(self) -> Vec<Edit<F>> {
        match self {
            Self::PostScarcity => vec![
                Edit::mul(F::MarketSellMult, 0.4),
                Edit::mul(F::MarketBuyMult, 0.4),
                Edit::mul(F::PassengerWealth, 3.0),
                Edit::enable(F::HasLuxuryHousing),
                Edit::add(F::VipDensity, 0.5),
            ],
            Self::IndustrialBoom => vec![
                Edit::mul(F::MarketBuyMult, 1.1),
                Edit::enable(F::HasShipyard),
                Edit::mul(F::ShipCostMult, 0.9),
            ],
            Self::Depression => vec![
                Edit::mul(F::MarketBuyMult, 0.6),
                Edit::mul(F::MarketSellMult, 0.6),
                Edit::add(F::PassengerDensity, 1.0),
                Edit::mul(F::CrewHiringCostMult, 0.5),
            ],
            Self::HyperInflation => vec![
                Edit::mul(F::MarketBuyMult, 5.0),
                Edit::mul(F::MarketSellMult, 5.0),
                Edit::mul(F::FuelCostMult, 5.0),
                Edit::mul(F::RepairCostMult, 5.0),
            ],
            Self::ResourceRich => vec![
                Edit::mul(F::MarketSellMult, 0.7),
                Edit::enable(F::HasRefueling),
            ],
            Self::Famine => vec![
                Edit::mul(F::MarketBuyMult, 1.5),
                Edit::add(F::PassengerDensity, 0.5),
                Edit::enable(F::HasSlums),
                Edit::add(F::SlumsDensity, 1.0),
            ],
            Self::TechBottleneck => vec![
                Edit::mul(F::ModCostMult, 2.0),
                Edit::mul(F::ShipCostMult, 1.5),
                Edit::mul(F::AndroidCostMult, 2.0),
            ],
            Self::BlackMarketHub => vec![
                Edit::enable(F::HasBlackMarket),
                Edit::set(F::BlackMarketBuyMult, 1.3),
                Edit::mul(F::ContrabandProfit, 1.5),
                Edit::add(F::InspectionChance, -0.20),
            ],
            Self::RefuelingDepot => vec![
                Edit::enable(F::HasRefueling),
                Edit::mul(F::FuelCostMult, 0.5),
            ],
            Self::LuxuryResort => vec![
                Edit::add(F::DockingFee, 400.0),
                Edit::add(F::VipDensity, 2.0),
                Edit::enable(F::HasLuxuryHousing),
                Edit::mul(F::MarketSellMult, 2.0),
            ],
            Self::ManufacturingHub => vec![
                Edit::mul(F::ShipCostMult, 0.8),
                Edit::mul(F::ModCostMult, 0.8),
                Edit::enable(F::HasOutfitter),
                Edit::enable(F::HasShipyard),
            ],
            Self::TradeEmbargo => vec![
                Edit::mul(F::MarketSellMult, 3.0),
                Edit::mul(F::FuelCostMult, 2.0),
            ],
            Self::GoldRush => vec![
                Edit::add(F::DockingFee, 100.0),
                Edit::mul(F::MarketBuyMult, 1.3),
                Edit::mul(F::FuelCostMult, 2.0),
            ],
            Self::LaborStrike => vec![
                Edit::mul(F::MissionQuantityMult, 0.1),
                Edit::mul(F::CrewHiringCostMult, 3.0),
            ],
            Self::WarEconomy => vec![
                Edit::mul(F::ShipCostMult, 1.5),
                Edit::mul(F::ModCostMult, 1.5),
                Edit::mul(F::MissionPayMult, 1.5),
            ],
            Self::DepletedWorld => vec![
                Edit::mul(F::MarketSellMult, 1.5),
                Edit::mul(F::FuelCostMult, 2.0),
                Edit::add(F::PassengerDensity, 0.5),
            ],
            Self::AgrarianBreadbasket => vec![
                Edit::mul(F::MarketSellMult, 0.8),
                Edit::enable(F::HasRefueling),
            ],
            Self::CommandEconomy => vec![
                Edit::set(F::MarketBuyMult, 1.0),
                Edit::set(F::MarketSellMult, 1.0),
                Edit::set(F::TaxRate, 0.0),
            ],
            Self::FreePort => vec![
                Edit::set(F::TaxRate, 0.0),
                Edit::set(F::DockingFee, 0.0),
                Edit::set(F::InspectionChance, 0.0),
            ],
            Self::ScavengerEconomy => vec![
                Edit::mul(F::ModCostMult, 0.5),
                Edit::mul(F::ShipCostMult, 0.6),
                Edit::mul(F::RepairCostMult, 0.5),
            ],
        }
    }
}

// ---------------------------------------------------------------------------
// Social
// ---------------------------------------------------------------------------

impl Archetype for SocialStatus {
    type Block = SystemStats;

    #[allow(clippy::too_many_lines)]
    fn edits(self) -> Vec<Edit<F>> {
        match self {
            Self::Cosmopolitan => vec![
                Edit::mul(F::PassengerDensity, 2.0),
                Edit::add(F::CrewPoolDensity, 1.0),
                Edit::set(F::CrewSkillAvg, 5.0),
                Edit::enable(F::HasCantina),
            ],
            Self::Xenophobic => vec![
                Edit::set(F::PassengerDensity, 0.0),
                Edit::set(F::CrewPoolDensity, 0.0),
                Edit::mul(F::DockingFee, 5.0),
                Edit::mul(F::MarketBuyMult, 0.5),
            ],
            Self::ReligiousPilgrimage => vec![
                Edit::mul(F::PassengerDensity, 5.0),
                Edit::mul(F::PassengerWealth, 0.5),
                Edit::mul(F::MissionQuantityMult, 2.0),
            ],
            Self::Plague => vec![
                Edit::enable(F::HasHospital),
                Edit::set(F::PassengerDensity, 0.0),
                Edit::set(F::DockingFee, 0.0),
                Edit::mul(F::MarketBuyMult, 2.0),
            ],
            Self::BrainDrain => vec![
                Edit::set(F::CrewSkillAvg, 8.0),
                Edit::mul(F::CrewHiringCostMult, 0.5),
                Edit::add(F::CrewPoolDensity, 0.5),
            ],
            Self::PenalColony => vec![
                Edit::enable(F::HasPrison),
                Edit::add(F::PrisonerDensity, 3.0),
                Edit::set(F::CrewPoolDensity, 0.0),
                Edit::add(F::InspectionChance, 0.20),
            ],
            Self::RefugeeCrisis => vec![
                Edit::mul(F::PassengerDensity, 4.0),
                Edit::set(F::PassengerWealth, 0.1),
                Edit::enable(F::HasSlums),
                Edit::add(F::SlumsDensity, 4.0),
            ],
            Self::ArtistEnclave => vec![
                Edit::mul(F::PassengerWealth, 1.5),
                Edit::add(F::VipDensity, 0.5),
                Edit::enable(F::HasLuxuryHousing),
                Edit::set(F::CrewSkillAvg, 4.0),
            ],
            Self::CyberneticAscension => vec![
                Edit::enable(F::HasAndroidFoundry),
                Edit::add(F::AndroidDensity, 1.5),
                Edit::set(F::AndroidSkill, 9.0),
                Edit::set(F::CrewPoolDensity, 0.0),
            ],
            Self::PreIndustrial => vec![
                Edit::mul(F::MarketBuyMult, 0.5),
                Edit::disable(F::HasShipyard),
                Edit::disable(F::HasRefueling),
            ],
            Self::Academy => vec![
                Edit::set(F::CrewSkillAvg, 9.0),
                Edit::mul(F::CrewHiringCostMult, 2.0),
                Edit::mul(F::MissionPayMult, 1.5),
            ],
            Self::Slum => vec![
                Edit::enable(F::HasSlums),
                Edit::add(F::SlumsDensity, 2.0),
                Edit::mul(F::CrewHiringCostMult, 0.4),
                Edit::mul(F::BountyPayMult, 0.5),
            ],
            Self::FrontierSpirit => vec![
                Edit::mul(F::MissionPayMult, 1.2),
                Edit::set(F::CrewSkillAvg, 6.0),
                Edit::enable(F::HasRefueling),
            ],
            Self::DecadentAristocracy => vec![
                Edit::enable(F::HasLuxuryHousing),
                Edit::add(F::VipDensity, 1.5),
                Edit::mul(F::CrewHiringCostMult, 2.0),
                Edit::set(F::SlumsDensity, 0.0),
            ],
            Self::WorkerRebellion => vec![
                Edit::mul(F::MarketSellMult, 0.2),
                Edit::enable(F::HasCantina),
            ],
            Self::CultActivity => vec![
                Edit::add(F::WantedPassChance, 0.10),
                Edit::mul(F::MissionPayMult, 0.8),
                Edit::set(F::CrewSkillAvg, 2.0),
            ],
            Self::ScientificExpedition => vec![
                Edit::mul(F::MissionPayMult, 2.0),
                Edit::mul(F::PassengerWealth, 2.0),
                Edit::enable(F::HasOutfitter),
            ],
            Self::GhostTown => vec![
                Edit::set(F::PassengerDensity, 0.0),
                Edit::set(F::CrewPoolDensity, 0.0),
                Edit::disable(F::HasShipyard),
                Edit::disable(F::HasRefueling),
                Edit::set(F::MarketBuyMult, 0.0),
                Edit::disable(F::HasMissionBoard),
            ],
            Self::Gladiatorial => vec![
                Edit::enable(F::HasHospital),
                Edit::set(F::CrewSkillAvg, 8.0),
                Edit::mul(F::BountyPayMult, 1.5),
            ],
            Self::HiveMind => vec![
                Edit::add(F::CrewPoolDensity, 2.0),
                Edit::set(F::CrewSkillAvg, 10.0),
                Edit::mul(F::CrewHiringCostMult, 0.1),
                Edit::set(F::InspectionChance, 1.0),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modifiers::{Op, apply_layer};

    /// Every table entry must apply cleanly to the baseline.
    #[test]
    fn every_layer_applies_to_baseline() {
        for tag in PoliticalStatus::ALL {
            let mut stats = SystemStats::baseline();
            assert!(apply_layer(&mut stats, &tag.edits()).is_ok(), "{tag}");
        }
        for tag in EconomicStatus::ALL {
            let mut stats = SystemStats::baseline();
            assert!(apply_layer(&mut stats, &tag.edits()).is_ok(), "{tag}");
        }
        for tag in SocialStatus::ALL {
            let mut stats = SystemStats::baseline();
            assert!(apply_layer(&mut stats, &tag.edits()).is_ok(), "{tag}");
        }
    }

    #[test]
    fn every_tag_has_at_least_one_edit() {
        assert!(PoliticalStatus::ALL.iter().all(|t| !t.edits().is_empty()));
        assert!(EconomicStatus::ALL.iter().all(|t| !t.edits().is_empty()));
        assert!(SocialStatus::ALL.iter().all(|t| !t.edits().is_empty()));
    }

    #[test]
    fn clamp_bounds_are_ordered() {
        let all_edits = PoliticalStatus::ALL
            .iter()
            .flat_map(|t| t.edits())
            .chain(EconomicStatus::ALL.iter().flat_map(|t| t.edits()))
            .chain(SocialStatus::ALL.iter().flat_map(|t| t.edits()));
        for edit in all_edits {
            if let Op::Clamp { min, max } = edit.op {
                assert!(min <= max, "{:?}", edit.field);
            }
        }
    }

    #[test]
    fn pirate_haven_opens_black_market() {
        let mut stats = SystemStats::baseline();
        apply_layer(&mut stats, &PoliticalStatus::PirateHaven.edits()).ok();
        assert!(stats.facilities.black_market);
        assert!((stats.piracy_chance - 0.55).abs() < 1e-9);
        assert_eq!(stats.docking_fee, 200);
    }
}
