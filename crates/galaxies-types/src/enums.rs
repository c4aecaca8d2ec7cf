//! Enumeration types for the Galaxies simulation.
//!
//! The six archetype dimensions (political, economic and social for star
//! systems; chassis, origin and qualifier for ships) plus the smaller
//! categorical types attached to goods, crew and passengers.
//!
//! Every enum here carries a stable zero-based ordinal (its storage form)
//! and a human-readable label. Converting an ordinal that is out of range
//! yields `None`; the generator turns that into a configuration error.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Generates a fieldless enum with an ordinal table and display labels.
macro_rules! labelled_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $dimension:literal {
            $( $variant:ident => $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[ts(export, export_to = "bindings/")]
        #[repr(u8)]
        pub enum $name {
            $(
                #[doc = $label]
                $variant,
            )+
        }

        impl $name {
            /// Every value in ordinal order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Name of the dimension, used in error reports.
            pub const DIMENSION: &'static str = $dimension;

            /// Zero-based ordinal used for storage.
            pub const fn ordinal(self) -> u8 {
                self as u8
            }

            /// Look up a value by ordinal.
            pub fn from_ordinal(ordinal: i64) -> Option<Self> {
                usize::try_from(ordinal)
                    .ok()
                    .and_then(|index| Self::ALL.get(index))
                    .copied()
            }

            /// Human-readable label.
            pub const fn label(self) -> &'static str {
                match self {
                    $( Self::$variant => $label, )+
                }
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Star system archetypes
// ---------------------------------------------------------------------------

labelled_enum! {
    /// Who governs a star system and how heavily.
    PoliticalStatus, "political" {
        ImperialCore => "Imperial Core",
        FederationOutpost => "Federation Outpost",
        MartialLaw => "Martial Law",
        CorporateSovereign => "Corporate Sovereign",
        AnarchicFreehold => "Anarchic Freehold",
        PirateHaven => "Pirate Haven",
        TheocraticRule => "Theocratic Rule",
        BureaucraticGridlock => "Bureaucratic Gridlock",
        ContestedWarZone => "Contested War Zone",
        DemilitarizedZone => "Demilitarized Zone",
        PuppetState => "Puppet State",
        SyndicateTerritory => "Syndicate Territory",
        Isolationist => "Isolationist",
        RevolutionaryFront => "Revolutionary Front",
        ColonialCharter => "Colonial Charter",
        FailedState => "Failed State",
        AiGovernance => "AI Governance",
        ExileColony => "Exile Colony",
        TradeFedNeutrality => "Trade Federation Neutrality",
        FeudalDominion => "Feudal Dominion",
    }
}

labelled_enum! {
    /// The state of a star system's economy.
    EconomicStatus, "economic" {
        PostScarcity => "Post-Scarcity Utopia",
        IndustrialBoom => "Industrial Boom",
        Depression => "Economic Depression",
        HyperInflation => "Hyper-Inflation",
        ResourceRich => "Resource Rich",
        Famine => "Famine / Starvation",
        TechBottleneck => "Tech Bottleneck",
        BlackMarketHub => "Black Market Hub",
        RefuelingDepot => "Refueling Depot",
        LuxuryResort => "Luxury Resort",
        ManufacturingHub => "Manufacturing Hub",
        TradeEmbargo => "Trade Embargo",
        GoldRush => "Gold Rush",
        LaborStrike => "Labor Strike",
        WarEconomy => "War Economy",
        DepletedWorld => "Depleted World",
        AgrarianBreadbasket => "Agrarian Breadbasket",
        CommandEconomy => "Command Economy",
        FreePort => "Free Port",
        ScavengerEconomy => "Scavenger Economy",
    }
}

labelled_enum! {
    /// The dominant social condition of a star system.
    SocialStatus, "social" {
        Cosmopolitan => "Cosmopolitan Metropolis",
        Xenophobic => "Xenophobic / Closed",
        ReligiousPilgrimage => "Religious Pilgrimage",
        Plague => "Plague / Quarantine",
        BrainDrain => "Brain Drain",
        PenalColony => "Penal Colony",
        RefugeeCrisis => "Refugee Crisis",
        ArtistEnclave => "Artist Enclave",
        CyberneticAscension => "Cybernetic Ascension",
        PreIndustrial => "Pre-Industrial Society",
        Academy => "Academy / University",
        Slum => "Slum / Overpopulated",
        FrontierSpirit => "Frontier Spirit",
        DecadentAristocracy => "Decadent Aristocracy",
        WorkerRebellion => "Worker Rebellion",
        CultActivity => "Cult Activity",
        ScientificExpedition => "Scientific Expedition",
        GhostTown => "Ghost Town",
        Gladiatorial => "Gladiatorial Culture",
        HiveMind => "Hive Mind",
    }
}

// ---------------------------------------------------------------------------
// Ship archetypes
// ---------------------------------------------------------------------------

labelled_enum! {
    /// Hull class; determines the baseline stat ranges.
    Chassis, "chassis" {
        Interceptor => "Interceptor",
        Hauler => "Hauler",
        Yacht => "Yacht",
        Corvette => "Corvette",
        Prospector => "Prospector",
        Courier => "Courier",
        Barge => "Barge",
        Gunship => "Gunship",
    }
}

labelled_enum! {
    /// Where a ship was built.
    Origin, "origin" {
        OuterRim => "Outer Rim",
        Imperial => "Imperial",
        Void => "Void",
        Industrial => "Industrial",
        Clerical => "Clerical",
        Corporate => "Corporate",
        Scientific => "Scientific",
        Smuggler => "Smuggler",
    }
}

labelled_enum! {
    /// Condition or variant of an individual hull.
    Qualifier, "qualifier" {
        Hardspace => "Hardspace",
        Luxury => "Luxury",
        Surplus => "Surplus",
        Prototype => "Prototype",
        Retrofitted => "Retrofitted",
        Rusty => "Rusty",
        Reinforced => "Reinforced",
        Tuned => "Tuned",
    }
}

// ---------------------------------------------------------------------------
// Goods, crew, passengers
// ---------------------------------------------------------------------------

labelled_enum! {
    /// Market category of a trade good.
    ItemCategory, "item category" {
        Raw => "Raw Materials",
        Industrial => "Industrial",
        Consumable => "Consumables",
        Tech => "Technology",
        Luxury => "Luxury",
        Illegal => "Contraband",
    }
}

labelled_enum! {
    /// Shipboard role a crew member is hired for.
    CrewRole, "crew role" {
        FirstOfficer => "First Officer",
        WeaponsOfficer => "Weapons Officer",
        Navigator => "Navigator",
        Engineer => "Engineer",
        Steward => "Steward",
        Specialist => "Specialist",
    }
}

labelled_enum! {
    /// Background of a crew member.
    CrewKind, "crew kind" {
        Standard => "Standard",
        Android => "Android",
        Convict => "Convict",
    }
}

labelled_enum! {
    /// Kind of passenger contract.
    PassengerKind, "passenger kind" {
        Tourist => "Tourist",
        Worker => "Migrant Worker",
        Business => "Business Executive",
        Vip => "High-Value VIP",
        Refugee => "Refugee",
        Prisoner => "Prisoner Transport",
        Fugitive => "Fugitive",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinals_follow_declaration_order() {
        assert_eq!(PoliticalStatus::ImperialCore.ordinal(), 0);
        assert_eq!(PoliticalStatus::FeudalDominion.ordinal(), 19);
        assert_eq!(EconomicStatus::ALL.len(), 20);
        assert_eq!(SocialStatus::ALL.len(), 20);
        assert_eq!(Chassis::ALL.len(), 8);
        assert_eq!(Origin::ALL.len(), 8);
        assert_eq!(Qualifier::ALL.len(), 8);
    }

    #[test]
    fn from_ordinal_rejects_out_of_range() {
        assert_eq!(
            SocialStatus::from_ordinal(17),
            Some(SocialStatus::GhostTown)
        );
        assert_eq!(SocialStatus::from_ordinal(20), None);
        assert_eq!(Chassis::from_ordinal(-1), None);
    }

    #[test]
    fn every_ordinal_maps_back_to_itself() {
        for tag in EconomicStatus::ALL {
            assert_eq!(
                EconomicStatus::from_ordinal(i64::from(tag.ordinal())),
                Some(*tag)
            );
        }
    }

    #[test]
    fn labels_are_human_readable() {
        assert_eq!(PoliticalStatus::AiGovernance.to_string(), "AI Governance");
        assert_eq!(EconomicStatus::PostScarcity.label(), "Post-Scarcity Utopia");
        assert_eq!(Origin::OuterRim.to_string(), "Outer Rim");
    }
}
