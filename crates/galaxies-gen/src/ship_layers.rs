//! Modifier tables for the origin and qualifier ship dimensions.
//!
//! The chassis dimension is not a layer: it selects the baseline roll
//! ranges in [`crate::ship`]. Origin is applied before qualifier.

use galaxies_types::{Origin, Qualifier, ShipStats};

use crate::modifiers::{Archetype, Edit, ShipField as F};

impl Archetype for Origin {
    type Block = ShipStats;

    fn edits(self) -> Vec<Edit<F>> {
        match self {
            Self::OuterRim => vec![
                Edit::mul(F::FuelEfficiency, 0.8),
                Edit::mul(F::MaxShield, 0.8),
                Edit::mul(F::MaxHull, 1.1),
            ],
            Self::Imperial => vec![
                Edit::mul(F::MaxHull, 1.2),
                Edit::mul(F::PowerGrid, 1.15),
                Edit::set(F::StealthRating, 0.0),
            ],
            Self::Void => vec![
                Edit::add(F::StealthRating, 0.3),
                Edit::mul(F::MaxHull, 0.7),
                Edit::mul(F::MaxShield, 0.7),
            ],
            Self::Industrial => vec![
                Edit::mul(F::CargoVolume, 1.3),
                Edit::add(F::LowSlots, 1.0),
            ],
            Self::Clerical => vec![
                Edit::add(F::PassengerCabins, 2.0),
                Edit::add(F::CrewBunks, 2.0),
                Edit::add(F::HighSlots, -1.0),
            ],
            Self::Corporate => vec![
                Edit::mul(F::PowerGrid, 1.1),
                Edit::mul(F::FuelEfficiency, 0.9),
                Edit::mul(F::MaxHull, 0.9),
            ],
            Self::Scientific => vec![
                Edit::mul(F::MaxShield, 1.25),
                Edit::mul(F::JumpRange, 1.1),
                Edit::mul(F::CargoVolume, 0.8),
            ],
            Self::Smuggler => vec![
                Edit::add(F::StealthRating, 0.2),
                Edit::mul(F::MaxHull, 0.8),
            ],
        }
    }
}

impl Archetype for Qualifier {
    type Block = ShipStats;

    fn edits(self) -> Vec<Edit<F>> {
        match self {
            Self::Hardspace => vec![
                Edit::mul(F::MaxHull, 1.3),
                Edit::mul(F::JumpRange, 0.9),
            ],
            Self::Luxury => vec![
                Edit::add(F::PassengerCabins, 1.0),
                Edit::mul(F::PowerGrid, 1.1),
            ],
            Self::Surplus => vec![
                Edit::mul(F::MaxHull, 0.9),
                Edit::mul(F::MaxShield, 0.8),
                Edit::mul(F::DamageBonus, 0.9),
            ],
            Self::Prototype => vec![
                Edit::add(F::PowerGrid, 150.0),
                Edit::mul(F::MaxHull, 0.8),
                Edit::mul(F::ShieldRegen, 1.2),
            ],
            Self::Retrofitted => vec![
                Edit::add(F::LowSlots, 1.0),
                Edit::mul(F::MaxHull, 0.85),
            ],
            Self::Rusty => vec![
                Edit::mul(F::MaxHull, 0.7),
                Edit::mul(F::MaxShield, 0.6),
                Edit::mul(F::BaseAccuracy, 0.8),
                Edit::mul(F::ShieldRegen, 0.5),
            ],
            Self::Reinforced => vec![
                Edit::mul(F::MaxHull, 1.4),
                Edit::mul(F::JumpRange, 0.8),
            ],
            Self::Tuned => vec![
                Edit::mul(F::ShieldRegen, 1.2),
                Edit::mul(F::BaseAccuracy, 1.1),
                Edit::mul(F::MaxHull, 0.9),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modifiers::apply_layer;

    #[test]
    fn every_ship_layer_applies() {
        for origin in Origin::ALL {
            let mut stats = ShipStats::default();
            assert!(apply_layer(&mut stats, &origin.edits()).is_ok(), "{origin}");
        }
        for qualifier in Qualifier::ALL {
            let mut stats = ShipStats::default();
            assert!(apply_layer(&mut stats, &qualifier.edits()).is_ok(), "{qualifier}");
        }
    }

    #[test]
    fn clerical_never_drops_slots_below_zero() {
        let mut stats = ShipStats::default();
        apply_layer(&mut stats, &Origin::Clerical.edits()).ok();
        assert_eq!(stats.high_slots, 0);
        assert_eq!(stats.passenger_cabins, 2);
    }
}
