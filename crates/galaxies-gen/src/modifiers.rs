//! The archetype modifier engine.
//!
//! A stat block is built by starting from a baseline and applying one
//! layer of declarative edits per archetype tag, in a fixed order, then
//! running a finalize pass (see [`crate::finalize`]).
//!
//! # Architecture
//!
//! | Piece | Role |
//! |-------|------|
//! | [`Edit`] | One `(field, op)` pair; pure data |
//! | [`Op`] | Multiply, add, override or clamp |
//! | [`StatBlock`] | Maps a field name to a mutable [`Slot`] in a concrete struct |
//! | [`Archetype`] | Maps a tag value to its ordered list of edits |
//!
//! Layers compound: each layer sees the values left by the previous one,
//! so `x * 2` followed by `x + 1` differs from the reverse order. The
//! order is fixed by the callers in [`crate::system`] and [`crate::ship`].
//! Layers never draw random numbers.

use galaxies_types::{ShipStats, SystemStats};

use crate::error::GenError;

// ---------------------------------------------------------------------------
// Edits
// ---------------------------------------------------------------------------

/// An operation applied to one field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Op {
    /// `value *= amount`
    Multiply(f64),
    /// `value += amount`
    Add(f64),
    /// `value = amount`. On a boolean field any non-zero amount is `true`.
    Override(f64),
    /// `value = clamp(value, min, max)`
    Clamp {
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },
}

impl Op {
    /// Short name used in error reports.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Multiply(_) => "multiply",
            Self::Add(_) => "add",
            Self::Override(_) => "override",
            Self::Clamp { .. } => "clamp",
        }
    }

    /// Apply the operation to a real value.
    pub fn apply(self, value: f64) -> f64 {
        match self {
            Self::Multiply(amount) => value * amount,
            Self::Add(amount) => value + amount,
            Self::Override(amount) => amount,
            Self::Clamp { min, max } => value.max(min).min(max),
        }
    }
}

/// A declarative edit to one field of a stat block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edit<F> {
    /// Target field.
    pub field: F,
    /// Operation to apply.
    pub op: Op,
}

impl<F> Edit<F> {
    /// `field *= amount`
    pub const fn mul(field: F, amount: f64) -> Self {
        Self {
            field,
            op: Op::Multiply(amount),
        }
    }

    /// `field += amount`
    pub const fn add(field: F, amount: f64) -> Self {
        Self {
            field,
            op: Op::Add(amount),
        }
    }

    /// `field = amount`
    pub const fn set(field: F, amount: f64) -> Self {
        Self {
            field,
            op: Op::Override(amount),
        }
    }

    /// `field = clamp(field, min, max)`
    pub const fn clamp(field: F, min: f64, max: f64) -> Self {
        Self {
            field,
            op: Op::Clamp { min, max },
        }
    }

    /// Turn a facility flag on.
    pub const fn enable(field: F) -> Self {
        Self::set(field, 1.0)
    }

    /// Turn a facility flag off.
    pub const fn disable(field: F) -> Self {
        Self::set(field, 0.0)
    }
}

// ---------------------------------------------------------------------------
// Stat blocks
// ---------------------------------------------------------------------------

/// A mutable view of one field inside a stat block.
#[derive(Debug)]
pub enum Slot<'a> {
    /// Continuous value.
    Real(&'a mut f64),
    /// Signed integer value (fees, skills).
    Integer(&'a mut i64),
    /// Non-negative count (slots, capacities).
    Count(&'a mut u32),
    /// Facility flag.
    Flag(&'a mut bool),
}

/// A struct whose fields can be addressed by a field enum.
pub trait StatBlock {
    /// Field names of this block.
    type Field: Copy + core::fmt::Debug;

    /// Borrow the slot holding `field`.
    fn slot(&mut self, field: Self::Field) -> Slot<'_>;
}

/// A tag whose value selects one layer of edits.
pub trait Archetype: Copy {
    /// The stat block this tag modifies.
    type Block: StatBlock;

    /// Ordered edits for this tag value.
    fn edits(self) -> Vec<Edit<<Self::Block as StatBlock>::Field>>;
}

/// Apply one layer of edits, in order, to a stat block.
pub fn apply_layer<B: StatBlock>(block: &mut B, edits: &[Edit<B::Field>]) -> Result<(), GenError> {
    for edit in edits {
        apply_edit(block, *edit)?;
    }
    Ok(())
}

/// Apply the layer selected by `tag`.
pub fn apply_archetype<A: Archetype>(block: &mut A::Block, tag: A) -> Result<(), GenError> {
    apply_layer(block, &tag.edits())
}

fn apply_edit<B: StatBlock>(block: &mut B, edit: Edit<B::Field>) -> Result<(), GenError> {
    match block.slot(edit.field) {
        Slot::Real(value) => *value = edit.op.apply(*value),
        Slot::Integer(value) => *value = to_integer(edit.op.apply(from_integer(*value))),
        Slot::Count(value) => *value = to_count(edit.op.apply(f64::from(*value))),
        Slot::Flag(value) => match edit.op {
            Op::Override(amount) => *value = amount != 0.0,
            op => {
                return Err(GenError::IncompatibleEdit {
                    field: format!("{:?}", edit.field),
                    op: op.name(),
                });
            }
        },
    }
    Ok(())
}

#[allow(clippy::cast_precision_loss)]
const fn from_integer(value: i64) -> f64 {
    value as f64
}

/// Round to the nearest integer, saturating at the `i64` range.
#[allow(clippy::cast_possible_truncation)]
pub fn to_integer(value: f64) -> i64 {
    // `as` saturates and maps NaN to zero.
    value.round() as i64
}

/// Round to the nearest count, flooring at zero.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn to_count(value: f64) -> u32 {
    if value > 0.0 {
        value.round() as u32
    } else {
        0
    }
}

// ---------------------------------------------------------------------------
// System fields
// ---------------------------------------------------------------------------

/// Addressable fields of [`SystemStats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum SystemField {
    MarketBuyMult,
    MarketSellMult,
    FuelCostMult,
    RepairCostMult,
    DockingFee,
    TaxRate,
    BlackMarketBuyMult,
    BlackMarketSellMult,
    PiracyChance,
    InspectionChance,
    BribeCostMult,
    ContrabandProfit,
    MissionPayMult,
    MissionQuantityMult,
    BountyPayMult,
    ShipCostMult,
    ModCostMult,
    PassengerDensity,
    PassengerWealth,
    VipDensity,
    VipWealth,
    SlumsDensity,
    CrewPoolDensity,
    AndroidDensity,
    PrisonerDensity,
    CrewSkillAvg,
    AndroidSkill,
    CrewHiringCostMult,
    AndroidCostMult,
    WantedPassChance,
    HasShipyard,
    HasOutfitter,
    HasRefueling,
    HasBlackMarket,
    HasMissionBoard,
    HasCantina,
    HasHospital,
    HasPrison,
    HasAndroidFoundry,
    HasLuxuryHousing,
    HasSlums,
}

impl StatBlock for SystemStats {
    type Field = SystemField;

    fn slot(&mut self, field: SystemField) -> Slot<'_> {
        use SystemField as F;
        match field {
            F::MarketBuyMult => Slot::Real(&mut self.market_buy_mult),
            F::MarketSellMult => Slot::Real(&mut self.market_sell_mult),
            F::FuelCostMult => Slot::Real(&mut self.fuel_cost_mult),
            F::RepairCostMult => Slot::Real(&mut self.repair_cost_mult),
            F::DockingFee => Slot::Integer(&mut self.docking_fee),
            F::TaxRate => Slot::Real(&mut self.tax_rate),
            F::BlackMarketBuyMult => Slot::Real(&mut self.black_market_buy_mult),
            F::BlackMarketSellMult => Slot::Real(&mut self.black_market_sell_mult),
            F::PiracyChance => Slot::Real(&mut self.piracy_chance),
            F::InspectionChance => Slot::Real(&mut self.inspection_chance),
            F::BribeCostMult => Slot::Real(&mut self.bribe_cost_mult),
            F::ContrabandProfit => Slot::Real(&mut self.contraband_profit),
            F::MissionPayMult => Slot::Real(&mut self.mission_pay_mult),
            F::MissionQuantityMult => Slot::Real(&mut self.mission_quantity_mult),
            F::BountyPayMult => Slot::Real(&mut self.bounty_pay_mult),
            F::ShipCostMult => Slot::Real(&mut self.ship_cost_mult),
            F::ModCostMult => Slot::Real(&mut self.mod_cost_mult),
            F::PassengerDensity => Slot::Real(&mut self.passenger_density),
            F::PassengerWealth => Slot::Real(&mut self.passenger_wealth),
            F::VipDensity => Slot::Real(&mut self.vip_density),
            F::VipWealth => Slot::Real(&mut self.vip_wealth),
            F::SlumsDensity => Slot::Real(&mut self.slums_density),
            F::CrewPoolDensity => Slot::Real(&mut self.crew_pool_density),
            F::AndroidDensity => Slot::Real(&mut self.android_density),
            F::PrisonerDensity => Slot::Real(&mut self.prisoner_density),
            F::CrewSkillAvg => Slot::Integer(&mut self.crew_skill_avg),
            F::AndroidSkill => Slot::Integer(&mut self.android_skill),
            F::CrewHiringCostMult => Slot::Real(&mut self.crew_hiring_cost_mult),
            F::AndroidCostMult => Slot::Real(&mut self.android_cost_mult),
            F::WantedPassChance => Slot::Real(&mut self.wanted_pass_chance),
            F::HasShipyard => Slot::Flag(&mut self.facilities.shipyard),
            F::HasOutfitter => Slot::Flag(&mut self.facilities.outfitter),
            F::HasRefueling => Slot::Flag(&mut self.facilities.refueling),
            F::HasBlackMarket => Slot::Flag(&mut self.facilities.black_market),
            F::HasMissionBoard => Slot::Flag(&mut self.facilities.mission_board),
            F::HasCantina => Slot::Flag(&mut self.facilities.cantina),
            F::HasHospital => Slot::Flag(&mut self.facilities.hospital),
            F::HasPrison => Slot::Flag(&mut self.facilities.prison),
            F::HasAndroidFoundry => Slot::Flag(&mut self.facilities.android_foundry),
            F::HasLuxuryHousing => Slot::Flag(&mut self.facilities.luxury_housing),
            F::HasSlums => Slot::Flag(&mut self.facilities.slums),
        }
    }
}

// ---------------------------------------------------------------------------
// Ship fields
// ---------------------------------------------------------------------------

/// Addressable fields of [`ShipStats`]. `cost` is derived, not editable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum ShipField {
    MaxHull,
    MaxShield,
    ShieldRegen,
    StealthRating,
    CargoVolume,
    MaxFuel,
    JumpRange,
    FuelEfficiency,
    HighSlots,
    MidSlots,
    LowSlots,
    PowerGrid,
    CrewBunks,
    PassengerCabins,
    BaseAccuracy,
    DamageBonus,
}

impl StatBlock for ShipStats {
    type Field = ShipField;

    fn slot(&mut self, field: ShipField) -> Slot<'_> {
        use ShipField as F;
        match field {
            F::MaxHull => Slot::Real(&mut self.max_hull),
            F::MaxShield => Slot::Real(&mut self.max_shield),
            F::ShieldRegen => Slot::Real(&mut self.shield_regen),
            F::StealthRating => Slot::Real(&mut self.stealth_rating),
            F::CargoVolume => Slot::Count(&mut self.cargo_volume),
            F::MaxFuel => Slot::Real(&mut self.max_fuel),
            F::JumpRange => Slot::Real(&mut self.jump_range),
            F::FuelEfficiency => Slot::Real(&mut self.fuel_efficiency),
            F::HighSlots => Slot::Count(&mut self.high_slots),
            F::MidSlots => Slot::Count(&mut self.mid_slots),
            F::LowSlots => Slot::Count(&mut self.low_slots),
            F::PowerGrid => Slot::Count(&mut self.power_grid),
            F::CrewBunks => Slot::Count(&mut self.crew_bunks),
            F::PassengerCabins => Slot::Count(&mut self.passenger_cabins),
            F::BaseAccuracy => Slot::Real(&mut self.base_accuracy),
            F::DamageBonus => Slot::Real(&mut self.damage_bonus),
        }
    }
}
