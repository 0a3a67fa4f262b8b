//! Add-on line items and coverage adjustments.
//!
//! Sealant and polymeric sand are derived from the project area in fixed
//! coverage tiers; area overage inflates every stone's coverage before the
//! fulfillment split. Unit prices here are fixed business constants.

use crate::ids::SkuId;
use crate::money::Money;
use crate::quote::fulfillment::MergedLine;
use crate::quote::{PickupLocation, QuoteItem, SellUnit};
use crate::units::{round_to, RoundDirection};
use std::collections::BTreeSet;

/// Material inflation applied with the area-overage add-on, buffering
/// cutting waste and future repairs.
pub const OVERAGE_MULTIPLIER: f64 = 1.05;

/// Square feet one 5-gallon sealant pail covers.
pub const SEALANT_FIVE_GAL_SQFT: f64 = 500.0;
/// Price per 5-gallon sealant pail.
pub const SEALANT_FIVE_GAL_PRICE: Money = Money::from_cents(2_582_609);

/// Square feet one 1-gallon sealant pail covers.
pub const SEALANT_ONE_GAL_SQFT: f64 = 100.0;
/// Price per 1-gallon sealant pail.
pub const SEALANT_ONE_GAL_PRICE: Money = Money::from_cents(591_304);

/// Square feet one bag of polymeric sand covers.
pub const POLYMERIC_SQFT_PER_BAG: f64 = 100.0;
/// Price per bag of polymeric sand.
pub const POLYMERIC_BAG_PRICE: Money = Money::from_cents(269_565);

/// Inflate every merged line's coverage by the overage multiplier.
pub fn apply_overage(lines: &mut [MergedLine]) {
    for line in lines {
        line.coverage *= OVERAGE_MULTIPLIER;
    }
}

/// Sealant items for a project area: bulk 5-gallon pails from the factory,
/// topped up with 1-gallon pails from the showroom. Zero-priced tiers are
/// omitted.
pub fn sealant_items(project_area: f64) -> Vec<QuoteItem> {
    let five_gal_coverage = round_to(project_area, SEALANT_FIVE_GAL_SQFT, RoundDirection::Down);
    let one_gal_coverage = round_to(
        project_area - five_gal_coverage,
        SEALANT_ONE_GAL_SQFT,
        RoundDirection::Up,
    );

    let mut items = Vec::new();
    if let Some(item) = addon_item(
        "sealant:5gal",
        "Paver Sealant (5 gal)",
        PickupLocation::Factory,
        five_gal_coverage / SEALANT_FIVE_GAL_SQFT,
        SEALANT_FIVE_GAL_PRICE,
    ) {
        items.push(item);
    }
    if let Some(item) = addon_item(
        "sealant:1gal",
        "Paver Sealant (1 gal)",
        PickupLocation::Showroom,
        one_gal_coverage / SEALANT_ONE_GAL_SQFT,
        SEALANT_ONE_GAL_PRICE,
    ) {
        items.push(item);
    }
    items
}

/// The polymeric sand item for a project area. Always a single factory
/// item, even at zero quantity.
pub fn polymeric_item(project_area: f64) -> QuoteItem {
    let coverage = round_to(project_area, POLYMERIC_SQFT_PER_BAG, RoundDirection::Up);
    let quantity = (coverage / POLYMERIC_SQFT_PER_BAG).round();
    QuoteItem {
        sku_id: SkuId::new("polymeric_sand:bag"),
        pickup_location: PickupLocation::Factory,
        display_name: "Polymeric Sand".to_string(),
        cost: POLYMERIC_BAG_PRICE * quantity as i64,
        area: None,
        quantity,
        unit: SellUnit::Unit,
        weight: 0.0,
        signatures: BTreeSet::new(),
    }
}

fn addon_item(
    sku: &str,
    name: &str,
    location: PickupLocation,
    quantity: f64,
    unit_price: Money,
) -> Option<QuoteItem> {
    let quantity = quantity.round();
    let cost = unit_price * quantity as i64;
    if !cost.is_positive() {
        return None;
    }
    Some(QuoteItem {
        sku_id: SkuId::new(sku),
        pickup_location: location,
        display_name: name.to_string(),
        cost,
        area: None,
        quantity,
        unit: SellUnit::Unit,
        weight: 0.0,
        signatures: BTreeSet::new(),
    })
}
