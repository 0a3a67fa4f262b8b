//! Pallet / piece fulfillment split.
//!
//! The factory channel sells by the half-pallet increment; the showroom
//! channel sells the remainder by the piece at a flat markup. With the
//! reduce-pickups add-on all coverage rounds up onto pallets and the
//! showroom remainder is structurally zero.

use crate::catalog::StoneMetadata;
use crate::ids::SkuId;
use crate::money::Money;
use crate::quote::{ItemTag, PickupLocation, QuoteItem, SellUnit};
use crate::units::{round_to, RoundDirection};
use std::collections::BTreeSet;

/// Flat showroom markup per unit price, a fixed business rule.
pub const SHOWROOM_MARKUP: Money = Money::from_cents(2000);

/// One stone's merged coverage, ready to be split into channel line items.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedLine {
    pub sku_id: SkuId,
    /// Total square feet this stone must cover across infill and border.
    pub coverage: f64,
    pub metadata: StoneMetadata,
    pub signatures: BTreeSet<ItemTag>,
}

/// Split a merged line into factory and showroom items.
pub fn split_fulfillment(line: &MergedLine, reduce_pickups: bool) -> Vec<QuoteItem> {
    let details = &line.metadata.details;
    let price = line.metadata.price.to_decimal();

    let half_pallet = details.sqft_per_pallet / 2.0;
    let pallet_direction = if reduce_pickups {
        RoundDirection::Up
    } else {
        RoundDirection::Down
    };
    let pallet_area = round_to(line.coverage, half_pallet, pallet_direction);
    let pallet_count = (pallet_area / half_pallet).floor() / 2.0;

    let piece_step = 1.0 / details.pcs_per_sqft;
    let piece_area = round_to(
        (line.coverage - pallet_area).max(0.0),
        piece_step,
        RoundDirection::Up,
    );
    let piece_count = (piece_area * details.pcs_per_sqft).round();

    let factory_cost = Money::from_decimal(pallet_area * price);
    let showroom_cost =
        Money::from_decimal(piece_area * (price + SHOWROOM_MARKUP.to_decimal()));

    let mut items = Vec::new();
    if factory_cost.is_positive() {
        items.push(QuoteItem {
            sku_id: line.sku_id.clone(),
            pickup_location: PickupLocation::Factory,
            display_name: line.metadata.display_name.clone(),
            cost: factory_cost,
            area: Some(pallet_area),
            quantity: pallet_count,
            unit: SellUnit::Pallet,
            weight: channel_weight(pallet_area, details.pcs_per_sqft, details.lbs_per_unit),
            signatures: line.signatures.clone(),
        });
    }
    if !reduce_pickups && showroom_cost.is_positive() {
        items.push(QuoteItem {
            sku_id: line.sku_id.clone(),
            pickup_location: PickupLocation::Showroom,
            display_name: line.metadata.display_name.clone(),
            cost: showroom_cost,
            area: Some(piece_area),
            quantity: piece_count,
            unit: SellUnit::Pieces,
            weight: channel_weight(piece_area, details.pcs_per_sqft, details.lbs_per_unit),
            signatures: line.signatures.clone(),
        });
    }
    items
}

fn channel_weight(area: f64, pcs_per_sqft: f64, lbs_per_unit: f64) -> f64 {
    area * pcs_per_sqft * lbs_per_unit
}
