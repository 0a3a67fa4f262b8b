//! Priced quote output types and the computation pipeline.
//!
//! Pipeline stages, in order: geometry, border allocation, infill
//! allocation, merge, add-on adjustments, fulfillment split, aggregation.

pub mod addons;
pub mod aggregate;
pub mod allocation;
pub mod engine;
pub mod fulfillment;

pub use allocation::{Allocation, AllocationOutcome};
pub use engine::compute_quote;
pub use fulfillment::MergedLine;

use crate::ids::SkuId;
use crate::money::Money;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Where a line item is picked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PickupLocation {
    /// Bulk pallet pickup at the factory yard.
    Factory,
    /// Per-piece pickup at the showroom.
    Showroom,
}

/// The sellable unit a line item is quantified in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SellUnit {
    /// Pallets (factory channel); fractional half-pallet counts are valid.
    #[serde(rename = "pal")]
    Pallet,
    /// Individual pieces (showroom channel).
    #[serde(rename = "pcs")]
    Pieces,
    /// Whole add-on units (pails, bags).
    #[serde(rename = "unit")]
    Unit,
}

/// Which part of the project an allocation came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemTag {
    Infill,
    Border,
}

/// One purchasable line on the quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteItem {
    pub sku_id: SkuId,
    pub pickup_location: PickupLocation,
    pub display_name: String,
    pub cost: Money,
    /// Covered area in square feet; absent for add-on items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<f64>,
    pub quantity: f64,
    pub unit: SellUnit,
    /// Total weight in pounds.
    pub weight: f64,
    /// Which parts of the project reference this stone.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub signatures: BTreeSet<ItemTag>,
}

/// Aggregate totals over a quote's items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteDetails {
    /// Sum of item areas, square feet.
    pub total_area: f64,
    /// Sum of item weights, pounds.
    pub total_weight: f64,
    pub subtotal: Money,
    pub tax: Money,
    pub total: Money,
}

/// A fully priced, itemized quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub items: Vec<QuoteItem>,
    pub details: QuoteDetails,
}

impl Quote {
    /// Items bound to a pickup location.
    pub fn items_at(&self, location: PickupLocation) -> impl Iterator<Item = &QuoteItem> {
        self.items
            .iter()
            .filter(move |i| i.pickup_location == location)
    }
}
