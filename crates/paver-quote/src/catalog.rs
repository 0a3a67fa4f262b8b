//! Stone catalog metadata and lookup collaborators.
//!
//! The engine never fetches product data itself. The caller resolves every
//! referenced SKU ahead of time and passes in any [`CatalogLookup`]
//! implementation, typically a [`Catalog`] for tests and batch callers or a
//! [`CatalogCache`] for a form layer that retains metadata per active pattern.

use crate::ids::SkuId;
use crate::money::Money;
use crate::project::BorderOrientation;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// What a stone's catalog price is quoted against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PriceUnit {
    /// Price per square foot of coverage.
    #[default]
    Sqft,
    /// Price per individual unit.
    Unit,
}

/// Length-to-area conversion factors for stones laid as border courses.
///
/// Present only on border-capable stones; a border pattern referencing a
/// stone without factors is a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct ConversionFactors {
    pub soldier_row: f64,
    pub tip_to_tip: f64,
}

impl ConversionFactors {
    /// Factor converting running feet to square feet for an orientation.
    pub fn for_orientation(&self, orientation: BorderOrientation) -> f64 {
        match orientation {
            BorderOrientation::SoldierRow => self.soldier_row,
            BorderOrientation::TipToTip => self.tip_to_tip,
        }
    }
}

/// Physical packaging facts for a paver SKU.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaverDetails {
    /// Weight per piece in pounds.
    pub lbs_per_unit: f64,
    /// Coverage of one full pallet in square feet.
    pub sqft_per_pallet: f64,
    /// Pieces on a full pallet.
    pub pcs_per_pallet: f64,
    /// Pieces needed to cover one square foot.
    pub pcs_per_sqft: f64,
    /// Border conversion factors, present only for border-capable stones.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversion_factors: Option<ConversionFactors>,
}

/// Catalog metadata for one stone SKU, resolved externally by the data layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoneMetadata {
    pub sku_id: SkuId,
    pub display_name: String,
    /// Price per `unit` (square foot or piece).
    pub price: Money,
    pub unit: PriceUnit,
    pub details: PaverDetails,
}

/// Read-only SKU metadata lookup supplied by the caller.
pub trait CatalogLookup {
    /// Resolve metadata for a SKU, or None if the catalog has no entry.
    fn stone(&self, sku_id: &SkuId) -> Option<&StoneMetadata>;
}

/// A plain map-backed catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    stones: HashMap<SkuId, StoneMetadata>,
}

impl Catalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a stone's metadata.
    pub fn insert(&mut self, metadata: StoneMetadata) {
        self.stones.insert(metadata.sku_id.clone(), metadata);
    }

    /// Number of SKUs in the catalog.
    pub fn len(&self) -> usize {
        self.stones.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.stones.is_empty()
    }
}

impl CatalogLookup for Catalog {
    fn stone(&self, sku_id: &SkuId) -> Option<&StoneMetadata> {
        self.stones.get(sku_id)
    }
}

impl FromIterator<StoneMetadata> for Catalog {
    fn from_iter<I: IntoIterator<Item = StoneMetadata>>(iter: I) -> Self {
        let mut catalog = Catalog::new();
        for metadata in iter {
            catalog.insert(metadata);
        }
        catalog
    }
}

/// Reference-counted metadata cache for interactive callers.
///
/// The form layer retains a SKU once per active pattern referencing it and
/// releases it when the reference goes away; metadata drops at zero refs.
/// The engine only sees this through [`CatalogLookup`] and stays stateless.
#[derive(Debug, Clone, Default)]
pub struct CatalogCache {
    entries: HashMap<SkuId, CacheEntry>,
}

#[derive(Debug, Clone)]
struct CacheEntry {
    metadata: StoneMetadata,
    refs: usize,
}

impl CatalogCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Retain metadata for a SKU, bumping its reference count.
    pub fn retain(&mut self, metadata: StoneMetadata) {
        self.entries
            .entry(metadata.sku_id.clone())
            .and_modify(|e| e.refs += 1)
            .or_insert(CacheEntry { metadata, refs: 1 });
    }

    /// Release one reference to a SKU; drops the entry at zero refs.
    ///
    /// Returns true if the entry is still cached afterwards.
    pub fn release(&mut self, sku_id: &SkuId) -> bool {
        match self.entries.get_mut(sku_id) {
            Some(entry) if entry.refs > 1 => {
                entry.refs -= 1;
                true
            }
            Some(_) => {
                self.entries.remove(sku_id);
                false
            }
            None => false,
        }
    }

    /// Current reference count for a SKU.
    pub fn ref_count(&self, sku_id: &SkuId) -> usize {
        self.entries.get(sku_id).map(|e| e.refs).unwrap_or(0)
    }
}

impl CatalogLookup for CatalogCache {
    fn stone(&self, sku_id: &SkuId) -> Option<&StoneMetadata> {
        self.entries.get(sku_id).map(|e| &e.metadata)
    }
}
