//! Quote computation engine for the paver storefront.
//!
//! Turns a project description (shape, measurements, border and infill
//! patterns, add-ons) into a fully priced, itemized, fulfillment-aware
//! quote. The engine is a pure function over its inputs: no I/O, no
//! retained state, no caching. Persistence, transport and UI live in other
//! layers.
//!
//! # Example
//!
//! ```rust
//! use paver_quote::prelude::*;
//!
//! let catalog: Catalog = [StoneMetadata {
//!     sku_id: SkuId::new("colonial_classic:grey"),
//!     display_name: "Colonial Classic Grey".to_string(),
//!     price: Money::from_cents(20300),
//!     unit: PriceUnit::Sqft,
//!     details: PaverDetails {
//!         lbs_per_unit: 23.0,
//!         sqft_per_pallet: 128.75,
//!         pcs_per_pallet: 600.0,
//!         pcs_per_sqft: 4.66,
//!         conversion_factors: None,
//!     },
//! }]
//! .into_iter()
//! .collect();
//!
//! let project = Project {
//!     shape: Shape::Rect,
//!     measurements: Measurements {
//!         unit: LengthUnit::Ft,
//!         width: 10.0,
//!         length: 10.0,
//!         ..Measurements::default()
//!     },
//!     infill: Infill {
//!         contents: vec![Pattern::with_fraction(
//!             1.0,
//!             vec![StoneRef {
//!                 sku_id: SkuId::new("colonial_classic:grey"),
//!                 quantity: 1.0,
//!             }],
//!         )],
//!     },
//!     ..Project::default()
//! };
//!
//! let quote = compute_quote(&project, &catalog).unwrap();
//! assert_eq!(quote.details.total, quote.details.subtotal + quote.details.tax);
//! ```

pub mod catalog;
pub mod error;
pub mod ids;
pub mod money;
pub mod project;
pub mod quote;
pub mod units;

pub use error::QuoteError;
pub use ids::SkuId;
pub use money::Money;
pub use quote::compute_quote;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::QuoteError;
    pub use crate::ids::SkuId;
    pub use crate::money::Money;

    // Units
    pub use crate::units::{
        round_to, to_canonical_area, to_canonical_length, AreaUnit, LengthUnit, RoundDirection,
    };

    // Catalog
    pub use crate::catalog::{
        Catalog, CatalogCache, CatalogLookup, ConversionFactors, PaverDetails, PriceUnit,
        StoneMetadata,
    };

    // Project
    pub use crate::project::{
        AddonId, AddonSelection, Border, BorderLength, BorderLengthUnit, BorderOrientation,
        Coverage, CoverageUnit, Infill, Measurements, Pattern, Project, Shape, StoneRef,
    };

    // Quote
    pub use crate::quote::{
        compute_quote, ItemTag, PickupLocation, Quote, QuoteDetails, QuoteItem, SellUnit,
    };
}
