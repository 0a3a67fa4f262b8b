//! Coverage allocation: splitting patterns into per-stone contributions.
//!
//! The same algorithm runs once for the 1-D border (over running feet) and
//! once for the 2-D infill (over square feet). Fixed patterns consume
//! capacity first; fractional patterns then share whatever remains,
//! proportional to their weights, each drawing from the same post-fixed
//! capacity.

use crate::catalog::CatalogLookup;
use crate::error::QuoteError;
use crate::ids::SkuId;
use crate::project::{BorderOrientation, Coverage, Pattern, StoneRef};
use crate::quote::ItemTag;

/// One stone's share of a capacity, in square feet.
#[derive(Debug, Clone, PartialEq)]
pub struct Allocation {
    pub sku_id: SkuId,
    pub coverage: f64,
    pub tag: ItemTag,
}

/// The result of allocating one capacity across its patterns.
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationOutcome {
    /// Total capacity realized by the allocations, in square feet.
    pub realized: f64,
    pub allocations: Vec<Allocation>,
}

impl AllocationOutcome {
    fn empty() -> Self {
        Self {
            realized: 0.0,
            allocations: Vec::new(),
        }
    }
}

/// Allocate the infill capacity (square feet) across 2-D patterns.
pub fn allocate_infill(
    capacity_sqft: f64,
    patterns: &[Pattern],
    catalog: &impl CatalogLookup,
) -> Result<AllocationOutcome, QuoteError> {
    let contributions = run_allocation(capacity_sqft, patterns, |stone| {
        let metadata = catalog
            .stone(&stone.sku_id)
            .ok_or_else(|| QuoteError::StoneNotFound(stone.sku_id.to_string()))?;
        Ok(stone.quantity / metadata.details.pcs_per_sqft)
    })?;

    let allocations: Vec<Allocation> = contributions
        .into_iter()
        .map(|(sku_id, coverage)| Allocation {
            sku_id,
            coverage,
            tag: ItemTag::Infill,
        })
        .collect();

    Ok(AllocationOutcome {
        realized: allocations.iter().map(|a| a.coverage).sum(),
        allocations,
    })
}

/// Allocate the border's running length (feet) across 1-D patterns.
///
/// Contributions are computed as running lengths and converted to areas with
/// the stone's conversion factor for the laying orientation; quantities
/// convert to lengths with the inverse factor of the opposite orientation.
pub fn allocate_border(
    running_feet: f64,
    patterns: &[Pattern],
    orientation: BorderOrientation,
    catalog: &impl CatalogLookup,
) -> Result<AllocationOutcome, QuoteError> {
    if patterns.is_empty() {
        return Ok(AllocationOutcome::empty());
    }

    let lengths = run_allocation(running_feet, patterns, |stone| {
        let factors = border_factors(catalog, &stone.sku_id)?;
        Ok(stone.quantity / factors.for_orientation(orientation.opposite()))
    })?;

    let mut allocations = Vec::with_capacity(lengths.len());
    for (sku_id, length) in lengths {
        let factors = border_factors(catalog, &sku_id)?;
        allocations.push(Allocation {
            coverage: length * factors.for_orientation(orientation),
            sku_id,
            tag: ItemTag::Border,
        });
    }

    Ok(AllocationOutcome {
        realized: allocations.iter().map(|a| a.coverage).sum(),
        allocations,
    })
}

fn border_factors(
    catalog: &impl CatalogLookup,
    sku_id: &SkuId,
) -> Result<crate::catalog::ConversionFactors, QuoteError> {
    let metadata = catalog
        .stone(sku_id)
        .ok_or_else(|| QuoteError::StoneNotFound(sku_id.to_string()))?;
    metadata
        .details
        .conversion_factors
        .ok_or_else(|| QuoteError::NotABorderStone(sku_id.to_string()))
}

/// The fixed-then-fractional allocation pass shared by both dimensions.
///
/// `stone_size` returns one pattern repeat's worth of a stone in capacity
/// units (square feet for infill, running feet for border).
fn run_allocation(
    capacity: f64,
    patterns: &[Pattern],
    mut stone_size: impl FnMut(&StoneRef) -> Result<f64, QuoteError>,
) -> Result<Vec<(SkuId, f64)>, QuoteError> {
    let mut contributions = Vec::new();
    let mut remaining = capacity;

    // Fixed patterns consume capacity first.
    for (index, pattern) in patterns.iter().enumerate() {
        let Coverage::Fixed { unit, value } = pattern.coverage else {
            continue;
        };
        let stones = pattern_sizes(pattern, &mut stone_size)?;
        let intrinsic: f64 = stones.iter().map(|(_, size)| size).sum();
        // `unit` repeats scale the pattern's own size; everything else is a
        // unit-converted absolute target.
        let target = unit.canonical(value).unwrap_or(value * intrinsic);

        if intrinsic <= 0.0 {
            if target != 0.0 {
                return Err(QuoteError::DegeneratePattern { index, target });
            }
            continue;
        }

        let scale = target / intrinsic;
        contributions.extend(stones.into_iter().map(|(sku, size)| (sku, size * scale)));
        remaining -= target;
    }

    // Excess fixed coverage clamps to zero; it never goes negative into the
    // fractional pass.
    let remaining = remaining.max(0.0);

    let weight_sum: f64 = patterns
        .iter()
        .filter_map(|p| match p.coverage {
            Coverage::Fractional { weight } => Some(weight),
            Coverage::Fixed { .. } => None,
        })
        .sum();

    if remaining > 0.0 && weight_sum > 0.0 {
        for (index, pattern) in patterns.iter().enumerate() {
            let Coverage::Fractional { weight } = pattern.coverage else {
                continue;
            };
            // Each fractional pattern draws from the same post-fixed
            // capacity, not a shrinking one.
            let segment = remaining * weight / weight_sum;
            if segment <= 0.0 {
                continue;
            }
            let stones = pattern_sizes(pattern, &mut stone_size)?;
            let intrinsic: f64 = stones.iter().map(|(_, size)| size).sum();
            if intrinsic <= 0.0 {
                return Err(QuoteError::DegeneratePattern {
                    index,
                    target: segment,
                });
            }
            contributions.extend(
                stones
                    .into_iter()
                    .map(|(sku, size)| (sku, size / intrinsic * segment)),
            );
        }
    }

    Ok(contributions)
}

fn pattern_sizes(
    pattern: &Pattern,
    stone_size: &mut impl FnMut(&StoneRef) -> Result<f64, QuoteError>,
) -> Result<Vec<(SkuId, f64)>, QuoteError> {
    pattern
        .contents
        .iter()
        .map(|stone| Ok((stone.sku_id.clone(), stone_size(stone)?)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, ConversionFactors, PaverDetails, PriceUnit, StoneMetadata};
    use crate::money::Money;
    use crate::project::CoverageUnit;

    fn stone(sku: &str, pcs_per_sqft: f64, factors: Option<ConversionFactors>) -> StoneMetadata {
        StoneMetadata {
            sku_id: SkuId::new(sku),
            display_name: sku.to_string(),
            price: Money::from_cents(20000),
            unit: PriceUnit::Sqft,
            details: PaverDetails {
                lbs_per_unit: 20.0,
                sqft_per_pallet: 120.0,
                pcs_per_pallet: 480.0,
                pcs_per_sqft,
                conversion_factors: factors,
            },
        }
    }

    fn stone_ref(sku: &str, quantity: f64) -> StoneRef {
        StoneRef {
            sku_id: SkuId::new(sku),
            quantity,
        }
    }

    #[test]
    fn test_fixed_area_pattern_scales_stones() {
        // Two stones at 4 pcs/sqft: intrinsic 0.25 + 0.75 = 1.0 sqft.
        let catalog: Catalog = [stone("a", 4.0, None), stone("b", 4.0, None)]
            .into_iter()
            .collect();
        let patterns = vec![Pattern::with_fixed(
            40.0,
            CoverageUnit::Sqft,
            vec![stone_ref("a", 1.0), stone_ref("b", 3.0)],
        )];

        let outcome = allocate_infill(100.0, &patterns, &catalog).unwrap();
        assert!((outcome.realized - 40.0).abs() < 1e-9);
        assert!((outcome.allocations[0].coverage - 10.0).abs() < 1e-9);
        assert!((outcome.allocations[1].coverage - 30.0).abs() < 1e-9);
        assert_eq!(outcome.allocations[0].tag, ItemTag::Infill);
    }

    #[test]
    fn test_repeats_pattern_targets_intrinsic_multiple() {
        let catalog: Catalog = [stone("a", 4.0, None)].into_iter().collect();
        // One repeat covers 2/4 = 0.5 sqft; 6 repeats cover 3 sqft.
        let patterns = vec![Pattern::with_fixed(
            6.0,
            CoverageUnit::Unit,
            vec![stone_ref("a", 2.0)],
        )];

        let outcome = allocate_infill(100.0, &patterns, &catalog).unwrap();
        assert!((outcome.realized - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_fractional_proportionality() {
        let catalog: Catalog = [stone("a", 4.0, None), stone("b", 2.0, None)]
            .into_iter()
            .collect();
        let patterns = vec![
            Pattern::with_fraction(1.0, vec![stone_ref("a", 1.0)]),
            Pattern::with_fraction(3.0, vec![stone_ref("b", 1.0)]),
        ];

        let outcome = allocate_infill(100.0, &patterns, &catalog).unwrap();
        assert!((outcome.allocations[0].coverage - 25.0).abs() < 1e-9);
        assert!((outcome.allocations[1].coverage - 75.0).abs() < 1e-9);
        assert!((outcome.realized - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_fractional_distributes_by_intrinsic_share() {
        let catalog: Catalog = [stone("a", 4.0, None), stone("b", 2.0, None)]
            .into_iter()
            .collect();
        // Intrinsic shares: a = 0.25, b = 0.5, so a gets 1/3, b gets 2/3.
        let patterns = vec![Pattern::with_fraction(
            1.0,
            vec![stone_ref("a", 1.0), stone_ref("b", 1.0)],
        )];

        let outcome = allocate_infill(90.0, &patterns, &catalog).unwrap();
        assert!((outcome.allocations[0].coverage - 30.0).abs() < 1e-9);
        assert!((outcome.allocations[1].coverage - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_fixed_overflow_clamps_fractional_to_zero() {
        let catalog: Catalog = [stone("a", 4.0, None), stone("b", 4.0, None)]
            .into_iter()
            .collect();
        let patterns = vec![
            Pattern::with_fixed(120.0, CoverageUnit::Sqft, vec![stone_ref("a", 1.0)]),
            Pattern::with_fraction(1.0, vec![stone_ref("b", 1.0)]),
        ];

        let outcome = allocate_infill(100.0, &patterns, &catalog).unwrap();
        // The fixed pattern keeps its full target; the fractional pattern
        // receives nothing.
        assert_eq!(outcome.allocations.len(), 1);
        assert!((outcome.allocations[0].coverage - 120.0).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_fixed_pattern_fails() {
        let catalog: Catalog = [stone("a", 4.0, None)].into_iter().collect();
        let patterns = vec![Pattern::with_fixed(
            50.0,
            CoverageUnit::Sqft,
            vec![stone_ref("a", 0.0)],
        )];

        let err = allocate_infill(100.0, &patterns, &catalog).unwrap_err();
        assert!(matches!(err, QuoteError::DegeneratePattern { index: 0, .. }));
    }

    #[test]
    fn test_degenerate_fractional_pattern_fails() {
        let catalog: Catalog = [stone("a", 4.0, None)].into_iter().collect();
        let patterns = vec![Pattern::with_fraction(1.0, vec![stone_ref("a", 0.0)])];

        let err = allocate_infill(100.0, &patterns, &catalog).unwrap_err();
        assert!(matches!(err, QuoteError::DegeneratePattern { .. }));
    }

    #[test]
    fn test_missing_stone_fails_fast() {
        let catalog = Catalog::new();
        let patterns = vec![Pattern::with_fraction(1.0, vec![stone_ref("ghost", 1.0)])];

        let err = allocate_infill(100.0, &patterns, &catalog).unwrap_err();
        assert!(matches!(err, QuoteError::StoneNotFound(sku) if sku == "ghost"));
    }

    #[test]
    fn test_zero_capacity_skips_fractional() {
        let catalog: Catalog = [stone("a", 4.0, None)].into_iter().collect();
        let patterns = vec![Pattern::with_fraction(1.0, vec![stone_ref("a", 1.0)])];

        let outcome = allocate_infill(0.0, &patterns, &catalog).unwrap();
        assert!(outcome.allocations.is_empty());
        assert_eq!(outcome.realized, 0.0);
    }

    #[test]
    fn test_border_length_and_area_conversion() {
        let factors = ConversionFactors {
            soldier_row: 1.0,
            tip_to_tip: 0.5,
        };
        let catalog: Catalog = [stone("edge", 4.0, Some(factors))].into_iter().collect();
        // SoldierRow: one piece spans 1/tip_to_tip = 2 running feet.
        let patterns = vec![Pattern::with_fixed(
            20.0,
            CoverageUnit::Ft,
            vec![stone_ref("edge", 1.0)],
        )];

        let outcome = allocate_border(
            40.0,
            &patterns,
            BorderOrientation::SoldierRow,
            &catalog,
        )
        .unwrap();

        // 20 running feet at soldier_row factor 1.0 -> 20 sqft of border.
        assert_eq!(outcome.allocations.len(), 1);
        assert!((outcome.allocations[0].coverage - 20.0).abs() < 1e-9);
        assert!((outcome.realized - 20.0).abs() < 1e-9);
        assert_eq!(outcome.allocations[0].tag, ItemTag::Border);
    }

    #[test]
    fn test_border_fractional_fills_running_length() {
        let factors = ConversionFactors {
            soldier_row: 0.8,
            tip_to_tip: 0.4,
        };
        let catalog: Catalog = [stone("edge", 4.0, Some(factors))].into_iter().collect();
        let patterns = vec![Pattern::with_fraction(1.0, vec![stone_ref("edge", 1.0)])];

        let outcome =
            allocate_border(50.0, &patterns, BorderOrientation::TipToTip, &catalog).unwrap();

        // Entire 50 running feet allocated, converted at tip_to_tip 0.4.
        assert!((outcome.realized - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_non_border_stone_rejected() {
        let catalog: Catalog = [stone("field_only", 4.0, None)].into_iter().collect();
        let patterns = vec![Pattern::with_fraction(1.0, vec![stone_ref("field_only", 1.0)])];

        let err = allocate_border(
            40.0,
            &patterns,
            BorderOrientation::SoldierRow,
            &catalog,
        )
        .unwrap_err();
        assert!(matches!(err, QuoteError::NotABorderStone(sku) if sku == "field_only"));
    }
}
