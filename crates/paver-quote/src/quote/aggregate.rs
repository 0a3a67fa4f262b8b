//! Merging allocations and computing quote totals.

use crate::catalog::CatalogLookup;
use crate::error::QuoteError;
use crate::money::Money;
use crate::quote::allocation::Allocation;
use crate::quote::fulfillment::MergedLine;
use crate::quote::{QuoteDetails, QuoteItem};
use std::collections::BTreeSet;

/// The flat consumption-tax rate applied to the subtotal, in percent.
pub const TAX_RATE_PERCENT: f64 = 15.0;

/// Combine allocations that reference the same SKU.
///
/// Coverage sums and signature tags union, so a stone referenced from both
/// infill and border yields at most one pallet item and one piece item
/// overall. First-seen order is preserved.
pub fn merge_allocations(
    allocations: impl IntoIterator<Item = Allocation>,
    catalog: &impl CatalogLookup,
) -> Result<Vec<MergedLine>, QuoteError> {
    let mut lines: Vec<MergedLine> = Vec::new();
    for allocation in allocations {
        if let Some(line) = lines.iter_mut().find(|l| l.sku_id == allocation.sku_id) {
            line.coverage += allocation.coverage;
            line.signatures.insert(allocation.tag);
            continue;
        }
        let metadata = catalog
            .stone(&allocation.sku_id)
            .ok_or_else(|| QuoteError::StoneNotFound(allocation.sku_id.to_string()))?;
        lines.push(MergedLine {
            sku_id: allocation.sku_id,
            coverage: allocation.coverage,
            metadata: metadata.clone(),
            signatures: BTreeSet::from([allocation.tag]),
        });
    }
    Ok(lines)
}

/// Sum totals over the final item list.
pub fn aggregate_totals(items: &[QuoteItem]) -> Result<QuoteDetails, QuoteError> {
    let subtotal =
        Money::try_sum(items.iter().map(|i| &i.cost)).ok_or(QuoteError::Overflow)?;
    let tax = subtotal.percentage(TAX_RATE_PERCENT);
    let total = subtotal.try_add(&tax).ok_or(QuoteError::Overflow)?;

    Ok(QuoteDetails {
        total_area: items.iter().filter_map(|i| i.area).sum(),
        total_weight: items.iter().map(|i| i.weight).sum(),
        subtotal,
        tax,
        total,
    })
}
