//! The quote computation entry point.

use crate::catalog::CatalogLookup;
use crate::error::QuoteError;
use crate::project::{AddonId, Project};
use crate::quote::addons::{apply_overage, polymeric_item, sealant_items};
use crate::quote::aggregate::{aggregate_totals, merge_allocations};
use crate::quote::allocation::{allocate_border, allocate_infill};
use crate::quote::fulfillment::split_fulfillment;
use crate::quote::Quote;
use tracing::debug;

/// Compute a priced quote for a project.
///
/// Pure and stateless: identical `(project, catalog)` inputs always yield
/// an identical quote, so the caller may memoize on structural equality and
/// re-invoke on every form change. All catalog metadata must be resolved
/// before the call; any missing or invalid input fails synchronously.
pub fn compute_quote(
    project: &Project,
    catalog: &impl CatalogLookup,
) -> Result<Quote, QuoteError> {
    let project_area = project.area_sqft();
    let running_feet = project.border_running_feet();
    debug!(project_area, running_feet, "computed project geometry");

    let border = allocate_border(
        running_feet,
        &project.border.contents,
        project.border.orientation,
        catalog,
    )?;
    let infill_capacity = (project_area - border.realized).max(0.0);
    let infill = allocate_infill(infill_capacity, &project.infill.contents, catalog)?;
    debug!(
        border_area = border.realized,
        infill_area = infill.realized,
        "allocated coverage"
    );

    let mut merged = merge_allocations(
        infill
            .allocations
            .into_iter()
            .chain(border.allocations),
        catalog,
    )?;

    if project.addon_enabled(AddonId::AreaOverage) {
        apply_overage(&mut merged);
    }

    let reduce_pickups = project.addon_enabled(AddonId::ReducePickups);
    let mut items = Vec::new();
    for line in &merged {
        items.extend(split_fulfillment(line, reduce_pickups));
    }

    // Sealant and sand are sized to the project area itself, not the
    // post-overage stone coverage.
    if project.addon_enabled(AddonId::Sealant) {
        items.extend(sealant_items(project_area));
    }
    if project.addon_enabled(AddonId::Polymeric) {
        items.push(polymeric_item(project_area));
    }

    let details = aggregate_totals(&items)?;
    debug!(
        item_count = items.len(),
        subtotal = %details.subtotal,
        total = %details.total,
        "quote computed"
    );

    Ok(Quote { items, details })
}
