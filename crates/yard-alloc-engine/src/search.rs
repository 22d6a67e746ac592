// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use crate::catalog::SpecCatalog;
use crate::err::{NoFreeCellError, NoPlanError, YardError};
use crate::occupancy::OccupancyOracle;
use crate::store::{CatalogRead, OccupancyRead};
use tracing::{debug, trace};
use yard_alloc_core::prelude::*;
use yard_alloc_model::prelude::*;

/// Every footprint `plan` admits inside `bounds`, in scan order: slot, then
/// row, then tier, all ascending.
///
/// The plan region is clipped to the block first. Pairs only anchor where
/// the partner slot stays inside the clipped region, so the last slot of a
/// region never anchors a pair.
pub fn candidates(plan: &Plan, bounds: &BlockBounds) -> impl Iterator<Item = Footprint> + use<> {
    let size = plan.spec().size();
    let slots = plan.slots().clip_to(bounds.total_slot());
    let rows = plan.rows().clip_to(bounds.total_row());
    let tiers = bounds.tiers();

    slots.zip(rows).into_iter().flat_map(move |(slots, rows)| {
        let last = slots.last();
        slots
            .iter()
            .filter(move |s| !size.is_pair() || s.checked_next().is_some_and(|n| n <= last))
            .flat_map(move |s| {
                rows.iter()
                    .flat_map(move |r| tiers.iter().map(move |t| Cell::new(s, r, t)))
            })
            .filter_map(move |anchor| Footprint::for_size(size, anchor))
    })
}

/// First-fit scan over the plans of a yard.
///
/// Results are advisory. Nothing is reserved, so a suggestion may be taken
/// by someone else before it is placed.
#[derive(Debug)]
pub struct AllocationSearch<'s, S: ?Sized> {
    catalog: SpecCatalog<'s, S>,
    oracle: OccupancyOracle<'s, S>,
}

impl<'s, S> AllocationSearch<'s, S>
where
    S: CatalogRead + OccupancyRead + ?Sized,
{
    #[inline]
    pub fn new(store: &'s S) -> Self {
        Self {
            catalog: SpecCatalog::new(store),
            oracle: OccupancyOracle::new(store),
        }
    }

    pub fn suggest(&self, yard: &YardCode, spec: &ContainerSpec) -> Result<Suggestion, YardError> {
        let plans = self.catalog.find_plans(yard, spec)?;
        if plans.is_empty() {
            return Err(NoPlanError::new(yard.clone(), spec.clone()).into());
        }

        let mut block: Option<Block> = None;
        for plan in &plans {
            let current = match block.take() {
                Some(b) if b.id() == plan.block_id() => b,
                _ => self.catalog.block(plan.block_id())?,
            };

            for footprint in candidates(plan, current.bounds()) {
                if !self.oracle.is_footprint_occupied(current.id(), &footprint)? {
                    debug!(
                        yard = %yard,
                        block = %current.code(),
                        plan = %plan.id(),
                        footprint = %footprint,
                        "Free position found"
                    );
                    return Ok(Suggestion::new(current.code().clone(), footprint));
                }
            }
            trace!(plan = %plan.id(), block = %current.code(), "Plan exhausted");
            block = Some(current);
        }

        debug!(yard = %yard, spec = %spec, plans = plans.len(), "No free position");
        Err(NoFreeCellError::new(yard.clone(), spec.clone(), plans.len()).into())
    }
}
