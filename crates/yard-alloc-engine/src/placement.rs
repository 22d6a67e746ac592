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
use crate::err::{AlreadyPlacedError, CellOccupiedError, OutOfBoundsError, YardError};
use crate::occupancy::OccupancyOracle;
use crate::store::YardTx;
use chrono::{DateTime, Utc};
use yard_alloc_core::prelude::*;
use yard_alloc_model::prelude::*;

/// Places one container on an explicit footprint.
///
/// Checks fail fast in a fixed order: the container must not be placed
/// anywhere yet, every covered cell must be free, and the footprint must lie
/// inside the block. The checks and the insert only mean something when run
/// inside a single [`crate::store::YardStore::transaction`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementTransaction {
    container: ContainerNumber,
    block: BlockId,
    footprint: Footprint,
}

impl PlacementTransaction {
    #[inline]
    pub fn new(container: ContainerNumber, block: BlockId, footprint: Footprint) -> Self {
        Self {
            container,
            block,
            footprint,
        }
    }

    #[inline]
    pub fn container(&self) -> &ContainerNumber {
        &self.container
    }

    #[inline]
    pub fn block(&self) -> BlockId {
        self.block
    }

    #[inline]
    pub fn footprint(&self) -> Footprint {
        self.footprint
    }

    pub fn run(&self, tx: &mut dyn YardTx, now: DateTime<Utc>) -> Result<Position, YardError> {
        if let Some(existing) = tx.active_position(&self.container)? {
            return Err(AlreadyPlacedError::new(
                self.container.clone(),
                existing.id(),
                existing.block_id(),
            )
            .into());
        }

        if let Some((cell, occupant)) =
            OccupancyOracle::new(&*tx).first_occupant(self.block, &self.footprint)?
        {
            return Err(CellOccupiedError::new(self.block, cell, occupant).into());
        }

        let block = SpecCatalog::new(&*tx).block(self.block)?;
        if !block.bounds().contains(&self.footprint) {
            return Err(OutOfBoundsError::new(block.id(), self.footprint, *block.bounds()).into());
        }

        let position = tx.insert_position(NewPosition::new(
            self.container.clone(),
            self.block,
            self.footprint,
            now,
        ))?;
        Ok(position)
    }
}
