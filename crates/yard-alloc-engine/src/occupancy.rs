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

use crate::err::YardError;
use crate::store::OccupancyRead;
use yard_alloc_core::prelude::*;
use yard_alloc_model::prelude::*;

/// Answers whether cells of a block are taken by an active position.
///
/// Every query is evaluated against the stored footprints, so a pair
/// anchored at `slot - 1` occupies `slot` as well.
#[derive(Debug)]
pub struct OccupancyOracle<'s, S: ?Sized> {
    store: &'s S,
}

impl<S: ?Sized> Clone for OccupancyOracle<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: ?Sized> Copy for OccupancyOracle<'_, S> {}

impl<'s, S> OccupancyOracle<'s, S>
where
    S: OccupancyRead + ?Sized,
{
    #[inline]
    pub fn new(store: &'s S) -> Self {
        Self { store }
    }

    #[inline]
    pub fn is_occupied(&self, block: BlockId, cell: Cell) -> Result<bool, YardError> {
        Ok(self.store.occupant(block, cell)?.is_some())
    }

    /// Whether a pair anchored at `anchor` would collide with anything.
    /// A pair whose partner slot cannot be represented counts as occupied.
    pub fn is_occupied_for_40(&self, block: BlockId, anchor: Cell) -> Result<bool, YardError> {
        match Footprint::pair(anchor) {
            Some(footprint) => self.is_footprint_occupied(block, &footprint),
            None => Ok(true),
        }
    }

    #[inline]
    pub fn is_footprint_occupied(
        &self,
        block: BlockId,
        footprint: &Footprint,
    ) -> Result<bool, YardError> {
        Ok(self.first_occupant(block, footprint)?.is_some())
    }

    /// The first covered cell that is taken, anchor first, with its holder.
    pub fn first_occupant(
        &self,
        block: BlockId,
        footprint: &Footprint,
    ) -> Result<Option<(Cell, PositionId)>, YardError> {
        for cell in footprint.cells() {
            if let Some(id) = self.store.occupant(block, cell)? {
                return Ok(Some((cell, id)));
            }
        }
        Ok(None)
    }
}
