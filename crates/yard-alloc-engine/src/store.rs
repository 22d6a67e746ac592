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

//! Store interfaces the engine runs against.
//!
//! The engine never touches occupancy state directly. Reference data is read
//! through [`CatalogRead`], occupancy through [`OccupancyRead`], and every
//! write happens inside [`YardStore::transaction`], which is the only place a
//! check-then-write sequence can be made atomic.

use crate::err::StoreError;
use chrono::{DateTime, Utc};
use yard_alloc_core::prelude::*;
use yard_alloc_model::prelude::*;

/// Read access to the immutable yard, block and plan tables.
pub trait CatalogRead {
    fn yard_by_code(&self, code: &YardCode) -> Result<Option<Yard>, StoreError>;

    /// All plans of `yard` whose container spec equals `spec`. Order is
    /// unspecified; the catalog sorts.
    fn plans_for(&self, yard: YardId, spec: &ContainerSpec) -> Result<Vec<Plan>, StoreError>;

    fn block(&self, id: BlockId) -> Result<Option<Block>, StoreError>;

    fn block_by_code(&self, code: &BlockCode) -> Result<Option<Block>, StoreError>;
}

/// Read access to active occupancy.
pub trait OccupancyRead {
    /// The active position whose footprint covers `cell`, if any.
    ///
    /// A 40-size position anchored at `slot` covers `slot + 1` too, so this
    /// answers for the partner cell as well as the anchor.
    fn occupant(&self, block: BlockId, cell: Cell) -> Result<Option<PositionId>, StoreError>;

    /// The container's active position, if it has one.
    fn active_position(&self, container: &ContainerNumber)
    -> Result<Option<Position>, StoreError>;
}

/// Writes available inside a transaction.
pub trait PositionWrite {
    /// Inserts a new active position. Fails with
    /// [`StoreError::UniqueViolation`] if a footprint cell or the container
    /// is already held by an active position.
    fn insert_position(&mut self, new: NewPosition) -> Result<Position, StoreError>;

    /// Sets `removed_at` on an active position.
    fn release_position(
        &mut self,
        id: PositionId,
        at: DateTime<Utc>,
    ) -> Result<Position, StoreError>;
}

/// Everything a transaction body may do.
pub trait YardTx: CatalogRead + OccupancyRead + PositionWrite {}

/// A transactional store of yard reference data and container positions.
pub trait YardStore: CatalogRead + OccupancyRead + Send + Sync {
    /// Runs `body` as one serializable unit.
    ///
    /// Reads inside `body` see the effects of its own earlier writes. When
    /// `body` returns `Ok` every write is committed, when it returns `Err`
    /// none is. A commit that would break a uniqueness constraint fails with
    /// [`StoreError::UniqueViolation`].
    fn transaction<R, E, F>(&self, body: F) -> Result<R, E>
    where
        F: FnOnce(&mut dyn YardTx) -> Result<R, E>,
        E: From<StoreError>;
}
