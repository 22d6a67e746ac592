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

//! Slot allocation for container yards.
//!
//! The engine answers four requests against a [`store::YardStore`]:
//! suggest a free cell for a container spec, place a container on a cell,
//! pick a container up again, and locate an active container. Placement and
//! pickup run as store transactions, so concurrent requests never produce
//! two active positions on one cell or for one container.

pub mod catalog;
pub mod clock;
pub mod config;
pub mod engine;
pub mod err;
pub mod memory;
pub mod occupancy;
pub mod pickup;
pub mod placement;
pub mod search;
pub mod store;

#[cfg(test)]
mod fixture;

pub mod prelude {
    pub use crate::catalog::SpecCatalog;
    pub use crate::clock::{Clock, FixedClock, SystemClock};
    pub use crate::config::{EngineConfig, EngineConfigBuilder};
    pub use crate::engine::YardEngine;
    pub use crate::err::{
        AlreadyPlacedError, CellOccupiedError, ErrorKind, NoFreeCellError, NoPlanError,
        NotFoundError, OutOfBoundsError, StoreError, UniqueConstraint, YardError,
    };
    pub use crate::memory::MemoryYardStore;
    pub use crate::occupancy::OccupancyOracle;
    pub use crate::pickup::PickupTransaction;
    pub use crate::placement::PlacementTransaction;
    pub use crate::search::{AllocationSearch, candidates};
    pub use crate::store::{CatalogRead, OccupancyRead, PositionWrite, YardStore, YardTx};
}
