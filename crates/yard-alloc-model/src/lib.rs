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

//! # Yard Allocation Model (`yard-alloc-model`)
//!
//! Entities and request shapes of the container yard slot allocator, built on
//! the typed coordinates of `yard-alloc-core`.
//!
//! ## Key Data Structures
//!
//! - **`Block`**: a bounded storage unit of a yard, addressed by
//!   `(slot, row, tier)` cells counting from `1`.
//! - **`Plan`**: an eligibility rule binding a rectangle of slots and rows in a
//!   block to a single container specification.
//! - **`Position`**: one container's placement. It is active until it is
//!   released by a pickup, and then kept as history.
//! - **`YardLayout`**: the seed document a store is populated from.
//!
//! Blocks and plans are reference data; positions are the only state that
//! changes at runtime.

pub mod entity;
pub mod err;
pub mod id;
pub mod layout;
pub mod req;

pub use entity::{Block, BlockBounds, NewPosition, Plan, Position, Yard};
pub use id::{BlockCode, BlockId, ContainerNumber, PlanId, PositionId, YardCode, YardId};

pub mod prelude {
    pub use crate::entity::{Block, BlockBounds, NewPosition, Plan, Position, Yard};
    pub use crate::err::{
        EmptyBlockBoundsError, LayoutError, PairNotAdjacentError, PlanOutsideBlockError,
    };
    pub use crate::id::{
        BlockCode, BlockId, ContainerNumber, PlanId, PositionId, YardCode, YardId,
    };
    pub use crate::layout::{BlockDef, PlanDef, YardDef, YardLayout};
    pub use crate::req::{PickupRequest, PlacementRequest, Suggestion, SuggestionRequest};
}
