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

use crate::id::{BlockCode, YardCode};
use yard_alloc_core::{
    coord::{Row, Slot, Tier},
    range::CoordRange,
};

/// A block declared with a zero extent on some axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[error("Block bounds must be at least 1 on every axis, got {total_slot} x {total_row} x {total_tier}")]
pub struct EmptyBlockBoundsError {
    total_slot: Slot,
    total_row: Row,
    total_tier: Tier,
}

impl EmptyBlockBoundsError {
    #[inline]
    pub fn new(total_slot: Slot, total_row: Row, total_tier: Tier) -> Self {
        Self {
            total_slot,
            total_row,
            total_tier,
        }
    }

    #[inline]
    pub fn total_slot(&self) -> Slot {
        self.total_slot
    }

    #[inline]
    pub fn total_row(&self) -> Row {
        self.total_row
    }

    #[inline]
    pub fn total_tier(&self) -> Tier {
        self.total_tier
    }
}

/// A placement request whose second slot is not the slot right after the
/// first one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[error("Second slot {slot2} must directly follow {slot}")]
pub struct PairNotAdjacentError {
    slot: Slot,
    slot2: Slot,
}

impl PairNotAdjacentError {
    #[inline]
    pub fn new(slot: Slot, slot2: Slot) -> Self {
        Self { slot, slot2 }
    }

    #[inline]
    pub fn slot(&self) -> Slot {
        self.slot
    }

    #[inline]
    pub fn slot2(&self) -> Slot {
        self.slot2
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, thiserror::Error)]
#[error("Plan #{plan_index} of block {block} covers slots {slots} x rows {rows} outside the block")]
pub struct PlanOutsideBlockError {
    block: BlockCode,
    plan_index: usize,
    slots: CoordRange<Slot>,
    rows: CoordRange<Row>,
}

impl PlanOutsideBlockError {
    #[inline]
    pub fn new(
        block: BlockCode,
        plan_index: usize,
        slots: CoordRange<Slot>,
        rows: CoordRange<Row>,
    ) -> Self {
        Self {
            block,
            plan_index,
            slots,
            rows,
        }
    }

    #[inline]
    pub fn block(&self) -> &BlockCode {
        &self.block
    }

    #[inline]
    pub fn plan_index(&self) -> usize {
        self.plan_index
    }

    #[inline]
    pub fn slots(&self) -> CoordRange<Slot> {
        self.slots
    }

    #[inline]
    pub fn rows(&self) -> CoordRange<Row> {
        self.rows
    }
}

/// Reasons a [`crate::layout::YardLayout`] cannot seed a store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error("Duplicate yard code {0}")]
    DuplicateYardCode(YardCode),
    #[error("Duplicate block code {0}")]
    DuplicateBlockCode(BlockCode),
    #[error(transparent)]
    PlanOutsideBlock(#[from] PlanOutsideBlockError),
}
