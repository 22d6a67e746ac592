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

use crate::err::EmptyBlockBoundsError;
use crate::id::{BlockCode, BlockId, ContainerNumber, PlanId, PositionId, YardCode, YardId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use yard_alloc_core::prelude::*;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Yard {
    id: YardId,
    code: YardCode,
    name: String,
}

impl Yard {
    #[inline]
    pub fn new(id: YardId, code: YardCode, name: impl Into<String>) -> Self {
        Self {
            id,
            code,
            name: name.into(),
        }
    }

    #[inline]
    pub fn id(&self) -> YardId {
        self.id
    }

    #[inline]
    pub fn code(&self) -> &YardCode {
        &self.code
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Capacity of a block along each axis. Every axis is at least `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "BoundsRepr", into = "BoundsRepr")]
pub struct BlockBounds {
    total_slot: Slot,
    total_row: Row,
    total_tier: Tier,
}

#[doc(hidden)]
#[derive(Clone, Copy, Serialize, Deserialize)]
pub struct BoundsRepr {
    total_slot: Slot,
    total_row: Row,
    total_tier: Tier,
}

impl TryFrom<BoundsRepr> for BlockBounds {
    type Error = EmptyBlockBoundsError;

    fn try_from(r: BoundsRepr) -> Result<Self, Self::Error> {
        BlockBounds::new(r.total_slot, r.total_row, r.total_tier)
    }
}

impl From<BlockBounds> for BoundsRepr {
    fn from(b: BlockBounds) -> Self {
        BoundsRepr {
            total_slot: b.total_slot,
            total_row: b.total_row,
            total_tier: b.total_tier,
        }
    }
}

impl BlockBounds {
    pub fn new(
        total_slot: Slot,
        total_row: Row,
        total_tier: Tier,
    ) -> Result<Self, EmptyBlockBoundsError> {
        if total_slot.is_zero() || total_row.is_zero() || total_tier.is_zero() {
            return Err(EmptyBlockBoundsError::new(total_slot, total_row, total_tier));
        }
        Ok(Self {
            total_slot,
            total_row,
            total_tier,
        })
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

    #[inline]
    pub fn slots(&self) -> CoordRange<Slot> {
        CoordRange::up_to(self.total_slot)
    }

    #[inline]
    pub fn rows(&self) -> CoordRange<Row> {
        CoordRange::up_to(self.total_row)
    }

    #[inline]
    pub fn tiers(&self) -> CoordRange<Tier> {
        CoordRange::up_to(self.total_tier)
    }

    #[inline]
    pub fn contains_cell(&self, cell: Cell) -> bool {
        self.slots().contains(cell.slot())
            && self.rows().contains(cell.row())
            && self.tiers().contains(cell.tier())
    }

    /// Whether every cell of `footprint` lies inside the block.
    #[inline]
    pub fn contains(&self, footprint: &Footprint) -> bool {
        footprint.cells().all(|c| self.contains_cell(c))
    }

    /// Number of cells in the block.
    #[inline]
    pub fn capacity(&self) -> u64 {
        self.slots().len() * self.rows().len() * self.tiers().len()
    }
}

impl Display for BlockBounds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} slots x {} rows x {} tiers",
            self.total_slot.value(),
            self.total_row.value(),
            self.total_tier.value()
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    id: BlockId,
    yard_id: YardId,
    code: BlockCode,
    bounds: BlockBounds,
}

impl Block {
    #[inline]
    pub fn new(id: BlockId, yard_id: YardId, code: BlockCode, bounds: BlockBounds) -> Self {
        Self {
            id,
            yard_id,
            code,
            bounds,
        }
    }

    #[inline]
    pub fn id(&self) -> BlockId {
        self.id
    }

    #[inline]
    pub fn yard_id(&self) -> YardId {
        self.yard_id
    }

    #[inline]
    pub fn code(&self) -> &BlockCode {
        &self.code
    }

    #[inline]
    pub fn bounds(&self) -> &BlockBounds {
        &self.bounds
    }
}

/// An eligibility rule: containers of `spec` may be stacked anywhere in the
/// `slots x rows` rectangle of the block, on any tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    id: PlanId,
    block_id: BlockId,
    slots: CoordRange<Slot>,
    rows: CoordRange<Row>,
    spec: ContainerSpec,
}

impl Plan {
    #[inline]
    pub fn new(
        id: PlanId,
        block_id: BlockId,
        slots: CoordRange<Slot>,
        rows: CoordRange<Row>,
        spec: ContainerSpec,
    ) -> Self {
        Self {
            id,
            block_id,
            slots,
            rows,
            spec,
        }
    }

    #[inline]
    pub fn id(&self) -> PlanId {
        self.id
    }

    #[inline]
    pub fn block_id(&self) -> BlockId {
        self.block_id
    }

    #[inline]
    pub fn slots(&self) -> CoordRange<Slot> {
        self.slots
    }

    #[inline]
    pub fn rows(&self) -> CoordRange<Row> {
        self.rows
    }

    #[inline]
    pub fn spec(&self) -> &ContainerSpec {
        &self.spec
    }

    #[inline]
    pub fn matches(&self, spec: &ContainerSpec) -> bool {
        &self.spec == spec
    }
}

/// Payload for inserting a fresh, active occupancy record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPosition {
    container: ContainerNumber,
    block_id: BlockId,
    footprint: Footprint,
    placed_at: DateTime<Utc>,
}

impl NewPosition {
    #[inline]
    pub fn new(
        container: ContainerNumber,
        block_id: BlockId,
        footprint: Footprint,
        placed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            container,
            block_id,
            footprint,
            placed_at,
        }
    }

    #[inline]
    pub fn container(&self) -> &ContainerNumber {
        &self.container
    }

    #[inline]
    pub fn block_id(&self) -> BlockId {
        self.block_id
    }

    #[inline]
    pub fn footprint(&self) -> Footprint {
        self.footprint
    }

    #[inline]
    pub fn placed_at(&self) -> DateTime<Utc> {
        self.placed_at
    }

    #[inline]
    pub fn into_position(self, id: PositionId) -> Position {
        Position {
            id,
            container: self.container,
            block_id: self.block_id,
            footprint: self.footprint,
            placed_at: self.placed_at,
            removed_at: None,
        }
    }
}

/// A container's placement in a block. Active while `removed_at` is `None`;
/// once released the record is kept as history and never changes again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    id: PositionId,
    container: ContainerNumber,
    block_id: BlockId,
    footprint: Footprint,
    placed_at: DateTime<Utc>,
    removed_at: Option<DateTime<Utc>>,
}

impl Position {
    #[inline]
    pub fn id(&self) -> PositionId {
        self.id
    }

    #[inline]
    pub fn container(&self) -> &ContainerNumber {
        &self.container
    }

    #[inline]
    pub fn block_id(&self) -> BlockId {
        self.block_id
    }

    #[inline]
    pub fn footprint(&self) -> Footprint {
        self.footprint
    }

    #[inline]
    pub fn anchor(&self) -> Cell {
        self.footprint.anchor()
    }

    #[inline]
    pub fn size(&self) -> ContainerSize {
        self.footprint.size()
    }

    #[inline]
    pub fn placed_at(&self) -> DateTime<Utc> {
        self.placed_at
    }

    #[inline]
    pub fn removed_at(&self) -> Option<DateTime<Utc>> {
        self.removed_at
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.removed_at.is_none()
    }

    /// Returns the released version of this record. Releasing twice keeps the
    /// first timestamp.
    #[inline]
    pub fn released(&self, at: DateTime<Utc>) -> Position {
        Position {
            removed_at: self.removed_at.or(Some(at)),
            ..self.clone()
        }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} in {} at {}",
            self.id, self.container, self.block_id, self.footprint
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn cell(s: u32, r: u32, t: u32) -> Cell {
        Cell::new(Slot::new(s), Row::new(r), Tier::new(t))
    }

    fn bounds(s: u32, r: u32, t: u32) -> BlockBounds {
        BlockBounds::new(Slot::new(s), Row::new(r), Tier::new(t)).unwrap()
    }

    #[test]
    fn test_bounds_reject_zero_axis() {
        assert!(BlockBounds::new(Slot::new(10), Row::new(0), Tier::new(3)).is_err());
        assert!(BlockBounds::new(Slot::new(0), Row::new(1), Tier::new(1)).is_err());
    }

    #[test]
    fn test_bounds_contains_pair_requires_both_cells() {
        let b = bounds(10, 2, 3);
        assert!(b.contains(&Footprint::pair(cell(9, 2, 3)).unwrap()));
        assert!(!b.contains(&Footprint::pair(cell(10, 1, 1)).unwrap()));
        assert!(!b.contains(&Footprint::single(cell(0, 1, 1))));
        assert!(!b.contains(&Footprint::single(cell(1, 1, 4))));
        assert!(!b.contains(&Footprint::single(cell(1, 3, 1))));
        assert_eq!(b.capacity(), 60);
    }

    #[test]
    fn test_bounds_deserialize_validates() {
        let ok: Result<BlockBounds, _> =
            serde_json::from_str(r#"{"total_slot":10,"total_row":2,"total_tier":3}"#);
        assert_eq!(ok.unwrap(), bounds(10, 2, 3));
        let bad: Result<BlockBounds, _> =
            serde_json::from_str(r#"{"total_slot":10,"total_row":0,"total_tier":3}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_position_release_is_terminal() {
        let t0 = Utc.with_ymd_and_hms(2025, 1, 1, 8, 0, 0).unwrap();
        let t1 = Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap();
        let t2 = Utc.with_ymd_and_hms(2025, 1, 1, 10, 0, 0).unwrap();
        let p = NewPosition::new(
            ContainerNumber::from("CNT001"),
            BlockId::new(1),
            Footprint::single(cell(1, 1, 1)),
            t0,
        )
        .into_position(PositionId::new(1));
        assert!(p.is_active());

        let released = p.released(t1);
        assert!(!released.is_active());
        assert_eq!(released.removed_at(), Some(t1));
        assert_eq!(released.released(t2).removed_at(), Some(t1));
    }
}
