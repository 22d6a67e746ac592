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

use crate::coord::{Coordinate, Row, Slot, Tier};
use crate::spec::ContainerSize;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// A single storage cell `(slot, row, tier)` inside a block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Cell {
    slot: Slot,
    row: Row,
    tier: Tier,
}

impl Cell {
    #[inline]
    pub const fn new(slot: Slot, row: Row, tier: Tier) -> Self {
        Self { slot, row, tier }
    }

    #[inline]
    pub const fn slot(&self) -> Slot {
        self.slot
    }

    #[inline]
    pub const fn row(&self) -> Row {
        self.row
    }

    #[inline]
    pub const fn tier(&self) -> Tier {
        self.tier
    }

    /// The cell one slot further along the block, at the same row and tier.
    #[inline]
    pub fn next_slot(&self) -> Option<Cell> {
        self.slot
            .checked_next()
            .map(|slot| Cell::new(slot, self.row, self.tier))
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "(slot {}, row {}, tier {})",
            self.slot.value(),
            self.row.value(),
            self.tier.value()
        )
    }
}

/// The set of cells a container physically covers.
///
/// A 20-size container covers exactly one cell. A 40-size container covers
/// its anchor cell and the cell at `anchor.slot + 1` on the same row and tier.
/// Only the anchor is stored; the partner cell is always derived from it, so a
/// pair is adjacent by construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "anchor", rename_all = "snake_case")]
pub enum Footprint {
    Single(Cell),
    Pair(Cell),
}

impl Footprint {
    #[inline]
    pub const fn single(cell: Cell) -> Self {
        Footprint::Single(cell)
    }

    /// A two-cell footprint anchored at `anchor`. Fails only when the partner
    /// slot is not representable.
    #[inline]
    pub fn pair(anchor: Cell) -> Option<Self> {
        anchor.next_slot().map(|_| Footprint::Pair(anchor))
    }

    /// The footprint a container of `size` takes when anchored at `anchor`.
    #[inline]
    pub fn for_size(size: ContainerSize, anchor: Cell) -> Option<Self> {
        match size {
            ContainerSize::Twenty => Some(Footprint::single(anchor)),
            ContainerSize::Forty => Footprint::pair(anchor),
        }
    }

    #[inline]
    pub const fn anchor(&self) -> Cell {
        match self {
            Footprint::Single(c) | Footprint::Pair(c) => *c,
        }
    }

    /// The second cell of a pair.
    #[inline]
    pub fn partner(&self) -> Option<Cell> {
        match self {
            Footprint::Single(_) => None,
            Footprint::Pair(anchor) => anchor.next_slot(),
        }
    }

    #[inline]
    pub const fn size(&self) -> ContainerSize {
        match self {
            Footprint::Single(_) => ContainerSize::Twenty,
            Footprint::Pair(_) => ContainerSize::Forty,
        }
    }

    /// Highest slot covered by the footprint.
    #[inline]
    pub fn last_slot(&self) -> Slot {
        self.partner().unwrap_or_else(|| self.anchor()).slot()
    }

    /// Iterates every covered cell, anchor first.
    #[inline]
    pub fn cells(&self) -> impl Iterator<Item = Cell> + use<> {
        std::iter::once(self.anchor()).chain(self.partner())
    }

    #[inline]
    pub fn covers(&self, cell: Cell) -> bool {
        self.cells().any(|c| c == cell)
    }

    /// Whether two footprints share at least one cell.
    #[inline]
    pub fn overlaps(&self, other: &Footprint) -> bool {
        self.cells().any(|c| other.covers(c))
    }
}

impl Display for Footprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Footprint::Single(c) => write!(f, "{}", c),
            Footprint::Pair(c) => write!(f, "{} + next slot", c),
        }
    }
}
