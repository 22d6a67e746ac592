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

//! Shared layout and helpers for unit tests.

use crate::memory::MemoryYardStore;
use chrono::{DateTime, TimeZone, Utc};
use yard_alloc_core::prelude::*;
use yard_alloc_model::prelude::*;

pub fn cell(s: u32, r: u32, t: u32) -> Cell {
    Cell::new(Slot::new(s), Row::new(r), Tier::new(t))
}

pub fn ts(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, hour, 0, 0).unwrap()
}

pub fn gp20() -> ContainerSpec {
    ContainerSpec::new(
        ContainerSize::Twenty,
        ContainerHeight::from_tenths(85),
        ContainerType::from("GP"),
    )
}

pub fn hc40() -> ContainerSpec {
    ContainerSpec::new(
        ContainerSize::Forty,
        ContainerHeight::from_tenths(95),
        ContainerType::from("HC"),
    )
}

pub fn region(slots: (u32, u32), rows: (u32, u32), spec: ContainerSpec) -> PlanDef {
    PlanDef::new(
        CoordRange::new(Slot::new(slots.0), Slot::new(slots.1)),
        CoordRange::new(Row::new(rows.0), Row::new(rows.1)),
        spec,
    )
}

pub fn bounds(s: u32, r: u32, t: u32) -> BlockBounds {
    BlockBounds::new(Slot::new(s), Row::new(r), Tier::new(t)).unwrap()
}

/// `Y1` holds `B1` (10x2x3, GP 20 and HC 40 over the whole block) and `B2`
/// (4x1x2, GP 20 only). `Y2` holds `C1` (3x1x1, GP 20).
pub fn layout() -> YardLayout {
    YardLayout::default()
        .with_yard(
            YardDef::new(YardCode::from("Y1"), "North")
                .with_block(
                    BlockDef::new(BlockCode::from("B1"), bounds(10, 2, 3))
                        .with_plan(region((1, 10), (1, 2), gp20()))
                        .with_plan(region((1, 10), (1, 2), hc40())),
                )
                .with_block(
                    BlockDef::new(BlockCode::from("B2"), bounds(4, 1, 2))
                        .with_plan(region((1, 4), (1, 1), gp20())),
                ),
        )
        .with_yard(
            YardDef::new(YardCode::from("Y2"), "South").with_block(
                BlockDef::new(BlockCode::from("C1"), bounds(3, 1, 1))
                    .with_plan(region((1, 3), (1, 1), gp20())),
            ),
        )
}

pub fn store() -> MemoryYardStore {
    MemoryYardStore::from_layout(&layout()).unwrap()
}

pub const B1: BlockId = BlockId::new(1);
pub const B2: BlockId = BlockId::new(2);
