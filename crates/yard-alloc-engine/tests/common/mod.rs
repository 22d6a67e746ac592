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

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use yard_alloc_core::prelude::*;
use yard_alloc_engine::prelude::*;
use yard_alloc_model::prelude::*;

pub const YARD: &str = "Y1";

pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 10, 0, 0).unwrap()
}

pub fn cell(s: u32, r: u32, t: u32) -> Cell {
    Cell::new(Slot::new(s), Row::new(r), Tier::new(t))
}

pub fn spec(size: ContainerSize, tenths: u16, kind: &str) -> ContainerSpec {
    ContainerSpec::new(size, ContainerHeight::from_tenths(tenths), ContainerType::from(kind))
}

pub fn gp20() -> ContainerSpec {
    spec(ContainerSize::Twenty, 85, "GP")
}

pub fn hc40() -> ContainerSpec {
    spec(ContainerSize::Forty, 95, "HC")
}

pub fn bounds(s: u32, r: u32, t: u32) -> BlockBounds {
    BlockBounds::new(Slot::new(s), Row::new(r), Tier::new(t)).unwrap()
}

pub fn plan(slots: (u32, u32), rows: (u32, u32), spec: ContainerSpec) -> PlanDef {
    PlanDef::new(
        CoordRange::new(Slot::new(slots.0), Slot::new(slots.1)),
        CoordRange::new(Row::new(rows.0), Row::new(rows.1)),
        spec,
    )
}

/// Yard `Y1` with block `B1` (10 slots, 2 rows, 3 tiers) accepting GP 20 and
/// HC 40 containers over the whole block.
pub fn layout() -> YardLayout {
    YardLayout::default().with_yard(
        YardDef::new(YardCode::from(YARD), "Main").with_block(
            BlockDef::new(BlockCode::from("B1"), bounds(10, 2, 3))
                .with_plan(plan((1, 10), (1, 2), gp20()))
                .with_plan(plan((1, 10), (1, 2), hc40())),
        ),
    )
}

pub fn engine_for(layout: &YardLayout) -> YardEngine<MemoryYardStore, FixedClock> {
    let store = MemoryYardStore::from_layout(layout).unwrap();
    YardEngine::with_clock(store, FixedClock::new(now()))
}

pub fn engine() -> YardEngine<MemoryYardStore, FixedClock> {
    engine_for(&layout())
}

pub fn suggest_req(container: &str, spec: ContainerSpec) -> SuggestionRequest {
    SuggestionRequest::new(YardCode::from(YARD), ContainerNumber::from(container), spec)
}

pub fn place_req(container: &str, slot: u32, slot2: Option<u32>, row: u32, tier: u32) -> PlacementRequest {
    PlacementRequest::new(
        ContainerNumber::from(container),
        BlockCode::from("B1"),
        Slot::new(slot),
        slot2.map(Slot::new),
        Row::new(row),
        Tier::new(tier),
    )
}

pub fn pickup_req(container: &str) -> PickupRequest {
    PickupRequest::new(ContainerNumber::from(container))
}

/// Asserts that no two active positions share a cell and no container has
/// more than one active position.
pub fn assert_consistent(store: &MemoryYardStore) {
    let active = store.active_positions().unwrap();
    for (i, a) in active.iter().enumerate() {
        assert!(a.is_active());
        for b in &active[i + 1..] {
            assert_ne!(a.container(), b.container(), "container held twice");
            if a.block_id() == b.block_id() {
                assert!(
                    !a.footprint().overlaps(&b.footprint()),
                    "{a} overlaps {b}"
                );
            }
        }
    }
}
