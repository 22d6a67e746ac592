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

use chrono::{TimeZone, Utc};
use criterion::{BatchSize, BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::hint::black_box;
use yard_alloc_core::prelude::*;
use yard_alloc_engine::prelude::*;
use yard_alloc_model::prelude::*;

const SLOTS: u32 = 40;
const ROWS: u32 = 6;
const TIERS: u32 = 5;
const BLOCKS: usize = 4;

#[inline]
fn gp20() -> ContainerSpec {
    ContainerSpec::new(
        ContainerSize::Twenty,
        ContainerHeight::from_tenths(85),
        ContainerType::from("GP"),
    )
}

#[inline]
fn hc40() -> ContainerSpec {
    ContainerSpec::new(
        ContainerSize::Forty,
        ContainerHeight::from_tenths(95),
        ContainerType::from("HC"),
    )
}

fn layout() -> YardLayout {
    let bounds = BlockBounds::new(Slot::new(SLOTS), Row::new(ROWS), Tier::new(TIERS))
        .expect("non-empty bounds");
    let region = |spec| {
        PlanDef::new(
            CoordRange::up_to(Slot::new(SLOTS)),
            CoordRange::up_to(Row::new(ROWS)),
            spec,
        )
    };
    let yard = (0..BLOCKS).fold(YardDef::new(YardCode::from("Y1"), "Bench"), |yard, i| {
        yard.with_block(
            BlockDef::new(BlockCode::from(format!("B{i}")), bounds)
                .with_plan(region(gp20()))
                .with_plan(region(hc40())),
        )
    });
    YardLayout::default().with_yard(yard)
}

/// Occupies roughly `fill` of all cells with random singles and pairs.
fn seeded_engine(fill: f64, rng: &mut impl Rng) -> YardEngine<MemoryYardStore, FixedClock> {
    let store = MemoryYardStore::from_layout(&layout()).expect("valid layout");
    let at = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    let engine = YardEngine::with_clock(store, FixedClock::new(at));

    let cells = BLOCKS as f64 * f64::from(SLOTS * ROWS * TIERS);
    let target = (cells * fill) as usize;
    for i in 0..target {
        let block = BlockId::new(rng.random_range(1..=BLOCKS as u64));
        let anchor = Cell::new(
            Slot::new(rng.random_range(1..SLOTS)),
            Row::new(rng.random_range(1..=ROWS)),
            Tier::new(rng.random_range(1..=TIERS)),
        );
        let footprint = if rng.random_bool(0.3) {
            Footprint::pair(anchor).unwrap_or(Footprint::single(anchor))
        } else {
            Footprint::single(anchor)
        };
        let _ = engine.place_at(ContainerNumber::from(format!("SEED{i:06}")), block, footprint);
    }
    engine
}

fn register_suggest(c: &mut Criterion, spec: ContainerSpec, label: &str) {
    let mut group = c.benchmark_group(format!("suggest/{label}"));
    group.throughput(Throughput::Elements(1));
    let mut rng = ChaCha8Rng::seed_from_u64(0x5EED_CAFE_F00D_0001);
    for &fill in &[0.0, 0.5, 0.9] {
        let engine = seeded_engine(fill, &mut rng);
        let req = SuggestionRequest::new(YardCode::from("Y1"), ContainerNumber::from("Q"), spec.clone());
        group.bench_function(BenchmarkId::new("fill", fill), |b| {
            b.iter(|| black_box(engine.suggest(black_box(&req)).ok()))
        });
    }
    group.finish();
}

fn register_place_pickup(c: &mut Criterion) {
    let mut group = c.benchmark_group("lifecycle");
    let n = 200usize;
    group.throughput(Throughput::Elements(n as u64));
    let mut rng = ChaCha8Rng::seed_from_u64(0xDEAD_BEEF_0000_0002);
    group.bench_function("suggest_place_pickup", |b| {
        b.iter_batched(
            || seeded_engine(0.3, &mut rng),
            |engine| {
                for i in 0..n {
                    let container = ContainerNumber::from(format!("RUN{i:05}"));
                    let req = SuggestionRequest::new(YardCode::from("Y1"), container.clone(), gp20());
                    if let Ok(s) = engine.suggest(&req) {
                        let _ = engine.place(&PlacementRequest::from_suggestion(container.clone(), &s));
                    }
                    if i % 3 == 0 {
                        let _ = engine.pickup(&PickupRequest::new(container));
                    }
                }
                black_box(engine);
            },
            BatchSize::LargeInput,
        )
    });
    group.finish();
}

fn bench_yard(c: &mut Criterion) {
    register_suggest(c, gp20(), "20ft");
    register_suggest(c, hc40(), "40ft");
    register_place_pickup(c);
}

criterion_group!(benches, bench_yard);
criterion_main!(benches);
