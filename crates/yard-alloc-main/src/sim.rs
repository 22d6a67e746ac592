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

use crate::config::SimulationConfig;
use rand::{Rng, SeedableRng, seq::SliceRandom};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::time::Instant;
use tracing::{debug, info, warn};
use yard_alloc_core::prelude::*;
use yard_alloc_engine::prelude::*;
use yard_alloc_model::prelude::*;

/// A container showing up at the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arrival {
    container: ContainerNumber,
    yard: YardCode,
    spec: ContainerSpec,
}

impl Arrival {
    #[inline]
    pub fn container(&self) -> &ContainerNumber {
        &self.container
    }

    #[inline]
    pub fn request(&self) -> SuggestionRequest {
        SuggestionRequest::new(self.yard.clone(), self.container.clone(), self.spec.clone())
    }
}

/// Draws `count` arrivals uniformly over every `(yard, spec)` pair the
/// layout has a plan for. Container numbers start at `offset`.
pub fn generate_arrivals(
    layout: &YardLayout,
    count: usize,
    offset: usize,
    rng: &mut impl Rng,
) -> Vec<Arrival> {
    let menu: Vec<(YardCode, ContainerSpec)> = layout
        .yards()
        .iter()
        .flat_map(|y| {
            y.blocks
                .iter()
                .flat_map(|b| b.plans.iter())
                .map(move |p| (y.code.clone(), p.spec.clone()))
        })
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    if menu.is_empty() {
        return Vec::new();
    }

    (0..count)
        .map(|i| {
            let (yard, spec) = menu[rng.random_range(0..menu.len())].clone();
            Arrival {
                container: ContainerNumber::from(format!("SIMU{:07}", offset + i)),
                yard,
                spec,
            }
        })
        .collect()
}

/// Suggest, then place. A client that loses its suggested cell to a
/// concurrent client asks again, up to `attempts` times in total.
pub fn admit<C: Clock>(
    engine: &YardEngine<MemoryYardStore, C>,
    arrival: &Arrival,
    attempts: u32,
) -> Result<Position, YardError> {
    let request = arrival.request();
    let mut attempt = 1;
    loop {
        let suggestion = engine.suggest(&request)?;
        let placement = PlacementRequest::from_suggestion(arrival.container.clone(), &suggestion);
        match engine.place(&placement) {
            Err(YardError::CellOccupied(e)) if attempt < attempts => {
                debug!(container = %arrival.container, attempt, cell = %e.cell(), "Suggested cell taken, asking again");
                attempt += 1;
            }
            other => return other,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct WaveReport {
    pub arrivals: usize,
    pub placed: usize,
    pub twenty: usize,
    pub forty: usize,
    pub rejected: BTreeMap<String, usize>,
}

impl WaveReport {
    fn record(&mut self, result: &Result<Position, YardError>) {
        self.arrivals += 1;
        match result {
            Ok(p) => {
                self.placed += 1;
                match p.size() {
                    ContainerSize::Twenty => self.twenty += 1,
                    ContainerSize::Forty => self.forty += 1,
                }
            }
            Err(e) => *self.rejected.entry(e.kind().to_string()).or_default() += 1,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub description: String,
    pub seed: u64,
    pub capacity_cells: u64,
    pub first_wave: WaveReport,
    pub picked_up: usize,
    pub pickup_failures: usize,
    pub second_wave: WaveReport,
    pub active_at_end: usize,
    pub occupied_cells: usize,
    pub utilization: f64,
    pub records: usize,
    pub violations: Vec<String>,
    pub elapsed_ms: u128,
}

impl SimulationReport {
    #[inline]
    pub fn is_consistent(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Two waves of concurrent gate traffic with a round of pickups between
/// them, followed by an audit of the final occupancy.
pub struct Simulation<'a, C> {
    engine: &'a YardEngine<MemoryYardStore, C>,
    layout: &'a YardLayout,
    config: SimulationConfig,
}

impl<'a, C: Clock> Simulation<'a, C> {
    pub fn new(
        engine: &'a YardEngine<MemoryYardStore, C>,
        layout: &'a YardLayout,
        config: SimulationConfig,
    ) -> Self {
        Self {
            engine,
            layout,
            config,
        }
    }

    fn wave(&self, arrivals: &[Arrival]) -> (WaveReport, Vec<ContainerNumber>) {
        let attempts = self.config.place_attempts();
        let results: Vec<_> = arrivals
            .par_iter()
            .map(|a| (a.container(), admit(self.engine, a, attempts)))
            .collect();

        let mut report = WaveReport::default();
        let mut placed = Vec::with_capacity(results.len());
        for (container, result) in &results {
            report.record(result);
            if result.is_ok() {
                placed.push((*container).clone());
            }
        }
        (report, placed)
    }

    pub fn run(&self) -> Result<SimulationReport, StoreError> {
        let t0 = Instant::now();
        let mut rng = ChaCha8Rng::seed_from_u64(self.config.seed());

        let arrivals = generate_arrivals(self.layout, self.config.containers(), 0, &mut rng);
        let (first_wave, mut placed) = self.wave(&arrivals);
        info!(
            arrivals = first_wave.arrivals,
            placed = first_wave.placed,
            "First wave done"
        );

        placed.shuffle(&mut rng);
        let leaving = (placed.len() as f64 * self.config.pickup_ratio()).round() as usize;
        let pickups: Vec<_> = placed[..leaving.min(placed.len())]
            .par_iter()
            .map(|c| self.engine.pickup(&PickupRequest::new(c.clone())))
            .collect();
        let picked_up = pickups.iter().filter(|r| r.is_ok()).count();
        let pickup_failures = pickups.len() - picked_up;
        info!(picked_up, pickup_failures, "Pickups done");

        let arrivals = generate_arrivals(self.layout, picked_up, arrivals.len(), &mut rng);
        let (second_wave, _) = self.wave(&arrivals);
        info!(
            arrivals = second_wave.arrivals,
            placed = second_wave.placed,
            "Second wave done"
        );

        let active = self.engine.store().active_positions()?;
        let (occupied_cells, violations) = audit(self.engine.store(), &active)?;
        for v in &violations {
            warn!(violation = %v, "Occupancy audit failed");
        }

        let capacity_cells = self.layout.capacity();
        let utilization = if capacity_cells == 0 {
            0.0
        } else {
            occupied_cells as f64 / capacity_cells as f64
        };

        Ok(SimulationReport {
            description: "Concurrent gate simulation: arrivals, pickups, arrivals".to_string(),
            seed: self.config.seed(),
            capacity_cells,
            first_wave,
            picked_up,
            pickup_failures,
            second_wave,
            active_at_end: active.len(),
            occupied_cells,
            utilization,
            records: self.engine.store().record_count()?,
            violations,
            elapsed_ms: t0.elapsed().as_millis(),
        })
    }
}

/// Counts occupied cells and lists every broken occupancy rule among
/// `active`.
pub fn audit(
    store: &MemoryYardStore,
    active: &[Position],
) -> Result<(usize, Vec<String>), StoreError> {
    let mut violations = Vec::new();
    let mut cells = HashSet::new();
    let mut containers = HashSet::new();

    for p in active {
        if !containers.insert(p.container()) {
            violations.push(format!("{} holds more than one active position", p.container()));
        }
        match store.block(p.block_id())? {
            Some(block) if block.bounds().contains(&p.footprint()) => {}
            Some(block) => violations.push(format!("{} lies outside {}", p, block.bounds())),
            None => violations.push(format!("{} refers to an unknown block", p)),
        }
        for cell in p.footprint().cells() {
            if !cells.insert((p.block_id(), cell)) {
                violations.push(format!("{} in {} is covered twice", cell, p.block_id()));
            }
        }
    }
    Ok((cells.len(), violations))
}
