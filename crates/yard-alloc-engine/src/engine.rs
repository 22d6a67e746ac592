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

use crate::catalog::SpecCatalog;
use crate::clock::{Clock, SystemClock};
use crate::config::EngineConfig;
use crate::err::{NotFoundError, YardError};
use crate::occupancy::OccupancyOracle;
use crate::pickup::PickupTransaction;
use crate::placement::PlacementTransaction;
use crate::search::AllocationSearch;
use crate::store::{YardStore, YardTx};
use tracing::{info, instrument, warn};
use yard_alloc_core::prelude::*;
use yard_alloc_model::prelude::*;

/// Request-level entry point: suggest, place, pick up, locate.
///
/// The engine is stateless apart from its store, so one instance can be
/// shared across threads and every call is independent.
#[derive(Debug)]
pub struct YardEngine<S, C = SystemClock> {
    store: S,
    clock: C,
    config: EngineConfig,
}

impl<S: YardStore> YardEngine<S> {
    #[inline]
    pub fn new(store: S) -> Self {
        Self::with_clock(store, SystemClock)
    }
}

impl<S, C> YardEngine<S, C>
where
    S: YardStore,
    C: Clock,
{
    #[inline]
    pub fn with_clock(store: S, clock: C) -> Self {
        Self {
            store,
            clock,
            config: EngineConfig::default(),
        }
    }

    #[inline]
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    #[inline]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[inline]
    pub fn catalog(&self) -> SpecCatalog<'_, S> {
        SpecCatalog::new(&self.store)
    }

    #[inline]
    pub fn oracle(&self) -> OccupancyOracle<'_, S> {
        OccupancyOracle::new(&self.store)
    }

    /// First free footprint for the requested container spec. Read-only.
    #[instrument(
        level = "info",
        skip_all,
        fields(yard = %request.yard(), container = %request.container_number()),
        err(Display)
    )]
    pub fn suggest(&self, request: &SuggestionRequest) -> Result<Suggestion, YardError> {
        AllocationSearch::new(&self.store).suggest(request.yard(), &request.spec())
    }

    /// Places the container on the requested cell, or cell pair when
    /// `slot2` is given.
    #[instrument(
        level = "info",
        skip_all,
        fields(container = %request.container_number(), block = %request.block()),
        err(Display)
    )]
    pub fn place(&self, request: &PlacementRequest) -> Result<Position, YardError> {
        let footprint = request.footprint()?;
        let block = self.catalog().block_by_code(request.block())?;
        self.place_at(request.container_number().clone(), block.id(), footprint)
    }

    /// Places `container` on `footprint` of the block with id `block`.
    pub fn place_at(
        &self,
        container: ContainerNumber,
        block: BlockId,
        footprint: Footprint,
    ) -> Result<Position, YardError> {
        let placement = PlacementTransaction::new(container, block, footprint);
        let position = self.with_retry("place", |tx| placement.run(tx, self.clock.now()))?;
        info!(
            container = %position.container(),
            position = %position.id(),
            block = %position.block_id(),
            footprint = %position.footprint(),
            "Container placed"
        );
        Ok(position)
    }

    /// Releases the container's active position.
    #[instrument(
        level = "info",
        skip_all,
        fields(container = %request.container_number()),
        err(Display)
    )]
    pub fn pickup(&self, request: &PickupRequest) -> Result<Position, YardError> {
        let pickup = PickupTransaction::new(request.container_number().clone());
        let position = self.with_retry("pickup", |tx| pickup.run(tx, self.clock.now()))?;
        info!(
            container = %position.container(),
            position = %position.id(),
            "Container picked up"
        );
        Ok(position)
    }

    /// The container's active position. Read-only.
    pub fn locate(&self, container: &ContainerNumber) -> Result<Position, YardError> {
        self.store
            .active_position(container)?
            .ok_or_else(|| NotFoundError::Container(container.clone()).into())
    }

    /// Runs `body` in a store transaction, re-running it when it loses a
    /// uniqueness race, up to the configured number of retries.
    fn with_retry<R, F>(&self, op: &'static str, mut body: F) -> Result<R, YardError>
    where
        F: FnMut(&mut dyn YardTx) -> Result<R, YardError>,
    {
        let attempts = self.config.max_attempts();
        let mut attempt = 1;
        loop {
            match self.store.transaction(&mut body) {
                Err(YardError::Conflict(constraint)) if attempt < attempts => {
                    warn!(
                        op,
                        attempt,
                        max_attempts = attempts,
                        constraint = %constraint,
                        "Transaction conflict, retrying"
                    );
                    attempt += 1;
                }
                other => return other,
            }
        }
    }
}
