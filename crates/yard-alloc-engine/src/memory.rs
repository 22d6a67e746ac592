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

//! An in-process [`YardStore`].
//!
//! Reference data is frozen at construction. Positions live behind a single
//! `RwLock`: reads share it, transactions hold it exclusively for their whole
//! body, which makes every transaction serializable. Writes made inside a
//! transaction are staged in an overlay and only applied to the tables once
//! the body succeeds, so a failing body leaves no trace. A body that panics
//! poisons the lock without having touched the tables, and later callers
//! recover the guard instead of failing.

use crate::err::{StoreError, UniqueConstraint};
use crate::store::{CatalogRead, OccupancyRead, PositionWrite, YardStore, YardTx};
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{PoisonError, RwLock, RwLockReadGuard};
use yard_alloc_core::prelude::*;
use yard_alloc_model::prelude::*;

#[derive(Debug, Default)]
struct Catalog {
    yards: BTreeMap<YardId, Yard>,
    yard_by_code: HashMap<YardCode, YardId>,
    blocks: BTreeMap<BlockId, Block>,
    block_by_code: HashMap<BlockCode, BlockId>,
    plans: Vec<Plan>,
}

impl Catalog {
    /// Assigns ids in document order, starting at `1` for every table.
    fn from_layout(layout: &YardLayout) -> Self {
        let mut catalog = Catalog::default();
        let mut next_block = 1u64;
        let mut next_plan = 1u64;

        for (yard_index, yard_def) in layout.yards().iter().enumerate() {
            let yard_id = YardId::new(yard_index as u64 + 1);
            catalog
                .yard_by_code
                .insert(yard_def.code.clone(), yard_id);
            catalog.yards.insert(
                yard_id,
                Yard::new(yard_id, yard_def.code.clone(), yard_def.name.clone()),
            );

            for block_def in &yard_def.blocks {
                let block_id = BlockId::new(next_block);
                next_block += 1;
                catalog
                    .block_by_code
                    .insert(block_def.code.clone(), block_id);
                catalog.blocks.insert(
                    block_id,
                    Block::new(block_id, yard_id, block_def.code.clone(), block_def.bounds),
                );

                for plan_def in &block_def.plans {
                    catalog.plans.push(Plan::new(
                        PlanId::new(next_plan),
                        block_id,
                        plan_def.slots,
                        plan_def.rows,
                        plan_def.spec.clone(),
                    ));
                    next_plan += 1;
                }
            }
        }
        catalog
    }
}

impl CatalogRead for Catalog {
    fn yard_by_code(&self, code: &YardCode) -> Result<Option<Yard>, StoreError> {
        Ok(self
            .yard_by_code
            .get(code)
            .and_then(|id| self.yards.get(id))
            .cloned())
    }

    fn plans_for(&self, yard: YardId, spec: &ContainerSpec) -> Result<Vec<Plan>, StoreError> {
        Ok(self
            .plans
            .iter()
            .filter(|p| p.matches(spec))
            .filter(|p| self.blocks.get(&p.block_id()).map(Block::yard_id) == Some(yard))
            .cloned()
            .collect())
    }

    fn block(&self, id: BlockId) -> Result<Option<Block>, StoreError> {
        Ok(self.blocks.get(&id).cloned())
    }

    fn block_by_code(&self, code: &BlockCode) -> Result<Option<Block>, StoreError> {
        Ok(self
            .block_by_code
            .get(code)
            .and_then(|id| self.blocks.get(id))
            .cloned())
    }
}

#[derive(Debug, Default)]
struct Tables {
    positions: BTreeMap<PositionId, Position>,
    active_cells: HashMap<(BlockId, Cell), PositionId>,
    active_containers: HashMap<ContainerNumber, PositionId>,
    last_id: u64,
}

impl Tables {
    #[inline]
    fn occupant(&self, block: BlockId, cell: Cell) -> Option<PositionId> {
        self.active_cells.get(&(block, cell)).copied()
    }

    #[inline]
    fn active_position(&self, container: &ContainerNumber) -> Option<&Position> {
        self.active_containers
            .get(container)
            .and_then(|id| self.positions.get(id))
    }

    /// Verifies the staged writes against the committed tables without
    /// touching them.
    fn check(&self, staged: &Staged) -> Result<(), StoreError> {
        for id in staged.releases.keys() {
            match self.positions.get(id) {
                None => return Err(StoreError::UnknownPosition(*id)),
                Some(p) if !p.is_active() => return Err(StoreError::PositionReleased(*id)),
                Some(_) => {}
            }
        }

        let held_by_survivor = |owner: Option<&PositionId>| {
            owner.is_some_and(|id| !staged.releases.contains_key(id))
        };

        let mut new_cells = HashSet::new();
        let mut new_containers = HashSet::new();
        for p in staged.inserts.iter().filter(|p| p.is_active()) {
            for cell in p.footprint().cells() {
                let key = (p.block_id(), cell);
                if held_by_survivor(self.active_cells.get(&key)) || !new_cells.insert(key) {
                    return Err(StoreError::UniqueViolation(UniqueConstraint::ActiveCell));
                }
            }
            if held_by_survivor(self.active_containers.get(p.container()))
                || !new_containers.insert(p.container())
            {
                return Err(StoreError::UniqueViolation(
                    UniqueConstraint::ActiveContainer,
                ));
            }
        }
        Ok(())
    }

    /// Applies staged writes all-or-nothing: releases first, then inserts.
    fn apply(&mut self, staged: Staged) -> Result<(), StoreError> {
        self.check(&staged)?;

        for (id, at) in staged.releases {
            if let Some(p) = self.positions.get_mut(&id) {
                for cell in p.footprint().cells() {
                    self.active_cells.remove(&(p.block_id(), cell));
                }
                self.active_containers.remove(p.container());
                *p = p.released(at);
            }
        }

        for p in staged.inserts {
            self.last_id = self.last_id.max(p.id().value());
            if p.is_active() {
                for cell in p.footprint().cells() {
                    self.active_cells.insert((p.block_id(), cell), p.id());
                }
                self.active_containers
                    .insert(p.container().clone(), p.id());
            }
            self.positions.insert(p.id(), p);
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
struct Staged {
    inserts: Vec<Position>,
    releases: BTreeMap<PositionId, DateTime<Utc>>,
}

/// A transaction over a [`MemoryYardStore`], holding its write lock.
#[derive(Debug)]
struct MemoryTx<'a> {
    catalog: &'a Catalog,
    tables: &'a Tables,
    staged: Staged,
}

impl<'a> MemoryTx<'a> {
    fn new(catalog: &'a Catalog, tables: &'a Tables) -> Self {
        Self {
            catalog,
            tables,
            staged: Staged::default(),
        }
    }

    #[inline]
    fn into_staged(self) -> Staged {
        self.staged
    }

    #[inline]
    fn staged_active(&self) -> impl Iterator<Item = &Position> {
        self.staged.inserts.iter().filter(|p| p.is_active())
    }
}

impl CatalogRead for MemoryTx<'_> {
    fn yard_by_code(&self, code: &YardCode) -> Result<Option<Yard>, StoreError> {
        self.catalog.yard_by_code(code)
    }

    fn plans_for(&self, yard: YardId, spec: &ContainerSpec) -> Result<Vec<Plan>, StoreError> {
        self.catalog.plans_for(yard, spec)
    }

    fn block(&self, id: BlockId) -> Result<Option<Block>, StoreError> {
        self.catalog.block(id)
    }

    fn block_by_code(&self, code: &BlockCode) -> Result<Option<Block>, StoreError> {
        self.catalog.block_by_code(code)
    }
}

impl OccupancyRead for MemoryTx<'_> {
    fn occupant(&self, block: BlockId, cell: Cell) -> Result<Option<PositionId>, StoreError> {
        if let Some(p) = self
            .staged_active()
            .find(|p| p.block_id() == block && p.footprint().covers(cell))
        {
            return Ok(Some(p.id()));
        }
        Ok(self
            .tables
            .occupant(block, cell)
            .filter(|id| !self.staged.releases.contains_key(id)))
    }

    fn active_position(
        &self,
        container: &ContainerNumber,
    ) -> Result<Option<Position>, StoreError> {
        if let Some(p) = self.staged_active().find(|p| p.container() == container) {
            return Ok(Some(p.clone()));
        }
        Ok(self
            .tables
            .active_position(container)
            .filter(|p| !self.staged.releases.contains_key(&p.id()))
            .cloned())
    }
}

impl PositionWrite for MemoryTx<'_> {
    fn insert_position(&mut self, new: NewPosition) -> Result<Position, StoreError> {
        for cell in new.footprint().cells() {
            if self.occupant(new.block_id(), cell)?.is_some() {
                return Err(StoreError::UniqueViolation(UniqueConstraint::ActiveCell));
            }
        }
        if self.active_position(new.container())?.is_some() {
            return Err(StoreError::UniqueViolation(
                UniqueConstraint::ActiveContainer,
            ));
        }

        let id = PositionId::new(self.tables.last_id + self.staged.inserts.len() as u64 + 1);
        let position = new.into_position(id);
        self.staged.inserts.push(position.clone());
        Ok(position)
    }

    fn release_position(
        &mut self,
        id: PositionId,
        at: DateTime<Utc>,
    ) -> Result<Position, StoreError> {
        if let Some(p) = self.staged.inserts.iter_mut().find(|p| p.id() == id) {
            if !p.is_active() {
                return Err(StoreError::PositionReleased(id));
            }
            *p = p.released(at);
            return Ok(p.clone());
        }

        let committed = self
            .tables
            .positions
            .get(&id)
            .ok_or(StoreError::UnknownPosition(id))?;
        if !committed.is_active() || self.staged.releases.contains_key(&id) {
            return Err(StoreError::PositionReleased(id));
        }
        self.staged.releases.insert(id, at);
        Ok(committed.released(at))
    }
}

impl YardTx for MemoryTx<'_> {}

/// In-process store seeded from a [`YardLayout`].
#[derive(Debug, Default)]
pub struct MemoryYardStore {
    catalog: Catalog,
    tables: RwLock<Tables>,
}

impl MemoryYardStore {
    /// Validates `layout` and builds an empty store over it.
    pub fn from_layout(layout: &YardLayout) -> Result<Self, LayoutError> {
        layout.validate()?;
        Ok(Self {
            catalog: Catalog::from_layout(layout),
            tables: RwLock::new(Tables::default()),
        })
    }

    /// Tables only change in [`Tables::apply`], after a body has returned, so a
    /// poisoned lock still guards committed state and is recovered.
    #[inline]
    fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Every record of `container`, released ones included, oldest first.
    pub fn history(&self, container: &ContainerNumber) -> Result<Vec<Position>, StoreError> {
        Ok(self
            .read()
            .positions
            .values()
            .filter(|p| p.container() == container)
            .cloned()
            .collect())
    }

    /// Snapshot of all active positions, in id order.
    pub fn active_positions(&self) -> Result<Vec<Position>, StoreError> {
        Ok(self
            .read()
            .positions
            .values()
            .filter(|p| p.is_active())
            .cloned()
            .collect())
    }

    /// Number of records ever created.
    pub fn record_count(&self) -> Result<usize, StoreError> {
        Ok(self.read().positions.len())
    }
}

impl CatalogRead for MemoryYardStore {
    fn yard_by_code(&self, code: &YardCode) -> Result<Option<Yard>, StoreError> {
        self.catalog.yard_by_code(code)
    }

    fn plans_for(&self, yard: YardId, spec: &ContainerSpec) -> Result<Vec<Plan>, StoreError> {
        self.catalog.plans_for(yard, spec)
    }

    fn block(&self, id: BlockId) -> Result<Option<Block>, StoreError> {
        self.catalog.block(id)
    }

    fn block_by_code(&self, code: &BlockCode) -> Result<Option<Block>, StoreError> {
        self.catalog.block_by_code(code)
    }
}

impl OccupancyRead for MemoryYardStore {
    fn occupant(&self, block: BlockId, cell: Cell) -> Result<Option<PositionId>, StoreError> {
        Ok(self.read().occupant(block, cell))
    }

    fn active_position(
        &self,
        container: &ContainerNumber,
    ) -> Result<Option<Position>, StoreError> {
        Ok(self.read().active_position(container).cloned())
    }
}

impl YardStore for MemoryYardStore {
    fn transaction<R, E, F>(&self, body: F) -> Result<R, E>
    where
        F: FnOnce(&mut dyn YardTx) -> Result<R, E>,
        E: From<StoreError>,
    {
        let mut guard = self.tables.write().unwrap_or_else(PoisonError::into_inner);

        let mut tx = MemoryTx::new(&self.catalog, &guard);
        let out = body(&mut tx)?;
        let staged = tx.into_staged();

        guard.apply(staged).map_err(E::from)?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn cell(s: u32, r: u32, t: u32) -> Cell {
        Cell::new(Slot::new(s), Row::new(r), Tier::new(t))
    }

    fn ts(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, hour, 0, 0).unwrap()
    }

    fn store() -> MemoryYardStore {
        let bounds = BlockBounds::new(Slot::new(10), Row::new(2), Tier::new(3)).unwrap();
        let spec = ContainerSpec::new(
            ContainerSize::Twenty,
            ContainerHeight::from_tenths(85),
            ContainerType::from("GP"),
        );
        let layout = YardLayout::default().with_yard(
            YardDef::new(YardCode::from("Y1"), "Yard 1").with_block(
                BlockDef::new(BlockCode::from("B1"), bounds).with_plan(PlanDef::new(
                    CoordRange::new(Slot::new(1), Slot::new(10)),
                    CoordRange::new(Row::new(1), Row::new(2)),
                    spec,
                )),
            ),
        );
        MemoryYardStore::from_layout(&layout).unwrap()
    }

    fn new_pos(container: &str, footprint: Footprint) -> NewPosition {
        NewPosition::new(
            ContainerNumber::from(container),
            BlockId::new(1),
            footprint,
            ts(8),
        )
    }

    fn insert(store: &MemoryYardStore, container: &str, footprint: Footprint) -> Position {
        store
            .transaction(|tx| tx.insert_position(new_pos(container, footprint)))
            .unwrap()
    }

    #[test]
    fn test_catalog_assigns_ids_in_document_order() {
        let s = store();
        let block = s.block_by_code(&BlockCode::from("B1")).unwrap().unwrap();
        assert_eq!(block.id(), BlockId::new(1));
        let yard = s.yard_by_code(&YardCode::from("Y1")).unwrap().unwrap();
        assert_eq!(block.yard_id(), yard.id());
        assert!(s.yard_by_code(&YardCode::from("Y9")).unwrap().is_none());
    }

    #[test]
    fn test_commit_indexes_every_pair_cell() {
        let s = store();
        let p = insert(&s, "C40", Footprint::pair(cell(3, 1, 1)).unwrap());
        assert_eq!(s.occupant(BlockId::new(1), cell(3, 1, 1)).unwrap(), Some(p.id()));
        assert_eq!(s.occupant(BlockId::new(1), cell(4, 1, 1)).unwrap(), Some(p.id()));
        assert_eq!(s.occupant(BlockId::new(1), cell(5, 1, 1)).unwrap(), None);
        assert_eq!(s.occupant(BlockId::new(1), cell(2, 1, 1)).unwrap(), None);
    }

    #[test]
    fn test_failed_body_rolls_back() {
        let s = store();
        let r: Result<(), StoreError> = s.transaction(|tx| {
            tx.insert_position(new_pos("C1", Footprint::single(cell(1, 1, 1))))?;
            Err(StoreError::UnknownPosition(PositionId::new(99)))
        });
        assert!(r.is_err());
        assert_eq!(s.record_count().unwrap(), 0);
        assert_eq!(s.occupant(BlockId::new(1), cell(1, 1, 1)).unwrap(), None);
    }

    #[test]
    fn test_insert_rejects_overlapping_pair() {
        let s = store();
        insert(&s, "C1", Footprint::pair(cell(3, 1, 1)).unwrap());
        let r = s.transaction(|tx| {
            tx.insert_position(new_pos("C2", Footprint::pair(cell(2, 1, 1)).unwrap()))
        });
        assert!(matches!(
            r,
            Err(StoreError::UniqueViolation(UniqueConstraint::ActiveCell))
        ));
    }

    #[test]
    fn test_insert_rejects_second_active_record_for_container() {
        let s = store();
        insert(&s, "C1", Footprint::single(cell(1, 1, 1)));
        let r = s.transaction(|tx| tx.insert_position(new_pos("C1", Footprint::single(cell(5, 1, 1)))));
        assert!(matches!(
            r,
            Err(StoreError::UniqueViolation(UniqueConstraint::ActiveContainer))
        ));
    }

    #[test]
    fn test_reads_inside_tx_see_staged_writes() {
        let s = store();
        s.transaction(|tx| {
            let p = tx.insert_position(new_pos("C1", Footprint::single(cell(1, 1, 1))))?;
            assert_eq!(tx.occupant(BlockId::new(1), cell(1, 1, 1))?, Some(p.id()));
            tx.release_position(p.id(), ts(9))?;
            assert_eq!(tx.occupant(BlockId::new(1), cell(1, 1, 1))?, None);
            assert!(tx.active_position(&ContainerNumber::from("C1"))?.is_none());
            Ok::<_, StoreError>(())
        })
        .unwrap();
        let history = s.history(&ContainerNumber::from("C1")).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].removed_at(), Some(ts(9)));
    }

    #[test]
    fn test_release_frees_cells_and_keeps_history() {
        let s = store();
        let p = insert(&s, "C1", Footprint::pair(cell(1, 2, 1)).unwrap());
        let released = s
            .transaction(|tx| tx.release_position(p.id(), ts(10)))
            .unwrap();
        assert_eq!(released.removed_at(), Some(ts(10)));
        assert_eq!(s.occupant(BlockId::new(1), cell(2, 2, 1)).unwrap(), None);
        assert!(s.active_positions().unwrap().is_empty());
        assert_eq!(s.record_count().unwrap(), 1);

        let again = s.transaction(|tx| tx.release_position(p.id(), ts(11)));
        assert!(matches!(again, Err(StoreError::PositionReleased(id)) if id == p.id()));
    }

    #[test]
    fn test_release_and_replace_in_one_transaction() {
        let s = store();
        let first = insert(&s, "C1", Footprint::single(cell(1, 1, 1)));
        let second = s
            .transaction(|tx| {
                tx.release_position(first.id(), ts(9))?;
                tx.insert_position(new_pos("C1", Footprint::single(cell(1, 1, 1))))
            })
            .unwrap();
        assert_ne!(first.id(), second.id());
        assert_eq!(s.occupant(BlockId::new(1), cell(1, 1, 1)).unwrap(), Some(second.id()));
        assert_eq!(s.history(&ContainerNumber::from("C1")).unwrap().len(), 2);
    }

    #[test]
    fn test_unknown_position_release() {
        let s = store();
        let r = s.transaction(|tx| tx.release_position(PositionId::new(42), ts(9)));
        assert!(matches!(r, Err(StoreError::UnknownPosition(_))));
    }

    #[test]
    fn test_position_ids_increase_across_transactions() {
        let s = store();
        let a = insert(&s, "A", Footprint::single(cell(1, 1, 1)));
        let b = insert(&s, "B", Footprint::single(cell(1, 1, 2)));
        assert!(b.id() > a.id());
    }

    #[test]
    fn test_panicking_body_leaves_store_usable() {
        let s = store();
        insert(&s, "C1", Footprint::single(cell(1, 1, 1)));

        let panicked = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _: Result<(), StoreError> = s.transaction(|tx| {
                tx.insert_position(new_pos("C2", Footprint::single(cell(2, 1, 1))))?;
                panic!("body failed mid-transaction");
            });
        }));
        assert!(panicked.is_err());
        assert!(s.tables.is_poisoned());

        assert_eq!(s.record_count().unwrap(), 1);
        assert_eq!(s.occupant(BlockId::new(1), cell(2, 1, 1)).unwrap(), None);
        let p = insert(&s, "C3", Footprint::single(cell(3, 1, 1)));
        assert_eq!(s.occupant(BlockId::new(1), cell(3, 1, 1)).unwrap(), Some(p.id()));
    }
}
