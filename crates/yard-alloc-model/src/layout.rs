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

//! The administrative seed document describing yards, blocks and plans.
//!
//! Provisioning is not the engine's job; a layout is loaded once, validated,
//! and handed to a store as immutable reference data.

use crate::entity::BlockBounds;
use crate::err::{LayoutError, PlanOutsideBlockError};
use crate::id::{BlockCode, YardCode};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use yard_alloc_core::prelude::*;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct YardLayout {
    #[serde(default)]
    yards: Vec<YardDef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YardDef {
    pub code: YardCode,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub blocks: Vec<BlockDef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockDef {
    pub code: BlockCode,
    #[serde(flatten)]
    pub bounds: BlockBounds,
    #[serde(default)]
    pub plans: Vec<PlanDef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanDef {
    pub slots: CoordRange<Slot>,
    pub rows: CoordRange<Row>,
    #[serde(flatten)]
    pub spec: ContainerSpec,
}

impl YardLayout {
    #[inline]
    pub fn new(yards: Vec<YardDef>) -> Self {
        Self { yards }
    }

    #[inline]
    pub fn yards(&self) -> &[YardDef] {
        &self.yards
    }

    /// Appends a yard definition.
    pub fn with_yard(mut self, yard: YardDef) -> Self {
        self.yards.push(yard);
        self
    }

    /// Checks the layout can seed a store: codes are unique and every plan
    /// region lies inside its block.
    pub fn validate(&self) -> Result<(), LayoutError> {
        let mut yard_codes = HashSet::new();
        let mut block_codes = HashSet::new();

        for yard in &self.yards {
            if !yard_codes.insert(&yard.code) {
                return Err(LayoutError::DuplicateYardCode(yard.code.clone()));
            }
            for block in &yard.blocks {
                if !block_codes.insert(&block.code) {
                    return Err(LayoutError::DuplicateBlockCode(block.code.clone()));
                }
                for (plan_index, plan) in block.plans.iter().enumerate() {
                    let inside = block.bounds.slots().contains_range(&plan.slots)
                        && block.bounds.rows().contains_range(&plan.rows);
                    if !inside {
                        return Err(PlanOutsideBlockError::new(
                            block.code.clone(),
                            plan_index,
                            plan.slots,
                            plan.rows,
                        )
                        .into());
                    }
                }
            }
        }
        Ok(())
    }

    /// Total number of cells across all blocks.
    pub fn capacity(&self) -> u64 {
        self.yards
            .iter()
            .flat_map(|y| y.blocks.iter())
            .map(|b| b.bounds.capacity())
            .sum()
    }
}

impl YardDef {
    pub fn new(code: YardCode, name: impl Into<String>) -> Self {
        Self {
            code,
            name: name.into(),
            blocks: Vec::new(),
        }
    }

    pub fn with_block(mut self, block: BlockDef) -> Self {
        self.blocks.push(block);
        self
    }
}

impl BlockDef {
    pub fn new(code: BlockCode, bounds: BlockBounds) -> Self {
        Self {
            code,
            bounds,
            plans: Vec::new(),
        }
    }

    pub fn with_plan(mut self, plan: PlanDef) -> Self {
        self.plans.push(plan);
        self
    }
}

impl PlanDef {
    pub fn new(slots: CoordRange<Slot>, rows: CoordRange<Row>, spec: ContainerSpec) -> Self {
        Self { slots, rows, spec }
    }
}
