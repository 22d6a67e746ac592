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

//! Request and response shapes of the three engine operations.
//!
//! These mirror what the request layer decodes off the wire: plain numbers
//! for coordinates and an optional `slot2` marking a 40-size placement.

use crate::err::PairNotAdjacentError;
use crate::id::{BlockCode, ContainerNumber, YardCode};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use yard_alloc_core::prelude::*;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionRequest {
    yard: YardCode,
    container_number: ContainerNumber,
    #[serde(flatten)]
    spec: ContainerSpecFields,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ContainerSpecFields {
    container_size: ContainerSize,
    container_height: ContainerHeight,
    container_type: ContainerType,
}

impl SuggestionRequest {
    pub fn new(yard: YardCode, container_number: ContainerNumber, spec: ContainerSpec) -> Self {
        Self {
            yard,
            container_number,
            spec: ContainerSpecFields {
                container_size: spec.size(),
                container_height: spec.height(),
                container_type: spec.kind().clone(),
            },
        }
    }

    #[inline]
    pub fn yard(&self) -> &YardCode {
        &self.yard
    }

    #[inline]
    pub fn container_number(&self) -> &ContainerNumber {
        &self.container_number
    }

    #[inline]
    pub fn spec(&self) -> ContainerSpec {
        ContainerSpec::new(
            self.spec.container_size,
            self.spec.container_height,
            self.spec.container_type.clone(),
        )
    }
}

/// A free cell proposed for a container. Advisory only: nothing is reserved.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Suggestion {
    block: BlockCode,
    slot: Slot,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    slot2: Option<Slot>,
    row: Row,
    tier: Tier,
}

impl Suggestion {
    pub fn new(block: BlockCode, footprint: Footprint) -> Self {
        let anchor = footprint.anchor();
        Self {
            block,
            slot: anchor.slot(),
            slot2: footprint.partner().map(|c| c.slot()),
            row: anchor.row(),
            tier: anchor.tier(),
        }
    }

    #[inline]
    pub fn block(&self) -> &BlockCode {
        &self.block
    }

    #[inline]
    pub fn slot(&self) -> Slot {
        self.slot
    }

    #[inline]
    pub fn slot2(&self) -> Option<Slot> {
        self.slot2
    }

    #[inline]
    pub fn row(&self) -> Row {
        self.row
    }

    #[inline]
    pub fn tier(&self) -> Tier {
        self.tier
    }

    #[inline]
    pub fn anchor(&self) -> Cell {
        Cell::new(self.slot, self.row, self.tier)
    }
}

impl Display for Suggestion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.slot2 {
            Some(slot2) => write!(
                f,
                "{} slot {}-{} row {} tier {}",
                self.block,
                self.slot.value(),
                slot2.value(),
                self.row.value(),
                self.tier.value()
            ),
            None => write!(
                f,
                "{} slot {} row {} tier {}",
                self.block,
                self.slot.value(),
                self.row.value(),
                self.tier.value()
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementRequest {
    container_number: ContainerNumber,
    block: BlockCode,
    slot: Slot,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    slot2: Option<Slot>,
    row: Row,
    tier: Tier,
}

impl PlacementRequest {
    pub fn new(
        container_number: ContainerNumber,
        block: BlockCode,
        slot: Slot,
        slot2: Option<Slot>,
        row: Row,
        tier: Tier,
    ) -> Self {
        Self {
            container_number,
            block,
            slot,
            slot2,
            row,
            tier,
        }
    }

    /// A request that takes up a previously suggested cell.
    pub fn from_suggestion(container_number: ContainerNumber, suggestion: &Suggestion) -> Self {
        Self::new(
            container_number,
            suggestion.block.clone(),
            suggestion.slot,
            suggestion.slot2,
            suggestion.row,
            suggestion.tier,
        )
    }

    #[inline]
    pub fn container_number(&self) -> &ContainerNumber {
        &self.container_number
    }

    #[inline]
    pub fn block(&self) -> &BlockCode {
        &self.block
    }

    /// The footprint the container takes. A present `slot2` makes this a
    /// 40-size pair and must equal `slot + 1`.
    pub fn footprint(&self) -> Result<Footprint, PairNotAdjacentError> {
        let anchor = Cell::new(self.slot, self.row, self.tier);
        match self.slot2 {
            None => Ok(Footprint::single(anchor)),
            Some(slot2) if self.slot.checked_next() == Some(slot2) => {
                Footprint::pair(anchor).ok_or(PairNotAdjacentError::new(self.slot, slot2))
            }
            Some(slot2) => Err(PairNotAdjacentError::new(self.slot, slot2)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickupRequest {
    container_number: ContainerNumber,
}

impl PickupRequest {
    #[inline]
    pub fn new(container_number: ContainerNumber) -> Self {
        Self { container_number }
    }

    #[inline]
    pub fn container_number(&self) -> &ContainerNumber {
        &self.container_number
    }
}
