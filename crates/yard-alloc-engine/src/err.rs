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

use std::fmt::Display;
use yard_alloc_core::prelude::*;
use yard_alloc_model::prelude::*;

/// A uniqueness rule the store enforces among active positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UniqueConstraint {
    /// At most one active position covers a `(block, slot, row, tier)` cell.
    ActiveCell,
    /// At most one active position per container number.
    ActiveContainer,
}

impl Display for UniqueConstraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UniqueConstraint::ActiveCell => write!(f, "unique active cell"),
            UniqueConstraint::ActiveContainer => write!(f, "unique active container"),
        }
    }
}

/// Failures reported by a store implementation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Write violates the {0} constraint")]
    UniqueViolation(UniqueConstraint),
    #[error("Position {0} does not exist")]
    UnknownPosition(PositionId),
    #[error("Position {0} is already released")]
    PositionReleased(PositionId),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, thiserror::Error)]
pub enum NotFoundError {
    #[error("Yard {0} not found")]
    Yard(YardCode),
    #[error("Block {0} not found")]
    Block(BlockId),
    #[error("Block {0} not found")]
    BlockCode(BlockCode),
    #[error("Container {0} not found or already removed")]
    Container(ContainerNumber),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, thiserror::Error)]
#[error("No plan in yard {yard} accepts {spec}")]
pub struct NoPlanError {
    yard: YardCode,
    spec: ContainerSpec,
}

impl NoPlanError {
    #[inline]
    pub fn new(yard: YardCode, spec: ContainerSpec) -> Self {
        Self { yard, spec }
    }

    #[inline]
    pub fn yard(&self) -> &YardCode {
        &self.yard
    }

    #[inline]
    pub fn spec(&self) -> &ContainerSpec {
        &self.spec
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, thiserror::Error)]
#[error("No free position available for {spec} in {plans_scanned} plan(s) of yard {yard}")]
pub struct NoFreeCellError {
    yard: YardCode,
    spec: ContainerSpec,
    plans_scanned: usize,
}

impl NoFreeCellError {
    #[inline]
    pub fn new(yard: YardCode, spec: ContainerSpec, plans_scanned: usize) -> Self {
        Self {
            yard,
            spec,
            plans_scanned,
        }
    }

    #[inline]
    pub fn yard(&self) -> &YardCode {
        &self.yard
    }

    #[inline]
    pub fn spec(&self) -> &ContainerSpec {
        &self.spec
    }

    #[inline]
    pub fn plans_scanned(&self) -> usize {
        self.plans_scanned
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[error("Target position {cell} in {block} already occupied by {occupant}")]
pub struct CellOccupiedError {
    block: BlockId,
    cell: Cell,
    occupant: PositionId,
}

impl CellOccupiedError {
    #[inline]
    pub fn new(block: BlockId, cell: Cell, occupant: PositionId) -> Self {
        Self {
            block,
            cell,
            occupant,
        }
    }

    #[inline]
    pub fn block(&self) -> BlockId {
        self.block
    }

    #[inline]
    pub fn cell(&self) -> Cell {
        self.cell
    }

    #[inline]
    pub fn occupant(&self) -> PositionId {
        self.occupant
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, thiserror::Error)]
#[error("Container {container} already placed as {position} in {block}")]
pub struct AlreadyPlacedError {
    container: ContainerNumber,
    position: PositionId,
    block: BlockId,
}

impl AlreadyPlacedError {
    #[inline]
    pub fn new(container: ContainerNumber, position: PositionId, block: BlockId) -> Self {
        Self {
            container,
            position,
            block,
        }
    }

    #[inline]
    pub fn container(&self) -> &ContainerNumber {
        &self.container
    }

    #[inline]
    pub fn position(&self) -> PositionId {
        self.position
    }

    #[inline]
    pub fn block(&self) -> BlockId {
        self.block
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[error("Target position {footprint} exceeds block limits of {block} ({bounds})")]
pub struct OutOfBoundsError {
    block: BlockId,
    footprint: Footprint,
    bounds: BlockBounds,
}

impl OutOfBoundsError {
    #[inline]
    pub fn new(block: BlockId, footprint: Footprint, bounds: BlockBounds) -> Self {
        Self {
            block,
            footprint,
            bounds,
        }
    }

    #[inline]
    pub fn block(&self) -> BlockId {
        self.block
    }

    #[inline]
    pub fn footprint(&self) -> Footprint {
        self.footprint
    }

    #[inline]
    pub fn bounds(&self) -> BlockBounds {
        self.bounds
    }
}

/// Flat classification of a [`YardError`] for the request layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    NoPlan,
    NoFreeCell,
    CellOccupied,
    AlreadyPlaced,
    OutOfBounds,
    Conflict,
    InvalidRequest,
    Backend,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ErrorKind::NotFound => "not_found",
            ErrorKind::NoPlan => "no_plan",
            ErrorKind::NoFreeCell => "no_free_cell",
            ErrorKind::CellOccupied => "cell_occupied",
            ErrorKind::AlreadyPlaced => "already_placed",
            ErrorKind::OutOfBounds => "out_of_bounds",
            ErrorKind::Conflict => "conflict",
            ErrorKind::InvalidRequest => "invalid_request",
            ErrorKind::Backend => "backend",
        };
        f.write_str(s)
    }
}

/// Every outcome of an engine operation other than success.
///
/// All variants are expected business outcomes the caller maps to a
/// response, except `Backend`, which wraps a store failure unchanged.
#[derive(Debug, thiserror::Error)]
pub enum YardError {
    #[error(transparent)]
    NotFound(#[from] NotFoundError),
    #[error(transparent)]
    NoPlan(#[from] NoPlanError),
    #[error(transparent)]
    NoFreeCell(#[from] NoFreeCellError),
    #[error(transparent)]
    CellOccupied(#[from] CellOccupiedError),
    #[error(transparent)]
    AlreadyPlaced(#[from] AlreadyPlacedError),
    #[error(transparent)]
    OutOfBounds(#[from] OutOfBoundsError),
    #[error("Concurrent transaction violated the {0} constraint")]
    Conflict(UniqueConstraint),
    #[error(transparent)]
    InvalidRequest(#[from] PairNotAdjacentError),
    #[error("Store failure: {0}")]
    Backend(#[source] StoreError),
}

impl YardError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            YardError::NotFound(_) => ErrorKind::NotFound,
            YardError::NoPlan(_) => ErrorKind::NoPlan,
            YardError::NoFreeCell(_) => ErrorKind::NoFreeCell,
            YardError::CellOccupied(_) => ErrorKind::CellOccupied,
            YardError::AlreadyPlaced(_) => ErrorKind::AlreadyPlaced,
            YardError::OutOfBounds(_) => ErrorKind::OutOfBounds,
            YardError::Conflict(_) => ErrorKind::Conflict,
            YardError::InvalidRequest(_) => ErrorKind::InvalidRequest,
            YardError::Backend(_) => ErrorKind::Backend,
        }
    }

    /// Whether re-running the same transaction may succeed.
    #[inline]
    pub fn is_retryable(&self) -> bool {
        matches!(self, YardError::Conflict(_))
    }
}

impl From<StoreError> for YardError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::UniqueViolation(constraint) => YardError::Conflict(constraint),
            other => YardError::Backend(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_violation_maps_to_conflict() {
        let e: YardError = StoreError::UniqueViolation(UniqueConstraint::ActiveCell).into();
        assert_eq!(e.kind(), ErrorKind::Conflict);
        assert!(e.is_retryable());
    }

    #[test]
    fn test_other_store_errors_are_opaque_backend_failures() {
        let e: YardError = StoreError::Other("disk full".into()).into();
        assert_eq!(e.kind(), ErrorKind::Backend);
        assert!(!e.is_retryable());
    }

    #[test]
    fn test_business_errors_are_not_retryable() {
        let e: YardError = NotFoundError::Container(ContainerNumber::from("X")).into();
        assert_eq!(e.kind(), ErrorKind::NotFound);
        assert!(!e.is_retryable());
        assert_eq!(e.to_string(), "Container X not found or already removed");
    }
}
