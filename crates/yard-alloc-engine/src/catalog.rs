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

use crate::err::{NotFoundError, YardError};
use crate::store::CatalogRead;
use yard_alloc_core::prelude::*;
use yard_alloc_model::prelude::*;

/// Read-only view over yards, blocks, and plans.
#[derive(Debug)]
pub struct SpecCatalog<'s, S: ?Sized> {
    store: &'s S,
}

impl<S: ?Sized> Clone for SpecCatalog<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: ?Sized> Copy for SpecCatalog<'_, S> {}

impl<'s, S> SpecCatalog<'s, S>
where
    S: CatalogRead + ?Sized,
{
    #[inline]
    pub fn new(store: &'s S) -> Self {
        Self { store }
    }

    pub fn yard(&self, code: &YardCode) -> Result<Yard, YardError> {
        self.store
            .yard_by_code(code)?
            .ok_or_else(|| NotFoundError::Yard(code.clone()).into())
    }

    /// Plans of yard `code` that accept exactly `spec`, in scan order:
    /// block id, then first slot, then plan id.
    ///
    /// An empty result means the yard exists but nothing matches.
    pub fn find_plans(&self, code: &YardCode, spec: &ContainerSpec) -> Result<Vec<Plan>, YardError> {
        let yard = self.yard(code)?;
        let mut plans = self.store.plans_for(yard.id(), spec)?;
        plans.sort_by_key(|p| (p.block_id(), p.slots().first(), p.id()));
        Ok(plans)
    }

    pub fn block(&self, id: BlockId) -> Result<Block, YardError> {
        self.store
            .block(id)?
            .ok_or_else(|| NotFoundError::Block(id).into())
    }

    pub fn block_by_code(&self, code: &BlockCode) -> Result<Block, YardError> {
        self.store
            .block_by_code(code)?
            .ok_or_else(|| NotFoundError::BlockCode(code.clone()).into())
    }
}
