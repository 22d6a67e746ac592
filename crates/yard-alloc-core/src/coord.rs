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

use num_traits::{CheckedAdd, CheckedSub, One, PrimInt, Unsigned, Zero};
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display};

/// A one-based axis coordinate inside a block.
///
/// Slots, rows and tiers are distinct types so that a row can never be passed
/// where a slot is expected. All three count from `1`; the zero value is
/// representable but never lies inside a block.
pub trait Coordinate: Copy + Ord + Debug + Display {
    type Raw: PrimInt + Unsigned + Display;

    fn from_raw(raw: Self::Raw) -> Self;

    fn raw(self) -> Self::Raw;

    /// The lowest addressable coordinate on this axis.
    #[inline]
    fn first() -> Self {
        Self::from_raw(Self::Raw::one())
    }

    #[inline]
    fn is_zero(self) -> bool {
        self.raw().is_zero()
    }

    #[inline]
    fn checked_next(self) -> Option<Self> {
        self.raw()
            .checked_add(&Self::Raw::one())
            .map(Self::from_raw)
    }
}

macro_rules! coordinate {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[repr(transparent)]
        #[derive(
            Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(u32);

        impl $name {
            #[inline]
            pub const fn new(v: u32) -> Self {
                $name(v)
            }

            #[inline]
            pub const fn value(self) -> u32 {
                self.0
            }
        }

        impl Coordinate for $name {
            type Raw = u32;

            #[inline]
            fn from_raw(raw: u32) -> Self {
                $name(raw)
            }

            #[inline]
            fn raw(self) -> u32 {
                self.0
            }
        }

        impl Display for $name {
            #[inline]
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($label, "({})"), self.0)
            }
        }

        impl From<u32> for $name {
            #[inline]
            fn from(v: u32) -> Self {
                $name(v)
            }
        }

        impl From<$name> for u32 {
            #[inline]
            fn from(v: $name) -> Self {
                v.0
            }
        }
    };
}

coordinate!(
    /// Position along the long axis of a block. A 40-size container spans
    /// two consecutive slots.
    Slot,
    "Slot"
);

coordinate!(
    /// Position across the block.
    Row,
    "Row"
);

coordinate!(
    /// Stacking height, `1` being ground level.
    Tier,
    "Tier"
);
