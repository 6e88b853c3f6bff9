//! Index types for mesh buffers.
//!
//! Index buffers are generic over the underlying integer type so that the
//! 16-bit and 32-bit buffers produced by importers and GPU pipelines can be
//! partitioned without widening them first. Sub-meshes and islands are named
//! by small type-safe wrappers.

use std::fmt::{self, Debug};
use std::hash::Hash;

/// Trait for types that can be used as entries of a triangle index buffer.
///
/// This trait is implemented for `u16`, `u32`, and `u64`.
pub trait MeshIndex:
    Copy + Clone + Eq + PartialEq + Ord + PartialOrd + Hash + Debug + Send + Sync + 'static
{
    /// The maximum representable index value.
    const MAX: Self;

    /// Convert from usize to this index type.
    ///
    /// # Panics
    /// Panics in debug builds if the value is too large for this index type.
    fn from_usize(v: usize) -> Self;

    /// Convert to usize.
    fn to_usize(self) -> usize;

    /// Convert from usize, returning `None` if the value does not fit.
    fn try_from_usize(v: usize) -> Option<Self> {
        if v <= Self::MAX.to_usize() {
            Some(Self::from_usize(v))
        } else {
            None
        }
    }
}

impl MeshIndex for u16 {
    const MAX: Self = u16::MAX;

    #[inline]
    fn from_usize(v: usize) -> Self {
        debug_assert!(v <= Self::MAX as usize, "index {} too large for u16", v);
        v as u16
    }

    #[inline]
    fn to_usize(self) -> usize {
        self as usize
    }
}

impl MeshIndex for u32 {
    const MAX: Self = u32::MAX;

    #[inline]
    fn from_usize(v: usize) -> Self {
        debug_assert!(v <= Self::MAX as usize, "index {} too large for u32", v);
        v as u32
    }

    #[inline]
    fn to_usize(self) -> usize {
        self as usize
    }
}

impl MeshIndex for u64 {
    const MAX: Self = u64::MAX;

    #[inline]
    fn from_usize(v: usize) -> Self {
        v as u64
    }

    #[inline]
    fn to_usize(self) -> usize {
        self as usize
    }
}

/// Identifies a sub-mesh (material slot) of an [`IndexedMesh`](super::IndexedMesh).
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct SubMeshId(usize);

/// Identifies an island within a [`Partition`](crate::algo::partition::Partition).
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct IslandId(usize);

macro_rules! impl_id_type {
    ($name:ident, $display:literal) => {
        impl $name {
            /// Create a new id from a raw value.
            #[inline]
            pub fn new(index: usize) -> Self {
                Self(index)
            }

            /// Get the raw index value.
            #[inline]
            pub fn index(self) -> usize {
                self.0
            }
        }

        impl Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", $display, self.0)
            }
        }

        impl From<usize> for $name {
            fn from(v: usize) -> Self {
                Self::new(v)
            }
        }
    };
}

impl_id_type!(SubMeshId, "SM");
impl_id_type!(IslandId, "I");
