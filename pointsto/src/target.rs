// SPDX-FileCopyrightText: 2024 Rot127 <unisono@quyllur.org>
// SPDX-License-Identifier: LGPL-3.0-only

use std::collections::BTreeSet;

use bitflags::bitflags;
use ir_model::{ProcId, ValueId};

bitflags! {
    /// State of an abstract target.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct TargetFlags: u8 {
        /// The null pointer.
        const Null = 1 << 0;
        /// Memory the analysis knows nothing about.
        const Unknown = 1 << 1;
        /// Memory which was freed or left its scope on some path.
        const Invalidated = 1 << 2;
    }
}

/// Byte offset of a pointer into its target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Offset {
    Known(u64),
    Unknown,
}

impl std::fmt::Display for Offset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Offset::Known(o) => write!(f, "{:#x}", o),
            Offset::Unknown => write!(f, "?"),
        }
    }
}

/// One element of a points-to set.
///
/// A null or unknown target never has an allocation site.
/// An invalidated target keeps the identity of its site.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AbstractTarget {
    /// The value which allocated the memory.
    site: Option<ValueId>,
    offset: Offset,
    flags: TargetFlags,
    /// Size of the allocation in bytes, if the solver knows it.
    static_size: Option<u64>,
    /// Procedure lexically containing the allocation.
    /// None for global and external memory.
    owner: Option<ProcId>,
}

impl std::fmt::Display for AbstractTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_null() {
            return write!(f, "null");
        }
        if self.is_unknown() {
            return write!(f, "unknown");
        }
        write!(f, "<{}", self.site.unwrap_or_default())?;
        write!(f, " + {}", self.offset)?;
        if let Some(size) = self.static_size {
            write!(f, " / {}", size)?;
        }
        if self.is_invalidated() {
            write!(f, " (invalidated)")?;
        }
        write!(f, ">")
    }
}

impl AbstractTarget {
    pub fn new_null() -> AbstractTarget {
        AbstractTarget {
            site: None,
            offset: Offset::Known(0),
            flags: TargetFlags::Null,
            static_size: None,
            owner: None,
        }
    }

    pub fn new_unknown() -> AbstractTarget {
        AbstractTarget {
            site: None,
            offset: Offset::Unknown,
            flags: TargetFlags::Unknown,
            static_size: None,
            owner: None,
        }
    }

    /// A target pointing into the memory allocated by [site].
    pub fn new_site(
        site: ValueId,
        offset: Offset,
        static_size: Option<u64>,
        owner: Option<ProcId>,
    ) -> AbstractTarget {
        AbstractTarget {
            site: Some(site),
            offset,
            flags: TargetFlags::empty(),
            static_size,
            owner,
        }
    }

    /// Returns the same target marked as invalidated.
    pub fn invalidated(mut self) -> AbstractTarget {
        self.flags |= TargetFlags::Invalidated;
        self
    }

    pub fn get_site(&self) -> Option<ValueId> {
        self.site
    }

    pub fn get_offset(&self) -> Offset {
        self.offset
    }

    pub fn get_static_size(&self) -> Option<u64> {
        self.static_size
    }

    pub fn get_owner(&self) -> Option<ProcId> {
        self.owner
    }

    pub fn is_null(&self) -> bool {
        self.flags.contains(TargetFlags::Null)
    }

    pub fn is_unknown(&self) -> bool {
        self.flags.contains(TargetFlags::Unknown)
    }

    pub fn is_invalidated(&self) -> bool {
        self.flags.contains(TargetFlags::Invalidated)
    }
}

/// Possible targets of a value. An empty set means the solver has no
/// information about the value.
pub type PointsToSet = BTreeSet<AbstractTarget>;
