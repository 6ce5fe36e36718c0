// SPDX-FileCopyrightText: 2024 Rot127 <unisono@quyllur.org>
// SPDX-License-Identifier: LGPL-3.0-only

use ir_model::{Const, InstOp, Module, Type, ValueId};
use log::debug;

use crate::target::AbstractTarget;

/// Computes the byte size of stack allocations with a constant
/// element count.
pub struct AllocSizeResolver<'m> {
    module: &'m Module,
}

impl<'m> AllocSizeResolver<'m> {
    pub fn new(module: &'m Module) -> AllocSizeResolver<'m> {
        AllocSizeResolver { module }
    }

    /// Returns the allocated type and element count if [site] is
    /// a stack allocation with a constant element count.
    pub fn constant_alloca(&self, site: ValueId) -> Option<(&'m Type, &'m Const)> {
        let Some(InstOp::Alloca { allocated, count }) = self.module.value(site)?.get_op() else {
            return None;
        };
        let count = self.module.get_value(*count).as_const_int()?;
        Some((allocated, count))
    }

    /// Size in bytes of the memory allocated at [site].
    /// Only stack allocations with a constant count and a sized element type
    /// have one.
    pub fn alloca_size(&self, site: ValueId) -> Option<u64> {
        let (ty, count) = self.constant_alloca(site)?;
        let Some(count) = count.as_u64() else {
            debug!("Element count of {} exceeds 64 bits.", self.module.get_value(site));
            return None;
        };
        let Some(elem_size) = self.module.get_layout().type_alloc_size(ty) else {
            debug!("Allocated type {} of {} is unsized.", ty, self.module.get_value(site));
            return None;
        };
        elem_size.checked_mul(count)
    }

    /// Size of the allocation [target] points into.
    /// The solver provided size takes precedence.
    pub fn target_size(&self, target: &AbstractTarget) -> Option<u64> {
        target
            .get_static_size()
            .or_else(|| self.alloca_size(target.get_site()?))
    }
}
