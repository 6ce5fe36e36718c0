// SPDX-FileCopyrightText: 2024 Rot127 <unisono@quyllur.org>
// SPDX-License-Identifier: LGPL-3.0-only

use std::collections::BTreeSet;

use ir_model::{Module, ProcId, Value, ValueId};
use log::{debug, info, warn};

use crate::{
    alloc_size::AllocSizeResolver,
    call_graph::{CallGraph, CallGraphOptions},
    facts::PointsToProvider,
    target::{AbstractTarget, Offset, PointsToSet},
    verdict::Verdict,
};

/// Allocation a pointer refers to and its size in bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PointerInfo {
    pub site: ValueId,
    pub size: u64,
}

impl std::fmt::Display for PointerInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.site, self.size)
    }
}

/// Answers pointer queries from points-to facts and the call graph.
///
/// Nothing is changed after construction. All queries only read.
pub struct PointerPredicates<'m, P: PointsToProvider> {
    module: &'m Module,
    pta: Option<P>,
    cg: CallGraph,
}

impl<'m, P: PointsToProvider> PointerPredicates<'m, P> {
    /// Builds the call graph from [pta] and takes ownership of both.
    pub fn new(
        module: &'m Module,
        pta: Option<P>,
        options: CallGraphOptions,
    ) -> PointerPredicates<'m, P> {
        if pta.is_none() {
            warn!("No points-to facts given. Indirect calls stay unresolved.");
        }
        info!("Building call graph...");
        let cg = CallGraph::build(module, pta.as_ref(), options);
        PointerPredicates { module, pta, cg }
    }

    pub fn get_module(&self) -> &'m Module {
        self.module
    }

    pub fn get_call_graph(&self) -> &CallGraph {
        &self.cg
    }

    pub fn has_points_to(&self) -> bool {
        self.pta.is_some()
    }

    fn get_pta(&self) -> &P {
        match &self.pta {
            Some(pta) => pta,
            None => panic!("The query requires points-to facts, but none were constructed."),
        }
    }

    /// Returns the points-to set of [value] if it holds any information.
    fn targets(&self, value: ValueId) -> Option<&PointsToSet> {
        match self.get_pta().points_to(value) {
            Some(set) if !set.is_empty() => Some(set),
            _ => None,
        }
    }

    /// Returns the single target of [value]. None if there is not exactly one.
    fn single_target(&self, value: ValueId) -> Option<&AbstractTarget> {
        let set = self.targets(value)?;
        if set.len() != 1 {
            return None;
        }
        set.first()
    }

    /// True if [site] is a stack allocation with a constant element count
    /// and the instruction [a] is in the same procedure.
    fn is_local_constant_alloca(&self, a: ValueId, site: ValueId) -> bool {
        if AllocSizeResolver::new(self.module)
            .constant_alloca(site)
            .is_none()
        {
            return false;
        }
        match (
            self.module.defining_procedure(a),
            self.module.defining_procedure(site),
        ) {
            (Some(use_proc), Some(alloc_proc)) => use_proc == alloc_proc,
            _ => false,
        }
    }

    /// Can [a] be the null pointer?
    pub fn is_null(&self, a: ValueId) -> Verdict {
        let av = self.module.get_value(a);
        if !av.is_pointer() {
            // null must be a pointer
            return Verdict::False;
        }
        let Some(set) = self.targets(a) else {
            warn!("No points-to information for {}", av);
            return Verdict::Unknown;
        };
        // An unknown target can be null as well.
        Verdict::from(set.iter().any(|t| t.is_null() || t.is_unknown()))
    }

    /// Is the size of the memory [a] points to statically known?
    pub fn has_known_size(&self, a: ValueId) -> Verdict {
        let Some(target) = self.single_target(a) else {
            return Verdict::Unknown;
        };
        let Some(site) = target.get_site() else {
            return Verdict::False;
        };
        Verdict::from(self.is_local_constant_alloca(a, site))
    }

    /// Returns the allocation [a] points to and its size in bytes.
    /// None if [Self::has_known_size] isn't true or the size can't be computed.
    pub fn pointer_info(&self, a: ValueId) -> Option<PointerInfo> {
        let site = self.single_target(a)?.get_site()?;
        if !self.is_local_constant_alloca(a, site) {
            return None;
        }
        let size = AllocSizeResolver::new(self.module).alloca_size(site)?;
        Some(PointerInfo { site, size })
    }

    /// Returns the access length if [len] is a constant
    /// below the maximum of the native width.
    fn get_access_len(&self, len: ValueId) -> Option<u64> {
        let lv = self.module.get_value(len);
        let Some(c) = lv.as_const_int() else {
            debug!("Access length {} is not a constant.", lv);
            return None;
        };
        let n = c.limited_u64();
        if n >= self.module.get_layout().native_umax() {
            debug!("Access length {} is not representable.", lv);
            return None;
        }
        Some(n)
    }

    /// Is every access of [len] bytes starting at [a] within the bounds of
    /// live memory?
    ///
    /// The access must be valid for every possible target. The result is
    /// the minimum over all targets with False < Unknown < True.
    pub fn is_valid_pointer(&self, a: ValueId, len: ValueId) -> Verdict {
        let av = self.module.get_value(a);
        if !av.is_pointer() {
            return Verdict::False;
        }
        let Some(len) = self.get_access_len(len) else {
            return Verdict::Unknown;
        };
        assert!(len > 0, "Access length of {} must not be zero.", av);

        let Some(set) = self.targets(a) else {
            warn!("No points-to information for {}", av);
            return Verdict::Unknown;
        };

        let resolver = AllocSizeResolver::new(self.module);
        let access_proc = self.module.enclosing_procedure(a);
        let mut verdict = Verdict::True;
        for target in set.iter() {
            verdict = verdict.meet(self.check_access(av, access_proc, target, len, &resolver));
            if verdict == Verdict::False {
                break;
            }
        }
        verdict
    }

    fn check_access(
        &self,
        av: &Value,
        access_proc: Option<ProcId>,
        target: &AbstractTarget,
        len: u64,
        resolver: &AllocSizeResolver,
    ) -> Verdict {
        if target.is_null() || target.is_unknown() {
            return Verdict::False;
        }
        // Freed or out of scope.
        if target.is_invalidated() {
            return Verdict::False;
        }
        let Offset::Known(offset) = target.get_offset() else {
            return Verdict::Unknown;
        };
        let Some(size) = resolver.target_size(target) else {
            debug!("Size of target {} of {} is unknown.", target, av);
            return Verdict::False;
        };
        // Check len first, so size - len can't underflow.
        if len > size || offset > size - len {
            return Verdict::False;
        }

        let owner = target.get_owner().or_else(|| {
            target
                .get_site()
                .filter(|s| self.module.value(*s).is_some_and(|v| v.is_alloca()))
                .and_then(|s| self.module.defining_procedure(s))
        });
        match (access_proc, owner) {
            (Some(use_proc), Some(owner)) => {
                // The frame of the allocation might not exist anymore
                // or exist multiple times.
                if owner != use_proc || self.cg.is_recursive(use_proc) {
                    return Verdict::False;
                }
            }
            _ => debug!("In bound pointer for non-allocated memory: {}", av),
        }
        Verdict::True
    }

    /// Can [a] point to [b]?
    ///
    /// Without points-to facts every pointer may point to [b].
    pub fn points_to(&self, a: ValueId, b: ValueId) -> bool {
        let Some(pta) = &self.pta else {
            return true;
        };
        pta.points_to(a)
            .is_some_and(|set| set.iter().any(|t| t.get_site() == Some(b)))
    }

    /// All procedures reachable from [from] in the call graph.
    pub fn reachable_functions(&self, from: ProcId) -> BTreeSet<ProcId> {
        self.cg.reachable_from(from)
    }
}
