// SPDX-FileCopyrightText: 2024 Rot127 <unisono@quyllur.org>
// SPDX-License-Identifier: LGPL-3.0-only

use helper::set_map::SetMap;
use ir_model::ValueId;
use log::debug;

use crate::target::{AbstractTarget, PointsToSet};

/// Read-only access to the results of a points-to solver.
///
/// Implementations must be deterministic. Asking twice for the same
/// value returns the same set.
pub trait PointsToProvider {
    /// Returns the points-to set of [value].
    /// None or an empty set both mean the solver has no information.
    fn points_to(&self, value: ValueId) -> Option<&PointsToSet>;
}

impl<P: PointsToProvider + ?Sized> PointsToProvider for &P {
    fn points_to(&self, value: ValueId) -> Option<&PointsToSet> {
        (**self).points_to(value)
    }
}

impl<P: PointsToProvider + ?Sized> PointsToProvider for Box<P> {
    fn points_to(&self, value: ValueId) -> Option<&PointsToSet> {
        (**self).points_to(value)
    }
}

/// Points-to facts filled in by an external solver.
/// Once handed to the query engine they are never changed.
#[derive(Clone, Debug, Default)]
pub struct PointsToFacts {
    map: SetMap<ValueId, AbstractTarget>,
}

impl PointsToFacts {
    pub fn new() -> PointsToFacts {
        PointsToFacts { map: SetMap::new() }
    }

    pub fn add_target(&mut self, value: ValueId, target: AbstractTarget) {
        debug_assert!(
            !target.is_null() || target.get_site().is_none(),
            "A null target can't have an allocation site."
        );
        if !self.map.insert(value, target) {
            debug!("Duplicate points-to fact for value {}", value);
        }
    }

    pub fn add_targets<I>(&mut self, value: ValueId, targets: I)
    where
        I: IntoIterator<Item = AbstractTarget>,
    {
        targets
            .into_iter()
            .for_each(|t| self.add_target(value, t));
    }

    pub fn num_targets(&self, value: ValueId) -> usize {
        self.map.len_of(&value)
    }

    pub fn has_target(&self, value: ValueId, target: &AbstractTarget) -> bool {
        self.map.contains(&value, target)
    }

    /// Number of values with at least one target.
    pub fn num_values(&self) -> usize {
        self.map.num_keys()
    }
}

impl std::fmt::Display for PointsToFacts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.map)
    }
}

impl PointsToProvider for PointsToFacts {
    fn points_to(&self, value: ValueId) -> Option<&PointsToSet> {
        self.map.get(&value)
    }
}
