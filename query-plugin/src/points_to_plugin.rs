// SPDX-FileCopyrightText: 2024 Rot127 <unisono@quyllur.org>
// SPDX-License-Identifier: LGPL-3.0-only

use std::collections::BTreeSet;

use ir_model::{Module, ProcId, ValueId};
use log::info;
use pointsto::{facts::PointsToProvider, predicates::PointerPredicates, verdict::Verdict};

use crate::{
    config::PluginConfig,
    plugin::InstrPlugin,
    query::{QueryKind, QueryResult},
};

/// Answers pointer queries with points-to facts of the whole module.
pub struct PointsToPlugin<'m, P: PointsToProvider> {
    predicates: PointerPredicates<'m, P>,
}

impl<'m, P: PointsToProvider> PointsToPlugin<'m, P> {
    pub fn new(module: &'m Module, pta: Option<P>, conf: &PluginConfig) -> PointsToPlugin<'m, P> {
        info!("Loading points-to facts of '{}'...", module.get_name());
        let predicates = PointerPredicates::new(module, pta, conf.get_call_graph_options());
        info!("Points-to plugin ready");
        PointsToPlugin { predicates }
    }

    pub fn get_predicates(&self) -> &PointerPredicates<'m, P> {
        &self.predicates
    }

    /// All procedures [from] may call, directly or transitively.
    pub fn reachable_functions(&self, from: ProcId) -> BTreeSet<ProcId> {
        self.predicates.reachable_functions(from)
    }
}

impl<'m, P: PointsToProvider> InstrPlugin for PointsToPlugin<'m, P> {
    fn name(&self) -> &str {
        "pointsto"
    }

    fn supports(&self, _kind: QueryKind) -> bool {
        true
    }

    fn evaluate(&self, kind: QueryKind, operands: &[ValueId]) -> QueryResult {
        let module = self.predicates.get_module();
        for o in operands.iter() {
            assert!(
                module.value(*o).is_some(),
                "Operand {} of {} is not part of module '{}'",
                o,
                kind,
                module.get_name()
            );
        }
        let pp = &self.predicates;
        match kind {
            QueryKind::IsNull => QueryResult::Verdict(pp.is_null(operands[0])),
            QueryKind::IsValidPointer => {
                QueryResult::Verdict(pp.is_valid_pointer(operands[0], operands[1]))
            }
            QueryKind::HasKnownSize => QueryResult::Verdict(pp.has_known_size(operands[0])),
            QueryKind::PointsTo => {
                QueryResult::Verdict(Verdict::from(pp.points_to(operands[0], operands[1])))
            }
            QueryKind::GetPointerInfo => QueryResult::PointerInfo(pp.pointer_info(operands[0])),
        }
    }
}
