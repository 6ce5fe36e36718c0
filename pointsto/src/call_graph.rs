// SPDX-FileCopyrightText: 2024 Rot127 <unisono@quyllur.org>
// SPDX-License-Identifier: LGPL-3.0-only

use std::collections::{BTreeSet, HashSet};

use ir_model::{Module, ProcId, ValueId};
use log::{debug, info, log_enabled, trace, warn, Level};
use petgraph::algo::kosaraju_scc;
use petgraph::dot::{Config, Dot};
use petgraph::prelude::DiGraphMap;
use petgraph::visit::Dfs;
use petgraph::Direction::Outgoing;

use crate::facts::PointsToProvider;

/// Nodes are procedures. An edge means the source may call the target.
pub type CallGraphMap = DiGraphMap<ProcId, ()>;

#[derive(Clone, Copy, Debug, Default)]
pub struct CallGraphOptions {
    /// Treat callers of unresolved indirect calls as recursive.
    pub strict_recursion: bool,
}

/// The call graph of a module.
/// It is immutable after [CallGraph::build].
#[derive(Clone, Debug)]
pub struct CallGraph {
    graph: CallGraphMap,
    /// Procedures which are part of a call cycle.
    recursive: HashSet<ProcId>,
    /// Indirect calls without any resolved procedure target.
    /// Pairs of (call instruction, caller).
    unresolved_icalls: Vec<(ValueId, ProcId)>,
}

impl Default for CallGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl CallGraph {
    pub fn new() -> CallGraph {
        CallGraph {
            graph: CallGraphMap::new(),
            recursive: HashSet::new(),
            unresolved_icalls: Vec::new(),
        }
    }

    /// Builds the call graph of [module].
    /// Direct calls add an edge to the called procedure.
    /// Indirect calls add an edge to every procedure in the points-to set
    /// of the called value. Null and unknown targets are ignored.
    pub fn build<P: PointsToProvider + ?Sized>(
        module: &Module,
        pta: Option<&P>,
        options: CallGraphOptions,
    ) -> CallGraph {
        let mut cg = CallGraph::new();
        for proc in module.procedures() {
            cg.graph.add_node(proc.get_id());
        }
        for proc in module.procedures() {
            let caller = proc.get_id();
            for (call, callee) in module.call_sites(caller) {
                if let Some(target) = module.as_procedure(callee) {
                    cg.add_call_edge(caller, target);
                    continue;
                }
                if cg.add_indirect_call_edges(module, pta, caller, callee) == 0 {
                    warn!(
                        "Indirect call {} in {} has no resolved target. Recursion through it is not detected.",
                        module.get_value(call),
                        proc.get_name()
                    );
                    cg.unresolved_icalls.push((call, caller));
                }
            }
        }
        cg.mark_recursive(options);
        info!(
            "Call graph of '{}': {} procedures, {} edges, {} recursive, {} unresolved indirect calls.",
            module.get_name(),
            cg.graph.node_count(),
            cg.graph.edge_count(),
            cg.recursive.len(),
            cg.unresolved_icalls.len()
        );
        if log_enabled!(Level::Trace) {
            trace!("{}", cg.to_dot());
        }
        cg
    }

    /// Adds edges to the procedures [callee] may point to.
    /// Returns the number of resolved targets.
    fn add_indirect_call_edges<P: PointsToProvider + ?Sized>(
        &mut self,
        module: &Module,
        pta: Option<&P>,
        caller: ProcId,
        callee: ValueId,
    ) -> usize {
        let Some(targets) = pta.and_then(|p| p.points_to(callee)) else {
            return 0;
        };
        let mut resolved = 0;
        for t in targets.iter() {
            if t.is_null() || t.is_unknown() {
                continue;
            }
            if let Some(target) = t.get_site().and_then(|s| module.as_procedure(s)) {
                self.add_call_edge(caller, target);
                resolved += 1;
            }
        }
        resolved
    }

    pub fn add_call_edge(&mut self, caller: ProcId, callee: ProcId) {
        debug!("Added call edge {} -> {}", caller, callee);
        self.graph.add_edge(caller, callee, ());
    }

    /// A procedure is recursive if it is in a strongly connected component
    /// with more than one node or calls itself.
    fn mark_recursive(&mut self, options: CallGraphOptions) {
        self.recursive.clear();
        // SCCs are in reverse topological order. The nodes in each SCC are arbitrary
        for scc in kosaraju_scc(&self.graph) {
            if scc.len() > 1 {
                self.recursive.extend(scc);
                continue;
            }
            let node = scc[0];
            if self.graph.contains_edge(node, node) {
                self.recursive.insert(node);
            }
        }
        if options.strict_recursion {
            for (_, caller) in self.unresolved_icalls.iter() {
                self.recursive.insert(*caller);
            }
        }
    }

    /// True if [proc] can be reached from itself over one or more edges.
    pub fn is_recursive(&self, proc: ProcId) -> bool {
        self.recursive.contains(&proc)
    }

    /// True if [to] can be reached from [from].
    /// Every procedure reaches itself.
    pub fn is_reachable(&self, from: ProcId, to: ProcId) -> bool {
        if from == to {
            return true;
        }
        if !self.graph.contains_node(from) {
            return false;
        }
        let mut dfs = Dfs::new(&self.graph, from);
        while let Some(n) = dfs.next(&self.graph) {
            if n == to {
                return true;
            }
        }
        false
    }

    /// All procedures reachable from [start], including [start].
    pub fn reachable_from(&self, start: ProcId) -> BTreeSet<ProcId> {
        let mut reachable = BTreeSet::from([start]);
        if !self.graph.contains_node(start) {
            return reachable;
        }
        let mut dfs = Dfs::new(&self.graph, start);
        while let Some(n) = dfs.next(&self.graph) {
            reachable.insert(n);
        }
        reachable
    }

    pub fn callees(&self, proc: ProcId) -> BTreeSet<ProcId> {
        self.graph.neighbors_directed(proc, Outgoing).collect()
    }

    pub fn num_procedures(&self) -> usize {
        self.graph.node_count()
    }

    pub fn num_edges(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn num_unresolved_icalls(&self) -> usize {
        self.unresolved_icalls.len()
    }

    pub fn to_dot(&self) -> String {
        format!(
            "{:?}",
            Dot::with_config(&self.graph, &[Config::EdgeNoLabel])
        )
    }
}
