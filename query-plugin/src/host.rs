// SPDX-FileCopyrightText: 2024 Rot127 <unisono@quyllur.org>
// SPDX-License-Identifier: LGPL-3.0-only

use ir_model::ValueId;
use log::{debug, warn};

use crate::{
    plugin::InstrPlugin,
    query::{QueryKind, QueryResult},
};

/// Routes queries to the first registered plugin supporting them.
pub struct PluginHost<'m> {
    plugins: Vec<Box<dyn InstrPlugin + 'm>>,
}

impl<'m> Default for PluginHost<'m> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'m> PluginHost<'m> {
    pub fn new() -> PluginHost<'m> {
        PluginHost {
            plugins: Vec::new(),
        }
    }

    /// Plugins are asked in the order they were added.
    pub fn add_plugin(&mut self, plugin: Box<dyn InstrPlugin + 'm>) {
        debug!("Registered plugin '{}'", plugin.name());
        self.plugins.push(plugin);
    }

    pub fn num_plugins(&self) -> usize {
        self.plugins.len()
    }

    /// Evaluates the query [name] with [operands].
    /// Unknown query names are answered with [QueryResult::Unsupported].
    pub fn query(&self, name: &str, operands: &[ValueId]) -> QueryResult {
        let Some(kind) = QueryKind::from_name(name) else {
            warn!("Unsupported query '{}'", name);
            return QueryResult::Unsupported;
        };
        self.query_kind(kind, operands)
    }

    pub fn query_kind(&self, kind: QueryKind, operands: &[ValueId]) -> QueryResult {
        assert_eq!(
            operands.len(),
            kind.arity(),
            "Query {} takes {} operands.",
            kind,
            kind.arity()
        );
        match self.plugins.iter().find(|p| p.supports(kind)) {
            Some(plugin) => plugin.evaluate(kind, operands),
            None => {
                warn!("No plugin supports the query {}", kind);
                QueryResult::Unsupported
            }
        }
    }
}
