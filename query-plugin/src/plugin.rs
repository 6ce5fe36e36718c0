// SPDX-FileCopyrightText: 2024 Rot127 <unisono@quyllur.org>
// SPDX-License-Identifier: LGPL-3.0-only

use ir_model::ValueId;

use crate::query::{QueryKind, QueryResult};

/// A provider of answers to instruction queries.
///
/// The host only calls [InstrPlugin::evaluate] for kinds the plugin
/// supports and with the number of operands the kind expects.
pub trait InstrPlugin {
    fn name(&self) -> &str;
    fn supports(&self, kind: QueryKind) -> bool;
    fn evaluate(&self, kind: QueryKind, operands: &[ValueId]) -> QueryResult;
}
