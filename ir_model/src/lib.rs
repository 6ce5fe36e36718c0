// SPDX-FileCopyrightText: 2024 Rot127 <unisono@quyllur.org>
// SPDX-License-Identifier: LGPL-3.0-only

pub mod constant;
pub mod layout;
pub mod module;
pub mod types;
mod test_layout;
mod test_module;

pub use constant::Const;
pub use layout::DataLayout;
pub use module::{InstOp, Module, ModuleBuilder, ProcId, Procedure, Value, ValueId, ValueKind};
pub use types::Type;
