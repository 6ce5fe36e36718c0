// SPDX-FileCopyrightText: 2024 Rot127 <unisono@quyllur.org>
// SPDX-License-Identifier: LGPL-3.0-only

use std::collections::BTreeMap;

use log::debug;

use crate::{constant::Const, layout::DataLayout, types::Type};

/// Identity of a value in a [Module].
pub type ValueId = u64;

/// Procedures are identified by the id of their function value.
pub type ProcId = ValueId;

/// Operation of an instruction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InstOp {
    /// Stack allocation of [count] elements of type [allocated].
    Alloca { allocated: Type, count: ValueId },
    /// Call of [callee]. The call is direct if [callee] is a function value.
    Call { callee: ValueId, args: Vec<ValueId> },
    /// Pointer arithmetic: [base] + [offset] bytes.
    Gep { base: ValueId, offset: ValueId },
    Load { addr: ValueId },
    Store { val: ValueId, addr: ValueId },
    Other,
}

impl InstOp {
    /// All values this operation reads.
    pub fn operands(&self) -> Vec<ValueId> {
        match self {
            InstOp::Alloca { count, .. } => vec![*count],
            InstOp::Call { callee, args } => {
                let mut ops = vec![*callee];
                ops.extend(args.iter());
                ops
            }
            InstOp::Gep { base, offset } => vec![*base, *offset],
            InstOp::Load { addr } => vec![*addr],
            InstOp::Store { val, addr } => vec![*val, *addr],
            InstOp::Other => Vec::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValueKind {
    Argument { proc: ProcId, index: usize },
    Global,
    /// The address of a procedure. Its id is the procedure id.
    Function,
    ConstInt(Const),
    Null,
    Instruction { proc: ProcId, op: InstOp },
}

#[derive(Clone, Debug)]
pub struct Value {
    id: ValueId,
    name: String,
    ty: Type,
    kind: ValueKind,
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            ValueKind::Global | ValueKind::Function => write!(f, "@{}", self.name),
            ValueKind::Argument { .. } | ValueKind::Instruction { .. } => {
                write!(f, "%{}", self.name)
            }
            ValueKind::ConstInt(c) => write!(f, "{}", c),
            ValueKind::Null => write!(f, "null"),
        }
    }
}

impl Value {
    pub fn get_id(&self) -> ValueId {
        self.id
    }

    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn get_type(&self) -> &Type {
        &self.ty
    }

    pub fn get_kind(&self) -> &ValueKind {
        &self.kind
    }

    pub fn is_pointer(&self) -> bool {
        self.ty.is_pointer()
    }

    pub fn is_instruction(&self) -> bool {
        matches!(self.kind, ValueKind::Instruction { .. })
    }

    pub fn get_op(&self) -> Option<&InstOp> {
        match &self.kind {
            ValueKind::Instruction { op, .. } => Some(op),
            _ => None,
        }
    }

    pub fn is_alloca(&self) -> bool {
        matches!(self.get_op(), Some(InstOp::Alloca { .. }))
    }

    pub fn as_const_int(&self) -> Option<&Const> {
        match &self.kind {
            ValueKind::ConstInt(c) => Some(c),
            _ => None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Procedure {
    id: ProcId,
    name: String,
    /// Procedure without body. Defined outside of the module.
    is_declaration: bool,
    args: Vec<ValueId>,
    /// Instructions in program order.
    insts: Vec<ValueId>,
}

impl Procedure {
    pub fn get_id(&self) -> ProcId {
        self.id
    }

    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn is_declaration(&self) -> bool {
        self.is_declaration
    }

    pub fn get_args(&self) -> &[ValueId] {
        &self.args
    }

    pub fn get_insts(&self) -> &[ValueId] {
        &self.insts
    }
}

/// A whole program.
pub struct Module {
    name: String,
    layout: DataLayout,
    procedures: BTreeMap<ProcId, Procedure>,
    values: BTreeMap<ValueId, Value>,
}

impl Module {
    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn get_layout(&self) -> &DataLayout {
        &self.layout
    }

    pub fn value(&self, id: ValueId) -> Option<&Value> {
        self.values.get(&id)
    }

    /// Returns the value with [id]. Panics if it is not part of the module.
    pub fn get_value(&self, id: ValueId) -> &Value {
        match self.values.get(&id) {
            Some(v) => v,
            None => panic!("Value {} is not part of module '{}'", id, self.name),
        }
    }

    pub fn procedure(&self, id: ProcId) -> Option<&Procedure> {
        self.procedures.get(&id)
    }

    pub fn procedures(&self) -> std::collections::btree_map::Values<'_, ProcId, Procedure> {
        self.procedures.values()
    }

    pub fn num_values(&self) -> usize {
        self.values.len()
    }

    /// The procedure an instruction or argument belongs to.
    pub fn enclosing_procedure(&self, id: ValueId) -> Option<ProcId> {
        match self.value(id)?.get_kind() {
            ValueKind::Instruction { proc, .. } | ValueKind::Argument { proc, .. } => Some(*proc),
            _ => None,
        }
    }

    /// The procedure containing the instruction [id].
    /// None if [id] is not an instruction.
    pub fn defining_procedure(&self, id: ValueId) -> Option<ProcId> {
        match self.value(id)?.get_kind() {
            ValueKind::Instruction { proc, .. } => Some(*proc),
            _ => None,
        }
    }

    /// Returns the procedure if [id] is a function value.
    pub fn as_procedure(&self, id: ValueId) -> Option<ProcId> {
        match self.value(id)?.get_kind() {
            ValueKind::Function if self.procedures.contains_key(&id) => Some(id),
            _ => None,
        }
    }

    /// Returns all (call instruction, callee) pairs of a procedure.
    pub fn call_sites(&self, proc: ProcId) -> Vec<(ValueId, ValueId)> {
        let Some(p) = self.procedure(proc) else {
            return Vec::new();
        };
        p.get_insts()
            .iter()
            .filter_map(|iid| match self.get_value(*iid).get_op() {
                Some(InstOp::Call { callee, .. }) => Some((*iid, *callee)),
                _ => None,
            })
            .collect()
    }
}

/// Constructs a [Module]. Ids are assigned in insertion order.
pub struct ModuleBuilder {
    module: Module,
    next_id: ValueId,
}

impl ModuleBuilder {
    pub fn new(name: &str, layout: DataLayout) -> ModuleBuilder {
        ModuleBuilder {
            module: Module {
                name: name.to_owned(),
                layout,
                procedures: BTreeMap::new(),
                values: BTreeMap::new(),
            },
            next_id: 1,
        }
    }

    fn push_value(&mut self, name: &str, ty: Type, kind: ValueKind) -> ValueId {
        let id = self.next_id;
        self.next_id += 1;
        self.module.values.insert(
            id,
            Value {
                id,
                name: name.to_owned(),
                ty,
                kind,
            },
        );
        id
    }

    fn assert_known(&self, id: ValueId) {
        assert!(
            self.module.values.contains_key(&id),
            "Operand {} is not defined.",
            id
        );
    }

    fn get_proc_mut(&mut self, proc: ProcId) -> &mut Procedure {
        match self.module.procedures.get_mut(&proc) {
            Some(p) => p,
            None => panic!("Procedure {} is not defined.", proc),
        }
    }

    fn new_procedure(&mut self, name: &str, is_declaration: bool) -> ProcId {
        let id = self.push_value(name, Type::Pointer, ValueKind::Function);
        self.module.procedures.insert(
            id,
            Procedure {
                id,
                name: name.to_owned(),
                is_declaration,
                args: Vec::new(),
                insts: Vec::new(),
            },
        );
        id
    }

    pub fn add_procedure(&mut self, name: &str) -> ProcId {
        self.new_procedure(name, false)
    }

    pub fn add_declaration(&mut self, name: &str) -> ProcId {
        self.new_procedure(name, true)
    }

    pub fn add_argument(&mut self, proc: ProcId, name: &str, ty: Type) -> ValueId {
        let index = self.get_proc_mut(proc).args.len();
        let id = self.push_value(name, ty, ValueKind::Argument { proc, index });
        self.get_proc_mut(proc).args.push(id);
        id
    }

    pub fn add_global(&mut self, name: &str) -> ValueId {
        self.push_value(name, Type::Pointer, ValueKind::Global)
    }

    pub fn add_const(&mut self, c: Const) -> ValueId {
        let Ok(bits) = u32::try_from(c.width()) else {
            panic!("add_const: Width of {} exceeds the maximum integer width.", c);
        };
        self.push_value("", Type::int(bits), ValueKind::ConstInt(c))
    }

    pub fn add_const_int(&mut self, v: u64, width: u64) -> ValueId {
        self.add_const(Const::new_u64(v, width))
    }

    pub fn add_null(&mut self) -> ValueId {
        self.push_value("null", Type::Pointer, ValueKind::Null)
    }

    /// Appends an instruction to the body of [proc].
    pub fn add_inst(&mut self, proc: ProcId, name: &str, ty: Type, op: InstOp) -> ValueId {
        op.operands().into_iter().for_each(|o| self.assert_known(o));
        assert!(
            !self.get_proc_mut(proc).is_declaration,
            "Cannot add instructions to the declaration {}.",
            proc
        );
        let id = self.push_value(name, ty, ValueKind::Instruction { proc, op });
        self.get_proc_mut(proc).insts.push(id);
        id
    }

    pub fn add_alloca(
        &mut self,
        proc: ProcId,
        name: &str,
        allocated: Type,
        count: ValueId,
    ) -> ValueId {
        self.add_inst(proc, name, Type::Pointer, InstOp::Alloca { allocated, count })
    }

    pub fn add_call(
        &mut self,
        proc: ProcId,
        name: &str,
        ret: Type,
        callee: ValueId,
        args: Vec<ValueId>,
    ) -> ValueId {
        self.add_inst(proc, name, ret, InstOp::Call { callee, args })
    }

    pub fn add_gep(&mut self, proc: ProcId, name: &str, base: ValueId, offset: ValueId) -> ValueId {
        self.add_inst(proc, name, Type::Pointer, InstOp::Gep { base, offset })
    }

    pub fn add_load(&mut self, proc: ProcId, name: &str, ty: Type, addr: ValueId) -> ValueId {
        self.add_inst(proc, name, ty, InstOp::Load { addr })
    }

    pub fn add_store(&mut self, proc: ProcId, val: ValueId, addr: ValueId) -> ValueId {
        self.add_inst(proc, "", Type::Void, InstOp::Store { val, addr })
    }

    pub fn build(self) -> Module {
        debug!(
            "Built module '{}' with {} procedures and {} values.",
            self.module.name,
            self.module.procedures.len(),
            self.module.values.len()
        );
        self.module
    }
}
