// SPDX-FileCopyrightText: 2024 Rot127 <unisono@quyllur.org>
// SPDX-License-Identifier: LGPL-3.0-only

use std::collections::HashMap;

use ir_model::{DataLayout, Module, ModuleBuilder, Type, ValueId};
use pointsto::{
    facts::PointsToFacts,
    target::{AbstractTarget, Offset},
};

pub struct Program {
    pub module: Module,
    pub facts: PointsToFacts,
    names: HashMap<&'static str, ValueId>,
}

impl Program {
    pub fn id(&self, name: &str) -> ValueId {
        match self.names.get(name) {
            Some(id) => *id,
            None => panic!("No value named '{}'", name),
        }
    }
}

// main -> f -> g
//   |
//   +---[%fp]--> worker -> worker
//
// f:
//   %buf = alloca [16 x i8], 1
//   %p   = gep %buf, 4
//   call @g(%p)
// g(%arg):
//   %q   = gep %arg, 0
// worker:
//   %wbuf = alloca i32, 4
//   call @worker()
pub fn get_program() -> Program {
    let mut names = HashMap::new();
    let mut mb = ModuleBuilder::new("program", DataLayout::default());
    let main = mb.add_procedure("main");
    let f = mb.add_procedure("f");
    let g = mb.add_procedure("g");
    let worker = mb.add_procedure("worker");
    let table = mb.add_global("table");
    let c0 = mb.add_const_int(0, 64);
    let c1 = mb.add_const_int(1, 64);
    let c4 = mb.add_const_int(4, 64);

    mb.add_call(main, "", Type::Void, f, vec![]);
    let fp = mb.add_load(main, "fp", Type::Pointer, table);
    mb.add_call(main, "", Type::Void, fp, vec![]);

    let buf = mb.add_alloca(f, "buf", Type::array(Type::int(8), 16), c1);
    let p = mb.add_gep(f, "p", buf, c4);
    mb.add_call(f, "", Type::Void, g, vec![p]);
    let np = mb.add_gep(f, "np", buf, c0);
    let uoff = mb.add_gep(f, "uoff", buf, c0);
    let empty = mb.add_gep(f, "empty", buf, c0);

    let arg = mb.add_argument(g, "arg", Type::Pointer);
    let q = mb.add_gep(g, "q", arg, c0);

    let wbuf = mb.add_alloca(worker, "wbuf", Type::int(32), c4);
    mb.add_call(worker, "", Type::Void, worker, vec![]);

    for (name, id) in [
        ("main", main),
        ("f", f),
        ("g", g),
        ("worker", worker),
        ("table", table),
        ("fp", fp),
        ("buf", buf),
        ("p", p),
        ("np", np),
        ("uoff", uoff),
        ("empty", empty),
        ("arg", arg),
        ("q", q),
        ("wbuf", wbuf),
        ("len0", c0),
        ("len1", c1),
        ("len4", c4),
    ] {
        names.insert(name, id);
    }
    names.insert("len10", mb.add_const_int(10, 64));
    names.insert("len13", mb.add_const_int(13, 64));

    let site = |s, o| AbstractTarget::new_site(s, Offset::Known(o), None, None);
    let mut facts = PointsToFacts::new();
    facts.add_target(fp, site(worker, 0));
    facts.add_target(buf, site(buf, 0));
    facts.add_target(p, site(buf, 4));
    facts.add_target(arg, site(buf, 4));
    facts.add_target(q, site(buf, 4));
    facts.add_target(np, AbstractTarget::new_null());
    facts.add_target(uoff, AbstractTarget::new_site(buf, Offset::Unknown, None, None));
    facts.add_target(wbuf, site(wbuf, 0));

    Program {
        module: mb.build(),
        facts,
        names,
    }
}
