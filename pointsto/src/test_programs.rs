// SPDX-FileCopyrightText: 2024 Rot127 <unisono@quyllur.org>
// SPDX-License-Identifier: LGPL-3.0-only

#![cfg(test)]

use std::collections::HashMap;

use ir_model::{DataLayout, Module, ModuleBuilder, Type, ValueId};

use crate::{
    facts::PointsToFacts,
    target::{AbstractTarget, Offset},
};

/// A module with its points-to facts and named values.
pub struct TestProgram {
    pub module: Module,
    pub facts: PointsToFacts,
    names: HashMap<&'static str, ValueId>,
}

impl TestProgram {
    pub fn id(&self, name: &str) -> ValueId {
        match self.names.get(name) {
            Some(id) => *id,
            None => panic!("No value named '{}' in the test program", name),
        }
    }
}

fn site(site: ValueId, offset: u64) -> AbstractTarget {
    AbstractTarget::new_site(site, Offset::Known(offset), None, None)
}

// main() -> f() -> g(ptr)
//
// f:
//   %buf = alloca i8, 16
//   %p   = gep %buf, 4
//   call @g(%p)
//   ...  pointers with all kinds of points-to sets
// g(%arg):
//   %q   = gep %arg, 0
pub fn get_buffer_program() -> TestProgram {
    let mut names = HashMap::new();
    let mut mb = ModuleBuilder::new("buffer", DataLayout::default());
    let main = mb.add_procedure("main");
    let f = mb.add_procedure("f");
    let g = mb.add_procedure("g");
    let glob = mb.add_global("G");

    let c0 = mb.add_const_int(0, 64);
    let c1 = mb.add_const_int(1, 64);
    let c2 = mb.add_const_int(2, 64);
    let c4 = mb.add_const_int(4, 64);
    let c16 = mb.add_const_int(16, 64);
    names.insert("len0", c0);
    names.insert("len1", c1);
    names.insert("len4", c4);
    names.insert("len10", mb.add_const_int(10, 64));
    names.insert("len12", mb.add_const_int(12, 64));
    names.insert("len13", mb.add_const_int(13, 64));
    names.insert("len16", c16);
    names.insert("len17", mb.add_const_int(17, 64));
    names.insert("len_umax", mb.add_const_int(u64::MAX, 64));
    names.insert(
        "len_wide",
        mb.add_const(ir_model::Const::new_i64(-1, 128)),
    );

    mb.add_call(main, "", Type::Void, f, vec![]);

    let buf = mb.add_alloca(f, "buf", Type::int(8), c16);
    let p = mb.add_gep(f, "p", buf, c4);
    mb.add_call(f, "", Type::Void, g, vec![p]);
    let n = mb.add_load(f, "n", Type::int(64), p);
    let arr = mb.add_alloca(f, "arr", Type::array(Type::int(32), 4), c2);
    let opq = mb.add_alloca(f, "opq", Type::Opaque, c1);
    let dynb = mb.add_alloca(f, "dyn", Type::int(8), n);
    let null_ptr = mb.add_gep(f, "np", buf, c0);
    let unk = mb.add_gep(f, "unk", buf, c0);
    let uoff = mb.add_gep(f, "uoff", buf, n);
    let multi = mb.add_gep(f, "multi", buf, c0);
    let freed = mb.add_gep(f, "freed", buf, c0);
    let empty = mb.add_gep(f, "empty", buf, c0);
    let gp = mb.add_gep(f, "gp", glob, c0);
    let mixed = mb.add_gep(f, "mixed", buf, n);
    let pending = mb.add_gep(f, "pending", buf, n);
    let end = mb.add_gep(f, "end", buf, c16);
    let far = mb.add_gep(f, "far", buf, n);

    let arg = mb.add_argument(g, "arg", Type::Pointer);
    let q = mb.add_gep(g, "q", arg, c0);

    for (name, id) in [
        ("main", main),
        ("f", f),
        ("g", g),
        ("G", glob),
        ("buf", buf),
        ("p", p),
        ("n", n),
        ("arr", arr),
        ("opq", opq),
        ("dyn", dynb),
        ("np", null_ptr),
        ("unk", unk),
        ("uoff", uoff),
        ("multi", multi),
        ("freed", freed),
        ("empty", empty),
        ("gp", gp),
        ("mixed", mixed),
        ("pending", pending),
        ("end", end),
        ("far", far),
        ("arg", arg),
        ("q", q),
    ] {
        names.insert(name, id);
    }

    let mut facts = PointsToFacts::new();
    facts.add_target(buf, site(buf, 0));
    facts.add_target(p, site(buf, 4));
    facts.add_target(arg, site(buf, 4));
    facts.add_target(q, AbstractTarget::new_site(buf, Offset::Known(4), None, Some(f)));
    facts.add_target(arr, site(arr, 0));
    facts.add_target(opq, site(opq, 0));
    facts.add_target(dynb, site(dynb, 0));
    facts.add_target(null_ptr, AbstractTarget::new_null());
    facts.add_target(unk, AbstractTarget::new_unknown());
    facts.add_target(
        uoff,
        AbstractTarget::new_site(buf, Offset::Unknown, None, None),
    );
    facts.add_targets(multi, [site(buf, 0), site(arr, 0)]);
    facts.add_target(freed, site(buf, 0).invalidated());
    facts.add_target(gp, AbstractTarget::new_site(glob, Offset::Known(0), Some(8), None));
    facts.add_targets(
        mixed,
        [
            AbstractTarget::new_site(buf, Offset::Unknown, None, None),
            AbstractTarget::new_null(),
        ],
    );
    facts.add_targets(
        pending,
        [
            site(buf, 0),
            AbstractTarget::new_site(buf, Offset::Unknown, None, None),
        ],
    );
    facts.add_target(end, site(buf, 16));
    facts.add_target(far, site(buf, u64::MAX - 1));

    TestProgram {
        module: mb.build(),
        facts,
        names,
    }
}

// main -> rec -> rec
//  |
//  +----> a -> b -> a
//  |
//  +----> leaf
//
// rec:
//   %rbuf = alloca i8, 16
//   %rp   = gep %rbuf, 0
//   call @rec()
pub fn get_recursive_program() -> TestProgram {
    let mut names = HashMap::new();
    let mut mb = ModuleBuilder::new("recursive", DataLayout::default());
    let main = mb.add_procedure("main");
    let rec = mb.add_procedure("rec");
    let a = mb.add_procedure("a");
    let b = mb.add_procedure("b");
    let leaf = mb.add_procedure("leaf");
    let c0 = mb.add_const_int(0, 64);
    let c4 = mb.add_const_int(4, 64);
    let c16 = mb.add_const_int(16, 64);

    mb.add_call(main, "", Type::Void, rec, vec![]);
    mb.add_call(main, "", Type::Void, a, vec![]);
    mb.add_call(main, "", Type::Void, leaf, vec![]);
    let rbuf = mb.add_alloca(rec, "rbuf", Type::int(8), c16);
    let rp = mb.add_gep(rec, "rp", rbuf, c0);
    mb.add_call(rec, "", Type::Void, rec, vec![]);
    mb.add_call(a, "", Type::Void, b, vec![]);
    mb.add_call(b, "", Type::Void, a, vec![]);
    let lbuf = mb.add_alloca(leaf, "lbuf", Type::int(8), c16);
    let lp = mb.add_gep(leaf, "lp", lbuf, c0);

    for (name, id) in [
        ("main", main),
        ("rec", rec),
        ("a", a),
        ("b", b),
        ("leaf", leaf),
        ("rbuf", rbuf),
        ("rp", rp),
        ("lbuf", lbuf),
        ("lp", lp),
        ("len4", c4),
    ] {
        names.insert(name, id);
    }

    let mut facts = PointsToFacts::new();
    facts.add_target(rp, site(rbuf, 0));
    facts.add_target(lp, site(lbuf, 0));

    TestProgram {
        module: mb.build(),
        facts,
        names,
    }
}

// main --[%fp]--> h1 --[%fp2]--> ?
//   |
//   +---[%fp]---> h2 --> main
//
// %fp = load @table   (points to h1, h2, null, unknown)
// %fp2 has no points-to facts.
pub fn get_indirect_call_program() -> TestProgram {
    let mut names = HashMap::new();
    let mut mb = ModuleBuilder::new("indirect", DataLayout::default());
    let main = mb.add_procedure("main");
    let h1 = mb.add_procedure("h1");
    let h2 = mb.add_procedure("h2");
    let ext = mb.add_declaration("ext");
    let table = mb.add_global("table");

    let fp = mb.add_load(main, "fp", Type::Pointer, table);
    mb.add_call(main, "", Type::Void, fp, vec![]);
    let fp2 = mb.add_load(h1, "fp2", Type::Pointer, table);
    mb.add_call(h1, "", Type::Void, fp2, vec![]);
    mb.add_call(h2, "", Type::Void, main, vec![]);
    mb.add_call(h2, "", Type::Void, ext, vec![]);

    for (name, id) in [
        ("main", main),
        ("h1", h1),
        ("h2", h2),
        ("ext", ext),
        ("table", table),
        ("fp", fp),
        ("fp2", fp2),
    ] {
        names.insert(name, id);
    }

    let mut facts = PointsToFacts::new();
    facts.add_targets(
        fp,
        [
            site(h1, 0),
            site(h2, 0),
            AbstractTarget::new_null(),
            AbstractTarget::new_unknown(),
        ],
    );

    TestProgram {
        module: mb.build(),
        facts,
        names,
    }
}
