// SPDX-FileCopyrightText: 2024 Rot127 <unisono@quyllur.org>
// SPDX-License-Identifier: LGPL-3.0-only

#[cfg(test)]
mod tests {
    use crate::{Const, DataLayout, InstOp, ModuleBuilder, Type, ValueKind};

    #[test]
    fn test_build_module() {
        let mut mb = ModuleBuilder::new("test", DataLayout::default());
        let main = mb.add_procedure("main");
        let ext = mb.add_declaration("puts");
        let arg = mb.add_argument(main, "argc", Type::int(32));
        let one = mb.add_const_int(1, 64);
        let buf = mb.add_alloca(main, "buf", Type::int(8), one);
        let call = mb.add_call(main, "r", Type::int(32), ext, vec![buf]);
        let m = mb.build();

        assert_eq!(m.procedures().count(), 2);
        assert!(m.procedure(ext).unwrap().is_declaration());
        assert_eq!(m.procedure(main).unwrap().get_insts(), &[buf, call]);
        assert_eq!(m.procedure(main).unwrap().get_args(), &[arg]);
        assert!(m.procedure(ext).unwrap().get_args().is_empty());
        assert!(m.get_value(call).is_instruction());
        assert!(!m.get_value(arg).is_instruction());
        assert!(!m.get_value(one).is_instruction());
        assert_eq!(m.enclosing_procedure(arg), Some(main));
        assert_eq!(m.defining_procedure(arg), None);
        assert_eq!(m.defining_procedure(buf), Some(main));
        assert_eq!(m.as_procedure(ext), Some(ext));
        assert_eq!(m.as_procedure(buf), None);
        assert_eq!(m.call_sites(main), vec![(call, ext)]);
        assert!(m.get_value(buf).is_alloca());
        assert!(m.get_value(buf).is_pointer());
        assert_eq!(m.get_value(one).as_const_int().unwrap().as_u64(), Some(1));
        assert!(matches!(
            m.get_value(arg).get_kind(),
            ValueKind::Argument { index: 0, .. }
        ));
        assert_eq!(
            m.get_value(call).get_op(),
            Some(&InstOp::Call {
                callee: ext,
                args: vec![buf]
            })
        );
        assert_eq!(format!("{}", m.get_value(buf)), "%buf");
        assert_eq!(format!("{}", m.get_value(main)), "@main");
    }

    #[test]
    #[should_panic(expected = "is not defined")]
    fn test_undefined_operand() {
        let mut mb = ModuleBuilder::new("test", DataLayout::default());
        let main = mb.add_procedure("main");
        mb.add_load(main, "x", Type::int(32), 0x1000);
    }

    #[test]
    #[should_panic(expected = "add_const: Width")]
    fn test_const_too_wide() {
        let mut mb = ModuleBuilder::new("test", DataLayout::default());
        mb.add_const(Const::new_u64(1, u32::MAX as u64 + 1));
    }

    #[test]
    fn test_wide_const() {
        let mut mb = ModuleBuilder::new("test", DataLayout::default());
        let c = mb.add_const(Const::new_i64(-1, 128));
        let m = mb.build();
        assert_eq!(*m.get_value(c).get_type(), Type::int(128));
        assert_eq!(m.get_value(c).as_const_int().unwrap().as_u64(), None);
    }

    #[test]
    #[should_panic(expected = "declaration")]
    fn test_insts_in_declaration() {
        let mut mb = ModuleBuilder::new("test", DataLayout::default());
        let ext = mb.add_declaration("malloc");
        mb.add_inst(ext, "x", Type::Void, InstOp::Other);
    }

    #[test]
    #[should_panic(expected = "is not part of module")]
    fn test_unknown_value_lookup() {
        let m = ModuleBuilder::new("test", DataLayout::default()).build();
        m.get_value(42);
    }
}
