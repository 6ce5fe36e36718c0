// SPDX-FileCopyrightText: 2024 Rot127 <unisono@quyllur.org>
// SPDX-License-Identifier: LGPL-3.0-only

#[cfg(test)]
mod tests {
    use crate::{layout::DataLayout, types::Type, Const};

    #[test]
    fn test_scalar_sizes() {
        let dl = DataLayout::default();
        assert_eq!(dl.type_alloc_size(&Type::int(1)), Some(1));
        assert_eq!(dl.type_alloc_size(&Type::int(8)), Some(1));
        assert_eq!(dl.type_alloc_size(&Type::int(17)), Some(4));
        assert_eq!(dl.type_alloc_size(&Type::int(64)), Some(8));
        // Alignment is capped at 8 bytes.
        assert_eq!(dl.type_abi_align(&Type::int(128)), Some(8));
        assert_eq!(dl.type_alloc_size(&Type::int(128)), Some(16));
        assert_eq!(dl.type_alloc_size(&Type::Float { bits: 80 }), Some(16));
        assert_eq!(dl.type_alloc_size(&Type::Pointer), Some(8));
    }

    #[test]
    fn test_aggregate_sizes() {
        let dl = DataLayout::default();
        assert_eq!(dl.type_alloc_size(&Type::array(Type::int(32), 4)), Some(16));
        // { i8, i32, i8 } -> 1 + 3 pad + 4 + 1 + 3 pad
        let s = Type::structure(vec![Type::int(8), Type::int(32), Type::int(8)]);
        assert_eq!(dl.type_alloc_size(&s), Some(12));
        assert_eq!(dl.type_abi_align(&s), Some(4));
        let p = Type::packed_structure(vec![Type::int(8), Type::int(32), Type::int(8)]);
        assert_eq!(dl.type_alloc_size(&p), Some(6));
        assert_eq!(dl.type_alloc_size(&Type::structure(Vec::new())), Some(0));
        assert_eq!(
            dl.type_alloc_size(&Type::array(s.clone(), 3)),
            Some(36),
            "Array of padded structs"
        );
    }

    #[test]
    fn test_unsized_types() {
        let dl = DataLayout::default();
        assert_eq!(dl.type_alloc_size(&Type::Void), None);
        assert_eq!(dl.type_alloc_size(&Type::Opaque), None);
        assert_eq!(dl.type_alloc_size(&Type::Function), None);
        let s = Type::structure(vec![Type::int(32), Type::Opaque]);
        assert!(!s.is_sized());
        assert_eq!(dl.type_alloc_size(&s), None);
        assert_eq!(dl.type_alloc_size(&Type::array(Type::Opaque, 2)), None);
    }

    #[test]
    fn test_array_size_overflow() {
        let dl = DataLayout::default();
        let huge = Type::array(Type::int(64), u64::MAX / 4);
        assert_eq!(dl.type_alloc_size(&huge), None, "Overflow not detected.");
    }

    #[test]
    fn test_layout_from_conf_str() {
        let dl = DataLayout::from_conf_str("p:32, i:32").expect("Valid layout rejected");
        assert_eq!(dl.pointer_size(), 4);
        assert_eq!(dl.native_umax(), u32::MAX as u64);
        assert_eq!(dl.type_alloc_size(&Type::int(64)), Some(8));
        assert_eq!(dl.type_abi_align(&Type::int(64)), Some(4));
        assert_eq!(DataLayout::from_conf_str(""), Some(DataLayout::default()));
        assert!(DataLayout::from_conf_str("p:48").is_none());
        assert!(DataLayout::from_conf_str("i:24").is_none());
        assert!(DataLayout::from_conf_str("x:8").is_none());
        assert_eq!(DataLayout::default().native_umax(), u64::MAX);
    }

    #[test]
    fn test_const_representation() {
        let c = Const::new_i64(-1, 8);
        assert_eq!(c.as_u64(), Some(0xff));
        let c = Const::new_i64(-2, 64);
        assert_eq!(c.as_u64(), Some(u64::MAX - 1));
        let c = Const::new_u64(0x1ff, 8);
        assert_eq!(c.as_u64(), Some(0xff), "Bits above width not dropped.");
        let wide = Const::new_i64(-1, 128);
        assert_eq!(wide.as_u64(), None);
        assert_eq!(wide.limited_u64(), u64::MAX);
        assert!(Const::new_u64(0, 32).is_zero());
    }
}
