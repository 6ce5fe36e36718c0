// SPDX-FileCopyrightText: 2024 Rot127 <unisono@quyllur.org>
// SPDX-License-Identifier: LGPL-3.0-only

use helper::conf::parse_key_num_list;
use log::warn;

use crate::types::Type;

/// Size and alignment rules of the target platform.
/// All sizes and alignments returned are in bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataLayout {
    /// Width of a pointer in bits.
    pointer_bits: u32,
    /// Maximum ABI alignment of integer types in bytes.
    max_int_align: u64,
}

impl Default for DataLayout {
    fn default() -> Self {
        DataLayout {
            pointer_bits: 64,
            max_int_align: 8,
        }
    }
}

fn round_up(v: u64, align: u64) -> Option<u64> {
    debug_assert!(align.is_power_of_two());
    v.checked_add(align - 1).map(|v| v & !(align - 1))
}

impl DataLayout {
    pub fn new(pointer_bits: u32, max_int_align: u64) -> DataLayout {
        assert!(
            matches!(pointer_bits, 16 | 32 | 64),
            "Unsupported pointer width: {}",
            pointer_bits
        );
        assert!(
            max_int_align.is_power_of_two(),
            "Integer alignment must be a power of two."
        );
        DataLayout {
            pointer_bits,
            max_int_align,
        }
    }

    /// Parses a layout description of the form 'p:<bits>, i:<bits>'.
    /// 'p' is the pointer width, 'i' the maximum integer alignment.
    /// Missing keys keep their defaults.
    pub fn from_conf_str(val: &str) -> Option<DataLayout> {
        let mut layout = DataLayout::default();
        for (key, n) in parse_key_num_list(val)? {
            match key.as_str() {
                "p" if matches!(n, 16 | 32 | 64) => layout.pointer_bits = n as u32,
                "i" if (8..=128).contains(&n) && n.is_power_of_two() => {
                    layout.max_int_align = n / 8
                }
                _ => {
                    warn!("Invalid data layout entry '{}:{}'", key, n);
                    return None;
                }
            }
        }
        Some(layout)
    }

    pub fn pointer_bits(&self) -> u32 {
        self.pointer_bits
    }

    pub fn pointer_size(&self) -> u64 {
        (self.pointer_bits / 8) as u64
    }

    /// The largest unsigned value of the native (pointer) width.
    pub fn native_umax(&self) -> u64 {
        u64::MAX >> (64 - self.pointer_bits)
    }

    /// Number of bytes written when storing a value of type [ty].
    /// None for unsized types.
    pub fn type_store_size(&self, ty: &Type) -> Option<u64> {
        match ty {
            Type::Void | Type::Function | Type::Opaque => None,
            Type::Int { bits } | Type::Float { bits } => {
                if *bits == 0 {
                    return None;
                }
                Some((*bits as u64 + 7) / 8)
            }
            Type::Pointer => Some(self.pointer_size()),
            Type::Array { elem, len } => self.type_alloc_size(elem)?.checked_mul(*len),
            Type::Struct { fields, packed } => self.struct_layout(fields, *packed).map(|l| l.0),
        }
    }

    /// ABI alignment of [ty]. None for unsized types.
    pub fn type_abi_align(&self, ty: &Type) -> Option<u64> {
        match ty {
            Type::Void | Type::Function | Type::Opaque => None,
            Type::Int { .. } => {
                let store = self.type_store_size(ty)?;
                Some(store.next_power_of_two().min(self.max_int_align))
            }
            Type::Float { .. } => Some(self.type_store_size(ty)?.next_power_of_two()),
            Type::Pointer => Some(self.pointer_size()),
            Type::Array { elem, .. } => self.type_abi_align(elem),
            Type::Struct { fields, packed } => self.struct_layout(fields, *packed).map(|l| l.1),
        }
    }

    /// Number of bytes between two consecutive values of [ty] in memory.
    /// This is the store size rounded up to the alignment.
    pub fn type_alloc_size(&self, ty: &Type) -> Option<u64> {
        round_up(self.type_store_size(ty)?, self.type_abi_align(ty)?)
    }

    /// Returns (size, alignment) of a struct with [fields].
    fn struct_layout(&self, fields: &[Type], packed: bool) -> Option<(u64, u64)> {
        let mut offset: u64 = 0;
        let mut struct_align: u64 = 1;
        for field in fields.iter() {
            let field_align = if packed {
                1
            } else {
                self.type_abi_align(field)?
            };
            offset = round_up(offset, field_align)?;
            offset = offset.checked_add(self.type_alloc_size(field)?)?;
            struct_align = struct_align.max(field_align);
        }
        Some((round_up(offset, struct_align)?, struct_align))
    }
}
