// SPDX-FileCopyrightText: 2024 Rot127 <unisono@quyllur.org>
// SPDX-License-Identifier: LGPL-3.0-only

/// Types of IR values.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Type {
    Void,
    Int {
        bits: u32,
    },
    Float {
        bits: u32,
    },
    /// An opaque pointer. Pointee types are not tracked.
    Pointer,
    Array {
        elem: Box<Type>,
        len: u64,
    },
    Struct {
        fields: Vec<Type>,
        packed: bool,
    },
    Function,
    /// A type without body (e.g. a forward declared struct).
    Opaque,
}

impl Type {
    pub fn int(bits: u32) -> Type {
        Type::Int { bits }
    }

    pub fn array(elem: Type, len: u64) -> Type {
        Type::Array {
            elem: Box::new(elem),
            len,
        }
    }

    pub fn structure(fields: Vec<Type>) -> Type {
        Type::Struct {
            fields,
            packed: false,
        }
    }

    pub fn packed_structure(fields: Vec<Type>) -> Type {
        Type::Struct {
            fields,
            packed: true,
        }
    }

    pub fn is_pointer(&self) -> bool {
        matches!(self, Type::Pointer)
    }

    pub fn is_int(&self) -> bool {
        matches!(self, Type::Int { .. })
    }

    /// True if values of this type occupy memory of a well defined size.
    pub fn is_sized(&self) -> bool {
        match self {
            Type::Void | Type::Function | Type::Opaque => false,
            Type::Int { bits } | Type::Float { bits } => *bits > 0,
            Type::Pointer => true,
            Type::Array { elem, .. } => elem.is_sized(),
            Type::Struct { fields, .. } => fields.iter().all(|f| f.is_sized()),
        }
    }
}

impl std::fmt::Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::Void => write!(f, "void"),
            Type::Int { bits } => write!(f, "i{}", bits),
            Type::Float { bits } => write!(f, "f{}", bits),
            Type::Pointer => write!(f, "ptr"),
            Type::Array { elem, len } => write!(f, "[{} x {}]", len, elem),
            Type::Struct { fields, packed } => {
                if *packed {
                    write!(f, "<")?;
                }
                write!(f, "{{ ")?;
                for (i, field) in fields.iter().enumerate() {
                    if i != 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", field)?;
                }
                write!(f, " }}")?;
                if *packed {
                    write!(f, ">")?;
                }
                Ok(())
            }
            Type::Function => write!(f, "fn"),
            Type::Opaque => write!(f, "opaque"),
        }
    }
}
