// SPDX-FileCopyrightText: 2024 Rot127 <unisono@quyllur.org>
// SPDX-License-Identifier: LGPL-3.0-only

use num_bigint::BigUint;
use std::fmt::LowerHex;

/// An integer constant of arbitrary bit width.
/// The value is always stored in its unsigned two's complement form.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct Const {
    v: BigUint,
    /// Width of constant in bits
    width: u64,
}

impl LowerHex for Const {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#x}:i{}", self.v, self.width)
    }
}

impl std::fmt::Display for Const {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "i{} {}", self.width, self.v)
    }
}

impl Const {
    /// Returns a bit mask of [width] bits with all bits set.
    pub fn get_masku(width: u64) -> BigUint {
        (BigUint::from(1u8) << width as usize) - BigUint::from(1u8)
    }

    /// Creates a new Const of [width] bits.
    /// Any bits of [v] at [width] onwards are dropped.
    pub fn new(v: BigUint, width: u64) -> Const {
        if v.bits() <= width {
            return Const { v, width };
        }
        Const {
            v: v & Const::get_masku(width),
            width,
        }
    }

    pub fn new_u64(v: u64, width: u64) -> Const {
        Const::new(BigUint::from(v), width)
    }

    /// Creates the two's complement representation of [v] in [width] bits.
    pub fn new_i64(v: i64, width: u64) -> Const {
        if v >= 0 {
            return Const::new_u64(v as u64, width);
        }
        let mask = Const::get_masku(width);
        // -k == !(k - 1) within the mask.
        let k_dec = BigUint::from(v.unsigned_abs() - 1) & &mask;
        Const {
            v: mask - k_dec,
            width,
        }
    }

    pub fn width(&self) -> u64 {
        self.width
    }

    pub fn is_zero(&self) -> bool {
        self.v == BigUint::ZERO
    }

    /// Returns the value if it fits into 64 bits.
    pub fn as_u64(&self) -> Option<u64> {
        let digits = self.v.to_u64_digits();
        match digits.len() {
            0 => Some(0),
            1 => Some(digits[0]),
            _ => None,
        }
    }

    /// Returns the value or u64::MAX if it doesn't fit into 64 bits.
    pub fn limited_u64(&self) -> u64 {
        self.as_u64().unwrap_or(u64::MAX)
    }
}
