// SPDX-FileCopyrightText: 2024 Rot127 <unisono@quyllur.org>
// SPDX-License-Identifier: LGPL-3.0-only

use std::{
    collections::{BTreeMap, BTreeSet},
    fmt::Display,
};

/// KeyType -> { CellType } data structure
///
/// A key without any cell is never stored. So [SetMap::get] returns
/// [None] for keys which were never inserted.
#[derive(Clone, Debug)]
pub struct SetMap<KeyType, CellType>
where
    KeyType: Ord,
{
    map: BTreeMap<KeyType, BTreeSet<CellType>>,
}

impl<KeyType, CellType> Display for SetMap<KeyType, CellType>
where
    KeyType: Ord,
    KeyType: Display,
    CellType: Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (k, set) in self.map.iter() {
            writeln!(f, "{}", k)?;
            for v in set.iter() {
                writeln!(f, "\t->{}", v)?;
            }
        }
        Ok(())
    }
}

impl<KeyType, CellType> Default for SetMap<KeyType, CellType>
where
    KeyType: Ord,
    CellType: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<KeyType, CellType> SetMap<KeyType, CellType>
where
    KeyType: Ord,
    CellType: Ord,
{
    pub fn new() -> SetMap<KeyType, CellType> {
        SetMap {
            map: BTreeMap::new(),
        }
    }

    pub fn get<'a>(&'a self, id: &KeyType) -> Option<&'a BTreeSet<CellType>> {
        self.map.get(id)
    }

    /// Adds [val] to the set of [id].
    /// Returns false if the value was already present.
    pub fn insert(&mut self, id: KeyType, val: CellType) -> bool {
        self.map.entry(id).or_default().insert(val)
    }

    pub fn contains(&self, id: &KeyType, val: &CellType) -> bool {
        self.map.get(id).is_some_and(|set| set.contains(val))
    }

    pub fn len_of(&self, id: &KeyType) -> usize {
        self.map.get(id).map_or(0, |set| set.len())
    }

    /// Number of keys with at least one cell.
    pub fn num_keys(&self) -> usize {
        self.map.len()
    }
}
