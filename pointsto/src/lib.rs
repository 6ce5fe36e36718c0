// SPDX-FileCopyrightText: 2024 Rot127 <unisono@quyllur.org>
// SPDX-License-Identifier: LGPL-3.0-only

pub mod alloc_size;
pub mod call_graph;
pub mod facts;
pub mod predicates;
pub mod target;
pub mod verdict;
mod test_alloc_size;
mod test_call_graph;
mod test_predicates;
mod test_programs;
