// SPDX-FileCopyrightText: 2024 Rot127 <unisono@quyllur.org>
// SPDX-License-Identifier: LGPL-3.0-only

pub mod config;
pub mod host;
pub mod logging;
pub mod plugin;
pub mod points_to_plugin;
pub mod query;
mod test_config;
mod test_query;
