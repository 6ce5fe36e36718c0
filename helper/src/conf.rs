// SPDX-FileCopyrightText: 2024 Rot127 <unisono@quyllur.org>
// SPDX-License-Identifier: LGPL-3.0-only

//! Parsers for plugin setting values.
//! They print nothing. Callers decide how to report a rejected value.

use regex::Regex;

pub const LOG_LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

/// Parses 'true' or 'false'.
pub fn parse_bool_conf_val(val: &str) -> Option<bool> {
    match val.trim() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Parses a log level name. Case is ignored.
pub fn parse_log_level_conf_val(val: &str) -> Option<String> {
    let level = val.trim().to_lowercase();
    if LOG_LEVELS.contains(&level.as_str()) {
        return Some(level);
    }
    None
}

/// Parses a list of the form '<key>:<num>, <key>:<num>, ...'.
/// Numbers are decimal. Keys are lower case letters.
/// The pairs are returned in the order given.
pub fn parse_key_num_list(val: &str) -> Option<Vec<(String, u64)>> {
    let pair_re = Regex::new(r"^([a-z]+)\s*:\s*([0-9]+)$").expect("Invalid regex");
    let mut vec = Vec::new();
    if val.trim().is_empty() {
        return Some(vec);
    }
    for s in val.split(',') {
        let Some(caps) = pair_re.captures(s.trim()) else {
            return None;
        };
        let Ok(n) = caps[2].parse::<u64>() else {
            return None;
        };
        vec.push((caps[1].to_owned(), n));
    }
    Some(vec)
}
