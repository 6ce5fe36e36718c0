// SPDX-FileCopyrightText: 2024 Rot127 <unisono@quyllur.org>
// SPDX-License-Identifier: LGPL-3.0-only

use std::{collections::BTreeMap, path::PathBuf};

use helper::conf::{parse_bool_conf_val, parse_log_level_conf_val, LOG_LEVELS};
use ir_model::DataLayout;
use log::error;
use pointsto::call_graph::CallGraphOptions;

pub const CONF_LOG_LEVEL: &str = "plugins.pointsto.log_level";
pub const CONF_LOG_TO_FILE: &str = "plugins.pointsto.log_to_file";
pub const CONF_LOG_DIR: &str = "plugins.pointsto.log_dir";
pub const CONF_LOG_SPEC_FILE: &str = "plugins.pointsto.log_spec_file";
pub const CONF_DATA_LAYOUT: &str = "plugins.pointsto.data_layout";
pub const CONF_STRICT_RECURSION: &str = "plugins.pointsto.strict_recursion";

/// Checks a new value of a setting. Logs the reason if it is rejected.
type Validator = fn(&str) -> bool;

struct ConfigNode {
    value: String,
    desc: &'static str,
    validator: Validator,
}

fn set_log_level(val: &str) -> bool {
    if parse_log_level_conf_val(val).is_none() {
        error!("Log level must be one of: {}", LOG_LEVELS.join(", "));
        return false;
    }
    true
}

fn set_bool(val: &str) -> bool {
    if parse_bool_conf_val(val).is_none() {
        error!("Value must be: 'true' or 'false'");
        return false;
    }
    true
}

fn set_log_dir(val: &str) -> bool {
    if val.trim().is_empty() {
        error!("The log directory must not be empty.");
        return false;
    }
    true
}

fn set_log_spec_file(val: &str) -> bool {
    let val = val.trim();
    if !val.is_empty() && !val.ends_with(".toml") {
        error!("The log specification file must be a .toml file.");
        return false;
    }
    true
}

fn set_data_layout(val: &str) -> bool {
    if DataLayout::from_conf_str(val).is_none() {
        error!("Data layout must be of the form 'p:<16|32|64>, i:<8|16|32|64|128>'");
        return false;
    }
    true
}

/// Settings of the points-to plugin.
/// Every value stored passed the validator of its setting.
pub struct PluginConfig {
    nodes: BTreeMap<&'static str, ConfigNode>,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl PluginConfig {
    pub fn new() -> PluginConfig {
        let mut conf = PluginConfig {
            nodes: BTreeMap::new(),
        };
        conf.add_node(
            CONF_LOG_LEVEL,
            "info",
            "Log level. One of: off, error, warn, info, debug, trace.",
            set_log_level,
        );
        conf.add_node(
            CONF_LOG_TO_FILE,
            "false",
            "Write the log into a file in plugins.pointsto.log_dir. Warnings are still printed.",
            set_bool,
        );
        conf.add_node(
            CONF_LOG_DIR,
            ".",
            "Directory of the log files.",
            set_log_dir,
        );
        conf.add_node(
            CONF_LOG_SPEC_FILE,
            "",
            "TOML file with the log specification. It is watched and overrides plugins.pointsto.log_level. Created if missing. Empty disables it.",
            set_log_spec_file,
        );
        conf.add_node(
            CONF_DATA_LAYOUT,
            "p:64,i:64",
            "Pointer width and maximum integer alignment in bits. Format: 'p:<bits>,i:<bits>'",
            set_data_layout,
        );
        conf.add_node(
            CONF_STRICT_RECURSION,
            "false",
            "Treat procedures with unresolved indirect calls as recursive.",
            set_bool,
        );
        conf
    }

    fn add_node(
        &mut self,
        key: &'static str,
        default: &str,
        desc: &'static str,
        validator: Validator,
    ) {
        debug_assert!(validator(default), "Default of {} is invalid.", key);
        self.nodes.insert(
            key,
            ConfigNode {
                value: default.to_owned(),
                desc,
                validator,
            },
        );
    }

    /// Sets [key] to [val]. If the key is unknown or the value
    /// is invalid, the old value is kept and false is returned.
    pub fn set(&mut self, key: &str, val: &str) -> bool {
        let Some(node) = self.nodes.get_mut(key) else {
            error!("Unknown setting '{}'", key);
            return false;
        };
        if !(node.validator)(val) {
            return false;
        }
        node.value = val.to_owned();
        true
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.nodes.get(key).map(|n| n.value.as_str())
    }

    pub fn description(&self, key: &str) -> Option<&'static str> {
        self.nodes.get(key).map(|n| n.desc)
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.nodes.keys().copied()
    }

    fn get_value(&self, key: &str) -> &str {
        match self.get(key) {
            Some(v) => v,
            None => panic!("Setting {} was never added.", key),
        }
    }

    pub fn get_log_level(&self) -> String {
        parse_log_level_conf_val(self.get_value(CONF_LOG_LEVEL)).unwrap_or("info".to_owned())
    }

    pub fn get_log_to_file(&self) -> bool {
        parse_bool_conf_val(self.get_value(CONF_LOG_TO_FILE)).unwrap_or(false)
    }

    pub fn get_log_dir(&self) -> PathBuf {
        PathBuf::from(self.get_value(CONF_LOG_DIR).trim())
    }

    pub fn get_log_spec_file(&self) -> Option<PathBuf> {
        let val = self.get_value(CONF_LOG_SPEC_FILE).trim();
        if val.is_empty() {
            return None;
        }
        Some(PathBuf::from(val))
    }

    pub fn get_data_layout(&self) -> DataLayout {
        DataLayout::from_conf_str(self.get_value(CONF_DATA_LAYOUT)).unwrap_or_default()
    }

    pub fn get_strict_recursion(&self) -> bool {
        parse_bool_conf_val(self.get_value(CONF_STRICT_RECURSION)).unwrap_or(false)
    }

    pub fn get_call_graph_options(&self) -> CallGraphOptions {
        CallGraphOptions {
            strict_recursion: self.get_strict_recursion(),
        }
    }
}
