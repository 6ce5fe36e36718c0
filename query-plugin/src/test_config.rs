// SPDX-FileCopyrightText: 2024 Rot127 <unisono@quyllur.org>
// SPDX-License-Identifier: LGPL-3.0-only

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use ir_model::DataLayout;

    use crate::config::{
        PluginConfig, CONF_DATA_LAYOUT, CONF_LOG_DIR, CONF_LOG_LEVEL, CONF_LOG_SPEC_FILE,
        CONF_LOG_TO_FILE, CONF_STRICT_RECURSION,
    };

    #[test]
    fn test_defaults() {
        let conf = PluginConfig::new();
        assert_eq!(conf.keys().count(), 6);
        assert_eq!(conf.get_log_spec_file(), None);
        assert_eq!(conf.get(CONF_LOG_LEVEL), Some("info"));
        assert_eq!(conf.get_log_level(), "info");
        assert!(!conf.get_log_to_file());
        assert_eq!(conf.get_log_dir(), PathBuf::from("."));
        assert_eq!(conf.get_data_layout(), DataLayout::default());
        assert!(!conf.get_strict_recursion());
        assert!(!conf.get_call_graph_options().strict_recursion);
        for key in conf.keys() {
            assert!(
                !conf.description(key).unwrap().is_empty(),
                "{} has no description",
                key
            );
        }
    }

    #[test]
    fn test_set_valid() {
        let mut conf = PluginConfig::new();
        assert!(conf.set(CONF_LOG_LEVEL, "DEBUG"));
        assert_eq!(conf.get_log_level(), "debug");
        assert!(conf.set(CONF_LOG_TO_FILE, "true"));
        assert!(conf.get_log_to_file());
        assert!(conf.set(CONF_LOG_DIR, "/tmp/logs"));
        assert_eq!(conf.get_log_dir(), PathBuf::from("/tmp/logs"));
        assert!(conf.set(CONF_LOG_SPEC_FILE, "log/pointsto.toml"));
        assert_eq!(conf.get_log_spec_file(), Some(PathBuf::from("log/pointsto.toml")));
        assert!(conf.set(CONF_LOG_SPEC_FILE, ""));
        assert_eq!(conf.get_log_spec_file(), None);
        assert!(conf.set(CONF_DATA_LAYOUT, "p:32, i:32"));
        assert_eq!(conf.get_data_layout(), DataLayout::new(32, 4));
        assert!(conf.set(CONF_STRICT_RECURSION, "true"));
        assert!(conf.get_call_graph_options().strict_recursion);
    }

    #[test]
    fn test_set_invalid() {
        let mut conf = PluginConfig::new();
        assert!(!conf.set(CONF_LOG_LEVEL, "verbose"));
        assert!(!conf.set(CONF_LOG_TO_FILE, "yes"));
        assert!(!conf.set(CONF_LOG_DIR, "  "));
        assert!(!conf.set(CONF_LOG_SPEC_FILE, "pointsto.log"));
        assert!(!conf.set(CONF_DATA_LAYOUT, "p:48"));
        assert!(!conf.set(CONF_DATA_LAYOUT, "q:64"));
        assert!(!conf.set(CONF_STRICT_RECURSION, "1"));
        assert!(!conf.set("plugins.pointsto.unknown", "true"));
        // Previous values are kept.
        assert_eq!(conf.get(CONF_LOG_LEVEL), Some("info"));
        assert_eq!(conf.get(CONF_LOG_DIR), Some("."));
        assert_eq!(conf.get(CONF_DATA_LAYOUT), Some("p:64,i:64"));
        assert!(!conf.get_strict_recursion());
        assert_eq!(conf.get("plugins.pointsto.unknown"), None);
    }
}
