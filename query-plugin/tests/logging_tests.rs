// SPDX-FileCopyrightText: 2024 Rot127 <unisono@quyllur.org>
// SPDX-License-Identifier: LGPL-3.0-only

use log::info;
use query_plugin::{
    config::{PluginConfig, CONF_LOG_LEVEL},
    logging::init_logger,
};

#[test]
fn test_init_logger_once() {
    let mut conf = PluginConfig::new();
    assert!(conf.set(CONF_LOG_LEVEL, "warn"));
    let handle = init_logger(&conf);
    assert!(handle.is_ok(), "Logger start failed");
    info!("Not printed");
    // Only one global logger per process.
    assert!(init_logger(&conf).is_err());
    drop(handle);
}
