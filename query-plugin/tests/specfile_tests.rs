// SPDX-FileCopyrightText: 2024 Rot127 <unisono@quyllur.org>
// SPDX-License-Identifier: LGPL-3.0-only

use query_plugin::{
    config::{PluginConfig, CONF_LOG_SPEC_FILE},
    logging::init_logger,
};

#[test]
fn test_init_logger_with_specfile() {
    let dir = std::env::temp_dir().join(format!("pointsto_logspec_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let specfile = dir.join("logspec.toml");
    let _ = std::fs::remove_file(&specfile);

    let mut conf = PluginConfig::new();
    assert!(conf.set(CONF_LOG_SPEC_FILE, specfile.to_str().unwrap()));
    let handle = init_logger(&conf);
    assert!(handle.is_ok(), "Logger start with spec file failed");
    // A missing spec file is created with the configured level.
    assert!(specfile.exists(), "Spec file was not created");
    drop(handle);
    let _ = std::fs::remove_dir_all(&dir);
}
