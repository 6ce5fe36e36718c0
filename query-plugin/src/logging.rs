// SPDX-FileCopyrightText: 2024 Rot127 <unisono@quyllur.org>
// SPDX-License-Identifier: LGPL-3.0-only

use flexi_logger::{Duplicate, FileSpec, FlexiLoggerError, Logger, LoggerHandle};

use crate::config::PluginConfig;

/// Starts the global logger with the settings in [conf].
/// The returned handle must be kept alive as long as logging is needed.
/// With a log specification file the level is read from it and
/// changes to the file take effect while running.
/// It fails if a logger was started before.
pub fn init_logger(conf: &PluginConfig) -> Result<LoggerHandle, FlexiLoggerError> {
    let logger = Logger::try_with_str(conf.get_log_level())?;
    let logger = if conf.get_log_to_file() {
        logger
            .log_to_file(FileSpec::default().directory(conf.get_log_dir()))
            .duplicate_to_stderr(Duplicate::Warn)
    } else {
        logger.log_to_stderr()
    };
    match conf.get_log_spec_file() {
        Some(specfile) => logger.start_with_specfile(specfile),
        None => logger.start(),
    }
}
