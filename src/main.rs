// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::process::ExitCode;

use orbiter_bridge::{
    config::AppConfig,
    directory::NetworkDirectory,
    driver::{report, Driver, TerminalPrompter},
    logging::{build_dispatch, LogConfig},
};

#[tokio::main]
async fn main() -> ExitCode {
    let config = AppConfig::from_env();

    let log = match build_dispatch(&LogConfig {
        file: config.log_file.clone(),
        filter: None,
    }) {
        Ok(log) => log,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = tracing::dispatcher::set_global_default(log.dispatch.clone()) {
        eprintln!("Failed to install logger: {e}");
        return ExitCode::FAILURE;
    }

    let directory = match &config.chains_file {
        Some(path) => NetworkDirectory::load(path),
        None => NetworkDirectory::embedded(),
    };
    let directory = match directory {
        Ok(directory) => directory,
        Err(e) => {
            tracing::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut driver = Driver::new(directory, config.proxy.clone(), TerminalPrompter::default());

    let result = driver.run().await;
    ExitCode::from(report(&result))
}
