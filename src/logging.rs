// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Log output to the terminal and a log file.
//!
//! The subscriber is returned as an explicit [`Dispatch`] instead of being
//! installed globally, so callers decide its scope. `main` installs it for
//! the whole process; tests use `tracing::dispatcher::with_default`.

use std::path::{Path, PathBuf};

use tracing::Dispatch;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt;
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::EnvFilter;

use crate::error::BridgeError;

/// Logging settings.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// File that receives a copy of every line (appended).
    pub file: PathBuf,
    /// Explicit filter directive; `None` reads `RUST_LOG` and falls back to `info`.
    pub filter: Option<String>,
}

/// A built subscriber plus the guard that flushes the file writer on drop.
pub struct LogHandle {
    pub dispatch: Dispatch,
    _file_guard: WorkerGuard,
}

/// Build the terminal + file subscriber.
pub fn build_dispatch(config: &LogConfig) -> Result<LogHandle, BridgeError> {
    let env_filter = match &config.filter {
        Some(directive) => EnvFilter::new(directive),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    let file = open_log_file(&config.file)?;
    let (file_writer, guard) = tracing_appender::non_blocking(file);
    let writer = BoxMakeWriter::new(std::io::stdout.and(file_writer));

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_ansi(false)
        .with_writer(writer);

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer);

    Ok(LogHandle {
        dispatch: Dispatch::new(subscriber),
        _file_guard: guard,
    })
}

fn open_log_file(path: &Path) -> Result<std::fs::File, BridgeError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| {
                BridgeError::Directory(format!("cannot create {}: {}", parent.display(), e))
            })?;
        }
    }

    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| BridgeError::Directory(format!("cannot open {}: {}", path.display(), e)))
}
