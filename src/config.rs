// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! The tool defines no command-line flags. Everything optional is read from
//! the environment at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `ORBITER_PROXY` | HTTP proxy for the RPC transport (`host:port` or URL) | none |
//! | `ORBITER_CHAINS_FILE` | JSON chain directory replacing the embedded one | embedded |
//! | `ORBITER_LOG_FILE` | File that receives a copy of every log line | `orbiter.log` |
//! | `RUST_LOG` | Log level filter | `info` |

use std::path::PathBuf;

/// Environment variable name for the optional RPC proxy.
pub const PROXY_ENV: &str = "ORBITER_PROXY";

/// Environment variable name for an external chain directory file.
pub const CHAINS_FILE_ENV: &str = "ORBITER_CHAINS_FILE";

/// Environment variable name for the log file path.
pub const LOG_FILE_ENV: &str = "ORBITER_LOG_FILE";

/// Default log file, relative to the working directory.
pub const DEFAULT_LOG_FILE: &str = "orbiter.log";

/// Configuration resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Proxy address for the RPC transport, as given by the user.
    pub proxy: Option<String>,
    /// Chain directory file; `None` means the embedded directory.
    pub chains_file: Option<PathBuf>,
    /// Log file path.
    pub log_file: PathBuf,
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary lookup function.
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Self {
            proxy: get(PROXY_ENV),
            chains_file: get(CHAINS_FILE_ENV).map(PathBuf::from),
            log_file: get(LOG_FILE_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE)),
        }
    }
}
