// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Orbiter Bridge - interactive native-token bridging between EVM chains.
//!
//! The tool signs one `transfers` call to the Orbiter router on the source
//! chain. The destination is encoded in the transferred amount.
//!
//! ## Modules
//!
//! - `directory` - Static table of supported chains and their contracts
//! - `blockchain` - Signing RPC client, router ABI, amount helpers
//! - `bridge` - Amount composition and the bridge transfer itself
//! - `driver` - Interactive prompts and the run sequence
//! - `config` / `logging` - Environment configuration and log output

pub mod blockchain;
pub mod bridge;
pub mod config;
pub mod directory;
pub mod driver;
pub mod error;
pub mod logging;
