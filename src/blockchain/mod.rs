// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! EVM chain integration.
//!
//! This module provides functionality for:
//! - Deriving the sender from a private key
//! - Querying the native balance
//! - Encoding the Orbiter router `transfers` call
//! - Transaction preparation, signing and broadcasting

pub mod client;
#[cfg(test)]
pub(crate) mod mock_node;
pub mod router;
pub mod signing;
pub mod types;

pub use client::ChainClient;
pub use types::*;
