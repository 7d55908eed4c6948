// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Network directory: the read-only table of chains the bridge supports.
//!
//! The default table is compiled into the binary. An external file in the
//! same format can replace it (see `ORBITER_CHAINS_FILE`).

pub mod types;

use std::path::Path;

pub use types::*;

use crate::error::BridgeError;

const EMBEDDED_CHAINS: &str = include_str!("chains.json");

/// Supported chains, in display order.
#[derive(Debug, Clone)]
pub struct NetworkDirectory {
    chains: Vec<ChainDescriptor>,
}

impl NetworkDirectory {
    /// The directory shipped with the binary.
    pub fn embedded() -> Result<Self, BridgeError> {
        Self::from_json(EMBEDDED_CHAINS)
    }

    /// Load a directory file from disk.
    pub fn load(path: &Path) -> Result<Self, BridgeError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            BridgeError::Directory(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json(&raw)
    }

    /// Parse and validate a directory document.
    pub fn from_json(raw: &str) -> Result<Self, BridgeError> {
        let chains: Vec<ChainDescriptor> =
            serde_json::from_str(raw).map_err(|e| BridgeError::Directory(e.to_string()))?;

        if chains.is_empty() {
            return Err(BridgeError::Directory("no chains configured".to_string()));
        }
        if let Some(chain) = chains.iter().find(|c| c.rpc.is_empty()) {
            return Err(BridgeError::Directory(format!(
                "{} has no RPC endpoint",
                chain.name
            )));
        }

        Ok(Self { chains })
    }

    /// All chains, in display order.
    pub fn chains(&self) -> &[ChainDescriptor] {
        &self.chains
    }

    /// Chain at a selection index.
    pub fn get(&self, index: usize) -> Result<&ChainDescriptor, BridgeError> {
        self.chains.get(index).ok_or_else(|| {
            BridgeError::SelectionInvalid(format!(
                "index {} out of range (0..{})",
                index,
                self.chains.len()
            ))
        })
    }

    /// Chain by name, case-insensitive.
    pub fn find(&self, name: &str) -> Result<&ChainDescriptor, BridgeError> {
        let wanted = name.trim();
        self.chains
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(wanted))
            .ok_or_else(|| BridgeError::SelectionInvalid(format!("unknown network '{}'", wanted)))
    }

    /// Display labels for an interactive picker.
    pub fn labels(&self) -> Vec<String> {
        self.chains.iter().map(|c| c.to_string()).collect()
    }
}
