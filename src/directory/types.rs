// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Chain descriptor types, in the bridge protocol's published JSON layout.

use std::str::FromStr;

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};

use crate::error::BridgeError;

/// Name under which the router is listed in a chain's contracts.
pub const ROUTER_CONTRACT: &str = "OrbiterRouterV3";

/// Native currency metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeCurrency {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

/// A contract deployed on a chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractEntry {
    pub name: String,
    pub address: String,
    /// ABI reference, when the directory publishes one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abi: Option<String>,
}

/// Static description of one supported network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainDescriptor {
    /// Display name
    pub name: String,
    /// Native network identifier, as published (not always numeric)
    pub chain_id: String,
    /// Bridge-protocol identifier encoded into transfer amounts
    #[serde(default)]
    pub internal_id: Option<u64>,
    pub native_currency: NativeCurrency,
    /// RPC endpoints, preferred first
    #[serde(default)]
    pub rpc: Vec<String>,
    /// Block explorers, preferred first
    #[serde(default)]
    pub explorers: Vec<String>,
    #[serde(default)]
    pub contracts: Vec<ContractEntry>,
}

impl ChainDescriptor {
    /// Native token symbol.
    pub fn symbol(&self) -> &str {
        &self.native_currency.symbol
    }

    /// Numeric EVM chain id, if the published identifier is one.
    pub fn evm_chain_id(&self) -> Option<u64> {
        self.chain_id.parse().ok()
    }

    /// First configured RPC endpoint.
    pub fn primary_rpc(&self) -> Option<&str> {
        self.rpc.first().map(String::as_str)
    }

    /// First configured block explorer.
    pub fn primary_explorer(&self) -> Option<&str> {
        self.explorers.first().map(String::as_str)
    }

    /// Explorer link for a transaction hash.
    pub fn tx_url(&self, tx_hash: &str) -> Option<String> {
        self.primary_explorer()
            .map(|explorer| format!("{}/tx/{}", explorer.trim_end_matches('/'), tx_hash))
    }

    /// Look up a deployed contract by exact name.
    pub fn contract(&self, name: &str) -> Option<&ContractEntry> {
        self.contracts.iter().find(|c| c.name == name)
    }

    /// Address of the bridge router on this chain.
    pub fn router_address(&self) -> Result<Address, BridgeError> {
        let entry = self
            .contract(ROUTER_CONTRACT)
            .ok_or_else(|| BridgeError::ContractNotFound {
                chain: self.name.clone(),
                contract: ROUTER_CONTRACT.to_string(),
            })?;

        Address::from_str(&entry.address).map_err(|e| {
            BridgeError::Directory(format!(
                "bad {} address on {}: {}",
                ROUTER_CONTRACT, self.name, e
            ))
        })
    }

    /// Bridge-protocol identifier; zero counts as absent.
    pub fn internal_id(&self) -> Result<u64, BridgeError> {
        match self.internal_id {
            Some(id) if id != 0 => Ok(id),
            _ => Err(BridgeError::MissingInternalId(self.name.clone())),
        }
    }
}

impl std::fmt::Display for ChainDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.symbol())
    }
}
