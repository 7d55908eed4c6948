// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Error type shared by every bridging step.

/// Errors that can occur while preparing or executing a bridge transfer.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("Selection invalid: {0}")]
    SelectionInvalid(String),

    #[error("Contract {contract} not found on {chain}")]
    ContractNotFound { chain: String, contract: String },

    #[error("No internal chain identifier for {0}")]
    MissingInternalId(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Insufficient balance: requested {requested}, available {available}")]
    InsufficientBalance { requested: String, available: String },

    #[error("Invalid RPC URL: {0}")]
    InvalidRpcUrl(String),

    #[error("Invalid proxy: {0}")]
    InvalidProxy(String),

    #[error("RPC error: {0}")]
    Rpc(String),

    #[error("Error creating transaction: {0}")]
    TransactionBuild(String),

    #[error("Transaction submission failed: {0}")]
    Submit(String),

    #[error("Prompt failed: {0}")]
    Prompt(String),

    #[error("Chain directory error: {0}")]
    Directory(String),
}

impl From<dialoguer::Error> for BridgeError {
    fn from(e: dialoguer::Error) -> Self {
        BridgeError::Prompt(e.to_string())
    }
}
