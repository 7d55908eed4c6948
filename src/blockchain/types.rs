// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Blockchain result types and amount helpers.

use alloy::primitives::{TxHash, U256};

use crate::error::BridgeError;

/// Native token balance of the sender.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeBalance {
    /// Token symbol (e.g., "ETH")
    pub symbol: String,
    /// Number of decimals
    pub decimals: u8,
    /// Balance in base units
    pub raw: U256,
}

impl NativeBalance {
    /// Balance formatted with decimals.
    pub fn formatted(&self) -> String {
        format_amount(self.raw, self.decimals)
    }
}

impl std::fmt::Display for NativeBalance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.formatted(), self.symbol)
    }
}

/// Transaction send result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendResult {
    /// Transaction hash
    pub tx_hash: TxHash,
    /// Explorer URL for the transaction, when the chain lists an explorer
    pub explorer_url: Option<String>,
}

/// Transaction receipt after confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxReceipt {
    /// Block number where transaction was included
    pub block_number: u64,
    /// Gas actually used
    pub gas_used: u64,
    /// Whether the transaction was successful
    pub success: bool,
}

/// Parse a human-readable amount to base units.
///
/// # Arguments
/// * `amount` - Amount as a string (e.g., "0.05")
/// * `decimals` - Number of decimals (18 for ETH)
pub fn parse_amount(amount: &str, decimals: u8) -> Result<U256, BridgeError> {
    let amount = amount.trim();
    let parts: Vec<&str> = amount.split('.').collect();

    if amount.is_empty() || parts.len() > 2 {
        return Err(BridgeError::InvalidAmount(format!(
            "'{}' is not a number",
            amount
        )));
    }

    let whole_str = if parts[0].is_empty() { "0" } else { parts[0] };
    if !whole_str.chars().all(|c| c.is_ascii_digit()) {
        return Err(BridgeError::InvalidAmount("Invalid whole number".to_string()));
    }
    let whole = U256::from_str_radix(whole_str, 10)
        .map_err(|_| BridgeError::InvalidAmount("Invalid whole number".to_string()))?;

    let decimal_part = if parts.len() == 2 {
        let dec_str = parts[1];
        if dec_str.len() > decimals as usize {
            return Err(BridgeError::InvalidAmount(format!(
                "Too many decimal places (max {})",
                decimals
            )));
        }
        if !dec_str.chars().all(|c| c.is_ascii_digit()) {
            return Err(BridgeError::InvalidAmount("Invalid decimal".to_string()));
        }
        // Pad with zeros to match decimals
        let padded = format!("{:0<width$}", dec_str, width = decimals as usize);
        if padded.is_empty() {
            U256::ZERO
        } else {
            U256::from_str_radix(&padded, 10)
                .map_err(|_| BridgeError::InvalidAmount("Invalid decimal".to_string()))?
        }
    } else {
        U256::ZERO
    };

    let multiplier = U256::from(10u64).pow(U256::from(decimals));
    whole
        .checked_mul(multiplier)
        .and_then(|w| w.checked_add(decimal_part))
        .ok_or_else(|| BridgeError::InvalidAmount("Amount overflow".to_string()))
}

/// Format base units to a human-readable amount.
pub fn format_amount(amount: U256, decimals: u8) -> String {
    if amount.is_zero() {
        return "0".to_string();
    }

    let divisor = U256::from(10u64).pow(U256::from(decimals));
    let whole = amount / divisor;
    let remainder = amount % divisor;

    if remainder.is_zero() {
        whole.to_string()
    } else {
        let decimal_str = format!("{:0>width$}", remainder, width = decimals as usize);
        let trimmed = decimal_str.trim_end_matches('0');
        if trimmed.is_empty() {
            whole.to_string()
        } else {
            format!("{}.{}", whole, trimmed)
        }
    }
}
