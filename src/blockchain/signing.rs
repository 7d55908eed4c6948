// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Private key parsing.
//!
//! Keys are typed in by the user as hex, so the parser is lenient about
//! surrounding whitespace and a `0x` prefix, and strict about everything else.

use alloy::signers::local::PrivateKeySigner;
use k256::{ecdsa::SigningKey, SecretKey};

use crate::error::BridgeError;

/// Length of a secp256k1 private key in bytes.
const KEY_LEN: usize = 32;

/// Create a signer from a hex-encoded private key.
///
/// # Arguments
/// * `raw` - Hex private key, 64 characters, optional `0x` prefix
///
/// # Returns
/// * `Ok(PrivateKeySigner)` - A signer whose address is the sender for this run
/// * `Err(BridgeError::InvalidPrivateKey)` - Empty, non-hex, wrong length, or out of range
pub fn signer_from_key(raw: &str) -> Result<PrivateKeySigner, BridgeError> {
    let trimmed = raw.trim();
    let hex_part = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    if hex_part.is_empty() {
        return Err(BridgeError::InvalidPrivateKey("empty key".to_string()));
    }

    let key_bytes = alloy::hex::decode(hex_part)
        .map_err(|e| BridgeError::InvalidPrivateKey(e.to_string()))?;

    if key_bytes.len() != KEY_LEN {
        return Err(BridgeError::InvalidPrivateKey(format!(
            "expected {} bytes, got {}",
            KEY_LEN,
            key_bytes.len()
        )));
    }

    // Rejects zero and values >= the curve order.
    let secret = SecretKey::from_slice(&key_bytes).map_err(|_| {
        BridgeError::InvalidPrivateKey("not a valid secp256k1 scalar".to_string())
    })?;

    Ok(PrivateKeySigner::from_signing_key(SigningKey::from(secret)))
}
