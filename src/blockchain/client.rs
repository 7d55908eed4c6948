// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Chain client: one signing RPC connection to the source chain.

use std::time::Duration;

use alloy::{
    eips::BlockNumberOrTag,
    network::{Ethereum, EthereumWallet},
    primitives::{Address, TxHash, U256},
    providers::{
        fillers::{
            BlobGasFiller, ChainIdFiller, FillProvider, GasFiller, JoinFill, NonceFiller,
            WalletFiller,
        },
        Identity, Provider, ProviderBuilder, RootProvider,
    },
    rpc::{client::RpcClient, types::TransactionRequest},
    transports::http::Http,
};

use super::signing::signer_from_key;
use super::types::{NativeBalance, SendResult, TxReceipt};
use crate::directory::ChainDescriptor;
use crate::error::BridgeError;

/// HTTP provider type with all fillers and a local wallet.
type HttpProvider = FillProvider<
    JoinFill<
        JoinFill<
            Identity,
            JoinFill<GasFiller, JoinFill<BlobGasFiller, JoinFill<NonceFiller, ChainIdFiller>>>,
        >,
        WalletFiller<EthereumWallet>,
    >,
    RootProvider<Ethereum>,
>;

/// Priority fee used when the node does not answer `eth_maxPriorityFeePerGas`.
const DEFAULT_PRIORITY_FEE: u128 = 1_000_000; // 0.001 gwei

/// Base fee assumed for chains whose blocks carry none.
const DEFAULT_BASE_FEE: u128 = 1_000_000_000; // 1 gwei

/// Receipt polling cadence.
const RECEIPT_POLL_INTERVAL: Duration = Duration::from_secs(3);

/// Receipt polls before giving up on confirmation.
const RECEIPT_MAX_POLLS: u32 = 60;

/// Signing client for a single chain.
pub struct ChainClient {
    /// Chain metadata
    chain: ChainDescriptor,
    /// Sender address, derived once from the private key
    address: Address,
    /// Alloy HTTP provider with wallet
    provider: HttpProvider,
}

impl ChainClient {
    /// Create a client for `chain`, signing with `private_key`.
    ///
    /// The key is parsed before any transport is built, so an invalid key
    /// never opens a connection.
    ///
    /// # Arguments
    /// * `private_key` - Hex private key as typed by the user
    /// * `chain` - Source chain descriptor; its first RPC endpoint is used
    /// * `proxy` - Optional HTTP proxy (`host:port` or URL)
    pub fn connect(
        private_key: &str,
        chain: ChainDescriptor,
        proxy: Option<&str>,
    ) -> Result<Self, BridgeError> {
        let signer = signer_from_key(private_key).inspect_err(|e| {
            tracing::error!("{}", e);
        })?;
        let address = signer.address();

        let rpc_url = chain
            .primary_rpc()
            .ok_or_else(|| BridgeError::InvalidRpcUrl(format!("{} has no RPC endpoint", chain.name)))?;
        let url: url::Url = rpc_url
            .parse()
            .map_err(|e: url::ParseError| BridgeError::InvalidRpcUrl(e.to_string()))?;

        let transport = Http::with_client(build_http_client(proxy)?, url);
        let is_local = transport.guess_local();
        let client = RpcClient::new(transport, is_local);

        let provider = ProviderBuilder::new()
            .wallet(EthereumWallet::from(signer))
            .connect_client(client);

        tracing::debug!(chain = %chain.name, rpc = %rpc_url, proxied = proxy.is_some(), "RPC transport ready");

        Ok(Self {
            chain,
            address,
            provider,
        })
    }

    /// Sender address.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Chain metadata.
    pub fn chain(&self) -> &ChainDescriptor {
        &self.chain
    }

    /// Native balance of the sender.
    pub async fn get_balance(&self) -> Result<NativeBalance, BridgeError> {
        let raw = self
            .provider
            .get_balance(self.address)
            .await
            .map_err(|e| BridgeError::Rpc(e.to_string()))?;

        Ok(NativeBalance {
            symbol: self.chain.symbol().to_string(),
            decimals: self.chain.native_currency.decimals,
            raw,
        })
    }

    /// Populate sender, value, chain id, nonce and EIP-1559 fee fields.
    pub async fn prepare_tx(&self, value: U256) -> Result<TransactionRequest, BridgeError> {
        let nonce = self
            .provider
            .get_transaction_count(self.address)
            .await
            .map_err(|e| BridgeError::Rpc(format!("Failed to get nonce: {}", e)))?;

        let chain_id = match self.chain.evm_chain_id() {
            Some(id) => id,
            None => self
                .provider
                .get_chain_id()
                .await
                .map_err(|e| BridgeError::Rpc(format!("Failed to get chain id: {}", e)))?,
        };

        let (max_fee_per_gas, max_priority_fee_per_gas) = self.get_gas_prices().await?;

        let mut tx = TransactionRequest::default()
            .from(self.address)
            .value(value)
            .nonce(nonce)
            .max_fee_per_gas(max_fee_per_gas)
            .max_priority_fee_per_gas(max_priority_fee_per_gas);
        tx.chain_id = Some(chain_id);

        Ok(tx)
    }

    /// Estimate the gas limit of a fully built transaction.
    pub async fn estimate_gas(&self, tx: &TransactionRequest) -> Result<u64, BridgeError> {
        self.provider
            .estimate_gas(tx.clone())
            .await
            .map_err(|e| BridgeError::Rpc(format!("Gas estimation failed: {}", e)))
    }

    /// Current (max fee, priority fee) pair.
    async fn get_gas_prices(&self) -> Result<(u128, u128), BridgeError> {
        let block = self
            .provider
            .get_block_by_number(BlockNumberOrTag::Latest)
            .await
            .map_err(|e| BridgeError::Rpc(format!("Failed to get block: {}", e)))?
            .ok_or_else(|| BridgeError::Rpc("No latest block".to_string()))?;

        let priority_fee = match self.provider.get_max_priority_fee_per_gas().await {
            Ok(fee) => fee,
            Err(e) => {
                tracing::warn!(error = %e, "Priority fee unavailable, using default");
                DEFAULT_PRIORITY_FEE
            }
        };

        Ok(fee_caps(block.header.base_fee_per_gas, priority_fee))
    }

    /// Sign and broadcast a transaction.
    pub async fn send_transaction(
        &self,
        tx: TransactionRequest,
    ) -> Result<SendResult, BridgeError> {
        let pending = self
            .provider
            .send_transaction(tx)
            .await
            .map_err(|e| BridgeError::Submit(e.to_string()))?;

        let tx_hash = *pending.tx_hash();
        let explorer_url = self.chain.tx_url(&tx_hash.to_string());

        Ok(SendResult {
            tx_hash,
            explorer_url,
        })
    }

    /// Poll for a receipt until it appears or the poll budget runs out.
    ///
    /// Returns `Ok(None)` when the transaction is still pending at the end.
    pub async fn wait_for_receipt(&self, tx_hash: TxHash) -> Result<Option<TxReceipt>, BridgeError> {
        for _ in 0..RECEIPT_MAX_POLLS {
            let receipt = self
                .provider
                .get_transaction_receipt(tx_hash)
                .await
                .map_err(|e| BridgeError::Rpc(format!("Failed to get receipt: {}", e)))?;

            if let Some(r) = receipt {
                return Ok(Some(TxReceipt {
                    block_number: r.block_number.unwrap_or(0),
                    gas_used: r.gas_used,
                    success: r.status(),
                }));
            }

            tokio::time::sleep(RECEIPT_POLL_INTERVAL).await;
        }

        Ok(None)
    }
}

/// Reqwest client for the RPC transport, optionally proxied.
fn build_http_client(proxy: Option<&str>) -> Result<reqwest::Client, BridgeError> {
    let mut builder = reqwest::Client::builder();

    if let Some(proxy) = proxy {
        let proxy_url = normalize_proxy(proxy);
        let proxy = reqwest::Proxy::all(&proxy_url)
            .map_err(|e| BridgeError::InvalidProxy(format!("{}: {}", proxy_url, e)))?;
        builder = builder.proxy(proxy);
    }

    builder
        .build()
        .map_err(|e| BridgeError::InvalidProxy(e.to_string()))
}

/// `host:port` becomes `http://host:port`; URLs with a scheme pass through.
fn normalize_proxy(proxy: &str) -> String {
    let proxy = proxy.trim();
    if proxy.contains("://") {
        proxy.to_string()
    } else {
        format!("http://{}", proxy)
    }
}

/// Max fee = 2 * base_fee + priority_fee (allows for base fee increase).
fn fee_caps(base_fee: Option<u64>, priority_fee: u128) -> (u128, u128) {
    let base_fee = base_fee.map(u128::from).unwrap_or(DEFAULT_BASE_FEE);
    let max_fee = base_fee.saturating_mul(2).saturating_add(priority_fee);
    (max_fee, priority_fee)
}
