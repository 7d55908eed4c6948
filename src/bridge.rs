// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Bridge operation: one `transfers` call to the source chain's router.
//!
//! The router has no destination parameter. The destination is read from the
//! low-order digits of the transferred amount, so the amount actually sent is
//! `requested + 9000 + destination internal id`.

use alloy::primitives::{Address, U256};

use crate::blockchain::router::build_transfers_request;
use crate::blockchain::{ChainClient, SendResult, TxReceipt};
use crate::directory::ChainDescriptor;
use crate::error::BridgeError;

/// Fixed offset added to every transfer amount.
pub const ROUTING_OFFSET: u64 = 9000;

/// `requested + 9000 + internal_id`.
pub fn compose_amount(requested: U256, internal_id: u64) -> Result<U256, BridgeError> {
    requested
        .checked_add(U256::from(ROUTING_OFFSET))
        .and_then(|a| a.checked_add(U256::from(internal_id)))
        .ok_or_else(|| BridgeError::InvalidAmount("Amount overflow".to_string()))
}

/// A transfer ready to be submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeRequest {
    /// Recipient on the destination chain; always the sender itself
    pub recipient: Address,
    /// Amount in base units, destination already encoded
    pub amount: U256,
    /// Destination chain name, for logging
    pub destination: String,
}

impl BridgeRequest {
    /// Compose the request for `requested` base units to `destination`.
    ///
    /// Fails with `MissingInternalId` when the destination has no identifier.
    pub fn compose(
        sender: Address,
        requested: U256,
        destination: &ChainDescriptor,
    ) -> Result<Self, BridgeError> {
        let internal_id = destination.internal_id()?;
        Ok(Self {
            recipient: sender,
            amount: compose_amount(requested, internal_id)?,
            destination: destination.name.clone(),
        })
    }
}

/// Result of a submitted bridge transfer.
#[derive(Debug, Clone)]
pub struct BridgeOutcome {
    pub source: String,
    pub destination: String,
    pub amount: U256,
    pub sent: SendResult,
    /// `None` when the transaction was still pending after polling
    pub receipt: Option<TxReceipt>,
}

/// Executes bridge transfers from one source chain.
pub struct Bridge<'a> {
    client: &'a ChainClient,
}

impl<'a> Bridge<'a> {
    pub fn new(client: &'a ChainClient) -> Self {
        Self { client }
    }

    /// Build, sign, broadcast and await one `transfers` call.
    pub async fn execute(&self, request: &BridgeRequest) -> Result<BridgeOutcome, BridgeError> {
        let source = self.client.chain();

        let router = source.router_address().inspect_err(|e| {
            tracing::error!(chain = %source.name, "{}", e);
        })?;

        let tx = self.build(router, request).await.inspect_err(|e| {
            tracing::error!("{}", e);
        })?;

        tracing::info!(
            from = %source.name,
            to = %request.destination,
            router = %router,
            amount = %request.amount,
            "Submitting bridge transfer"
        );

        let sent = self.client.send_transaction(tx).await?;
        match &sent.explorer_url {
            Some(url) => tracing::info!("Transaction sent: {}", url),
            None => tracing::info!("Transaction sent: {}", sent.tx_hash),
        }

        // The transfer is already broadcast; a failed lookup leaves it pending.
        let receipt = match self.client.wait_for_receipt(sent.tx_hash).await {
            Ok(receipt) => receipt,
            Err(e) => {
                tracing::warn!(tx = %sent.tx_hash, error = %e, "Receipt lookup failed");
                None
            }
        };
        match &receipt {
            Some(r) if !r.success => {
                return Err(BridgeError::Submit(format!(
                    "transaction {} reverted in block {}",
                    sent.tx_hash, r.block_number
                )));
            }
            Some(r) => tracing::info!(
                block = r.block_number,
                gas_used = r.gas_used,
                "Transaction confirmed"
            ),
            None => tracing::warn!(tx = %sent.tx_hash, "Transaction not confirmed yet"),
        }

        Ok(BridgeOutcome {
            source: source.name.clone(),
            destination: request.destination.clone(),
            amount: request.amount,
            sent,
            receipt,
        })
    }

    /// Prepared router call with its gas limit; every failure is `TransactionBuild`.
    async fn build(
        &self,
        router: Address,
        request: &BridgeRequest,
    ) -> Result<alloy::rpc::types::TransactionRequest, BridgeError> {
        let base = self
            .client
            .prepare_tx(request.amount)
            .await
            .map_err(|e| BridgeError::TransactionBuild(e.to_string()))?;

        let tx = build_transfers_request(base, router, request.recipient, request.amount);

        let gas_limit = self
            .client
            .estimate_gas(&tx)
            .await
            .map_err(|e| BridgeError::TransactionBuild(e.to_string()))?;

        Ok(tx.gas_limit(gas_limit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::mock_node::{MockNode, ReceiptMode};
    use crate::blockchain::router::IOrbiterRouterV3;
    use crate::directory::types::fixtures::chain;
    use alloy::consensus::{Transaction, TxEnvelope};
    use alloy::eips::eip2718::Decodable2718;
    use alloy::primitives::{keccak256, TxKind};
    use alloy::rpc::types::TransactionRequest;
    use alloy::sol_types::SolCall;
    use std::str::FromStr;

    const TEST_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const ROUTER: &str = "0x13e46b2a3f8512ed4682a8fb8b560589fe3c2172";

    fn sender() -> Address {
        Address::from_str("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266").unwrap()
    }

    #[test]
    fn composition_adds_offset_and_internal_id() {
        assert_eq!(
            compose_amount(U256::from(1_000_000u64), 5).unwrap(),
            U256::from(1_009_005u64)
        );
        assert_eq!(
            compose_amount(U256::from(500u64), 2).unwrap(),
            U256::from(9502u64)
        );
    }

    #[test]
    fn composition_overflow_is_rejected() {
        assert!(matches!(
            compose_amount(U256::MAX, 1),
            Err(BridgeError::InvalidAmount(_))
        ));
    }

    #[test]
    fn request_targets_sender_itself() {
        let destination = chain("Arbitrum", Some(2), Some(ROUTER));
        let request = BridgeRequest::compose(sender(), U256::from(500u64), &destination).unwrap();

        assert_eq!(request.recipient, sender());
        assert_eq!(request.amount, U256::from(9502u64));
        assert_eq!(request.destination, "Arbitrum");
    }

    #[test]
    fn destination_without_internal_id_aborts() {
        let destination = chain("Mystery", None, Some(ROUTER));
        assert!(matches!(
            BridgeRequest::compose(sender(), U256::from(500u64), &destination),
            Err(BridgeError::MissingInternalId(name)) if name == "Mystery"
        ));
    }

    #[test]
    fn transfers_request_call_shape() {
        let source = chain("Optimism", Some(7), Some(ROUTER));
        let destination = chain("Arbitrum", Some(2), Some(ROUTER));
        let request = BridgeRequest::compose(sender(), U256::from(500u64), &destination).unwrap();

        let router = source.router_address().unwrap();
        let tx = build_transfers_request(
            TransactionRequest::default(),
            router,
            request.recipient,
            request.amount,
        );

        assert_eq!(tx.to, Some(TxKind::Call(router)));
        let call = IOrbiterRouterV3::transfersCall::abi_decode(tx.input.input().unwrap()).unwrap();
        assert_eq!(call.tos, vec![sender()]);
        assert_eq!(call.values, vec![U256::from(9502u64)]);
    }

    #[tokio::test]
    async fn missing_router_fails_before_any_rpc() {
        // The RPC endpoint is unreachable: reaching it would surface as a
        // TransactionBuild error instead.
        let mut source = chain("zkSync Era", Some(14), None);
        source.rpc = vec!["http://127.0.0.1:1".to_string()];
        let client = ChainClient::connect(TEST_KEY, source, None).unwrap();

        let destination = chain("Arbitrum", Some(2), Some(ROUTER));
        let request = BridgeRequest::compose(client.address(), U256::from(500u64), &destination).unwrap();

        let result = Bridge::new(&client).execute(&request).await;
        assert!(matches!(result, Err(BridgeError::ContractNotFound { .. })));
    }

    #[tokio::test]
    async fn rpc_failure_while_building_is_transaction_build() {
        let mut source = chain("Optimism", Some(7), Some(ROUTER));
        source.rpc = vec!["http://127.0.0.1:1".to_string()];
        let client = ChainClient::connect(TEST_KEY, source, None).unwrap();

        let destination = chain("Arbitrum", Some(2), Some(ROUTER));
        let request = BridgeRequest::compose(client.address(), U256::from(500u64), &destination).unwrap();

        let result = Bridge::new(&client).execute(&request).await;
        assert!(matches!(result, Err(BridgeError::TransactionBuild(_))));
    }

    fn client_on(node: &MockNode) -> ChainClient {
        let mut source = chain("Optimism", Some(7), Some(ROUTER));
        source.rpc = vec![node.url()];
        ChainClient::connect(TEST_KEY, source, None).unwrap()
    }

    fn request_to_arbitrum(client: &ChainClient) -> BridgeRequest {
        let destination = chain("Arbitrum", Some(2), Some(ROUTER));
        BridgeRequest::compose(client.address(), U256::from(500u64), &destination).unwrap()
    }

    #[tokio::test]
    async fn execute_broadcasts_signed_transfers_call() {
        let node = MockNode::start(U256::from(1_000_000u64), ReceiptMode::Mined { success: true }).await;
        let client = client_on(&node);
        let request = request_to_arbitrum(&client);

        let outcome = Bridge::new(&client).execute(&request).await.unwrap();

        let raw = node.raw_transactions().await;
        assert_eq!(raw.len(), 1);
        let mut encoded: &[u8] = &raw[0];
        let envelope = TxEnvelope::decode_2718(&mut encoded).unwrap();

        assert_eq!(envelope.to(), Some(Address::from_str(ROUTER).unwrap()));
        assert_eq!(envelope.value(), U256::from(9502u64));
        assert_eq!(envelope.chain_id(), Some(42161));
        let call = IOrbiterRouterV3::transfersCall::abi_decode(envelope.input()).unwrap();
        assert_eq!(call.tos, vec![sender()]);
        assert_eq!(call.values, vec![U256::from(9502u64)]);

        assert_eq!(outcome.sent.tx_hash, keccak256(&raw[0]));
        assert_eq!(outcome.amount, U256::from(9502u64));
        assert_eq!(outcome.destination, "Arbitrum");
        assert!(outcome.receipt.unwrap().success);

        let methods = node.methods().await;
        let sent_at = methods.iter().position(|m| m == "eth_sendRawTransaction").unwrap();
        assert_eq!(methods[sent_at + 1], "eth_getTransactionReceipt");
    }

    #[tokio::test]
    async fn receipt_lookup_failure_after_broadcast_is_not_an_error() {
        let node = MockNode::start(U256::from(1_000_000u64), ReceiptMode::Unavailable).await;
        let client = client_on(&node);
        let request = request_to_arbitrum(&client);

        let outcome = Bridge::new(&client).execute(&request).await.unwrap();

        assert_eq!(node.raw_transactions().await.len(), 1);
        assert!(node.methods().await.contains(&"eth_getTransactionReceipt".to_string()));
        assert!(outcome.receipt.is_none());
        assert_eq!(outcome.sent.tx_hash, keccak256(&node.raw_transactions().await[0]));
    }

    #[tokio::test]
    async fn reverted_receipt_is_submit_error() {
        let node = MockNode::start(U256::from(1_000_000u64), ReceiptMode::Mined { success: false }).await;
        let client = client_on(&node);
        let request = request_to_arbitrum(&client);

        let result = Bridge::new(&client).execute(&request).await;
        assert!(matches!(result, Err(BridgeError::Submit(msg)) if msg.contains("reverted")));
    }
}
