// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! JSON-RPC node for tests.
//!
//! A wiremock server that answers the handful of `eth_*` methods the bridge
//! flow uses. Received requests stay on the server, so tests can inspect the
//! call order and the raw transactions after a run.

use alloy::primitives::{keccak256, Address, Bloom, Bytes, B256, U256};
use serde_json::{json, Value};
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

/// How `eth_getTransactionReceipt` answers.
#[derive(Debug, Clone, Copy)]
pub enum ReceiptMode {
    /// Mined receipt with the given status
    Mined { success: bool },
    /// JSON-RPC error on every lookup
    Unavailable,
}

pub struct MockNode {
    server: MockServer,
}

impl MockNode {
    pub async fn start(balance: U256, receipt: ReceiptMode) -> Self {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(JsonRpc { balance, receipt })
            .mount(&server)
            .await;
        Self { server }
    }

    pub fn url(&self) -> String {
        self.server.uri()
    }

    /// JSON-RPC methods received, in order.
    pub async fn methods(&self) -> Vec<String> {
        self.calls()
            .await
            .iter()
            .map(|call| call["method"].as_str().unwrap_or_default().to_string())
            .collect()
    }

    /// Payloads of every `eth_sendRawTransaction`.
    pub async fn raw_transactions(&self) -> Vec<Bytes> {
        self.calls()
            .await
            .iter()
            .filter(|call| call["method"] == "eth_sendRawTransaction")
            .map(|call| call["params"][0].as_str().unwrap().parse().unwrap())
            .collect()
    }

    async fn calls(&self) -> Vec<Value> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .map(|request| request.body_json::<Value>().unwrap())
            .collect()
    }
}

struct JsonRpc {
    balance: U256,
    receipt: ReceiptMode,
}

impl Respond for JsonRpc {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let call: Value = request.body_json().unwrap_or(Value::Null);
        let id = call["id"].clone();

        let result = match call["method"].as_str().unwrap_or_default() {
            "eth_getBalance" => json!(self.balance),
            "eth_getTransactionCount" => json!("0x0"),
            "eth_chainId" => json!("0xa4b1"),
            "eth_getBlockByNumber" => latest_block(),
            "eth_maxPriorityFeePerGas" => json!("0x3b9aca00"),
            "eth_estimateGas" => json!("0x186a0"),
            "eth_sendRawTransaction" => {
                let raw: Bytes = call["params"][0]
                    .as_str()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_default();
                json!(keccak256(&raw))
            }
            "eth_getTransactionReceipt" => match self.receipt {
                ReceiptMode::Mined { success } => receipt(call["params"][0].clone(), success),
                ReceiptMode::Unavailable => {
                    return rpc_error(id, -32000, "receipt backend unavailable");
                }
            },
            _ => return rpc_error(id, -32601, "method not found"),
        };

        ResponseTemplate::new(200)
            .set_body_json(json!({ "jsonrpc": "2.0", "id": id, "result": result }))
    }
}

fn rpc_error(id: Value, code: i64, message: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "jsonrpc": "2.0",
        "id": id,
        "error": { "code": code, "message": message }
    }))
}

fn latest_block() -> Value {
    json!({
        "hash": B256::repeat_byte(0x11),
        "parentHash": B256::ZERO,
        "sha3Uncles": B256::ZERO,
        "miner": Address::ZERO,
        "stateRoot": B256::ZERO,
        "transactionsRoot": B256::ZERO,
        "receiptsRoot": B256::ZERO,
        "logsBloom": Bloom::ZERO,
        "difficulty": "0x0",
        "number": "0x10",
        "gasLimit": "0x1c9c380",
        "gasUsed": "0x0",
        "timestamp": "0x6553f100",
        "extraData": "0x",
        "mixHash": B256::ZERO,
        "nonce": "0x0000000000000000",
        "baseFeePerGas": "0x3b9aca00",
        "uncles": [],
        "transactions": []
    })
}

fn receipt(tx_hash: Value, success: bool) -> Value {
    json!({
        "type": "0x2",
        "status": if success { "0x1" } else { "0x0" },
        "cumulativeGasUsed": "0x15f90",
        "logs": [],
        "logsBloom": Bloom::ZERO,
        "transactionHash": tx_hash,
        "transactionIndex": "0x0",
        "blockHash": B256::repeat_byte(0x22),
        "blockNumber": "0x11",
        "gasUsed": "0x15f90",
        "effectiveGasPrice": "0x77359400",
        "from": Address::ZERO,
        "to": Address::ZERO,
        "contractAddress": null
    })
}
