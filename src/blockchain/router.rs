// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Orbiter router contract interactions.

use alloy::{
    primitives::{Address, U256},
    rpc::types::TransactionRequest,
    sol,
    sol_types::SolCall,
};

// Define the router interface using alloy's sol! macro
sol! {
    #[sol(rpc)]
    interface IOrbiterRouterV3 {
        function transfers(address[] calldata tos, uint256[] calldata values) external payable;
    }
}

/// Encode `transfers([recipient], [amount])`.
///
/// The router only exposes the batched entry point; a single transfer is a
/// batch of one.
pub fn transfers_calldata(recipient: Address, amount: U256) -> Vec<u8> {
    IOrbiterRouterV3::transfersCall {
        tos: vec![recipient],
        values: vec![amount],
    }
    .abi_encode()
}

/// Turn a prepared transaction into the router call.
///
/// The native value sent with the call equals the transferred amount.
pub fn build_transfers_request(
    base: TransactionRequest,
    router: Address,
    recipient: Address,
    amount: U256,
) -> TransactionRequest {
    base.to(router)
        .value(amount)
        .input(transfers_calldata(recipient, amount).into())
}
