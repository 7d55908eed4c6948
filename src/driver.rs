// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Interactive driver.
//!
//! One linear pass: key, source chain, balance, amount, destination chain,
//! amount composition, bridge. Any error ends the run; nothing is retried.

use alloy::primitives::U256;
use dialoguer::{theme::ColorfulTheme, Input, Password, Select};

use crate::blockchain::{parse_amount, ChainClient, NativeBalance};
use crate::bridge::{Bridge, BridgeOutcome, BridgeRequest};
use crate::directory::NetworkDirectory;
use crate::error::BridgeError;

pub const SOURCE_PROMPT: &str = "Select the network from which the native token will be bridged";
pub const DESTINATION_PROMPT: &str = "Select the network to which the native token will be bridged";

/// Source of user input.
pub trait Prompter {
    /// Private key, as typed.
    fn private_key(&mut self) -> Result<String, BridgeError>;

    /// Index into `directory.chains()`.
    fn select_chain(
        &mut self,
        prompt: &str,
        directory: &NetworkDirectory,
    ) -> Result<usize, BridgeError>;

    /// Amount to bridge in native units, as typed.
    fn amount(&mut self, balance: &NativeBalance) -> Result<String, BridgeError>;
}

/// Terminal prompts.
#[derive(Default)]
pub struct TerminalPrompter {
    theme: ColorfulTheme,
}

impl Prompter for TerminalPrompter {
    fn private_key(&mut self) -> Result<String, BridgeError> {
        Ok(Password::with_theme(&self.theme)
            .with_prompt("Enter your private key")
            .interact()?)
    }

    fn select_chain(
        &mut self,
        prompt: &str,
        directory: &NetworkDirectory,
    ) -> Result<usize, BridgeError> {
        Ok(Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(0)
            .items(&directory.labels())
            .interact()?)
    }

    fn amount(&mut self, balance: &NativeBalance) -> Result<String, BridgeError> {
        Ok(Input::<String>::with_theme(&self.theme)
            .with_prompt(format!(
                "Enter amount in {} (balance: {})",
                balance.symbol, balance
            ))
            .interact_text()?)
    }
}

/// Validate a typed amount against the balance.
pub fn resolve_amount(input: &str, balance: &NativeBalance) -> Result<U256, BridgeError> {
    let amount = parse_amount(input, balance.decimals)?;

    if amount.is_zero() {
        return Err(BridgeError::InvalidAmount("amount must be positive".to_string()));
    }
    if amount > balance.raw {
        return Err(BridgeError::InsufficientBalance {
            requested: format!("{} {}", input.trim(), balance.symbol),
            available: balance.to_string(),
        });
    }

    Ok(amount)
}

/// Runs one bridge attempt.
pub struct Driver<P> {
    directory: NetworkDirectory,
    proxy: Option<String>,
    prompter: P,
}

impl<P: Prompter> Driver<P> {
    pub fn new(directory: NetworkDirectory, proxy: Option<String>, prompter: P) -> Self {
        Self {
            directory,
            proxy,
            prompter,
        }
    }

    pub async fn run(&mut self) -> Result<BridgeOutcome, BridgeError> {
        let private_key = self.prompter.private_key()?;

        let index = self.prompter.select_chain(SOURCE_PROMPT, &self.directory)?;
        let source = self.directory.get(index)?.clone();
        tracing::info!(chain = %source.name, "Source network selected");

        let client = ChainClient::connect(&private_key, source, self.proxy.as_deref())?;
        drop(private_key);
        tracing::info!(address = %client.address().to_checksum(None), "Wallet loaded");

        let balance = client.get_balance().await?;
        tracing::info!(chain = %client.chain().name, "Balance: {}", balance);

        let input = self.prompter.amount(&balance)?;
        let requested = resolve_amount(&input, &balance)?;

        let index = self
            .prompter
            .select_chain(DESTINATION_PROMPT, &self.directory)?;
        let destination = self.directory.get(index)?;
        tracing::info!(chain = %destination.name, "Destination network selected");

        let request = BridgeRequest::compose(client.address(), requested, destination)?;

        if request.amount > balance.raw {
            return Err(BridgeError::InsufficientBalance {
                requested: request.amount.to_string(),
                available: balance.raw.to_string(),
            });
        }

        Bridge::new(&client).execute(&request).await
    }
}

/// Log how a run ended and return the process exit status.
pub fn report(result: &Result<BridgeOutcome, BridgeError>) -> u8 {
    match result {
        Ok(outcome) => {
            tracing::info!(
                from = %outcome.source,
                to = %outcome.destination,
                amount = %outcome.amount,
                tx = %outcome.sent.tx_hash,
                "Native token bridged successfully"
            );
            0
        }
        Err(e @ BridgeError::MissingInternalId(_)) => {
            tracing::error!("Error getting chainId of the destination network! {}", e);
            1
        }
        Err(e) => {
            tracing::error!("Error transferring native token: {}", e);
            1
        }
    }
}
