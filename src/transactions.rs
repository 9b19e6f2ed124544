use std::{path::PathBuf, sync::Arc};

use anyhow::{anyhow, Result};
use shared_crypto::intent::Intent;
use sui_keys::keystore::{AccountKeystore, FileBasedKeystore};
use sui_sdk::{
    rpc_types::{
        SuiObjectRef, SuiTransactionBlockEffectsAPI, SuiTransactionBlockResponse,
        SuiTransactionBlockResponseOptions,
    },
    types::{
        base_types::{ObjectID, SuiAddress},
        gas::GasCostSummary,
        programmable_transaction_builder::ProgrammableTransactionBuilder,
        transaction::{Transaction, TransactionData},
        Identifier,
    },
    SuiClient,
};
use sui_types::{
    quorum_driver_types::ExecuteTransactionRequestType,
    transaction::{Argument, CallArg, Command, ProgrammableTransaction},
};
use tracing::{debug, info};

use crate::{
    constants::{GAS_BUDGET, LOYALTY_MODULE, MINT_FUNCTION},
    error::BuildError,
    form::MintRequest,
    utils::with_hex_prefix,
};

/// A typed positional argument of the mint call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MintArgument {
    Address(SuiAddress),
    String(String),
}

impl MintArgument {
    /// BCS bytes as the Move VM expects them for a pure input.
    pub fn to_bytes(&self) -> Result<Vec<u8>, bcs::Error> {
        match self {
            MintArgument::Address(address) => bcs::to_bytes(address),
            MintArgument::String(value) => bcs::to_bytes(value),
        }
    }

    pub fn to_call_arg(&self) -> Result<CallArg, bcs::Error> {
        Ok(CallArg::Pure(self.to_bytes()?))
    }
}

/// Parse a hex literal the way wallets do: optional `0x`, short forms padded.
pub fn parse_object_id(literal: &str) -> Result<ObjectID> {
    ObjectID::from_hex_literal(&with_hex_prefix(literal)).map_err(|e| anyhow!("{}", e))
}

/// `<package>::loyalty_card::mint_loyalty(recipient: address, image_url: String)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintCall {
    package_id: String,
    package: ObjectID,
    arguments: Vec<MintArgument>,
}

impl MintCall {
    pub fn build(request: &MintRequest) -> Result<Self, BuildError> {
        let package = parse_object_id(request.package_id()).map_err(|e| {
            BuildError::InvalidPackageId(request.package_id().to_string(), e.to_string())
        })?;
        let recipient = parse_object_id(request.recipient())
            .map(SuiAddress::from)
            .map_err(|e| {
                BuildError::InvalidRecipient(request.recipient().to_string(), e.to_string())
            })?;

        Ok(Self {
            package_id: request.package_id().to_string(),
            package,
            arguments: vec![
                MintArgument::Address(recipient),
                MintArgument::String(request.image_url().to_string()),
            ],
        })
    }

    pub fn target(&self) -> String {
        format!("{}::{}::{}", self.package_id, LOYALTY_MODULE, MINT_FUNCTION)
    }

    pub fn package(&self) -> ObjectID {
        self.package
    }

    pub fn arguments(&self) -> &[MintArgument] {
        &self.arguments
    }

    pub fn to_call_args(&self) -> Result<Vec<CallArg>, BuildError> {
        self.arguments
            .iter()
            .map(|arg| arg.to_call_arg().map_err(BuildError::from))
            .collect()
    }

    /// Single-command programmable transaction for this call.
    pub fn to_programmable(&self) -> Result<ProgrammableTransaction> {
        let mut ptb = ProgrammableTransactionBuilder::new();

        for arg in self.to_call_args()? {
            ptb.input(arg)?;
        }
        let arg_indices: Vec<Argument> = (0..self.arguments.len())
            .map(|i| Argument::Input(i as u16))
            .collect();

        ptb.command(Command::move_call(
            self.package,
            Identifier::new(LOYALTY_MODULE)?,
            Identifier::new(MINT_FUNCTION)?,
            vec![],
            arg_indices,
        ));

        Ok(ptb.finish())
    }
}

/// Gas configuration for transactions
pub struct GasConfig {
    pub budget: u64,
    pub price: Option<u64>,
}

impl Default for GasConfig {
    fn default() -> Self {
        Self {
            budget: GAS_BUDGET,
            price: None,
        }
    }
}

/// Handles gas selection, dry runs, signing and execution for one sender
pub struct TransactionExecutor {
    sui_client: Arc<SuiClient>,
    sender: SuiAddress,
    keystore_path: PathBuf,
}

impl TransactionExecutor {
    pub fn new(sui_client: Arc<SuiClient>, sender: SuiAddress, keystore_path: PathBuf) -> Self {
        Self {
            sui_client,
            sender,
            keystore_path,
        }
    }

    async fn get_gas_coin(&self) -> Result<SuiObjectRef> {
        let coins = self
            .sui_client
            .coin_read_api()
            .get_coins(self.sender, None, None, None)
            .await?;

        coins
            .data
            .into_iter()
            .next()
            .map(|coin| SuiObjectRef {
                object_id: coin.coin_object_id,
                version: coin.version,
                digest: coin.digest,
            })
            .ok_or_else(|| anyhow!("No available coins found"))
    }

    async fn build_transaction(
        &self,
        call: &MintCall,
        gas_config: GasConfig,
    ) -> Result<TransactionData> {
        let gas_coin = self.get_gas_coin().await?;

        let gas_price = match gas_config.price {
            Some(price) => price,
            None => self.sui_client.read_api().get_reference_gas_price().await?,
        };

        Ok(TransactionData::new_programmable(
            self.sender,
            vec![(gas_coin.object_id, gas_coin.version, gas_coin.digest)],
            call.to_programmable()?,
            gas_config.budget,
            gas_price,
        ))
    }

    /// Execute against current state without committing.
    pub async fn dry_run(&self, call: &MintCall) -> Result<GasCostSummary> {
        let tx_data = self.build_transaction(call, GasConfig::default()).await?;
        debug!(call = %call.target(), sender = %self.sender, "dry run");

        let response = self
            .sui_client
            .read_api()
            .dry_run_transaction_block(tx_data)
            .await?;

        if !response.effects.status().is_ok() {
            return Err(anyhow!(
                "Simulation failed: {:?}",
                response.effects.status()
            ));
        }

        Ok(response.effects.gas_cost_summary().clone())
    }

    async fn sign_and_execute(&self, tx_data: TransactionData) -> Result<SuiTransactionBlockResponse> {
        let keystore = FileBasedKeystore::new(&self.keystore_path)?;
        let signature = keystore.sign_secure(&self.sender, &tx_data, Intent::sui_transaction())?;

        let response = self
            .sui_client
            .quorum_driver_api()
            .execute_transaction_block(
                Transaction::from_data(tx_data, vec![signature]),
                SuiTransactionBlockResponseOptions::full_content(),
                Some(ExecuteTransactionRequestType::WaitForLocalExecution),
            )
            .await?;

        Ok(response)
    }

    /// Sign, submit and wait for the mint call. Returns the digest.
    pub async fn execute(&self, call: &MintCall) -> Result<String> {
        let tx_data = self.build_transaction(call, GasConfig::default()).await?;
        let tx_response = self.sign_and_execute(tx_data).await?;

        if let Some(effects) = &tx_response.effects {
            if !effects.status().is_ok() {
                return Err(anyhow!("Transaction failed: {:?}", effects.status()));
            }
        }

        let digest = tx_response.digest.base58_encode();
        info!(call = %call.target(), %digest, "mint executed");
        Ok(digest)
    }
}
