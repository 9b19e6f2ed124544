use std::collections::BTreeMap;

use anyhow::Result;
use async_trait::async_trait;
use sui_sdk::{
    rpc_types::{SuiMoveValue, SuiObjectDataOptions},
    types::{base_types::SuiAddress, gas::GasCostSummary},
};

use crate::transactions::MintCall;

/// Key custody and signing. The core never sees key material.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    fn current_account(&self) -> Option<SuiAddress>;

    /// Sign, submit and wait. Returns the transaction digest.
    async fn sign_and_execute(&self, call: &MintCall) -> Result<String>;
}

/// Read access to the chain.
#[async_trait]
pub trait ChainClient: Send + Sync {
    async fn simulate(&self, call: &MintCall, sender: SuiAddress) -> Result<GasCostSummary>;

    async fn query_owned_objects(
        &self,
        owner: SuiAddress,
        struct_type: &str,
        options: SuiObjectDataOptions,
    ) -> Result<Vec<OwnedObject>>;
}

/// One raw result of an owned-objects query. Either part may be absent.
#[derive(Debug, Clone, Default)]
pub struct OwnedObject {
    pub object_id: Option<String>,
    pub fields: Option<BTreeMap<String, SuiMoveValue>>,
}
