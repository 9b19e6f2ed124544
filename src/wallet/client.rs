use std::{path::PathBuf, sync::Arc};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use sui_sdk::{
    rpc_types::SuiObjectDataOptions,
    types::{base_types::SuiAddress, gas::GasCostSummary},
    wallet_context::WalletContext,
    SuiClient, SuiClientBuilder,
};
use tracing::{info, warn};

use super::provider::{ChainClient, OwnedObject, WalletProvider};
use crate::config::MinterConfig;
use crate::transactions::{MintCall, TransactionExecutor};
use crate::utils::NetworkState;

/// Sui full-node client plus the local CLI wallet.
#[derive(Clone)]
pub struct Wallet {
    pub client: Arc<SuiClient>,
    pub address: Option<SuiAddress>,
    pub network_state: NetworkState,
    keystore_path: PathBuf,
}

impl Wallet {
    pub async fn connect(config: &MinterConfig, network_state: &NetworkState) -> Result<Self> {
        let client = SuiClientBuilder::default()
            .build(network_state.get_current_rpc())
            .await?;

        let address = match Self::load_active_address(config) {
            Ok(address) => {
                info!(%address, network = network_state.get_current_network(), "wallet connected");
                Some(address)
            }
            Err(e) => {
                warn!("no active wallet address: {}", e);
                None
            }
        };

        Ok(Wallet {
            client: Arc::new(client),
            address,
            network_state: network_state.clone(),
            keystore_path: config.keystore_path.clone(),
        })
    }

    fn load_active_address(config: &MinterConfig) -> Result<SuiAddress> {
        let mut context = WalletContext::new(&config.client_config_path)?;
        context.active_address()
    }

    fn executor(&self, sender: SuiAddress) -> TransactionExecutor {
        TransactionExecutor::new(Arc::clone(&self.client), sender, self.keystore_path.clone())
    }
}

#[async_trait]
impl WalletProvider for Wallet {
    fn current_account(&self) -> Option<SuiAddress> {
        self.address
    }

    async fn sign_and_execute(&self, call: &MintCall) -> Result<String> {
        let sender = self.address.ok_or_else(|| anyhow!("Wallet disconnected"))?;
        self.executor(sender).execute(call).await
    }
}

#[async_trait]
impl ChainClient for Wallet {
    async fn simulate(&self, call: &MintCall, sender: SuiAddress) -> Result<GasCostSummary> {
        self.executor(sender).dry_run(call).await
    }

    async fn query_owned_objects(
        &self,
        owner: SuiAddress,
        struct_type: &str,
        options: SuiObjectDataOptions,
    ) -> Result<Vec<OwnedObject>> {
        self.get_owned_objects_of_type(owner, struct_type, options).await
    }
}
