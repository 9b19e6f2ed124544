use std::sync::Arc;

use tracing::{info, warn};

use crate::app::core::App;
use crate::notification::MessageType;
use crate::wallet::Wallet;

impl App {
    /// Reconnect to `network_state`'s network, falling back to the wallet we had.
    pub async fn update_network(&mut self) {
        match Wallet::connect(&self.config, &self.network_state).await {
            Ok(wallet) => {
                let wallet = Arc::new(wallet);
                self.orchestrator.reconnect(wallet.clone(), wallet.clone());
                self.lister.reconnect(wallet.clone(), wallet.clone());
                self.wallet_address = App::describe_account(wallet.as_ref());
                self.connected_network = wallet.network_state.clone();
                self.wallet = wallet;
                info!(network = self.network_state.get_current_network(), "network switched");
                self.notifications.notify(
                    format!(
                        "Switched to {}",
                        self.network_state.get_current_network().to_uppercase()
                    ),
                    MessageType::Info,
                );
            }
            Err(e) => {
                warn!("network switch failed: {}", e);
                self.network_state = self.connected_network.clone();
                self.notifications
                    .notify(format!("Failed to switch network: {}", e), MessageType::Error);
            }
        }
    }
}
