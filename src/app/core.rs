use std::sync::Arc;

use anyhow::Result;
use ratatui::widgets::ListState;
use tokio::sync::{Mutex, MutexGuard};
use tokio::task::JoinHandle;
use tracing::debug;

use super::orchestrator::MintOrchestrator;
use super::records::RecordLister;
use crate::config::MinterConfig;
use crate::form::Field;
use crate::notification::NotificationChannel;
use crate::utils::{shorten_id, NetworkState};
use crate::wallet::{ChainClient, Wallet, WalletProvider};

/// Long-running work started from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activity {
    Minting,
    Estimating,
    Refreshing,
    SwitchingNetwork,
}

impl Activity {
    pub fn label(&self) -> &'static str {
        match self {
            Activity::Minting => "MINTING...",
            Activity::Estimating => "ESTIMATING GAS...",
            Activity::Refreshing => "LOADING CARDS...",
            Activity::SwitchingNetwork => "SWITCHING NETWORK...",
        }
    }
}

pub struct App {
    pub config: MinterConfig,
    pub network_state: NetworkState,
    /// Network the current wallet is connected to.
    pub connected_network: NetworkState,
    pub wallet: Arc<dyn WalletProvider>,
    pub wallet_address: String,
    pub notifications: NotificationChannel,
    pub orchestrator: MintOrchestrator,
    pub lister: RecordLister,
    pub focus: Field,
    pub records_state: ListState,
    pub activity: Option<Activity>,
}

impl App {
    pub async fn new(config: MinterConfig) -> Result<App> {
        let wallet = Arc::new(Wallet::connect(&config, &config.network_state).await?);
        Ok(Self::with_collaborators(config, wallet.clone(), wallet))
    }

    pub fn with_collaborators(
        config: MinterConfig,
        wallet: Arc<dyn WalletProvider>,
        chain: Arc<dyn ChainClient>,
    ) -> App {
        let network_state = config.network_state.clone();
        let notifications = NotificationChannel::new();

        let orchestrator = MintOrchestrator::new(wallet.clone(), chain.clone(), notifications.clone());
        let lister = RecordLister::new(wallet.clone(), chain, notifications.clone());

        App {
            wallet_address: Self::describe_account(wallet.as_ref()),
            config,
            connected_network: network_state.clone(),
            network_state,
            wallet,
            notifications,
            orchestrator,
            lister,
            focus: Field::PackageId,
            records_state: ListState::default(),
            activity: None,
        }
    }

    pub fn describe_account(wallet: &dyn WalletProvider) -> String {
        match wallet.current_account() {
            Some(address) => shorten_id(&address.to_string()),
            None => "Not Connected".to_string(),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.wallet.current_account().is_some()
    }

    pub fn is_busy(&self) -> bool {
        self.activity.is_some()
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_previous(&mut self) {
        self.focus = self.focus.previous();
    }

    pub fn type_char(&mut self, c: char) {
        let field = self.focus;
        self.orchestrator.form_mut().push_char(field, c);
    }

    pub fn backspace(&mut self) {
        let field = self.focus;
        self.orchestrator.form_mut().pop_char(field);
    }

    /// Package to list: the one being typed, else the last one listed.
    pub fn listing_package_id(&self) -> String {
        let typed = self.orchestrator.form().package_id.trim();
        if !typed.is_empty() {
            return typed.to_string();
        }
        self.lister.package_id().unwrap_or_default().to_string()
    }

    pub fn next_item(&mut self) {
        let items_len = self.lister.records().len();
        if items_len == 0 {
            return;
        }
        let i = match self.records_state.selected() {
            Some(i) if i >= items_len - 1 => i,
            Some(i) => i + 1,
            None => 0,
        };
        self.records_state.select(Some(i));
    }

    pub fn previous_item(&mut self) {
        if self.lister.records().is_empty() {
            return;
        }
        let i = match self.records_state.selected() {
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        self.records_state.select(Some(i));
    }

    fn reset_selection(&mut self) {
        let selected = if self.lister.records().is_empty() { None } else { Some(0) };
        self.records_state.select(selected);
    }

    async fn perform(&mut self, activity: Activity) {
        match activity {
            Activity::Minting => {
                let App { orchestrator, lister, .. } = self;
                let outcome = orchestrator.submit_mint(lister).await;
                debug!(?outcome, "mint finished");
                self.reset_selection();
            }
            Activity::Estimating => {
                let outcome = self.orchestrator.estimate_cost().await;
                debug!(?outcome, "estimate finished");
            }
            Activity::Refreshing => {
                let package_id = self.listing_package_id();
                // errors are already surfaced as notifications
                let _ = self.lister.refresh(&package_id).await;
                self.reset_selection();
            }
            Activity::SwitchingNetwork => {
                self.network_state.next_network();
                self.update_network().await;
                self.reset_selection();
            }
        }
    }

    /// Run an activity in the background. The task holds the app for its whole
    /// duration, so keys pressed meanwhile are dropped. Aborting the handle
    /// discards whatever the activity had not applied yet.
    pub fn spawn_activity(app: Arc<Mutex<App>>, activity: Activity) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut running = RunningActivity {
                app: app.lock().await,
            };
            running.app.perform(activity).await;
        })
    }
}

/// The app, held for one activity. Clears the busy state however the
/// activity ends: finished, aborted or panicked.
struct RunningActivity<'a> {
    app: MutexGuard<'a, App>,
}

impl Drop for RunningActivity<'_> {
    fn drop(&mut self) {
        self.app.activity = None;
        self.app.orchestrator.recover();
    }
}
