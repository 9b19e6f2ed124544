//! The mint request lifecycle.
//!
//! ```text
//! Idle -> Validating -> Building -> Submitting -> Reconciling -> Idle
//!                           \-> Simulating -> Idle
//! ```
//!
//! Every failure returns straight to `Idle`.

use std::sync::Arc;

use sui_sdk::types::gas::GasCostSummary;
use tracing::{error, info, trace, warn};

use super::records::RecordLister;
use crate::form::{ErrorKey, MintForm, ValidationErrors};
use crate::notification::{MessageType, NotificationChannel};
use crate::transactions::MintCall;
use crate::utils::format_sui_amount;
use crate::wallet::{ChainClient, WalletProvider};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MintPhase {
    Idle,
    Validating,
    Building,
    Simulating,
    Submitting,
    Reconciling,
}

impl MintPhase {
    pub fn can_transition_to(self, next: MintPhase) -> bool {
        use MintPhase::*;
        matches!(
            (self, next),
            (Idle, Validating)
                | (Validating, Building)
                | (Validating, Idle)
                | (Building, Simulating)
                | (Building, Submitting)
                | (Building, Idle)
                | (Simulating, Idle)
                | (Submitting, Reconciling)
                | (Submitting, Idle)
                | (Reconciling, Idle)
        )
    }

    pub fn is_idle(self) -> bool {
        self == MintPhase::Idle
    }
}

/// Gas figures from a dry run, in MIST.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CostEstimate {
    pub computation: u64,
    pub storage: u64,
    pub storage_rebate: u64,
}

impl CostEstimate {
    /// What the sender pays after the rebate. Negative when the rebate wins.
    pub fn net(&self) -> i128 {
        self.computation as i128 + self.storage as i128 - self.storage_rebate as i128
    }

    pub fn summary(&self) -> String {
        format!(
            "computation {} | storage {} | rebate {} | net {}",
            self.computation,
            self.storage,
            self.storage_rebate,
            format_sui_amount(self.net())
        )
    }
}

impl From<&GasCostSummary> for CostEstimate {
    fn from(gas: &GasCostSummary) -> Self {
        Self {
            computation: gas.computation_cost,
            storage: gas.storage_cost,
            storage_rebate: gas.storage_rebate,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MintOutcome {
    /// Another operation is still in flight.
    Busy,
    Invalid(ValidationErrors),
    Failed(String),
    Minted { digest: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EstimateOutcome {
    Busy,
    Invalid(ValidationErrors),
    Failed(String),
    Estimated(CostEstimate),
}

pub struct MintOrchestrator {
    wallet: Arc<dyn WalletProvider>,
    chain: Arc<dyn ChainClient>,
    notifications: NotificationChannel,
    form: MintForm,
    cost_estimate: Option<CostEstimate>,
    phase: MintPhase,
    last_path: Vec<MintPhase>,
}

impl MintOrchestrator {
    pub fn new(
        wallet: Arc<dyn WalletProvider>,
        chain: Arc<dyn ChainClient>,
        notifications: NotificationChannel,
    ) -> Self {
        Self {
            wallet,
            chain,
            notifications,
            form: MintForm::new(),
            cost_estimate: None,
            phase: MintPhase::Idle,
            last_path: vec![MintPhase::Idle],
        }
    }

    pub fn form(&self) -> &MintForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut MintForm {
        &mut self.form
    }

    pub fn cost_estimate(&self) -> Option<CostEstimate> {
        self.cost_estimate
    }

    pub fn phase(&self) -> MintPhase {
        self.phase
    }

    /// Phases visited by the most recent operation, starting at `Idle`.
    pub fn last_path(&self) -> &[MintPhase] {
        &self.last_path
    }

    pub fn is_ready(&self) -> bool {
        self.phase.is_idle() && self.form.is_ready(self.wallet.current_account())
    }

    pub fn reconnect(&mut self, wallet: Arc<dyn WalletProvider>, chain: Arc<dyn ChainClient>) {
        self.wallet = wallet;
        self.chain = chain;
        self.cost_estimate = None;
    }

    /// Back to `Idle` after an operation was cut short (aborted or panicked).
    pub fn recover(&mut self) {
        if !self.phase.is_idle() {
            warn!(phase = ?self.phase, "operation interrupted");
            self.phase = MintPhase::Idle;
            self.last_path.push(MintPhase::Idle);
        }
    }

    fn transition(&mut self, next: MintPhase) {
        debug_assert!(
            self.phase.can_transition_to(next),
            "illegal transition {:?} -> {:?}",
            self.phase,
            next
        );
        trace!(from = ?self.phase, to = ?next, "mint phase");
        self.phase = next;
        self.last_path.push(next);
    }

    fn begin(&mut self) -> bool {
        if !self.phase.is_idle() {
            warn!(phase = ?self.phase, "operation rejected, orchestrator busy");
            return false;
        }
        self.last_path = vec![MintPhase::Idle];
        self.transition(MintPhase::Validating);
        true
    }

    fn abort(&mut self, message: String) -> String {
        error!("{}", message);
        self.notifications.notify(message.clone(), MessageType::Error);
        self.transition(MintPhase::Idle);
        message
    }

    pub async fn submit_mint(&mut self, lister: &mut RecordLister) -> MintOutcome {
        if !self.begin() {
            return MintOutcome::Busy;
        }

        // field errors are shown inline, no notification
        let (_, request) = match self.form.validated(self.wallet.current_account()) {
            Ok(validated) => validated,
            Err(errors) => {
                self.form.errors = errors.clone();
                self.transition(MintPhase::Idle);
                return MintOutcome::Invalid(errors);
            }
        };
        self.form.errors.clear();

        self.transition(MintPhase::Building);
        let call = match MintCall::build(&request) {
            Ok(call) => call,
            Err(e) => return MintOutcome::Failed(self.abort(format!("Minting failed: {}", e))),
        };

        self.transition(MintPhase::Submitting);
        info!(call = %call.target(), recipient = request.recipient(), "submitting mint");
        let digest = match self.wallet.sign_and_execute(&call).await {
            Ok(digest) => digest,
            Err(e) => return MintOutcome::Failed(self.abort(format!("Minting failed: {}", e))),
        };

        self.form.clear();
        self.cost_estimate = None;
        self.notifications
            .notify_success(format!("Loyalty card minted successfully! (Tx: {})", digest));

        self.transition(MintPhase::Reconciling);
        // silent: the mint result stays the visible notification
        if let Err(e) = lister.reload(request.package_id()).await {
            warn!("reload after mint failed: {}", e);
        }

        self.transition(MintPhase::Idle);
        MintOutcome::Minted { digest }
    }

    pub async fn estimate_cost(&mut self) -> EstimateOutcome {
        if !self.begin() {
            return EstimateOutcome::Busy;
        }

        let (sender, request) = match self.form.validated(self.wallet.current_account()) {
            Ok(validated) => validated,
            Err(errors) => {
                let message = if errors.contains(ErrorKey::Wallet) {
                    "CONNECT YOUR WALLET FIRST."
                } else {
                    "ALL FIELDS ARE REQUIRED."
                };
                self.abort(message.to_string());
                return EstimateOutcome::Invalid(errors);
            }
        };

        self.transition(MintPhase::Building);
        let call = match MintCall::build(&request) {
            Ok(call) => call,
            Err(e) => {
                return EstimateOutcome::Failed(self.abort(format!("Cost estimation failed: {}", e)))
            }
        };

        self.transition(MintPhase::Simulating);
        let gas = match self.chain.simulate(&call, sender).await {
            Ok(gas) => gas,
            Err(e) => {
                return EstimateOutcome::Failed(self.abort(format!("Cost estimation failed: {}", e)))
            }
        };

        let estimate = CostEstimate::from(&gas);
        self.cost_estimate = Some(estimate);
        info!(?estimate, "mint cost estimated");
        self.notifications
            .notify(format!("Estimated gas: {}", estimate.summary()), MessageType::Info);
        self.transition(MintPhase::Idle);
        EstimateOutcome::Estimated(estimate)
    }
}
