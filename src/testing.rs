//! Scripted collaborators for unit tests.

use std::collections::{BTreeMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use sui_sdk::{
    rpc_types::{SuiMoveValue, SuiObjectDataOptions},
    types::{base_types::SuiAddress, gas::GasCostSummary},
};

use crate::transactions::MintCall;
use crate::wallet::{ChainClient, OwnedObject, WalletProvider};

/// How `sign_and_execute` ends once the call is recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signing {
    Answer,
    /// Never resolves, like a wallet waiting on the network.
    Stall,
    Panic,
}

pub struct FakeWallet {
    pub account: Option<SuiAddress>,
    pub result: Mutex<Result<String, String>>,
    pub executed: Mutex<Vec<MintCall>>,
    pub signing: Signing,
}

impl FakeWallet {
    fn build(account: Option<SuiAddress>, signing: Signing) -> Arc<Self> {
        Arc::new(Self {
            account,
            result: Mutex::new(Ok("FakeDigest111".to_string())),
            executed: Mutex::new(Vec::new()),
            signing,
        })
    }

    pub fn connected() -> Arc<Self> {
        Self::build(Some(SuiAddress::random_for_testing_only()), Signing::Answer)
    }

    pub fn disconnected() -> Arc<Self> {
        Self::build(None, Signing::Answer)
    }

    pub fn stalled() -> Arc<Self> {
        Self::build(Some(SuiAddress::random_for_testing_only()), Signing::Stall)
    }

    pub fn panicking() -> Arc<Self> {
        Self::build(Some(SuiAddress::random_for_testing_only()), Signing::Panic)
    }

    pub fn rejecting(message: &str) -> Arc<Self> {
        let wallet = Self::connected();
        *wallet.result.lock().unwrap() = Err(message.to_string());
        wallet
    }

    pub fn executed_count(&self) -> usize {
        self.executed.lock().unwrap().len()
    }
}

#[async_trait]
impl WalletProvider for FakeWallet {
    fn current_account(&self) -> Option<SuiAddress> {
        self.account
    }

    async fn sign_and_execute(&self, call: &MintCall) -> Result<String> {
        self.executed.lock().unwrap().push(call.clone());
        match self.signing {
            Signing::Answer => {}
            Signing::Stall => std::future::pending::<()>().await,
            Signing::Panic => panic!("wallet crashed"),
        }
        self.result.lock().unwrap().clone().map_err(|e| anyhow!(e))
    }
}

#[derive(Debug, Clone)]
pub struct RecordedQuery {
    pub owner: SuiAddress,
    pub struct_type: String,
    pub show_content: bool,
}

pub struct FakeChain {
    pub simulation: Mutex<Result<GasCostSummary, String>>,
    pub simulations: AtomicUsize,
    pub query_results: Mutex<VecDeque<Result<Vec<OwnedObject>, String>>>,
    pub queries: Mutex<Vec<RecordedQuery>>,
}

impl FakeChain {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            simulation: Mutex::new(Ok(GasCostSummary::new(1_000_000, 2_000_000, 500_000, 0))),
            simulations: AtomicUsize::new(0),
            query_results: Mutex::new(VecDeque::new()),
            queries: Mutex::new(Vec::new()),
        })
    }

    pub fn with_queries(results: Vec<Result<Vec<OwnedObject>, String>>) -> Arc<Self> {
        let chain = Self::new();
        *chain.query_results.lock().unwrap() = results.into();
        chain
    }

    pub fn fail_simulation(&self, message: &str) {
        *self.simulation.lock().unwrap() = Err(message.to_string());
    }

    pub fn simulation_count(&self) -> usize {
        self.simulations.load(Ordering::SeqCst)
    }

    pub fn recorded_queries(&self) -> Vec<RecordedQuery> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChainClient for FakeChain {
    async fn simulate(&self, _call: &MintCall, _sender: SuiAddress) -> Result<GasCostSummary> {
        self.simulations.fetch_add(1, Ordering::SeqCst);
        self.simulation.lock().unwrap().clone().map_err(|e| anyhow!(e))
    }

    async fn query_owned_objects(
        &self,
        owner: SuiAddress,
        struct_type: &str,
        options: SuiObjectDataOptions,
    ) -> Result<Vec<OwnedObject>> {
        self.queries.lock().unwrap().push(RecordedQuery {
            owner,
            struct_type: struct_type.to_string(),
            show_content: options.show_content,
        });
        self.query_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
            .map_err(|e| anyhow!(e))
    }
}

/// A raw loyalty object. `None` leaves the field out.
pub fn loyalty_object(id: &str, customer_id: Option<&str>, image_url: Option<&str>) -> OwnedObject {
    let mut fields = BTreeMap::new();
    fields.insert(
        "id".to_string(),
        SuiMoveValue::String(id.to_string()),
    );
    if let Some(customer_id) = customer_id {
        fields.insert(
            "customer_id".to_string(),
            SuiMoveValue::String(customer_id.to_string()),
        );
    }
    if let Some(image_url) = image_url {
        fields.insert(
            "image_url".to_string(),
            SuiMoveValue::String(image_url.to_string()),
        );
    }
    OwnedObject {
        object_id: Some(id.to_string()),
        fields: Some(fields),
    }
}

/// The full `0x` + 64 hex form a short literal normalizes to.
pub fn full_address(literal: &str) -> String {
    SuiAddress::from(crate::transactions::parse_object_id(literal).unwrap()).to_string()
}
