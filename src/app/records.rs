use std::sync::Arc;

use sui_sdk::rpc_types::SuiObjectDataOptions;
use tracing::{debug, info, warn};

use crate::error::ListError;
use crate::notification::{MessageType, NotificationChannel};
use crate::wallet::{loyalty_struct_type, ChainClient, LoyaltyCard, OwnedObject, WalletProvider};

/// Keep well-formed loyalty cards, skipping any object without the required fields.
///
/// Borrowing the slice keeps the pipeline lazy and lets callers run it again.
pub fn normalize(objects: &[OwnedObject]) -> impl Iterator<Item = LoyaltyCard> + '_ {
    objects.iter().filter_map(|obj| {
        let card = LoyaltyCard::from_owned_object(obj);
        if card.is_none() {
            debug!(object_id = ?obj.object_id, "skipping malformed loyalty object");
        }
        card
    })
}

/// Loyalty cards owned by the connected account.
pub struct RecordLister {
    wallet: Arc<dyn WalletProvider>,
    chain: Arc<dyn ChainClient>,
    notifications: NotificationChannel,
    records: Vec<LoyaltyCard>,
    package_id: Option<String>,
}

impl RecordLister {
    pub fn new(
        wallet: Arc<dyn WalletProvider>,
        chain: Arc<dyn ChainClient>,
        notifications: NotificationChannel,
    ) -> Self {
        Self {
            wallet,
            chain,
            notifications,
            records: Vec::new(),
            package_id: None,
        }
    }

    pub fn records(&self) -> &[LoyaltyCard] {
        &self.records
    }

    /// Package of the last successful load.
    pub fn package_id(&self) -> Option<&str> {
        self.package_id.as_deref()
    }

    /// Swap collaborators after a network change. Old records belong to the old network.
    pub fn reconnect(&mut self, wallet: Arc<dyn WalletProvider>, chain: Arc<dyn ChainClient>) {
        self.wallet = wallet;
        self.chain = chain;
        self.records.clear();
        self.package_id = None;
    }

    /// Query and replace the collection without posting notifications.
    pub async fn reload(&mut self, package_id: &str) -> Result<usize, ListError> {
        let owner = self.wallet.current_account().ok_or(ListError::NotConnected)?;
        let package_id = package_id.trim();
        if package_id.is_empty() {
            return Err(ListError::MissingPackageId);
        }

        let struct_type = loyalty_struct_type(package_id);
        let objects = self
            .chain
            .query_owned_objects(owner, &struct_type, SuiObjectDataOptions::new().with_content())
            .await
            .map_err(ListError::Query)?;

        // built in full before the swap, so the view never sees a partial list
        let cards: Vec<LoyaltyCard> = normalize(&objects).collect();
        info!(
            %owner,
            %struct_type,
            raw = objects.len(),
            kept = cards.len(),
            "loyalty cards loaded"
        );
        // nothing to show: the previous collection stays
        if cards.is_empty() {
            return Ok(0);
        }
        self.records = cards;
        self.package_id = Some(package_id.to_string());
        Ok(self.records.len())
    }

    pub async fn refresh(&mut self, package_id: &str) -> Result<usize, ListError> {
        let result = self.reload(package_id).await;
        match &result {
            Ok(0) => self
                .notifications
                .notify("No loyalty cards found for this package.", MessageType::Info),
            Ok(count) => self
                .notifications
                .notify_success(format!("Loaded {} loyalty card(s).", count)),
            Err(ListError::NotConnected) => self
                .notifications
                .notify("Connect your wallet first.", MessageType::Error),
            Err(ListError::MissingPackageId) => self.notifications.notify(
                "Enter a package ID to list loyalty cards.",
                MessageType::Info,
            ),
            Err(ListError::Query(source)) => {
                warn!("refresh failed: {:#}", source);
                self.notifications.notify(
                    format!("Failed to load loyalty cards: {}", source),
                    MessageType::Error,
                )
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{full_address, loyalty_object, FakeChain, FakeWallet};

    fn lister(wallet: Arc<FakeWallet>, chain: Arc<FakeChain>) -> (RecordLister, NotificationChannel) {
        let notifications = NotificationChannel::new();
        (RecordLister::new(wallet, chain, notifications.clone()), notifications)
    }

    #[tokio::test]
    async fn drops_objects_missing_content_fields() {
        let chain = FakeChain::with_queries(vec![Ok(vec![
            loyalty_object("0x1", Some("0xdef"), Some("https://x/y.png")),
            loyalty_object("0x2", Some("0xdef"), None),
        ])]);
        let (mut lister, _) = lister(FakeWallet::connected(), chain);

        assert_eq!(lister.refresh("0xabc").await.unwrap(), 1);
        assert_eq!(lister.records().len(), 1);
        assert_eq!(lister.records()[0].id, "0x1");
        assert_eq!(lister.records()[0].recipient, full_address("0xdef"));
        assert_eq!(lister.records()[0].image_url, "https://x/y.png");
    }

    #[tokio::test]
    async fn malformed_object_does_not_stop_later_ones() {
        let objects = vec![
            loyalty_object("0x1", None, Some("a")),
            loyalty_object("0x2", Some("0x5"), Some("b")),
            loyalty_object("0x3", Some("0x6"), None),
            loyalty_object("0x4", Some("0x7"), Some("d")),
        ];
        let ids: Vec<String> = normalize(&objects).map(|card| card.id).collect();
        assert_eq!(ids, vec!["0x2", "0x4"]);

        // restartable
        assert_eq!(normalize(&objects).count(), 2);
    }

    #[tokio::test]
    async fn recipient_that_is_not_an_address_is_dropped() {
        let chain = FakeChain::with_queries(vec![Ok(vec![
            loyalty_object("0x1", Some("0xéééééééééééééééé"), Some("a")),
            loyalty_object("0x2", Some("0x5"), Some("b")),
        ])]);
        let (mut lister, _) = lister(FakeWallet::connected(), chain);

        assert_eq!(lister.refresh("0xabc").await.unwrap(), 1);
        assert_eq!(lister.records()[0].id, "0x2");
        assert_eq!(lister.records()[0].get_short_recipient(), "0x00000000...00000005");
    }

    #[tokio::test]
    async fn queries_loyalty_type_with_content() {
        let wallet = FakeWallet::connected();
        let owner = wallet.account.unwrap();
        let chain = FakeChain::with_queries(vec![Ok(vec![loyalty_object("0x1", Some("0xa"), Some("a"))])]);
        let (mut lister, _) = lister(wallet, Arc::clone(&chain));

        lister.refresh("  0xabc ").await.unwrap();
        assert_eq!(lister.package_id(), Some("0xabc"));

        let queries = chain.recorded_queries();
        assert_eq!(queries.len(), 1);
        assert_eq!(queries[0].owner, owner);
        assert_eq!(queries[0].struct_type, "0xabc::loyalty_card::Loyalty");
        assert!(queries[0].show_content);
    }

    #[tokio::test]
    async fn refresh_replaces_rather_than_appends() {
        let chain = FakeChain::with_queries(vec![
            Ok(vec![
                loyalty_object("0x1", Some("0xa"), Some("a")),
                loyalty_object("0x2", Some("0xb"), Some("b")),
            ]),
            Ok(vec![loyalty_object("0x3", Some("0xc"), Some("c"))]),
        ]);
        let (mut lister, _) = lister(FakeWallet::connected(), chain);

        lister.refresh("0xabc").await.unwrap();
        assert_eq!(lister.records().len(), 2);
        lister.refresh("0xabc").await.unwrap();
        assert_eq!(lister.records().len(), 1);
        assert_eq!(lister.records()[0].id, "0x3");
    }

    #[tokio::test]
    async fn empty_result_posts_info() {
        let (mut lister, notifications) = lister(FakeWallet::connected(), FakeChain::new());
        assert_eq!(lister.refresh("0xabc").await.unwrap(), 0);
        assert_eq!(notifications.current().unwrap().message_type, MessageType::Info);
    }

    #[tokio::test]
    async fn empty_result_keeps_previous_records() {
        let chain = FakeChain::with_queries(vec![
            Ok(vec![loyalty_object("0x1", Some("0xa"), Some("a"))]),
            Ok(vec![]),
        ]);
        let (mut lister, notifications) = lister(FakeWallet::connected(), chain);
        lister.refresh("0xabc").await.unwrap();

        assert_eq!(lister.refresh("0xabc").await.unwrap(), 0);
        assert_eq!(lister.records().len(), 1);
        assert_eq!(lister.records()[0].id, "0x1");
        assert_eq!(lister.package_id(), Some("0xabc"));
        let current = notifications.current().unwrap();
        assert_eq!(current.message_type, MessageType::Info);
        assert_eq!(current.message, "No loyalty cards found for this package.");
    }

    #[tokio::test]
    async fn empty_result_for_another_package_keeps_the_listed_package() {
        let chain = FakeChain::with_queries(vec![
            Ok(vec![loyalty_object("0x1", Some("0xa"), Some("a"))]),
            Ok(vec![loyalty_object("0x2", None, Some("b"))]),
        ]);
        let (mut lister, _) = lister(FakeWallet::connected(), chain);
        lister.refresh("0xabc").await.unwrap();

        // only malformed objects come back, which normalizes to nothing
        assert_eq!(lister.refresh("0x999").await.unwrap(), 0);
        assert_eq!(lister.package_id(), Some("0xabc"));
        assert_eq!(lister.records()[0].id, "0x1");
    }

    #[tokio::test]
    async fn disconnected_keeps_previous_records() {
        let chain = FakeChain::with_queries(vec![Ok(vec![loyalty_object("0x1", Some("0xa"), Some("a"))])]);
        let (mut lister, notifications) = lister(FakeWallet::connected(), Arc::clone(&chain));
        lister.refresh("0xabc").await.unwrap();

        let disconnected: Arc<dyn WalletProvider> = FakeWallet::disconnected();
        lister.wallet = disconnected;
        let err = lister.refresh("0xabc").await.unwrap_err();
        assert!(matches!(err, ListError::NotConnected));
        assert_eq!(lister.records().len(), 1);
        assert_eq!(notifications.current().unwrap().message_type, MessageType::Error);
        assert_eq!(chain.recorded_queries().len(), 1);
    }

    #[tokio::test]
    async fn blank_package_id_skips_the_query() {
        let chain = FakeChain::new();
        let (mut lister, notifications) = lister(FakeWallet::connected(), Arc::clone(&chain));
        let err = lister.refresh("   ").await.unwrap_err();
        assert!(matches!(err, ListError::MissingPackageId));
        assert!(chain.recorded_queries().is_empty());
        assert_eq!(notifications.current().unwrap().message_type, MessageType::Info);
    }

    #[tokio::test]
    async fn query_failure_keeps_previous_records() {
        let chain = FakeChain::with_queries(vec![
            Ok(vec![loyalty_object("0x1", Some("0xa"), Some("a"))]),
            Err("rpc timeout".to_string()),
        ]);
        let (mut lister, notifications) = lister(FakeWallet::connected(), chain);
        lister.refresh("0xabc").await.unwrap();

        assert!(matches!(lister.refresh("0xabc").await, Err(ListError::Query(_))));
        assert_eq!(lister.records().len(), 1);
        let current = notifications.current().unwrap();
        assert_eq!(current.message_type, MessageType::Error);
        assert!(current.message.contains("rpc timeout"));
    }

    #[tokio::test]
    async fn reload_is_silent() {
        let chain = FakeChain::new();
        let (mut lister, notifications) = lister(FakeWallet::connected(), chain);
        lister.reload("0xabc").await.unwrap();
        assert!(notifications.current().is_none());
    }
}
