/// Move module that defines the loyalty card
pub const LOYALTY_MODULE: &str = "loyalty_card";
pub const MINT_FUNCTION: &str = "mint_loyalty";
pub const LOYALTY_STRUCT: &str = "Loyalty";

// Content field names on the Loyalty object
pub const FIELD_CUSTOMER_ID: &str = "customer_id";
pub const FIELD_IMAGE_URL: &str = "image_url";

// Global constants
pub const GAS_BUDGET: u64 = 100_000_000;
pub const SUI_DECIMALS: f64 = 1_000_000_000.0;

pub const NOTIFICATION_TTL_SECS: u64 = 5;
pub const INPUT_MAX_LEN: usize = 256;
pub const OWNED_OBJECTS_PAGE_LIMIT: usize = 50;

pub const LOG_FILTER_ENV: &str = "LOYALTY_MINTER_LOG";
pub const DEFAULT_LOG_FILTER: &str = "loyalty_minter=info";
pub const LOG_DIR_NAME: &str = "loyalty-minter";
pub const LOG_FILE_NAME: &str = "minter.log";

pub const DEFAULT_NETWORK: usize = 1;

pub const NETWORKS: [(&str, &str); 3] = [
    ("devnet", "https://fullnode.devnet.sui.io:443"),
    ("testnet", "https://fullnode.testnet.sui.io:443"),
    ("mainnet", "https://fullnode.mainnet.sui.io:443"),
];
