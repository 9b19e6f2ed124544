mod client;
mod loyalty;
mod provider;
mod types;
mod utils;

pub use client::Wallet;
pub use loyalty::loyalty_struct_type;
pub use provider::{ChainClient, OwnedObject, WalletProvider};
pub use types::LoyaltyCard;
