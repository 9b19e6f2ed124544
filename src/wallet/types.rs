// Basic type definitions for the wallet module

use crate::utils::shorten_id;

/// A loyalty card owned by the connected account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoyaltyCard {
    pub id: String,
    pub recipient: String,
    pub image_url: String,
}

impl LoyaltyCard {
    pub fn get_short_id(&self) -> String {
        shorten_id(&self.id)
    }

    pub fn get_short_recipient(&self) -> String {
        shorten_id(&self.recipient)
    }
}
