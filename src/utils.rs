use crate::constants::{DEFAULT_NETWORK, NETWORKS, SUI_DECIMALS};

pub fn shorten_id(id: &str) -> String {
    let chars: Vec<char> = id.chars().collect();
    if chars.len() > 16 {
        // 0x598928d17a9a5dadfaffdaca2e5d2315bd2e9387d73c8a63488a1a0f4d73ffbd -> 0x598928d1...4d73ffbd
        let head: String = chars[..10].iter().collect();
        let tail: String = chars[chars.len() - 8..].iter().collect();
        format!("{}...{}", head, tail)
    } else {
        id.to_string()
    }
}

/// Render a MIST amount as SUI. Negative amounts are net refunds.
pub fn format_sui_amount(mist: i128) -> String {
    format!("{:.6} SUI", mist as f64 / SUI_DECIMALS)
}

/// Ensure a single `0x` prefix on a hex id.
pub fn with_hex_prefix(id: &str) -> String {
    if id.starts_with("0x") {
        id.to_string()
    } else {
        format!("0x{}", id)
    }
}

#[derive(Clone, Debug)]
pub struct NetworkState {
    pub current_network: usize,
}

impl Default for NetworkState {
    fn default() -> Self {
        Self::new()
    }
}

impl NetworkState {
    pub fn new() -> Self {
        NetworkState {
            current_network: DEFAULT_NETWORK,
        }
    }

    pub fn next_network(&mut self) {
        self.current_network = (self.current_network + 1) % NETWORKS.len();
    }

    pub fn get_current_network(&self) -> &str {
        NETWORKS[self.current_network].0
    }

    pub fn get_current_rpc(&self) -> &str {
        NETWORKS[self.current_network].1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shorten_id_keeps_short_ids() {
        assert_eq!(shorten_id("0xabc"), "0xabc");
        assert_eq!(
            shorten_id("0x598928d17a9a5dadfaffdaca2e5d2315bd2e9387d73c8a63488a1a0f4d73ffbd"),
            "0x598928d1...4d73ffbd"
        );
    }

    #[test]
    fn shorten_id_counts_chars_not_bytes() {
        assert_eq!(shorten_id("0xéééééééééééééééé"), "0xéééééééé...éééééééé");
        assert_eq!(shorten_id("0xéé"), "0xéé");
    }

    #[test]
    fn network_cycles_back_to_devnet() {
        let mut state = NetworkState::new();
        assert_eq!(state.get_current_network(), "testnet");
        state.next_network();
        assert_eq!(state.get_current_network(), "mainnet");
        state.next_network();
        assert_eq!(state.get_current_network(), "devnet");
        assert_eq!(state.get_current_rpc(), "https://fullnode.devnet.sui.io:443");
    }

    #[test]
    fn hex_prefix_is_not_doubled() {
        assert_eq!(with_hex_prefix("abc"), "0xabc");
        assert_eq!(with_hex_prefix("0xabc"), "0xabc");
    }

    #[test]
    fn formats_mist_as_sui() {
        assert_eq!(format_sui_amount(1_500_000), "0.001500 SUI");
        assert_eq!(format_sui_amount(-1_000_000_000), "-1.000000 SUI");
    }
}
