use std::path::PathBuf;

use anyhow::{anyhow, Result};
use sui_config::{sui_config_dir, SUI_CLIENT_CONFIG, SUI_KEYSTORE_FILENAME};

use crate::constants::{LOG_DIR_NAME, LOG_FILE_NAME};
use crate::utils::NetworkState;

/// Paths and network selection resolved at startup.
#[derive(Clone, Debug)]
pub struct MinterConfig {
    pub network_state: NetworkState,
    pub client_config_path: PathBuf,
    pub keystore_path: PathBuf,
    pub log_path: PathBuf,
}

impl MinterConfig {
    pub fn load() -> Result<Self> {
        let sui_dir = sui_config_dir()?;
        let data_dir = dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| anyhow!("Failed to get data directory"))?;

        Ok(Self {
            network_state: NetworkState::new(),
            client_config_path: sui_dir.join(SUI_CLIENT_CONFIG),
            keystore_path: sui_dir.join(SUI_KEYSTORE_FILENAME),
            log_path: data_dir.join(LOG_DIR_NAME).join(LOG_FILE_NAME),
        })
    }
}
