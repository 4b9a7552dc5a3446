use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::error::ConfigError;
use crate::frame::{BeaconHeader, MacAddress};

pub const DEFAULT_BEACON_INTERVAL_TU: u16 = 100;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MeshConfig {
    #[serde(default)]
    pub interfaces: Vec<InterfaceConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InterfaceConfig {
    pub index: u32,
    pub address: String,
    #[serde(default = "default_beacon_interval_tu")]
    pub beacon_interval_tu: u16,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_beacon_interval_tu() -> u16 {
    DEFAULT_BEACON_INTERVAL_TU
}

fn default_enabled() -> bool {
    true
}

impl MeshConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml(input: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for iface in &self.interfaces {
            if !seen.insert(iface.index) {
                return Err(ConfigError::DuplicateInterface(iface.index));
            }
            if iface.beacon_interval_tu == 0 {
                return Err(ConfigError::InvalidBeaconInterval(iface.index));
            }
            iface.address()?;
        }
        Ok(())
    }

    pub fn enabled_interfaces(&self) -> Vec<&InterfaceConfig> {
        self.interfaces.iter().filter(|iface| iface.enabled).collect()
    }

    pub fn interface(&self, index: u32) -> Option<&InterfaceConfig> {
        self.interfaces.iter().find(|iface| iface.index == index)
    }
}

impl InterfaceConfig {
    pub fn address(&self) -> Result<MacAddress, ConfigError> {
        self.address
            .parse()
            .map_err(|source| ConfigError::InvalidAddress { index: self.index, source })
    }

    pub fn beacon_interval(&self) -> Duration {
        self.beacon_header().beacon_interval()
    }

    /// Fixed fields for beacons sent on this interface.
    pub fn beacon_header(&self) -> BeaconHeader {
        BeaconHeader::new(self.beacon_interval_tu)
    }
}
