use dot11s_ie::IeError;

/// Errors raised while intercepting frames on an interface.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PluginError {
    #[error("plugin is not attached to a parent interface")]
    Detached,

    #[error("peer management protocol is no longer available")]
    ProtocolGone,

    #[error("peer management protocol is busy")]
    ProtocolBusy,

    #[error("malformed frame: {0}")]
    MalformedFrame(&'static str),

    #[error("peer management element rejected: {0}")]
    Element(#[from] IeError),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid MAC address: {0:?}")]
pub struct InvalidMacAddress(pub String);

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("interface {index}: {source}")]
    InvalidAddress { index: u32, source: InvalidMacAddress },

    #[error("duplicate interface index {0}")]
    DuplicateInterface(u32),

    #[error("interface {0}: beacon interval must be non-zero")]
    InvalidBeaconInterval(u32),
}
