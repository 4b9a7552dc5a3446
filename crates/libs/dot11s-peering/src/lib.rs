//! # dot11s-peering
//!
//! Peer manager plugin for an 802.11s mesh interface MAC.
//!
//! [`PeerManagerPlugin`] inspects inbound beacons and self-protected peering
//! action frames and reports them to a [`PeerManagementProtocol`] engine. On
//! the way out it asks the engine for the beacon timing element that goes into
//! every beacon. The peer link state machine itself lives in the engine.
//!
//! ```text
//!   interface MAC ──receive──▶ PeerManagerPlugin ──BeaconObserved──────────▶ engine
//!                                                 ──PeerManagementObserved──▶
//!   interface MAC ◀─update_beacon── PeerManagerPlugin ◀──send_beacon──────── engine
//! ```

pub mod config;
mod error;
pub mod frame;
pub mod plugin;
pub mod protocol;

pub use config::{InterfaceConfig, MeshConfig};
pub use error::{ConfigError, InvalidMacAddress, PluginError};
pub use frame::{
    ActionHeader, BeaconHeader, Frame, FrameKind, MacAddress, MeshBeacon, PeerLinkAction,
    WifiMacHeader,
};
pub use plugin::{MeshInterfaceMac, MeshInterfaceMacPlugin, PeerManagerPlugin};
pub use protocol::{BeaconObserved, PeerManagementObserved, PeerManagementProtocol};
