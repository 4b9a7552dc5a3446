//! Contract between MAC plugins and the peer management protocol engine.
//!
//! The engine owns the peer link state machine; plugins only hand it parsed
//! events and ask it for the elements that go into outgoing beacons.

use std::time::Duration;

use dot11s_ie::{BeaconTiming, PeerManagementElement};

use crate::frame::MacAddress;

/// A beacon seen on an interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeaconObserved {
    pub interface_index: u32,
    /// Whether the beacon carried a beacon timing element.
    pub is_mesh_beacon: bool,
    /// Empty unless `is_mesh_beacon`.
    pub timing: BeaconTiming,
    pub sender: MacAddress,
    pub arrival: Duration,
    pub beacon_interval: Duration,
}

/// A decoded peer management element from a peering action frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeerManagementObserved {
    pub interface_index: u32,
    pub sender: MacAddress,
    pub receiver: MacAddress,
    pub element: PeerManagementElement,
    pub arrival: Duration,
}

pub trait PeerManagementProtocol {
    fn receive_beacon(&mut self, event: BeaconObserved);

    fn receive_peer_management(&mut self, event: PeerManagementObserved);

    /// Produces the beacon timing element for the next beacon sent on
    /// `interface_index`.
    fn send_beacon(
        &mut self,
        interface_index: u32,
        now: Duration,
        beacon_interval: Duration,
    ) -> BeaconTiming;
}
