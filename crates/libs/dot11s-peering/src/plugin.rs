//! Peer manager MAC plugin.
//!
//! The plugin sits between a mesh interface MAC and the peer management
//! protocol engine. Inbound beacons and peering action frames are parsed and
//! handed to the engine; outgoing beacons get the engine's beacon timing
//! element appended.
//!
//! Neither the engine nor the interface is owned here. The engine is held
//! through a `Weak<RefCell<_>>` and the interface through a `Weak` that is
//! bound after construction with [`MeshInterfaceMacPlugin::set_parent`].

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

use dot11s_ie::{BeaconTiming, InformationElement, PeerManagementElement};

use crate::config::InterfaceConfig;
use crate::error::PluginError;
use crate::frame::{
    Frame, MacAddress, MeshBeacon, PeerLinkAction, WifiMacHeader, SELF_PROTECTED_CATEGORY,
};
use crate::protocol::{BeaconObserved, PeerManagementObserved, PeerManagementProtocol};

/// The interface MAC a plugin is installed on.
pub trait MeshInterfaceMac {
    fn address(&self) -> MacAddress;

    /// Current time on the interface clock.
    fn now(&self) -> Duration;

    fn interface_index(&self) -> u32;
}

pub trait MeshInterfaceMacPlugin {
    fn set_parent(&mut self, parent: Weak<dyn MeshInterfaceMac>);

    /// Inspects an inbound frame. `Ok(true)` means the frame was consumed.
    fn receive(&mut self, frame: &Frame, header: &WifiMacHeader) -> Result<bool, PluginError>;

    /// Gives the plugin a chance to modify an outgoing frame. Returns `false`
    /// to leave the frame as is.
    fn update_outgoing_frame(
        &mut self,
        frame: &mut Frame,
        header: &mut WifiMacHeader,
        from: MacAddress,
        to: MacAddress,
    ) -> bool;

    fn update_beacon(&self, beacon: &mut MeshBeacon) -> Result<(), PluginError>;
}

pub struct PeerManagerPlugin {
    interface_index: u32,
    protocol: Weak<RefCell<dyn PeerManagementProtocol>>,
    parent: Option<Weak<dyn MeshInterfaceMac>>,
}

impl PeerManagerPlugin {
    pub fn new<P>(interface_index: u32, protocol: &Rc<RefCell<P>>) -> Self
    where
        P: PeerManagementProtocol + 'static,
    {
        let protocol: Rc<RefCell<dyn PeerManagementProtocol>> = protocol.clone();
        Self { interface_index, protocol: Rc::downgrade(&protocol), parent: None }
    }

    pub fn from_config<P>(config: &InterfaceConfig, protocol: &Rc<RefCell<P>>) -> Self
    where
        P: PeerManagementProtocol + 'static,
    {
        Self::new(config.index, protocol)
    }

    pub fn interface_index(&self) -> u32 {
        self.interface_index
    }

    /// True while a parent is bound and still alive.
    pub fn is_attached(&self) -> bool {
        self.parent.as_ref().is_some_and(|parent| parent.strong_count() > 0)
    }

    fn parent(&self) -> Result<Rc<dyn MeshInterfaceMac>, PluginError> {
        self.parent.as_ref().and_then(Weak::upgrade).ok_or(PluginError::Detached)
    }

    fn with_protocol<R>(
        &self,
        f: impl FnOnce(&mut dyn PeerManagementProtocol) -> R,
    ) -> Result<R, PluginError> {
        let protocol = self.protocol.upgrade().ok_or(PluginError::ProtocolGone)?;
        let mut protocol = protocol.try_borrow_mut().map_err(|_| PluginError::ProtocolBusy)?;
        Ok(f(&mut *protocol))
    }

    fn receive_beacon(&self, frame: &Frame, header: &WifiMacHeader) -> Result<bool, PluginError> {
        let parent = self.parent()?;

        let mut body = frame.clone();
        let beacon_header = body.remove_beacon_header()?;

        if body.is_empty() {
            log::debug!(
                "peer_manager(if{}): beacon from {} has no elements",
                self.interface_index,
                header.addr2()
            );
        }

        let timing = match BeaconTiming::find_in(body.as_slice()) {
            Ok(timing) => timing,
            Err(err) => {
                log::debug!(
                    "peer_manager(if{}): unreadable elements in beacon from {}: {}",
                    self.interface_index,
                    header.addr2(),
                    err
                );
                None
            }
        };

        log::debug!(
            "peer_manager(if{}): beacon from {} mesh={}",
            self.interface_index,
            header.addr2(),
            timing.is_some()
        );

        let event = BeaconObserved {
            interface_index: self.interface_index,
            is_mesh_beacon: timing.is_some(),
            timing: timing.unwrap_or_default(),
            sender: header.addr2(),
            arrival: parent.now(),
            beacon_interval: beacon_header.beacon_interval(),
        };

        self.with_protocol(|protocol| protocol.receive_beacon(event))?;

        // Beacons stay available to other plugins.
        Ok(false)
    }

    fn receive_action(&self, frame: &Frame, header: &WifiMacHeader) -> Result<bool, PluginError> {
        let mut body = frame.clone();
        let Ok(action_header) = body.remove_action_header() else {
            return Ok(false);
        };

        if action_header.category != SELF_PROTECTED_CATEGORY {
            return Ok(false);
        }
        let Some(action) = PeerLinkAction::from_byte(action_header.action) else {
            return Ok(false);
        };

        let element = match PeerManagementElement::find_in(body.as_slice()) {
            Ok(Some(element)) => element,
            Ok(None) => return Ok(false),
            Err(err) => {
                log::warn!(
                    "peer_manager(if{}): malformed peer management element from {}: {}",
                    self.interface_index,
                    header.addr2(),
                    err
                );
                return Err(err.into());
            }
        };

        if PeerLinkAction::for_subtype(element.subtype()) != action {
            log::warn!(
                "peer_manager(if{}): {:?} frame from {} carries a {} element",
                self.interface_index,
                action,
                header.addr2(),
                element.subtype()
            );
            return Err(PluginError::MalformedFrame("peer link action does not match element"));
        }

        let parent = self.parent()?;

        log::debug!(
            "peer_manager(if{}): {} from {}",
            self.interface_index,
            element,
            header.addr2()
        );

        let event = PeerManagementObserved {
            interface_index: self.interface_index,
            sender: header.addr2(),
            receiver: header.addr1(),
            element,
            arrival: parent.now(),
        };

        self.with_protocol(|protocol| protocol.receive_peer_management(event))?;

        Ok(true)
    }
}

impl MeshInterfaceMacPlugin for PeerManagerPlugin {
    fn set_parent(&mut self, parent: Weak<dyn MeshInterfaceMac>) {
        if self.parent.is_some() {
            log::warn!("peer_manager(if{}): replacing parent interface", self.interface_index);
        }

        if let Some(mac) = parent.upgrade() {
            if mac.interface_index() != self.interface_index {
                log::warn!(
                    "peer_manager(if{}): attached to interface {}",
                    self.interface_index,
                    mac.interface_index()
                );
            }
            log::debug!("peer_manager(if{}): attached to {}", self.interface_index, mac.address());
        }

        self.parent = Some(parent);
    }

    fn receive(&mut self, frame: &Frame, header: &WifiMacHeader) -> Result<bool, PluginError> {
        log::trace!(
            "peer_manager(if{}): rx {:?} from {} ({} bytes)",
            self.interface_index,
            header.kind(),
            header.addr2(),
            frame.len()
        );

        if header.is_beacon() {
            return self.receive_beacon(frame, header);
        }

        if header.is_action() {
            return self.receive_action(frame, header);
        }

        Ok(false)
    }

    fn update_outgoing_frame(
        &mut self,
        _frame: &mut Frame,
        _header: &mut WifiMacHeader,
        _from: MacAddress,
        _to: MacAddress,
    ) -> bool {
        false
    }

    fn update_beacon(&self, beacon: &mut MeshBeacon) -> Result<(), PluginError> {
        let parent = self.parent()?;
        let beacon_interval = beacon.beacon_header().beacon_interval();

        let timing = self.with_protocol(|protocol| {
            protocol.send_beacon(self.interface_index, parent.now(), beacon_interval)
        })?;

        beacon.add_information_element(&timing)?;

        Ok(())
    }
}
