//! Frame and header model seen by MAC plugins.
//!
//! A [`Frame`] holds the frame body only; addressing and the frame kind come
//! with the [`WifiMacHeader`] that is delivered alongside it. Beacon fixed
//! fields use the 802.11 little-endian layout, elements that follow them are
//! `[id][len][information]` records.

use core::fmt;
use std::str::FromStr;
use std::time::Duration;

use dot11s_ie::{
    IeError, InformationElement, InputBuffer, OutputBuffer, PeerManagementElement, Subtype,
};

use crate::error::{InvalidMacAddress, PluginError};

pub const MAC_ADDRESS_SIZE: usize = 6;

/// One TU is 1024 microseconds.
pub const TIME_UNIT_MICROS: u64 = 1024;

/// Action category carrying mesh peering frames.
pub const SELF_PROTECTED_CATEGORY: u8 = 15;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MacAddress([u8; MAC_ADDRESS_SIZE]);

impl MacAddress {
    pub const BROADCAST: Self = Self([0xff; MAC_ADDRESS_SIZE]);

    pub const fn new(bytes: [u8; MAC_ADDRESS_SIZE]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; MAC_ADDRESS_SIZE] {
        &self.0
    }

    pub fn is_broadcast(&self) -> bool {
        *self == Self::BROADCAST
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}", a, b, c, d, e, g)
    }
}

impl FromStr for MacAddress {
    type Err = InvalidMacAddress;

    /// Accepts `aa:bb:cc:dd:ee:ff` and `aa-bb-cc-dd-ee-ff`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidMacAddress(s.to_string());

        let mut bytes = [0u8; MAC_ADDRESS_SIZE];
        let mut parts = s.trim().split(|c: char| c == ':' || c == '-');

        for byte in bytes.iter_mut() {
            let part = parts.next().ok_or_else(invalid)?;
            // from_str_radix alone would take a sign such as "+1"
            if part.len() != 2 || !part.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(invalid());
            }
            *byte = u8::from_str_radix(part, 16).map_err(|_| invalid())?;
        }

        if parts.next().is_some() {
            return Err(invalid());
        }

        Ok(Self(bytes))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameKind {
    Beacon,
    ProbeRequest,
    ProbeResponse,
    Action,
    Data,
    Other,
}

/// MAC header fields plugins look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WifiMacHeader {
    kind: FrameKind,
    addr1: MacAddress,
    addr2: MacAddress,
    addr3: MacAddress,
}

impl WifiMacHeader {
    pub const fn new(
        kind: FrameKind,
        addr1: MacAddress,
        addr2: MacAddress,
        addr3: MacAddress,
    ) -> Self {
        Self { kind, addr1, addr2, addr3 }
    }

    pub const fn beacon(from: MacAddress) -> Self {
        Self::new(FrameKind::Beacon, MacAddress::BROADCAST, from, from)
    }

    pub const fn action(from: MacAddress, to: MacAddress) -> Self {
        Self::new(FrameKind::Action, to, from, from)
    }

    pub const fn data(from: MacAddress, to: MacAddress) -> Self {
        Self::new(FrameKind::Data, to, from, from)
    }

    pub fn kind(&self) -> FrameKind {
        self.kind
    }

    pub fn set_kind(&mut self, kind: FrameKind) {
        self.kind = kind;
    }

    pub fn is_beacon(&self) -> bool {
        self.kind == FrameKind::Beacon
    }

    pub fn is_action(&self) -> bool {
        self.kind == FrameKind::Action
    }

    pub fn is_management(&self) -> bool {
        matches!(
            self.kind,
            FrameKind::Beacon
                | FrameKind::ProbeRequest
                | FrameKind::ProbeResponse
                | FrameKind::Action
        )
    }

    /// Receiver address.
    pub fn addr1(&self) -> MacAddress {
        self.addr1
    }

    /// Transmitter address.
    pub fn addr2(&self) -> MacAddress {
        self.addr2
    }

    pub fn addr3(&self) -> MacAddress {
        self.addr3
    }
}

/// Beacon fixed fields: timestamp, beacon interval, capability.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BeaconHeader {
    pub timestamp_us: u64,
    pub beacon_interval_tu: u16,
    pub capability: u16,
}

impl BeaconHeader {
    pub const SIZE: usize = 12;

    pub const fn new(beacon_interval_tu: u16) -> Self {
        Self { timestamp_us: 0, beacon_interval_tu, capability: 0 }
    }

    pub fn beacon_interval(&self) -> Duration {
        Duration::from_micros(u64::from(self.beacon_interval_tu) * TIME_UNIT_MICROS)
    }

    pub fn serialize(&self, buffer: &mut OutputBuffer) -> Result<usize, IeError> {
        if buffer.remaining() < Self::SIZE {
            return Err(IeError::BufferFull { needed: Self::SIZE, available: buffer.remaining() });
        }

        buffer.write(&self.timestamp_us.to_le_bytes())?;
        buffer.write(&self.beacon_interval_tu.to_le_bytes())?;
        buffer.write(&self.capability.to_le_bytes())?;

        Ok(Self::SIZE)
    }

    pub fn deserialize(buffer: &mut InputBuffer) -> Result<Self, IeError> {
        let mut timestamp = [0u8; 8];
        let mut interval = [0u8; 2];
        let mut capability = [0u8; 2];

        buffer.read(&mut timestamp)?;
        buffer.read(&mut interval)?;
        buffer.read(&mut capability)?;

        Ok(Self {
            timestamp_us: u64::from_le_bytes(timestamp),
            beacon_interval_tu: u16::from_le_bytes(interval),
            capability: u16::from_le_bytes(capability),
        })
    }
}

/// Leading octets of an action frame body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionHeader {
    pub category: u8,
    pub action: u8,
}

impl ActionHeader {
    pub const SIZE: usize = 2;
}

/// Self-protected action codes used for mesh peering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PeerLinkAction {
    Open = 1,
    Confirm = 2,
    Close = 3,
}

impl PeerLinkAction {
    pub fn from_byte(b: u8) -> Option<Self> {
        match b {
            1 => Some(Self::Open),
            2 => Some(Self::Confirm),
            3 => Some(Self::Close),
            _ => None,
        }
    }

    pub fn for_subtype(subtype: Subtype) -> Self {
        match subtype {
            Subtype::Open => Self::Open,
            Subtype::Confirm => Self::Confirm,
            Subtype::Close => Self::Close,
        }
    }
}

/// Frame body, without the MAC header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    body: Vec<u8>,
}

impl Frame {
    pub fn new(body: impl Into<Vec<u8>>) -> Self {
        Self { body: body.into() }
    }

    /// Builds a self-protected peering action frame carrying `element`.
    pub fn peer_link_action(element: &PeerManagementElement) -> Result<Self, IeError> {
        let action = PeerLinkAction::for_subtype(element.subtype());
        let mut body = vec![SELF_PROTECTED_CATEGORY, action as u8];
        body.extend(element.to_bytes()?);
        Ok(Self { body })
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.body
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn append(&mut self, data: &[u8]) {
        self.body.extend_from_slice(data);
    }

    /// Strips and parses the beacon fixed fields.
    pub fn remove_beacon_header(&mut self) -> Result<BeaconHeader, PluginError> {
        let header = BeaconHeader::deserialize(&mut InputBuffer::new(&self.body))
            .map_err(|_| PluginError::MalformedFrame("beacon shorter than its fixed fields"))?;
        self.body.drain(..BeaconHeader::SIZE);
        Ok(header)
    }

    /// Strips the category and action code of an action frame.
    pub fn remove_action_header(&mut self) -> Result<ActionHeader, PluginError> {
        if self.body.len() < ActionHeader::SIZE {
            return Err(PluginError::MalformedFrame("action frame without category and code"));
        }
        let header = ActionHeader { category: self.body[0], action: self.body[1] };
        self.body.drain(..ActionHeader::SIZE);
        Ok(header)
    }
}

/// Beacon under construction. Plugins append their elements before the
/// owning interface turns it into a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeshBeacon {
    header: BeaconHeader,
    elements: Vec<u8>,
}

impl MeshBeacon {
    pub fn new(header: BeaconHeader) -> Self {
        Self { header, elements: Vec::new() }
    }

    pub fn beacon_header(&self) -> &BeaconHeader {
        &self.header
    }

    pub fn add_information_element<E: InformationElement>(
        &mut self,
        element: &E,
    ) -> Result<(), IeError> {
        self.elements.extend(element.to_bytes()?);
        Ok(())
    }

    pub fn elements(&self) -> &[u8] {
        &self.elements
    }

    pub fn into_frame(self) -> Result<Frame, IeError> {
        let mut fixed = [0u8; BeaconHeader::SIZE];
        self.header.serialize(&mut OutputBuffer::new(&mut fixed))?;

        let mut body = Vec::with_capacity(BeaconHeader::SIZE + self.elements.len());
        body.extend_from_slice(&fixed);
        body.extend(self.elements);

        Ok(Frame { body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dot11s_ie::{BeaconTiming, ReasonCode};

    #[test]
    fn mac_address_parses_and_displays() {
        let address: MacAddress = "00:1A:2b:3c:4d:5e".parse().expect("parse");
        assert_eq!(address.as_bytes(), &[0x00, 0x1a, 0x2b, 0x3c, 0x4d, 0x5e]);
        assert_eq!(address.to_string(), "00:1a:2b:3c:4d:5e");
        assert_eq!("00-1a-2b-3c-4d-5e".parse::<MacAddress>(), Ok(address));
    }

    #[test]
    fn mac_address_rejects_malformed_input() {
        for input in [
            "",
            "00:11:22:33:44",
            "00:11:22:33:44:55:66",
            "0:11:22:33:44:55",
            "zz:11:22:33:44:55",
            "+1:11:22:33:44:55",
            "0x:11:22:33:44:55",
        ] {
            assert!(input.parse::<MacAddress>().is_err(), "{input:?} should not parse");
        }
    }

    #[test]
    fn broadcast_address() {
        assert!(MacAddress::BROADCAST.is_broadcast());
        assert!(WifiMacHeader::beacon(MacAddress::new([1; 6])).addr1().is_broadcast());
    }

    #[test]
    fn beacon_header_roundtrips_through_frame() {
        let header =
            BeaconHeader { timestamp_us: 0x0102_0304, beacon_interval_tu: 100, capability: 1 };
        let mut beacon = MeshBeacon::new(header);
        beacon
            .add_information_element(&BeaconTiming::new([9u8, 9]).expect("timing"))
            .expect("append");

        let mut frame = beacon.into_frame().expect("frame");
        assert_eq!(frame.len(), BeaconHeader::SIZE + 4);
        assert_eq!(&frame.as_slice()[8..10], &[100, 0]);

        let parsed = frame.remove_beacon_header().expect("header");
        assert_eq!(parsed, header);
        assert_eq!(frame.as_slice(), &[120, 2, 9, 9]);
    }

    #[test]
    fn beacon_interval_is_in_time_units() {
        assert_eq!(BeaconHeader::new(100).beacon_interval(), Duration::from_micros(102_400));
    }

    #[test]
    fn short_beacon_is_malformed() {
        let mut frame = Frame::new(vec![0u8; 4]);
        assert_eq!(
            frame.remove_beacon_header(),
            Err(PluginError::MalformedFrame("beacon shorter than its fixed fields"))
        );
        assert_eq!(frame.len(), 4);
    }

    #[test]
    fn peer_link_action_frame_layout() {
        let element = PeerManagementElement::close(1, 2, ReasonCode::Reserved);
        let mut frame = Frame::peer_link_action(&element).expect("frame");
        let header = frame.remove_action_header().expect("action header");
        assert_eq!(header, ActionHeader { category: SELF_PROTECTED_CATEGORY, action: 3 });
        assert_eq!(frame.as_slice(), element.to_bytes().expect("encode").as_slice());
    }
}
