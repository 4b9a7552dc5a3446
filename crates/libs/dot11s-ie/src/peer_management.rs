//! Peer management element (Open / Confirm / Close).
//!
//! ```text
//! [subtype:1][local_link_id:2][peer_link_id:2][reason:2]
//!                              Close, Confirm  Close only
//! ```
//!
//! All multi-byte fields are network byte order. The information length is
//! fixed by the subtype: Open = 3, Confirm = 5, Close = 7.

use core::fmt;

use crate::buffer::{InputBuffer, OutputBuffer};
use crate::element::{ElementId, InformationElement};
use crate::error::IeError;
use crate::reason::ReasonCode;

pub const PEER_OPEN_LENGTH: u8 = 3;
pub const PEER_CONFIRM_LENGTH: u8 = 5;
pub const PEER_CLOSE_LENGTH: u8 = 7;

/// Discriminant of the peer management element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Subtype {
    Open = 0,
    Close = 1,
    Confirm = 2,
}

impl Subtype {
    /// Convert from raw byte value.
    pub fn from_byte(b: u8) -> Result<Self, IeError> {
        match b {
            0 => Ok(Self::Open),
            1 => Ok(Self::Close),
            2 => Ok(Self::Confirm),
            _ => Err(IeError::UnknownSubtype(b)),
        }
    }

    /// Information field length implied by the subtype.
    pub const fn information_size(self) -> u8 {
        match self {
            Self::Open => PEER_OPEN_LENGTH,
            Self::Confirm => PEER_CONFIRM_LENGTH,
            Self::Close => PEER_CLOSE_LENGTH,
        }
    }
}

impl fmt::Display for Subtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Close => write!(f, "close"),
            Self::Confirm => write!(f, "confirm"),
        }
    }
}

/// The fields present for each subtype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PeerLink {
    Open { local_link_id: u16 },
    Confirm { local_link_id: u16, peer_link_id: u16 },
    Close { local_link_id: u16, peer_link_id: u16, reason: ReasonCode },
}

impl PeerLink {
    pub fn subtype(&self) -> Subtype {
        match self {
            Self::Open { .. } => Subtype::Open,
            Self::Confirm { .. } => Subtype::Confirm,
            Self::Close { .. } => Subtype::Close,
        }
    }
}

impl Default for PeerLink {
    fn default() -> Self {
        Self::Open { local_link_id: 0 }
    }
}

/// Peer management information element.
///
/// A plain value: each `set_*` call replaces the whole configuration, so
/// fields of a previous subtype are never observable afterwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PeerManagementElement {
    link: PeerLink,
}

impl PeerManagementElement {
    pub const fn open(local_link_id: u16) -> Self {
        Self { link: PeerLink::Open { local_link_id } }
    }

    pub const fn confirm(local_link_id: u16, peer_link_id: u16) -> Self {
        Self { link: PeerLink::Confirm { local_link_id, peer_link_id } }
    }

    /// `reason` is stored in canonical form, so the element equals its own
    /// decoded encoding.
    pub const fn close(local_link_id: u16, peer_link_id: u16, reason: ReasonCode) -> Self {
        let reason = reason.canonical();
        Self { link: PeerLink::Close { local_link_id, peer_link_id, reason } }
    }

    pub fn set_open(&mut self, local_link_id: u16) {
        *self = Self::open(local_link_id);
    }

    pub fn set_close(&mut self, local_link_id: u16, peer_link_id: u16, reason: ReasonCode) {
        *self = Self::close(local_link_id, peer_link_id, reason);
    }

    pub fn set_confirm(&mut self, local_link_id: u16, peer_link_id: u16) {
        *self = Self::confirm(local_link_id, peer_link_id);
    }

    pub fn link(&self) -> PeerLink {
        self.link
    }

    pub fn subtype(&self) -> Subtype {
        self.link.subtype()
    }

    pub fn local_link_id(&self) -> u16 {
        match self.link {
            PeerLink::Open { local_link_id }
            | PeerLink::Confirm { local_link_id, .. }
            | PeerLink::Close { local_link_id, .. } => local_link_id,
        }
    }

    /// Present for Confirm and Close.
    pub fn peer_link_id(&self) -> Option<u16> {
        match self.link {
            PeerLink::Open { .. } => None,
            PeerLink::Confirm { peer_link_id, .. } | PeerLink::Close { peer_link_id, .. } => {
                Some(peer_link_id)
            }
        }
    }

    /// Present for Close only.
    pub fn reason_code(&self) -> Option<ReasonCode> {
        match self.link {
            PeerLink::Close { reason, .. } => Some(reason),
            _ => None,
        }
    }

    /// Information field length: 3, 5 or 7.
    pub fn information_size(&self) -> u8 {
        self.subtype().information_size()
    }

    pub fn is_open(&self) -> bool {
        self.subtype() == Subtype::Open
    }

    pub fn is_close(&self) -> bool {
        self.subtype() == Subtype::Close
    }

    pub fn is_confirm(&self) -> bool {
        self.subtype() == Subtype::Confirm
    }

    /// Decodes in place from an information field of `declared_len` bytes and
    /// returns the number of bytes consumed. `self` is left untouched on error.
    pub fn deserialize_from(
        &mut self,
        buffer: &mut InputBuffer,
        declared_len: u8,
    ) -> Result<usize, IeError> {
        let start = buffer.clone();
        *self = Self::deserialize_information(buffer, declared_len)?;
        Ok(buffer.distance_from(&start))
    }

    /// Decodes a slice holding exactly one information field.
    pub fn decode_information(information: &[u8]) -> Result<Self, IeError> {
        let declared_len = u8::try_from(information.len())
            .map_err(|_| IeError::InformationTooLong(information.len()))?;
        Self::deserialize_information(&mut InputBuffer::new(information), declared_len)
    }
}

impl From<PeerLink> for PeerManagementElement {
    fn from(link: PeerLink) -> Self {
        match link {
            PeerLink::Close { local_link_id, peer_link_id, reason } => {
                Self::close(local_link_id, peer_link_id, reason)
            }
            link => Self { link },
        }
    }
}

impl InformationElement for PeerManagementElement {
    const ELEMENT_ID: ElementId = ElementId::PeerManagement;

    fn information_len(&self) -> usize {
        usize::from(self.information_size())
    }

    fn serialize_information(&self, buffer: &mut OutputBuffer) -> Result<usize, IeError> {
        let needed = self.information_len();
        if buffer.remaining() < needed {
            return Err(IeError::BufferFull { needed, available: buffer.remaining() });
        }

        let mut written = buffer.write_byte(self.subtype() as u8)?;
        written += buffer.write_u16_be(self.local_link_id())?;

        if let Some(peer_link_id) = self.peer_link_id() {
            written += buffer.write_u16_be(peer_link_id)?;
        }

        if let Some(reason) = self.reason_code() {
            written += buffer.write_u16_be(reason.as_u16())?;
        }

        Ok(written)
    }

    fn deserialize_information(
        buffer: &mut InputBuffer,
        declared_len: u8,
    ) -> Result<Self, IeError> {
        let subtype = Subtype::from_byte(buffer.read_byte()?)?;

        // The declared length must agree with the subtype before any field is
        // read; a mismatch means the peer or the outer framing is corrupt.
        let expected = subtype.information_size();
        if declared_len != expected {
            log::debug!(
                "peer_management: {} subtype with declared length {} (expected {})",
                subtype,
                declared_len,
                expected
            );
            return Err(IeError::LengthMismatch { subtype, expected, declared: declared_len });
        }

        let local_link_id = buffer.read_u16_be()?;

        let link = match subtype {
            Subtype::Open => PeerLink::Open { local_link_id },
            Subtype::Confirm => {
                let peer_link_id = buffer.read_u16_be()?;
                PeerLink::Confirm { local_link_id, peer_link_id }
            }
            Subtype::Close => {
                let peer_link_id = buffer.read_u16_be()?;
                let reason = ReasonCode::from(buffer.read_u16_be()?);
                PeerLink::Close { local_link_id, peer_link_id, reason }
            }
        };

        Ok(Self { link })
    }
}

impl fmt::Display for PeerManagementElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "peer management: {} local={}", self.subtype(), self.local_link_id())?;

        if let Some(peer_link_id) = self.peer_link_id() {
            write!(f, " peer={}", peer_link_id)?;
        }

        if let Some(reason) = self.reason_code() {
            write!(f, " reason={}", reason)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_information(element: &PeerManagementElement) -> Vec<u8> {
        let mut out = [0u8; 16];
        let mut buffer = OutputBuffer::new(&mut out);
        element.serialize_information(&mut buffer).expect("serialize");
        buffer.as_slice().to_vec()
    }

    #[test]
    fn default_is_open_with_zero_link_id() {
        let element = PeerManagementElement::default();
        assert!(element.is_open());
        assert_eq!(element.local_link_id(), 0);
        assert_eq!(element.information_size(), 3);
    }

    #[test]
    fn open_serializes_three_bytes() {
        let mut element = PeerManagementElement::default();
        element.set_open(7);
        assert_eq!(encode_information(&element), vec![0x00, 0x00, 0x07]);

        let decoded =
            PeerManagementElement::decode_information(&[0x00, 0x00, 0x07]).expect("decode");
        assert_eq!(decoded.local_link_id(), 7);
        assert!(decoded.is_open());
        assert_eq!(decoded.information_size(), 3);
    }

    #[test]
    fn close_serializes_all_fields_big_endian() {
        let mut element = PeerManagementElement::default();
        element.set_close(1, 2, ReasonCode::Reserved);
        let bytes = encode_information(&element);
        assert_eq!(bytes, vec![0x01, 0x00, 0x01, 0x00, 0x02, 0x00, 0x43]);

        let decoded = PeerManagementElement::decode_information(&bytes).expect("decode");
        assert!(decoded.is_close());
        assert_eq!(decoded.local_link_id(), 1);
        assert_eq!(decoded.peer_link_id(), Some(2));
        assert_eq!(decoded.reason_code(), Some(ReasonCode::Reserved));
        assert_eq!(decoded, element);
    }

    #[test]
    fn confirm_serializes_five_bytes() {
        let element = PeerManagementElement::confirm(0x1234, 0xABCD);
        assert_eq!(encode_information(&element), vec![0x02, 0x12, 0x34, 0xAB, 0xCD]);
        assert!(element.is_confirm());
        assert_eq!(element.reason_code(), None);
    }

    #[test]
    fn reconfiguring_drops_previous_fields() {
        let mut element = PeerManagementElement::default();
        element.set_close(1, 2, ReasonCode::MaxPeers);
        element.set_open(3);
        assert_eq!(element.peer_link_id(), None);
        assert_eq!(element.reason_code(), None);
        assert_eq!(element.information_size(), 3);

        element.set_confirm(4, 5);
        assert_eq!(element.reason_code(), None);
        assert_eq!(element.peer_link_id(), Some(5));
    }

    #[test]
    fn rejects_close_with_open_length() {
        let bytes = [0x01u8, 0x00, 0x01, 0x00, 0x02, 0x00, 0x43];
        let err = PeerManagementElement::deserialize_information(&mut InputBuffer::new(&bytes), 3)
            .expect_err("length mismatch must fail");
        assert_eq!(
            err,
            IeError::LengthMismatch { subtype: Subtype::Close, expected: 7, declared: 3 }
        );
    }

    #[test]
    fn rejects_open_with_close_length() {
        let bytes = [0x00u8, 0x00, 0x01, 0x00, 0x02, 0x00, 0x43];
        assert!(matches!(
            PeerManagementElement::decode_information(&bytes),
            Err(IeError::LengthMismatch { subtype: Subtype::Open, .. })
        ));
    }

    #[test]
    fn rejects_unknown_subtype() {
        assert_eq!(
            PeerManagementElement::decode_information(&[0x09, 0x00, 0x01]),
            Err(IeError::UnknownSubtype(0x09))
        );
    }

    #[test]
    fn rejects_truncated_information() {
        let bytes = [0x02u8, 0x00, 0x01, 0x00];
        let err = PeerManagementElement::deserialize_information(&mut InputBuffer::new(&bytes), 5)
            .expect_err("truncated");
        assert!(matches!(err, IeError::Truncated { .. }));
    }

    #[test]
    fn deserialize_from_reports_consumed_bytes() {
        let bytes = [0x02u8, 0x00, 0x01, 0x00, 0x02, 0xFF];
        let mut buffer = InputBuffer::new(&bytes);
        let mut element = PeerManagementElement::default();
        let consumed = element.deserialize_from(&mut buffer, 5).expect("decode");
        assert_eq!(consumed, 5);
        assert_eq!(buffer.bytes_left(), 1);
        assert!(element.is_confirm());
    }

    #[test]
    fn deserialize_from_keeps_value_on_error() {
        let bytes = [0x01u8, 0x00, 0x01];
        let mut element = PeerManagementElement::open(42);
        assert!(element.deserialize_from(&mut InputBuffer::new(&bytes), 3).is_err());
        assert_eq!(element, PeerManagementElement::open(42));
    }

    #[test]
    fn serialize_into_short_buffer_writes_nothing() {
        let element = PeerManagementElement::close(1, 2, ReasonCode::Reserved);
        let mut out = [0u8; 4];
        let mut buffer = OutputBuffer::new(&mut out);
        assert!(matches!(
            element.serialize_information(&mut buffer),
            Err(IeError::BufferFull { needed: 7, available: 4 })
        ));
        assert_eq!(buffer.offset(), 0);
    }

    #[test]
    fn display_lists_present_fields() {
        assert_eq!(PeerManagementElement::open(7).to_string(), "peer management: open local=7");
        assert_eq!(
            PeerManagementElement::close(1, 2, ReasonCode::CloseReceived).to_string(),
            "peer management: close local=1 peer=2 reason=close-received (55)"
        );
    }
}
