//! Information element framing.
//!
//! Every element is carried as `[element id:1][length:1][information:length]`.
//! Implementors of [`InformationElement`] only encode and decode the
//! information field; the id/length header and the walk over an element
//! sequence live here.

use core::fmt;

use crate::buffer::{InputBuffer, OutputBuffer};
use crate::error::IeError;

/// Element id + length octets.
pub const ELEMENT_HEADER_SIZE: usize = 2;

/// Largest information field a one-octet length can describe.
pub const MAX_INFORMATION_SIZE: usize = u8::MAX as usize;

/// Element identifiers used by the mesh peering path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementId {
    MeshConfiguration,
    MeshId,
    PeerManagement,
    BeaconTiming,
    Other(u8),
}

impl ElementId {
    pub const fn as_u8(self) -> u8 {
        match self {
            Self::MeshConfiguration => 113,
            Self::MeshId => 114,
            Self::PeerManagement => 117,
            Self::BeaconTiming => 120,
            Self::Other(id) => id,
        }
    }
}

impl From<u8> for ElementId {
    fn from(value: u8) -> Self {
        match value {
            113 => Self::MeshConfiguration,
            114 => Self::MeshId,
            117 => Self::PeerManagement,
            120 => Self::BeaconTiming,
            other => Self::Other(other),
        }
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MeshConfiguration => write!(f, "mesh-configuration"),
            Self::MeshId => write!(f, "mesh-id"),
            Self::PeerManagement => write!(f, "peer-management"),
            Self::BeaconTiming => write!(f, "beacon-timing"),
            Self::Other(id) => write!(f, "element-{}", id),
        }
    }
}

pub trait InformationElement: Sized {
    const ELEMENT_ID: ElementId;

    /// Size of the information field in bytes, excluding the element header.
    fn information_len(&self) -> usize;

    fn serialize_information(&self, buffer: &mut OutputBuffer) -> Result<usize, IeError>;

    /// Decodes the information field. `buffer` is bounded to the
    /// `declared_len` bytes announced by the element header.
    fn deserialize_information(buffer: &mut InputBuffer, declared_len: u8)
        -> Result<Self, IeError>;

    fn element_id(&self) -> ElementId {
        Self::ELEMENT_ID
    }

    fn serialized_len(&self) -> usize {
        ELEMENT_HEADER_SIZE + self.information_len()
    }

    /// Writes the element header followed by the information field.
    fn serialize(&self, buffer: &mut OutputBuffer) -> Result<usize, IeError> {
        let information_len = self.information_len();
        let length = u8::try_from(information_len)
            .map_err(|_| IeError::InformationTooLong(information_len))?;

        let needed = ELEMENT_HEADER_SIZE + information_len;
        if buffer.remaining() < needed {
            return Err(IeError::BufferFull { needed, available: buffer.remaining() });
        }

        buffer.write(&[Self::ELEMENT_ID.as_u8(), length])?;

        Ok(ELEMENT_HEADER_SIZE + self.serialize_information(buffer)?)
    }

    fn to_bytes(&self) -> Result<Vec<u8>, IeError> {
        let mut out = vec![0u8; self.serialized_len()];
        let mut buffer = OutputBuffer::new(&mut out);
        let written = self.serialize(&mut buffer)?;
        out.truncate(written);
        Ok(out)
    }

    /// Reads one element positioned at the cursor.
    fn deserialize(buffer: &mut InputBuffer) -> Result<Self, IeError> {
        let id = buffer.read_byte()?;
        if id != Self::ELEMENT_ID.as_u8() {
            return Err(IeError::UnexpectedElement {
                expected: Self::ELEMENT_ID.as_u8(),
                found: id,
            });
        }

        let declared_len = buffer.read_byte()?;
        let information = buffer.read_slice(usize::from(declared_len))?;

        Self::deserialize_information(&mut InputBuffer::new(information), declared_len)
    }

    /// Finds and decodes the first element of this kind in an element sequence.
    ///
    /// `Ok(None)` means the sequence is well formed and does not carry the
    /// element.
    fn find_in(body: &[u8]) -> Result<Option<Self>, IeError> {
        for record in ElementIter::new(body) {
            let record = record?;
            if record.id == Self::ELEMENT_ID {
                let mut information = InputBuffer::new(record.information);
                return Self::deserialize_information(&mut information, record.declared_len())
                    .map(Some);
            }
        }

        Ok(None)
    }
}

/// One raw element from an element sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementRecord<'a> {
    pub id: ElementId,
    pub information: &'a [u8],
}

impl<'a> ElementRecord<'a> {
    pub fn declared_len(&self) -> u8 {
        // Records are only built from a one-octet length field.
        u8::try_from(self.information.len()).unwrap_or(u8::MAX)
    }
}

/// Walks `[id][len][information]` records until the input is exhausted.
///
/// A record whose header or body runs past the end of the input yields one
/// `Err` and ends the walk.
pub struct ElementIter<'a> {
    buffer: InputBuffer<'a>,
    failed: bool,
}

impl<'a> ElementIter<'a> {
    pub fn new(body: &'a [u8]) -> Self {
        Self { buffer: InputBuffer::new(body), failed: false }
    }

    fn next_record(&mut self) -> Result<ElementRecord<'a>, IeError> {
        let id = ElementId::from(self.buffer.read_byte()?);
        let declared_len = self.buffer.read_byte()?;
        let information = self.buffer.read_slice(usize::from(declared_len))?;

        Ok(ElementRecord { id, information })
    }
}

impl<'a> Iterator for ElementIter<'a> {
    type Item = Result<ElementRecord<'a>, IeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.buffer.bytes_left() == 0 {
            return None;
        }

        let record = self.next_record();
        if record.is_err() {
            self.failed = true;
        }

        Some(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_ids_map_both_ways() {
        for id in [113u8, 114, 117, 120, 0, 221] {
            assert_eq!(ElementId::from(id).as_u8(), id);
        }
        assert_eq!(ElementId::from(117), ElementId::PeerManagement);
        assert_eq!(ElementId::from(221), ElementId::Other(221));
    }

    #[test]
    fn iter_walks_records() {
        let body = [0x00u8, 0x02, 0xAA, 0xBB, 117, 0x01, 0x05];
        let records: Vec<_> = ElementIter::new(&body).collect::<Result<_, _>>().expect("records");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, ElementId::Other(0));
        assert_eq!(records[0].information, &[0xAA, 0xBB]);
        assert_eq!(records[1].id, ElementId::PeerManagement);
        assert_eq!(records[1].declared_len(), 1);
    }

    #[test]
    fn iter_stops_after_truncated_record() {
        let body = [0x00u8, 0x01, 0xAA, 120, 0x04, 0x01];
        let mut iter = ElementIter::new(&body);
        assert!(iter.next().expect("first").is_ok());
        assert!(matches!(iter.next(), Some(Err(IeError::Truncated { .. }))));
        assert!(iter.next().is_none());
    }

    #[test]
    fn empty_body_has_no_records() {
        assert!(ElementIter::new(&[]).next().is_none());
    }
}
