use core::fmt;

use crate::buffer::{InputBuffer, OutputBuffer};
use crate::element::{ElementId, InformationElement, MAX_INFORMATION_SIZE};
use crate::error::IeError;

/// Beacon timing element.
///
/// The information field is produced and interpreted by the peer management
/// protocol engine; this type only carries it between frames and the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BeaconTiming {
    information: Vec<u8>,
}

impl BeaconTiming {
    pub fn new(information: impl Into<Vec<u8>>) -> Result<Self, IeError> {
        let information = information.into();
        if information.len() > MAX_INFORMATION_SIZE {
            return Err(IeError::InformationTooLong(information.len()));
        }
        Ok(Self { information })
    }

    pub fn information(&self) -> &[u8] {
        &self.information
    }

    pub fn is_empty(&self) -> bool {
        self.information.is_empty()
    }
}

impl InformationElement for BeaconTiming {
    const ELEMENT_ID: ElementId = ElementId::BeaconTiming;

    fn information_len(&self) -> usize {
        self.information.len()
    }

    fn serialize_information(&self, buffer: &mut OutputBuffer) -> Result<usize, IeError> {
        buffer.write(&self.information)
    }

    fn deserialize_information(
        buffer: &mut InputBuffer,
        declared_len: u8,
    ) -> Result<Self, IeError> {
        let information = buffer.read_slice(usize::from(declared_len))?;
        Ok(Self { information: information.to_vec() })
    }
}

impl fmt::Display for BeaconTiming {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "beacon timing: {} bytes", self.information.len())?;
        if !self.information.is_empty() {
            write!(f, " [{}]", hex::encode(&self.information))?;
        }
        Ok(())
    }
}
