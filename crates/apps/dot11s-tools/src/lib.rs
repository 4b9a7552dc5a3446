//! Formatting helpers behind the `dot11s-ie` binary.

use dot11s_ie::{
    BeaconTiming, ElementId, ElementIter, IeError, InformationElement, InputBuffer,
    PeerManagementElement,
};
use dot11s_peering::{ConfigError, MeshConfig};

/// Whole element, `[id][len][information]`, as lowercase hex.
pub fn encode_hex(element: &PeerManagementElement) -> Result<String, IeError> {
    Ok(hex::encode(element.to_bytes()?))
}

/// One line per element of an element sequence.
///
/// Peer management and beacon timing elements are decoded; anything else is
/// printed as id, length and raw bytes. The first malformed element ends the
/// walk with its error.
pub fn describe_elements(body: &[u8]) -> Result<Vec<String>, IeError> {
    let mut lines = Vec::new();

    for record in ElementIter::new(body) {
        let record = record?;
        let declared_len = record.declared_len();
        let mut information = InputBuffer::new(record.information);

        let line = match record.id {
            ElementId::PeerManagement => {
                PeerManagementElement::deserialize_information(&mut information, declared_len)?
                    .to_string()
            }
            ElementId::BeaconTiming => {
                BeaconTiming::deserialize_information(&mut information, declared_len)?.to_string()
            }
            id => format!(
                "{} ({}): {} bytes [{}]",
                id,
                id.as_u8(),
                record.information.len(),
                hex::encode(record.information)
            ),
        };

        lines.push(line);
    }

    Ok(lines)
}

pub fn describe_interfaces(config: &MeshConfig) -> Result<Vec<String>, ConfigError> {
    config
        .interfaces
        .iter()
        .map(|iface| {
            Ok(format!(
                "if{} {} beacon={}TU ({}us){}",
                iface.index,
                iface.address()?,
                iface.beacon_interval_tu,
                iface.beacon_interval().as_micros(),
                if iface.enabled { "" } else { " disabled" }
            ))
        })
        .collect()
}
