use crate::peer_management::Subtype;

/// Errors from element encode/decode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IeError {
    #[error("input truncated: needed {needed} bytes, {available} left")]
    Truncated { needed: usize, available: usize },

    #[error("output buffer full: needed {needed} bytes, {available} left")]
    BufferFull { needed: usize, available: usize },

    #[error("unknown peer management subtype: 0x{0:02x}")]
    UnknownSubtype(u8),

    #[error("{subtype} element requires information length {expected}, declared {declared}")]
    LengthMismatch { subtype: Subtype, expected: u8, declared: u8 },

    #[error("expected element id {expected}, found {found}")]
    UnexpectedElement { expected: u8, found: u8 },

    #[error("information field too long: {0} bytes (maximum 255)")]
    InformationTooLong(usize),
}
