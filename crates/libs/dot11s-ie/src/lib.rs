//! # dot11s-ie
//!
//! Codecs for the 802.11s mesh information elements used during peer link
//! establishment.
//!
//! ## Peer Management element
//!
//! ```text
//! [id:1][len:1][subtype:1][local_link_id:2][peer_link_id:2][reason:2]
//!   117  3/5/7   0/1/2      network order   Close/Confirm   Close only
//! ```
//!
//! The information length is a function of the subtype (Open = 3,
//! Confirm = 5, Close = 7). Decoding checks the declared length against the
//! subtype before reading any field and reports a mismatch as
//! [`IeError::LengthMismatch`].
//!
//! ## Example
//!
//! ```rust
//! use dot11s_ie::{InformationElement, PeerManagementElement, ReasonCode};
//!
//! let mut element = PeerManagementElement::default();
//! element.set_close(1, 2, ReasonCode::Reserved);
//!
//! let encoded = element.to_bytes().unwrap();
//! assert_eq!(encoded, [117, 7, 0x01, 0x00, 0x01, 0x00, 0x02, 0x00, 0x43]);
//!
//! let decoded = PeerManagementElement::find_in(&encoded).unwrap().unwrap();
//! assert_eq!(decoded.peer_link_id(), Some(2));
//! ```

pub mod beacon_timing;
pub mod buffer;
pub mod element;
mod error;
pub mod peer_management;
pub mod reason;

pub use beacon_timing::BeaconTiming;
pub use buffer::{InputBuffer, OutputBuffer};
pub use element::{ElementId, ElementIter, ElementRecord, InformationElement};
pub use error::IeError;
pub use peer_management::{PeerLink, PeerManagementElement, Subtype};
pub use reason::ReasonCode;
