//! Capcom Steel Battalion cockpit controller protocol.
//!
//! The controller is an original Xbox XID device (interface class `0x58`,
//! subclass `0x42`) with a 26-byte interrupt IN state report and a 22-byte
//! interrupt OUT report driving the 38 panel LEDs.
//!
//! This crate is I/O-free and allocation-free.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod ids;
pub mod input;
pub mod output;

pub use ids::{
    PRODUCT_SBC, VENDOR_ID, XID_INTERFACE_CLASS, XID_INTERFACE_SUBCLASS, is_sbc, is_xid_interface,
    matches_any_identity,
};
pub use input::{REPORT_LEN, SbcButtons, SbcGear, SbcState, parse};
pub use output::{LED_COUNT, LED_REPORT_LEN, MAX_INTENSITY, SbcLed, SbcLeds};

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SbcError {
    #[error("Unknown LED slot {0}")]
    UnknownLed(u8),

    #[error("LED intensity {0} exceeds 15")]
    IntensityOutOfRange(u8),
}

pub type SbcResult<T> = Result<T, SbcError>;
