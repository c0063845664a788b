//! Namco GunCon 2 light-gun protocol.
//!
//! This crate is I/O-free and allocation-free on hot paths. It provides:
//! - the 6-byte interrupt IN report decoder ([`parse`])
//! - the 6-byte mode/calibration report sent with a class `SET_REPORT`
//!
//! The gun only streams position data after 60 Hz mode has been enabled, so
//! hosts normally send [`Guncon2ModeReport::sixty_hz`] right after
//! configuration.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod ids;
pub mod input;
pub mod output;

pub use ids::{PRODUCT_GUNCON2, VENDOR_ID, is_guncon2, matches_either_id};
pub use input::{Guncon2Buttons, Guncon2Dpad, Guncon2State, REPORT_LEN, parse};
pub use output::{
    MODE_INDEX, MODE_REPORT_LEN, MODE_SIXTY_HZ, Guncon2ModeReport, build_mode_request,
};

use thiserror::Error;
use usbh_class_common::ReportError;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guncon2Error {
    #[error("Mode report byte index {0} out of range (max 5)")]
    InvalidIndex(u8),

    #[error("Command encoding failed: {0}")]
    Encoding(#[from] ReportError),
}

pub type Guncon2Result<T> = Result<T, Guncon2Error>;
