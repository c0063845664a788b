//! Taito Densha de GO! rail controller protocol.
//!
//! This crate is I/O-free and allocation-free. It decodes the controller's
//! interrupt IN report into a [`DenshaGamepad`] and builds the vendor control
//! requests that drive the handle rumble motors and the door lamp.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod ids;
pub mod input;
pub mod output;
pub mod types;

pub use ids::{PRODUCT_PS2_TYPE2, VENDOR_ID, is_densha, product_name};
pub use input::{DenshaButtons, DenshaGamepad, MIN_REPORT_LEN, REPORT_MARKER, parse};
pub use output::{
    COMMAND_LEN, COMMAND_REPORT_ID, DenshaCommand, DenshaFunction, build_command_request,
};
pub use types::DenshaModel;

use thiserror::Error;
use usbh_class_common::ReportError;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenshaError {
    #[error("Unknown function selector {0}")]
    UnknownFunction(u8),

    #[error("Command encoding failed: {0}")]
    Encoding(#[from] ReportError),
}

pub type DenshaResult<T> = Result<T, DenshaError>;
