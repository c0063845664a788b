//! Common USB host abstractions for the gamepad class drivers
//!
//! This crate provides the pieces shared by every vendor driver in the
//! workspace:
//! - a borrowed descriptor model and a length-driven descriptor walker
//! - control request / setup packet encoding
//! - allocation-free, bounds-checked report parsing
//! - the [`HostStack`] trait, the boundary to the external USB host stack
//!
//! Nothing here performs I/O on its own. The `mock` feature adds an
//! in-memory [`mock::MockHost`] for driver tests.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod descriptor;
pub mod host;
pub mod report_parser;
pub mod request;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use descriptor::*;
pub use host::*;
pub use report_parser::*;
pub use request::*;

use thiserror::Error;

/// Failures reported by the external host stack.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    #[error("Failed to open endpoint 0x{ep_addr:02X} on device {dev_addr}")]
    EndpointOpen { dev_addr: u8, ep_addr: u8 },

    #[error("Transfer on endpoint 0x{ep_addr:02X} of device {dev_addr} was rejected")]
    SubmitRejected { dev_addr: u8, ep_addr: u8 },

    #[error("Control transfer to device {dev_addr} was rejected")]
    ControlRejected { dev_addr: u8 },

    #[error("Device {0} is not attached")]
    DeviceGone(u8),
}

pub type HostResult<T> = Result<T, HostError>;

/// Failures while reading or building a fixed-layout report.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportError {
    #[error("Report truncated: needed {needed} bytes, got {actual}")]
    Truncated { needed: usize, actual: usize },

    #[error("Report capacity exceeded: {capacity} bytes")]
    Overflow { capacity: usize },
}

pub type ReportResult<T> = Result<T, ReportError>;
