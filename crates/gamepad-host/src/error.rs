//! Driver error types.

use hid_densha_protocol::DenshaError;
use hid_guncon2_protocol::Guncon2Error;
use thiserror::Error;
use usbh_class_common::{HostError, ReportError, TransferResult};
use xid_sbc_protocol::SbcError;

/// Errors returned by the class driver entry points.
///
/// An invalid inbound report is not an error: the decoded state is left
/// untouched and the report callback still fires.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DriverError {
    #[error("Unsupported device VID=0x{vendor_id:04X} PID=0x{product_id:04X}")]
    UnsupportedDevice { vendor_id: u16, product_id: u16 },

    #[error("No free interface slot on device {dev_addr}")]
    CapacityExceeded { dev_addr: u8 },

    #[error("Endpoint open failed: {0}")]
    EndpointOpenFailed(#[source] HostError),

    #[error("Endpoint 0x{ep_addr:02X} already has a transfer outstanding")]
    Busy { ep_addr: u8 },

    #[error("Transfer submission failed: {0}")]
    SubmitFailed(#[source] HostError),

    #[error("Transfer completed with status {result:?}")]
    TransferError { result: TransferResult },

    #[error("Payload of {len} bytes exceeds the {max}-byte endpoint limit")]
    PayloadTooLarge { len: usize, max: usize },

    #[error("No such device or interface instance")]
    NotFound,

    #[error("Interface instance has no endpoint in the requested direction")]
    NoEndpoint,

    #[error("Unexpected completion on endpoint 0x{ep_addr:02X} of device {dev_addr}")]
    UnexpectedCompletion { dev_addr: u8, ep_addr: u8 },

    #[error("Malformed interface descriptor")]
    InvalidDescriptor,

    #[error("Invalid command argument {0}")]
    InvalidCommand(u8),

    #[error("Control transfer failed: {0}")]
    ControlFailed(#[source] HostError),

    #[error("Report encoding failed: {0}")]
    Encoding(#[from] ReportError),

    #[error("Invalid driver configuration: {0}")]
    InvalidConfig(&'static str),
}

pub type DriverResult<T> = Result<T, DriverError>;

impl From<DenshaError> for DriverError {
    fn from(err: DenshaError) -> Self {
        match err {
            DenshaError::UnknownFunction(function) => Self::InvalidCommand(function),
            DenshaError::Encoding(inner) => Self::Encoding(inner),
        }
    }
}

impl From<Guncon2Error> for DriverError {
    fn from(err: Guncon2Error) -> Self {
        match err {
            Guncon2Error::InvalidIndex(index) => Self::InvalidCommand(index),
            Guncon2Error::Encoding(inner) => Self::Encoding(inner),
        }
    }
}

impl From<SbcError> for DriverError {
    fn from(err: SbcError) -> Self {
        match err {
            SbcError::UnknownLed(value) | SbcError::IntensityOutOfRange(value) => {
                Self::InvalidCommand(value)
            }
        }
    }
}
