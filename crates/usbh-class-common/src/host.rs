//! Host stack boundary traits

use crate::{ControlRequest, EndpointDescriptor, HostResult};
use serde::{Deserialize, Serialize};

/// Completion status delivered with a finished transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransferResult {
    Success,
    Failed,
    Stalled,
    Timeout,
    Invalid,
}

impl TransferResult {
    pub fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }
}

/// A bulk/interrupt transfer handed to the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transfer<'a> {
    /// Read up to `max_len` bytes on an IN endpoint.
    In { max_len: u16 },
    /// Write `data` on an OUT endpoint.
    Out(&'a [u8]),
}

impl Transfer<'_> {
    pub fn len(&self) -> usize {
        match self {
            Self::In { max_len } => usize::from(*max_len),
            Self::Out(data) => data.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Services a class driver consumes from the USB host stack.
///
/// Every call is synchronous-submit: it returns once the request has been
/// queued, and completions come back later through the driver's
/// `on_transfer_complete` entry point, invoked from the stack's own loop.
pub trait HostStack {
    /// Vendor and product id of an enumerated device.
    fn vendor_product_id(&self, dev_addr: u8) -> Option<(u16, u16)>;

    fn open_endpoint(&mut self, dev_addr: u8, endpoint: &EndpointDescriptor) -> HostResult<()>;

    /// Mark the endpoint as owning one outstanding transfer.
    ///
    /// Returns `false` when a transfer is already outstanding.
    fn claim_endpoint(&mut self, dev_addr: u8, ep_addr: u8) -> bool;

    fn release_endpoint(&mut self, dev_addr: u8, ep_addr: u8) -> bool;

    fn is_endpoint_busy(&self, dev_addr: u8, ep_addr: u8) -> bool;

    fn submit_transfer(
        &mut self,
        dev_addr: u8,
        ep_addr: u8,
        transfer: Transfer<'_>,
    ) -> HostResult<()>;

    fn execute_control_transfer(
        &mut self,
        dev_addr: u8,
        request: &ControlRequest,
    ) -> HostResult<()>;

    /// Tell the stack the driver finished configuring `interface_number`.
    fn signal_configuration_complete(&mut self, dev_addr: u8, interface_number: u8);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transfer_len() {
        assert_eq!(Transfer::In { max_len: 32 }.len(), 32);
        assert_eq!(Transfer::Out(&[1, 2, 3]).len(), 3);
        assert!(Transfer::Out(&[]).is_empty());
    }

    #[test]
    fn test_transfer_result_success() {
        assert!(TransferResult::Success.is_success());
        assert!(!TransferResult::Stalled.is_success());
    }
}
