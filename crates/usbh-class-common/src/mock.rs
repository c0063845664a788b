//! In-memory host stack for driver tests.

use crate::{
    ControlRequest, EndpointDescriptor, HostError, HostResult, HostStack, Transfer,
};
use std::collections::{BTreeMap, BTreeSet};

/// A transfer accepted by [`MockHost::submit_transfer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedTransfer {
    pub dev_addr: u8,
    pub ep_addr: u8,
    /// Requested length for IN transfers, payload length for OUT.
    pub len: usize,
    /// Copy of the OUT payload; empty for IN transfers.
    pub data: Vec<u8>,
}

#[derive(Debug, Default)]
pub struct MockHost {
    identities: BTreeMap<u8, (u16, u16)>,
    opened: Vec<(u8, EndpointDescriptor)>,
    claimed: BTreeSet<(u8, u8)>,
    submitted: Vec<SubmittedTransfer>,
    controls: Vec<(u8, ControlRequest)>,
    configured: Vec<(u8, u8)>,
    fail_open: bool,
    fail_submit: bool,
    fail_control: bool,
}

impl MockHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an enumerated device.
    pub fn with_device(mut self, dev_addr: u8, vendor_id: u16, product_id: u16) -> Self {
        self.attach(dev_addr, vendor_id, product_id);
        self
    }

    pub fn attach(&mut self, dev_addr: u8, vendor_id: u16, product_id: u16) {
        self.identities.insert(dev_addr, (vendor_id, product_id));
    }

    /// Forget a device and drop its claims, as a real stack does on unplug.
    pub fn detach(&mut self, dev_addr: u8) {
        self.identities.remove(&dev_addr);
        self.claimed.retain(|(dev, _)| *dev != dev_addr);
        self.opened.retain(|(dev, _)| *dev != dev_addr);
    }

    pub fn fail_endpoint_open(&mut self, fail: bool) {
        self.fail_open = fail;
    }

    pub fn fail_submit(&mut self, fail: bool) {
        self.fail_submit = fail;
    }

    pub fn fail_control(&mut self, fail: bool) {
        self.fail_control = fail;
    }

    /// Release the claim on an endpoint the way the stack does right before
    /// it invokes the driver's completion handler.
    pub fn finish_transfer(&mut self, dev_addr: u8, ep_addr: u8) {
        self.claimed.remove(&(dev_addr, ep_addr));
    }

    pub fn opened_endpoints(&self) -> &[(u8, EndpointDescriptor)] {
        &self.opened
    }

    pub fn submitted(&self) -> &[SubmittedTransfer] {
        &self.submitted
    }

    pub fn last_submitted(&self) -> Option<&SubmittedTransfer> {
        self.submitted.last()
    }

    pub fn control_requests(&self) -> &[(u8, ControlRequest)] {
        &self.controls
    }

    pub fn last_control(&self) -> Option<&ControlRequest> {
        self.controls.last().map(|(_, req)| req)
    }

    pub fn configured_interfaces(&self) -> &[(u8, u8)] {
        &self.configured
    }

    pub fn is_claimed(&self, dev_addr: u8, ep_addr: u8) -> bool {
        self.claimed.contains(&(dev_addr, ep_addr))
    }

    pub fn clear_history(&mut self) {
        self.submitted.clear();
        self.controls.clear();
        self.configured.clear();
    }
}

impl HostStack for MockHost {
    fn vendor_product_id(&self, dev_addr: u8) -> Option<(u16, u16)> {
        self.identities.get(&dev_addr).copied()
    }

    fn open_endpoint(&mut self, dev_addr: u8, endpoint: &EndpointDescriptor) -> HostResult<()> {
        if self.fail_open || !self.identities.contains_key(&dev_addr) {
            return Err(HostError::EndpointOpen {
                dev_addr,
                ep_addr: endpoint.address,
            });
        }
        self.opened.push((dev_addr, *endpoint));
        Ok(())
    }

    fn claim_endpoint(&mut self, dev_addr: u8, ep_addr: u8) -> bool {
        if !self.identities.contains_key(&dev_addr) {
            return false;
        }
        self.claimed.insert((dev_addr, ep_addr))
    }

    fn release_endpoint(&mut self, dev_addr: u8, ep_addr: u8) -> bool {
        self.claimed.remove(&(dev_addr, ep_addr))
    }

    fn is_endpoint_busy(&self, dev_addr: u8, ep_addr: u8) -> bool {
        self.claimed.contains(&(dev_addr, ep_addr))
    }

    fn submit_transfer(
        &mut self,
        dev_addr: u8,
        ep_addr: u8,
        transfer: Transfer<'_>,
    ) -> HostResult<()> {
        if self.fail_submit || !self.identities.contains_key(&dev_addr) {
            return Err(HostError::SubmitRejected { dev_addr, ep_addr });
        }
        let data = match transfer {
            Transfer::In { .. } => Vec::new(),
            Transfer::Out(payload) => payload.to_vec(),
        };
        self.submitted.push(SubmittedTransfer {
            dev_addr,
            ep_addr,
            len: transfer.len(),
            data,
        });
        Ok(())
    }

    fn execute_control_transfer(
        &mut self,
        dev_addr: u8,
        request: &ControlRequest,
    ) -> HostResult<()> {
        if self.fail_control || !self.identities.contains_key(&dev_addr) {
            return Err(HostError::ControlRejected { dev_addr });
        }
        self.controls.push((dev_addr, request.clone()));
        Ok(())
    }

    fn signal_configuration_complete(&mut self, dev_addr: u8, interface_number: u8) {
        self.configured.push((dev_addr, interface_number));
    }
}
