//! Endpoint transfer state machine.
//!
//! Each instance carries one inbound and one outbound [`TransferState`].
//! `Idle -> Armed` happens when a transfer is accepted by the stack,
//! `Armed -> Idle` when its completion is processed. Completions are never
//! followed by an automatic re-arm; the application calls
//! [`GamepadHost::arm_receive`] again when it wants the next report.
//!
//! Completions are matched against the registry before any buffer is
//! touched, so a completion for a detached device or an endpoint with
//! nothing outstanding is rejected instead of corrupting a reused slot.

use crate::{
    DriverError, DriverResult, GamepadEvents, GamepadHost, GamepadVariant, TransferState,
};
use tracing::{trace, warn};
use usbh_class_common::{EndpointDirection, HostStack, Transfer, TransferResult};

impl<V, E, const D: usize, const I: usize, const BUF: usize> GamepadHost<V, E, D, I, BUF>
where
    V: GamepadVariant,
    E: GamepadEvents<V, BUF>,
{
    /// Submit the next inbound transfer for instance `idx`.
    ///
    /// # Errors
    ///
    /// - [`DriverError::NotFound`] for an unknown device or instance
    /// - [`DriverError::NoEndpoint`] when the instance has no IN endpoint
    /// - [`DriverError::Busy`] when a receive is already outstanding or the
    ///   stack refuses the claim
    /// - [`DriverError::SubmitFailed`] when the stack rejects the transfer;
    ///   the claim is released and the instance stays idle
    pub fn arm_receive<H: HostStack>(
        &mut self,
        host: &mut H,
        dev_addr: u8,
        idx: u8,
    ) -> DriverResult<()> {
        let instance = self
            .registry
            .instance_mut(dev_addr, idx)
            .ok_or(DriverError::NotFound)?;
        let ep_in = instance.ep_in().ok_or(DriverError::NoEndpoint)?;
        if instance.inbound == TransferState::Armed || !host.claim_endpoint(dev_addr, ep_in) {
            return Err(DriverError::Busy { ep_addr: ep_in });
        }

        // Bounded by BUF, which config validation caps at u16::MAX.
        let max_len = u16::try_from(instance.inbound_request_len()).unwrap_or(u16::MAX);
        if let Err(err) = host.submit_transfer(dev_addr, ep_in, Transfer::In { max_len }) {
            host.release_endpoint(dev_addr, ep_in);
            warn!(
                "{} receive submit failed dev={} ep=0x{:02X}: {}",
                V::NAME,
                dev_addr,
                ep_in,
                err
            );
            return Err(DriverError::SubmitFailed(err));
        }
        instance.inbound = TransferState::Armed;
        Ok(())
    }

    /// Whether the instance can accept a new receive right now.
    ///
    /// False while a receive is armed, even once the stack has dropped its
    /// claim ahead of delivering the completion.
    pub fn is_ready<H: HostStack>(&self, host: &H, dev_addr: u8, idx: u8) -> bool {
        self.registry
            .instance(dev_addr, idx)
            .filter(|instance| instance.inbound != TransferState::Armed)
            .and_then(|instance| instance.ep_in())
            .is_some_and(|ep_in| !host.is_endpoint_busy(dev_addr, ep_in))
    }

    /// Send `payload` verbatim on the instance's OUT endpoint.
    ///
    /// # Errors
    ///
    /// - [`DriverError::NotFound`] for an unknown device or instance
    /// - [`DriverError::NoEndpoint`] when the instance has no OUT endpoint
    /// - [`DriverError::PayloadTooLarge`] when `payload` exceeds the
    ///   negotiated packet size or the buffer
    /// - [`DriverError::Busy`] when the claim fails
    /// - [`DriverError::SubmitFailed`] when the stack rejects the transfer
    pub fn send_raw<H: HostStack>(
        &mut self,
        host: &mut H,
        dev_addr: u8,
        idx: u8,
        payload: &[u8],
    ) -> DriverResult<()> {
        let instance = self
            .registry
            .instance_mut(dev_addr, idx)
            .ok_or(DriverError::NotFound)?;
        let ep_out = instance.ep_out().ok_or(DriverError::NoEndpoint)?;
        let max = usize::from(instance.epout_size).min(BUF);
        if payload.len() > max {
            return Err(DriverError::PayloadTooLarge {
                len: payload.len(),
                max,
            });
        }
        if instance.outbound == TransferState::Armed || !host.claim_endpoint(dev_addr, ep_out) {
            return Err(DriverError::Busy { ep_addr: ep_out });
        }

        let staged = instance
            .epout_buf
            .get_mut(..payload.len())
            .ok_or(DriverError::PayloadTooLarge {
                len: payload.len(),
                max,
            })?;
        staged.copy_from_slice(payload);
        instance.outbound_len = payload.len();

        if self.config.trace_reports {
            trace!("{} out dev={} idx={} report={:02X?}", V::NAME, dev_addr, idx, payload);
        }
        let submitted = host.submit_transfer(
            dev_addr,
            ep_out,
            Transfer::Out(instance.outbound_report()),
        );
        if let Err(err) = submitted {
            host.release_endpoint(dev_addr, ep_out);
            return Err(DriverError::SubmitFailed(err));
        }
        instance.outbound = TransferState::Armed;
        Ok(())
    }

    /// Process a transfer completion delivered by the host stack.
    ///
    /// On a successful inbound completion the first `bytes` buffered bytes,
    /// clamped to the requested read length, are decoded; a valid report replaces the state and
    /// sets `new_data` for the duration of `report_received`, which fires
    /// either way. A successful outbound completion fires `report_sent`.
    ///
    /// # Errors
    ///
    /// - [`DriverError::NotFound`] when no instance owns `ep_addr`
    /// - [`DriverError::UnexpectedCompletion`] when nothing was outstanding
    /// - [`DriverError::TransferError`] for a failed transfer; the endpoint
    ///   returns to idle and the decoded state is kept
    pub fn on_transfer_complete(
        &mut self,
        dev_addr: u8,
        ep_addr: u8,
        result: TransferResult,
        bytes: usize,
    ) -> DriverResult<()> {
        let Some(idx) = self.registry.find_by_endpoint(dev_addr, ep_addr) else {
            warn!(
                "{} stray completion dev={} ep=0x{:02X}",
                V::NAME,
                dev_addr,
                ep_addr
            );
            return Err(DriverError::NotFound);
        };
        let instance = self
            .registry
            .instance_mut(dev_addr, idx)
            .ok_or(DriverError::NotFound)?;

        let direction = EndpointDirection::of(ep_addr);
        let pending = match direction {
            EndpointDirection::In => &mut instance.inbound,
            EndpointDirection::Out => &mut instance.outbound,
        };
        if *pending != TransferState::Armed {
            warn!(
                "{} completion with nothing outstanding dev={} ep=0x{:02X}",
                V::NAME,
                dev_addr,
                ep_addr
            );
            return Err(DriverError::UnexpectedCompletion { dev_addr, ep_addr });
        }
        *pending = TransferState::Idle;

        if !result.is_success() {
            warn!(
                "{} transfer failed dev={} ep=0x{:02X} result={:?}",
                V::NAME,
                dev_addr,
                ep_addr,
                result
            );
            return Err(DriverError::TransferError { result });
        }

        match direction {
            EndpointDirection::In => {
                let len = bytes.min(instance.inbound_request_len());
                instance.inbound_len = len;
                let report = instance.epin_buf.get(..len).unwrap_or(&[]);
                if self.config.trace_reports {
                    trace!("{} in dev={} idx={} report={:02X?}", V::NAME, dev_addr, idx, report);
                }
                if let Some(state) = V::decode(instance.kind, report) {
                    instance.state = state;
                    instance.new_data = true;
                }
                self.events.report_received(dev_addr, idx, instance);
                instance.new_data = false;
            }
            EndpointDirection::Out => {
                let len = bytes.min(instance.outbound_len);
                let report = instance.epout_buf.get(..len).unwrap_or(&[]);
                self.events.report_sent(dev_addr, idx, report);
            }
        }
        Ok(())
    }

    /// Landing buffer of an armed IN endpoint, for stacks that write the
    /// payload in place before reporting the completion.
    pub fn inbound_buffer_mut(&mut self, dev_addr: u8, ep_addr: u8) -> Option<&mut [u8]> {
        let idx = self.registry.find_by_endpoint(dev_addr, ep_addr)?;
        let instance = self.registry.instance_mut(dev_addr, idx)?;
        if instance.ep_in != ep_addr || instance.inbound != TransferState::Armed {
            return None;
        }
        let len = instance.inbound_request_len();
        instance.epin_buf.get_mut(..len)
    }

    /// Copy a received payload into the landing buffer and complete the
    /// transfer successfully. Bytes beyond the requested length are dropped.
    pub fn deliver_inbound(&mut self, dev_addr: u8, ep_addr: u8, data: &[u8]) -> DriverResult<()> {
        let Some(buffer) = self.inbound_buffer_mut(dev_addr, ep_addr) else {
            return match self.registry.find_by_endpoint(dev_addr, ep_addr) {
                Some(_) => Err(DriverError::UnexpectedCompletion { dev_addr, ep_addr }),
                None => Err(DriverError::NotFound),
            };
        };
        let len = data.len().min(buffer.len());
        if let (Some(dst), Some(src)) = (buffer.get_mut(..len), data.get(..len)) {
            dst.copy_from_slice(src);
        }
        self.on_transfer_complete(dev_addr, ep_addr, TransferResult::Success, len)
    }
}
