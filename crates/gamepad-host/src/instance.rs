//! Driver-side state of one claimed interface.

use crate::GamepadVariant;
use core::fmt;

/// Life cycle of one endpoint's transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransferState {
    #[default]
    Idle,
    /// A transfer has been submitted and its completion is pending.
    Armed,
}

/// One bound interface: endpoints, buffers and the last decoded state.
///
/// Endpoint address 0 means "not assigned"; an instance with neither
/// endpoint assigned is inert and never matched by lookups.
pub struct InterfaceInstance<V: GamepadVariant, const BUF: usize> {
    pub(crate) kind: V::Kind,
    pub(crate) state: V::State,
    pub(crate) connected: bool,
    pub(crate) new_data: bool,
    pub(crate) interface_number: u8,
    pub(crate) ep_in: u8,
    pub(crate) ep_out: u8,
    pub(crate) epin_size: u16,
    pub(crate) epout_size: u16,
    pub(crate) epin_buf: [u8; BUF],
    pub(crate) epout_buf: [u8; BUF],
    pub(crate) inbound: TransferState,
    pub(crate) outbound: TransferState,
    pub(crate) inbound_len: usize,
    pub(crate) outbound_len: usize,
}

impl<V: GamepadVariant, const BUF: usize> InterfaceInstance<V, BUF> {
    pub(crate) fn empty() -> Self {
        Self {
            kind: V::Kind::default(),
            state: V::State::default(),
            connected: false,
            new_data: false,
            interface_number: 0,
            ep_in: 0,
            ep_out: 0,
            epin_size: 0,
            epout_size: 0,
            epin_buf: [0; BUF],
            epout_buf: [0; BUF],
            inbound: TransferState::Idle,
            outbound: TransferState::Idle,
            inbound_len: 0,
            outbound_len: 0,
        }
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::empty();
    }

    pub fn kind(&self) -> V::Kind {
        self.kind
    }

    /// Last valid decoded state.
    pub fn state(&self) -> &V::State {
        &self.state
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// True only inside `report_received`, and only when the report that
    /// triggered it decoded successfully.
    pub fn has_new_data(&self) -> bool {
        self.new_data
    }

    pub fn interface_number(&self) -> u8 {
        self.interface_number
    }

    pub fn ep_in(&self) -> Option<u8> {
        (self.ep_in != 0).then_some(self.ep_in)
    }

    pub fn ep_out(&self) -> Option<u8> {
        (self.ep_out != 0).then_some(self.ep_out)
    }

    pub fn epin_size(&self) -> u16 {
        self.epin_size
    }

    pub fn epout_size(&self) -> u16 {
        self.epout_size
    }

    pub fn inbound_state(&self) -> TransferState {
        self.inbound
    }

    pub fn outbound_state(&self) -> TransferState {
        self.outbound
    }

    /// Raw bytes of the last completed inbound transfer.
    pub fn inbound_report(&self) -> &[u8] {
        self.epin_buf.get(..self.inbound_len).unwrap_or(&[])
    }

    /// Raw bytes of the last outbound payload.
    pub fn outbound_report(&self) -> &[u8] {
        self.epout_buf.get(..self.outbound_len).unwrap_or(&[])
    }

    pub(crate) fn is_inert(&self) -> bool {
        self.ep_in == 0 && self.ep_out == 0
    }

    pub(crate) fn owns_endpoint(&self, ep_addr: u8) -> bool {
        ep_addr != 0 && (self.ep_in == ep_addr || self.ep_out == ep_addr)
    }

    /// Length requested for the next inbound transfer.
    pub(crate) fn inbound_request_len(&self) -> usize {
        usize::from(self.epin_size).min(BUF)
    }
}

impl<V: GamepadVariant, const BUF: usize> fmt::Debug for InterfaceInstance<V, BUF> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterfaceInstance")
            .field("kind", &self.kind)
            .field("state", &self.state)
            .field("connected", &self.connected)
            .field("interface_number", &self.interface_number)
            .field("ep_in", &self.ep_in)
            .field("ep_out", &self.ep_out)
            .field("epin_size", &self.epin_size)
            .field("epout_size", &self.epout_size)
            .field("inbound", &self.inbound)
            .field("outbound", &self.outbound)
            .finish_non_exhaustive()
    }
}
