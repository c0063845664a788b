//! Application notifications.

use crate::{DEFAULT_EP_BUFSIZE, GamepadVariant, InterfaceInstance};

/// Callbacks fired by [`crate::GamepadHost`] from inside its entry points.
///
/// Only `report_received` is required. Callbacks run in the host stack's
/// scheduling context and must not block; re-arming the next inbound
/// transfer is done by the application after the callback returns.
pub trait GamepadEvents<V: GamepadVariant, const BUF: usize = DEFAULT_EP_BUFSIZE> {
    /// The interface finished configuration and is ready for transfers.
    fn mounted(&mut self, _dev_addr: u8, _idx: u8, _instance: &InterfaceInstance<V, BUF>) {}

    /// The device was detached; fired once per instance before it is cleared.
    fn unmounted(&mut self, _dev_addr: u8, _idx: u8) {}

    /// An inbound transfer completed successfully.
    ///
    /// Fires for every completion, valid or not. Check
    /// [`InterfaceInstance::has_new_data`] to see whether the decoded state
    /// was refreshed by this report.
    fn report_received(&mut self, dev_addr: u8, idx: u8, instance: &InterfaceInstance<V, BUF>);

    /// An outbound transfer completed; `report` is the payload that was sent.
    fn report_sent(&mut self, _dev_addr: u8, _idx: u8, _report: &[u8]) {}
}
