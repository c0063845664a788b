//! Per-controller strategy plugged into the generic host engine.

use crate::{DriverResult, IdentityMatch};
use core::fmt::Debug;
use usbh_class_common::{ControlRequest, InterfaceDescriptor};

/// Everything that differs between the supported controllers.
///
/// The engine owns the registry, endpoint bookkeeping and transfer life
/// cycle; a variant only says which interfaces it accepts, how a report is
/// decoded, and what (if anything) to send when the interface comes up.
pub trait GamepadVariant {
    /// Sub-type discriminant chosen when the interface is opened.
    type Kind: Copy + Debug + Default + PartialEq;

    /// Decoded controller state.
    type State: Copy + Debug + Default + PartialEq;

    /// Short name used in log lines.
    const NAME: &'static str;

    /// Longest report the variant decodes or sends; endpoint buffers must
    /// hold at least this many bytes.
    const REPORT_LEN: usize;

    /// Decide whether this driver takes the interface.
    fn identify(
        vendor_id: u16,
        product_id: u16,
        interface: &InterfaceDescriptor,
        mode: IdentityMatch,
    ) -> Option<Self::Kind>;

    /// Decode one inbound report, `None` when it is not a valid state report.
    fn decode(kind: Self::Kind, report: &[u8]) -> Option<Self::State>;

    /// Control request sent when the interface is configured.
    fn mount_request(_kind: Self::Kind) -> DriverResult<Option<ControlRequest>> {
        Ok(None)
    }
}
