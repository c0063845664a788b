//! Steel Battalion USB identity constants.
//!
//! ## Verification status
//!
//! | Field | Status | Source |
//! |-------|--------|--------|
//! | VID 0x0A7B | ✅ Confirmed (community) | xboxdevwiki "Xbox Input Devices" |
//! | PID 0xD000 | ✅ Confirmed (community) | xboxdevwiki, steel-battalion-net |
//! | XID class 0x58 / subclass 0x42 | ✅ Confirmed | xboxdevwiki XID interface table |

use usbh_class_common::InterfaceDescriptor;

pub const VENDOR_ID: u16 = 0x0A7B;

pub const PRODUCT_SBC: u16 = 0xD000;

/// Interface class shared by every XID input device.
pub const XID_INTERFACE_CLASS: u8 = 0x58;

pub const XID_INTERFACE_SUBCLASS: u8 = 0x42;

/// Returns `true` if both ids match the Steel Battalion controller.
pub fn is_sbc(vid: u16, pid: u16) -> bool {
    vid == VENDOR_ID && pid == PRODUCT_SBC
}

pub fn is_xid_interface(itf: &InterfaceDescriptor) -> bool {
    itf.interface_class == XID_INTERFACE_CLASS && itf.interface_subclass == XID_INTERFACE_SUBCLASS
}

/// Permissive identity check: accepts the interface when any one of VID,
/// PID, interface class or interface subclass matches.
pub fn matches_any_identity(vid: u16, pid: u16, itf: &InterfaceDescriptor) -> bool {
    vid == VENDOR_ID
        || pid == PRODUCT_SBC
        || itf.interface_class == XID_INTERFACE_CLASS
        || itf.interface_subclass == XID_INTERFACE_SUBCLASS
}
