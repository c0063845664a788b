//! Taito USB vendor and product ID constants.
//!
//! ## Verification status
//!
//! | Field | Status | Source |
//! |-------|--------|--------|
//! | VID 0x0AE4 | ✅ Confirmed | USB ID registry (Taito Corporation) |
//! | PS2 Type 2 PID 0x0004 | ✅ Confirmed (community) | TCPP-20011 descriptor dumps |
//!
//! Only the PS2 "Type 2" two-handle controller (TCPP-20011) is supported. It
//! exposes a single vendor interface with one interrupt IN endpoint.

/// Taito Corporation USB Vendor ID.
pub const VENDOR_ID: u16 = 0x0AE4;

/// Densha de GO! PS2 "Type 2" two-handle controller (TCPP-20011).
pub const PRODUCT_PS2_TYPE2: u16 = 0x0004;

/// Returns `true` if the VID/PID pair identifies a supported controller.
pub fn is_densha(vid: u16, pid: u16) -> bool {
    vid == VENDOR_ID && pid == PRODUCT_PS2_TYPE2
}

pub fn product_name(pid: u16) -> Option<&'static str> {
    match pid {
        PRODUCT_PS2_TYPE2 => Some("Densha de GO! Type 2 (TCPP-20011)"),
        _ => None,
    }
}
