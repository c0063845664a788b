//! Namco USB vendor and product ID constants.
//!
//! ## Verification status
//!
//! | Field | Status | Source |
//! |-------|--------|--------|
//! | VID 0x0B9A | ✅ Confirmed | USB ID registry (Namco) |
//! | GunCon 2 PID 0x016A | ✅ Confirmed (community) | GunCon 2 descriptor dumps, Linux `guncon2` driver |

/// Namco USB Vendor ID.
pub const VENDOR_ID: u16 = 0x0B9A;

/// GunCon 2 light-gun (NPC-106).
pub const PRODUCT_GUNCON2: u16 = 0x016A;

/// Returns `true` if both ids match the GunCon 2.
pub fn is_guncon2(vid: u16, pid: u16) -> bool {
    vid == VENDOR_ID && pid == PRODUCT_GUNCON2
}

/// Permissive identity check: accepts a device when either id matches.
///
/// Deployed hosts have always bound the gun this way, including clones that
/// report a foreign vendor id.
pub fn matches_either_id(vid: u16, pid: u16) -> bool {
    vid == VENDOR_ID || pid == PRODUCT_GUNCON2
}
