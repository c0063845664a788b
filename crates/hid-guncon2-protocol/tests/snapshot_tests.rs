//! Snapshot tests for the GunCon 2 protocol.
//!
//! These lock in the mode report wire format and the decoded idle report.

use hid_guncon2_protocol::{self as guncon2, Guncon2ModeReport};
use insta::assert_snapshot;

fn hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02X}"))
        .collect::<Vec<_>>()
        .join(" ")
}

#[test]
fn test_snapshot_sixty_hz_request() -> Result<(), guncon2::Guncon2Error> {
    let req = guncon2::build_mode_request(&Guncon2ModeReport::sixty_hz(true).to_bytes())?;
    assert_snapshot!(
        format!("setup=[{}] data=[{}]", hex(&req.setup().to_bytes()), hex(req.data())),
        @"setup=[21 09 00 02 00 00 06 00] data=[00 00 00 00 00 01]"
    );
    Ok(())
}

#[test]
fn test_snapshot_calibrated_mode_report() {
    let report = Guncon2ModeReport::sixty_hz(true).with_offsets(-100, 24);
    assert_snapshot!(hex(&report.to_bytes()), @"9C FF 18 00 00 01");
}

#[test]
fn test_snapshot_parse_idle() {
    let state = guncon2::parse(&[0xFF; 6]);
    assert_snapshot!(
        format!("{state:?}"),
        @"Some(Guncon2State { buttons: 0, dpad: 0, gun_x: 65535, gun_y: 65535 })"
    );
}

#[test]
fn test_snapshot_parse_start_pressed() {
    // Start is bit 7 of byte 1, active-low.
    let state = guncon2::parse(&[0xFF, 0x7F, 0x40, 0x01, 0x90, 0x00]);
    assert_snapshot!(
        format!("{state:?}"),
        @"Some(Guncon2State { buttons: 32, dpad: 0, gun_x: 320, gun_y: 144 })"
    );
}
