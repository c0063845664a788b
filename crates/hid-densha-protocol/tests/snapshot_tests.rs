//! Snapshot tests for the Densha protocol.
//!
//! These lock in the control-pipe wire format of every output command.

use hid_densha_protocol::{self as densha, DenshaCommand};
use insta::assert_snapshot;

fn hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02X}"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn encode(command: DenshaCommand) -> Result<String, densha::DenshaError> {
    let req = densha::build_command_request(&command)?;
    Ok(format!(
        "setup=[{}] data=[{}]",
        hex(&req.setup().to_bytes()),
        hex(req.data())
    ))
}

#[test]
fn test_snapshot_power_handle_rumble_on() -> Result<(), densha::DenshaError> {
    assert_snapshot!(
        encode(DenshaCommand::power_handle_rumble(true))?,
        @"setup=[41 09 01 02 00 00 02 00] data=[01 01]"
    );
    Ok(())
}

#[test]
fn test_snapshot_brake_handle_rumble_off() -> Result<(), densha::DenshaError> {
    assert_snapshot!(
        encode(DenshaCommand::brake_handle_rumble(false))?,
        @"setup=[41 09 01 02 00 00 02 00] data=[02 00]"
    );
    Ok(())
}

#[test]
fn test_snapshot_door_lamp_on() -> Result<(), densha::DenshaError> {
    assert_snapshot!(
        encode(DenshaCommand::door_lamp(true))?,
        @"setup=[41 09 01 02 00 00 02 00] data=[03 01]"
    );
    Ok(())
}

#[test]
fn test_snapshot_parse_golden() {
    let pad = densha::parse(&[0x01, 0x10, 0x20, 0x30, 0x04, 0x08]);
    assert_snapshot!(
        format!("{pad:?}"),
        @"Some(DenshaGamepad { buttons: 8, dpad: 4, pedal: 48, power: 32, brake: 16 })"
    );
}

#[test]
fn test_snapshot_parse_rejected() {
    let pad = densha::parse(&[0x01, 0x00, 0x20, 0x30, 0x04, 0x08]);
    assert_snapshot!(format!("{pad:?}"), @"None");
}
