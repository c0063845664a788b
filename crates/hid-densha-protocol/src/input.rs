//! Densha input report parsing.
//!
//! # Report layout
//! | Offset | Size | Field   | Encoding                                 |
//! |--------|------|---------|------------------------------------------|
//! | 0      | u8   | marker  | always `0x01` on a live report           |
//! | 1      | u8   | brake   | notch position, never `0x00` when live   |
//! | 2      | u8   | power   | notch position                           |
//! | 3      | u8   | pedal   | horn pedal                               |
//! | 4      | u8   | dpad    | hat value                                |
//! | 5      | u8   | buttons | see [`DenshaButtons`]                    |
//!
//! Values are reported raw; no notch table is applied.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use usbh_class_common::ReportParser;

/// Value of byte 0 on every live report.
pub const REPORT_MARKER: u8 = 0x01;

/// Shortest report that carries every field.
pub const MIN_REPORT_LEN: usize = 6;

const BRAKE_OFFSET: usize = 1;
const POWER_OFFSET: usize = 2;
const PEDAL_OFFSET: usize = 3;
const DPAD_OFFSET: usize = 4;
const BUTTONS_OFFSET: usize = 5;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct DenshaButtons: u8 {
        const B = 0x01;
        const A = 0x02;
        const C = 0x04;
        const D = 0x08;
        const SELECT = 0x10;
        const START = 0x20;
    }
}

/// Decoded rail controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DenshaGamepad {
    pub buttons: u8,
    pub dpad: u8,
    pub pedal: u8,
    pub power: u8,
    pub brake: u8,
}

impl DenshaGamepad {
    pub fn pressed(&self) -> DenshaButtons {
        DenshaButtons::from_bits_truncate(self.buttons)
    }
}

/// Decode a report, returning `None` when it is not a live state report.
///
/// A report is live when byte 0 is [`REPORT_MARKER`] and the brake byte is
/// non-zero. Bytes past [`MIN_REPORT_LEN`] are ignored.
pub fn parse(report: &[u8]) -> Option<DenshaGamepad> {
    let parser = ReportParser::from_slice(report);
    if parser.len() < MIN_REPORT_LEN {
        return None;
    }

    let marker = parser.byte_at(0).ok()?;
    let brake = parser.byte_at(BRAKE_OFFSET).ok()?;
    if marker != REPORT_MARKER || brake == 0 {
        return None;
    }

    Some(DenshaGamepad {
        brake,
        power: parser.byte_at(POWER_OFFSET).ok()?,
        pedal: parser.byte_at(PEDAL_OFFSET).ok()?,
        dpad: parser.byte_at(DPAD_OFFSET).ok()?,
        buttons: parser.byte_at(BUTTONS_OFFSET).ok()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_golden_report() -> Result<(), Box<dyn std::error::Error>> {
        let pad = parse(&[0x01, 0x10, 0x20, 0x30, 0x04, 0x08]).ok_or("report rejected")?;
        assert_eq!(pad.brake, 0x10);
        assert_eq!(pad.power, 0x20);
        assert_eq!(pad.pedal, 0x30);
        assert_eq!(pad.dpad, 0x04);
        assert_eq!(pad.buttons, 0x08);
        assert_eq!(pad.pressed(), DenshaButtons::D);
        Ok(())
    }

    #[test]
    fn parse_rejects_wrong_marker() {
        assert_eq!(parse(&[0x02, 0x10, 0, 0, 0, 0]), None);
    }

    #[test]
    fn parse_rejects_zero_brake() {
        assert_eq!(parse(&[0x01, 0x00, 0x20, 0x30, 0x04, 0x08]), None);
    }

    #[test]
    fn parse_rejects_short_report() {
        assert_eq!(parse(&[0x01, 0x10, 0x20]), None);
        assert_eq!(parse(&[]), None);
    }

    #[test]
    fn parse_ignores_trailing_bytes() {
        let mut report = vec![0x01, 0x01, 0x02, 0x03, 0x04, 0x30];
        report.resize(32, 0);
        let pad = parse(&report);
        assert_eq!(
            pad.map(|p| p.pressed()),
            Some(DenshaButtons::SELECT | DenshaButtons::START)
        );
    }
}
