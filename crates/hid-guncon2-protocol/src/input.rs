//! GunCon 2 input report parsing.
//!
//! # Report layout
//! | Offset | Size | Field   | Encoding                                      |
//! |--------|------|---------|-----------------------------------------------|
//! | 0      | u8   | keys_lo | active-low: bits 1..3 = C/B/A, bits 4..7 = dpad |
//! | 1      | u8   | keys_hi | active-low: bits 5..7 = trigger/select/start  |
//! | 2–3    | u16  | gun_x   | LE, raw beam position                         |
//! | 4–5    | u16  | gun_y   | LE, raw beam position                         |
//!
//! Every report is exactly 6 bytes; anything else is discarded.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use usbh_class_common::ReportParser;

pub const REPORT_LEN: usize = 6;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Guncon2Buttons: u8 {
        const C = 0x01;
        const B = 0x02;
        const A = 0x04;
        const TRIGGER = 0x08;
        const SELECT = 0x10;
        const START = 0x20;
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Guncon2Dpad: u8 {
        const UP = 0x01;
        const DOWN = 0x02;
        const LEFT = 0x04;
        const RIGHT = 0x08;
    }
}

/// Decoded light-gun state. Buttons and dpad are active-high here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Guncon2State {
    pub buttons: u8,
    pub dpad: u8,
    pub gun_x: u16,
    pub gun_y: u16,
}

impl Guncon2State {
    pub fn pressed(&self) -> Guncon2Buttons {
        Guncon2Buttons::from_bits_truncate(self.buttons)
    }

    pub fn dpad(&self) -> Guncon2Dpad {
        Guncon2Dpad::from_bits_truncate(self.dpad)
    }
}

/// Decode a report; `None` unless it is exactly [`REPORT_LEN`] bytes.
pub fn parse(report: &[u8]) -> Option<Guncon2State> {
    if report.len() != REPORT_LEN {
        return None;
    }
    let mut parser = ReportParser::from_slice(report);
    let lo = !parser.read_u8().ok()?;
    let hi = !parser.read_u8().ok()?;
    let gun_x = parser.read_u16_le().ok()?;
    let gun_y = parser.read_u16_le().ok()?;

    Some(Guncon2State {
        buttons: ((hi >> 2) & 0x38) | ((lo >> 1) & 0x07),
        dpad: (lo >> 4) & 0x0F,
        gun_x,
        gun_y,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_idle_report() {
        let state = parse(&[0xFF; REPORT_LEN]);
        assert_eq!(
            state,
            Some(Guncon2State {
                buttons: 0,
                dpad: 0,
                gun_x: 0xFFFF,
                gun_y: 0xFFFF,
            })
        );
    }

    #[test]
    fn parse_trigger_and_position() -> Result<(), Box<dyn std::error::Error>> {
        // Trigger is bit 5 of byte 1, active-low.
        let state = parse(&[0xFF, 0xDF, 0x34, 0x12, 0x78, 0x00]).ok_or("report rejected")?;
        assert_eq!(state.pressed(), Guncon2Buttons::TRIGGER);
        assert_eq!(state.gun_x, 0x1234);
        assert_eq!(state.gun_y, 0x0078);
        Ok(())
    }

    #[test]
    fn parse_dpad_and_face_buttons() -> Result<(), Box<dyn std::error::Error>> {
        // Byte 0 = 0b1110_1101: dpad UP and button C held.
        let state = parse(&[0xED, 0xFF, 0, 0, 0, 0]).ok_or("report rejected")?;
        assert_eq!(state.dpad(), Guncon2Dpad::UP);
        assert_eq!(state.pressed(), Guncon2Buttons::C);
        Ok(())
    }

    #[test]
    fn parse_all_pressed() -> Result<(), Box<dyn std::error::Error>> {
        let state = parse(&[0x00, 0x00, 0, 0, 0, 0]).ok_or("report rejected")?;
        assert_eq!(state.pressed(), Guncon2Buttons::all());
        assert_eq!(state.dpad(), Guncon2Dpad::all());
        Ok(())
    }

    #[test]
    fn parse_rejects_wrong_length() {
        assert_eq!(parse(&[0xFF; 5]), None);
        assert_eq!(parse(&[0xFF; 7]), None);
        assert_eq!(parse(&[]), None);
    }
}
