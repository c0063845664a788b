//! Steel Battalion state report parsing.
//!
//! # Report layout (26 bytes)
//! | Offset | Size | Field          | Encoding                                   |
//! |--------|------|----------------|--------------------------------------------|
//! | 0      | u8   | reserved       | XID header                                 |
//! | 1      | u8   | length         | XID header                                 |
//! | 2–5    | u32  | buttons 0..31  | LE bit field, see [`SbcButtons`]           |
//! | 6      | u8   | buttons 32..38 | bits 0..6; bit 7 always set                |
//! | 7      | u8   | marker         | always `0x00`                              |
//! | 9      | u8   | aiming_x       | high byte of a 16-bit axis                 |
//! | 11     | u8   | aiming_y       | high byte                                  |
//! | 13     | u8   | rotation_lever | high byte                                  |
//! | 15     | u8   | sight_change_x | high byte                                  |
//! | 17     | u8   | sight_change_y | high byte                                  |
//! | 19     | u8   | left_pedal     | high byte                                  |
//! | 21     | u8   | middle_pedal   | high byte                                  |
//! | 23     | u8   | right_pedal    | high byte                                  |
//! | 24     | u8   | tuner_dial     | low nibble; high nibble always 0           |
//! | 25     | u8   | gear_lever     | signed: `-2` = R, `-1` = N, 1..5           |

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use usbh_class_common::ReportParser;

pub const REPORT_LEN: usize = 26;

const BUTTONS_OFFSET: usize = 2;
const BUTTONS_HIGH_OFFSET: usize = 6;
const MARKER_OFFSET: usize = 7;
const AIMING_X_OFFSET: usize = 9;
const AIMING_Y_OFFSET: usize = 11;
const ROTATION_OFFSET: usize = 13;
const SIGHT_X_OFFSET: usize = 15;
const SIGHT_Y_OFFSET: usize = 17;
const LEFT_PEDAL_OFFSET: usize = 19;
const MIDDLE_PEDAL_OFFSET: usize = 21;
const RIGHT_PEDAL_OFFSET: usize = 23;
const TUNER_OFFSET: usize = 24;
const GEAR_OFFSET: usize = 25;

/// Bit 7 of byte 6 is set on every live report.
const LIVE_BIT: u8 = 0x80;

bitflags! {
    /// The 39 cockpit buttons and toggle switches.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SbcButtons: u64 {
        const RIGHT_JOY_MAIN_WEAPON = 1 << 0;
        const RIGHT_JOY_FIRE = 1 << 1;
        const RIGHT_JOY_LOCK_ON = 1 << 2;
        const EJECT = 1 << 3;
        const COCKPIT_HATCH = 1 << 4;
        const IGNITION = 1 << 5;
        const START = 1 << 6;
        const MULTI_MON_OPEN_CLOSE = 1 << 7;
        const MULTI_MON_MAP_ZOOM_IN_OUT = 1 << 8;
        const MULTI_MON_MODE_SELECT = 1 << 9;
        const MULTI_MON_SUB_MONITOR = 1 << 10;
        const MAIN_MON_ZOOM_IN = 1 << 11;
        const MAIN_MON_ZOOM_OUT = 1 << 12;
        const FUNCTION_FSS = 1 << 13;
        const FUNCTION_MANIPULATOR = 1 << 14;
        const FUNCTION_LINE_COLOR_CHANGE = 1 << 15;
        const WASHING = 1 << 16;
        const EXTINGUISHER = 1 << 17;
        const CHAFF = 1 << 18;
        const FUNCTION_TANK_DETACH = 1 << 19;
        const FUNCTION_OVERRIDE = 1 << 20;
        const FUNCTION_NIGHT_SCOPE = 1 << 21;
        const FUNCTION_F1 = 1 << 22;
        const FUNCTION_F2 = 1 << 23;
        const FUNCTION_F3 = 1 << 24;
        const WEAPON_CON_MAIN = 1 << 25;
        const WEAPON_CON_SUB = 1 << 26;
        const WEAPON_CON_MAGAZINE = 1 << 27;
        const COMM1 = 1 << 28;
        const COMM2 = 1 << 29;
        const COMM3 = 1 << 30;
        const COMM4 = 1 << 31;
        const COMM5 = 1 << 32;
        const LEFT_JOY_SIGHT_CHANGE = 1 << 33;
        const TOGGLE_FILTER_CONTROL = 1 << 34;
        const TOGGLE_OXYGEN_SUPPLY = 1 << 35;
        const TOGGLE_FUEL_FLOW_RATE = 1 << 36;
        const TOGGLE_BUFFER_MATERIAL = 1 << 37;
        const TOGGLE_VT_LOCATION = 1 << 38;
    }
}

/// Gear lever position decoded from the raw byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SbcGear {
    Reverse,
    Neutral,
    Forward(u8),
    Unknown(u8),
}

impl SbcGear {
    pub fn from_raw(raw: u8) -> Self {
        match raw {
            0xFE => Self::Reverse,
            0xFF => Self::Neutral,
            1..=5 => Self::Forward(raw),
            other => Self::Unknown(other),
        }
    }
}

/// Decoded cockpit state. Axes are the raw high bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SbcState {
    pub buttons: u64,
    pub aiming_x: u8,
    pub aiming_y: u8,
    pub rotation_lever: u8,
    pub sight_change_x: u8,
    pub sight_change_y: u8,
    pub left_pedal: u8,
    pub middle_pedal: u8,
    pub right_pedal: u8,
    pub tuner_dial: u8,
    pub gear_lever: u8,
}

impl SbcState {
    pub fn pressed(&self) -> SbcButtons {
        SbcButtons::from_bits_truncate(self.buttons)
    }

    pub fn gear(&self) -> SbcGear {
        SbcGear::from_raw(self.gear_lever)
    }
}

/// Decode a report; `None` unless it is a 26-byte live state report.
pub fn parse(report: &[u8]) -> Option<SbcState> {
    if report.len() != REPORT_LEN {
        return None;
    }
    let parser = ReportParser::from_slice(report);
    let high = parser.byte_at(BUTTONS_HIGH_OFFSET).ok()?;
    let marker = parser.byte_at(MARKER_OFFSET).ok()?;
    let tuner = parser.byte_at(TUNER_OFFSET).ok()?;
    if high & LIVE_BIT == 0 || marker != 0 || tuner & 0xF0 != 0 {
        return None;
    }

    let low = parser.u16_le_at(BUTTONS_OFFSET).ok()?;
    let mid = parser.u16_le_at(BUTTONS_OFFSET + 2).ok()?;
    let buttons = (u64::from(high & !LIVE_BIT) << 32) | (u64::from(mid) << 16) | u64::from(low);

    Some(SbcState {
        buttons,
        aiming_x: parser.byte_at(AIMING_X_OFFSET).ok()?,
        aiming_y: parser.byte_at(AIMING_Y_OFFSET).ok()?,
        rotation_lever: parser.byte_at(ROTATION_OFFSET).ok()?,
        sight_change_x: parser.byte_at(SIGHT_X_OFFSET).ok()?,
        sight_change_y: parser.byte_at(SIGHT_Y_OFFSET).ok()?,
        left_pedal: parser.byte_at(LEFT_PEDAL_OFFSET).ok()?,
        middle_pedal: parser.byte_at(MIDDLE_PEDAL_OFFSET).ok()?,
        right_pedal: parser.byte_at(RIGHT_PEDAL_OFFSET).ok()?,
        tuner_dial: tuner & 0x0F,
        gear_lever: parser.byte_at(GEAR_OFFSET).ok()?,
    })
}
