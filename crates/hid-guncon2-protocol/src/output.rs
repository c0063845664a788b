//! GunCon 2 mode / calibration report.
//!
//! # Report layout (class `SET_REPORT`, `wValue = 0x0200`)
//! | Offset | Size | Field    | Encoding                              |
//! |--------|------|----------|---------------------------------------|
//! | 0–1    | i16  | x_offset | LE, high byte `0xFF` when negative    |
//! | 2–3    | i16  | y_offset | LE, high byte `0xFF` when negative    |
//! | 4      | u8   | reserved | always 0                              |
//! | 5      | u8   | mode     | `1` = 60 Hz progressive scan          |

use crate::{Guncon2Error, Guncon2Result};
use serde::{Deserialize, Serialize};
use usbh_class_common::{ControlRequest, RequestKind, report_type};

pub const MODE_REPORT_LEN: usize = 6;

/// Byte index of the mode flag.
pub const MODE_INDEX: u8 = 5;

pub const MODE_SIXTY_HZ: u8 = 0x01;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Guncon2ModeReport {
    pub x_offset: i16,
    pub y_offset: i16,
    pub mode: u8,
}

impl Guncon2ModeReport {
    pub fn sixty_hz(enabled: bool) -> Self {
        Self {
            mode: if enabled { MODE_SIXTY_HZ } else { 0 },
            ..Self::default()
        }
    }

    pub fn with_offsets(mut self, x_offset: i16, y_offset: i16) -> Self {
        self.x_offset = x_offset;
        self.y_offset = y_offset;
        self
    }

    /// Report with a single byte set to `state` and every other byte zero.
    ///
    /// This is the raw selector form used by hosts that poke one field at a
    /// time; `index` must be below [`MODE_REPORT_LEN`].
    pub fn encode_selector(index: u8, state: bool) -> Guncon2Result<[u8; MODE_REPORT_LEN]> {
        let mut report = [0u8; MODE_REPORT_LEN];
        let slot = report
            .get_mut(usize::from(index))
            .ok_or(Guncon2Error::InvalidIndex(index))?;
        *slot = u8::from(state);
        Ok(report)
    }

    pub fn to_bytes(&self) -> [u8; MODE_REPORT_LEN] {
        let [x_lo, x_hi] = self.x_offset.to_le_bytes();
        let [y_lo, y_hi] = self.y_offset.to_le_bytes();
        [x_lo, x_hi, y_lo, y_hi, 0, self.mode]
    }
}

/// Wrap a 6-byte mode payload into the class `SET_REPORT` request.
pub fn build_mode_request(payload: &[u8; MODE_REPORT_LEN]) -> Guncon2Result<ControlRequest> {
    Ok(ControlRequest::set_report(
        RequestKind::Class,
        report_type::OUTPUT,
        0,
        0,
        payload,
    )?)
}
