//! Densha output commands.
//!
//! The controller has no OUT endpoint. Rumble motors and the door lamp are
//! switched with a vendor `SET_REPORT` on the control pipe carrying a
//! two-byte `[function, state]` payload.

use crate::{DenshaError, DenshaResult};
use serde::{Deserialize, Serialize};
use usbh_class_common::{ControlRequest, RequestKind, report_type};

/// Report id carried in the low byte of `wValue`.
pub const COMMAND_REPORT_ID: u8 = 0x01;

pub const COMMAND_LEN: usize = 2;

/// Output function selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum DenshaFunction {
    /// Rumble motor in the left (power) handle.
    LeftRumble = 1,
    /// Rumble motor in the right (brake) handle.
    RightRumble = 2,
    DoorLamp = 3,
}

impl DenshaFunction {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::LeftRumble),
            2 => Some(Self::RightRumble),
            3 => Some(Self::DoorLamp),
            _ => None,
        }
    }
}

impl TryFrom<u8> for DenshaFunction {
    type Error = DenshaError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_u8(value).ok_or(DenshaError::UnknownFunction(value))
    }
}

/// One output command: switch `function` on or off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DenshaCommand {
    pub function: u8,
    pub state: bool,
}

impl DenshaCommand {
    pub fn new(function: DenshaFunction, state: bool) -> Self {
        Self {
            function: function as u8,
            state,
        }
    }

    /// Command with an arbitrary selector byte, passed through unchecked.
    pub fn raw(function: u8, state: bool) -> Self {
        Self { function, state }
    }

    pub fn power_handle_rumble(state: bool) -> Self {
        Self::new(DenshaFunction::LeftRumble, state)
    }

    pub fn brake_handle_rumble(state: bool) -> Self {
        Self::new(DenshaFunction::RightRumble, state)
    }

    pub fn door_lamp(state: bool) -> Self {
        Self::new(DenshaFunction::DoorLamp, state)
    }

    pub fn payload(&self) -> [u8; COMMAND_LEN] {
        [self.function, u8::from(self.state)]
    }
}

/// Wrap a command into the vendor `SET_REPORT` control request.
///
/// `wValue` is `0x0201` (output report, id 1) and `wIndex` is 0.
pub fn build_command_request(command: &DenshaCommand) -> DenshaResult<ControlRequest> {
    Ok(ControlRequest::set_report(
        RequestKind::Vendor,
        report_type::OUTPUT,
        COMMAND_REPORT_ID,
        0,
        &command.payload(),
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_payloads() {
        assert_eq!(DenshaCommand::power_handle_rumble(true).payload(), [1, 1]);
        assert_eq!(DenshaCommand::brake_handle_rumble(false).payload(), [2, 0]);
        assert_eq!(DenshaCommand::door_lamp(true).payload(), [3, 1]);
        assert_eq!(DenshaCommand::raw(0x7F, true).payload(), [0x7F, 1]);
    }

    #[test]
    fn command_request_setup() -> Result<(), Box<dyn std::error::Error>> {
        let req = build_command_request(&DenshaCommand::door_lamp(true))?;
        assert_eq!(
            req.setup().to_bytes(),
            [0x41, 0x09, 0x01, 0x02, 0x00, 0x00, 0x02, 0x00]
        );
        assert_eq!(req.data(), &[3, 1]);
        Ok(())
    }

    #[test]
    fn function_conversion() {
        assert_eq!(DenshaFunction::try_from(2), Ok(DenshaFunction::RightRumble));
        assert_eq!(
            DenshaFunction::try_from(0),
            Err(DenshaError::UnknownFunction(0))
        );
    }
}
