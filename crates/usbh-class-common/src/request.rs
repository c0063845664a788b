//! Control request encoding
//!
//! A [`ControlRequest`] is a setup packet plus an owned, fixed-capacity data
//! stage. Vendor drivers build these from typed commands and hand them to
//! [`crate::HostStack::execute_control_transfer`].

use crate::{ReportError, ReportResult};
use serde::{Deserialize, Serialize};

/// Largest data stage carried by a [`ControlRequest`].
pub const MAX_CONTROL_PAYLOAD: usize = 64;

/// HID class request codes (HID 1.11 section 7.2).
pub mod hid_request {
    pub const GET_REPORT: u8 = 0x01;
    pub const GET_IDLE: u8 = 0x02;
    pub const GET_PROTOCOL: u8 = 0x03;
    pub const SET_REPORT: u8 = 0x09;
    pub const SET_IDLE: u8 = 0x0A;
    pub const SET_PROTOCOL: u8 = 0x0B;
}

/// HID report types, carried in the high byte of `wValue`.
pub mod report_type {
    pub const INPUT: u8 = 0x01;
    pub const OUTPUT: u8 = 0x02;
    pub const FEATURE: u8 = 0x03;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestDirection {
    HostToDevice = 0,
    DeviceToHost = 1,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestKind {
    Standard = 0,
    Class = 1,
    Vendor = 2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recipient {
    Device = 0,
    Interface = 1,
    Endpoint = 2,
    Other = 3,
}

/// Decoded `bmRequestType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestType {
    pub direction: RequestDirection,
    pub kind: RequestKind,
    pub recipient: Recipient,
}

impl RequestType {
    pub fn new(direction: RequestDirection, kind: RequestKind, recipient: Recipient) -> Self {
        Self {
            direction,
            kind,
            recipient,
        }
    }

    pub fn bits(&self) -> u8 {
        ((self.direction as u8) << 7) | ((self.kind as u8) << 5) | (self.recipient as u8)
    }
}

/// The 8-byte setup stage of a control transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetupPacket {
    pub request_type: RequestType,
    pub request: u8,
    pub value: u16,
    pub index: u16,
    pub length: u16,
}

impl SetupPacket {
    pub fn to_bytes(&self) -> [u8; 8] {
        let [value_lo, value_hi] = self.value.to_le_bytes();
        let [index_lo, index_hi] = self.index.to_le_bytes();
        let [length_lo, length_hi] = self.length.to_le_bytes();
        [
            self.request_type.bits(),
            self.request,
            value_lo,
            value_hi,
            index_lo,
            index_hi,
            length_lo,
            length_hi,
        ]
    }
}

/// `wValue` for GET/SET_REPORT: report type high, report id low.
pub fn report_value(report_type: u8, report_id: u8) -> u16 {
    u16::from_le_bytes([report_id, report_type])
}

/// Setup packet plus the OUT data stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlRequest {
    setup: SetupPacket,
    data: heapless::Vec<u8, MAX_CONTROL_PAYLOAD>,
}

impl ControlRequest {
    /// Build a request; `wLength` is taken from `payload`.
    pub fn new(
        request_type: RequestType,
        request: u8,
        value: u16,
        index: u16,
        payload: &[u8],
    ) -> ReportResult<Self> {
        let data = heapless::Vec::from_slice(payload).map_err(|()| ReportError::Overflow {
            capacity: MAX_CONTROL_PAYLOAD,
        })?;
        // Bounded by MAX_CONTROL_PAYLOAD.
        let length = data.len() as u16;
        Ok(Self {
            setup: SetupPacket {
                request_type,
                request,
                value,
                index,
                length,
            },
            data,
        })
    }

    /// HID `SET_REPORT` addressed to an interface.
    pub fn set_report(
        kind: RequestKind,
        report_type: u8,
        report_id: u8,
        index: u16,
        payload: &[u8],
    ) -> ReportResult<Self> {
        Self::new(
            RequestType::new(RequestDirection::HostToDevice, kind, Recipient::Interface),
            hid_request::SET_REPORT,
            report_value(report_type, report_id),
            index,
            payload,
        )
    }

    pub fn setup(&self) -> &SetupPacket {
        &self.setup
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_type_bits() {
        let vendor_out = RequestType::new(
            RequestDirection::HostToDevice,
            RequestKind::Vendor,
            Recipient::Interface,
        );
        assert_eq!(vendor_out.bits(), 0x41);

        let class_out = RequestType::new(
            RequestDirection::HostToDevice,
            RequestKind::Class,
            Recipient::Interface,
        );
        assert_eq!(class_out.bits(), 0x21);

        let class_in = RequestType::new(
            RequestDirection::DeviceToHost,
            RequestKind::Class,
            Recipient::Interface,
        );
        assert_eq!(class_in.bits(), 0xA1);
    }

    #[test]
    fn test_report_value() {
        assert_eq!(report_value(report_type::OUTPUT, 1), 0x0201);
        assert_eq!(report_value(report_type::OUTPUT, 0), 0x0200);
    }

    #[test]
    fn test_set_report_setup_bytes() -> Result<(), ReportError> {
        let req = ControlRequest::set_report(
            RequestKind::Class,
            report_type::OUTPUT,
            0,
            0,
            &[0, 0, 0, 0, 0, 1],
        )?;
        assert_eq!(
            req.setup().to_bytes(),
            [0x21, 0x09, 0x00, 0x02, 0x00, 0x00, 0x06, 0x00]
        );
        assert_eq!(req.data(), &[0, 0, 0, 0, 0, 1]);
        Ok(())
    }

    #[test]
    fn test_oversized_payload_rejected() {
        let payload = [0u8; MAX_CONTROL_PAYLOAD + 1];
        let result = ControlRequest::set_report(RequestKind::Vendor, 2, 1, 0, &payload);
        assert_eq!(
            result,
            Err(ReportError::Overflow {
                capacity: MAX_CONTROL_PAYLOAD
            })
        );
    }
}
