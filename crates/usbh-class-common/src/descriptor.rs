//! USB descriptor model and configuration-buffer walker
//!
//! Descriptors are parsed straight out of the byte buffer handed over by the
//! host stack. The walker trusts only `bLength`: a zero length or a length
//! running past the end of the buffer ends the walk instead of looping or
//! reading out of bounds.

use serde::{Deserialize, Serialize};

pub const DESC_TYPE_DEVICE: u8 = 0x01;
pub const DESC_TYPE_CONFIGURATION: u8 = 0x02;
pub const DESC_TYPE_STRING: u8 = 0x03;
pub const DESC_TYPE_INTERFACE: u8 = 0x04;
pub const DESC_TYPE_ENDPOINT: u8 = 0x05;
pub const DESC_TYPE_HID: u8 = 0x21;

pub const INTERFACE_DESC_LEN: usize = 9;
pub const ENDPOINT_DESC_LEN: usize = 7;

/// Direction bit of an endpoint address.
pub const ENDPOINT_DIR_IN: u8 = 0x80;

/// Mask for the packet-size bits of `wMaxPacketSize` (bits 11..12 carry
/// the high-bandwidth multiplier).
pub const MAX_PACKET_SIZE_MASK: u16 = 0x07FF;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndpointDirection {
    Out,
    In,
}

impl EndpointDirection {
    pub fn of(ep_addr: u8) -> Self {
        if ep_addr & ENDPOINT_DIR_IN != 0 {
            Self::In
        } else {
            Self::Out
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransferType {
    Control,
    Isochronous,
    Bulk,
    Interrupt,
}

impl TransferType {
    pub fn from_attributes(attributes: u8) -> Self {
        match attributes & 0x03 {
            0 => Self::Control,
            1 => Self::Isochronous,
            2 => Self::Bulk,
            _ => Self::Interrupt,
        }
    }
}

/// Standard interface descriptor (USB 2.0 table 9-12).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InterfaceDescriptor {
    pub length: u8,
    pub interface_number: u8,
    pub alternate_setting: u8,
    pub num_endpoints: u8,
    pub interface_class: u8,
    pub interface_subclass: u8,
    pub interface_protocol: u8,
    pub string_index: u8,
}

impl InterfaceDescriptor {
    /// Parse an interface descriptor from the head of `data`.
    pub fn parse(data: &[u8]) -> Option<Self> {
        let raw = data.get(..INTERFACE_DESC_LEN)?;
        let &[length, kind, number, alt, endpoints, class, subclass, protocol, string] = raw
        else {
            return None;
        };
        if kind != DESC_TYPE_INTERFACE || usize::from(length) < INTERFACE_DESC_LEN {
            return None;
        }
        Some(Self {
            length,
            interface_number: number,
            alternate_setting: alt,
            num_endpoints: endpoints,
            interface_class: class,
            interface_subclass: subclass,
            interface_protocol: protocol,
            string_index: string,
        })
    }

    pub fn to_bytes(&self) -> [u8; INTERFACE_DESC_LEN] {
        [
            INTERFACE_DESC_LEN as u8,
            DESC_TYPE_INTERFACE,
            self.interface_number,
            self.alternate_setting,
            self.num_endpoints,
            self.interface_class,
            self.interface_subclass,
            self.interface_protocol,
            self.string_index,
        ]
    }
}

/// Standard endpoint descriptor (USB 2.0 table 9-13).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EndpointDescriptor {
    pub address: u8,
    pub attributes: u8,
    pub max_packet_size: u16,
    pub interval: u8,
}

impl EndpointDescriptor {
    pub fn new(address: u8, attributes: u8, max_packet_size: u16, interval: u8) -> Self {
        Self {
            address,
            attributes,
            max_packet_size,
            interval,
        }
    }

    pub fn parse(data: &[u8]) -> Option<Self> {
        let raw = data.get(..ENDPOINT_DESC_LEN)?;
        let &[length, kind, address, attributes, size_lo, size_hi, interval] = raw else {
            return None;
        };
        if kind != DESC_TYPE_ENDPOINT || usize::from(length) < ENDPOINT_DESC_LEN {
            return None;
        }
        Some(Self {
            address,
            attributes,
            max_packet_size: u16::from_le_bytes([size_lo, size_hi]),
            interval,
        })
    }

    pub fn direction(&self) -> EndpointDirection {
        EndpointDirection::of(self.address)
    }

    pub fn transfer_type(&self) -> TransferType {
        TransferType::from_attributes(self.attributes)
    }

    /// Negotiated packet size without the high-bandwidth multiplier bits.
    pub fn packet_size(&self) -> u16 {
        self.max_packet_size & MAX_PACKET_SIZE_MASK
    }

    pub fn to_bytes(&self) -> [u8; ENDPOINT_DESC_LEN] {
        let [lo, hi] = self.max_packet_size.to_le_bytes();
        [
            ENDPOINT_DESC_LEN as u8,
            DESC_TYPE_ENDPOINT,
            self.address,
            self.attributes,
            lo,
            hi,
            self.interval,
        ]
    }
}

/// One sub-descriptor inside a configuration buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawDescriptor<'a> {
    pub descriptor_type: u8,
    pub bytes: &'a [u8],
}

impl<'a> RawDescriptor<'a> {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_endpoint(&self) -> Option<EndpointDescriptor> {
        if self.descriptor_type != DESC_TYPE_ENDPOINT {
            return None;
        }
        EndpointDescriptor::parse(self.bytes)
    }

    pub fn as_interface(&self) -> Option<InterfaceDescriptor> {
        if self.descriptor_type != DESC_TYPE_INTERFACE {
            return None;
        }
        InterfaceDescriptor::parse(self.bytes)
    }
}

/// Iterator over the sub-descriptors of a buffer, driven by `bLength`.
#[derive(Debug, Clone)]
pub struct DescriptorIter<'a> {
    buffer: &'a [u8],
    position: usize,
}

impl<'a> DescriptorIter<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self {
            buffer,
            position: 0,
        }
    }

    /// Bytes consumed so far.
    pub fn position(&self) -> usize {
        self.position
    }
}

impl<'a> Iterator for DescriptorIter<'a> {
    type Item = RawDescriptor<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.buffer.get(self.position..)?;
        let (&length, tail) = rest.split_first()?;
        let &descriptor_type = tail.first()?;
        let length = usize::from(length);
        // bLength 0 or 1 can never advance the cursor past the header.
        if length < 2 {
            self.position = self.buffer.len();
            return None;
        }
        let Some(bytes) = rest.get(..length) else {
            self.position = self.buffer.len();
            return None;
        };
        self.position = self.position.saturating_add(length);
        Some(RawDescriptor {
            descriptor_type,
            bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HID_DESC: [u8; 9] = [0x09, DESC_TYPE_HID, 0x11, 0x01, 0x00, 0x01, 0x22, 0x40, 0x00];

    #[test]
    fn test_endpoint_direction() {
        assert_eq!(EndpointDirection::of(0x81), EndpointDirection::In);
        assert_eq!(EndpointDirection::of(0x02), EndpointDirection::Out);
        assert_eq!(EndpointDirection::of(0x00), EndpointDirection::Out);
    }

    #[test]
    fn test_interface_roundtrip_bytes() {
        let itf = InterfaceDescriptor {
            length: 9,
            interface_number: 2,
            num_endpoints: 2,
            interface_class: 0x58,
            interface_subclass: 0x42,
            ..Default::default()
        };
        let parsed = InterfaceDescriptor::parse(&itf.to_bytes());
        assert_eq!(parsed, Some(itf));
    }

    #[test]
    fn test_interface_rejects_wrong_type() {
        let mut bytes = InterfaceDescriptor::default().to_bytes();
        bytes[1] = DESC_TYPE_ENDPOINT;
        assert!(InterfaceDescriptor::parse(&bytes).is_none());
        assert!(InterfaceDescriptor::parse(&bytes[..4]).is_none());
    }

    #[test]
    fn test_endpoint_packet_size_masks_multiplier() {
        let ep = EndpointDescriptor::new(0x81, 0x03, 0x1840, 1);
        assert_eq!(ep.packet_size(), 0x040);
        assert_eq!(ep.transfer_type(), TransferType::Interrupt);
        assert_eq!(ep.direction(), EndpointDirection::In);
    }

    #[test]
    fn test_walker_skips_hid_descriptor() {
        let mut buf = Vec::new();
        buf.extend_from_slice(&InterfaceDescriptor::default().to_bytes());
        buf.extend_from_slice(&HID_DESC);
        buf.extend_from_slice(&EndpointDescriptor::new(0x81, 0x03, 32, 4).to_bytes());

        let kinds: Vec<u8> = DescriptorIter::new(&buf).map(|d| d.descriptor_type).collect();
        assert_eq!(kinds, vec![DESC_TYPE_INTERFACE, DESC_TYPE_HID, DESC_TYPE_ENDPOINT]);
    }

    #[test]
    fn test_walker_stops_on_zero_length() {
        let buf = [0x00, DESC_TYPE_ENDPOINT, 0x81, 0x03, 0x20, 0x00, 0x01];
        assert_eq!(DescriptorIter::new(&buf).count(), 0);
    }

    #[test]
    fn test_walker_stops_on_truncated_descriptor() {
        let ep = EndpointDescriptor::new(0x81, 0x03, 32, 4).to_bytes();
        let mut iter = DescriptorIter::new(&ep[..5]);
        assert!(iter.next().is_none());
        assert_eq!(iter.position(), 5);
    }
}
