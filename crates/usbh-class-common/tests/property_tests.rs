//! Property-based tests for descriptor walking and report parsing.
//!
//! The walker is fed arbitrary device-controlled bytes, so it must terminate
//! and never yield a descriptor that runs past the buffer.

use proptest::prelude::*;
use usbh_class_common::{
    DESC_TYPE_ENDPOINT, DescriptorIter, EndpointDescriptor, EndpointDirection,
    InterfaceDescriptor, ReportParser,
};

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(500))]

    /// Walking arbitrary bytes terminates within buffer bounds.
    #[test]
    fn prop_walker_stays_in_bounds(data in proptest::collection::vec(any::<u8>(), 0..256)) {
        let mut iter = DescriptorIter::new(&data);
        let mut total = 0usize;
        let mut steps = 0usize;
        while let Some(desc) = iter.next() {
            prop_assert!(desc.len() >= 2);
            total += desc.len();
            steps += 1;
            prop_assert!(steps <= data.len());
        }
        prop_assert!(total <= data.len());
        prop_assert!(iter.position() <= data.len());
    }

    /// Every endpoint descriptor encoded into a buffer is found again by the walker.
    #[test]
    fn prop_walker_finds_endpoints(
        addresses in proptest::collection::vec(any::<u8>(), 0..8),
        padding in proptest::collection::vec(2u8..16, 0..8),
    ) {
        let mut buf = InterfaceDescriptor::default().to_bytes().to_vec();
        for (i, &addr) in addresses.iter().enumerate() {
            if let Some(&pad) = padding.get(i) {
                // Unknown class-specific descriptor between endpoints.
                buf.push(pad);
                buf.push(0x24);
                buf.extend(std::iter::repeat_n(0u8, usize::from(pad) - 2));
            }
            buf.extend_from_slice(&EndpointDescriptor::new(addr, 0x03, 32, 1).to_bytes());
        }

        let found: Vec<u8> = DescriptorIter::new(&buf)
            .filter(|d| d.descriptor_type == DESC_TYPE_ENDPOINT)
            .filter_map(|d| d.as_endpoint())
            .map(|ep| ep.address)
            .collect();
        prop_assert_eq!(found, addresses);
    }

    /// Direction is determined by bit 7 alone.
    #[test]
    fn prop_direction_bit(addr: u8) {
        let expected = if addr >= 0x80 { EndpointDirection::In } else { EndpointDirection::Out };
        prop_assert_eq!(EndpointDirection::of(addr), expected);
    }

    /// Fixed-offset reads never panic and fail exactly past the end.
    #[test]
    fn prop_byte_at_bounds(
        data in proptest::collection::vec(any::<u8>(), 0..64),
        offset in 0usize..128,
    ) {
        let parser = ReportParser::from_slice(&data);
        prop_assert_eq!(parser.byte_at(offset).is_ok(), offset < data.len());
    }
}
