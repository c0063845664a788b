//! Property tests for the GunCon 2 protocol.

use hid_guncon2_protocol::{self as guncon2, Guncon2Error, Guncon2ModeReport, MODE_REPORT_LEN};
use proptest::prelude::*;

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(500))]

    /// Only 6-byte reports are accepted.
    #[test]
    fn prop_length_gate(data in proptest::collection::vec(any::<u8>(), 0..64)) {
        prop_assert_eq!(guncon2::parse(&data).is_some(), data.len() == guncon2::REPORT_LEN);
    }

    /// Decoded buttons and dpad never carry bits outside their masks.
    #[test]
    fn prop_decoded_masks(report in proptest::array::uniform6(any::<u8>())) {
        let state = guncon2::parse(&report);
        prop_assert!(state.is_some());
        if let Some(state) = state {
            prop_assert_eq!(state.buttons & !0x3F, 0);
            prop_assert_eq!(state.dpad & !0x0F, 0);
        }
    }

    /// Position bytes decode little-endian regardless of key bytes.
    #[test]
    fn prop_position_little_endian(keys in any::<[u8; 2]>(), x in any::<u16>(), y in any::<u16>()) {
        let [x_lo, x_hi] = x.to_le_bytes();
        let [y_lo, y_hi] = y.to_le_bytes();
        let [k0, k1] = keys;
        let state = guncon2::parse(&[k0, k1, x_lo, x_hi, y_lo, y_hi]);
        prop_assert_eq!(state.map(|s| (s.gun_x, s.gun_y)), Some((x, y)));
    }

    /// Offsets round-trip through the two's-complement byte pairs.
    #[test]
    fn prop_offsets_encode_as_i16(x in any::<i16>(), y in any::<i16>()) {
        let bytes = Guncon2ModeReport::default().with_offsets(x, y).to_bytes();
        let [b0, b1, b2, b3, _, _] = bytes;
        prop_assert_eq!(i16::from_le_bytes([b0, b1]), x);
        prop_assert_eq!(i16::from_le_bytes([b2, b3]), y);
    }

    /// Selector form accepts indices 0..6 and rejects everything else.
    #[test]
    fn prop_selector_index_bound(index in any::<u8>(), state in any::<bool>()) {
        let result = Guncon2ModeReport::encode_selector(index, state);
        if usize::from(index) < MODE_REPORT_LEN {
            prop_assert!(result.is_ok());
        } else {
            prop_assert_eq!(result, Err(Guncon2Error::InvalidIndex(index)));
        }
    }
}
