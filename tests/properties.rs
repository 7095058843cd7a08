use proptest::prelude::*;
use vg5000_float::{add, decode, encode, shift_right, EncodedFloat, FloatError};

fn positive_record() -> impl Strategy<Value = EncodedFloat> {
    (1u8..=255, 0u8..0x80, any::<u8>(), any::<u8>())
        .prop_map(|(exp, high, mid, low)| EncodedFloat::from_working([exp, high, mid, low]))
}

/// Any non-zero record, sign bit included.
fn nonzero_record() -> impl Strategy<Value = EncodedFloat> {
    (1u8..=255, any::<u8>(), any::<u8>(), any::<u8>())
        .prop_map(|(exp, high, mid, low)| EncodedFloat::from_working([exp, high, mid, low]))
}

fn exact_value(mantissa: u32, exponent: i32) -> f64 {
    mantissa as f64 * 2f64.powi(exponent - 24)
}

/// Sum of two positive records using whole 24-bit mantissas instead of a byte carry chain.
fn reference_sum(a: EncodedFloat, b: EncodedFloat) -> EncodedFloat {
    let (smaller, higher) = if a.exponent() > b.exponent() {
        (b, a)
    } else {
        (a, b)
    };
    let diff = u32::from(higher.exponent() - smaller.exponent());
    // Guard byte below the mantissa, then drop it.
    let aligned = ((smaller.mantissa() << 8).checked_shr(diff).unwrap_or(0)) >> 8;
    let total = higher.mantissa() + aligned;
    let mut exponent = higher.exponent();
    let mut mantissa = total & 0x7F_FFFF;
    if total > 0xFF_FFFF {
        exponent += 1;
        mantissa >>= 1;
    }
    let [_, high, mid, low] = mantissa.to_be_bytes();
    EncodedFloat::from_working([exponent, high, mid, low])
}

proptest! {
    #[test]
    fn exact_values_round_trip(
        mantissa in 0x80_0000u32..0x100_0000,
        exponent in -127i32..=127,
        negative in any::<bool>(),
    ) {
        let magnitude = exact_value(mantissa, exponent);
        let value = if negative { -magnitude } else { magnitude };
        let code = encode(value).unwrap();
        prop_assert_eq!(code.exponent() as i32, exponent + 128);
        prop_assert_eq!(code.is_negative(), negative);
        prop_assert_eq!(decode(code), value);
    }

    #[test]
    fn exponent_below_biased_range_fails(mantissa in 0x80_0000u32..0x100_0000) {
        let value = exact_value(mantissa, -128);
        prop_assert_eq!(
            encode(value),
            Err(FloatError::ExponentOutOfRange { value, exponent: -128 })
        );
    }

    #[test]
    fn decode_of_any_value_truncates_toward_zero(value in -1.0e30f64..1.0e30) {
        prop_assume!(value.abs() > 1.0e-30);
        let decoded = decode(encode(value).unwrap());
        prop_assert!(decoded.abs() <= value.abs());
        prop_assert_eq!(decoded.is_sign_negative(), value.is_sign_negative());
        let ulp = 2f64.powi(encode(value).unwrap().true_exponent().unwrap() - 24);
        prop_assert!(value.abs() - decoded.abs() < ulp);
    }

    #[test]
    fn adding_zero_is_bitwise_identity(code in nonzero_record()) {
        prop_assert_eq!(add(code, EncodedFloat::ZERO), Ok(code));
        prop_assert_eq!(add(EncodedFloat::ZERO, code), Ok(code));
    }

    #[test]
    fn adding_zero_to_encoded_value_is_identity(value in -1.0e30f64..1.0e30) {
        let code = encode(value).unwrap_or(EncodedFloat::ZERO);
        prop_assert_eq!(add(code, encode(0.0).unwrap()), Ok(code));
        prop_assert_eq!(add(encode(0.0).unwrap(), code), Ok(code));
    }

    #[test]
    fn positive_addition_commutes(a in positive_record(), b in positive_record()) {
        prop_assert_eq!(add(a, b), add(b, a));
    }

    #[test]
    fn encoded_positive_sums_follow_reference(
        mantissa_a in 0x80_0000u32..0x100_0000,
        exponent_a in -100i32..=100,
        mantissa_b in 0x80_0000u32..0x100_0000,
        exponent_b in -100i32..=100,
    ) {
        let a = encode(exact_value(mantissa_a, exponent_a)).unwrap();
        let b = encode(exact_value(mantissa_b, exponent_b)).unwrap();
        let expected = reference_sum(a, b);
        prop_assert_eq!(add(a, b), Ok(expected));
        prop_assert_eq!(add(b, a), Ok(expected));
    }

    #[test]
    fn encoded_sums_with_close_exponents_follow_reference(
        mantissa_a in 0x80_0000u32..0x100_0000,
        mantissa_b in 0x80_0000u32..0x100_0000,
        exponent in -20i32..=20,
        gap in 0i32..=26,
    ) {
        let a = encode(exact_value(mantissa_a, exponent)).unwrap();
        let b = encode(exact_value(mantissa_b, exponent - gap)).unwrap();
        prop_assert_eq!(add(a, b), Ok(reference_sum(a, b)));
    }

    #[test]
    fn shift_matches_integer_shift(bytes in any::<[u8; 4]>(), positions in 0usize..64) {
        let expected = u32::from_be_bytes(bytes)
            .checked_shr(positions as u32)
            .unwrap_or(0)
            .to_be_bytes();
        prop_assert_eq!(shift_right(&bytes, positions), expected);
    }
}
