use crate::debug;
use crate::float::{EncodedFloat, EXPONENT_BIAS, IMPLIED_BIT, SIGN_BIT};
use crate::{FloatError, Result};

const MANTISSA_BITS: i32 = 24;
const MIN_BIASED_EXPONENT: i32 = 1;
const MAX_BIASED_EXPONENT: i32 = u8::MAX as i32;

/// Encodes a value into the 4-byte record, truncating the mantissa to 24 bits.
pub fn encode(value: f64) -> Result<EncodedFloat> {
    if value == 0.0 {
        return Ok(EncodedFloat::ZERO);
    }
    if !value.is_finite() {
        return Err(FloatError::NotFinite(value));
    }

    let sign = if value < 0.0 { SIGN_BIT } else { 0 };
    let (mut fraction, exponent) = normalize(value.abs());
    let biased = exponent + EXPONENT_BIAS;
    if !(MIN_BIASED_EXPONENT..=MAX_BIASED_EXPONENT).contains(&biased) {
        return Err(FloatError::ExponentOutOfRange { value, exponent });
    }

    // Most significant byte first.
    let mut mantissa = [0u8; 3];
    for slot in mantissa.iter_mut() {
        let (byte, rest) = next_byte(fraction);
        *slot = byte;
        fraction = rest;
    }
    let [high, mid, low] = mantissa;
    let high = (high & !IMPLIED_BIT) | sign;

    let encoded = EncodedFloat::from_wire([low, mid, high, biased as u8]);
    if debug::enabled() {
        eprintln!(
            "[float-encode] value={value} exponent={exponent} wire={}",
            debug::hex_bytes(&encoded.to_wire())
        );
    }
    Ok(encoded)
}

/// Decodes a record back to a native value. Any record decodes; exponent `0` is zero.
pub fn decode(value: EncodedFloat) -> f64 {
    let Some(exponent) = value.true_exponent() else {
        return 0.0;
    };
    let magnitude = value.mantissa() as f64 / 2f64.powi(MANTISSA_BITS - exponent);
    if value.is_negative() {
        -magnitude
    } else {
        magnitude
    }
}

/// Scales a positive finite magnitude into `[0.5, 1.0)`, returning it with the binary exponent.
fn normalize(mut magnitude: f64) -> (f64, i32) {
    let mut exponent = 0i32;
    while magnitude >= 0.5 {
        magnitude /= 2.0;
        exponent += 1;
    }
    while magnitude < 0.5 {
        magnitude *= 2.0;
        exponent -= 1;
    }
    (magnitude, exponent)
}

/// Takes the next 8 bits off a fraction in `[0, 1)`, returning the byte and the remainder.
fn next_byte(fraction: f64) -> (u8, f64) {
    let scaled = fraction * 256.0;
    let byte = scaled.floor();
    (byte as u8, scaled - byte)
}
