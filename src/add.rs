//! Addition carried out on encoded records, byte by byte, in working layout.
//!
//! Both operands get their implied bit forced on without first separating the sign, and the
//! result sign bit is whatever falls out of the high byte (always clear). Sums of operands with
//! differing signs, or of two negative operands, therefore do not decode to the arithmetic sum.
//! When the high byte carries out, it is masked to seven bits before the renormalizing shift, so
//! the bit just below the implied bit of the result reads as zero.

use crate::debug;
use crate::float::{EncodedFloat, IMPLIED_BIT, WIRE_LEN};
use crate::shift::{shift_right, shift_right_one};
use crate::{FloatError, Result};

/// Adds two records without leaving the encoded domain.
///
/// A zero operand returns the other one unchanged, bit for bit.
pub fn add(a: EncodedFloat, b: EncodedFloat) -> Result<EncodedFloat> {
    if b.is_zero() {
        return Ok(a);
    }
    if a.is_zero() {
        return Ok(b);
    }

    // Swap only when strictly greater, so `a` is the smaller one on a tie.
    let (smaller, higher) = if a.exponent() > b.exponent() {
        (b, a)
    } else {
        (a, b)
    };
    let [s_exp, s_high, s_mid, s_low] = smaller.to_working();
    let [h_exp, h_high, h_mid, h_low] = higher.to_working();
    let exp_diff = h_exp - s_exp;

    // Trailing byte catches the guard bits; they are dropped below without rounding.
    let aligned: [u8; WIRE_LEN] =
        shift_right(&[s_high | IMPLIED_BIT, s_mid, s_low, 0], exp_diff as usize);

    let (low, carry_low) = add_with_carry(h_low, aligned[2], false);
    let (mid, carry_mid) = add_with_carry(h_mid, aligned[1], carry_low);
    let (high, carry_high) = add_with_carry(h_high | IMPLIED_BIT, aligned[0], carry_mid);

    let mut exponent = h_exp;
    let mut mantissa = [high & !IMPLIED_BIT, mid, low, 0];
    if carry_high {
        exponent = exponent
            .checked_add(1)
            .ok_or(FloatError::SumOverflow { exponent: h_exp })?;
        mantissa = shift_right_one(&mantissa);
    }

    let sum = EncodedFloat::from_working([exponent, mantissa[0], mantissa[1], mantissa[2]]);
    if debug::enabled() {
        eprintln!(
            "[float-add] a={} b={} exp_diff={exp_diff} aligned={} carry={carry_high} sum={}",
            debug::hex_bytes(&a.to_working()),
            debug::hex_bytes(&b.to_working()),
            debug::hex_bytes(&aligned),
            debug::hex_bytes(&sum.to_working()),
        );
    }
    Ok(sum)
}

/// Adds two wire-layout buffers, reversing into working layout and back.
pub fn add_wire(a: [u8; WIRE_LEN], b: [u8; WIRE_LEN]) -> Result<[u8; WIRE_LEN]> {
    add(EncodedFloat::from_wire(a), EncodedFloat::from_wire(b)).map(EncodedFloat::to_wire)
}

fn add_with_carry(lhs: u8, rhs: u8, carry_in: bool) -> (u8, bool) {
    let sum = lhs as u16 + rhs as u16 + carry_in as u16;
    ((sum & 0xFF) as u8, sum > 0xFF)
}
