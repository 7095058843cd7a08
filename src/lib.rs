//! Codec for the VG5000 BASIC 4-byte floating-point format.
//!
//! Values are stored as three mantissa bytes followed by an excess-128 exponent, with the
//! mantissa's leading bit implied and its slot reused for the sign. Addition works directly on
//! the encoded bytes and never widens to a native float.

use thiserror::Error;

pub mod add;
pub mod codec;
pub mod debug;
pub mod float;
pub mod shift;

pub use add::{add, add_wire};
pub use codec::{decode, encode};
pub use float::{EncodedFloat, ParseError, EXPONENT_BIAS, IMPLIED_BIT, SIGN_BIT, WIRE_LEN};
pub use shift::{shift_right, shift_right_one};

pub type Result<T> = std::result::Result<T, FloatError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FloatError {
    #[error("value {value} needs binary exponent {exponent}, outside the biased byte range")]
    ExponentOutOfRange { value: f64, exponent: i32 },
    #[error("value {0} is not finite")]
    NotFinite(f64),
    #[error("sum exponent overflows past 0xFF (from 0x{exponent:02X})")]
    SumOverflow { exponent: u8 },
}
