use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const WIRE_LEN: usize = 4;
pub const EXPONENT_BIAS: i32 = 128;
/// Leading mantissa bit, omitted from storage by normalization.
pub const IMPLIED_BIT: u8 = 0x80;
/// Sign lives in the implied bit's slot of the high mantissa byte.
pub const SIGN_BIT: u8 = 0x80;

const WIRE_LOW: usize = 0;
const WIRE_MID: usize = 1;
const WIRE_HIGH: usize = 2;
const WIRE_EXP: usize = 3;

/// One encoded value, stored in wire layout `[low, mid, high, exponent]`.
///
/// The working layout used by addition is the same four bytes reversed:
/// `[exponent, high, mid, low]`. Records are immutable; arithmetic returns a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "[u8; 4]", into = "[u8; 4]")]
pub struct EncodedFloat {
    wire: [u8; WIRE_LEN],
}

impl EncodedFloat {
    pub const ZERO: EncodedFloat = EncodedFloat {
        wire: [0; WIRE_LEN],
    };

    pub const fn from_wire(wire: [u8; WIRE_LEN]) -> Self {
        Self { wire }
    }

    pub const fn from_working(working: [u8; WIRE_LEN]) -> Self {
        let [exp, high, mid, low] = working;
        Self {
            wire: [low, mid, high, exp],
        }
    }

    pub const fn to_wire(self) -> [u8; WIRE_LEN] {
        self.wire
    }

    pub const fn to_working(self) -> [u8; WIRE_LEN] {
        let [low, mid, high, exp] = self.wire;
        [exp, high, mid, low]
    }

    /// Biased exponent byte; `0` marks the zero value.
    pub const fn exponent(self) -> u8 {
        self.wire[WIRE_EXP]
    }

    /// High mantissa byte as stored, sign bit included.
    pub const fn mantissa_high(self) -> u8 {
        self.wire[WIRE_HIGH]
    }

    pub const fn mantissa_mid(self) -> u8 {
        self.wire[WIRE_MID]
    }

    pub const fn mantissa_low(self) -> u8 {
        self.wire[WIRE_LOW]
    }

    pub const fn is_zero(self) -> bool {
        self.exponent() == 0
    }

    pub const fn is_negative(self) -> bool {
        !self.is_zero() && self.mantissa_high() & SIGN_BIT != 0
    }

    /// Unbiased binary exponent, or `None` for the zero record.
    pub const fn true_exponent(self) -> Option<i32> {
        if self.is_zero() {
            None
        } else {
            Some(self.exponent() as i32 - EXPONENT_BIAS)
        }
    }

    /// 24-bit mantissa with the implied bit restored and the sign removed.
    ///
    /// Meaningless for the zero record, whose mantissa bytes carry no value.
    pub const fn mantissa(self) -> u32 {
        ((self.mantissa_high() | IMPLIED_BIT) as u32) << 16
            | (self.mantissa_mid() as u32) << 8
            | self.mantissa_low() as u32
    }

    pub fn to_f64(self) -> f64 {
        crate::codec::decode(self)
    }
}

impl From<[u8; WIRE_LEN]> for EncodedFloat {
    fn from(wire: [u8; WIRE_LEN]) -> Self {
        Self::from_wire(wire)
    }
}

impl From<EncodedFloat> for [u8; WIRE_LEN] {
    fn from(value: EncodedFloat) -> Self {
        value.to_wire()
    }
}

impl From<EncodedFloat> for f64 {
    fn from(value: EncodedFloat) -> Self {
        value.to_f64()
    }
}

impl TryFrom<f64> for EncodedFloat {
    type Error = crate::FloatError;

    fn try_from(value: f64) -> crate::Result<Self> {
        crate::codec::encode(value)
    }
}

impl fmt::Display for EncodedFloat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [low, mid, high, exp] = self.wire;
        write!(f, "{low:02x} {mid:02x} {high:02x} {exp:02x}")
    }
}

/// Mantissa bytes in binary followed by the unbiased exponent in decimal.
impl fmt::Binary for EncodedFloat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [low, mid, high, exp] = self.wire;
        let exponent = exp as i32 - EXPONENT_BIAS;
        write!(f, "{low:08b} {mid:08b} {high:08b} {exponent}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("expected 4 bytes, got {0}")]
    WrongLength(usize),
    #[error("invalid hex byte '{0}'")]
    InvalidByte(String),
}

/// Parses four wire-order hex bytes: `"cc cc 4c 7d"`, `"0xcc,0xcc,0x4c,0x7d"` or `"cccc4c7d"`.
impl FromStr for EncodedFloat {
    type Err = ParseError;

    fn from_str(raw: &str) -> std::result::Result<Self, Self::Err> {
        let tokens: Vec<&str> = raw
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|token| !token.is_empty())
            .collect();
        let bytes = match tokens.as_slice() {
            [packed]
                if packed.len() == WIRE_LEN * 2
                    && packed.is_ascii()
                    && !has_hex_prefix(packed) =>
            {
                (0..WIRE_LEN)
                    .map(|idx| parse_byte(&packed[idx * 2..idx * 2 + 2]))
                    .collect::<std::result::Result<Vec<u8>, _>>()?
            }
            _ => tokens
                .iter()
                .map(|token| parse_byte(token))
                .collect::<std::result::Result<Vec<u8>, _>>()?,
        };
        let wire: [u8; WIRE_LEN] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| ParseError::WrongLength(bytes.len()))?;
        Ok(Self::from_wire(wire))
    }
}

fn has_hex_prefix(token: &str) -> bool {
    token.starts_with("0x") || token.starts_with("0X")
}

fn parse_byte(token: &str) -> std::result::Result<u8, ParseError> {
    let digits = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
        .unwrap_or(token);
    if digits.is_empty() || digits.len() > 2 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ParseError::InvalidByte(token.to_string()));
    }
    u8::from_str_radix(digits, 16).map_err(|_| ParseError::InvalidByte(token.to_string()))
}
