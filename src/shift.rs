//! Right shifts over big-endian byte buffers, used to align mantissas before addition.

/// Shifts the buffer, read as one big-endian unsigned integer, right by a single bit.
///
/// Each byte's outgoing low bit becomes the incoming high bit of the byte after it; the first
/// byte always takes in a zero.
pub fn shift_right_one<const N: usize>(bytes: &[u8; N]) -> [u8; N] {
    let mut out = [0u8; N];
    let mut carry = 0u8;
    for (dst, &byte) in out.iter_mut().zip(bytes.iter()) {
        *dst = (byte >> 1) | (carry << 7);
        carry = byte & 1;
    }
    out
}

/// Applies [`shift_right_one`] `positions` times.
///
/// Anything at or past the buffer's bit width yields all zeroes.
pub fn shift_right<const N: usize>(bytes: &[u8; N], positions: usize) -> [u8; N] {
    if positions >= N * 8 {
        return [0u8; N];
    }
    let mut out = *bytes;
    for _ in 0..positions {
        out = shift_right_one(&out);
    }
    out
}
