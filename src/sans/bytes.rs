//! Fixed-width reads at arbitrary offsets.
//!
//! These helpers panic if the read would run past the end of `r`. Callers
//! reading from the image must check bounds first; within a 16-byte record
//! the offsets are fixed by the format.

/// Read a byte holding two packed decimal digits.
///
/// Digits above 9 are not rejected, matching the device.
pub fn read_bcd_byte(r: &[u8], i: usize) -> u8 {
    let b = r[i];
    (b >> 4) * 10 + (b & 0xF)
}

/// Read a little-endian `u16`.
pub fn read_u16_le(r: &[u8], i: usize) -> u16 {
    u16::from_le_bytes([r[i], r[i + 1]])
}

/// Read a little-endian `i16`.
pub fn read_i16_le(r: &[u8], i: usize) -> i16 {
    i16::from_le_bytes([r[i], r[i + 1]])
}

/// Read a little-endian `u32`.
pub fn read_u32_le(r: &[u8], i: usize) -> u32 {
    u32::from_le_bytes([r[i], r[i + 1], r[i + 2], r[i + 3]])
}
