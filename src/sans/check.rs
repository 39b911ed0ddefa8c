//! Helpers for computing and reading the image checksum.

/// Length of the ASCII-hex checksum trailing every image.
pub const CHECKSUM_LENGTH: usize = 4;

/// Compute the checksum of an image.
///
/// The image body (everything before the trailing checksum digits) is summed
/// as little-endian 16-bit words. The device adds each word one step late, so
/// the final word never contributes.
pub fn compute_checksum(r: &[u8]) -> u16 {
    let body = &r[..r.len().saturating_sub(CHECKSUM_LENGTH)];

    let (sum, _) = body
        .chunks_exact(2)
        .map(|w| u16::from_le_bytes([w[0], w[1]]))
        .fold((0u16, 0u16), |(sum, previous), word| {
            (sum.wrapping_add(previous), word)
        });

    sum
}

/// Read the checksum declared by the image.
///
/// Returns `None` if the image is too short or its trailing four bytes are
/// not hexadecimal digits.
pub fn declared_checksum(r: &[u8]) -> Option<u16> {
    let digits = r.get(r.len().checked_sub(CHECKSUM_LENGTH)?..)?;

    digits.iter().try_fold(0u16, |acc, &b| {
        let digit = (b as char).to_digit(16)?;
        Some(acc << 4 | digit as u16)
    })
}
