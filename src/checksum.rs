//! 16-bit additive checksum and block trailer codec
//!
//! The checksum is a plain wrapping sum of unsigned bytes into a 16-bit
//! accumulator (no one's-complement carry fold). The trailer is the last
//! two bytes of a block, encoded little-endian with explicit slice
//! indexing; the encoding must be identical on the writer and reader side
//! but is not an external wire format.

/// Size of the checksum trailer at the end of every block, in bytes
pub const TRAILER_SIZE: usize = 2;

/// Compute the 16-bit additive checksum of a payload.
///
/// Each byte is treated as an unsigned 8-bit value; the sum wraps at the
/// natural 16-bit overflow. Pure and deterministic.
pub fn compute(payload: &[u8]) -> u16 {
    payload
        .iter()
        .fold(0u16, |sum, &byte| sum.wrapping_add(u16::from(byte)))
}

/// Get the payload portion of a block (everything before the trailer).
///
/// Panics if the block is shorter than the trailer; region sizing
/// guarantees every block holds at least one payload byte plus trailer.
pub fn payload(block: &[u8]) -> &[u8] {
    &block[..block.len() - TRAILER_SIZE]
}

/// Get the mutable payload portion of a block.
pub fn payload_mut(block: &mut [u8]) -> &mut [u8] {
    let len = block.len();
    &mut block[..len - TRAILER_SIZE]
}

/// Write a checksum value into the trailer of a block.
pub fn write_trailer(block: &mut [u8], value: u16) {
    let at = block.len() - TRAILER_SIZE;
    block[at..].copy_from_slice(&value.to_le_bytes());
}

/// Read the checksum value stored in the trailer of a block.
pub fn read_trailer(block: &[u8]) -> u16 {
    let at = block.len() - TRAILER_SIZE;
    u16::from_le_bytes([block[at], block[at + 1]])
}
