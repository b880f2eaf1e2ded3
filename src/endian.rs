//! Host byte-order helpers.
//!
//! Every multi-byte field on the wire is little-endian regardless of the
//! host. Scalar values go through `to_le_bytes`/`from_le_bytes` in the
//! codec; the helpers here cover the unaligned header fields (type id,
//! payload length, checksum) shared by the frame layer, and are available
//! to hand-written [`Encode`](crate::Encode)/[`Decode`](crate::Decode)
//! implementations.

/// Whether the compilation target is little-endian.
pub const IS_LITTLE_ENDIAN: bool = cfg!(target_endian = "little");

/// Writes `value` into the first two bytes of `buf` in little-endian order.
///
/// # Panics
///
/// Panics if `buf` is shorter than two bytes.
#[inline]
pub fn put_u16_le(buf: &mut [u8], value: u16) {
    buf[..2].copy_from_slice(&value.to_le_bytes());
}

/// Reads a little-endian `u16` from the first two bytes of `buf`.
///
/// # Panics
///
/// Panics if `buf` is shorter than two bytes.
#[inline]
pub fn get_u16_le(buf: &[u8]) -> u16 {
    u16::from_le_bytes([buf[0], buf[1]])
}

/// Writes `value` into the first four bytes of `buf` in little-endian order.
#[inline]
pub fn put_u32_le(buf: &mut [u8], value: u32) {
    buf[..4].copy_from_slice(&value.to_le_bytes());
}

/// Reads a little-endian `u32` from the first four bytes of `buf`.
#[inline]
pub fn get_u32_le(buf: &[u8]) -> u32 {
    let mut bytes = [0u8; 4];
    bytes.copy_from_slice(&buf[..4]);
    u32::from_le_bytes(bytes)
}

/// Writes `value` into the first eight bytes of `buf` in little-endian order.
#[inline]
pub fn put_u64_le(buf: &mut [u8], value: u64) {
    buf[..8].copy_from_slice(&value.to_le_bytes());
}

/// Reads a little-endian `u64` from the first eight bytes of `buf`.
#[inline]
pub fn get_u64_le(buf: &[u8]) -> u64 {
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&buf[..8]);
    u64::from_le_bytes(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn u16_byte_order() {
        let mut buf = [0u8; 2];
        put_u16_le(&mut buf, 0xA1B2);
        assert_eq!(buf, [0xB2, 0xA1]);
        assert_eq!(get_u16_le(&buf), 0xA1B2);
    }

    #[test]
    fn u32_byte_order() {
        let mut buf = [0u8; 4];
        put_u32_le(&mut buf, 0xA1B2_C3D4);
        assert_eq!(buf, [0xD4, 0xC3, 0xB2, 0xA1]);
        assert_eq!(get_u32_le(&buf), 0xA1B2_C3D4);
    }

    #[test]
    fn u64_byte_order() {
        let mut buf = [0u8; 8];
        put_u64_le(&mut buf, 0x0102_0304_0506_0708);
        assert_eq!(buf, [0x08, 0x07, 0x06, 0x05, 0x04, 0x03, 0x02, 0x01]);
        assert_eq!(get_u64_le(&buf), 0x0102_0304_0506_0708);
    }
}
