//! Byte-order swapping in the style of Linux `swab.h`

/// Swap bytes in a 16-bit value: `0x1234` -> `0x3412`
pub fn swab16(x: u16) -> u16 {
    x.swap_bytes()
}

/// Swap bytes in a 32-bit value: `0x12345678` -> `0x78563412`
pub fn swab32(x: u32) -> u32 {
    x.swap_bytes()
}

/// Swap bytes in a 64-bit value: `0x123456789abcdef0` -> `0xf0debc9a78563412`
pub fn swab64(x: u64) -> u64 {
    x.swap_bytes()
}

/// Swap the 16-bit halves of a 32-bit value: `0x12345678` -> `0x56781234`
pub fn swah32(x: u32) -> u32 {
    x.rotate_left(16)
}

/// Swap the bytes within each 16-bit half: `0x12345678` -> `0x34127856`
pub fn swahb32(x: u32) -> u32 {
    ((x & 0x00ff_00ff) << 8) | ((x & 0xff00_ff00) >> 8)
}
