//! Packed `0x00RRGGBB` pixels, the layout softbuffer presents.

pub const BLACK: u32 = pack_rgb(0, 0, 0);
pub const WHITE: u32 = pack_rgb(255, 255, 255);
pub const RED: u32 = pack_rgb(255, 0, 0);
pub const YELLOW: u32 = pack_rgb(255, 255, 0);

#[inline]
pub const fn pack_rgb(r: u8, g: u8, b: u8) -> u32 {
    // BGRA8 in little-endian memory, alpha at 0
    (b as u32) | ((g as u32) << 8) | ((r as u32) << 16)
}

#[inline]
pub const fn unpack_rgb(c: u32) -> (u8, u8, u8) {
    ((c >> 16) as u8, (c >> 8) as u8, c as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_unpack() {
        let c = pack_rgb(12, 34, 56);
        assert_eq!(c, 0x000C_2238);
        assert_eq!(unpack_rgb(c), (12, 34, 56));
    }
}
