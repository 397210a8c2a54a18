//! Packed colours in ABGR order (little-endian 0xAABBGGRR -> bytes [R, G, B, A]),
//! the layout a canvas `ImageData` buffer accepts without swizzling.

#[inline]
pub const fn abgr(r: u8, g: u8, b: u8) -> u32 {
    0xFF00_0000 | ((b as u32) << 16) | ((g as u32) << 8) | (r as u32)
}

#[inline]
pub const fn red(color: u32) -> u8 {
    (color & 0xFF) as u8
}

#[inline]
pub const fn green(color: u32) -> u8 {
    ((color >> 8) & 0xFF) as u8
}

#[inline]
pub const fn blue(color: u32) -> u8 {
    ((color >> 16) & 0xFF) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channels_round_trip() {
        let c = abgr(64, 128, 255);
        assert_eq!(c, 0xFFFF_8040);
        assert_eq!((red(c), green(c), blue(c)), (64, 128, 255));
    }
}
