//! Colour to grayscale conversion.
//!
//! Uses the ITU-R 601-2 luma weights `L = R*299/1000 + G*587/1000 + B*114/1000`
//! in 16-bit fixed point, the same rounding common imaging libraries use
//! when converting RGB to a single `L` channel.

const WR: u32 = 19595;
const WG: u32 = 38470;
const WB: u32 = 7471;

/// Luma of an 8-bit RGB triple.
#[inline]
pub fn luma_u8(r: u8, g: u8, b: u8) -> u8 {
    ((u32::from(r) * WR + u32::from(g) * WG + u32::from(b) * WB + 0x8000) >> 16) as u8
}

/// Luma of a 16-bit RGB triple, on the 8-bit scale.
#[inline]
pub fn luma_u16(r: u16, g: u16, b: u16) -> f32 {
    let sum = f64::from(r) * 0.299 + f64::from(g) * 0.587 + f64::from(b) * 0.114;
    (sum / 257.0) as f32
}

/// 16-bit sample on the 8-bit scale.
#[inline]
pub fn scale_u16(v: u16) -> f32 {
    f32::from(v) / 257.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gray_passthrough() {
        for v in [0u8, 1, 77, 128, 254, 255] {
            assert_eq!(luma_u8(v, v, v), v);
        }
    }

    #[test]
    fn test_primaries() {
        assert_eq!(luma_u8(255, 0, 0), 76);
        assert_eq!(luma_u8(0, 255, 0), 150);
        assert_eq!(luma_u8(0, 0, 255), 29);
    }

    #[test]
    fn test_sixteen_bit_scale() {
        assert_eq!(scale_u16(65535), 255.0);
        assert_eq!(scale_u16(0), 0.0);
        assert!((luma_u16(65535, 65535, 65535) - 255.0).abs() < 1e-3);
    }
}
