//! Color to register word packing

use wolfbus_protocol::Color;

/// Pack a color into one 32-bit LED register word
///
/// Channel layout, low byte first: red in bits 0-7, green in 8-15, blue in
/// 16-23, alpha in 24-31. Each channel is a truncating multiply-by-255; no
/// rounding and no clamping, the bank has already validated the range.
pub fn color_to_word(color: &Color) -> u32 {
    let mut word = (color.r * 255.0) as u8 as u32;
    word |= ((color.g * 255.0) as u8 as u32) << 8;
    word |= ((color.b * 255.0) as u8 as u32) << 16;
    word |= ((color.a * 255.0) as u8 as u32) << 24;
    word
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_white_packs_to_all_ones() {
        assert_eq!(color_to_word(&Color::WHITE), 0xFFFF_FFFF);
    }

    #[test]
    fn test_off_packs_to_zero() {
        assert_eq!(color_to_word(&Color::OFF), 0);
    }

    #[test]
    fn test_channel_byte_positions() {
        assert_eq!(color_to_word(&Color::new(1.0, 0.0, 0.0, 0.0)), 0x0000_00FF);
        assert_eq!(color_to_word(&Color::new(0.0, 1.0, 0.0, 0.0)), 0x0000_FF00);
        assert_eq!(color_to_word(&Color::new(0.0, 0.0, 1.0, 0.0)), 0x00FF_0000);
        assert_eq!(color_to_word(&Color::new(0.0, 0.0, 0.0, 1.0)), 0xFF00_0000);
    }

    #[test]
    fn test_conversion_truncates() {
        // 0.5 * 255 = 127.5, truncated to 127
        let word = color_to_word(&Color::new(0.5, 0.0, 0.0, 0.0));
        assert_eq!(word & 0xFF, 127);

        // 0.999 * 255 = 254.745, truncated to 254
        let word = color_to_word(&Color::new(0.999, 0.0, 0.0, 0.0));
        assert_eq!(word & 0xFF, 254);
    }
}
