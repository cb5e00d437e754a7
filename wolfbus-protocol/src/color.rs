//! RGBA color as carried on the host link
//!
//! Colors travel as four little-endian f32 channels. The same type is the
//! in-memory representation of the LED bank on the board side, so the
//! channel range contract lives here.

/// Maximum number of LEDs a set-LEDs request may carry.
///
/// The current head board exposes three addressable LEDs; the wire format
/// leaves headroom for larger banks.
pub const MAX_LEDS: usize = 8;

/// An RGBA color, each channel in `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// Wire size in bytes (four LE f32 channels)
    pub const WIRE_SIZE: usize = 16;

    /// All channels zero
    pub const OFF: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Opaque white
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);

    /// Create a color from raw channel values
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Check that every channel lies within `[0.0, 1.0]`
    ///
    /// NaN channels fail the check.
    pub fn is_in_range(&self) -> bool {
        let ok = |v: f32| (0.0..=1.0).contains(&v);
        ok(self.r) && ok(self.g) && ok(self.b) && ok(self.a)
    }

    /// Encode to the 16-byte wire representation
    pub fn to_wire(&self) -> [u8; Self::WIRE_SIZE] {
        let mut bytes = [0u8; Self::WIRE_SIZE];
        bytes[0..4].copy_from_slice(&self.r.to_le_bytes());
        bytes[4..8].copy_from_slice(&self.g.to_le_bytes());
        bytes[8..12].copy_from_slice(&self.b.to_le_bytes());
        bytes[12..16].copy_from_slice(&self.a.to_le_bytes());
        bytes
    }

    /// Decode from the 16-byte wire representation
    ///
    /// Returns `None` if the slice is not exactly [`Self::WIRE_SIZE`] bytes.
    pub fn from_wire(bytes: &[u8]) -> Option<Self> {
        if bytes.len() != Self::WIRE_SIZE {
            return None;
        }
        let channel = |i: usize| {
            let mut raw = [0u8; 4];
            raw.copy_from_slice(&bytes[i * 4..i * 4 + 4]);
            f32::from_le_bytes(raw)
        };
        Some(Self::new(channel(0), channel(1), channel(2), channel(3)))
    }
}
