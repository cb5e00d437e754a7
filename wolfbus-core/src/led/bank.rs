//! LED bank state holder

use heapless::Vec;
use wolfbus_protocol::{Color, MAX_LEDS};

/// Why a set-all request was rejected
///
/// No mutation has happened when one of these is returned: the whole
/// request is validated before anything is committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SetLedsError {
    /// Request carries a different number of colors than the bank holds
    LengthMismatch { requested: usize, expected: usize },
    /// A channel of the color at `index` lies outside [0, 1]
    ChannelOutOfRange { index: usize },
}

/// The authoritative LED color state
///
/// Length is fixed at construction. The dirty flag starts set so the very
/// first write cycle pushes the boot pattern to the board, and is set again
/// by every successful [`LedBank::set_all`]. Only
/// [`LedBank::consume_if_dirty`] clears it.
#[derive(Debug, Clone)]
pub struct LedBank {
    colors: Vec<Color, MAX_LEDS>,
    dirty: bool,
}

impl LedBank {
    /// Create a bank of `led_count` LEDs
    ///
    /// LED 0 starts opaque white as the visible boot-complete signal; all
    /// others start off. Counts beyond [`MAX_LEDS`] are capped.
    pub fn new(led_count: usize) -> Self {
        let mut colors = Vec::new();
        for index in 0..led_count.min(MAX_LEDS) {
            let color = if index == 0 { Color::WHITE } else { Color::OFF };
            let _ = colors.push(color);
        }
        Self {
            colors,
            dirty: true,
        }
    }

    /// Number of LEDs in the bank
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Current colors
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Whether the bank has changed since the last hardware write
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Replace every color at once
    ///
    /// The request must match the bank length and every channel of every
    /// color must lie within [0, 1]; otherwise nothing is committed and
    /// the error names the first offending element. On success the whole
    /// pre-update state is returned and the bank is marked dirty.
    pub fn set_all(&mut self, requested: &[Color]) -> Result<Vec<Color, MAX_LEDS>, SetLedsError> {
        if requested.len() != self.colors.len() {
            return Err(SetLedsError::LengthMismatch {
                requested: requested.len(),
                expected: self.colors.len(),
            });
        }

        if let Some(index) = requested.iter().position(|c| !c.is_in_range()) {
            return Err(SetLedsError::ChannelOutOfRange { index });
        }

        let previous = self.colors.clone();
        self.colors.clear();
        // Length checked against the capacity-bounded bank above
        let _ = self.colors.extend_from_slice(requested);
        self.dirty = true;

        Ok(previous)
    }

    /// Take a snapshot of the colors if the bank is dirty, clearing the flag
    ///
    /// This is the single read-and-clear point consumed by the bus-write
    /// step once per cycle.
    pub fn consume_if_dirty(&mut self) -> Option<Vec<Color, MAX_LEDS>> {
        if !self.dirty {
            return None;
        }
        self.dirty = false;
        Some(self.colors.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn colors(values: &[(f32, f32, f32, f32)]) -> Vec<Color, MAX_LEDS> {
        values
            .iter()
            .map(|&(r, g, b, a)| Color::new(r, g, b, a))
            .collect()
    }

    #[test]
    fn test_new_bank_boot_pattern() {
        let bank = LedBank::new(3);
        assert_eq!(bank.len(), 3);
        assert_eq!(bank.colors()[0], Color::WHITE);
        assert_eq!(bank.colors()[1], Color::OFF);
        assert_eq!(bank.colors()[2], Color::OFF);
        assert!(bank.is_dirty());
    }

    #[test]
    fn test_led_count_capped_at_maximum() {
        let bank = LedBank::new(MAX_LEDS + 5);
        assert_eq!(bank.len(), MAX_LEDS);
    }

    #[test]
    fn test_set_all_replaces_and_returns_previous() {
        let mut bank = LedBank::new(3);
        bank.consume_if_dirty();

        let request = colors(&[(0.1, 0.2, 0.3, 1.0); 3]);
        let previous = bank.set_all(&request).unwrap();

        assert_eq!(previous[0], Color::WHITE);
        assert_eq!(previous[1], Color::OFF);
        assert_eq!(bank.colors(), &request[..]);
        assert!(bank.is_dirty());
    }

    #[test]
    fn test_set_all_length_mismatch_leaves_bank_unchanged() {
        let mut bank = LedBank::new(3);
        bank.consume_if_dirty();

        let request = colors(&[(0.5, 0.5, 0.5, 1.0); 2]);
        assert_eq!(
            bank.set_all(&request),
            Err(SetLedsError::LengthMismatch {
                requested: 2,
                expected: 3
            })
        );
        assert_eq!(bank.colors()[0], Color::WHITE);
        assert!(!bank.is_dirty());
    }

    #[test]
    fn test_set_all_out_of_range_reports_index_and_commits_nothing() {
        let mut bank = LedBank::new(3);
        bank.consume_if_dirty();

        let request = colors(&[
            (0.1, 0.1, 0.1, 1.0),
            (0.2, 1.5, 0.2, 1.0), // green out of range
            (0.3, 0.3, 0.3, 1.0),
        ]);
        assert_eq!(
            bank.set_all(&request),
            Err(SetLedsError::ChannelOutOfRange { index: 1 })
        );
        // Even the valid element before the bad one stayed untouched
        assert_eq!(bank.colors()[0], Color::WHITE);
        assert!(!bank.is_dirty());
    }

    #[test]
    fn test_negative_channel_rejected() {
        let mut bank = LedBank::new(1);
        let request = colors(&[(-0.1, 0.0, 0.0, 0.0)]);
        assert_eq!(
            bank.set_all(&request),
            Err(SetLedsError::ChannelOutOfRange { index: 0 })
        );
    }

    #[test]
    fn test_consume_yields_exactly_once_per_event() {
        let mut bank = LedBank::new(3);

        // Construction event
        let snapshot = bank.consume_if_dirty().unwrap();
        assert_eq!(snapshot[0], Color::WHITE);
        assert!(bank.consume_if_dirty().is_none());
        assert!(bank.consume_if_dirty().is_none());

        // Mutation event
        let request = colors(&[(0.0, 1.0, 0.0, 1.0); 3]);
        bank.set_all(&request).unwrap();
        let snapshot = bank.consume_if_dirty().unwrap();
        assert_eq!(&snapshot[..], &request[..]);
        assert!(bank.consume_if_dirty().is_none());
    }

    #[test]
    fn test_failed_set_all_does_not_mark_dirty() {
        let mut bank = LedBank::new(2);
        bank.consume_if_dirty();

        let _ = bank.set_all(&colors(&[(2.0, 0.0, 0.0, 0.0); 2]));
        assert!(bank.consume_if_dirty().is_none());
    }

    proptest! {
        #[test]
        fn prop_in_range_requests_always_commit(
            channels in proptest::collection::vec((0.0f32..=1.0, 0.0f32..=1.0, 0.0f32..=1.0, 0.0f32..=1.0), 3)
        ) {
            let mut bank = LedBank::new(3);
            bank.consume_if_dirty();

            let request: Vec<Color, MAX_LEDS> = channels
                .iter()
                .map(|&(r, g, b, a)| Color::new(r, g, b, a))
                .collect();

            prop_assert!(bank.set_all(&request).is_ok());
            prop_assert_eq!(bank.colors(), &request[..]);
            prop_assert!(bank.is_dirty());
        }
    }
}
