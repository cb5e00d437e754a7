//! LED board driver
//!
//! The head LED board exposes three 32-bit color registers on the robot
//! bus. Writes are deferred: commanded colors land in a [`LedBank`] and
//! are flushed to the bus only on cycles where something changed.

use heapless::Vec;
use wolfbus_core::config::LedBoardConfig;
use wolfbus_core::led::{color_to_word, Color, LedBank, SetLedsError, MAX_LEDS};
use wolfbus_core::traits::{HardwareInterface, LedRegister, RegisterBus};

/// Register write order for a flush
///
/// The board wires its register map in reverse of the logical LED index:
/// logical LED 0 lives in the LED_2 register and so on.
const REGISTER_ORDER: [LedRegister; 3] = [LedRegister::Led2, LedRegister::Led1, LedRegister::Led0];

/// Driver for the register-mapped LED board
pub struct LedBoard {
    bank: LedBank,
    device_id: u8,
}

impl LedBoard {
    pub fn new(config: &LedBoardConfig) -> Self {
        Self {
            bank: LedBank::new(config.led_count as usize),
            device_id: config.device_id,
        }
    }

    pub fn bank(&self) -> &LedBank {
        &self.bank
    }

    /// Replace all commanded colors, returning the previous set
    pub fn set_all(&mut self, colors: &[Color]) -> Result<Vec<Color, MAX_LEDS>, SetLedsError> {
        self.bank.set_all(colors)
    }
}

impl<B: RegisterBus> HardwareInterface<B> for LedBoard {
    type Error = B::Error;

    fn read(&mut self, _bus: &mut B, _now_us: u64, _period_us: u64) -> Result<(), Self::Error> {
        // The LED board is write-only
        Ok(())
    }

    fn write(&mut self, bus: &mut B, _now_us: u64, _period_us: u64) -> Result<(), Self::Error> {
        if let Some(colors) = self.bank.consume_if_dirty() {
            for (register, color) in REGISTER_ORDER.iter().zip(colors.iter()) {
                bus.write_register(self.device_id, *register, color_to_word(color))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wolfbus_core::config::LoopConfig;
    use wolfbus_core::cycle::ControlLoop;
    use wolfbus_core::traits::ControllerSet;

    #[derive(Default)]
    struct MockBus {
        writes: Vec<(u8, LedRegister, u32), 16>,
    }

    impl RegisterBus for MockBus {
        type Error = core::convert::Infallible;

        fn write_register(
            &mut self,
            device_id: u8,
            register: LedRegister,
            value: u32,
        ) -> Result<(), Self::Error> {
            self.writes
                .push((device_id, register, value))
                .map_err(|_| ())
                .unwrap();
            Ok(())
        }
    }

    struct NoopControllers;

    impl ControllerSet for NoopControllers {
        fn update(&mut self, _now_us: u64, _period_us: u64) {}
    }

    #[test]
    fn test_boot_state_flushes_on_first_write() {
        let mut board = LedBoard::new(&LedBoardConfig::default());
        let mut bus = MockBus::default();

        board.write(&mut bus, 0, 1000).unwrap();

        // LED 0 boots white, the rest off, flushed in reversed register order
        assert_eq!(
            bus.writes.as_slice(),
            &[
                (42, LedRegister::Led2, 0xFFFF_FFFF),
                (42, LedRegister::Led1, 0x0000_0000),
                (42, LedRegister::Led0, 0x0000_0000),
            ]
        );
    }

    #[test]
    fn test_clean_bank_writes_nothing() {
        let mut board = LedBoard::new(&LedBoardConfig::default());
        let mut bus = MockBus::default();

        board.write(&mut bus, 0, 1000).unwrap();
        bus.writes.clear();

        board.write(&mut bus, 1000, 1000).unwrap();
        assert!(bus.writes.is_empty());
    }

    #[test]
    fn test_set_all_marks_next_write() {
        let mut board = LedBoard::new(&LedBoardConfig::default());
        let mut bus = MockBus::default();

        board.write(&mut bus, 0, 1000).unwrap();
        bus.writes.clear();

        let red = Color::new(1.0, 0.0, 0.0, 1.0);
        board.set_all(&[red, red, red]).unwrap();
        board.write(&mut bus, 1000, 1000).unwrap();

        assert_eq!(bus.writes.len(), 3);
        for (device_id, _, value) in &bus.writes {
            assert_eq!(*device_id, 42);
            assert_eq!(*value, 0xFF00_00FF);
        }
    }

    #[test]
    fn test_rejected_set_does_not_dirty() {
        let mut board = LedBoard::new(&LedBoardConfig::default());
        let mut bus = MockBus::default();

        board.write(&mut bus, 0, 1000).unwrap();
        bus.writes.clear();

        let bad = Color::new(2.0, 0.0, 0.0, 1.0);
        assert!(board.set_all(&[bad, bad, bad]).is_err());

        board.write(&mut bus, 1000, 1000).unwrap();
        assert!(bus.writes.is_empty());
    }

    #[test]
    fn test_flush_through_control_loop() {
        let mut cl = ControlLoop::new(&LoopConfig::default()).unwrap();
        let mut board = LedBoard::new(&LedBoardConfig::default());
        let mut bus = MockBus::default();
        let mut controllers = NoopControllers;

        cl.init_complete(0);

        // First tick flushes the boot colors
        cl.tick(1000, &mut bus, &mut board, &mut controllers).unwrap();
        assert_eq!(bus.writes.len(), 3);
        bus.writes.clear();

        // Nothing changed, second tick is silent on the bus
        cl.tick(2000, &mut bus, &mut board, &mut controllers).unwrap();
        assert!(bus.writes.is_empty());
    }
}
