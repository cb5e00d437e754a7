//! Register bus trait
//!
//! The actuator bus driver itself is an external collaborator; the control
//! loop only needs to issue named 32-bit register writes against it.

/// Addressable LED registers in the head board's control table
///
/// Each register holds one packed RGBA word (see
/// [`crate::led::color_to_word`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedRegister {
    Led0,
    Led1,
    Led2,
}

impl LedRegister {
    /// Control-table address of this register
    pub const fn address(self) -> u16 {
        match self {
            LedRegister::Led0 => 76,
            LedRegister::Led1 => 80,
            LedRegister::Led2 => 84,
        }
    }

    /// Register name as it appears in the device control table
    pub const fn name(self) -> &'static str {
        match self {
            LedRegister::Led0 => "LED_0",
            LedRegister::Led1 => "LED_1",
            LedRegister::Led2 => "LED_2",
        }
    }
}

/// Trait for issuing register writes on the actuator bus
///
/// Implementations forward the write to the physical bus; no retry is
/// performed at this layer and failures surface to the control loop.
pub trait RegisterBus {
    type Error: core::fmt::Debug;

    /// Write one 32-bit value to a named register on a bus device
    fn write_register(
        &mut self,
        device_id: u8,
        register: LedRegister,
        value: u32,
    ) -> Result<(), Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_addresses_are_word_spaced() {
        assert_eq!(
            LedRegister::Led1.address(),
            LedRegister::Led0.address() + 4
        );
        assert_eq!(
            LedRegister::Led2.address(),
            LedRegister::Led1.address() + 4
        );
    }

    #[test]
    fn test_register_names() {
        assert_eq!(LedRegister::Led0.name(), "LED_0");
        assert_eq!(LedRegister::Led2.name(), "LED_2");
    }
}
