//! Actuator bus backend
//!
//! Implements [`RegisterBus`] over the blocking UART wired to the robot's
//! device chain. Writes are fire-and-forget: devices on this bus do not
//! acknowledge register writes and replies are never read here.

use embassy_rp::peripherals::UART1;
use embassy_rp::uart::{Blocking, Uart};

use wolfbus_core::traits::{LedRegister, RegisterBus};

/// Fixed size of a 32-bit register write packet
const WRITE_PACKET_LEN: usize = 12;

/// UART-backed register bus
pub struct UartRegisterBus {
    uart: Uart<'static, UART1, Blocking>,
}

impl UartRegisterBus {
    pub fn new(uart: Uart<'static, UART1, Blocking>) -> Self {
        Self { uart }
    }

    /// Build a register write packet
    ///
    /// Layout: 0x55 0x55 | device id | length | 0x03 (write) |
    /// address LE u16 | value LE u32 | checksum. The checksum is the
    /// inverted sum of every byte after the preamble.
    fn write_packet(device_id: u8, register: LedRegister, value: u32) -> [u8; WRITE_PACKET_LEN] {
        let addr = register.address().to_le_bytes();
        let val = value.to_le_bytes();

        let mut packet = [
            0x55, 0x55, device_id, 7, 0x03, addr[0], addr[1], val[0], val[1], val[2], val[3], 0,
        ];
        let sum: u8 = packet[2..WRITE_PACKET_LEN - 1]
            .iter()
            .fold(0u8, |acc, &b| acc.wrapping_add(b));
        packet[WRITE_PACKET_LEN - 1] = !sum;
        packet
    }
}

impl RegisterBus for UartRegisterBus {
    type Error = embassy_rp::uart::Error;

    fn write_register(
        &mut self,
        device_id: u8,
        register: LedRegister,
        value: u32,
    ) -> Result<(), Self::Error> {
        let packet = Self::write_packet(device_id, register, value);
        self.uart.blocking_write(&packet)?;
        Ok(())
    }
}
