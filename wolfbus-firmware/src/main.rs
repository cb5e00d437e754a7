//! Wolfbus - Robot Bus Adapter Firmware
//!
//! Main firmware binary for the RP2040-based bridge board sitting between
//! the host computer and the robot's actuator/LED bus. The board runs a
//! fixed-rate read-update-write loop against the bus and exposes a framed
//! UART link to the host for LED requests, shutdown and heartbeat.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use wolfbus_core::config::{ControllerSelection, LedBoardConfig, LoopConfig};

use crate::bus::UartRegisterBus;

mod bus;
mod channels;
mod controllers;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for host link UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

// Startup flags for bench setups with a reduced sensor fit. Rebuild to
// change; the host cannot toggle these at runtime.
const ONLY_IMU: bool = false;
const ONLY_PRESSURE: bool = false;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Wolfbus firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Setup UART0 for host communication
    let uart_config = UartConfig::default(); // 115200 baud default

    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 256]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();

    info!("UART initialized for host communication");

    // Setup UART1 for the actuator bus. Register writes happen inside
    // the control loop tick, so this one stays blocking.
    let bus_uart_config = {
        let mut cfg = UartConfig::default();
        cfg.baudrate = 1_000_000;
        cfg
    };
    let bus_uart = Uart::new_blocking(p.UART1, p.PIN_8, p.PIN_9, bus_uart_config);
    let bus = UartRegisterBus::new(bus_uart);

    info!("Actuator bus UART initialized");

    let loop_config = LoopConfig::default();
    let board_config = LedBoardConfig::default();
    let selection = ControllerSelection::from_flags(ONLY_IMU, ONLY_PRESSURE);

    // Spawn tasks
    spawner.spawn(tasks::command_rx_task(rx)).unwrap();
    spawner.spawn(tasks::diag_tx_task(tx)).unwrap();
    spawner.spawn(tasks::activation_task()).unwrap();
    spawner
        .spawn(tasks::control_loop_task(
            bus,
            loop_config,
            board_config,
            selection,
        ))
        .unwrap();

    info!("All tasks spawned");
}
