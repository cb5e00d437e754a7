//! Host link receive task
//!
//! Receives frames from the host computer and dispatches commands.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;

use wolfbus_protocol::{FrameParser, HostCommand};

use crate::channels::{PING_RECEIVED, SET_LEDS_REQUESTS, SHUTDOWN};

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

/// Command RX task - receives and parses frames from the host
#[embassy_executor::task]
pub async fn command_rx_task(mut rx: BufferedUartRx) {
    info!("Command RX task started");

    let mut parser = FrameParser::new();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                trace!("RX: {} bytes", n);

                for &byte in &buf[..n] {
                    match parser.feed(byte) {
                        Ok(Some(frame)) => match HostCommand::from_frame(&frame) {
                            Ok(cmd) => {
                                handle_host_command(cmd).await;
                            }
                            Err(e) => {
                                warn!("Failed to parse host command: {:?}", e);
                            }
                        },
                        Ok(None) => {
                            // Need more bytes
                        }
                        Err(e) => {
                            warn!("Frame parse error: {:?}", e);
                        }
                    }
                }
            }
            Ok(_) => {
                // No bytes read, continue
            }
            Err(e) => {
                warn!("UART read error: {:?}", e);
            }
        }
    }
}

/// Handle a parsed host command
async fn handle_host_command(cmd: HostCommand) {
    match cmd {
        HostCommand::SetLeds(colors) => {
            debug!("Set-LEDs request: {} colors", colors.len());
            // Queue for the control loop, dropping if full
            if SET_LEDS_REQUESTS.try_send(colors).is_err() {
                warn!("LED request channel full, dropping request");
            }
        }
        HostCommand::Shutdown => {
            info!("Shutdown command received");
            SHUTDOWN.signal(());
        }
        HostCommand::Ping => {
            trace!("PING received");
            PING_RECEIVED.signal(());
        }
    }
}
