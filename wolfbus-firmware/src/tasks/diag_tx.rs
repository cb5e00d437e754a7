//! Host link transmit task
//!
//! Sends request replies, bus health reports and heartbeat responses to
//! the host computer.

use defmt::*;
use embassy_futures::select::{select3, Either3};
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::BufferedUartTx;
use embedded_io_async::Write;
use heapless::Vec;

use wolfbus_core::cycle::{BusHealth, HealthLevel};
use wolfbus_core::led::{Color, SetLedsError, MAX_LEDS};
use wolfbus_protocol::{BoardMessage, DiagnosticLevel, SetLedsErrorCode, MAX_FRAME_SIZE};

use crate::channels::{DIAGNOSTICS, PING_RECEIVED, SET_LEDS_REPLIES};

/// Diag TX task - sends frames to the host
#[embassy_executor::task]
pub async fn diag_tx_task(mut tx: BufferedUartTx<'static, UART0>) {
    info!("Diag TX task started");

    loop {
        match select3(
            DIAGNOSTICS.receive(),
            SET_LEDS_REPLIES.receive(),
            PING_RECEIVED.wait(),
        )
        .await
        {
            Either3::First(health) => {
                send_message(&mut tx, &diagnostic_message(&health)).await;
            }
            Either3::Second(reply) => {
                send_message(&mut tx, &reply_message(&reply)).await;
            }
            Either3::Third(()) => {
                send_message(&mut tx, &BoardMessage::Pong).await;
            }
        }
    }
}

fn diagnostic_message(health: &BusHealth) -> BoardMessage<'_> {
    let level = match health.level {
        HealthLevel::Ok => DiagnosticLevel::Ok,
        HealthLevel::Warn => DiagnosticLevel::Warn,
    };
    BoardMessage::Diagnostic {
        level,
        message: health.message,
    }
}

fn reply_message(reply: &Result<Vec<Color, MAX_LEDS>, SetLedsError>) -> BoardMessage<'_> {
    match reply {
        Ok(previous) => BoardMessage::SetLedsOk {
            previous: previous.clone(),
        },
        Err(SetLedsError::LengthMismatch { .. }) => BoardMessage::SetLedsErr {
            code: SetLedsErrorCode::LengthMismatch,
            index: 0,
        },
        Err(SetLedsError::ChannelOutOfRange { index }) => BoardMessage::SetLedsErr {
            code: SetLedsErrorCode::ChannelOutOfRange,
            index: *index as u8,
        },
    }
}

async fn send_message(tx: &mut BufferedUartTx<'static, UART0>, message: &BoardMessage<'_>) {
    let frame = match message.to_frame() {
        Ok(frame) => frame,
        Err(e) => {
            warn!("Failed to encode message: {:?}", e);
            return;
        }
    };

    let mut buf = [0u8; MAX_FRAME_SIZE];
    match frame.encode(&mut buf) {
        Ok(len) => {
            if let Err(e) = tx.write_all(&buf[..len]).await {
                warn!("Failed to send frame: {:?}", e);
            }
        }
        Err(e) => {
            warn!("Failed to serialize frame: {:?}", e);
        }
    }
}
