//! Message types for the host link
//!
//! Message types fall into two categories:
//! - Host → Board: LED requests, shutdown, heartbeat
//! - Board → Host: request results, bus diagnostics, heartbeat responses

use heapless::Vec;

use crate::color::{Color, MAX_LEDS};
use crate::frame::{Frame, FrameError, MAX_PAYLOAD_SIZE};

// Message type IDs: Host → Board
pub const MSG_SET_LEDS: u8 = 0x01;
pub const MSG_SHUTDOWN: u8 = 0x02;
pub const MSG_PING: u8 = 0x03;

// Message type IDs: Board → Host
pub const MSG_SET_LEDS_OK: u8 = 0x20;
pub const MSG_SET_LEDS_ERR: u8 = 0x21;
pub const MSG_DIAGNOSTIC: u8 = 0x22;
pub const MSG_PONG: u8 = 0x23;

/// Why a set-LEDs request was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SetLedsErrorCode {
    /// Request length does not match the LED bank size
    LengthMismatch,
    /// A color channel lies outside [0, 1]
    ChannelOutOfRange,
}

impl SetLedsErrorCode {
    pub const fn to_byte(self) -> u8 {
        match self {
            SetLedsErrorCode::LengthMismatch => 1,
            SetLedsErrorCode::ChannelOutOfRange => 2,
        }
    }

    pub const fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            1 => Some(SetLedsErrorCode::LengthMismatch),
            2 => Some(SetLedsErrorCode::ChannelOutOfRange),
            _ => None,
        }
    }
}

/// Severity of a bus health report
///
/// Values follow the diagnostic convention of the host's monitoring stack
/// (0 = OK, 1 = WARN).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DiagnosticLevel {
    Ok,
    Warn,
}

impl DiagnosticLevel {
    pub const fn to_byte(self) -> u8 {
        match self {
            DiagnosticLevel::Ok => 0,
            DiagnosticLevel::Warn => 1,
        }
    }

    pub const fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(DiagnosticLevel::Ok),
            1 => Some(DiagnosticLevel::Warn),
            _ => None,
        }
    }
}

/// Commands from the host computer
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HostCommand {
    /// Replace every LED color at once
    ///
    /// The request must carry exactly as many colors as the bank holds.
    SetLeds(Vec<Color, MAX_LEDS>),
    /// Begin the shutdown drain: the loop keeps ticking through the grace
    /// window so peers on the bus can wind down, then stops.
    Shutdown,
    /// Heartbeat request
    Ping,
}

impl HostCommand {
    /// Parse a command from a received frame
    pub fn from_frame(frame: &Frame) -> Result<Self, FrameError> {
        match frame.msg_type {
            MSG_SET_LEDS => decode_colors(&frame.payload).map(HostCommand::SetLeds),
            MSG_SHUTDOWN => Ok(HostCommand::Shutdown),
            MSG_PING => Ok(HostCommand::Ping),
            _ => Err(FrameError::Malformed),
        }
    }

    /// Encode this command into a frame
    pub fn to_frame(&self) -> Result<Frame, FrameError> {
        match self {
            HostCommand::SetLeds(colors) => Frame::new(MSG_SET_LEDS, &encode_colors(colors)?),
            HostCommand::Shutdown => Ok(Frame::empty(MSG_SHUTDOWN)),
            HostCommand::Ping => Ok(Frame::empty(MSG_PING)),
        }
    }
}

/// Messages from the board to the host
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BoardMessage<'a> {
    /// Set-LEDs request accepted; carries the pre-update colors
    SetLedsOk {
        previous: Vec<Color, MAX_LEDS>,
    },
    /// Set-LEDs request rejected
    ///
    /// `index` is the first offending element for out-of-range failures
    /// and 0 for length mismatches.
    SetLedsErr {
        code: SetLedsErrorCode,
        index: u8,
    },
    /// Periodic bus health report
    Diagnostic {
        level: DiagnosticLevel,
        message: &'a str,
    },
    /// Heartbeat response
    Pong,
}

impl<'a> BoardMessage<'a> {
    /// Encode this message into a frame
    pub fn to_frame(&self) -> Result<Frame, FrameError> {
        match self {
            BoardMessage::SetLedsOk { previous } => {
                Frame::new(MSG_SET_LEDS_OK, &encode_colors(previous)?)
            }
            BoardMessage::SetLedsErr { code, index } => {
                Frame::new(MSG_SET_LEDS_ERR, &[code.to_byte(), *index])
            }
            BoardMessage::Diagnostic { level, message } => {
                let mut payload = Vec::<u8, MAX_PAYLOAD_SIZE>::new();
                payload
                    .push(level.to_byte())
                    .map_err(|_| FrameError::PayloadTooLarge)?;
                payload
                    .extend_from_slice(message.as_bytes())
                    .map_err(|_| FrameError::PayloadTooLarge)?;
                Frame::new(MSG_DIAGNOSTIC, &payload)
            }
            BoardMessage::Pong => Ok(Frame::empty(MSG_PONG)),
        }
    }

    /// Parse a board message from a received frame
    ///
    /// Diagnostic messages borrow their text from the frame payload.
    pub fn from_frame(frame: &'a Frame) -> Result<Self, FrameError> {
        match frame.msg_type {
            MSG_SET_LEDS_OK => decode_colors(&frame.payload)
                .map(|previous| BoardMessage::SetLedsOk { previous }),
            MSG_SET_LEDS_ERR => {
                if frame.payload.len() != 2 {
                    return Err(FrameError::Malformed);
                }
                let code =
                    SetLedsErrorCode::from_byte(frame.payload[0]).ok_or(FrameError::Malformed)?;
                Ok(BoardMessage::SetLedsErr {
                    code,
                    index: frame.payload[1],
                })
            }
            MSG_DIAGNOSTIC => {
                if frame.payload.is_empty() {
                    return Err(FrameError::Malformed);
                }
                let level =
                    DiagnosticLevel::from_byte(frame.payload[0]).ok_or(FrameError::Malformed)?;
                let message =
                    core::str::from_utf8(&frame.payload[1..]).map_err(|_| FrameError::Malformed)?;
                Ok(BoardMessage::Diagnostic { level, message })
            }
            MSG_PONG => Ok(BoardMessage::Pong),
            _ => Err(FrameError::Malformed),
        }
    }
}

/// Payload layout for color lists: [count][count × 16-byte colors]
fn encode_colors(colors: &[Color]) -> Result<Vec<u8, MAX_PAYLOAD_SIZE>, FrameError> {
    if colors.len() > MAX_LEDS {
        return Err(FrameError::PayloadTooLarge);
    }
    let mut payload = Vec::new();
    payload
        .push(colors.len() as u8)
        .map_err(|_| FrameError::PayloadTooLarge)?;
    for color in colors {
        payload
            .extend_from_slice(&color.to_wire())
            .map_err(|_| FrameError::PayloadTooLarge)?;
    }
    Ok(payload)
}

fn decode_colors(payload: &[u8]) -> Result<Vec<Color, MAX_LEDS>, FrameError> {
    let (&count, body) = payload.split_first().ok_or(FrameError::Malformed)?;
    if count as usize > MAX_LEDS || body.len() != count as usize * Color::WIRE_SIZE {
        return Err(FrameError::Malformed);
    }

    let mut colors = Vec::new();
    for chunk in body.chunks_exact(Color::WIRE_SIZE) {
        // Length checked above
        let color = Color::from_wire(chunk).ok_or(FrameError::Malformed)?;
        let _ = colors.push(color);
    }
    Ok(colors)
}
