//! Frame encoding and decoding for the host link
//!
//! Frame layout:
//! - START (1 byte): 0xB7 synchronization byte
//! - TYPE (1 byte): message type identifier
//! - LENGTH (1 byte): payload length (0-192)
//! - PAYLOAD (0-192 bytes): type-specific data
//! - CHECKSUM (1 byte): XOR of TYPE, LENGTH and all PAYLOAD bytes

use heapless::Vec;

/// Frame synchronization byte
pub const FRAME_START: u8 = 0xB7;

/// Maximum payload size in bytes
///
/// Large enough for a full set-LEDs request (count byte plus eight
/// 16-byte colors) with headroom for diagnostics text.
pub const MAX_PAYLOAD_SIZE: usize = 192;

/// Maximum complete frame size (START + TYPE + LENGTH + payload + CHECKSUM)
pub const MAX_FRAME_SIZE: usize = 4 + MAX_PAYLOAD_SIZE;

/// Errors raised while parsing or encoding frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Payload exceeds the maximum allowed size
    PayloadTooLarge,
    /// Checksum mismatch
    BadChecksum,
    /// Declared length exceeds the payload limit
    BadLength,
    /// Payload contents do not match the message type
    Malformed,
    /// Destination buffer too small for encoding
    BufferTooSmall,
}

/// A parsed or constructed frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Message type identifier
    pub msg_type: u8,
    /// Payload data
    pub payload: Vec<u8, MAX_PAYLOAD_SIZE>,
}

impl Frame {
    /// Build a frame from a message type and payload slice
    pub fn new(msg_type: u8, payload: &[u8]) -> Result<Self, FrameError> {
        let payload = Vec::from_slice(payload).map_err(|_| FrameError::PayloadTooLarge)?;
        Ok(Self { msg_type, payload })
    }

    /// Build a payload-less frame
    pub fn empty(msg_type: u8) -> Self {
        Self {
            msg_type,
            payload: Vec::new(),
        }
    }

    fn checksum(msg_type: u8, length: u8, payload: &[u8]) -> u8 {
        payload
            .iter()
            .fold(msg_type ^ length, |acc, &byte| acc ^ byte)
    }

    /// Encode into a byte buffer, returning the number of bytes written
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, FrameError> {
        let total = 4 + self.payload.len();
        if buffer.len() < total {
            return Err(FrameError::BufferTooSmall);
        }

        let length = self.payload.len() as u8;
        buffer[0] = FRAME_START;
        buffer[1] = self.msg_type;
        buffer[2] = length;
        buffer[3..3 + self.payload.len()].copy_from_slice(&self.payload);
        buffer[3 + self.payload.len()] = Self::checksum(self.msg_type, length, &self.payload);

        Ok(total)
    }

    /// Encode into an owned heapless Vec
    pub fn encode_to_vec(&self) -> Result<Vec<u8, MAX_FRAME_SIZE>, FrameError> {
        let mut buffer = [0u8; MAX_FRAME_SIZE];
        let len = self.encode(&mut buffer)?;
        Vec::from_slice(&buffer[..len]).map_err(|_| FrameError::BufferTooSmall)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    /// Scanning for the START byte
    Sync,
    /// Expecting the TYPE byte
    Type,
    /// Expecting the LENGTH byte
    Length,
    /// Collecting payload bytes
    Payload,
    /// Expecting the CHECKSUM byte
    Checksum,
}

/// Incremental parser for incoming frames
///
/// Bytes in front of a START byte are skipped, so the parser resynchronizes
/// after line noise or a partially received frame.
#[derive(Debug, Clone)]
pub struct FrameParser {
    state: ParseState,
    msg_type: u8,
    expected_len: u8,
    payload: Vec<u8, MAX_PAYLOAD_SIZE>,
}

impl Default for FrameParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameParser {
    /// Create a parser waiting for the next START byte
    pub fn new() -> Self {
        Self {
            state: ParseState::Sync,
            msg_type: 0,
            expected_len: 0,
            payload: Vec::new(),
        }
    }

    /// Drop any partial frame and wait for the next START byte
    pub fn reset(&mut self) {
        self.state = ParseState::Sync;
        self.msg_type = 0;
        self.expected_len = 0;
        self.payload.clear();
    }

    /// Feed one byte
    ///
    /// Returns `Ok(Some(frame))` when a complete valid frame was received,
    /// `Ok(None)` when more bytes are needed, or an error. After an error
    /// the parser has already resynchronized.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Frame>, FrameError> {
        match self.state {
            ParseState::Sync => {
                if byte == FRAME_START {
                    self.state = ParseState::Type;
                }
                Ok(None)
            }
            ParseState::Type => {
                self.msg_type = byte;
                self.state = ParseState::Length;
                Ok(None)
            }
            ParseState::Length => {
                if byte as usize > MAX_PAYLOAD_SIZE {
                    self.reset();
                    return Err(FrameError::BadLength);
                }
                self.expected_len = byte;
                self.payload.clear();
                self.state = if byte == 0 {
                    ParseState::Checksum
                } else {
                    ParseState::Payload
                };
                Ok(None)
            }
            ParseState::Payload => {
                // Cannot overflow: expected_len was bounds-checked
                let _ = self.payload.push(byte);
                if self.payload.len() == self.expected_len as usize {
                    self.state = ParseState::Checksum;
                }
                Ok(None)
            }
            ParseState::Checksum => {
                let expected = Frame::checksum(self.msg_type, self.expected_len, &self.payload);
                if byte != expected {
                    self.reset();
                    return Err(FrameError::BadChecksum);
                }

                let frame = Frame {
                    msg_type: self.msg_type,
                    payload: self.payload.clone(),
                };
                self.reset();
                Ok(Some(frame))
            }
        }
    }

    /// Feed a byte slice, returning the first complete frame found
    ///
    /// Bytes after the returned frame are not consumed.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Result<Option<Frame>, FrameError> {
        for &byte in bytes {
            if let Some(frame) = self.feed(byte)? {
                return Ok(Some(frame));
            }
        }
        Ok(None)
    }
}
