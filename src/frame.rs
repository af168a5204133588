//! Command/response framing for the SL030 wire protocol
//!
//! Commands are `[len, cmd]` where `len` counts the bytes following it.
//! Responses use the same length prefix, so a response declaring `length`
//! occupies `length + 1` bytes on the wire: the length byte, the echoed
//! command byte, and `length - 1` payload bytes. The payload of a select
//! response is `[status, uid.., type]`; the UID is located by index
//! arithmetic off the declared length, never by scanning.

use crate::types::Sl030Error;

/// Encode a bare command byte as a 2-byte frame
pub(crate) fn encode_command(cmd: u8) -> [u8; 2] {
    [0x01, cmd]
}

/// One parsed response frame. Built fresh from each bus read and trimmed to
/// the declared length; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseFrame {
    /// The length byte as declared by the device
    pub length: u8,
    /// The echoed command byte
    pub command: u8,
    /// Every byte after the command byte through the declared frame length
    pub payload: Vec<u8>,
}

impl ResponseFrame {
    /// Parse a raw bus read into a frame.
    ///
    /// `raw` is the over-read buffer (the transport reads a fixed maximum of
    /// 15 bytes); `min_len` is the minimum number of raw bytes the caller
    /// requires. The declared length is validated against `raw` before any
    /// indexing, so an inconsistent length byte surfaces as
    /// `MalformedFrame` rather than an out-of-bounds access.
    pub fn parse(raw: &[u8], min_len: usize) -> Result<Self, Sl030Error> {
        if raw.len() < min_len {
            return Err(Sl030Error::MalformedFrame(format!(
                "response has {} bytes, need at least {}",
                raw.len(),
                min_len
            )));
        }

        let length = raw[0];
        if length < 2 {
            return Err(Sl030Error::MalformedFrame(format!(
                "declared length {} is below the 2-byte minimum",
                length
            )));
        }
        let end = length as usize;
        if end >= raw.len() {
            return Err(Sl030Error::MalformedFrame(format!(
                "declared length {} exceeds the {} bytes read",
                length,
                raw.len()
            )));
        }

        Ok(ResponseFrame {
            length,
            command: raw[1],
            payload: raw[2..=end].to_vec(),
        })
    }
}

/// Outcome of inspecting a firmware identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionCheck {
    /// The identifier starts with the expected `'S'`
    Valid,
    /// First byte is `'S'` with the top bit set: the bus clock is too fast
    /// for the device and every byte arrives with bit 7 corrupted
    ClockSpeedCorruption,
    /// Anything else; whatever answered is not an SL030
    UnrecognizedDevice,
}

/// Classify a firmware identifier payload.
///
/// Advisory only: a non-`Valid` result never aborts the firmware read, it is
/// logged and the decoded string still goes back to the caller.
pub fn validate_version(payload: &[u8]) -> Result<VersionCheck, Sl030Error> {
    let first = *payload.first().ok_or_else(|| {
        Sl030Error::MalformedFrame("empty firmware identifier".into())
    })?;

    if first == b'S' {
        Ok(VersionCheck::Valid)
    } else if first == b'S' + 0x80 {
        Ok(VersionCheck::ClockSpeedCorruption)
    } else {
        Ok(VersionCheck::UnrecognizedDevice)
    }
}
