//! Types for reader operations

use thiserror::Error;

/// Card type codes reported in the last byte of a select response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardType {
    /// 0x01
    Mifare1k4ByteUid,
    /// 0x02
    Mifare1k7ByteUid,
    /// 0x03
    MifareUltraLight,
    /// 0x04
    Mifare4k4ByteUid,
    /// 0x05
    Mifare4k7ByteUid,
    /// 0x06
    MifareDesFire,
    /// 0x0A
    Other,
    /// Any code the reader may report that this driver does not know about
    Unknown(u8),
}

impl CardType {
    pub fn from_code(code: u8) -> Self {
        match code {
            0x01 => CardType::Mifare1k4ByteUid,
            0x02 => CardType::Mifare1k7ByteUid,
            0x03 => CardType::MifareUltraLight,
            0x04 => CardType::Mifare4k4ByteUid,
            0x05 => CardType::Mifare4k7ByteUid,
            0x06 => CardType::MifareDesFire,
            0x0A => CardType::Other,
            other => CardType::Unknown(other),
        }
    }

    /// The raw byte code for this type
    pub fn code(self) -> u8 {
        match self {
            CardType::Mifare1k4ByteUid => 0x01,
            CardType::Mifare1k7ByteUid => 0x02,
            CardType::MifareUltraLight => 0x03,
            CardType::Mifare4k4ByteUid => 0x04,
            CardType::Mifare4k7ByteUid => 0x05,
            CardType::MifareDesFire => 0x06,
            CardType::Other => 0x0A,
            CardType::Unknown(code) => code,
        }
    }

    /// Human-readable name for this type
    pub fn name(self) -> String {
        match self {
            CardType::Mifare1k4ByteUid => "mifare 1k, 4byte UID".into(),
            CardType::Mifare1k7ByteUid => "mifare 1k, 7byte UID".into(),
            CardType::MifareUltraLight => "mifare UltraLight, 7 byte UID".into(),
            CardType::Mifare4k4ByteUid => "mifare 4k, 4 byte UID".into(),
            CardType::Mifare4k7ByteUid => "mifare 4k, 7 byte UID".into(),
            CardType::MifareDesFire => "mifare DesFire, 7 byte UID".into(),
            CardType::Other => "other".into(),
            CardType::Unknown(code) => format!("unknown:{}", code),
        }
    }
}

/// A selected tag: its type code and UID (4 or 7 bytes depending on type)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRecord {
    pub card_type: CardType,
    pub uid: Vec<u8>,
}

impl TagRecord {
    /// Canonical card identifier: the UID as uppercase hex
    pub fn uid_hex(&self) -> String {
        bytes_to_hex(&self.uid)
    }
}

/// Errors that can occur during reader operations
#[derive(Debug, Error)]
pub enum Sl030Error {
    /// I2C bus communication failure
    #[error("bus transport error: {0}")]
    Bus(String),
    /// Tag-detect pin read failure
    #[error("tag detect pin error: {0}")]
    Pin(String),
    /// Response shorter than required or declaring an inconsistent length
    #[error("malformed frame: {0}")]
    MalformedFrame(String),
}

/// Convert bytes to uppercase hex string
pub(crate) fn bytes_to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02X}", b)).collect()
}
