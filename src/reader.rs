use log::{debug, error};
use std::time::{Duration, Instant};

use crate::detect::{DetectPin, Level, NoDetectPin};
use crate::frame::{ResponseFrame, VersionCheck, encode_command, validate_version};
use crate::transport::BusTransport;
use crate::types::{CardType, Sl030Error, TagRecord};

/// Presence detection strategy, fixed when the driver is constructed
enum Detect<P> {
    /// Sample the tag-detect line; the reader drives it low while a tag
    /// sits in the field
    Pin(P),
    /// No detect line wired up: a select exchange doubles as the
    /// presence check
    Poll,
}

/// Driver for one SL030 reader on one I2C bus.
///
/// All operations are blocking request/response with a mandatory 50 ms
/// turnaround delay after each write. Not re-entrant; use one instance from
/// one logical thread of control at a time.
pub struct Sl030<T: BusTransport, P: DetectPin = NoDetectPin> {
    transport: T,
    address: u8,
    detect: Detect<P>,
    tag: Option<TagRecord>,
}

impl<T: BusTransport> Sl030<T> {
    /// Create a driver without a tag-detect line. Presence checks go through
    /// the select protocol (see [`Sl030::is_present`]).
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            address: Self::DEFAULT_ADDRESS,
            detect: Detect::Poll,
            tag: None,
        }
    }
}

impl<T: BusTransport, P: DetectPin> Sl030<T, P> {
    /// Factory default I2C address of the SL030
    pub const DEFAULT_ADDRESS: u8 = 0x50;

    // Command codes
    const SELECT_MIFARE: u8 = 0x01;
    const GET_FIRMWARE: u8 = 0xF0;

    // The device never answers with more than 15 bytes; every read
    // over-reads this much and the codec trims to the declared length
    const MAX_FRAME_LEN: usize = 15;

    // Device turnaround time between a command write and the response read.
    // A hard protocol requirement, not a retry delay.
    const WRITE_READ_DELAY: Duration = Duration::from_millis(50);

    const PRESENT_POLL_INTERVAL: Duration = Duration::from_millis(10);
    const ABSENT_POLL_INTERVAL: Duration = Duration::from_millis(500);

    /// Create a driver that senses presence on a tag-detect line
    /// (active low)
    pub fn with_detect_pin(transport: T, pin: P) -> Self {
        Self {
            transport,
            address: Self::DEFAULT_ADDRESS,
            detect: Detect::Pin(pin),
            tag: None,
        }
    }

    /// Use a non-default I2C address
    pub fn with_address(mut self, address: u8) -> Self {
        self.address = address;
        self
    }

    /// Read the firmware identifier string from the reader.
    ///
    /// The identifier is validated (a genuine SL030 answers with a string
    /// starting in `'S'`); a failed check is logged but the decoded string
    /// is returned regardless, so callers can inspect what the device
    /// actually sent.
    pub fn get_firmware(&mut self) -> Result<String, Sl030Error> {
        let raw = self.exec(Self::GET_FIRMWARE)?;
        let frame = ResponseFrame::parse(&raw, Self::MAX_FRAME_LEN)?;

        // First payload byte is reserved; the identifier follows it
        let ver = &frame.payload[1..];
        match validate_version(ver)? {
            VersionCheck::Valid => {}
            VersionCheck::ClockSpeedCorruption => {
                error!("bus clock too fast for the reader, bit 7 corrupted on every byte");
                error!("reload the bus driver at a lower baud rate");
            }
            VersionCheck::UnrecognizedDevice => {
                error!("unrecognised device");
            }
        }

        // Byte-for-byte, not UTF-8: a corrupted identifier must survive the
        // round trip so the caller can see it
        Ok(ver.iter().map(|&b| b as char).collect())
    }

    /// Perform the Mifare select exchange.
    ///
    /// Returns `Ok(Some(record))` and holds the record as the current tag if
    /// a card answered, `Ok(None)` (clearing any previous tag) if the status
    /// byte reports no card in the field. Always re-issues the bus
    /// transaction, even when a tag is already selected; the device keeps no
    /// session state of its own.
    pub fn select_tag(&mut self) -> Result<Option<TagRecord>, Sl030Error> {
        let raw = self.exec(Self::SELECT_MIFARE)?;
        let frame = ResponseFrame::parse(&raw, 3)?;

        let status = frame.payload[0];
        if status != 0x00 {
            debug!("select: no tag (status 0x{:02X})", status);
            self.tag = None;
            return Ok(None);
        }

        // Payload is [status, uid.., type]; the UID length is implicit, so
        // the type byte is located from the declared length (last payload
        // byte) rather than from the UID
        if frame.payload.len() < 2 {
            self.tag = None;
            return Err(Sl030Error::MalformedFrame(
                "select response carries no type byte after the status".into(),
            ));
        }
        let type_code = frame.payload[frame.payload.len() - 1];
        let uid = frame.payload[1..frame.payload.len() - 1].to_vec();

        let record = TagRecord {
            card_type: CardType::from_code(type_code),
            uid,
        };
        debug!(
            "select: tag {} ({})",
            record.uid_hex(),
            record.card_type.name()
        );
        self.tag = Some(record.clone());
        Ok(Some(record))
    }

    /// Forget the currently selected tag. Pure state transition; nothing is
    /// sent on the bus.
    pub fn deselect(&mut self) {
        self.tag = None;
    }

    /// The currently selected tag, if any
    pub fn tag(&self) -> Option<&TagRecord> {
        self.tag.as_ref()
    }

    /// UID of the currently selected tag
    pub fn uid(&self) -> Option<&[u8]> {
        self.tag.as_ref().map(|t| t.uid.as_slice())
    }

    /// UID of the currently selected tag as uppercase hex
    pub fn uid_hex(&self) -> Option<String> {
        self.tag.as_ref().map(TagRecord::uid_hex)
    }

    /// Type of the currently selected tag
    pub fn card_type(&self) -> Option<CardType> {
        self.tag.as_ref().map(|t| t.card_type)
    }

    /// Check whether a tag is in the field.
    ///
    /// With a detect pin this samples the line (active low) and touches
    /// neither the bus nor the session state. Without one it runs
    /// [`Sl030::select_tag`] and reports whether a tag answered, which
    /// updates the session state as a side effect.
    pub fn is_present(&mut self) -> Result<bool, Sl030Error> {
        if let Detect::Pin(pin) = &mut self.detect {
            let level = pin
                .read_level()
                .map_err(|e| Sl030Error::Pin(format!("{:?}", e)))?;
            return Ok(level == Level::Low);
        }
        Ok(self.select_tag()?.is_some())
    }

    /// Block until a tag arrives, polling every 10 ms.
    ///
    /// Returns `Ok(true)` once a tag is present, `Ok(false)` if `timeout`
    /// elapses first.
    pub fn wait_until_present(&mut self, timeout: Duration) -> Result<bool, Sl030Error> {
        let start = Instant::now();
        loop {
            if self.is_present()? {
                return Ok(true);
            }
            if start.elapsed() >= timeout {
                return Ok(false);
            }
            std::thread::sleep(Self::PRESENT_POLL_INTERVAL);
        }
    }

    /// Block until the field is empty, polling every 500 ms.
    ///
    /// Returns `Ok(true)` once no tag is present, `Ok(false)` if `timeout`
    /// elapses first.
    pub fn wait_until_absent(&mut self, timeout: Duration) -> Result<bool, Sl030Error> {
        let start = Instant::now();
        loop {
            if !self.is_present()? {
                return Ok(true);
            }
            if start.elapsed() >= timeout {
                return Ok(false);
            }
            std::thread::sleep(Self::ABSENT_POLL_INTERVAL);
        }
    }

    fn exec(&mut self, cmd: u8) -> Result<Vec<u8>, Sl030Error> {
        let frame = encode_command(cmd);
        debug!("Sending command: {:02X?}", frame);
        self.transport
            .write(self.address, &frame)
            .map_err(|e| Sl030Error::Bus(format!("{:?}", e)))?;

        std::thread::sleep(Self::WRITE_READ_DELAY);

        let mut response = vec![0u8; Self::MAX_FRAME_LEN];
        match self.transport.read(self.address, &mut response) {
            Ok(bytes_read) => {
                response.truncate(bytes_read);
                debug!("Received {} bytes: {:02X?}", bytes_read, response);
                Ok(response)
            }
            Err(e) => {
                error!("Read error: {:?}", e);
                Err(Sl030Error::Bus(format!("{:?}", e)))
            }
        }
    }
}
