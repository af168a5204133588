//! SL030 Mifare RFID reader driver with support for multiple bus backends.
//!
//! The SL030 speaks a length-prefixed command/response protocol over I2C.
//! This crate drives one reader through the [`BusTransport`] trait and
//! detects tag presence either via the reader's tag-detect output line
//! (through the [`DetectPin`] trait) or by polling the select command.
//!
//! # Features
//!
//! - `embedded-hal` - I2C bus and input pin adapters for embedded-hal 0.2
//! - `linux-gpio` - tag-detect line via the Linux GPIO character device
//!
//! # Example
//!
//! ```ignore
//! use std::time::Duration;
//! use sl030::{I2cTransport, Sl030};
//!
//! let mut rfid = Sl030::new(I2cTransport::new(i2c_bus));
//! println!("reader firmware: {}", rfid.get_firmware()?);
//!
//! if rfid.wait_until_present(Duration::from_secs(30))? {
//!     if let Some(tag) = rfid.select_tag()? {
//!         println!("card {} ({})", tag.uid_hex(), tag.card_type.name());
//!     }
//!     rfid.wait_until_absent(Duration::from_secs(30))?;
//! }
//! ```

mod detect;
mod frame;
mod reader;
mod transport;
mod types;

#[cfg(feature = "embedded-hal")]
mod i2c;

#[cfg(feature = "linux-gpio")]
mod gpio;

// Re-exports
pub use detect::{DetectPin, Level, NoDetectPin};
pub use frame::{ResponseFrame, VersionCheck, validate_version};
pub use reader::Sl030;
pub use transport::BusTransport;
pub use types::{CardType, Sl030Error, TagRecord};

#[cfg(feature = "embedded-hal")]
pub use detect::HalDetectPin;

#[cfg(feature = "embedded-hal")]
pub use i2c::I2cTransport;

#[cfg(feature = "linux-gpio")]
pub use gpio::GpioDetectPin;
