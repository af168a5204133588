//! Tag-detect pin via the Linux GPIO character device (gpiocdev)

use crate::detect::{DetectPin, Level};
use gpiocdev::line::{Offset, Value};
use gpiocdev::request::{Config, Request};

/// A single GPIO input line wired to the reader's tag-detect output
pub struct GpioDetectPin {
    request: Request,
    offset: Offset,
}

impl GpioDetectPin {
    /// Request `offset` on `chip` (e.g. `"/dev/gpiochip0"`) as an input
    pub fn new(chip: &str, offset: Offset) -> Result<Self, gpiocdev::Error> {
        let mut config = Config::default();
        config.with_line(offset).as_input();

        let request = Request::from_config(config)
            .on_chip(chip)
            .with_consumer("sl030")
            .request()?;

        log::debug!("gpio: requested tag-detect line {} on {}", offset, chip);
        Ok(Self { request, offset })
    }
}

impl DetectPin for GpioDetectPin {
    type Error = gpiocdev::Error;

    fn read_level(&mut self) -> Result<Level, Self::Error> {
        match self.request.value(self.offset)? {
            Value::Active => Ok(Level::High),
            Value::Inactive => Ok(Level::Low),
        }
    }
}
