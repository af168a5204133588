//! I2C bus transport over the embedded-hal blocking traits

use crate::transport::BusTransport;
use embedded_hal::blocking::i2c::{Read, Write};

pub struct I2cTransport<I2C> {
    bus: I2C,
}

impl<I2C> I2cTransport<I2C> {
    pub fn new(bus: I2C) -> Self {
        Self { bus }
    }

    /// Give the bus back, e.g. to hand it to another device driver
    pub fn release(self) -> I2C {
        self.bus
    }
}

impl<I2C, E> BusTransport for I2cTransport<I2C>
where
    I2C: Read<Error = E> + Write<Error = E>,
    E: std::fmt::Debug,
{
    type Error = E;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        Write::write(&mut self.bus, address, data)
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<usize, Self::Error> {
        // embedded-hal blocking reads fill the whole buffer
        Read::read(&mut self.bus, address, buf)?;
        Ok(buf.len())
    }
}
