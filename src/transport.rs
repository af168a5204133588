/// Trait for the I2C bus the reader is attached to.
/// Implement this trait for different bus backends (embedded-hal buses,
/// Linux i2c-dev, etc.)
pub trait BusTransport {
    /// Error type for bus operations
    type Error: std::fmt::Debug;

    /// Write a byte frame to the device at `address`
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error>;

    /// Read up to `buf.len()` bytes from the device at `address`,
    /// returning the number of bytes actually read
    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<usize, Self::Error>;
}
