//! Tag-detect pin abstraction
//!
//! The SL030 exposes an OUT line that goes low while a tag sits in the field.
//! Wiring it to a digital input gives presence detection without touching the
//! bus; without it the driver falls back to protocol polling.

/// Logic level of a digital input line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    High,
    Low,
}

/// Trait for the digital input the tag-detect line is wired to
pub trait DetectPin {
    /// Error type for pin reads
    type Error: std::fmt::Debug;

    /// Sample the current level of the line
    fn read_level(&mut self) -> Result<Level, Self::Error>;
}

/// Placeholder pin for protocol-polled instances. Never sampled by the
/// driver; always reports the line idle.
pub struct NoDetectPin;

impl DetectPin for NoDetectPin {
    type Error = std::convert::Infallible;

    fn read_level(&mut self) -> Result<Level, Self::Error> {
        Ok(Level::High)
    }
}

/// Adapter for any `embedded-hal` digital input pin
#[cfg(feature = "embedded-hal")]
pub struct HalDetectPin<P>(pub P);

#[cfg(feature = "embedded-hal")]
impl<P> DetectPin for HalDetectPin<P>
where
    P: embedded_hal::digital::v2::InputPin,
    P::Error: std::fmt::Debug,
{
    type Error = P::Error;

    fn read_level(&mut self) -> Result<Level, Self::Error> {
        if self.0.is_low()? {
            Ok(Level::Low)
        } else {
            Ok(Level::High)
        }
    }
}
