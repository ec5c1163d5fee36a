#![no_std]
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod device;
pub mod interface;
pub mod registers;

// Re-export main types
pub use device::Pcf8576Driver;
#[cfg(feature = "async")]
pub use interface::AsyncCommandInterface;
pub use interface::{CommandInterface, I2cInterface};
pub use registers::{BiasConfig, DisplayStatus, DriveMode, ModeSet, PowerMode};

/// PCF8576 I2C address when SA0 is tied to VSS (default: 0x38)
///
/// Use [`I2cInterface::default()`] for this configuration.
pub const I2C_ADDRESS_SA0_LOW: u8 = 0x38;

/// PCF8576 I2C address when SA0 is tied to VDD (alternative: 0x39)
///
/// Use [`I2cInterface::alternative()`] for this configuration.
pub const I2C_ADDRESS_SA0_HIGH: u8 = 0x39;

/// Number of segment outputs addressable in static drive mode
pub const STATIC_PIXEL_COUNT: u8 = 40;

/// Driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Communication error with the device (includes a missing acknowledge)
    Bus(E),
    /// Requested configuration is not valid in the current drive mode
    InvalidConfig,
}

impl<E> From<E> for Error<E> {
    fn from(error: E) -> Self {
        Self::Bus(error)
    }
}
