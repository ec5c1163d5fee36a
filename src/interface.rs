//! Bus interface for the PCF8576
//!
//! The PCF8576 has no register address space: every transfer is a plain write
//! of command or display bytes to the device address. [`CommandInterface`]
//! captures exactly that, and [`I2cInterface`] implements it on top of the
//! `embedded-hal` I2C traits.

use crate::I2C_ADDRESS_SA0_LOW;

/// Blocking transport used by [`Pcf8576Driver`](crate::Pcf8576Driver)
pub trait CommandInterface {
    /// Error reported by the underlying bus
    type Error;

    /// Issue a zero-length write; succeeds only if the device acknowledges
    fn probe(&mut self) -> Result<(), Self::Error>;

    /// Write `bytes` to the device in a single transaction
    fn write_command(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;

    /// Current 7-bit device address
    fn address(&self) -> u8;

    /// Change the device address used by subsequent transfers
    fn set_address(&mut self, address: u8);
}

/// Async transport used by [`Pcf8576Driver`](crate::Pcf8576Driver)
#[cfg(feature = "async")]
#[allow(async_fn_in_trait)]
pub trait AsyncCommandInterface {
    /// Error reported by the underlying bus
    type Error;

    /// Issue a zero-length write; succeeds only if the device acknowledges
    async fn probe(&mut self) -> Result<(), Self::Error>;

    /// Write `bytes` to the device in a single transaction
    async fn write_command(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;

    /// Current 7-bit device address
    fn address(&self) -> u8;

    /// Change the device address used by subsequent transfers
    fn set_address(&mut self, address: u8);
}

/// I2C interface for the PCF8576
///
/// The bus can be owned or borrowed: `embedded-hal` implements `I2c` for
/// `&mut T`, so `I2cInterface::default(&mut i2c)` leaves the peripheral with
/// the caller.
pub struct I2cInterface<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> I2cInterface<I2C> {
    /// Create a new I2C interface with the default address (0x38, SA0 tied low)
    ///
    /// # Example
    /// ```ignore
    /// let interface = I2cInterface::default(i2c);
    /// let mut lcd = Pcf8576Driver::new(interface);
    /// ```
    pub const fn default(i2c: I2C) -> Self {
        Self {
            i2c,
            address: I2C_ADDRESS_SA0_LOW,
        }
    }

    /// Create a new I2C interface with the alternative address (0x39, SA0 tied high)
    pub const fn alternative(i2c: I2C) -> Self {
        Self {
            i2c,
            address: crate::I2C_ADDRESS_SA0_HIGH,
        }
    }

    /// Create a new I2C interface with a custom device address
    ///
    /// # Arguments
    /// * `i2c` - The I2C peripheral
    /// * `address` - The 7-bit I2C device address
    pub const fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Consume the interface and return the I2C peripheral
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C, E> CommandInterface for I2cInterface<I2C>
where
    I2C: embedded_hal::i2c::I2c<Error = E>,
{
    type Error = E;

    fn probe(&mut self) -> Result<(), Self::Error> {
        self.i2c.write(self.address, &[])
    }

    fn write_command(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        self.i2c.write(self.address, bytes)
    }

    fn address(&self) -> u8 {
        self.address
    }

    fn set_address(&mut self, address: u8) {
        self.address = address;
    }
}

#[cfg(feature = "async")]
impl<I2C, E> AsyncCommandInterface for I2cInterface<I2C>
where
    I2C: embedded_hal_async::i2c::I2c<Error = E>,
{
    type Error = E;

    async fn probe(&mut self) -> Result<(), Self::Error> {
        self.i2c.write(self.address, &[]).await
    }

    async fn write_command(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        self.i2c.write(self.address, bytes).await
    }

    fn address(&self) -> u8 {
        self.address
    }

    fn set_address(&mut self, address: u8) {
        self.address = address;
    }
}
