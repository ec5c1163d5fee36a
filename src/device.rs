//! High-level driver API for the PCF8576
//!
//! The driver keeps an in-memory copy of the mode-set register. Every setter
//! updates that copy through the [`registers`](crate::registers) codec and
//! then pushes the whole register to the device as one mode-set command, so
//! the device always mirrors the last requested configuration.
//!
//! The driver is not internally synchronized. Updating the register and
//! transmitting it are two steps; callers sharing one display between tasks
//! must hold a lock around each call.

use crate::registers::{
    self, BiasConfig, DisplayStatus, DriveMode, ModeSet, PowerMode, BIAS_CONFIG, DEFAULT_MODE_SET,
    DISPLAY_STATUS, DRIVE_MODE, POWER_MODE,
};
use crate::{Error, STATIC_PIXEL_COUNT};

// Only import CommandInterface when not using async feature
#[cfg(not(feature = "async"))]
use crate::interface::CommandInterface;

#[cfg(feature = "async")]
use crate::interface::AsyncCommandInterface;

/// Main driver for the PCF8576
pub struct Pcf8576Driver<I> {
    interface: I,
    mode_set: u8,
}

impl<I> Pcf8576Driver<I> {
    /// Create a new driver with the power-up configuration
    ///
    /// No bus traffic happens here. Call `connect()` to check for the device
    /// and push the configuration.
    pub const fn new(interface: I) -> Self {
        Self {
            interface,
            mode_set: DEFAULT_MODE_SET,
        }
    }

    /// Raw mode-set register as currently held by the driver
    pub const fn register(&self) -> u8 {
        self.mode_set
    }

    /// Command byte the next configuration transfer will carry
    pub const fn command_byte(&self) -> u8 {
        registers::mode_set_command(self.mode_set)
    }

    /// Decoded copy of the whole configuration
    pub fn mode_set(&self) -> ModeSet {
        ModeSet::from_register(self.mode_set)
    }

    /// Whether power-saving mode is selected
    pub fn power_saving(&self) -> bool {
        registers::extract(self.mode_set, POWER_MODE) == PowerMode::PowerSaving
    }

    /// Whether the display is enabled
    pub fn display_enabled(&self) -> bool {
        registers::extract(self.mode_set, DISPLAY_STATUS) == DisplayStatus::Enabled
    }

    /// Selected bias configuration
    ///
    /// Returned regardless of the drive mode, even though the device ignores
    /// it in [`DriveMode::Static`].
    pub fn bias_config(&self) -> BiasConfig {
        registers::extract(self.mode_set, BIAS_CONFIG)
    }

    /// Selected drive mode
    pub fn drive_mode(&self) -> DriveMode {
        registers::extract(self.mode_set, DRIVE_MODE)
    }

    /// Consume the driver and return the interface
    pub fn release(self) -> I {
        self.interface
    }

    fn merge<T: registers::FieldValue>(&mut self, field: registers::Field<T>, value: T) {
        self.mode_set = registers::merge(self.mode_set, field, value);
    }
}

#[cfg(not(feature = "async"))]
impl<I> Pcf8576Driver<I>
where
    I: CommandInterface,
{
    /// Check for the device and push the current configuration to it
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bus`] if the device does not acknowledge its address
    /// or the mode-set command fails.
    pub fn connect(&mut self) -> Result<(), Error<I::Error>> {
        self.interface.probe()?;
        self.send_config()
    }

    /// Whether a device acknowledges at the configured address
    pub fn is_connected(&mut self) -> bool {
        self.interface.probe().is_ok()
    }

    /// Change the device address and check for a device there
    ///
    /// The configuration is not resent.
    pub fn set_address(&mut self, address: u8) -> bool {
        self.interface.set_address(address);
        self.is_connected()
    }

    /// Current device address
    pub fn address(&self) -> u8 {
        self.interface.address()
    }

    /// Select power-saving or normal power mode
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_power_saving(&mut self, enabled: bool) -> Result<(), Error<I::Error>> {
        let mode = if enabled {
            PowerMode::PowerSaving
        } else {
            PowerMode::Normal
        };
        self.merge(POWER_MODE, mode);
        self.send_config()
    }

    /// Enable or blank the display
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_display_enabled(&mut self, enabled: bool) -> Result<(), Error<I::Error>> {
        let status = if enabled {
            DisplayStatus::Enabled
        } else {
            DisplayStatus::Disabled
        };
        self.merge(DISPLAY_STATUS, status);
        self.send_config()
    }

    /// Select the LCD bias configuration
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] without touching the bus when the
    /// drive mode is [`DriveMode::Static`], or [`Error::Bus`] if the transfer
    /// fails.
    pub fn set_bias_config(&mut self, config: BiasConfig) -> Result<(), Error<I::Error>> {
        if self.drive_mode() == DriveMode::Static {
            #[cfg(feature = "defmt")]
            defmt::warn!("Bias configuration rejected in static drive mode");

            return Err(Error::InvalidConfig);
        }

        self.merge(BIAS_CONFIG, config);
        self.send_config()
    }

    /// Select the LCD drive mode
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_drive_mode(&mut self, mode: DriveMode) -> Result<(), Error<I::Error>> {
        self.merge(DRIVE_MODE, mode);
        self.send_config()
    }

    /// Turn one segment on or off in static drive mode
    ///
    /// Outside static drive mode, or for `index >= 40`, nothing is sent.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_pixel_state(&mut self, index: u8, enabled: bool) -> Result<(), Error<I::Error>> {
        if self.drive_mode() != DriveMode::Static || index >= STATIC_PIXEL_COUNT {
            #[cfg(feature = "defmt")]
            defmt::debug!("Pixel {} write ignored", index);

            return Ok(());
        }

        self.interface.write_command(&[index, u8::from(enabled)])?;
        Ok(())
    }

    fn send_config(&mut self) -> Result<(), Error<I::Error>> {
        let command = self.command_byte();

        #[cfg(feature = "defmt")]
        defmt::debug!("Mode set: {=u8:#x}", command);

        self.interface.write_command(&[command])?;
        Ok(())
    }
}

#[cfg(feature = "async")]
impl<I> Pcf8576Driver<I>
where
    I: AsyncCommandInterface,
{
    /// Check for the device and push the current configuration to it
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bus`] if the device does not acknowledge its address
    /// or the mode-set command fails.
    pub async fn connect(&mut self) -> Result<(), Error<I::Error>> {
        self.interface.probe().await?;
        self.send_config().await
    }

    /// Whether a device acknowledges at the configured address
    pub async fn is_connected(&mut self) -> bool {
        self.interface.probe().await.is_ok()
    }

    /// Change the device address and check for a device there
    ///
    /// The configuration is not resent.
    pub async fn set_address(&mut self, address: u8) -> bool {
        self.interface.set_address(address);
        self.is_connected().await
    }

    /// Current device address
    pub fn address(&self) -> u8 {
        self.interface.address()
    }

    /// Select power-saving or normal power mode
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn set_power_saving(&mut self, enabled: bool) -> Result<(), Error<I::Error>> {
        let mode = if enabled {
            PowerMode::PowerSaving
        } else {
            PowerMode::Normal
        };
        self.merge(POWER_MODE, mode);
        self.send_config().await
    }

    /// Enable or blank the display
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn set_display_enabled(&mut self, enabled: bool) -> Result<(), Error<I::Error>> {
        let status = if enabled {
            DisplayStatus::Enabled
        } else {
            DisplayStatus::Disabled
        };
        self.merge(DISPLAY_STATUS, status);
        self.send_config().await
    }

    /// Select the LCD bias configuration
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] without touching the bus when the
    /// drive mode is [`DriveMode::Static`], or [`Error::Bus`] if the transfer
    /// fails.
    pub async fn set_bias_config(&mut self, config: BiasConfig) -> Result<(), Error<I::Error>> {
        if self.drive_mode() == DriveMode::Static {
            #[cfg(feature = "defmt")]
            defmt::warn!("Bias configuration rejected in static drive mode");

            return Err(Error::InvalidConfig);
        }

        self.merge(BIAS_CONFIG, config);
        self.send_config().await
    }

    /// Select the LCD drive mode
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn set_drive_mode(&mut self, mode: DriveMode) -> Result<(), Error<I::Error>> {
        self.merge(DRIVE_MODE, mode);
        self.send_config().await
    }

    /// Turn one segment on or off in static drive mode
    ///
    /// Outside static drive mode, or for `index >= 40`, nothing is sent.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn set_pixel_state(
        &mut self,
        index: u8,
        enabled: bool,
    ) -> Result<(), Error<I::Error>> {
        if self.drive_mode() != DriveMode::Static || index >= STATIC_PIXEL_COUNT {
            #[cfg(feature = "defmt")]
            defmt::debug!("Pixel {} write ignored", index);

            return Ok(());
        }

        self.interface
            .write_command(&[index, u8::from(enabled)])
            .await?;
        Ok(())
    }

    async fn send_config(&mut self) -> Result<(), Error<I::Error>> {
        let command = self.command_byte();

        #[cfg(feature = "defmt")]
        defmt::debug!("Mode set: {=u8:#x}", command);

        self.interface.write_command(&[command]).await?;
        Ok(())
    }
}
