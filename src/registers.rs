//! Mode-set register layout for the PCF8576
//!
//! The PCF8576 is configured with a single mode-set command byte. Its low bits
//! carry four independent options, each living in its own bit range:
//!
//! | bits | field            | values                         |
//! |------|------------------|--------------------------------|
//! | 4    | [`POWER_MODE`]     | [`PowerMode`]                  |
//! | 3    | [`DISPLAY_STATUS`] | [`DisplayStatus`]              |
//! | 2    | [`BIAS_CONFIG`]    | [`BiasConfig`]                 |
//! | 1..0 | [`DRIVE_MODE`]     | [`DriveMode`]                  |
//!
//! Every field is described by a [`FieldInfo`], a packed `u16` holding the
//! shift in its low byte and the mask in its high byte. Descriptors are built
//! in `const` context, so a layout that does not fit in a byte fails to
//! compile. [`Field`] tags a descriptor with the enum it carries, which makes
//! reading a field as the wrong type a type error.

use core::marker::PhantomData;

/// Packed field descriptor
///
/// ```text
///  | mask | shift |
///  15    8 7      0
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FieldInfo(u16);

impl FieldInfo {
    /// Build a descriptor for a field `size` bits wide starting at bit `shift`
    ///
    /// # Panics
    /// Panics (at compile time when used in a `const`) if the field does not
    /// fit inside a single byte.
    pub const fn new(shift: u8, size: u8) -> Self {
        assert!(size <= 8, "Size of the block cannot exceed 8 bits");
        assert!(shift <= 8, "Shift amount cannot exceed 8 bits");
        assert!(shift + size <= 8, "Field must fit inside one byte");

        let mask = ((1u16 << size) - 1) << shift;
        Self((mask << 8) | shift as u16)
    }

    /// Bit offset of the field
    pub const fn shift(self) -> u8 {
        (self.0 & 0x00FF) as u8
    }

    /// Bits covered by the field
    pub const fn mask(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Width of the field in bits
    pub const fn size(self) -> u8 {
        self.mask().count_ones() as u8
    }

    /// The packed `mask << 8 | shift` representation
    pub const fn raw(self) -> u16 {
        self.0
    }
}

/// A value that can be stored in a register field
pub trait FieldValue: Copy {
    /// Raw bits of this value, right-aligned
    fn bits(self) -> u8;

    /// Decode right-aligned bits
    ///
    /// `bits` never exceeds the width of the field the value belongs to.
    fn from_bits(bits: u8) -> Self;
}

/// A register field bound to the type of value it holds
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct Field<T> {
    info: FieldInfo,
    _value: PhantomData<T>,
}

// Manual impls: derived ones would require `T: Clone`/`T: Copy`.
impl<T> Clone for Field<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Field<T> {}

impl<T> Field<T> {
    /// Define a field `size` bits wide starting at bit `shift`
    pub const fn new(shift: u8, size: u8) -> Self {
        Self {
            info: FieldInfo::new(shift, size),
            _value: PhantomData,
        }
    }

    /// Untyped descriptor of this field
    pub const fn info(self) -> FieldInfo {
        self.info
    }

    /// Bit offset of the field
    pub const fn shift(self) -> u8 {
        self.info.shift()
    }

    /// Bits covered by the field
    pub const fn mask(self) -> u8 {
        self.info.mask()
    }
}

/// Descriptor of a field
pub const fn field_info<T>(field: Field<T>) -> FieldInfo {
    field.info
}

/// Place `value` at the position of `field`, all other bits zero
#[inline]
pub fn encode<T: FieldValue>(field: Field<T>, value: T) -> u8 {
    value
        .bits()
        .checked_shl(u32::from(field.shift()))
        .unwrap_or(0)
        & field.mask()
}

/// Replace the bits of `field` inside `reg` with `value`
///
/// Bits outside the field's mask are left untouched.
#[inline]
pub fn merge<T: FieldValue>(reg: u8, field: Field<T>, value: T) -> u8 {
    (reg & !field.mask()) | encode(field, value)
}

/// Read the value of `field` out of `reg`
#[inline]
pub fn extract<T: FieldValue>(reg: u8, field: Field<T>) -> T {
    T::from_bits(
        (reg & field.mask())
            .checked_shr(u32::from(field.shift()))
            .unwrap_or(0),
    )
}

/// Check that no two masks share a bit
pub const fn fields_disjoint(masks: &[u8]) -> bool {
    let mut seen = 0u8;
    let mut i = 0;
    while i < masks.len() {
        if seen & masks[i] != 0 {
            return false;
        }
        seen |= masks[i];
        i += 1;
    }
    true
}

/// Power dissipation mode (bit 4)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum PowerMode {
    /// Normal-power mode
    #[default]
    Normal = 0b0,
    /// Power-saving mode
    PowerSaving = 0b1,
}

impl FieldValue for PowerMode {
    fn bits(self) -> u8 {
        self as u8
    }

    fn from_bits(bits: u8) -> Self {
        match bits & 0b1 {
            0 => Self::Normal,
            _ => Self::PowerSaving,
        }
    }
}

/// Display status (bit 3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum DisplayStatus {
    /// Display blanked
    Disabled = 0b0,
    /// Display driven
    #[default]
    Enabled = 0b1,
}

impl FieldValue for DisplayStatus {
    fn bits(self) -> u8 {
        self as u8
    }

    fn from_bits(bits: u8) -> Self {
        match bits & 0b1 {
            0 => Self::Disabled,
            _ => Self::Enabled,
        }
    }
}

/// LCD bias configuration (bit 2)
///
/// Not applicable in [`DriveMode::Static`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum BiasConfig {
    /// 1/3 bias
    #[default]
    Third = 0b0,
    /// 1/2 bias
    Half = 0b1,
}

impl FieldValue for BiasConfig {
    fn bits(self) -> u8 {
        self as u8
    }

    fn from_bits(bits: u8) -> Self {
        match bits & 0b1 {
            0 => Self::Third,
            _ => Self::Half,
        }
    }
}

/// LCD drive mode (bits 1..0)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum DriveMode {
    /// Static drive, backplane BP0
    #[default]
    Static = 0b01,
    /// 1:2 multiplex, BP0 and BP1
    OneToTwo = 0b10,
    /// 1:3 multiplex, BP0 to BP2
    OneToThree = 0b11,
    /// 1:4 multiplex, BP0 to BP3
    OneToFour = 0b00,
}

impl DriveMode {
    /// Number of backplanes driven in this mode
    pub const fn backplanes(self) -> u8 {
        match self {
            Self::Static => 1,
            Self::OneToTwo => 2,
            Self::OneToThree => 3,
            Self::OneToFour => 4,
        }
    }

    /// Whether this is one of the multiplexed modes
    pub const fn is_multiplexed(self) -> bool {
        !matches!(self, Self::Static)
    }
}

impl FieldValue for DriveMode {
    fn bits(self) -> u8 {
        self as u8
    }

    fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0b01 => Self::Static,
            0b10 => Self::OneToTwo,
            0b11 => Self::OneToThree,
            _ => Self::OneToFour,
        }
    }
}

/// Power dissipation mode
pub const POWER_MODE: Field<PowerMode> = Field::new(4, 1);
/// Display status
pub const DISPLAY_STATUS: Field<DisplayStatus> = Field::new(3, 1);
/// LCD bias configuration
pub const BIAS_CONFIG: Field<BiasConfig> = Field::new(2, 1);
/// LCD drive mode selection
pub const DRIVE_MODE: Field<DriveMode> = Field::new(0, 2);

/// Descriptors of every mode-set field
pub const MODE_SET_FIELDS: [FieldInfo; 4] = [
    POWER_MODE.info(),
    DISPLAY_STATUS.info(),
    BIAS_CONFIG.info(),
    DRIVE_MODE.info(),
];

const _: () = assert!(
    fields_disjoint(&[
        MODE_SET_FIELDS[0].mask(),
        MODE_SET_FIELDS[1].mask(),
        MODE_SET_FIELDS[2].mask(),
        MODE_SET_FIELDS[3].mask(),
    ]),
    "mode-set fields overlap"
);

/// Command bit: this is the last command of the transfer
pub const COMMAND_LAST: u8 = 0x80;
/// Command class bits of the mode-set command
pub const COMMAND_MODE_SET: u8 = 0x40;
/// Bits of the register byte carried by the mode-set command
pub const MODE_SET_PAYLOAD_MASK: u8 = 0x3F;

/// Register byte after power-up: normal power, display enabled, static drive
pub const DEFAULT_MODE_SET: u8 = (PowerMode::Normal as u8) << 4
    | (DisplayStatus::Enabled as u8) << 3
    | (DriveMode::Static as u8);

/// Build the mode-set command byte for a register value
pub const fn mode_set_command(reg: u8) -> u8 {
    COMMAND_LAST | COMMAND_MODE_SET | (reg & MODE_SET_PAYLOAD_MASK)
}

/// Decoded view of the whole mode-set register
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ModeSet {
    /// Power dissipation mode
    pub power_mode: PowerMode,
    /// Display status
    pub display_status: DisplayStatus,
    /// Bias configuration (ignored by the device in static drive)
    pub bias: BiasConfig,
    /// Drive mode
    pub drive_mode: DriveMode,
}

impl ModeSet {
    /// Decode every field of a register byte
    pub fn from_register(reg: u8) -> Self {
        Self {
            power_mode: extract(reg, POWER_MODE),
            display_status: extract(reg, DISPLAY_STATUS),
            bias: extract(reg, BIAS_CONFIG),
            drive_mode: extract(reg, DRIVE_MODE),
        }
    }

    /// Encode every field into a register byte
    pub fn to_register(&self) -> u8 {
        encode(POWER_MODE, self.power_mode)
            | encode(DISPLAY_STATUS, self.display_status)
            | encode(BIAS_CONFIG, self.bias)
            | encode(DRIVE_MODE, self.drive_mode)
    }
}
