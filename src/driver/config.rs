//! Configuration types for the I2S parallel driver

use crate::driver::error::{ConfigError, ConfigResult};
use crate::internal::constants::I2S_BASE_CLOCK_HZ;

/// Maximum number of data pin slots in a [`ParallelConfig`]
///
/// Sized for the widest bus mode; narrower modes only use a prefix.
pub const MAX_DATA_PINS: usize = 32;

/// I2S peripheral unit
///
/// The ESP32 carries two I2S units with identical register layouts at
/// different base addresses. Both can drive a parallel bus independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Unit {
    /// I2S unit 0
    #[default]
    I2s0,
    /// I2S unit 1
    I2s1,
}

impl Unit {
    /// Zero-based unit index, usable as a registry slot
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Unit::I2s0 => 0,
            Unit::I2s1 => 1,
        }
    }
}

/// Parallel bus width
///
/// Selects how many data signals clock out per sample and how wide each
/// sample in the frame buffers is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum BitWidth {
    /// 8 data lines, one byte per sample
    #[default]
    Bits8 = 8,
    /// 16 data lines, one half-word per sample
    Bits16 = 16,
    /// 24 data lines
    Bits24 = 24,
    /// 32 data lines, one word per sample
    Bits32 = 32,
}

impl BitWidth {
    /// Bus width in bits, as programmed into the sample rate register
    #[must_use]
    pub const fn bits(self) -> u32 {
        self as u32
    }

    /// Number of data pin slots this width uses
    #[must_use]
    pub const fn pin_count(self) -> usize {
        self as usize
    }
}

/// Identifies one of the two frame buffers in a double-buffer pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BufferId {
    /// First buffer, displayed after setup
    #[default]
    A,
    /// Second buffer
    B,
}

impl BufferId {
    /// Zero-based buffer index
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            BufferId::A => 0,
            BufferId::B => 1,
        }
    }
}

/// One contiguous span of frame memory
///
/// A frame buffer may be assembled from several segments; the descriptor
/// builder chunks each one independently. The memory must stay valid and
/// DMA-reachable for as long as the peripheral streams from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferSegment {
    ptr: *const u8,
    len: usize,
}

impl BufferSegment {
    /// Describe a segment by raw pointer and length
    #[must_use]
    pub const fn from_raw(ptr: *const u8, len: usize) -> Self {
        Self { ptr, len }
    }

    /// Describe a segment covering an entire slice
    #[must_use]
    pub const fn from_slice(data: &[u8]) -> Self {
        Self {
            ptr: data.as_ptr(),
            len: data.len(),
        }
    }

    /// Segment length in bytes
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether the segment covers zero bytes
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Pointer to the first byte
    #[must_use]
    pub const fn as_ptr(&self) -> *const u8 {
        self.ptr
    }
}

// The pointer is only dereferenced by the DMA engine; the host side treats
// it as an address.
unsafe impl Send for BufferSegment {}
unsafe impl Sync for BufferSegment {}

/// Complete parallel output configuration
///
/// Built with the `with_*` methods and handed to
/// [`setup`](crate::driver::setup), which validates it first.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ParallelConfig {
    /// Sample clock in Hz (rate at which bus words are emitted)
    pub sample_rate_hz: u32,
    /// Parallel bus width
    pub bit_width: BitWidth,
    /// GPIO carrying the word select output, used as the bus clock.
    /// `None` leaves the clock unrouted.
    pub clock_pin: Option<u8>,
    /// GPIO for each data line, indexed by bit position.
    /// `None` leaves that line unrouted.
    pub data_pins: [Option<u8>; MAX_DATA_PINS],
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ParallelConfig {
    /// Create a configuration with defaults: 1 MHz sample clock, 8-bit
    /// bus, no pins routed
    #[must_use]
    pub const fn new() -> Self {
        Self {
            sample_rate_hz: 1_000_000,
            bit_width: BitWidth::Bits8,
            clock_pin: None,
            data_pins: [None; MAX_DATA_PINS],
        }
    }

    // =========================================================================
    // Builder Methods
    // =========================================================================

    /// Set the sample clock in Hz
    #[must_use]
    pub const fn with_sample_rate_hz(mut self, hz: u32) -> Self {
        self.sample_rate_hz = hz;
        self
    }

    /// Set the parallel bus width
    #[must_use]
    pub const fn with_bit_width(mut self, width: BitWidth) -> Self {
        self.bit_width = width;
        self
    }

    /// Route the bus clock to `gpio`
    #[must_use]
    pub const fn with_clock_pin(mut self, gpio: u8) -> Self {
        self.clock_pin = Some(gpio);
        self
    }

    /// Route data line `bit` to `gpio`
    ///
    /// # Panics
    ///
    /// Panics if `bit` is outside the pin slot range.
    #[must_use]
    pub const fn with_data_pin(mut self, bit: usize, gpio: u8) -> Self {
        self.data_pins[bit] = Some(gpio);
        self
    }

    /// Route data lines from a slice, `pins[0]` to bit 0 and so on
    ///
    /// Slots past the end of the slice are left untouched.
    ///
    /// # Panics
    ///
    /// Panics if the slice holds more than [`MAX_DATA_PINS`] entries.
    #[must_use]
    pub const fn with_data_pins(mut self, pins: &[Option<u8>]) -> Self {
        assert!(pins.len() <= MAX_DATA_PINS);
        let mut i = 0;
        while i < pins.len() {
            self.data_pins[i] = pins[i];
            i += 1;
        }
        self
    }

    // =========================================================================
    // Validation
    // =========================================================================

    /// Check the configuration for values the hardware cannot express
    ///
    /// # Errors
    ///
    /// - [`ConfigError::ClockOutOfRange`] if the sample clock is zero or
    ///   above the 80 MHz peripheral base clock
    /// - [`ConfigError::TooManyPins`] if a data pin is routed beyond the
    ///   selected bus width
    pub fn validate(&self) -> ConfigResult<()> {
        if self.sample_rate_hz == 0 || self.sample_rate_hz > I2S_BASE_CLOCK_HZ {
            return Err(ConfigError::ClockOutOfRange);
        }
        let width = self.bit_width.pin_count();
        if self.data_pins[width..].iter().any(Option::is_some) {
            return Err(ConfigError::TooManyPins);
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_indices_are_distinct() {
        assert_eq!(Unit::I2s0.index(), 0);
        assert_eq!(Unit::I2s1.index(), 1);
    }

    #[test]
    fn bit_width_values() {
        assert_eq!(BitWidth::Bits8.bits(), 8);
        assert_eq!(BitWidth::Bits16.bits(), 16);
        assert_eq!(BitWidth::Bits24.bits(), 24);
        assert_eq!(BitWidth::Bits32.bits(), 32);
        assert_eq!(BitWidth::Bits24.pin_count(), 24);
    }

    #[test]
    fn buffer_id_indices() {
        assert_eq!(BufferId::A.index(), 0);
        assert_eq!(BufferId::B.index(), 1);
        assert_eq!(BufferId::default(), BufferId::A);
    }

    #[test]
    fn segment_from_slice() {
        let data = [1u8, 2, 3, 4];
        let seg = BufferSegment::from_slice(&data);
        assert_eq!(seg.len(), 4);
        assert_eq!(seg.as_ptr(), data.as_ptr());
        assert!(!seg.is_empty());
    }

    #[test]
    fn config_default_values() {
        let config = ParallelConfig::new();

        assert_eq!(config.sample_rate_hz, 1_000_000);
        assert_eq!(config.bit_width, BitWidth::Bits8);
        assert_eq!(config.clock_pin, None);
        assert!(config.data_pins.iter().all(Option::is_none));
    }

    #[test]
    fn config_default_trait_matches_new() {
        let from_default = ParallelConfig::default();
        let from_new = ParallelConfig::new();

        assert_eq!(from_default.sample_rate_hz, from_new.sample_rate_hz);
        assert_eq!(from_default.bit_width, from_new.bit_width);
    }

    #[test]
    fn config_builder_chaining() {
        let config = ParallelConfig::new()
            .with_sample_rate_hz(1_300_000)
            .with_bit_width(BitWidth::Bits16)
            .with_clock_pin(22)
            .with_data_pin(0, 4)
            .with_data_pin(15, 5);

        assert_eq!(config.sample_rate_hz, 1_300_000);
        assert_eq!(config.bit_width, BitWidth::Bits16);
        assert_eq!(config.clock_pin, Some(22));
        assert_eq!(config.data_pins[0], Some(4));
        assert_eq!(config.data_pins[15], Some(5));
        assert_eq!(config.data_pins[1], None);
    }

    #[test]
    fn config_builder_data_pins_slice() {
        let config =
            ParallelConfig::new().with_data_pins(&[Some(2), None, Some(4), Some(12)]);

        assert_eq!(config.data_pins[0], Some(2));
        assert_eq!(config.data_pins[1], None);
        assert_eq!(config.data_pins[2], Some(4));
        assert_eq!(config.data_pins[3], Some(12));
        assert_eq!(config.data_pins[4], None);
    }

    #[test]
    fn validate_accepts_reasonable_config() {
        let config = ParallelConfig::new()
            .with_sample_rate_hz(2_000_000)
            .with_clock_pin(22)
            .with_data_pins(&[Some(2), Some(4), Some(5), Some(12)]);

        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_clock() {
        let config = ParallelConfig::new().with_sample_rate_hz(0);
        assert_eq!(config.validate(), Err(ConfigError::ClockOutOfRange));
    }

    #[test]
    fn validate_rejects_clock_above_base() {
        let config = ParallelConfig::new().with_sample_rate_hz(I2S_BASE_CLOCK_HZ + 1);
        assert_eq!(config.validate(), Err(ConfigError::ClockOutOfRange));
    }

    #[test]
    fn validate_accepts_clock_at_base() {
        let config = ParallelConfig::new().with_sample_rate_hz(I2S_BASE_CLOCK_HZ);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_pin_beyond_width() {
        let config = ParallelConfig::new()
            .with_bit_width(BitWidth::Bits8)
            .with_data_pin(8, 13);

        assert_eq!(config.validate(), Err(ConfigError::TooManyPins));
    }

    #[test]
    fn validate_allows_unrouted_lines_within_width() {
        let config = ParallelConfig::new()
            .with_bit_width(BitWidth::Bits8)
            .with_data_pins(&[Some(2), None, None, Some(12)]);

        assert!(config.validate().is_ok());
    }
}
