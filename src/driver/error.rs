//! Error types for the I2S parallel driver
//!
//! Errors are organized by domain for better diagnostics:
//! - [`ConfigError`]: Setup and configuration failures
//! - [`DmaError`]: Descriptor ring construction issues
//!
//! The unified [`Error`] enum wraps both domain errors and is returned
//! by [`setup`](crate::driver::setup).

// =============================================================================
// Configuration Errors
// =============================================================================

/// Configuration and setup errors
///
/// These errors occur while validating a [`ParallelConfig`] or programming
/// the peripheral during setup.
///
/// [`ParallelConfig`]: crate::driver::config::ParallelConfig
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// More data pins supplied than the bus width carries
    TooManyPins,
    /// Requested sample clock is zero or above the peripheral base clock
    ClockOutOfRange,
    /// A buffer description covers zero bytes
    EmptyBuffer,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ConfigError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ConfigError::TooManyPins => "too many data pins for bus width",
            ConfigError::ClockOutOfRange => "sample clock out of range",
            ConfigError::EmptyBuffer => "buffer covers zero bytes",
        }
    }
}

// =============================================================================
// DMA Errors
// =============================================================================

/// Descriptor ring construction errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DmaError {
    /// Descriptor storage too small for the requested buffers
    StorageTooSmall,
    /// Buffers cover zero bytes, so no ring can be closed
    EmptyChain,
}

impl core::fmt::Display for DmaError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl DmaError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            DmaError::StorageTooSmall => "descriptor storage too small",
            DmaError::EmptyChain => "no descriptors to link into a ring",
        }
    }
}

// =============================================================================
// Unified Error Type
// =============================================================================

/// This enum wraps all domain-specific errors for unified error handling.
///
/// Match on the inner domain error for specific handling:
/// ```ignore
/// match result {
///     Err(Error::Config(ConfigError::ClockOutOfRange)) => { /* ... */ }
///     Err(Error::Dma(DmaError::StorageTooSmall)) => { /* ... */ }
///     _ => {}
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Configuration error
    Config(ConfigError),
    /// DMA error
    Dma(DmaError),
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Config(e) => write!(f, "config: {}", e.as_str()),
            Error::Dma(e) => write!(f, "dma: {}", e.as_str()),
        }
    }
}

// From impls for automatic conversion
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<DmaError> for Error {
    fn from(e: DmaError) -> Self {
        Error::Dma(e)
    }
}

/// Result type alias for driver operations
pub type Result<T> = core::result::Result<T, Error>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = core::result::Result<T, ConfigError>;

/// Result type alias for DMA operations
pub type DmaResult<T> = core::result::Result<T, DmaError>;

// =============================================================================
// Unit Tests
// =============================================================================
