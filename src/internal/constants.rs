//! Internal constants shared across the driver.
//!
//! Values originate from the ESP32 Technical Reference Manual (I2S chapter)
//! unless noted otherwise.

// =============================================================================
// DMA Descriptor Limits
// =============================================================================

/// Maximum payload one out-link descriptor may carry, in bytes.
///
/// The descriptor length field is 12 bits wide; the DMA engine additionally
/// requires the value to stay below 4096, so 4096 - 4 is the practical limit.
pub const DMA_MAX_CHUNK: usize = 4096 - 4;

// =============================================================================
// Clocking
// =============================================================================

/// I2S module base clock (APB-fed PLL_D2 tap), in Hz.
pub const I2S_BASE_CLOCK_HZ: u32 = 80_000_000;

/// Largest value the `clkm_div_num` register field can hold (8 bits).
pub const MAX_SAMPLE_CLOCK_DIVIDER: u32 = 0xFF;

/// Fractional divider numerator/denominator. Both are parked at 63 so the
/// fractional stage contributes nothing; only the integer divider applies.
pub const CLKM_DIV_FRACTION: u32 = 63;

/// Bit clock divider for both directions. The parallel output clocks one
/// sample per word-select edge, so the exact bck ratio is not observable on
/// the data pins; 4 is the value proven on hardware.
pub const BCK_DIVIDER: u32 = 4;

// =============================================================================
// FIFO
// =============================================================================

/// TX/RX FIFO request thresholds, in 32-bit words.
pub const FIFO_THRESHOLD_WORDS: u32 = 32;
