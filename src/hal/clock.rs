//! Sample clock configuration
//!
//! The output word rate derives from the 80 MHz peripheral base clock
//! through an integer prescaler (CLKM) followed by a fixed bit clock
//! divider. Fractional division is not used; the achieved rate is the
//! base clock over the truncated integer divider, so requested rates
//! that do not divide 80 MHz evenly come out slightly high.

use crate::driver::config::BitWidth;
use crate::internal::constants::{
    BCK_DIVIDER, CLKM_DIV_FRACTION, I2S_BASE_CLOCK_HZ, MAX_SAMPLE_CLOCK_DIVIDER,
};
use crate::internal::register::i2s::{
    CLKM_DIV_A_SHIFT, CLKM_DIV_B_SHIFT, CLKM_DIV_NUM_SHIFT, I2sRegs,
    SAMPLE_RATE_RX_BCK_DIV_SHIFT, SAMPLE_RATE_RX_BITS_MOD_SHIFT, SAMPLE_RATE_TX_BCK_DIV_SHIFT,
    SAMPLE_RATE_TX_BITS_MOD_SHIFT,
};

/// Divider settings derived from a requested sample rate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockDividers {
    /// Integer CLKM prescaler
    pub div_num: u32,
    /// Fractional numerator, pinned to the full-scale value
    pub div_b: u32,
    /// Fractional denominator, pinned to the full-scale value
    pub div_a: u32,
    /// Bit clock divider after the prescaler
    pub bck_div: u32,
}

/// Compute divider settings for a requested sample rate
///
/// The prescaler is the base clock over the rate, truncated, and clamped
/// to the 8-bit register field. 1 MHz yields 80; 1.3 MHz yields 61.
///
/// # Panics
///
/// Panics if `sample_rate_hz` is zero. Rates that reach here through
/// [`setup`](crate::driver::parallel::setup) have already been validated.
#[must_use]
pub const fn dividers_for(sample_rate_hz: u32) -> ClockDividers {
    assert!(sample_rate_hz > 0, "sample rate must be non-zero");
    let mut div_num = I2S_BASE_CLOCK_HZ / sample_rate_hz;
    if div_num > MAX_SAMPLE_CLOCK_DIVIDER {
        div_num = MAX_SAMPLE_CLOCK_DIVIDER;
    }
    ClockDividers {
        div_num,
        div_b: CLKM_DIV_FRACTION,
        div_a: CLKM_DIV_FRACTION,
        bck_div: BCK_DIVIDER,
    }
}

impl ClockDividers {
    /// Sample rate the hardware will actually produce
    #[must_use]
    pub const fn achieved_rate_hz(&self) -> u32 {
        I2S_BASE_CLOCK_HZ / self.div_num
    }

    /// CLKM_CONF register image: divider fields only
    #[must_use]
    pub const fn clkm_conf_value(&self) -> u32 {
        (self.div_num << CLKM_DIV_NUM_SHIFT)
            | (self.div_b << CLKM_DIV_B_SHIFT)
            | (self.div_a << CLKM_DIV_A_SHIFT)
    }
}

/// Program CLKM_CONF and SAMPLE_RATE_CONF for the given rate and bus width
///
/// Both registers are written whole, discarding any previous contents.
pub fn program(regs: &I2sRegs, sample_rate_hz: u32, width: BitWidth) {
    let div = dividers_for(sample_rate_hz);

    // Only the divider fields; the digital clock gate stays untouched.
    regs.set_clkm_conf(div.clkm_conf_value());

    let bits = width.bits();
    regs.set_sample_rate_conf(
        (div.bck_div << SAMPLE_RATE_TX_BCK_DIV_SHIFT)
            | (div.bck_div << SAMPLE_RATE_RX_BCK_DIV_SHIFT)
            | (bits << SAMPLE_RATE_TX_BITS_MOD_SHIFT)
            | (bits << SAMPLE_RATE_RX_BITS_MOD_SHIFT),
    );

    #[cfg(feature = "defmt")]
    defmt::debug!(
        "clocks: requested {} Hz, div_num {}, achieved {} Hz",
        sample_rate_hz,
        div.div_num,
        div.achieved_rate_hz()
    );
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_megahertz_divides_exactly() {
        let div = dividers_for(1_000_000);
        assert_eq!(div.div_num, 80);
        assert_eq!(div.achieved_rate_hz(), 1_000_000);
    }

    #[test]
    fn non_integral_rate_truncates() {
        // 80 MHz / 1.3 MHz = 61.53..., truncated to 61
        let div = dividers_for(1_300_000);
        assert_eq!(div.div_num, 61);
        // achieved rate lands slightly above the request
        assert!(div.achieved_rate_hz() > 1_300_000);
    }

    #[test]
    fn fraction_fields_pinned() {
        let div = dividers_for(2_000_000);
        assert_eq!(div.div_b, CLKM_DIV_FRACTION);
        assert_eq!(div.div_a, CLKM_DIV_FRACTION);
        assert_eq!(div.bck_div, BCK_DIVIDER);
    }

    #[test]
    fn divider_clamped_to_field_width() {
        // A very low rate would need a prescaler beyond 8 bits
        let div = dividers_for(1_000);
        assert_eq!(div.div_num, MAX_SAMPLE_CLOCK_DIVIDER);
    }

    #[test]
    fn base_rate_gives_unity_divider() {
        let div = dividers_for(I2S_BASE_CLOCK_HZ);
        assert_eq!(div.div_num, 1);
    }

    #[test]
    fn clkm_image_carries_divider_fields_only() {
        let div = dividers_for(1_000_000);
        let image = div.clkm_conf_value();
        assert_eq!((image >> CLKM_DIV_NUM_SHIFT) & 0xFF, 80);
        assert_eq!((image >> CLKM_DIV_B_SHIFT) & 0x3F, CLKM_DIV_FRACTION);
        assert_eq!((image >> CLKM_DIV_A_SHIFT) & 0x3F, CLKM_DIV_FRACTION);
        // No bits above the divider fields, in particular no clock gate
        assert_eq!(image >> 20, 0);
    }

    #[test]
    #[should_panic(expected = "non-zero")]
    fn zero_rate_panics() {
        let _ = dividers_for(0);
    }
}
