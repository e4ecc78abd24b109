//! GPIO matrix signal routing
//!
//! Maps the configured pins onto the I2S output signals. Each unit has
//! its own word select signal and its own bank of data signals; I2S1
//! additionally shifts its data out of the high byte lanes in the
//! narrower bus modes, so its signal base depends on the width.

use crate::driver::config::{BitWidth, ParallelConfig, Unit};
use crate::internal::register::gpio::{
    GpioMatrix, I2S0O_DATA_OUT0_IDX, I2S0O_WS_OUT_IDX, I2S1O_DATA_OUT0_IDX, I2S1O_DATA_OUT8_IDX,
    I2S1O_WS_OUT_IDX,
};

/// GPIO matrix index of the first data output signal for `unit` at `width`
///
/// I2S0 always presents data starting at its low signal. I2S1 presents
/// data from bit 8 upward except in 32-bit mode, so every narrower mode
/// routes from the DATA_OUT8 signal.
#[must_use]
pub const fn data_signal_base(unit: Unit, width: BitWidth) -> u16 {
    match unit {
        Unit::I2s0 => I2S0O_DATA_OUT0_IDX,
        Unit::I2s1 => match width {
            BitWidth::Bits32 => I2S1O_DATA_OUT0_IDX,
            BitWidth::Bits8 | BitWidth::Bits16 | BitWidth::Bits24 => I2S1O_DATA_OUT8_IDX,
        },
    }
}

/// GPIO matrix index of the word select output for `unit`
///
/// Word select toggles once per sample and serves as the bus clock.
#[must_use]
pub const fn ws_signal(unit: Unit) -> u16 {
    match unit {
        Unit::I2s0 => I2S0O_WS_OUT_IDX,
        Unit::I2s1 => I2S1O_WS_OUT_IDX,
    }
}

/// Route the configured pins to `unit`'s output signals
///
/// Unrouted lines (`None` slots) are skipped; the corresponding bus bits
/// still clock out internally but reach no pad.
pub fn route(unit: Unit, config: &ParallelConfig) {
    let base = data_signal_base(unit, config.bit_width);
    for (bit, pin) in config.data_pins[..config.bit_width.pin_count()]
        .iter()
        .enumerate()
    {
        if let Some(gpio) = pin {
            GpioMatrix::route_output(*gpio, base + bit as u16);
        }
    }
    if let Some(gpio) = config.clock_pin {
        GpioMatrix::route_output(gpio, ws_signal(unit));
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn i2s0_data_base_is_width_independent() {
        assert_eq!(
            data_signal_base(Unit::I2s0, BitWidth::Bits8),
            I2S0O_DATA_OUT0_IDX
        );
        assert_eq!(
            data_signal_base(Unit::I2s0, BitWidth::Bits16),
            I2S0O_DATA_OUT0_IDX
        );
        assert_eq!(
            data_signal_base(Unit::I2s0, BitWidth::Bits32),
            I2S0O_DATA_OUT0_IDX
        );
    }

    #[test]
    fn i2s1_narrow_modes_use_high_byte_signals() {
        assert_eq!(
            data_signal_base(Unit::I2s1, BitWidth::Bits8),
            I2S1O_DATA_OUT8_IDX
        );
        assert_eq!(
            data_signal_base(Unit::I2s1, BitWidth::Bits16),
            I2S1O_DATA_OUT8_IDX
        );
        assert_eq!(
            data_signal_base(Unit::I2s1, BitWidth::Bits24),
            I2S1O_DATA_OUT8_IDX
        );
    }

    #[test]
    fn i2s1_wide_mode_uses_low_signal() {
        assert_eq!(
            data_signal_base(Unit::I2s1, BitWidth::Bits32),
            I2S1O_DATA_OUT0_IDX
        );
    }

    #[test]
    fn ws_signals_are_per_unit() {
        assert_eq!(ws_signal(Unit::I2s0), I2S0O_WS_OUT_IDX);
        assert_eq!(ws_signal(Unit::I2s1), I2S1O_WS_OUT_IDX);
        assert_ne!(ws_signal(Unit::I2s0), ws_signal(Unit::I2s1));
    }
}
