//! DPORT Clock Gating Registers
//!
//! The I2S units are clock-gated and held in reset out of power-on. Before
//! any I2S register is touched, the unit's clock must be enabled and its
//! reset line released via the DPORT peripheral control registers.

use super::{clear_bits, set_bits};

/// DPORT peripheral clock enable register
#[cfg(feature = "esp32")]
pub const DPORT_PERIP_CLK_EN_REG: usize = 0x3FF0_00C0;

/// DPORT peripheral reset register
#[cfg(feature = "esp32")]
pub const DPORT_PERIP_RST_EN_REG: usize = 0x3FF0_00C4;

/// I2S0 bit in the DPORT clock enable / reset registers
pub const DPORT_I2S0_BIT: u32 = 1 << 4;

/// I2S1 bit in the DPORT clock enable / reset registers
pub const DPORT_I2S1_BIT: u32 = 1 << 21;

/// Enable the module clock and release the reset line for one I2S unit.
///
/// `unit_bit` is [`DPORT_I2S0_BIT`] or [`DPORT_I2S1_BIT`]; clock enable and
/// reset share the bit position across the two registers.
pub fn enable_module(unit_bit: u32) {
    // SAFETY: fixed DPORT register addresses for this chip
    unsafe {
        set_bits(DPORT_PERIP_CLK_EN_REG, unit_bit);
        clear_bits(DPORT_PERIP_RST_EN_REG, unit_bit);
    }
}
