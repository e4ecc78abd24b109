//! I2S Register Definitions
//!
//! Register offsets and bit fields for the ESP32 I2S blocks in LCD
//! (parallel output) mode. Only the registers touched by this driver are
//! defined; the full block also contains PDM, camera and interrupt state
//! that parallel output never programs.

use super::{reg_bit_ops, reg_rw};

// =============================================================================
// Block Base Addresses
// =============================================================================

/// I2S0 register block base address
#[cfg(feature = "esp32")]
pub const I2S0_BASE: usize = 0x3FF4_F000;

/// I2S1 register block base address
#[cfg(feature = "esp32")]
pub const I2S1_BASE: usize = 0x3FF6_D000;

// =============================================================================
// Register Offsets
// =============================================================================

/// CONF register offset (resets, start bits, channel ordering)
pub const CONF_OFFSET: usize = 0x08;
/// TIMING register offset (signal delay tweaks, zeroed by this driver)
pub const TIMING_OFFSET: usize = 0x1C;
/// FIFO_CONF register offset
pub const FIFO_CONF_OFFSET: usize = 0x20;
/// CONF_CHAN register offset (channel packing mode)
pub const CONF_CHAN_OFFSET: usize = 0x2C;
/// OUT_LINK register offset (out-link descriptor address and control)
pub const OUT_LINK_OFFSET: usize = 0x30;
/// LC_CONF register offset (DMA engine configuration and resets)
pub const LC_CONF_OFFSET: usize = 0x60;
/// CONF1 register offset (PCM bypass, stop control)
pub const CONF1_OFFSET: usize = 0xA0;
/// CONF2 register offset (LCD/camera mode selection)
pub const CONF2_OFFSET: usize = 0xA8;
/// CLKM_CONF register offset (module clock divider)
pub const CLKM_CONF_OFFSET: usize = 0xAC;
/// SAMPLE_RATE_CONF register offset (bit clock divider, sample widths)
pub const SAMPLE_RATE_CONF_OFFSET: usize = 0xB0;

// =============================================================================
// CONF Register Bits
// =============================================================================

/// Reset the transmitter logic
pub const CONF_TX_RESET: u32 = 1 << 0;
/// Reset the receiver logic
pub const CONF_RX_RESET: u32 = 1 << 1;
/// Reset the transmit FIFO
pub const CONF_TX_FIFO_RESET: u32 = 1 << 2;
/// Reset the receive FIFO
pub const CONF_RX_FIFO_RESET: u32 = 1 << 3;
/// Start transmitting
pub const CONF_TX_START: u32 = 1 << 4;
/// Start receiving
pub const CONF_RX_START: u32 = 1 << 5;
/// Transmit right channel first (active-low word select)
pub const CONF_TX_RIGHT_FIRST: u32 = 1 << 8;
/// Receive right channel first
pub const CONF_RX_RIGHT_FIRST: u32 = 1 << 9;

// =============================================================================
// LC_CONF Register Bits (DMA engine)
// =============================================================================

/// Reset the in-link (RX) DMA state
pub const LC_CONF_IN_RST: u32 = 1 << 0;
/// Reset the out-link (TX) DMA state
pub const LC_CONF_OUT_RST: u32 = 1 << 1;
/// Reset the AHB master FIFO
pub const LC_CONF_AHBM_FIFO_RST: u32 = 1 << 2;
/// Reset the AHB master interface
pub const LC_CONF_AHBM_RST: u32 = 1 << 3;
/// Out-link EOF mode select
pub const LC_CONF_OUT_EOF_MODE: u32 = 1 << 8;
/// Burst-mode out-link descriptor fetches
pub const LC_CONF_OUTDSCR_BURST_EN: u32 = 1 << 9;
/// Burst-mode in-link descriptor fetches
pub const LC_CONF_INDSCR_BURST_EN: u32 = 1 << 10;
/// Burst-mode outgoing data reads
pub const LC_CONF_OUT_DATA_BURST_EN: u32 = 1 << 11;
/// Engine checks the descriptor owner bit before use
pub const LC_CONF_CHECK_OWNER: u32 = 1 << 12;

// =============================================================================
// OUT_LINK Register Bits
// =============================================================================

/// Out-link descriptor address field (low 20 bits of the address)
pub const OUTLINK_ADDR_MASK: u32 = 0x000F_FFFF;
/// Stop the out-link engine
pub const OUTLINK_STOP: u32 = 1 << 28;
/// Start the out-link engine at the programmed address
pub const OUTLINK_START: u32 = 1 << 29;
/// Restart the out-link engine from the most recent descriptor
pub const OUTLINK_RESTART: u32 = 1 << 30;

// =============================================================================
// CONF2 Register Bits
// =============================================================================

/// Camera (parallel input) mode enable
pub const CONF2_CAMERA_EN: u32 = 1 << 0;
/// LCD 8-bit double-write mode
pub const CONF2_LCD_TX_WRX2_EN: u32 = 1 << 1;
/// LCD data-doubling mode
pub const CONF2_LCD_TX_SDX2_EN: u32 = 1 << 2;
/// LCD (parallel output) mode enable
pub const CONF2_LCD_EN: u32 = 1 << 5;

// =============================================================================
// SAMPLE_RATE_CONF Register Fields
// =============================================================================

/// TX bit clock divider shift (6 bits)
pub const SAMPLE_RATE_TX_BCK_DIV_SHIFT: u32 = 0;
/// RX bit clock divider shift (6 bits)
pub const SAMPLE_RATE_RX_BCK_DIV_SHIFT: u32 = 6;
/// TX sample width shift (6 bits)
pub const SAMPLE_RATE_TX_BITS_MOD_SHIFT: u32 = 12;
/// RX sample width shift (6 bits)
pub const SAMPLE_RATE_RX_BITS_MOD_SHIFT: u32 = 18;
/// Width of each SAMPLE_RATE_CONF field
pub const SAMPLE_RATE_FIELD_MASK: u32 = 0x3F;

// =============================================================================
// CLKM_CONF Register Fields
// =============================================================================

/// Integer divider shift (8 bits)
pub const CLKM_DIV_NUM_SHIFT: u32 = 0;
/// Integer divider mask
pub const CLKM_DIV_NUM_MASK: u32 = 0xFF;
/// Fractional divider numerator shift (6 bits)
pub const CLKM_DIV_B_SHIFT: u32 = 8;
/// Fractional divider denominator shift (6 bits)
pub const CLKM_DIV_A_SHIFT: u32 = 14;

// =============================================================================
// FIFO_CONF Register Fields
// =============================================================================

/// RX FIFO request threshold shift (6 bits)
pub const FIFO_RX_DATA_NUM_SHIFT: u32 = 0;
/// TX FIFO request threshold shift (6 bits)
pub const FIFO_TX_DATA_NUM_SHIFT: u32 = 6;
/// Descriptor-driven (DMA) FIFO mode enable
pub const FIFO_DSCR_EN: u32 = 1 << 12;
/// TX FIFO mode shift (3 bits)
pub const FIFO_TX_FIFO_MOD_SHIFT: u32 = 13;
/// RX FIFO mode shift (3 bits)
pub const FIFO_RX_FIFO_MOD_SHIFT: u32 = 16;
/// Force the configured TX FIFO mode
pub const FIFO_TX_FIFO_MOD_FORCE_EN: u32 = 1 << 19;
/// Force the configured RX FIFO mode
pub const FIFO_RX_FIFO_MOD_FORCE_EN: u32 = 1 << 20;

// =============================================================================
// CONF1 Register Bits
// =============================================================================

/// Bypass the TX PCM compander
pub const CONF1_TX_PCM_BYPASS: u32 = 1 << 3;
/// Bypass the RX PCM compander
pub const CONF1_RX_PCM_BYPASS: u32 = 1 << 7;
/// Stop the bit clock when the FIFO runs dry
pub const CONF1_TX_STOP_EN: u32 = 1 << 8;

// =============================================================================
// CONF_CHAN Register Fields
// =============================================================================

/// TX channel mode shift (3 bits)
pub const CONF_CHAN_TX_SHIFT: u32 = 0;
/// RX channel mode shift (2 bits)
pub const CONF_CHAN_RX_SHIFT: u32 = 3;
/// Mono channel mode value (duplicate one channel on both slots)
pub const CHAN_MOD_MONO: u32 = 1;

// =============================================================================
// Register Block Accessor
// =============================================================================

/// Accessor for one I2S register block.
///
/// Holds the block base address; all reads and writes go through volatile
/// operations. The same layout is shared by I2S0 and I2S1.
#[derive(Debug, Clone, Copy)]
pub struct I2sRegs {
    base: usize,
}

impl I2sRegs {
    /// Create an accessor for the block at `base`.
    #[must_use]
    pub const fn new(base: usize) -> Self {
        Self { base }
    }

    /// Base address of this block.
    #[must_use]
    pub const fn base(&self) -> usize {
        self.base
    }

    reg_rw!(conf, set_conf, CONF_OFFSET, "the CONF register");
    reg_rw!(timing, set_timing, TIMING_OFFSET, "the TIMING register");
    reg_rw!(
        fifo_conf,
        set_fifo_conf,
        FIFO_CONF_OFFSET,
        "the FIFO_CONF register"
    );
    reg_rw!(
        conf_chan,
        set_conf_chan,
        CONF_CHAN_OFFSET,
        "the CONF_CHAN register"
    );
    reg_rw!(
        out_link,
        set_out_link,
        OUT_LINK_OFFSET,
        "the OUT_LINK register"
    );
    reg_rw!(lc_conf, set_lc_conf, LC_CONF_OFFSET, "the LC_CONF register");
    reg_rw!(conf1, set_conf1, CONF1_OFFSET, "the CONF1 register");
    reg_rw!(conf2, set_conf2, CONF2_OFFSET, "the CONF2 register");
    reg_rw!(
        clkm_conf,
        set_clkm_conf,
        CLKM_CONF_OFFSET,
        "the CLKM_CONF register"
    );
    reg_rw!(
        sample_rate_conf,
        set_sample_rate_conf,
        SAMPLE_RATE_CONF_OFFSET,
        "the SAMPLE_RATE_CONF register"
    );

    reg_bit_ops!(
        set_conf_bits,
        clear_conf_bits,
        pulse_conf_bits,
        CONF_OFFSET,
        "the CONF register"
    );
    reg_bit_ops!(
        set_lc_conf_bits,
        clear_lc_conf_bits,
        pulse_lc_conf_bits,
        LC_CONF_OFFSET,
        "the LC_CONF register"
    );
    reg_bit_ops!(
        set_out_link_bits,
        clear_out_link_bits,
        pulse_out_link_bits,
        OUT_LINK_OFFSET,
        "the OUT_LINK register"
    );
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_bases() {
        assert_eq!(I2S0_BASE, 0x3FF4_F000);
        assert_eq!(I2S1_BASE, 0x3FF6_D000);
    }

    #[test]
    fn out_link_register_address() {
        // I2S1 OUT_LINK should be I2S1_BASE + 0x30
        let regs = I2sRegs::new(I2S1_BASE);
        assert_eq!(regs.base() + OUT_LINK_OFFSET, 0x3FF6_D030);
    }

    #[test]
    fn outlink_address_field_width() {
        // The address field holds 20 bits; descriptor addresses in internal
        // RAM (0x3FFx_xxxx) must survive the mask
        let desc_addr: u32 = 0x3FFB_1230;
        assert_eq!(desc_addr & OUTLINK_ADDR_MASK, 0x000B_1230);
    }

    #[test]
    fn reset_bits_distinct() {
        let all = CONF_TX_RESET | CONF_RX_RESET | CONF_TX_FIFO_RESET | CONF_RX_FIFO_RESET;
        assert_eq!(all.count_ones(), 4);
        let lc = LC_CONF_IN_RST | LC_CONF_OUT_RST | LC_CONF_AHBM_FIFO_RST | LC_CONF_AHBM_RST;
        assert_eq!(lc, 0xF);
    }
}
