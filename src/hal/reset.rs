//! Reset sequencing
//!
//! The I2S reset bits are not self-clearing; each one holds its target in
//! reset while high, so every reset is an assert/deassert pulse. Setup
//! resets the DMA engine, the FIFOs, and the transceiver before touching
//! any mode registers, then repeats the full sequence after the mode is
//! programmed so the new configuration starts from a clean state.

use crate::internal::register::i2s::{
    CONF_RX_FIFO_RESET, CONF_RX_RESET, CONF_TX_FIFO_RESET, CONF_TX_RESET, I2sRegs,
    LC_CONF_AHBM_FIFO_RST, LC_CONF_AHBM_RST, LC_CONF_IN_RST, LC_CONF_OUT_RST,
};

/// Pulse the DMA engine reset bits (both link directions)
pub fn dma_reset(regs: &I2sRegs) {
    regs.pulse_lc_conf_bits(LC_CONF_IN_RST | LC_CONF_OUT_RST);
}

/// Pulse the TX and RX FIFO reset bits
pub fn fifo_reset(regs: &I2sRegs) {
    regs.pulse_conf_bits(CONF_TX_FIFO_RESET | CONF_RX_FIFO_RESET);
}

/// Pulse the transceiver reset bits
pub fn transceiver_reset(regs: &I2sRegs) {
    regs.pulse_conf_bits(CONF_TX_RESET | CONF_RX_RESET);
}

/// Run the full reset sequence: transceiver, DMA engine, then FIFOs
pub fn full_reset(regs: &I2sRegs) {
    transceiver_reset(regs);
    dma_reset(regs);
    fifo_reset(regs);
}

/// Reset everything touched by the mode registers right before start
///
/// Pulses the DMA links together with the AHB master and its FIFO, then
/// the TX side and both FIFOs in one go.
pub fn pre_start_reset(regs: &I2sRegs) {
    regs.pulse_lc_conf_bits(
        LC_CONF_IN_RST | LC_CONF_OUT_RST | LC_CONF_AHBM_RST | LC_CONF_AHBM_FIFO_RST,
    );
    regs.pulse_conf_bits(CONF_TX_RESET | CONF_TX_FIFO_RESET | CONF_RX_FIFO_RESET);
}
