//! GPIO Matrix Register Definitions
//!
//! ESP32 GPIO Matrix configuration for routing the I2S parallel output
//! signals (data bus and word-select clock) to arbitrary GPIO pins.
//!
//! Unlike IO_MUX peripheral functions, matrix-routed outputs may land on any
//! pin: the pad is put into GPIO function via IO_MUX, driven as an output,
//! and its output source is switched to the chosen peripheral signal index.

use super::{read_reg, write_reg};

// =============================================================================
// GPIO Base Addresses
// =============================================================================

/// GPIO peripheral base address
#[cfg(feature = "esp32")]
pub const GPIO_BASE: usize = 0x3FF4_4000;

/// GPIO output enable set register for pins 0..=31 (W1TS)
pub const GPIO_ENABLE_W1TS_OFFSET: usize = 0x24;

/// GPIO output enable set register for pins 32..=39 (W1TS)
pub const GPIO_ENABLE1_W1TS_OFFSET: usize = 0x30;

/// GPIO output function configuration register base offset
/// For GPIO N: GPIO_FUNC_OUT_SEL_CFG_REG = GPIO_BASE + 0x530 + (N * 4)
pub const GPIO_FUNC_OUT_SEL_CFG_BASE: usize = 0x530;

// =============================================================================
// GPIO Matrix Signal Numbers for I2S Output
// =============================================================================

/// First I2S0 parallel data output signal (`I2S0O_DATA_0`)
pub const I2S0O_DATA_OUT0_IDX: u16 = 140;

/// First I2S1 parallel data output signal (`I2S1O_DATA_0`)
pub const I2S1O_DATA_OUT0_IDX: u16 = 166;

/// Ninth I2S1 parallel data output signal (`I2S1O_DATA_8`).
///
/// In sub-32-bit modes I2S1 presents its parallel data on lines 8..23
/// instead of 0..15, so routing starts here.
pub const I2S1O_DATA_OUT8_IDX: u16 = 174;

/// I2S0 word select output signal (`I2S0O_WS`)
pub const I2S0O_WS_OUT_IDX: u16 = 25;

/// I2S1 word select output signal (`I2S1O_WS`)
pub const I2S1O_WS_OUT_IDX: u16 = 26;

// =============================================================================
// GPIO_FUNC_OUT_SEL_CFG bit fields
// =============================================================================

/// Function output select field (bits 8:0) - which peripheral signal to output
pub const GPIO_FUNC_OUT_SEL_MASK: u32 = 0x1FF;

/// Output invert (bit 9)
pub const GPIO_OUT_INV_SEL: u32 = 1 << 9;

/// Output enable select (bit 10) - 0=GPIO, 1=peripheral controls OE
pub const GPIO_OEN_SEL: u32 = 1 << 10;

// =============================================================================
// IO_MUX Configuration
// =============================================================================

/// IO_MUX base address
#[cfg(feature = "esp32")]
pub const IO_MUX_BASE: usize = 0x3FF4_9000;

/// IO_MUX function select field (bits 14:12)
pub const IO_MUX_MCU_SEL_SHIFT: u32 = 12;
/// IO_MUX function select mask
pub const IO_MUX_MCU_SEL_MASK: u32 = 0x7 << 12;

/// IO_MUX function value for GPIO Matrix routing
pub const IO_MUX_FUNC_GPIO: u32 = 2;

// =============================================================================
// GPIO Matrix Configuration
// =============================================================================

/// GPIO Matrix configuration for I2S output pins
pub struct GpioMatrix;

impl GpioMatrix {
    /// Route a peripheral output signal to a GPIO pin.
    ///
    /// The pad is switched to GPIO function via IO_MUX, enabled as an
    /// output, and its output source set to `signal` (no inversion). This
    /// mirrors what `gpio_matrix_out` does in ROM, with output enable kept
    /// under GPIO control.
    pub fn route_output(gpio_num: u8, signal: u16) {
        unsafe {
            // 1. Configure IO_MUX to use GPIO Matrix (function 2)
            let iomux_addr = Self::iomux_addr_for_gpio(gpio_num);
            if iomux_addr != 0 {
                let iomux_val = read_reg(iomux_addr);
                let new_iomux =
                    (iomux_val & !IO_MUX_MCU_SEL_MASK) | (IO_MUX_FUNC_GPIO << IO_MUX_MCU_SEL_SHIFT);
                write_reg(iomux_addr, new_iomux);
            }

            // 2. Enable GPIO output (pins 32+ live in the second bank)
            if gpio_num < 32 {
                write_reg(GPIO_BASE + GPIO_ENABLE_W1TS_OFFSET, 1 << gpio_num);
            } else {
                write_reg(GPIO_BASE + GPIO_ENABLE1_W1TS_OFFSET, 1 << (gpio_num - 32));
            }

            // 3. Connect the GPIO output to the peripheral signal
            let out_sel_addr = GPIO_BASE + GPIO_FUNC_OUT_SEL_CFG_BASE + (gpio_num as usize * 4);
            let out_sel_val = u32::from(signal) & GPIO_FUNC_OUT_SEL_MASK;
            write_reg(out_sel_addr, out_sel_val);
        }

        #[cfg(feature = "defmt")]
        defmt::trace!("GPIO{} routed to output signal {}", gpio_num, signal);
    }

    /// Get IO_MUX register address for a GPIO
    ///
    /// Returns 0 if GPIO is not supported
    fn iomux_addr_for_gpio(gpio_num: u8) -> usize {
        // IO_MUX offsets are not sequential - each GPIO has a specific offset
        // Based on ESP32 Technical Reference Manual Table 4-3
        let offset = match gpio_num {
            0 => 0x44,
            1 => 0x88,
            2 => 0x40,
            3 => 0x84,
            4 => 0x48,
            5 => 0x6C,
            6 => 0x60,
            7 => 0x64,
            8 => 0x68,
            9 => 0x54,
            10 => 0x58,
            11 => 0x5C,
            12 => 0x34,
            13 => 0x38,
            14 => 0x30,
            15 => 0x3C,
            16 => 0x4C,
            17 => 0x50,
            18 => 0x70,
            19 => 0x74,
            20 => 0x78,
            21 => 0x7C,
            22 => 0x80,
            23 => 0x8C,
            25 => 0x24,
            26 => 0x28,
            27 => 0x2C,
            32 => 0x1C,
            33 => 0x20,
            34 => 0x14,
            35 => 0x18,
            36 => 0x04,
            37 => 0x08,
            38 => 0x0C,
            39 => 0x10,
            _ => return 0,
        };

        IO_MUX_BASE + offset
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signal_indices() {
        assert_eq!(I2S0O_DATA_OUT0_IDX, 140);
        assert_eq!(I2S1O_DATA_OUT0_IDX, 166);
        assert_eq!(I2S1O_DATA_OUT8_IDX, I2S1O_DATA_OUT0_IDX + 8);
        assert_eq!(I2S0O_WS_OUT_IDX, 25);
        assert_eq!(I2S1O_WS_OUT_IDX, 26);
    }

    #[test]
    fn gpio_out_sel_address() {
        // GPIO22 output select address should be GPIO_BASE + 0x530 + (22 * 4)
        let addr = GPIO_BASE + GPIO_FUNC_OUT_SEL_CFG_BASE + (22 * 4);
        assert_eq!(addr, 0x3FF4_4588);
    }

    #[test]
    fn signal_index_fits_out_sel_field() {
        // The highest I2S data signal index must fit the 9-bit select field
        assert!(u32::from(I2S1O_DATA_OUT8_IDX + 23) <= GPIO_FUNC_OUT_SEL_MASK);
    }

    #[test]
    fn iomux_addresses() {
        assert_eq!(GpioMatrix::iomux_addr_for_gpio(16), 0x3FF4_904C);
        assert_eq!(GpioMatrix::iomux_addr_for_gpio(22), 0x3FF4_9080);
        // Input-only and nonexistent pads have no output IO_MUX entry
        assert_eq!(GpioMatrix::iomux_addr_for_gpio(24), 0);
        assert_eq!(GpioMatrix::iomux_addr_for_gpio(40), 0);
    }
}
