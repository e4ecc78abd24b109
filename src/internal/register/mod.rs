//! Memory-mapped register definitions for the ESP32 I2S peripherals
//!
//! This module provides type-safe access to the registers involved in
//! parallel output: the I2S blocks themselves, the GPIO matrix / IO_MUX
//! used for signal routing, and the DPORT clock gates.
//! All register access is volatile to ensure proper hardware interaction.

pub mod dport;
pub mod gpio;
pub mod i2s;

/// Read a 32-bit register at the given address
///
/// # Safety
/// The caller must ensure the address is valid and properly aligned.
#[inline(always)]
pub unsafe fn read_reg(addr: usize) -> u32 {
    unsafe { core::ptr::read_volatile(addr as *const u32) }
}

/// Write a 32-bit value to a register at the given address
///
/// # Safety
/// The caller must ensure the address is valid and properly aligned.
#[inline(always)]
pub unsafe fn write_reg(addr: usize, value: u32) {
    unsafe { core::ptr::write_volatile(addr as *mut u32, value) }
}

/// Modify a register using a read-modify-write operation
///
/// # Safety
/// The caller must ensure the address is valid and properly aligned.
#[inline(always)]
pub unsafe fn modify_reg<F>(addr: usize, f: F)
where
    F: FnOnce(u32) -> u32,
{
    // SAFETY: caller guarantees address validity
    let value = unsafe { read_reg(addr) };
    unsafe { write_reg(addr, f(value)) }
}

/// Set bits in a register (read-modify-write)
///
/// # Safety
/// The caller must ensure the address is valid and properly aligned.
#[inline(always)]
pub unsafe fn set_bits(addr: usize, bits: u32) {
    // SAFETY: caller guarantees address validity
    unsafe { modify_reg(addr, |v| v | bits) }
}

/// Clear bits in a register (read-modify-write)
///
/// # Safety
/// The caller must ensure the address is valid and properly aligned.
#[inline(always)]
pub unsafe fn clear_bits(addr: usize, bits: u32) {
    // SAFETY: caller guarantees address validity
    unsafe { modify_reg(addr, |v| v & !bits) }
}

// =============================================================================
// Register Access Macros
// =============================================================================

/// Generate read/write accessor methods for a register inside a block whose
/// base address is carried by `self.base`.
///
/// Unlike a fixed-base peripheral, the two I2S units share one register
/// layout at different bases, so the accessors are instance methods.
///
/// # Example
/// ```ignore
/// impl I2sRegs {
///     reg_rw!(conf, set_conf, CONF_OFFSET, "the CONF register");
/// }
/// ```
macro_rules! reg_rw {
    ($read_fn:ident, $write_fn:ident, $offset:expr, $doc:expr) => {
        #[doc = concat!("Read ", $doc)]
        #[inline(always)]
        pub fn $read_fn(&self) -> u32 {
            // SAFETY: base + offset addresses a register of this I2S block
            unsafe { $crate::internal::register::read_reg(self.base + $offset) }
        }

        #[doc = concat!("Write ", $doc)]
        #[inline(always)]
        pub fn $write_fn(&self, value: u32) {
            // SAFETY: base + offset addresses a register of this I2S block
            unsafe { $crate::internal::register::write_reg(self.base + $offset, value) }
        }
    };
}

/// Generate set/clear/pulse bit operation methods for a register.
///
/// The pulse method asserts the given bits and immediately deasserts them,
/// which is the required handshake for the I2S reset bits (they are not
/// self-clearing; leaving one high holds the unit in reset).
macro_rules! reg_bit_ops {
    ($set_fn:ident, $clear_fn:ident, $pulse_fn:ident, $offset:expr, $what:expr) => {
        #[doc = concat!("Set bits in ", $what)]
        #[inline(always)]
        pub fn $set_fn(&self, bits: u32) {
            // SAFETY: base + offset addresses a register of this I2S block
            unsafe { $crate::internal::register::set_bits(self.base + $offset, bits) }
        }

        #[doc = concat!("Clear bits in ", $what)]
        #[inline(always)]
        pub fn $clear_fn(&self, bits: u32) {
            // SAFETY: base + offset addresses a register of this I2S block
            unsafe { $crate::internal::register::clear_bits(self.base + $offset, bits) }
        }

        #[doc = concat!("Assert then deassert bits in ", $what)]
        #[inline(always)]
        pub fn $pulse_fn(&self, bits: u32) {
            self.$set_fn(bits);
            self.$clear_fn(bits);
        }
    };
}

// Export macros for use in submodules
pub(crate) use reg_bit_ops;
pub(crate) use reg_rw;
