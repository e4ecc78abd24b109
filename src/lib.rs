//! ESP32 I2S Parallel Output Driver
//!
//! A `no_std`, `no_alloc` Rust driver for the ESP32 I2S peripherals in
//! LCD mode, streaming a parallel bit pattern to GPIO pins with DMA.
//!
//! The peripheral's out-link engine walks a circular chain of DMA
//! descriptors forever, clocking each sample onto up to 32 data lines
//! with a word select pin as the bus clock. The driver keeps two frame
//! buffers per unit and switches between them by retargeting the chains'
//! terminal links, so a new frame takes over at the wrap point without
//! ever stopping the output. This is the building block for LED matrix
//! refresh, parallel DACs, and similar continuously-clocked buses.
//!
//! # Architecture
//!
//! The driver is organized into three layers:
//!
//! 1. **Driver Layer** ([`driver`]): configuration, [`setup`] and
//!    [`flip_to_buffer`], and the per-unit state registry
//! 2. **Descriptor Layer** ([`descriptor`]): DMA descriptor layout and
//!    circular chain construction
//! 3. **HAL Layer** ([`hal`]): clock dividers, reset sequencing, GPIO
//!    matrix routing
//!
//! # Features
//!
//! - `esp32` (default): Target the original ESP32
//! - `defmt`: Enable defmt logging and formatting for driver types
//!
//! # Example
//!
//! ```ignore
//! use esp32_i2s_parallel::{
//!     BitWidth, BufferId, BufferSegment, DmaDescriptor, ParallelConfig, Unit,
//! };
//!
//! // Frame buffers and descriptor storage in DMA-capable RAM
//! esp32_i2s_parallel::descriptor_ring_static!(RING_A, 2);
//! esp32_i2s_parallel::descriptor_ring_static!(RING_B, 2);
//! static FRAME_A: [u8; 4096] = [0; 4096];
//! static FRAME_B: [u8; 4096] = [0; 4096];
//!
//! let config = ParallelConfig::new()
//!     .with_sample_rate_hz(1_000_000)
//!     .with_bit_width(BitWidth::Bits8)
//!     .with_clock_pin(22)
//!     .with_data_pins(&[Some(2), Some(4), Some(5), Some(12)]);
//!
//! esp32_i2s_parallel::setup(
//!     Unit::I2s1,
//!     &config,
//!     [
//!         &[BufferSegment::from_slice(&FRAME_A)],
//!         &[BufferSegment::from_slice(&FRAME_B)],
//!     ],
//!     [
//!         RING_A.init([const { DmaDescriptor::new() }; 2]).as_mut_slice(),
//!         RING_B.init([const { DmaDescriptor::new() }; 2]).as_mut_slice(),
//!     ],
//! )
//! .unwrap();
//!
//! // Draw into the back buffer, then show it at the next wrap
//! esp32_i2s_parallel::flip_to_buffer(Unit::I2s1, BufferId::B);
//! ```
//!
//! # Memory Requirements
//!
//! Each DMA descriptor is 12 bytes and covers up to 4092 bytes of frame
//! data; [`descriptors_needed`] sizes the storage for a segment list.
//! Frame buffers and descriptors must live in internal, DMA-capable RAM.

#![no_std]
#![deny(missing_docs)]
#![allow(unsafe_code)]
#![deny(unsafe_op_in_unsafe_fn)]
// Clippy lint levels live here; Cargo.toml carries the same set for tooling.
#![deny(clippy::correctness)]
#![warn(
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::cloned_instead_of_copied,
    clippy::explicit_iter_loop,
    clippy::implicit_clone,
    clippy::inconsistent_struct_constructor,
    clippy::manual_assert,
    clippy::manual_let_else,
    clippy::match_same_arms,
    clippy::needless_pass_by_value,
    clippy::semicolon_if_nothing_returned,
    clippy::uninlined_format_args,
    clippy::unnested_or_patterns,
    clippy::std_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::alloc_instead_of_core
)]
#![allow(
    clippy::mod_module_files,
    clippy::self_named_module_files,
    clippy::similar_names,
    clippy::too_many_arguments,
    clippy::type_complexity,
    clippy::must_use_candidate,
    clippy::assertions_on_constants,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::cast_lossless,
    clippy::module_name_repetitions,
    clippy::wildcard_imports
)]

#[cfg(not(feature = "esp32"))]
compile_error!("Feature 'esp32' must be enabled. It is the default.");

// =============================================================================
// Modules
// =============================================================================

pub mod descriptor;
pub mod driver;
pub mod hal;

// Internal implementation details (pub(crate) only)
mod internal;

// =============================================================================
// Re-exports
// =============================================================================

pub use descriptor::{DESC_ALIGNMENT, DmaDescriptor, build_ring, descriptors_needed};
pub use driver::config::{
    BitWidth, BufferId, BufferSegment, MAX_DATA_PINS, ParallelConfig, Unit,
};
pub use driver::error::{
    ConfigError, ConfigResult, DmaError, DmaResult, Error, Result,
};
pub use driver::parallel::{flip_to_buffer, is_configured, setup};

/// Low-level register accessors for advanced use.
///
/// These are intentionally separated from the primary facade. Most users
/// should prefer the safe driver APIs instead of touching registers
/// directly.
///
/// # Safety
///
/// Direct register access bypasses driver invariants. Use only if you
/// fully understand the ESP32 I2S hardware and accept responsibility for
/// correct sequencing and synchronization.
pub mod unsafe_registers {
    pub use crate::internal::register::gpio::GpioMatrix;
    pub use crate::internal::register::i2s::I2sRegs;
}

/// Shared driver constants.
///
/// These are grouped into a dedicated module to keep the top-level facade
/// focused on driver types.
pub mod constants {
    pub use crate::internal::constants::{
        BCK_DIVIDER, CLKM_DIV_FRACTION, DMA_MAX_CHUNK, FIFO_THRESHOLD_WORDS, I2S_BASE_CLOCK_HZ,
        MAX_SAMPLE_CLOCK_DIVIDER,
    };
}

// =============================================================================
// Macro Helpers
// =============================================================================

/// Declare static descriptor storage in DMA-capable memory.
///
/// This macro expands to a `StaticCell` holding a descriptor array, placed
/// in the `.dram1` section on ESP32 so the out-link engine can reach it.
/// It requires a `static_cell` dependency in your application crate.
///
/// # Examples
///
/// ```ignore
/// use esp32_i2s_parallel::DmaDescriptor;
///
/// esp32_i2s_parallel::descriptor_ring_static!(RING_A, 16);
///
/// let storage = RING_A.init([const { DmaDescriptor::new() }; 16]);
/// ```
#[macro_export]
macro_rules! descriptor_ring_static {
    ($name:ident, $count:expr) => {
        #[cfg_attr(target_arch = "xtensa", unsafe(link_section = ".dram1"))]
        static $name: static_cell::StaticCell<[$crate::DmaDescriptor; $count]> =
            static_cell::StaticCell::new();
    };
}
