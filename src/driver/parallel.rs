//! Parallel output driver core
//!
//! Ties the pieces together: validates a configuration, builds one
//! descriptor ring per frame buffer, programs the unit into LCD mode and
//! starts the out-link engine on the front buffer. Once started the
//! engine free-runs; the only ongoing control is [`flip_to_buffer`],
//! which retargets the rings so the next pass streams the other buffer.
//!
//! Per-unit state lives in a registry guarded by a critical section, so
//! a flip from an interrupt handler sees a consistent ring pair.

use core::cell::RefCell;

use critical_section::Mutex;

use crate::descriptor::{DmaDescriptor, build_ring, descriptors_needed};
use crate::driver::config::{BufferId, BufferSegment, ParallelConfig, Unit};
use crate::driver::error::{ConfigError, Result};
use crate::hal::{clock, gpio, reset};
use crate::internal::constants::FIFO_THRESHOLD_WORDS;
use crate::internal::register::dport;
use crate::internal::register::i2s::{
    CHAN_MOD_MONO, CONF_CHAN_RX_SHIFT, CONF_CHAN_TX_SHIFT, CONF_RX_RIGHT_FIRST, CONF_TX_RIGHT_FIRST,
    CONF_TX_START, CONF1_TX_PCM_BYPASS, CONF2_LCD_EN, FIFO_DSCR_EN, FIFO_RX_DATA_NUM_SHIFT,
    FIFO_RX_FIFO_MOD_FORCE_EN, FIFO_TX_DATA_NUM_SHIFT, FIFO_TX_FIFO_MOD_FORCE_EN,
    FIFO_TX_FIFO_MOD_SHIFT, I2S0_BASE, I2S1_BASE, I2sRegs, LC_CONF_OUT_DATA_BURST_EN,
    LC_CONF_OUTDSCR_BURST_EN, OUTLINK_ADDR_MASK, OUTLINK_START,
};

// =============================================================================
// Per-Unit State
// =============================================================================

/// One closed descriptor ring, viewed by index
///
/// Descriptor addresses are only materialized at the register boundary
/// (out-link programming) and when retargeting terminal links.
#[derive(Clone, Copy)]
struct Ring {
    descriptors: &'static [DmaDescriptor],
}

impl Ring {
    fn head(&self) -> &'static DmaDescriptor {
        &self.descriptors[0]
    }

    fn tail(&self) -> &'static DmaDescriptor {
        &self.descriptors[self.descriptors.len() - 1]
    }

    fn head_addr(&self) -> u32 {
        core::ptr::from_ref(self.head()) as u32
    }
}

/// Everything a configured unit needs for flipping
#[derive(Clone, Copy)]
struct PeripheralState {
    /// Rings for buffers A and B, in [`BufferId`] index order
    rings: [Ring; 2],
}

impl PeripheralState {
    /// Point both terminal links at the head of the target ring
    ///
    /// The engine picks the new target up the next time it walks a
    /// terminal link. The two writes are not atomic with respect to the
    /// engine, so a flip landing exactly on a buffer wrap can let one
    /// more pass of the old buffer through.
    fn retarget(&self, target: BufferId) {
        let head: *const DmaDescriptor = self.rings[target.index()].head();
        self.rings[BufferId::A.index()].tail().set_next(head);
        self.rings[BufferId::B.index()].tail().set_next(head);
    }
}

/// Configured state per unit, slot index per [`Unit::index`]
///
/// Re-running setup on a unit replaces its slot; the caller keeps
/// ownership of descriptor storage and frame memory, so replacement
/// leaks nothing.
static REGISTRY: Mutex<RefCell<[Option<PeripheralState>; 2]>> =
    Mutex::new(RefCell::new([None, None]));

fn install(unit: Unit, state: PeripheralState) {
    critical_section::with(|cs| {
        REGISTRY.borrow_ref_mut(cs)[unit.index()] = Some(state);
    });
}

// =============================================================================
// Unit Plumbing
// =============================================================================

const fn regs_for(unit: Unit) -> I2sRegs {
    I2sRegs::new(match unit {
        Unit::I2s0 => I2S0_BASE,
        Unit::I2s1 => I2S1_BASE,
    })
}

const fn clock_gate_bit(unit: Unit) -> u32 {
    match unit {
        Unit::I2s0 => dport::DPORT_I2S0_BIT,
        Unit::I2s1 => dport::DPORT_I2S1_BIT,
    }
}

fn build_frame_ring(
    segments: &[BufferSegment],
    storage: &'static mut [DmaDescriptor],
) -> Result<Ring> {
    if descriptors_needed(segments) == 0 {
        return Err(ConfigError::EmptyBuffer.into());
    }
    let used = build_ring(storage, segments)?;
    Ok(Ring {
        descriptors: &storage[..used],
    })
}

// =============================================================================
// Driver Operations
// =============================================================================

/// Configure `unit` for parallel output and start streaming buffer A
///
/// `frames` describes the two frame buffers as segment lists; `storage`
/// provides descriptor space for each, sized by
/// [`descriptors_needed`]. Both must stay put for as long as the unit
/// runs, which the `'static` bound enforces.
///
/// All validation and ring construction happens before the first
/// register write, so an error leaves the hardware untouched. The
/// register sequence then runs: pin routing, clock gate, reset, LCD
/// mode, clocks, FIFO and channel setup, a second reset so the new mode
/// starts clean, and finally out-link start on buffer A's ring.
///
/// Setting up a unit that is already running reprograms it from scratch
/// and replaces its registry slot.
///
/// # Errors
///
/// - [`Error::Config`] for an invalid configuration or a frame buffer
///   covering zero bytes
/// - [`Error::Dma`] if a storage slice cannot hold its ring
///
/// [`Error::Config`]: crate::driver::error::Error::Config
/// [`Error::Dma`]: crate::driver::error::Error::Dma
pub fn setup(
    unit: Unit,
    config: &ParallelConfig,
    frames: [&[BufferSegment]; 2],
    storage: [&'static mut [DmaDescriptor]; 2],
) -> Result<()> {
    config.validate()?;

    let [front_segments, back_segments] = frames;
    let [front_storage, back_storage] = storage;
    let front = build_frame_ring(front_segments, front_storage)?;
    let back = build_frame_ring(back_segments, back_storage)?;
    let state = PeripheralState {
        rings: [front, back],
    };

    gpio::route(unit, config);
    dport::enable_module(clock_gate_bit(unit));

    let regs = regs_for(unit);
    reset::full_reset(&regs);

    regs.set_conf2(CONF2_LCD_EN);
    clock::program(&regs, config.sample_rate_hz, config.bit_width);
    regs.set_fifo_conf(
        FIFO_DSCR_EN
            | FIFO_TX_FIFO_MOD_FORCE_EN
            | FIFO_RX_FIFO_MOD_FORCE_EN
            | (FIFO_THRESHOLD_WORDS << FIFO_TX_DATA_NUM_SHIFT)
            | (FIFO_THRESHOLD_WORDS << FIFO_RX_DATA_NUM_SHIFT)
            | (1 << FIFO_TX_FIFO_MOD_SHIFT),
    );
    regs.set_conf1(CONF1_TX_PCM_BYPASS);
    regs.set_conf_chan(
        (CHAN_MOD_MONO << CONF_CHAN_TX_SHIFT) | (CHAN_MOD_MONO << CONF_CHAN_RX_SHIFT),
    );
    regs.set_conf(CONF_TX_RIGHT_FIRST | CONF_RX_RIGHT_FIRST);
    regs.set_timing(0);

    // The mode registers above disturb FIFO state; reset again so the
    // engine starts from a clean slate
    reset::pre_start_reset(&regs);

    install(unit, state);

    regs.set_lc_conf(LC_CONF_OUT_DATA_BURST_EN | LC_CONF_OUTDSCR_BURST_EN);
    regs.set_out_link(state.rings[BufferId::A.index()].head_addr() & OUTLINK_ADDR_MASK);
    regs.set_out_link_bits(OUTLINK_START);
    regs.set_conf_bits(CONF_TX_START);

    #[cfg(feature = "defmt")]
    defmt::info!(
        "i2s{} parallel output started: {} Hz, {} bit bus",
        unit.index(),
        config.sample_rate_hz,
        config.bit_width.bits()
    );

    Ok(())
}

/// Switch `unit`'s output to the given buffer
///
/// Takes effect at the next buffer wrap, without stopping the engine, so
/// the switch is glitch-free on the bus. Safe to call from interrupt
/// context. A unit that has never been set up is left alone.
pub fn flip_to_buffer(unit: Unit, target: BufferId) {
    critical_section::with(|cs| match REGISTRY.borrow_ref(cs)[unit.index()] {
        Some(state) => state.retarget(target),
        None => {
            #[cfg(feature = "defmt")]
            defmt::warn!("flip requested on unconfigured i2s{}", unit.index());
        }
    });
}

/// Whether `unit` has been set up for parallel output
#[must_use]
pub fn is_configured(unit: Unit) -> bool {
    critical_section::with(|cs| REGISTRY.borrow_ref(cs)[unit.index()].is_some())
}

// =============================================================================
// Unit Tests
// =============================================================================
