//! Hardware abstraction layer
//!
//! Thin wrappers over the raw register blocks, grouped by concern: clock
//! divider programming, unit/DMA/FIFO reset sequencing, and GPIO matrix
//! signal routing. The driver module composes these into the full setup
//! sequence.

pub mod clock;
pub mod gpio;
pub mod reset;
