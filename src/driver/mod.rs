//! Driver layer: configuration, errors, and the parallel output core
//!
//! The usual flow is to build a [`ParallelConfig`], call [`setup`] once
//! per unit with the frame buffers and descriptor storage, and then
//! drive frames with [`flip_to_buffer`].

pub mod config;
pub mod error;
pub mod parallel;

pub use config::{BitWidth, BufferId, BufferSegment, MAX_DATA_PINS, ParallelConfig, Unit};
pub use error::{ConfigError, DmaError, Error, Result};
pub use parallel::{flip_to_buffer, is_configured, setup};
