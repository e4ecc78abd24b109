//! DMA Descriptor definitions
//!
//! The I2S out-link engine consumes a singly-linked list of fixed-layout
//! descriptors, each pointing at one chunk of outgoing data. For continuous
//! output the list is closed into a ring: the engine re-reads it forever,
//! and the CPU only ever touches the terminal `next` link to swap buffers.

pub mod chain;

pub use chain::{build_ring, descriptors_needed};

/// Common descriptor ownership bit (bit 31 of the control word)
pub const DESC_OWN: u32 = 1 << 31;

/// Descriptor alignment required by the DMA engine (word aligned)
pub const DESC_ALIGNMENT: usize = 4;

/// Volatile cell wrapper for descriptor fields
///
/// Ensures all accesses are volatile to prevent compiler optimization
/// from reordering or caching descriptor field accesses.
#[repr(transparent)]
pub struct VolatileCell<T: Copy> {
    value: core::cell::UnsafeCell<T>,
}

// Safety: VolatileCell is safe to share between threads because all access
// is through volatile operations which are atomic for u32 on ESP32.
unsafe impl<T: Copy> Sync for VolatileCell<T> {}

impl<T: Copy> VolatileCell<T> {
    /// Create a new volatile cell with the given initial value
    #[inline(always)]
    pub const fn new(value: T) -> Self {
        Self {
            value: core::cell::UnsafeCell::new(value),
        }
    }

    /// Read the value (volatile read)
    #[inline(always)]
    pub fn get(&self) -> T {
        unsafe { core::ptr::read_volatile(self.value.get()) }
    }

    /// Write a value (volatile write)
    #[inline(always)]
    pub fn set(&self, value: T) {
        unsafe { core::ptr::write_volatile(self.value.get(), value) }
    }

    /// Update the value using a function (read-modify-write)
    #[inline(always)]
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(T) -> T,
    {
        let old = self.get();
        self.set(f(old));
    }
}

impl<T: Copy + Default> Default for VolatileCell<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

// =============================================================================
// Control Word Bit Fields
// =============================================================================

/// Buffer capacity in bytes (bits 11:0)
pub const CTRL_SIZE_MASK: u32 = 0xFFF;
/// Buffer capacity shift
pub const CTRL_SIZE_SHIFT: u32 = 0;
/// Valid byte count mask (bits 23:12)
pub const CTRL_LENGTH_MASK: u32 = 0xFFF << 12;
/// Valid byte count shift
pub const CTRL_LENGTH_SHIFT: u32 = 12;
/// Buffer start offset mask (bits 28:24, unused for TX)
pub const CTRL_OFFSET_MASK: u32 = 0x1F << 24;
/// Start-of-frame flag
pub const CTRL_SOSF: u32 = 1 << 29;
/// End-of-frame flag - engine raises an EOF event after this descriptor
pub const CTRL_EOF: u32 = 1 << 30;
/// OWN - when set, descriptor is owned by the DMA engine; when clear, by the CPU
pub const CTRL_OWNER: u32 = 1 << 31;

// =============================================================================
// DmaDescriptor Structure
// =============================================================================

/// I2S out-link DMA descriptor (`lldesc` layout).
///
/// Must be word aligned and reside in DMA-capable internal RAM. All fields
/// are accessed through volatile operations because the engine reads the
/// descriptor concurrently with the CPU.
#[repr(C, align(4))]
pub struct DmaDescriptor {
    /// Control word: size, length, offset, sosf, eof, owner
    ctrl: VolatileCell<u32>,
    /// Address of the data buffer this descriptor covers
    buffer: VolatileCell<u32>,
    /// Address of the next descriptor in the chain
    next: VolatileCell<u32>,
}

impl DmaDescriptor {
    /// Size of the descriptor in bytes
    pub const SIZE: usize = 12;

    /// Create a new zeroed descriptor
    ///
    /// All fields are cleared. Call [`set_chunk`](Self::set_chunk) and
    /// [`set_next`](Self::set_next) before handing the chain to hardware.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            ctrl: VolatileCell::new(0),
            buffer: VolatileCell::new(0),
            next: VolatileCell::new(0),
        }
    }

    /// Point the descriptor at one chunk of outgoing data.
    ///
    /// Sets size and length to `len`, clears the frame-boundary flags and
    /// the offset, and marks the descriptor hardware-owned. `len` must not
    /// exceed the 12-bit field (the chain builder enforces the chunk limit).
    pub fn set_chunk(&self, data: *const u8, len: usize) {
        let len = len as u32;
        self.ctrl.set(
            ((len << CTRL_SIZE_SHIFT) & CTRL_SIZE_MASK)
                | ((len << CTRL_LENGTH_SHIFT) & CTRL_LENGTH_MASK)
                | CTRL_OWNER,
        );
        self.buffer.set(data as u32);
    }

    /// Link this descriptor to its successor
    #[inline(always)]
    pub fn set_next(&self, next: *const DmaDescriptor) {
        self.next.set(next as u32);
    }

    /// Address of the next descriptor in the chain
    #[inline(always)]
    #[must_use]
    pub fn next_addr(&self) -> u32 {
        self.next.get()
    }

    /// Address of the data buffer
    #[inline(always)]
    #[must_use]
    pub fn buffer_addr(&self) -> u32 {
        self.buffer.get()
    }

    /// Valid byte count
    #[inline(always)]
    #[must_use]
    pub fn length(&self) -> usize {
        ((self.ctrl.get() & CTRL_LENGTH_MASK) >> CTRL_LENGTH_SHIFT) as usize
    }

    /// Buffer capacity in bytes
    #[inline(always)]
    #[must_use]
    pub fn size(&self) -> usize {
        ((self.ctrl.get() & CTRL_SIZE_MASK) >> CTRL_SIZE_SHIFT) as usize
    }

    /// Check if the descriptor is owned by the DMA engine
    #[inline(always)]
    #[must_use]
    pub fn is_hw_owned(&self) -> bool {
        (self.ctrl.get() & CTRL_OWNER) != 0
    }

    /// Get the raw control word (for debugging)
    #[inline(always)]
    #[must_use]
    pub fn raw_ctrl(&self) -> u32 {
        self.ctrl.get()
    }
}

impl Default for DmaDescriptor {
    fn default() -> Self {
        Self::new()
    }
}

// Safety: DmaDescriptor uses volatile cells for all DMA-accessed fields
unsafe impl Sync for DmaDescriptor {}
unsafe impl Send for DmaDescriptor {}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::internal::constants::DMA_MAX_CHUNK;

    #[test]
    fn descriptor_size() {
        // The out-link engine fetches exactly three words per descriptor
        assert_eq!(core::mem::size_of::<DmaDescriptor>(), 12);
        assert_eq!(DmaDescriptor::SIZE, core::mem::size_of::<DmaDescriptor>());
    }

    #[test]
    fn descriptor_alignment() {
        assert_eq!(core::mem::align_of::<DmaDescriptor>(), DESC_ALIGNMENT);
    }

    #[test]
    fn max_chunk_fits_length_field() {
        // 4092 must be representable in the 12-bit size and length fields
        assert!((DMA_MAX_CHUNK as u32) <= CTRL_SIZE_MASK >> CTRL_SIZE_SHIFT);
        assert!((DMA_MAX_CHUNK as u32) <= CTRL_LENGTH_MASK >> CTRL_LENGTH_SHIFT);
    }

    #[test]
    fn new_descriptor_is_cpu_owned() {
        let desc = DmaDescriptor::new();
        assert!(!desc.is_hw_owned());
        assert_eq!(desc.next_addr(), 0);
        assert_eq!(desc.buffer_addr(), 0);
    }

    #[test]
    fn set_chunk_populates_fields() {
        let data = [0u8; 64];
        let desc = DmaDescriptor::new();
        desc.set_chunk(data.as_ptr(), data.len());

        assert_eq!(desc.size(), 64);
        assert_eq!(desc.length(), 64);
        assert_eq!(desc.buffer_addr(), data.as_ptr() as u32);
        assert!(desc.is_hw_owned());
        // Frame-boundary flags stay clear; the ring never signals EOF
        assert_eq!(desc.raw_ctrl() & (CTRL_SOSF | CTRL_EOF), 0);
        assert_eq!(desc.raw_ctrl() & CTRL_OFFSET_MASK, 0);
    }

    #[test]
    fn owner_bit_position() {
        let data = [0u8; 4];
        let desc = DmaDescriptor::new();
        desc.set_chunk(data.as_ptr(), data.len());
        assert_eq!(desc.raw_ctrl() & DESC_OWN, DESC_OWN);
    }

    #[test]
    fn length_field_does_not_leak_into_flags() {
        let data = [0u8; DMA_MAX_CHUNK];
        let desc = DmaDescriptor::new();
        desc.set_chunk(data.as_ptr(), DMA_MAX_CHUNK);
        assert_eq!(desc.length(), DMA_MAX_CHUNK);
        assert_eq!(desc.size(), DMA_MAX_CHUNK);
        assert_eq!(
            desc.raw_ctrl() & (CTRL_OFFSET_MASK | CTRL_SOSF | CTRL_EOF),
            0
        );
    }

    #[test]
    fn set_next_round_trips() {
        let a = DmaDescriptor::new();
        let b = DmaDescriptor::new();
        a.set_next(&b);
        assert_eq!(a.next_addr(), core::ptr::from_ref(&b) as u32);
    }
}
