//! Descriptor chain construction.
//!
//! A frame may be split across non-contiguous memory segments, and each
//! segment may exceed the per-descriptor payload limit. Building a chain is
//! therefore two passes over the same chunking: a counting pass (so the
//! caller can size descriptor storage) and a fill pass that populates the
//! descriptors and closes the ring. Both passes go through
//! [`chunks_for`], which keeps them consistent by construction.

use super::DmaDescriptor;
use crate::driver::config::BufferSegment;
use crate::driver::error::DmaError;
use crate::internal::constants::DMA_MAX_CHUNK;

/// Number of descriptors one segment of `len` bytes occupies.
#[inline]
const fn chunks_for(len: usize) -> usize {
    len.div_ceil(DMA_MAX_CHUNK)
}

/// Number of descriptors required to cover `segments`.
///
/// Use this to size the storage passed to [`build_ring`]. Zero-length
/// segments contribute nothing.
#[must_use]
pub fn descriptors_needed(segments: &[BufferSegment]) -> usize {
    segments.iter().map(|seg| chunks_for(seg.len())).sum()
}

/// Populate `descriptors` with a circular chain covering `segments`.
///
/// Each descriptor receives one chunk of at most [`DMA_MAX_CHUNK`] bytes,
/// marked hardware-owned with frame flags clear, and is linked to its
/// successor; the final descriptor links back to the first, forming the
/// ring the out-link engine re-reads indefinitely.
///
/// Returns the number of descriptors filled, which always equals
/// [`descriptors_needed`] for the same segments.
///
/// # Errors
///
/// - [`DmaError::EmptyChain`] if the segments cover zero bytes; a ring of
///   zero descriptors has no terminal link to close.
/// - [`DmaError::StorageTooSmall`] if `descriptors` cannot hold the chain.
pub fn build_ring(
    descriptors: &mut [DmaDescriptor],
    segments: &[BufferSegment],
) -> Result<usize, DmaError> {
    let needed = descriptors_needed(segments);
    if needed == 0 {
        return Err(DmaError::EmptyChain);
    }
    if descriptors.len() < needed {
        return Err(DmaError::StorageTooSmall);
    }

    let mut n = 0;
    for seg in segments {
        let mut remaining = seg.len();
        let mut data = seg.as_ptr();
        while remaining > 0 {
            let chunk = remaining.min(DMA_MAX_CHUNK);
            descriptors[n].set_chunk(data, chunk);
            remaining -= chunk;
            // SAFETY: data + chunk stays within the segment the caller handed us
            data = unsafe { data.add(chunk) };
            n += 1;
        }
    }
    debug_assert_eq!(n, needed);

    // Link each descriptor to its successor; the last wraps to the first
    for i in 0..n {
        let next: *const DmaDescriptor = &descriptors[(i + 1) % n];
        descriptors[i].set_next(next);
    }

    #[cfg(feature = "defmt")]
    defmt::debug!("descriptor ring built: {} descriptors", n);

    Ok(n)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    fn storage(n: usize) -> std::vec::Vec<DmaDescriptor> {
        core::iter::repeat_with(DmaDescriptor::new).take(n).collect()
    }

    #[test]
    fn exact_chunk_boundary_needs_one_descriptor() {
        let buf = [0u8; DMA_MAX_CHUNK];
        let segs = [BufferSegment::from_raw(buf.as_ptr(), buf.len())];
        assert_eq!(descriptors_needed(&segs), 1);
    }

    #[test]
    fn one_byte_over_boundary_needs_two() {
        let buf = [0u8; DMA_MAX_CHUNK + 1];
        let segs = [BufferSegment::from_raw(buf.as_ptr(), buf.len())];
        assert_eq!(descriptors_needed(&segs), 2);

        let mut descs = storage(2);
        let n = build_ring(&mut descs, &segs).unwrap();
        assert_eq!(n, 2);
        assert_eq!(descs[0].length(), DMA_MAX_CHUNK);
        assert_eq!(descs[1].length(), 1);
    }

    #[test]
    fn multi_segment_count() {
        // ceil(5000/4092) + ceil(3000/4092) = 2 + 1
        let a = [0u8; 5000];
        let b = [0u8; 3000];
        let segs = [
            BufferSegment::from_raw(a.as_ptr(), a.len()),
            BufferSegment::from_raw(b.as_ptr(), b.len()),
        ];
        assert_eq!(descriptors_needed(&segs), 3);
    }

    #[test]
    fn fill_count_matches_counting_pass() {
        let a = [0u8; 5000];
        let b = [0u8; 3000];
        let segs = [
            BufferSegment::from_raw(a.as_ptr(), a.len()),
            BufferSegment::from_raw(b.as_ptr(), b.len()),
        ];
        let needed = descriptors_needed(&segs);
        let mut descs = storage(needed);
        assert_eq!(build_ring(&mut descs, &segs).unwrap(), needed);
    }

    #[test]
    fn chunk_lengths_bounded_and_sum_to_segment_size() {
        let a = [0u8; 10_000];
        let segs = [BufferSegment::from_raw(a.as_ptr(), a.len())];
        let needed = descriptors_needed(&segs);
        let mut descs = storage(needed);
        let n = build_ring(&mut descs, &segs).unwrap();

        let mut total = 0;
        for d in &descs[..n] {
            assert!(d.length() <= DMA_MAX_CHUNK);
            assert!(d.length() > 0);
            total += d.length();
        }
        assert_eq!(total, a.len());
    }

    #[test]
    fn chunks_are_contiguous_within_a_segment() {
        let a = [0u8; 9000];
        let segs = [BufferSegment::from_raw(a.as_ptr(), a.len())];
        let mut descs = storage(3);
        let n = build_ring(&mut descs, &segs).unwrap();
        assert_eq!(n, 3);

        let base = a.as_ptr() as u32;
        assert_eq!(descs[0].buffer_addr(), base);
        assert_eq!(descs[1].buffer_addr(), base + DMA_MAX_CHUNK as u32);
        assert_eq!(descs[2].buffer_addr(), base + 2 * DMA_MAX_CHUNK as u32);
    }

    #[test]
    fn ring_is_closed() {
        let a = [0u8; 5000];
        let b = [0u8; 3000];
        let segs = [
            BufferSegment::from_raw(a.as_ptr(), a.len()),
            BufferSegment::from_raw(b.as_ptr(), b.len()),
        ];
        let mut descs = storage(3);
        let n = build_ring(&mut descs, &segs).unwrap();

        for i in 0..n - 1 {
            assert_eq!(
                descs[i].next_addr(),
                core::ptr::from_ref(&descs[i + 1]) as u32
            );
        }
        assert_eq!(
            descs[n - 1].next_addr(),
            core::ptr::from_ref(&descs[0]) as u32
        );
    }

    #[test]
    fn single_descriptor_ring_links_to_itself() {
        let a = [0u8; 16];
        let segs = [BufferSegment::from_raw(a.as_ptr(), a.len())];
        let mut descs = storage(1);
        build_ring(&mut descs, &segs).unwrap();
        assert_eq!(descs[0].next_addr(), core::ptr::from_ref(&descs[0]) as u32);
    }

    #[test]
    fn all_descriptors_hardware_owned() {
        let a = [0u8; 8200];
        let segs = [BufferSegment::from_raw(a.as_ptr(), a.len())];
        let mut descs = storage(3);
        let n = build_ring(&mut descs, &segs).unwrap();
        assert!(descs[..n].iter().all(DmaDescriptor::is_hw_owned));
    }

    #[test]
    fn zero_length_segments_are_skipped() {
        let a = [0u8; 100];
        let segs = [
            BufferSegment::from_raw(a.as_ptr(), 0),
            BufferSegment::from_raw(a.as_ptr(), a.len()),
            BufferSegment::from_raw(a.as_ptr(), 0),
        ];
        assert_eq!(descriptors_needed(&segs), 1);
        let mut descs = storage(1);
        assert_eq!(build_ring(&mut descs, &segs).unwrap(), 1);
        assert_eq!(descs[0].length(), 100);
    }

    #[test]
    fn empty_segment_list_is_rejected() {
        let mut descs = storage(4);
        assert_eq!(build_ring(&mut descs, &[]), Err(DmaError::EmptyChain));
    }

    #[test]
    fn all_zero_length_segments_are_rejected() {
        let a = [0u8; 4];
        let segs = [BufferSegment::from_raw(a.as_ptr(), 0)];
        let mut descs = storage(4);
        assert_eq!(build_ring(&mut descs, &segs), Err(DmaError::EmptyChain));
    }

    #[test]
    fn undersized_storage_is_rejected() {
        let a = [0u8; 9000];
        let segs = [BufferSegment::from_raw(a.as_ptr(), a.len())];
        let mut descs = storage(2);
        assert_eq!(
            build_ring(&mut descs, &segs),
            Err(DmaError::StorageTooSmall)
        );
    }
}
