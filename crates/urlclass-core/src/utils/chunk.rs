use std::slice::Chunks;

/// Split `items` into contiguous chunks of `chunk_size`, the last one
/// possibly shorter. The iterator is lazy and can be cloned to restart.
/// A chunk size of zero is treated as one.
pub fn split<T>(items: &[T], chunk_size: usize) -> Chunks<'_, T> {
    items.chunks(chunk_size.max(1))
}
