//! Growable GPU buffers.
//!
//! A packed scene group is uploaded whole every time it changes, so the
//! buffers only need to grow: they double when a pack outgrows them and
//! never shrink.

/// Smallest buffer ever allocated, in bytes.
const MIN_CAPACITY: usize = 64;

/// Capacity to reallocate to when `needed` bytes no longer fit in
/// `capacity`, or `None` when they still fit.
///
/// Grows to twice the request, and by at least 1 KiB.
pub(crate) fn grown_capacity(needed: usize, capacity: usize) -> Option<usize> {
    (needed > capacity).then(|| (needed * 2).max(capacity + 1024))
}

/// A GPU buffer that grows when written past its capacity.
pub struct DynamicBuffer {
    buffer: wgpu::Buffer,
    capacity: usize, // bytes
    len: usize,      // bytes
    usage: wgpu::BufferUsages,
    label: String,
}

impl DynamicBuffer {
    /// Empty buffer with the given initial byte capacity.
    #[must_use]
    pub fn new(
        device: &wgpu::Device,
        label: &str,
        initial_capacity: usize,
        usage: wgpu::BufferUsages,
    ) -> Self {
        let capacity = initial_capacity.max(MIN_CAPACITY);
        Self {
            buffer: allocate(device, label, capacity, usage),
            capacity,
            len: 0,
            usage,
            label: label.to_owned(),
        }
    }

    /// Write typed data, growing if necessary.
    ///
    /// Returns `true` if the buffer was reallocated.
    pub fn write<T: bytemuck::Pod>(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        data: &[T],
    ) -> bool {
        self.write_bytes(device, queue, bytemuck::cast_slice(data))
    }

    /// Write raw bytes, growing if necessary.
    ///
    /// Returns `true` if the buffer was reallocated.
    pub fn write_bytes(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        data: &[u8],
    ) -> bool {
        let needed = data.len();
        let reallocated = match grown_capacity(needed, self.capacity) {
            Some(capacity) => {
                log::debug!(
                    "growing {} from {} to {capacity} bytes",
                    self.label,
                    self.capacity
                );
                self.buffer =
                    allocate(device, &self.label, capacity, self.usage);
                self.capacity = capacity;
                true
            }
            None => false,
        };

        if needed > 0 {
            queue.write_buffer(&self.buffer, 0, data);
        }
        self.len = needed;
        reallocated
    }

    /// The underlying wgpu buffer.
    #[must_use]
    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    /// Bytes written by the last write.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the last write was empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Allocated size in bytes.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

fn allocate(
    device: &wgpu::Device,
    label: &str,
    capacity: usize,
    usage: wgpu::BufferUsages,
) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: capacity as u64,
        usage: usage | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fits_without_growing() {
        assert_eq!(grown_capacity(0, 64), None);
        assert_eq!(grown_capacity(64, 64), None);
    }

    #[test]
    fn grows_to_double_the_request() {
        assert_eq!(grown_capacity(4096, 1024), Some(8192));
    }

    #[test]
    fn grows_by_at_least_a_kilobyte() {
        assert_eq!(grown_capacity(65, 64), Some(64 + 1024));
    }
}
