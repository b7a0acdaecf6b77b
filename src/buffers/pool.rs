use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Recycled sample storage for input blocks.
///
/// Every buffer handed out by [`BufferPool::get`] goes back to the pool when
/// its [`PooledBuffer`] is dropped, so a block is released on every exit path
/// of the cycle that acquired it.
pub struct BufferPool {
    buffers: Arc<Mutex<Vec<Vec<f32>>>>,
    outstanding: Arc<AtomicUsize>,
    capacity: usize,
}

impl BufferPool {
    pub fn new(capacity: usize) -> Self {
        Self {
            buffers: Arc::new(Mutex::new(Vec::new())),
            outstanding: Arc::new(AtomicUsize::new(0)),
            capacity,
        }
    }

    pub fn get(&self) -> PooledBuffer {
        let mut buffers = self.buffers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let buffer = buffers.pop().unwrap_or_else(|| {
            Vec::with_capacity(self.capacity)
        });
        self.outstanding.fetch_add(1, Ordering::AcqRel);

        PooledBuffer {
            buffer: Some(buffer),
            pool: self.buffers.clone(),
            outstanding: self.outstanding.clone(),
        }
    }

    /// Buffers sitting idle in the pool
    pub fn pool_size(&self) -> usize {
        self.buffers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    /// Buffers handed out and not yet released
    pub fn outstanding(&self) -> usize {
        self.outstanding.load(Ordering::Acquire)
    }
}

impl Default for BufferPool {
    fn default() -> Self {
        Self::new(4096)
    }
}

impl Clone for BufferPool {
    fn clone(&self) -> Self {
        Self {
            buffers: self.buffers.clone(),
            outstanding: self.outstanding.clone(),
            capacity: self.capacity,
        }
    }
}

pub struct PooledBuffer {
    buffer: Option<Vec<f32>>,
    pool: Arc<Mutex<Vec<Vec<f32>>>>,
    outstanding: Arc<AtomicUsize>,
}

impl PooledBuffer {
    pub fn capacity(&self) -> usize {
        self.buffer.as_ref().map(|b| b.capacity()).unwrap_or(0)
    }

    pub fn as_slice(&self) -> &[f32] {
        self.buffer.as_ref().map(|b| b.as_slice()).unwrap_or(&[])
    }

    pub fn extend_from_slice(&mut self, values: &[f32]) {
        if let Some(buffer) = &mut self.buffer {
            buffer.extend_from_slice(values);
        }
    }

    pub fn len(&self) -> usize {
        self.buffer.as_ref().map(|b| b.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for PooledBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PooledBuffer").field("len", &self.len()).finish()
    }
}

impl Drop for PooledBuffer {
    fn drop(&mut self) {
        if let Some(mut buffer) = self.buffer.take() {
            buffer.clear();
            let mut pool = self.pool
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            pool.push(buffer);
            self.outstanding.fetch_sub(1, Ordering::AcqRel);
        }
    }
}

impl std::ops::Deref for PooledBuffer {
    type Target = [f32];

    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_returns_to_pool_on_drop() {
        let pool = BufferPool::new(8);
        {
            let mut buf = pool.get();
            buf.extend_from_slice(&[1.0, 2.0, 3.0]);
            assert_eq!(&buf[..], &[1.0, 2.0, 3.0]);
            assert_eq!(pool.outstanding(), 1);
            assert_eq!(pool.pool_size(), 0);
        }
        assert_eq!(pool.outstanding(), 0);
        assert_eq!(pool.pool_size(), 1);
    }

    #[test]
    fn test_reused_buffer_is_cleared() {
        let pool = BufferPool::new(8);
        let mut buf = pool.get();
        buf.extend_from_slice(&[5.0; 4]);
        drop(buf);

        let reused = pool.get();
        assert!(reused.is_empty());
        assert_eq!(pool.pool_size(), 0);
    }
}
