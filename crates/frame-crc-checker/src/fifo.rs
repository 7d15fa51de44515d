//! Fixed-capacity FIFO holding the units still waiting for their checksum.

use heapless::Deque;

use crate::record::StreamRecord;

/// Deepest buffer any unit width needs (`ratio + 1` for 8-bit units).
pub const MAX_BUFFER_DEPTH: usize = 5;

#[derive(Debug, Clone)]
pub struct ElasticBuffer {
    slots: Deque<StreamRecord, MAX_BUFFER_DEPTH>,
    capacity: usize,
}

impl ElasticBuffer {
    /// A buffer holding at most `capacity` records (clamped to
    /// [`MAX_BUFFER_DEPTH`]).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: Deque::new(),
            capacity: capacity.clamp(1, MAX_BUFFER_DEPTH),
        }
    }

    /// Append a record; hands it back if the buffer is full.
    pub fn push(&mut self, record: StreamRecord) -> Result<(), StreamRecord> {
        if self.slots.len() >= self.capacity {
            return Err(record);
        }
        self.slots.push_back(record)
    }

    pub fn pop(&mut self) -> Option<StreamRecord> {
        self.slots.pop_front()
    }

    #[must_use]
    pub fn head(&self) -> Option<&StreamRecord> {
        self.slots.front()
    }

    #[must_use]
    pub fn level(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Whether the buffer holds exactly `threshold` records.
    #[must_use]
    pub fn is_full_at(&self, threshold: usize) -> bool {
        self.slots.len() == threshold
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &StreamRecord> {
        self.slots.iter()
    }
}
