//! Bounded undo history of raster snapshots.

use crate::draw::RasterBuffer;
use image::RgbaImage;
use std::collections::VecDeque;
use std::sync::Arc;

/// Default number of snapshots kept for undo.
pub const DEFAULT_MAX_UNDO_STEPS: usize = 20;

/// An immutable full copy of the raster buffer's pixels at one point in time.
///
/// Cloning a snapshot shares the pixel data; the data itself is never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pixels: Arc<RgbaImage>,
}

impl Snapshot {
    /// Deep-copies the current buffer content.
    pub fn capture(buffer: &RasterBuffer) -> Self {
        Self {
            pixels: Arc::new(buffer.as_image().clone()),
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    /// Returns true when the snapshot holds exactly the buffer's pixels.
    pub fn matches(&self, buffer: &RasterBuffer) -> bool {
        *self.pixels == *buffer.as_image()
    }
}

/// FIFO-bounded stack of snapshots.
///
/// Holds at most `capacity` entries; pushing onto a full stack evicts the
/// oldest snapshot. The newest entry is the current state.
#[derive(Debug, Clone)]
pub struct HistoryStack {
    entries: VecDeque<Snapshot>,
    capacity: usize,
}

impl HistoryStack {
    /// Creates an empty stack. A capacity of zero is raised to one so the
    /// current state can always be recorded.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::new(),
            capacity,
        }
    }

    /// Appends a snapshot, evicting from the front while over capacity.
    ///
    /// Returns the number of evicted entries.
    pub fn push(&mut self, snapshot: Snapshot) -> usize {
        self.entries.push_back(snapshot);
        let mut evicted = 0;
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
            evicted += 1;
        }
        evicted
    }

    /// Drops the current entry and returns the one beneath it.
    ///
    /// Never pops the last remaining entry; returns `None` instead.
    pub fn undo(&mut self) -> Option<&Snapshot> {
        if self.entries.len() <= 1 {
            return None;
        }
        self.entries.pop_back();
        self.entries.back()
    }

    /// The newest entry, reflecting the last committed state.
    pub fn current(&self) -> Option<&Snapshot> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether an `undo` would change anything.
    pub fn can_undo(&self) -> bool {
        self.entries.len() > 1
    }

    /// Iterates from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &Snapshot> {
        self.entries.iter()
    }
}

impl Default for HistoryStack {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_UNDO_STEPS)
    }
}
