//! "Run once before the next repaint" scheduling
//!
//! Mirrors the browser's animation-frame contract: a task requested while a
//! frame is being processed runs on the following frame, never the current one.

/// Queue of tasks waiting for the next frame
#[derive(Debug)]
pub struct FrameQueue<T> {
    pending: Vec<T>,
}

impl<T> Default for FrameQueue<T> {
    fn default() -> Self {
        Self {
            pending: Vec::new(),
        }
    }
}

impl<T> FrameQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `task` for the next frame
    pub fn request(&mut self, task: T) {
        self.pending.push(task);
    }

    /// Begin a frame, taking every task scheduled before it started
    pub fn take_due(&mut self) -> Vec<T> {
        std::mem::take(&mut self.pending)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
