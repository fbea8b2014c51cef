//! Bounded-interface, unbounded-storage queue used to move sample blocks
//! between the source, decode, and sink threads.

use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;

struct State<T> {
    queue: VecDeque<Vec<T>>,
    end_marked: bool,
}

/// A thread-safe FIFO of sample blocks with blocking `pull`.
///
/// There is no capacity limit: `push` never blocks. Backpressure is the
/// caller's responsibility (e.g. the sink thread watching
/// [`DataBuffer::queued_samples`] before sleeping), which keeps the
/// producer side free of priority inversion against a slow consumer.
pub struct DataBuffer<T> {
    state: Mutex<State<T>>,
    cond: Condvar,
}

impl<T> Default for DataBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> DataBuffer<T> {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                queue: VecDeque::new(),
                end_marked: false,
            }),
            cond: Condvar::new(),
        }
    }

    /// Push a block of samples. A no-op for empty blocks, matching
    /// `pull`'s convention that an empty return means end-of-stream.
    pub fn push(&self, samples: Vec<T>) {
        if samples.is_empty() {
            return;
        }
        let mut state = self.state.lock();
        state.queue.push_back(samples);
        self.cond.notify_all();
    }

    /// Mark the end of the stream. Wakes any blocked `pull`.
    pub fn push_end(&self) {
        let mut state = self.state.lock();
        state.end_marked = true;
        self.cond.notify_all();
    }

    /// Total number of samples currently queued, across all blocks.
    pub fn queued_samples(&self) -> usize {
        let state = self.state.lock();
        state.queue.iter().map(|block| block.len()).sum()
    }

    /// Block until a sample block is available or the end marker is set.
    /// Returns an empty vector once the end marker has been reached and
    /// the queue has drained.
    pub fn pull(&self) -> Vec<T> {
        let mut state = self.state.lock();
        loop {
            if !state.queue.is_empty() {
                return state.queue.pop_front().unwrap();
            }
            if state.end_marked {
                return Vec::new();
            }
            self.cond.wait(&mut state);
        }
    }

    /// True once the end marker has been set and the queue has drained.
    pub fn pull_end_reached(&self) -> bool {
        let state = self.state.lock();
        state.queue.is_empty() && state.end_marked
    }

    /// Block until at least `min_fill` samples are queued or the end
    /// marker is set.
    pub fn wait_buffer_fill(&self, min_fill: usize) {
        let mut state = self.state.lock();
        loop {
            let total: usize = state.queue.iter().map(|block| block.len()).sum();
            if total >= min_fill || state.end_marked {
                return;
            }
            self.cond.wait(&mut state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn pull_blocks_until_push() {
        let buffer = Arc::new(DataBuffer::<i32>::new());
        let reader = Arc::clone(&buffer);
        let handle = thread::spawn(move || reader.pull());

        thread::sleep(std::time::Duration::from_millis(20));
        buffer.push(vec![1, 2, 3]);

        assert_eq!(handle.join().unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn pull_returns_empty_after_end_marker() {
        let buffer = DataBuffer::<i32>::new();
        buffer.push_end();
        assert_eq!(buffer.pull(), Vec::<i32>::new());
        assert!(buffer.pull_end_reached());
    }

    #[test]
    fn empty_push_is_a_no_op() {
        let buffer = DataBuffer::<i32>::new();
        buffer.push(Vec::new());
        assert_eq!(buffer.queued_samples(), 0);
    }

    #[test]
    fn queued_samples_counts_across_blocks() {
        let buffer = DataBuffer::<i32>::new();
        buffer.push(vec![1, 2]);
        buffer.push(vec![3, 4, 5]);
        assert_eq!(buffer.queued_samples(), 5);
    }
}
