/// Work requested for the next animation frame
///
/// Requests accumulate until the surface renders a frame and drains them.
#[derive(Debug, Clone)]
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

    pub fn request(&mut self, task: T) {
        self.pending.push(task);
    }

    /// Take every request made before this frame, in request order
    pub fn take(&mut self) -> Vec<T> {
        std::mem::take(&mut self.pending)
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        !self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_drains_in_order() {
        let mut frames = FrameQueue::new();
        frames.request(1);
        frames.request(2);
        assert!(frames.is_pending());
        assert_eq!(frames.take(), vec![1, 2]);
        assert!(!frames.is_pending());
        assert!(frames.take().is_empty());
    }
}
