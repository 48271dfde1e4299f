use std::sync::atomic::{AtomicBool, Ordering};

/// Buttons as seen by one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputFrame {
    pub jump: bool,
}

/// Polled once at the start of every tick.
pub trait InputSource {
    fn poll(&self) -> InputFrame;
}

/// Edge-latched jump button.
///
/// The key handler may run on another thread; a press is held until the
/// next poll consumes it, so a tap between two ticks is never lost and one
/// press is never read twice.
#[derive(Debug, Default)]
pub struct InputLatch {
    jump: AtomicBool,
}

impl InputLatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press_jump(&self) {
        self.jump.store(true, Ordering::Release);
    }

    /// Drops a pending press, e.g. the one that started the run.
    pub fn clear(&self) {
        self.jump.store(false, Ordering::Release);
    }
}

impl InputSource for InputLatch {
    fn poll(&self) -> InputFrame {
        InputFrame {
            jump: self.jump.swap(false, Ordering::AcqRel),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn press_is_consumed_once() {
        let latch = InputLatch::new();
        assert!(!latch.poll().jump);
        latch.press_jump();
        latch.press_jump();
        assert!(latch.poll().jump);
        assert!(!latch.poll().jump);
    }

    #[test]
    fn clear_drops_pending_press() {
        let latch = InputLatch::new();
        latch.press_jump();
        latch.clear();
        assert_eq!(latch.poll(), InputFrame::default());
    }

    #[test]
    fn press_from_another_thread_is_seen() {
        let latch = Arc::new(InputLatch::new());
        let writer = Arc::clone(&latch);
        thread::spawn(move || writer.press_jump()).join().unwrap();
        assert!(latch.poll().jump);
    }
}
