use core::fmt;
use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};

#[cfg(test)]
use mock_instant::Instant;
#[cfg(not(test))]
use std::time::Instant;

/// See [`ControlFlow::Handle`].
#[derive(Clone)]
pub struct WaitHandle(Arc<AtomicBool>);

impl WaitHandle {
    fn new() -> Self {
        WaitHandle(Arc::new(AtomicBool::new(false)))
    }

    /// Notify the waiting agent that it can wake up.
    pub fn wake(&self) {
        self.0.store(true, Ordering::Release);
    }

    fn is_woken(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// How many handles to this wait exist right now, including the one in the [`ControlFlow`] itself.
    pub fn references(&self) -> usize {
        Arc::strong_count(&self.0)
    }
}

impl PartialEq for WaitHandle {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}
impl Eq for WaitHandle {}
impl fmt::Debug for WaitHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WaitHandle(woken: {})", self.is_woken())
    }
}

/// What should happen to an [`Agent`][super::Agent] after it finishes reacting to a message.
///
/// This only says when [`Agent::react`][super::Agent::react] *may* be called again; a sleeping agent that wakes
/// up still waits for the next round to actually run.
#[derive(PartialEq, Eq, Clone, Debug)]
pub enum ControlFlow {
    /// Continue as normal and update next round.
    Continue,
    /// Stop updating this agent and (eventually) destroy it.
    Kill,
    /// Wait until notified by someone who has the handle
    Handle(WaitHandle),
    /// Sleep, waking up at the given time
    Time(Instant),
}

impl ControlFlow {
    /// Create a new [`ControlFlow::Handle`], with its handle so something else can wake it.
    pub fn wait() -> (Self, WaitHandle) {
        let wh = WaitHandle::new();
        (Self::Handle(wh.clone()), wh)
    }

    pub fn sleep_until(time: Instant) -> Self {
        Self::Time(time)
    }

    pub fn sleep_for(amt: Duration) -> Self {
        Self::Time(Instant::now() + amt)
    }

    /// Check whether an agent which returned this control flow is ready to start reacting again.
    pub fn is_ready(&self) -> bool {
        match self {
            ControlFlow::Continue => true,
            ControlFlow::Kill => false,
            ControlFlow::Handle(wh) => wh.is_woken(),
            ControlFlow::Time(when) => &Instant::now() >= when,
        }
    }

    /// Whether an agent that returned this can never run again, and should be dropped.
    pub fn is_dead(&self) -> bool {
        match self {
            ControlFlow::Kill => true,
            // if there's only one reference, it's the one in this handle, so nobody can wake it
            ControlFlow::Handle(h) => !h.is_woken() && h.references() <= 1,
            _ => false,
        }
    }
}

#[cfg(test)]
mod test {
    use std::time::Duration;

    use mock_instant::MockClock;

    use super::{ControlFlow, Instant};

    #[test]
    fn continue_ready() {
        assert!(ControlFlow::Continue.is_ready());
        assert!(!ControlFlow::Continue.is_dead());
    }

    #[test]
    fn kill_unready_and_dead() {
        assert!(!ControlFlow::Kill.is_ready());
        assert!(ControlFlow::Kill.is_dead());
    }

    #[test]
    fn wait_handle_readies_after_wake() {
        let (cf, wh) = ControlFlow::wait();
        assert!(!cf.is_ready());
        assert!(!cf.is_dead());
        wh.wake();
        assert!(cf.is_ready());
    }

    #[test]
    fn orphaned_wait_is_dead() {
        let (cf, wh) = ControlFlow::wait();
        drop(wh);
        assert!(cf.is_dead());
    }

    #[test]
    fn sleep_until_readies_after_time() {
        let cf = ControlFlow::sleep_until(Instant::now() + Duration::from_millis(100));
        assert!(!cf.is_ready());
        MockClock::advance(Duration::from_millis(60));
        assert!(!cf.is_ready());
        MockClock::advance(Duration::from_millis(60));
        assert!(cf.is_ready());
    }

    #[test]
    fn sleep_for_zero_is_ready_now() {
        assert!(ControlFlow::sleep_for(Duration::ZERO).is_ready());
    }
}
