//! A test-and-test-and-set spin lock usable as a `lock_api` raw mutex.
//!
//! Critical sections in the list pairing code are short (one element against
//! one neighbour list), so spinning beats parking when the work is spread over
//! a rayon pool.

use core::hint::spin_loop;
use core::sync::atomic::{AtomicBool, Ordering};

use parking_lot::lock_api::{self, GuardSend, RawMutex};

/// Raw spin lock.
#[derive(Debug)]
pub struct SpinRawMutex {
    locked: AtomicBool,
}

// SAFETY: `lock` only returns once this thread flipped `locked` from false to
// true with acquire ordering, and `unlock` releases it with release ordering,
// so at most one holder exists at a time.
unsafe impl RawMutex for SpinRawMutex {
    #[allow(clippy::declare_interior_mutable_const)]
    const INIT: Self = SpinRawMutex {
        locked: AtomicBool::new(false),
    };

    type GuardMarker = GuardSend;

    fn lock(&self) {
        while !self.try_lock() {
            while self.locked.load(Ordering::Relaxed) {
                spin_loop();
            }
        }
    }

    fn try_lock(&self) -> bool {
        self.locked
            .compare_exchange_weak(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_ok()
    }

    unsafe fn unlock(&self) {
        self.locked.store(false, Ordering::Release);
    }

    fn is_locked(&self) -> bool {
        self.locked.load(Ordering::Relaxed)
    }
}

/// A mutex protecting `T` with [`SpinRawMutex`].
pub type SpinMutex<T> = lock_api::Mutex<SpinRawMutex, T>;
