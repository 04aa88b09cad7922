//! Signals shared between the radio's run loop and the rest of the application.

use core::cell::Cell;

use embassy_sync::blocking_mutex::{raw::CriticalSectionRawMutex, Mutex};

/// A counting semaphore.
///
/// The radio uses two of them: one released by the IRQ handler and consumed by
/// [`EsbDispatch::run()`](fn@crate::radio::prelude::EsbDispatch::run), and one that tracks
/// queued ACK payloads. On an RTOS, implement this over the kernel's semaphore.
pub trait Semaphore {
    /// Add a permit. Must be safe to call from interrupt context.
    fn release(&self);

    /// Take a permit if one is available, without waiting.
    fn try_take(&self) -> bool;

    /// Wait (unbounded) until a permit can be taken.
    fn take(&self) {
        while !self.try_take() {
            core::hint::spin_loop();
        }
    }
}

/// A [`Semaphore`] guarded by a critical section.
///
/// The permit count saturates at 255.
/// ```
/// use nrf24_esb::radio::CsSemaphore;
/// static IRQ_SIGNAL: CsSemaphore = CsSemaphore::new();
/// ```
pub struct CsSemaphore {
    permits: Mutex<CriticalSectionRawMutex, Cell<u8>>,
}

impl CsSemaphore {
    pub const fn new() -> Self {
        Self {
            permits: Mutex::new(Cell::new(0)),
        }
    }

    /// The number of permits currently available.
    pub fn permits(&self) -> u8 {
        self.permits.lock(|permits| permits.get())
    }
}

impl Default for CsSemaphore {
    fn default() -> Self {
        Self::new()
    }
}

impl Semaphore for CsSemaphore {
    fn release(&self) {
        self.permits
            .lock(|permits| permits.set(permits.get().saturating_add(1)));
    }

    fn try_take(&self) -> bool {
        self.permits.lock(|permits| match permits.get() {
            0 => false,
            n => {
                permits.set(n - 1);
                true
            }
        })
    }
}

#[cfg(test)]
mod test {
    use super::{CsSemaphore, Semaphore};

    #[test]
    fn counting() {
        let sem = CsSemaphore::new();
        assert!(!sem.try_take());
        sem.release();
        sem.release();
        assert_eq!(sem.permits(), 2);
        sem.take();
        assert!(sem.try_take());
        assert!(!sem.try_take());
    }

    #[test]
    fn saturates() {
        let sem = CsSemaphore::default();
        for _ in 0..300 {
            sem.release();
        }
        assert_eq!(sem.permits(), u8::MAX);
    }
}
