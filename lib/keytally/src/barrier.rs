use crossbeam_channel::Sender;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Completion-counting close authority for a fan-in stream.
///
/// The barrier owns the sole long-lived `Sender`; producer tasks take a
/// transient clone per task via `producer()` and call `arrive()` when done.
/// The arrival that brings the outstanding count to zero drops the owned
/// sender, disconnecting the channel exactly once. Messages sent before that
/// point stay buffered and remain receivable, so the consumer's drain loop
/// terminates iff every producer arrived.
pub struct CompletionBarrier<T> {
    outstanding: AtomicUsize,
    sender: Mutex<Option<Sender<T>>>,
}

impl<T> CompletionBarrier<T> {
    pub fn new(expected: usize, sender: Sender<T>) -> Self {
        let barrier = Self {
            outstanding: AtomicUsize::new(expected),
            sender: Mutex::new(Some(sender)),
        };
        if expected == 0 {
            barrier.close();
        }
        barrier
    }

    /// Sender handle for one producer task; `None` once the stream closed.
    /// The clone must be dropped before that task's `arrive()`.
    pub fn producer(&self) -> Option<Sender<T>> {
        self.sender.lock().unwrap().clone()
    }

    /// Record one producer completion, whether or not it sent anything.
    pub fn arrive(&self) {
        let prev = self.outstanding.fetch_sub(1, Ordering::AcqRel);
        debug_assert!(prev > 0, "more arrivals than expected producers");
        if prev == 1 {
            self.close();
        }
    }

    fn close(&self) {
        self.sender.lock().unwrap().take();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;

    #[test]
    fn closes_after_all_arrivals() {
        let (tx, rx) = bounded::<u32>(4);
        let barrier = CompletionBarrier::new(3, tx);
        for i in 0..3 {
            let tx = barrier.producer().unwrap();
            tx.send(i).unwrap();
            drop(tx);
            barrier.arrive();
        }
        let received: Vec<u32> = rx.iter().collect();
        assert_eq!(received, vec![0, 1, 2]);
    }

    #[test]
    fn does_not_close_while_producers_outstanding() {
        let (tx, rx) = bounded::<u32>(2);
        let barrier = CompletionBarrier::new(2, tx);
        barrier.arrive();
        assert!(barrier.producer().is_some());
        assert!(rx.try_recv().is_err());
        barrier.arrive();
        assert!(barrier.producer().is_none());
        assert!(rx.iter().next().is_none());
    }

    #[test]
    fn zero_expected_closes_immediately() {
        let (tx, rx) = bounded::<u32>(1);
        let barrier = CompletionBarrier::new(0, tx);
        assert!(barrier.producer().is_none());
        assert!(rx.iter().next().is_none());
    }

    #[test]
    fn concurrent_arrivals_close_exactly_once() {
        let (tx, rx) = bounded::<usize>(64);
        let barrier = CompletionBarrier::new(64, tx);
        std::thread::scope(|s| {
            for i in 0..64 {
                let barrier = &barrier;
                s.spawn(move || {
                    if let Some(tx) = barrier.producer() {
                        tx.send(i).unwrap();
                    }
                    barrier.arrive();
                });
            }
        });
        assert_eq!(rx.iter().count(), 64);
    }
}
