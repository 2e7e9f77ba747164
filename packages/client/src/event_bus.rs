//! In-process event fan-out.
//!
//! Every subscriber gets its own unbounded channel, so a slow subscriber never
//! blocks the emitter, and events reach each subscriber in emission order.

use std::sync::Mutex;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Broadcasts cloned events to every live subscriber.
pub struct EventBus<T> {
    subscribers: Mutex<Vec<UnboundedSender<T>>>,
}

impl<T: Clone> EventBus<T> {
    /// Create a bus with no subscribers
    pub fn new() -> Self {
        Self {
            subscribers: Mutex::new(Vec::new()),
        }
    }

    /// Register a new subscriber.
    ///
    /// The subscriber only sees events emitted after this call.
    pub fn subscribe(&self) -> UnboundedReceiver<T> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.lock().push(tx);
        rx
    }

    /// Deliver `event` to every subscriber.
    ///
    /// Subscribers whose receiver has been dropped are removed. Returns the
    /// number of subscribers the event reached.
    pub fn emit(&self, event: T) -> usize {
        let mut subscribers = self.lock();
        subscribers.retain(|tx| tx.send(event.clone()).is_ok());
        subscribers.len()
    }

    /// Number of subscribers registered (dropped receivers are pruned lazily on emit)
    pub fn subscriber_count(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<UnboundedSender<T>>> {
        self.subscribers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<T: Clone> Default for EventBus<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emit_reaches_all_subscribers_in_order() {
        // テスト項目: 全購読者に発行順で届く
        // given (前提条件):
        let bus = EventBus::new();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        // when (操作):
        bus.emit(1);
        bus.emit(2);

        // then (期待する結果):
        assert_eq!(rx1.try_recv(), Ok(1));
        assert_eq!(rx1.try_recv(), Ok(2));
        assert_eq!(rx2.try_recv(), Ok(1));
        assert_eq!(rx2.try_recv(), Ok(2));
    }

    #[test]
    fn test_emit_prunes_dropped_subscribers() {
        // テスト項目: 破棄された購読者は発行時に取り除かれる
        // given (前提条件):
        let bus = EventBus::new();
        let _rx1 = bus.subscribe();
        let rx2 = bus.subscribe();
        drop(rx2);

        // when (操作):
        let delivered = bus.emit("event");

        // then (期待する結果):
        assert_eq!(delivered, 1);
        assert_eq!(bus.subscriber_count(), 1);
    }

    #[test]
    fn test_late_subscriber_misses_earlier_events() {
        // テスト項目: 購読前のイベントは届かない
        // given (前提条件):
        let bus = EventBus::new();
        bus.emit(1);

        // when (操作):
        let mut rx = bus.subscribe();
        bus.emit(2);

        // then (期待する結果):
        assert_eq!(rx.try_recv(), Ok(2));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_emit_without_subscribers() {
        // テスト項目: 購読者がいなくても発行できる
        // given (前提条件):
        let bus: EventBus<u8> = EventBus::default();

        // then (期待する結果):
        assert_eq!(bus.emit(7), 0);
    }
}
