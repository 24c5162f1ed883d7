use scantry_model::ScanEvent;
use tokio::sync::broadcast;

/// Broadcast registry for live scan subscribers.
///
/// Delivery is one-way and best-effort: no acknowledgment, no retry. A
/// subscriber that falls behind the channel capacity observes a lag and
/// skips ahead; a dropped receiver unsubscribes itself. Neither case ever
/// blocks or fails the publisher. Events are observed in publish order.
///
/// No cap is enforced on the subscriber count; a production deployment in
/// front of untrusted clients should bound concurrent stream connections
/// upstream.
#[derive(Debug)]
pub struct ScanEventBus {
    tx: broadcast::Sender<ScanEvent>,
}

impl ScanEventBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity.max(1));
        ScanEventBus { tx }
    }

    /// Register a long-lived subscriber. Dropping the receiver is the only
    /// unsubscribe path, mirroring transport close.
    pub fn subscribe(&self) -> broadcast::Receiver<ScanEvent> {
        self.tx.subscribe()
    }

    /// Fan the event out to every current subscriber. A send with zero
    /// receivers is not an error.
    pub fn publish(&self, event: ScanEvent) {
        let _ = self.tx.send(event);
    }

    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for ScanEventBus {
    fn default() -> Self {
        Self::new(64)
    }
}

#[cfg(test)]
mod tests {
    use scantry_model::ScanEvent;

    use super::ScanEventBus;

    #[tokio::test]
    async fn delivers_to_every_subscriber_in_order() {
        let bus = ScanEventBus::new(8);
        let mut first = bus.subscribe();
        let mut second = bus.subscribe();

        bus.publish(ScanEvent::new("8901234567890"));
        bus.publish(ScanEvent::new("7654321098765"));

        for rx in [&mut first, &mut second] {
            assert_eq!(rx.recv().await.unwrap().barcode, "8901234567890");
            assert_eq!(rx.recv().await.unwrap().barcode, "7654321098765");
        }
    }

    #[tokio::test]
    async fn publish_without_subscribers_is_not_an_error() {
        let bus = ScanEventBus::new(8);
        bus.publish(ScanEvent::new("8901234567890"));
        assert_eq!(bus.receiver_count(), 0);
    }

    #[tokio::test]
    async fn dropped_receiver_leaves_the_registry() {
        let bus = ScanEventBus::new(8);
        let rx = bus.subscribe();
        assert_eq!(bus.receiver_count(), 1);
        drop(rx);
        assert_eq!(bus.receiver_count(), 0);
    }

    #[tokio::test]
    async fn lagged_subscriber_does_not_block_publishing() {
        let bus = ScanEventBus::new(2);
        let mut rx = bus.subscribe();

        for n in 0..5 {
            bus.publish(ScanEvent::new(format!("barcode-{n}")));
        }

        // The slow reader observes the lag, then resumes with the newest
        // retained events.
        match rx.recv().await {
            Err(tokio::sync::broadcast::error::RecvError::Lagged(skipped)) => {
                assert!(skipped > 0);
            }
            other => panic!("expected lag, got {other:?}"),
        }
        assert_eq!(rx.recv().await.unwrap().barcode, "barcode-3");
    }
}
