use cincuentazo_engine::events::GameEvent;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::mpsc;

// Bounded so a stalled display cannot grow memory without limit; a
// subscriber that falls this far behind is dropped.
const EVENT_CHANNEL_BUFFER: usize = 1000;

/// One published engine event, numbered in publication order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub seq: u64,
    pub event: GameEvent,
    /// Human-readable rendering of `event`.
    pub message: String,
}

pub type NotificationSender = mpsc::Sender<Notification>;
pub type NotificationReceiver = mpsc::Receiver<Notification>;

pub struct EventSubscription {
    bus: EventBus,
    subscriber_id: usize,
    pub receiver: NotificationReceiver,
}

impl EventSubscription {
    pub fn receiver(&mut self) -> &mut NotificationReceiver {
        &mut self.receiver
    }

    /// Everything already queued for this subscriber, without waiting.
    pub fn drain(&mut self) -> Vec<Notification> {
        let mut out = Vec::new();
        while let Ok(n) = self.receiver.try_recv() {
            out.push(n);
        }
        out
    }
}

impl Drop for EventSubscription {
    fn drop(&mut self) {
        self.bus.unsubscribe(self.subscriber_id);
    }
}

/// Fan-out of engine events to presentation layers.
///
/// Cloning yields another handle to the same bus.
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    inner: Arc<EventBusInner>,
}

#[derive(Debug, Default)]
struct EventBusInner {
    subscribers: RwLock<Vec<(usize, NotificationSender)>>,
    next_id: AtomicUsize,
    next_seq: AtomicU64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self) -> EventSubscription {
        let (subscriber_id, receiver) = self.subscribe_raw();
        EventSubscription {
            bus: self.clone(),
            subscriber_id,
            receiver,
        }
    }

    fn subscribe_raw(&self) -> (usize, NotificationReceiver) {
        let (tx, rx) = mpsc::channel(EVENT_CHANNEL_BUFFER);
        let id = self.inner.next_id.fetch_add(1, Ordering::AcqRel);
        // The list is always left consistent, so a poisoned lock is still usable.
        let mut guard = self
            .inner
            .subscribers
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        guard.push((id, tx));

        tracing::info!(subscriber_id = id, "subscribed to match events");

        (id, rx)
    }

    /// Numbers `event` and delivers it to every live subscriber. Returns the
    /// notification that was sent.
    pub fn publish(&self, event: GameEvent) -> Notification {
        let seq = self.inner.next_seq.fetch_add(1, Ordering::AcqRel);
        let notification = Notification {
            seq,
            message: event.to_string(),
            event,
        };

        tracing::debug!(seq, event = %notification.message, "publishing match event");

        let subscribers = {
            let guard = self
                .inner
                .subscribers
                .read()
                .unwrap_or_else(PoisonError::into_inner);
            guard.clone()
        };

        let mut failed = Vec::new();
        for (id, sender) in subscribers {
            // try_send never blocks the mutation path; slow subscribers are cut off.
            if let Err(e) = sender.try_send(notification.clone()) {
                tracing::warn!(
                    subscriber_id = id,
                    error = %e,
                    "failed to deliver match event, dropping subscriber"
                );
                failed.push(id);
            }
        }
        if !failed.is_empty() {
            self.remove_subscribers(&failed);
        }
        notification
    }

    pub fn unsubscribe(&self, subscriber_id: usize) {
        self.remove_subscribers(&[subscriber_id]);
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner
            .subscribers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Sequence number the next notification will carry.
    pub fn next_seq(&self) -> u64 {
        self.inner.next_seq.load(Ordering::Acquire)
    }

    fn remove_subscribers(&self, ids: &[usize]) {
        let mut guard = self
            .inner
            .subscribers
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        guard.retain(|(id, _)| !ids.contains(id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cincuentazo_engine::player::PlayerId;

    fn turn(player: PlayerId) -> GameEvent {
        GameEvent::TurnChanged { player }
    }

    #[test]
    fn subscription_drop_unsubscribes() {
        let bus = EventBus::new();
        {
            let _sub = bus.subscribe();
            assert_eq!(bus.subscriber_count(), 1);
        }
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn publish_reaches_all_subscribers_in_order() {
        let bus = EventBus::new();
        let mut sub1 = bus.subscribe();
        let mut sub2 = bus.subscribe();

        bus.publish(turn(PlayerId::Machine(1)));
        bus.publish(turn(PlayerId::Human));

        let got1 = sub1.drain();
        let got2 = sub2.drain();
        assert_eq!(got1, got2);
        assert_eq!(got1.len(), 2);
        assert_eq!(got1[0].seq + 1, got1[1].seq);
        assert_eq!(got1[1].message, "Turn changed to: Human");
    }

    #[test]
    fn stale_receiver_is_pruned() {
        let bus = EventBus::new();
        let (id, rx) = bus.subscribe_raw();
        drop(rx);
        bus.publish(turn(PlayerId::Human));
        assert_eq!(bus.subscriber_count(), 0);
        bus.unsubscribe(id); // unsubscribing after removal is harmless
    }

    #[test]
    fn full_subscriber_is_dropped() {
        let bus = EventBus::new();
        let (_id, _rx) = bus.subscribe_raw();
        for _ in 0..=EVENT_CHANNEL_BUFFER {
            bus.publish(turn(PlayerId::Human));
        }
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn publish_without_subscribers_still_numbers_events() {
        let bus = EventBus::new();
        assert_eq!(bus.publish(turn(PlayerId::Human)).seq, 0);
        assert_eq!(bus.next_seq(), 1);
    }

    #[test]
    fn notification_serializes_with_tagged_event() {
        let bus = EventBus::new();
        let n = bus.publish(turn(PlayerId::Machine(2)));
        let json = serde_json::to_value(&n).expect("serialize");
        assert_eq!(json["seq"], 0);
        assert_eq!(json["event"]["type"], "turn_changed");
        assert_eq!(json["message"], "Turn changed to: Machine 2");
    }
}
