//! Calendar sync bus
//!
//! Propagates "something changed for room X" notifications to every open
//! calendar view, so views re-query the availability index instead of
//! trusting stale state. Two parallel channels:
//!
//! - a `tokio::sync::broadcast` channel for instant delivery to live
//!   subscribers;
//! - a last-payload map as the durable fallback, so a consumer that starts
//!   (or polls) after the publish still observes the latest update.
//!
//! The bus carries invalidation hints only, never authoritative state, and
//! both publish and subscribe are best-effort: a missed notification
//! degrades to eventual consistency via polling, never to an error.

use std::sync::Arc;

use dashmap::DashMap;
use shared::CalendarUpdate;
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

/// Default capacity of the broadcast channel
const DEFAULT_CAPACITY: usize = 1024;

/// Cross-view change-notification bus
#[derive(Debug, Clone)]
pub struct SyncBus {
    /// Instant delivery channel
    tx: broadcast::Sender<CalendarUpdate>,
    /// Durable fallback: latest payload per room id
    latest: Arc<DashMap<String, CalendarUpdate>>,
    /// Shutdown signal for long-lived subscribers
    shutdown_token: CancellationToken,
}

impl SyncBus {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self {
            tx,
            latest: Arc::new(DashMap::new()),
            shutdown_token: CancellationToken::new(),
        }
    }

    /// Publish an update. Best-effort on both channels: a send error only
    /// means nobody is listening right now, and the fallback map still
    /// records the payload for late pollers.
    pub fn publish(&self, update: CalendarUpdate) {
        self.latest.insert(update.room_id.clone(), update.clone());
        let _ = self.tx.send(update);
    }

    /// Subscribe to every update on the bus
    pub fn subscribe(&self) -> broadcast::Receiver<CalendarUpdate> {
        self.tx.subscribe()
    }

    /// Subscribe to updates for one room only
    pub fn subscribe_room(&self, room_id: impl Into<String>) -> RoomSubscription {
        RoomSubscription {
            room_id: room_id.into(),
            rx: self.tx.subscribe(),
        }
    }

    /// Latest payload published for a room, for the polling fallback
    pub fn latest(&self, room_id: &str) -> Option<CalendarUpdate> {
        self.latest.get(room_id).map(|entry| entry.value().clone())
    }

    /// Shutdown token, for subscribers running in background tasks
    pub fn shutdown_token(&self) -> &CancellationToken {
        &self.shutdown_token
    }

    /// Cancel all long-lived subscribers
    pub fn shutdown(&self) {
        tracing::info!("Shutting down sync bus");
        self.shutdown_token.cancel();
    }
}

impl Default for SyncBus {
    fn default() -> Self {
        Self::new()
    }
}

/// A broadcast subscription filtered to a single room.
///
/// Payloads for other rooms are consumed and dropped so a view for room Y
/// never reacts to room X. A lagged receiver resumes silently; dropped
/// hints are recovered by the next poll of the fallback channel.
pub struct RoomSubscription {
    room_id: String,
    rx: broadcast::Receiver<CalendarUpdate>,
}

impl RoomSubscription {
    /// Next update for this room, or `None` once the bus is gone
    pub async fn recv(&mut self) -> Option<CalendarUpdate> {
        loop {
            match self.rx.recv().await {
                Ok(update) if update.room_id == self.room_id => return Some(update),
                Ok(_) => continue,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::debug!(room = %self.room_id, skipped, "sync subscriber lagged");
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::message::actions;

    #[test]
    fn publish_without_subscribers_is_not_an_error() {
        let bus = SyncBus::new();
        bus.publish(CalendarUpdate::new("room:a", actions::DATE_BLOCKED));
        assert!(bus.latest("room:a").is_some());
    }

    #[test]
    fn fallback_keeps_only_the_latest_payload_per_room() {
        let bus = SyncBus::new();
        bus.publish(CalendarUpdate::new("room:a", actions::DATE_BLOCKED));
        let second = CalendarUpdate::new("room:a", actions::DATE_UNBLOCKED);
        bus.publish(second.clone());
        bus.publish(CalendarUpdate::new("room:b", actions::STATUS_CHANGED));

        let latest = bus.latest("room:a").unwrap();
        assert_eq!(latest.update_id, second.update_id);
        assert_eq!(bus.latest("room:b").unwrap().action, actions::STATUS_CHANGED);
        assert!(bus.latest("room:c").is_none());
    }

    #[tokio::test]
    async fn room_subscription_filters_other_rooms() {
        let bus = SyncBus::new();
        let mut sub = bus.subscribe_room("room:a");

        bus.publish(CalendarUpdate::new("room:b", actions::STATUS_CHANGED));
        let for_a = CalendarUpdate::new("room:a", actions::RESERVATION_CREATED);
        bus.publish(for_a.clone());

        let received = sub.recv().await.unwrap();
        assert_eq!(received.update_id, for_a.update_id);
        assert_eq!(received.room_id, "room:a");
    }

    #[tokio::test]
    async fn double_publish_delivers_at_most_once_per_publication() {
        let bus = SyncBus::new();
        let mut sub = bus.subscribe_room("room:a");

        let update = CalendarUpdate::new("room:a", actions::STATUS_CHANGED);
        bus.publish(update.clone());
        bus.publish(update.clone());

        let first = sub.recv().await.unwrap();
        let second = sub.recv().await.unwrap();
        assert_eq!(first.update_id, update.update_id);
        assert_eq!(second.update_id, update.update_id);

        // no third delivery pending
        let pending = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            sub.recv(),
        )
        .await;
        assert!(pending.is_err(), "expected no further deliveries");
    }

    #[tokio::test]
    async fn late_subscriber_recovers_via_fallback() {
        let bus = SyncBus::new();
        let update = CalendarUpdate::new("room:a", actions::DATE_BLOCKED);
        bus.publish(update.clone());

        // subscribed after the publish: the broadcast is gone, but the
        // fallback still has the payload
        let mut sub = bus.subscribe_room("room:a");
        let pending = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            sub.recv(),
        )
        .await;
        assert!(pending.is_err());
        assert_eq!(bus.latest("room:a").unwrap().update_id, update.update_id);
    }
}
