//! Observer trait and the per-repository registry.

use std::sync::{Arc, PoisonError, RwLock};

use uuid::Uuid;

use crate::event::ChangeEvent;
use crate::subscription::{ChannelObserver, Subscription};

/// Something that wants to hear about repository mutations.
///
/// Implementations are called synchronously, after the repository has released
/// its collection, so they may query the repository from inside `on_change`.
pub trait Observer: Send + Sync {
    fn on_change(&self, event: ChangeEvent);

    /// `false` once the observer can no longer receive events; the registry
    /// drops it after the next notification.
    fn is_alive(&self) -> bool {
        true
    }
}

impl<F> Observer for F
where
    F: Fn(ChangeEvent) + Send + Sync,
{
    fn on_change(&self, event: ChangeEvent) {
        self(event)
    }
}

/// Handle returned by [`ObserverRegistry::subscribe`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ObserverId(Uuid);

impl ObserverId {
    fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl core::fmt::Display for ObserverId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Ordered set of observers.
///
/// - Subscription order is notification order.
/// - Subscribing the same `Arc` twice is a no-op that returns the original handle.
/// - `notify` walks a snapshot, so (un)subscribing from inside a callback only
///   affects later notifications.
/// - Observers that report themselves dead during a notification are removed
///   right after it.
#[derive(Default)]
pub struct ObserverRegistry {
    observers: RwLock<Vec<(ObserverId, Arc<dyn Observer>)>>,
}

impl ObserverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, observer: Arc<dyn Observer>) -> ObserverId {
        let mut observers = self.observers.write().unwrap_or_else(PoisonError::into_inner);

        if let Some((id, _)) = observers.iter().find(|(_, o)| same_observer(o, &observer)) {
            return *id;
        }

        let id = ObserverId::new();
        observers.push((id, observer));
        id
    }

    /// Subscribe a queue instead of a callback.
    pub fn subscribe_channel(&self) -> (ObserverId, Subscription<ChangeEvent>) {
        let (observer, subscription) = ChannelObserver::pair();
        let id = self.subscribe(Arc::new(observer));
        (id, subscription)
    }

    /// Remove by handle. Returns `false` if the handle was not subscribed.
    pub fn unsubscribe(&self, id: ObserverId) -> bool {
        let mut observers = self.observers.write().unwrap_or_else(PoisonError::into_inner);
        let before = observers.len();
        observers.retain(|(existing, _)| *existing != id);
        observers.len() != before
    }

    /// Remove by identity of the shared observer.
    pub fn unsubscribe_observer(&self, observer: &Arc<dyn Observer>) -> bool {
        let mut observers = self.observers.write().unwrap_or_else(PoisonError::into_inner);
        let before = observers.len();
        observers.retain(|(_, existing)| !same_observer(existing, observer));
        observers.len() != before
    }

    pub fn len(&self) -> usize {
        self.observers.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Call every observer once, in subscription order.
    pub fn notify(&self, event: ChangeEvent) {
        let snapshot: Vec<Arc<dyn Observer>> = self
            .observers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, observer)| Arc::clone(observer))
            .collect();

        tracing::debug!(event = event.tag(), observers = snapshot.len(), "notifying observers");

        let mut dead = false;
        for observer in &snapshot {
            observer.on_change(event);
            dead |= !observer.is_alive();
        }

        if dead {
            let mut observers = self.observers.write().unwrap_or_else(PoisonError::into_inner);
            let before = observers.len();
            observers.retain(|(_, observer)| observer.is_alive());
            tracing::debug!(pruned = before - observers.len(), "dropped dead observers");
        }
    }
}

impl core::fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("observers", &self.len())
            .finish()
    }
}

// Data-pointer comparison; vtable pointers for the same type may differ.
fn same_observer(a: &Arc<dyn Observer>, b: &Arc<dyn Observer>) -> bool {
    core::ptr::eq(Arc::as_ptr(a) as *const (), Arc::as_ptr(b) as *const ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn recorder(log: &Arc<Mutex<Vec<String>>>, name: &'static str) -> Arc<dyn Observer> {
        let log = Arc::clone(log);
        Arc::new(move |event: ChangeEvent| {
            log.lock().unwrap().push(format!("{name}:{}", event.tag()));
        })
    }

    #[test]
    fn notifies_in_subscription_order() {
        let registry = ObserverRegistry::new();
        let log = Arc::new(Mutex::new(Vec::new()));

        registry.subscribe(recorder(&log, "first"));
        registry.subscribe(recorder(&log, "second"));
        registry.notify(ChangeEvent::Created);

        assert_eq!(*log.lock().unwrap(), vec!["first:CREAR", "second:CREAR"]);
    }

    #[test]
    fn duplicate_subscription_is_ignored() {
        let registry = ObserverRegistry::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        let observer = recorder(&log, "only");

        let first = registry.subscribe(Arc::clone(&observer));
        let second = registry.subscribe(Arc::clone(&observer));
        registry.notify(ChangeEvent::Deleted);

        assert_eq!(first, second);
        assert_eq!(registry.len(), 1);
        assert_eq!(log.lock().unwrap().len(), 1);
    }

    #[test]
    fn dropped_channel_subscriptions_are_pruned_on_notify() {
        let registry = ObserverRegistry::new();
        for _ in 0..100 {
            let (_, subscription) = registry.subscribe_channel();
            drop(subscription);
            registry.notify(ChangeEvent::Created);
        }
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn live_channels_survive_pruning() {
        let registry = ObserverRegistry::new();
        let (_, kept) = registry.subscribe_channel();
        let (_, dropped) = registry.subscribe_channel();
        drop(dropped);

        registry.notify(ChangeEvent::Updated);
        registry.notify(ChangeEvent::Deleted);

        assert_eq!(registry.len(), 1);
        assert_eq!(kept.drain(), vec![ChangeEvent::Updated, ChangeEvent::Deleted]);
    }

    #[test]
    fn unsubscribe_by_handle_and_by_identity() {
        let registry = ObserverRegistry::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        let a = recorder(&log, "a");
        let b = recorder(&log, "b");

        let id_a = registry.subscribe(Arc::clone(&a));
        registry.subscribe(Arc::clone(&b));

        assert!(registry.unsubscribe(id_a));
        assert!(!registry.unsubscribe(id_a));
        assert!(registry.unsubscribe_observer(&b));
        assert!(registry.is_empty());

        registry.notify(ChangeEvent::Updated);
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn unsubscribing_inside_a_callback_affects_later_notifications() {
        let registry = Arc::new(ObserverRegistry::new());
        let calls = Arc::new(Mutex::new(0u32));
        let slot: Arc<Mutex<Option<ObserverId>>> = Arc::new(Mutex::new(None));

        let observer: Arc<dyn Observer> = {
            let registry = Arc::clone(&registry);
            let calls = Arc::clone(&calls);
            let slot = Arc::clone(&slot);
            Arc::new(move |_event: ChangeEvent| {
                *calls.lock().unwrap() += 1;
                if let Some(id) = *slot.lock().unwrap() {
                    registry.unsubscribe(id);
                }
            })
        };

        let id = registry.subscribe(observer);
        *slot.lock().unwrap() = Some(id);

        registry.notify(ChangeEvent::Created);
        registry.notify(ChangeEvent::Created);

        assert_eq!(*calls.lock().unwrap(), 1);
        assert!(registry.is_empty());
    }

    #[test]
    fn channel_subscription_queues_events() {
        let registry = ObserverRegistry::new();
        let (_id, subscription) = registry.subscribe_channel();

        registry.notify(ChangeEvent::Created);
        registry.notify(ChangeEvent::TreatmentApplied);

        assert_eq!(
            subscription.drain(),
            vec![ChangeEvent::Created, ChangeEvent::TreatmentApplied]
        );
        assert!(subscription.try_recv().is_err());
    }
}
