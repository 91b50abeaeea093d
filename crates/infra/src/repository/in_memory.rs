use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use agrocoop_core::{DomainError, DomainResult, Record, Validate};
use agrocoop_events::{ChangeEvent, Observer, ObserverId, ObserverRegistry, Subscription};

use super::store::Repository;

/// Records in insertion order plus a key → slot index.
#[derive(Debug)]
struct Slots<T> {
    items: Vec<T>,
    index: HashMap<String, usize>,
}

impl<T> Default for Slots<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T: Record> Slots<T> {
    fn position(&self, key: &str) -> Option<usize> {
        self.index.get(key).copied()
    }

    fn push(&mut self, record: T) {
        self.index
            .insert(record.id().as_ref().to_string(), self.items.len());
        self.items.push(record);
    }

    fn remove(&mut self, slot: usize) {
        self.items.remove(slot);
        self.index = self
            .items
            .iter()
            .enumerate()
            .map(|(i, record)| (record.id().as_ref().to_string(), i))
            .collect();
    }
}

/// Observable in-memory repository.
///
/// - Keys are unique; the first record created under a key wins.
/// - Readers get clones; the collection itself never leaves the repository.
/// - Observers run after the collection lock is released, so they may query
///   the repository from inside the callback.
#[derive(Debug)]
pub struct InMemoryRepository<T> {
    slots: RwLock<Slots<T>>,
    observers: ObserverRegistry,
}

impl<T> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self {
            slots: RwLock::new(Slots::default()),
            observers: ObserverRegistry::new(),
        }
    }
}

impl<T> InMemoryRepository<T>
where
    T: Record + Send + Sync,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arc() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Repository pre-loaded with `records`; later duplicates are dropped.
    pub fn from_records(records: impl IntoIterator<Item = T>) -> Self {
        let repo = Self::new();
        {
            let mut slots = repo.write();
            for record in records {
                if slots.position(record.id().as_ref()).is_none() {
                    slots.push(record);
                }
            }
        }
        repo
    }

    fn read(&self) -> RwLockReadGuard<'_, Slots<T>> {
        self.slots.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Slots<T>> {
        self.slots.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn kind(&self) -> &'static str {
        T::SEQUENCE.prefix()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.read().position(key).is_some()
    }

    /// Clones of every record matching `predicate`, in insertion order.
    pub fn filter(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        self.read()
            .items
            .iter()
            .filter(|record| predicate(record))
            .cloned()
            .collect()
    }

    /// Sum of `value` over every record.
    pub fn sum_by(&self, value: impl Fn(&T) -> f64) -> f64 {
        self.fold(0.0, |sum, record| sum + value(record))
    }

    /// Fold over every record in insertion order without cloning.
    pub fn fold<A>(&self, init: A, step: impl FnMut(A, &T) -> A) -> A {
        self.read().items.iter().fold(init, step)
    }

    /// Mutate the record under `key` in place.
    ///
    /// `change` reports whether it applied anything; only then is `event`
    /// sent. Returns `false` when the key is unknown or nothing applied.
    pub fn modify(&self, key: &str, event: ChangeEvent, change: impl FnOnce(&mut T) -> bool) -> bool {
        let applied = {
            let mut slots = self.write();
            match slots.position(key) {
                Some(slot) => change(&mut slots.items[slot]),
                None => false,
            }
        };

        if applied {
            tracing::info!(kind = self.kind(), key, event = event.tag(), "record modified");
            self.observers.notify(event);
        } else {
            tracing::debug!(kind = self.kind(), key, event = event.tag(), "modification not applied");
        }
        applied
    }

    /// Validate `record`, then create it.
    pub fn create_validated(&self, record: T) -> DomainResult<()>
    where
        T: Validate,
    {
        if let Err(errors) = record.validate() {
            tracing::warn!(kind = self.kind(), %errors, "rejected invalid record");
            return Err(errors.into());
        }

        let key = record.id().as_ref().to_string();
        if self.create(record) {
            Ok(())
        } else {
            Err(DomainError::duplicate(key))
        }
    }

    /// Validate `record`, then store it under `key`.
    pub fn update_validated(&self, key: &str, record: T) -> DomainResult<()>
    where
        T: Validate,
    {
        if let Err(errors) = record.validate() {
            tracing::warn!(kind = self.kind(), key, %errors, "rejected invalid record");
            return Err(errors.into());
        }

        if self.update(key, record) {
            Ok(())
        } else {
            Err(DomainError::not_found(key))
        }
    }

    pub fn observers(&self) -> &ObserverRegistry {
        &self.observers
    }

    pub fn subscribe(&self, observer: Arc<dyn Observer>) -> ObserverId {
        self.observers.subscribe(observer)
    }

    pub fn subscribe_channel(&self) -> (ObserverId, Subscription<ChangeEvent>) {
        self.observers.subscribe_channel()
    }

    pub fn unsubscribe(&self, id: ObserverId) -> bool {
        self.observers.unsubscribe(id)
    }
}

impl<T> Repository<T> for InMemoryRepository<T>
where
    T: Record + Send + Sync,
{
    fn create(&self, record: T) -> bool {
        let key = record.id().as_ref().to_string();
        {
            let mut slots = self.write();
            if slots.position(&key).is_some() {
                tracing::warn!(kind = self.kind(), key = %key, "rejected duplicate key");
                return false;
            }
            slots.push(record);
        }

        tracing::info!(kind = self.kind(), key = %key, "record created");
        self.observers.notify(ChangeEvent::Created);
        true
    }

    fn find(&self, key: &str) -> Option<T> {
        let slots = self.read();
        let found = slots.position(key).map(|slot| slots.items[slot].clone());
        if found.is_none() {
            tracing::debug!(kind = self.kind(), key, "record not found");
        }
        found
    }

    fn update(&self, key: &str, mut record: T) -> bool {
        {
            let mut slots = self.write();
            let Some(slot) = slots.position(key) else {
                tracing::debug!(kind = self.kind(), key, "update target not found");
                return false;
            };
            record.rekey(slots.items[slot].id().clone());
            slots.items[slot] = record;
        }

        tracing::info!(kind = self.kind(), key, "record updated");
        self.observers.notify(ChangeEvent::Updated);
        true
    }

    fn delete(&self, key: &str) -> bool {
        {
            let mut slots = self.write();
            let Some(slot) = slots.position(key) else {
                tracing::debug!(kind = self.kind(), key, "delete target not found");
                return false;
            };
            slots.remove(slot);
        }

        tracing::info!(kind = self.kind(), key, "record deleted");
        self.observers.notify(ChangeEvent::Deleted);
        true
    }

    fn list(&self) -> Vec<T> {
        self.read().items.clone()
    }

    fn total(&self) -> usize {
        self.read().items.len()
    }

    fn next_id(&self) -> String {
        let slots = self.read();
        T::SEQUENCE.next(slots.items.iter().map(|record| record.id().as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use agrocoop_farms::Farm;

    fn farm(code: &str, name: &str) -> Farm {
        let mut farm = Farm::new(code);
        farm.name = name.to_string();
        farm.owner = "Owner".to_string();
        farm.total_area = 10.0;
        farm
    }

    fn event_log(repo: &InMemoryRepository<Farm>) -> Arc<Mutex<Vec<&'static str>>> {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&log);
        repo.subscribe(Arc::new(move |event: ChangeEvent| {
            sink.lock().unwrap().push(event.tag());
        }));
        log
    }

    #[test]
    fn find_after_create_returns_same_key() {
        let repo = InMemoryRepository::<Farm>::new();
        assert!(repo.create(farm("F001", "Villa María")));

        let found = repo.find("F001").unwrap();
        assert_eq!(found.code(), "F001");
        assert_eq!(found.name, "Villa María");
        assert!(repo.find("F999").is_none());
    }

    #[test]
    fn duplicate_create_is_rejected_silently() {
        let repo = InMemoryRepository::<Farm>::new();
        let log = event_log(&repo);

        assert!(repo.create(farm("F001", "first")));
        assert!(!repo.create(farm("F001", "second")));

        assert_eq!(repo.total(), 1);
        assert_eq!(repo.find("F001").unwrap().name, "first");
        assert_eq!(*log.lock().unwrap(), vec!["CREAR"]);
    }

    #[test]
    fn update_keeps_the_original_key() {
        let repo = InMemoryRepository::<Farm>::new();
        repo.create(farm("F001", "old"));
        repo.create(farm("F002", "other"));

        assert!(repo.update("F001", farm("F777", "new")));

        let stored = repo.find("F001").unwrap();
        assert_eq!(stored.name, "new");
        assert_eq!(stored.code(), "F001");
        assert!(repo.find("F777").is_none());
        assert_eq!(repo.total(), 2);
        assert_eq!(repo.list()[0].name, "new");
    }

    #[test]
    fn update_of_unknown_key_fails() {
        let repo = InMemoryRepository::<Farm>::new();
        let log = event_log(&repo);
        assert!(!repo.update("F404", farm("F404", "ghost")));
        assert_eq!(repo.total(), 0);
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn delete_is_idempotent_in_effect() {
        let repo = InMemoryRepository::<Farm>::new();
        let log = event_log(&repo);
        repo.create(farm("F001", "a"));
        repo.create(farm("F002", "b"));
        repo.create(farm("F003", "c"));

        assert!(repo.delete("F002"));
        let after_first = repo.list();
        assert!(!repo.delete("F002"));

        assert_eq!(repo.list(), after_first);
        assert_eq!(repo.total(), 2);
        // index stays consistent after the shift
        assert_eq!(repo.find("F003").unwrap().name, "c");
        assert_eq!(
            *log.lock().unwrap(),
            vec!["CREAR", "CREAR", "CREAR", "ELIMINAR"]
        );
    }

    #[test]
    fn list_is_an_independent_copy() {
        let repo = InMemoryRepository::<Farm>::new();
        repo.create(farm("F001", "a"));

        let mut copy = repo.list();
        copy[0].name = "changed".to_string();
        copy.clear();

        assert_eq!(repo.total(), 1);
        assert_eq!(repo.find("F001").unwrap().name, "a");
    }

    #[test]
    fn next_id_follows_highest_code() {
        let repo = InMemoryRepository::<Farm>::new();
        assert_eq!(repo.next_id(), "F001");

        repo.create(farm("F002", "a"));
        repo.create(farm("Fxx", "malformed"));
        assert_eq!(repo.next_id(), "F003");
    }

    #[test]
    fn observers_may_query_the_repository_while_notified() {
        let repo = Arc::new(InMemoryRepository::<Farm>::new());
        let seen = Arc::new(Mutex::new(Vec::new()));

        let observer: Arc<dyn Observer> = {
            let repo = Arc::downgrade(&repo);
            let seen = Arc::clone(&seen);
            Arc::new(move |_event: ChangeEvent| {
                if let Some(repo) = repo.upgrade() {
                    seen.lock().unwrap().push(repo.total());
                }
            })
        };
        repo.subscribe(observer);

        repo.create(farm("F001", "a"));
        repo.create(farm("F002", "b"));
        repo.delete("F001");

        assert_eq!(*seen.lock().unwrap(), vec![1, 2, 1]);
    }

    #[test]
    fn modify_notifies_only_when_applied() {
        let repo = InMemoryRepository::<Farm>::new();
        let log = event_log(&repo);
        repo.create(farm("F001", "a"));

        assert!(repo.modify("F001", ChangeEvent::Updated, |f| {
            f.total_area = 99.0;
            true
        }));
        assert!(!repo.modify("F001", ChangeEvent::Updated, |_| false));
        assert!(!repo.modify("F404", ChangeEvent::Updated, |_| true));

        assert_eq!(repo.find("F001").unwrap().total_area, 99.0);
        assert_eq!(*log.lock().unwrap(), vec!["CREAR", "ACTUALIZAR"]);
    }

    #[test]
    fn validated_paths_report_reasons() {
        let repo = InMemoryRepository::<Farm>::new();

        let err = repo.create_validated(Farm::new("F001")).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(repo.total(), 0);

        repo.create_validated(farm("F001", "a")).unwrap();
        assert_eq!(
            repo.create_validated(farm("F001", "b")),
            Err(DomainError::duplicate("F001"))
        );
        assert_eq!(
            repo.update_validated("F404", farm("F404", "x")),
            Err(DomainError::not_found("F404"))
        );
        repo.update_validated("F001", farm("F001", "renamed")).unwrap();
        assert_eq!(repo.find("F001").unwrap().name, "renamed");
    }

    #[test]
    fn fold_visits_records_in_order() {
        let repo = InMemoryRepository::from_records(vec![farm("F001", "a"), farm("F002", "b")]);
        let names = repo.fold(String::new(), |mut acc, f| {
            acc.push_str(&f.name);
            acc
        });
        assert_eq!(names, "ab");
        assert_eq!(repo.sum_by(|f| f.total_area), 20.0);
    }

    #[test]
    fn from_records_skips_duplicates_without_notifying() {
        let repo = InMemoryRepository::from_records(vec![
            farm("F001", "a"),
            farm("F001", "dup"),
            farm("F002", "b"),
        ]);
        assert_eq!(repo.total(), 2);
        assert_eq!(repo.find("F001").unwrap().name, "a");
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 128,
                ..ProptestConfig::default()
            })]

            /// Property: ids handed out by next_id strictly increase across creates.
            #[test]
            fn next_id_is_monotonic(seeded in prop::collection::vec(0u32..500, 0..10), creates in 1usize..30) {
                let repo = InMemoryRepository::<Farm>::new();
                for n in &seeded {
                    repo.create(farm(&format!("F{n:03}"), "seed"));
                }

                let mut last: Option<u32> = None;
                for _ in 0..creates {
                    let id = repo.next_id();
                    let suffix = Farm::SEQUENCE.suffix_of(&id);
                    if let Some(previous) = last {
                        prop_assert!(suffix > previous);
                    }
                    for n in &seeded {
                        prop_assert!(suffix > *n);
                    }
                    prop_assert!(repo.create(farm(&id, "generated")));
                    last = Some(suffix);
                }
            }
        }
    }
}
