use crate::error::EventBusError;
use crate::subscription::Subscription;
use fxhash::FxHashMap;
use parking_lot::RwLock;
use std::any::{Any, TypeId};
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{trace, warn};

/// Marker trait for types that can be published on the [`EventBus`].
///
/// Any type that is `Send + Sync + 'static` automatically implements this trait.
pub trait Event: Any + Send + Sync + 'static {}
impl<T: Any + Send + Sync + 'static> Event for T {}

/// Erased handler slot. The typed callback is captured behind a uniform
/// signature; the registry never sees the concrete event type.
type ErasedHandler = dyn Fn(&dyn Any) + Send + Sync;

struct HandlerRecord {
    id: u64,
    type_id: TypeId,
    type_name: &'static str,
    handler: Arc<ErasedHandler>,
}

impl std::fmt::Debug for HandlerRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerRecord")
            .field("id", &self.id)
            .field("event", &self.type_name)
            .finish_non_exhaustive()
    }
}

/// Shared registry state. Owned by every clone of the bus; subscriptions hold
/// it weakly so an outstanding handle never keeps handlers alive.
#[derive(Debug, Default)]
pub(crate) struct Registry {
    channels: RwLock<FxHashMap<String, Vec<HandlerRecord>>>,
    next_id: AtomicU64,
}

impl Registry {
    /// Removes the record with `id` from `channel`. Returns whether a record
    /// was actually erased; a second call for the same id is a no-op.
    pub(crate) fn remove(&self, channel: &str, id: u64) -> bool {
        let mut channels = self.channels.write();
        let Some(records) = channels.get_mut(channel) else {
            return false;
        };
        let Some(index) = records.iter().position(|record| record.id == id) else {
            return false;
        };
        records.remove(index);
        if records.is_empty() {
            channels.remove(channel);
        }
        true
    }

    /// Whether a record with `id` is still registered on `channel`.
    pub(crate) fn contains(&self, channel: &str, id: u64) -> bool {
        self.channels
            .read()
            .get(channel)
            .is_some_and(|records| records.iter().any(|record| record.id == id))
    }
}

/// A thread-safe, channel-addressed event bus.
///
/// Channels are arbitrary string keys; each holds an insertion-ordered list
/// of typed handlers. Cloning the bus yields another handle to the same
/// registry; dropping the last clone tears every remaining handler down.
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    registry: Arc<Registry>,
}

impl EventBus {
    /// Creates a new, empty `EventBus`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` for events of type `T` published on `channel` and
    /// returns the [`Subscription`] that owns the registration.
    ///
    /// Handlers on one channel are invoked in registration order. Multiple
    /// subscriptions to the same channel, even with different event types,
    /// are independent and additive. Registration itself cannot fail.
    ///
    /// # Examples
    /// ```rust
    /// use herald_event_bus::EventBus;
    ///
    /// #[derive(Debug)]
    /// struct Ping(u64);
    ///
    /// let bus = EventBus::new();
    /// let subscription = bus.subscribe("ping", |event: &Ping| {
    ///     assert_eq!(event.0, 7);
    /// });
    /// assert!(subscription.is_active());
    /// ```
    pub fn subscribe<T, F>(&self, channel: impl Into<String>, handler: F) -> Subscription
    where
        T: Event,
        F: Fn(&T) + Send + Sync + 'static,
    {
        let channel = channel.into();
        let id = self.registry.next_id.fetch_add(1, Ordering::Relaxed);

        // Adapter restores the concrete type behind the erasure boundary.
        // Dispatch already filters by `TypeId`; the checked downcast is the
        // second guard that makes a wrong-typed invocation impossible.
        let erased: Arc<ErasedHandler> = Arc::new(move |event: &dyn Any| {
            if let Some(event) = event.downcast_ref::<T>() {
                handler(event);
            }
        });

        let record = HandlerRecord {
            id,
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            handler: erased,
        };

        {
            let mut channels = self.registry.channels.write();
            channels.entry(channel.clone()).or_default().push(record);
        }

        trace!(channel = %channel, id, event = std::any::type_name::<T>(), "Handler registered");

        Subscription::new(Arc::downgrade(&self.registry), channel, id)
    }

    /// Publishes `event` to every compatible handler registered on `channel`,
    /// synchronously on the calling thread, in registration order.
    ///
    /// The set of handlers is snapshotted before the first invocation, so a
    /// handler that subscribes during dispatch is not invoked for this
    /// publish, and one that unsubscribes mid-dispatch may still run once
    /// more. Handlers run outside the registry lock.
    ///
    /// Returns the number of handlers invoked. A channel with no
    /// registrations yields `Ok(0)`.
    ///
    /// # Errors
    /// Returns [`EventBusError::TypeMismatch`] if the channel has handlers
    /// but none was registered for `T`, and [`EventBusError::HandlerPanic`]
    /// if any handler panicked; the remaining handlers still ran.
    ///
    /// # Examples
    /// ```rust
    /// use herald_event_bus::{EventBus, EventBusError};
    ///
    /// #[derive(Debug)]
    /// struct Tick(u64);
    ///
    /// # fn main() -> Result<(), EventBusError> {
    /// let bus = EventBus::new();
    /// let _subscription = bus.subscribe("clock", |_: &Tick| {});
    /// assert_eq!(bus.publish("clock", Tick(1))?, 1);
    /// # Ok(())
    /// # }
    /// ```
    pub fn publish<T: Event>(&self, channel: &str, event: T) -> Result<usize, EventBusError> {
        let (matched, mismatched, expected) = {
            let channels = self.registry.channels.read();
            let Some(records) = channels.get(channel) else {
                trace!(
                    channel,
                    event = std::any::type_name::<T>(),
                    "Event dropped: no subscribers"
                );
                return Ok(0);
            };

            let mut matched = Vec::with_capacity(records.len());
            let mut mismatched = 0usize;
            let mut expected: Option<&'static str> = None;
            for record in records {
                if record.type_id == TypeId::of::<T>() {
                    matched.push(Arc::clone(&record.handler));
                } else {
                    mismatched += 1;
                    expected.get_or_insert(record.type_name);
                }
            }
            (matched, mismatched, expected)
        };

        if matched.is_empty() && mismatched > 0 {
            return Err(EventBusError::TypeMismatch {
                message: format!(
                    "published {} but handlers expect {}",
                    std::any::type_name::<T>(),
                    expected.unwrap_or("a different event type"),
                )
                .into(),
                context: Some(channel.to_owned().into()),
            });
        }
        if mismatched > 0 {
            warn!(
                channel,
                mismatched,
                event = std::any::type_name::<T>(),
                "Skipping handlers registered for a different event type"
            );
        }

        let total = matched.len();
        let mut panics: Vec<String> = Vec::new();
        for handler in &matched {
            let handler: &ErasedHandler = handler.as_ref();
            if let Err(payload) = catch_unwind(AssertUnwindSafe(|| handler(&event))) {
                panics.push(panic_message(payload.as_ref()));
            }
        }

        if panics.is_empty() {
            trace!(channel, count = total, event = std::any::type_name::<T>(), "Event dispatched");
            return Ok(total);
        }

        warn!(
            channel,
            failed = panics.len(),
            total,
            event = std::any::type_name::<T>(),
            "Handlers panicked during dispatch"
        );
        Err(EventBusError::HandlerPanic {
            message: format!("{} of {total} handlers panicked (first: {})", panics.len(), panics[0])
                .into(),
            context: Some(channel.to_owned().into()),
        })
    }

    /// Number of handlers currently registered on `channel`.
    #[must_use]
    pub fn handler_count(&self, channel: &str) -> usize {
        self.registry.channels.read().get(channel).map_or(0, Vec::len)
    }

    /// Drops every remaining handler record while the bus stays usable.
    ///
    /// Outstanding [`Subscription`]s become inert no-ops on their next use.
    /// Returns the number of handler records that were removed.
    #[must_use]
    pub fn shutdown(&self) -> usize {
        let mut channels = self.registry.channels.write();
        let count = channels.values().map(Vec::len).sum();
        channels.clear();
        count
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "opaque panic payload".to_owned()
    }
}
