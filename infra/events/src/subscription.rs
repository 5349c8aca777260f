use crate::bus::Registry;
use std::sync::Weak;
use tracing::trace;

/// Handle to one active handler registration on an [`EventBus`](crate::EventBus).
///
/// The subscription is the only handle that can remove its handler record.
/// It is movable but deliberately not clonable: two copies would race to
/// erase the same record. Dropping the handle unregisters the handler; call
/// [`Subscription::unsubscribe`] to do so earlier.
#[must_use = "Dropping a subscription immediately unregisters its handler."]
pub struct Subscription {
    registry: Weak<Registry>,
    channel: String,
    id: u64,
}

impl Subscription {
    pub(crate) const fn new(registry: Weak<Registry>, channel: String, id: u64) -> Self {
        Self { registry, channel, id }
    }

    /// Removes the owned handler record from the registry.
    ///
    /// Idempotent: the first call erases the record and marks this handle
    /// inert; later calls, and calls made after the bus was shut down or
    /// dropped, are safe no-ops.
    pub fn unsubscribe(&mut self) {
        let registry = std::mem::replace(&mut self.registry, Weak::new());
        if let Some(registry) = registry.upgrade()
            && registry.remove(&self.channel, self.id)
        {
            trace!(channel = %self.channel, id = self.id, "Handler unregistered");
        }
    }

    /// Whether this handle still owns a registration.
    ///
    /// Returns `false` once [`Subscription::unsubscribe`] ran, or after the
    /// bus removed the record on its own (shutdown or teardown).
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.registry
            .upgrade()
            .is_some_and(|registry| registry.contains(&self.channel, self.id))
    }

    /// Channel this subscription was registered on.
    #[must_use]
    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// Unique id of the owned handler record.
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("channel", &self.channel)
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}
