use crate::prelude::*;
use std::panic::{catch_unwind, AssertUnwindSafe};

pub type CallbackError = Box<dyn std::error::Error + Send + Sync>;

type Callback = Box<dyn FnMut(ConsumerId, Option<&str>, Option<&str>) -> std::result::Result<(), CallbackError>>;

/// Handle returned by [`Notifier::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(SlotKey);

/// Fans active-palette changes out to every subscriber. A subscriber that
/// errors or panics is logged and skipped; the rest still run.
#[derive(Default)]
pub struct Notifier {
    callbacks: SlotMap<Callback>,
}
impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn subscribe(
        &mut self,
        callback: impl FnMut(ConsumerId, Option<&str>, Option<&str>) -> std::result::Result<(), CallbackError> + 'static,
    ) -> Subscription {
        Subscription(self.callbacks.insert(Box::new(callback)))
    }
    /// Returns false if the subscription was already gone.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        self.callbacks.release(subscription.0).is_some()
    }
    pub fn subscribers(&self) -> usize {
        self.callbacks.len()
    }
    pub fn fire(&mut self, consumer: ConsumerId, old: Option<&str>, new: Option<&str>) {
        for (idx, callback) in self.callbacks.iter_mut() {
            match catch_unwind(AssertUnwindSafe(|| callback(consumer, old, new))) {
                Ok(Ok(())) => {}
                Ok(Err(e)) => log::warn!("palette subscriber {idx} failed for {consumer:?}: {e}"),
                Err(_) => log::warn!("palette subscriber {idx} panicked for {consumer:?}"),
            }
        }
    }
}
impl std::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("subscribers", &self.callbacks.len())
            .finish()
    }
}
