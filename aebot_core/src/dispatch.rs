use std::{collections::HashMap, sync::Arc, time::Duration};

use crate::{
    event::{Category, Event},
    message::Outbound,
    Identity, LocalTime, Uptime,
};

/// What a handler can see besides the event itself.
#[derive(Clone, Debug)]
pub struct Context<'a> {
    identity: &'a Identity,
    uptime: Duration,
    now: LocalTime,
}

impl<'a> Context<'a> {
    pub const fn new(identity: &'a Identity, uptime: Duration, now: LocalTime) -> Self {
        Self {
            identity,
            uptime,
            now,
        }
    }

    /// Reads the clocks at the moment an event is dispatched.
    pub fn capture(identity: &'a Identity, uptime: &Uptime) -> Self {
        Self::new(identity, uptime.elapsed(), LocalTime::now())
    }

    pub const fn identity(&self) -> &'a Identity {
        self.identity
    }

    pub const fn uptime(&self) -> Duration {
        self.uptime
    }

    pub const fn now(&self) -> &LocalTime {
        &self.now
    }
}

pub trait Handler
where
    Self: Send + Sync + 'static,
{
    fn handle(&self, event: &Event, ctx: &Context<'_>) -> Option<Outbound>;
}

impl<F> Handler for F
where
    F: Fn(&Event, &Context<'_>) -> Option<Outbound> + Send + Sync + 'static,
{
    fn handle(&self, event: &Event, ctx: &Context<'_>) -> Option<Outbound> {
        (self)(event, ctx)
    }
}

pub type SharedHandler = Arc<dyn Handler>;

/// A fixed table from event category to handler.
///
/// Built once with [`Dispatcher::builder`]; there is no way to add or remove
/// a handler afterwards.
#[derive(Clone, Default)]
pub struct Dispatcher {
    handlers: HashMap<Category, SharedHandler>,
}

impl Dispatcher {
    pub fn builder() -> DispatcherBuilder {
        DispatcherBuilder::default()
    }

    pub fn handles(&self, category: Category) -> bool {
        self.handlers.contains_key(&category)
    }

    /// Runs the handler registered for the event's category, if any.
    pub fn dispatch(&self, event: &Event, ctx: &Context<'_>) -> Option<Outbound> {
        let handler = match self.handlers.get(&event.category()) {
            Some(handler) => handler,
            None => {
                log::trace!("no handler for {:?}", event.category());
                return None;
            }
        };
        handler.handle(event, ctx)
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut categories = self.handlers.keys().collect::<Vec<_>>();
        categories.sort();
        f.debug_struct("Dispatcher")
            .field("handlers", &categories)
            .finish()
    }
}

#[derive(Default)]
pub struct DispatcherBuilder {
    handlers: HashMap<Category, SharedHandler>,
}

impl DispatcherBuilder {
    pub fn on(mut self, category: Category, handler: impl Handler) -> Self {
        if let Some(..) = self.handlers.insert(category, Arc::new(handler)) {
            log::warn!("replaced the handler for: {category:?}");
        }
        self
    }

    pub fn finish(self) -> Dispatcher {
        Dispatcher {
            handlers: self.handlers,
        }
    }
}
