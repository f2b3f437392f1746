use std::fmt;
use std::sync::Arc;
use tokio::sync::Mutex; // Use tokio's Mutex

use crate::event::{EventId, EventResult, LifecycleEvent};

/// Synchronous handler invoked for each matching event
pub type EventHandler = Box<dyn Fn(&LifecycleEvent) -> EventResult + Send + Sync>;

//--------------------------------------------------
// EventDispatcher (Internal, wrapped by SharedEventDispatcher)
//--------------------------------------------------

/// Event dispatcher holding handlers in registration order
pub struct EventDispatcher {
    // `None` filter means the handler sees every event
    handlers: Vec<(EventId, Option<&'static str>, EventHandler)>,
    next_handler_id: EventId,
}

impl fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventDispatcher")
         .field("handlers_count", &self.handlers.len())
         .field("next_handler_id", &self.next_handler_id)
         .finish()
    }
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self { handlers: Vec::new(), next_handler_id: 1 }
    }

    /// Register a handler for events with the given name
    pub fn register_handler(&mut self, event_name: &'static str, handler: EventHandler) -> EventId {
        let id = self.next_handler_id; self.next_handler_id += 1;
        self.handlers.push((id, Some(event_name), handler));
        id
    }

    /// Register a handler that receives every event
    pub fn register_global_handler(&mut self, handler: EventHandler) -> EventId {
        let id = self.next_handler_id; self.next_handler_id += 1;
        self.handlers.push((id, None, handler));
        id
    }

    pub fn unregister_handler(&mut self, id: EventId) -> bool {
        let len_before = self.handlers.len();
        self.handlers.retain(|(h_id, _, _)| *h_id != id);
        self.handlers.len() < len_before
    }

    /// Deliver `event` to matching handlers until one returns `Stop`
    pub fn dispatch_internal(&self, event: &LifecycleEvent) -> EventResult {
        for (_, filter, handler) in &self.handlers {
            if filter.is_some_and(|name| name != event.name()) { continue; }
            if handler(event) == EventResult::Stop { return EventResult::Stop; }
        }
        EventResult::Continue
    }

    pub fn handler_count(&self) -> usize { self.handlers.len() }
}

impl Default for EventDispatcher { fn default() -> Self { Self::new() } }

//--------------------------------------------------
// SharedEventDispatcher (Public API)
//--------------------------------------------------

/// Thread-safe shared event dispatcher using Tokio Mutex
#[derive(Clone)]
pub struct SharedEventDispatcher {
    dispatcher: Arc<Mutex<EventDispatcher>>
}

impl fmt::Debug for SharedEventDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedEventDispatcher").finish_non_exhaustive()
    }
}

impl SharedEventDispatcher {
    pub fn new() -> Self { Self { dispatcher: Arc::new(Mutex::new(EventDispatcher::new())) } }

    pub async fn dispatch(&self, event: &LifecycleEvent) -> EventResult {
        let dispatcher = self.dispatcher.lock().await;
        dispatcher.dispatch_internal(event)
    }

    pub async fn register_handler<F>(&self, event_name: &'static str, handler: F) -> EventId
    where F: Fn(&LifecycleEvent) -> EventResult + Send + Sync + 'static {
        let mut dispatcher = self.dispatcher.lock().await;
        dispatcher.register_handler(event_name, Box::new(handler))
    }

    pub async fn register_global_handler<F>(&self, handler: F) -> EventId
    where F: Fn(&LifecycleEvent) -> EventResult + Send + Sync + 'static {
        let mut dispatcher = self.dispatcher.lock().await;
        dispatcher.register_global_handler(Box::new(handler))
    }

    pub async fn unregister_handler(&self, id: EventId) -> bool {
        let mut dispatcher = self.dispatcher.lock().await;
        dispatcher.unregister_handler(id)
    }
}

impl Default for SharedEventDispatcher { fn default() -> Self { Self::new() } }

/// Create a new event dispatcher instance
pub fn create_dispatcher() -> SharedEventDispatcher { SharedEventDispatcher::new() }
