/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Event registration and synchronous dispatch.

use dom::Document;
use rustc_hash::FxHashMap;
use strum::Display;

/// The event types the bridge dispatches.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum EventType {
    Click,
    Input,
    Change,
}

/// One event aimed at an element by id.
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    pub target_id: String,
    pub event_type: EventType,
}

/// The outcome of a dispatch. Dispatch itself never fails; a miss is
/// reported in the message.
#[derive(Clone, Debug, PartialEq)]
pub struct DispatchResult {
    pub ok: bool,
    pub message: String,
}

type Handler = Box<dyn FnMut(&mut Document, &Event)>;

/// Handlers keyed by `(element id, event type)`, kept in registration
/// order. The registry holds handlers by value and knows elements only by
/// their id; it never references document nodes.
#[derive(Default)]
pub struct EventRegistry {
    handlers: FxHashMap<(String, EventType), Vec<Handler>>,
}

impl EventRegistry {
    pub fn new() -> EventRegistry {
        EventRegistry {
            handlers: FxHashMap::default(),
        }
    }

    /// Register a handler. Handlers for one key run in registration order.
    pub fn add_listener<F>(&mut self, element_id: &str, event_type: EventType, handler: F)
    where
        F: FnMut(&mut Document, &Event) + 'static,
    {
        self.handlers
            .entry((element_id.to_owned(), event_type))
            .or_default()
            .push(Box::new(handler));
    }

    /// How many handlers are registered for a key.
    pub fn listener_count(&self, element_id: &str, event_type: EventType) -> usize {
        self.handlers
            .get(&(element_id.to_owned(), event_type))
            .map_or(0, Vec::len)
    }

    /// Invoke every matching handler with the document and the event.
    /// Handlers may mutate the document; they must not re-enter the
    /// pipeline's `rerender`.
    pub fn dispatch(&mut self, dom: &mut Document, event: &Event) -> DispatchResult {
        let key = (event.target_id.clone(), event.event_type);
        match self.handlers.get_mut(&key) {
            Some(handlers) if !handlers.is_empty() => {
                for handler in handlers.iter_mut() {
                    handler(dom, event);
                }
                DispatchResult {
                    ok: true,
                    message: format!("dispatched {} handler(s)", handlers.len()),
                }
            },
            _ => DispatchResult {
                ok: true,
                message: "No handler for event".to_owned(),
            },
        }
    }
}
