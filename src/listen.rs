//! Event subscriptions that unregister themselves when dropped.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{AddEventListenerOptions, Event, EventTarget, IntersectionObserver};

/// One `addEventListener` registration. Dropping it removes the listener.
pub struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    pub fn new(
        target: &EventTarget,
        event: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Option<Self> {
        Self::register(target, event, Box::new(handler), None)
    }

    /// Same as [`Listener::new`] but never blocks the native gesture.
    pub fn passive(
        target: &EventTarget,
        event: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Option<Self> {
        let options = AddEventListenerOptions::new();
        options.set_passive(true);
        Self::register(target, event, Box::new(handler), Some(&options))
    }

    fn register(
        target: &EventTarget,
        event: &'static str,
        handler: Box<dyn FnMut(Event)>,
        options: Option<&AddEventListenerOptions>,
    ) -> Option<Self> {
        let callback = Closure::wrap(handler);
        let function: &js_sys::Function = callback.as_ref().unchecked_ref();
        let added = match options {
            Some(options) => target
                .add_event_listener_with_callback_and_add_event_listener_options(
                    event, function, options,
                ),
            None => target.add_event_listener_with_callback(event, function),
        };
        added.ok()?;
        Some(Self {
            target: target.clone(),
            event,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        self.target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref())
            .ok();
    }
}

/// Teardown handle for one behavior: its listeners plus, for the team
/// reveal, the observer. Dropping it unwires the behavior.
#[derive(Default)]
pub struct Wiring {
    listeners: Vec<Listener>,
    observer: Option<(IntersectionObserver, Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>)>,
}

impl Wiring {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, listener: Option<Listener>) {
        if let Some(l) = listener {
            self.listeners.push(l);
        }
    }

    pub fn hold_observer(
        &mut self,
        observer: IntersectionObserver,
        callback: Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>,
    ) {
        self.observer = Some((observer, callback));
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty() && self.observer.is_none()
    }
}

impl Drop for Wiring {
    fn drop(&mut self) {
        if let Some((observer, _)) = &self.observer {
            observer.disconnect();
        }
    }
}
