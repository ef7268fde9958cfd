//! Team grid "gather → spread" reveal.
//!
//! One-shot: the grid spreads the first time the team section is seen
//! enough, and the observer is released at that moment.

use crate::dom::Marked;
use crate::settings::TeamSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealState {
    Pending,
    Triggered,
}

/// Outcome of feeding one intersection notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Nothing to do (not visible enough, or already triggered).
    Stay,
    /// Just spread; the caller must stop observing.
    Fire,
}

pub struct TeamReveal<E> {
    grid: E,
    spread_class: String,
    threshold: f64,
    state: RevealState,
}

impl<E: Marked> TeamReveal<E> {
    pub fn new(grid: E, settings: &TeamSettings) -> Self {
        Self {
            grid,
            spread_class: settings.spread_class.clone(),
            threshold: settings.threshold,
            state: RevealState::Pending,
        }
    }

    pub fn on_intersection(&mut self, is_intersecting: bool, ratio: f64) -> Transition {
        match self.state {
            RevealState::Triggered => Transition::Stay,
            RevealState::Pending if is_intersecting && ratio >= self.threshold => {
                self.grid.set_class(&self.spread_class, true);
                self.state = RevealState::Triggered;
                Transition::Fire
            }
            RevealState::Pending => Transition::Stay,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> RevealState {
        self.state
    }
}

#[cfg(target_arch = "wasm32")]
pub fn wire(root: &web_sys::Element, settings: &TeamSettings) -> Option<crate::listen::Wiring> {
    use std::cell::RefCell;

    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::{JsCast, JsValue};
    use web_sys::{IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

    use crate::dom::select;
    use crate::listen::Wiring;

    let section = select(root, &settings.section_selector)?;
    let grid = select(root, &settings.grid_selector)?;
    let reveal = RefCell::new(TeamReveal::new(grid, settings));

    let callback = Closure::wrap(Box::new(
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let entry = match entry.dyn_into::<IntersectionObserverEntry>() {
                    Ok(e) => e,
                    Err(_) => continue,
                };
                let fired = reveal
                    .borrow_mut()
                    .on_intersection(entry.is_intersecting(), entry.intersection_ratio());
                if fired == Transition::Fire {
                    observer.unobserve(&entry.target());
                }
            }
        },
    )
        as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(settings.threshold));
    options.set_root_margin(&settings.root_margin());
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options).ok()?;
    observer.observe(&section);

    let mut wiring = Wiring::new();
    wiring.hold_observer(observer, callback);
    Some(wiring)
}
