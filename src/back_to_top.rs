//! "Back to top" button: shown once the page is scrolled past a threshold,
//! scrolls smoothly to the top when clicked.

use crate::dom::Marked;
use crate::settings::BackToTopSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Hidden,
    Visible,
}

/// Visible strictly above the threshold.
pub fn visibility_for(scroll_y: f64, threshold: f64) -> Visibility {
    if scroll_y > threshold {
        Visibility::Visible
    } else {
        Visibility::Hidden
    }
}

/// What a click asks the window to do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollRequest {
    pub top: f64,
    pub smooth: bool,
}

pub const SCROLL_TO_TOP: ScrollRequest = ScrollRequest {
    top: 0.0,
    smooth: true,
};

pub struct BackToTop<E> {
    trigger: E,
    threshold: f64,
    visible_class: String,
    state: Visibility,
}

impl<E: Marked> BackToTop<E> {
    pub fn new(trigger: E, settings: &BackToTopSettings) -> Self {
        let state = if trigger.has_class(&settings.visible_class) {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
        Self {
            trigger,
            threshold: settings.threshold,
            visible_class: settings.visible_class.clone(),
            state,
        }
    }

    /// Apply the visibility for the new scroll offset; returns the state.
    pub fn on_scroll(&mut self, scroll_y: f64) -> Visibility {
        let next = visibility_for(scroll_y, self.threshold);
        if next != self.state {
            self.trigger
                .set_class(&self.visible_class, next == Visibility::Visible);
            self.state = next;
        }
        self.state
    }

    pub fn on_click(&self) -> ScrollRequest {
        SCROLL_TO_TOP
    }

    #[cfg(test)]
    pub fn state(&self) -> Visibility {
        self.state
    }
}

#[cfg(target_arch = "wasm32")]
pub fn wire(
    root: &web_sys::Element,
    window: &web_sys::Window,
    settings: &BackToTopSettings,
) -> Option<crate::listen::Wiring> {
    use std::cell::RefCell;
    use std::rc::Rc;

    use web_sys::{ScrollBehavior, ScrollToOptions};

    use crate::dom::select;
    use crate::listen::{Listener, Wiring};

    let trigger = select(root, &format!("#{}", settings.trigger_id))?;
    let control = Rc::new(RefCell::new(BackToTop::new(trigger.clone(), settings)));

    let mut wiring = Wiring::new();
    wiring.push(Listener::passive(window, "scroll", {
        let control = control.clone();
        let window = window.clone();
        move |_| {
            if let Ok(y) = window.scroll_y() {
                control.borrow_mut().on_scroll(y);
            }
        }
    }));
    wiring.push(Listener::new(&trigger, "click", {
        let window = window.clone();
        move |_| {
            let request = control.borrow().on_click();
            let options = ScrollToOptions::new();
            options.set_top(request.top);
            if request.smooth {
                options.set_behavior(ScrollBehavior::Smooth);
            }
            window.scroll_to_with_scroll_to_options(&options);
        }
    }));
    Some(wiring)
}
