//! "View details" toggles on role cards.
//!
//! Each toggle drives the details panel of its own card only; the panel's
//! hidden class is the whole state.

use crate::dom::Marked;
use crate::settings::DetailSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Hidden,
    Shown,
}

pub struct DetailToggle<E> {
    toggle: E,
    panel: E,
}

impl<E: Marked> DetailToggle<E> {
    pub fn new(toggle: E, panel: E) -> Self {
        Self { toggle, panel }
    }

    pub fn panel_state(&self, settings: &DetailSettings) -> Panel {
        if self.panel.has_class(&settings.hidden_class) {
            Panel::Hidden
        } else {
            Panel::Shown
        }
    }

    /// Flip the panel and relabel the toggle. Returns the new panel state.
    pub fn click(&self, settings: &DetailSettings) -> Panel {
        let next = match self.panel_state(settings) {
            Panel::Hidden => Panel::Shown,
            Panel::Shown => Panel::Hidden,
        };
        self.panel
            .set_class(&settings.hidden_class, next == Panel::Hidden);
        self.toggle.set_text(label_for(next, settings));
        next
    }
}

/// The label describing what the next click will do.
pub fn label_for(panel: Panel, settings: &DetailSettings) -> &str {
    match panel {
        Panel::Shown => &settings.hide_label,
        Panel::Hidden => &settings.show_label,
    }
}

#[cfg(target_arch = "wasm32")]
pub fn wire(root: &web_sys::Element, settings: &DetailSettings) -> Option<crate::listen::Wiring> {
    use std::rc::Rc;

    use crate::dom::{select, select_all};
    use crate::listen::{Listener, Wiring};

    let settings = Rc::new(settings.clone());
    let mut wiring = Wiring::new();

    for toggle in select_all(root, &settings.toggle_selector) {
        let card = match toggle.closest(&settings.card_selector) {
            Ok(Some(c)) => c,
            _ => continue,
        };
        let panel = match select(&card, &settings.panel_selector) {
            Some(p) => p,
            None => continue,
        };
        let control = DetailToggle::new(toggle.clone(), panel);
        let settings = settings.clone();
        wiring.push(Listener::new(&toggle, "click", move |_| {
            control.click(&settings);
        }));
    }

    if wiring.is_empty() {
        None
    } else {
        Some(wiring)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::fake::FakeElement;

    fn card() -> DetailToggle<FakeElement> {
        DetailToggle::new(
            FakeElement::new().with_text("View details"),
            FakeElement::new().with_class("hidden"),
        )
    }

    #[test]
    fn first_click_shows_panel() {
        let s = DetailSettings::default();
        let a = card();
        assert_eq!(a.click(&s), Panel::Shown);
        assert!(!a.panel.has_class("hidden"));
        assert_eq!(a.toggle.text(), "Hide details");
    }

    #[test]
    fn second_click_hides_again() {
        let s = DetailSettings::default();
        let a = card();
        a.click(&s);
        assert_eq!(a.click(&s), Panel::Hidden);
        assert!(a.panel.has_class("hidden"));
        assert_eq!(a.toggle.text(), "View details");
    }

    #[test]
    fn cards_are_independent() {
        let s = DetailSettings::default();
        let a = card();
        let b = card();
        a.click(&s);
        assert_eq!(a.panel_state(&s), Panel::Shown);
        assert_eq!(b.panel_state(&s), Panel::Hidden);
        assert_eq!(b.toggle.text(), "View details");
    }

    #[test]
    fn panel_initially_open_closes_on_click() {
        let s = DetailSettings::default();
        let c = DetailToggle::new(FakeElement::new(), FakeElement::new());
        assert_eq!(c.click(&s), Panel::Hidden);
        assert_eq!(c.toggle.text(), "View details");
    }

    #[test]
    fn custom_labels() {
        let s = DetailSettings {
            show_label: "More".into(),
            hide_label: "Less".into(),
            ..Default::default()
        };
        let c = card();
        c.click(&s);
        assert_eq!(c.toggle.text(), "Less");
    }
}
