//! Category filters for the job list and the course list.
//!
//! Both lists use the same [`FilterGroup`]; only the card rule differs.
//! Buttons are assigned to exactly one list before wiring, so a page that
//! carries both lists never has one button driving both groups.

use crate::dom::{Marked, Tree};
use crate::settings::FilterSettings;

pub const ALL: &str = "all";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Jobs,
    Courses,
}

impl ListKind {
    /// Whether `card` stays visible under `filter`.
    pub fn shows<E: Marked>(self, filter: &str, card: &E) -> bool {
        match self {
            ListKind::Jobs => job_visible(filter, card.attr("data-location").as_deref()),
            ListKind::Courses => course_visible(
                filter,
                card.attr("data-type").as_deref(),
                card.attr("data-level").as_deref(),
            ),
        }
    }
}

pub fn job_visible(filter: &str, location: Option<&str>) -> bool {
    filter == ALL || location == Some(filter)
}

pub fn course_visible(filter: &str, kind: Option<&str>, level: Option<&str>) -> bool {
    match filter {
        ALL => true,
        "free" | "paid" => kind == Some(filter),
        "beginner" | "intermediate" => level == Some(filter),
        _ => false,
    }
}

/// Which list a filter button drives: an explicit target wins, otherwise the
/// only list inside the button's nearest list-bearing ancestor. Ambiguous
/// buttons belong to no list.
pub fn owning_list<'a>(explicit: Option<&'a str>, enclosing: &[&'a str]) -> Option<&'a str> {
    if let Some(id) = explicit {
        return Some(id);
    }
    match enclosing {
        [only] => Some(*only),
        _ => None,
    }
}

/// One mutually exclusive set of buttons and the cards it filters.
pub struct FilterGroup<E> {
    kind: ListKind,
    buttons: Vec<E>,
    cards: Vec<E>,
    value_attr: String,
    selected_class: String,
    hidden_class: String,
}

impl<E: Marked> FilterGroup<E> {
    /// `None` when either side is empty: such a group is never wired.
    pub fn new(kind: ListKind, buttons: Vec<E>, cards: Vec<E>, settings: &FilterSettings) -> Option<Self> {
        if buttons.is_empty() || cards.is_empty() {
            return None;
        }
        Some(Self {
            kind,
            buttons,
            cards,
            value_attr: settings.value_attr.clone(),
            selected_class: settings.selected_class.clone(),
            hidden_class: settings.hidden_class.clone(),
        })
    }

    pub fn buttons(&self) -> &[E] {
        &self.buttons
    }

    /// Select button `index` and recompute every card.
    pub fn select(&self, index: usize) {
        let Some(button) = self.buttons.get(index) else {
            return;
        };
        for b in &self.buttons {
            b.set_class(&self.selected_class, false);
        }
        button.set_class(&self.selected_class, true);

        let filter = button.attr(&self.value_attr).unwrap_or_default();
        for card in &self.cards {
            card.set_class(&self.hidden_class, !self.kind.shows(&filter, card));
        }
    }

    #[cfg(test)]
    pub fn visible(&self) -> Vec<bool> {
        self.cards
            .iter()
            .map(|c| !c.has_class(&self.hidden_class))
            .collect()
    }

    #[cfg(test)]
    pub fn selected(&self) -> Vec<usize> {
        self.buttons
            .iter()
            .enumerate()
            .filter(|(_, b)| b.has_class(&self.selected_class))
            .map(|(i, _)| i)
            .collect()
    }
}

/// Split filter buttons between the job list and the course list.
///
/// `lists` pairs each list id found on the page with its container. A button
/// that resolves to neither list is dropped.
pub fn partition_buttons<E: Tree + Marked>(
    buttons: Vec<E>,
    lists: &[(&str, E)],
    settings: &FilterSettings,
) -> (Vec<E>, Vec<E>) {
    let jobs_id = settings.jobs.list_id.as_str();
    let courses_id = settings.courses.list_id.as_str();
    let mut jobs = Vec::new();
    let mut courses = Vec::new();

    for button in buttons {
        let explicit = button.closest_attr(&settings.target_attr);

        let mut enclosing: Vec<&str> = Vec::new();
        let mut ancestor = button.parent();
        while let Some(el) = ancestor {
            enclosing = lists
                .iter()
                .filter(|(_, list)| el.contains(list))
                .map(|(id, _)| *id)
                .collect();
            if !enclosing.is_empty() {
                break;
            }
            ancestor = el.parent();
        }

        match owning_list(explicit.as_deref(), &enclosing) {
            Some(id) if id == jobs_id => jobs.push(button),
            Some(id) if id == courses_id => courses.push(button),
            _ => {}
        }
    }

    (jobs, courses)
}

#[cfg(target_arch = "wasm32")]
fn wire_group(group: FilterGroup<web_sys::Element>) -> crate::listen::Wiring {
    use std::rc::Rc;

    use crate::listen::{Listener, Wiring};

    let group = Rc::new(group);
    let mut wiring = Wiring::new();
    for (i, button) in group.buttons().iter().enumerate() {
        let group = group.clone();
        wiring.push(Listener::new(button, "click", move |_| group.select(i)));
    }
    wiring
}

/// Wire the job and course groups independently. Either may be `None`.
#[cfg(target_arch = "wasm32")]
pub fn wire(
    root: &web_sys::Element,
    settings: &FilterSettings,
) -> (Option<crate::listen::Wiring>, Option<crate::listen::Wiring>) {
    use crate::dom::{select, select_all};

    let lists: Vec<(&str, web_sys::Element)> = [&settings.jobs, &settings.courses]
        .into_iter()
        .filter_map(|list| {
            let id = list.list_id.as_str();
            select(root, &format!("#{id}")).map(|el| (id, el))
        })
        .collect();
    let (job_buttons, course_buttons) =
        partition_buttons(select_all(root, &settings.button_selector), &lists, settings);

    let jobs = FilterGroup::new(
        ListKind::Jobs,
        job_buttons,
        select_all(root, &settings.jobs.cards_selector()),
        settings,
    )
    .map(wire_group);
    let courses = FilterGroup::new(
        ListKind::Courses,
        course_buttons,
        select_all(root, &settings.courses.cards_selector()),
        settings,
    )
    .map(wire_group);

    (jobs, courses)
}
