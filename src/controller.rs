//! Page interaction controller: wires every behavior against one page root.
//!
//! Behaviors are independent; a missing piece of markup only skips the
//! behavior that needs it. The returned [`Controller`] owns each
//! behavior's teardown handle.

use crate::filter::ListKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behavior {
    BackToTop,
    ActiveNav,
    TeamReveal,
    DetailToggles,
    Filter(ListKind),
}

impl Behavior {
    #[cfg(test)]
    pub const ALL: [Behavior; 6] = [
        Behavior::BackToTop,
        Behavior::ActiveNav,
        Behavior::TeamReveal,
        Behavior::DetailToggles,
        Behavior::Filter(ListKind::Jobs),
        Behavior::Filter(ListKind::Courses),
    ];

    pub fn name(self) -> &'static str {
        match self {
            Behavior::BackToTop => "back-to-top",
            Behavior::ActiveNav => "active-nav",
            Behavior::TeamReveal => "team-reveal",
            Behavior::DetailToggles => "detail-toggles",
            Behavior::Filter(ListKind::Jobs) => "job-filter",
            Behavior::Filter(ListKind::Courses) => "course-filter",
        }
    }
}

/// Which behaviors were wired at startup.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Report {
    wired: Vec<Behavior>,
    skipped: Vec<Behavior>,
}

impl Report {
    pub fn record(&mut self, behavior: Behavior, wired: bool) {
        if wired {
            self.wired.push(behavior);
        } else {
            self.skipped.push(behavior);
        }
    }

    #[cfg(test)]
    pub fn wired(&self) -> &[Behavior] {
        &self.wired
    }

    #[cfg(test)]
    pub fn skipped(&self) -> &[Behavior] {
        &self.skipped
    }

    pub fn summary(&self) -> String {
        let names = |list: &[Behavior]| {
            list.iter()
                .map(|b| b.name())
                .collect::<Vec<_>>()
                .join(", ")
        };
        if self.skipped.is_empty() {
            format!("All features ready ({} wired)", self.wired.len())
        } else {
            format!(
                "All features ready ({} wired; skipped: {})",
                self.wired.len(),
                names(&self.skipped)
            )
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub struct Controller {
    // Dropping the controller unwires everything.
    _wirings: Vec<(Behavior, crate::listen::Wiring)>,
    report: Report,
}

#[cfg(target_arch = "wasm32")]
impl Controller {
    /// Wire every behavior under `root`.
    pub fn start(
        root: &web_sys::Element,
        window: &web_sys::Window,
        settings: &crate::settings::Settings,
    ) -> Self {
        use crate::{back_to_top, details, filter, nav, reveal};

        let (jobs, courses) = filter::wire(root, &settings.filters);
        let attempts = [
            (
                Behavior::BackToTop,
                back_to_top::wire(root, window, &settings.back_to_top),
            ),
            (Behavior::ActiveNav, nav::wire(root, window, &settings.nav)),
            (Behavior::TeamReveal, reveal::wire(root, &settings.team)),
            (Behavior::DetailToggles, details::wire(root, &settings.details)),
            (Behavior::Filter(ListKind::Jobs), jobs),
            (Behavior::Filter(ListKind::Courses), courses),
        ];

        let mut report = Report::default();
        let mut wirings = Vec::new();
        for (behavior, wiring) in attempts {
            report.record(behavior, wiring.is_some());
            if let Some(w) = wiring {
                wirings.push((behavior, w));
            }
        }
        Self {
            _wirings: wirings,
            report,
        }
    }

    pub fn report(&self) -> &Report {
        &self.report
    }
}
