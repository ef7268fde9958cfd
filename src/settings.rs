//! Selectors, class names and tuning constants for every page behavior.
//!
//! Defaults describe the site's markup. A page can override any subset of
//! them with an inline JSON block (`#page-interactions-config`); fields that
//! are left out keep their defaults.

use serde::{Deserialize, Deserializer};
use thiserror::Error;

/// Id of the optional `<script type="application/json">` override block.
#[cfg(target_arch = "wasm32")]
pub const CONFIG_ELEMENT_ID: &str = "page-interactions-config";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings JSON is malformed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{field} must be {expected}, got {value}")]
    OutOfRange {
        field: &'static str,
        expected: &'static str,
        value: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub back_to_top: BackToTopSettings,
    pub nav: NavSettings,
    pub team: TeamSettings,
    pub details: DetailSettings,
    pub filters: FilterSettings,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BackToTopSettings {
    pub trigger_id: String,
    /// Scroll offset (px) above which the trigger is shown. Exclusive.
    pub threshold: f64,
    pub visible_class: String,
}

impl Default for BackToTopSettings {
    fn default() -> Self {
        Self {
            trigger_id: "back-to-top".into(),
            threshold: 400.0,
            visible_class: "visible".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct NavSettings {
    pub link_selector: String,
    pub active_class: String,
    /// File name of the home page; also the fallback for an empty path.
    pub home_page: String,
    /// Link target marked active on the home page when there is no hash.
    pub home_anchor: String,
    pub section_selector: String,
    pub default_section: String,
    /// Fixed header height added to `scrollY` during the section scan.
    pub header_offset: f64,
}

impl Default for NavSettings {
    fn default() -> Self {
        Self {
            link_selector: ".main-nav a, .footer-nav a".into(),
            active_class: "active".into(),
            home_page: "index.html".into(),
            home_anchor: "index.html#home".into(),
            section_selector: "section[id]".into(),
            default_section: "home".into(),
            header_offset: 100.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TeamSettings {
    pub section_selector: String,
    pub grid_selector: String,
    pub spread_class: String,
    /// Fraction of the section that must be visible, in `0.0..=1.0`.
    pub threshold: f64,
    /// Pixels the trigger line sits above the viewport's bottom edge.
    pub bottom_margin: f64,
}

impl Default for TeamSettings {
    fn default() -> Self {
        Self {
            section_selector: "#team".into(),
            grid_selector: ".team-grid".into(),
            spread_class: "spread".into(),
            threshold: 0.15,
            bottom_margin: 80.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DetailSettings {
    pub toggle_selector: String,
    pub card_selector: String,
    pub panel_selector: String,
    pub hidden_class: String,
    pub show_label: String,
    pub hide_label: String,
}

impl Default for DetailSettings {
    fn default() -> Self {
        Self {
            toggle_selector: ".btn-toggle".into(),
            card_selector: ".role-card".into(),
            panel_selector: ".role-details".into(),
            hidden_class: "hidden".into(),
            show_label: "View details".into(),
            hide_label: "Hide details".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FilterSettings {
    pub button_selector: String,
    pub value_attr: String,
    /// Optional attribute on a button (or an ancestor) naming the list id it drives.
    pub target_attr: String,
    pub selected_class: String,
    pub hidden_class: String,
    #[serde(deserialize_with = "jobs_over_defaults")]
    pub jobs: ListSettings,
    #[serde(deserialize_with = "courses_over_defaults")]
    pub courses: ListSettings,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            button_selector: ".filter-btn".into(),
            value_attr: "data-filter".into(),
            target_attr: "data-filter-target".into(),
            selected_class: "active".into(),
            hidden_class: "hidden".into(),
            jobs: ListSettings::jobs(),
            courses: ListSettings::courses(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListSettings {
    pub list_id: String,
    pub card_selector: String,
}

/// A partial `ListSettings` as written in the override block.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ListOverride {
    list_id: Option<String>,
    card_selector: Option<String>,
}

impl ListOverride {
    fn over(self, base: ListSettings) -> ListSettings {
        ListSettings {
            list_id: self.list_id.unwrap_or(base.list_id),
            card_selector: self.card_selector.unwrap_or(base.card_selector),
        }
    }
}

fn jobs_over_defaults<'de, D: Deserializer<'de>>(d: D) -> Result<ListSettings, D::Error> {
    Ok(ListOverride::deserialize(d)?.over(ListSettings::jobs()))
}

fn courses_over_defaults<'de, D: Deserializer<'de>>(d: D) -> Result<ListSettings, D::Error> {
    Ok(ListOverride::deserialize(d)?.over(ListSettings::courses()))
}

impl ListSettings {
    pub fn jobs() -> Self {
        Self {
            list_id: "jobList".into(),
            card_selector: ".role-card".into(),
        }
    }

    pub fn courses() -> Self {
        Self {
            list_id: "courseList".into(),
            card_selector: ".course-card".into(),
        }
    }

    /// Selector for the list's cards, e.g. `#jobList .role-card`.
    pub fn cards_selector(&self) -> String {
        format!("#{} {}", self.list_id, self.card_selector)
    }
}

impl TeamSettings {
    /// IntersectionObserver `rootMargin` pulling the bottom edge up.
    pub fn root_margin(&self) -> String {
        format!("0px 0px -{}px 0px", self.bottom_margin)
    }
}

impl Settings {
    /// Parse an override block. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), SettingsError> {
        non_negative("back_to_top.threshold", self.back_to_top.threshold)?;
        non_negative("nav.header_offset", self.nav.header_offset)?;
        non_negative("team.bottom_margin", self.team.bottom_margin)?;
        let ratio = self.team.threshold;
        if !(0.0..=1.0).contains(&ratio) {
            return Err(SettingsError::OutOfRange {
                field: "team.threshold",
                expected: "between 0 and 1",
                value: ratio,
            });
        }
        Ok(())
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), SettingsError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SettingsError::OutOfRange {
            field,
            expected: "a finite, non-negative number",
            value,
        })
    }
}

/// Read the override block from the page, falling back to defaults.
#[cfg(target_arch = "wasm32")]
pub fn load(document: &web_sys::Document) -> Settings {
    let json = match document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content())
    {
        Some(j) => j,
        None => return Settings::default(),
    };

    match Settings::from_json(&json) {
        Ok(s) => s,
        Err(e) => {
            crate::console::warn(&format!("Ignoring #{CONFIG_ELEMENT_ID}: {e}"));
            Settings::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_site_markup() {
        let s = Settings::default();
        assert_eq!(s.back_to_top.trigger_id, "back-to-top");
        assert_eq!(s.back_to_top.threshold, 400.0);
        assert_eq!(s.nav.link_selector, ".main-nav a, .footer-nav a");
        assert_eq!(s.nav.header_offset, 100.0);
        assert_eq!(s.team.threshold, 0.15);
        assert_eq!(s.details.hide_label, "Hide details");
        assert_eq!(s.filters.jobs.cards_selector(), "#jobList .role-card");
        assert_eq!(s.filters.courses.cards_selector(), "#courseList .course-card");
    }

    #[test]
    fn root_margin_uses_bottom_margin() {
        assert_eq!(TeamSettings::default().root_margin(), "0px 0px -80px 0px");
    }

    #[test]
    fn empty_object_is_all_defaults() {
        let s = Settings::from_json("{}").unwrap();
        assert_eq!(s, Settings::default());
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let s = Settings::from_json(r#"{"back_to_top": {"threshold": 250}}"#).unwrap();
        assert_eq!(s.back_to_top.threshold, 250.0);
        assert_eq!(s.back_to_top.visible_class, "visible");
        assert_eq!(s.nav, NavSettings::default());
    }

    #[test]
    fn nested_list_override() {
        let s = Settings::from_json(r#"{"filters": {"jobs": {"list_id": "roles"}}}"#).unwrap();
        assert_eq!(s.filters.jobs.list_id, "roles");
        assert_eq!(s.filters.jobs.card_selector, ".role-card");
        assert_eq!(s.filters.jobs.cards_selector(), "#roles .role-card");
        assert_eq!(s.filters.courses, ListSettings::courses());
    }

    #[test]
    fn nested_card_selector_override_keeps_list_id() {
        let s = Settings::from_json(r#"{"filters": {"courses": {"card_selector": ".course"}}}"#)
            .unwrap();
        assert_eq!(s.filters.courses.cards_selector(), "#courseList .course");
        assert_eq!(s.filters.jobs, ListSettings::jobs());
    }

    #[test]
    fn malformed_json_is_rejected() {
        let err = Settings::from_json("{not json").unwrap_err();
        assert!(matches!(err, SettingsError::Json(_)));
    }

    #[test]
    fn ratio_out_of_range_is_rejected() {
        let err = Settings::from_json(r#"{"team": {"threshold": 1.5}}"#).unwrap_err();
        match err {
            SettingsError::OutOfRange { field, .. } => assert_eq!(field, "team.threshold"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn negative_threshold_is_rejected() {
        let err = Settings::from_json(r#"{"back_to_top": {"threshold": -1}}"#).unwrap_err();
        assert!(err.to_string().contains("back_to_top.threshold"));
    }
}
