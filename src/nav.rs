//! Active-navigation highlighting.
//!
//! Two inputs decide which links carry the active class: the location
//! (page + hash), on load and on every hash change, and on the home page the
//! scroll position mapped to a section. Both paths end in
//! [`NavHighlighter::apply`], which clears every link and then sets the
//! matches, so repeating an update never changes the result.

use crate::dom::Marked;
use crate::settings::NavSettings;

/// The current page as the resolver sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// Last pathname segment, possibly empty (`/` → ``).
    pub raw_page: String,
    /// `#fragment` including the `#`, or empty.
    pub hash: String,
}

impl Location {
    pub fn new(pathname: &str, hash: &str) -> Self {
        let raw_page = pathname.rsplit('/').next().unwrap_or_default().to_string();
        Self {
            raw_page,
            hash: hash.to_string(),
        }
    }

    /// The page name used for matching; an empty path means the home page.
    pub fn page<'a>(&'a self, home_page: &'a str) -> &'a str {
        if self.raw_page.is_empty() {
            home_page
        } else {
            &self.raw_page
        }
    }

    pub fn is_root(&self) -> bool {
        self.raw_page.is_empty()
    }

    pub fn is_home(&self, home_page: &str) -> bool {
        self.page(home_page) == home_page
    }
}

/// Whether the scroll-driven section scan runs for this pathname.
pub fn tracks_sections(pathname: &str, home_page: &str) -> bool {
    pathname == "/" || pathname.ends_with(home_page)
}

/// Decide whether one link target is active for `location`.
pub fn is_active(href: &str, location: &Location, settings: &NavSettings) -> bool {
    let home = settings.home_page.as_str();
    let page = location.page(home);
    let on_home = location.is_home(home);
    let is_section_link = href.contains('#');

    // On the home page, section links are decided by the hash alone.
    if !(on_home && is_section_link) && (href == page || href.contains(page)) {
        return true;
    }

    if on_home && is_section_link {
        if href == format!("{home}{}", location.hash) && !location.hash.is_empty() {
            return true;
        }
        if location.hash.is_empty() && href == settings.home_anchor {
            return true;
        }
    }

    location.is_root() && href.starts_with(home)
}

/// Active flags for every link target, in order.
pub fn resolve(hrefs: &[String], location: &Location, settings: &NavSettings) -> Vec<bool> {
    hrefs
        .iter()
        .map(|href| is_active(href, location, settings))
        .collect()
}

/// A `section[id]` and its distance from the top of the document.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionSpan {
    pub id: String,
    pub top: f64,
}

/// The last section (document order) whose top is at or above the scan line.
pub fn section_at<'a>(
    sections: &'a [SectionSpan],
    scroll_y: f64,
    header_offset: f64,
    default_id: &'a str,
) -> &'a str {
    let line = scroll_y + header_offset;
    sections
        .iter()
        .filter(|s| s.top <= line)
        .last()
        .map(|s| s.id.as_str())
        .unwrap_or(default_id)
}

/// Active flags for links pointing at `#section_id`.
pub fn resolve_section(hrefs: &[String], section_id: &str) -> Vec<bool> {
    let anchor = format!("#{section_id}");
    hrefs.iter().map(|href| href.contains(&anchor)).collect()
}

/// Owns the nav links (main and footer) and keeps their class in sync.
pub struct NavHighlighter<E> {
    links: Vec<E>,
    settings: NavSettings,
}

impl<E: Marked> NavHighlighter<E> {
    pub fn new(links: Vec<E>, settings: &NavSettings) -> Option<Self> {
        if links.is_empty() {
            return None;
        }
        Some(Self {
            links,
            settings: settings.clone(),
        })
    }

    pub fn hrefs(&self) -> Vec<String> {
        self.links
            .iter()
            .map(|l| l.attr("href").unwrap_or_default())
            .collect()
    }

    /// Clear all, then set the flagged links.
    pub fn apply(&self, active: &[bool]) {
        let class = &self.settings.active_class;
        for link in &self.links {
            link.set_class(class, false);
        }
        for (link, &on) in self.links.iter().zip(active) {
            if on {
                link.set_class(class, true);
            }
        }
    }

    pub fn on_location(&self, location: &Location) {
        let active = resolve(&self.hrefs(), location, &self.settings);
        self.apply(&active);
    }

    pub fn on_scroll(&self, sections: &[SectionSpan], scroll_y: f64) {
        let id = section_at(
            sections,
            scroll_y,
            self.settings.header_offset,
            &self.settings.default_section,
        );
        let active = resolve_section(&self.hrefs(), id);
        self.apply(&active);
    }

    #[cfg(test)]
    pub fn active_hrefs(&self) -> Vec<String> {
        self.links
            .iter()
            .filter(|l| l.has_class(&self.settings.active_class))
            .map(|l| l.attr("href").unwrap_or_default())
            .collect()
    }
}

#[cfg(target_arch = "wasm32")]
fn current_location(window: &web_sys::Window) -> Option<(String, Location)> {
    let loc = window.location();
    let pathname = loc.pathname().ok()?;
    let hash = loc.hash().unwrap_or_default();
    let location = Location::new(&pathname, &hash);
    Some((pathname, location))
}

#[cfg(target_arch = "wasm32")]
fn section_spans(root: &web_sys::Element, selector: &str) -> Vec<SectionSpan> {
    use wasm_bindgen::JsCast;

    crate::dom::select_all(root, selector)
        .into_iter()
        .filter_map(|el| el.dyn_into::<web_sys::HtmlElement>().ok())
        .map(|el| SectionSpan {
            id: el.id(),
            top: el.offset_top() as f64,
        })
        .collect()
}

#[cfg(target_arch = "wasm32")]
pub fn wire(
    root: &web_sys::Element,
    window: &web_sys::Window,
    settings: &NavSettings,
) -> Option<crate::listen::Wiring> {
    use std::rc::Rc;

    use crate::dom::select_all;
    use crate::listen::{Listener, Wiring};

    let links = select_all(root, &settings.link_selector);
    let nav = Rc::new(NavHighlighter::new(links, settings)?);

    let (pathname, location) = current_location(window)?;
    nav.on_location(&location);

    let mut wiring = Wiring::new();
    wiring.push(Listener::new(window, "hashchange", {
        let nav = nav.clone();
        let window = window.clone();
        move |_| {
            if let Some((_, location)) = current_location(&window) {
                nav.on_location(&location);
            }
        }
    }));

    if tracks_sections(&pathname, &settings.home_page) {
        let selector = settings.section_selector.clone();
        let root = root.clone();
        let win = window.clone();
        wiring.push(Listener::passive(window, "scroll", move |_| {
            let sections = section_spans(&root, &selector);
            if sections.is_empty() {
                return;
            }
            if let Ok(y) = win.scroll_y() {
                nav.on_scroll(&sections, y);
            }
        }));
    }

    Some(wiring)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::fake::{link, FakeElement};

    fn hrefs(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn active_of(list: &[&str], location: &Location) -> Vec<String> {
        let hs = hrefs(list);
        let flags = resolve(&hs, location, &NavSettings::default());
        hs.into_iter()
            .zip(flags)
            .filter(|(_, on)| *on)
            .map(|(h, _)| h)
            .collect()
    }

    fn highlighter(list: &[&str]) -> NavHighlighter<FakeElement> {
        NavHighlighter::new(list.iter().map(|h| link(h)).collect(), &NavSettings::default())
            .unwrap()
    }

    const SITE: &[&str] = &[
        "index.html#home",
        "index.html#about",
        "index.html#team",
        "courses.html",
        "apply.html",
        "contact.html",
    ];

    // ── Location ───────────────────────────────────────────

    #[test]
    fn location_takes_last_segment() {
        let loc = Location::new("/site/apply.html", "");
        assert_eq!(loc.raw_page, "apply.html");
        assert_eq!(loc.page("index.html"), "apply.html");
        assert!(!loc.is_home("index.html"));
    }

    #[test]
    fn root_path_is_home() {
        let loc = Location::new("/", "");
        assert!(loc.is_root());
        assert_eq!(loc.page("index.html"), "index.html");
        assert!(loc.is_home("index.html"));
    }

    #[test]
    fn section_tracking_only_on_home() {
        assert!(tracks_sections("/", "index.html"));
        assert!(tracks_sections("/index.html", "index.html"));
        assert!(!tracks_sections("/apply.html", "index.html"));
        assert!(!tracks_sections("/docs/", "index.html"));
    }

    // ── resolve ────────────────────────────────────────────

    #[test]
    fn page_match_marks_only_that_page() {
        let loc = Location::new("/apply.html", "");
        assert_eq!(
            active_of(&["index.html", "apply.html", "contact.html"], &loc),
            vec!["apply.html"]
        );
    }

    #[test]
    fn partial_containment_matches() {
        // Loose match: the current page inside a longer target.
        let loc = Location::new("/courses.html", "");
        assert_eq!(
            active_of(&["courses.html?level=beginner", "apply.html"], &loc),
            vec!["courses.html?level=beginner"]
        );
    }

    #[test]
    fn home_hash_marks_that_section_only() {
        let loc = Location::new("/index.html", "#team");
        assert_eq!(active_of(SITE, &loc), vec!["index.html#team"]);
    }

    #[test]
    fn home_without_hash_marks_home_anchor() {
        let loc = Location::new("/index.html", "");
        assert_eq!(active_of(SITE, &loc), vec!["index.html#home"]);
    }

    #[test]
    fn footer_section_links_off_home_are_inactive() {
        let loc = Location::new("/contact.html", "");
        assert_eq!(active_of(SITE, &loc), vec!["contact.html"]);
    }

    #[test]
    fn site_root_marks_every_home_link() {
        let loc = Location::new("/", "");
        assert_eq!(
            active_of(SITE, &loc),
            vec!["index.html#home", "index.html#about", "index.html#team"]
        );
    }

    #[test]
    fn unknown_page_marks_nothing() {
        let loc = Location::new("/404.html", "");
        assert!(active_of(SITE, &loc).is_empty());
    }

    // ── section scan ───────────────────────────────────────

    fn sections() -> Vec<SectionSpan> {
        [("home", 0.0), ("about", 700.0), ("team", 1500.0), ("contact", 2400.0)]
            .iter()
            .map(|(id, top)| SectionSpan {
                id: id.to_string(),
                top: *top,
            })
            .collect()
    }

    #[test]
    fn section_at_picks_last_passed() {
        let s = sections();
        assert_eq!(section_at(&s, 0.0, 100.0, "home"), "home");
        assert_eq!(section_at(&s, 600.0, 100.0, "home"), "about");
        assert_eq!(section_at(&s, 1399.0, 100.0, "home"), "about");
        assert_eq!(section_at(&s, 1400.0, 100.0, "home"), "team");
        assert_eq!(section_at(&s, 5000.0, 100.0, "home"), "contact");
    }

    #[test]
    fn section_at_defaults_when_nothing_passed() {
        let s = vec![SectionSpan {
            id: "about".into(),
            top: 800.0,
        }];
        assert_eq!(section_at(&s, 0.0, 100.0, "home"), "home");
        assert_eq!(section_at(&[], 300.0, 100.0, "home"), "home");
    }

    #[test]
    fn section_at_follows_document_order_not_offset() {
        // A later section positioned higher still wins when it qualifies.
        let s = vec![
            SectionSpan { id: "about".into(), top: 500.0 },
            SectionSpan { id: "hero".into(), top: 0.0 },
        ];
        assert_eq!(section_at(&s, 600.0, 100.0, "home"), "hero");
    }

    // ── NavHighlighter ─────────────────────────────────────

    #[test]
    fn apply_clears_previous_active() {
        let nav = highlighter(SITE);
        nav.on_location(&Location::new("/index.html", "#about"));
        assert_eq!(nav.active_hrefs(), vec!["index.html#about"]);
        nav.on_location(&Location::new("/index.html", "#team"));
        assert_eq!(nav.active_hrefs(), vec!["index.html#team"]);
    }

    #[test]
    fn resolution_is_idempotent() {
        let nav = highlighter(SITE);
        let loc = Location::new("/courses.html", "");
        nav.on_location(&loc);
        let first = nav.active_hrefs();
        nav.on_location(&loc);
        assert_eq!(nav.active_hrefs(), first);
    }

    #[test]
    fn scroll_marks_about_section() {
        let nav = highlighter(SITE);
        nav.on_location(&Location::new("/index.html", ""));
        nav.on_scroll(&sections(), 650.0);
        assert_eq!(nav.active_hrefs(), vec!["index.html#about"]);
    }

    #[test]
    fn main_and_footer_links_stay_in_sync() {
        let nav = highlighter(&["index.html#team", "apply.html", "index.html#team"]);
        nav.on_scroll(&sections(), 1450.0);
        assert_eq!(nav.active_hrefs(), vec!["index.html#team", "index.html#team"]);
    }

    #[test]
    fn no_links_disables_behavior() {
        assert!(NavHighlighter::<FakeElement>::new(Vec::new(), &NavSettings::default()).is_none());
    }

    #[test]
    fn link_without_href_is_never_active() {
        let nav = NavHighlighter::new(
            vec![FakeElement::new(), link("apply.html")],
            &NavSettings::default(),
        )
        .unwrap();
        nav.on_location(&Location::new("/apply.html", ""));
        assert_eq!(nav.active_hrefs(), vec!["apply.html"]);
    }
}
