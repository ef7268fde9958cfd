//! The slice of element behavior the page logic needs.
//!
//! Every behavior works on `impl Marked` so the same code drives real
//! `web_sys::Element`s in the browser and [`fake::FakeElement`]s in tests.

/// An element whose classes, attributes and text can be read and flipped.
pub trait Marked {
    fn has_class(&self, class: &str) -> bool;
    fn set_class(&self, class: &str, on: bool);
    fn attr(&self, name: &str) -> Option<String>;
    fn set_text(&self, text: &str);
}

/// Just enough tree structure to decide which container owns an element.
pub trait Tree: Sized + Clone {
    fn parent(&self) -> Option<Self>;
    /// Inclusive: an element contains itself.
    fn contains(&self, other: &Self) -> bool;

    /// The element or its nearest ancestor carrying `attr`, and that value.
    fn closest_attr(&self, attr: &str) -> Option<String>
    where
        Self: Marked,
    {
        let mut node = Some(self.clone());
        while let Some(el) = node {
            if let Some(value) = el.attr(attr) {
                return Some(value);
            }
            node = el.parent();
        }
        None
    }
}

#[cfg(target_arch = "wasm32")]
impl Marked for web_sys::Element {
    fn has_class(&self, class: &str) -> bool {
        self.class_list().contains(class)
    }

    fn set_class(&self, class: &str, on: bool) {
        self.class_list().toggle_with_force(class, on).ok();
    }

    fn attr(&self, name: &str) -> Option<String> {
        self.get_attribute(name)
    }

    fn set_text(&self, text: &str) {
        self.set_text_content(Some(text));
    }
}

#[cfg(target_arch = "wasm32")]
impl Tree for web_sys::Element {
    fn parent(&self) -> Option<Self> {
        self.parent_element()
    }

    fn contains(&self, other: &Self) -> bool {
        let node: &web_sys::Node = other;
        web_sys::Node::contains(self, Some(node))
    }
}

/// `querySelectorAll` collected into owned elements. Invalid selectors
/// yield an empty list.
#[cfg(target_arch = "wasm32")]
pub fn select_all(root: &web_sys::Element, selector: &str) -> Vec<web_sys::Element> {
    use wasm_bindgen::JsCast;

    let list = match root.query_selector_all(selector) {
        Ok(l) => l,
        Err(_) => return Vec::new(),
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
        .collect()
}

/// `querySelector` that treats an invalid selector like a miss.
#[cfg(target_arch = "wasm32")]
pub fn select(root: &web_sys::Element, selector: &str) -> Option<web_sys::Element> {
    root.query_selector(selector).ok()?
}
