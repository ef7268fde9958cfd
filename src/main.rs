// Behavior cores are driven by the browser glue; natively they only build for tests.
#[cfg(any(target_arch = "wasm32", test))]
mod back_to_top;
#[cfg(target_arch = "wasm32")]
mod console;
#[cfg(any(target_arch = "wasm32", test))]
mod controller;
#[cfg(any(target_arch = "wasm32", test))]
mod details;
#[cfg(any(target_arch = "wasm32", test))]
mod dom;
#[cfg(any(target_arch = "wasm32", test))]
mod filter;
#[cfg(target_arch = "wasm32")]
mod listen;
#[cfg(any(target_arch = "wasm32", test))]
mod nav;
#[cfg(any(target_arch = "wasm32", test))]
mod reveal;
#[cfg(any(target_arch = "wasm32", test))]
mod settings;

#[cfg(target_arch = "wasm32")]
mod web {
    use std::cell::RefCell;

    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::JsCast;

    use crate::console;
    use crate::controller::Controller;
    use crate::settings;

    thread_local! {
        /// Kept for the page's lifetime; dropping it would unwire every behavior.
        static CONTROLLER: RefCell<Option<Controller>> = const { RefCell::new(None) };
    }

    fn boot() {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };
        let Some(root) = document.document_element() else {
            return;
        };

        console::log("Hot Beans Web – Scripts initialized");
        let settings = settings::load(&document);
        let controller = Controller::start(&root, &window, &settings);
        console::log(&controller.report().summary());

        CONTROLLER.with(|c| *c.borrow_mut() = Some(controller));
    }

    /// Boot now if the DOM is parsed, otherwise on `DOMContentLoaded`.
    pub fn run() {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        if document.ready_state() != "loading" {
            boot();
            return;
        }
        let on_ready = Closure::once_into_js(boot);
        if document
            .add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())
            .is_err()
        {
            console::warn("Could not subscribe to DOMContentLoaded");
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    console_error_panic_hook::set_once();
    web::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!("hot-beans-interactions runs in the browser; build it for wasm32-unknown-unknown.");
}
