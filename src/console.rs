//! Developer-console diagnostics. Informational only.

pub fn log(msg: &str) {
    web_sys::console::log_1(&msg.into());
}

pub fn warn(msg: &str) {
    web_sys::console::warn_1(&msg.into());
}
