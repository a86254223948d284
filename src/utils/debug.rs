use std::sync::atomic::{AtomicBool, Ordering};

static DEBUG: AtomicBool = AtomicBool::new(false);

pub(crate) fn set_debug(enabled: bool) {
    DEBUG.store(enabled, Ordering::Relaxed);
}

pub(crate) fn debug_enabled() -> bool {
    DEBUG.load(Ordering::Relaxed)
}

/// Print a request-level diagnostic line when --debug is on
pub(crate) fn log(msg: &str) {
    if debug_enabled() {
        eprintln!("[debug] {msg}");
    }
}
