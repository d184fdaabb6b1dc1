use std::panic;
use leptos::logging::log;

use crate::config::TOKEN_STORAGE_KEY;

/// Forwards panics to the browser console and adds a hint when the panic came
/// from reading a corrupted session entry.
pub fn set_custom_panic_hook() {
    panic::set_hook(Box::new(|panic_info| {
        console_error_panic_hook::hook(panic_info);

        let message = if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else {
            "Unknown panic".to_string()
        };

        if message.contains("OwnerDisposed") {
            log!("[PANIC] A page was unmounted while one of its requests was still running");
        }
        if message.contains(TOKEN_STORAGE_KEY) {
            log!(
                "[PANIC] Clearing localStorage['{}'] and reloading may recover the session",
                TOKEN_STORAGE_KEY
            );
        }
    }));
}

/// Call once before mounting the app.
pub fn init() {
    log!("[PANIC_HOOK] Setting up custom panic hook");
    set_custom_panic_hook();
}
