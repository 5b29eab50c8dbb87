//! Deduplicated warnings with colored terminal output.
//!
//! The selector matcher reports input it cannot honor, such as an
//! unrecognized pseudo-class, without spamming stderr when the same selector
//! is matched against thousands of elements.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use owo_colors::OwoColorize;

/// Every warning key printed so far, formatted as `[component] message`.
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Whether warnings are wrapped in ANSI color codes.
static COLORED: AtomicBool = AtomicBool::new(true);

fn key(component: &str, message: &str) -> String {
    format!("[{component}] {message}")
}

/// Warn about unsupported input (prints once per unique message).
///
/// # Example
/// ```
/// koala_common::warning::warn_once("Selectors", "unknown pseudo-class ':hover'");
/// ```
pub fn warn_once(component: &str, message: &str) {
    let should_print = WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key(component, message));

    if should_print {
        let line = format!("[Koala {component}] ⚠ {message}");
        if COLORED.load(Ordering::Relaxed) {
            eprintln!("{}", line.yellow());
        } else {
            eprintln!("{line}");
        }
    }
}

/// Returns true if this exact warning has already been emitted.
#[must_use]
pub fn has_warned(component: &str, message: &str) -> bool {
    WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .as_ref()
        .is_some_and(|set| set.contains(&key(component, message)))
}

/// Enable or disable ANSI colors for subsequent warnings.
pub fn set_colored(enabled: bool) {
    COLORED.store(enabled, Ordering::Relaxed);
}
