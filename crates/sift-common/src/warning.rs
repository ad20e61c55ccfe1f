//! Diagnostic warnings with colored terminal output.
//!
//! Provides deduplication to avoid spamming the same warning multiple times.
//! Used by the CLI to report input it had to drop. The parsing and query
//! crates never call into it; they hand rejected input back to the caller.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use owo_colors::OwoColorize;

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Warn about dropped or unsupported input (prints once per unique message)
///
/// # Example
/// ```
/// use sift_common::warning::warn_once;
///
/// warn_once("Selector", "unsupported pseudo-class ':hover'");
/// ```
pub fn warn_once(component: &str, message: &str) {
    if record(component, message) {
        eprintln!("{}", format!("[sift {component}] ⚠ {message}").yellow());
    }
}

/// Clear all recorded warnings (call before processing a new document)
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}

/// Insert the message into the dedup set, returning true if it was new.
fn record(component: &str, message: &str) -> bool {
    let key = format!("[{component}] {message}");
    WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key)
}
