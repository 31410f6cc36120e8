//! Style engine warnings with colored terminal output.
//!
//! Provides deduplication to avoid spamming the same warning multiple times.
//! Used by the node crate to report deprecated usage and failures
//! that are downgraded rather than propagated.

use std::collections::HashSet;
use std::sync::Mutex;

use owo_colors::OwoColorize;

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

fn key(component: &str, message: &str) -> String {
    format!("[{component}] {message}")
}

/// Report a deprecated usage pattern (prints once per unique message)
///
/// # Example
/// ```ignore
/// deprecated("Node", "failed to apply style when a new style was assigned");
/// ```
pub fn deprecated(component: &str, message: &str) {
    let should_print = WARNED
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key(component, message));

    if should_print {
        eprintln!(
            "{}",
            format!("[Strata {component}] deprecated: {message}").magenta()
        );
    }
}

/// Whether `message` has been reported for `component` since the last
/// [`clear_warnings`].
#[must_use]
pub fn has_warned(component: &str, message: &str) -> bool {
    WARNED
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
        .as_ref()
        .is_some_and(|set| set.contains(&key(component, message)))
}

/// Clear all recorded warnings
pub fn clear_warnings() {
    let mut guard = WARNED
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // One test: the dedup set is process-global and tests run in parallel.
    #[test]
    fn test_warning_is_recorded_once_until_cleared() {
        assert!(!has_warned("Test", "recorded once"));
        deprecated("Test", "recorded once");
        deprecated("Test", "recorded once");
        assert!(has_warned("Test", "recorded once"));
        assert!(!has_warned("Other", "recorded once"));

        clear_warnings();
        assert!(!has_warned("Test", "recorded once"));
    }
}
