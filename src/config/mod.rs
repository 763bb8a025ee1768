//! Configuration: filesystem locations and the `settings.conf` key/value file.

mod paths;
mod settings;

pub use paths::{config_dir, logs_dir, settings_path};
pub use settings::{
    DEFAULT_API_BASE_URL, DEFAULT_SEARCH_DEBOUNCE_MS, DEFAULT_SEARCH_LIMIT,
    SETTINGS_SKELETON_CONTENT, Settings, save_language,
};

#[cfg(test)]
static TEST_MUTEX: std::sync::OnceLock<std::sync::Mutex<()>> = std::sync::OnceLock::new();

#[cfg(test)]
/// What: Provide a process-wide mutex to serialize environment-mutating tests.
///
/// Output:
/// - Shared reference to a lazily-initialized `Mutex<()>`.
///
/// Details:
/// - Callers should lock the mutex to guard environment-variable or disk state changes.
pub(crate) fn test_mutex() -> &'static std::sync::Mutex<()> {
    TEST_MUTEX.get_or_init(|| std::sync::Mutex::new(()))
}
