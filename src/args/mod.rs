//! Command-line argument parsing and handling.

pub mod definition;
pub mod suggest;
pub mod utils;

// Re-export commonly used items
pub use definition::Args;
pub use suggest::handle_suggest;
pub use utils::determine_log_level;
