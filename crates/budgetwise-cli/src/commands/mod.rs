//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Shared utilities (config and snapshot loading, output format)
//! - `decide` - Purchase decision command
//! - `analysis` - Wellness, trends and investment commands
//! - `summary` - Snapshot summary command
//! - `serve` - Web server command

pub mod analysis;
pub mod core;
pub mod decide;
pub mod serve;
pub mod summary;

// Re-export command functions for main.rs
pub use analysis::*;
pub use self::core::*;
pub use decide::*;
pub use serve::*;
pub use summary::*;

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
