//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `report` - Recurring spend report
//! - `amounts` - Recurring amount listing
//! - `config` - Config path/show/init
//! - `ledger` - Shared utilities (config and ledger loading)

pub mod amounts;
pub mod config;
pub mod ledger;
pub mod report;

// Re-export command functions for main.rs
pub use amounts::*;
pub use config::*;
pub use ledger::*;
pub use report::*;

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
