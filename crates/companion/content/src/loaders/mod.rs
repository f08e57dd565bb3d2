//! Content loaders for reading companion tuning from files.
//!
//! Each loader parses from a path, from a string, or from the copy embedded
//! in the crate at build time.

pub mod balance;
pub mod config;
pub mod factory;
pub mod item;
pub mod skills;

pub use balance::BalanceLoader;
pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use item::{ItemCatalog, ItemLoader};
pub use skills::SkillTableLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

/// Rejects NaN, infinite and negative values.
pub(crate) fn ensure_non_negative(field: &str, value: f32) -> LoadResult<()> {
    if !value.is_finite() || value < 0.0 {
        anyhow::bail!("{} must be a finite, non-negative number (got {})", field, value);
    }
    Ok(())
}

/// Rejects NaN, infinite, zero and negative values.
pub(crate) fn ensure_positive(field: &str, value: f32) -> LoadResult<()> {
    if !value.is_finite() || value <= 0.0 {
        anyhow::bail!("{} must be a finite, positive number (got {})", field, value);
    }
    Ok(())
}
