//! Default values for configuration fields.

/// Rows materialized per page.
pub const DEFAULT_PAGE_SIZE: usize = crate::render::PAGE_SIZE;

/// Largest collection that may be sorted by name similarity.
pub const DEFAULT_SIMILARITY_LIMIT: usize = crate::sorting::DEFAULT_SIMILARITY_LIMIT;

/// Key the view state of the main list is stored under.
pub const DEFAULT_INSTANCE_ID: &str = "items";

pub const DEFAULT_LANGUAGE: &str = "en";

pub const DEFAULT_THEME: &str = "dark";

/// Theme names accepted by the terminal surface.
pub const THEMES: &[&str] = &["dark", "light", "high-contrast"];
