use shared::constants::{CATEGORIES_STORAGE_KEY, DEFAULT_TITLE, TITLE_STORAGE_KEY};

/// Storage keys and defaults for one wheel. Handed down from `App` so no
/// component reaches for global keys on its own.
#[derive(Clone, Debug, PartialEq)]
pub struct WheelConfig {
    pub categories_key: &'static str,
    pub title_key: &'static str,
    pub default_title: &'static str,
    /// Canvas edge length in CSS pixels.
    pub canvas_size: u32,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            categories_key: CATEGORIES_STORAGE_KEY,
            title_key: TITLE_STORAGE_KEY,
            default_title: DEFAULT_TITLE,
            canvas_size: 420,
        }
    }
}
