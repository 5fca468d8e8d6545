use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::constants::{
    DEFAULT_CATEGORIES, LABEL_ELLIPSIS, LABEL_MAX_CHARS, LABEL_TRUNCATED_CHARS,
};
use crate::validation::HEX_COLOR_REGEX;

/// One slice of the wheel. Order inside the owning list decides where the
/// segment is drawn.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Validate)]
pub struct Category {
    pub id: String,
    #[validate(length(min = 1, max = 30))]
    pub name: String,
    #[validate(regex = "HEX_COLOR_REGEX")]
    pub color: String,
}

impl Category {
    /// Creates a category with a fresh id that is never handed out again.
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            color: color.into(),
        }
    }

    /// Name as drawn on the wheel; long names are shortened for display only.
    pub fn display_name(&self) -> String {
        truncate_label(&self.name)
    }
}

pub fn truncate_label(name: &str) -> String {
    if name.chars().count() > LABEL_MAX_CHARS {
        let head: String = name.chars().take(LABEL_TRUNCATED_CHARS).collect();
        format!("{}{}", head, LABEL_ELLIPSIS)
    } else {
        name.to_string()
    }
}

/// The six preset categories used on first run and whenever stored data is
/// unusable. Preset ids are stable so reloads do not churn them.
pub fn default_categories() -> Vec<Category> {
    DEFAULT_CATEGORIES
        .iter()
        .enumerate()
        .map(|(i, (name, color))| Category {
            id: format!("default-{}", i + 1),
            name: name.to_string(),
            color: color.to_string(),
        })
        .collect()
}
