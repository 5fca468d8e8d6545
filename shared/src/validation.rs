use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;
use validator::Validate;

use crate::category::{default_categories, Category};
use crate::constants::{MAX_CATEGORIES, MAX_NAME_LENGTH, MAX_TITLE_LENGTH, MIN_CATEGORIES};
use crate::error::EditorError;

pub static HEX_COLOR_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#[0-9a-fA-F]{6}$").expect("hex color pattern is valid"));

/// Trims and checks a category name, returning the value to store.
pub fn validate_name(name: &str) -> Result<String, EditorError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(EditorError::EmptyName);
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(EditorError::NameTooLong);
    }
    Ok(name.to_string())
}

pub fn validate_title(title: &str) -> Result<String, EditorError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(EditorError::EmptyTitle);
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(EditorError::TitleTooLong);
    }
    Ok(title.to_string())
}

pub fn validate_color(color: &str) -> Result<String, EditorError> {
    let color = color.trim();
    if !HEX_COLOR_REGEX.is_match(color) {
        return Err(EditorError::InvalidColor);
    }
    Ok(color.to_string())
}

/// Accepts a loaded category list only if the wheel could use it as-is.
pub fn sanitize_categories(categories: Vec<Category>) -> Vec<Category> {
    if !(MIN_CATEGORIES..=MAX_CATEGORIES).contains(&categories.len()) {
        warn!(
            "Stored wheel has {} categories, expected {}-{}; using defaults",
            categories.len(),
            MIN_CATEGORIES,
            MAX_CATEGORIES
        );
        return default_categories();
    }

    if let Some(bad) = categories.iter().find(|c| c.validate().is_err()) {
        warn!("Stored category {:?} is invalid; using defaults", bad.id);
        return default_categories();
    }

    let mut seen = std::collections::HashSet::new();
    if !categories.iter().all(|c| seen.insert(c.id.as_str())) {
        warn!("Stored categories contain duplicate ids; using defaults");
        return default_categories();
    }

    categories
}

/// Stored titles that are blank or too long fall back to `default`.
pub fn sanitize_title(title: String, default: &str) -> String {
    match validate_title(&title) {
        Ok(title) => title,
        Err(err) => {
            warn!("Stored title rejected ({}); using default", err);
            default.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert_eq!(validate_name("  Ramen "), Ok("Ramen".to_string()));
        assert_eq!(validate_name("   "), Err(EditorError::EmptyName));
        assert_eq!(validate_name(&"a".repeat(30)), Ok("a".repeat(30)));
        assert_eq!(validate_name(&"a".repeat(31)), Err(EditorError::NameTooLong));
    }

    #[test]
    fn test_validate_title() {
        assert_eq!(validate_title(&"t".repeat(50)), Ok("t".repeat(50)));
        assert_eq!(validate_title(&"t".repeat(51)), Err(EditorError::TitleTooLong));
        assert_eq!(validate_title(""), Err(EditorError::EmptyTitle));
    }

    #[test]
    fn test_validate_color() {
        assert!(validate_color("#a8e6cf").is_ok());
        assert_eq!(validate_color("#a8e6c"), Err(EditorError::InvalidColor));
        assert_eq!(validate_color("a8e6cf"), Err(EditorError::InvalidColor));
    }

    #[test]
    fn test_sanitize_categories_falls_back() {
        let one = vec![Category::new("Solo", "#FF6B6B")];
        assert_eq!(sanitize_categories(one), default_categories());

        let bad_color = vec![Category::new("A", "#FF6B6B"), Category::new("B", "blue")];
        assert_eq!(sanitize_categories(bad_color), default_categories());

        let a = Category::new("A", "#FF6B6B");
        let duplicated = vec![a.clone(), a];
        assert_eq!(sanitize_categories(duplicated), default_categories());

        let fine = vec![Category::new("A", "#FF6B6B"), Category::new("B", "#4ECDC4")];
        assert_eq!(sanitize_categories(fine.clone()), fine);
    }

    #[test]
    fn test_sanitize_title() {
        assert_eq!(sanitize_title("Lunch".into(), "Default"), "Lunch");
        assert_eq!(sanitize_title(" ".into(), "Default"), "Default");
    }
}
