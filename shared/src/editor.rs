use std::collections::HashSet;

use rand::Rng;

use crate::category::{default_categories, Category};
use crate::constants::{MAX_CATEGORIES, MIN_CATEGORIES};
use crate::error::EditorError;
use crate::palette::random_color_with;
use crate::validation::{validate_color, validate_name};

pub use crate::validation::validate_title;

pub fn used_colors(categories: &[Category]) -> HashSet<String> {
    categories.iter().map(|c| c.color.clone()).collect()
}

/// Appends a category whose color avoids the ones already on the wheel.
pub fn add_category(categories: &[Category], name: &str) -> Result<Vec<Category>, EditorError> {
    add_category_with(&mut rand::thread_rng(), categories, name)
}

pub fn add_category_with<R: Rng + ?Sized>(
    rng: &mut R,
    categories: &[Category],
    name: &str,
) -> Result<Vec<Category>, EditorError> {
    if categories.len() >= MAX_CATEGORIES {
        return Err(EditorError::TooManyCategories);
    }
    let name = validate_name(name)?;
    let color = random_color_with(rng, &used_colors(categories));

    let mut next = categories.to_vec();
    next.push(Category::new(name, color));
    Ok(next)
}

fn position(categories: &[Category], id: &str) -> Result<usize, EditorError> {
    categories
        .iter()
        .position(|c| c.id == id)
        .ok_or(EditorError::UnknownCategory)
}

pub fn rename_category(
    categories: &[Category],
    id: &str,
    name: &str,
) -> Result<Vec<Category>, EditorError> {
    let index = position(categories, id)?;
    let name = validate_name(name)?;
    let mut next = categories.to_vec();
    next[index].name = name;
    Ok(next)
}

pub fn recolor_category(
    categories: &[Category],
    id: &str,
    color: &str,
) -> Result<Vec<Category>, EditorError> {
    let index = position(categories, id)?;
    let color = validate_color(color)?;
    let mut next = categories.to_vec();
    next[index].color = color;
    Ok(next)
}

pub fn delete_category(categories: &[Category], id: &str) -> Result<Vec<Category>, EditorError> {
    let index = position(categories, id)?;
    if categories.len() <= MIN_CATEGORIES {
        return Err(EditorError::TooFewCategories);
    }
    let mut next = categories.to_vec();
    next.remove(index);
    Ok(next)
}

/// The preset categories under fresh ids, so ids seen before a reset are
/// never handed out again.
pub fn reset_to_defaults() -> Vec<Category> {
    default_categories()
        .into_iter()
        .map(|preset| Category::new(preset.name, preset.color))
        .collect()
}
