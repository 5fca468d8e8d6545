use thiserror::Error;

use crate::constants::{
    EMPTY_NAME_ERROR, EMPTY_TITLE_ERROR, INVALID_COLOR_ERROR, NAME_TOO_LONG_ERROR,
    TITLE_TOO_LONG_ERROR, TOO_FEW_CATEGORIES_ERROR, TOO_MANY_CATEGORIES_ERROR,
    UNKNOWN_CATEGORY_ERROR,
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("failed to read storage: {0}")]
    Read(String),
    #[error("failed to write storage: {0}")]
    Write(String),
}

/// Rejections raised by the category editor. Display text is shown to the
/// user as-is.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum EditorError {
    #[error("{}", TOO_MANY_CATEGORIES_ERROR)]
    TooManyCategories,
    #[error("{}", TOO_FEW_CATEGORIES_ERROR)]
    TooFewCategories,
    #[error("{}", EMPTY_NAME_ERROR)]
    EmptyName,
    #[error("{}", NAME_TOO_LONG_ERROR)]
    NameTooLong,
    #[error("{}", EMPTY_TITLE_ERROR)]
    EmptyTitle,
    #[error("{}", TITLE_TOO_LONG_ERROR)]
    TitleTooLong,
    #[error("{}", INVALID_COLOR_ERROR)]
    InvalidColor,
    #[error("{}", UNKNOWN_CATEGORY_ERROR)]
    UnknownCategory,
}
