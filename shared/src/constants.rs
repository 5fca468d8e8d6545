pub const CATEGORIES_STORAGE_KEY: &str = "spinwheel.categories";
pub const TITLE_STORAGE_KEY: &str = "spinwheel.title";

pub const DEFAULT_TITLE: &str = "What should we eat?";
pub const DEFAULT_CATEGORIES: [(&str, &str); 6] = [
    ("Pizza", "#FF6B6B"),
    ("Sushi", "#4ECDC4"),
    ("Burger", "#FFD93D"),
    ("Tacos", "#95E1D3"),
    ("Pasta", "#F38181"),
    ("Salad", "#A8E6CF"),
];

pub const MIN_CATEGORIES: usize = 2;
pub const MAX_CATEGORIES: usize = 20;
pub const MAX_NAME_LENGTH: usize = 30;
pub const MAX_TITLE_LENGTH: usize = 50;

// Spin animation
pub const MIN_EXTRA_SPINS: u32 = 5;
pub const MAX_EXTRA_SPINS: u32 = 7;
pub const BASE_SPIN_SECONDS: f64 = 4.0;
pub const SECONDS_PER_EXTRA_SPIN: f64 = 0.5;
pub const SPIN_EASING_POINTS: (f64, f64, f64, f64) = (0.2, 0.8, 0.3, 1.0);

// Label layout
pub const LABEL_RADIUS_RATIO: f64 = 0.65;
pub const LABEL_MAX_CHARS: usize = 12;
pub const LABEL_TRUNCATED_CHARS: usize = 10;
pub const LABEL_ELLIPSIS: &str = "...";

pub const TOO_MANY_CATEGORIES_ERROR: &str = "A wheel can have at most 20 categories";
pub const TOO_FEW_CATEGORIES_ERROR: &str = "A wheel needs at least 2 categories";
pub const EMPTY_NAME_ERROR: &str = "Category name cannot be empty";
pub const NAME_TOO_LONG_ERROR: &str = "Category name cannot exceed 30 characters";
pub const EMPTY_TITLE_ERROR: &str = "Title cannot be empty";
pub const TITLE_TOO_LONG_ERROR: &str = "Title cannot exceed 50 characters";
pub const INVALID_COLOR_ERROR: &str = "Color must be a hex value like #FF6B6B";
pub const UNKNOWN_CATEGORY_ERROR: &str = "That category no longer exists";
