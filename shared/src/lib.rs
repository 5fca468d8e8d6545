//! Wheel logic shared by the browser frontend: categories, colors, spin
//! selection and the persisted configuration cell.

pub mod category;
pub mod config_store;
pub mod constants;
pub mod easing;
pub mod editor;
pub mod error;
pub mod geometry;
pub mod palette;
pub mod shared_wheel_game;
pub mod validation;

pub use category::Category;
pub use config_store::{MemoryStorage, PersistedCell, StorageBackend, StoreUpdate};
pub use error::{EditorError, StorageError};
pub use shared_wheel_game::{FrameState, SpinPlan, WheelEngine};
