pub mod use_persisted_state;

pub use use_persisted_state::*;
