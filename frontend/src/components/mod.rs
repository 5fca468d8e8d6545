pub mod result_modal;
pub mod settings_modal;

pub use result_modal::ResultModal;
pub use settings_modal::SettingsModal;
