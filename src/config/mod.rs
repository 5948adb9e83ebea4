mod engine;
mod session;
mod settings;

use std::path::PathBuf;

pub use engine::ConfigEngine;
pub use session::Session;
pub use settings::Settings;

/// The user config directory for this editor.
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("bilby"))
}
