use std::fs;
use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::config_dir;

/// Session state persisted between launches.
///
/// Launching with no argument reopens the script that was open last
/// time. Unreadable or missing state falls back to the default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Session {
    pub last_file: Option<PathBuf>,
}

impl Session {
    pub fn load() -> Self {
        let Some(path) = Self::file() else {
            return Self::default();
        };
        match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                log::debug!("session state unreadable, starting fresh: {}", e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    pub fn save(&self) -> io::Result<()> {
        let Some(path) = Self::file() else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        fs::write(path, raw)
    }

    fn file() -> Option<PathBuf> {
        config_dir().map(|p| p.join("session.json"))
    }
}
