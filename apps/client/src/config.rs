use std::path::PathBuf;

use anyhow::{Context, Result};

/// Client configuration loaded from environment variables. Everything has a
/// sensible default; nothing is required.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the Agragrati backend API.
    pub api_url: String,
    /// Directory holding the session snapshot, tracker records and the
    /// anonymous user id.
    pub data_dir: PathBuf,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let api_url = std::env::var("AGRAGRATI_API_URL")
            .unwrap_or_else(|_| "http://localhost:8000".to_string());

        let data_dir = match std::env::var("AGRAGRATI_DATA_DIR") {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => default_data_dir().context("could not determine a data directory")?,
        };

        Ok(Config {
            api_url,
            data_dir,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    pub fn session_file(&self) -> PathBuf {
        self.data_dir.join("session.json")
    }

    pub fn tracker_file(&self) -> PathBuf {
        self.data_dir.join("tracker.json")
    }

    pub fn user_id_file(&self) -> PathBuf {
        self.data_dir.join("user_id")
    }
}

fn default_data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|d| d.join("agragrati"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_paths_live_under_data_dir() {
        let config = Config {
            api_url: "http://localhost:8000".to_string(),
            data_dir: PathBuf::from("/tmp/agragrati-test"),
            rust_log: "info".to_string(),
        };
        assert_eq!(
            config.session_file(),
            PathBuf::from("/tmp/agragrati-test/session.json")
        );
        assert_eq!(
            config.tracker_file(),
            PathBuf::from("/tmp/agragrati-test/tracker.json")
        );
        assert_eq!(
            config.user_id_file(),
            PathBuf::from("/tmp/agragrati-test/user_id")
        );
    }
}
