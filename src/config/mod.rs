pub mod settings;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Persisted settings for the shell window.
///
/// Missing fields fall back to their defaults, so older config files keep loading.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub window_title: String,
    pub window_size: (f64, f64),
    pub window_position: (f64, f64),
    pub min_window_size: (f64, f64),
    /// Page to load instead of the bundled start page.
    pub start_url: Option<String>,
    pub devtools_enabled: bool,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        settings::load_config(None)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window_title: "Menu Shell".to_string(),
            window_size: (1200.0, 800.0),
            window_position: (100.0, 100.0),
            min_window_size: (640.0, 480.0),
            start_url: None,
            devtools_enabled: cfg!(debug_assertions),
        }
    }
}
