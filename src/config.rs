//! Configuration to acknowledge developer preferences as well as set defaults.
//!
//! Specifically, we try to find a restassured.toml, and if present we load settings from there.
//! This provides list indentation and bullet preferences plus table width measurement.

use crate::error::{Error, Result};
use facet::Facet;
use std::fs;
use std::path::Path;
use tracing::warn;

/// File looked up in the working directory by [`Config::load`].
pub const CONFIG_FILE: &str = "restassured.toml";

#[derive(Facet, Clone, Debug, PartialEq, Eq)]
/// User preferences loaded from restassured.toml or falling back to defaults.
pub struct Config {
    #[facet(default = 4)]
    /// Spaces added or removed when a list item is indented or outdented.
    pub tab_width: usize,
    #[facet(default = vec!["*".to_string(), "-".to_string(), "+".to_string()])]
    /// Bullet glyphs cycled through as unordered items change depth.
    pub bullet_cycle: Vec<String>,
    #[facet(default = true)]
    /// Whether indenting a list item also switches its bullet or numbering style.
    pub auto_switch_bullet: bool,
    #[facet(default = true)]
    /// Whether table widths count East-Asian wide characters as two columns.
    pub wide_chars: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tab_width: 4,
            bullet_cycle: vec!["*".to_string(), "-".to_string(), "+".to_string()],
            auto_switch_bullet: true,
            wide_chars: true,
        }
    }
}

impl Config {
    #[must_use]
    /// Load configuration from restassured.toml if present.
    ///
    /// A file that fails to parse is reported and ignored rather than aborting the command.
    pub fn load() -> Self {
        match Self::load_from(Path::new(CONFIG_FILE)) {
            Ok(Some(config)) => config,
            Ok(None) => Self::default(),
            Err(e) => {
                warn!("ignoring {CONFIG_FILE}: {e}");
                Self::default()
            }
        }
    }

    /// Load configuration from `path`, or `None` if there is no such file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the file exists but is not valid configuration.
    pub fn load_from(path: &Path) -> Result<Option<Self>> {
        let Ok(contents) = fs::read_to_string(path) else {
            return Ok(None);
        };
        let mut config =
            facet_toml::from_str::<Self>(&contents).map_err(|e| Error::Config(e.to_string()))?;
        if config.bullet_cycle.is_empty() {
            config.bullet_cycle = Self::default().bullet_cycle;
        }
        Ok(Some(config))
    }
}

#[cfg(test)]
#[path = "tests/config.rs"]
mod tests;
