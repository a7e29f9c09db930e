//! Driver configuration
//!
//! Settings can come from a TOML file given with `--config`; command-line
//! flags override whatever the file sets.
//!
//! ```toml
//! max_line_width = 71
//! reserved_words = "reserved_words.txt"
//! out_dir = "build"
//! listing = true
//! tokens = true
//! layout = false
//! ```

use crate::error::{PasfrontError, PasfrontResult};
use crate::parser::source::DEFAULT_MAX_LINE_WIDTH;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Characters kept per source line; the rest is dropped.
    pub max_line_width: usize,
    /// Word list to load instead of the built-in one.
    pub reserved_words: Option<PathBuf>,
    /// Directory the report files are written to.
    pub out_dir: PathBuf,
    pub listing: bool,
    pub tokens: bool,
    /// Activation-record layout (`.loc`).
    pub layout: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_line_width: DEFAULT_MAX_LINE_WIDTH,
            reserved_words: None,
            out_dir: PathBuf::from("."),
            listing: true,
            tokens: true,
            layout: true,
        }
    }
}

impl Config {
    pub fn from_toml(text: &str, path: &Path) -> PasfrontResult<Self> {
        toml::from_str(text).map_err(|source| PasfrontError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> PasfrontResult<Self> {
        let text = fs::read_to_string(path).map_err(|e| PasfrontError::io(path, e))?;
        let config = Self::from_toml(&text, path)?;
        tracing::debug!(path = %path.display(), ?config, "loaded configuration");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_take_defaults() {
        let config = Config::from_toml("out_dir = \"build\"\nlayout = false\n", Path::new("c.toml"))
            .unwrap();
        assert_eq!(config.out_dir, PathBuf::from("build"));
        assert!(!config.layout);
        assert!(config.listing);
        assert_eq!(config.max_line_width, 71);
        assert_eq!(config.reserved_words, None);
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let err = Config::from_toml("colour = true\n", Path::new("c.toml")).unwrap_err();
        assert!(matches!(err, PasfrontError::Config { .. }));
    }

    #[test]
    fn test_load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pasfront.toml");
        fs::write(&path, "max_line_width = 40\n").unwrap();
        assert_eq!(Config::load(&path).unwrap().max_line_width, 40);
    }
}
