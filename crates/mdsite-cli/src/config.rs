//! Site configuration loaded from `mdsite.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use mdsite_core::parser::DEFAULT_ROOT_TAG;
use serde::Deserialize;
use tracing::debug;

use crate::site::SiteError;

/// Config file picked up from the working directory when `--config` is not
/// given.
pub const DEFAULT_CONFIG_FILE: &str = "mdsite.toml";

/// Site layout and rendering settings.
///
/// Every key is optional in the TOML file; missing keys take the defaults
/// below.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SiteConfig {
    /// Directory holding the Markdown pages.
    pub content_dir: PathBuf,
    /// Directory copied verbatim into the output.
    pub static_dir: PathBuf,
    /// HTML template with `{{ Title }}` and `{{ Content }}` placeholders.
    pub template: PathBuf,
    /// Output directory. Deleted and recreated on every build.
    pub output_dir: PathBuf,
    /// Prefix replacing the leading `/` of root-relative `href`/`src`.
    pub basepath: String,
    /// Tag of the container wrapping each page's content.
    pub root_tag: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from("content"),
            static_dir: PathBuf::from("static"),
            template: PathBuf::from("template.html"),
            output_dir: PathBuf::from("docs"),
            basepath: "/".to_string(),
            root_tag: DEFAULT_ROOT_TAG.to_string(),
        }
    }
}

impl SiteConfig {
    /// Load from an explicit path, or from [`DEFAULT_CONFIG_FILE`] if it
    /// exists, or fall back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, SiteError> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.is_file() {
                    Self::from_file(default)
                } else {
                    debug!("no {} found, using defaults", DEFAULT_CONFIG_FILE);
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, SiteError> {
        let text = fs::read_to_string(path).map_err(|source| SiteError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&text).map_err(|source| SiteError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), ?config, "loaded site config");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_match_conventional_layout() {
        let config = SiteConfig::default();
        assert_eq!(config.content_dir, PathBuf::from("content"));
        assert_eq!(config.static_dir, PathBuf::from("static"));
        assert_eq!(config.template, PathBuf::from("template.html"));
        assert_eq!(config.output_dir, PathBuf::from("docs"));
        assert_eq!(config.basepath, "/");
        assert_eq!(config.root_tag, "div");
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let config: SiteConfig = toml::from_str("basepath = \"/blog/\"\noutput_dir = \"public\"").unwrap();
        assert_eq!(config.basepath, "/blog/");
        assert_eq!(config.output_dir, PathBuf::from("public"));
        assert_eq!(config.content_dir, PathBuf::from("content"));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = SiteConfig::load(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(matches!(err, SiteError::Io { .. }));
    }

    #[test]
    fn invalid_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mdsite.toml");
        fs::write(&path, "basepath = [1, 2]").unwrap();

        let err = SiteConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, SiteError::Config { .. }));
    }
}
