//! Application configuration: TOML file loading and defaults.
//!
//! Resolution order (first found wins):
//! 1. CLI `--config` flag
//! 2. `$MFM_CONFIG` environment variable (path to config file)
//! 3. Project-local `.mfm.toml` in the current working directory
//! 4. Global `~/.config/mfm/config.toml`
//! 5. Built-in defaults

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::layout::pane::DEFAULT_PANE_MARGIN;

// ── Section configs ──────────────────────────────────────────────────────────

/// General application settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct GeneralConfig {
    /// Starting directory (overridden by the CLI positional arg).
    pub default_path: Option<String>,
}

/// Pane layout settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct PaneConfig {
    /// Blank columns between a pane's longest name and its neighbor.
    pub margin: Option<u16>,
}

/// Color settings for a custom theme.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ThemeColorsConfig {
    pub pane_dir_fg: Option<String>,
    pub pane_file_fg: Option<String>,
    pub selected_bg: Option<String>,
    pub selected_fg: Option<String>,
    pub trail_fg: Option<String>,
    pub status_bg: Option<String>,
    pub status_fg: Option<String>,
}

/// Theme configuration section.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ThemeConfig {
    /// Color scheme: "dark", "light", "custom".
    pub scheme: Option<String>,
    /// Custom color overrides.
    pub custom: Option<ThemeColorsConfig>,
}

// ── Top-level config ─────────────────────────────────────────────────────────

/// Top-level application configuration.
///
/// All fields are optional so a partial config file can be read without
/// forcing the user to spell out every section.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub general: GeneralConfig,
    pub pane: PaneConfig,
    pub theme: ThemeConfig,
}

impl AppConfig {
    /// Effective pane margin.
    pub fn pane_margin(&self) -> u16 {
        self.pane.margin.unwrap_or(DEFAULT_PANE_MARGIN)
    }
}

// ── Config file locator ──────────────────────────────────────────────────────

/// Return the list of candidate config file paths in priority order.
///
/// Does NOT include the CLI `--config` path — that is handled separately.
fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Ok(env_path) = std::env::var("MFM_CONFIG") {
        paths.push(PathBuf::from(env_path));
    }

    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd.join(".mfm.toml"));
    }

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("mfm").join("config.toml"));
    }

    paths
}

/// Try to read and parse a TOML config file. Returns `None` if the file
/// doesn't exist or can't be parsed.
fn load_file(path: &Path) -> Option<AppConfig> {
    let contents = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&contents) {
        Ok(config) => Some(config),
        Err(err) => {
            log::warn!("ignoring malformed config {}: {err}", path.display());
            None
        }
    }
}

/// Load the application config, first match wins.
pub fn load(cli_path: Option<&Path>) -> AppConfig {
    if let Some(path) = cli_path {
        if let Some(config) = load_file(path) {
            return config;
        }
    }
    for path in candidate_paths() {
        if let Some(config) = load_file(&path) {
            return config;
        }
    }
    AppConfig::default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn default_config_uses_builtin_margin() {
        let config = AppConfig::default();
        assert_eq!(config.pane_margin(), DEFAULT_PANE_MARGIN);
        assert!(config.general.default_path.is_none());
        assert!(config.theme.scheme.is_none());
    }

    #[test]
    fn parses_full_config() {
        let config: AppConfig = toml::from_str(
            r##"
            [general]
            default_path = "/srv"

            [pane]
            margin = 4

            [theme]
            scheme = "custom"

            [theme.custom]
            pane_dir_fg = "#89b4fa"
            "##,
        )
        .unwrap();

        assert_eq!(config.general.default_path.as_deref(), Some("/srv"));
        assert_eq!(config.pane_margin(), 4);
        assert_eq!(config.theme.scheme.as_deref(), Some("custom"));
        assert_eq!(
            config.theme.custom.unwrap().pane_dir_fg.as_deref(),
            Some("#89b4fa")
        );
    }

    #[test]
    fn parses_partial_config() {
        let config: AppConfig = toml::from_str("[theme]\nscheme = \"light\"\n").unwrap();
        assert_eq!(config.theme.scheme.as_deref(), Some("light"));
        assert_eq!(config.pane_margin(), DEFAULT_PANE_MARGIN);
    }

    #[test]
    fn load_file_reads_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[pane]\nmargin = 3").unwrap();
        let config = load_file(file.path()).unwrap();
        assert_eq!(config.pane_margin(), 3);
    }

    #[test]
    fn load_file_missing_is_none() {
        assert!(load_file(Path::new("/nonexistent/.mfm.toml")).is_none());
    }

    #[test]
    fn load_file_malformed_is_none() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not toml at all [").unwrap();
        assert!(load_file(file.path()).is_none());
    }

    #[test]
    fn cli_path_takes_priority() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[pane]\nmargin = 7").unwrap();
        let config = load(Some(file.path()));
        assert_eq!(config.pane_margin(), 7);
    }
}
