//! User configuration: archive tool, scratch space and repository layout.
//!
//! Settings are stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/preset-publisher/config.toml` (default
//! `~/.config/preset-publisher/config.toml`).

use std::path::PathBuf;

// ───────────────────────────────────────── config ────────────

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Archive tool to invoke for extraction and packing.
    pub hidx_binary: String,
    /// Parent directory of the per-run workspaces.
    pub scratch_root: PathBuf,
    /// Leave the workspace on disk after the run.
    pub keep_workspace: bool,
    /// Extra segment between `$PRESET_REPO` and the category directory.
    pub remote_presets_subdir: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            hidx_binary: "hidx".into(),
            scratch_root: std::env::temp_dir(),
            keep_workspace: false,
            remote_presets_subdir: String::new(),
        }
    }
}

impl AppConfig {
    // ── persistence ─────────────────────────────────────────────

    /// Load config from disk, falling back to defaults.
    pub fn load() -> Self {
        let path = config_path();
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(contents) => return Self::parse_config(&contents),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "unreadable config, using defaults");
                }
            }
        }
        Self::default()
    }

    /// Persist current config to disk.  Returns the path written.
    pub fn save(&self) -> anyhow::Result<PathBuf> {
        let path = config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, self.serialise())?;
        Ok(path)
    }

    fn parse_config(s: &str) -> Self {
        let mut config = Self::default();

        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim().trim_matches('"');

            match key {
                "hidx_binary" if !value.is_empty() => config.hidx_binary = value.to_string(),
                "scratch_root" if !value.is_empty() => config.scratch_root = PathBuf::from(value),
                "keep_workspace" => config.keep_workspace = value == "true",
                "remote_presets_subdir" => config.remote_presets_subdir = value.to_string(),
                _ => {}
            }
        }

        config
    }

    pub fn serialise(&self) -> String {
        let lines = [
            "# preset-publisher configuration".to_string(),
            String::new(),
            "# Archive tool used to extract and build .idx files".to_string(),
            format!("hidx_binary = \"{}\"", self.hidx_binary),
            String::new(),
            "# Workspace settings".to_string(),
            format!("scratch_root = \"{}\"", self.scratch_root.display()),
            format!("keep_workspace = {}", self.keep_workspace),
            String::new(),
            "# Shared repository layout: $PRESET_REPO/<subdir>/<category>/<type>.idx".to_string(),
            format!("remote_presets_subdir = \"{}\"", self.remote_presets_subdir),
            String::new(),
        ];
        lines.join("\n")
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/preset-publisher/config.toml`).
pub fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join(env!("CARGO_PKG_NAME")).join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_overrides_known_keys() {
        let config = AppConfig::parse_config(
            r#"
# comment
[section headers are ignored]
hidx_binary = "/opt/hfs/bin/hidx"
scratch_root = /scratch
keep_workspace = true
remote_presets_subdir = "presets"
unknown = 1
"#,
        );
        assert_eq!(config.hidx_binary, "/opt/hfs/bin/hidx");
        assert_eq!(config.scratch_root, PathBuf::from("/scratch"));
        assert!(config.keep_workspace);
        assert_eq!(config.remote_presets_subdir, "presets");
    }

    #[test]
    fn empty_values_keep_defaults() {
        let config = AppConfig::parse_config("hidx_binary =\nscratch_root = \"\"\n");
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn serialise_then_parse_is_stable() {
        let config = AppConfig {
            hidx_binary: "hidx20".into(),
            scratch_root: PathBuf::from("/var/tmp"),
            keep_workspace: true,
            remote_presets_subdir: "shared".into(),
        };
        assert_eq!(AppConfig::parse_config(&config.serialise()), config);
    }
}
