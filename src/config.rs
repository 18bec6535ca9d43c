use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub audio_file: String,
    pub keybind: KeybindConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct KeybindConfig {
    #[serde(default)]
    pub modifiers: Vec<String>,
    pub key: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TelemetryConfig {
    pub enabled: bool,
    pub log_path: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            log_path: "~/.audio-hotkey/log".to_owned(),
        }
    }
}

impl Config {
    /// Load config from the given TOML file.
    ///
    /// A missing or unparsable file is a startup-fatal error; there is no
    /// default-config fallback.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            bail!(
                "configuration file '{}' not found (expected a TOML file with \
                 an `audio_file` entry and a [keybind] table)",
                path.display()
            );
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file '{}'", path.display()))?;

        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("failed to parse config TOML '{}'", path.display()))?;

        Ok(config)
    }

    /// Resolve the configured audio file into an absolute path.
    ///
    /// Relative paths resolve against the directory containing the config
    /// file, so a clip sitting next to `config.toml` can be named bare.
    /// The file must exist at startup.
    pub fn resolve_audio_file(&self, config_path: &Path) -> Result<PathBuf> {
        let expanded = Self::expand_path(&self.audio_file)?;

        let resolved = if expanded.is_absolute() {
            expanded
        } else {
            let base = config_path.parent().unwrap_or_else(|| Path::new("."));
            base.join(expanded)
        };

        if !resolved.exists() {
            bail!(
                "audio file '{}' not found; place the clip next to '{}' or use \
                 an absolute path",
                resolved.display(),
                config_path.display()
            );
        }

        Ok(resolved)
    }

    /// Expand ~ in paths to home directory
    pub fn expand_path(path: &str) -> Result<PathBuf> {
        if let Some(stripped) = path.strip_prefix("~/") {
            let home = std::env::var("HOME").context("HOME environment variable not set")?;
            Ok(PathBuf::from(home).join(stripped))
        } else {
            Ok(PathBuf::from(path))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn write_config(dir: &Path, contents: &str) -> PathBuf {
        let path = dir.join("config.toml");
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_full_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            dir.path(),
            r#"
audio_file = "fah.mp3"

[keybind]
modifiers = ["ctrl", "shift"]
key = "f"

[telemetry]
enabled = true
log_path = "/tmp/audio-hotkey.log"
"#,
        );

        let config = Config::load(&path).unwrap();
        assert_eq!(config.audio_file, "fah.mp3");
        assert_eq!(config.keybind.modifiers, vec!["ctrl", "shift"]);
        assert_eq!(config.keybind.key, "f");
        assert!(config.telemetry.enabled);
    }

    #[test]
    fn test_load_minimal_config_defaults_telemetry() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            dir.path(),
            r#"
audio_file = "clip.wav"

[keybind]
key = "f9"
"#,
        );

        let config = Config::load(&path).unwrap();
        assert!(config.keybind.modifiers.is_empty());
        assert!(!config.telemetry.enabled);
    }

    #[test]
    fn test_load_missing_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(&dir.path().join("nope.toml")).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_load_unparsable_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "audio_file = [broken");
        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn test_resolve_relative_audio_file_against_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            dir.path(),
            "audio_file = \"clip.wav\"\n[keybind]\nkey = \"f\"\n",
        );
        fs::write(dir.path().join("clip.wav"), b"RIFF").unwrap();

        let config = Config::load(&path).unwrap();
        let resolved = config.resolve_audio_file(&path).unwrap();
        assert_eq!(resolved, dir.path().join("clip.wav"));
    }

    #[test]
    fn test_resolve_missing_audio_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            dir.path(),
            "audio_file = \"gone.wav\"\n[keybind]\nkey = \"f\"\n",
        );

        let config = Config::load(&path).unwrap();
        let err = config.resolve_audio_file(&path).unwrap_err();
        assert!(err.to_string().contains("gone.wav"));
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let home = env::var("HOME").expect("HOME not set");
        let result = Config::expand_path("~/clips/fah.mp3").unwrap();
        assert_eq!(result, PathBuf::from(home).join("clips/fah.mp3"));
    }

    #[test]
    fn test_expand_path_without_tilde() {
        let result = Config::expand_path("/srv/clips/fah.mp3").unwrap();
        assert_eq!(result, PathBuf::from("/srv/clips/fah.mp3"));
    }
}
