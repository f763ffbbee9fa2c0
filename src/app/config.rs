use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use crossterm::style::Color;
use serde::Deserialize;

use super::theme::Theme;

pub const DEFAULT_TAB_STOP: usize = 8;
pub const DEFAULT_QUIT_TIMES: u32 = 3;
pub const DEFAULT_MESSAGE_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub(crate) tab_stop: usize,
    pub(crate) quit_times: u32,
    pub(crate) message_timeout_secs: u64,
    pub(crate) log_file: Option<PathBuf>,
    pub(crate) theme: Option<String>,
    pub(crate) colors: Option<ColorOverride>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tab_stop: DEFAULT_TAB_STOP,
            quit_times: DEFAULT_QUIT_TIMES,
            message_timeout_secs: DEFAULT_MESSAGE_TIMEOUT_SECS,
            log_file: None,
            theme: None,
            colors: None,
        }
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub(crate) struct ColorOverride {
    pub(crate) status_fg: Option<String>,
    pub(crate) status_bg: Option<String>,
}

impl Config {
    pub fn parse(content: &str) -> Result<Self> {
        let cfg: Config = toml::from_str(content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if !(1..=32).contains(&self.tab_stop) {
            bail!("tab_stop must be between 1 and 32, got {}", self.tab_stop);
        }
        if self.quit_times == 0 {
            bail!("quit_times must be at least 1");
        }
        if self.message_timeout_secs == 0 {
            bail!("message_timeout_secs must be at least 1");
        }
        if let Some(name) = &self.theme {
            if Theme::from_name(name).is_none() {
                bail!("unknown theme {name:?} (expected reverse, light or dark)");
            }
        }
        Ok(())
    }

    pub fn message_timeout(&self) -> Duration {
        Duration::from_secs(self.message_timeout_secs)
    }

    pub fn theme(&self) -> Theme {
        let mut theme = self
            .theme
            .as_deref()
            .and_then(Theme::from_name)
            .unwrap_or_else(Theme::default_theme);
        if let Some(overrides) = &self.colors {
            apply_color_overrides(&mut theme, overrides);
        }
        theme
    }
}

pub fn load_config() -> Result<Config> {
    let mut candidates: Vec<PathBuf> = Vec::new();
    candidates.push(PathBuf::from("quill.toml"));
    candidates.push(PathBuf::from(".quill.toml"));
    if let Ok(home) = std::env::var("HOME") {
        candidates.push(PathBuf::from(home).join(".config/quill/config.toml"));
    }

    for path in candidates {
        if !path.exists() {
            continue;
        }
        return load_config_from(&path);
    }
    Ok(Config::default())
}

pub fn load_config_from(path: &Path) -> Result<Config> {
    let content =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    Config::parse(&content).with_context(|| format!("invalid config {}", path.display()))
}

pub(crate) fn apply_color_overrides(theme: &mut Theme, overrides: &ColorOverride) {
    if let Some(color) = overrides.status_fg.as_deref().and_then(parse_color) {
        theme.status_fg = Some(color);
    }
    if let Some(color) = overrides.status_bg.as_deref().and_then(parse_color) {
        theme.status_bg = Some(color);
    }
}

fn parse_color(value: &str) -> Option<Color> {
    let hex = value.trim().trim_start_matches('#');
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(hex.get(0..2)?, 16).ok()?;
    let g = u8::from_str_radix(hex.get(2..4)?, 16).ok()?;
    let b = u8::from_str_radix(hex.get(4..6)?, 16).ok()?;
    Some(Color::Rgb { r, g, b })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let cfg = Config::parse("").expect("parse");
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.message_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn reads_all_keys() {
        let cfg = Config::parse(
            r##"
tab_stop = 4
quit_times = 2
message_timeout_secs = 10
log_file = "/tmp/quill.log"
theme = "dark"

[colors]
status_fg = "#ff8800"
"##,
        )
        .expect("parse");
        assert_eq!(cfg.tab_stop, 4);
        assert_eq!(cfg.quit_times, 2);
        assert_eq!(cfg.log_file, Some(PathBuf::from("/tmp/quill.log")));
        let theme = cfg.theme();
        assert_eq!(theme.status_fg, Some(Color::Rgb { r: 255, g: 136, b: 0 }));
        assert_eq!(theme.status_bg, Theme::dark().status_bg);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(Config::parse("tab_stop = 0").is_err());
        assert!(Config::parse("quit_times = 0").is_err());
        assert!(Config::parse("message_timeout_secs = 0").is_err());
        assert!(Config::parse("message_timeout_secs = 1").is_ok());
        assert!(Config::parse("theme = \"neon\"").is_err());
        assert!(Config::parse("tabstop = 4").is_err());
    }

    #[test]
    fn bad_hex_is_ignored() {
        let mut theme = Theme::reverse();
        let overrides = ColorOverride {
            status_fg: Some("#12345".to_string()),
            status_bg: Some("zzzzzz".to_string()),
        };
        apply_color_overrides(&mut theme, &overrides);
        assert_eq!(theme, Theme::reverse());
    }

    #[test]
    fn loads_from_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "tab_stop = 2\n").expect("write");
        assert_eq!(load_config_from(&path).expect("load").tab_stop, 2);

        fs::write(&path, "tab_stop = [").expect("write");
        assert!(load_config_from(&path).is_err());
    }
}
