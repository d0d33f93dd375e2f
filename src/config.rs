use anyhow::Context;
use serde::Deserialize;
use std::path::PathBuf;

pub const SETTINGS_FILE: &str = "blog.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreKind {
    Memory,
    File,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub bind_addr: String,
    pub store: StoreKind,
    pub store_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8010".into(),
            store: StoreKind::File,
            store_path: PathBuf::from("./data/blog"),
        }
    }
}

impl std::str::FromStr for StoreKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "memory" => Ok(StoreKind::Memory),
            "file" => Ok(StoreKind::File),
            other => anyhow::bail!("unknown store kind {other:?}, expected `memory` or `file`"),
        }
    }
}

/// `blog.toml` in the working directory if present, then `BLOG_*` env overrides.
pub fn load_settings() -> anyhow::Result<Settings> {
    let raw = match std::fs::read_to_string(SETTINGS_FILE) {
        Ok(it) => Some(it),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
        Err(err) => return Err(err).context(format!("failed to read {SETTINGS_FILE}")),
    };

    let settings = parse_settings(raw.as_deref())?;
    apply_env(settings, |key| std::env::var(key).ok())
}

fn parse_settings(raw: Option<&str>) -> anyhow::Result<Settings> {
    match raw {
        Some(raw) => toml::from_str(raw).with_context(|| format!("failed to parse {SETTINGS_FILE}")),
        None => Ok(Settings::default()),
    }
}

fn apply_env(
    mut settings: Settings,
    var: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    if let Some(v) = var("BLOG_BIND_ADDR") {
        settings.bind_addr = v;
    }
    if let Some(v) = var("BLOG_STORE") {
        settings.store = v.parse()?;
    }
    if let Some(v) = var("BLOG_STORE_PATH") {
        settings.store_path = PathBuf::from(v);
    }

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_without_file_or_env() {
        let settings = apply_env(parse_settings(None).expect("parse"), |_| None).expect("env");
        assert_eq!(settings.bind_addr, "127.0.0.1:8010");
        assert_eq!(settings.store, StoreKind::File);
        assert_eq!(settings.store_path, PathBuf::from("./data/blog"));
    }

    #[test]
    fn file_values_fill_missing_keys_with_defaults() {
        let settings = parse_settings(Some("store = \"memory\"\n")).expect("parse");
        assert_eq!(settings.store, StoreKind::Memory);
        assert_eq!(settings.bind_addr, "127.0.0.1:8010");
    }

    #[test]
    fn env_overrides_file() {
        let env = HashMap::from([
            ("BLOG_BIND_ADDR", "0.0.0.0:9000"),
            ("BLOG_STORE", "file"),
            ("BLOG_STORE_PATH", "/srv/blog"),
        ]);
        let settings = parse_settings(Some("store = \"memory\"\nbind_addr = \"1.2.3.4:1\"\n"))
            .expect("parse");
        let settings =
            apply_env(settings, |key| env.get(key).map(|v| v.to_string())).expect("env");

        assert_eq!(settings.bind_addr, "0.0.0.0:9000");
        assert_eq!(settings.store, StoreKind::File);
        assert_eq!(settings.store_path, PathBuf::from("/srv/blog"));
    }

    #[test]
    fn unknown_store_kind_is_an_error() {
        assert!(apply_env(Settings::default(), |_| Some("redis".into())).is_err());
        assert!(parse_settings(Some("store = \"redis\"")).is_err());
    }
}
