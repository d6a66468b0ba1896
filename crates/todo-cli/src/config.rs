// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_VERSION: i64 = 1;
const DEFAULT_ROUTE: &str = "#/";
const DEFAULT_LOG_LEVEL: &str = "info";
const ROUTES: [&str; 4] = ["", "#/", "#/active", "#/completed"];
const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub storage: Storage,
    #[serde(default)]
    pub ui: Ui,
    #[serde(default)]
    pub log: Log,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            storage: Storage::default(),
            ui: Ui::default(),
            log: Log::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Storage {
    pub db_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Ui {
    pub default_route: Option<String>,
}

impl Default for Ui {
    fn default() -> Self {
        Self {
            default_route: Some(DEFAULT_ROUTE.to_owned()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Log {
    pub level: Option<String>,
    pub file: Option<String>,
}

impl Default for Log {
    fn default() -> Self {
        Self {
            level: Some(DEFAULT_LOG_LEVEL.to_owned()),
            file: None,
        }
    }
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os("TODOMVC_CONFIG_PATH") {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!("cannot resolve config directory; set TODOMVC_CONFIG_PATH to the config file")
        })?;

        let app_dir = config_root.join(todo_db::APP_NAME);
        fs::create_dir_all(&app_dir)
            .with_context(|| format!("create config directory {}", app_dir.display()))?;
        Ok(app_dir.join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} is not versioned. Add `version = 1` and keep values under [storage], [ui], and [log]",
                    path.display()
                )
            })?;

        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1. Run `todos --print-example-config` for the current layout",
                version,
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if let Some(db_path) = &self.storage.db_path {
            todo_db::validate_db_path(db_path)?;
        }

        if let Some(route) = &self.ui.default_route
            && !ROUTES.contains(&route.as_str())
        {
            bail!(
                "ui.default_route in {} must be one of \"#/\", \"#/active\", \"#/completed\", got {:?}",
                path.display(),
                route
            );
        }

        if let Some(level) = &self.log.level
            && !LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str())
        {
            bail!(
                "log.level in {} must be one of {}, got {:?}",
                path.display(),
                LOG_LEVELS.join("/"),
                level
            );
        }

        if let Some(file) = &self.log.file
            && file.trim().is_empty()
        {
            bail!(
                "log.file in {} is empty; remove it to use the default log path",
                path.display()
            );
        }

        Ok(())
    }

    pub fn db_path(&self) -> Result<PathBuf> {
        match &self.storage.db_path {
            Some(path) => Ok(PathBuf::from(path)),
            None => todo_db::default_db_path(),
        }
    }

    pub fn default_route(&self) -> &str {
        self.ui.default_route.as_deref().unwrap_or(DEFAULT_ROUTE)
    }

    pub fn log_level(&self) -> String {
        self.log
            .level
            .as_deref()
            .unwrap_or(DEFAULT_LOG_LEVEL)
            .to_ascii_lowercase()
    }

    pub fn log_path(&self) -> Result<PathBuf> {
        if let Some(file) = &self.log.file {
            return Ok(PathBuf::from(file));
        }

        let data_root = dirs::data_local_dir().ok_or_else(|| {
            anyhow!("cannot resolve local data directory; set [log].file in the config")
        })?;
        Ok(data_root
            .join(todo_db::APP_NAME)
            .join(format!("{}.log", todo_db::APP_NAME)))
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# todos config\n# Place this file at: {}\n\nversion = 1\n\n[storage]\n# Optional. Default is platform data dir (for example ~/.local/share/todomvc/todomvc.db)\n# db_path = \"/absolute/path/to/todomvc.db\"\n\n[ui]\n# One of \"#/\", \"#/active\", \"#/completed\"\ndefault_route = \"{}\"\n\n[log]\n# TODOMVC_LOG overrides this when set\nlevel = \"{}\"\n# file = \"/absolute/path/to/todomvc.log\"\n",
            path.display(),
            DEFAULT_ROUTE,
            DEFAULT_LOG_LEVEL,
        )
    }
}

/// Checks a `--route` flag the same way `ui.default_route` is checked.
pub fn validate_route(route: &str) -> Result<()> {
    if ROUTES.contains(&route) {
        return Ok(());
    }
    bail!("unknown route {route:?}; use \"#/\", \"#/active\" or \"#/completed\"")
}
