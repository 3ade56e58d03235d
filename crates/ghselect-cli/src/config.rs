// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use ghselect_cache::{APP_NAME, CacheLocation, DEFAULT_FETCH_LIMIT, PlatformCacheDir};
use ghselect_gh::DEFAULT_GH_PROGRAM;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_VERSION: i64 = 1;
pub const CONFIG_PATH_ENV: &str = "GH_SELECT_CONFIG_PATH";
const DEFAULT_CACHE_TTL: &str = "30m";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub cache: Cache,
    #[serde(default)]
    pub fetch: Fetch,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            cache: Cache::default(),
            fetch: Fetch::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Cache {
    pub enabled: Option<bool>,
    pub ttl: Option<String>,
    pub dir: Option<String>,
}

impl Default for Cache {
    fn default() -> Self {
        Self {
            enabled: Some(true),
            ttl: Some(DEFAULT_CACHE_TTL.to_owned()),
            dir: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Fetch {
    pub limit: Option<i64>,
    pub gh_path: Option<String>,
}

impl Default for Fetch {
    fn default() -> Self {
        Self {
            limit: Some(DEFAULT_FETCH_LIMIT as i64),
            gh_path: Some(DEFAULT_GH_PROGRAM.to_owned()),
        }
    }
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os(CONFIG_PATH_ENV) {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!("cannot resolve config directory; set {CONFIG_PATH_ENV} to the config file")
        })?;
        Ok(config_root.join(APP_NAME).join("config.toml"))
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
                    "config file {} has no version; add `version = 1` and put values under [cache] and [fetch]",
                    path.display()
                )
            })?;

        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1",
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
        if let Some(ttl) = &self.cache.ttl {
            let parsed = parse_duration(ttl)
                .with_context(|| format!("invalid cache.ttl in {}", path.display()))?;
            if parsed.is_zero() {
                bail!(
                    "cache.ttl in {} must be positive, got {}",
                    path.display(),
                    ttl
                );
            }
        }

        if let Some(dir) = &self.cache.dir
            && dir.trim().is_empty()
        {
            bail!(
                "cache.dir in {} must not be empty; remove it to use the default",
                path.display()
            );
        }

        if let Some(limit) = self.fetch.limit
            && limit <= 0
        {
            bail!(
                "fetch.limit in {} must be positive, got {}",
                path.display(),
                limit
            );
        }

        if let Some(gh_path) = &self.fetch.gh_path
            && gh_path.trim().is_empty()
        {
            bail!("fetch.gh_path in {} must not be empty", path.display());
        }

        Ok(())
    }

    pub fn cache_enabled(&self) -> bool {
        self.cache.enabled.unwrap_or(true)
    }

    pub fn cache_ttl(&self) -> Result<time::Duration> {
        let raw = self.cache.ttl.as_deref().unwrap_or(DEFAULT_CACHE_TTL);
        let parsed = parse_duration(raw)?;
        time::Duration::try_from(parsed).with_context(|| format!("cache.ttl {raw:?} is too large"))
    }

    /// Explicit `cache.dir` wins over `GH_SELECT_CACHE_DIR` and the platform
    /// cache directory.
    pub fn cache_dir(&self) -> Result<PathBuf> {
        match &self.cache.dir {
            Some(dir) => Ok(PathBuf::from(dir)),
            None => PlatformCacheDir.cache_dir(),
        }
    }

    pub fn fetch_limit(&self) -> usize {
        self.fetch
            .limit
            .and_then(|limit| usize::try_from(limit).ok())
            .unwrap_or(DEFAULT_FETCH_LIMIT)
    }

    pub fn gh_path(&self) -> &str {
        self.fetch.gh_path.as_deref().unwrap_or(DEFAULT_GH_PROGRAM)
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# gh-select config\n# Place this file at: {}\n\nversion = 1\n\n[cache]\nenabled = true\n# <N>ms, <N>s, <N>m or <N>h\nttl = \"{}\"\n# Optional. Default is the platform cache dir (for example ~/.cache/gh-select)\n# dir = \"/absolute/path/to/cache\"\n\n[fetch]\nlimit = {}\ngh_path = \"{}\"\n",
            path.display(),
            DEFAULT_CACHE_TTL,
            DEFAULT_FETCH_LIMIT,
            DEFAULT_GH_PROGRAM,
        )
    }
}

fn parse_duration(raw: &str) -> Result<Duration> {
    let invalid = || format!("invalid duration {raw:?}");
    if let Some(value) = raw.strip_suffix("ms") {
        let millis: u64 = value.parse().with_context(invalid)?;
        return Ok(Duration::from_millis(millis));
    }
    if let Some(value) = raw.strip_suffix('s') {
        let secs: u64 = value.parse().with_context(invalid)?;
        return Ok(Duration::from_secs(secs));
    }
    if let Some(value) = raw.strip_suffix('m') {
        let mins: u64 = value.parse().with_context(invalid)?;
        return Ok(Duration::from_secs(mins.saturating_mul(60)));
    }
    if let Some(value) = raw.strip_suffix('h') {
        let hours: u64 = value.parse().with_context(invalid)?;
        return Ok(Duration::from_secs(hours.saturating_mul(3600)));
    }

    bail!("invalid duration {raw:?}; use one of: <N>ms, <N>s, <N>m, <N>h (for example 30m)")
}
