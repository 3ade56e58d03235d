// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod provider;
pub mod slot;
pub mod store;

pub use provider::*;
pub use slot::*;
pub use store::*;

use anyhow::{Result, anyhow};
use std::env;
use std::path::{Path, PathBuf};

pub const APP_NAME: &str = "gh-select";
pub const CACHE_FILE_NAME: &str = "repos.json";
pub const CACHE_DIR_ENV: &str = "GH_SELECT_CACHE_DIR";

/// Resolves the directory that holds the repository cache file.
pub trait CacheLocation {
    fn cache_dir(&self) -> Result<PathBuf>;

    fn cache_file(&self) -> Result<PathBuf> {
        Ok(self.cache_dir()?.join(CACHE_FILE_NAME))
    }
}

/// Platform cache directory, for example `~/.cache/gh-select`, unless
/// `GH_SELECT_CACHE_DIR` points somewhere else.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlatformCacheDir;

impl CacheLocation for PlatformCacheDir {
    fn cache_dir(&self) -> Result<PathBuf> {
        if let Some(override_dir) = env::var_os(CACHE_DIR_ENV)
            && !override_dir.is_empty()
        {
            return Ok(PathBuf::from(override_dir));
        }

        let cache_root = dirs::cache_dir().ok_or_else(|| {
            anyhow!("cannot resolve cache directory; set {CACHE_DIR_ENV} or XDG_CACHE_HOME")
        })?;
        Ok(cache_root.join(APP_NAME))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedCacheDir(PathBuf);

impl FixedCacheDir {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self(dir.as_ref().to_path_buf())
    }
}

impl CacheLocation for FixedCacheDir {
    fn cache_dir(&self) -> Result<PathBuf> {
        Ok(self.0.clone())
    }
}
