// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use ghselect_app::Repository;

use crate::{CacheSlot, CacheStore, Clock, SystemClock};

pub const DEFAULT_FETCH_LIMIT: usize = 1000;

/// Upstream collaborator that knows how to list repositories.
pub trait RepositorySource {
    fn fetch_repositories(&mut self, limit: usize) -> Result<Vec<Repository>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataOrigin {
    Cache,
    Fetched,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    pub repositories: Vec<Repository>,
    pub origin: DataOrigin,
}

/// Fetch-or-serve: one cache read, at most one fetch, and a best-effort
/// cache write after a successful fetch.
#[derive(Debug)]
pub struct DataProvider<R, S, C = SystemClock> {
    source: R,
    cache: Option<CacheStore<S, C>>,
}

impl<R, S, C> DataProvider<R, S, C>
where
    R: RepositorySource,
    S: CacheSlot,
    C: Clock,
{
    pub fn new(source: R, cache: CacheStore<S, C>) -> Self {
        Self {
            source,
            cache: Some(cache),
        }
    }

    /// Provider for when no cache slot could be resolved; every call fetches.
    pub fn without_cache(source: R) -> Self {
        Self {
            source,
            cache: None,
        }
    }

    pub fn source(&self) -> &R {
        &self.source
    }

    pub fn cache(&self) -> Option<&CacheStore<S, C>> {
        self.cache.as_ref()
    }

    pub fn get(&mut self, limit: usize, use_cache: bool) -> Result<Dataset> {
        if use_cache && let Some(cache) = &self.cache {
            match cache.load() {
                Ok(repositories) => {
                    log::debug!("cache hit: {} repositories", repositories.len());
                    return Ok(Dataset {
                        repositories,
                        origin: DataOrigin::Cache,
                    });
                }
                Err(error) => log::debug!("cache miss: {error}"),
            }
        }

        let repositories = self
            .source
            .fetch_repositories(limit)
            .with_context(|| format!("fetch up to {limit} repositories"))?;
        log::info!("fetched {} repositories", repositories.len());

        if let Some(cache) = &mut self.cache
            && let Err(error) = cache.save(&repositories)
        {
            log::warn!("cache write failed, continuing without cache: {error}");
        }

        Ok(Dataset {
            repositories,
            origin: DataOrigin::Fetched,
        })
    }
}
