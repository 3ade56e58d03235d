// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use ghselect_app::Repository;
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::io;
use thiserror::Error;
use time::{Duration, OffsetDateTime};

use crate::CacheSlot;

pub const CACHE_FORMAT_VERSION: u32 = 1;
pub const DEFAULT_TTL: Duration = Duration::minutes(30);

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("no cached repositories")]
    NotFound,

    #[error(
        "cached repositories expired ({}s old, ttl {}s)",
        .age.whole_seconds(),
        .ttl.whole_seconds()
    )]
    Expired { age: Duration, ttl: Duration },

    #[error("cached repositories are unreadable: {0}")]
    Corrupt(String),

    #[error("cache I/O failed for {slot}: {source}")]
    Io {
        slot: String,
        #[source]
        source: io::Error,
    },

    #[error("encode repository cache: {0}")]
    Encode(#[from] serde_json::Error),
}

impl CacheError {
    /// Load failures that just mean "go fetch instead".
    pub fn is_miss(&self) -> bool {
        matches!(
            self,
            Self::NotFound | Self::Expired { .. } | Self::Corrupt(_) | Self::Io { .. }
        )
    }
}

pub trait Clock {
    fn now(&self) -> OffsetDateTime;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}

/// Clock that only moves when told to.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Cell<OffsetDateTime>,
}

impl ManualClock {
    pub fn new(now: OffsetDateTime) -> Self {
        Self {
            now: Cell::new(now),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn set(&self, now: OffsetDateTime) {
        self.now.set(now);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> OffsetDateTime {
        self.now.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> OffsetDateTime {
        (**self).now()
    }
}

#[derive(Debug, Deserialize)]
struct CacheHeader {
    version: u32,
    #[serde(with = "time::serde::rfc3339")]
    stored_at: OffsetDateTime,
}

#[derive(Debug, Deserialize)]
struct CacheEnvelope {
    repositories: Vec<Repository>,
}

#[derive(Debug, Serialize)]
struct CacheEnvelopeRef<'a> {
    version: u32,
    #[serde(with = "time::serde::rfc3339")]
    stored_at: OffsetDateTime,
    repositories: &'a [Repository],
}

/// TTL-bounded cache of the last fetched repository list. The timestamp
/// lives inside the blob, so expiry does not depend on file metadata.
#[derive(Debug)]
pub struct CacheStore<S, C = SystemClock> {
    slot: S,
    clock: C,
    ttl: Duration,
}

impl<S: CacheSlot> CacheStore<S, SystemClock> {
    pub fn new(slot: S) -> Self {
        Self::with_clock(slot, SystemClock, DEFAULT_TTL)
    }
}

impl<S: CacheSlot, C: Clock> CacheStore<S, C> {
    pub fn with_clock(slot: S, clock: C, ttl: Duration) -> Self {
        Self { slot, clock, ttl }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn slot(&self) -> &S {
        &self.slot
    }

    pub fn save(&mut self, repositories: &[Repository]) -> Result<(), CacheError> {
        let envelope = CacheEnvelopeRef {
            version: CACHE_FORMAT_VERSION,
            stored_at: self.clock.now(),
            repositories,
        };
        let bytes = serde_json::to_vec(&envelope)?;
        self.slot.write(&bytes).map_err(|source| CacheError::Io {
            slot: self.slot.describe(),
            source,
        })
    }

    /// Returns the cached list only while `now - stored_at <= ttl`.
    pub fn load(&self) -> Result<Vec<Repository>, CacheError> {
        let bytes = self
            .slot
            .read()
            .map_err(|source| CacheError::Io {
                slot: self.slot.describe(),
                source,
            })?
            .ok_or(CacheError::NotFound)?;

        let header: CacheHeader = serde_json::from_slice(&bytes)
            .map_err(|error| CacheError::Corrupt(error.to_string()))?;
        if header.version != CACHE_FORMAT_VERSION {
            return Err(CacheError::Corrupt(format!(
                "unsupported cache format version {} (expected {CACHE_FORMAT_VERSION})",
                header.version
            )));
        }

        let age = self.clock.now() - header.stored_at;
        if age > self.ttl {
            return Err(CacheError::Expired { age, ttl: self.ttl });
        }

        let envelope: CacheEnvelope = serde_json::from_slice(&bytes)
            .map_err(|error| CacheError::Corrupt(error.to_string()))?;
        Ok(envelope.repositories)
    }
}
