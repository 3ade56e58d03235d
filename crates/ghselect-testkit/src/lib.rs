// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use ghselect_app::Repository;
use std::collections::BTreeSet;
use std::path::PathBuf;

const OWNERS: [&str; 10] = [
    "acme",
    "octo-org",
    "northwind",
    "initech",
    "umbrella-labs",
    "globex",
    "hooli",
    "stark-dev",
    "wayne-tools",
    "tyrell",
];

const NAME_PREFIXES: [&str; 16] = [
    "api", "web", "cli", "core", "infra", "docs", "data", "auth", "edge", "mobile", "search",
    "billing", "deploy", "metrics", "design", "sdk",
];

const NAME_SUFFIXES: [&str; 10] = [
    "", "-service", "-gateway", "-client", "-worker", "-kit", "-ui", "-rs", "-go", "-scripts",
];

const DESCRIPTION_WORDS: [&str; 24] = [
    "fast",
    "minimal",
    "internal",
    "experimental",
    "service",
    "library",
    "tooling",
    "dashboard",
    "pipeline",
    "frontend",
    "backend",
    "terminal",
    "deployment",
    "configuration",
    "automation",
    "monitoring",
    "schema",
    "generator",
    "prototype",
    "integration",
    "reference",
    "workspace",
    "runtime",
    "plugin",
];

/// Seeded generator for repository lists; the same seed always yields the
/// same records in the same order.
#[derive(Debug, Clone)]
pub struct RepoFaker {
    state: u64,
    seen: BTreeSet<String>,
}

impl RepoFaker {
    pub fn new(seed: u64) -> Self {
        let normalized = if seed == 0 { 1 } else { seed };
        Self {
            state: normalized,
            seen: BTreeSet::new(),
        }
    }

    // splitmix64
    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    fn below(&mut self, bound: usize) -> usize {
        match bound {
            0 | 1 => 0,
            _ => (self.next_u64() % bound as u64) as usize,
        }
    }

    fn coin(&mut self) -> bool {
        self.next_u64() >> 63 == 1
    }

    pub fn repository(&mut self) -> Repository {
        let name = self.unique_name();
        let description = if self.below(4) == 0 {
            String::new()
        } else {
            self.sentence(2, 12)
        };
        let is_private = self.coin();
        Repository {
            name_with_owner: name,
            description,
            is_private,
        }
    }

    pub fn repositories(&mut self, count: usize) -> Vec<Repository> {
        (0..count).map(|_| self.repository()).collect()
    }

    fn unique_name(&mut self) -> String {
        let base = format!(
            "{}/{}{}",
            self.pick(&OWNERS),
            self.pick(&NAME_PREFIXES),
            self.pick(&NAME_SUFFIXES),
        );
        let mut candidate = base.clone();
        let mut counter = 2;
        while self.seen.contains(&candidate) {
            candidate = format!("{base}-{counter}");
            counter += 1;
        }
        self.seen.insert(candidate.clone());
        candidate
    }

    fn pick<'a>(&mut self, items: &'a [&'a str]) -> &'a str {
        items[self.below(items.len())]
    }

    fn sentence(&mut self, min_words: usize, max_words: usize) -> String {
        let span = max_words.saturating_sub(min_words) + 1;
        let count = min_words + self.below(span);
        let mut parts = Vec::with_capacity(count);
        for _ in 0..count {
            parts.push(self.pick(&DESCRIPTION_WORDS));
        }
        let mut sentence = parts.join(" ");
        if let Some(first) = sentence.get_mut(0..1) {
            first.make_ascii_uppercase();
        }
        sentence
    }
}

/// The two-repository dataset used by the end-to-end selection scenarios.
pub fn scenario_repositories() -> Vec<Repository> {
    vec![
        Repository::new("acme/api", ""),
        Repository::new("acme/web", "frontend app").private(),
    ]
}

/// Renders repositories the way `gh repo list --json ...` prints them.
pub fn gh_list_json(repositories: &[Repository]) -> Result<String> {
    serde_json::to_string_pretty(repositories).context("encode gh repo list fixture")
}

pub fn temp_cache_dir() -> Result<(tempfile::TempDir, PathBuf)> {
    let dir = tempfile::tempdir().context("create temp dir")?;
    let cache_dir = dir.path().join("gh-select");
    Ok((dir, cache_dir))
}
