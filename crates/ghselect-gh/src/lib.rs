// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use ghselect_app::Repository;
use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

pub const DEFAULT_GH_PROGRAM: &str = "gh";
const LIST_FIELDS: &str = "nameWithOwner,description,isPrivate";
const INSTALL_URL: &str = "https://cli.github.com";

/// Thin wrapper over the GitHub CLI. Every call spawns one `gh` process.
#[derive(Debug, Clone)]
pub struct GhClient {
    program: PathBuf,
}

impl Default for GhClient {
    fn default() -> Self {
        Self {
            program: PathBuf::from(DEFAULT_GH_PROGRAM),
        }
    }
}

impl GhClient {
    pub fn new(program: impl Into<PathBuf>) -> Result<Self> {
        let program = program.into();
        if program.as_os_str().is_empty() {
            bail!("fetch.gh_path must not be empty");
        }
        Ok(Self { program })
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn list_repositories(&self, limit: usize) -> Result<Vec<Repository>> {
        if limit == 0 {
            bail!("repository limit must be positive");
        }

        let limit = limit.to_string();
        let args = ["repo", "list", "--json", LIST_FIELDS, "--limit", &limit];
        log::debug!("running {} {}", self.program.display(), args.join(" "));

        let output = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|error| spawn_error(&self.program, error))?;

        if !output.status.success() {
            return Err(command_failure(
                "gh repo list",
                output.status,
                &String::from_utf8_lossy(&output.stderr),
            ));
        }

        parse_repository_list(&output.stdout)
    }

    /// Clones into the current directory; `gh` output goes straight to the
    /// user's terminal.
    pub fn clone_repository(&self, name_with_owner: &str) -> Result<()> {
        self.run_interactive("gh repo clone", ["repo", "clone", name_with_owner])
    }

    pub fn open_in_browser(&self, name_with_owner: &str) -> Result<()> {
        self.run_interactive("gh repo view --web", ["repo", "view", name_with_owner, "--web"])
    }

    fn run_interactive<I, S>(&self, what: &str, args: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let status = Command::new(&self.program)
            .args(args)
            .status()
            .map_err(|error| spawn_error(&self.program, error))?;
        if !status.success() {
            bail!("{what} exited with {status}");
        }
        Ok(())
    }
}

/// Decodes the JSON array printed by `gh repo list --json ...`.
pub fn parse_repository_list(stdout: &[u8]) -> Result<Vec<Repository>> {
    serde_json::from_slice(stdout).context("decode `gh repo list` output")
}

fn spawn_error(program: &Path, error: io::Error) -> anyhow::Error {
    if error.kind() == io::ErrorKind::NotFound {
        return anyhow!(
            "cannot run {} -- install the GitHub CLI from {INSTALL_URL} ({error})",
            program.display()
        );
    }
    anyhow!("cannot run {}: {error}", program.display())
}

fn command_failure(what: &str, status: ExitStatus, stderr: &str) -> anyhow::Error {
    let stderr = stderr.trim();
    if stderr.contains("gh auth login") || stderr.contains("not logged in") {
        return anyhow!("{what} failed: not authenticated -- run `gh auth login`");
    }
    if stderr.is_empty() {
        return anyhow!("{what} exited with {status}");
    }
    anyhow!("{what} failed ({status}): {stderr}")
}
