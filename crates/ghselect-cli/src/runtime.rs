// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use ghselect_app::{ActionKind, Repository, SelectionOutcome};
use ghselect_cache::RepositorySource;
use ghselect_gh::GhClient;
use std::io::Write;

pub const NO_REPOSITORY_MESSAGE: &str = "No repository selected";
pub const NO_ACTION_MESSAGE: &str = "No action selected";

/// Feeds the data provider from the `gh` CLI.
#[derive(Debug, Clone)]
pub struct GhRuntime {
    client: GhClient,
}

impl GhRuntime {
    pub fn new(client: GhClient) -> Self {
        Self { client }
    }
}

impl RepositorySource for GhRuntime {
    fn fetch_repositories(&mut self, limit: usize) -> Result<Vec<Repository>> {
        self.client.list_repositories(limit)
    }
}

/// Side effects that need the outside world: a subprocess or the clipboard.
pub trait ActionHost {
    fn clone_repository(&mut self, name_with_owner: &str) -> Result<()>;
    fn open_in_browser(&mut self, name_with_owner: &str) -> Result<()>;
    fn copy_to_clipboard(&mut self, text: &str) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct SystemHost {
    client: GhClient,
}

impl SystemHost {
    pub fn new(client: GhClient) -> Self {
        Self { client }
    }
}

impl ActionHost for SystemHost {
    fn clone_repository(&mut self, name_with_owner: &str) -> Result<()> {
        self.client.clone_repository(name_with_owner)
    }

    fn open_in_browser(&mut self, name_with_owner: &str) -> Result<()> {
        self.client.open_in_browser(name_with_owner)
    }

    // Contents may not outlive the process on X11 without a clipboard manager.
    fn copy_to_clipboard(&mut self, text: &str) -> Result<()> {
        let mut clipboard = arboard::Clipboard::new().context("open clipboard")?;
        clipboard
            .set_text(text)
            .context("write text to clipboard")?;
        Ok(())
    }
}

/// Turns a finished selection into user-visible output and side effects.
pub fn execute_outcome<H, W>(outcome: &SelectionOutcome, host: &mut H, out: &mut W) -> Result<()>
where
    H: ActionHost,
    W: Write,
{
    let (repository, action) = match outcome {
        SelectionOutcome::NoRepository => {
            writeln!(out, "{NO_REPOSITORY_MESSAGE}")?;
            return Ok(());
        }
        SelectionOutcome::Chosen { repository, action } => (repository, action),
    };
    let name = repository.name_with_owner.as_str();

    let Some(action) = action else {
        writeln!(out, "{NO_ACTION_MESSAGE}")?;
        return Ok(());
    };
    log::debug!("running {} for {name}", action.as_str());

    match action {
        ActionKind::Clone => {
            writeln!(out, "\nCloning {name}...")?;
            out.flush()?;
            host.clone_repository(name)?;
        }
        ActionKind::CopyName => {
            host.copy_to_clipboard(name)
                .context("Failed to copy to clipboard")?;
            writeln!(out, "\nCopied {name} to clipboard!")?;
        }
        ActionKind::CopyUrl => {
            let url = repository.web_url();
            host.copy_to_clipboard(&url)
                .context("Failed to copy to clipboard")?;
            writeln!(out, "\nCopied {url} to clipboard!")?;
        }
        ActionKind::Open => {
            writeln!(out, "\nOpening in browser...")?;
            out.flush()?;
            host.open_in_browser(name)?;
        }
        ActionKind::Print => {
            writeln!(out, "{name}")?;
        }
    }
    Ok(())
}
