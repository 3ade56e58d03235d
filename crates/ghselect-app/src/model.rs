// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Deserializer, Serialize};

pub const GITHUB_WEB_ROOT: &str = "https://github.com";

/// A repository as reported by `gh repo list`. The owner/name pair is the
/// unique key; records are replaced wholesale on every fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Repository {
    pub name_with_owner: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(default)]
    pub is_private: bool,
}

impl Repository {
    pub fn new(name_with_owner: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name_with_owner: name_with_owner.into(),
            description: description.into(),
            is_private: false,
        }
    }

    pub fn private(mut self) -> Self {
        self.is_private = true;
        self
    }

    pub fn web_url(&self) -> String {
        format!("{GITHUB_WEB_ROOT}/{}", self.name_with_owner)
    }

    pub const fn visibility(&self) -> Visibility {
        if self.is_private {
            Visibility::Private
        } else {
            Visibility::Public
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Private,
    Public,
}

impl Visibility {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Private => "PRIVATE",
            Self::Public => "PUBLIC",
        }
    }
}

/// Follow-up actions offered once a repository is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ActionKind {
    Clone,
    CopyName,
    CopyUrl,
    Open,
    Print,
}

impl ActionKind {
    pub const ALL: [Self; 5] = [
        Self::Clone,
        Self::CopyName,
        Self::CopyUrl,
        Self::Open,
        Self::Print,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Clone => "clone",
            Self::CopyName => "copy-name",
            Self::CopyUrl => "copy-url",
            Self::Open => "open",
            Self::Print => "print",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "clone" => Some(Self::Clone),
            "copy-name" => Some(Self::CopyName),
            "copy-url" => Some(Self::CopyUrl),
            "open" => Some(Self::Open),
            "print" => Some(Self::Print),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Clone => "Clone",
            Self::CopyName => "Copy Name",
            Self::CopyUrl => "Copy URL",
            Self::Open => "Open",
            Self::Print => "Print",
        }
    }

    pub const fn info(self) -> &'static str {
        match self {
            Self::Clone => "Clone repository to current directory",
            Self::CopyName => "Copy owner/repo to clipboard",
            Self::CopyUrl => "Copy full GitHub URL to clipboard",
            Self::Open => "Open in default browser",
            Self::Print => "Print name and exit",
        }
    }
}

/// Anything the list picker can show. Filtering only ever looks at
/// `filter_value`; `badge` is an optional tag rendered beside the title.
pub trait DisplayItem {
    fn title(&self) -> &str;
    fn description(&self) -> &str;
    fn filter_value(&self) -> &str;

    fn badge(&self) -> Option<Visibility> {
        None
    }
}

impl DisplayItem for Repository {
    fn title(&self) -> &str {
        &self.name_with_owner
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn filter_value(&self) -> &str {
        &self.name_with_owner
    }

    fn badge(&self) -> Option<Visibility> {
        Some(self.visibility())
    }
}

impl DisplayItem for ActionKind {
    fn title(&self) -> &str {
        self.label()
    }

    fn description(&self) -> &str {
        self.info()
    }

    fn filter_value(&self) -> &str {
        self.label()
    }
}
