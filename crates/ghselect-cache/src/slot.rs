// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::CacheLocation;

/// Single persistent slot for the cache blob. `read` returns `Ok(None)`
/// when nothing has been stored yet.
pub trait CacheSlot {
    fn describe(&self) -> String;
    fn read(&self) -> io::Result<Option<Vec<u8>>>;
    fn write(&mut self, bytes: &[u8]) -> io::Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn resolve(location: &impl CacheLocation) -> Result<Self> {
        Ok(Self::new(location.cache_file()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CacheSlot for FileSlot {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn read(&self) -> io::Result<Option<Vec<u8>>> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error),
        }
    }

    fn write(&mut self, bytes: &[u8]) -> io::Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, bytes)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySlot {
    bytes: Option<Vec<u8>>,
}

impl MemorySlot {
    pub fn with_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: Some(bytes.into()),
        }
    }

    pub fn bytes(&self) -> Option<&[u8]> {
        self.bytes.as_deref()
    }
}

impl CacheSlot for MemorySlot {
    fn describe(&self) -> String {
        "memory".to_owned()
    }

    fn read(&self) -> io::Result<Option<Vec<u8>>> {
        Ok(self.bytes.clone())
    }

    fn write(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.bytes = Some(bytes.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{CacheSlot, FileSlot, MemorySlot};
    use crate::FixedCacheDir;
    use anyhow::Result;

    #[test]
    fn file_slot_reports_absent_file_as_none() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let slot = FileSlot::new(temp.path().join("repos.json"));
        assert_eq!(slot.read()?, None);
        Ok(())
    }

    #[test]
    fn file_slot_write_creates_parent_dirs() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let location = FixedCacheDir::new(temp.path().join("nested").join("gh-select"));
        let mut slot = FileSlot::resolve(&location)?;

        slot.write(b"[]")?;
        assert!(slot.path().exists());
        assert_eq!(slot.read()?, Some(b"[]".to_vec()));
        Ok(())
    }

    #[test]
    fn file_slot_overwrites_previous_blob() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let mut slot = FileSlot::new(temp.path().join("repos.json"));
        slot.write(b"first")?;
        slot.write(b"second")?;
        assert_eq!(slot.read()?, Some(b"second".to_vec()));
        Ok(())
    }

    #[test]
    fn memory_slot_starts_empty() -> Result<()> {
        let mut slot = MemorySlot::default();
        assert_eq!(slot.read()?, None);
        slot.write(b"blob")?;
        assert_eq!(slot.bytes(), Some(&b"blob"[..]));
        Ok(())
    }
}
