use parking_lot::{Mutex, RwLock};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;
use tutora_core::{CoreResult, LocalConfigCache};

/// Last-writer-wins slot backed by a JSON file on disk.
pub struct FileConfigCache {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileConfigCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LocalConfigCache for FileConfigCache {
    fn read(&self) -> CoreResult<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(None),
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, raw: &str) -> CoreResult<()> {
        let _guard = self.write_lock.lock();
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        // Readers never see a half-written file.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, raw)?;
        fs::rename(&tmp, &self.path)?;
        debug!("Pricing config cached at {}", self.path.display());
        Ok(())
    }
}

/// In-process slot; used in tests and when no cache path is configured.
#[derive(Default)]
pub struct MemoryConfigCache {
    slot: RwLock<Option<String>>,
}

impl MemoryConfigCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            slot: RwLock::new(Some(raw.into())),
        }
    }
}

impl LocalConfigCache for MemoryConfigCache {
    fn read(&self) -> CoreResult<Option<String>> {
        Ok(self.slot.read().clone())
    }

    fn write(&self, raw: &str) -> CoreResult<()> {
        *self.slot.write() = Some(raw.to_string());
        Ok(())
    }
}
