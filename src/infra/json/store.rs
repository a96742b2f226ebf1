use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::Utc;
use tracing::{debug, warn};

use crate::infra::json::snapshot::Snapshot;
use crate::usecase::ports::store::{PersistedList, SnapshotStore, StoreError};

pub fn load_snapshot(path: &Path) -> anyhow::Result<PersistedList> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(PersistedList::default())
        }
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read snapshot: {}", path.display()))
        }
    };
    match serde_json::from_str::<Snapshot>(&raw) {
        Ok(snapshot) => Ok(snapshot.into()),
        Err(err) => {
            // Unreadable bytes are set aside, never overwritten in place.
            let quarantine = quarantine_path(path);
            fs::rename(path, &quarantine)
                .with_context(|| format!("failed to quarantine snapshot: {}", path.display()))?;
            warn!(
                "snapshot {} is not valid, moved to {} and starting empty: {err}",
                path.display(),
                quarantine.display()
            );
            Ok(PersistedList::default())
        }
    }
}

fn quarantine_path(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("snapshot");
    path.with_file_name(format!("{file_name}.corrupt-{}", Utc::now().timestamp()))
}

pub fn save_snapshot(path: &Path, list: &PersistedList) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| {
            format!("failed to create snapshot directory: {}", parent.display())
        })?;
    }
    let snapshot = Snapshot::from(list);
    let raw = serde_json::to_string_pretty(&snapshot).context("failed to serialize snapshot")?;
    fs::write(path, raw)
        .with_context(|| format!("failed to write snapshot: {}", path.display()))?;
    debug!("saved snapshot {}", path.display());
    Ok(())
}

pub struct JsonSnapshotStore {
    pub path: PathBuf,
}

impl JsonSnapshotStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl SnapshotStore for JsonSnapshotStore {
    fn load(&self) -> Result<PersistedList, StoreError> {
        load_snapshot(&self.path).map_err(|err| StoreError::Message(err.to_string()))
    }

    fn save(&self, list: &PersistedList) -> Result<(), StoreError> {
        save_snapshot(&self.path, list).map_err(|err| StoreError::Message(err.to_string()))
    }
}
