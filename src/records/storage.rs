use super::types::{RecordStore, RECORD_STORE_VERSION};
use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Get the default record file path (~/.config/point-score/records.json)
pub fn get_records_path() -> Result<PathBuf> {
    Ok(crate::config::get_config_dir()?.join("records.json"))
}

/// Load score records from a JSON file
///
/// If the file doesn't exist, returns a new empty store.
/// If the file exists but has an unsupported version, returns an error.
pub fn load_records(path: &Path) -> Result<RecordStore> {
    if !path.exists() {
        return Ok(RecordStore::new());
    }

    let file = File::open(path)
        .with_context(|| format!("Failed to open record file at {}", path.display()))?;

    let store: RecordStore = serde_json::from_reader(file)
        .with_context(|| format!("Failed to load records from {}", path.display()))?;

    if store.version != RECORD_STORE_VERSION {
        anyhow::bail!("Unsupported record file version: {}", store.version);
    }

    Ok(store)
}

/// Save score records to a JSON file atomically
///
/// The file is never left half-written. Parent directories are created.
pub fn save_records(path: &Path, store: &RecordStore) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    serde_json::to_writer_pretty(&mut file, store).context("Failed to serialize records")?;

    file.commit().context("Failed to save records")?;

    Ok(())
}
