// Store document persistence
// Saved to <data_dir>/stockbook/store_v1.json after every mutation

use std::fs;
use std::path::{Path, PathBuf};

use stockbook_engine::model::Store;

/// Persistence seam injected into callers: engines stay pure transforms,
/// the repository owns load/save.
pub trait StoreRepository {
    /// None when no document exists or the document is unreadable.
    fn load(&self) -> Option<Store>;

    fn save(&self, store: &Store) -> Result<(), String>;

    /// Load, falling back to the seeded first-run document. Non-fatal on a
    /// missing or corrupt file.
    fn load_or_seed(&self) -> Store {
        self.load().unwrap_or_else(Store::seed)
    }
}

/// File-backed repository holding the whole aggregate as one JSON document.
#[derive(Debug, Clone)]
pub struct JsonStoreFile {
    path: PathBuf,
}

impl JsonStoreFile {
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("stockbook")
            .join(format!("store_v{}.json", crate::STORE_FORMAT_VERSION))
    }

    pub fn new() -> Self {
        Self { path: Self::default_path() }
    }

    /// Repository over an explicit path, for tests and portable setups.
    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for JsonStoreFile {
    fn default() -> Self {
        Self::new()
    }
}

impl StoreRepository for JsonStoreFile {
    fn load(&self) -> Option<Store> {
        fs::read_to_string(&self.path)
            .ok()
            .and_then(|s| serde_json::from_str(&s).ok())
    }

    fn save(&self, store: &Store) -> Result<(), String> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }
        let json = serde_json::to_string_pretty(store).map_err(|e| e.to_string())?;
        fs::write(&self.path, json).map_err(|e| e.to_string())
    }
}
