pub mod file;
pub mod memory;
pub mod traits;

pub use file::JsonFileStore;
pub use memory::InMemoryStore;
pub use traits::{BlogStore, StoreHandle};

use gazette_base::GazetteResult;
use tracing::info;

/// Connection string selecting the in-memory store.
pub const MEMORY_STORE: &str = ":memory:";

/// Opens the store described by a connection string.
///
/// [`MEMORY_STORE`] selects the in-memory store; any other value is
/// treated as the path of a JSON file store.
pub fn open_store(database: &str) -> GazetteResult<StoreHandle> {
    if database == MEMORY_STORE {
        info!("using in-memory store");
        Ok(StoreHandle::new(InMemoryStore::new()))
    } else {
        info!(path = database, "using JSON file store");
        Ok(StoreHandle::new(JsonFileStore::open(database)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_store_selects_memory_backend() {
        let store = open_store(":memory:").unwrap();
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn test_open_store_selects_file_backend() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("posts.db.json");
        let store = open_store(path.to_str().unwrap()).unwrap();
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn test_open_store_propagates_backend_errors() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("posts.db.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(open_store(path.to_str().unwrap()).is_err());
    }
}
