//! Record store module
//!
//! The persistence layer is an external collaborator; this module defines
//! the read-only seam the engine consumes and an in-memory implementation
//! backed by a YAML dataset.

mod memory;
mod traits;

pub use memory::{Dataset, MemoryStore};
pub use traits::*;

#[cfg(test)]
pub(crate) mod testdata {
    use super::{Dataset, MemoryStore};

    const DIRECTORY: &str = include_str!("../../data/directory.yml");

    pub fn dataset() -> Dataset {
        serde_yaml::from_str(DIRECTORY).expect("bundled dataset parses")
    }

    pub fn store() -> MemoryStore {
        MemoryStore::new(dataset()).expect("bundled dataset is consistent")
    }
}
