//! In-memory TreeRepository implementation for tests and local runs.

use std::collections::HashMap;
use std::sync::RwLock;

use game_core::EntityId;

use crate::ai::TreeRecord;
use crate::api::Result;
use crate::repository::{RepositoryError, TreeRepository};

/// In-memory implementation of TreeRepository.
///
/// Stores records indexed by entity for testing and local development.
pub struct InMemoryTreeRepo {
    records: RwLock<HashMap<EntityId, TreeRecord>>,
}

impl InMemoryTreeRepo {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryTreeRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeRepository for InMemoryTreeRepo {
    fn save(&self, record: &TreeRecord) -> Result<()> {
        let mut records = self
            .records
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        records.insert(record.entity, record.clone());
        Ok(())
    }

    fn load(&self, entity: EntityId) -> Result<Option<TreeRecord>> {
        let records = self
            .records
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(records.get(&entity).cloned())
    }

    fn delete(&self, entity: EntityId) -> Result<()> {
        let mut records = self
            .records
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        records.remove(&entity);
        Ok(())
    }

    fn list_entities(&self) -> Result<Vec<EntityId>> {
        let records = self
            .records
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let mut entities: Vec<EntityId> = records.keys().copied().collect();
        entities.sort_unstable();
        Ok(entities)
    }

    fn exists(&self, entity: EntityId) -> bool {
        self.records
            .read()
            .map(|records| records.contains_key(&entity))
            .unwrap_or(false)
    }
}
