//! Repository contract for saving and loading NPC trees.

use game_core::EntityId;

use crate::ai::TreeRecord;
use crate::api::Result;

/// Repository for in-flight behavior trees, keyed by entity.
///
/// Records returned by `load` have already been decoded and validated.
pub trait TreeRepository: Send + Sync {
    /// Save a record, replacing any earlier one for the same entity.
    fn save(&self, record: &TreeRecord) -> Result<()>;

    /// Load the record for `entity`, if one was saved.
    fn load(&self, entity: EntityId) -> Result<Option<TreeRecord>>;

    /// Delete the record for `entity`. Missing records are not an error.
    fn delete(&self, entity: EntityId) -> Result<()>;

    /// All entities with a saved record, in ascending order.
    fn list_entities(&self) -> Result<Vec<EntityId>>;

    /// Check if a record exists.
    fn exists(&self, entity: EntityId) -> bool {
        matches!(self.load(entity), Ok(Some(_)))
    }
}
