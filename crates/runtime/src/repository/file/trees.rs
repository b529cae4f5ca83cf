//! File-based TreeRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use game_core::EntityId;

use crate::ai::TreeRecord;
use crate::api::Result;
use crate::repository::{RepositoryError, TreeRepository};

/// File-based implementation of TreeRepository.
///
/// # File Format
///
/// Records are stored as `tree_{entity}.json`, pretty-printed JSON of
/// [`TreeRecord`], so saved NPC state can be read and diffed by hand. Writes
/// go to a temporary file first and are renamed into place.
pub struct FileTreeRepository {
    base_dir: PathBuf,
}

impl FileTreeRepository {
    /// Create a new file-based tree repository, creating `base_dir` if needed.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir).map_err(RepositoryError::Io)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get the path to a record file.
    fn record_path(&self, entity: EntityId) -> PathBuf {
        self.base_dir.join(format!("tree_{}.json", entity.0))
    }
}

impl TreeRepository for FileTreeRepository {
    fn save(&self, record: &TreeRecord) -> Result<()> {
        let path = self.record_path(record.entity);
        let temp_path = path.with_extension("json.tmp");

        let bytes = serde_json::to_vec_pretty(&record.encode()?)
            .map_err(|e| RepositoryError::Json(e.to_string()))?;

        fs::write(&temp_path, bytes).map_err(RepositoryError::Io)?;
        fs::rename(&temp_path, &path).map_err(RepositoryError::Io)?;

        tracing::debug!("Saved tree[{}] to {}", record.entity, path.display());

        Ok(())
    }

    fn load(&self, entity: EntityId) -> Result<Option<TreeRecord>> {
        let path = self.record_path(entity);

        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path).map_err(RepositoryError::Io)?;
        let value: serde_json::Value =
            serde_json::from_slice(&bytes).map_err(|e| RepositoryError::Json(e.to_string()))?;
        let record = TreeRecord::decode(value)?;

        if record.entity != entity {
            return Err(RepositoryError::CorruptedData(format!(
                "{} holds a tree for {}",
                path.display(),
                record.entity
            ))
            .into());
        }

        tracing::debug!("Loaded tree[{}] from {}", entity, path.display());

        Ok(Some(record))
    }

    fn delete(&self, entity: EntityId) -> Result<()> {
        let path = self.record_path(entity);

        if path.exists() {
            fs::remove_file(&path).map_err(RepositoryError::Io)?;
            tracing::debug!("Deleted tree[{}]", entity);
        }

        Ok(())
    }

    fn list_entities(&self) -> Result<Vec<EntityId>> {
        let mut entities = Vec::new();

        let entries = fs::read_dir(&self.base_dir).map_err(RepositoryError::Io)?;

        for entry in entries {
            let entry = entry.map_err(RepositoryError::Io)?;
            let path = entry.path();

            if let Some(filename) = path.file_name().and_then(|s| s.to_str())
                && let Some(id_str) = filename
                    .strip_prefix("tree_")
                    .and_then(|s| s.strip_suffix(".json"))
                && let Ok(id) = id_str.parse::<u32>()
            {
                entities.push(EntityId(id));
            }
        }

        entities.sort_unstable();
        Ok(entities)
    }

    fn exists(&self, entity: EntityId) -> bool {
        self.record_path(entity).exists()
    }
}
