//! Persisted form of an entity's tree.
//!
//! A [`TreeRecord`] carries the whole tree including in-flight cursors,
//! budgets, chosen branches, and cooldowns, so a restored NPC resumes
//! mid-decision. Records travel as `serde_json::Value`; decoding is strict and
//! never yields a partially built tree.

use game_core::EntityId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::BehaviorTree;
use crate::api::{Result, RuntimeError};
use crate::repository::RepositoryError;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TreeRecord {
    pub entity: EntityId,
    pub tree: BehaviorTree,
    /// Whether the root has been armed. Unarmed trees are initialised on
    /// their next tick; a missing field restarts the tree.
    #[serde(default)]
    pub initialized: bool,
}

impl TreeRecord {
    pub fn new(entity: EntityId, tree: BehaviorTree, initialized: bool) -> Self {
        Self {
            entity,
            tree,
            initialized,
        }
    }

    pub fn encode(&self) -> Result<Value> {
        serde_json::to_value(self)
            .map_err(|e| RuntimeError::from(RepositoryError::Json(e.to_string())))
    }

    /// Parses and validates a record.
    ///
    /// Unknown node tags, missing fields, and structurally invalid trees
    /// (empty composites, cursors past the end, percentages over 100) are
    /// all rejected with [`RuntimeError::MalformedTree`].
    pub fn decode(value: Value) -> Result<Self> {
        let record: TreeRecord =
            serde_json::from_value(value).map_err(|e| RuntimeError::MalformedTree(e.to_string()))?;
        record.validate()?;
        Ok(record)
    }

    /// Checks that the tree can be resumed as recorded.
    ///
    /// An armed record must also be tickable without `init`: no finished
    /// composite and no unrolled random choice on its active path.
    pub fn validate(&self) -> Result<()> {
        let checked = if self.initialized {
            self.tree.validate_armed()
        } else {
            self.tree.validate()
        };
        checked.map_err(|e| RuntimeError::MalformedTree(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::ai::presets;
    use crate::config::AiConfig;

    #[test]
    fn encode_then_reencode_is_stable() {
        let record = TreeRecord::new(
            EntityId(4),
            presets::ranged_skirmisher(&AiConfig::default()),
            true,
        );

        let value = record.encode().unwrap();
        let decoded = TreeRecord::decode(value.clone()).unwrap();

        assert_eq!(decoded, record);
        assert_eq!(decoded.encode().unwrap(), value);
    }

    #[test]
    fn unknown_leaf_is_rejected() {
        let value = json!({
            "entity": 1,
            "tree": { "Leaf": { "Teleport": null } },
        });
        assert!(matches!(
            TreeRecord::decode(value),
            Err(RuntimeError::MalformedTree(_))
        ));
    }

    #[test]
    fn missing_leaf_field_is_rejected() {
        let value = json!({
            "entity": 1,
            "tree": { "Leaf": { "FireProjectileBurst": { "skip_ticks": 2 } } },
        });
        assert!(matches!(
            TreeRecord::decode(value),
            Err(RuntimeError::MalformedTree(_))
        ));
    }

    #[test]
    fn cursor_past_the_end_is_rejected() {
        let value = json!({
            "entity": 1,
            "tree": {
                "Sequence": {
                    "children": [{ "Leaf": { "PredictShot": null } }],
                    "cursor": 5,
                }
            },
            "initialized": true,
        });
        let error = TreeRecord::decode(value).unwrap_err();
        assert!(matches!(error, RuntimeError::MalformedTree(_)));
    }

    #[test]
    fn armed_choice_without_a_branch_is_rejected() {
        let value = json!({
            "entity": 3,
            "tree": {
                "RandomChoice": {
                    "percent": 50,
                    "first": { "Leaf": { "SeekTarget": null } },
                    "second": { "Leaf": { "PredictShot": null } },
                    "chosen": null,
                }
            },
            "initialized": true,
        });
        assert!(matches!(
            TreeRecord::decode(value),
            Err(RuntimeError::MalformedTree(_))
        ));
    }

    #[test]
    fn armed_finished_sequence_is_rejected() {
        let finished = |initialized: bool| {
            json!({
                "entity": 3,
                "tree": {
                    "Sequence": {
                        "children": [{ "Leaf": { "PredictShot": null } }],
                        "cursor": 1,
                    }
                },
                "initialized": initialized,
            })
        };
        assert!(matches!(
            TreeRecord::decode(finished(true)),
            Err(RuntimeError::MalformedTree(_))
        ));
        // Unarmed records are re-initialised before their first tick.
        assert!(TreeRecord::decode(finished(false)).is_ok());
    }

    #[test]
    fn missing_initialized_flag_defaults_to_restart() {
        let value = json!({
            "entity": 2,
            "tree": { "Leaf": { "SeekTarget": null } },
        });
        let record = TreeRecord::decode(value).unwrap();
        assert!(!record.initialized);
    }
}
