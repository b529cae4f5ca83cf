//! Behavior-tree AI runtime for turn-based NPCs.
//!
//! This crate drives one [`behavior_tree`] per NPC against a host world it
//! only sees through narrow capabilities: a read-only [`WorldView`], a
//! [`MovementSink`] for directional steps, and a [`ProjectileSink`] for shots.
//! Trees can be snapshotted mid-decision and persisted through a
//! [`TreeRepository`].
//!
//! Modules are organized by responsibility:
//! - [`ai`] hosts the engine, the leaf nodes, and preset trees
//! - [`api`] exposes the types downstream clients interact with
//! - [`config`] holds tuning knobs and their environment overrides
//! - [`repository`] persists tree records
//! - [`sandbox`] is a minimal host world for tools and tests
pub mod ai;
pub mod api;
pub mod config;
pub mod repository;
pub mod sandbox;

pub use ai::{AiContext, AiEngine, BehaviorTree, NpcAction, TickReport, TickState, TreeRecord};
pub use api::{MovementSink, Pose, ProjectileSink, Result, RuntimeError, WorldView};
pub use config::AiConfig;
pub use repository::{FileTreeRepository, InMemoryTreeRepo, RepositoryError, TreeRepository};
pub use sandbox::{Hop, Projectile, Sandbox};
