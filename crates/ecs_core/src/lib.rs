//! ecs_core: entity store and component definitions for the Bastion sim.
//!
//! The store is a small hand-rolled table keyed by monotonically increasing
//! [`EntityId`]s. Every entity owns at most one component of each
//! [`ComponentKind`]; the set of kinds is closed and matched exhaustively.

pub mod components;
pub mod store;

pub use components::{
    AiState, BodyHandle, BodyRef, ColliderHandle, Combat, Component, ComponentKind, EnemyInfo,
    EntityId, Health, MeshHandle, MeshRef, Transform,
};
pub use store::{EntityStore, StoreError};
