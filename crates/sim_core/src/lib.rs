//! sim_core: tick-driven tower-defense simulation.
//!
//! A [`GameState`] owns the entity store, the provider backends and every
//! piece of session state. Each call to [`GameState::update`] runs the
//! systems in a fixed order (see [`schedule`]). Rendering, physics and audio
//! are reached only through the traits in [`providers`].

pub mod effects;
pub mod events;
pub mod geom;
pub mod headless;
mod lifecycle;
pub mod persist;
pub mod progress;
pub mod providers;
pub mod schedule;
pub mod shooting;
mod spawn;
pub mod state;
pub mod systems;
pub mod telemetry;
pub mod towers;
pub mod waves;

pub use events::{GameEvent, GameOverReason};
pub use providers::{AudioProvider, Backends, PhysicsProvider, RenderProvider, Sound};
pub use shooting::ShotOutcome;
pub use state::GameState;
pub use towers::{GridCell, PlacementError};
