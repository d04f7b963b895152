//! Gameplay systems, run in order by [`crate::schedule::Schedule`].

pub mod ai;
pub mod combat;
pub mod player;
pub mod sync;
pub mod tower_fire;
pub mod waves;
