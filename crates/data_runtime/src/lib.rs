//! data_runtime: tuning data, catalogs and save schema.
//!
//! Everything here is plain data plus loaders. Configs resolve under the
//! workspace `data/` directory and fall back to built-in defaults when a file
//! is missing, so tests and tools run from any crate.

pub mod loader;
pub mod save;
pub mod configs {
    pub mod combat;
    pub mod economy;
    pub mod game;
    pub mod telemetry;
    pub mod towers;
    pub mod waves;
    pub mod world;
}
