//! Core engine types: RNG and configuration.
//!
//! Board sizes, icon tables and publishing knobs live here so the board,
//! session and publishing layers all read from one place.

pub mod config;
pub mod rng;

pub use config::{BoardSize, IconDef, IconTable, PublishConfig};
pub use rng::GameRng;
