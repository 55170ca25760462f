//! Smoke source registry and scheduling over a sparse voxel grid.
//!
//! `SmokeEngine` owns every source and the global wind. Hosts feed it
//! outer ticks from a `TickClock` and tell it when regions and columns
//! load or unload.

pub mod clock;
pub mod column;
pub mod commands;
pub mod engine;
pub mod grid;
pub mod lifecycle;

#[cfg(test)]
mod test_support;

pub use clock::{FixedStepClock, TickClock};
pub use column::{Column, ColumnState};
pub use commands::CommandError;
pub use engine::{EngineError, EngineTickStats, SmokeEngine};
pub use grid::VoxelGrid;
