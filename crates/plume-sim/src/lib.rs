//! Smoke propagation: particles, sources, their occupancy ledgers and the
//! global wind walk. Everything here is synchronous and single-threaded; the
//! caller drives ticks serially.

pub mod ledger;
pub mod particle;
pub mod rng;
pub mod source;
pub mod tiers;
pub mod wind;

#[cfg(test)]
mod test_harness;

pub use ledger::{OccupancyLedger, ReconcileStats};
pub use particle::{Fate, Particle, SourceView};
pub use source::{Source, TickStats};
pub use wind::{WindLimits, WindState};
