//! Headless scene runner for the smoke engine.

pub mod report;
pub mod runner;
pub mod scenes;
