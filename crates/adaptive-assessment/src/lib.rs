//! Adaptive assessment engine.
//!
//! Turns candidate responses into quantitative signals, scores them against question rubrics,
//! steers question difficulty from recent performance, and tracks prior scenario themes so
//! new scenarios avoid repeating them. Every engine component is a pure function of its
//! inputs; persistence and generative providers stay with the caller.

pub mod config;
pub mod engine;
pub mod error;
pub mod telemetry;
