//! Network layer subsystem.
//!
//! # Design Decisions
//! - Bind failures are fatal; the relay never runs half-initialized
//! - Host names are resolved at bind time, so "localhost:4040" works

pub mod listener;

pub use listener::{bind, ListenerError};
