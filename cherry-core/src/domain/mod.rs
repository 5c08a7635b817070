//! Core domain types
//!
//! This module contains the core domain structures used across the cherry crates.
//! These types are shared between the orchestrator (which owns and mutates them)
//! and the CLI (which renders them).

pub mod cherry;
pub mod marketplace;
pub mod pipeline;
pub mod settings;
pub mod spec;
