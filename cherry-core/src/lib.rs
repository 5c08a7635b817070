//! Cherry Core
//!
//! Core types and abstractions for the cherry bowl build toolchain.
//!
//! This crate contains:
//! - Domain types: Core business entities (Cherry, Settings, BuildSpecification, PipelineRun)
//! - DTOs: Data transfer objects for talking to the Spec Generator service

pub mod domain;
pub mod dto;
