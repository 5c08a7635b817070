//! Data Transfer Objects for the Spec Generator service
//!
//! DTOs are the exact JSON shapes exchanged with the remote service.

pub mod spec;
