//! # rdl-core
//!
//! Core types, seed catalog, and error types for Redline.
//!
//! This crate provides the foundational types shared across all Redline crates:
//! - Entity structs for checklists, comments, and contract projects
//! - Status enums with state machine transitions
//! - Project code formatting helpers
//! - Cross-cutting error types
//! - The static checklist and project catalog used to seed new sessions
//! - The export table payload handed to renderers
//! - CLI response types

pub mod catalog;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod export;
pub mod ids;
pub mod responses;
