//! Linkweight Core Library
//!
//! Computes a display size for every node of a document-link graph from the
//! size of its reachable neighborhood, with manual overrides, exclusion rules,
//! and a periodic per-view refresh driver.

pub mod config;
pub mod error;
pub mod format;
pub mod graph;
pub mod logging;
pub mod note;
pub mod sizing;
pub mod vault;
