//! Business Logic
//!
//! This module contains pure business logic functions that can be unit tested:
//! - directory: One-level listings rebuilt from flat siapaths
//! - errors: Engine error taxonomy and classification
//! - estimator: Storage estimate from funds and host quotes
//! - formatting: Human-readable sizes
//! - money: Arbitrary-precision currency amounts
//! - path: Siapath matching and joining
//! - redundancy: Redundancy aggregation
//! - search: Free-text file search
//! - selection: Range selection over a view
//! - transfers: Upload and download queues

pub mod directory;
pub mod errors;
pub mod estimator;
pub mod formatting;
pub mod money;
pub mod path;
pub mod redundancy;
pub mod search;
pub mod selection;
pub mod transfers;
