//! Sia renter view library
//!
//! Derives directory listings, transfer queues, search results, range
//! selections and storage estimates from raw daemon records.

pub mod api;
pub mod config;
pub mod logic;
