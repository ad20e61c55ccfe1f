//! Common utilities for the sift crates.
//!
//! This crate provides shared infrastructure used by all sift components:
//! - **Warning System** - colored terminal output for rejected or unsupported input

pub mod warning;
