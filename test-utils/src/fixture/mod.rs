//! Test fixtures providing reusable backup documents.
//!
//! Fixtures are plain JSON values in the stored backup format. They are not tied to
//! the crate's Rust types so they also catch accidental changes to the file format.

pub mod snapshot;
