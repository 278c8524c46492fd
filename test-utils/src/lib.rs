//! Guild Backup Test Utils
//!
//! Provides shared testing utilities for the guild backup crate. This crate offers a
//! builder pattern for creating test contexts with temporary backup storage, fixtures
//! for backup documents, and factories for Serenity API models.
//!
//! # Overview
//!
//! - **TestBuilder**: Fluent builder for configuring test environments
//! - **TestContext**: Test environment owning a temporary storage directory
//! - **TestError**: Error types that can occur during test setup
//! - **fixture**: Backup documents as JSON values
//! - **serenity**: Serenity model factories built from Discord API JSON
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::{builder::TestBuilder, fixture};
//!
//! #[tokio::test]
//! async fn test_backup_listing() -> Result<(), TestError> {
//!     let test = TestBuilder::new()
//!         .with_backup(fixture::snapshot::document("1owner"))
//!         .build()?;
//!
//!     let dir = test.storage_dir().unwrap();
//!     // Point a repository at `dir`...
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod fixture;
pub mod serenity;
