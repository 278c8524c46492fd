//! Test factories for creating Serenity API objects.
//!
//! This module provides factory functions for creating mock Serenity structs
//! (PartialGuild, Role, GuildChannel) for testing purposes. These factories create
//! valid Serenity objects by deserializing JSON, simulating what Discord's API
//! would return.
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::serenity::{create_test_partial_guild, create_test_role};
//!
//! #[test]
//! fn converts_roles() {
//!     let admin_role = create_test_role(111111111, "Admin", 0xFF0000, 10);
//!     // Convert and assert...
//! }
//! ```
//!
//! # Available Factories
//!
//! - `guild::create_test_partial_guild` - Create Serenity PartialGuild objects
//! - `role::create_test_role` - Create Serenity Role objects
//! - `channel::create_test_channel` - Create Serenity GuildChannel objects

pub mod channel;
pub mod guild;
pub mod role;

// Re-export commonly used functions for convenience
pub use channel::create_test_channel;
pub use guild::create_test_partial_guild;
pub use role::{create_test_managed_role, create_test_role};
