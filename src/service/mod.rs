//! Backup pipelines and the public backup facade.
//!
//! `BackupService` owns the backup store and is the entry point for callers. It
//! composes the capture, clear and restore pipelines, each of which borrows a
//! `GuildClient` for the guild it operates on.

pub mod backup;
pub mod capture;
pub mod clear;
pub mod restore;

#[cfg(test)]
mod test;

pub use backup::BackupService;
pub use capture::CaptureService;
pub use clear::GuildClearService;
pub use restore::RestoreService;
