//! Data layer for persisted backups.

pub mod backup;

#[cfg(test)]
mod test;

pub use backup::BackupRepository;
