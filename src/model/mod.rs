pub mod ban;
pub mod channel;
pub mod emoji;
pub mod guild;
pub mod member;
pub mod options;
pub mod role;
pub mod snapshot;

pub use options::{BackupCategory, BackupSource, CaptureOptions, MediaMode, RestoreOptions};
pub use snapshot::{BackupInfo, Snapshot};
