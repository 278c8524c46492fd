use crate::{data::backup::BackupRepository, error::AppError, model::Snapshot};
use test_utils::{builder::TestBuilder, fixture};

mod backup;
