use super::*;

fn snapshot(id: &str) -> Snapshot {
    serde_json::from_value(fixture::snapshot::document(id)).unwrap()
}

/// Tests storing and reading back a backup.
///
/// Expected: Ok(snapshot) equal to the stored one
#[tokio::test]
async fn puts_and_gets_backup() -> Result<(), AppError> {
    let test = TestBuilder::new().build().unwrap();
    let repo = BackupRepository::new(test.storage_dir().unwrap())?;
    let stored = snapshot("1owner");

    repo.put(&stored, false).await?;
    let loaded = repo.get("owner", "1owner").await?;

    assert_eq!(loaded, stored);

    Ok(())
}

/// Tests that pretty printing only changes the layout of the file.
///
/// Expected: pretty file larger, both parse to the same backup
#[tokio::test]
async fn pretty_prints_on_request() -> Result<(), AppError> {
    let test = TestBuilder::new().build().unwrap();
    let repo = BackupRepository::new(test.storage_dir().unwrap())?;

    repo.put(&snapshot("compact"), false).await?;
    repo.put(&snapshot("pretty"), true).await?;

    let compact = repo.size_kib("", "compact").await?;
    let pretty = repo.size_kib("", "pretty").await?;
    assert!(pretty > compact);
    assert_eq!(
        repo.get("", "pretty").await?.roles,
        repo.get("", "compact").await?.roles
    );

    Ok(())
}

/// Tests that writing an existing id replaces the document.
///
/// Expected: the second write wins
#[tokio::test]
async fn overwrites_existing_backup() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_backup(fixture::snapshot::document("1owner"))
        .build()
        .unwrap();
    let repo = BackupRepository::new(test.storage_dir().unwrap())?;
    let mut replacement = snapshot("1owner");
    replacement.name = "Renamed".to_string();

    repo.put(&replacement, false).await?;

    assert_eq!(repo.get("owner", "1owner").await?.name, "Renamed");
    assert_eq!(repo.list("owner").await?.len(), 1);

    Ok(())
}

/// Tests reading backups that do not exist or belong to another owner.
///
/// Expected: Err(NotFound) for both
#[tokio::test]
async fn get_requires_owned_existing_id() {
    let test = TestBuilder::new()
        .with_backup(fixture::snapshot::document("1bob"))
        .build()
        .unwrap();
    let repo = BackupRepository::new(test.storage_dir().unwrap()).unwrap();

    let missing = repo.get("bob", "2bob").await;
    let foreign = repo.get("alice", "1bob").await;

    assert!(matches!(missing, Err(AppError::NotFound(_))));
    assert!(matches!(foreign, Err(AppError::NotFound(_))));
}

/// Tests that a stored file which is not a backup is reported as such.
///
/// Expected: Err(JsonErr)
#[tokio::test]
async fn get_rejects_malformed_file() {
    let test = TestBuilder::new()
        .with_backup(serde_json::json!({ "id": "1owner" }))
        .build()
        .unwrap();
    let repo = BackupRepository::new(test.storage_dir().unwrap()).unwrap();

    let result = repo.get("owner", "1owner").await;

    assert!(matches!(result, Err(AppError::JsonErr(_))));
}

/// Tests listing ignores files that are not backups.
///
/// Expected: only `.json` stems containing the owner, sorted
#[tokio::test]
async fn lists_owned_json_files() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_backup(fixture::snapshot::document("2owner"))
        .with_backup(fixture::snapshot::document("1owner"))
        .with_backup(fixture::snapshot::document("1other"))
        .build()
        .unwrap();
    let dir = test.storage_dir().unwrap();
    std::fs::write(dir.join("3owner.txt"), "not a backup")?;
    let repo = BackupRepository::new(dir)?;

    assert_eq!(repo.list("owner").await?, vec!["1owner", "2owner"]);
    assert_eq!(repo.list("").await?.len(), 3);

    Ok(())
}

/// Tests deleting owned, missing and foreign backups.
///
/// Expected: owned removed; NotFound for the others with the store unchanged
#[tokio::test]
async fn deletes_only_owned_backups() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_backup(fixture::snapshot::document("1owner"))
        .with_backup(fixture::snapshot::document("1other"))
        .build()
        .unwrap();
    let repo = BackupRepository::new(test.storage_dir().unwrap())?;

    let foreign = repo.delete("owner", "1other").await;
    let missing = repo.delete("owner", "5owner").await;
    assert!(matches!(foreign, Err(AppError::NotFound(_))));
    assert!(matches!(missing, Err(AppError::NotFound(_))));
    assert_eq!(repo.list("").await?.len(), 2);

    repo.delete("owner", "1owner").await?;
    assert_eq!(repo.list("").await?, vec!["1other"]);

    Ok(())
}

/// Tests that ids which would escape the storage directory are refused.
///
/// Expected: BadRequest on write, NotFound on read
#[tokio::test]
async fn rejects_path_ids() {
    let test = TestBuilder::new().build().unwrap();
    let repo = BackupRepository::new(test.storage_dir().unwrap()).unwrap();

    let write = repo.put(&snapshot("../escape"), false).await;
    let read = repo.get("", "..").await;

    assert!(matches!(write, Err(AppError::BadRequest(_))));
    assert!(matches!(read, Err(AppError::NotFound(_))));
}

/// Tests creating a repository in a directory that does not exist yet.
///
/// Expected: directory created, trailing separator stripped from the root
#[tokio::test]
async fn creates_missing_root() -> Result<(), AppError> {
    let test = TestBuilder::new().build().unwrap();
    let root = test.storage_dir().unwrap().join("nested").join("backups");

    let repo = BackupRepository::new(format!("{}/", root.display()))?;

    assert!(root.is_dir());
    assert_eq!(repo.root(), root.as_path());

    Ok(())
}
