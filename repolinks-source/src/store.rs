use crate::error::{Result, SourceError};
use repolinks_core::RepositoryRecord;
use repolinks_core::data::Database;
use std::path::PathBuf;
use tracing::info;

/// Read every record of `collection` from the local store at `path`.
///
/// SQLite calls block, so they run on the blocking pool.
pub async fn fetch_local_records(
    path: PathBuf,
    collection: String,
) -> Result<Vec<RepositoryRecord>> {
    if !Database::exists(&path) {
        return Err(SourceError::MissingStore(path.display().to_string()));
    }

    info!("Reading collection {} from {}", collection, path.display());

    let records = tokio::task::spawn_blocking(move || {
        let db = Database::open(&path)?;
        db.get_records_by_collection(&collection)
    })
    .await??;

    Ok(records)
}
