pub mod error;
pub mod mongo;
pub mod store;

pub use error::SourceError;
pub use mongo::MongoSource;

use repolinks_core::config::{Endpoint, ExtractConfig};
use repolinks_core::{RepositoryRecord, RepositoryUrlIndex, build_index};
use std::path::PathBuf;
use tracing::{error, info};

/// A connected document supplier.
pub enum RecordSource {
    Mongo(MongoSource),
    Local(PathBuf),
}

impl RecordSource {
    pub async fn connect(endpoint: &Endpoint) -> error::Result<Self> {
        match endpoint {
            Endpoint::Mongo(uri) => Ok(RecordSource::Mongo(MongoSource::connect(uri).await?)),
            Endpoint::Sqlite(path) => Ok(RecordSource::Local(path.clone())),
        }
    }

    /// `database` only applies to MongoDB; a local store file is its own database.
    pub async fn fetch_records(
        &self,
        database: &str,
        collection: &str,
    ) -> error::Result<Vec<RepositoryRecord>> {
        match self {
            RecordSource::Mongo(source) => source.fetch_records(database, collection).await,
            RecordSource::Local(path) => {
                store::fetch_local_records(path.clone(), collection.to_string()).await
            }
        }
    }

    pub async fn close(self) {
        if let RecordSource::Mongo(source) = self {
            source.shutdown().await;
        }
    }
}

/// Retrieve every document named by `config` and build its URL index.
///
/// Retrieval failures are logged and produce an empty index rather than an
/// error, so the caller can finish the run normally.
pub async fn gather_index(config: &ExtractConfig) -> RepositoryUrlIndex {
    match fetch_all(config).await {
        Ok(records) => {
            let index = build_index(records);
            info!(
                "Indexed {} repositories ({} URLs)",
                index.len(),
                index.total_urls()
            );
            index
        }
        Err(e) => {
            error!("Error retrieving repository URLs: {}", e);
            RepositoryUrlIndex::new()
        }
    }
}

async fn fetch_all(config: &ExtractConfig) -> error::Result<Vec<RepositoryRecord>> {
    info!("Connecting to {}", config.endpoint.redacted());

    let source = RecordSource::connect(&config.endpoint).await?;
    let records = source
        .fetch_records(&config.database, &config.collection)
        .await;
    source.close().await;

    records
}
