use crate::error::Result;
use futures::TryStreamExt;
use mongodb::Client;
use mongodb::bson::{Bson, Document, doc};
use repolinks_core::{RepositoryRecord, Scalar, Structure};
use tracing::{debug, info};

const REPO_FIELD: &str = "repo";
const STRUCTURE_FIELD: &str = "structure";

pub struct MongoSource {
    client: Client,
}

impl MongoSource {
    /// Parse the connection string and set up the client. The driver connects
    /// lazily, so an unreachable server only shows up on the first query.
    pub async fn connect(uri: &str) -> Result<Self> {
        let client = Client::with_uri_str(uri).await?;
        Ok(Self { client })
    }

    /// Read every document of `database.collection` in one go.
    pub async fn fetch_records(
        &self,
        database: &str,
        collection: &str,
    ) -> Result<Vec<RepositoryRecord>> {
        info!("Fetching documents from {}.{}", database, collection);

        let collection = self
            .client
            .database(database)
            .collection::<Document>(collection);

        let cursor = collection.find(doc! {}).await?;
        let documents: Vec<Document> = cursor.try_collect().await?;
        debug!("Retrieved {} documents", documents.len());

        Ok(documents.into_iter().map(record_from_document).collect())
    }

    pub async fn shutdown(self) {
        self.client.shutdown().await;
    }
}

/// Turn a stored document into a record. A non-string `repo` counts as
/// missing; a `structure` field of any type, null included, counts as present.
pub fn record_from_document(mut document: Document) -> RepositoryRecord {
    let name = match document.remove(REPO_FIELD) {
        Some(Bson::String(name)) => Some(name),
        _ => None,
    };
    let structure = document.remove(STRUCTURE_FIELD).map(structure_from_bson);

    RepositoryRecord::new(name, structure)
}

pub fn structure_from_bson(value: Bson) -> Structure {
    match value {
        Bson::String(s) => Structure::Text(s),
        Bson::Array(items) => {
            Structure::Sequence(items.into_iter().map(structure_from_bson).collect())
        }
        Bson::Document(entries) => Structure::Mapping(
            entries
                .into_iter()
                .map(|(key, value)| (key, structure_from_bson(value)))
                .collect(),
        ),
        Bson::Null | Bson::Undefined => Structure::Scalar(Scalar::Null),
        Bson::Boolean(b) => Structure::Scalar(Scalar::Bool(b)),
        Bson::Double(n) => Structure::Scalar(Scalar::Number(n)),
        Bson::Int32(n) => Structure::Scalar(Scalar::Integer(i64::from(n))),
        Bson::Int64(n) => Structure::Scalar(Scalar::Integer(n)),
        _ => Structure::Scalar(Scalar::Opaque),
    }
}
