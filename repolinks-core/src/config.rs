// Run configuration: where to read documents from and where to write the report

use crate::report::ReportFormat;
use std::path::PathBuf;
use thiserror::Error;

pub const URI_ENV_VAR: &str = "MONGODB_URI";
pub const DEFAULT_DATABASE: &str = "myDatabase";
pub const DEFAULT_COLLECTION: &str = "repoStructures";
pub const DEFAULT_OUTPUT: &str = "repository_urls.txt";

const SQLITE_SCHEME: &str = "sqlite://";
const MONGO_SCHEMES: [&str; 2] = ["mongodb://", "mongodb+srv://"];

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("MONGODB_URI environment variable not set (or pass --uri)")]
    MissingUri,

    #[error("Unsupported connection endpoint '{0}' (expected mongodb://, mongodb+srv:// or sqlite://)")]
    UnsupportedScheme(String),
}

/// Where documents are read from.
#[derive(Debug, Clone, PartialEq)]
pub enum Endpoint {
    /// A MongoDB connection string, passed to the driver untouched.
    Mongo(String),
    /// A local SQLite document store.
    Sqlite(PathBuf),
}

impl Endpoint {
    pub fn parse(uri: &str) -> Result<Self, ConfigError> {
        let uri = uri.trim();

        if MONGO_SCHEMES.iter().any(|scheme| uri.starts_with(scheme)) {
            return Ok(Endpoint::Mongo(uri.to_string()));
        }

        if let Some(path) = uri.strip_prefix(SQLITE_SCHEME) {
            if path.is_empty() {
                return Err(ConfigError::UnsupportedScheme(uri.to_string()));
            }
            let expanded = shellexpand::tilde(path);
            return Ok(Endpoint::Sqlite(PathBuf::from(expanded.as_ref())));
        }

        Err(ConfigError::UnsupportedScheme(uri.to_string()))
    }

    /// Printable form that never leaks credentials embedded in a Mongo URI.
    pub fn redacted(&self) -> String {
        match self {
            Endpoint::Mongo(uri) => match (uri.find("://"), uri.rfind('@')) {
                (Some(scheme_end), Some(at)) if at > scheme_end => {
                    format!("{}://***@{}", &uri[..scheme_end], &uri[at + 1..])
                }
                _ => uri.clone(),
            },
            Endpoint::Sqlite(path) => format!("{}{}", SQLITE_SCHEME, path.display()),
        }
    }
}

/// Everything an extraction run needs.
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    pub endpoint: Endpoint,
    pub database: String,
    pub collection: String,
    pub output: PathBuf,
    pub format: ReportFormat,
}

impl ExtractConfig {
    /// Build a config from an optional connection string, using the stock
    /// database, collection and output names.
    ///
    /// A missing or blank connection string is fatal: nothing can be retrieved
    /// without it.
    pub fn from_uri(uri: Option<&str>) -> Result<Self, ConfigError> {
        let uri = uri
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .ok_or(ConfigError::MissingUri)?;

        Ok(Self {
            endpoint: Endpoint::parse(uri)?,
            database: DEFAULT_DATABASE.to_string(),
            collection: DEFAULT_COLLECTION.to_string(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            format: ReportFormat::Text,
        })
    }

    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    pub fn with_format(mut self, format: ReportFormat) -> Self {
        self.format = format;
        self
    }
}
