pub mod config;
pub mod data;
pub mod extract;
pub mod index;
pub mod report;
pub mod structure;

pub use config::{ConfigError, Endpoint, ExtractConfig};
pub use extract::{URL_PREFIX, extract_urls};
pub use index::{RepositoryRecord, RepositoryUrlIndex, UNKNOWN_REPOSITORY, build_index};
pub use structure::{Scalar, Structure};
