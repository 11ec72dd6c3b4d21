// Repository records and the per-repository URL index built from them

use crate::extract::extract_urls;
use crate::structure::Structure;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Name used for documents that carry no repository name.
pub const UNKNOWN_REPOSITORY: &str = "Unknown";

/// One retrieved document: a repository name and its stored layout, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct RepositoryRecord {
    pub name: String,
    pub structure: Option<Structure>,
}

impl RepositoryRecord {
    pub fn new(name: Option<String>, structure: Option<Structure>) -> Self {
        Self {
            name: name.unwrap_or_else(|| UNKNOWN_REPOSITORY.to_string()),
            structure,
        }
    }
}

/// Repository name mapped to its deduplicated URLs.
///
/// Names iterate in sorted order and each URL list is sorted, so printing and
/// reports are stable between runs. The order carries no meaning beyond that.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RepositoryUrlIndex {
    entries: BTreeMap<String, Vec<String>>,
}

impl RepositoryUrlIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `urls` under `name`, returning the list it replaced.
    pub fn insert(&mut self, name: String, mut urls: Vec<String>) -> Option<Vec<String>> {
        urls.sort();
        urls.dedup();
        self.entries.insert(name, urls)
    }

    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.entries.get(name).map(Vec::as_slice)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_urls(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(name, urls)| (name.as_str(), urls.as_slice()))
    }
}

/// Extract the URLs of every record that has a structure.
///
/// Records without a structure are skipped outright. When two records share a
/// name the later one wins; the overwrite is logged so re-synced or clashing
/// repositories do not go unnoticed.
pub fn build_index<I>(records: I) -> RepositoryUrlIndex
where
    I: IntoIterator<Item = RepositoryRecord>,
{
    let mut index = RepositoryUrlIndex::new();

    for record in records {
        let Some(structure) = record.structure else {
            debug!("Skipping {}: no structure stored", record.name);
            continue;
        };

        let urls: Vec<String> = extract_urls(&structure).into_iter().collect();
        debug!("{}: {} unique URLs", record.name, urls.len());

        if let Some(previous) = index.insert(record.name.clone(), urls) {
            warn!(
                "Repository '{}' appears more than once; replacing {} earlier URLs",
                record.name,
                previous.len()
            );
        }
    }

    index
}
