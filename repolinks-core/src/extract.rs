use crate::structure::Structure;
use std::collections::HashSet;

/// Only strings starting with this prefix are collected.
pub const URL_PREFIX: &str = "https://";

/// Collect every distinct `https://` string reachable through the mappings and
/// sequences of `structure`. Mapping keys are never inspected.
///
/// Walks an explicit worklist instead of recursing, so the nesting depth of
/// the input is only limited by memory.
pub fn extract_urls(structure: &Structure) -> HashSet<String> {
    let mut urls = HashSet::new();
    let mut pending: Vec<&Structure> = vec![structure];

    while let Some(item) = pending.pop() {
        match item {
            Structure::Text(s) => {
                if s.starts_with(URL_PREFIX) {
                    urls.insert(s.clone());
                }
            }
            Structure::Sequence(items) => pending.extend(items.iter()),
            Structure::Mapping(entries) => pending.extend(entries.values()),
            Structure::Scalar(_) => {}
        }
    }

    urls
}
